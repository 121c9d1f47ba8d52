#![forbid(unsafe_code)]

//! AI Insights screen: model observatory plus rotating insight cards.
//!
//! The model list keeps a click/keyboard selection that drives the detail
//! panel. The insight cards rotate on their own timer while the screen is
//! mounted; the active card is highlighted in the list and expanded on the
//! right.

use std::cell::Cell;
use std::time::Duration;

use ftui_core::event::{Event, KeyCode, MouseButton, MouseEventKind};
use ftui_core::geometry::Rect;
use ftui_layout::{Constraint, Flex};
use ftui_render::frame::Frame;
use ftui_runtime::Cmd;
use ftui_style::Style;
use ftui_text::{Line, Span};
use ftui_widgets::Widget;
use ftui_widgets::progress::ProgressBar;
use insights_core::display::{DisplayAttrs, Icon, Tone};
use insights_core::format::{compact_thousands, fixed, hours_ago, thousands, trim_number};
use insights_core::records::{AiModel, InsightCard};
use insights_core::{Catalog, ModelMetrics, Rotation, Selector};

use super::{
    HelpEntry, Screen, TICK_INTERVAL, badge, header_line, pressed, render_lines, render_panel,
    render_rows, row_at, stat, tagged,
};
use crate::theme;

/// Rows each model occupies in the model list.
const MODEL_ROWS: u16 = 2;

pub struct AiInsights {
    models: Selector<AiModel>,
    insights: Rotation<InsightCard>,
    metrics: ModelMetrics,
    layout_models: Cell<Rect>,
    layout_cards: Cell<Rect>,
}

impl AiInsights {
    pub fn new(
        models: Catalog<AiModel>,
        insights: Catalog<InsightCard>,
        insight_interval: Duration,
    ) -> Self {
        let metrics = ModelMetrics::from_models(&models);
        tracing::debug!(
            models = metrics.model_count,
            active = metrics.active_models,
            avg_accuracy = metrics.average_accuracy,
            "model metrics computed"
        );
        Self {
            models: Selector::new(models),
            insights: Rotation::new(insights, insight_interval),
            metrics,
            layout_models: Cell::new(Rect::default()),
            layout_cards: Cell::new(Rect::default()),
        }
    }

    pub fn models(&self) -> &Selector<AiModel> {
        &self.models
    }

    pub fn insights(&self) -> &Rotation<InsightCard> {
        &self.insights
    }

    pub fn metrics(&self) -> ModelMetrics {
        self.metrics
    }

    fn handle_click(&mut self, x: u16, y: u16) {
        if let Some(row) = row_at(self.layout_models.get(), x, y, MODEL_ROWS) {
            self.models.select_index(row);
        } else if let Some(row) = row_at(self.layout_cards.get(), x, y, 1) {
            self.insights.selector_mut().select_index(row);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let accent = theme::screen_accent::AI_INSIGHTS;
        let m = &self.metrics;
        let mut stats = Line::from_spans(stat("Active AI Models", m.active_models.to_string()));
        for span in stat("  Average Accuracy", format!("{}%", fixed(m.average_accuracy, 1))) {
            stats.push_span(span);
        }
        for span in stat("  Predictions Made", compact_thousands(m.total_predictions)) {
            stats.push_span(span);
        }
        for span in stat("  Total Predictions", thousands(m.total_predictions)) {
            stats.push_span(span);
        }
        stats.push_span(Span::styled("  ", theme::muted()));
        stats.push_span(tagged(
            DisplayAttrs::new(Tone::Green, Icon::Activity, "processing"),
            "AI Processing",
        ));
        render_lines(
            frame,
            area,
            vec![
                header_line(
                    "AI Model Observatory",
                    "Real-time monitoring of machine learning models and predictions",
                    accent,
                ),
                stats,
            ],
        );
    }

    fn render_model_list(&self, frame: &mut Frame, area: Rect) {
        let inner = render_panel(
            frame,
            area,
            "Active AI Models",
            true,
            theme::screen_accent::AI_INSIGHTS,
        );
        self.layout_models.set(inner);
        if inner.is_empty() {
            return;
        }
        let mut lines = Vec::with_capacity(self.models.catalog().len() * 2);
        for (i, model) in self.models.catalog().iter().enumerate() {
            let selected = self.models.is_selected(i);
            let kind = model.kind.display();
            lines.push(Line::from_spans([
                Span::styled(theme::selection_indicator(selected), theme::muted()),
                Span::styled(
                    format!("{} ", theme::icon(kind.icon)),
                    theme::tone_style(kind.tone),
                ),
                Span::styled(model.name.clone(), theme::list_item_style(selected, true)),
                Span::raw(" "),
                badge(model.status.display()),
            ]));
            lines.push(Line::from_spans([
                Span::styled(format!("    {} model · ", model.kind), theme::muted()),
                Span::styled(format!("Acc {}%", trim_number(model.accuracy, 1)), theme::body()),
                Span::styled(" · ", theme::muted()),
                Span::styled(format!("Pred {}", thousands(model.predictions)), theme::body()),
                Span::styled(" · ", theme::muted()),
                Span::styled(
                    format!("Conf {}%", trim_number(model.confidence, 1)),
                    theme::body(),
                ),
                Span::styled(
                    format!(" · {}", hours_ago(model.updated_minutes_ago)),
                    theme::muted(),
                ),
            ]));
        }
        render_rows(frame, inner, lines);
    }

    fn render_model_details(&self, frame: &mut Frame, area: Rect) {
        let inner = render_panel(
            frame,
            area,
            "Model Details",
            false,
            theme::screen_accent::AI_INSIGHTS,
        );
        if inner.is_empty() {
            return;
        }
        let Some(model) = self.models.selected() else {
            render_lines(
                frame,
                inner,
                vec![Line::from_spans([
                    Span::styled(format!("{} ", theme::icon(Icon::Cpu)), theme::muted()),
                    Span::styled("Select a model to view details", theme::muted()),
                ])],
            );
            return;
        };

        let status = model.status.display();
        let mut type_line = Line::from_spans(stat("Type", model.kind.as_str()));
        type_line.push_span(Span::raw("   "));
        type_line.push_span(Span::styled("Status ", theme::muted()));
        type_line.push_span(Span::styled(
            model.status.as_str(),
            theme::tone_style(status.tone),
        ));

        let mut lines = vec![
            Line::styled(model.name.clone(), theme::title()),
            type_line,
            Line::raw(""),
            Line::styled("Performance Metrics", theme::subtitle()),
            Line::from_spans(stat(
                "  Accuracy Rate",
                format!("{}%", trim_number(model.accuracy, 1)),
            )),
            Line::from_spans(stat(
                "  Confidence Level",
                format!("{}%", trim_number(model.confidence, 1)),
            )),
            Line::from_spans(stat("  Total Predictions", thousands(model.predictions))),
        ];
        let capabilities = model.kind.capabilities();
        if !capabilities.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::styled("Model Capabilities", theme::subtitle()));
            for capability in capabilities {
                lines.push(Line::styled(format!("  • {capability}"), theme::body()));
            }
        }
        render_lines(frame, inner, lines);
    }

    fn render_insights(&self, frame: &mut Frame, area: Rect) {
        let inner = render_panel(
            frame,
            area,
            "AI-Generated Business Insights",
            false,
            theme::screen_accent::AI_INSIGHTS,
        );
        if inner.is_empty() {
            return;
        }
        let cols = Flex::horizontal()
            .constraints([Constraint::Percentage(42.0), Constraint::Min(10)])
            .split(inner);
        self.layout_cards.set(cols[0]);

        let selector = self.insights.selector();
        let list = selector
            .catalog()
            .iter()
            .enumerate()
            .map(|(i, card)| {
                let active = selector.is_selected(i);
                let category = card.category.display();
                let row_style = if active {
                    theme::active_card()
                } else {
                    theme::body()
                };
                Line::from_spans([
                    Span::styled(theme::selection_indicator(active), theme::muted()),
                    Span::styled(
                        format!("{} ", theme::icon(category.icon)),
                        theme::tone_style(category.tone),
                    ),
                    Span::styled(card.title.clone(), row_style),
                    Span::raw(" "),
                    badge(card.impact.display()),
                ])
            })
            .collect();
        render_rows(frame, cols[0], list);

        self.render_active_card(frame, cols[1]);
    }

    fn render_active_card(&self, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }
        let Some(card) = self.insights.active() else {
            render_lines(
                frame,
                area,
                vec![Line::styled("No insights available", theme::muted())],
            );
            return;
        };
        let rows = Flex::vertical()
            .constraints([Constraint::Min(1), Constraint::Fixed(1)])
            .split(area);

        let actionable = if card.actionable {
            DisplayAttrs::new(Tone::Green, Icon::Zap, "actionable")
        } else {
            DisplayAttrs::new(Tone::Gray, Icon::Eye, "informational")
        };
        let mut detail = Line::from_spans(stat(
            "AI Confidence",
            format!("{}%", trim_number(card.confidence, 1)),
        ));
        for span in stat("   Timeframe", card.timeframe.clone()) {
            detail.push_span(span);
        }
        let mut source = Line::from_spans([Span::styled(
            format!("Model: {}  ", card.model),
            theme::muted(),
        )]);
        source.push_span(badge(actionable));

        let lines = vec![
            Line::from_spans([
                tagged(card.category.display(), card.title.clone()),
                Span::raw(" "),
                badge(card.impact.display()),
            ]),
            Line::styled(card.insight.clone(), theme::body()),
            Line::raw(""),
            detail,
            source,
        ];
        render_lines(frame, rows[0], lines);

        let timer = self.insights.timer();
        let label = if timer.is_running() {
            let remaining = timer.interval().saturating_sub(timer.elapsed());
            format!("Next insight in {}s", fixed(remaining.as_secs_f64(), 1))
        } else {
            "Rotation paused".to_string()
        };
        ProgressBar::new()
            .ratio(timer.progress())
            .label(&label)
            .style(theme::muted())
            .gauge_style(Style::new().fg(theme::screen_accent::AI_INSIGHTS))
            .render(rows[1], frame);
    }
}

impl Screen for AiInsights {
    type Message = Event;

    fn update(&mut self, event: &Event) -> Cmd<Self::Message> {
        if let Event::Mouse(mouse) = event
            && mouse.kind == MouseEventKind::Down(MouseButton::Left)
        {
            self.handle_click(mouse.x, mouse.y);
            return Cmd::None;
        }

        match pressed(event) {
            Some(KeyCode::Up | KeyCode::Char('k')) => self.models.retreat(),
            Some(KeyCode::Down | KeyCode::Char('j')) => self.models.advance(),
            Some(KeyCode::Escape) => self.models.clear(),
            Some(KeyCode::Left) => self.insights.selector_mut().retreat(),
            Some(KeyCode::Right) => self.insights.selector_mut().advance(),
            Some(KeyCode::Char(' ')) => {
                let running = self.insights.timer_mut().toggle();
                tracing::debug!(running, "insight rotation toggled");
            }
            _ => {}
        }
        Cmd::None
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }
        let rows = Flex::vertical()
            .constraints([
                Constraint::Fixed(2),
                Constraint::Percentage(52.0),
                Constraint::Min(4),
            ])
            .split(area);
        self.render_header(frame, rows[0]);

        let cols = Flex::horizontal()
            .constraints([Constraint::Percentage(58.0), Constraint::Min(10)])
            .split(rows[1]);
        self.render_model_list(frame, cols[0]);
        self.render_model_details(frame, cols[1]);

        self.render_insights(frame, rows[2]);
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry {
                key: "Up/Down, j/k",
                action: "Select model",
            },
            HelpEntry {
                key: "Esc",
                action: "Clear model selection",
            },
            HelpEntry {
                key: "Left/Right",
                action: "Previous / next insight",
            },
            HelpEntry {
                key: "Space",
                action: "Pause / resume insight rotation",
            },
            HelpEntry {
                key: "Click",
                action: "Select model or insight",
            },
        ]
    }

    fn tick(&mut self, _tick_count: u64) {
        self.insights.elapse(TICK_INTERVAL);
    }

    fn mount(&mut self) {
        self.insights.restart();
    }

    fn unmount(&mut self) {
        self.insights.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftui_core::event::{KeyEvent, KeyEventKind, Modifiers, MouseEvent};
    use ftui_render::grapheme_pool::GraphemePool;
    use insights_core::Catalogs;
    use insights_core::records::ModelStatus;

    fn screen() -> AiInsights {
        let catalogs = Catalogs::builtin().unwrap();
        AiInsights::new(catalogs.models, catalogs.insights, Duration::from_secs(5))
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        })
    }

    fn click(x: u16, y: u16) -> Event {
        Event::Mouse(MouseEvent::new(
            MouseEventKind::Down(MouseButton::Left),
            x,
            y,
        ))
    }

    fn buffer_text(frame: &Frame) -> String {
        let mut text = String::new();
        for y in 0..frame.buffer.height() {
            for x in 0..frame.buffer.width() {
                let ch = frame
                    .buffer
                    .get(x, y)
                    .and_then(|cell| cell.content.as_char())
                    .unwrap_or(' ');
                text.push(ch);
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn initial_state() {
        let s = screen();
        assert_eq!(s.models().selected_index(), Some(0));
        assert_eq!(s.insights().active_index(), Some(0));
        assert_eq!(s.metrics().active_models, 3);
    }

    #[test]
    fn rotation_follows_ticks() {
        let mut s = screen();
        for _ in 0..49 {
            s.tick(0);
        }
        assert_eq!(s.insights().active_index(), Some(0));
        s.tick(0);
        assert_eq!(s.insights().active_index(), Some(1));
    }

    #[test]
    fn keyboard_selection() {
        let mut s = screen();
        s.update(&press(KeyCode::Down));
        s.update(&press(KeyCode::Char('j')));
        assert_eq!(s.models().selected_index(), Some(2));
        s.update(&press(KeyCode::Up));
        assert_eq!(s.models().selected_index(), Some(1));
        s.update(&press(KeyCode::Escape));
        assert!(s.models().selected().is_none());
        s.update(&press(KeyCode::Right));
        assert_eq!(s.insights().active_index(), Some(1));
        s.update(&press(KeyCode::Left));
        s.update(&press(KeyCode::Left));
        assert_eq!(s.insights().active_index(), Some(4));
    }

    #[test]
    fn space_pauses_rotation() {
        let mut s = screen();
        s.update(&press(KeyCode::Char(' ')));
        for _ in 0..100 {
            s.tick(0);
        }
        assert_eq!(s.insights().active_index(), Some(0));
        s.update(&press(KeyCode::Char(' ')));
        for _ in 0..50 {
            s.tick(0);
        }
        assert_eq!(s.insights().active_index(), Some(1));
    }

    #[test]
    fn unmount_stops_rotation_and_mount_restarts() {
        let mut s = screen();
        for _ in 0..30 {
            s.tick(0);
        }
        s.unmount();
        for _ in 0..200 {
            s.tick(0);
        }
        assert_eq!(s.insights().active_index(), Some(0));
        assert!(s.insights().timer().is_cancelled());
        s.mount();
        for _ in 0..49 {
            s.tick(0);
        }
        assert_eq!(s.insights().active_index(), Some(0));
        s.tick(0);
        assert_eq!(s.insights().active_index(), Some(1));
    }

    #[test]
    fn click_selects_model_row() {
        let mut s = screen();
        s.layout_models.set(Rect::new(1, 3, 60, 10));
        s.update(&click(5, 3 + 2 * 3));
        assert_eq!(s.models().selected_index(), Some(3));
        s.update(&click(5, 3 + 2 * 9));
        assert_eq!(s.models().selected_index(), Some(3));
    }

    #[test]
    fn click_selects_insight_row() {
        let mut s = screen();
        s.layout_cards.set(Rect::new(1, 20, 40, 5));
        s.update(&click(2, 22));
        assert_eq!(s.insights().active_index(), Some(2));
    }

    #[test]
    fn renders_selected_model_details() {
        let s = screen();
        let mut pool = GraphemePool::new();
        let mut frame = Frame::new(140, 40, &mut pool);
        s.view(&mut frame, Rect::new(0, 0, 140, 40));
        let text = buffer_text(&frame);
        assert!(text.contains("AI Model Observatory"));
        assert!(text.contains("Demand Forecasting Engine"));
        assert!(text.contains("Future trend forecasting"));
        assert!(text.contains("66K"));
    }

    #[test]
    fn renders_placeholder_without_selection() {
        let mut s = screen();
        s.update(&press(KeyCode::Escape));
        let mut pool = GraphemePool::new();
        let mut frame = Frame::new(140, 40, &mut pool);
        s.view(&mut frame, Rect::new(0, 0, 140, 40));
        assert!(buffer_text(&frame).contains("Select a model to view details"));
    }

    #[test]
    fn empty_catalogs_render() {
        let s = AiInsights::new(
            Catalog::empty("models"),
            Catalog::empty("insights"),
            Duration::from_secs(5),
        );
        assert_eq!(s.metrics().average_accuracy, 0.0);
        let mut pool = GraphemePool::new();
        let mut frame = Frame::new(80, 24, &mut pool);
        s.view(&mut frame, Rect::new(0, 0, 80, 24));
        assert!(buffer_text(&frame).contains("No insights available"));
    }

    #[test]
    fn deployed_models_count_as_active() {
        let s = screen();
        let deployed = s
            .models()
            .catalog()
            .iter()
            .filter(|m| m.status == ModelStatus::Deployed)
            .count();
        assert_eq!(s.metrics().active_models, deployed);
    }
}
