#![forbid(unsafe_code)]

//! Predictive Analytics screen: engine metrics, forecasts and strategic
//! recommendations.

use std::cell::Cell;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::time::Duration;

use ftui_core::event::{Event, KeyCode, MouseButton, MouseEventKind};
use ftui_core::geometry::Rect;
use ftui_extras::canvas::{Canvas, Mode, Painter};
use ftui_layout::{Constraint, Flex};
use ftui_render::cell::PackedRgba;
use ftui_render::frame::Frame;
use ftui_runtime::Cmd;
use ftui_style::Style;
use ftui_text::{Line, Span};
use ftui_widgets::Widget;
use ftui_widgets::progress::ProgressBar;
use insights_core::display::{DisplayAttrs, Icon, Tone};
use insights_core::format::{humanize_kebab, metric_value, progress_ratio, trim_number};
use insights_core::mock::{AI_ANALYSIS, RECOMMENDED_ACTIONS};
use insights_core::records::{PerformanceMetric, PredictiveInsight, Recommendation};
use insights_core::{Catalog, Rotation, Selector};

use super::{
    HelpEntry, Screen, TICK_INTERVAL, badge, header_line, pressed, render_lines, render_panel,
    render_rows, row_at, stat, tagged,
};
use crate::theme;

const INSIGHT_ROWS: u16 = 2;
/// Metrics listed in the real-time panel.
const LIVE_METRICS: usize = 4;
/// Radar radius maps `current / target` over `[0, RADAR_CEILING]`.
const RADAR_CEILING: f64 = 1.2;

pub struct PredictiveAnalytics {
    insights: Selector<PredictiveInsight>,
    metrics: Rotation<PerformanceMetric>,
    recommendations: Catalog<Recommendation>,
    layout_insights: Cell<Rect>,
}

impl PredictiveAnalytics {
    pub fn new(
        insights: Catalog<PredictiveInsight>,
        metrics: Catalog<PerformanceMetric>,
        recommendations: Catalog<Recommendation>,
        metric_interval: Duration,
    ) -> Self {
        Self {
            insights: Selector::new(insights),
            metrics: Rotation::new(metrics, metric_interval),
            recommendations,
            layout_insights: Cell::new(Rect::default()),
        }
    }

    pub fn insights(&self) -> &Selector<PredictiveInsight> {
        &self.insights
    }

    pub fn metrics(&self) -> &Rotation<PerformanceMetric> {
        &self.metrics
    }

    pub fn recommendations(&self) -> &Catalog<Recommendation> {
        &self.recommendations
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let accent = theme::screen_accent::PREDICTIVE_ANALYTICS;
        let mut status = match self.metrics.active() {
            Some(metric) => {
                let trend = metric.trend.display();
                let mut line = Line::from_spans(stat(
                    &metric.metric,
                    metric_value(&metric.metric, metric.current),
                ));
                line.push_span(Span::styled(
                    format!(" {}", theme::icon(trend.icon)),
                    theme::tone_style(trend.tone),
                ));
                line
            }
            None => Line::styled("No metrics", theme::muted()),
        };
        status.push_span(Span::raw("   "));
        status.push_span(tagged(
            DisplayAttrs::new(Tone::Green, Icon::Cpu, "active"),
            "AI Active",
        ));
        render_lines(
            frame,
            area,
            vec![
                header_line(
                    "Predictive Analytics Engine",
                    "AI-powered forecasting and intelligent recommendations",
                    accent,
                ),
                status,
            ],
        );
    }

    fn render_radar(&self, frame: &mut Frame, area: Rect) {
        let inner = render_panel(
            frame,
            area,
            "AI System Performance",
            false,
            theme::screen_accent::PREDICTIVE_ANALYTICS,
        );
        if inner.width < 4 || inner.height < 3 {
            return;
        }
        let rows = Flex::vertical()
            .constraints([Constraint::Min(2), Constraint::Fixed(1)])
            .split(inner);

        let metrics = self.metrics.selector().catalog().as_slice();
        let painter = radar_painter(rows[0], metrics);
        Canvas::from_painter(&painter)
            .style(Style::new().fg(theme::fg::MUTED))
            .render(rows[0], frame);

        render_rows(
            frame,
            rows[1],
            vec![Line::from_spans([
                Span::styled("━ current  ", Style::new().fg(theme::screen_accent::PREDICTIVE_ANALYTICS)),
                Span::styled("━ target", theme::muted()),
            ])],
        );
    }

    fn render_live_metrics(&self, frame: &mut Frame, area: Rect) {
        let inner = render_panel(
            frame,
            area,
            "Real-time Metrics",
            false,
            theme::screen_accent::PREDICTIVE_ANALYTICS,
        );
        if inner.is_empty() {
            return;
        }
        let selector = self.metrics.selector();
        let shown: Vec<&PerformanceMetric> =
            selector.catalog().iter().take(LIVE_METRICS).collect();
        if shown.is_empty() {
            render_rows(frame, inner, vec![Line::styled("No metrics", theme::muted())]);
            return;
        }
        let slots = Flex::vertical()
            .constraints(shown.iter().map(|_| Constraint::Fixed(2)))
            .split(inner);
        for (i, (metric, slot)) in shown.iter().zip(slots.iter()).enumerate() {
            if slot.is_empty() {
                continue;
            }
            let active = selector.is_selected(i);
            let trend = metric.trend.display();
            let name_style = if active {
                theme::active_card()
            } else {
                theme::body()
            };
            let label = Rect::new(slot.x, slot.y, slot.width, 1);
            render_rows(
                frame,
                label,
                vec![Line::from_spans([
                    Span::styled(theme::selection_indicator(active), theme::muted()),
                    Span::styled(metric.metric.clone(), name_style),
                    Span::styled(
                        format!(
                            "  {} / {} ",
                            metric_value(&metric.metric, metric.current),
                            metric_value(&metric.metric, metric.target)
                        ),
                        theme::muted(),
                    ),
                    Span::styled(theme::icon(trend.icon), theme::tone_style(trend.tone)),
                ])],
            );
            if slot.height > 1 {
                let bar = Rect::new(slot.x + 2, slot.y + 1, slot.width.saturating_sub(2), 1);
                ProgressBar::new()
                    .ratio(progress_ratio(metric.current, metric.target))
                    .gauge_style(Style::new().fg(theme::tone_color(trend.tone)))
                    .render(bar, frame);
            }
        }
    }

    fn render_insight_list(&self, frame: &mut Frame, area: Rect) {
        let inner = render_panel(
            frame,
            area,
            "Predictive Insights",
            true,
            theme::screen_accent::PREDICTIVE_ANALYTICS,
        );
        self.layout_insights.set(inner);
        if inner.is_empty() {
            return;
        }
        let mut lines = Vec::new();
        for (i, insight) in self.insights.catalog().iter().enumerate() {
            let selected = self.insights.is_selected(i);
            let category = insight.category.display();
            lines.push(Line::from_spans([
                Span::styled(theme::selection_indicator(selected), theme::muted()),
                Span::styled(
                    format!("{} ", theme::icon(category.icon)),
                    theme::tone_style(category.tone),
                ),
                Span::styled(insight.title.clone(), theme::list_item_style(selected, true)),
                Span::raw(" "),
                badge(insight.impact.display()),
            ]));
            lines.push(Line::styled(
                format!(
                    "    {}% confidence · {}",
                    trim_number(insight.confidence, 1),
                    insight.timeframe
                ),
                theme::muted(),
            ));
        }
        render_rows(frame, inner, lines);
    }

    fn render_analysis(&self, frame: &mut Frame, area: Rect) {
        let inner = render_panel(
            frame,
            area,
            "Insight Analysis",
            false,
            theme::screen_accent::PREDICTIVE_ANALYTICS,
        );
        if inner.is_empty() {
            return;
        }
        let Some(insight) = self.insights.selected() else {
            render_lines(
                frame,
                inner,
                vec![Line::from_spans([
                    Span::styled(format!("{} ", theme::icon(Icon::Target)), theme::muted()),
                    Span::styled("Select an insight to view analysis", theme::muted()),
                ])],
            );
            return;
        };

        let risk_tone = if insight.risk_level >= 70.0 {
            Tone::Red
        } else if insight.risk_level >= 30.0 {
            Tone::Amber
        } else {
            Tone::Green
        };
        let mut figures = Line::from_spans(stat(
            "Confidence",
            format!("{}%", trim_number(insight.confidence, 1)),
        ));
        figures.push_span(Span::styled("   Risk Level ", theme::muted()));
        figures.push_span(Span::styled(
            format!("{}%", trim_number(insight.risk_level, 1)),
            theme::tone_style(risk_tone),
        ));

        let mut lines = vec![
            Line::from_spans([tagged(insight.category.display(), insight.title.clone())]),
            Line::styled(insight.prediction.clone(), theme::body()),
            figures,
            Line::raw(""),
            Line::styled("AI Analysis", theme::subtitle()),
        ];
        lines.extend(
            AI_ANALYSIS
                .iter()
                .map(|item| Line::styled(format!("  • {item}"), theme::body())),
        );
        lines.push(Line::styled("Recommended Actions", theme::subtitle()));
        lines.extend(
            RECOMMENDED_ACTIONS
                .iter()
                .map(|item| Line::styled(format!("  → {item}"), theme::body())),
        );
        render_lines(frame, inner, lines);
    }

    fn render_recommendations(&self, frame: &mut Frame, area: Rect) {
        let inner = render_panel(
            frame,
            area,
            "AI-Powered Strategic Recommendations",
            false,
            theme::screen_accent::PREDICTIVE_ANALYTICS,
        );
        if inner.is_empty() || self.recommendations.is_empty() {
            return;
        }
        let count = self.recommendations.len();
        let cards = Flex::horizontal()
            .constraints((0..count).map(|_| Constraint::Fill))
            .split(inner);
        for (rec, card) in self.recommendations.iter().zip(cards.iter()) {
            render_recommendation(rec, frame, *card);
        }
    }
}

fn render_recommendation(rec: &Recommendation, frame: &mut Frame, area: Rect) {
    let kind = rec.kind.display();
    let block_title = humanize_kebab(rec.kind.as_str());
    let inner = render_panel(frame, area, &block_title, false, theme::tone_color(kind.tone));
    if inner.is_empty() {
        return;
    }
    let mut impact = Line::from_spans([
        badge(rec.priority.display()),
        Span::raw(" "),
    ]);
    impact.push_span(Span::styled(
        format!("+{}%", trim_number(rec.expected_impact, 1)),
        theme::success(),
    ));
    impact.push_span(Span::styled(" impact", theme::muted()));
    render_lines(
        frame,
        inner,
        vec![
            Line::from_spans([tagged(kind, rec.title.clone())]),
            impact,
            Line::from_spans(stat(
                "AI confidence",
                format!("{}%", trim_number(rec.ai_confidence, 1)),
            )),
            Line::from_spans(stat("Investment", rec.implementation_cost.clone())),
        ],
    );
}

/// Radar of `current / target` per metric: spokes, the target ring and the
/// current polygon on a braille canvas.
fn radar_painter(area: Rect, metrics: &[PerformanceMetric]) -> Painter {
    let mut painter = Painter::for_area(area, Mode::Braille);
    let (pw, ph) = painter.size();
    if metrics.is_empty() || pw < 4 || ph < 4 {
        return painter;
    }
    let cx = f64::from(pw) / 2.0;
    let cy = f64::from(ph) / 2.0;
    let radius = (cx.min(cy) - 1.0).max(1.0);
    let spoke = |i: usize, scale: f64| {
        let angle = -FRAC_PI_2 + TAU * i as f64 / metrics.len() as f64;
        (
            (cx + radius * scale * angle.cos()).round() as i32,
            (cy + radius * scale * angle.sin()).round() as i32,
        )
    };

    let muted: Option<PackedRgba> = Some(theme::fg::MUTED.into());
    let accent: Option<PackedRgba> = Some(theme::screen_accent::PREDICTIVE_ANALYTICS.into());
    let (ox, oy) = (cx.round() as i32, cy.round() as i32);
    for i in 0..metrics.len() {
        let (x, y) = spoke(i, 1.0);
        painter.line_colored(ox, oy, x, y, muted);
    }

    let target_scale = 1.0 / RADAR_CEILING;
    let current_scale = |m: &PerformanceMetric| radar_scale(m.current, m.target);
    for i in 0..metrics.len() {
        let j = (i + 1) % metrics.len();
        let (x0, y0) = spoke(i, target_scale);
        let (x1, y1) = spoke(j, target_scale);
        painter.line_colored(x0, y0, x1, y1, muted);
        let (x0, y0) = spoke(i, current_scale(&metrics[i]));
        let (x1, y1) = spoke(j, current_scale(&metrics[j]));
        painter.line_colored(x0, y0, x1, y1, accent);
    }
    painter
}

/// Radius fraction for a metric: `current / target` capped at the ceiling.
fn radar_scale(current: f64, target: f64) -> f64 {
    if target <= 0.0 || !target.is_finite() || !current.is_finite() {
        return 0.0;
    }
    (current / target).clamp(0.0, RADAR_CEILING) / RADAR_CEILING
}

impl Screen for PredictiveAnalytics {
    type Message = Event;

    fn update(&mut self, event: &Event) -> Cmd<Self::Message> {
        if let Event::Mouse(mouse) = event
            && mouse.kind == MouseEventKind::Down(MouseButton::Left)
        {
            if let Some(row) = row_at(self.layout_insights.get(), mouse.x, mouse.y, INSIGHT_ROWS) {
                self.insights.select_index(row);
            }
            return Cmd::None;
        }

        match pressed(event) {
            Some(KeyCode::Up | KeyCode::Char('k')) => self.insights.retreat(),
            Some(KeyCode::Down | KeyCode::Char('j')) => self.insights.advance(),
            Some(KeyCode::Escape) => self.insights.clear(),
            Some(KeyCode::Char('n')) => self.metrics.selector_mut().advance(),
            Some(KeyCode::Char(' ')) => {
                let running = self.metrics.timer_mut().toggle();
                tracing::debug!(running, "metric rotation toggled");
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
                Constraint::Percentage(36.0),
                Constraint::Min(6),
                Constraint::Fixed(9),
            ])
            .split(area);
        self.render_header(frame, rows[0]);

        let top = Flex::horizontal()
            .constraints([Constraint::Percentage(45.0), Constraint::Min(20)])
            .split(rows[1]);
        self.render_radar(frame, top[0]);
        self.render_live_metrics(frame, top[1]);

        let middle = Flex::horizontal()
            .constraints([Constraint::Percentage(45.0), Constraint::Min(20)])
            .split(rows[2]);
        self.render_insight_list(frame, middle[0]);
        self.render_analysis(frame, middle[1]);

        self.render_recommendations(frame, rows[3]);
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry {
                key: "Up/Down, j/k",
                action: "Select insight",
            },
            HelpEntry {
                key: "Esc",
                action: "Clear insight selection",
            },
            HelpEntry {
                key: "n",
                action: "Next metric",
            },
            HelpEntry {
                key: "Space",
                action: "Pause / resume metric rotation",
            },
            HelpEntry {
                key: "Click",
                action: "Select insight",
            },
        ]
    }

    fn tick(&mut self, _tick_count: u64) {
        self.metrics.elapse(TICK_INTERVAL);
    }

    fn mount(&mut self) {
        self.metrics.restart();
    }

    fn unmount(&mut self) {
        self.metrics.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftui_core::event::{KeyEvent, KeyEventKind, Modifiers, MouseEvent};
    use ftui_render::grapheme_pool::GraphemePool;
    use insights_core::Catalogs;

    fn screen() -> PredictiveAnalytics {
        let catalogs = Catalogs::builtin().unwrap();
        PredictiveAnalytics::new(
            catalogs.predictions,
            catalogs.metrics,
            catalogs.recommendations,
            Duration::from_secs(3),
        )
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        })
    }

    fn render(s: &PredictiveAnalytics, w: u16, h: u16) -> String {
        let mut pool = GraphemePool::new();
        let mut frame = Frame::new(w, h, &mut pool);
        s.view(&mut frame, Rect::new(0, 0, w, h));
        let mut text = String::new();
        for y in 0..frame.height() {
            for x in 0..frame.width() {
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
    fn metric_rotation_every_three_seconds() {
        let mut s = screen();
        assert_eq!(s.metrics().active_index(), Some(0));
        for _ in 0..30 {
            s.tick(0);
        }
        assert_eq!(s.metrics().active_index(), Some(1));
        for _ in 0..(30 * 5) {
            s.tick(0);
        }
        assert_eq!(s.metrics().active_index(), Some(0));
    }

    #[test]
    fn unmounted_screen_does_not_rotate() {
        let mut s = screen();
        s.unmount();
        for _ in 0..100 {
            s.tick(0);
        }
        assert_eq!(s.metrics().active_index(), Some(0));
        s.mount();
        for _ in 0..30 {
            s.tick(0);
        }
        assert_eq!(s.metrics().active_index(), Some(1));
    }

    #[test]
    fn insight_keys_and_clear() {
        let mut s = screen();
        s.update(&press(KeyCode::Char('j')));
        assert_eq!(s.insights().selected_id(), Some("2"));
        s.update(&press(KeyCode::Escape));
        assert!(s.insights().selected().is_none());
        assert!(render(&s, 140, 45).contains("Select an insight to view analysis"));
        s.update(&press(KeyCode::Down));
        assert_eq!(s.insights().selected_index(), Some(0));
    }

    #[test]
    fn next_metric_key() {
        let mut s = screen();
        s.update(&press(KeyCode::Char('n')));
        s.update(&press(KeyCode::Char('n')));
        assert_eq!(s.metrics().active().map(|m| m.metric.as_str()), Some("Response Time"));
        assert!(render(&s, 140, 45).contains("Response Time 1.2s"));
    }

    #[test]
    fn click_selects_insight() {
        let mut s = screen();
        s.layout_insights.set(Rect::new(1, 20, 50, 8));
        s.update(&Event::Mouse(MouseEvent::new(
            MouseEventKind::Down(MouseButton::Left),
            4,
            26,
        )));
        assert_eq!(s.insights().selected_index(), Some(3));
    }

    #[test]
    fn renders_panels() {
        let s = screen();
        let text = render(&s, 160, 50);
        assert!(text.contains("Predictive Analytics Engine"));
        assert!(text.contains("Real-time Metrics"));
        assert!(text.contains("Wedding Season Demand Surge"));
        assert!(text.contains("Data sources: 15 integrated feeds"));
        assert!(text.contains("Risk mitigation"));
        assert!(text.contains("+28%"));
    }

    #[test]
    fn renders_small_and_empty() {
        let _ = render(&screen(), 30, 8);
        let empty = PredictiveAnalytics::new(
            Catalog::empty("predictions"),
            Catalog::empty("metrics"),
            Catalog::empty("recommendations"),
            Duration::from_secs(3),
        );
        let text = render(&empty, 100, 30);
        assert!(text.contains("No metrics"));
        assert!(text.contains("Select an insight to view analysis"));
    }

    #[test]
    fn radar_scale_caps_and_guards() {
        assert_eq!(radar_scale(0.0, 10.0), 0.0);
        assert!((radar_scale(12.0, 10.0) - 1.0).abs() < 1e-12);
        assert!((radar_scale(50.0, 10.0) - 1.0).abs() < 1e-12);
        assert!((radar_scale(10.0, 10.0) - 1.0 / RADAR_CEILING).abs() < 1e-12);
        assert_eq!(radar_scale(5.0, 0.0), 0.0);
    }
}
