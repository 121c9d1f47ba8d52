#![forbid(unsafe_code)]

//! Visualization Hub screen.
//!
//! A list of visualizations on the left, the selected one charted in the
//! middle and its generated insights on the right. The header carries the
//! local controls: two sliders and the interactive mode toggle.

use std::cell::Cell;

use ftui_core::event::{Event, KeyCode, MouseButton, MouseEventKind};
use ftui_core::geometry::Rect;
use ftui_extras::canvas::{Canvas, Mode, Painter};
use ftui_extras::charts::{BarChart, BarDirection, BarGroup, BarMode, LineChart, Series};
use ftui_layout::{Constraint, Flex};
use ftui_render::cell::PackedRgba;
use ftui_render::frame::Frame;
use ftui_runtime::Cmd;
use ftui_style::Style;
use ftui_text::{Line, Span};
use ftui_widgets::Widget;
use insights_core::Slider;
use insights_core::display::{ChartKind, DisplayAttrs, Icon, Tone};
use insights_core::format::{humanize_kebab, trim_number};
use insights_core::mock::{DATA_QUALITY, RENDER_TIME};
use insights_core::records::{InteractiveFeature, Visualization, VizSamples};
use insights_core::{Catalog, Selector};

use super::{
    HelpEntry, Screen, header_line, pressed, render_lines, render_panel, render_rows, row_at, stat,
    tagged,
};
use crate::theme;

const LIST_ROWS: u16 = 2;
const HEADER_TOGGLES: usize = 3;

/// Which slider the Left/Right keys adjust.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderFocus {
    Speed,
    Points,
}

impl SliderFocus {
    fn toggle(self) -> Self {
        match self {
            Self::Speed => Self::Points,
            Self::Points => Self::Speed,
        }
    }
}

pub struct VisualizationHub {
    visualizations: Selector<Visualization>,
    features: Catalog<InteractiveFeature>,
    speed: Slider,
    points: Slider,
    focus: SliderFocus,
    interactive: bool,
    layout_list: Cell<Rect>,
}

impl VisualizationHub {
    pub fn new(visualizations: Catalog<Visualization>, features: Catalog<InteractiveFeature>) -> Self {
        Self {
            visualizations: Selector::new(visualizations),
            features,
            speed: Slider::animation_speed(),
            points: Slider::data_points(),
            focus: SliderFocus::Speed,
            interactive: true,
            layout_list: Cell::new(Rect::default()),
        }
    }

    pub fn visualizations(&self) -> &Selector<Visualization> {
        &self.visualizations
    }

    pub fn speed(&self) -> &Slider {
        &self.speed
    }

    pub fn points(&self) -> &Slider {
        &self.points
    }

    pub fn focus(&self) -> SliderFocus {
        self.focus
    }

    pub fn interactive(&self) -> bool {
        self.interactive
    }

    fn focused_slider(&mut self) -> &mut Slider {
        match self.focus {
            SliderFocus::Speed => &mut self.speed,
            SliderFocus::Points => &mut self.points,
        }
    }

    fn reset_controls(&mut self) {
        self.speed = Slider::animation_speed();
        self.points = Slider::data_points();
        self.focus = SliderFocus::Speed;
        self.interactive = true;
        tracing::debug!("visualization controls reset");
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let accent = theme::screen_accent::VISUALIZATION_HUB;
        let slider_span = |caption: &str, slider: &Slider, focused: bool| {
            let style = if focused {
                Style::new().fg(accent).bold()
            } else {
                theme::body()
            };
            [
                Span::styled(format!("{caption} "), theme::muted()),
                Span::styled(format!("[{}]", slider.label()), style),
            ]
        };

        let mut controls = Line::from_spans(slider_span(
            "Speed",
            &self.speed,
            self.focus == SliderFocus::Speed,
        ));
        for span in slider_span("  Points", &self.points, self.focus == SliderFocus::Points) {
            controls.push_span(span);
        }
        let mode = if self.interactive {
            DisplayAttrs::new(Tone::Green, Icon::Zap, "enabled")
        } else {
            DisplayAttrs::new(Tone::Gray, Icon::Zap, "disabled")
        };
        controls.push_span(Span::styled("  Interactive ", theme::muted()));
        controls.push_span(Span::styled(
            if self.interactive { "Enabled" } else { "Disabled" },
            theme::tone_style(mode.tone),
        ));

        let mut toggles = Line::default();
        for feature in self.features.iter().take(HEADER_TOGGLES) {
            let marker = if feature.active { "[x]" } else { "[ ]" };
            let style = if feature.active {
                theme::success()
            } else {
                theme::muted()
            };
            toggles.push_span(Span::styled(
                format!("{marker} {} {}  ", theme::icon(feature.icon), feature.name),
                style,
            ));
        }
        toggles.push_span(tagged(
            DisplayAttrs::new(Tone::Green, Icon::Activity, "live"),
            "Live Data",
        ));

        render_lines(
            frame,
            area,
            vec![
                header_line(
                    "Advanced Visualization Hub",
                    "Interactive data exploration and pattern discovery",
                    accent,
                ),
                controls,
                toggles,
            ],
        );
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let inner = render_panel(
            frame,
            area,
            "Visualizations",
            true,
            theme::screen_accent::VISUALIZATION_HUB,
        );
        self.layout_list.set(inner);
        if inner.is_empty() {
            return;
        }
        let mut lines = Vec::new();
        for (i, viz) in self.visualizations.catalog().iter().enumerate() {
            let selected = self.visualizations.is_selected(i);
            let kind = viz.kind.display();
            lines.push(Line::from_spans([
                Span::styled(theme::selection_indicator(selected), theme::muted()),
                Span::styled(
                    format!("{} ", theme::icon(kind.icon)),
                    theme::tone_style(kind.tone),
                ),
                Span::styled(viz.title.clone(), theme::list_item_style(selected, true)),
            ]));
            let interactivity = viz.interactivity.display();
            lines.push(Line::from_spans([
                Span::styled(
                    format!("    {}% complexity · ", trim_number(viz.complexity, 1)),
                    theme::muted(),
                ),
                Span::styled(
                    interactivity.label,
                    theme::tone_style(interactivity.tone),
                ),
            ]));
        }
        render_rows(frame, inner, lines);
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect) {
        let title = self
            .visualizations
            .selected()
            .map_or("Visualization", |viz| viz.title.as_str());
        let inner = render_panel(
            frame,
            area,
            title,
            false,
            theme::screen_accent::VISUALIZATION_HUB,
        );
        if inner.is_empty() {
            return;
        }
        let Some(viz) = self.visualizations.selected() else {
            render_lines(
                frame,
                inner,
                vec![Line::styled("No visualizations available", theme::muted())],
            );
            return;
        };
        if viz.samples.is_empty() {
            render_lines(
                frame,
                inner,
                vec![Line::styled("No samples to chart", theme::muted())],
            );
            return;
        }

        let rows = Flex::vertical()
            .constraints([Constraint::Min(3), Constraint::Fixed(1)])
            .split(inner);
        match viz.kind.chart() {
            ChartKind::Area => render_flow_chart(&viz.samples, frame, rows[0]),
            ChartKind::Scatter => render_scatter(&viz.samples, frame, rows[0]),
            ChartKind::Bar => render_bars(&viz.samples, frame, rows[0]),
        }

        let legend = match &viz.samples {
            VizSamples::Flow(_) => "visitors (% of first stage) · conversion %".to_string(),
            VizSamples::Network(_) => "connections vs. affinity strength".to_string(),
            VizSamples::Correlation(_) => "price vs. perceived quality".to_string(),
            VizSamples::Temporal(_) => format!("{} samples", viz.samples.len()),
        };
        render_lines(frame, rows[1], vec![Line::styled(legend, theme::muted())]);
    }

    fn render_side(&self, frame: &mut Frame, area: Rect) {
        let rows = Flex::vertical()
            .constraints([
                Constraint::Min(5),
                Constraint::Fixed(8),
                Constraint::Fixed(5),
            ])
            .split(area);
        let accent = theme::screen_accent::VISUALIZATION_HUB;

        let inner = render_panel(frame, rows[0], "AI-Generated Insights", false, accent);
        let insights = self
            .visualizations
            .selected()
            .map(|viz| {
                viz.insights
                    .iter()
                    .map(|text| {
                        Line::from_spans([
                            Span::styled(format!("{} ", theme::icon(Icon::Lightbulb)), theme::warning()),
                            Span::styled(text.clone(), theme::body()),
                        ])
                    })
                    .collect()
            })
            .unwrap_or_default();
        render_lines(frame, inner, insights);

        let inner = render_panel(frame, rows[1], "Visualization Features", false, accent);
        let features = self
            .features
            .iter()
            .map(|feature| {
                let (state, style) = if feature.active {
                    ("Active", theme::success())
                } else {
                    ("Inactive", theme::muted())
                };
                Line::from_spans([
                    Span::styled(format!("{} ", theme::icon(feature.icon)), theme::body()),
                    Span::styled(format!("{} ", feature.name), theme::body()),
                    Span::styled(state, style),
                ])
            })
            .collect();
        render_lines(frame, inner, features);

        let inner = render_panel(frame, rows[2], "Performance Metrics", false, accent);
        let interactivity = self
            .visualizations
            .selected()
            .map_or_else(|| "-".to_string(), |viz| humanize_kebab(viz.interactivity.as_str()));
        render_lines(
            frame,
            inner,
            vec![
                Line::from_spans(stat("Render Time", RENDER_TIME)),
                Line::from_spans(stat("Data Quality", DATA_QUALITY)),
                Line::from_spans(stat("Interactivity", interactivity)),
            ],
        );
    }
}

/// Visitors scaled to a percentage of the first stage, plotted with the
/// conversion percentage on a shared 0..100 axis.
fn render_flow_chart(samples: &VizSamples, frame: &mut Frame, area: Rect) {
    let VizSamples::Flow(stages) = samples else {
        render_bars(samples, frame, area);
        return;
    };
    let peak = stages.iter().map(|s| s.visitors).fold(0.0_f64, f64::max);
    let visitors: Vec<(f64, f64)> = stages
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let pct = if peak > 0.0 { s.visitors / peak * 100.0 } else { 0.0 };
            (i as f64, pct)
        })
        .collect();
    let conversion: Vec<(f64, f64)> = stages
        .iter()
        .enumerate()
        .map(|(i, s)| (i as f64, s.conversion.clamp(0.0, 100.0)))
        .collect();
    let labels: Vec<&str> = stages.iter().map(|s| s.stage.as_str()).collect();
    let series = vec![
        Series::new("Visitors", &visitors, theme::accent::INFO.into()).markers(true),
        Series::new("Conversion", &conversion, theme::accent::SUCCESS.into()).markers(true),
    ];
    LineChart::new(series)
        .style(Style::new().fg(theme::fg::PRIMARY))
        .x_bounds(0.0, stages.len().saturating_sub(1).max(1) as f64)
        .y_bounds(0.0, 100.0)
        .x_labels(labels)
        .y_labels(vec!["0", "50", "100"])
        .legend(true)
        .render(area, frame);
}

/// Point cloud normalized to the painter's pixel grid.
fn render_scatter(samples: &VizSamples, frame: &mut Frame, area: Rect) {
    if area.width < 2 || area.height < 2 {
        return;
    }
    let points = samples.scatter_points();
    let mut painter = Painter::for_area(area, Mode::Braille);
    let (pw, ph) = painter.size();
    let (max_x, max_y) = (i32::from(pw) - 1, i32::from(ph) - 1);

    let axis: Option<PackedRgba> = Some(theme::fg::MUTED.into());
    painter.line_colored(0, max_y, max_x, max_y, axis);
    painter.line_colored(0, 0, 0, max_y, axis);

    let (x_lo, x_hi) = bounds(points.iter().map(|p| p.0));
    let (y_lo, y_hi) = bounds(points.iter().map(|p| p.1));
    let color: PackedRgba = theme::screen_accent::VISUALIZATION_HUB.into();
    for &(x, y) in &points {
        let px = 2 + (normalize(x, x_lo, x_hi) * f64::from((max_x - 4).max(0))).round() as i32;
        let py = max_y - 2 - (normalize(y, y_lo, y_hi) * f64::from((max_y - 4).max(0))).round() as i32;
        for (dx, dy) in [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)] {
            painter.point_colored(px + dx, py + dy, color);
        }
    }
    Canvas::from_painter(&painter)
        .style(Style::new().fg(theme::fg::PRIMARY))
        .render(area, frame);
}

fn render_bars(samples: &VizSamples, frame: &mut Frame, area: Rect) {
    let bars = samples.bars();
    let groups: Vec<BarGroup<'_>> = bars
        .iter()
        .map(|(label, value)| BarGroup::new(label.as_str(), vec![*value]))
        .collect();
    let slot = area.width / (bars.len().max(1) as u16).max(1);
    BarChart::new(groups)
        .direction(BarDirection::Vertical)
        .mode(BarMode::Grouped)
        .bar_width(slot.saturating_sub(2).clamp(1, 6))
        .group_gap(1)
        .colors(vec![theme::screen_accent::VISUALIZATION_HUB.into()])
        .style(Style::new().fg(theme::fg::PRIMARY))
        .render(area, frame);
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Position of `v` in `[lo, hi]`; a degenerate range centers the point.
fn normalize(v: f64, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        ((v - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        0.5
    }
}

impl Screen for VisualizationHub {
    type Message = Event;

    fn update(&mut self, event: &Event) -> Cmd<Self::Message> {
        if let Event::Mouse(mouse) = event
            && mouse.kind == MouseEventKind::Down(MouseButton::Left)
        {
            if let Some(row) = row_at(self.layout_list.get(), mouse.x, mouse.y, LIST_ROWS) {
                self.visualizations.select_index(row);
            }
            return Cmd::None;
        }

        match pressed(event) {
            Some(KeyCode::Up | KeyCode::Char('k')) => self.visualizations.retreat(),
            Some(KeyCode::Down | KeyCode::Char('j')) => self.visualizations.advance(),
            Some(KeyCode::Left) => {
                self.focused_slider().decrement();
            }
            Some(KeyCode::Right) => {
                self.focused_slider().increment();
            }
            Some(KeyCode::Char('f')) => self.focus = self.focus.toggle(),
            Some(KeyCode::Char('i')) => {
                self.interactive = !self.interactive;
                tracing::debug!(interactive = self.interactive, "interactive mode toggled");
            }
            Some(KeyCode::Char('r')) => self.reset_controls(),
            _ => {}
        }
        Cmd::None
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }
        let rows = Flex::vertical()
            .constraints([Constraint::Fixed(3), Constraint::Min(6)])
            .split(area);
        self.render_header(frame, rows[0]);

        let cols = Flex::horizontal()
            .constraints([
                Constraint::Percentage(28.0),
                Constraint::Percentage(44.0),
                Constraint::Min(20),
            ])
            .split(rows[1]);
        self.render_list(frame, cols[0]);
        self.render_chart(frame, cols[1]);
        self.render_side(frame, cols[2]);
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry {
                key: "Up/Down, j/k",
                action: "Select visualization",
            },
            HelpEntry {
                key: "Left/Right",
                action: "Adjust focused slider",
            },
            HelpEntry {
                key: "f",
                action: "Focus speed / points slider",
            },
            HelpEntry {
                key: "i",
                action: "Toggle interactive mode",
            },
            HelpEntry {
                key: "r",
                action: "Reset controls",
            },
            HelpEntry {
                key: "Click",
                action: "Select visualization",
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftui_core::event::{KeyEvent, KeyEventKind, Modifiers, MouseEvent};
    use ftui_render::grapheme_pool::GraphemePool;
    use insights_core::Catalogs;

    fn screen() -> VisualizationHub {
        let catalogs = Catalogs::builtin().unwrap();
        VisualizationHub::new(catalogs.visualizations, catalogs.features)
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        })
    }

    fn buffer_text(frame: &Frame) -> String {
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

    fn render(s: &VisualizationHub, w: u16, h: u16) -> String {
        let mut pool = GraphemePool::new();
        let mut frame = Frame::new(w, h, &mut pool);
        s.view(&mut frame, Rect::new(0, 0, w, h));
        buffer_text(&frame)
    }

    #[test]
    fn defaults() {
        let s = screen();
        assert_eq!(s.visualizations().selected_index(), Some(0));
        assert_eq!(s.speed().label(), "1x");
        assert_eq!(s.points().label(), "100 points");
        assert_eq!(s.focus(), SliderFocus::Speed);
        assert!(s.interactive());
    }

    #[test]
    fn arrows_adjust_focused_slider() {
        let mut s = screen();
        s.update(&press(KeyCode::Right));
        s.update(&press(KeyCode::Right));
        assert_eq!(s.speed().label(), "1.2x");
        s.update(&press(KeyCode::Char('f')));
        s.update(&press(KeyCode::Left));
        assert_eq!(s.points().label(), "90 points");
        assert_eq!(s.speed().label(), "1.2x");
    }

    #[test]
    fn slider_stops_at_bounds() {
        let mut s = screen();
        for _ in 0..40 {
            s.update(&press(KeyCode::Left));
        }
        assert_eq!(s.speed().label(), "0.5x");
        for _ in 0..40 {
            s.update(&press(KeyCode::Right));
        }
        assert_eq!(s.speed().label(), "2x");
    }

    #[test]
    fn toggle_and_reset() {
        let mut s = screen();
        s.update(&press(KeyCode::Char('i')));
        assert!(!s.interactive());
        assert!(render(&s, 140, 40).contains("Disabled"));
        s.update(&press(KeyCode::Right));
        s.update(&press(KeyCode::Char('r')));
        assert!(s.interactive());
        assert_eq!(s.speed().label(), "1x");
    }

    #[test]
    fn selection_wraps() {
        let mut s = screen();
        s.update(&press(KeyCode::Up));
        assert_eq!(s.visualizations().selected_index(), Some(3));
        s.update(&press(KeyCode::Down));
        assert_eq!(s.visualizations().selected_index(), Some(0));
    }

    #[test]
    fn click_selects_row() {
        let mut s = screen();
        s.layout_list.set(Rect::new(1, 4, 30, 12));
        s.update(&Event::Mouse(MouseEvent::new(
            MouseEventKind::Down(MouseButton::Left),
            3,
            4 + 2 * 2 + 1,
        )));
        assert_eq!(s.visualizations().selected_index(), Some(2));
    }

    #[test]
    fn renders_every_chart_kind() {
        let mut s = screen();
        for _ in 0..s.visualizations().catalog().len() {
            let text = render(&s, 140, 40);
            assert!(text.contains("Advanced Visualization Hub"));
            assert!(text.contains("Render Time"));
            s.update(&press(KeyCode::Down));
        }
    }

    #[test]
    fn renders_insights_of_selection() {
        let s = screen();
        let text = render(&s, 160, 40);
        assert!(text.contains("Customer Journey Flow Analysis"));
        assert!(text.contains("Live Data"));
        assert!(text.contains("Interactive Enabled"));
    }

    #[test]
    fn renders_tiny_area() {
        let s = screen();
        let _ = render(&s, 20, 5);
        let _ = render(&s, 1, 1);
    }

    #[test]
    fn empty_catalog_shows_placeholder() {
        let s = VisualizationHub::new(Catalog::empty("visualizations"), Catalog::empty("features"));
        assert!(render(&s, 120, 30).contains("No visualizations available"));
    }

    #[test]
    fn normalize_handles_flat_range() {
        assert_eq!(normalize(3.0, 3.0, 3.0), 0.5);
        assert_eq!(normalize(5.0, 0.0, 10.0), 0.5);
        assert_eq!(normalize(20.0, 0.0, 10.0), 1.0);
    }
}
