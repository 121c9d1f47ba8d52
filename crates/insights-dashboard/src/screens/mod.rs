#![forbid(unsafe_code)]

//! Screen modules for the insights dashboard.
//!
//! Each screen implements the [`Screen`] trait and can be navigated to via the
//! tab bar or number keys. Screens own their rotation timers; the app mounts
//! the visible screen and unmounts the one it leaves, so a hidden screen never
//! rotates.

pub mod ai_insights;
pub mod predictive_analytics;
pub mod visualization_hub;

use std::time::Duration;

use ftui_core::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ftui_core::geometry::Rect;
use ftui_render::frame::Frame;
use ftui_runtime::Cmd;
use ftui_style::Style;
use ftui_text::{Line, Span, Text, WrapMode};
use ftui_widgets::Widget;
use ftui_widgets::block::{Alignment, Block};
use ftui_widgets::borders::{BorderType, Borders};
use ftui_widgets::paragraph::Paragraph;
use insights_core::display::DisplayAttrs;

use crate::app::ScreenId;
use crate::theme;

/// Wall-clock time represented by one app tick.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Registry metadata describing a dashboard screen.
#[derive(Debug, Clone, Copy)]
pub struct ScreenMeta {
    pub id: ScreenId,
    pub title: &'static str,
    pub short_label: &'static str,
    /// One-line description shown at the top of the help overlay.
    pub blurb: &'static str,
}

/// Screen Registry: single source of truth for screen ordering + metadata.
pub const SCREEN_REGISTRY: &[ScreenMeta] = &[
    ScreenMeta {
        id: ScreenId::AiInsights,
        title: "AI Insights",
        short_label: "AI",
        blurb: "Model observatory and generated business insights.",
    },
    ScreenMeta {
        id: ScreenId::VisualizationHub,
        title: "Visualization Hub",
        short_label: "Viz",
        blurb: "Interactive charts and pattern discovery.",
    },
    ScreenMeta {
        id: ScreenId::PredictiveAnalytics,
        title: "Predictive Analytics",
        short_label: "Predict",
        blurb: "Forecasts, engine metrics and recommendations.",
    },
];

/// Ordered screen list derived from the registry.
pub fn screen_ids() -> &'static [ScreenId] {
    ScreenId::ALL
}

/// Registry entry for a screen.
pub fn screen_meta(id: ScreenId) -> &'static ScreenMeta {
    &SCREEN_REGISTRY[screen_index(id)]
}

/// Position of a screen in registry order.
pub fn screen_index(id: ScreenId) -> usize {
    SCREEN_REGISTRY
        .iter()
        .position(|meta| meta.id == id)
        .unwrap_or(0)
}

/// A help entry describing a keybinding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpEntry {
    /// Key label (e.g. "Space", "Up/Down").
    pub key: &'static str,
    /// Description of what the key does.
    pub action: &'static str,
}

/// Trait for dashboard screens.
///
/// Each screen manages its own state, handles its own messages, and renders
/// into the content area provided by the main layout.
pub trait Screen {
    /// Message type for this screen (will be wrapped by the top-level Msg enum).
    type Message: Send + 'static;

    /// Handle a screen-specific event, returning a command.
    fn update(&mut self, event: &Event) -> Cmd<Self::Message>;

    /// Render the screen into the given area.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Return keybindings specific to this screen for the help overlay.
    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![]
    }

    /// Called on each application tick while the screen is mounted.
    fn tick(&mut self, _tick_count: u64) {}

    /// The screen became visible. Rotation timers start from zero.
    fn mount(&mut self) {}

    /// The screen stopped being visible. Rotation timers are cancelled.
    fn unmount(&mut self) {}
}

// ---------------------------------------------------------------------------
// Shared rendering helpers
// ---------------------------------------------------------------------------

/// Rounded panel with a centered title, rendered and returning its inner area.
pub(crate) fn render_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    highlighted: bool,
    accent: theme::ColorToken,
) -> Rect {
    let block = Block::new()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .title_alignment(Alignment::Center)
        .style(theme::panel_border_style(highlighted, accent));
    let inner = block.inner(area);
    block.render(area, frame);
    inner
}

/// Render lines with word wrapping.
pub(crate) fn render_lines(frame: &mut Frame, area: Rect, lines: Vec<Line>) {
    if area.is_empty() {
        return;
    }
    Paragraph::new(Text::from_lines(lines))
        .wrap(WrapMode::Word)
        .render(area, frame);
}

/// Render one line per row, clipped at the right edge. List hit-testing
/// relies on rows never wrapping.
pub(crate) fn render_rows(frame: &mut Frame, area: Rect, lines: Vec<Line>) {
    if area.is_empty() {
        return;
    }
    Paragraph::new(Text::from_lines(lines)).render(area, frame);
}

/// `icon label` in the tone of `attrs`.
pub(crate) fn tagged(attrs: DisplayAttrs, text: impl Into<String>) -> Span<'static> {
    Span::styled(
        format!("{} {}", theme::icon(attrs.icon), text.into()),
        theme::tone_style(attrs.tone),
    )
}

/// Upper-case badge in the tone of `attrs`: ` DEPLOYED `.
pub(crate) fn badge(attrs: DisplayAttrs) -> Span<'static> {
    Span::styled(
        format!(" {} ", attrs.label.to_uppercase()),
        theme::badge_style(attrs.tone),
    )
}

/// Muted caption followed by a bold value: `Accuracy 94.2%`.
pub(crate) fn stat(caption: &str, value: impl Into<String>) -> [Span<'static>; 2] {
    [
        Span::styled(format!("{caption} "), theme::muted()),
        Span::styled(value.into(), theme::title()),
    ]
}

/// Two-row list geometry: which item a click at `y` lands on.
pub(crate) fn row_at(list: Rect, x: u16, y: u16, rows_per_item: u16) -> Option<usize> {
    if rows_per_item == 0 || !list.contains(x, y) {
        return None;
    }
    Some(usize::from((y - list.y) / rows_per_item))
}

/// A key press without any modifier filtering.
pub(crate) fn pressed(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) => Some(*code),
        _ => None,
    }
}

/// Header line shared by all screens: title, subtitle, then extra spans.
pub(crate) fn header_line(
    title: &str,
    subtitle: &str,
    accent: theme::ColorToken,
) -> Line {
    Line::from_spans([
        Span::styled(title.to_string(), Style::new().fg(accent).bold()),
        Span::styled("  ", theme::muted()),
        Span::styled(subtitle.to_string(), theme::subtitle()),
    ])
}
