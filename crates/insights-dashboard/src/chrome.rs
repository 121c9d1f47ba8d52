#![forbid(unsafe_code)]

//! Shared UI chrome: tab bar, status bar, and help overlay.

use ftui_core::geometry::Rect;
use ftui_render::frame::Frame;
use ftui_style::{Style, StyleFlags};
use ftui_text::{Line, Span, Text};
use ftui_widgets::Widget;
use ftui_widgets::block::{Alignment, Block};
use ftui_widgets::borders::{BorderType, Borders};
use ftui_widgets::help::{HelpCategory, HelpMode, KeyFormat, KeybindingHints};
use ftui_widgets::paragraph::Paragraph;

use crate::app::ScreenId;
use crate::screens::{self, HelpEntry};
use crate::theme;

const TAB_ACCENT_ALPHA: u8 = 220;

// ---------------------------------------------------------------------------
// Tab bar
// ---------------------------------------------------------------------------

/// Tab rectangles in registry order. Tabs that do not fit are dropped.
///
/// Each tab reads ` {key}: {label} ` and is followed by a one-cell
/// separator.
pub fn tab_layout(area: Rect) -> Vec<(ScreenId, Rect)> {
    let mut tabs = Vec::with_capacity(screens::SCREEN_REGISTRY.len());
    let mut x = area.x;
    for (i, meta) in screens::SCREEN_REGISTRY.iter().enumerate() {
        let key_label = (i + 1).to_string();
        let width = 1 + key_label.len() as u16 + 2 + meta.short_label.len() as u16 + 1;
        if x + width > area.x + area.width {
            break;
        }
        tabs.push((meta.id, Rect::new(x, area.y, width, 1)));
        x = x.saturating_add(width + 1);
    }
    tabs
}

/// Screen whose tab covers `(x, y)`.
pub fn tab_at(area: Rect, x: u16, y: u16) -> Option<ScreenId> {
    tab_layout(area)
        .into_iter()
        .find(|(_, rect)| rect.contains(x, y))
        .map(|(id, _)| id)
}

/// Render the tab bar with numbered screen tabs.
///
/// The current screen's tab uses the screen's accent color background + bold
/// primary. Other tabs are rendered in muted foreground.
pub fn render_tab_bar(current: ScreenId, frame: &mut Frame, area: Rect) {
    Paragraph::new("").style(theme::tab_bar()).render(area, frame);

    for (id, tab_area) in tab_layout(area) {
        let is_active = id == current;
        let bg = if is_active {
            theme::with_alpha(accent_for(id), TAB_ACCENT_ALPHA)
        } else {
            theme::alpha::SURFACE.into()
        };
        let label_style = if is_active {
            Style::new()
                .bg(bg)
                .fg(theme::fg::PRIMARY)
                .attrs(StyleFlags::BOLD)
        } else {
            Style::new().bg(bg).fg(theme::fg::MUTED)
        };
        let key_style = Style::new()
            .bg(bg)
            .fg(theme::fg::MUTED)
            .attrs(StyleFlags::DIM);
        let pad_style = Style::new().bg(bg);

        let line = Line::from_spans([
            Span::styled(" ", pad_style),
            Span::styled((id.index() + 1).to_string(), key_style),
            Span::styled(": ", key_style),
            Span::styled(id.tab_label(), label_style),
            Span::styled(" ", pad_style),
        ]);
        Paragraph::new(Text::from_lines([line])).render(tab_area, frame);

        let sep_x = tab_area.right();
        if sep_x < area.right() {
            let sep_style = Style::new()
                .bg(theme::alpha::SURFACE)
                .fg(theme::fg::MUTED)
                .attrs(StyleFlags::DIM);
            Paragraph::new("│")
                .style(sep_style)
                .render(Rect::new(sep_x, area.y, 1, 1), frame);
        }
    }
}

// ---------------------------------------------------------------------------
// Status bar
// ---------------------------------------------------------------------------

/// State needed to render the status bar.
pub struct StatusBarState<'a> {
    pub current_screen: ScreenId,
    pub screen_title: &'a str,
    pub screen_index: usize,
    pub screen_count: usize,
    pub tick_count: u64,
    pub frame_count: u64,
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub theme_name: &'a str,
    /// Rotation state of the visible screen, if it rotates.
    pub rotation_label: Option<String>,
}

/// Render the status bar at the bottom of the screen.
///
/// Left: screen title, position and theme. Center: rotation state and
/// tick/frame counters. Right: terminal size and elapsed time. The center
/// segment is dropped when the bar is too narrow.
pub fn render_status_bar(state: &StatusBarState<'_>, frame: &mut Frame, area: Rect) {
    Paragraph::new("").style(theme::status_bar()).render(area, frame);

    let bg_color = theme::alpha::SURFACE;
    let screen_accent = accent_for(state.current_screen);

    // Each tick is 100ms.
    let total_secs = state.tick_count / 10;
    let mins = total_secs / 60;
    let secs = total_secs % 60;

    let title_style = Style::new()
        .bg(bg_color)
        .fg(screen_accent)
        .attrs(StyleFlags::BOLD);
    let position_style = Style::new().bg(bg_color).fg(theme::fg::SECONDARY);
    let muted_style = Style::new().bg(bg_color).fg(theme::fg::MUTED);
    let dim_style = Style::new()
        .bg(bg_color)
        .fg(theme::fg::MUTED)
        .attrs(StyleFlags::DIM);
    let pad_style = Style::new().bg(bg_color);

    let position_str = format!("[{}/{}]", state.screen_index + 1, state.screen_count);
    let theme_str = format!("  {}", state.theme_name);
    let center_str = match &state.rotation_label {
        Some(label) => format!("{label} · tick:{} frm:{}", state.tick_count, state.frame_count),
        None => format!("tick:{} frm:{}", state.tick_count, state.frame_count),
    };
    let dims_str = format!("{}x{}", state.terminal_width, state.terminal_height);
    let time_str = format!("{mins:02}:{secs:02}");

    let left_len = 1 + state.screen_title.len() + 1 + position_str.len() + theme_str.len();
    let center_len = center_str.chars().count();
    let right_len = dims_str.len() + 1 + time_str.len() + 1;
    let available = usize::from(area.width);

    let mut spans = vec![
        Span::styled(" ", pad_style),
        Span::styled(state.screen_title, title_style),
        Span::styled(" ", pad_style),
        Span::styled(position_str, position_style),
        Span::styled(theme_str, muted_style),
    ];

    if left_len + center_len + right_len < available {
        let total_padding = available - left_len - center_len - right_len;
        let left_pad = total_padding / 2;
        let right_pad = total_padding - left_pad;
        spans.push(Span::styled(" ".repeat(left_pad), pad_style));
        spans.push(Span::styled(center_str, dim_style));
        spans.push(Span::styled(" ".repeat(right_pad), pad_style));
    } else {
        let pad = available.saturating_sub(left_len + right_len);
        spans.push(Span::styled(" ".repeat(pad), pad_style));
    }
    spans.push(Span::styled(dims_str, muted_style));
    spans.push(Span::styled(" ", pad_style));
    spans.push(Span::styled(time_str, position_style));
    spans.push(Span::styled(" ", pad_style));

    Paragraph::new(Text::from_lines([Line::from_spans(spans)])).render(area, frame);
}

// ---------------------------------------------------------------------------
// Help overlay
// ---------------------------------------------------------------------------

/// Render a centered help overlay with global and screen-specific keybindings.
pub fn render_help_overlay(
    current: ScreenId,
    screen_bindings: &[HelpEntry],
    frame: &mut Frame,
    area: Rect,
) {
    // 60% width, 70% height, clamped
    let overlay_width = ((area.width as u32 * 60) / 100).clamp(36, 72) as u16;
    let overlay_height = ((area.height as u32 * 70) / 100).clamp(14, 28) as u16;
    let overlay_width = overlay_width.min(area.width.saturating_sub(2));
    let overlay_height = overlay_height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    let block = Block::new()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .title(" Keyboard Shortcuts ")
        .title_alignment(Alignment::Center)
        .style(theme::help_overlay());

    let inner = block.inner(overlay_area);
    block.render(overlay_area, frame);

    if inner.width < 10 || inner.height < 5 {
        return;
    }

    let key_style = Style::new().bold().fg(theme::accent::PRIMARY);
    let category_style = Style::new().bold().underline().fg(theme::fg::SECONDARY);

    let mut hints = KeybindingHints::new()
        .with_mode(HelpMode::Full)
        .with_show_context(!screen_bindings.is_empty())
        .with_show_categories(true)
        .with_key_format(KeyFormat::Bracketed)
        .with_key_style(key_style)
        .with_desc_style(theme::body())
        .with_category_style(category_style)
        .global_entry_categorized("1-3", "Switch to screen by number", HelpCategory::Navigation)
        .global_entry_categorized("Tab", "Next screen", HelpCategory::Navigation)
        .global_entry_categorized("S-Tab", "Previous screen", HelpCategory::Navigation)
        .global_entry_categorized("?", "Toggle this help overlay", HelpCategory::View)
        .global_entry_categorized("Ctrl+T", "Cycle color theme", HelpCategory::Global)
        .global_entry_categorized("q / Ctrl+C", "Quit application", HelpCategory::Global);

    let screen_category = HelpCategory::Custom(format!("{} Controls", current.title()));
    for entry in screen_bindings {
        hints =
            hints.contextual_entry_categorized(entry.key, entry.action, screen_category.clone());
    }

    // Screen blurb on the first row, keybindings below it.
    let blurb = screens::screen_meta(current).blurb;
    Paragraph::new(Text::from_lines([Line::from_spans([
        Span::styled(format!("{}: ", current.title()), Style::new().fg(accent_for(current)).bold()),
        Span::styled(blurb, theme::muted()),
    ])]))
    .render(Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(2), 1), frame);

    let content_area = Rect::new(
        inner.x + 1,
        inner.y + 2,
        inner.width.saturating_sub(2),
        inner.height.saturating_sub(3),
    );
    Widget::render(&hints, content_area, frame);

    let footer_y = overlay_area.bottom().saturating_sub(1);
    if footer_y > inner.y {
        let footer = "Press ? or Esc to close";
        let footer_x = inner.x + (inner.width.saturating_sub(footer.len() as u16)) / 2;
        Paragraph::new(footer)
            .style(Style::new().fg(theme::fg::MUTED))
            .render(Rect::new(footer_x, footer_y, footer.len() as u16, 1), frame);
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Return the accent color for the given screen.
pub fn accent_for(id: ScreenId) -> theme::ColorToken {
    match id {
        ScreenId::AiInsights => theme::screen_accent::AI_INSIGHTS,
        ScreenId::VisualizationHub => theme::screen_accent::VISUALIZATION_HUB,
        ScreenId::PredictiveAnalytics => theme::screen_accent::PREDICTIVE_ANALYTICS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftui_render::cell::{Cell, PackedRgba};
    use ftui_render::grapheme_pool::GraphemePool;
    use proptest::prelude::*;

    fn row_text(frame: &Frame, y: u16) -> String {
        (0..frame.width())
            .map(|x| {
                frame
                    .buffer
                    .get(x, y)
                    .and_then(|cell| cell.content.as_char())
                    .unwrap_or(' ')
            })
            .collect()
    }

    #[test]
    fn tab_bar_highlights_current() {
        let _lock = theme::ScopedThemeLock::new(theme::ThemeId::CyberpunkAurora);
        let mut pool = GraphemePool::new();
        let mut frame = Frame::new(100, 1, &mut pool);
        let area = Rect::new(0, 0, 100, 1);
        frame
            .buffer
            .fill(area, Cell::default().with_bg(theme::bg::DEEP.into()));

        render_tab_bar(ScreenId::VisualizationHub, &mut frame, area);

        let base_bg: PackedRgba = theme::bg::DEEP.into();
        let surface_bg: PackedRgba = theme::alpha::SURFACE.into();
        let surface = surface_bg.over(base_bg);
        let expected_bg =
            theme::with_alpha(theme::screen_accent::VISUALIZATION_HUB, TAB_ACCENT_ALPHA)
                .over(surface);
        let (_, tab) = tab_layout(area)[1];
        let found_accent = (tab.x..tab.right())
            .any(|x| frame.buffer.get(x, 0).is_some_and(|cell| cell.bg == expected_bg));
        assert!(found_accent, "visualization tab should have its accent bg");
        assert!(row_text(&frame, 0).contains("2: Viz"));
    }

    #[test]
    fn tab_layout_matches_tab_at() {
        let area = Rect::new(0, 0, 80, 1);
        let tabs = tab_layout(area);
        assert_eq!(tabs.len(), ScreenId::ALL.len());
        for (id, rect) in &tabs {
            assert_eq!(tab_at(area, rect.x, 0), Some(*id));
            assert_eq!(tab_at(area, rect.right() - 1, 0), Some(*id));
        }
        // Separator cell and rows below the bar hit nothing.
        assert_eq!(tab_at(area, tabs[0].1.right(), 0), None);
        assert_eq!(tab_at(area, 1, 1), None);
    }

    #[test]
    fn narrow_tab_bar_drops_tabs() {
        let tabs = tab_layout(Rect::new(0, 0, 12, 1));
        assert_eq!(tabs.len(), 1);
        assert!(tab_layout(Rect::new(0, 0, 3, 1)).is_empty());
    }

    #[test]
    fn status_bar_shows_dimensions_and_rotation() {
        let mut pool = GraphemePool::new();
        let mut frame = Frame::new(120, 1, &mut pool);
        let state = StatusBarState {
            current_screen: ScreenId::AiInsights,
            screen_title: "AI Insights",
            screen_index: 0,
            screen_count: 3,
            tick_count: 100,
            frame_count: 50,
            terminal_width: 120,
            terminal_height: 40,
            theme_name: "default",
            rotation_label: Some("rotating every 5s".into()),
        };
        render_status_bar(&state, &mut frame, Rect::new(0, 0, 120, 1));
        let rendered = row_text(&frame, 0);
        assert!(rendered.contains("120x40"), "{rendered}");
        assert!(rendered.contains("[1/3]"), "{rendered}");
        assert!(rendered.contains("rotating every 5s"), "{rendered}");
        assert!(rendered.contains("00:10"), "{rendered}");
    }

    #[test]
    fn status_bar_compact_drops_center() {
        let mut pool = GraphemePool::new();
        let mut frame = Frame::new(40, 1, &mut pool);
        let state = StatusBarState {
            current_screen: ScreenId::PredictiveAnalytics,
            screen_title: "Predictive Analytics",
            screen_index: 2,
            screen_count: 3,
            tick_count: 0,
            frame_count: 0,
            terminal_width: 40,
            terminal_height: 10,
            theme_name: "x",
            rotation_label: None,
        };
        render_status_bar(&state, &mut frame, Rect::new(0, 0, 40, 1));
        assert!(!row_text(&frame, 0).contains("tick:"));
    }

    #[test]
    fn help_overlay_lists_screen_keys() {
        let mut pool = GraphemePool::new();
        let mut frame = Frame::new(140, 30, &mut pool);
        let bindings = [HelpEntry {
            key: "Space",
            action: "Pause rotation",
        }];
        render_help_overlay(
            ScreenId::AiInsights,
            &bindings,
            &mut frame,
            Rect::new(0, 0, 140, 30),
        );
        let text: String = (0..30).map(|y| row_text(&frame, y)).collect();
        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("Pause rotation"));
        assert!(text.contains(screens::screen_meta(ScreenId::AiInsights).blurb));
        assert!(text.contains("Press ? or Esc to close"));
    }

    #[test]
    fn accents_differ_per_screen() {
        let colors: Vec<PackedRgba> = ScreenId::ALL
            .iter()
            .map(|&id| accent_for(id).into())
            .collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
    }

    proptest! {
        #[test]
        fn tab_hits_stay_inside_their_tab(width in 0u16..120, x in 0u16..140, y in 0u16..3) {
            let area = Rect::new(0, 0, width, 1);
            if let Some(id) = tab_at(area, x, y) {
                prop_assert_eq!(y, 0);
                prop_assert!(x < width);
                let rect = tab_layout(area)
                    .into_iter()
                    .find(|(tab, _)| *tab == id)
                    .map(|(_, rect)| rect);
                prop_assert!(rect.is_some_and(|r| r.contains(x, y)));
            }
        }
    }
}
