#![forbid(unsafe_code)]

//! Shared theme styles for the dashboards, backed by ftui-extras themes.
//!
//! Records carry semantic [`Tone`]s and [`Icon`]s. This module resolves them
//! to theme colors and glyphs, with ASCII glyphs for terminals that cannot
//! draw emoji.

use std::sync::OnceLock;

use ftui_core::glyph_policy::GlyphPolicy;
use ftui_extras::theme as core_theme;
use ftui_style::{Style, StyleFlags};
use insights_core::display::{Icon, Tone};

pub use core_theme::ScopedThemeLock;
pub use core_theme::{
    ColorToken, ThemeId, accent, alpha, bg, current_theme_name, cycle_theme, fg, with_alpha,
};

// ---------------------------------------------------------------------------
// Screen accents
// ---------------------------------------------------------------------------

/// Accent color per screen, used by the tab bar and panel borders.
pub mod screen_accent {
    use super::{ColorToken, accent};

    pub const AI_INSIGHTS: ColorToken = accent::ACCENT_1;
    pub const VISUALIZATION_HUB: ColorToken = accent::ACCENT_4;
    pub const PREDICTIVE_ANALYTICS: ColorToken = accent::ACCENT_7;
}

// ---------------------------------------------------------------------------
// Tones
// ---------------------------------------------------------------------------

/// Theme color for a semantic tone.
pub fn tone_color(tone: Tone) -> ColorToken {
    match tone {
        Tone::Green => accent::SUCCESS,
        Tone::Blue => accent::INFO,
        Tone::Amber => accent::WARNING,
        Tone::Red => accent::ERROR,
        Tone::Purple => accent::ACCENT_4,
        Tone::Teal => accent::ACCENT_3,
        Tone::Orange => accent::ACCENT_6,
        Tone::Gray => fg::MUTED,
    }
}

/// Bold foreground text in a tone.
pub fn tone_style(tone: Tone) -> Style {
    Style::new().fg(tone_color(tone)).attrs(StyleFlags::BOLD)
}

/// Filled badge in a tone.
pub fn badge_style(tone: Tone) -> Style {
    Style::new().fg(bg::BASE).bg(tone_color(tone)).bold()
}

// ---------------------------------------------------------------------------
// Icon vocabulary
// ---------------------------------------------------------------------------

/// Whether the terminal is expected to render emoji glyphs.
///
/// Detected once per process.
pub fn supports_emoji_icons() -> bool {
    static EMOJI: OnceLock<bool> = OnceLock::new();
    *EMOJI.get_or_init(|| GlyphPolicy::detect().emoji)
}

/// Glyph for an icon, emoji or ASCII.
pub fn icon_glyph(icon: Icon, emoji: bool) -> &'static str {
    let (rich, plain) = match icon {
        Icon::DollarSign => ("💰", "[$]"),
        Icon::Users => ("👥", "[U]"),
        Icon::Package => ("📦", "[P]"),
        Icon::TrendingUp => ("📈", "[^]"),
        Icon::TrendingDown => ("📉", "[v]"),
        Icon::Activity => ("📊", "[~]"),
        Icon::Brain => ("🧠", "[*]"),
        Icon::Target => ("🎯", "[o]"),
        Icon::Lightbulb => ("💡", "[i]"),
        Icon::Sparkles => ("✨", "[+]"),
        Icon::AlertTriangle => ("🚨", "[!]"),
        Icon::Cpu => ("🤖", "[C]"),
        Icon::Eye => ("👀", "[E]"),
        Icon::Filter => ("🔎", "[F]"),
        Icon::Download => ("📥", "[D]"),
        Icon::Maximize => ("🔲", "[M]"),
        Icon::RotateCcw => ("🔄", "[R]"),
        Icon::Clock => ("🕒", "[T]"),
        Icon::Zap => ("⚡", "[Z]"),
        Icon::Globe => ("🌐", "[G]"),
        Icon::Layers => ("📚", "[L]"),
        Icon::Network => ("🔗", "[N]"),
        Icon::Unknown => ("❔", "[?]"),
    };
    if emoji { rich } else { plain }
}

/// Glyph for an icon using the detected glyph policy.
pub fn icon(icon: Icon) -> &'static str {
    icon_glyph(icon, supports_emoji_icons())
}

// ---------------------------------------------------------------------------
// Named styles
// ---------------------------------------------------------------------------

/// Semantic text styles.
pub fn title() -> Style {
    Style::new().fg(fg::PRIMARY).attrs(StyleFlags::BOLD)
}

pub fn subtitle() -> Style {
    Style::new().fg(fg::SECONDARY).attrs(StyleFlags::ITALIC)
}

pub fn body() -> Style {
    Style::new().fg(fg::PRIMARY)
}

pub fn muted() -> Style {
    Style::new().fg(fg::MUTED)
}

pub fn success() -> Style {
    Style::new().fg(accent::SUCCESS).attrs(StyleFlags::BOLD)
}

pub fn warning() -> Style {
    Style::new().fg(accent::WARNING).attrs(StyleFlags::BOLD)
}

// ---------------------------------------------------------------------------
// Component styles
// ---------------------------------------------------------------------------

/// Tab bar background.
pub fn tab_bar() -> Style {
    Style::new().bg(alpha::SURFACE).fg(fg::SECONDARY)
}

/// Status bar background.
pub fn status_bar() -> Style {
    Style::new().bg(alpha::SURFACE).fg(fg::MUTED)
}

/// Content area border.
pub fn content_border() -> Style {
    Style::new().fg(fg::MUTED)
}

/// Help overlay background.
pub fn help_overlay() -> Style {
    Style::new().bg(alpha::OVERLAY).fg(fg::PRIMARY)
}

/// Highlight behind the active card of a rotation.
pub fn active_card() -> Style {
    Style::new().bg(alpha::HIGHLIGHT).fg(fg::PRIMARY)
}

// ---------------------------------------------------------------------------
// Focus Management
// ---------------------------------------------------------------------------

/// Selection indicators for list items.
pub mod selection {
    pub const INDICATOR: &str = "▶ ";
    pub const EMPTY: &str = "  ";
}

/// Border style for a panel: the screen accent when highlighted, muted otherwise.
pub fn panel_border_style(is_focused: bool, accent: ColorToken) -> Style {
    if is_focused {
        Style::new().fg(accent)
    } else {
        content_border()
    }
}

/// Style for a list row.
///
/// - Selected + focused: primary foreground, highlight background, bold
/// - Selected + unfocused: secondary foreground, surface background
/// - Not selected: primary foreground
pub fn list_item_style(is_selected: bool, is_focused: bool) -> Style {
    match (is_selected, is_focused) {
        (true, true) => Style::new()
            .fg(fg::PRIMARY)
            .bg(alpha::HIGHLIGHT)
            .attrs(StyleFlags::BOLD),
        (true, false) => Style::new().fg(fg::SECONDARY).bg(alpha::SURFACE),
        (false, _) => Style::new().fg(fg::PRIMARY),
    }
}

/// `"▶ "` for the selected row, blanks of the same width otherwise.
pub fn selection_indicator(is_selected: bool) -> &'static str {
    if is_selected {
        selection::INDICATOR
    } else {
        selection::EMPTY
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
