#![forbid(unsafe_code)]

//! Main application model, message routing, and screen navigation.
//!
//! [`AppModel`] implements the Elm architecture via [`Model`]. It owns the
//! three dashboard screens, routes events to the visible one, handles global
//! keybindings, and renders the chrome (tab bar, status bar, help overlay).
//!
//! Only the visible screen is mounted. Switching screens unmounts the old one
//! (cancelling its rotation timers) and mounts the new one (restarting them
//! from zero), and only the mounted screen receives ticks.

use std::cell::Cell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use ftui_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEventKind};
use ftui_core::geometry::Rect;
use ftui_layout::{Constraint, Flex};
use ftui_render::cell::Cell as RenderCell;
use ftui_render::frame::Frame;
use ftui_runtime::{Cmd, Every, Model, Subscription};
use ftui_widgets::Widget;
use ftui_widgets::block::{Alignment, Block};
use ftui_widgets::borders::{BorderType, Borders};
use ftui_widgets::error_boundary::FallbackWidget;
use insights_core::Catalogs;

use crate::chrome;
use crate::screens::{self, HelpEntry, Screen, TICK_INTERVAL};
use crate::theme;

// ---------------------------------------------------------------------------
// ScreenId
// ---------------------------------------------------------------------------

/// Identifies which dashboard screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    /// Model observatory and rotating insight cards.
    AiInsights,
    /// Charts of the visualization catalog.
    VisualizationHub,
    /// Engine metrics, forecasts and recommendations.
    PredictiveAnalytics,
}

impl ScreenId {
    /// All screens in display order.
    pub const ALL: &[ScreenId] = &[
        Self::AiInsights,
        Self::VisualizationHub,
        Self::PredictiveAnalytics,
    ];

    /// 0-based index in the ALL array.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }

    /// Next screen (wraps around).
    pub fn next(self) -> Self {
        let i = (self.index() + 1) % Self::ALL.len();
        Self::ALL[i]
    }

    /// Previous screen (wraps around).
    pub fn prev(self) -> Self {
        let i = (self.index() + Self::ALL.len() - 1) % Self::ALL.len();
        Self::ALL[i]
    }

    /// Title for the tab bar and content border.
    pub fn title(self) -> &'static str {
        screens::screen_meta(self).title
    }

    /// Short label for narrow tab bars.
    pub fn tab_label(self) -> &'static str {
        screens::screen_meta(self).short_label
    }

    /// Widget name reported by the error boundary.
    pub fn widget_name(self) -> &'static str {
        match self {
            Self::AiInsights => "AiInsights",
            Self::VisualizationHub => "VisualizationHub",
            Self::PredictiveAnalytics => "PredictiveAnalytics",
        }
    }

    /// Map number key to screen: '1'..='3'.
    pub fn from_number_key(ch: char) -> Option<Self> {
        let idx = match ch {
            '1'..='9' => (ch as usize) - ('1' as usize),
            _ => return None,
        };
        Self::ALL.get(idx).copied()
    }

    /// Screen for a 1-indexed position, as given on the command line.
    pub fn from_position(position: u16) -> Option<Self> {
        usize::from(position)
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx).copied())
    }
}

// ---------------------------------------------------------------------------
// Rotation intervals
// ---------------------------------------------------------------------------

/// Rotation periods of the timed screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intervals {
    /// Insight card rotation on the AI Insights screen.
    pub insight: Duration,
    /// Performance metric rotation on the Predictive Analytics screen.
    pub metric: Duration,
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            insight: Duration::from_secs(5),
            metric: Duration::from_secs(3),
        }
    }
}

// ---------------------------------------------------------------------------
// ScreenStates
// ---------------------------------------------------------------------------

/// Holds the state for every screen.
pub struct ScreenStates {
    pub ai_insights: screens::ai_insights::AiInsights,
    pub visualization_hub: screens::visualization_hub::VisualizationHub,
    pub predictive_analytics: screens::predictive_analytics::PredictiveAnalytics,
}

impl ScreenStates {
    pub fn new(catalogs: Catalogs, intervals: Intervals) -> Self {
        let Catalogs {
            models,
            insights,
            visualizations,
            features,
            predictions,
            recommendations,
            metrics,
        } = catalogs;
        Self {
            ai_insights: screens::ai_insights::AiInsights::new(models, insights, intervals.insight),
            visualization_hub: screens::visualization_hub::VisualizationHub::new(
                visualizations,
                features,
            ),
            predictive_analytics: screens::predictive_analytics::PredictiveAnalytics::new(
                predictions,
                metrics,
                recommendations,
                intervals.metric,
            ),
        }
    }

    /// Forward an event to the screen identified by `id`.
    fn update(&mut self, id: ScreenId, event: &Event) {
        match id {
            ScreenId::AiInsights => {
                self.ai_insights.update(event);
            }
            ScreenId::VisualizationHub => {
                self.visualization_hub.update(event);
            }
            ScreenId::PredictiveAnalytics => {
                self.predictive_analytics.update(event);
            }
        }
    }

    /// Forward a tick to the screen identified by `id`.
    fn tick(&mut self, id: ScreenId, tick_count: u64) {
        match id {
            ScreenId::AiInsights => self.ai_insights.tick(tick_count),
            ScreenId::VisualizationHub => self.visualization_hub.tick(tick_count),
            ScreenId::PredictiveAnalytics => self.predictive_analytics.tick(tick_count),
        }
    }

    fn mount(&mut self, id: ScreenId) {
        match id {
            ScreenId::AiInsights => self.ai_insights.mount(),
            ScreenId::VisualizationHub => self.visualization_hub.mount(),
            ScreenId::PredictiveAnalytics => self.predictive_analytics.mount(),
        }
    }

    fn unmount(&mut self, id: ScreenId) {
        match id {
            ScreenId::AiInsights => self.ai_insights.unmount(),
            ScreenId::VisualizationHub => self.visualization_hub.unmount(),
            ScreenId::PredictiveAnalytics => self.predictive_analytics.unmount(),
        }
    }

    fn keybindings(&self, id: ScreenId) -> Vec<HelpEntry> {
        match id {
            ScreenId::AiInsights => self.ai_insights.keybindings(),
            ScreenId::VisualizationHub => self.visualization_hub.keybindings(),
            ScreenId::PredictiveAnalytics => self.predictive_analytics.keybindings(),
        }
    }

    /// Render the screen identified by `id` into the given area.
    ///
    /// A panic inside a screen's `view()` is caught and a [`FallbackWidget`]
    /// is drawn in its place.
    fn view(&self, id: ScreenId, frame: &mut Frame, area: Rect) {
        let result = catch_unwind(AssertUnwindSafe(|| match id {
            ScreenId::AiInsights => self.ai_insights.view(frame, area),
            ScreenId::VisualizationHub => self.visualization_hub.view(frame, area),
            ScreenId::PredictiveAnalytics => self.predictive_analytics.view(frame, area),
        }));

        if let Err(payload) = result {
            let msg = if let Some(s) = payload.downcast_ref::<&str>() {
                (*s).to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic".to_string()
            };
            tracing::error!(screen = id.title(), panic = %msg, "screen render failed");
            FallbackWidget::from_message(&msg, id.widget_name()).render(area, frame);
        }
    }
}

// ---------------------------------------------------------------------------
// AppMsg
// ---------------------------------------------------------------------------

/// Top-level application message.
pub enum AppMsg {
    /// A raw terminal event forwarded to the current screen.
    ScreenEvent(Event),
    /// Switch to a specific screen.
    SwitchScreen(ScreenId),
    /// Advance to the next screen tab.
    NextScreen,
    /// Go back to the previous screen tab.
    PrevScreen,
    /// Toggle the help overlay.
    ToggleHelp,
    /// Cycle the active color theme.
    CycleTheme,
    /// Periodic tick driving the rotation timers.
    Tick,
    /// Terminal resize.
    Resize {
        /// New terminal width.
        width: u16,
        /// New terminal height.
        height: u16,
    },
    /// Quit the application.
    Quit,
}

impl From<Event> for AppMsg {
    fn from(event: Event) -> Self {
        if let Event::Resize { width, height } = event {
            return Self::Resize { width, height };
        }

        Self::ScreenEvent(event)
    }
}

// ---------------------------------------------------------------------------
// AppModel
// ---------------------------------------------------------------------------

/// Top-level application state.
pub struct AppModel {
    current_screen: ScreenId,
    /// Per-screen state storage.
    pub screens: ScreenStates,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
    /// Global tick counter (incremented every 100ms).
    pub tick_count: u64,
    /// Total frames rendered.
    pub frame_count: Cell<u64>,
    /// Current terminal width.
    pub terminal_width: u16,
    /// Current terminal height.
    pub terminal_height: u16,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    layout_tab_bar: Cell<Rect>,
}

impl AppModel {
    /// Build the app over `catalogs`, showing the first screen.
    pub fn new(catalogs: Catalogs, intervals: Intervals) -> Self {
        let mut screens = ScreenStates::new(catalogs, intervals);
        let current_screen = ScreenId::AiInsights;
        for &id in ScreenId::ALL {
            if id != current_screen {
                screens.unmount(id);
            }
        }
        Self {
            current_screen,
            screens,
            help_visible: false,
            tick_count: 0,
            frame_count: Cell::new(0),
            terminal_width: 0,
            terminal_height: 0,
            exit_after_ms: 0,
            layout_tab_bar: Cell::new(Rect::default()),
        }
    }

    /// Start on `id` instead of the first screen.
    #[must_use]
    pub fn with_start_screen(mut self, id: ScreenId) -> Self {
        self.switch_screen(id);
        self
    }

    pub fn current_screen(&self) -> ScreenId {
        self.current_screen
    }

    /// Make `id` the visible screen, unmounting the previous one.
    pub fn switch_screen(&mut self, id: ScreenId) {
        if id == self.current_screen {
            return;
        }
        let from = self.current_screen;
        self.screens.unmount(from);
        self.current_screen = id;
        self.screens.mount(id);
        tracing::info!(from = from.title(), to = id.title(), "screen switched");
    }

    /// Keybindings of the visible screen for the help overlay.
    pub fn current_screen_keybindings(&self) -> Vec<HelpEntry> {
        self.screens.keybindings(self.current_screen)
    }

    /// Rotation status shown in the status bar, if the screen rotates.
    fn rotation_label(&self) -> Option<String> {
        let timer = match self.current_screen {
            ScreenId::AiInsights => self.screens.ai_insights.insights().timer(),
            ScreenId::PredictiveAnalytics => self.screens.predictive_analytics.metrics().timer(),
            ScreenId::VisualizationHub => return None,
        };
        let state = if timer.is_running() { "rotating" } else { "paused" };
        Some(format!("{state} every {}s", timer.interval().as_secs_f64()))
    }

    fn handle_msg(&mut self, msg: AppMsg) -> Cmd<AppMsg> {
        match msg {
            AppMsg::Quit => Cmd::Quit,

            AppMsg::SwitchScreen(id) => {
                self.switch_screen(id);
                Cmd::None
            }

            AppMsg::NextScreen => {
                self.switch_screen(self.current_screen.next());
                Cmd::None
            }

            AppMsg::PrevScreen => {
                self.switch_screen(self.current_screen.prev());
                Cmd::None
            }

            AppMsg::ToggleHelp => {
                self.help_visible = !self.help_visible;
                tracing::debug!(visible = self.help_visible, "help overlay toggled");
                Cmd::None
            }

            AppMsg::CycleTheme => {
                let id = theme::cycle_theme();
                tracing::info!(theme = id.name(), "theme cycled");
                Cmd::None
            }

            AppMsg::Tick => {
                self.tick_count += 1;
                self.screens.tick(self.current_screen, self.tick_count);
                Cmd::None
            }

            AppMsg::Resize { width, height } => {
                self.terminal_width = width;
                self.terminal_height = height;
                tracing::debug!(width, height, "terminal resized");
                Cmd::None
            }

            AppMsg::ScreenEvent(event) => self.handle_event(event),
        }
    }

    fn handle_event(&mut self, event: Event) -> Cmd<AppMsg> {
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = &event
        {
            if self.help_visible && *code == KeyCode::Escape {
                return self.handle_msg(AppMsg::ToggleHelp);
            }

            match (*code, *modifiers) {
                (KeyCode::Char('q'), Modifiers::NONE) => return Cmd::Quit,
                (KeyCode::Char('c'), Modifiers::CTRL) => return Cmd::Quit,
                (KeyCode::Char('?'), _) => return self.handle_msg(AppMsg::ToggleHelp),
                (KeyCode::Char('t'), Modifiers::CTRL) => {
                    return self.handle_msg(AppMsg::CycleTheme);
                }
                (KeyCode::Tab, Modifiers::NONE) => return self.handle_msg(AppMsg::NextScreen),
                (KeyCode::BackTab, _) => return self.handle_msg(AppMsg::PrevScreen),
                (KeyCode::Char(ch @ '1'..='9'), Modifiers::NONE) => {
                    if let Some(id) = ScreenId::from_number_key(ch) {
                        return self.handle_msg(AppMsg::SwitchScreen(id));
                    }
                }
                _ => {}
            }
        }

        if let Event::Mouse(mouse) = &event
            && mouse.kind == MouseEventKind::Down(MouseButton::Left)
            && let Some(id) = chrome::tab_at(self.layout_tab_bar.get(), mouse.x, mouse.y)
        {
            return self.handle_msg(AppMsg::SwitchScreen(id));
        }

        self.screens.update(self.current_screen, &event);
        Cmd::None
    }
}

impl Model for AppModel {
    type Message = AppMsg;

    fn init(&mut self) -> Cmd<Self::Message> {
        tracing::info!(screen = self.current_screen.title(), "dashboard started");
        if self.exit_after_ms > 0 {
            let ms = self.exit_after_ms;
            Cmd::task(move || {
                std::thread::sleep(Duration::from_millis(ms));
                AppMsg::Quit
            })
        } else {
            Cmd::None
        }
    }

    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message> {
        self.handle_msg(msg)
    }

    fn view(&self, frame: &mut Frame) {
        self.frame_count.set(self.frame_count.get() + 1);

        let area = Rect::from_size(frame.buffer.width(), frame.buffer.height());

        frame
            .buffer
            .fill(area, RenderCell::default().with_bg(theme::bg::DEEP.into()));

        // Tab bar (1 row) + content + status bar (1 row)
        let chunks = Flex::vertical()
            .constraints([
                Constraint::Fixed(1),
                Constraint::Min(1),
                Constraint::Fixed(1),
            ])
            .split(area);

        self.layout_tab_bar.set(chunks[0]);
        chrome::render_tab_bar(self.current_screen, frame, chunks[0]);

        let content_block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(self.current_screen.title())
            .title_alignment(Alignment::Center)
            .style(theme::content_border());

        let inner = content_block.inner(chunks[1]);
        content_block.render(chunks[1], frame);

        self.screens.view(self.current_screen, frame, inner);

        if self.help_visible {
            let bindings = self.current_screen_keybindings();
            chrome::render_help_overlay(self.current_screen, &bindings, frame, area);
        }

        let status_state = chrome::StatusBarState {
            current_screen: self.current_screen,
            screen_title: self.current_screen.title(),
            screen_index: self.current_screen.index(),
            screen_count: ScreenId::ALL.len(),
            tick_count: self.tick_count,
            frame_count: self.frame_count.get(),
            terminal_width: self.terminal_width,
            terminal_height: self.terminal_height,
            theme_name: theme::current_theme_name(),
            rotation_label: self.rotation_label(),
        };
        chrome::render_status_bar(&status_state, frame, chunks[2]);
    }

    fn subscriptions(&self) -> Vec<Box<dyn Subscription<Self::Message>>> {
        vec![Box::new(Every::new(TICK_INTERVAL, || AppMsg::Tick))]
    }
}
