//! Navigation and rotation lifecycle driven through app messages.

use std::time::Duration;

use ftui_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
use ftui_runtime::Model;
use insights_core::Catalogs;
use insights_dashboard::app::{AppModel, AppMsg, Intervals, ScreenId};

fn app() -> AppModel {
    AppModel::new(Catalogs::builtin().expect("builtin catalogs"), Intervals::default())
}

fn press(ch: char) -> AppMsg {
    AppMsg::ScreenEvent(Event::Key(KeyEvent {
        code: KeyCode::Char(ch),
        modifiers: Modifiers::NONE,
        kind: KeyEventKind::Press,
    }))
}

fn ticks(app: &mut AppModel, n: usize) {
    for _ in 0..n {
        app.update(AppMsg::Tick);
    }
}

#[test]
fn insight_cards_rotate_every_five_seconds_and_wrap() {
    let mut app = app();
    let mut seen = vec![app.screens.ai_insights.insights().active_index()];
    for _ in 0..5 {
        ticks(&mut app, 50);
        seen.push(app.screens.ai_insights.insights().active_index());
    }
    assert_eq!(
        seen,
        vec![Some(0), Some(1), Some(2), Some(3), Some(4), Some(0)]
    );
}

#[test]
fn space_pauses_insight_rotation() {
    let mut app = app();
    app.update(press(' '));
    ticks(&mut app, 100);
    assert_eq!(app.screens.ai_insights.insights().active_index(), Some(0));
    app.update(press(' '));
    ticks(&mut app, 50);
    assert_eq!(app.screens.ai_insights.insights().active_index(), Some(1));
}

#[test]
fn metric_rotation_follows_screen_lifecycle() {
    let mut app = app();
    app.update(press('3'));
    assert_eq!(app.current_screen(), ScreenId::PredictiveAnalytics);
    ticks(&mut app, 30);
    assert_eq!(
        app.screens.predictive_analytics.metrics().active_index(),
        Some(1)
    );

    app.update(press('1'));
    assert!(
        app.screens
            .predictive_analytics
            .metrics()
            .timer()
            .is_cancelled()
    );
    ticks(&mut app, 60);
    assert_eq!(
        app.screens.predictive_analytics.metrics().active_index(),
        Some(1)
    );
}

#[test]
fn custom_intervals_drive_rotation() {
    let intervals = Intervals {
        insight: Duration::from_secs(1),
        metric: Duration::from_secs(2),
    };
    let mut app = AppModel::new(Catalogs::builtin().expect("builtin catalogs"), intervals);
    ticks(&mut app, 10);
    assert_eq!(app.screens.ai_insights.insights().active_index(), Some(1));
}

#[test]
fn catalog_json_round_trip_feeds_the_app() {
    let json = Catalogs::builtin()
        .expect("builtin catalogs")
        .to_json_pretty()
        .expect("serialize");
    let catalogs = Catalogs::from_json(&json).expect("reparse");
    let models = catalogs.models.len();
    let mut app = AppModel::new(catalogs, Intervals::default());
    assert_eq!(app.screens.ai_insights.models().catalog().len(), models);

    app.update(press('j'));
    assert_eq!(app.screens.ai_insights.models().selected_index(), Some(1));
}

#[test]
fn start_screen_is_mounted() {
    let mut app = AppModel::new(Catalogs::builtin().expect("builtin catalogs"), Intervals::default())
        .with_start_screen(ScreenId::PredictiveAnalytics);
    assert!(app.screens.ai_insights.insights().timer().is_cancelled());
    ticks(&mut app, 30);
    assert_eq!(
        app.screens.predictive_analytics.metrics().active_index(),
        Some(1)
    );
}
