//! Full-frame rendering of every dashboard screen through the app model.

use ftui_render::frame::Frame;
use ftui_render::grapheme_pool::GraphemePool;
use ftui_runtime::Model;
use insights_core::Catalogs;
use insights_dashboard::app::{AppModel, AppMsg, Intervals, ScreenId};

fn app_on(id: ScreenId) -> AppModel {
    AppModel::new(Catalogs::builtin().expect("builtin catalogs"), Intervals::default())
        .with_start_screen(id)
}

fn render(app: &AppModel, width: u16, height: u16) -> String {
    let mut pool = GraphemePool::new();
    let mut frame = Frame::new(width, height, &mut pool);
    app.view(&mut frame);
    let mut text = String::new();
    for y in 0..height {
        for x in 0..width {
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
fn ai_insights_full_frame() {
    let app = app_on(ScreenId::AiInsights);
    let text = render(&app, 120, 40);
    assert!(text.contains("AI Model Observatory"), "{text}");
    assert!(text.contains("AI-Generated Business Insights"), "{text}");
    assert!(text.contains("[1/3]"), "{text}");
}

#[test]
fn visualization_hub_full_frame() {
    let app = app_on(ScreenId::VisualizationHub);
    let text = render(&app, 120, 40);
    assert!(text.contains("Advanced Visualization Hub"), "{text}");
    assert!(text.contains("Customer Journey Flow Analysis"), "{text}");
    assert!(text.contains("[2/3]"), "{text}");
}

#[test]
fn predictive_analytics_full_frame() {
    let app = app_on(ScreenId::PredictiveAnalytics);
    let text = render(&app, 120, 40);
    assert!(text.contains("Predictive Analytics Engine"), "{text}");
    assert!(text.contains("Real-time Metrics"), "{text}");
    assert!(text.contains("[3/3]"), "{text}");
}

#[test]
fn every_screen_survives_small_terminals() {
    for &id in ScreenId::ALL {
        let app = app_on(id);
        for (w, h) in [(40, 10), (20, 5), (1, 1)] {
            let _ = render(&app, w, h);
        }
    }
}

#[test]
fn help_overlay_renders_over_each_screen() {
    for &id in ScreenId::ALL {
        let mut app = app_on(id);
        app.update(AppMsg::ToggleHelp);
        let text = render(&app, 120, 40);
        assert!(text.contains("Keyboard Shortcuts"), "{id:?}");
        assert!(text.contains("Press ? or Esc to close"), "{id:?}");
    }
}

#[test]
fn empty_catalogs_render_placeholders() {
    let catalogs = Catalogs::from_json("{}").expect("empty catalogs");
    let app = AppModel::new(catalogs, Intervals::default());
    let text = render(&app, 120, 40);
    assert!(text.contains("No insights available"), "{text}");
}
