#![forbid(unsafe_code)]

//! Retail insights dashboard binary entry point.

use std::time::Duration;

use ftui_render::budget::FrameBudgetConfig;
use ftui_runtime::{Program, ProgramConfig, ScreenMode};
use insights_core::Catalogs;
use insights_dashboard::app::{AppModel, Intervals, ScreenId};
use insights_dashboard::{cli, logging};

fn main() {
    let opts = cli::Opts::parse();

    let loaded = match &opts.catalog {
        Some(path) => Catalogs::load(path),
        None => Catalogs::builtin(),
    };
    let catalogs = match loaded {
        Ok(catalogs) => catalogs,
        Err(e) => {
            eprintln!("Failed to load catalogs: {e}");
            std::process::exit(1);
        }
    };

    if opts.dump_catalog {
        match catalogs.to_json_pretty() {
            Ok(json) => {
                println!("{json}");
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize catalogs: {e}");
                std::process::exit(1);
            }
        }
    }

    if let Some(path) = &opts.log_file
        && let Err(e) = logging::init(path)
    {
        eprintln!("Failed to open log file {}: {e}", path.display());
        std::process::exit(1);
    }

    let screen_mode = match opts.screen_mode.as_str() {
        "inline" => ScreenMode::Inline {
            ui_height: opts.ui_height,
        },
        _ => ScreenMode::AltScreen,
    };

    let intervals = Intervals {
        insight: Duration::from_millis(opts.insight_interval_ms),
        metric: Duration::from_millis(opts.metric_interval_ms),
    };
    let start_screen = ScreenId::from_position(opts.start_screen).unwrap_or(ScreenId::AiInsights);
    let mut model = AppModel::new(catalogs, intervals).with_start_screen(start_screen);
    model.exit_after_ms = opts.exit_after_ms;

    let budget = match screen_mode {
        ScreenMode::AltScreen => {
            let mut cfg = FrameBudgetConfig::relaxed();
            cfg.allow_frame_skip = false;
            cfg
        }
        _ => FrameBudgetConfig::default(),
    };

    let config = ProgramConfig {
        screen_mode,
        mouse: opts.mouse,
        budget,
        ..ProgramConfig::default()
    };
    match Program::with_config(model, config) {
        Ok(mut program) => {
            if let Err(e) = program.run() {
                tracing::error!(error = %e, "runtime error");
                eprintln!("Runtime error: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Failed to initialize: {e}");
            std::process::exit(1);
        }
    }
}
