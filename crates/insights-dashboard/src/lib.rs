#![forbid(unsafe_code)]

//! Retail insights terminal dashboards.
//!
//! Three screens share one Elm-style [`app::AppModel`]: the AI model
//! observatory, the visualization hub and the predictive analytics engine.
//! State and catalogs live in `insights-core`; this crate draws them.

pub mod app;
pub mod chrome;
pub mod cli;
pub mod logging;
pub mod screens;
pub mod theme;
