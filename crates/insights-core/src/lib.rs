#![forbid(unsafe_code)]

//! State and logic for the retail insights dashboards.
//!
//! Everything in this crate is terminal-agnostic: catalogs of static records,
//! the selection state machine, rotation timers, derived summaries, display
//! attribute mapping, number formatting, and slider controls. The built-in
//! mock data lives in [`mock`].

pub mod catalog;
pub mod controls;
pub mod display;
pub mod error;
pub mod format;
pub mod mock;
pub mod records;
pub mod rotation;
pub mod selection;
pub mod summary;

pub use catalog::{Catalog, Record};
pub use controls::Slider;
pub use display::{DisplayAttrs, Icon, Tone};
pub use error::{CatalogError, Result};
pub use mock::Catalogs;
pub use rotation::{Rotation, RotationTimer, TimerState};
pub use selection::{SelectionState, Selector};
pub use summary::{ModelMetrics, Summary, summarize};
