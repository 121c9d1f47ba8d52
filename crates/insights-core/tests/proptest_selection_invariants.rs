//! Property-based invariant tests for catalogs, selection and controls.
//!
//! 1. `select(id)` selects exactly `id` for every id in a catalog.
//! 2. `advance()` repeated `len` times returns to the starting record.
//! 3. `advance()` and `retreat()` are inverses.
//! 4. Selection on an empty catalog never faults and stays unselected.
//! 5. Summaries count every record and never produce NaN.
//! 6. Sliders stay on their step grid and inside their bounds.
//! 7. Unrecognized enum names parse to `Unknown` and still map to display attributes.

use insights_core::controls::Slider;
use insights_core::records::{ModelStatus, PerformanceMetric, Priority, RecommendationKind, Trend};
use insights_core::{Catalog, SelectionState, Selector, summarize};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn metric(name: String, current: f64) -> PerformanceMetric {
    PerformanceMetric {
        metric: name,
        current,
        target: 100.0,
        trend: Trend::Up,
    }
}

fn catalog_strategy() -> impl Strategy<Value = Catalog<PerformanceMetric>> {
    prop::collection::hash_set("[a-z]{1,8}", 0..16).prop_map(|names| {
        let items = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| metric(name, i as f64))
            .collect();
        Catalog::new("metrics", items).expect("hash set ids are unique")
    })
}

fn non_empty_catalog_strategy() -> impl Strategy<Value = Catalog<PerformanceMetric>> {
    catalog_strategy().prop_filter("non-empty", |c| !c.is_empty())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. select(id) selects exactly id
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn select_by_id_is_exact(catalog in non_empty_catalog_strategy()) {
        let ids: Vec<String> = catalog.ids().map(str::to_string).collect();
        let mut selector = Selector::new(catalog);
        for id in &ids {
            prop_assert!(selector.select(id));
            prop_assert_eq!(selector.selected_id(), Some(id.as_str()));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. advance() cycles back after len steps
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn advance_len_times_is_identity(catalog in non_empty_catalog_strategy(), start in 0usize..16) {
        let len = catalog.len();
        let mut selector = Selector::new(catalog);
        selector.select_index(start % len);
        let before = selector.selected_id().map(str::to_string);
        for _ in 0..len {
            selector.advance();
        }
        prop_assert_eq!(selector.selected_id().map(str::to_string), before);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. advance() and retreat() are inverses
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn retreat_undoes_advance(catalog in non_empty_catalog_strategy(), steps in 0usize..40) {
        let mut selector = Selector::new(catalog);
        for _ in 0..steps {
            selector.advance();
        }
        let here = selector.selected_index();
        selector.advance();
        selector.retreat();
        prop_assert_eq!(selector.selected_index(), here);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Empty catalogs
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn empty_catalog_stays_unselected(id in "[a-z]{0,8}", steps in 0usize..10) {
        let mut selector: Selector<PerformanceMetric> = Selector::new(Catalog::empty("metrics"));
        for _ in 0..steps {
            selector.advance();
            selector.retreat();
        }
        prop_assert!(!selector.select(&id));
        prop_assert_eq!(selector.state(), SelectionState::NoSelection);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Summaries
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn summary_counts_every_record(catalog in catalog_strategy()) {
        let summary = summarize(&catalog, |m: &PerformanceMetric| m.current, |m: &PerformanceMetric| m.current >= 3.0);
        prop_assert_eq!(summary.count, catalog.len());
        prop_assert!(summary.matching <= summary.count);
        prop_assert!(summary.mean.is_finite());
        if catalog.is_empty() {
            prop_assert_eq!(summary.mean, 0.0);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Sliders stay on the grid
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn slider_stays_on_grid(target in -10.0f64..10.0, ups in 0usize..40, downs in 0usize..40) {
        let mut speed = Slider::animation_speed();
        speed.set(target);
        for _ in 0..ups {
            speed.increment();
        }
        for _ in 0..downs {
            speed.decrement();
        }
        let v = speed.value();
        prop_assert!((0.5..=2.0).contains(&v), "value {} out of range", v);
        let k = (v - 0.5) / 0.1;
        prop_assert!((k - k.round()).abs() < 1e-6, "value {} off grid", v);
    }

    #[test]
    fn data_points_label_is_whole(target in 0.0f64..1000.0) {
        let mut points = Slider::data_points();
        points.set(target);
        let v = points.value();
        prop_assert!((50.0..=500.0).contains(&v));
        prop_assert_eq!(points.label(), format!("{} points", v as u64));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Display mapping is total
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unrecognized_names_map_to_fallback(name in "[a-z]{1,12}") {
        let status = ModelStatus::parse(&name);
        if !ModelStatus::KNOWN.contains(&status) {
            prop_assert_eq!(status, ModelStatus::Unknown);
        }
        let _ = status.display();
        let _ = Priority::parse(&name).display();
        let _ = RecommendationKind::parse(&name).display();
        let _ = Trend::parse(&name).display();
    }
}
