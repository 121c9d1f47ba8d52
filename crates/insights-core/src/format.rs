#![forbid(unsafe_code)]

//! Number and label formatting used by the dashboards.

/// Group digits in threes with commas: `15420` becomes `15,420`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole thousands with a `K` suffix: `66378` becomes `66K`.
pub fn compact_thousands(n: u64) -> String {
    format!("{}K", (n as f64 / 1000.0).round() as u64)
}

/// Fixed number of decimals: `fixed(90.98, 1)` is `91.0`.
pub fn fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// At most `max_decimals` decimals with trailing zeros removed.
///
/// `1.0` prints as `1`, `1.50` as `1.5`.
pub fn trim_number(value: f64, max_decimals: usize) -> String {
    let mut text = fixed(value, max_decimals);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text.remove(0);
    }
    text
}

/// Unit suffix of a performance metric, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    Seconds,
    OutOfFive,
    Percent,
}

impl MetricUnit {
    pub fn for_metric(name: &str) -> Self {
        if name.contains("Time") {
            Self::Seconds
        } else if name.contains("Satisfaction") {
            Self::OutOfFive
        } else {
            Self::Percent
        }
    }

    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Seconds => "s",
            Self::OutOfFive => "/5",
            Self::Percent => "%",
        }
    }
}

/// Metric value with the unit its name implies: `Response Time` 1.2 is `1.2s`.
pub fn metric_value(name: &str, value: f64) -> String {
    format!("{}{}", trim_number(value, 2), MetricUnit::for_metric(name).suffix())
}

/// Relative age in whole hours: `Updated 2h ago`.
pub fn hours_ago(minutes: u32) -> String {
    format!("Updated {}h ago", minutes / 60)
}

/// `current / target` clamped to `[0, 1]`. A non-positive target gives 0.
pub fn progress_ratio(current: f64, target: f64) -> f64 {
    if target <= 0.0 || !target.is_finite() || !current.is_finite() {
        return 0.0;
    }
    (current / target).clamp(0.0, 1.0)
}

/// Replace dashes with spaces and capitalize the first letter.
///
/// `risk-mitigation` becomes `Risk mitigation`.
pub fn humanize_kebab(name: &str) -> String {
    let spaced = name.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
