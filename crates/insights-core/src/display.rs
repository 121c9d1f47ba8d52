#![forbid(unsafe_code)]

//! Mapping from record enumerations to display attributes.
//!
//! Every mapping here is total. Each declared variant has an entry and the
//! `Unknown` variant of every enumeration maps to an explicit fallback, so a
//! catalog loaded with names this build does not recognize still renders.

use serde::{Deserialize, Serialize};

use crate::records::{
    Impact, InsightCategory, Interactivity, ModelKind, ModelStatus, Priority, RecommendationKind,
    Trend, VizKind,
};

/// Semantic color name. The dashboard maps tones to theme colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Green,
    Blue,
    Amber,
    Purple,
    Red,
    Teal,
    Orange,
    Gray,
}

/// Symbolic icon name. The dashboard maps icons to glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    DollarSign,
    Users,
    Package,
    TrendingUp,
    TrendingDown,
    Activity,
    Brain,
    Target,
    Lightbulb,
    Sparkles,
    AlertTriangle,
    Cpu,
    Eye,
    Filter,
    Download,
    Maximize,
    RotateCcw,
    Clock,
    Zap,
    Globe,
    Layers,
    Network,
    #[serde(other)]
    Unknown,
}

/// How a visualization is charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Filled visitors area with a conversion line on top.
    Area,
    /// Point cloud of two numeric dimensions.
    Scatter,
    /// Vertical bars, one per sample.
    Bar,
}

/// Tone, icon and label for one enumeration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayAttrs {
    pub tone: Tone,
    pub icon: Icon,
    pub label: &'static str,
}

impl DisplayAttrs {
    #[inline]
    pub const fn new(tone: Tone, icon: Icon, label: &'static str) -> Self {
        Self { tone, icon, label }
    }
}

impl ModelStatus {
    pub fn display(self) -> DisplayAttrs {
        let tone = match self {
            Self::Deployed => Tone::Green,
            Self::Training => Tone::Blue,
            Self::Testing => Tone::Amber,
            Self::Optimizing => Tone::Purple,
            Self::Unknown => Tone::Gray,
        };
        DisplayAttrs::new(tone, Icon::Activity, self.as_str())
    }
}

impl ModelKind {
    pub fn display(self) -> DisplayAttrs {
        let icon = match self {
            Self::Predictive => Icon::TrendingUp,
            Self::Classification => Icon::Target,
            Self::Clustering => Icon::Users,
            Self::Recommendation => Icon::Lightbulb,
            Self::Nlp => Icon::Brain,
            Self::Unknown => Icon::Cpu,
        };
        let tone = match self {
            Self::Unknown => Tone::Gray,
            _ => Tone::Blue,
        };
        DisplayAttrs::new(tone, icon, self.as_str())
    }

    /// Capability bullets shown in the model detail panel.
    pub fn capabilities(self) -> &'static [&'static str] {
        match self {
            Self::Predictive => &[
                "Future trend forecasting",
                "Demand pattern analysis",
                "Risk assessment modeling",
            ],
            Self::Clustering => &[
                "Customer segmentation",
                "Behavioral pattern grouping",
                "Market segment identification",
            ],
            Self::Recommendation => &[
                "Personalized suggestions",
                "Cross-selling optimization",
                "Dynamic pricing recommendations",
            ],
            Self::Nlp => &[
                "Sentiment analysis",
                "Text classification",
                "Social media monitoring",
            ],
            Self::Classification | Self::Unknown => &[],
        }
    }
}

impl Impact {
    pub fn display(self) -> DisplayAttrs {
        let tone = match self {
            Self::High => Tone::Red,
            Self::Medium => Tone::Amber,
            Self::Low => Tone::Green,
            Self::Unknown => Tone::Gray,
        };
        DisplayAttrs::new(tone, Icon::AlertTriangle, self.as_str())
    }
}

impl InsightCategory {
    pub fn display(self) -> DisplayAttrs {
        let (tone, icon) = match self {
            Self::Sales => (Tone::Green, Icon::DollarSign),
            Self::Customer => (Tone::Blue, Icon::Users),
            Self::Inventory => (Tone::Orange, Icon::Package),
            Self::Market => (Tone::Purple, Icon::TrendingUp),
            Self::Operational => (Tone::Teal, Icon::Activity),
            Self::Unknown => (Tone::Gray, Icon::Brain),
        };
        DisplayAttrs::new(tone, icon, self.as_str())
    }
}

impl RecommendationKind {
    pub fn display(self) -> DisplayAttrs {
        let (tone, icon) = match self {
            Self::Optimization => (Tone::Blue, Icon::Target),
            Self::Opportunity => (Tone::Green, Icon::TrendingUp),
            Self::Growth => (Tone::Purple, Icon::Sparkles),
            Self::RiskMitigation => (Tone::Amber, Icon::AlertTriangle),
            Self::Unknown => (Tone::Gray, Icon::Brain),
        };
        DisplayAttrs::new(tone, icon, self.as_str())
    }
}

impl Priority {
    pub fn display(self) -> DisplayAttrs {
        let tone = match self {
            Self::Critical => Tone::Red,
            Self::High => Tone::Amber,
            Self::Medium => Tone::Blue,
            Self::Low => Tone::Green,
            Self::Unknown => Tone::Gray,
        };
        DisplayAttrs::new(tone, Icon::Zap, self.as_str())
    }
}

impl Interactivity {
    pub fn display(self) -> DisplayAttrs {
        let tone = match self {
            Self::High => Tone::Green,
            Self::Medium => Tone::Amber,
            Self::Low | Self::Unknown => Tone::Gray,
        };
        DisplayAttrs::new(tone, Icon::Eye, self.as_str())
    }
}

impl Trend {
    pub fn display(self) -> DisplayAttrs {
        match self {
            Self::Up => DisplayAttrs::new(Tone::Green, Icon::TrendingUp, "up"),
            Self::Down => DisplayAttrs::new(Tone::Red, Icon::TrendingDown, "down"),
            Self::Unknown => DisplayAttrs::new(Tone::Gray, Icon::Activity, "unknown"),
        }
    }
}

impl VizKind {
    pub fn chart(self) -> ChartKind {
        match self {
            Self::Flow => ChartKind::Area,
            Self::Network | Self::Correlation => ChartKind::Scatter,
            _ => ChartKind::Bar,
        }
    }

    pub fn display(self) -> DisplayAttrs {
        let icon = match self {
            Self::Flow => Icon::Activity,
            Self::Network => Icon::Network,
            Self::Temporal => Icon::Clock,
            Self::Correlation => Icon::Target,
            Self::Geographic => Icon::Globe,
            Self::Heatmap => Icon::Layers,
            Self::Unknown => Icon::Eye,
        };
        let tone = match self {
            Self::Unknown => Tone::Gray,
            _ => Tone::Purple,
        };
        DisplayAttrs::new(tone, icon, self.as_str())
    }
}
