#![forbid(unsafe_code)]

//! Record types for the three dashboard catalogs.
//!
//! Records are plain data. They are built once (from the built-in mock data
//! or a catalog file) and never mutated. Closed enumerations serialize with
//! kebab-case names; a name this build does not know deserializes to
//! `Unknown` rather than failing the whole catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Record;
use crate::display::Icon;

macro_rules! closed_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $($variant,)+
            #[serde(other)]
            Unknown,
        }

        impl $name {
            /// Every declared variant, excluding `Unknown`.
            pub const KNOWN: &'static [Self] = &[$(Self::$variant),+];

            /// Kebab-case name of the variant.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Unknown => "unknown",
                }
            }

            /// Parse a kebab-case name. Unrecognized names become `Unknown`.
            pub fn parse(name: &str) -> Self {
                Self::KNOWN
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == name)
                    .unwrap_or(Self::Unknown)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_enum!(
    /// What an AI model does.
    ModelKind {
        Predictive => "predictive",
        Classification => "classification",
        Clustering => "clustering",
        Recommendation => "recommendation",
        Nlp => "nlp",
    }
);

closed_enum!(
    /// Lifecycle status of an AI model.
    ModelStatus {
        Training => "training",
        Deployed => "deployed",
        Testing => "testing",
        Optimizing => "optimizing",
    }
);

closed_enum!(
    /// Business impact of an insight.
    Impact {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
);

closed_enum!(
    /// Business area an insight belongs to.
    InsightCategory {
        Sales => "sales",
        Customer => "customer",
        Inventory => "inventory",
        Market => "market",
        Operational => "operational",
    }
);

closed_enum!(
    /// Visualization family.
    VizKind {
        Heatmap => "heatmap",
        Network => "network",
        Flow => "flow",
        Geographic => "geographic",
        Temporal => "temporal",
        Correlation => "correlation",
    }
);

closed_enum!(
    Interactivity {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
);

closed_enum!(
    /// Strategic recommendation family.
    RecommendationKind {
        Optimization => "optimization",
        Opportunity => "opportunity",
        RiskMitigation => "risk-mitigation",
        Growth => "growth",
    }
);

closed_enum!(
    Priority {
        Critical => "critical",
        High => "high",
        Medium => "medium",
        Low => "low",
    }
);

closed_enum!(
    /// Direction a performance metric is moving.
    Trend {
        Up => "up",
        Down => "down",
    }
);

/// A monitored machine learning model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiModel {
    pub id: String,
    pub name: String,
    pub kind: ModelKind,
    /// Accuracy in percent, one decimal.
    pub accuracy: f64,
    pub status: ModelStatus,
    pub updated_minutes_ago: u32,
    pub predictions: u64,
    /// Confidence in percent.
    pub confidence: f64,
}

/// A generated business insight card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightCard {
    pub id: String,
    pub title: String,
    pub insight: String,
    pub confidence: f64,
    pub impact: Impact,
    pub category: InsightCategory,
    /// Name of the model that produced the insight.
    pub model: String,
    pub actionable: bool,
    pub timeframe: String,
}

/// Conversion funnel stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub stage: String,
    pub visitors: f64,
    pub conversion: f64,
}

/// Product node in an affinity network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffinityNode {
    pub product: String,
    pub connections: f64,
    pub strength: f64,
    pub category: String,
}

/// Sales volume for one hour of one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSlot {
    pub hour: u8,
    pub day: String,
    pub sales: f64,
    pub intensity: f64,
}

/// Brand position in the price/quality plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandPoint {
    pub brand: String,
    pub price: f64,
    pub quality: f64,
    pub satisfaction: f64,
}

/// Chart input embedded in a visualization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VizSamples {
    Flow(Vec<FunnelStage>),
    Network(Vec<AffinityNode>),
    Temporal(Vec<SalesSlot>),
    Correlation(Vec<BrandPoint>),
}

impl VizSamples {
    pub fn len(&self) -> usize {
        match self {
            Self::Flow(v) => v.len(),
            Self::Network(v) => v.len(),
            Self::Temporal(v) => v.len(),
            Self::Correlation(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Two-dimensional points for a scatter plot.
    ///
    /// Network nodes plot connections against strength, brands plot price
    /// against quality. Other sample sets plot their bar value against the
    /// sample position.
    pub fn scatter_points(&self) -> Vec<(f64, f64)> {
        match self {
            Self::Network(nodes) => nodes.iter().map(|n| (n.connections, n.strength)).collect(),
            Self::Correlation(points) => points.iter().map(|p| (p.price, p.quality)).collect(),
            _ => self
                .bars()
                .into_iter()
                .enumerate()
                .map(|(i, (_, v))| (i as f64, v))
                .collect(),
        }
    }

    /// Labelled values for a bar chart.
    pub fn bars(&self) -> Vec<(String, f64)> {
        match self {
            Self::Temporal(slots) => slots
                .iter()
                .map(|s| (format!("{} {}h", short_day(&s.day), s.hour), s.sales))
                .collect(),
            Self::Flow(stages) => stages
                .iter()
                .map(|s| (s.stage.clone(), s.visitors))
                .collect(),
            Self::Network(nodes) => nodes
                .iter()
                .map(|n| (n.product.clone(), n.connections))
                .collect(),
            Self::Correlation(points) => points
                .iter()
                .map(|p| (p.brand.clone(), p.satisfaction))
                .collect(),
        }
    }
}

fn short_day(day: &str) -> &str {
    day.get(..3).unwrap_or(day)
}

/// A visualization offered by the hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visualization {
    pub id: String,
    pub title: String,
    pub kind: VizKind,
    pub samples: VizSamples,
    pub insights: Vec<String>,
    pub interactivity: Interactivity,
    /// Complexity score, 0 to 100.
    pub complexity: f64,
}

/// A feature toggle listed in the hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveFeature {
    pub name: String,
    pub icon: Icon,
    pub active: bool,
}

/// A forecast produced by the predictive engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictiveInsight {
    pub id: String,
    pub title: String,
    pub prediction: String,
    pub confidence: f64,
    pub impact: Impact,
    pub timeframe: String,
    pub category: InsightCategory,
    pub actionable: bool,
    /// Risk level, 0 to 100.
    pub risk_level: f64,
}

/// A strategic recommendation card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    /// Expected impact, percent.
    pub expected_impact: f64,
    pub implementation_cost: String,
    pub priority: Priority,
    pub ai_confidence: f64,
}

/// One engine performance metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetric {
    pub metric: String,
    pub current: f64,
    pub target: f64,
    pub trend: Trend,
}

impl Record for AiModel {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for InsightCard {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Visualization {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for InteractiveFeature {
    fn id(&self) -> &str {
        &self.name
    }
}

impl Record for PredictiveInsight {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Recommendation {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for PerformanceMetric {
    fn id(&self) -> &str {
        &self.metric
    }
}
