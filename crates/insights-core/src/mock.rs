#![forbid(unsafe_code)]

//! Built-in mock catalogs and catalog file loading.
//!
//! The dashboards ship with a fixed retail data set. A JSON catalog file
//! with the same shape as [`Catalogs::to_json_pretty`] output can replace
//! it at startup. Sections missing from a file load as empty catalogs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::display::Icon;
use crate::error::Result;
use crate::records::{
    AffinityNode, AiModel, BrandPoint, FunnelStage, Impact, InsightCard, InsightCategory,
    InteractiveFeature, Interactivity, ModelKind, ModelStatus, PerformanceMetric,
    PredictiveInsight, Priority, Recommendation, RecommendationKind, SalesSlot, Trend,
    Visualization, VizKind, VizSamples,
};

/// Bullets of the AI analysis block in the prediction detail panel.
pub const AI_ANALYSIS: [&str; 4] = [
    "Data sources: 15 integrated feeds",
    "Pattern recognition: 94% accuracy",
    "Historical correlation: Strong",
    "External factors: Considered",
];

/// Recommended follow-ups listed in the prediction detail panel.
pub const RECOMMENDED_ACTIONS: [&str; 4] = [
    "Immediate inventory adjustment",
    "Marketing campaign optimization",
    "Supplier communication",
    "Customer notification system",
];

/// Static figures of the visualization performance panel.
pub const RENDER_TIME: &str = "0.8s";
pub const DATA_QUALITY: &str = "94%";

/// Every catalog the dashboards display.
#[derive(Debug, Clone, Serialize)]
pub struct Catalogs {
    pub models: Catalog<AiModel>,
    pub insights: Catalog<InsightCard>,
    pub visualizations: Catalog<Visualization>,
    pub features: Catalog<InteractiveFeature>,
    pub predictions: Catalog<PredictiveInsight>,
    pub recommendations: Catalog<Recommendation>,
    pub metrics: Catalog<PerformanceMetric>,
}

/// Raw, unvalidated catalog file contents.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    models: Vec<AiModel>,
    insights: Vec<InsightCard>,
    visualizations: Vec<Visualization>,
    features: Vec<InteractiveFeature>,
    predictions: Vec<PredictiveInsight>,
    recommendations: Vec<Recommendation>,
    metrics: Vec<PerformanceMetric>,
}

impl Catalogs {
    /// The built-in retail data set.
    pub fn builtin() -> Result<Self> {
        Self::from_file(CatalogFile {
            models: ai_models(),
            insights: insight_cards(),
            visualizations: visualizations(),
            features: interactive_features(),
            predictions: predictive_insights(),
            recommendations: recommendations(),
            metrics: performance_metrics(),
        })
    }

    /// Parse and validate catalogs from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(text)?;
        Self::from_file(file)
    }

    /// Read catalogs from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let catalogs = Self::from_json(&text)?;
        tracing::info!(path = %path.display(), "catalogs loaded from file");
        Ok(catalogs)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn from_file(file: CatalogFile) -> Result<Self> {
        Ok(Self {
            models: Catalog::new("models", file.models)?,
            insights: Catalog::new("insights", file.insights)?,
            visualizations: Catalog::new("visualizations", file.visualizations)?,
            features: Catalog::new("features", file.features)?,
            predictions: Catalog::new("predictions", file.predictions)?,
            recommendations: Catalog::new("recommendations", file.recommendations)?,
            metrics: Catalog::new("metrics", file.metrics)?,
        })
    }
}

#[allow(clippy::too_many_arguments)]
fn model(
    id: &str,
    name: &str,
    kind: ModelKind,
    accuracy: f64,
    status: ModelStatus,
    updated_minutes_ago: u32,
    predictions: u64,
    confidence: f64,
) -> AiModel {
    AiModel {
        id: id.into(),
        name: name.into(),
        kind,
        accuracy,
        status,
        updated_minutes_ago,
        predictions,
        confidence,
    }
}

pub fn ai_models() -> Vec<AiModel> {
    use ModelStatus::{Deployed, Optimizing, Training};
    vec![
        model("1", "Demand Forecasting Engine", ModelKind::Predictive, 94.2, Deployed, 120, 15_420, 91.0),
        model("2", "Customer Segmentation AI", ModelKind::Clustering, 87.8, Deployed, 240, 8_934, 89.0),
        model("3", "Price Optimization Model", ModelKind::Recommendation, 92.1, Training, 60, 5_678, 85.0),
        model("4", "Sentiment Analysis Engine", ModelKind::Nlp, 89.5, Deployed, 30, 23_456, 88.0),
        model("5", "Inventory Optimization AI", ModelKind::Predictive, 91.3, Optimizing, 360, 12_890, 93.0),
    ]
}

#[allow(clippy::too_many_arguments)]
fn card(
    id: &str,
    title: &str,
    insight: &str,
    confidence: f64,
    impact: Impact,
    category: InsightCategory,
    model: &str,
    timeframe: &str,
) -> InsightCard {
    InsightCard {
        id: id.into(),
        title: title.into(),
        insight: insight.into(),
        confidence,
        impact,
        category,
        model: model.into(),
        actionable: true,
        timeframe: timeframe.into(),
    }
}

pub fn insight_cards() -> Vec<InsightCard> {
    vec![
        card(
            "1",
            "Wedding Season Demand Spike",
            "AI predicts 340% increase in ethnic wear demand over next 3 weeks based on social sentiment, booking patterns, and historical data correlation.",
            94.0,
            Impact::High,
            InsightCategory::Sales,
            "Demand Forecasting Engine",
            "3 weeks",
        ),
        card(
            "2",
            "Premium Customer Segment Growth",
            "Machine learning identifies emerging high-value customer segment with 45% higher lifetime value, concentrated in IT professionals aged 28-35.",
            89.0,
            Impact::High,
            InsightCategory::Customer,
            "Customer Segmentation AI",
            "6 weeks",
        ),
        card(
            "3",
            "Dynamic Pricing Opportunity",
            "AI recommends 8-12% price adjustment on formal wear during peak hours to optimize revenue while maintaining competitive positioning.",
            87.0,
            Impact::Medium,
            InsightCategory::Sales,
            "Price Optimization Model",
            "2 weeks",
        ),
        card(
            "4",
            "Social Sentiment Shift",
            "NLP analysis detects 67% positive sentiment increase around sustainable fashion, indicating market opportunity for eco-friendly lines.",
            91.0,
            Impact::Medium,
            InsightCategory::Market,
            "Sentiment Analysis Engine",
            "4 weeks",
        ),
        card(
            "5",
            "Inventory Rebalancing Alert",
            "Predictive model suggests redistributing 25% of casual wear inventory to formal wear to prevent stockouts during corporate season.",
            93.0,
            Impact::High,
            InsightCategory::Inventory,
            "Inventory Optimization AI",
            "1 week",
        ),
    ]
}

fn stage(stage: &str, visitors: f64, conversion: f64) -> FunnelStage {
    FunnelStage {
        stage: stage.into(),
        visitors,
        conversion,
    }
}

fn node(product: &str, connections: f64, strength: f64, category: &str) -> AffinityNode {
    AffinityNode {
        product: product.into(),
        connections,
        strength,
        category: category.into(),
    }
}

fn slot(hour: u8, day: &str, sales: f64, intensity: f64) -> SalesSlot {
    SalesSlot {
        hour,
        day: day.into(),
        sales,
        intensity,
    }
}

fn brand(brand: &str, price: f64, quality: f64, satisfaction: f64) -> BrandPoint {
    BrandPoint {
        brand: brand.into(),
        price,
        quality,
        satisfaction,
    }
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

pub fn visualizations() -> Vec<Visualization> {
    vec![
        Visualization {
            id: "1".into(),
            title: "Customer Journey Flow Analysis".into(),
            kind: VizKind::Flow,
            samples: VizSamples::Flow(vec![
                stage("Awareness", 10_000.0, 15.0),
                stage("Interest", 1_500.0, 35.0),
                stage("Consideration", 525.0, 45.0),
                stage("Purchase", 236.0, 85.0),
                stage("Loyalty", 201.0, 92.0),
            ]),
            insights: lines(&[
                "Major drop-off at awareness to interest stage",
                "High conversion rate in purchase stage indicates strong product-market fit",
                "Loyalty stage shows excellent retention potential",
            ]),
            interactivity: Interactivity::High,
            complexity: 85.0,
        },
        Visualization {
            id: "2".into(),
            title: "Product Affinity Network".into(),
            kind: VizKind::Network,
            samples: VizSamples::Network(vec![
                node("Formal Shirts", 15.0, 0.8, "formal"),
                node("Business Suits", 12.0, 0.9, "formal"),
                node("Ties", 8.0, 0.6, "accessories"),
                node("Dress Shoes", 10.0, 0.7, "footwear"),
                node("Cufflinks", 5.0, 0.4, "accessories"),
            ]),
            insights: lines(&[
                "Strong correlation between formal shirts and business suits",
                "Accessories show lower but consistent cross-selling potential",
                "Opportunity to bundle formal wear with accessories",
            ]),
            interactivity: Interactivity::High,
            complexity: 92.0,
        },
        Visualization {
            id: "3".into(),
            title: "Temporal Sales Patterns".into(),
            kind: VizKind::Temporal,
            samples: VizSamples::Temporal(vec![
                slot(9, "Monday", 45.0, 0.3),
                slot(12, "Monday", 120.0, 0.8),
                slot(18, "Monday", 200.0, 1.0),
                slot(9, "Saturday", 180.0, 0.9),
                slot(12, "Saturday", 250.0, 1.0),
                slot(18, "Saturday", 220.0, 0.95),
            ]),
            insights: lines(&[
                "Weekend shopping peaks earlier in the day",
                "Evening hours show consistent high performance",
                "Monday lunch hours present optimization opportunity",
            ]),
            interactivity: Interactivity::Medium,
            complexity: 78.0,
        },
        Visualization {
            id: "4".into(),
            title: "Price-Quality Perception Matrix".into(),
            kind: VizKind::Correlation,
            samples: VizSamples::Correlation(vec![
                brand("Raymond", 2_500.0, 7.2, 8.1),
                brand("Allen Solly", 1_800.0, 6.8, 7.5),
                brand("Hugo Boss", 3_200.0, 8.5, 8.8),
                brand("Cotton King", 1_200.0, 5.9, 6.8),
                brand("Armani", 4_500.0, 9.1, 9.2),
            ]),
            insights: lines(&[
                "Raymond positioned optimally in price-quality matrix",
                "Opportunity to increase perceived quality through marketing",
                "Premium segment shows strong satisfaction correlation",
            ]),
            interactivity: Interactivity::High,
            complexity: 88.0,
        },
    ]
}

pub fn interactive_features() -> Vec<InteractiveFeature> {
    [
        ("Real-time Filtering", Icon::Filter, true),
        ("Data Export", Icon::Download, true),
        ("Full Screen Mode", Icon::Maximize, true),
        ("Auto Refresh", Icon::RotateCcw, false),
        ("AI Insights", Icon::Brain, true),
        ("Collaborative Annotations", Icon::Eye, false),
    ]
    .into_iter()
    .map(|(name, icon, active)| InteractiveFeature {
        name: name.into(),
        icon,
        active,
    })
    .collect()
}

#[allow(clippy::too_many_arguments)]
fn prediction(
    id: &str,
    title: &str,
    text: &str,
    confidence: f64,
    impact: Impact,
    timeframe: &str,
    category: InsightCategory,
    risk_level: f64,
) -> PredictiveInsight {
    PredictiveInsight {
        id: id.into(),
        title: title.into(),
        prediction: text.into(),
        confidence,
        impact,
        timeframe: timeframe.into(),
        category,
        actionable: true,
        risk_level,
    }
}

pub fn predictive_insights() -> Vec<PredictiveInsight> {
    vec![
        prediction(
            "1",
            "Wedding Season Demand Surge",
            "Ethnic wear demand will increase by 340% in next 3 weeks based on booking patterns and social sentiment",
            94.0,
            Impact::High,
            "3 weeks",
            InsightCategory::Sales,
            15.0,
        ),
        prediction(
            "2",
            "Corporate Bulk Order Opportunity",
            "IT sector expansion in Pune will drive 25% increase in corporate formal wear orders",
            87.0,
            Impact::Medium,
            "6 weeks",
            InsightCategory::Market,
            25.0,
        ),
        prediction(
            "3",
            "Inventory Optimization Alert",
            "Premium fabric shortage risk detected - 78% probability of stockout in luxury segment",
            91.0,
            Impact::High,
            "2 weeks",
            InsightCategory::Inventory,
            82.0,
        ),
        prediction(
            "4",
            "Customer Behavior Shift",
            "Gen Z customers showing 45% preference shift towards sustainable premium fashion",
            83.0,
            Impact::Medium,
            "8 weeks",
            InsightCategory::Customer,
            35.0,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn recommendation(
    id: &str,
    kind: RecommendationKind,
    title: &str,
    description: &str,
    expected_impact: f64,
    implementation_cost: &str,
    priority: Priority,
    ai_confidence: f64,
) -> Recommendation {
    Recommendation {
        id: id.into(),
        kind,
        title: title.into(),
        description: description.into(),
        expected_impact,
        implementation_cost: implementation_cost.into(),
        priority,
        ai_confidence,
    }
}

pub fn recommendations() -> Vec<Recommendation> {
    vec![
        recommendation(
            "1",
            RecommendationKind::Opportunity,
            "Launch AI-Powered Personal Styling Service",
            "Implement AI-driven personal styling recommendations based on customer preferences, body type, and occasion analysis",
            28.0,
            "₹12-18L",
            Priority::High,
            89.0,
        ),
        recommendation(
            "2",
            RecommendationKind::Optimization,
            "Dynamic Pricing Intelligence System",
            "Deploy real-time pricing optimization based on demand patterns, competitor analysis, and inventory levels",
            22.0,
            "₹8-12L",
            Priority::Critical,
            92.0,
        ),
        recommendation(
            "3",
            RecommendationKind::Growth,
            "Predictive Customer Lifetime Value Engine",
            "Build ML models to predict customer lifetime value and optimize marketing spend allocation",
            35.0,
            "₹15-25L",
            Priority::High,
            86.0,
        ),
        recommendation(
            "4",
            RecommendationKind::RiskMitigation,
            "Supply Chain Risk Prediction",
            "Implement early warning system for supply chain disruptions using external data feeds",
            18.0,
            "₹6-10L",
            Priority::Medium,
            84.0,
        ),
    ]
}

pub fn performance_metrics() -> Vec<PerformanceMetric> {
    [
        ("AI Accuracy", 94.0, 96.0, Trend::Up),
        ("Prediction Confidence", 89.0, 92.0, Trend::Up),
        ("Response Time", 1.2, 1.0, Trend::Down),
        ("Data Quality", 91.0, 95.0, Trend::Up),
        ("Model Performance", 87.0, 90.0, Trend::Up),
        ("User Satisfaction", 4.6, 4.8, Trend::Up),
    ]
    .into_iter()
    .map(|(metric, current, target, trend)| PerformanceMetric {
        metric: metric.into(),
        current,
        target,
        trend,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;

    #[test]
    fn builtin_catalog_sizes() {
        let catalogs = Catalogs::builtin().unwrap();
        assert_eq!(catalogs.models.len(), 5);
        assert_eq!(catalogs.insights.len(), 5);
        assert_eq!(catalogs.visualizations.len(), 4);
        assert_eq!(catalogs.features.len(), 6);
        assert_eq!(catalogs.predictions.len(), 4);
        assert_eq!(catalogs.recommendations.len(), 4);
        assert_eq!(catalogs.metrics.len(), 6);
    }

    #[test]
    fn every_visualization_has_three_insights() {
        for viz in visualizations() {
            assert_eq!(viz.insights.len(), 3, "{}", viz.title);
            assert!(!viz.samples.is_empty());
        }
    }

    #[test]
    fn missing_sections_load_empty() {
        let catalogs = Catalogs::from_json(r#"{"metrics": []}"#).unwrap();
        assert!(catalogs.models.is_empty());
        assert!(catalogs.metrics.is_empty());
    }

    #[test]
    fn duplicate_ids_in_file_are_rejected() {
        let text = r#"{"metrics": [
            {"metric": "AI Accuracy", "current": 1, "target": 2, "trend": "up"},
            {"metric": "AI Accuracy", "current": 3, "target": 4, "trend": "down"}
        ]}"#;
        let err = Catalogs::from_json(text).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { catalog: "metrics", .. }));
    }

    #[test]
    fn unknown_enum_names_load() {
        let text = r#"{"metrics": [
            {"metric": "Uptime", "current": 99, "target": 100, "trend": "sideways"}
        ]}"#;
        let catalogs = Catalogs::from_json(text).unwrap();
        assert_eq!(catalogs.metrics.get(0).map(|m| m.trend), Some(Trend::Unknown));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Catalogs::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
