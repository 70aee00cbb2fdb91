//! Slide records and their per-type payloads.
//!
//! Every payload field is defaulted: a record missing a field still deserialises and the
//! renderer simply omits the corresponding section.

use serde::{Deserialize, Serialize};

/// One catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideRecord {
    /// Stable identity for the slide, unique within a catalog.
    pub id: u32,

    /// Background style token, e.g. `from-blue-900 via-blue-700 to-purple-700`.
    #[serde(rename = "bgGradient", default)]
    pub bg_gradient: String,

    #[serde(flatten)]
    pub content: SlideContent,
}

impl SlideRecord {
    pub fn title(&self) -> &str {
        self.content.title()
    }
}

/// Discriminated slide payload. Each variant selects exactly one layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlideContent {
    Cover(CoverSlide),
    Stats(StatsSlide),
    Recording(RecordingSlide),
    MeetingFeatures(FeatureShowcaseSlide),
    KnowledgeBase(KnowledgeBaseSlide),
    Scenarios(ScenariosSlide),
    ProductComparison(ProductComparisonSlide),
    ProductEvolution(ProductEvolutionSlide),
    Partnership(PartnershipSlide),
    // Older decks only.
    Features(LegacyFeaturesSlide),
    Design(LegacyDesignSlide),
    Comparison(LegacyComparisonSlide),
    Roadmap(LegacyRoadmapSlide),
    /// Any `type` this build does not know. Renders nothing.
    #[serde(other)]
    Unknown,
}

impl SlideContent {
    /// The `type` tag as written in the catalog.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Cover(_) => "cover",
            Self::Stats(_) => "stats",
            Self::Recording(_) => "recording",
            Self::MeetingFeatures(_) => "meeting_features",
            Self::KnowledgeBase(_) => "knowledge_base",
            Self::Scenarios(_) => "scenarios",
            Self::ProductComparison(_) => "product_comparison",
            Self::ProductEvolution(_) => "product_evolution",
            Self::Partnership(_) => "partnership",
            Self::Features(_) => "features",
            Self::Design(_) => "design",
            Self::Comparison(_) => "comparison",
            Self::Roadmap(_) => "roadmap",
            Self::Unknown => "unknown",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Cover(s) => &s.title,
            Self::Stats(s) => &s.title,
            Self::Recording(s) => &s.title,
            Self::MeetingFeatures(s) => &s.title,
            Self::KnowledgeBase(s) => &s.title,
            Self::Scenarios(s) => &s.title,
            Self::ProductComparison(s) => &s.title,
            Self::ProductEvolution(s) => &s.title,
            Self::Partnership(s) => &s.title,
            Self::Features(s) => &s.title,
            Self::Design(s) => &s.title,
            Self::Comparison(s) => &s.title,
            Self::Roadmap(s) => &s.title,
            Self::Unknown => "",
        }
    }

    /// Every image reference the slide's layout may display, in layout order.
    pub fn image_refs(&self) -> Vec<&str> {
        let mut refs: Vec<&str> = Vec::new();
        match self {
            Self::Cover(s) => {
                refs.extend(s.hero_image.as_deref());
                refs.extend(s.tagline_icon.as_deref());
            }
            Self::Stats(s) => refs.extend(s.cards.iter().filter_map(|c| c.image.as_deref())),
            Self::Recording(s) => {
                refs.extend(s.core_features.iter().filter_map(|f| f.image.as_deref()))
            }
            Self::MeetingFeatures(s) => {
                refs.extend(s.features.iter().filter_map(|f| f.image.as_deref()));
                refs.extend(s.gif_url.as_deref());
            }
            Self::KnowledgeBase(s) => {
                refs.extend(s.features.iter().filter_map(|f| f.image.as_deref()))
            }
            Self::Scenarios(s) => {
                refs.extend(s.scenarios.iter().filter_map(|c| c.image.as_deref()))
            }
            Self::ProductComparison(s) => {
                refs.extend(s.comparison.ours.image.as_deref());
                refs.extend(s.comparison.theirs.image.as_deref());
            }
            Self::ProductEvolution(s) => refs.extend(
                s.evolution
                    .products
                    .iter()
                    .filter_map(|p| p.image.as_deref()),
            ),
            Self::Partnership(s) => refs.extend(s.partnership.image.as_deref()),
            Self::Features(_)
            | Self::Design(_)
            | Self::Comparison(_)
            | Self::Roadmap(_)
            | Self::Unknown => {}
        }
        refs
    }
}

/// A big number with a caption, used by the counter rows under several layouts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Counter {
    pub value: String,
    pub label: String,
    pub caption: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoverSlide {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    /// Text in the pulsing pill under the description.
    pub badge: String,
    pub tagline: String,
    pub tagline_icon: Option<String>,
    /// Product shot, preloaded with a loading/error state machine.
    pub hero_image: Option<String>,
    /// Label shown under the spinner while the hero image loads.
    pub hero_label: String,
    /// Two lines shown in the fallback panel when the hero image fails.
    pub hero_fallback: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stat {
    pub number: String,
    pub label: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareCard {
    pub value: String,
    pub title: String,
    pub caption: String,
    pub lines: Vec<String>,
    pub image: Option<String>,
    /// Glyph drawn instead of an image.
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsSlide {
    pub title: String,
    pub stats: Vec<Stat>,
    pub cards: Vec<HardwareCard>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreFeature {
    pub id: u32,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub icon: String,
    /// Short tags shown as pills.
    pub stats: Vec<String>,
    pub image: Option<String>,
    pub badge: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecordingSlide {
    pub title: String,
    pub subtitle: String,
    pub core_features: Vec<CoreFeature>,
}

/// A clickable feature card. Clicking opens `image` in the lightbox.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Feature {
    pub id: u32,
    pub name: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureShowcaseSlide {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub features_heading: String,
    pub features: Vec<Feature>,
    /// Animated demo shown beside the grid.
    pub gif_url: Option<String>,
    pub demo_title: String,
    pub demo_caption: String,
    pub stats: Vec<Counter>,
    pub flow: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowStep {
    pub icon: String,
    pub title: String,
    pub caption: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KnowledgeBaseSlide {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub features: Vec<Feature>,
    pub stats_heading: String,
    pub stats: Vec<Counter>,
    pub workflow_heading: String,
    pub workflow: Vec<WorkflowStep>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub category: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenariosSlide {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub scenarios: Vec<Scenario>,
    pub counters: Vec<Counter>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonRow {
    pub name: String,
    pub advantage: String,
    #[serde(alias = "ticnote")]
    pub ours: String,
    #[serde(alias = "competitor")]
    pub theirs: String,
}

impl ComparisonRow {
    pub fn ours_supported(&self) -> bool {
        is_supported(&self.ours)
    }

    pub fn theirs_supported(&self) -> bool {
        is_supported(&self.theirs)
    }
}

fn is_supported(cell: &str) -> bool {
    cell.contains('\u{2705}')
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Score {
    pub score: String,
    pub rate: String,
}

impl Score {
    /// `rate` as a 0..=1 fraction (`"33%"` -> 0.33). Unparseable rates count as zero.
    pub fn fraction(&self) -> f32 {
        self.rate
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f32>()
            .map(|v| (v / 100.0).clamp(0.0, 1.0))
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Spec {
    pub label: String,
    pub value: String,
}

/// One side of the comparison: a product panel with key specs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contender {
    pub name: String,
    pub image: Option<String>,
    /// Glyph shown when there is no image.
    pub icon: String,
    pub specs: Vec<Spec>,
    pub score_label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonScores {
    #[serde(alias = "ticnote")]
    pub ours: Score,
    #[serde(alias = "competitor")]
    pub theirs: Score,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductComparison {
    pub ours: Contender,
    pub theirs: Contender,
    pub features: Vec<ComparisonRow>,
    pub stats: ComparisonScores,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub title: String,
    pub text: String,
    pub counters: Vec<Counter>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductComparisonSlide {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub comparison: ProductComparison,
    pub summary: Option<Summary>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimension {
    pub icon: String,
    pub name: String,
    pub desc: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub name: String,
    pub subtitle: String,
    pub image: Option<String>,
    pub status: String,
    pub year: String,
    pub position: String,
    pub target: String,
    pub features: Vec<String>,
    pub specs: Vec<Spec>,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Evolution {
    pub dimensions: Vec<Dimension>,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductEvolutionSlide {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub evolution: Evolution,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Opportunity {
    pub icon: String,
    pub title: String,
    pub desc: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vision {
    pub title: String,
    pub subtitle: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Partnership {
    pub image: Option<String>,
    pub opportunities: Vec<Opportunity>,
    pub vision: Vision,
    pub closing: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartnershipSlide {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub partnership: Partnership,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyFeaturesSlide {
    pub title: String,
    pub features: Vec<String>,
    pub highlight: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSpec {
    pub value: String,
    pub label: String,
    pub desc: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyDesignSlide {
    pub title: String,
    pub specs: Vec<DesignSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonColumn {
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TwoColumnComparison {
    pub traditional: ComparisonColumn,
    #[serde(alias = "ticnote")]
    pub ours: ComparisonColumn,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyComparisonSlide {
    pub title: String,
    pub comparison: TwoColumnComparison,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    Completed,
    Current,
    #[default]
    #[serde(other)]
    Planned,
}

impl MilestoneStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Current => "In progress",
            Self::Planned => "Planned",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Milestone {
    pub title: String,
    pub phase: String,
    pub status: MilestoneStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyRoadmapSlide {
    pub title: String,
    pub timeline: Vec<Milestone>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_fraction() {
        let score = Score {
            score: "3/9".into(),
            rate: "33%".into(),
        };
        assert!((score.fraction() - 0.33).abs() < 1e-6);
        assert_eq!(Score::default().fraction(), 0.0);
        let over = Score {
            score: String::new(),
            rate: "250%".into(),
        };
        assert_eq!(over.fraction(), 1.0);
    }

    #[test]
    fn test_comparison_row_aliases() {
        let row: ComparisonRow = serde_yaml::from_str(
            "name: Agent\nticnote: \"\u{2705} Yes\"\ncompetitor: \"\u{274C} No\"\n",
        )
        .unwrap();
        assert!(row.ours_supported());
        assert!(!row.theirs_supported());
    }

    #[test]
    fn test_unknown_milestone_status_is_planned() {
        let milestone: Milestone = serde_yaml::from_str("title: X\nstatus: someday\n").unwrap();
        assert_eq!(milestone.status, MilestoneStatus::Planned);
    }

    #[test]
    fn test_image_refs_in_layout_order() {
        let content: SlideContent = serde_yaml::from_str(
            "type: meeting_features\nfeatures:\n  - { name: A, image: /a.png }\n  - { name: B }\n  - { name: C, image: /c.png }\ngifUrl: /demo.gif\n",
        )
        .unwrap();
        assert_eq!(content.image_refs(), vec!["/a.png", "/c.png", "/demo.gif"]);
        assert!(SlideContent::Unknown.image_refs().is_empty());
    }

    #[test]
    fn test_kind_matches_tag() {
        let content: SlideContent =
            serde_yaml::from_str("type: product_evolution\ntitle: Roadmap\n").unwrap();
        assert_eq!(content.kind(), "product_evolution");
        assert_eq!(content.title(), "Roadmap");
    }
}
