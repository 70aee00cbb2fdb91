pub mod model;

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use model::*;

/// The deck shipped inside the binary, used when no catalog file is given.
pub const DEFAULT_DECK: &str = include_str!("../../../../decks/product-line.yaml");

const DEFAULT_TITLE: &str = "Product Presentation";

/// An ordered, immutable sequence of slides. Catalog order is navigation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub meta: DeckMeta,
    #[serde(default)]
    pub slides: Vec<SlideRecord>,
    /// Directory that local (`/`-prefixed) asset references resolve against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeckMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Line shown under the title on the landing page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,

    /// Single glyph shown in the logo tile of the navigation bar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_mark: Option<String>,
}

// `parse` rejects decks without slides.
#[allow(clippy::len_without_is_empty)]
impl Catalog {
    /// Parse a catalog document. Fails only on malformed YAML or an empty deck.
    pub fn parse(content: &str) -> Result<Self> {
        let catalog: Catalog =
            serde_yaml::from_str(content).context("Catalog is not a valid slide document")?;
        if catalog.slides.is_empty() {
            anyhow::bail!("Catalog contains no slides");
        }
        for warning in catalog.validate() {
            log::warn!("{warning}");
        }
        Ok(catalog)
    }

    /// The deck compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::parse(DEFAULT_DECK).context("Embedded deck is invalid")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut catalog =
            Self::parse(&content).with_context(|| format!("Failed to load {}", path.display()))?;
        catalog.base_dir = path.parent().map(Path::to_path_buf);
        log::info!(
            "Loaded {} slides from {}",
            catalog.slides.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Load from `path` if given, otherwise fall back to the embedded deck.
    pub fn load_or_embedded(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::embedded(),
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Number of slides as a non-zero count. `parse` rejects empty decks, so this is
    /// only `None` for a catalog assembled by hand.
    pub fn slide_count(&self) -> Option<NonZeroUsize> {
        NonZeroUsize::new(self.slides.len())
    }

    pub fn get(&self, index: usize) -> Option<&SlideRecord> {
        self.slides.get(index)
    }

    pub fn title(&self) -> &str {
        self.meta.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn brand_mark(&self) -> String {
        self.meta
            .brand_mark
            .clone()
            .or_else(|| self.title().chars().next().map(String::from))
            .unwrap_or_default()
    }

    /// Non-fatal problems with the deck.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();
        for (index, slide) in self.slides.iter().enumerate() {
            if !seen.insert(slide.id) {
                warnings.push(format!(
                    "Slide {} reuses id {} (ids should be unique)",
                    index + 1,
                    slide.id
                ));
            }
            if matches!(slide.content, SlideContent::Unknown) {
                warnings.push(format!(
                    "Slide {} (id {}) has an unrecognised type and will render empty",
                    index + 1,
                    slide.id
                ));
            }
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_deck_parses() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.len(), 9);
        let kinds: Vec<&str> = catalog.slides.iter().map(|s| s.content.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                "cover",
                "stats",
                "recording",
                "meeting_features",
                "knowledge_base",
                "scenarios",
                "product_comparison",
                "product_evolution",
                "partnership",
            ]
        );
        assert!(catalog.validate().is_empty());
    }

    #[test]
    fn test_embedded_deck_content() {
        let catalog = Catalog::embedded().unwrap();
        let SlideContent::Cover(cover) = &catalog.slides[0].content else {
            panic!("first slide should be the cover");
        };
        assert!(cover.hero_image.as_deref().unwrap().starts_with("https://"));
        let SlideContent::MeetingFeatures(meeting) = &catalog.slides[3].content else {
            panic!("fourth slide should be meeting features");
        };
        assert_eq!(meeting.features.len(), 6);
        assert!(meeting.features.iter().all(|f| f.image.is_some()));
    }

    #[test]
    fn test_missing_fields_default() {
        let yaml = "slides:\n  - id: 1\n    type: cover\n";
        let catalog = Catalog::parse(yaml).unwrap();
        let SlideContent::Cover(cover) = &catalog.slides[0].content else {
            panic!("expected cover");
        };
        assert!(cover.title.is_empty());
        assert!(cover.hero_image.is_none());
        assert!(catalog.slides[0].bg_gradient.is_empty());
    }

    #[test]
    fn test_unknown_type_is_kept() {
        let yaml = "slides:\n  - id: 1\n    type: hologram\n    title: Nope\n  - id: 2\n    type: cover\n    title: Yes\n";
        let catalog = Catalog::parse(yaml).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(matches!(catalog.slides[0].content, SlideContent::Unknown));
        assert_eq!(catalog.validate().len(), 1);
    }

    #[test]
    fn test_legacy_variants_parse() {
        let yaml = r#"
slides:
  - id: 1
    type: features
    title: Highlights
    features: [Thin, Light]
    highlight: "3mm"
  - id: 2
    type: design
    specs:
      - { value: "29g", label: Weight, desc: Aluminium body }
  - id: 3
    type: comparison
    comparison:
      traditional: { title: Old, items: [Bulky] }
      ticnote: { title: New, items: [Slim] }
  - id: 4
    type: roadmap
    timeline:
      - { title: Launch, phase: "2025 Q2", status: completed }
"#;
        let catalog = Catalog::parse(yaml).unwrap();
        assert!(matches!(catalog.slides[0].content, SlideContent::Features(_)));
        assert!(matches!(catalog.slides[1].content, SlideContent::Design(_)));
        assert!(matches!(catalog.slides[2].content, SlideContent::Comparison(_)));
        let SlideContent::Roadmap(roadmap) = &catalog.slides[3].content else {
            panic!("expected roadmap");
        };
        assert_eq!(roadmap.timeline[0].status, MilestoneStatus::Completed);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(Catalog::parse("slides: []").is_err());
        assert!(Catalog::parse("meta:\n  title: Empty\n").is_err());
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        assert!(Catalog::parse("slides: [ { id: 1, type: cover").is_err());
    }

    #[test]
    fn test_duplicate_ids_warn() {
        let yaml = "slides:\n  - { id: 3, type: cover }\n  - { id: 3, type: stats }\n";
        let catalog = Catalog::parse(yaml).unwrap();
        let warnings = catalog.validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("reuses id 3"));
    }

    #[test]
    fn test_brand_mark_falls_back_to_title() {
        let yaml = "meta:\n  title: Acme Deck\nslides:\n  - { id: 1, type: cover }\n";
        let catalog = Catalog::parse(yaml).unwrap();
        assert_eq!(catalog.title(), "Acme Deck");
        assert_eq!(catalog.brand_mark(), "A");
    }

    #[test]
    fn test_load_sets_base_dir() {
        let dir = std::env::temp_dir().join(format!("showdeck-catalog-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("deck.yaml");
        std::fs::write(&path, "slides:\n  - { id: 1, type: cover, title: Hi }\n").unwrap();
        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.base_dir.as_deref(), Some(dir.as_path()));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_json_round_trip_keeps_type_tag() {
        let catalog = Catalog::embedded().unwrap();
        let json = serde_json::to_value(&catalog.slides[1]).unwrap();
        assert_eq!(json["type"], "stats");
        assert_eq!(json["id"], 2);
    }
}
