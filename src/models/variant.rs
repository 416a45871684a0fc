use super::request::{DesignStyle, ImageData};
use std::sync::Arc;

/// One candidate redesign returned by the generation backend.
///
/// Immutable once produced; shared behind an `Arc` inside its [`ResultSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecorationVariant {
    /// Stable identifier, unique within its result set (e.g. `option-2`)
    pub id: String,
    /// Echo of the requested design style
    pub design_style: DesignStyle,
    pub image: ImageData,
    pub description: String,
    /// Elements the redesign adds, in display order. Never empty.
    pub added_elements: Vec<String>,
    pub modified_elements: Vec<String>,
    /// Backend confidence in `[0, 1]`
    pub confidence_score: f64,
}

/// Ordered, non-empty list of variants for one successful generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    variants: Vec<Arc<DecorationVariant>>,
    analysis: String,
}

impl ResultSet {
    /// Build a result set, rejecting an empty variant list.
    ///
    /// Returns `None` when `variants` is empty; the generation layer turns
    /// that into [`crate::services::GenerationError::EmptyResult`].
    pub fn new(variants: Vec<DecorationVariant>, analysis: impl Into<String>) -> Option<Self> {
        if variants.is_empty() {
            return None;
        }

        Some(Self {
            variants: variants.into_iter().map(Arc::new).collect(),
            analysis: analysis.into(),
        })
    }

    pub fn variants(&self) -> &[Arc<DecorationVariant>] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Summary of what the backend saw in the original photo
    pub fn analysis(&self) -> &str {
        &self.analysis
    }

    pub fn find(&self, variant_id: &str) -> Option<&Arc<DecorationVariant>> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    pub fn contains(&self, variant_id: &str) -> bool {
        self.find(variant_id).is_some()
    }

    /// Variant with the highest confidence; ties resolve to the later ordinal
    pub fn best(&self) -> &Arc<DecorationVariant> {
        let mut best = &self.variants[0];
        for variant in &self.variants[1..] {
            if variant.confidence_score >= best.confidence_score {
                best = variant;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(id: &str, confidence: f64) -> DecorationVariant {
        DecorationVariant {
            id: id.to_string(),
            design_style: DesignStyle::Modern,
            image: ImageData::jpeg(vec![0u8; 4]),
            description: "test".to_string(),
            added_elements: vec!["Lamp".to_string()],
            modified_elements: Vec::new(),
            confidence_score: confidence,
        }
    }

    #[test]
    fn test_empty_result_set_rejected() {
        assert!(ResultSet::new(Vec::new(), "nothing").is_none());
    }

    #[test]
    fn test_find_and_contains() {
        let set = ResultSet::new(vec![variant("option-1", 0.9), variant("option-2", 0.95)], "")
            .unwrap();

        assert_eq!(set.len(), 2);
        assert!(set.contains("option-2"));
        assert!(!set.contains("option-9"));
        assert_eq!(set.find("option-1").unwrap().confidence_score, 0.9);
    }

    #[test]
    fn test_best_prefers_highest_confidence() {
        let set = ResultSet::new(
            vec![
                variant("option-1", 0.9),
                variant("option-2", 0.97),
                variant("option-3", 0.95),
            ],
            "",
        )
        .unwrap();

        assert_eq!(set.best().id, "option-2");
    }
}
