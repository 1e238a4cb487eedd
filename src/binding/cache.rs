//! Descriptor cache artifact
//!
//! Incremental builds persist the descriptor set between runs as a JSON
//! artifact and compare the reloaded sequence element-wise against the fresh
//! one; an unchanged set means downstream caches stay valid.

use crate::binding::comparer::descriptors_equal;
use crate::binding::descriptor::TagHelperDescriptor;

/// Serialize a descriptor sequence to the JSON cache artifact.
pub fn to_cache_artifact(descriptors: &[TagHelperDescriptor]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(descriptors)
}

/// Reload a descriptor sequence from a cache artifact.
pub fn from_cache_artifact(artifact: &str) -> serde_json::Result<Vec<TagHelperDescriptor>> {
    serde_json::from_str(artifact)
}

/// Whether two builds produced the same descriptor set.
pub fn artifact_unchanged(previous: &[TagHelperDescriptor], current: &[TagHelperDescriptor]) -> bool {
    descriptors_equal(previous, current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::descriptor::{RequiredAttribute, TagMatchingRule, TagStructure};

    fn sample() -> Vec<TagHelperDescriptor> {
        vec![TagHelperDescriptor::new(
            "App.NavMenu",
            vec![TagMatchingRule::new("nav-menu")
                .with_parent_tag("nav")
                .with_tag_structure(TagStructure::NormalOrSelfClosing)
                .require_attribute(RequiredAttribute::new("title"))],
        )]
    }

    #[test]
    fn test_artifact_round_trip_preserves_equality() {
        let descriptors = sample();
        let artifact = to_cache_artifact(&descriptors).expect("serialize");
        let reloaded = from_cache_artifact(&artifact).expect("deserialize");
        assert!(artifact_unchanged(&descriptors, &reloaded));
    }

    #[test]
    fn test_artifact_records_owning_helper_name() {
        let artifact = to_cache_artifact(&sample()).expect("serialize");
        assert!(artifact.contains("\"name\": \"App.NavMenu\""));
    }

    #[test]
    fn test_changed_rule_is_detected() {
        let previous = sample();
        let mut current = sample();
        current[0].rules[0].case_sensitive = true;
        assert!(!artifact_unchanged(&previous, &current));
    }
}
