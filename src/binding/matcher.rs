//! The tag matching engine
//!
//! Walks a parsed tree's elements and evaluates every rule of every
//! descriptor against each one. A tag may bind several helpers at once; all
//! satisfying rules are kept, in descriptor input order, so callers control
//! precedence by how they order the set. An element matching nothing is a
//! normal outcome, not an error.

use std::sync::Arc;

use crate::binding::descriptor::TagHelperDescriptor;
use crate::syntax::SyntaxTree;

/// One element-to-helper binding produced by matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagBinding {
    /// Tag name as written in source.
    pub tag_name: String,
    /// Owning component/helper type name from the descriptor.
    pub helper_name: String,
    /// Index of the satisfying rule within the descriptor.
    pub rule_index: usize,
}

/// A pure function of the tree and the descriptor set; no interior state, so
/// one matcher can serve concurrent compilations.
pub struct TagMatcher {
    descriptors: Vec<Arc<TagHelperDescriptor>>,
}

impl TagMatcher {
    pub fn new(descriptors: Vec<Arc<TagHelperDescriptor>>) -> Self {
        Self { descriptors }
    }

    pub fn descriptors(&self) -> &[Arc<TagHelperDescriptor>] {
        &self.descriptors
    }

    /// Bind every element of the tree against the descriptor set, in document
    /// order, keeping descriptor input order within each element.
    pub fn bind(&self, tree: &SyntaxTree) -> Vec<TagBinding> {
        let mut bindings = Vec::new();
        tree.visit_elements(&mut |element| {
            for descriptor in &self.descriptors {
                for (rule_index, rule) in descriptor.rules.iter().enumerate() {
                    if rule.matches(element) {
                        bindings.push(TagBinding {
                            tag_name: element.tag_name.clone(),
                            helper_name: descriptor.name.clone(),
                            rule_index,
                        });
                    }
                }
            }
        });
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::descriptor::{RequiredAttribute, TagMatchingRule, TagStructure};
    use crate::parser::parse;
    use crate::syntax::TokenCache;

    fn matcher(descriptors: Vec<TagHelperDescriptor>) -> TagMatcher {
        TagMatcher::new(descriptors.into_iter().map(Arc::new).collect())
    }

    fn bind(source: &str, descriptors: Vec<TagHelperDescriptor>) -> Vec<TagBinding> {
        let cache = TokenCache::new();
        let tree = parse(source, &cache);
        matcher(descriptors).bind(&tree)
    }

    #[test]
    fn test_case_insensitive_binding() {
        let bindings = bind(
            "<Nav-Menu></Nav-Menu>",
            vec![TagHelperDescriptor::new(
                "App.NavMenu",
                vec![TagMatchingRule::new("nav-menu")],
            )],
        );
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].tag_name, "Nav-Menu");
        assert_eq!(bindings[0].helper_name, "App.NavMenu");
    }

    #[test]
    fn test_no_match_is_silent() {
        let bindings = bind(
            "<other></other>",
            vec![TagHelperDescriptor::new(
                "App.NavMenu",
                vec![TagMatchingRule::new("nav-menu")],
            )],
        );
        assert!(bindings.is_empty());
    }

    #[test]
    fn test_multiple_helpers_bind_same_element() {
        let bindings = bind(
            "<item></item>",
            vec![
                TagHelperDescriptor::new("App.First", vec![TagMatchingRule::new("item")]),
                TagHelperDescriptor::new("App.Second", vec![TagMatchingRule::new("item")]),
            ],
        );
        let helpers: Vec<_> = bindings.iter().map(|b| b.helper_name.as_str()).collect();
        // Descriptor input order, not re-sorted.
        assert_eq!(helpers, vec!["App.First", "App.Second"]);
    }

    #[test]
    fn test_parent_tag_rule_binds_only_nested() {
        let descriptors = vec![TagHelperDescriptor::new(
            "App.MenuItem",
            vec![TagMatchingRule::new("item").with_parent_tag("menu")],
        )];
        assert!(bind("<item></item>", descriptors.clone()).is_empty());
        let nested = bind("<menu><item></item></menu>", descriptors);
        assert_eq!(nested.len(), 1);
    }

    #[test]
    fn test_required_attribute_gates_binding() {
        let descriptors = vec![TagHelperDescriptor::new(
            "App.Link",
            vec![TagMatchingRule::new("a").require_attribute(RequiredAttribute::new("asp-route"))],
        )];
        assert!(bind("<a></a>", descriptors.clone()).is_empty());
        let bound = bind(r#"<a asp-route="home"></a>"#, descriptors);
        assert_eq!(bound.len(), 1);
    }

    #[test]
    fn test_structure_rule_rejects_paired_tag() {
        let descriptors = vec![TagHelperDescriptor::new(
            "App.Icon",
            vec![TagMatchingRule::new("icon").with_tag_structure(TagStructure::WithoutEndTag)],
        )];
        assert!(bind("<icon></icon>", descriptors.clone()).is_empty());
        let self_closing = bind("<icon/>", descriptors);
        assert_eq!(self_closing.len(), 1);
    }

    #[test]
    fn test_rule_index_identifies_satisfying_rule() {
        let descriptors = vec![TagHelperDescriptor::new(
            "App.Toggle",
            vec![
                TagMatchingRule::new("toggle").with_parent_tag("form"),
                TagMatchingRule::new("toggle"),
            ],
        )];
        let bindings = bind("<toggle></toggle>", descriptors);
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].rule_index, 1);
    }
}
