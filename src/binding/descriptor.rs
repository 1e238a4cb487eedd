//! Tag matching rule descriptors
//!
//! Value types only. A rule's equality is fully structural — tag name and
//! parent tag by exact string comparison, both flags, and the attribute
//! sequence in order — while its hash feeds on the tag name alone. The weak
//! hash is intentional: descriptor sets bucket well by tag name, and
//! collisions fall through to full equality.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::syntax::{AttributeFacts, ElementFacts, ObservedStructure};

/// The tag shape a rule requires, as declared by the component author.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagStructure {
    #[default]
    Unspecified,
    NormalOrSelfClosing,
    WithoutEndTag,
}

impl TagStructure {
    /// Whether a tag written as `observed` satisfies this requirement.
    pub fn accepts(self, observed: ObservedStructure) -> bool {
        match self {
            TagStructure::Unspecified => true,
            TagStructure::NormalOrSelfClosing => matches!(
                observed,
                ObservedStructure::Paired | ObservedStructure::SelfClosing
            ),
            TagStructure::WithoutEndTag => matches!(
                observed,
                ObservedStructure::SelfClosing | ObservedStructure::Void
            ),
        }
    }
}

/// How a required attribute's name is compared against written attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameComparison {
    #[default]
    FullMatch,
    PrefixMatch,
}

/// Constraint on a required attribute's written value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueComparison {
    /// Presence is enough; the value is not inspected.
    #[default]
    None,
    FullMatch,
    PrefixMatch,
    SuffixMatch,
}

/// An attribute a tag must carry for a rule to match. Participates in rule
/// equality, in sequence order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequiredAttribute {
    pub name: String,
    pub name_comparison: NameComparison,
    pub value: Option<String>,
    pub value_comparison: ValueComparison,
}

impl RequiredAttribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            name_comparison: NameComparison::default(),
            value: None,
            value_comparison: ValueComparison::default(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>, comparison: ValueComparison) -> Self {
        self.value = Some(value.into());
        self.value_comparison = comparison;
        self
    }

    pub fn with_name_comparison(mut self, comparison: NameComparison) -> Self {
        self.name_comparison = comparison;
        self
    }

    /// True when some written attribute satisfies this requirement.
    /// Attribute names compare ASCII case-insensitively, as in HTML.
    pub fn is_satisfied_by(&self, attributes: &[AttributeFacts]) -> bool {
        attributes.iter().any(|attr| {
            let name_ok = match self.name_comparison {
                NameComparison::FullMatch => attr.name.eq_ignore_ascii_case(&self.name),
                NameComparison::PrefixMatch => attr
                    .name
                    .get(..self.name.len())
                    .is_some_and(|prefix| prefix.eq_ignore_ascii_case(&self.name)),
            };
            if !name_ok {
                return false;
            }
            let expected = match (&self.value, self.value_comparison) {
                (_, ValueComparison::None) | (None, _) => return true,
                (Some(expected), _) => expected,
            };
            match (&attr.value, self.value_comparison) {
                (Some(value), ValueComparison::FullMatch) => value == expected,
                (Some(value), ValueComparison::PrefixMatch) => value.starts_with(expected.as_str()),
                (Some(value), ValueComparison::SuffixMatch) => value.ends_with(expected.as_str()),
                _ => false,
            }
        })
    }
}

/// One structural predicate binding markup elements to a tag helper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagMatchingRule {
    pub tag_name: String,
    pub parent_tag: Option<String>,
    pub case_sensitive: bool,
    pub tag_structure: TagStructure,
    pub attributes: Vec<RequiredAttribute>,
}

impl TagMatchingRule {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            parent_tag: None,
            case_sensitive: false,
            tag_structure: TagStructure::default(),
            attributes: Vec::new(),
        }
    }

    pub fn with_parent_tag(mut self, parent: impl Into<String>) -> Self {
        self.parent_tag = Some(parent.into());
        self
    }

    pub fn case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = value;
        self
    }

    pub fn with_tag_structure(mut self, structure: TagStructure) -> Self {
        self.tag_structure = structure;
        self
    }

    pub fn require_attribute(mut self, attribute: RequiredAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Evaluate this rule against one element's reconstructed facts.
    pub fn matches(&self, element: &ElementFacts) -> bool {
        if !self.names_equal(&self.tag_name, &element.tag_name) {
            return false;
        }
        if let Some(parent) = &self.parent_tag {
            match &element.parent_tag {
                Some(actual) if self.names_equal(parent, actual) => {}
                _ => return false,
            }
        }
        if !self.tag_structure.accepts(element.structure) {
            return false;
        }
        self.attributes
            .iter()
            .all(|required| required.is_satisfied_by(&element.attributes))
    }

    fn names_equal(&self, expected: &str, actual: &str) -> bool {
        if self.case_sensitive {
            expected == actual
        } else {
            expected.eq_ignore_ascii_case(actual)
        }
    }
}

// Hash feeds only the tag name; callers must not infer uniqueness from equal
// hashes. Matches the equality contract: equal rules share a tag name, so
// equal rules hash equal.
impl Hash for TagMatchingRule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag_name.hash(state);
    }
}

/// A tag helper: the owning component/helper type name plus the rules under
/// which it binds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagHelperDescriptor {
    pub name: String,
    pub rules: Vec<TagMatchingRule>,
}

impl TagHelperDescriptor {
    pub fn new(name: impl Into<String>, rules: Vec<TagMatchingRule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }
}
