//! Equality and hashing over optional rule references
//!
//! Descriptor sets produced by independently compiled files are deduplicated
//! and diffed through these operations. The contract: reference-equal inputs
//! short-circuit to equal, exactly one absent side is never equal, and
//! anything else falls through to full structural equality. Hashing feeds the
//! tag name only — fast, deliberately collision-prone, resolved by equality.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::binding::descriptor::{TagHelperDescriptor, TagMatchingRule};

/// Compare two optional rules. Same allocation or both absent: equal.
/// Exactly one absent: unequal. Otherwise structural.
pub fn rules_equal(x: Option<&TagMatchingRule>, y: Option<&TagMatchingRule>) -> bool {
    match (x, y) {
        (Some(a), Some(b)) => std::ptr::eq(a, b) || a == b,
        (None, None) => true,
        _ => false,
    }
}

/// Hash a rule: tag name only. Equal rules always hash equal; equal hashes
/// imply nothing.
pub fn rule_hash(rule: &TagMatchingRule) -> u64 {
    let mut hasher = DefaultHasher::new();
    rule.hash(&mut hasher);
    hasher.finish()
}

/// Element-wise equality of two descriptor sequences, used to detect "no
/// change" between incremental builds.
pub fn descriptors_equal(a: &[TagHelperDescriptor], b: &[TagHelperDescriptor]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            x.name == y.name
                && x.rules.len() == y.rules.len()
                && x.rules
                    .iter()
                    .zip(&y.rules)
                    .all(|(rx, ry)| rules_equal(Some(rx), Some(ry)))
        })
}
