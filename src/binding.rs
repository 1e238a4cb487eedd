//! Tag helper descriptors and the tag matching engine
//!
//! Descriptors are structural value objects describing which markup elements
//! a component/helper binds to. Their equality and (deliberately weak)
//! hashing support deduplication across independently compiled files and
//! change detection between incremental builds; the matcher evaluates every
//! rule against every element and keeps all satisfying rules in descriptor
//! input order.

pub mod cache;
pub mod comparer;
pub mod descriptor;
pub mod matcher;

pub use cache::{artifact_unchanged, from_cache_artifact, to_cache_artifact};
pub use comparer::{descriptors_equal, rule_hash, rules_equal};
pub use descriptor::{
    NameComparison, RequiredAttribute, TagHelperDescriptor, TagMatchingRule, TagStructure,
    ValueComparison,
};
pub use matcher::{TagBinding, TagMatcher};
