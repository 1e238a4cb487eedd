//! Property-based tests for tag matching rule equality and hashing
//!
//! The comparer underpins descriptor deduplication and incremental-build
//! change detection, so its algebra has to hold for arbitrary descriptors:
//! reflexivity, symmetry, transitivity, and hash consistency with equality.

use proptest::prelude::*;

use razor_core::binding::{
    rule_hash, rules_equal, NameComparison, RequiredAttribute, TagMatchingRule, TagStructure,
    ValueComparison,
};

fn arb_tag_structure() -> impl Strategy<Value = TagStructure> {
    prop_oneof![
        Just(TagStructure::Unspecified),
        Just(TagStructure::NormalOrSelfClosing),
        Just(TagStructure::WithoutEndTag),
    ]
}

fn arb_name_comparison() -> impl Strategy<Value = NameComparison> {
    prop_oneof![
        Just(NameComparison::FullMatch),
        Just(NameComparison::PrefixMatch),
    ]
}

fn arb_value_comparison() -> impl Strategy<Value = ValueComparison> {
    prop_oneof![
        Just(ValueComparison::None),
        Just(ValueComparison::FullMatch),
        Just(ValueComparison::PrefixMatch),
        Just(ValueComparison::SuffixMatch),
    ]
}

prop_compose! {
    fn arb_required_attribute()(
        name in "[a-z][a-z0-9-]{0,8}",
        name_comparison in arb_name_comparison(),
        value in proptest::option::of("[a-z0-9/.-]{0,8}"),
        value_comparison in arb_value_comparison(),
    ) -> RequiredAttribute {
        RequiredAttribute {
            name,
            name_comparison,
            value,
            value_comparison,
        }
    }
}

prop_compose! {
    fn arb_rule()(
        tag_name in "[a-z][a-z0-9-]{0,10}",
        parent_tag in proptest::option::of("[a-z][a-z0-9-]{0,6}"),
        case_sensitive in any::<bool>(),
        tag_structure in arb_tag_structure(),
        attributes in proptest::collection::vec(arb_required_attribute(), 0..4),
    ) -> TagMatchingRule {
        TagMatchingRule {
            tag_name,
            parent_tag,
            case_sensitive,
            tag_structure,
            attributes,
        }
    }
}

proptest! {
    #[test]
    fn prop_equality_is_reflexive(rule in arb_rule()) {
        prop_assert!(rules_equal(Some(&rule), Some(&rule)));
        let clone = rule.clone();
        prop_assert!(rules_equal(Some(&rule), Some(&clone)));
    }

    #[test]
    fn prop_equality_is_symmetric(a in arb_rule(), b in arb_rule()) {
        prop_assert_eq!(
            rules_equal(Some(&a), Some(&b)),
            rules_equal(Some(&b), Some(&a))
        );
    }

    #[test]
    fn prop_equality_is_transitive(a in arb_rule(), b in arb_rule(), c in arb_rule()) {
        if rules_equal(Some(&a), Some(&b)) && rules_equal(Some(&b), Some(&c)) {
            prop_assert!(rules_equal(Some(&a), Some(&c)));
        }
    }

    #[test]
    fn prop_equal_rules_hash_equal(rule in arb_rule()) {
        let clone = rule.clone();
        prop_assert_eq!(rule_hash(&rule), rule_hash(&clone));
    }

    #[test]
    fn prop_same_tag_name_hashes_equal_regardless_of_rest(a in arb_rule(), b in arb_rule()) {
        // The hash feeds only the tag name; everything else is ignored.
        let mut b = b;
        b.tag_name = a.tag_name.clone();
        prop_assert_eq!(rule_hash(&a), rule_hash(&b));
    }

    #[test]
    fn prop_one_absent_side_is_never_equal(rule in arb_rule()) {
        prop_assert!(!rules_equal(Some(&rule), None));
        prop_assert!(!rules_equal(None, Some(&rule)));
    }

    #[test]
    fn prop_attribute_order_matters(rule in arb_rule(), a in arb_required_attribute(), b in arb_required_attribute()) {
        prop_assume!(a != b);
        let mut forward = rule.clone();
        forward.attributes = vec![a.clone(), b.clone()];
        let mut reversed = rule;
        reversed.attributes = vec![b, a];
        prop_assert!(!rules_equal(Some(&forward), Some(&reversed)));
    }
}
