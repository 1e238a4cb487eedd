//! The configure-options feature pipeline
//!
//! A feature is a named, ordered transform over the options builder. The
//! pipeline is keyed by a feature's stable identity: re-adding a feature with
//! the same key replaces the earlier instance (an upsert), so repeated
//! configuration calls never accumulate duplicate, conflicting transforms.
//! Features run after builder defaults are set and before the `build()`
//! snapshot, in ascending `order` (stable for ties).

use crate::codegen::options::{CSharpLanguageVersion, CodeGenerationOptionsBuilder};
use crate::diagnostics::Diagnostic;

/// An ordered, named transform applied to the options builder.
pub trait ConfigureCodeGenerationOptions {
    /// Stable identity used for upsert semantics.
    fn key(&self) -> &'static str;

    /// Features apply in ascending order; ties keep insertion order.
    fn order(&self) -> i32 {
        0
    }

    fn configure(&self, builder: &mut CodeGenerationOptionsBuilder);
}

/// Ordered collection of features with upsert-by-key reconfiguration.
#[derive(Default)]
pub struct FeaturePipeline {
    features: Vec<Box<dyn ConfigureCodeGenerationOptions>>,
}

impl FeaturePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a feature, first removing any existing feature with the same key.
    pub fn upsert(&mut self, feature: Box<dyn ConfigureCodeGenerationOptions>) {
        self.features.retain(|existing| existing.key() != feature.key());
        self.features.push(feature);
    }

    /// Apply every feature to the builder, `order` ascending.
    pub fn apply(&self, builder: &mut CodeGenerationOptionsBuilder) {
        let mut ordered: Vec<&dyn ConfigureCodeGenerationOptions> =
            self.features.iter().map(|feature| feature.as_ref()).collect();
        ordered.sort_by_key(|feature| feature.order());
        for feature in ordered {
            feature.configure(builder);
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.features.iter().map(|feature| feature.key()).collect()
    }
}

/// Gates nullability enforcement on the target C# version and the declared
/// template language version.
///
/// Nullability annotations below C# 8.0 are compile errors, so the feature
/// forces `suppress_nullability_enforcement = true` there even over an
/// explicit caller opt-in — buildability wins, and the downgrade is recorded
/// as a warning diagnostic rather than failing the build. Template language
/// versions before 3.0 predate any C#-version-specific output and are
/// suppressed the same way.
pub struct CSharpVersionFeature {
    version: CSharpLanguageVersion,
}

impl CSharpVersionFeature {
    pub fn new(version: CSharpLanguageVersion) -> Self {
        Self { version }
    }

    pub fn version(&self) -> CSharpLanguageVersion {
        self.version
    }
}

impl ConfigureCodeGenerationOptions for CSharpVersionFeature {
    fn key(&self) -> &'static str {
        "csharp-language-version"
    }

    fn configure(&self, builder: &mut CodeGenerationOptionsBuilder) {
        if let Some(configuration) = &builder.configuration {
            if configuration.language_version.major < 3 {
                builder.suppress_nullability_enforcement = true;
                builder.push_diagnostic(Diagnostic::warning(
                    "nullability enforcement suppressed: template language version predates 3.0",
                ));
                return;
            }
        }

        if self.version < CSharpLanguageVersion::CSHARP_8 {
            builder.suppress_nullability_enforcement = true;
            builder.push_diagnostic(Diagnostic::warning(
                "nullability enforcement suppressed: target C# version is below 8.0",
            ));
        } else {
            builder.suppress_nullability_enforcement = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::options::{TemplateConfiguration, TemplateLanguageVersion};

    struct SetIndent(usize, i32);

    impl ConfigureCodeGenerationOptions for SetIndent {
        fn key(&self) -> &'static str {
            "set-indent"
        }
        fn order(&self) -> i32 {
            self.1
        }
        fn configure(&self, builder: &mut CodeGenerationOptionsBuilder) {
            builder.indent_size = self.0;
        }
    }

    struct SetTabs(i32);

    impl ConfigureCodeGenerationOptions for SetTabs {
        fn key(&self) -> &'static str {
            "set-tabs"
        }
        fn order(&self) -> i32 {
            self.0
        }
        fn configure(&self, builder: &mut CodeGenerationOptionsBuilder) {
            builder.indent_with_tabs = true;
        }
    }

    #[test]
    fn test_upsert_replaces_same_key() {
        let mut pipeline = FeaturePipeline::new();
        pipeline.upsert(Box::new(SetIndent(2, 0)));
        pipeline.upsert(Box::new(SetIndent(8, 0)));
        assert_eq!(pipeline.len(), 1);

        let mut builder = CodeGenerationOptionsBuilder::new(false);
        pipeline.apply(&mut builder);
        assert_eq!(builder.indent_size, 8);
    }

    #[test]
    fn test_distinct_keys_accumulate() {
        let mut pipeline = FeaturePipeline::new();
        pipeline.upsert(Box::new(SetIndent(2, 0)));
        pipeline.upsert(Box::new(SetTabs(0)));
        assert_eq!(pipeline.keys(), vec!["set-indent", "set-tabs"]);
    }

    #[test]
    fn test_features_apply_in_order() {
        let mut pipeline = FeaturePipeline::new();
        // Later order value runs last and wins.
        pipeline.upsert(Box::new(SetIndent(2, 5)));
        pipeline.upsert(Box::new(SetTabs(-1)));

        let mut builder = CodeGenerationOptionsBuilder::new(false);
        pipeline.apply(&mut builder);
        assert_eq!(builder.indent_size, 2);
        assert!(builder.indent_with_tabs);
    }

    #[test]
    fn test_version_gate_forces_suppression_below_threshold() {
        let feature = CSharpVersionFeature::new(CSharpLanguageVersion::CSHARP_7_3);
        let mut builder = CodeGenerationOptionsBuilder::new(false);
        builder.suppress_nullability_enforcement = false; // explicit opt-in
        feature.configure(&mut builder);
        assert!(builder.suppress_nullability_enforcement);
        let diagnostics = builder.take_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("below 8.0"));
    }

    #[test]
    fn test_version_gate_honors_threshold_and_above() {
        let feature = CSharpVersionFeature::new(CSharpLanguageVersion::CSHARP_8);
        let mut builder = CodeGenerationOptionsBuilder::new(false);
        builder.suppress_nullability_enforcement = true;
        feature.configure(&mut builder);
        assert!(!builder.suppress_nullability_enforcement);
        assert!(builder.take_diagnostics().is_empty());
    }

    #[test]
    fn test_old_template_language_version_wins_over_csharp_version() {
        let feature = CSharpVersionFeature::new(CSharpLanguageVersion::CSHARP_9);
        let mut builder = CodeGenerationOptionsBuilder::new(false);
        builder.configuration = Some(TemplateConfiguration::new(TemplateLanguageVersion::new(
            2, 1,
        )));
        feature.configure(&mut builder);
        assert!(builder.suppress_nullability_enforcement);
        let diagnostics = builder.take_diagnostics();
        assert!(diagnostics[0].message.contains("predates 3.0"));
    }

    #[test]
    fn test_reconfiguring_version_feature_is_idempotent() {
        let mut pipeline = FeaturePipeline::new();
        pipeline.upsert(Box::new(CSharpVersionFeature::new(
            CSharpLanguageVersion::CSHARP_7_3,
        )));
        pipeline.upsert(Box::new(CSharpVersionFeature::new(
            CSharpLanguageVersion::CSHARP_8,
        )));
        assert_eq!(pipeline.len(), 1);

        let mut builder = CodeGenerationOptionsBuilder::new(false);
        builder.suppress_nullability_enforcement = true;
        pipeline.apply(&mut builder);
        // Only the most recent configuration is active.
        assert!(!builder.suppress_nullability_enforcement);
    }
}
