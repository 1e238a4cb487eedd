//! Code generation: options, the configure-options feature pipeline,
//! lowering, and the C# emitter
//!
//! Options are built from run-time/design-time defaults, reshaped by an
//! ordered pipeline of named features (which may consult the ambient template
//! configuration and target C# version), then frozen into an immutable
//! snapshot that drives the generator.

pub mod features;
pub mod generator;
pub mod lowering;
pub mod options;

pub use features::{ConfigureCodeGenerationOptions, CSharpVersionFeature, FeaturePipeline};
pub use generator::generate;
pub use lowering::{lower, IrNode};
pub use options::{
    CSharpLanguageVersion, CodeGenerationOptions, CodeGenerationOptionsBuilder,
    TemplateConfiguration, TemplateLanguageVersion,
};
