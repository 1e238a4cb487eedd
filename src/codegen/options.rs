//! Code generation options and their builder
//!
//! The builder is a plain struct with public fields plus a `build()` snapshot
//! step; defaults that differ between run-time and design-time generation are
//! held as `Option` until the snapshot so an explicit caller choice survives
//! a later [`CodeGenerationOptionsBuilder::set_design_time`].

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::project::FileKind;

/// Target C# language version as an ordinal, comparable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CSharpLanguageVersion(pub u16);

impl CSharpLanguageVersion {
    pub const CSHARP_7_3: Self = Self(730);
    pub const CSHARP_8: Self = Self(800);
    pub const CSHARP_9: Self = Self(900);
    pub const LATEST: Self = Self::CSHARP_9;
}

/// Template language version declared by the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TemplateLanguageVersion {
    pub major: u16,
    pub minor: u16,
}

impl TemplateLanguageVersion {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

/// Ambient configuration features may consult when reshaping options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfiguration {
    pub language_version: TemplateLanguageVersion,
}

impl TemplateConfiguration {
    pub fn new(language_version: TemplateLanguageVersion) -> Self {
        Self { language_version }
    }
}

impl Default for TemplateConfiguration {
    fn default() -> Self {
        Self::new(TemplateLanguageVersion::new(3, 0))
    }
}

/// Immutable snapshot of everything that controls lowering and emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeGenerationOptions {
    pub design_time: bool,
    pub file_kind: Option<FileKind>,
    pub indent_size: usize,
    pub indent_with_tabs: bool,
    pub root_namespace: Option<String>,
    pub suppress_checksum: bool,
    pub suppress_metadata_attributes: bool,
    pub suppress_primary_method_body: bool,
    pub suppress_nullability_enforcement: bool,
}

/// Mutable builder. Field defaults come from [`apply_defaults`]; the feature
/// pipeline runs against the builder before `build()`.
#[derive(Debug, Default)]
pub struct CodeGenerationOptionsBuilder {
    pub design_time: bool,
    pub file_kind: Option<FileKind>,
    pub indent_size: usize,
    pub indent_with_tabs: bool,
    pub root_namespace: Option<String>,
    pub suppress_checksum: bool,
    /// `None` means "use the mode default": suppressed at design time,
    /// emitted at run time.
    pub suppress_metadata_attributes: Option<bool>,
    pub suppress_primary_method_body: bool,
    pub suppress_nullability_enforcement: bool,
    pub configuration: Option<TemplateConfiguration>,
    diagnostics: Vec<Diagnostic>,
}

/// Pure function from generation mode to the default builder state.
pub fn apply_defaults(design_time: bool) -> CodeGenerationOptionsBuilder {
    CodeGenerationOptionsBuilder {
        design_time,
        indent_size: 4,
        ..CodeGenerationOptionsBuilder::default()
    }
}

impl CodeGenerationOptionsBuilder {
    pub fn new(design_time: bool) -> Self {
        apply_defaults(design_time)
    }

    /// Switch generation mode. Mode-dependent defaults follow automatically
    /// because they are resolved at `build()`; explicit choices stick.
    pub fn set_design_time(&mut self, design_time: bool) {
        self.design_time = design_time;
    }

    /// Record a non-fatal configuration diagnostic (e.g. a version-gated
    /// downgrade) for the caller to observe.
    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Freeze the current state into an immutable snapshot.
    pub fn build(&self) -> CodeGenerationOptions {
        CodeGenerationOptions {
            design_time: self.design_time,
            file_kind: self.file_kind,
            indent_size: self.indent_size,
            indent_with_tabs: self.indent_with_tabs,
            root_namespace: self.root_namespace.clone(),
            suppress_checksum: self.suppress_checksum,
            suppress_metadata_attributes: self
                .suppress_metadata_attributes
                .unwrap_or(self.design_time),
            suppress_primary_method_body: self.suppress_primary_method_body,
            suppress_nullability_enforcement: self.suppress_nullability_enforcement,
        }
    }
}
