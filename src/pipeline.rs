//! The template compiler: one compilation session end to end
//!
//! `TemplateCompiler` owns the session-scoped token cache, the finalized
//! descriptor set, the feature pipeline, and the ambient configuration. Each
//! `compile_*` call is a self-contained unit of work — independent files
//! share nothing but the token cache, so large file sets can compile in
//! parallel and callers can cancel between per-file units.

use std::fmt;
use std::io::{self, Read};
use std::sync::Arc;

use crate::binding::{TagBinding, TagHelperDescriptor, TagMatcher};
use crate::codegen::{
    generate, lower, CSharpLanguageVersion, CSharpVersionFeature, CodeGenerationOptions,
    CodeGenerationOptionsBuilder, FeaturePipeline, TemplateConfiguration,
};
use crate::diagnostics::Diagnostic;
use crate::parser::parse;
use crate::project::{FileKind, ProjectItem};
use crate::syntax::{SyntaxTree, TokenCache};

/// Errors that stop a compilation before it produces an artifact.
///
/// Parse and configuration problems never land here; they surface as
/// diagnostics on a successful [`CompilationResult`].
#[derive(Debug)]
pub enum CompileError {
    Io(io::Error),
    /// The project item does not exist in the underlying storage.
    MissingItem(String),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Io(e) => write!(f, "I/O error: {}", e),
            CompileError::MissingItem(path) => write!(f, "project item does not exist: {}", path),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<io::Error> for CompileError {
    fn from(err: io::Error) -> Self {
        CompileError::Io(err)
    }
}

/// Everything one compilation produces: the generated source, the tree it
/// came from, bindings, and accumulated diagnostics.
#[derive(Debug)]
pub struct CompilationResult {
    pub code: String,
    pub syntax_tree: SyntaxTree,
    pub bindings: Vec<TagBinding>,
    pub diagnostics: Vec<Diagnostic>,
    pub options: CodeGenerationOptions,
}

/// One compilation session over a finalized descriptor set.
pub struct TemplateCompiler {
    cache: TokenCache,
    descriptors: Vec<Arc<TagHelperDescriptor>>,
    features: FeaturePipeline,
    configuration: TemplateConfiguration,
    design_time: bool,
    root_namespace: Option<String>,
}

impl TemplateCompiler {
    pub fn new(configuration: TemplateConfiguration) -> Self {
        Self {
            cache: TokenCache::new(),
            descriptors: Vec::new(),
            features: FeaturePipeline::new(),
            configuration,
            design_time: false,
            root_namespace: None,
        }
    }

    pub fn set_design_time(&mut self, design_time: bool) {
        self.design_time = design_time;
    }

    pub fn set_root_namespace(&mut self, namespace: impl Into<String>) {
        self.root_namespace = Some(namespace.into());
    }

    /// Extend the descriptor set. Order matters: binding precedence follows
    /// descriptor input order.
    pub fn add_tag_helpers(&mut self, descriptors: impl IntoIterator<Item = TagHelperDescriptor>) {
        self.descriptors
            .extend(descriptors.into_iter().map(Arc::new));
    }

    /// Set (or replace) the target C# version. Upsert semantics: calling this
    /// twice leaves a single active version feature.
    pub fn set_csharp_language_version(&mut self, version: CSharpLanguageVersion) {
        self.features
            .upsert(Box::new(CSharpVersionFeature::new(version)));
    }

    pub fn features_mut(&mut self) -> &mut FeaturePipeline {
        &mut self.features
    }

    pub fn token_cache(&self) -> &TokenCache {
        &self.cache
    }

    /// Compile a project item: read, parse, bind, lower, generate.
    pub fn compile_item(&self, item: &dyn ProjectItem) -> Result<CompilationResult, CompileError> {
        if !item.exists() {
            return Err(CompileError::MissingItem(
                item.file_path().unwrap_or("<unknown>").to_string(),
            ));
        }
        let mut source = String::new();
        item.read()?.read_to_string(&mut source)?;
        Ok(self.compile_source(&source, item.file_path(), item.file_kind()))
    }

    /// Compile source text directly. Infallible: problems surface as
    /// diagnostics on the result.
    pub fn compile_source(
        &self,
        source: &str,
        file_path: Option<&str>,
        file_kind: Option<FileKind>,
    ) -> CompilationResult {
        let file_kind = file_kind.or_else(|| FileKind::infer(file_path));
        let syntax_tree = parse(source, &self.cache);

        let matcher = TagMatcher::new(self.descriptors.clone());
        let bindings = matcher.bind(&syntax_tree);

        let mut builder = CodeGenerationOptionsBuilder::new(self.design_time);
        builder.configuration = Some(self.configuration.clone());
        builder.file_kind = file_kind;
        builder.root_namespace = self.root_namespace.clone();
        self.features.apply(&mut builder);
        let options = builder.build();

        let mut diagnostics = syntax_tree.diagnostics();
        diagnostics.extend(builder.take_diagnostics());

        let ir = lower(&syntax_tree);
        let code = generate(&ir, &options, file_path, source);

        CompilationResult {
            code,
            syntax_tree,
            bindings,
            diagnostics,
            options,
        }
    }
}

impl Default for TemplateCompiler {
    fn default() -> Self {
        Self::new(TemplateConfiguration::default())
    }
}
