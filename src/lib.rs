//! # razor-core
//!
//! Template compilation core for hybrid markup+code templates.
//!
//! The crate turns template source text into an immutable syntax tree, binds
//! markup elements to tag helper descriptors through structural matching
//! rules, and lowers the tree into C# source text under version-gated
//! configuration features.
//!
//! The pieces compose bottom-up:
//! 1. [`lexer`] — logos-based tokenization of the raw source
//! 2. [`syntax`] — interned tokens ([`syntax::TokenCache`]) and the immutable
//!    node tree
//! 3. [`parser`] — recursive-descent markup/code parser with error recovery
//! 4. [`binding`] — tag matching rule descriptors, comparer, and the matching
//!    engine
//! 5. [`codegen`] — generation options, the configure-options feature
//!    pipeline, lowering, and the C# emitter
//! 6. [`project`] — project item abstraction over template files
//! 7. [`pipeline`] — the `TemplateCompiler` tying everything together

pub mod binding;
pub mod codegen;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod project;
pub mod syntax;

pub use binding::{RequiredAttribute, TagHelperDescriptor, TagMatchingRule, TagStructure};
pub use codegen::{
    CSharpLanguageVersion, CodeGenerationOptions, CodeGenerationOptionsBuilder,
    TemplateConfiguration,
};
pub use diagnostics::{Diagnostic, Severity, Span};
pub use pipeline::{CompilationResult, CompileError, TemplateCompiler};
pub use project::{FileKind, ProjectItem};
pub use syntax::{SyntaxNode, SyntaxToken, SyntaxTree, TokenCache};
