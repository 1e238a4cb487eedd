//! C# source emission
//!
//! Walks the lowered IR and the frozen options to produce the generated
//! class. Component files get a `BuildRenderTree` body, legacy files an
//! `ExecuteAsync` body; both shapes honor the suppression flags and the
//! indent configuration.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

use crate::codegen::lowering::IrNode;
use crate::codegen::options::CodeGenerationOptions;
use crate::project::FileKind;

/// Emit C# source for one lowered template.
///
/// `path` feeds the checksum pragma and the generated class name; `source`
/// is the original template text the checksum is computed over.
pub fn generate(
    ir: &[IrNode],
    options: &CodeGenerationOptions,
    path: Option<&str>,
    source: &str,
) -> String {
    let mut writer = CodeWriter::new(options);
    let class_name = class_name_from_path(path);
    let namespace = options.root_namespace.as_deref().unwrap_or("Templates");

    writer.line("// <auto-generated/>");
    if !options.suppress_checksum {
        writer.line(&format!(
            "#pragma checksum \"{}\" \"{{ff1816ec-aa5e-4d10-87f7-6f4963833460}}\" \"{}\"",
            path.unwrap_or(""),
            source_checksum(source)
        ));
    }
    if !options.suppress_nullability_enforcement {
        writer.line("#nullable restore");
    }
    writer.line(&format!("namespace {namespace}"));
    writer.line("{");
    writer.indent();

    if !options.suppress_metadata_attributes {
        writer.line(&format!(
            "[global::System.CodeDom.Compiler.GeneratedCode(\"razor-core\", \"{}\")]",
            env!("CARGO_PKG_VERSION")
        ));
    }

    match options.file_kind {
        Some(FileKind::Component) => emit_component(&mut writer, &class_name, ir, options),
        _ => emit_legacy(&mut writer, &class_name, ir, options),
    }

    writer.dedent();
    writer.line("}");
    if !options.suppress_nullability_enforcement {
        writer.line("#nullable disable");
    }
    writer.finish()
}

fn emit_component(
    writer: &mut CodeWriter,
    class_name: &str,
    ir: &[IrNode],
    options: &CodeGenerationOptions,
) {
    writer.line(&format!(
        "public partial class {class_name} : global::Templates.Components.ComponentBase"
    ));
    writer.line("{");
    writer.indent();
    writer.line(
        "protected override void BuildRenderTree(global::Templates.Rendering.RenderTreeBuilder __builder)",
    );
    writer.line("{");
    writer.indent();
    if !options.suppress_primary_method_body {
        let mut sequence = 0usize;
        for node in ir {
            match node {
                IrNode::Markup(markup) => {
                    writer.line(&format!(
                        "__builder.AddMarkupContent({sequence}, \"{}\");",
                        escape(markup)
                    ));
                    sequence += 1;
                }
                IrNode::Expression(expression) => {
                    writer.line(&format!("__builder.AddContent({sequence}, {expression});"));
                    sequence += 1;
                }
                IrNode::Statement(statement) => {
                    writer.line(statement);
                }
            }
        }
    }
    writer.dedent();
    writer.line("}");
    writer.dedent();
    writer.line("}");
}

fn emit_legacy(
    writer: &mut CodeWriter,
    class_name: &str,
    ir: &[IrNode],
    options: &CodeGenerationOptions,
) {
    writer.line(&format!(
        "public partial class {class_name} : global::Templates.TemplatePage"
    ));
    writer.line("{");
    writer.indent();
    writer.line("public override async global::System.Threading.Tasks.Task ExecuteAsync()");
    writer.line("{");
    writer.indent();
    if !options.suppress_primary_method_body {
        for node in ir {
            match node {
                IrNode::Markup(markup) => {
                    writer.line(&format!("WriteLiteral(\"{}\");", escape(markup)));
                }
                IrNode::Expression(expression) => {
                    writer.line(&format!("Write({expression});"));
                }
                IrNode::Statement(statement) => {
                    writer.line(statement);
                }
            }
        }
    }
    writer.dedent();
    writer.line("}");
    writer.dedent();
    writer.line("}");
}

/// Indentation-aware line writer over the options' indent settings.
struct CodeWriter {
    buffer: String,
    depth: usize,
    indent_size: usize,
    indent_with_tabs: bool,
}

impl CodeWriter {
    fn new(options: &CodeGenerationOptions) -> Self {
        Self {
            buffer: String::new(),
            depth: 0,
            indent_size: options.indent_size,
            indent_with_tabs: options.indent_with_tabs,
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn line(&mut self, text: &str) {
        if !text.is_empty() {
            if self.indent_with_tabs {
                for _ in 0..self.depth {
                    self.buffer.push('\t');
                }
            } else {
                for _ in 0..self.depth * self.indent_size {
                    self.buffer.push(' ');
                }
            }
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
    }

    fn finish(self) -> String {
        self.buffer
    }
}

/// Class name from the template file stem; anything unusable becomes
/// `Template`.
fn class_name_from_path(path: Option<&str>) -> String {
    let stem = path
        .and_then(|p| Path::new(p).file_stem())
        .and_then(|stem| stem.to_str())
        .unwrap_or("");
    let mut name = String::new();
    for ch in stem.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            name.push(ch);
        } else {
            name.push('_');
        }
    }
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        return "Template".to_string();
    }
    name
}

/// Deterministic hex digest of the template source for the checksum pragma.
fn source_checksum(source: &str) -> String {
    let mut hasher = DefaultHasher::new();
    source.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}
