//! Snapshot tests for generated C# source
//!
//! Checksums are suppressed throughout so the output is stable text.

use razor_core::codegen::{
    generate, CodeGenerationOptionsBuilder, ConfigureCodeGenerationOptions, IrNode,
};
use razor_core::{FileKind, TemplateCompiler};

struct SuppressChecksum;

impl ConfigureCodeGenerationOptions for SuppressChecksum {
    fn key(&self) -> &'static str {
        "suppress-checksum"
    }

    fn configure(&self, builder: &mut CodeGenerationOptionsBuilder) {
        builder.suppress_checksum = true;
    }
}

#[test]
fn test_legacy_page_output() {
    let mut builder = CodeGenerationOptionsBuilder::new(false);
    builder.suppress_checksum = true;
    let ir = vec![IrNode::Markup("<p>Hi</p>".to_string())];
    let code = generate(&ir, &builder.build(), Some("/Views/Home.cshtml"), "<p>Hi</p>");

    insta::assert_snapshot!(code.trim_end(), @r###"
// <auto-generated/>
#nullable restore
namespace Templates
{
    [global::System.CodeDom.Compiler.GeneratedCode("razor-core", "0.1.0")]
    public partial class Home : global::Templates.TemplatePage
    {
        public override async global::System.Threading.Tasks.Task ExecuteAsync()
        {
            WriteLiteral("<p>Hi</p>");
        }
    }
}
#nullable disable
"###);
}

#[test]
fn test_design_time_component_with_suppressed_body() {
    let mut builder = CodeGenerationOptionsBuilder::new(true);
    builder.suppress_checksum = true;
    builder.suppress_primary_method_body = true;
    builder.file_kind = Some(FileKind::Component);
    let ir = vec![IrNode::Markup("<section/>".to_string())];
    let code = generate(&ir, &builder.build(), Some("/Pages/Index.razor"), "<section/>");

    insta::assert_snapshot!(code.trim_end(), @r###"
// <auto-generated/>
#nullable restore
namespace Templates
{
    public partial class Index : global::Templates.Components.ComponentBase
    {
        protected override void BuildRenderTree(global::Templates.Rendering.RenderTreeBuilder __builder)
        {
        }
    }
}
#nullable disable
"###);
}

#[test]
fn test_full_pipeline_component_output() {
    let mut compiler = TemplateCompiler::default();
    compiler.features_mut().upsert(Box::new(SuppressChecksum));
    let result = compiler.compile_source("<h1>Hello @name</h1>", Some("/Pages/Hello.razor"), None);

    insta::assert_snapshot!(result.code.trim_end(), @r###"
// <auto-generated/>
#nullable restore
namespace Templates
{
    [global::System.CodeDom.Compiler.GeneratedCode("razor-core", "0.1.0")]
    public partial class Hello : global::Templates.Components.ComponentBase
    {
        protected override void BuildRenderTree(global::Templates.Rendering.RenderTreeBuilder __builder)
        {
            __builder.AddMarkupContent(0, "<h1>Hello ");
            __builder.AddContent(1, name);
            __builder.AddMarkupContent(2, "</h1>");
        }
    }
}
#nullable disable
"###);
}
