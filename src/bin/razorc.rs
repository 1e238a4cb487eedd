//! Command-line interface for razor-core
//!
//! Usage:
//!   razorc compile `<path>` [--design-time] [--namespace `<ns>`] [--indent `<n>`] [--tabs] [--csharp `<ver>`]
//!   razorc parse `<path>`

use clap::{Arg, ArgAction, Command};
use std::path::Path;
use std::process::ExitCode;

use razor_core::codegen::{CodeGenerationOptionsBuilder, ConfigureCodeGenerationOptions};
use razor_core::project::FileSystemProjectItem;
use razor_core::{CSharpLanguageVersion, TemplateCompiler, TemplateConfiguration};

/// Applies the CLI's layout flags through the regular feature pipeline.
struct LayoutFeature {
    indent_size: Option<usize>,
    indent_with_tabs: bool,
}

impl ConfigureCodeGenerationOptions for LayoutFeature {
    fn key(&self) -> &'static str {
        "cli-layout"
    }

    fn configure(&self, builder: &mut CodeGenerationOptionsBuilder) {
        if let Some(indent_size) = self.indent_size {
            builder.indent_size = indent_size;
        }
        if self.indent_with_tabs {
            builder.indent_with_tabs = true;
        }
    }
}

fn main() -> ExitCode {
    let matches = Command::new("razorc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compiles hybrid markup+code templates to C# source")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("compile")
                .about("Compile a template file and print the generated C#")
                .arg(
                    Arg::new("path")
                        .help("Path to the template file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("design-time")
                        .long("design-time")
                        .help("Generate design-time output")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("namespace")
                        .long("namespace")
                        .short('n')
                        .help("Root namespace for the generated class"),
                )
                .arg(
                    Arg::new("indent")
                        .long("indent")
                        .help("Indent size in spaces")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("tabs")
                        .long("tabs")
                        .help("Indent with tabs")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("csharp")
                        .long("csharp")
                        .help("Target C# version ordinal (e.g. 730, 800)")
                        .value_parser(clap::value_parser!(u16)),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a template file and dump the syntax tree")
                .arg(
                    Arg::new("path")
                        .help("Path to the template file")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("compile", compile_matches)) => {
            let path = compile_matches.get_one::<String>("path").expect("required");
            handle_compile_command(path, compile_matches)
        }
        Some(("parse", parse_matches)) => {
            let path = parse_matches.get_one::<String>("path").expect("required");
            handle_parse_command(path)
        }
        _ => unreachable!(),
    }
}

fn handle_compile_command(path: &str, matches: &clap::ArgMatches) -> ExitCode {
    let mut compiler = TemplateCompiler::new(TemplateConfiguration::default());
    compiler.set_design_time(matches.get_flag("design-time"));
    if let Some(namespace) = matches.get_one::<String>("namespace") {
        compiler.set_root_namespace(namespace.clone());
    }
    if let Some(version) = matches.get_one::<u16>("csharp") {
        compiler.set_csharp_language_version(CSharpLanguageVersion(*version));
    }
    compiler.features_mut().upsert(Box::new(LayoutFeature {
        indent_size: matches.get_one::<usize>("indent").copied(),
        indent_with_tabs: matches.get_flag("tabs"),
    }));

    match compiler.compile_item(&item_for_path(path)) {
        Ok(result) => {
            for diagnostic in &result.diagnostics {
                eprintln!("{}", diagnostic);
            }
            print!("{}", result.code);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn handle_parse_command(path: &str) -> ExitCode {
    let compiler = TemplateCompiler::default();
    match compiler.compile_item(&item_for_path(path)) {
        Ok(result) => {
            for diagnostic in &result.diagnostics {
                eprintln!("{}", diagnostic);
            }
            println!("{:#?}", result.syntax_tree.root());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn item_for_path(path: &str) -> FileSystemProjectItem {
    let file_name = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path);
    let file_path = format!("/{file_name}");
    FileSystemProjectItem::new("/", Some(file_path.as_str()), Some(path), None, path)
}
