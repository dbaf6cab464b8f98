/**
 * ember-codemod
 *
 * Command line entry point for the native-class migration.
 */
use clap::{Arg, ArgAction, Command};
use std::process;

use ember_codemod::{QuoteStyle, TransformOptions};
use ember_codemod_cli::config::CliOptions;
use ember_codemod_cli::perform_transform::perform_transform;

fn main() {
    let matches = Command::new("ember-codemod")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rewrites EmberObject.extend declarations to native classes")
        .arg(
            Arg::new("paths")
                .value_name("PATH|GLOB")
                .num_args(1..)
                .required(true)
                .help("Files or glob patterns to transform"),
        )
        .arg(
            Arg::new("runtime-data")
                .long("runtime-data")
                .value_name("PATH")
                .help("JSON file mapping file paths to runtime metadata"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Report changes without writing files"),
        )
        .arg(
            Arg::new("no-class-fields")
                .long("no-class-fields")
                .action(ArgAction::SetTrue)
                .help("Disallow class fields in the output"),
        )
        .arg(
            Arg::new("no-decorators")
                .long("no-decorators")
                .action(ArgAction::SetTrue)
                .help("Disallow decorators in the output"),
        )
        .arg(
            Arg::new("quote")
                .long("quote")
                .value_name("single|double")
                .help("Quote style for synthesized strings"),
        )
        .get_matches();

    let quote = match matches.get_one::<String>("quote").map(|s| s.as_str()) {
        Some("double") => QuoteStyle::Double,
        _ => QuoteStyle::Single,
    };

    let options = CliOptions {
        patterns: matches
            .get_many::<String>("paths")
            .map(|v| v.cloned().collect())
            .unwrap_or_default(),
        runtime_data_path: matches.get_one::<String>("runtime-data").cloned(),
        dry_run: matches.get_flag("dry-run"),
        transform: TransformOptions {
            class_fields: !matches.get_flag("no-class-fields"),
            decorators: !matches.get_flag("no-decorators"),
            quote,
        },
    };

    match perform_transform(&options) {
        Ok(summary) => {
            if summary.failed > 0 {
                process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    }
}
