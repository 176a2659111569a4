//! Enclave command-line tool.

use std::io::IsTerminal as _;
use std::path::Path;

use enclc::commands::{check_file, exports_file, format_exports, run_file, CommandError};
use enclc::diagnostic::render_syntax_errors;
use enclc::SessionConfig;

fn main() {
    enclc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" | "exports" | "check" => {
            let Some(file) = args.get(2) else {
                eprintln!("Usage: encl {command} <file.encl>");
                std::process::exit(1);
            };
            let path = Path::new(file);
            let outcome = match command.as_str() {
                "run" => run_file(path, SessionConfig::from_env()).map(|_| ()),
                "exports" => exports_file(path, SessionConfig::from_env())
                    .map(|module| print!("{}", format_exports(&module))),
                _ => check_file(path).map(|summary| {
                    println!(
                        "{file}: ok ({} statements, {} tokens)",
                        summary.statements, summary.tokens
                    );
                }),
            };
            if let Err(err) = outcome {
                report(&err);
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("encl {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // A bare source file runs it.
            if Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("encl"))
            {
                if let Err(err) = run_file(Path::new(command), SessionConfig::from_env()) {
                    report(&err);
                    std::process::exit(1);
                }
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn report(err: &CommandError) {
    match err {
        CommandError::Syntax {
            path,
            source_text,
            errors,
        } => {
            let color = std::io::stderr().is_terminal();
            eprint!(
                "{}",
                render_syntax_errors(&path.display().to_string(), source_text, errors, color)
            );
        }
        CommandError::Read { .. } | CommandError::Eval(_) => eprintln!("error: {err}"),
    }
}

fn print_usage() {
    println!("Enclave: isolated module scopes for scripts");
    println!();
    println!("Usage: encl <command> [file]");
    println!();
    println!("Commands:");
    println!("  run <file.encl>      Evaluate a script");
    println!("  exports <file.encl>  Load a file as a module and list its exports");
    println!("  check <file.encl>    Lex and parse only");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Environment:");
    println!("  ENCL_LOG             Tracing filter, e.g. encl_module=debug");
    println!("  ENCL_MAX_DEPTH       Maximum call depth (default 256)");
}
