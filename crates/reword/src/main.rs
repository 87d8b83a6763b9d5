use clap::{Parser, Subcommand};
use reword::RewordConfig;
use reword::commands::{languages, outline, translate, typegen};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Rule-based source-to-source translator.
#[derive(Parser)]
#[command(name = "reword", version, about)]
struct Cli {
    /// Log phase-level detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate a source file into another language
    Translate(translate::TranslateArgs),
    /// Generate typed AST code from a grammar file
    Typegen(typegen::TypegenArgs),
    /// List the types declared in a Java file
    Outline(outline::OutlineArgs),
    /// List registered readers, writers and backends
    Languages,
}

/// `RUST_LOG` wins, then `--verbose`, then the configured filter.
fn init_tracing(verbose: bool, config: &RewordConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = match (verbose, config.log.filter.as_deref()) {
            (true, _) => "debug",
            (false, Some(filter)) => filter,
            (false, None) => "warn",
        };
        EnvFilter::new(directive)
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = match RewordConfig::load(Path::new(".")) {
        Ok(config) => config,
        Err(e) => {
            eprint!("{}", e.render());
            std::process::exit(1);
        }
    };
    init_tracing(cli.verbose, &config);

    let result = match cli.command {
        Command::Translate(args) => translate::run(args, &config),
        Command::Typegen(args) => typegen::run(args, &config),
        Command::Outline(args) => outline::run(args),
        Command::Languages => {
            languages::run();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprint!("{}", e.render());
        std::process::exit(1);
    }
}
