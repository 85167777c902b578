/// CLI: renders design tokens to TypeScript declarations or a CommonJS module.
///
/// Usage:
///   token-codegen format --format ts  tokens.json > tokens.d.ts
///   token-codegen format --format js  < tokens.json > tokens.js
///   token-codegen build --config tokens.config.json
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use token_codegen::build::{build, read_sources};
use token_codegen::config::BuildConfig;
use token_codegen::format::Format;
use token_codegen::header::FileHeader;
use token_codegen::loader::{load_dictionary, LoaderOptions};

#[derive(Debug, Parser)]
#[command(name = "token-codegen", version, about)]
struct Cli {
    /// Log pipeline steps to stderr (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render token files (or stdin) in one format to stdout.
    Format {
        /// `ts` / `typescript/basic` or `js` / `javascript/inline-module`.
        #[arg(short, long, default_value = "ts")]
        format: Format,
        /// Prepended to every token name.
        #[arg(long)]
        prefix: Option<String>,
        /// Omit the `Generated on` header line.
        #[arg(long)]
        no_timestamp: bool,
        /// Token JSON files, merged in order. Reads stdin when empty.
        files: Vec<PathBuf>,
    },
    /// Write every file listed in a build config.
    Build {
        #[arg(
            short,
            long,
            env = "TOKEN_CODEGEN_CONFIG",
            default_value = "tokens.config.json"
        )]
        config: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn read_stdin() -> Result<Value> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("cannot read stdin")?;
    serde_json::from_str(&buf).context("invalid JSON on stdin")
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Format {
            format,
            prefix,
            no_timestamp,
            files,
        } => {
            let sources = if files.is_empty() {
                vec![read_stdin()?]
            } else {
                read_sources(&files)?
            };
            let dictionary = load_dictionary(&sources, &LoaderOptions { prefix })
                .context("invalid tokens")?;
            let header = if no_timestamp {
                FileHeader::without_timestamp()
            } else {
                FileHeader::default_with_timestamp()
            };
            print!("{}", format.render(&dictionary, &header));
        }
        Command::Build { config } => {
            let build_config = BuildConfig::from_path(&config)?;
            let report = build(&build_config)
                .with_context(|| format!("build failed for {}", config.display()))?;
            for file in &report.files {
                println!("{} ({} tokens)", file.path.display(), file.token_count);
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
