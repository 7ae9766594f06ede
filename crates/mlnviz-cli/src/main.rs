use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use strum::IntoEnumIterator;

use mlnviz_cli::{InputOptions, OutputOptions, Settings, run_batch};
use mlnviz_render::RendererKind;

#[derive(Parser, Debug)]
#[command(
    name = "mlnviz",
    about = "mlnviz: interactive views of multilayer-network layers and communities",
    version
)]
pub struct Cli {
    #[command(flatten)]
    input: InputOptions,

    #[command(flatten)]
    output: OutputOptions,

    /// Visualization to produce (repeatable), e.g. plotly, pyvis, word-cloud
    #[arg(
        short = 'v',
        long = "viz",
        value_name = "KIND",
        num_args = 1..,
        action = clap::ArgAction::Append
    )]
    viz: Vec<String>,

    /// TOML settings file; command-line flags take precedence
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<String>,

    /// List the known visualizations and exit
    #[arg(long)]
    list: bool,
}

pub fn run(args: Cli) -> Result<()> {
    let total_start = Instant::now();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    if args.list {
        for kind in RendererKind::iter() {
            println!("{:<26}{}", kind.name(), kind.artifact_tag());
        }
        return Ok(());
    }

    let settings = match &args.config {
        Some(path) => Settings::from_path(path)?,
        None => Settings::default(),
    };
    let opts = settings.resolve(args.input, args.output, &args.viz)?;
    if opts.renderers.is_empty() {
        anyhow::bail!("no visualization requested (use --viz KIND or --list)");
    }

    for outcome in run_batch(&opts) {
        if let Err(e) = &outcome.result {
            eprintln!("Error: {}: {e}", outcome.kind);
        }
        println!("{outcome}");
    }

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    Ok(())
}

pub fn main() -> Result<()> {
    let args = Cli::parse();
    run(args)
}
