//! `uvm-encgen` command line

use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use uvm_encgen::{generate, GenConfig, Outcome, Target, VariantPolicy};

/// Generate the assembler's encoding tables from an instruction-set description
#[derive(Debug, Parser)]
#[command(name = "uvm-encgen", version, about)]
struct Args {
    /// JSON instruction-set description
    input: PathBuf,

    /// Output file
    #[arg(short, long)]
    output: PathBuf,

    /// Output format (inferred from the output extension when omitted)
    #[arg(short, long, value_enum)]
    target: Option<Target>,

    /// Namespace wrapping the C++ instruction tables
    #[arg(long)]
    namespace: Option<String>,

    /// Keep repeated type variants (the last one wins) instead of failing
    #[arg(long)]
    allow_shadowed_variants: bool,

    /// Fail if the output is out of date instead of rewriting it
    #[arg(long)]
    check: bool,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = GenConfig::new(&args.input, &args.output, args.target)
        .context("invalid generator configuration")?;
    if let Some(namespace) = args.namespace {
        config = config
            .with_namespace(namespace)
            .context("invalid generator configuration")?;
    }
    if args.allow_shadowed_variants {
        config = config.with_variant_policy(VariantPolicy::LastWins);
    }
    config = config.with_check(args.check);

    let outcome = generate(&config).with_context(|| {
        format!(
            "failed to generate {} from {}",
            config.output.display(),
            config.input.display()
        )
    })?;

    if outcome == Outcome::Stale {
        bail!("{} is out of date; rerun without --check", config.output.display());
    }
    Ok(())
}
