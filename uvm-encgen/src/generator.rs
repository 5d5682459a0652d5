//! Generator pipeline: load description → build tables → emit → write

use crate::builder::{build, BuildOptions};
use crate::config::GenConfig;
use crate::emitter::{emit, EmitOptions};
use crate::error::Result;
use crate::output;
use std::fs;
use tracing::info;
use uvm_isa::Schema;

/// What a run did to the output file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Output was created or replaced
    Written,
    /// Output already matched
    Unchanged,
    /// Output differs and check mode left it alone
    Stale,
}

/// Run the pure part of the pipeline on a JSON description
pub fn generate_from_str(
    json: &str,
    build_options: &BuildOptions,
    emit_options: &EmitOptions,
) -> Result<Vec<u8>> {
    let schema = Schema::from_json_str(json)?;
    let tables = build(&schema, build_options)?;
    emit(&tables, emit_options)
}

/// Run a full generator pass
pub fn generate(config: &GenConfig) -> Result<Outcome> {
    config.validate()?;
    info!("{}", config);

    let input = fs::read(&config.input)?;
    let schema = Schema::from_json_slice(&input)?;
    let tables = build(&schema, &config.build_options())?;
    let bytes = emit(&tables, &config.emit_options())?;

    if output::is_up_to_date(&config.output, &bytes)? {
        info!("{} is up to date", config.output.display());
        return Ok(Outcome::Unchanged);
    }
    if config.check {
        info!("{} is stale", config.output.display());
        return Ok(Outcome::Stale);
    }

    output::write_atomic(&config.output, &bytes)?;
    info!("wrote {}", config.output.display());
    Ok(Outcome::Written)
}
