//! # Emitter back ends
//!
//! Render [`EncodingTables`] into a static-table format. All back ends keep
//! the builder's order; the assembler indexes the emitted arrays by position.
//!
//! | Target    | Output                                         |
//! |-----------|------------------------------------------------|
//! | `cpp`     | C++ header with `std::map`/`std::array` tables |
//! | `rust`    | Rust source with `static` arrays               |
//! | `json`    | Pretty-printed JSON of the tables              |
//! | `bincode` | Binary image of the tables                     |

pub mod cpp;
pub mod rust;

use crate::error::Result;
use crate::tables::EncodingTables;
use std::fmt;
use std::path::Path;
use tracing::info;

/// Marker placed at the top of generated source files
pub const GENERATED_NOTICE: &str = "THIS FILE IS GENERATED BY 'uvm-encgen' DO NOT MODIFY!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Target {
    Cpp,
    Rust,
    Json,
    Bincode,
}

impl Target {
    /// Target implied by an output file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "hpp" | "h" | "hh" => Some(Target::Cpp),
            "rs" => Some(Target::Rust),
            "json" => Some(Target::Json),
            "bin" => Some(Target::Bincode),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Target::Cpp => "cpp",
            Target::Rust => "rust",
            Target::Json => "json",
            Target::Bincode => "bincode",
        }
    }

    /// Whether the output is text
    pub fn is_text(self) -> bool {
        !matches!(self, Target::Bincode)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Target-format descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    pub target: Target,
    /// C++ namespace of the instruction tables; unused by other targets
    pub namespace: String,
}

impl EmitOptions {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            namespace: crate::config::DEFAULT_NAMESPACE.to_string(),
        }
    }
}

/// Render the tables for the selected target
pub fn emit(tables: &EncodingTables, options: &EmitOptions) -> Result<Vec<u8>> {
    tables.verify()?;

    let bytes = match options.target {
        Target::Cpp => cpp::render(tables, &options.namespace).into_bytes(),
        Target::Rust => rust::render(tables).into_bytes(),
        Target::Json => {
            let mut bytes = serde_json::to_vec_pretty(tables)?;
            bytes.push(b'\n');
            bytes
        }
        Target::Bincode => bincode::serialize(tables)?,
    };

    info!(format = %options.target, bytes = bytes.len(), "emitted encoding tables");
    Ok(bytes)
}

/// Load tables from a `bincode` image
pub fn decode_bincode(bytes: &[u8]) -> Result<EncodingTables> {
    let tables: EncodingTables = bincode::deserialize(bytes)?;
    tables.verify()?;
    Ok(tables)
}

/// Load tables from `json` output
pub fn decode_json(bytes: &[u8]) -> Result<EncodingTables> {
    let tables: EncodingTables = serde_json::from_slice(bytes)?;
    tables.verify()?;
    Ok(tables)
}
