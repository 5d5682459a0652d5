//! Generator errors

use crate::config::ConfigError;
use std::fmt;
use thiserror::Error;
use uvm_isa::{InstrFlags, IsaError, NumericType};

/// Kind of name that must be unique
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Register,
    Instruction,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Register => write!(f, "register"),
            NameKind::Instruction => write!(f, "instruction"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GenError {
    #[error(transparent)]
    Isa(#[from] IsaError),

    #[error("Duplicate {kind} name: {name}")]
    DuplicateName { kind: NameKind, name: String },

    #[error("Duplicate type variant {ty} in {instruction} (param list {param_list})")]
    DuplicateTypeVariant {
        instruction: String,
        param_list: usize,
        ty: NumericType,
    },

    #[error("{instruction} (param list {param_list}): {source}")]
    UnknownTag {
        instruction: String,
        param_list: usize,
        #[source]
        source: IsaError,
    },

    #[error("Inconsistent flags {flags} in {instruction} (param list {param_list})")]
    InconsistentFlags {
        instruction: String,
        param_list: usize,
        flags: InstrFlags,
    },

    #[error("Too many instructions: {0} (the encoder indexes at most 256)")]
    TooManyInstructions(usize),

    #[error("Table mismatch: {index_len} indexed names but {table_len} encoding entries")]
    TableMismatch { index_len: usize, table_len: usize },

    #[error("Instruction {name} is indexed as {found} but sits at position {expected}")]
    MisplacedIndex {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binary encoding error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GenError>;
