//! # UVM Instruction-Set Description
//!
//! Data model for the declarative description the assembler's encoding
//! tables are generated from.
//!
//! ## Key Features
//! - Schema model for registers, instructions and their param lists
//! - Fixed tag tables for parameter kinds and VM numeric types
//! - Two-bit flag encoding read by the encoder at runtime
//! - Opcodes as byte literals or symbolic names

pub mod error;
pub mod flags;
pub mod mapping;
pub mod opcode;
pub mod schema;

pub use error::{IsaError, Result, TagTable};
pub use flags::InstrFlags;
pub use mapping::{NumericType, ParamKind, NUMERIC_TYPES, PARAM_KINDS};
pub use opcode::OpcodeValue;
pub use schema::{Instruction, ParamList, Register, Schema, TypeVariant};

/// Largest number of instructions the encoder can index (`uint8_t`)
pub const MAX_INSTRUCTIONS: usize = 256;
