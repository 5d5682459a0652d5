//! # Encoding tables
//!
//! The flattened artifacts handed to the emitter back ends:
//! - register table: `(name, code)` in declaration order
//! - instruction index: `(name, index)` where `index` is the position
//! - instruction table: per instruction, its param list records
//!
//! The assembler indexes the instruction table positionally, so
//! `instruction_index()[i]` and `instructions()[i]` always describe the same
//! instruction.

use crate::error::{GenError, Result};
use serde::{Deserialize, Serialize};
use uvm_isa::{InstrFlags, NumericType, OpcodeValue, ParamKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterEntry {
    pub name: String,
    pub code: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    pub index: u8,
}

/// Opcode override for one operand type
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantEntry {
    pub ty: NumericType,
    pub opcode: OpcodeValue,
}

/// Encoding record for one param list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamListRecord {
    pub opcode: OpcodeValue,
    pub flags: InstrFlags,
    pub params: Vec<ParamKind>,
    pub type_variants: Vec<VariantEntry>,
}

impl ParamListRecord {
    /// Opcode to encode for an operand of type `ty`.
    ///
    /// Uses the type variant when the record has one (the last declared wins),
    /// otherwise the base opcode. `None` when the opcode is symbolic.
    pub fn opcode_for(&self, ty: NumericType) -> Option<u8> {
        if self.flags.has_type_variants() {
            if let Some(variant) = self.type_variants.iter().rev().find(|v| v.ty == ty) {
                return variant.opcode.value();
            }
        }
        self.opcode.value()
    }

    /// Whether the operand kinds match this record's signature exactly
    pub fn accepts(&self, kinds: &[ParamKind]) -> bool {
        self.params == kinds
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingTables {
    registers: Vec<RegisterEntry>,
    instruction_index: Vec<IndexEntry>,
    instructions: Vec<Vec<ParamListRecord>>,
}

impl EncodingTables {
    pub(crate) fn new(
        registers: Vec<RegisterEntry>,
        instruction_index: Vec<IndexEntry>,
        instructions: Vec<Vec<ParamListRecord>>,
    ) -> Self {
        Self {
            registers,
            instruction_index,
            instructions,
        }
    }

    #[inline]
    pub fn registers(&self) -> &[RegisterEntry] {
        &self.registers
    }

    #[inline]
    pub fn instruction_index(&self) -> &[IndexEntry] {
        &self.instruction_index
    }

    #[inline]
    pub fn instructions(&self) -> &[Vec<ParamListRecord>] {
        &self.instructions
    }

    /// Number of instructions
    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn register_code(&self, name: &str) -> Option<u8> {
        self.registers.iter().find(|r| r.name == name).map(|r| r.code)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.instruction_index
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.index as usize)
    }

    pub fn param_lists(&self, index: usize) -> Option<&[ParamListRecord]> {
        self.instructions.get(index).map(Vec::as_slice)
    }

    /// Check the positional invariants the emitters rely on
    pub fn verify(&self) -> Result<()> {
        if self.instruction_index.len() != self.instructions.len() {
            return Err(GenError::TableMismatch {
                index_len: self.instruction_index.len(),
                table_len: self.instructions.len(),
            });
        }
        for (position, entry) in self.instruction_index.iter().enumerate() {
            if entry.index as usize != position {
                return Err(GenError::MisplacedIndex {
                    name: entry.name.clone(),
                    expected: position,
                    found: entry.index as usize,
                });
            }
        }
        for (entry, records) in self.instruction_index.iter().zip(&self.instructions) {
            for (position, record) in records.iter().enumerate() {
                if record.flags.has_type_variants() == record.type_variants.is_empty() {
                    return Err(GenError::InconsistentFlags {
                        instruction: entry.name.clone(),
                        param_list: position,
                        flags: record.flags,
                    });
                }
            }
        }
        Ok(())
    }
}
