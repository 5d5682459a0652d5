//! Param list encoding flags
//!
//! Two independent bits tell the encoder how to handle a param list:
//! - bit 0 (`ENCODE_TYPE`): the operand type byte is written into bytecode
//! - bit 1 (`TYPE_VARIANTS`): the opcode is overridden per operand type

use crate::error::IsaError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flag bitmask attached to every param list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct InstrFlags(u8);

impl InstrFlags {
    pub const NONE: Self = Self(0);
    pub const ENCODE_TYPE: Self = Self(0b0000_0001);
    pub const TYPE_VARIANTS: Self = Self(0b0000_0010);

    /// Bits that carry meaning
    pub const MASK: u8 = 0b0000_0011;

    /// Derive the flags of a param list
    pub const fn from_parts(encode_type: bool, has_type_variants: bool) -> Self {
        let mut bits = 0;
        if encode_type {
            bits |= Self::ENCODE_TYPE.0;
        }
        if has_type_variants {
            bits |= Self::TYPE_VARIANTS.0;
        }
        Self(bits)
    }

    /// Rebuild from raw bits, rejecting unknown bits
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::MASK != 0 {
            None
        } else {
            Some(Self(bits))
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn encode_type(self) -> bool {
        self.0 & Self::ENCODE_TYPE.0 != 0
    }

    #[inline]
    pub const fn has_type_variants(self) -> bool {
        self.0 & Self::TYPE_VARIANTS.0 != 0
    }

    /// Inverse of [`InstrFlags::from_parts`]
    #[inline]
    pub const fn to_parts(self) -> (bool, bool) {
        (self.encode_type(), self.has_type_variants())
    }

    /// Flag constant names as a C-style bitwise expression
    pub fn symbols(self) -> &'static str {
        match self.to_parts() {
            (false, false) => "0",
            (true, false) => "INSTR_FLAG_ENCODE_TYPE",
            (false, true) => "INSTR_FLAG_TYPE_VARIANTS",
            (true, true) => "INSTR_FLAG_ENCODE_TYPE | INSTR_FLAG_TYPE_VARIANTS",
        }
    }
}

impl TryFrom<u8> for InstrFlags {
    type Error = IsaError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::from_bits(bits)
            .ok_or_else(|| IsaError::structural(format!("unknown flag bits {bits:#04x}")))
    }
}

impl From<InstrFlags> for u8 {
    fn from(flags: InstrFlags) -> u8 {
        flags.0
    }
}

impl fmt::Display for InstrFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbols())
    }
}
