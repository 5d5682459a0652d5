//! Opcode values as written in the instruction-set description
//!
//! An opcode is either a numeric literal (`160`, `"0xA0"`, `"0b1010_0000"`) or
//! a symbolic name that the consuming encoder resolves itself. Literals keep
//! their source spelling so generated tables read like the description.

use crate::error::{IsaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpcodeValue {
    /// Numeric opcode and its source spelling
    Literal { value: u8, text: String },
    /// Symbolic opcode, emitted verbatim
    Symbol(String),
}

impl OpcodeValue {
    /// Numeric literal spelled in decimal
    pub fn literal(value: u8) -> Self {
        OpcodeValue::Literal {
            value,
            text: value.to_string(),
        }
    }

    /// Interpret a string opcode.
    ///
    /// Numeric strings must fit in a byte. Anything else must be an identifier.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if let Some(value) = parse_integer(text) {
            let value = u8::try_from(value).map_err(|_| {
                IsaError::structural(format!("opcode {text} does not fit in a byte"))
            })?;
            return Ok(OpcodeValue::Literal {
                value,
                text: text.to_string(),
            });
        }
        if is_symbol(text) {
            Ok(OpcodeValue::Symbol(text.to_string()))
        } else {
            Err(IsaError::structural(format!(
                "opcode {text:?} is neither a number nor a symbol"
            )))
        }
    }

    /// Numeric opcode, if known at generation time
    #[inline]
    pub fn value(&self) -> Option<u8> {
        match self {
            OpcodeValue::Literal { value, .. } => Some(*value),
            OpcodeValue::Symbol(_) => None,
        }
    }

    /// Spelling used when emitting source code
    pub fn as_source(&self) -> &str {
        match self {
            OpcodeValue::Literal { text, .. } => text,
            OpcodeValue::Symbol(name) => name,
        }
    }

    #[inline]
    pub fn is_symbol(&self) -> bool {
        matches!(self, OpcodeValue::Symbol(_))
    }
}

impl fmt::Display for OpcodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_source())
    }
}

/// Parse a decimal, `0x` hex or `0b` binary integer.
///
/// `_` may separate digits but cannot lead or trail them, so `_1` and
/// `__0x10` stay identifiers.
pub fn parse_integer(text: &str) -> Option<u64> {
    let (digits, radix) = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        (hex, 16)
    } else if let Some(bin) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        (bin, 2)
    } else {
        (text, 10)
    };

    if digits.starts_with('_') || digits.ends_with('_') {
        return None;
    }
    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(&cleaned, radix).ok()
}

/// Identifier, optionally `::`-qualified (`OP_NOP`, `Opcode::Nop`)
pub fn is_symbol(text: &str) -> bool {
    !text.is_empty() && text.split("::").all(is_identifier)
}

fn is_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
