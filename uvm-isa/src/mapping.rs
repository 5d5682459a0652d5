//! # Parameter kind and numeric type tables
//!
//! The instruction-set description names operand roles and VM numeric types
//! with short tags (`iReg`, `RO`, `i32`, ...). These tables translate the tags
//! into the identifiers the generated encoder tables use.
//!
//! ## Parameter kinds
//! | Tag        | Symbol       |
//! |------------|--------------|
//! | `iT`       | `INT_TYPE`   |
//! | `fT`       | `FLOAT_TYPE` |
//! | `iReg`     | `INT_REG`    |
//! | `fReg`     | `FLOAT_REG`  |
//! | `function` | `FUNC_ID`    |
//! | `label`    | `LABEL_ID`   |
//! | `RO`       | `REG_OFFSET` |
//! | `int`      | `INT_NUM`    |
//! | `float`    | `FLOAT_NUM`  |
//! | `sysID`    | `SYS_INT`    |
//!
//! ## Numeric types
//! | Tag   | Symbol        | VM byte |
//! |-------|---------------|---------|
//! | `i8`  | `UVM_TYPE_I8` | 0x01    |
//! | `i16` | `UVM_TYPE_I16`| 0x02    |
//! | `i32` | `UVM_TYPE_I32`| 0x03    |
//! | `i64` | `UVM_TYPE_I64`| 0x04    |
//! | `f32` | `UVM_TYPE_F32`| 0xF0    |
//! | `f64` | `UVM_TYPE_F64`| 0xF1    |

use crate::error::{IsaError, Result, TagTable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Syntactic role of an instruction operand.
///
/// Discriminants follow the encoder's `InstrParamType` enum order.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ParamKind {
    /// Integer type annotation (`i8`..`i64`)
    IntType = 0,
    /// Float type annotation (`f32`, `f64`)
    FloatType = 1,
    /// Function reference
    FuncId = 2,
    /// Label reference
    LabelId = 3,
    /// Integer register
    IntReg = 4,
    /// Float register
    FloatReg = 5,
    /// Register plus offset memory operand
    RegOffset = 6,
    /// Integer literal
    IntNum = 7,
    /// Float literal
    FloatNum = 8,
    /// System call id
    SysInt = 9,
}

/// Source tag → parameter kind
pub const PARAM_KINDS: [(&str, ParamKind); 10] = [
    ("iT", ParamKind::IntType),
    ("fT", ParamKind::FloatType),
    ("iReg", ParamKind::IntReg),
    ("fReg", ParamKind::FloatReg),
    ("function", ParamKind::FuncId),
    ("label", ParamKind::LabelId),
    ("RO", ParamKind::RegOffset),
    ("int", ParamKind::IntNum),
    ("float", ParamKind::FloatNum),
    ("sysID", ParamKind::SysInt),
];

impl ParamKind {
    /// Every kind in discriminant order
    pub const ALL: [ParamKind; 10] = [
        ParamKind::IntType,
        ParamKind::FloatType,
        ParamKind::FuncId,
        ParamKind::LabelId,
        ParamKind::IntReg,
        ParamKind::FloatReg,
        ParamKind::RegOffset,
        ParamKind::IntNum,
        ParamKind::FloatNum,
        ParamKind::SysInt,
    ];

    /// Resolve a source tag
    pub fn lookup(tag: &str) -> Result<Self> {
        PARAM_KINDS
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| IsaError::UnknownTag {
                table: TagTable::ParamKind,
                tag: tag.to_string(),
            })
    }

    /// Tag used in the instruction-set description
    pub fn tag(self) -> &'static str {
        match self {
            ParamKind::IntType => "iT",
            ParamKind::FloatType => "fT",
            ParamKind::FuncId => "function",
            ParamKind::LabelId => "label",
            ParamKind::IntReg => "iReg",
            ParamKind::FloatReg => "fReg",
            ParamKind::RegOffset => "RO",
            ParamKind::IntNum => "int",
            ParamKind::FloatNum => "float",
            ParamKind::SysInt => "sysID",
        }
    }

    /// Symbol emitted into the generated tables
    pub fn symbol(self) -> &'static str {
        match self {
            ParamKind::IntType => "INT_TYPE",
            ParamKind::FloatType => "FLOAT_TYPE",
            ParamKind::FuncId => "FUNC_ID",
            ParamKind::LabelId => "LABEL_ID",
            ParamKind::IntReg => "INT_REG",
            ParamKind::FloatReg => "FLOAT_REG",
            ParamKind::RegOffset => "REG_OFFSET",
            ParamKind::IntNum => "INT_NUM",
            ParamKind::FloatNum => "FLOAT_NUM",
            ParamKind::SysInt => "SYS_INT",
        }
    }

    #[inline]
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// VM primitive numeric type
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NumericType {
    I8 = 0x01,
    I16 = 0x02,
    I32 = 0x03,
    I64 = 0x04,
    F32 = 0xF0,
    F64 = 0xF1,
}

/// Source tag → numeric type
pub const NUMERIC_TYPES: [(&str, NumericType); 6] = [
    ("i8", NumericType::I8),
    ("i16", NumericType::I16),
    ("i32", NumericType::I32),
    ("i64", NumericType::I64),
    ("f32", NumericType::F32),
    ("f64", NumericType::F64),
];

impl NumericType {
    /// Resolve a source tag
    pub fn lookup(tag: &str) -> Result<Self> {
        NUMERIC_TYPES
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, ty)| *ty)
            .ok_or_else(|| IsaError::UnknownTag {
                table: TagTable::NumericType,
                tag: tag.to_string(),
            })
    }

    pub fn tag(self) -> &'static str {
        match self {
            NumericType::I8 => "i8",
            NumericType::I16 => "i16",
            NumericType::I32 => "i32",
            NumericType::I64 => "i64",
            NumericType::F32 => "f32",
            NumericType::F64 => "f64",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            NumericType::I8 => "UVM_TYPE_I8",
            NumericType::I16 => "UVM_TYPE_I16",
            NumericType::I32 => "UVM_TYPE_I32",
            NumericType::I64 => "UVM_TYPE_I64",
            NumericType::F32 => "UVM_TYPE_F32",
            NumericType::F64 => "UVM_TYPE_F64",
        }
    }

    /// Type byte as encoded into bytecode
    #[inline]
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(NumericType::I8),
            0x02 => Some(NumericType::I16),
            0x03 => Some(NumericType::I32),
            0x04 => Some(NumericType::I64),
            0xF0 => Some(NumericType::F32),
            0xF1 => Some(NumericType::F64),
            _ => None,
        }
    }

    #[inline]
    pub fn is_float(self) -> bool {
        matches!(self, NumericType::F32 | NumericType::F64)
    }
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
