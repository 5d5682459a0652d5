//! # Instruction-set description
//!
//! In-memory form of the JSON description consumed by the table generator:
//!
//! ```json
//! {
//!   "registers": [ { "name": "r0", "bytecode": "0x5" } ],
//!   "instructions": [
//!     {
//!       "name": "push",
//!       "paramList": [
//!         {
//!           "opcode": "0x01",
//!           "encodeType": false,
//!           "params": ["iT", "int"],
//!           "typeVariants": [ { "type": "i8", "opcode": "0x01" } ]
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Loading checks shape only. Tags stay unresolved and names are not checked
//! for uniqueness; both happen when the tables are built. Declaration order is
//! preserved everywhere because instruction indices are positional.

use crate::error::{IsaError, Result};
use crate::opcode::{parse_integer, OpcodeValue};
use serde::Deserialize;

/// Named register and its bytecode
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Register {
    pub name: String,
    pub bytecode: u8,
}

/// Opcode override selected by operand type
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeVariant {
    /// Numeric type tag (`i8`, `f32`, ...)
    pub ty: String,
    pub opcode: OpcodeValue,
}

/// One operand shape of an instruction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamList {
    pub opcode: OpcodeValue,
    pub encode_type: bool,
    /// Parameter kind tags in operand order
    pub params: Vec<String>,
    pub type_variants: Vec<TypeVariant>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub name: String,
    pub param_lists: Vec<ParamList>,
}

/// Instruction-set description in declaration order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema {
    registers: Vec<Register>,
    instructions: Vec<Instruction>,
}

impl Schema {
    pub fn new(registers: Vec<Register>, instructions: Vec<Instruction>) -> Self {
        Self {
            registers,
            instructions,
        }
    }

    /// Parse a JSON description
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawSchema = serde_json::from_str(json)
            .map_err(|e| IsaError::structural(e.to_string()))?;
        raw.into_schema()
    }

    /// Parse a JSON description from raw bytes
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let raw: RawSchema = serde_json::from_slice(bytes)
            .map_err(|e| IsaError::structural(e.to_string()))?;
        raw.into_schema()
    }

    #[inline]
    pub fn registers(&self) -> &[Register] {
        &self.registers
    }

    #[inline]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Total number of param lists over all instructions
    pub fn param_list_count(&self) -> usize {
        self.instructions.iter().map(|i| i.param_lists.len()).sum()
    }
}

// ----------------------------------------------------------------------------
// Wire format
// ----------------------------------------------------------------------------

#[derive(Deserialize)]
struct RawSchema {
    registers: Vec<RawRegister>,
    instructions: Vec<RawInstruction>,
}

#[derive(Deserialize)]
struct RawRegister {
    name: String,
    bytecode: RawScalar,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInstruction {
    name: String,
    param_list: Vec<RawParamList>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParamList {
    opcode: RawScalar,
    encode_type: bool,
    params: Vec<String>,
    type_variants: Vec<RawTypeVariant>,
}

#[derive(Deserialize)]
struct RawTypeVariant {
    #[serde(rename = "type")]
    ty: String,
    opcode: RawScalar,
}

/// Integer or string; both spellings occur in descriptions
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Int(u64),
    Text(String),
}

impl RawScalar {
    fn into_byte(self, context: &str) -> Result<u8> {
        let value = match self {
            RawScalar::Int(v) => v,
            RawScalar::Text(text) => parse_integer(text.trim()).ok_or_else(|| {
                IsaError::structural(format!("{context}: {text:?} is not an integer"))
            })?,
        };
        u8::try_from(value).map_err(|_| {
            IsaError::structural(format!("{context}: {value} is out of range 0..=255"))
        })
    }

    fn into_opcode(self, context: &str) -> Result<OpcodeValue> {
        match self {
            RawScalar::Int(v) => u8::try_from(v).map(OpcodeValue::literal).map_err(|_| {
                IsaError::structural(format!("{context}: {v} is out of range 0..=255"))
            }),
            RawScalar::Text(text) => OpcodeValue::parse(&text).map_err(|e| match e {
                IsaError::Structural { message } => {
                    IsaError::structural(format!("{context}: {message}"))
                }
                other => other,
            }),
        }
    }
}

/// Names end up inside C++ and Rust string literals: printable ASCII without
/// quotes, backslashes or spaces.
fn check_name(name: &str, context: &str) -> Result<()> {
    if name.is_empty() {
        return Err(IsaError::structural(format!("{context}: name is empty")));
    }
    match name.chars().find(|c| !c.is_ascii_graphic() || *c == '"' || *c == '\\') {
        Some(c) => Err(IsaError::structural(format!(
            "{context}: name {name:?} contains {c:?}"
        ))),
        None => Ok(()),
    }
}

impl RawSchema {
    fn into_schema(self) -> Result<Schema> {
        let registers = self
            .registers
            .into_iter()
            .enumerate()
            .map(|(i, reg)| -> Result<Register> {
                check_name(&reg.name, &format!("registers[{i}].name"))?;
                let bytecode = reg
                    .bytecode
                    .into_byte(&format!("registers[{i}] ({}).bytecode", reg.name))?;
                Ok(Register {
                    name: reg.name,
                    bytecode,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let instructions = self
            .instructions
            .into_iter()
            .enumerate()
            .map(|(i, instr)| instr.into_instruction(i))
            .collect::<Result<Vec<_>>>()?;

        Ok(Schema::new(registers, instructions))
    }
}

impl RawInstruction {
    fn into_instruction(self, index: usize) -> Result<Instruction> {
        let name = self.name;
        check_name(&name, &format!("instructions[{index}].name"))?;
        let param_lists = self
            .param_list
            .into_iter()
            .enumerate()
            .map(|(j, pl)| -> Result<ParamList> {
                let context = format!("instructions[{index}] ({name}).paramList[{j}]");
                let opcode = pl.opcode.into_opcode(&format!("{context}.opcode"))?;
                let type_variants = pl
                    .type_variants
                    .into_iter()
                    .enumerate()
                    .map(|(k, tv)| -> Result<TypeVariant> {
                        Ok(TypeVariant {
                            opcode: tv
                                .opcode
                                .into_opcode(&format!("{context}.typeVariants[{k}].opcode"))?,
                            ty: tv.ty,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(ParamList {
                    opcode,
                    encode_type: pl.encode_type,
                    params: pl.params,
                    type_variants,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Instruction { name, param_lists })
    }
}
