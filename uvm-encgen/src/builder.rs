//! Table builder
//!
//! Walks a [`Schema`] once and flattens it into [`EncodingTables`]. Pure: no
//! I/O, no partial results. The first error aborts the whole build.

use crate::error::{GenError, NameKind, Result};
use crate::tables::{EncodingTables, IndexEntry, ParamListRecord, RegisterEntry, VariantEntry};
use std::collections::HashSet;
use tracing::{debug, info, warn};
use uvm_isa::{
    InstrFlags, Instruction, IsaError, NumericType, ParamKind, ParamList, Schema, MAX_INSTRUCTIONS,
};

/// Handling of a type declared twice in one param list's variants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VariantPolicy {
    /// Reject the description
    #[default]
    Strict,
    /// Keep every entry; the encoder uses the last one
    LastWins,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub variant_policy: VariantPolicy,
}

/// Build the register table, instruction index and instruction table
pub fn build(schema: &Schema, options: &BuildOptions) -> Result<EncodingTables> {
    let instructions = schema.instructions();
    if instructions.len() > MAX_INSTRUCTIONS {
        return Err(GenError::TooManyInstructions(instructions.len()));
    }

    let registers = build_registers(schema)?;

    let mut seen = HashSet::with_capacity(instructions.len());
    let mut index = Vec::with_capacity(instructions.len());
    let mut table = Vec::with_capacity(instructions.len());

    for (position, instr) in instructions.iter().enumerate() {
        if !seen.insert(instr.name.as_str()) {
            return Err(GenError::DuplicateName {
                kind: NameKind::Instruction,
                name: instr.name.clone(),
            });
        }

        let records = build_instruction(instr, options)?;
        debug!(
            "instruction {:>3} {:<8} {} param list(s)",
            position,
            instr.name,
            records.len()
        );

        index.push(IndexEntry {
            name: instr.name.clone(),
            // Bounded by MAX_INSTRUCTIONS above
            index: position as u8,
        });
        table.push(records);
    }

    let tables = EncodingTables::new(registers, index, table);
    tables.verify()?;

    info!(
        registers = tables.registers().len(),
        instructions = tables.len(),
        param_lists = schema.param_list_count(),
        "built encoding tables"
    );
    Ok(tables)
}

fn build_registers(schema: &Schema) -> Result<Vec<RegisterEntry>> {
    let mut seen = HashSet::with_capacity(schema.registers().len());
    schema
        .registers()
        .iter()
        .map(|reg| {
            if !seen.insert(reg.name.as_str()) {
                return Err(GenError::DuplicateName {
                    kind: NameKind::Register,
                    name: reg.name.clone(),
                });
            }
            debug!("register {:<4} = {:#04x}", reg.name, reg.bytecode);
            Ok(RegisterEntry {
                name: reg.name.clone(),
                code: reg.bytecode,
            })
        })
        .collect()
}

fn build_instruction(instr: &Instruction, options: &BuildOptions) -> Result<Vec<ParamListRecord>> {
    instr
        .param_lists
        .iter()
        .enumerate()
        .map(|(i, pl)| build_param_list(&instr.name, i, pl, options))
        .collect()
}

fn build_param_list(
    instruction: &str,
    position: usize,
    pl: &ParamList,
    options: &BuildOptions,
) -> Result<ParamListRecord> {
    let flags = InstrFlags::from_parts(pl.encode_type, !pl.type_variants.is_empty());

    let params = pl
        .params
        .iter()
        .map(|tag| ParamKind::lookup(tag))
        .collect::<uvm_isa::Result<Vec<_>>>()
        .map_err(|source| unknown_tag(instruction, position, source))?;

    let mut types: HashSet<NumericType> = HashSet::with_capacity(pl.type_variants.len());
    let mut type_variants = Vec::with_capacity(pl.type_variants.len());
    for variant in &pl.type_variants {
        let ty = NumericType::lookup(&variant.ty)
            .map_err(|source| unknown_tag(instruction, position, source))?;
        if !types.insert(ty) {
            match options.variant_policy {
                VariantPolicy::Strict => {
                    return Err(GenError::DuplicateTypeVariant {
                        instruction: instruction.to_string(),
                        param_list: position,
                        ty,
                    });
                }
                VariantPolicy::LastWins => {
                    warn!(
                        "{} param list {}: type variant {} declared again, earlier entry is shadowed",
                        instruction, position, ty
                    );
                }
            }
        }
        type_variants.push(VariantEntry {
            ty,
            opcode: variant.opcode.clone(),
        });
    }

    Ok(ParamListRecord {
        opcode: pl.opcode.clone(),
        flags,
        params,
        type_variants,
    })
}

fn unknown_tag(instruction: &str, position: usize, source: IsaError) -> GenError {
    GenError::UnknownTag {
        instruction: instruction.to_string(),
        param_list: position,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uvm_isa::{OpcodeValue, Register, TagTable, TypeVariant};

    fn param_list(opcode: u8, encode_type: bool, params: &[&str], variants: &[(&str, u8)]) -> ParamList {
        ParamList {
            opcode: OpcodeValue::literal(opcode),
            encode_type,
            params: params.iter().map(|p| p.to_string()).collect(),
            type_variants: variants
                .iter()
                .map(|(ty, op)| TypeVariant {
                    ty: ty.to_string(),
                    opcode: OpcodeValue::literal(*op),
                })
                .collect(),
        }
    }

    fn instruction(name: &str, param_lists: Vec<ParamList>) -> Instruction {
        Instruction {
            name: name.to_string(),
            param_lists,
        }
    }

    fn register(name: &str, bytecode: u8) -> Register {
        Register {
            name: name.to_string(),
            bytecode,
        }
    }

    #[test]
    fn test_single_add() {
        let schema = Schema::new(
            vec![register("r0", 0)],
            vec![instruction("add", vec![param_list(1, false, &["iReg", "iReg"], &[])])],
        );
        let tables = build(&schema, &BuildOptions::default()).unwrap();

        assert_eq!(tables.registers(), &[RegisterEntry { name: "r0".to_string(), code: 0 }]);
        assert_eq!(tables.instruction_index(), &[IndexEntry { name: "add".to_string(), index: 0 }]);
        assert_eq!(
            tables.instructions()[0],
            vec![ParamListRecord {
                opcode: OpcodeValue::literal(1),
                flags: InstrFlags::NONE,
                params: vec![ParamKind::IntReg, ParamKind::IntReg],
                type_variants: vec![],
            }]
        );
        assert_eq!(tables.instructions()[0][0].params[0].symbol(), "INT_REG");
    }

    #[test]
    fn test_both_flags_and_variant_order() {
        let schema = Schema::new(
            vec![],
            vec![instruction(
                "push",
                vec![param_list(0x01, true, &["iT", "int"], &[("i32", 0x03), ("i8", 0x01)])],
            )],
        );
        let tables = build(&schema, &BuildOptions::default()).unwrap();
        let record = &tables.instructions()[0][0];

        assert_eq!(record.flags, InstrFlags::from_parts(true, true));
        assert_eq!(record.flags.bits(), 0b11);
        let variants: Vec<_> = record
            .type_variants
            .iter()
            .map(|v| (v.ty.symbol(), v.opcode.value()))
            .collect();
        assert_eq!(variants, vec![("UVM_TYPE_I32", Some(0x03)), ("UVM_TYPE_I8", Some(0x01))]);
    }

    #[test]
    fn test_flag_combinations() {
        let schema = Schema::new(
            vec![],
            vec![instruction(
                "mix",
                vec![
                    param_list(0, false, &[], &[]),
                    param_list(1, true, &[], &[]),
                    param_list(2, false, &[], &[("i8", 2)]),
                    param_list(3, true, &[], &[("i8", 3)]),
                ],
            )],
        );
        let tables = build(&schema, &BuildOptions::default()).unwrap();
        let bits: Vec<_> = tables.instructions()[0].iter().map(|r| r.flags.bits()).collect();
        assert_eq!(bits, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_duplicate_register() {
        let schema = Schema::new(vec![register("r0", 0), register("r0", 1)], vec![]);
        let err = build(&schema, &BuildOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            GenError::DuplicateName { kind: NameKind::Register, ref name } if name == "r0"
        ));
    }

    #[test]
    fn test_duplicate_instruction() {
        let schema = Schema::new(
            vec![],
            vec![
                instruction("nop", vec![param_list(0, false, &[], &[])]),
                instruction("nop", vec![param_list(1, false, &[], &[])]),
            ],
        );
        let err = build(&schema, &BuildOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            GenError::DuplicateName { kind: NameKind::Instruction, ref name } if name == "nop"
        ));
    }

    #[test]
    fn test_unknown_param_tag() {
        let schema = Schema::new(
            vec![],
            vec![instruction("mov", vec![param_list(0, false, &["iReg", "xReg"], &[])])],
        );
        let err = build(&schema, &BuildOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "mov (param list 0): Unknown parameter kind tag: \"xReg\"");
        match err {
            GenError::UnknownTag {
                instruction,
                param_list,
                source: IsaError::UnknownTag { table, tag },
            } => {
                assert_eq!(instruction, "mov");
                assert_eq!(param_list, 0);
                assert_eq!(table, TagTable::ParamKind);
                assert_eq!(tag, "xReg");
            }
            other => panic!("Expected UnknownTag, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_numeric_tag() {
        let schema = Schema::new(
            vec![],
            vec![instruction(
                "push",
                vec![
                    param_list(0, false, &["iT"], &[]),
                    param_list(1, false, &["iT"], &[("u8", 1)]),
                ],
            )],
        );
        let err = build(&schema, &BuildOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            GenError::UnknownTag {
                ref instruction,
                param_list: 1,
                source: IsaError::UnknownTag { table: TagTable::NumericType, .. },
            } if instruction == "push"
        ));
    }

    #[test]
    fn test_duplicate_type_variant_strict() {
        let schema = Schema::new(
            vec![],
            vec![instruction(
                "push",
                vec![param_list(0, false, &["iT"], &[("i8", 1), ("i16", 2), ("i8", 3)])],
            )],
        );
        let err = build(&schema, &BuildOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            GenError::DuplicateTypeVariant { param_list: 0, ty: NumericType::I8, .. }
        ));
    }

    #[test]
    fn test_duplicate_type_variant_last_wins() {
        let schema = Schema::new(
            vec![],
            vec![instruction(
                "push",
                vec![param_list(0, false, &["iT"], &[("i8", 1), ("i8", 3)])],
            )],
        );
        let options = BuildOptions {
            variant_policy: VariantPolicy::LastWins,
        };
        let tables = build(&schema, &options).unwrap();
        let record = &tables.instructions()[0][0];
        // Both entries kept in order
        assert_eq!(record.type_variants.len(), 2);
        assert_eq!(record.opcode_for(NumericType::I8), Some(3));
    }

    #[test]
    fn test_too_many_instructions() {
        let instructions = (0..=MAX_INSTRUCTIONS)
            .map(|i| instruction(&format!("op{i}"), vec![]))
            .collect();
        let schema = Schema::new(vec![], instructions);
        assert!(matches!(
            build(&schema, &BuildOptions::default()),
            Err(GenError::TooManyInstructions(257))
        ));
    }

    #[test]
    fn test_max_instructions_fit() {
        let instructions = (0..MAX_INSTRUCTIONS)
            .map(|i| instruction(&format!("op{i}"), vec![]))
            .collect();
        let schema = Schema::new(vec![], instructions);
        let tables = build(&schema, &BuildOptions::default()).unwrap();
        assert_eq!(tables.instruction_index().last().unwrap().index, 255);
    }

    #[test]
    fn test_underscore_opcodes_stay_symbolic() {
        let json = r#"{
            "registers": [],
            "instructions": [
                { "name": "push", "paramList": [
                    { "opcode": "_1", "encodeType": false, "params": ["iT"],
                      "typeVariants": [ { "type": "i8", "opcode": "__0x10" } ] }
                ] }
            ]
        }"#;
        let schema = Schema::from_json_str(json).unwrap();
        let tables = build(&schema, &BuildOptions::default()).unwrap();
        let record = &tables.instructions()[0][0];
        assert!(record.opcode.is_symbol());
        assert_eq!(record.opcode_for(NumericType::I8), None);
        assert_eq!(record.opcode_for(NumericType::I16), None);
    }

    #[test]
    fn test_symbolic_opcode_kept_verbatim() {
        let mut pl = param_list(0, false, &[], &[]);
        pl.opcode = OpcodeValue::Symbol("OP_HALT".to_string());
        let schema = Schema::new(vec![], vec![instruction("halt", vec![pl])]);
        let tables = build(&schema, &BuildOptions::default()).unwrap();
        assert_eq!(tables.instructions()[0][0].opcode.as_source(), "OP_HALT");
    }
}
