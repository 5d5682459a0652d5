//! Rust source back end
//!
//! The generated file is meant to be a child module of the module that
//! declares `InstrParamList`, `InstrParamType`, `TypeVariant` and the flag and
//! type constants; it pulls them in with `use super::*`.

use super::GENERATED_NOTICE;
use crate::tables::{EncodingTables, ParamListRecord};

/// Render the tables as Rust `static` arrays
pub fn render(tables: &EncodingTables) -> String {
    let mut out = String::with_capacity(64 * 1024);

    out.push_str(&format!("// {GENERATED_NOTICE}\n\n"));
    out.push_str("#![allow(clippy::all)]\n\nuse super::*;\n\n");

    out.push_str(&format!(
        "pub static ASM_REGISTERS: [(&str, u8); {}] = [\n",
        tables.registers().len()
    ));
    for reg in tables.registers() {
        out.push_str(&format!("    ({:?}, {:#X}),\n", reg.name, reg.code));
    }
    out.push_str("];\n\n");

    out.push_str(&format!(
        "pub static INSTR_NAMES: [(&str, u8); {}] = [\n",
        tables.len()
    ));
    for entry in tables.instruction_index() {
        out.push_str(&format!("    ({:?}, {}),\n", entry.name, entry.index));
    }
    out.push_str("];\n\n");

    out.push_str(&format!(
        "pub static INSTR_ASM_DEFS: [&[InstrParamList]; {}] = [\n",
        tables.len()
    ));
    for param_lists in tables.instructions() {
        out.push_str("    &[\n");
        for record in param_lists {
            out.push_str(&render_param_list(record));
        }
        out.push_str("    ],\n");
    }
    out.push_str("];\n");
    out
}

fn render_param_list(record: &ParamListRecord) -> String {
    let params = record
        .params
        .iter()
        .map(|kind| format!("InstrParamType::{kind:?}"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::new();
    out.push_str("        InstrParamList {\n");
    out.push_str(&format!("            opcode: {},\n", record.opcode));
    out.push_str(&format!("            flags: {},\n", record.flags));
    out.push_str(&format!("            params: &[{params}],\n"));
    if record.type_variants.is_empty() {
        out.push_str("            opcode_variants: &[],\n");
    } else {
        out.push_str("            opcode_variants: &[\n");
        for variant in &record.type_variants {
            out.push_str(&format!(
                "                TypeVariant {{ ty: {}, opcode: {} }},\n",
                variant.ty.symbol(),
                variant.opcode
            ));
        }
        out.push_str("            ],\n");
    }
    out.push_str("        },\n");
    out
}
