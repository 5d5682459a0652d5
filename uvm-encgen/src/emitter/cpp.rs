//! C++ header back end
//!
//! Layout consumed by the assembler (`asm.hpp` declares the types):
//!
//! ```text
//! const std::map<std::string, uint8_t> ASM_REGISTERS { {"r0", 0x5}, ... };
//! namespace Asm {
//! const std::map<std::string, uint8_t> INSTR_NAMES { {"nop", 0}, ... };
//! const std::array<std::vector<InstrParamList>, N> INSTR_ASM_DEFS { ... };
//! } // namespace Asm
//! ```

use super::GENERATED_NOTICE;
use crate::tables::{EncodingTables, ParamListRecord};

const INDENT: &str = "    ";

const BANNER: &str = "\
// ======================================================================== //
// UVM assembler encoding tables
// ======================================================================== //

#pragma once
#include \"asm.hpp\"
#include <array>
#include <cstdint>
#include <map>
#include <string>
#include <vector>
";

fn line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(text);
    out.push('\n');
}

/// Render the tables as a C++ header
pub fn render(tables: &EncodingTables, namespace: &str) -> String {
    let mut out = String::with_capacity(64 * 1024);

    out.push_str(BANNER);
    out.push_str(&format!("\n/*\n{INDENT}{GENERATED_NOTICE}\n*/\n\n"));

    line(&mut out, 0, "const std::map<std::string, uint8_t> ASM_REGISTERS {");
    for reg in tables.registers() {
        line(&mut out, 1, &format!("{{\"{}\", {:#X}}},", reg.name, reg.code));
    }
    line(&mut out, 0, "};");
    out.push('\n');

    line(&mut out, 0, &format!("namespace {namespace} {{"));

    line(&mut out, 0, "const std::map<std::string, uint8_t> INSTR_NAMES {");
    for entry in tables.instruction_index() {
        line(&mut out, 1, &format!("{{\"{}\", {}}},", entry.name, entry.index));
    }
    line(&mut out, 0, "};");
    out.push('\n');

    line(
        &mut out,
        0,
        &format!(
            "const std::array<std::vector<InstrParamList>, {}> INSTR_ASM_DEFS {{",
            tables.len()
        ),
    );
    for param_lists in tables.instructions() {
        line(&mut out, 1, "std::vector<InstrParamList>{");
        for record in param_lists {
            render_param_list(&mut out, record);
        }
        line(&mut out, 1, "},");
    }
    line(&mut out, 0, "};");
    out.push('\n');

    line(&mut out, 0, &format!("}} // namespace {namespace}"));
    out
}

fn render_param_list(out: &mut String, record: &ParamListRecord) {
    line(out, 2, "InstrParamList{");
    line(out, 3, &format!("{},", record.opcode));
    line(out, 3, &format!("{},", record.flags));

    line(out, 3, "{");
    if !record.params.is_empty() {
        let params: Vec<String> = record
            .params
            .iter()
            .map(|kind| format!("InstrParamType::{},", kind.symbol()))
            .collect();
        line(out, 4, &params.join(" "));
    }
    line(out, 3, "},");

    line(out, 3, "{");
    for variant in &record.type_variants {
        line(out, 4, &format!("{{{}, {}}},", variant.ty.symbol(), variant.opcode));
    }
    line(out, 3, "},");

    line(out, 2, "},");
}
