//! Tests for malformed instruction-set descriptions
//!
//! Every shape problem must surface as a Structural error before any table
//! is built.

use uvm_isa::{IsaError, Schema};

fn assert_structural(json: &str) -> String {
    match Schema::from_json_str(json) {
        Err(IsaError::Structural { message }) => message,
        Err(other) => panic!("Expected Structural error, got {other:?}"),
        Ok(_) => panic!("Expected Structural error, got a schema"),
    }
}

// ============================================================================
// Top-level shape
// ============================================================================

#[test]
fn test_not_json() {
    assert_structural("registers: []");
}

#[test]
fn test_missing_registers() {
    let message = assert_structural(r#"{ "instructions": [] }"#);
    assert!(message.contains("registers"), "{message}");
}

#[test]
fn test_missing_instructions() {
    let message = assert_structural(r#"{ "registers": [] }"#);
    assert!(message.contains("instructions"), "{message}");
}

#[test]
fn test_empty_description_is_valid() {
    let schema = Schema::from_json_str(r#"{ "registers": [], "instructions": [] }"#).unwrap();
    assert!(schema.registers().is_empty());
    assert!(schema.instructions().is_empty());
}

// ============================================================================
// Registers
// ============================================================================

#[test]
fn test_register_missing_bytecode() {
    assert_structural(r#"{ "registers": [ { "name": "r0" } ], "instructions": [] }"#);
}

#[test]
fn test_register_negative_bytecode() {
    assert_structural(r#"{ "registers": [ { "name": "r0", "bytecode": -1 } ], "instructions": [] }"#);
}

#[test]
fn test_register_bytecode_not_numeric() {
    let message = assert_structural(
        r#"{ "registers": [ { "name": "r0", "bytecode": "zero" } ], "instructions": [] }"#,
    );
    assert!(message.contains("not an integer"), "{message}");
}

#[test]
fn test_register_bytecode_too_large() {
    assert_structural(r#"{ "registers": [ { "name": "r0", "bytecode": 256 } ], "instructions": [] }"#);
}

// ============================================================================
// Instructions and param lists
// ============================================================================

#[test]
fn test_missing_param_list() {
    let message = assert_structural(
        r#"{ "registers": [], "instructions": [ { "name": "nop" } ] }"#,
    );
    assert!(message.contains("paramList"), "{message}");
}

#[test]
fn test_params_not_a_sequence() {
    assert_structural(
        r#"{ "registers": [], "instructions": [ { "name": "nop", "paramList": [
            { "opcode": 0, "encodeType": false, "params": "iReg", "typeVariants": [] }
        ] } ] }"#,
    );
}

#[test]
fn test_missing_encode_type() {
    let message = assert_structural(
        r#"{ "registers": [], "instructions": [ { "name": "nop", "paramList": [
            { "opcode": 0, "params": [], "typeVariants": [] }
        ] } ] }"#,
    );
    assert!(message.contains("encodeType"), "{message}");
}

#[test]
fn test_encode_type_not_bool() {
    assert_structural(
        r#"{ "registers": [], "instructions": [ { "name": "nop", "paramList": [
            { "opcode": 0, "encodeType": "yes", "params": [], "typeVariants": [] }
        ] } ] }"#,
    );
}

#[test]
fn test_missing_type_variants() {
    assert_structural(
        r#"{ "registers": [], "instructions": [ { "name": "nop", "paramList": [
            { "opcode": 0, "encodeType": false, "params": [] }
        ] } ] }"#,
    );
}

#[test]
fn test_type_variant_missing_type() {
    assert_structural(
        r#"{ "registers": [], "instructions": [ { "name": "push", "paramList": [
            { "opcode": 0, "encodeType": false, "params": [], "typeVariants": [ { "opcode": 1 } ] }
        ] } ] }"#,
    );
}

#[test]
fn test_opcode_wrong_shape() {
    assert_structural(
        r#"{ "registers": [], "instructions": [ { "name": "nop", "paramList": [
            { "opcode": [1], "encodeType": false, "params": [], "typeVariants": [] }
        ] } ] }"#,
    );
}

#[test]
fn test_type_variant_opcode_out_of_range() {
    let message = assert_structural(
        r#"{ "registers": [], "instructions": [ { "name": "push", "paramList": [
            { "opcode": 0, "encodeType": false, "params": [], "typeVariants": [
                { "type": "i8", "opcode": 1000 }
            ] }
        ] } ] }"#,
    );
    assert!(message.contains("typeVariants[0].opcode"), "{message}");
}

#[test]
fn test_symbolic_opcode_is_accepted() {
    let schema = Schema::from_json_str(
        r#"{ "registers": [], "instructions": [ { "name": "nop", "paramList": [
            { "opcode": "OP_NOP", "encodeType": false, "params": [], "typeVariants": [] }
        ] } ] }"#,
    )
    .unwrap();
    assert!(schema.instructions()[0].param_lists[0].opcode.is_symbol());
}

// ============================================================================
// Names
// ============================================================================

#[test]
fn test_register_name_with_quote() {
    let message = assert_structural(
        r#"{ "registers": [ { "name": "r\"0", "bytecode": 0 } ], "instructions": [] }"#,
    );
    assert!(message.contains("registers[0].name"), "{message}");
}

#[test]
fn test_instruction_name_with_backslash() {
    let message = assert_structural(
        r#"{ "registers": [], "instructions": [ { "name": "a\\", "paramList": [] } ] }"#,
    );
    assert!(message.contains("instructions[0].name"), "{message}");
}

#[test]
fn test_name_with_space_or_control() {
    assert_structural(r#"{ "registers": [ { "name": "r 0", "bytecode": 0 } ], "instructions": [] }"#);
    assert_structural(r#"{ "registers": [], "instructions": [ { "name": "nop\n", "paramList": [] } ] }"#);
}

#[test]
fn test_empty_name() {
    let message = assert_structural(r#"{ "registers": [ { "name": "", "bytecode": 0 } ], "instructions": [] }"#);
    assert!(message.contains("empty"), "{message}");
}
