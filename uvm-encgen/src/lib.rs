//! UVM Encoding Table Generator
//!
//! Turn the JSON instruction-set description into the lookup tables the
//! assembler's encoder indexes at runtime.
//!
//! ## Example
//!
//! ```rust
//! use uvm_encgen::{build, emit, BuildOptions, EmitOptions, Target};
//! use uvm_isa::Schema;
//!
//! let schema = Schema::from_json_str(r#"{
//!     "registers": [ { "name": "r0", "bytecode": 0 } ],
//!     "instructions": [
//!         { "name": "add", "paramList": [
//!             { "opcode": 1, "encodeType": false, "params": ["iReg", "iReg"], "typeVariants": [] }
//!         ] }
//!     ]
//! }"#).unwrap();
//!
//! let tables = build(&schema, &BuildOptions::default()).unwrap();
//! assert_eq!(tables.index_of("add"), Some(0));
//!
//! let header = emit(&tables, &EmitOptions::new(Target::Cpp)).unwrap();
//! assert!(String::from_utf8(header).unwrap().contains("INSTR_ASM_DEFS"));
//! ```

pub mod error;
pub mod config;
pub mod tables;
pub mod builder;
pub mod resolve;
pub mod emitter;
pub mod output;
pub mod generator;

pub use error::{GenError, NameKind, Result};
pub use config::{ConfigError, GenConfig};
pub use tables::{EncodingTables, IndexEntry, ParamListRecord, RegisterEntry, VariantEntry};
pub use builder::{build, BuildOptions, VariantPolicy};
pub use resolve::SignatureTree;
pub use emitter::{emit, EmitOptions, Target};
pub use generator::{generate, generate_from_str, Outcome};
