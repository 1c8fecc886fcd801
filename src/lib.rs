#[macro_use]
extern crate lazy_static;

pub mod config;
pub mod disassembler;
pub mod error;
pub mod instruction;
pub mod listing;
pub mod memory;
pub mod navigator;
pub mod opcode_tables;
pub mod symbols;
pub mod template;
pub mod trampoline;

mod instruction_tests;

pub use disassembler::Disassembler;
pub use error::{DasmError, Result};

/*
MSX cartridge layout in page 1 (4000h-7FFFh)
        4000	"AB" signature
        4002	INIT   execution address
        4004	STATEMENT
        4006	DEVICE
        4008	TEXT   BASIC program
        400a	reserved (6 bytes)
        4010	usual start of code
*/
