// Disassembler Error Handling

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DasmError {
    // Memory image errors
    #[error("Memory overflow: no word can be read at {addr:#06x}")]
    MemoryOverflow { addr: u16 },
    #[error("Memory overflow: {len} bytes loaded at {start:#06x} would pass 0xfffe")]
    LoadOverflow { start: u16, len: usize },
    #[error("ROM image is empty")]
    EmptyImage,

    // File errors
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed definition in {} line {line}: {reason}", .path.display())]
    MalformedDefinition {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("Invalid output file format: {0}")]
    InvalidOutputFormat(String),

    // Configuration errors
    #[error("Invalid hex address '{0}'")]
    InvalidAddress(String),
    #[error("Invalid configuration in {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
    #[error("No ROM file given")]
    MissingRom,
}

impl DasmError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DasmError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DasmError>;

/// Parse a hex address as written on the command line or in config files.
///
/// Accepts `4000`, `0x4000` and the assembler form `4000h`.
pub fn parse_hex_addr(text: &str) -> Result<u16> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .or_else(|| trimmed.strip_suffix('h'))
        .or_else(|| trimmed.strip_suffix('H'))
        .unwrap_or(trimmed);

    u16::from_str_radix(digits, 16).map_err(|_| DasmError::InvalidAddress(text.to_string()))
}
