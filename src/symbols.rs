use crate::error::{DasmError, Result};
use indexmap::IndexMap;
use log::debug;
use std::fs;
use std::path::Path;

/// Column where the label starts in a definition line
const LABEL_COLUMN: usize = 5;
/// Maximum label width in a definition line
const LABEL_WIDTH: usize = 6;
/// Column where the comment starts in a definition line
const COMMENT_COLUMN: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub address: u16,
    pub label: String,
    pub comment: String,
}

/// Labels and comments attached to addresses
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: IndexMap<u16, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            symbols: IndexMap::new(),
        }
    }

    pub fn has_symbol(&self, addr: u16) -> bool {
        self.symbols.contains_key(&addr)
    }

    /// Label at `addr`, or an empty string
    pub fn get_label(&self, addr: u16) -> &str {
        self.symbols
            .get(&addr)
            .map(|symbol| symbol.label.as_str())
            .unwrap_or("")
    }

    /// Comment at `addr`, or an empty string
    pub fn get_comment(&self, addr: u16) -> &str {
        self.symbols
            .get(&addr)
            .map(|symbol| symbol.comment.as_str())
            .unwrap_or("")
    }

    pub fn get(&self, addr: u16) -> Option<&Symbol> {
        self.symbols.get(&addr)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Add a symbol unless `addr` already has one. An empty label becomes `lxxxx`.
    pub fn add_symbol(&mut self, addr: u16, label: &str, comment: &str) {
        self.symbols
            .entry(addr)
            .or_insert_with(|| Self::make_symbol(addr, label, comment));
    }

    /// Add or replace the symbol at `addr`
    pub fn set_symbol(&mut self, addr: u16, label: &str, comment: &str) {
        self.symbols
            .insert(addr, Self::make_symbol(addr, label, comment));
    }

    fn make_symbol(addr: u16, label: &str, comment: &str) -> Symbol {
        let label = if label.is_empty() {
            format!("l{:04x}", addr)
        } else {
            label.to_string()
        };

        Symbol {
            address: addr,
            label,
            comment: comment.to_string(),
        }
    }

    /// Load a `.def` file, replacing symbols already present
    pub fn load_def(&mut self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path).map_err(|e| DasmError::io(path, e))?;
        let count = self.parse_def(&text, path)?;
        debug!("Loaded {} definitions from {}", count, path.display());
        Ok(())
    }

    /// Parse definition lines, returning how many symbols were read.
    ///
    /// Each line holds a 4-digit hex address in columns 0-3, a label of up
    /// to 6 characters from column 5 and a comment from column 12. Blank
    /// lines and lines starting with `;` are ignored.
    pub fn parse_def(&mut self, text: &str, path: &Path) -> Result<usize> {
        let mut count = 0;

        for (index, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim_end();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            let malformed = |reason: &str| DasmError::MalformedDefinition {
                path: path.to_path_buf(),
                line: index + 1,
                reason: reason.to_string(),
            };

            let addr_text = line
                .get(..4)
                .ok_or_else(|| malformed("line shorter than an address"))?;
            let addr = u16::from_str_radix(addr_text, 16)
                .map_err(|_| malformed(&format!("'{}' is not a hex address", addr_text)))?;

            let label = line
                .get(LABEL_COLUMN..line.len().min(LABEL_COLUMN + LABEL_WIDTH))
                .unwrap_or("")
                .trim();
            let comment = line.get(COMMENT_COLUMN..).unwrap_or("").trim();

            self.set_symbol(addr, label, comment);
            count += 1;
        }

        Ok(count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }
}
