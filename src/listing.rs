//! Assembler source and listing output
//!
//! Both formats walk the loaded range in address order and print each
//! classified item: runs of `db` bytes, quoted strings, `dw` words with
//! their targets resolved to symbols, and decoded instructions. The
//! listing format adds the address and raw instruction bytes in front.

use crate::error::{DasmError, Result};
use crate::instruction::TextFormatter;
use crate::memory::MemoryImage;
use crate::navigator::{Classification, Navigator};
use crate::symbols::SymbolTable;
use std::fmt::Write;
use std::path::Path;

/// Bytes per `db` line
const BYTES_PER_LINE: usize = 8;

/// Slots reserved for instruction bytes in the listing format
const BYTE_COLUMNS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `.asm`: plain source that can be fed back to an assembler
    Source,
    /// `.lst`: source annotated with addresses and instruction bytes
    Listing,
}

impl OutputFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<OutputFormat> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("asm") => Ok(OutputFormat::Source),
            Some("lst") => Ok(OutputFormat::Listing),
            Some(other) => Err(DasmError::InvalidOutputFormat(format!(
                "unknown extension '.{}' on {}",
                other,
                path.display()
            ))),
            None => Err(DasmError::InvalidOutputFormat(format!(
                "{} has no extension",
                path.display()
            ))),
        }
    }
}

pub struct ListingWriter<'a> {
    image: &'a MemoryImage,
    navigator: &'a Navigator,
    symbols: &'a SymbolTable,
    formatter: TextFormatter<'a>,
    format: OutputFormat,
}

impl<'a> ListingWriter<'a> {
    pub fn new(
        image: &'a MemoryImage,
        navigator: &'a Navigator,
        symbols: &'a SymbolTable,
        format: OutputFormat,
    ) -> Self {
        ListingWriter {
            image,
            navigator,
            symbols,
            formatter: TextFormatter::new(image, symbols, navigator),
            format,
        }
    }

    /// Render the whole loaded range
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        let end = self.image.end_address() as u32;
        let mut pc = self.image.start_address() as u32;

        let _ = writeln!(out, "\t\t\torg\t{:04x}h", self.image.start_address());
        self.write_equates(&mut out);

        while pc <= end {
            let addr = pc as u16;
            self.write_label(&mut out, addr);

            match self.format {
                OutputFormat::Source => out.push_str("\t\t\t"),
                OutputFormat::Listing => {
                    let _ = write!(out, "{:04x}\t", addr);
                }
            }

            let size = match self.navigator.classification(addr) {
                Classification::Code => self.write_code(&mut out, addr)?,
                Classification::Word => self.write_word(&mut out, addr)?,
                Classification::String => self.write_string(&mut out, addr, end),
                Classification::Byte | Classification::Unknown => {
                    self.write_bytes(&mut out, addr, end)
                }
            };

            out.push('\n');
            pc += size as u32;
        }

        Ok(out)
    }

    fn has_label(&self, addr: u16) -> bool {
        self.symbols.has_symbol(addr) || self.navigator.is_entry_point(addr)
    }

    fn write_label(&self, out: &mut String, addr: u16) {
        if let Some(symbol) = self.symbols.get(addr) {
            let _ = write!(out, "\n{}:", symbol.label);
            if !symbol.comment.is_empty() {
                let _ = write!(out, "\t\t\t\t\t\t; {}", symbol.comment);
            }
            out.push('\n');
        } else if self.navigator.is_entry_point(addr) {
            let _ = writeln!(out, "\nL{:04x}:", addr);
        }
    }

    /// `Lxxxx equ xxxxh` for entry points outside the image, which get no
    /// label line of their own
    fn write_equates(&self, out: &mut String) {
        let external: Vec<u16> = self
            .navigator
            .entry_points()
            .filter(|&addr| !self.image.contains(addr) && !self.symbols.has_symbol(addr))
            .collect();
        if external.is_empty() {
            return;
        }

        out.push('\n');
        for addr in external {
            let _ = writeln!(out, "L{:04x}\tequ\t{:04x}h", addr, addr);
        }
    }

    /// Data byte run, stopping at a label or after a full line
    fn write_bytes(&self, out: &mut String, addr: u16, end: u32) -> usize {
        if self.format == OutputFormat::Listing {
            out.push_str("\t\t");
        }
        let _ = write!(out, "db\t{:02x}h", self.image.read_byte(addr));

        let mut count = 1;
        let mut pc = addr as u32 + 1;
        while count < BYTES_PER_LINE && pc <= end && self.is_byte_run(pc as u16) {
            let _ = write!(out, ",{:02x}h", self.image.read_byte(pc as u16));
            count += 1;
            pc += 1;
        }
        count
    }

    fn is_byte_run(&self, addr: u16) -> bool {
        matches!(
            self.navigator.classification(addr),
            Classification::Byte | Classification::Unknown
        ) && !self.has_label(addr)
    }

    /// Quoted string run; bytes that cannot sit inside the quotes are
    /// written as hex items, e.g. `db "AB",80h,"C"`
    fn write_string(&self, out: &mut String, addr: u16, end: u32) -> usize {
        if self.format == OutputFormat::Listing {
            out.push_str("\t\t");
        }
        out.push_str("db\t");

        let mut quoted = false;
        let mut pc = addr as u32;
        while pc <= end
            && self.navigator.is_string(pc as u16)
            && (pc == addr as u32 || !self.has_label(pc as u16))
        {
            let byte = self.image.read_byte(pc as u16);
            let printable = (byte == b' ' || byte.is_ascii_graphic()) && byte != b'"';

            if printable && !quoted {
                if pc != addr as u32 {
                    out.push(',');
                }
                out.push('"');
                quoted = true;
            } else if !printable {
                if quoted {
                    out.push('"');
                    quoted = false;
                }
                if pc != addr as u32 {
                    out.push(',');
                }
            }

            if printable {
                out.push(byte as char);
            } else {
                let _ = write!(out, "{:02x}h", byte);
            }
            pc += 1;
        }

        if quoted {
            out.push('"');
        }
        (pc - addr as u32) as usize
    }

    fn write_word(&self, out: &mut String, addr: u16) -> Result<usize> {
        let value = self.image.read_word(addr)?;

        if self.format == OutputFormat::Listing {
            let bytes = self.image.bytes(addr, 2);
            let _ = write!(out, "{}\t\t", hex_bytes(bytes));
        }
        let _ = write!(out, "dw\t{}", self.formatter.resolve_symbol(value));
        Ok(2)
    }

    fn write_code(&self, out: &mut String, addr: u16) -> Result<usize> {
        let instruction = self.formatter.decode(addr)?;

        if self.format == OutputFormat::Listing {
            let length = instruction.length as usize;
            for byte in self.image.bytes(addr, length) {
                let _ = write!(out, "{:02x} ", byte);
            }
            for _ in length..BYTE_COLUMNS {
                out.push_str("   ");
            }
            out.push('\t');
        }
        out.push_str(&instruction.text);
        Ok(instruction.length as usize)
    }
}

fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
