use crate::error::{DasmError, Result};
use crate::listing::{ListingWriter, OutputFormat};
use crate::memory::MemoryImage;
use crate::navigator::{Navigator, NavigatorOptions};
use crate::symbols::SymbolTable;
use log::info;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Loads a cartridge, classifies it and writes `.asm` / `.lst` output
pub struct Disassembler {
    image: MemoryImage,
    navigator: Navigator,
    symbols: SymbolTable,
}

impl Default for Disassembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Disassembler {
    pub fn new() -> Self {
        Self::with_options(NavigatorOptions::default())
    }

    pub fn with_options(options: NavigatorOptions) -> Self {
        Disassembler {
            image: MemoryImage::new(),
            navigator: Navigator::with_options(options),
            symbols: SymbolTable::new(),
        }
    }

    /// Read a ROM file and load it at `start`
    pub fn load_rom(&mut self, path: &Path, start: u16) -> Result<()> {
        let bytes = fs::read(path).map_err(|e| DasmError::io(path, e))?;
        info!("Read {} bytes from {}", bytes.len(), path.display());
        self.load_bytes(&bytes, start)
    }

    /// Load a ROM image at `start` and label its header
    pub fn load_bytes(&mut self, bytes: &[u8], start: u16) -> Result<()> {
        self.image.load(bytes, start)?;
        self.symbols
            .add_symbol(start, "signtr", "cartridge signature = 'AB'");
        self.symbols
            .add_symbol(start.wrapping_add(2), "staddr", "start address value");
        Ok(())
    }

    /// Override the execution address read from the header
    pub fn set_exec_address(&mut self, addr: u16) {
        self.image.set_exec_address(addr);
    }

    /// Load symbols from a `.def` file
    pub fn load_def(&mut self, path: &Path) -> Result<()> {
        self.symbols.load_def(path)
    }

    pub fn add_entry_point(&mut self, addr: u16) {
        self.navigator.add_entry_point(addr);
    }

    /// Classify the loaded image and label the execution address
    pub fn navigate(&mut self) -> Result<()> {
        self.navigator.navigate(&self.image)?;
        self.symbols.add_symbol(
            self.image.exec_address(),
            "start",
            "execution starting point",
        );
        Ok(())
    }

    /// Render the image in the given format
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        ListingWriter::new(&self.image, &self.navigator, &self.symbols, format).render()
    }

    /// Write output to `path`, the extension choosing `.asm` or `.lst`
    pub fn generate(&self, path: &Path) -> Result<()> {
        let format = OutputFormat::from_path(path)?;
        let text = self.render(format)?;
        fs::write(path, text).map_err(|e| DasmError::io(path, e))?;
        info!("Wrote {:?} output to {}", format, path.display());
        Ok(())
    }

    pub fn write_asm_source<W: Write>(&self, out: &mut W) -> Result<()> {
        self.write_output(out, OutputFormat::Source)
    }

    pub fn write_asm_listing<W: Write>(&self, out: &mut W) -> Result<()> {
        self.write_output(out, OutputFormat::Listing)
    }

    fn write_output<W: Write>(&self, out: &mut W, format: OutputFormat) -> Result<()> {
        let text = self.render(format)?;
        out.write_all(text.as_bytes())
            .map_err(|e| DasmError::io("<output>", e))
    }

    pub fn start_address(&self) -> u16 {
        self.image.start_address()
    }

    pub fn end_address(&self) -> u16 {
        self.image.end_address()
    }

    pub fn exec_address(&self) -> u16 {
        self.image.exec_address()
    }

    pub fn image(&self) -> &MemoryImage {
        &self.image
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }
}
