use crate::error::{DasmError, Result};
use log::debug;

/// Size of the Z80 address space
pub const ADDRESS_SPACE: usize = 0x10000;

/// Highest address a load may write to. 0xffff stays unreadable as the
/// first byte of a word.
pub const MAX_ADDRESS: u16 = 0xfffe;

/// A cartridge image mapped into the 64 KiB Z80 address space
///
/// Bytes outside the loaded range read as zero. Once loaded the image is
/// read-only except for the execution address, which callers may override.
pub struct MemoryImage {
    mem: Box<[u8; ADDRESS_SPACE]>,
    start_address: u16,
    end_address: u16,
    exec_address: u16,
}

impl Default for MemoryImage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryImage {
    /// Create an empty, zero-filled image
    pub fn new() -> Self {
        MemoryImage {
            mem: Box::new([0u8; ADDRESS_SPACE]),
            start_address: 0,
            end_address: 0,
            exec_address: 0,
        }
    }

    /// Build an image from raw bytes loaded at `start`
    pub fn from_bytes(bytes: &[u8], start: u16) -> Result<Self> {
        let mut image = Self::new();
        image.load(bytes, start)?;
        Ok(image)
    }

    pub fn start_address(&self) -> u16 {
        self.start_address
    }

    pub fn end_address(&self) -> u16 {
        self.end_address
    }

    pub fn exec_address(&self) -> u16 {
        self.exec_address
    }

    /// Override the execution address taken from the cartridge header
    pub fn set_exec_address(&mut self, addr: u16) {
        self.exec_address = addr;
    }

    /// True if `addr` lies inside the loaded range
    pub fn contains(&self, addr: u16) -> bool {
        addr >= self.start_address && addr <= self.end_address
    }

    pub fn read_byte(&self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    /// Little-endian word read. Fails at 0xffff, which has no second byte.
    pub fn read_word(&self, addr: u16) -> Result<u16> {
        if addr == 0xffff {
            return Err(DasmError::MemoryOverflow { addr });
        }

        let lo = self.mem[addr as usize] as u16;
        let hi = self.mem[addr as usize + 1] as u16;
        Ok(lo | (hi << 8))
    }

    /// Resolve the signed displacement byte at `addr` into an absolute target.
    ///
    /// The displacement is relative to the address after the displacement
    /// byte, which is where the Z80 PC points once a `jr`/`djnz` is fetched.
    pub fn read_relative_target(&self, addr: u16) -> u16 {
        let displacement = self.mem[addr as usize] as i8;
        addr.wrapping_add(1).wrapping_add(displacement as u16)
    }

    /// Copy `bytes` into the image at `start`.
    ///
    /// The execution address defaults to the word stored two bytes after
    /// `start` (the MSX cartridge INIT vector).
    pub fn load(&mut self, bytes: &[u8], start: u16) -> Result<()> {
        if bytes.is_empty() {
            return Err(DasmError::EmptyImage);
        }

        if start as usize + bytes.len() > MAX_ADDRESS as usize + 1 {
            return Err(DasmError::LoadOverflow {
                start,
                len: bytes.len(),
            });
        }

        let begin = start as usize;
        self.mem[begin..begin + bytes.len()].copy_from_slice(bytes);

        self.start_address = start;
        self.end_address = (begin + bytes.len() - 1) as u16;
        self.exec_address = self.read_word(start.wrapping_add(2))?;

        debug!(
            "Loaded {} bytes: start={:04x} end={:04x} exec={:04x}",
            bytes.len(),
            self.start_address,
            self.end_address,
            self.exec_address
        );
        Ok(())
    }

    /// Slice of the raw bytes in `[addr, addr + len)`, clipped to the address space
    pub fn bytes(&self, addr: u16, len: usize) -> &[u8] {
        let begin = addr as usize;
        let end = (begin + len).min(ADDRESS_SPACE);
        &self.mem[begin..end]
    }
}
