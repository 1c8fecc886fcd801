//! Bank-switch trampoline heuristic
//!
//! Some Konami cartridges route calls through a small dispatcher
//! (`swtcha`) that doubles the selector in A, pops its own return address
//! and jumps through the word table placed right after the `call`:
//!
//! ```text
//!     add  a,a        ; 87
//!     pop  hl         ; e1
//!     call nn         ; cd nn nn
//!     jp   (hl)       ; e9
//! ```
//!
//! Plain control-flow analysis sees neither the table nor its targets. This
//! module is not general Z80 semantics: the navigator only consults it when
//! the heuristic is enabled.

use crate::error::Result;
use crate::memory::MemoryImage;
use log::debug;

/// Dispatcher byte pattern. `None` matches any byte.
pub const TRAMPOLINE_PATTERN: [Option<u8>; 6] =
    [Some(0x87), Some(0xe1), Some(0xcd), None, None, Some(0xe9)];

/// One slot of a dispatch table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSlot {
    /// Address of the 2-byte slot
    pub address: u16,
    /// Routine the slot points to
    pub target: u16,
}

/// A detected dispatcher routine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trampoline {
    pub address: u16,
}

impl Trampoline {
    /// Find the first occurrence of the dispatcher in the loaded range
    pub fn detect(image: &MemoryImage) -> Option<Trampoline> {
        let start = image.start_address() as u32;
        let last = (image.end_address() as u32).checked_sub(TRAMPOLINE_PATTERN.len() as u32 - 1)?;

        (start..=last)
            .map(|addr| addr as u16)
            .find(|&addr| Self::matches_at(image, addr))
            .map(|address| {
                debug!("Bank-switch trampoline found at {:04x}", address);
                Trampoline { address }
            })
    }

    fn matches_at(image: &MemoryImage, addr: u16) -> bool {
        TRAMPOLINE_PATTERN
            .iter()
            .zip(0u16..)
            .all(|(expected, offset)| match expected {
                Some(byte) => image.read_byte(addr.wrapping_add(offset)) == *byte,
                None => true,
            })
    }

    /// True if a `call` to `target` goes through this dispatcher
    pub fn is_called_by(&self, target: u16) -> bool {
        target == self.address
    }

    /// Read the jump table that follows `call trampoline` at `call_pc`.
    ///
    /// The first slot holds the address just past the table (the first
    /// routine is laid out right after it), so it doubles as the table end.
    pub fn follow_table(&self, image: &MemoryImage, call_pc: u16) -> Result<Vec<TableSlot>> {
        let first = call_pc.wrapping_add(3);
        let table_end = image.read_word(first)? as u32;

        let mut slots = Vec::new();
        let mut slot = first as u32;
        while slot < table_end {
            let address = slot as u16;
            slots.push(TableSlot {
                address,
                target: image.read_word(address)?,
            });
            slot += 2;
        }

        debug!(
            "Jump table after call at {:04x}: {} slots, {:04x}-{:04x}",
            call_pc,
            slots.len(),
            first,
            table_end
        );
        Ok(slots)
    }
}
