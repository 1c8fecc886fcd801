use crate::error::Result;
use crate::instruction::{control_flow, decode_length, Flow};
use crate::memory::{MemoryImage, ADDRESS_SPACE};
use crate::trampoline::Trampoline;
use bitvec::prelude::*;
use log::{debug, info};
use std::collections::VecDeque;

/// What a byte of the image was found to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Unknown,
    /// Plain data byte (`db`)
    Byte,
    /// Part of a 16-bit data word (`dw`)
    Word,
    /// Part of a text string
    String,
    /// Part of an instruction
    Code,
}

#[derive(Debug, Clone, Copy)]
pub struct NavigatorOptions {
    /// Follow Konami bank-switch dispatch tables
    pub trampoline_heuristic: bool,
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        NavigatorOptions {
            trampoline_heuristic: true,
        }
    }
}

/// Recursive-descent code discovery over a cartridge image
///
/// Branches are explored from a FIFO worklist of entry points rather than
/// by recursion. An address is decoded only while it is still `Unknown`,
/// so every address is explored at most once and navigation ends after at
/// most 64K decode steps whatever the image contains.
pub struct Navigator {
    /// Classification of every address
    map: Vec<Classification>,
    /// Known instruction stream starts
    entry_points: BitVec,
    entry_point_count: usize,
    /// Entry points still to explore
    worklist: VecDeque<u16>,
    /// Detected bank-switch dispatcher
    trampoline: Option<Trampoline>,
    options: NavigatorOptions,
    /// Branches actually decoded during the last run
    branches_explored: usize,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::with_options(NavigatorOptions::default())
    }

    pub fn with_options(options: NavigatorOptions) -> Self {
        Navigator {
            map: vec![Classification::Unknown; ADDRESS_SPACE],
            entry_points: bitvec![0; ADDRESS_SPACE],
            entry_point_count: 0,
            worklist: VecDeque::new(),
            trampoline: None,
            options,
            branches_explored: 0,
        }
    }

    pub fn options(&self) -> NavigatorOptions {
        self.options
    }

    pub fn classification(&self, addr: u16) -> Classification {
        self.map[addr as usize]
    }

    pub fn is_byte(&self, addr: u16) -> bool {
        self.classification(addr) == Classification::Byte
    }

    pub fn is_word(&self, addr: u16) -> bool {
        self.classification(addr) == Classification::Word
    }

    pub fn is_string(&self, addr: u16) -> bool {
        self.classification(addr) == Classification::String
    }

    pub fn is_code(&self, addr: u16) -> bool {
        self.classification(addr) == Classification::Code
    }

    pub fn is_entry_point(&self, addr: u16) -> bool {
        self.entry_points[addr as usize]
    }

    /// Known entry points in ascending order
    pub fn entry_points(&self) -> impl Iterator<Item = u16> + '_ {
        self.entry_points.iter_ones().map(|addr| addr as u16)
    }

    pub fn entry_point_count(&self) -> usize {
        self.entry_point_count
    }

    /// Entry points queued but not explored yet
    pub fn pending(&self) -> usize {
        self.worklist.len()
    }

    pub fn trampoline(&self) -> Option<Trampoline> {
        self.trampoline
    }

    pub fn branches_explored(&self) -> usize {
        self.branches_explored
    }

    /// Record `addr` as an instruction stream start and queue it for exploration
    pub fn add_entry_point(&mut self, addr: u16) {
        self.worklist.push_back(addr);
        if !self.entry_points[addr as usize] {
            self.entry_points.set(addr as usize, true);
            self.entry_point_count += 1;
        }
    }

    fn set_status(&mut self, addr: u16, size: usize, status: Classification) {
        let begin = addr as usize;
        let end = (begin + size).min(ADDRESS_SPACE);
        self.map[begin..end].fill(status);
    }

    /// Classify the whole loaded range of `image`.
    ///
    /// Entry points added beforehand are explored first, then the cartridge
    /// execution address and, if found, the bank-switch dispatcher.
    pub fn navigate(&mut self, image: &MemoryImage) -> Result<()> {
        self.map.fill(Classification::Unknown);
        self.trampoline = None;
        self.branches_explored = 0;

        let start = image.start_address();
        let end = image.end_address();

        // cartridge header: "AB" signature and INIT vector
        self.set_status(start, 2, Classification::String);
        self.set_status(start.wrapping_add(2), 2, Classification::Word);

        self.add_entry_point(image.exec_address());

        if self.options.trampoline_heuristic {
            self.trampoline = Trampoline::detect(image);
            if let Some(trampoline) = self.trampoline {
                self.add_entry_point(trampoline.address);
            }
        }

        while let Some(pc) = self.worklist.pop_front() {
            if image.contains(pc) {
                self.explore_branch(image, pc)?;
            } else {
                debug!("Entry point {:04x} outside {:04x}-{:04x}", pc, start, end);
            }
        }

        // whatever was never reached is data
        for addr in start..=end {
            if self.map[addr as usize] == Classification::Unknown {
                self.map[addr as usize] = Classification::Byte;
            }
        }

        info!(
            "Navigation done: {} branches, {} entry points",
            self.branches_explored, self.entry_point_count
        );
        Ok(())
    }

    /// Decode one instruction stream from `pc` until it ends, leaves the
    /// loaded range or runs into an address that is already classified.
    pub fn explore_branch(&mut self, image: &MemoryImage, pc: u16) -> Result<()> {
        if self.map[pc as usize] != Classification::Unknown {
            return Ok(());
        }

        debug!("Exploring branch at {:04x}", pc);
        self.branches_explored += 1;

        let end = image.end_address() as u32;
        let mut pc = pc as u32;

        while pc <= end && self.map[pc as usize] == Classification::Unknown {
            let addr = pc as u16;
            let size = decode_length(image, addr);
            self.set_status(addr, size as usize, Classification::Code);

            let flow = control_flow(image, addr)?;
            match flow {
                Flow::Next | Flow::Stop => {}
                Flow::Branch(target) | Flow::Jump(target) => self.add_entry_point(target),
                Flow::Call(target) => match self.trampoline.filter(|t| t.is_called_by(target)) {
                    Some(trampoline) => {
                        self.follow_table(image, trampoline, addr)?;
                        return Ok(());
                    }
                    None => self.add_entry_point(target),
                },
            }

            if flow.ends_branch() {
                return Ok(());
            }
            pc += size as u32;
        }

        Ok(())
    }

    fn follow_table(&mut self, image: &MemoryImage, trampoline: Trampoline, call_pc: u16) -> Result<()> {
        for slot in trampoline.follow_table(image, call_pc)? {
            self.add_entry_point(slot.target);
            self.set_status(slot.address, 2, Classification::Word);
        }
        Ok(())
    }
}
