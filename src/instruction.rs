use crate::error::Result;
use crate::memory::MemoryImage;
use crate::navigator::Navigator;
use crate::opcode_tables::{
    extended_length, BIT_OPERATION, CB_LENGTH, EXTENDED_FIRST, EXTENDED_LAST, INDEX_CB_LENGTH,
    INDEX_LENGTH, PRIMARY_LENGTH, REGISTER8, ROTATE_SHIFT, UNDEFINED,
};
use crate::symbols::SymbolTable;
use crate::template::{Token, EXTENDED_TOKENS, INDEX_TOKENS, PRIMARY_TOKENS};
use std::fmt::Write;

/// Prefix bytes that switch to another decode table
pub const PREFIX_CB: u8 = 0xcb;
pub const PREFIX_IX: u8 = 0xdd;
pub const PREFIX_ED: u8 = 0xed;
pub const PREFIX_IY: u8 = 0xfd;

/// Length in bytes of the instruction starting at `addr`
pub fn decode_length(image: &MemoryImage, addr: u16) -> u8 {
    let opcode = image.read_byte(addr);
    let next = image.read_byte(addr.wrapping_add(1));

    match opcode {
        PREFIX_CB => CB_LENGTH,
        PREFIX_ED => extended_length(next),
        PREFIX_IX | PREFIX_IY if next == PREFIX_CB => INDEX_CB_LENGTH,
        PREFIX_IX | PREFIX_IY => INDEX_LENGTH[next as usize],
        _ => PRIMARY_LENGTH[opcode as usize],
    }
}

/// Effect of an instruction on the flow of execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Execution falls through to the next instruction
    Next,
    /// Conditional transfer: `target` is reachable and so is the next instruction
    Branch(u16),
    /// Unconditional `call nn`
    Call(u16),
    /// Unconditional `jp nn` / `jr e`, nothing follows
    Jump(u16),
    /// `ret`, `jp (hl)`, `jp (ix)`, `jp (iy)`: target unknown, nothing follows
    Stop,
}

impl Flow {
    /// True if the instruction after this one is not reached by falling through
    pub fn ends_branch(&self) -> bool {
        matches!(self, Flow::Jump(_) | Flow::Stop)
    }
}

/// Classify the control-flow effect of the instruction at `pc`
pub fn control_flow(image: &MemoryImage, pc: u16) -> Result<Flow> {
    let operand = pc.wrapping_add(1);

    let flow = match image.read_byte(pc) {
        // djnz e, jr nz/z/nc/c,e
        0x10 | 0x20 | 0x28 | 0x30 | 0x38 => Flow::Branch(image.read_relative_target(operand)),
        // jr e
        0x18 => Flow::Jump(image.read_relative_target(operand)),
        // jp nn
        0xc3 => Flow::Jump(image.read_word(operand)?),
        // jp cc,nn
        0xc2 | 0xca | 0xd2 | 0xda | 0xe2 | 0xea | 0xf2 | 0xfa => {
            Flow::Branch(image.read_word(operand)?)
        }
        // call cc,nn
        0xc4 | 0xcc | 0xd4 | 0xdc | 0xe4 | 0xec | 0xf4 | 0xfc => {
            Flow::Branch(image.read_word(operand)?)
        }
        // call nn
        0xcd => Flow::Call(image.read_word(operand)?),
        // ret, jp (hl)
        0xc9 | 0xe9 => Flow::Stop,
        // jp (ix), jp (iy)
        PREFIX_IX | PREFIX_IY if image.read_byte(operand) == 0xe9 => Flow::Stop,
        _ => Flow::Next,
    };

    Ok(flow)
}

/// A decoded instruction ready for a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstruction {
    pub address: u16,
    pub length: u8,
    pub text: String,
}

/// Renders instructions as assembler text, resolving addresses to symbols.
///
/// Address operands resolve, in order, to a label from the symbol table,
/// to a synthetic `Lxxxx` label if the navigator found an entry point
/// there, or to a plain `xxxxh` literal.
pub struct TextFormatter<'a> {
    image: &'a MemoryImage,
    symbols: &'a SymbolTable,
    navigator: &'a Navigator,
}

impl<'a> TextFormatter<'a> {
    pub fn new(image: &'a MemoryImage, symbols: &'a SymbolTable, navigator: &'a Navigator) -> Self {
        TextFormatter {
            image,
            symbols,
            navigator,
        }
    }

    /// Decode length and text of the instruction at `addr`
    pub fn decode(&self, addr: u16) -> Result<DecodedInstruction> {
        Ok(DecodedInstruction {
            address: addr,
            length: decode_length(self.image, addr),
            text: self.render_text(addr)?,
        })
    }

    /// Symbol text for an address operand
    pub fn resolve_symbol(&self, addr: u16) -> String {
        if self.symbols.has_symbol(addr) {
            self.symbols.get_label(addr).to_string()
        } else if self.navigator.is_entry_point(addr) {
            format!("L{:04x}", addr)
        } else {
            format!("{:04x}h", addr)
        }
    }

    /// Assembler text of the instruction at `addr`
    pub fn render_text(&self, addr: u16) -> Result<String> {
        match self.image.read_byte(addr) {
            PREFIX_CB => Ok(self.render_cb(addr)),
            PREFIX_ED => self.render_extended(addr),
            opcode @ (PREFIX_IX | PREFIX_IY) => self.render_indexed(addr, opcode),
            opcode => self.format(
                &PRIMARY_TOKENS[opcode as usize],
                addr.wrapping_add(1),
                "",
            ),
        }
    }

    /// CB xx: rotates, shifts and bit operations on 8-bit registers
    fn render_cb(&self, addr: u16) -> String {
        let opcode = self.image.read_byte(addr.wrapping_add(1));
        bit_operation_text(opcode, REGISTER8[(opcode & 7) as usize])
    }

    /// DD xx / FD xx, including the DD CB d op bit operations
    fn render_indexed(&self, addr: u16, prefix: u8) -> Result<String> {
        let reg_word = if prefix == PREFIX_IX { "ix" } else { "iy" };
        let opcode = self.image.read_byte(addr.wrapping_add(1));

        if opcode == PREFIX_CB {
            let displacement = self.image.read_byte(addr.wrapping_add(2));
            let sub_opcode = self.image.read_byte(addr.wrapping_add(3));
            let operand = format!("({} + {})", reg_word, displacement);
            return Ok(bit_operation_text(sub_opcode, &operand));
        }

        self.format(
            &INDEX_TOKENS[opcode as usize],
            addr.wrapping_add(2),
            reg_word,
        )
    }

    /// ED xx block, I/O and 16-bit extended instructions
    fn render_extended(&self, addr: u16) -> Result<String> {
        let opcode = self.image.read_byte(addr.wrapping_add(1));

        if !(EXTENDED_FIRST..=EXTENDED_LAST).contains(&opcode) {
            return Ok(UNDEFINED.to_string());
        }

        self.format(
            &EXTENDED_TOKENS[(opcode - EXTENDED_FIRST) as usize],
            addr.wrapping_add(2),
            "",
        )
    }

    /// Expand a parsed template, fetching operands from `operand_addr` onwards
    pub fn format(&self, tokens: &[Token], operand_addr: u16, reg_word: &str) -> Result<String> {
        let mut text = String::new();
        let mut cursor = operand_addr;

        for token in tokens {
            match token {
                Token::Literal(literal) => text.push_str(literal),
                Token::Byte => {
                    let _ = write!(text, "{:02x}h", self.image.read_byte(cursor));
                }
                Token::Word => {
                    let _ = write!(text, "{:04x}h", self.image.read_word(cursor)?);
                }
                Token::Addr => {
                    let target = self.image.read_word(cursor)?;
                    text.push_str(&self.resolve_symbol(target));
                }
                Token::RelAddr => {
                    let target = self.image.read_relative_target(cursor);
                    text.push_str(&self.resolve_symbol(target));
                }
                Token::RegWord => text.push_str(reg_word),
            }
            cursor = cursor.wrapping_add(token.operand_size());
        }

        Ok(text)
    }
}

/// Shared CB decoding: bits 7-6 pick rotate/shift or bit/res/set, bits 5-3
/// the operation or bit number, `operand` the register or memory target.
fn bit_operation_text(opcode: u8, operand: &str) -> String {
    let key = (opcode >> 6) & 3;
    let index = (opcode >> 3) & 7;

    if key == 0 {
        format!("{}\t{}", ROTATE_SHIFT[index as usize], operand)
    } else {
        format!("{}\t{},{}", BIT_OPERATION[(key - 1) as usize], index, operand)
    }
}
