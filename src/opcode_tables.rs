//! Z80 opcode tables
//!
//! Lengths and text templates for every opcode byte of each prefix family.
//! Templates use the placeholders understood by [`crate::template`]:
//! `%byte%`, `%word%`, `%addr%`, `%reladdr%` and `%regw%`. A trailing `*`
//! marks undocumented instructions.

/// Text for opcodes that have no documented meaning
pub const UNDEFINED: &str = "nop (2x) *";

/// CB family rotate and shift mnemonics, indexed by bits 5-3
pub static ROTATE_SHIFT: [&str; 8] = ["rlc", "rrc", "rl", "rr", "sla", "sra", "sll", "srl"];

/// CB family bit operations for keys 1, 2 and 3 (bits 7-6)
pub static BIT_OPERATION: [&str; 3] = ["bit", "res", "set"];

/// 8-bit register operands, indexed by bits 2-0
pub static REGISTER8: [&str; 8] = ["b", "c", "d", "e", "h", "l", "(hl)", "a"];

/// Fixed length of every CB-prefixed instruction
pub const CB_LENGTH: u8 = 2;

/// Length of DD CB d op / FD CB d op
pub const INDEX_CB_LENGTH: u8 = 4;

/// First and last ED sub-opcodes with a template
pub const EXTENDED_FIRST: u8 = 0x40;
pub const EXTENDED_LAST: u8 = 0xbf;

/// Length of an ED-prefixed instruction given its sub-opcode.
///
/// Only `ld (nn),rr` / `ld rr,(nn)` carry a 16-bit operand.
pub fn extended_length(sub_opcode: u8) -> u8 {
    if sub_opcode & 0xc7 == 0x43 {
        4
    } else {
        2
    }
}

/// Instruction lengths for unprefixed opcodes. Zero marks the DD, ED and FD
/// prefixes, whose length depends on the following byte.
pub static PRIMARY_LENGTH: [u8; 256] = [
    1, 3, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, // 00-0f
    2, 3, 1, 1, 1, 1, 2, 1, 2, 1, 1, 1, 1, 1, 2, 1, // 10-1f
    2, 3, 3, 1, 1, 1, 2, 1, 2, 1, 3, 1, 1, 1, 2, 1, // 20-2f
    2, 3, 3, 1, 1, 1, 2, 1, 2, 1, 3, 1, 1, 1, 2, 1, // 30-3f
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 40-4f
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 50-5f
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 60-6f
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 70-7f
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 80-8f
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 90-9f
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // a0-af
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // b0-bf
    1, 1, 3, 3, 3, 1, 2, 1, 1, 1, 3, 2, 3, 3, 2, 1, // c0-cf
    1, 1, 3, 2, 3, 1, 2, 1, 1, 1, 3, 2, 3, 0, 2, 1, // d0-df
    1, 1, 3, 1, 3, 1, 2, 1, 1, 1, 3, 1, 3, 0, 2, 1, // e0-ef
    1, 1, 3, 1, 3, 1, 2, 1, 1, 1, 3, 1, 3, 0, 2, 1, // f0-ff
];

/// Instruction lengths for DD xx / FD xx, prefix byte included.
///
/// Undefined combinations execute the prefix as a lone one-byte no-op.
pub static INDEX_LENGTH: [u8; 256] = [
    1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, // 00-0f
    1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, // 10-1f
    1, 4, 4, 2, 2, 2, 3, 1, 1, 2, 4, 2, 2, 2, 3, 1, // 20-2f
    1, 1, 1, 1, 3, 3, 4, 1, 1, 2, 1, 1, 1, 1, 1, 1, // 30-3f
    1, 1, 1, 1, 2, 2, 3, 1, 1, 1, 1, 1, 2, 2, 3, 1, // 40-4f
    1, 1, 1, 1, 2, 2, 3, 1, 1, 1, 1, 1, 2, 2, 3, 1, // 50-5f
    2, 2, 2, 2, 2, 2, 3, 2, 2, 2, 2, 2, 2, 2, 3, 2, // 60-6f
    3, 3, 3, 3, 3, 3, 1, 3, 1, 1, 1, 1, 2, 2, 3, 1, // 70-7f
    1, 1, 1, 1, 2, 2, 3, 1, 1, 1, 1, 1, 2, 2, 3, 1, // 80-8f
    1, 1, 1, 1, 2, 2, 3, 1, 1, 1, 1, 1, 2, 2, 3, 1, // 90-9f
    1, 1, 1, 1, 2, 2, 3, 1, 1, 1, 1, 1, 2, 2, 3, 1, // a0-af
    1, 1, 1, 1, 2, 2, 3, 1, 1, 1, 1, 1, 2, 2, 3, 1, // b0-bf
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 4, 1, 1, 1, 1, // c0-cf
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // d0-df
    1, 2, 1, 2, 1, 2, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, // e0-ef
    1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, // f0-ff
];

/// Templates for unprefixed opcodes
pub static PRIMARY_TEXT: [&str; 256] = [
    "nop", // 00
    "ld\tbc,%word%",
    "ld\t(bc),a",
    "inc\tbc",
    "inc\tb",
    "dec\tb",
    "ld\tb,%byte%",
    "rlca",
    "ex\taf,af'",
    "add\thl,bc",
    "ld\ta,(bc)",
    "dec\tbc",
    "inc\tc",
    "dec\tc",
    "ld\tc,%byte%",
    "rla",
    "djnz\t%reladdr%", // 10
    "ld\tde,%word%",
    "ld\t(de),a",
    "inc\tde",
    "inc\td",
    "dec\td",
    "ld\td,%byte%",
    "rrca",
    "jr\t%reladdr%",
    "add\thl,de",
    "ld\ta,(de)",
    "dec\tde",
    "inc\te",
    "dec\te",
    "ld\te,%byte%",
    "rra",
    "jr\tnz,%reladdr%", // 20
    "ld\thl,%word%",
    "ld\t(%addr%),hl",
    "inc\thl",
    "inc\th",
    "dec\th",
    "ld\th,%byte%",
    "daa",
    "jr\tz,%reladdr%",
    "add\thl,hl",
    "ld\thl,(%addr%)",
    "dec\thl",
    "inc\tl",
    "dec\tl",
    "ld\tl,%byte%",
    "cpl",
    "jr\tnc,%reladdr%", // 30
    "ld\tsp,%word%",
    "ld\t(%addr%),a",
    "inc\tsp",
    "inc\t(hl)",
    "dec\t(hl)",
    "ld\t(hl),%byte%",
    "scf",
    "jr\tc,%reladdr%",
    "add\thl,sp",
    "ld\ta,(%addr%)",
    "dec\tsp",
    "inc\ta",
    "dec\ta",
    "ld\ta,%byte%",
    "ccf",
    "ld\tb,b", // 40
    "ld\tb,c",
    "ld\tb,d",
    "ld\tb,e",
    "ld\tb,h",
    "ld\tb,l",
    "ld\tb,(hl)",
    "ld\tb,a",
    "ld\tc,b",
    "ld\tc,c",
    "ld\tc,d",
    "ld\tc,e",
    "ld\tc,h",
    "ld\tc,l",
    "ld\tc,(hl)",
    "ld\tc,a",
    "ld\td,b", // 50
    "ld\td,c",
    "ld\td,d",
    "ld\td,e",
    "ld\td,h",
    "ld\td,l",
    "ld\td,(hl)",
    "ld\td,a",
    "ld\te,b",
    "ld\te,c",
    "ld\te,d",
    "ld\te,e",
    "ld\te,h",
    "ld\te,l",
    "ld\te,(hl)",
    "ld\te,a",
    "ld\th,b", // 60
    "ld\th,c",
    "ld\th,d",
    "ld\th,e",
    "ld\th,h",
    "ld\th,l",
    "ld\th,(hl)",
    "ld\th,a",
    "ld\tl,b",
    "ld\tl,c",
    "ld\tl,d",
    "ld\tl,e",
    "ld\tl,h",
    "ld\tl,l",
    "ld\tl,(hl)",
    "ld\tl,a",
    "ld\t(hl),b", // 70
    "ld\t(hl),c",
    "ld\t(hl),d",
    "ld\t(hl),e",
    "ld\t(hl),h",
    "ld\t(hl),l",
    "halt",
    "ld\t(hl),a",
    "ld\ta,b",
    "ld\ta,c",
    "ld\ta,d",
    "ld\ta,e",
    "ld\ta,h",
    "ld\ta,l",
    "ld\ta,(hl)",
    "ld\ta,a",
    "add\ta,b", // 80
    "add\ta,c",
    "add\ta,d",
    "add\ta,e",
    "add\ta,h",
    "add\ta,l",
    "add\ta,(hl)",
    "add\ta,a",
    "adc\ta,b",
    "adc\ta,c",
    "adc\ta,d",
    "adc\ta,e",
    "adc\ta,h",
    "adc\ta,l",
    "adc\ta,(hl)",
    "adc\ta,a",
    "sub\tb", // 90
    "sub\tc",
    "sub\td",
    "sub\te",
    "sub\th",
    "sub\tl",
    "sub\t(hl)",
    "sub\ta",
    "sbc\ta,b",
    "sbc\ta,c",
    "sbc\ta,d",
    "sbc\ta,e",
    "sbc\ta,h",
    "sbc\ta,l",
    "sbc\ta,(hl)",
    "sbc\ta,a",
    "and\tb", // a0
    "and\tc",
    "and\td",
    "and\te",
    "and\th",
    "and\tl",
    "and\t(hl)",
    "and\ta",
    "xor\tb",
    "xor\tc",
    "xor\td",
    "xor\te",
    "xor\th",
    "xor\tl",
    "xor\t(hl)",
    "xor\ta",
    "or\tb", // b0
    "or\tc",
    "or\td",
    "or\te",
    "or\th",
    "or\tl",
    "or\t(hl)",
    "or\ta",
    "cp\tb",
    "cp\tc",
    "cp\td",
    "cp\te",
    "cp\th",
    "cp\tl",
    "cp\t(hl)",
    "cp\ta",
    "ret\tnz", // c0
    "pop\tbc",
    "jp\tnz,%addr%",
    "jp\t%addr%",
    "call\tnz,%addr%",
    "push\tbc",
    "add\ta,%byte%",
    "rst\t00h",
    "ret\tz",
    "ret",
    "jp\tz,%addr%",
    "", // CB prefix
    "call\tz,%addr%",
    "call\t%addr%",
    "adc\ta,%byte%",
    "rst\t08h",
    "ret\tnc", // d0
    "pop\tde",
    "jp\tnc,%addr%",
    "out\t(%byte%),a",
    "call\tnc,%addr%",
    "push\tde",
    "sub\t%byte%",
    "rst\t10h",
    "ret\tc",
    "exx",
    "jp\tc,%addr%",
    "in\ta,(%byte%)",
    "call\tc,%addr%",
    "", // DD prefix
    "sbc\ta,%byte%",
    "rst\t18h",
    "ret\tpo", // e0
    "pop\thl",
    "jp\tpo,%addr%",
    "ex\t(sp),hl",
    "call\tpo,%addr%",
    "push\thl",
    "and\t%byte%",
    "rst\t20h",
    "ret\tpe",
    "jp\t(hl)",
    "jp\tpe,%addr%",
    "ex\tde,hl",
    "call\tpe,%addr%",
    "", // ED prefix
    "xor\t%byte%",
    "rst\t28h",
    "ret\tp", // f0
    "pop\taf",
    "jp\tp,%addr%",
    "di",
    "call\tp,%addr%",
    "push\taf",
    "or\t%byte%",
    "rst\t30h",
    "ret\tm",
    "ld\tsp,hl",
    "jp\tm,%addr%",
    "ei",
    "call\tm,%addr%",
    "", // FD prefix
    "cp\t%byte%",
    "rst\t38h",
];

/// Templates for DD xx / FD xx, `%regw%` standing for ix or iy
pub static INDEX_TEXT: [&str; 256] = [
    UNDEFINED, // 00
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "add\t%regw%,bc",
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED, // 10
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "add\t%regw%,de",
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED, // 20
    "ld\t%regw%,%word%",
    "ld\t(%addr%),%regw%",
    "inc\t%regw%",
    "inc\t%regw%h *",
    "dec\t%regw%h *",
    "ld\t%regw%h,%byte%", // ixh/iyh, not a 16-bit load
    UNDEFINED,
    UNDEFINED,
    "add\t%regw%,%regw%",
    "ld\t%regw%,(%addr%)",
    "dec\t%regw%",
    "inc\t%regw%l *",
    "dec\t%regw%l *",
    "ld\t%regw%l,%byte%", // ixl/iyl
    UNDEFINED,
    UNDEFINED, // 30
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "inc\t(%regw% + %byte%)",
    "dec\t(%regw% + %byte%)",
    "ld\t(%regw% + %byte%),%byte%",
    UNDEFINED,
    UNDEFINED,
    "add\t%regw%,sp",
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED, // 40
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "ld\tb,(%regw% + %byte%)",
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "ld\tc,(%regw% + %byte%)",
    UNDEFINED,
    UNDEFINED, // 50
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "ld\td,(%regw% + %byte%)",
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "ld\te,(%regw% + %byte%)",
    UNDEFINED,
    UNDEFINED, // 60
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "ld\th,(%regw% + %byte%)",
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "ld\tl,(%regw% + %byte%)",
    UNDEFINED,
    "ld\t(%regw% + %byte%),b", // 70
    "ld\t(%regw% + %byte%),c",
    "ld\t(%regw% + %byte%),d",
    "ld\t(%regw% + %byte%),e",
    "ld\t(%regw% + %byte%),h",
    "ld\t(%regw% + %byte%),l",
    UNDEFINED,
    "ld\t(%regw% + %byte%),a",
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "ld\ta,(%regw% + %byte%)",
    UNDEFINED,
    UNDEFINED, // 80
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "add\ta,%regw%h *",
    "add\ta,%regw%l *",
    "add\ta,(%regw% + %byte%)",
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "adc\ta,%regw%h *",
    "adc\ta,%regw%l *",
    "adc\ta,(%regw% + %byte%)",
    UNDEFINED,
    UNDEFINED, // 90
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "sub\t%regw%h *",
    "sub\t%regw%l *",
    "sub\t(%regw% + %byte%)",
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "sbc\ta,%regw%h *",
    "sbc\ta,%regw%l *",
    "sbc\ta,(%regw% + %byte%)",
    UNDEFINED,
    UNDEFINED, // a0
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "and\t%regw%h *",
    "and\t%regw%l *",
    "and\t(%regw% + %byte%)",
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "xor\t%regw%h *",
    "xor\t%regw%l *",
    "xor\t(%regw% + %byte%)",
    UNDEFINED,
    UNDEFINED, // b0
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "or\t%regw%h *",
    "or\t%regw%l *",
    "or\t(%regw% + %byte%)",
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "cp\t%regw%h *",
    "cp\t%regw%l *",
    "cp\t(%regw% + %byte%)",
    UNDEFINED,
    UNDEFINED, // c0
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "", // DD CB / FD CB, decoded separately
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED, // d0
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED, // e0
    "pop\t%regw%",
    UNDEFINED,
    "ex\t(sp),%regw%",
    UNDEFINED,
    "push\t%regw%",
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "jp\t(%regw%)", // same syntax as jp (hl)
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED, // f0
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "ld\tsp,%regw%",
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
];

/// Templates for ED 40 .. ED bf, indexed from 0x40
pub static EXTENDED_TEXT: [&str; 128] = [
    "in\tb,(c)", // 40
    "out\t(c),b",
    "sbc\thl,bc",
    "ld\t(%addr%),bc",
    "neg",
    "ret\tn",
    "im\t0",
    "ld\ti,a",
    "in\tc,(c)",
    "out\t(c),c",
    "adc\thl,bc",
    "ld\tbc,(%addr%)",
    "neg *",
    "ret\ti *",
    "im\t0/1 *",
    "ld\tr,a",
    "in\td,(c)", // 50
    "out\t(c),d",
    "sbc\thl,de",
    "ld\t(%addr%),de",
    "neg *",
    "ret\tn *",
    "im\t1",
    "ld\ta,i",
    "in\te,(c)",
    "out\t(c),e",
    "adc\thl,de",
    "ld\tde,(%addr%)",
    "neg *",
    "ret\ti *",
    "im\t2",
    "ld\ta,r",
    "in\th,(c)", // 60
    "out\t(c),h",
    "sbc\thl,hl",
    "ld\t(%addr%),hl",
    "neg *",
    "ret\tn *",
    "im\t0 *",
    "rrd",
    "in\tl,(c)",
    "out\t(c),l",
    "adc\thl,hl",
    "ld\thl,(%addr%)",
    "neg *",
    "ret\ti *",
    "im\t0/1 *",
    "rld",
    "in\t(hl),(c)", // 70
    "out\t(c),(hl)",
    "sbc\thl,sp",
    "ld\t(%addr%),sp",
    "neg *",
    "ret\tn *",
    "im\t1 *",
    UNDEFINED,
    "in\ta,(c)",
    "out\t(c),a",
    "adc\thl,sp",
    "ld\tsp,(%addr%)",
    "neg *",
    "ret\ti *",
    "im\t2 *",
    UNDEFINED,
    UNDEFINED, // 80
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED, // 90
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "ldi", // a0
    "cpi",
    "ini",
    "outi",
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "ldd",
    "cpd",
    "ind",
    "outd",
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "ldir", // b0
    "cpir",
    "inir",
    "otir",
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    "lddr",
    "cpdr",
    "indr",
    "otdr",
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
    UNDEFINED,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{parse, Token};

    fn operand_bytes(text: &str) -> u8 {
        parse(text)
            .iter()
            .map(|token| match token {
                Token::Byte | Token::RelAddr => 1,
                Token::Word | Token::Addr => 2,
                Token::Literal(_) | Token::RegWord => 0,
            })
            .sum()
    }

    #[test]
    fn test_primary_templates_match_lengths() {
        for opcode in 0..=255u8 {
            let length = PRIMARY_LENGTH[opcode as usize];
            match opcode {
                0xdd | 0xed | 0xfd => assert_eq!(length, 0, "prefix {:02x}", opcode),
                0xcb => assert_eq!(length, CB_LENGTH),
                _ => assert_eq!(
                    operand_bytes(PRIMARY_TEXT[opcode as usize]) + 1,
                    length,
                    "opcode {:02x}",
                    opcode
                ),
            }
        }
    }

    #[test]
    fn test_index_templates_match_lengths() {
        for opcode in 0..=255u8 {
            let text = INDEX_TEXT[opcode as usize];
            let length = INDEX_LENGTH[opcode as usize];
            assert!((1..=4).contains(&length), "DD {:02x}", opcode);
            if text == UNDEFINED || opcode == 0xcb {
                continue;
            }
            assert_eq!(operand_bytes(text) + 2, length, "DD {:02x}", opcode);
        }
        assert_eq!(INDEX_LENGTH[0xcb], INDEX_CB_LENGTH);
    }

    #[test]
    fn test_extended_templates_match_lengths() {
        for sub_opcode in EXTENDED_FIRST..=EXTENDED_LAST {
            let text = EXTENDED_TEXT[(sub_opcode - EXTENDED_FIRST) as usize];
            assert_eq!(
                operand_bytes(text) + 2,
                extended_length(sub_opcode),
                "ED {:02x}",
                sub_opcode
            );
        }
    }

    #[test]
    fn test_every_primary_opcode_has_a_length() {
        let defined = PRIMARY_LENGTH.iter().filter(|&&len| len > 0).count();
        assert_eq!(defined, 253);
    }
}
