//! Instruction text templates
//!
//! Each template from [`crate::opcode_tables`] is parsed once into a token
//! sequence. Formatting then walks the tokens and consumes operand bytes in
//! order, without rescanning the template text for every instruction.

use crate::opcode_tables::{EXTENDED_TEXT, INDEX_TEXT, PRIMARY_TEXT};

/// One piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Text copied to the output as is
    Literal(String),
    /// `%byte%`: one byte, printed as `xxh`
    Byte,
    /// `%word%`: little-endian word, printed as `xxxxh`
    Word,
    /// `%addr%`: little-endian absolute address, printed as a symbol
    Addr,
    /// `%reladdr%`: signed displacement, printed as the target's symbol
    RelAddr,
    /// `%regw%`: the index register name, consumes no bytes
    RegWord,
}

impl Token {
    fn from_name(name: &str) -> Option<Token> {
        match name {
            "byte" => Some(Token::Byte),
            "word" => Some(Token::Word),
            "addr" => Some(Token::Addr),
            "reladdr" => Some(Token::RelAddr),
            "regw" => Some(Token::RegWord),
            _ => None,
        }
    }

    /// Operand bytes consumed by this token
    pub fn operand_size(&self) -> u16 {
        match self {
            Token::Byte | Token::RelAddr => 1,
            Token::Word | Token::Addr => 2,
            Token::Literal(_) | Token::RegWord => 0,
        }
    }
}

/// Split a template into literal text and placeholders.
///
/// A `%` that does not open a known placeholder is kept as literal text.
pub fn parse(template: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut rest = template;

    while let Some(start) = rest.find('%') {
        literal.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let placeholder = after
            .find('%')
            .and_then(|end| Token::from_name(&after[..end]).map(|token| (token, end)));

        match placeholder {
            Some((token, end)) => {
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(token);
                rest = &after[end + 1..];
            }
            None => {
                literal.push('%');
                rest = after;
            }
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

lazy_static! {
    pub static ref PRIMARY_TOKENS: Vec<Vec<Token>> = PRIMARY_TEXT.iter().map(|t| parse(t)).collect();
    pub static ref INDEX_TOKENS: Vec<Vec<Token>> = INDEX_TEXT.iter().map(|t| parse(t)).collect();
    pub static ref EXTENDED_TOKENS: Vec<Vec<Token>> =
        EXTENDED_TEXT.iter().map(|t| parse(t)).collect();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_text() {
        assert_eq!(parse("nop"), vec![Token::Literal("nop".to_string())]);
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_parse_placeholders() {
        assert_eq!(
            parse("ld\t(%regw% + %byte%),%byte%"),
            vec![
                Token::Literal("ld\t(".to_string()),
                Token::RegWord,
                Token::Literal(" + ".to_string()),
                Token::Byte,
                Token::Literal("),".to_string()),
                Token::Byte,
            ]
        );
        assert_eq!(
            parse("jr\tnz,%reladdr%"),
            vec![Token::Literal("jr\tnz,".to_string()), Token::RelAddr]
        );
        assert_eq!(parse("%word%"), vec![Token::Word]);
    }

    #[test]
    fn test_parse_unknown_placeholder_is_literal() {
        assert_eq!(
            parse("db\t%foo%,%byte%"),
            vec![Token::Literal("db\t%foo%,".to_string()), Token::Byte]
        );
        assert_eq!(parse("50%"), vec![Token::Literal("50%".to_string())]);
    }

    #[test]
    fn test_tables_parsed_once() {
        assert_eq!(PRIMARY_TOKENS.len(), 256);
        assert_eq!(INDEX_TOKENS.len(), 256);
        assert_eq!(EXTENDED_TOKENS.len(), 128);
        assert_eq!(
            PRIMARY_TOKENS[0xc3],
            vec![Token::Literal("jp\t".to_string()), Token::Addr]
        );
    }
}
