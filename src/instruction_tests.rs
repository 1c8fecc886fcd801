#[cfg(test)]
mod tests {
    use crate::error::DasmError;
    use crate::instruction::{control_flow, decode_length, Flow, TextFormatter};
    use crate::memory::MemoryImage;
    use crate::navigator::Navigator;
    use crate::opcode_tables::UNDEFINED;
    use crate::symbols::SymbolTable;
    use test_log::test;

    fn image(code: &[u8]) -> MemoryImage {
        MemoryImage::from_bytes(code, 0x4000).unwrap()
    }

    /// Render the instruction at 0x4000 with no symbols and no entry points
    fn text(code: &[u8]) -> String {
        let image = image(code);
        let symbols = SymbolTable::new();
        let navigator = Navigator::new();
        TextFormatter::new(&image, &symbols, &navigator)
            .render_text(0x4000)
            .unwrap()
    }

    #[test]
    fn test_primary_lengths() {
        assert_eq!(decode_length(&image(&[0x00]), 0x4000), 1);
        assert_eq!(decode_length(&image(&[0x3e, 0x05]), 0x4000), 2);
        assert_eq!(decode_length(&image(&[0x01, 0x34, 0x12]), 0x4000), 3);
        assert_eq!(decode_length(&image(&[0xcd, 0x00, 0x40]), 0x4000), 3);
    }

    #[test]
    fn test_prefixed_lengths() {
        // CB is always two bytes
        assert_eq!(decode_length(&image(&[0xcb, 0x00]), 0x4000), 2);
        // ED: only ld (nn),rr / ld rr,(nn) carry an operand
        assert_eq!(decode_length(&image(&[0xed, 0x43, 0x00, 0xc0]), 0x4000), 4);
        assert_eq!(decode_length(&image(&[0xed, 0x7b, 0x00, 0xc0]), 0x4000), 4);
        assert_eq!(decode_length(&image(&[0xed, 0x44]), 0x4000), 2);
        assert_eq!(decode_length(&image(&[0xed, 0x00]), 0x4000), 2);
        // DD / FD
        assert_eq!(decode_length(&image(&[0xdd, 0x21, 0x00, 0x00]), 0x4000), 4);
        assert_eq!(decode_length(&image(&[0xfd, 0x36, 0x05, 0x20]), 0x4000), 4);
        assert_eq!(decode_length(&image(&[0xdd, 0xe9]), 0x4000), 2);
        assert_eq!(decode_length(&image(&[0xdd, 0xcb, 0x05, 0x46]), 0x4000), 4);
        assert_eq!(decode_length(&image(&[0xfd, 0xcb, 0x05, 0xc6]), 0x4000), 4);
        // lone prefix
        assert_eq!(decode_length(&image(&[0xdd, 0x00]), 0x4000), 1);
    }

    #[test]
    fn test_primary_text() {
        assert_eq!(text(&[0x00]), "nop");
        assert_eq!(text(&[0x3e, 0x05]), "ld\ta,05h");
        assert_eq!(text(&[0x01, 0x34, 0x12]), "ld\tbc,1234h");
        assert_eq!(text(&[0x36, 0xff]), "ld\t(hl),ffh");
        assert_eq!(text(&[0xd3, 0x98]), "out\t(98h),a");
        assert_eq!(text(&[0x32, 0x00, 0xe0]), "ld\t(e000h),a");
        assert_eq!(text(&[0xc9]), "ret");
        assert_eq!(text(&[0xe9]), "jp\t(hl)");
    }

    #[test]
    fn test_cb_text() {
        assert_eq!(text(&[0xcb, 0x00]), "rlc\tb");
        assert_eq!(text(&[0xcb, 0x38]), "srl\tb");
        assert_eq!(text(&[0xcb, 0x7e]), "bit\t7,(hl)");
        assert_eq!(text(&[0xcb, 0x87]), "res\t0,a");
        assert_eq!(text(&[0xcb, 0xff]), "set\t7,a");
    }

    #[test]
    fn test_indexed_text() {
        assert_eq!(text(&[0xdd, 0x21, 0x34, 0x12]), "ld\tix,1234h");
        assert_eq!(text(&[0xfd, 0x21, 0x34, 0x12]), "ld\tiy,1234h");
        assert_eq!(text(&[0xfd, 0x36, 0x05, 0x20]), "ld\t(iy + 05h),20h");
        assert_eq!(text(&[0xdd, 0x7e, 0x03]), "ld\ta,(ix + 03h)");
        assert_eq!(text(&[0xdd, 0x26, 0x07]), "ld\tixh,07h");
        assert_eq!(text(&[0xfd, 0xe5]), "push\tiy");
        assert_eq!(text(&[0xdd, 0xe9]), "jp\t(ix)");
        assert_eq!(text(&[0xdd, 0x00]), UNDEFINED);
    }

    #[test]
    fn test_indexed_bit_text() {
        assert_eq!(text(&[0xdd, 0xcb, 0x05, 0x46]), "bit\t0,(ix + 5)");
        assert_eq!(text(&[0xfd, 0xcb, 0x10, 0xce]), "set\t1,(iy + 16)");
        assert_eq!(text(&[0xdd, 0xcb, 0x02, 0x06]), "rlc\t(ix + 2)");
    }

    #[test]
    fn test_extended_text() {
        assert_eq!(text(&[0xed, 0x44]), "neg");
        assert_eq!(text(&[0xed, 0xb0]), "ldir");
        assert_eq!(text(&[0xed, 0x56]), "im\t1");
        assert_eq!(text(&[0xed, 0x43, 0x00, 0xc0]), "ld\t(c000h),bc");
        assert_eq!(text(&[0xed, 0x00]), UNDEFINED);
        assert_eq!(text(&[0xed, 0xff]), UNDEFINED);
        assert_eq!(text(&[0xed, 0xa4]), UNDEFINED);
    }

    #[test]
    fn test_relative_targets() {
        // jr to itself and djnz back over a nop
        assert_eq!(text(&[0x18, 0xfe]), "jr\t4000h");
        assert_eq!(text(&[0x20, 0x10]), "jr\tnz,4012h");

        let image = image(&[0x00, 0x10, 0xfd]);
        let symbols = SymbolTable::new();
        let navigator = Navigator::new();
        let formatter = TextFormatter::new(&image, &symbols, &navigator);
        assert_eq!(formatter.render_text(0x4001).unwrap(), "djnz\t4000h");
    }

    #[test]
    fn test_symbol_resolution_order() {
        let mut code = vec![0u8; 0x20];
        code[..3].copy_from_slice(&[0xc3, 0x10, 0x40]);
        let image = image(&code);
        let mut symbols = SymbolTable::new();
        let mut navigator = Navigator::new();

        {
            let formatter = TextFormatter::new(&image, &symbols, &navigator);
            assert_eq!(formatter.render_text(0x4000).unwrap(), "jp\t4010h");
        }

        navigator.add_entry_point(0x4010);
        {
            let formatter = TextFormatter::new(&image, &symbols, &navigator);
            assert_eq!(formatter.render_text(0x4000).unwrap(), "jp\tL4010");
        }

        symbols.add_symbol(0x4010, "MAIN", "");
        let formatter = TextFormatter::new(&image, &symbols, &navigator);
        assert_eq!(formatter.render_text(0x4000).unwrap(), "jp\tMAIN");
        assert_eq!(formatter.resolve_symbol(0x0000), "0000h");
    }

    #[test]
    fn test_entry_point_outside_image_gets_label() {
        // call 00a2 / ret at 4010; navigation records the BIOS target
        let mut bytes = vec![0u8; 0x14];
        bytes[..4].copy_from_slice(&[0x41, 0x42, 0x10, 0x40]);
        bytes[0x10..0x14].copy_from_slice(&[0xcd, 0xa2, 0x00, 0xc9]);
        let image = MemoryImage::from_bytes(&bytes, 0x4000).unwrap();
        let symbols = SymbolTable::new();
        let mut navigator = Navigator::new();
        navigator.navigate(&image).unwrap();
        assert!(navigator.is_entry_point(0x00a2));

        let formatter = TextFormatter::new(&image, &symbols, &navigator);
        assert_eq!(formatter.render_text(0x4010).unwrap(), "call\tL00a2");
    }

    #[test]
    fn test_word_operand_is_never_a_symbol() {
        let image = image(&[0x21, 0x10, 0x40]);
        let mut symbols = SymbolTable::new();
        symbols.add_symbol(0x4010, "MAIN", "");
        let navigator = Navigator::new();
        let formatter = TextFormatter::new(&image, &symbols, &navigator);
        assert_eq!(formatter.render_text(0x4000).unwrap(), "ld\thl,4010h");
    }

    #[test]
    fn test_decode() {
        let image = image(&[0xcd, 0xa2, 0x00]);
        let mut symbols = SymbolTable::new();
        symbols.add_symbol(0x00a2, "CHPUT", "");
        let navigator = Navigator::new();
        let decoded = TextFormatter::new(&image, &symbols, &navigator)
            .decode(0x4000)
            .unwrap();

        assert_eq!(decoded.address, 0x4000);
        assert_eq!(decoded.length, 3);
        assert_eq!(decoded.text, "call\tCHPUT");
    }

    #[test]
    fn test_word_operand_at_top_of_memory() {
        let mut image = MemoryImage::new();
        image.load(&[0x00; 0x0e], 0xfff0).unwrap();
        let symbols = SymbolTable::new();
        let navigator = Navigator::new();
        let formatter = TextFormatter::new(&image, &symbols, &navigator);

        // ld bc,nn at 0xfffe would read its operand from 0xffff
        let err = formatter
            .format(&crate::template::PRIMARY_TOKENS[0x01], 0xffff, "")
            .unwrap_err();
        assert!(matches!(err, DasmError::MemoryOverflow { addr: 0xffff }));
    }

    #[test]
    fn test_control_flow() {
        let flow = |code: &[u8]| control_flow(&image(code), 0x4000).unwrap();

        assert_eq!(flow(&[0x00]), Flow::Next);
        assert_eq!(flow(&[0x3e, 0x05]), Flow::Next);
        assert_eq!(flow(&[0xc3, 0x00, 0x40]), Flow::Jump(0x4000));
        assert_eq!(flow(&[0x18, 0xfe]), Flow::Jump(0x4000));
        assert_eq!(flow(&[0x18, 0x02]), Flow::Jump(0x4004));
        assert_eq!(flow(&[0x10, 0xfe]), Flow::Branch(0x4000));
        assert_eq!(flow(&[0x38, 0x00]), Flow::Branch(0x4002));
        assert_eq!(flow(&[0xca, 0x34, 0x12]), Flow::Branch(0x1234));
        assert_eq!(flow(&[0xdc, 0x34, 0x12]), Flow::Branch(0x1234));
        assert_eq!(flow(&[0xcd, 0xa2, 0x00]), Flow::Call(0x00a2));
        assert_eq!(flow(&[0xc9]), Flow::Stop);
        assert_eq!(flow(&[0xe9]), Flow::Stop);
        assert_eq!(flow(&[0xdd, 0xe9]), Flow::Stop);
        assert_eq!(flow(&[0xfd, 0xe9]), Flow::Stop);
        // conditional returns fall through
        assert_eq!(flow(&[0xc8]), Flow::Next);
        // rst is not followed
        assert_eq!(flow(&[0xff]), Flow::Next);
    }

    #[test]
    fn test_ends_branch() {
        assert!(Flow::Jump(0).ends_branch());
        assert!(Flow::Stop.ends_branch());
        assert!(!Flow::Call(0).ends_branch());
        assert!(!Flow::Branch(0).ends_branch());
        assert!(!Flow::Next.ends_branch());
    }
}
