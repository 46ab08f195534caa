use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::mnemonic::Mnemonic;
use crate::mode::AddrMode;

/// (mnemonic, addressing mode) -> opcode byte, for every documented 6502
/// encoding reachable from assembly syntax.
static OPCODES: Lazy<HashMap<Mnemonic, HashMap<AddrMode, u8>>> = Lazy::new(|| {
    use AddrMode::*;
    use Mnemonic::*;
    let mut map: HashMap<Mnemonic, HashMap<AddrMode, u8>> = HashMap::new();
    let mut ins = |mnemonic: Mnemonic, modes: &[(AddrMode, u8)]| {
        map.insert(mnemonic, modes.iter().copied().collect());
    };

    ins(
        ADC,
        &[
            (Immediate, 0x69),
            (ZeroPage, 0x65),
            (ZeroPageX, 0x75),
            (Absolute, 0x6D),
            (AbsoluteX, 0x7D),
            (AbsoluteY, 0x79),
            (IndirectX, 0x61),
            (IndirectY, 0x71),
        ],
    );
    ins(
        AND,
        &[
            (Immediate, 0x29),
            (ZeroPage, 0x25),
            (ZeroPageX, 0x35),
            (Absolute, 0x2D),
            (AbsoluteX, 0x3D),
            (AbsoluteY, 0x39),
            (IndirectX, 0x21),
            (IndirectY, 0x31),
        ],
    );
    ins(
        ASL,
        &[
            (Accumulator, 0x0A),
            (ZeroPage, 0x06),
            (ZeroPageX, 0x16),
            (Absolute, 0x0E),
            (AbsoluteX, 0x1E),
        ],
    );
    ins(BCC, &[(Relative, 0x90)]);
    ins(BCS, &[(Relative, 0xB0)]);
    ins(BEQ, &[(Relative, 0xF0)]);
    ins(BIT, &[(ZeroPage, 0x24), (Absolute, 0x2C)]);
    ins(BMI, &[(Relative, 0x30)]);
    ins(BNE, &[(Relative, 0xD0)]);
    ins(BPL, &[(Relative, 0x10)]);
    ins(BRK, &[(Single, 0x00)]);
    ins(BVC, &[(Relative, 0x50)]);
    ins(BVS, &[(Relative, 0x70)]);
    ins(CLC, &[(Single, 0x18)]);
    ins(CLD, &[(Single, 0xD8)]);
    ins(CLI, &[(Single, 0x58)]);
    ins(CLV, &[(Single, 0xB8)]);
    ins(
        CMP,
        &[
            (Immediate, 0xC9),
            (ZeroPage, 0xC5),
            (ZeroPageX, 0xD5),
            (Absolute, 0xCD),
            (AbsoluteX, 0xDD),
            (AbsoluteY, 0xD9),
            (IndirectX, 0xC1),
            (IndirectY, 0xD1),
        ],
    );
    ins(CPX, &[(Immediate, 0xE0), (ZeroPage, 0xE4), (Absolute, 0xEC)]);
    ins(CPY, &[(Immediate, 0xC0), (ZeroPage, 0xC4), (Absolute, 0xCC)]);
    ins(
        DEC,
        &[
            (ZeroPage, 0xC6),
            (ZeroPageX, 0xD6),
            (Absolute, 0xCE),
            (AbsoluteX, 0xDE),
        ],
    );
    ins(DEX, &[(Single, 0xCA)]);
    ins(DEY, &[(Single, 0x88)]);
    ins(
        EOR,
        &[
            (Immediate, 0x49),
            (ZeroPage, 0x45),
            (ZeroPageX, 0x55),
            (Absolute, 0x4D),
            (AbsoluteX, 0x5D),
            (AbsoluteY, 0x59),
            (IndirectX, 0x41),
            (IndirectY, 0x51),
        ],
    );
    ins(
        INC,
        &[
            (ZeroPage, 0xE6),
            (ZeroPageX, 0xF6),
            (Absolute, 0xEE),
            (AbsoluteX, 0xFE),
        ],
    );
    ins(INX, &[(Single, 0xE8)]);
    ins(INY, &[(Single, 0xC8)]);
    ins(JMP, &[(Absolute, 0x4C)]);
    ins(JSR, &[(Absolute, 0x20)]);
    ins(
        LDA,
        &[
            (Immediate, 0xA9),
            (ZeroPage, 0xA5),
            (ZeroPageX, 0xB5),
            (Absolute, 0xAD),
            (AbsoluteX, 0xBD),
            (AbsoluteY, 0xB9),
            (IndirectX, 0xA1),
            (IndirectY, 0xB1),
        ],
    );
    ins(
        LDX,
        &[
            (Immediate, 0xA2),
            (ZeroPage, 0xA6),
            (ZeroPageY, 0xB6),
            (Absolute, 0xAE),
            (AbsoluteY, 0xBE),
        ],
    );
    ins(
        LDY,
        &[
            (Immediate, 0xA0),
            (ZeroPage, 0xA4),
            (ZeroPageX, 0xB4),
            (Absolute, 0xAC),
            (AbsoluteX, 0xBC),
        ],
    );
    ins(
        LSR,
        &[
            (Accumulator, 0x4A),
            (ZeroPage, 0x46),
            (ZeroPageX, 0x56),
            (Absolute, 0x4E),
            (AbsoluteX, 0x5E),
        ],
    );
    ins(NOP, &[(Single, 0xEA)]);
    ins(
        ORA,
        &[
            (Immediate, 0x09),
            (ZeroPage, 0x05),
            (ZeroPageX, 0x15),
            (Absolute, 0x0D),
            (AbsoluteX, 0x1D),
            (AbsoluteY, 0x19),
            (IndirectX, 0x01),
            (IndirectY, 0x11),
        ],
    );
    ins(PHA, &[(Single, 0x48)]);
    ins(PHP, &[(Single, 0x08)]);
    ins(PLA, &[(Single, 0x68)]);
    ins(PLP, &[(Single, 0x28)]);
    ins(
        ROL,
        &[
            (Accumulator, 0x2A),
            (ZeroPage, 0x26),
            (ZeroPageX, 0x36),
            (Absolute, 0x2E),
            (AbsoluteX, 0x3E),
        ],
    );
    ins(
        ROR,
        &[
            (Accumulator, 0x6A),
            (ZeroPage, 0x66),
            (ZeroPageX, 0x76),
            (Absolute, 0x6E),
            (AbsoluteX, 0x7E),
        ],
    );
    ins(RTI, &[(Single, 0x40)]);
    ins(RTS, &[(Single, 0x60)]);
    ins(
        SBC,
        &[
            (Immediate, 0xE9),
            (ZeroPage, 0xE5),
            (ZeroPageX, 0xF5),
            (Absolute, 0xED),
            (AbsoluteX, 0xFD),
            (AbsoluteY, 0xF9),
            (IndirectX, 0xE1),
            (IndirectY, 0xF1),
        ],
    );
    ins(SEC, &[(Single, 0x38)]);
    ins(SED, &[(Single, 0xF8)]);
    ins(SEI, &[(Single, 0x78)]);
    ins(
        STA,
        &[
            (ZeroPage, 0x85),
            (ZeroPageX, 0x95),
            (Absolute, 0x8D),
            (AbsoluteX, 0x9D),
            (AbsoluteY, 0x99),
            (IndirectX, 0x81),
            (IndirectY, 0x91),
        ],
    );
    ins(STX, &[(ZeroPage, 0x86), (ZeroPageY, 0x96), (Absolute, 0x8E)]);
    ins(STY, &[(ZeroPage, 0x84), (ZeroPageX, 0x94), (Absolute, 0x8C)]);
    ins(TAX, &[(Single, 0xAA)]);
    ins(TAY, &[(Single, 0xA8)]);
    ins(TSX, &[(Single, 0xBA)]);
    ins(TXA, &[(Single, 0x8A)]);
    ins(TXS, &[(Single, 0x9A)]);
    ins(TYA, &[(Single, 0x98)]);

    map
});

/// Opcode byte for the given mnemonic/mode pair, if the CPU has one.
pub fn opcode(mnemonic: Mnemonic, mode: AddrMode) -> Option<u8> {
    OPCODES.get(&mnemonic).and_then(|modes| modes.get(&mode)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        assert_eq!(opcode(Mnemonic::LDA, AddrMode::Immediate), Some(0xA9));
        assert_eq!(opcode(Mnemonic::LDA, AddrMode::IndirectY), Some(0xB1));
        assert_eq!(opcode(Mnemonic::RTS, AddrMode::Single), Some(0x60));
        assert_eq!(opcode(Mnemonic::ASL, AddrMode::Accumulator), Some(0x0A));
        assert_eq!(opcode(Mnemonic::BNE, AddrMode::Relative), Some(0xD0));
        assert_eq!(opcode(Mnemonic::JMP, AddrMode::Absolute), Some(0x4C));
    }

    #[test]
    fn missing_modes() {
        assert_eq!(opcode(Mnemonic::STA, AddrMode::Immediate), None);
        assert_eq!(opcode(Mnemonic::TAX, AddrMode::Absolute), None);
        assert_eq!(opcode(Mnemonic::LDX, AddrMode::ZeroPageX), None);
    }

    #[test]
    fn all_mnemonics_present() {
        for line in ["LDA", "STA", "BRK", "TYA", "BVS"] {
            let m = Mnemonic::parse(line).unwrap();
            assert!(OPCODES.contains_key(&m));
        }
    }
}
