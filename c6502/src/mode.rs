use bimap::BiMap;
use once_cell::sync::Lazy;

/// Operand-encoding form of an instruction. `Single` is the no-operand
/// ("implied") form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddrMode {
    Single,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    IndirectX,
    IndirectY,
    Relative,
}

static MODE_STR: Lazy<BiMap<AddrMode, &'static str>> = Lazy::new(|| {
    let mut map: BiMap<AddrMode, &'static str> = BiMap::new();
    map.insert(AddrMode::Single, "sngl");
    map.insert(AddrMode::Accumulator, "acc");
    map.insert(AddrMode::Immediate, "imm");
    map.insert(AddrMode::ZeroPage, "zp");
    map.insert(AddrMode::ZeroPageX, "zpx");
    map.insert(AddrMode::ZeroPageY, "zpy");
    map.insert(AddrMode::Absolute, "abs");
    map.insert(AddrMode::AbsoluteX, "absx");
    map.insert(AddrMode::AbsoluteY, "absy");
    map.insert(AddrMode::IndirectX, "indx");
    map.insert(AddrMode::IndirectY, "indy");
    map.insert(AddrMode::Relative, "rel");
    map
});

impl AddrMode {
    /// Encoded instruction size in bytes, opcode included.
    pub fn size(&self) -> u16 {
        match self {
            AddrMode::Single | AddrMode::Accumulator => 1,
            AddrMode::Absolute | AddrMode::AbsoluteX | AddrMode::AbsoluteY => 3,
            _ => 2,
        }
    }

    /// Short code used by the opcode table ("zp", "absx", ...).
    pub fn code(&self) -> &'static str {
        MODE_STR.get_by_left(self).unwrap()
    }

    pub fn parse(s: &str) -> Option<AddrMode> {
        MODE_STR.get_by_right(s).copied()
    }
}

#[test]
fn test() {
    assert_eq!(AddrMode::Single.size(), 1);
    assert_eq!(AddrMode::Immediate.size(), 2);
    assert_eq!(AddrMode::AbsoluteY.size(), 3);
    assert_eq!(AddrMode::ZeroPageX.code(), "zpx");
    assert_eq!(AddrMode::parse("rel"), Some(AddrMode::Relative));
    assert_eq!(AddrMode::parse("hoge"), None);
}
