// token.rs

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, text: &str, pos: Pos) -> Self {
        Token {
            kind,
            text: text.to_string(),
            pos,
        }
    }

    /// Numeric value of a literal token. `None` for anything symbolic.
    pub fn literal(&self) -> Option<u16> {
        match self.kind {
            TokenKind::Address => u16::from_str_radix(&self.text[1..], 16).ok(),
            TokenKind::HexNumber => u16::from_str_radix(&self.text[2..], 16).ok(),
            TokenKind::BinaryNumber => u16::from_str_radix(&self.text[2..], 2).ok(),
            TokenKind::Decimal => self.text.parse::<u32>().ok().map(|v| v as u16),
            _ => None,
        }
    }

    /// Contents of a string literal, quotes stripped.
    pub fn string_value(&self) -> &str {
        self.text.trim_matches('"')
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Instruction,  // LDA, STA, ...
    Address,      // $C000
    HexNumber,    // #$10
    BinaryNumber, // #%00000001
    Decimal,      // 128
    String,       // "sprites.chr"
    Label,        // name: (declaration, colon stripped)
    Marker,       // name (reference)
    Directive,    // .org
    Modifier,     // #LOW / #HIGH
    Accumulator,  // A
    Register,     // X / Y
    Separator,    // ','
    Open,         // '('
    Close,        // ')'
    OpenBracket,  // '['
    CloseBracket, // ']'
    Endline,      // '\n'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    pub line: usize,
    pub column: usize,
}
