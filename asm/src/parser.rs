// parser.rs

use crate::error::Error;
use crate::token::{Token, TokenKind};
use c6502::mnemonic::Mnemonic;
use c6502::mode::AddrMode;

// ----------------------------------------------------------------------------
// Statement

/// One addressing-mode/grammar category per statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StmtKind {
    Rs,
    Directive,
    Relative,
    Immediate,
    ImmediateWithModifier,
    Accumulator,
    ZeroPageX,
    ZeroPageY,
    ZeroPage,
    AbsoluteX,
    AbsoluteY,
    Absolute,
    IndirectX,
    IndirectY,
    Implied,
}

impl StmtKind {
    /// Addressing mode used for opcode lookup. Directives and storage
    /// reservations encode no instruction.
    pub fn mode(&self) -> Option<AddrMode> {
        match self {
            StmtKind::Rs | StmtKind::Directive => None,
            StmtKind::Relative => Some(AddrMode::Relative),
            StmtKind::Immediate | StmtKind::ImmediateWithModifier => Some(AddrMode::Immediate),
            StmtKind::Accumulator => Some(AddrMode::Accumulator),
            StmtKind::ZeroPageX => Some(AddrMode::ZeroPageX),
            StmtKind::ZeroPageY => Some(AddrMode::ZeroPageY),
            StmtKind::ZeroPage => Some(AddrMode::ZeroPage),
            StmtKind::AbsoluteX => Some(AddrMode::AbsoluteX),
            StmtKind::AbsoluteY => Some(AddrMode::AbsoluteY),
            StmtKind::Absolute => Some(AddrMode::Absolute),
            StmtKind::IndirectX => Some(AddrMode::IndirectX),
            StmtKind::IndirectY => Some(AddrMode::IndirectY),
            StmtKind::Implied => Some(AddrMode::Single),
        }
    }

    /// Encoded size in bytes (0 for directives/reservations, which are
    /// sized separately).
    pub fn size(&self) -> u16 {
        self.mode().map(|m| m.size()).unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub children: Vec<Token>,
    pub labels: Vec<String>,
}

// ----------------------------------------------------------------------------
// Token predicates
//
// A predicate reports how many tokens it consumes at `index` (0 = no
// match). Only a trailing list predicate ever consumes more than one.

type Pred = fn(&[Token], usize) -> usize;

fn one(tokens: &[Token], index: usize, kind: TokenKind) -> usize {
    match tokens.get(index) {
        Some(t) if t.kind == kind => 1,
        _ => 0,
    }
}

fn one_value(tokens: &[Token], index: usize, kind: TokenKind, value: &str) -> usize {
    match tokens.get(index) {
        Some(t) if t.kind == kind && t.text == value => 1,
        _ => 0,
    }
}

fn t_instruction(tokens: &[Token], index: usize) -> usize {
    one(tokens, index, TokenKind::Instruction)
}

fn t_relative(tokens: &[Token], index: usize) -> usize {
    match tokens.get(index) {
        Some(t) if t.kind == TokenKind::Instruction => match Mnemonic::parse(&t.text) {
            Ok(m) if m.is_branch() => 1,
            _ => 0,
        },
        _ => 0,
    }
}

fn t_address(tokens: &[Token], index: usize) -> usize {
    one(tokens, index, TokenKind::Address)
}

/// A zero-page address literal is two hex digits: `$hh`.
fn t_zeropage(tokens: &[Token], index: usize) -> usize {
    match tokens.get(index) {
        Some(t) if t.kind == TokenKind::Address && t.text.len() == 3 => 1,
        _ => 0,
    }
}

fn t_marker(tokens: &[Token], index: usize) -> usize {
    one(tokens, index, TokenKind::Marker)
}

fn t_address_or_marker(tokens: &[Token], index: usize) -> usize {
    match t_address(tokens, index) {
        0 => t_marker(tokens, index),
        n => n,
    }
}

/// Literal data value: address, binary or decimal.
fn t_data(tokens: &[Token], index: usize) -> usize {
    match tokens.get(index) {
        Some(t)
            if matches!(
                t.kind,
                TokenKind::Address | TokenKind::BinaryNumber | TokenKind::Decimal
            ) =>
        {
            1
        }
        _ => 0,
    }
}

fn t_number(tokens: &[Token], index: usize) -> usize {
    match tokens.get(index) {
        Some(t)
            if matches!(
                t.kind,
                TokenKind::HexNumber | TokenKind::BinaryNumber | TokenKind::Decimal
            ) =>
        {
            1
        }
        _ => 0,
    }
}

fn t_separator(tokens: &[Token], index: usize) -> usize {
    one_value(tokens, index, TokenKind::Separator, ",")
}

fn t_accumulator(tokens: &[Token], index: usize) -> usize {
    one(tokens, index, TokenKind::Accumulator)
}

fn t_register_x(tokens: &[Token], index: usize) -> usize {
    one_value(tokens, index, TokenKind::Register, "X")
}

fn t_register_y(tokens: &[Token], index: usize) -> usize {
    one_value(tokens, index, TokenKind::Register, "Y")
}

fn t_open(tokens: &[Token], index: usize) -> usize {
    one(tokens, index, TokenKind::Open)
}

fn t_close(tokens: &[Token], index: usize) -> usize {
    one(tokens, index, TokenKind::Close)
}

/// NESASM accepts `[` / `]` as well as parens around indirect operands.
fn t_nesasm_open(tokens: &[Token], index: usize) -> usize {
    match one(tokens, index, TokenKind::Open) {
        0 => one(tokens, index, TokenKind::OpenBracket),
        n => n,
    }
}

fn t_nesasm_close(tokens: &[Token], index: usize) -> usize {
    match one(tokens, index, TokenKind::Close) {
        0 => one(tokens, index, TokenKind::CloseBracket),
        n => n,
    }
}

fn t_modifier(tokens: &[Token], index: usize) -> usize {
    one(tokens, index, TokenKind::Modifier)
}

fn t_directive(tokens: &[Token], index: usize) -> usize {
    one(tokens, index, TokenKind::Directive)
}

fn t_decimal(tokens: &[Token], index: usize) -> usize {
    one(tokens, index, TokenKind::Decimal)
}

fn t_binary_number(tokens: &[Token], index: usize) -> usize {
    one(tokens, index, TokenKind::BinaryNumber)
}

fn t_string(tokens: &[Token], index: usize) -> usize {
    one(tokens, index, TokenKind::String)
}

fn t_endline(tokens: &[Token], index: usize) -> usize {
    one(tokens, index, TokenKind::Endline)
}

/// Comma-separated list of data values running to the end of the line.
/// Matches only a complete, well-formed list.
fn t_list(tokens: &[Token], index: usize) -> usize {
    if t_data(tokens, index) == 0 || t_separator(tokens, index + 1) == 0 {
        return 0;
    }
    let mut arg = 0;
    loop {
        if t_separator(tokens, index + arg * 2 + 1) == 0 || t_data(tokens, index + arg * 2 + 2) == 0
        {
            return 0;
        }
        let next = index + arg * 2 + 3;
        if next == tokens.len() || t_endline(tokens, next) == 1 {
            break;
        }
        arg += 1;
    }
    (arg + 1) * 2 + 1
}

/// Directive argument: a value list, a single value, a marker or a string.
fn t_directive_argument(tokens: &[Token], index: usize) -> usize {
    static ARGUMENTS: &[Pred] = &[
        t_list,
        t_address,
        t_binary_number,
        t_marker,
        t_decimal,
        t_string,
    ];
    for pred in ARGUMENTS {
        let n = pred(tokens, index);
        if n > 0 {
            return n;
        }
    }
    0
}

// ----------------------------------------------------------------------------
// Grammar

struct Pattern {
    kind: StmtKind,
    preds: &'static [Pred],
}

/// Addressing-mode patterns in priority order; the first full match wins.
/// Zero-page forms sit above absolute so two-digit operands pick the
/// shorter encoding, and `Implied` is the one-token fallback at the end.
static GRAMMAR: &[Pattern] = &[
    Pattern {
        kind: StmtKind::Rs,
        preds: &[t_marker, t_directive, t_directive_argument],
    },
    Pattern {
        kind: StmtKind::Directive,
        preds: &[t_directive, t_directive_argument],
    },
    Pattern {
        kind: StmtKind::Relative,
        preds: &[t_relative, t_address_or_marker],
    },
    Pattern {
        kind: StmtKind::Immediate,
        preds: &[t_instruction, t_number],
    },
    Pattern {
        kind: StmtKind::ImmediateWithModifier,
        preds: &[
            t_instruction,
            t_modifier,
            t_open,
            t_address_or_marker,
            t_close,
        ],
    },
    Pattern {
        kind: StmtKind::Accumulator,
        preds: &[t_instruction, t_accumulator],
    },
    Pattern {
        kind: StmtKind::ZeroPageX,
        preds: &[t_instruction, t_zeropage, t_separator, t_register_x],
    },
    Pattern {
        kind: StmtKind::ZeroPageY,
        preds: &[t_instruction, t_zeropage, t_separator, t_register_y],
    },
    Pattern {
        kind: StmtKind::ZeroPage,
        preds: &[t_instruction, t_zeropage],
    },
    Pattern {
        kind: StmtKind::AbsoluteX,
        preds: &[t_instruction, t_address_or_marker, t_separator, t_register_x],
    },
    Pattern {
        kind: StmtKind::AbsoluteY,
        preds: &[t_instruction, t_address_or_marker, t_separator, t_register_y],
    },
    Pattern {
        kind: StmtKind::Absolute,
        preds: &[t_instruction, t_address_or_marker],
    },
    Pattern {
        kind: StmtKind::IndirectX,
        preds: &[
            t_instruction,
            t_nesasm_open,
            t_address_or_marker,
            t_separator,
            t_register_x,
            t_nesasm_close,
        ],
    },
    Pattern {
        kind: StmtKind::IndirectY,
        preds: &[
            t_instruction,
            t_nesasm_open,
            t_address_or_marker,
            t_nesasm_close,
            t_separator,
            t_register_y,
        ],
    },
    Pattern {
        kind: StmtKind::Implied,
        preds: &[t_instruction],
    },
];

fn match_pattern(pattern: &Pattern, tokens: &[Token], start: usize) -> Option<usize> {
    let mut consumed = 0;
    for pred in pattern.preds {
        match pred(tokens, start + consumed) {
            0 => return None,
            n => consumed += n,
        }
    }
    Some(consumed)
}

// ----------------------------------------------------------------------------
// Scan

/// Group the token stream into statements, collecting every syntax error.
/// Label declarations accumulate and attach to the next statement.
pub fn parse(tokens: &[Token]) -> (Vec<Stmt>, Vec<Error>) {
    let mut stmts = Vec::new();
    let mut errors = Vec::new();
    let mut labels: Vec<String> = Vec::new();
    let mut x = 0;
    while x < tokens.len() {
        if tokens[x].kind == TokenKind::Label {
            labels.push(tokens[x].text.clone());
            x += 1;
            continue;
        }
        if tokens[x].kind == TokenKind::Endline {
            x += 1;
            continue;
        }
        match GRAMMAR
            .iter()
            .find_map(|pattern| match_pattern(pattern, tokens, x).map(|size| (pattern.kind, size)))
        {
            Some((kind, size)) => {
                stmts.push(Stmt {
                    kind,
                    children: tokens[x..x + size].to_vec(),
                    labels: std::mem::take(&mut labels),
                });
                x += size;
            }
            None => {
                // Skip to the end of the line so later lines still parse
                let mut walk = 0;
                while x + walk < tokens.len() && tokens[x + walk].kind != TokenKind::Endline {
                    walk += 1;
                }
                errors.push(Error::InvalidSyntax {
                    line: tokens[x].pos.line,
                    column: tokens[x].pos.column,
                    found: tokens[x..x + walk]
                        .iter()
                        .map(|t| t.text.as_str())
                        .collect::<Vec<_>>()
                        .join(" "),
                });
                x += walk;
            }
        }
    }
    (stmts, errors)
}
