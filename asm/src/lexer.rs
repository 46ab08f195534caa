// lexer.rs

use crate::error::Error;
use crate::token::{Pos, Token, TokenKind};
use c6502::mnemonic::Mnemonic;
use std::iter::Peekable;
use std::str::CharIndices;

/// Scans assembly source into tokens, collecting every lexical error
/// instead of stopping at the first one. Each iteration consumes at
/// least one character, so the scan always terminates.
pub struct Lexer<'a> {
    code: &'a str,
    iter: Peekable<CharIndices<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(code: &'a str) -> Self {
        Self {
            code,
            iter: code.char_indices().peekable(),
            line: 1,
            column: 1,
        }
    }

    pub fn scan(mut self) -> (Vec<Token>, Vec<Error>) {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();
        while let Some(&(start, c)) = self.iter.peek() {
            let pos = Pos {
                line: self.line,
                column: self.column,
            };

            // Whitespace and comments are consumed but never emitted
            if c == '\n' {
                self.iter.next();
                tokens.push(Token::new(TokenKind::Endline, "\n", pos));
                self.line += 1;
                self.column = 1;
                continue;
            }
            if c.is_whitespace() {
                let end = self.take_while(|ch| ch.is_whitespace() && ch != '\n');
                self.advance_column(start, end);
                continue;
            }
            if c == ';' {
                let end = self.take_while(|ch| ch != '\n');
                self.advance_column(start, end);
                continue;
            }

            match self.next_token(start, c) {
                Ok(kind) => {
                    let end = self.end_index();
                    let text = match kind {
                        // the declaration colon is syntax, not part of the name
                        TokenKind::Label => self.code[start..end].trim_end_matches(':'),
                        _ => &self.code[start..end],
                    };
                    tokens.push(Token::new(kind, text, pos));
                    self.advance_column(start, end);
                }
                Err(()) => {
                    // Recover past the maximal run of non-whitespace characters
                    let end = self.take_while(|ch| !ch.is_whitespace());
                    errors.push(Error::InvalidToken {
                        value: self.code[start..end].to_string(),
                        line: pos.line,
                        column: pos.column,
                    });
                    self.advance_column(start, end);
                }
            }
        }
        (tokens, errors)
    }

    fn next_token(&mut self, start: usize, c: char) -> Result<TokenKind, ()> {
        match c {
            ',' => self.single(TokenKind::Separator),
            '(' => self.single(TokenKind::Open),
            ')' => self.single(TokenKind::Close),
            '[' => self.single(TokenKind::OpenBracket),
            ']' => self.single(TokenKind::CloseBracket),
            '$' => {
                self.iter.next();
                let end = self.take_while(|ch| ch.is_ascii_hexdigit());
                match end - (start + 1) {
                    2..=4 => Ok(TokenKind::Address),
                    _ => Err(()),
                }
            }
            '#' => {
                self.iter.next();
                match self.iter.peek().map(|&(_, ch)| ch) {
                    Some('$') => {
                        self.iter.next();
                        let end = self.take_while(|ch| ch.is_ascii_hexdigit());
                        match end - (start + 2) {
                            2 => Ok(TokenKind::HexNumber),
                            _ => Err(()),
                        }
                    }
                    Some('%') => {
                        self.iter.next();
                        let end = self.take_while(|ch| ch == '0' || ch == '1');
                        match end - (start + 2) {
                            8 => Ok(TokenKind::BinaryNumber),
                            _ => Err(()),
                        }
                    }
                    _ => {
                        let end = self.take_while(|ch| ch.is_ascii_alphabetic());
                        match &self.code[start..end] {
                            "#LOW" | "#HIGH" => Ok(TokenKind::Modifier),
                            _ => Err(()),
                        }
                    }
                }
            }
            '"' => {
                self.iter.next();
                self.take_while(|ch| ch != '"' && ch != '\n');
                match self.iter.peek() {
                    Some(&(_, '"')) => {
                        self.iter.next();
                        Ok(TokenKind::String)
                    }
                    _ => Err(()),
                }
            }
            '.' => {
                self.iter.next();
                let end = self.take_while(|ch| ch.is_ascii_lowercase());
                if end > start + 1 {
                    Ok(TokenKind::Directive)
                } else {
                    Err(())
                }
            }
            c if c.is_ascii_digit() => {
                self.take_while(|ch| ch.is_ascii_digit());
                Ok(TokenKind::Decimal)
            }
            c if c.is_ascii_alphabetic() => {
                let end = self.take_while(|ch| ch.is_ascii_alphanumeric());
                let name = &self.code[start..end];
                if Mnemonic::parse(name).is_ok() {
                    Ok(TokenKind::Instruction)
                } else if name == "A" {
                    Ok(TokenKind::Accumulator)
                } else if name == "X" || name == "Y" {
                    Ok(TokenKind::Register)
                } else if name.len() >= 2 && name.as_bytes()[1].is_ascii_alphabetic() {
                    if let Some(&(_, ':')) = self.iter.peek() {
                        self.iter.next();
                        Ok(TokenKind::Label)
                    } else {
                        Ok(TokenKind::Marker)
                    }
                } else {
                    Err(())
                }
            }
            _ => Err(()),
        }
    }

    fn single(&mut self, kind: TokenKind) -> Result<TokenKind, ()> {
        self.iter.next();
        Ok(kind)
    }

    /// Consume characters while `pred` holds; returns the byte index just
    /// past the consumed span.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        while let Some(&(_, ch)) = self.iter.peek() {
            if pred(ch) {
                self.iter.next();
            } else {
                break;
            }
        }
        self.end_index()
    }

    fn end_index(&mut self) -> usize {
        self.iter.peek().map(|&(i, _)| i).unwrap_or(self.code.len())
    }

    fn advance_column(&mut self, start: usize, end: usize) {
        self.column += self.code[start..end].chars().count();
    }
}
