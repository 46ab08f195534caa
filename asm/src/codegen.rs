// codegen.rs

use crate::cartridge::Cartridge;
use crate::directive::{Directives, Includes, Value};
use crate::error::Error;
use crate::label::Labels;
use crate::parser::{Stmt, StmtKind};
use crate::token::{Token, TokenKind};
use c6502::mnemonic::Mnemonic;
use c6502::mode::AddrMode;
use c6502::opcode;

/// Pass 2: resolve operands, look up opcodes and build the cartridge.
/// Every semantic error is collected; the walk never stops early, so one
/// run reports every bad statement.
pub fn encode(
    stmts: &[Stmt],
    labels: &Labels,
    directives: &Directives,
    includes: &mut Includes,
) -> (Cartridge, Vec<Error>) {
    let mut cart = Cartridge::new();
    let mut errors = Vec::new();
    for stmt in stmts {
        match stmt.kind {
            StmtKind::Rs => {
                // the name was bound in pass 1; only the pointer moves here
                if let Some(size) = stmt.children[2].literal() {
                    cart.rs = cart.rs.wrapping_add(size);
                }
            }
            StmtKind::Directive => {
                if let Err(e) = run_directive(stmt, labels, directives, includes, &mut cart) {
                    errors.push(e);
                }
            }
            _ => {
                if let Some(mode) = stmt.kind.mode() {
                    match instruction_bytes(stmt, mode, labels, cart.pc) {
                        Ok(bytes) => cart.append(&bytes),
                        Err(e) => errors.push(e),
                    }
                }
            }
        }
    }
    (cart, errors)
}

fn run_directive(
    stmt: &Stmt,
    labels: &Labels,
    directives: &Directives,
    includes: &mut Includes,
    cart: &mut Cartridge,
) -> Result<(), Error> {
    let name = stmt.children[0].text.as_str();
    let handler = directives
        .get(name)
        .ok_or_else(|| Error::UnknownDirective(name.to_string()))?;
    let arg = match stmt.children.len() {
        2 => resolve_value(&stmt.children[1], labels)?,
        _ => Value::List(&stmt.children[1..]),
    };
    handler(&arg, cart, includes)
}

/// Single-token directive argument: literal, resolved marker, or string.
fn resolve_value<'a>(token: &'a Token, labels: &Labels) -> Result<Value<'a>, Error> {
    if let Some(n) = token.literal() {
        return Ok(Value::Num(n));
    }
    match token.kind {
        TokenKind::Marker => labels
            .get(&token.text)
            .map(Value::Num)
            .ok_or_else(|| Error::UndefinedLabel(token.text.clone())),
        TokenKind::String => Ok(Value::Str(token.string_value())),
        _ => Err(Error::UndefinedLabel(token.text.clone())),
    }
}

fn operand_value(token: &Token, labels: &Labels) -> Result<u16, Error> {
    if let Some(n) = token.literal() {
        return Ok(n);
    }
    labels
        .get(&token.text)
        .ok_or_else(|| Error::UndefinedLabel(token.text.clone()))
}

fn instruction_bytes(
    stmt: &Stmt,
    mode: AddrMode,
    labels: &Labels,
    pc: u16,
) -> Result<Vec<u8>, Error> {
    let head = &stmt.children[0];
    let mnemonic = Mnemonic::parse(&head.text).map_err(|_| Error::InvalidOpcode {
        mnemonic: head.text.clone(),
        mode: mode.code(),
    })?;
    let operand = match stmt.kind {
        StmtKind::Implied | StmtKind::Accumulator => 0,
        StmtKind::Relative => {
            let target = operand_value(&stmt.children[1], labels)?;
            relative_offset(target, pc)
        }
        StmtKind::ImmediateWithModifier => {
            let address = operand_value(&stmt.children[3], labels)?;
            match stmt.children[1].text.as_str() {
                "#LOW" => address & 0x00FF,
                _ => (address & 0xFF00) >> 8,
            }
        }
        StmtKind::IndirectX | StmtKind::IndirectY => operand_value(&stmt.children[2], labels)?,
        _ => operand_value(&stmt.children[1], labels)?,
    };
    let opcode = opcode::opcode(mnemonic, mode).ok_or_else(|| Error::InvalidOpcode {
        mnemonic: mnemonic.to_string(),
        mode: mode.code(),
    })?;
    Ok(match mode.size() {
        1 => vec![opcode],
        2 => vec![opcode, (operand & 0xFF) as u8],
        _ => vec![opcode, (operand & 0xFF) as u8, ((operand >> 8) & 0xFF) as u8],
    })
}

/// Branch displacement from the instruction's own address, reproducing
/// the reference bias-126 encoding bit for bit: `d = 126 + (target - pc)`,
/// then 128 -> 0, under -> set the high bit, over -> mask to 7 bits.
fn relative_offset(target: u16, pc: u16) -> u16 {
    let d = 126 + (i32::from(target) - i32::from(pc));
    if d == 128 {
        0
    } else if d < 128 {
        (d | 128) as u16
    } else {
        (d & 127) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::relative_offset;

    #[test]
    fn relative_boundaries() {
        // branch to pc+2 lands exactly on the next instruction
        assert_eq!(relative_offset(0x12, 0x10), 0);
        assert_eq!(relative_offset(0x11, 0x10), 255);
        assert_eq!(relative_offset(0x13, 0x10), 1);
    }

    #[test]
    fn relative_backward() {
        // branch to self: d = 126
        assert_eq!(relative_offset(0x10, 0x10), 126 | 128);
        // two bytes back
        assert_eq!(relative_offset(0x0E, 0x10), 124 | 128);
    }
}
