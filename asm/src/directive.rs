// directive.rs

use indexmap::IndexMap;
use std::path::PathBuf;

use crate::cartridge::Cartridge;
use crate::error::Error;
use crate::token::Token;

/// Resolved directive argument: a single numeric value, a string, or the
/// raw child tokens of a multi-value list.
pub enum Value<'a> {
    Num(u16),
    Str(&'a str),
    List(&'a [Token]),
}

impl Value<'_> {
    /// Every numeric value carried by the argument, in order.
    fn numbers(&self) -> Vec<u16> {
        match self {
            Value::Num(n) => vec![*n],
            Value::List(tokens) => tokens.iter().filter_map(Token::literal).collect(),
            Value::Str(_) => vec![],
        }
    }
}

pub type Handler = fn(&Value, &mut Cartridge, &mut Includes) -> Result<(), Error>;

/// Directive name -> handler registry, built once per assembly run.
pub struct Directives {
    list: IndexMap<&'static str, Handler>,
}

impl Directives {
    pub fn new() -> Self {
        let mut list: IndexMap<&'static str, Handler> = IndexMap::new();
        list.insert(".org", d_org);
        list.insert(".db", d_db);
        list.insert(".dw", d_dw);
        list.insert(".incbin", d_incbin);
        list.insert(".rsset", d_rsset);
        list.insert(".bank", d_bank);
        list.insert(".inesprg", d_inesprg);
        list.insert(".ineschr", d_ineschr);
        list.insert(".inesmap", d_inesmap);
        list.insert(".inesmir", d_inesmir);
        Directives { list }
    }

    pub fn get(&self, name: &str) -> Option<Handler> {
        self.list.get(name).copied()
    }
}

fn d_org(arg: &Value, cart: &mut Cartridge, _: &mut Includes) -> Result<(), Error> {
    if let Value::Num(n) = arg {
        cart.pc = *n;
    }
    Ok(())
}

fn d_db(arg: &Value, cart: &mut Cartridge, _: &mut Includes) -> Result<(), Error> {
    for value in arg.numbers() {
        cart.append(&[(value & 0xFF) as u8]);
    }
    Ok(())
}

fn d_dw(arg: &Value, cart: &mut Cartridge, _: &mut Includes) -> Result<(), Error> {
    for value in arg.numbers() {
        cart.append(&[(value & 0xFF) as u8, (value >> 8) as u8]);
    }
    Ok(())
}

fn d_incbin(arg: &Value, cart: &mut Cartridge, includes: &mut Includes) -> Result<(), Error> {
    if let Value::Str(name) = arg {
        match includes.load(name) {
            Some(bytes) => cart.append(bytes),
            None => return Err(Error::IncludeNotFound(name.to_string())),
        }
    }
    Ok(())
}

fn d_rsset(arg: &Value, cart: &mut Cartridge, _: &mut Includes) -> Result<(), Error> {
    if let Value::Num(n) = arg {
        cart.rs = *n;
    }
    Ok(())
}

fn d_bank(arg: &Value, cart: &mut Cartridge, _: &mut Includes) -> Result<(), Error> {
    if let Value::Num(n) = arg {
        cart.bank = *n;
    }
    Ok(())
}

fn d_inesprg(arg: &Value, cart: &mut Cartridge, _: &mut Includes) -> Result<(), Error> {
    if let Value::Num(n) = arg {
        cart.prg_banks = Some(*n as u8);
    }
    Ok(())
}

fn d_ineschr(arg: &Value, cart: &mut Cartridge, _: &mut Includes) -> Result<(), Error> {
    if let Value::Num(n) = arg {
        cart.chr_banks = Some(*n as u8);
    }
    Ok(())
}

fn d_inesmap(arg: &Value, cart: &mut Cartridge, _: &mut Includes) -> Result<(), Error> {
    if let Value::Num(n) = arg {
        cart.mapper = Some(*n as u8);
    }
    Ok(())
}

fn d_inesmir(arg: &Value, cart: &mut Cartridge, _: &mut Includes) -> Result<(), Error> {
    if let Value::Num(n) = arg {
        cart.mirroring = Some(*n as u8);
    }
    Ok(())
}

// ----------------------------------------------------------------------------
// Included binaries

/// Per-run cache of `.incbin` payloads. Loaded once, so the resolver's
/// size accounting and the encoder's emission always agree.
pub struct Includes {
    dir: Option<PathBuf>,
    files: IndexMap<String, Vec<u8>>,
}

impl Includes {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Includes {
            dir,
            files: IndexMap::new(),
        }
    }

    pub fn load(&mut self, name: &str) -> Option<&[u8]> {
        if !self.files.contains_key(name) {
            let path = match &self.dir {
                Some(dir) => dir.join(name),
                None => PathBuf::from(name),
            };
            let bytes = std::fs::read(path).ok()?;
            self.files.insert(name.to_string(), bytes);
        }
        self.files.get(name).map(Vec::as_slice)
    }

    /// Byte length of the named file, 0 when it cannot be read.
    pub fn size(&mut self, name: &str) -> u16 {
        self.load(name).map(|bytes| bytes.len() as u16).unwrap_or(0)
    }
}
