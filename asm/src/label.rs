use indexmap::IndexMap;

use crate::directive::Includes;
use crate::parser::{Stmt, StmtKind};

/// Symbol table: label name -> resolved absolute address. Filled during
/// the address-resolution pass, read-only while encoding.
pub struct Labels {
    labels: IndexMap<String, u16>,
}

impl Labels {
    pub fn new() -> Self {
        Labels {
            labels: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, name: String, address: u16) -> Option<u16> {
        self.labels.insert(name, address)
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.labels.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &u16)> {
        self.labels.iter()
    }
}

/// Pass 1: walk the statements computing the address each one's bytes
/// will start at, binding every pending label. Reservation names bind to
/// the separate `rs` counter and never consume code space. Cannot fail;
/// unresolved forward references are the encoder's problem.
pub fn collect_labels(stmts: &[Stmt], includes: &mut Includes) -> Labels {
    let mut labels = Labels::new();
    let mut address: u16 = 0;
    let mut rs: u16 = 0;
    for stmt in stmts {
        // `.org` moves the counter before any pending label binds
        if stmt.kind == StmtKind::Directive && stmt.children[0].text == ".org" {
            if let Some(origin) = stmt.children[1].literal() {
                address = origin;
            }
        }
        for label in &stmt.labels {
            labels.insert(label.clone(), address);
        }
        match stmt.kind {
            StmtKind::Rs => {
                labels.insert(stmt.children[0].text.clone(), rs);
                if let Some(size) = stmt.children[2].literal() {
                    rs = rs.wrapping_add(size);
                }
            }
            StmtKind::Directive => match stmt.children[0].text.as_str() {
                ".db" => address = address.wrapping_add(data_len(stmt)),
                ".dw" => address = address.wrapping_add(2 * data_len(stmt)),
                ".incbin" => {
                    address = address.wrapping_add(includes.size(stmt.children[1].string_value()));
                }
                ".rsset" => {
                    if let Some(base) = stmt.children[1].literal() {
                        rs = base;
                    }
                }
                _ => {}
            },
            _ => address = address.wrapping_add(stmt.kind.size()),
        }
    }
    labels
}

/// Count of literal data values in a directive's children.
fn data_len(stmt: &Stmt) -> u16 {
    stmt.children
        .iter()
        .filter(|t| t.literal().is_some())
        .count() as u16
}
