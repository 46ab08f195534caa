pub mod cartridge;
pub mod codegen;
pub mod directive;
pub mod error;
pub mod label;
pub mod lexer;
pub mod parser;
pub mod token;

use std::path::PathBuf;

use crate::directive::{Directives, Includes};
use crate::error::Error;
use crate::lexer::Lexer;

pub struct Options {
    /// Wrap the code stream in an iNES container
    pub ines: bool,
    /// Directory `.incbin` paths are resolved against
    pub include_dir: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            ines: true,
            include_dir: None,
        }
    }
}

/// Assemble one translation unit into its output bytes.
///
/// Every stage runs even when an earlier one reported errors, feeding its
/// partial result forward, so lexical, syntax and semantic errors from a
/// single source all come back in one ordered list. Any error fails the
/// run; there is no partial binary on failure.
pub fn assemble(code: &str, opts: &Options) -> Result<Vec<u8>, Vec<Error>> {
    let (tokens, mut errors) = Lexer::new(code).scan();
    let (stmts, syntax_errors) = parser::parse(&tokens);
    errors.extend(syntax_errors);

    let mut includes = Includes::new(opts.include_dir.clone());
    let labels = label::collect_labels(&stmts, &mut includes);
    let directives = Directives::new();
    let (cart, semantic_errors) = codegen::encode(&stmts, &labels, &directives, &mut includes);
    errors.extend(semantic_errors);

    if !errors.is_empty() {
        return Err(errors);
    }
    if opts.ines {
        cart.ines_code().map_err(|e| vec![e])
    } else {
        Ok(cart.raw_code().to_vec())
    }
}
