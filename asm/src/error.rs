use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid token `{value}` at line {line} column {column}")]
    InvalidToken {
        value: String,
        line: usize,
        column: usize,
    },

    #[error("Invalid syntax at line {line} column {column}: `{found}`")]
    InvalidSyntax {
        line: usize,
        column: usize,
        found: String,
    },

    #[error("Unknown directive: `{0}`")]
    UnknownDirective(String),

    #[error("Invalid opcode for addressing mode: `{mnemonic}` ({mode})")]
    InvalidOpcode {
        mnemonic: String,
        mode: &'static str,
    },

    #[error("Undefined label: `{0}`")]
    UndefinedLabel(String),

    #[error("Cannot include binary: `{0}`")]
    IncludeNotFound(String),

    #[error("Header field `{0}` was never set")]
    MissingHeaderField(&'static str),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    /// Source position of the offending span, when the error carries one
    pub fn pos(&self) -> Option<(usize, usize)> {
        match self {
            Error::InvalidToken { line, column, .. }
            | Error::InvalidSyntax { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }

    /// Print error with diagnostic information showing the source line
    pub fn print_diag(&self, source: &str) {
        cprintln!("<red,bold>error</>: {}", self);

        if let Some((line, column)) = self.pos() {
            cprintln!("     <blue>--></> <underline>{}:{}</>", line, column);
            cprintln!("      <blue>|</>");

            let content = source.lines().nth(line - 1).unwrap_or("");
            cprintln!(" <blue>{:>4} |</> {}", line, content);
            cprintln!("      <blue>|</>");
        }
    }
}
