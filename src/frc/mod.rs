use std::fs::File;
use std::io::BufReader;
use std::path::Path;

mod columns;
mod error;
pub mod lexer;
mod reader;
mod section;

pub use columns::{AtomColumns, AtomColumnsRecord};
pub use error::Error;
pub use reader::{FrcDocument, SectionLine, SectionReader, parse_str, read};
pub use section::{Phase, SectionKind};

/// Reads and routes an FRC file from disk.
pub fn read_file(path: impl AsRef<Path>, comment_chars: &str) -> Result<FrcDocument, Error> {
    let file = File::open(path)?;
    read(BufReader::new(file), comment_chars)
}
