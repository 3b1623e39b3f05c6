use std::io::BufRead;
use std::ops::Range;

use log::debug;

use super::error::Error;
use super::lexer;
use super::section::{Phase, SectionKind};

/// One data line routed to the section it appeared in.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionLine {
    pub kind: SectionKind,
    /// Set when the section header's label ends in `_auto`.
    pub auto: bool,
    /// Index of the header this line follows; distinguishes repeated sections.
    pub block: usize,
    /// 1-based line number in the input.
    pub line: usize,
    /// The raw line with its line terminator removed.
    pub text: String,
    pub tokens: Vec<String>,
}

impl SectionLine {
    /// Returns `true` for `@type`-style directive lines.
    pub fn is_directive(&self) -> bool {
        self.tokens.first().is_some_and(|t| t.starts_with('@'))
    }

    /// Atom-name columns. The range must lie within the section's minimum
    /// token count.
    pub fn names(&self, range: Range<usize>) -> &[String] {
        &self.tokens[range]
    }

    pub fn number(&self, index: usize) -> Result<f64, Error> {
        let token = self.tokens.get(index).ok_or_else(|| {
            Error::parse(
                self.line,
                format!("{} line is missing field {}", self.kind, index + 1),
            )
        })?;
        self.parse_number(token)
    }

    /// Parses an optional numeric column, falling back to `default` when the
    /// line is too short to carry it.
    pub fn number_or(&self, index: usize, default: f64) -> Result<f64, Error> {
        match self.tokens.get(index) {
            Some(token) => self.parse_number(token),
            None => Ok(default),
        }
    }

    fn parse_number(&self, token: &str) -> Result<f64, Error> {
        token.parse::<f64>().map_err(|_| {
            Error::parse(
                self.line,
                format!("invalid number '{}' in {} section", token, self.kind),
            )
        })
    }
}

/// The routed contents of an FRC file.
#[derive(Debug, Clone, Default)]
pub struct FrcDocument {
    lines: Vec<SectionLine>,
    unsupported: Vec<SectionKind>,
}

impl FrcDocument {
    /// All routed lines in file order.
    pub fn lines(&self) -> impl Iterator<Item = &SectionLine> {
        self.lines.iter()
    }

    pub fn section(&self, kind: SectionKind) -> impl Iterator<Item = &SectionLine> {
        self.lines.iter().filter(move |l| l.kind == kind)
    }

    /// Recognized-but-unsupported sections that carried data, each listed once.
    pub fn unsupported(&self) -> &[SectionKind] {
        &self.unsupported
    }
}

/// Line-by-line section state machine.
///
/// Header lines switch the current section; data lines of supported
/// sections are tokenized and kept, short lines are dropped.
#[derive(Debug)]
pub struct SectionReader<'a> {
    comment_chars: &'a str,
    kind: SectionKind,
    auto: bool,
    block: usize,
    document: FrcDocument,
}

impl<'a> SectionReader<'a> {
    pub fn new(comment_chars: &'a str) -> Self {
        Self {
            comment_chars,
            kind: SectionKind::Ignored,
            auto: false,
            block: 0,
            document: FrcDocument::default(),
        }
    }

    pub fn feed(&mut self, line: usize, raw: &str) {
        let text = raw.trim_end_matches(['\r', '\n']);
        let tokens = lexer::split(text, 0, self.comment_chars);

        if let Some(first) = tokens.first().filter(|t| t.starts_with('#')) {
            self.kind = SectionKind::from_header(first);
            self.auto = tokens.last().is_some_and(|t| t.ends_with("_auto"));
            self.block += 1;
            if self.kind == SectionKind::Ignored {
                debug!("line {line}: not converting section '{first}'");
            }
            return;
        }

        match self.kind.phase() {
            Phase::Ignored => return,
            Phase::Unsupported => {
                if !tokens.is_empty() && !self.document.unsupported.contains(&self.kind) {
                    self.document.unsupported.push(self.kind);
                }
                return;
            }
            _ => {}
        }

        // Atom types keep their comment lines: the `!Ver` line names the columns.
        if tokens.is_empty() && self.kind != SectionKind::AtomTypes {
            return;
        }

        let directive = tokens.first().is_some_and(|t| t.starts_with('@'));
        if directive {
            if !self.kind.takes_directives() {
                debug!("line {line}: directive in {} ignored", self.kind);
                return;
            }
        } else if tokens.len() < self.kind.min_tokens() {
            debug!(
                "line {line}: {} expects at least {} fields, found {}; skipped",
                self.kind,
                self.kind.min_tokens(),
                tokens.len()
            );
            return;
        }

        self.document.lines.push(SectionLine {
            kind: self.kind,
            auto: self.auto,
            block: self.block,
            line,
            text: text.to_string(),
            tokens,
        });
    }

    pub fn finish(self) -> FrcDocument {
        self.document
    }
}

/// Routes every line of an in-memory FRC text.
pub fn parse_str(text: &str, comment_chars: &str) -> FrcDocument {
    let mut reader = SectionReader::new(comment_chars);
    for (index, line) in text.lines().enumerate() {
        reader.feed(index + 1, line);
    }
    reader.finish()
}

/// Routes every line read from `reader`.
pub fn read<R: BufRead>(reader: R, comment_chars: &str) -> Result<FrcDocument, Error> {
    let mut sections = SectionReader::new(comment_chars);
    for (index, line) in reader.lines().enumerate() {
        sections.feed(index + 1, &line?);
    }
    Ok(sections.finish())
}
