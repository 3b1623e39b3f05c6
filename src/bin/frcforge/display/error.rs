use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    let hints = HintCollector::collect(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn collect(err: &Error) -> Vec<String> {
        let mut collector = Self {
            hints: Vec::new(),
            has_typed_hints: false,
        };

        collector.collect_conversion_hints(err);
        collector.collect_read_hints(err);

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        collector.hints
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn collect_conversion_hints(&mut self, err: &Error) {
        use frc_forge::FrcError;

        let Some(conv_err) = err.downcast_ref::<FrcError>() else {
            return;
        };

        self.has_typed_hints = true;

        match conv_err {
            FrcError::Read(read_err) => self.add_read_hints(read_err),

            FrcError::ConfigParse(_) => {
                self.add("The --config file is not valid TOML for conversion settings");
                self.add("Known keys: styles, atom_types, include_auto, equivalences, comment_chars");
                self.add("Style names: harmonic, class2, morse, charmm, cvff, lj/cut");
            }

            FrcError::InconsistentPriority { line, .. } => {
                self.add(format!(
                    "Every '*n' priority suffix on the entry at line {} must use the same n",
                    line
                ));
                self.add("Remove the suffix from names that should not carry a priority");
            }

            FrcError::UnresolvedReference { kind, reference, .. } => {
                self.add(format!(
                    "Add a {} entry for {} to a primitive {} section",
                    kind, reference, kind
                ));
                self.add("Check that the style selection does not exclude the file's only definition");
                self.add("Auto-generalized references only resolve against other _auto entries");
            }

            FrcError::IncompleteCrossTerm { key, .. } => {
                self.add(format!(
                    "Give #angle-angle a coefficient for every leaf of the improper {}",
                    key
                ));
                self.add("Or select --improper-style cvff to skip class2 impropers");
            }

            FrcError::SymmetryContradiction { key, .. } => {
                self.add(format!(
                    "The coefficients of {} differ between positions with identical atom names",
                    key
                ));
                self.add("Make the direction-dependent coefficients equal for matching names");
            }
        }
    }

    fn collect_read_hints(&mut self, err: &Error) {
        use frc_forge::frc::Error as ReadError;

        if self.has_typed_hints {
            return;
        }
        let Some(read_err) = err.downcast_ref::<ReadError>() else {
            return;
        };

        self.has_typed_hints = true;
        self.add_read_hints(read_err);
    }

    fn add_read_hints(&mut self, err: &frc_forge::frc::Error) {
        use frc_forge::frc::Error as ReadError;

        match err {
            ReadError::Io { source } => self.add_std_io_hints(source),

            ReadError::Parse { line, .. } => {
                self.add(format!("Inspect the FRC file around line {}", line));
                self.add("Numeric columns must hold plain decimal numbers");
                self.add("Quote names containing spaces or comment characters");
            }

            ReadError::MissingColumns { .. } => {
                self.add("Each #atom_types block needs a '!Ver' line naming its columns");
                self.add("Example: !Ver Ref Type Mass Element connection Comment");
            }
        }
    }

    fn add_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Check file permissions with `ls -la`");
            }

            ErrorKind::InvalidData => {
                self.add("The input is not valid UTF-8 text");
                self.add("FRC files are plain text; convert the encoding first");
            }

            _ => {
                self.add("I/O operation failed");
                self.add("Check the file path and permissions");
            }
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("terminal") || msg.contains("stdin") {
            self.add("Provide input via -i/--input or pipe an FRC file to stdin");
            return;
        }

        if msg.contains("no such file") || msg.contains("not found") {
            self.add("Check that the file path is correct");
            self.add("Verify the file exists and is readable");
            return;
        }

        if msg.contains("warning") {
            self.add("Run without --strict to accept warnings");
            self.add("Use --bond-style/--angle-style to skip unwanted cross terms");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    err.chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase()
}
