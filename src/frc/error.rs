use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse FRC data: {details} (at line {line})")]
    Parse { line: usize, details: String },

    #[error("#atom_types data at line {line} needs a '!Ver' line naming the {missing} column(s)")]
    MissingColumns { line: usize, missing: String },
}

impl Error {
    pub fn parse(line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            line,
            details: details.into(),
        }
    }

    pub fn missing_columns(line: usize, missing: &[&str]) -> Self {
        Self::MissingColumns {
            line,
            missing: missing.join(", "),
        }
    }

    /// Line number the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Io { .. } => None,
            Self::Parse { line, .. } | Self::MissingColumns { line, .. } => Some(*line),
        }
    }
}
