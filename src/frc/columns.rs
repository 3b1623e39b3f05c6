use super::error::Error;
use super::lexer;

/// Column layout of an `#atom_types` section, taken from its `!Ver` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomColumns {
    pub name: usize,
    pub mass: usize,
    pub element: Option<usize>,
    pub connections: Option<usize>,
    /// Free-text description; everything from here to the end of the line.
    pub description: usize,
}

/// One `#atom_types` data line split by [`AtomColumns`].
#[derive(Debug, Clone, PartialEq)]
pub struct AtomColumnsRecord {
    pub name: String,
    pub mass: String,
    pub element: Option<String>,
    pub connections: Option<String>,
    pub description: String,
}

impl AtomColumns {
    /// Returns `true` if `text` is a column-naming `!Ver` line.
    pub fn is_header(text: &str) -> bool {
        text.trim_start()
            .get(..4)
            .is_some_and(|p| p.eq_ignore_ascii_case("!ver"))
    }

    /// Reads the column positions named on a `!Ver` line.
    ///
    /// Matching is case-insensitive. The `type` and `mass` columns are
    /// required; without an explicit `comment` column the description starts
    /// one past the last known column.
    pub fn from_header(line: usize, text: &str) -> Result<Self, Error> {
        let mut name = None;
        let mut mass = None;
        let mut element = None;
        let mut connections = None;
        let mut comment = None;

        for (index, label) in text.split_whitespace().enumerate() {
            let label = label.trim_start_matches('!').to_ascii_lowercase();
            match label.as_str() {
                "type" => name = Some(index),
                "mass" => mass = Some(index),
                "element" => element = Some(index),
                "connection" | "connections" => connections = Some(index),
                "comment" => comment = Some(index),
                _ => {}
            }
        }

        let (Some(name), Some(mass)) = (name, mass) else {
            let missing: Vec<&str> = [("type", name), ("mass", mass)]
                .into_iter()
                .filter(|(_, col)| col.is_none())
                .map(|(label, _)| label)
                .collect();
            return Err(Error::missing_columns(line, &missing));
        };

        let last_known = [Some(name), Some(mass), element, connections]
            .into_iter()
            .flatten()
            .max()
            .unwrap_or(mass);

        Ok(Self {
            name,
            mass,
            element,
            connections,
            description: comment.unwrap_or(last_known + 1),
        })
    }

    /// Splits an atom-type data line; `None` if it lacks a required column.
    pub fn split(&self, text: &str, comment_chars: &str) -> Option<AtomColumnsRecord> {
        let tokens = lexer::split(text, self.description + 1, comment_chars);
        let required = [Some(self.name), Some(self.mass), self.element, self.connections]
            .into_iter()
            .flatten()
            .max()
            .unwrap_or(self.mass);
        if tokens.len() <= required {
            return None;
        }

        let column = |index: Option<usize>| {
            index
                .and_then(|i| tokens.get(i))
                .map(|t| lexer::remove_outer_quotes(t).to_string())
        };

        Some(AtomColumnsRecord {
            name: tokens[self.name].clone(),
            mass: tokens[self.mass].clone(),
            element: column(self.element),
            connections: column(self.connections),
            description: column(Some(self.description))
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
        })
    }
}
