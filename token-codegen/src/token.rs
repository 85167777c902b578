//! Token model: the flat, ordered dictionary the formatters consume.
//! Built once by the loader and read-only afterwards.

/// One design token after name transform and reference resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Identifier used in the emitted source (e.g. `colorBaseBlue100`).
    pub name: String,
    /// Resolved value rendered as text.
    pub value: String,
    /// Key path in the source tree (e.g. `["color", "base", "blue-100"]`).
    pub path: Vec<String>,
}

impl Token {
    pub fn new(name: impl Into<String>, value: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            path,
        }
    }

    /// Dotted form of the path, as used by `{a.b.c}` references.
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }

    /// True if the token lives under `prefix` (a dotted path, segment-aligned).
    pub fn is_under(&self, prefix: &str) -> bool {
        let wanted: Vec<&str> = prefix.split('.').filter(|s| !s.is_empty()).collect();
        wanted.len() <= self.path.len()
            && wanted.iter().zip(&self.path).all(|(a, b)| *a == b.as_str())
    }
}

/// All tokens in source order. Names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    pub all_tokens: Vec<Token>,
}

impl Dictionary {
    pub fn new(all_tokens: Vec<Token>) -> Self {
        Self { all_tokens }
    }

    pub fn len(&self) -> usize {
        self.all_tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_tokens.is_empty()
    }

    /// Sub-dictionary of tokens under a dotted path prefix, order kept.
    pub fn filter(&self, prefix: &str) -> Dictionary {
        Dictionary {
            all_tokens: self
                .all_tokens
                .iter()
                .filter(|t| t.is_under(prefix))
                .cloned()
                .collect(),
        }
    }
}
