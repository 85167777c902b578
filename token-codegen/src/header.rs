/// File header comment placed at the top of every generated file.
use chrono::{DateTime, Utc};

const DO_NOT_EDIT: &str = "Do not edit directly";

/// Ordered comment lines for a generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    lines: Vec<String>,
}

impl FileHeader {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// `Do not edit directly` plus a `Generated on` line for the current time.
    pub fn default_with_timestamp() -> Self {
        Self::generated_at(Utc::now())
    }

    /// Same as [`FileHeader::default_with_timestamp`] with a fixed instant.
    pub fn generated_at(at: DateTime<Utc>) -> Self {
        Self::new([
            DO_NOT_EDIT.to_string(),
            format!("Generated on {}", at.format("%a, %d %b %Y %H:%M:%S GMT")),
        ])
    }

    /// Stable header for reproducible output.
    pub fn without_timestamp() -> Self {
        Self::new([DO_NOT_EDIT])
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// `// line1\n// line2\n\n`. An empty header still yields `// \n\n`.
    pub fn render(&self) -> String {
        format!("// {}\n\n", self.lines.join("\n// "))
    }
}

impl Default for FileHeader {
    fn default() -> Self {
        Self::without_timestamp()
    }
}
