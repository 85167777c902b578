/// Build configuration, read from a JSON file such as `tokens.config.json`.
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::build::BuildError;
use crate::header::FileHeader;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildConfig {
    /// Token files, merged in order.
    pub source: Vec<PathBuf>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub build_path: PathBuf,
    #[serde(default)]
    pub header: HeaderConfig,
    pub files: Vec<FileConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HeaderConfig {
    /// Replaces the default `Do not edit directly` line when present.
    #[serde(default)]
    pub lines: Option<Vec<String>>,
    #[serde(default = "default_true")]
    pub show_timestamp: bool,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            lines: None,
            show_timestamp: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl HeaderConfig {
    pub fn to_header(&self) -> FileHeader {
        match (&self.lines, self.show_timestamp) {
            (Some(lines), false) => FileHeader::new(lines.iter().cloned()),
            (Some(lines), true) => {
                let generated = FileHeader::default_with_timestamp();
                let stamp = generated.lines().last().cloned();
                FileHeader::new(lines.iter().cloned().chain(stamp))
            }
            (None, true) => FileHeader::default_with_timestamp(),
            (None, false) => FileHeader::without_timestamp(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FileConfig {
    /// Relative to `buildPath`.
    pub destination: PathBuf,
    /// `typescript/basic` or `javascript/inline-module`; parsed at build time.
    pub format: String,
    /// Dotted path prefix; only tokens under it are written.
    #[serde(default)]
    pub filter: Option<String>,
}

impl BuildConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read a config file and anchor its relative paths at the file's directory.
    pub fn from_path(path: &Path) -> Result<Self, BuildError> {
        let text = std::fs::read_to_string(path).map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|source| BuildError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.relative_to(base))
    }

    pub fn relative_to(mut self, base: &Path) -> Self {
        self.source = self.source.into_iter().map(|p| base.join(p)).collect();
        self.build_path = base.join(self.build_path);
        self
    }
}
