/// Output formats. Each one renders a whole file from a dictionary and a header.
mod basic_ts;
mod inline_module;
mod writer;

use std::fmt;
use std::str::FromStr;

pub use basic_ts::format_basic_ts;
pub use inline_module::format_inline_module;
pub use writer::{escape_js, CodeWriter};

use crate::header::FileHeader;
use crate::token::Dictionary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `typescript/basic`
    BasicTs,
    /// `javascript/inline-module`
    InlineModule,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown format: '{0}' (expected 'typescript/basic' or 'javascript/inline-module')")]
pub struct UnknownFormat(pub String);

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::BasicTs => "typescript/basic",
            Format::InlineModule => "javascript/inline-module",
        }
    }

    pub fn render(&self, dictionary: &Dictionary, header: &FileHeader) -> String {
        match self {
            Format::BasicTs => format_basic_ts(dictionary, header),
            Format::InlineModule => format_inline_module(dictionary, header),
        }
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "typescript/basic" | "ts" | "typescript" => Ok(Format::BasicTs),
            "javascript/inline-module" | "js" | "cjs" | "javascript" => Ok(Format::InlineModule),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
