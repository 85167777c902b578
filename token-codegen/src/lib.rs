//! Design-token code generator.
//!
//! Loads design-token JSON trees into an ordered [`token::Dictionary`] and
//! renders it as either a TypeScript declaration file (`typescript/basic`)
//! or a CommonJS module (`javascript/inline-module`).
pub mod build;
pub mod config;
pub mod format;
pub mod header;
pub mod loader;
pub mod token;
