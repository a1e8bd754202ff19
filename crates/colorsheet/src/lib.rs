//! # Colorsheet
//!
//! Compiles color sheets, a small CSS-like language for light and dark
//! colors, into Xcode asset catalogs and Swift `UIColor` accessors.
//!
//! The work is split across two library crates, re-exported here:
//!
//! - [`parser`]: source text to syntax tree
//! - [`catalog`]: variable resolution, `.xcassets` and Swift generation
//!
//! The `colorsheet` binary wraps both; see [`cli`].

pub use colorsheet_catalog as catalog;
pub use colorsheet_parser as parser;

pub mod cli;
pub mod logging;
