//! Parser for colorsheet, a small CSS-like language for light/dark colors.
//!
//! A colorsheet declares colors, optionally through `$variables`, and groups
//! them in nested blocks:
//!
//! ```text
//! $white: #ffffff
//! $black: #000000
//! $classic: (light: $black, dark: $white)
//!
//! Text {
//!   Primary: (light: #151618, dark: #E7E8EA)
//!   Secondary: $classic
//!   Disabled: $black 40%
//! }
//! ```
//!
//! [`parse`] turns source text into a [`Document`](ast::Document). Nothing is
//! resolved at this stage; see the `colorsheet-catalog` crate for variable
//! resolution and output generation.
//!
//! # Grammar
//!
//! | Construct | Syntax |
//! |-----------|--------|
//! | identifier | one or more ASCII letters or digits |
//! | hex color | `#RRGGBB`, optionally followed by ` NN%` alpha |
//! | rgba color | `rgba(r, g, b, a)` with `a` in `0..=1` |
//! | variable reference | `$name`, optionally followed by ` NN%` opacity |
//! | colorset | `(light: <color>, dark: <color>)` in either order |
//! | declaration | `name: <value>` |
//! | variable declaration | `$name: <value>` (top level only) |
//! | ruleset | `name { <items> }`, one item per line |
//!
//! `// comments` run to the end of the line. An item never spans lines, and
//! rulesets nest at most [`MAX_NESTING`] deep.

pub mod ast;
mod error;
mod parser;

use std::path::{Path, PathBuf};

pub use error::{ParseError, Span};
pub use parser::{parse, MAX_NESTING};

/// Error returned by [`parse_file`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Reads a UTF-8 file and parses it.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ast::Document, LoadError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&source).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
