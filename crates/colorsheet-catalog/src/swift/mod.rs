//! Swift accessor generation.
//!
//! Produces a single Swift file with one static `UIColor` accessor per
//! declaration, nested in enums that mirror the rulesets:
//!
//! ```swift
//! extension UIColor {
//!   enum Custom {
//!     enum Text {
//!       static let Primary = UIColor(named: "TextPrimary", in: BundleToken.bundle, compatibleWith: nil)!
//!     }
//!   }
//! }
//! ```
//!
//! [`RenderMode::AssetCatalog`] looks colors up in the catalog written by
//! [`generate`](crate::generate), so both outputs must come from the same
//! document. [`RenderMode::DynamicColor`] needs no catalog at all.

mod renderer;
mod tree;

use std::fs;
use std::path::Path;

use colorsheet_parser::ast::Document;

use crate::error::SwiftError;
use crate::resolver::Context;

pub use renderer::{AssetCatalogRenderer, DynamicColorRenderer, Renderer};
pub use tree::{resolve_tree, Entry, Group, Node, ROOT_NAME};

/// Conventional file name of the generated source.
pub const SWIFT_FILE_NAME: &str = "UIColor+Custom.swift";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// `UIColor(named:in:compatibleWith:)` lookups into the asset catalog.
    #[default]
    AssetCatalog,
    /// Inline `UIColor(red:green:blue:alpha:)` values.
    DynamicColor,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessLevel {
    #[default]
    Internal,
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwiftOptions {
    pub mode: RenderMode,
    pub access_level: AccessLevel,
    /// One level of indentation.
    pub indent: String,
}

impl Default for SwiftOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            access_level: AccessLevel::default(),
            indent: "  ".to_string(),
        }
    }
}

impl SwiftOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn access_level(mut self, access_level: AccessLevel) -> Self {
        self.access_level = access_level;
        self
    }

    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }
}

/// What [`write_swift`] did with the destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwiftOutcome {
    Written,
    /// The file already held exactly the rendered bytes and was not touched.
    Unchanged,
}

/// Renders the Swift source for `document` without touching the filesystem.
pub fn render_swift(
    document: &Document,
    context: &Context<'_>,
    options: &SwiftOptions,
) -> Result<String, SwiftError> {
    let root = resolve_tree(document, context)?;
    let mut out = String::new();
    match options.mode {
        RenderMode::AssetCatalog => AssetCatalogRenderer.render_into(&root, &mut out, options),
        RenderMode::DynamicColor => DynamicColorRenderer.render_into(&root, &mut out, options),
    }
    Ok(out)
}

/// Renders and writes the Swift source to `path`.
///
/// Unless `force` is set, an existing file with identical contents is left
/// alone so its modification time does not trigger rebuilds.
pub fn write_swift(
    document: &Document,
    context: &Context<'_>,
    path: impl AsRef<Path>,
    options: &SwiftOptions,
    force: bool,
) -> Result<SwiftOutcome, SwiftError> {
    let path = path.as_ref();
    let contents = render_swift(document, context, options)?;

    if !force && path.exists() {
        let existing = fs::read(path).map_err(SwiftError::io(path))?;
        if existing == contents.as_bytes() {
            tracing::info!(path = %path.display(), "swift accessors unchanged");
            return Ok(SwiftOutcome::Unchanged);
        }
    }

    fs::write(path, &contents).map_err(SwiftError::io(path))?;
    tracing::info!(path = %path.display(), mode = ?options.mode, "wrote swift accessors");
    Ok(SwiftOutcome::Written)
}
