//! # Colorsheet Catalog
//!
//! Turns a parsed colorsheet [`Document`](colorsheet_parser::ast::Document)
//! into an Xcode asset catalog and, optionally, Swift accessors for it.
//!
//! ```rust,no_run
//! use colorsheet_catalog::{generate, ColorSpace, Context};
//!
//! let document = colorsheet_parser::parse("$ink: #151618\nText: (light: $ink, dark: #E7E8EA)")?;
//! let context = Context::build(&document);
//! generate(&document, "Colors.xcassets", ColorSpace::DisplayP3, &context)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`resolver`]: the variable symbol table and reference resolution
//! - [`generator`]: the asset catalog directory writer
//! - [`template`]: `Contents.json` descriptor templates
//! - [`swift`]: `UIColor` extension generation
//!
//! Resolution is lazy. Generation resolves each declaration as it is written,
//! so an undefined variable surfaces only when a declaration reaches it. Call
//! [`Context::validate`] first to check every variable up front.

mod color_space;
mod error;
pub mod generator;
pub mod resolver;
pub mod swift;
pub mod template;

pub use color_space::{ColorSpace, UnknownColorSpace};
pub use error::{CatalogError, ResolveError, SwiftError};
pub use generator::{generate, generate_with, CatalogOptions, CatalogSummary};
pub use resolver::{Context, ResolvedColorSet, ResolvedVariable};
pub use swift::{render_swift, write_swift, AccessLevel, RenderMode, SwiftOptions, SwiftOutcome};
