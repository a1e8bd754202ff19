//! Asset catalog generation.
//!
//! The catalog mirrors the document tree:
//!
//! ```text
//! Colors.xcassets/
//!   Contents.json
//!   Theme.colorset/Contents.json                   <- Theme: (light: .., dark: ..)
//!   NumericInput/
//!     Contents.json
//!     NumericInputBackground.colorset/Contents.json
//!     DoneKey/
//!       Contents.json
//!       NumericInputDoneKeyBackground.colorset/Contents.json
//! ```
//!
//! Rulesets become plain folders named after their own identifier. Each
//! declaration becomes a `.colorset` folder named after its qualified name:
//! every enclosing ruleset identifier, outermost first, concatenated with the
//! declaration's identifier and no separator. Variables are never written.
//!
//! The destination is removed and recreated on every run. Any I/O failure
//! aborts immediately and may leave a partially written catalog behind.

use std::fs;
use std::path::Path;

use colorsheet_parser::ast::{Declaration, Document, DocumentItem, RuleSet, RuleSetItem, Value};

use crate::color_space::ColorSpace;
use crate::error::CatalogError;
use crate::resolver::{Context, ResolvedVariable};
use crate::template::{ColorEntry, DescriptorTemplates};

/// Name of the descriptor file in every catalog folder.
pub const CONTENTS_FILE: &str = "Contents.json";

/// Extension of the folder holding a single color.
pub const COLORSET_EXTENSION: &str = "colorset";

/// Default author tag written into descriptors.
pub const DEFAULT_AUTHOR: &str = "xcode";

/// Options for [`generate_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOptions {
    pub color_space: ColorSpace,
    pub author: String,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            color_space: ColorSpace::default(),
            author: DEFAULT_AUTHOR.to_string(),
        }
    }
}

impl CatalogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color_space(mut self, color_space: ColorSpace) -> Self {
        self.color_space = color_space;
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }
}

/// Counts of what a generation run wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    /// Ruleset folders.
    pub groups: usize,
    /// `.colorset` folders.
    pub colors: usize,
}

/// Writes the asset catalog for `document` at `destination`.
///
/// Uses the default author tag; see [`generate_with`] for full control.
pub fn generate(
    document: &Document,
    destination: impl AsRef<Path>,
    color_space: ColorSpace,
    context: &Context<'_>,
) -> Result<CatalogSummary, CatalogError> {
    let options = CatalogOptions::new().color_space(color_space);
    generate_with(document, destination, &options, context)
}

/// Writes the asset catalog for `document` at `destination` using `options`.
pub fn generate_with(
    document: &Document,
    destination: impl AsRef<Path>,
    options: &CatalogOptions,
    context: &Context<'_>,
) -> Result<CatalogSummary, CatalogError> {
    let destination = destination.as_ref();
    let mut writer = CatalogWriter {
        options,
        context,
        templates: DescriptorTemplates::new()?,
        summary: CatalogSummary::default(),
    };

    if destination.exists() {
        tracing::debug!(path = %destination.display(), "removing existing catalog");
        fs::remove_dir_all(destination).map_err(CatalogError::io(destination))?;
    }
    fs::create_dir_all(destination).map_err(CatalogError::io(destination))?;
    writer.write_descriptor(destination, writer.templates.group(&options.author)?)?;

    for item in &document.items {
        match item {
            DocumentItem::Variable(_) => {}
            DocumentItem::RuleSet(ruleset) => {
                writer.write_group(ruleset, destination, &ruleset.identifier)?
            }
            DocumentItem::Declaration(declaration) => {
                writer.write_color(declaration, destination, &declaration.identifier)?
            }
        }
    }

    tracing::info!(
        path = %destination.display(),
        groups = writer.summary.groups,
        colors = writer.summary.colors,
        color_space = %options.color_space,
        "generated asset catalog"
    );
    Ok(writer.summary)
}

struct CatalogWriter<'o, 'c, 'd> {
    options: &'o CatalogOptions,
    context: &'c Context<'d>,
    templates: DescriptorTemplates,
    summary: CatalogSummary,
}

impl CatalogWriter<'_, '_, '_> {
    /// `qualified` is the concatenated name of this ruleset and its ancestors.
    fn write_group(
        &mut self,
        ruleset: &RuleSet,
        parent: &Path,
        qualified: &str,
    ) -> Result<(), CatalogError> {
        let folder = parent.join(&ruleset.identifier);
        fs::create_dir(&folder).map_err(CatalogError::io(&folder))?;
        let contents = self.templates.group(&self.options.author)?;
        self.write_descriptor(&folder, contents)?;
        self.summary.groups += 1;

        for item in &ruleset.items {
            match item {
                RuleSetItem::RuleSet(child) => {
                    let name = format!("{}{}", qualified, child.identifier);
                    self.write_group(child, &folder, &name)?;
                }
                RuleSetItem::Declaration(declaration) => {
                    let name = format!("{}{}", qualified, declaration.identifier);
                    self.write_color(declaration, &folder, &name)?;
                }
            }
        }
        Ok(())
    }

    fn write_color(
        &mut self,
        declaration: &Declaration<Value>,
        parent: &Path,
        qualified: &str,
    ) -> Result<(), CatalogError> {
        let folder = parent.join(format!("{}.{}", qualified, COLORSET_EXTENSION));
        fs::create_dir(&folder).map_err(CatalogError::io(&folder))?;

        let author = self.options.author.as_str();
        let space = self.options.color_space.as_str();
        let entry = match self.context.resolve_value(&declaration.value)? {
            ResolvedVariable::Color(color) => ColorEntry::new(author, space, &color, None),
            ResolvedVariable::ColorSet(set) => {
                ColorEntry::new(author, space, &set.light, Some(&set.dark))
            }
        };
        let contents = self.templates.color(&entry)?;
        self.write_descriptor(&folder, contents)?;
        self.summary.colors += 1;
        Ok(())
    }

    fn write_descriptor(&self, folder: &Path, contents: String) -> Result<(), CatalogError> {
        let path = folder.join(CONTENTS_FILE);
        fs::write(&path, contents).map_err(CatalogError::io(&path))?;
        tracing::debug!(path = %path.display(), "wrote descriptor");
        Ok(())
    }
}
