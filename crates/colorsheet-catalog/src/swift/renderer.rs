//! Swift source renderers.
//!
//! Both renderers share the file skeleton (header, `UIColor` extension,
//! nested enums) and differ only in how a single accessor is spelled.

use colorsheet_parser::ast::Color;

use super::tree::{Entry, Group, Node};
use super::{AccessLevel, SwiftOptions};
use crate::resolver::ResolvedVariable;

const HEADER: &str = "// This file is automatically generated. \
                      Do not edit, your changes will be erased.\n\nimport UIKit\n";

const BUNDLE_TOKEN: &str = r#"private final class BundleToken {
  static let bundle: Bundle = {
    #if SWIFT_PACKAGE
    return Bundle.module
    #else
    return Bundle(for: BundleToken.self)
    #endif
  }()
}
"#;

/// Writes a resolved accessor tree as Swift source.
pub trait Renderer {
    /// Right-hand side of `static let <name> = ...` for one entry.
    fn initializer(&self, entry: &Entry) -> String;

    /// Text appended after the `UIColor` extension.
    fn footer(&self) -> &str {
        ""
    }

    fn render_into(&self, root: &Group, out: &mut String, options: &SwiftOptions) {
        out.push_str(HEADER);
        out.push_str("\nextension UIColor {\n");
        self.render_group(root, 1, out, options);
        out.push_str("}\n");

        let footer = self.footer();
        if !footer.is_empty() {
            out.push('\n');
            out.push_str(footer);
        }
    }

    fn render_group(&self, group: &Group, depth: usize, out: &mut String, options: &SwiftOptions) {
        let indent = options.indent.repeat(depth);
        let access = options.access_level.prefix();
        out.push_str(&format!("{indent}{access}enum {} {{\n", group.name));
        for item in &group.items {
            match item {
                Node::Group(child) => self.render_group(child, depth + 1, out, options),
                Node::Entry(entry) => out.push_str(&format!(
                    "{indent}{}{access}static let {} = {}\n",
                    options.indent,
                    entry.name,
                    self.initializer(entry)
                )),
            }
        }
        out.push_str(&format!("{indent}}}\n"));
    }
}

/// Looks every color up by name in the compiled asset catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetCatalogRenderer;

impl Renderer for AssetCatalogRenderer {
    fn initializer(&self, entry: &Entry) -> String {
        format!(
            "UIColor(named: \"{}\", in: BundleToken.bundle, compatibleWith: nil)!",
            entry.qualified
        )
    }

    fn footer(&self) -> &str {
        BUNDLE_TOKEN
    }
}

/// Builds every color inline; colorsets switch on the trait collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicColorRenderer;

impl Renderer for DynamicColorRenderer {
    fn initializer(&self, entry: &Entry) -> String {
        match &entry.value {
            ResolvedVariable::Color(color) => ui_color(color),
            ResolvedVariable::ColorSet(set) => format!(
                "UIColor {{ $0.userInterfaceStyle == .dark ? {} : {} }}",
                ui_color(&set.dark),
                ui_color(&set.light)
            ),
        }
    }
}

fn ui_color(color: &Color) -> String {
    format!(
        "UIColor(red: {:.3}, green: {:.3}, blue: {:.3}, alpha: {:.3})",
        f32::from(color.red) / 255.0,
        f32::from(color.green) / 255.0,
        f32::from(color.blue) / 255.0,
        color.alpha
    )
}

impl AccessLevel {
    /// Modifier written before `enum` and `static let`.
    pub fn prefix(&self) -> &'static str {
        match self {
            AccessLevel::Internal => "",
            AccessLevel::Public => "public ",
        }
    }
}
