//! Syntax tree produced by [`parse`](crate::parse).
//!
//! The tree mirrors the source one to one: nothing is resolved here. Variable
//! references stay symbolic until a resolver looks them up, and rulesets keep
//! their items in source order.

use serde::Serialize;

/// A parsed colorsheet source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub items: Vec<DocumentItem>,
}

/// A top-level entry of a [`Document`].
///
/// `Variable` and `Declaration` share the same payload shape; only the
/// introducing syntax differs (`$name: value` versus `name: value`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentItem {
    Variable(Declaration<Value>),
    RuleSet(RuleSet),
    Declaration(Declaration<Value>),
}

/// A named block of declarations and nested rulesets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSet {
    pub identifier: String,
    pub items: Vec<RuleSetItem>,
}

/// An entry inside a [`RuleSet`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSetItem {
    RuleSet(RuleSet),
    Declaration(Declaration<Value>),
}

/// An identifier bound to a value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration<T> {
    pub identifier: String,
    pub value: T,
}

/// Right-hand side of a declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Variable(Variable),
    Color(Color),
    ColorSet(ColorSet),
}

/// A light/dark color pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorSet {
    pub light: ColorSetValue,
    pub dark: ColorSetValue,
}

/// A single slot of a [`ColorSet`]. Cannot hold another colorset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSetValue {
    Variable(Variable),
    Color(Color),
}

/// A `$name` reference, with the opacity written at the reference site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    pub identifier: String,
    pub opacity: f32,
}

impl Variable {
    /// Creates a reference with full opacity.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            opacity: 1.0,
        }
    }

    /// Sets the reference-site opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

/// An sRGB color with straight alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    /// Creates a color with the given alpha.
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Returns this color with its alpha multiplied by `opacity`.
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            alpha: self.alpha * opacity,
            ..self
        }
    }
}

impl From<ColorSetValue> for Value {
    fn from(value: ColorSetValue) -> Self {
        match value {
            ColorSetValue::Color(color) => Value::Color(color),
            ColorSetValue::Variable(variable) => Value::Variable(variable),
        }
    }
}

impl Document {
    /// Iterates over the top-level variable declarations in source order.
    pub fn variables(&self) -> impl Iterator<Item = &Declaration<Value>> {
        self.items.iter().filter_map(|item| match item {
            DocumentItem::Variable(declaration) => Some(declaration),
            _ => None,
        })
    }
}
