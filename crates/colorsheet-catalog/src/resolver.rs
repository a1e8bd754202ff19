//! Variable resolution.
//!
//! A [`Context`] is the symbol table of a document: every top-level
//! `$name: value` declaration, keyed by name. It is built once, never
//! mutated, and passed by reference into every resolution call.
//!
//! # Rules
//!
//! - Variables are visible everywhere in the document, whatever their
//!   position in the source.
//! - When a name is declared twice, the last declaration wins.
//! - References are followed until a color or colorset is reached. A chain
//!   that comes back to a name already on it is reported as
//!   [`ResolveError::CyclicVariableReference`].
//! - The opacity written at a reference site (`$name 50%`) multiplies the
//!   alpha of whatever the reference resolves to; chained references compound.
//! - A colorset slot only accepts a single color: a variable holding a
//!   colorset cannot be placed in a `light` or `dark` slot.
//!
//! Nothing is cached. A variable referenced from ten declarations is resolved
//! ten times.

use std::collections::HashMap;

use colorsheet_parser::ast::{Color, ColorSet, ColorSetValue, Document, Value, Variable};

use crate::error::ResolveError;

/// A variable after resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedVariable {
    Color(Color),
    ColorSet(ResolvedColorSet),
}

/// A colorset with both slots resolved to concrete colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedColorSet {
    pub light: Color,
    pub dark: Color,
}

impl ResolvedVariable {
    fn with_opacity(self, opacity: f32) -> Self {
        match self {
            ResolvedVariable::Color(color) => ResolvedVariable::Color(color.with_opacity(opacity)),
            ResolvedVariable::ColorSet(set) => ResolvedVariable::ColorSet(ResolvedColorSet {
                light: set.light.with_opacity(opacity),
                dark: set.dark.with_opacity(opacity),
            }),
        }
    }
}

/// Immutable symbol table of a document's variables.
#[derive(Debug, Clone, Default)]
pub struct Context<'a> {
    variables: HashMap<&'a str, &'a Value>,
}

impl<'a> Context<'a> {
    /// Collects the top-level variable declarations of `document`.
    pub fn build(document: &'a Document) -> Self {
        let mut variables = HashMap::new();
        for declaration in document.variables() {
            let name = declaration.identifier.as_str();
            if variables.insert(name, &declaration.value).is_some() {
                tracing::debug!(variable = name, "variable redeclared, last declaration wins");
            }
        }
        tracing::debug!(count = variables.len(), "built variable context");
        Self { variables }
    }

    /// Number of distinct variable names.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Returns the declared (unresolved) value of a variable.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.variables.get(name).copied()
    }

    /// Resolves a `$name` reference to a color or colorset.
    pub fn resolve_variable(&self, variable: &Variable) -> Result<ResolvedVariable, ResolveError> {
        self.variable_in(variable, &mut Vec::new())
    }

    /// Resolves both slots of a colorset literal.
    pub fn resolve_colorset(&self, colorset: &ColorSet) -> Result<ResolvedColorSet, ResolveError> {
        self.colorset_in(colorset, &mut Vec::new())
    }

    /// Resolves a single colorset slot to a color.
    pub fn resolve_colorset_value(&self, value: &ColorSetValue) -> Result<Color, ResolveError> {
        self.slot_in(value, &mut Vec::new())
    }

    /// Resolves the right-hand side of any declaration.
    pub fn resolve_value(&self, value: &Value) -> Result<ResolvedVariable, ResolveError> {
        match value {
            Value::Color(color) => Ok(ResolvedVariable::Color(*color)),
            Value::ColorSet(colorset) => {
                self.resolve_colorset(colorset).map(ResolvedVariable::ColorSet)
            }
            Value::Variable(variable) => self.resolve_variable(variable),
        }
    }

    /// Resolves every declared variable once, returning the first failure.
    ///
    /// Names are checked in sorted order so the reported error is stable.
    pub fn validate(&self) -> Result<(), ResolveError> {
        let mut names: Vec<&str> = self.variables.keys().copied().collect();
        names.sort_unstable();
        for name in names {
            self.resolve_variable(&Variable::new(name))?;
        }
        Ok(())
    }

    fn variable_in(
        &self,
        variable: &Variable,
        trail: &mut Vec<String>,
    ) -> Result<ResolvedVariable, ResolveError> {
        let name = variable.identifier.as_str();
        if let Some(start) = trail.iter().position(|seen| seen == name) {
            let mut path = trail[start..].to_vec();
            path.push(name.to_string());
            return Err(ResolveError::CyclicVariableReference { path });
        }

        let value = self
            .get(name)
            .ok_or_else(|| ResolveError::UndefinedVariable(name.to_string()))?;

        trail.push(name.to_string());
        let resolved = match value {
            Value::Variable(next) => self.variable_in(next, trail)?,
            Value::Color(color) => ResolvedVariable::Color(*color),
            Value::ColorSet(colorset) => {
                ResolvedVariable::ColorSet(self.colorset_in(colorset, trail)?)
            }
        };
        trail.pop();

        Ok(resolved.with_opacity(variable.opacity))
    }

    fn colorset_in(
        &self,
        colorset: &ColorSet,
        trail: &mut Vec<String>,
    ) -> Result<ResolvedColorSet, ResolveError> {
        Ok(ResolvedColorSet {
            light: self.slot_in(&colorset.light, trail)?,
            dark: self.slot_in(&colorset.dark, trail)?,
        })
    }

    fn slot_in(
        &self,
        value: &ColorSetValue,
        trail: &mut Vec<String>,
    ) -> Result<Color, ResolveError> {
        match value {
            ColorSetValue::Color(color) => Ok(*color),
            ColorSetValue::Variable(variable) => match self.variable_in(variable, trail)? {
                ResolvedVariable::Color(color) => Ok(color),
                ResolvedVariable::ColorSet(_) => Err(ResolveError::ColorSetAssignedToColorSlot(
                    variable.identifier.clone(),
                )),
            },
        }
    }
}
