//! Resolved accessor tree.
//!
//! The document is walked once and every declaration is resolved, so the
//! renderers only deal with concrete colors. Variables are dropped.

use colorsheet_parser::ast::{Declaration, Document, DocumentItem, RuleSet, RuleSetItem, Value};

use crate::error::ResolveError;
use crate::resolver::{Context, ResolvedVariable};

/// Name of the enum wrapping every generated accessor.
pub const ROOT_NAME: &str = "Custom";

/// A ruleset, rendered as a nested enum.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub name: String,
    /// Concatenated identifiers of this group and its ancestors. Empty for the root.
    pub qualified: String,
    pub items: Vec<Node>,
}

/// A declaration, rendered as a static accessor.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    /// Catalog name of the color, e.g. `NumericInputDoneKeyBackground`.
    pub qualified: String,
    pub value: ResolvedVariable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group(Group),
    Entry(Entry),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Group(group) => &group.name,
            Node::Entry(entry) => &entry.name,
        }
    }
}

/// Resolves `document` into a tree rooted at [`ROOT_NAME`].
///
/// Items of every group are sorted by short name; groups and entries share
/// one ordering and ties keep source order.
pub fn resolve_tree(document: &Document, context: &Context<'_>) -> Result<Group, ResolveError> {
    let mut items = Vec::new();
    for item in &document.items {
        match item {
            DocumentItem::Variable(_) => {}
            DocumentItem::RuleSet(ruleset) => items.push(Node::Group(group(ruleset, "", context)?)),
            DocumentItem::Declaration(declaration) => {
                items.push(Node::Entry(entry(declaration, "", context)?))
            }
        }
    }
    sort(&mut items);

    Ok(Group {
        name: ROOT_NAME.to_string(),
        qualified: String::new(),
        items,
    })
}

fn group(ruleset: &RuleSet, prefix: &str, context: &Context<'_>) -> Result<Group, ResolveError> {
    let qualified = format!("{}{}", prefix, ruleset.identifier);
    let mut items = Vec::with_capacity(ruleset.items.len());
    for item in &ruleset.items {
        match item {
            RuleSetItem::RuleSet(child) => {
                items.push(Node::Group(group(child, &qualified, context)?))
            }
            RuleSetItem::Declaration(declaration) => {
                items.push(Node::Entry(entry(declaration, &qualified, context)?))
            }
        }
    }
    sort(&mut items);

    Ok(Group {
        name: ruleset.identifier.clone(),
        qualified,
        items,
    })
}

fn entry(
    declaration: &Declaration<Value>,
    prefix: &str,
    context: &Context<'_>,
) -> Result<Entry, ResolveError> {
    Ok(Entry {
        name: declaration.identifier.clone(),
        qualified: format!("{}{}", prefix, declaration.identifier),
        value: context.resolve_value(&declaration.value)?,
    })
}

fn sort(items: &mut [Node]) {
    items.sort_by(|a, b| a.name().cmp(b.name()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorsheet_parser::ast::Color;
    use colorsheet_parser::parse;

    fn tree(source: &str) -> Group {
        let doc = parse(source).unwrap();
        resolve_tree(&doc, &Context::build(&doc)).unwrap()
    }

    fn names(group: &Group) -> Vec<&str> {
        group.items.iter().map(Node::name).collect()
    }

    #[test]
    fn test_root_is_custom() {
        let root = tree("");
        assert_eq!(root.name, "Custom");
        assert!(root.qualified.is_empty());
        assert!(root.items.is_empty());
    }

    #[test]
    fn test_items_sorted_by_short_name() {
        let root = tree("Zeta: #000000\nAlpha {\n  b: #000000\n  a: #000000\n}\nMid: #000000");
        assert_eq!(names(&root), vec!["Alpha", "Mid", "Zeta"]);
        match &root.items[0] {
            Node::Group(group) => assert_eq!(names(group), vec!["a", "b"]),
            other => panic!("Expected group, got {:?}", other),
        }
    }

    #[test]
    fn test_qualified_names() {
        let root = tree("A {\n  B {\n    C: #000000\n  }\n}");
        let Node::Group(a) = &root.items[0] else {
            panic!("Expected group");
        };
        let Node::Group(b) = &a.items[0] else {
            panic!("Expected group");
        };
        let Node::Entry(c) = &b.items[0] else {
            panic!("Expected entry");
        };
        assert_eq!(a.qualified, "A");
        assert_eq!(b.qualified, "AB");
        assert_eq!(c.name, "C");
        assert_eq!(c.qualified, "ABC");
    }

    #[test]
    fn test_variables_are_resolved_and_dropped() {
        let root = tree("$black: #000000\nText: $black 50%");
        assert_eq!(names(&root), vec!["Text"]);
        let Node::Entry(text) = &root.items[0] else {
            panic!("Expected entry");
        };
        assert_eq!(text.value, ResolvedVariable::Color(Color::rgba(0, 0, 0, 0.5)));
    }

    #[test]
    fn test_undefined_variable_fails() {
        let doc = parse("G {\n  a: $nope\n}").unwrap();
        let err = resolve_tree(&doc, &Context::build(&doc)).unwrap_err();
        assert_eq!(err, ResolveError::UndefinedVariable("nope".into()));
    }
}
