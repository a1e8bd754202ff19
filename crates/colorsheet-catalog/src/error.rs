//! Error types for resolution and generation.

use std::path::PathBuf;

/// Error returned when a variable reference cannot be turned into a color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No top-level `$name` declaration exists for the reference.
    #[error("could not find variable with identifier '{0}'")]
    UndefinedVariable(String),

    /// A colorset-valued variable was used inside another colorset.
    #[error(
        "variable '{0}' holds a colorset and cannot be assigned to a light or dark slot"
    )]
    ColorSetAssignedToColorSlot(String),

    /// A variable refers back to itself, directly or through other variables.
    #[error("cyclic variable reference: {}", path.join(" -> "))]
    CyclicVariableReference { path: Vec<String> },
}

/// Error returned while writing an asset catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Descriptor template failed to render.
    #[error("template error")]
    Template(#[from] minijinja::Error),
}

/// Error returned while writing Swift accessors.
#[derive(Debug, thiserror::Error)]
pub enum SwiftError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    /// Adapter for `map_err` that attaches `path` to an I/O error.
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| CatalogError::Io { path, source }
    }
}

impl SwiftError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| SwiftError::Io { path, source }
    }
}
