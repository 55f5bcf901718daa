//! Generator configuration.

/// Scope tokens and formatting options for header generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Root scope prefixed to schema namespace paths.
    pub root_scope: String,
    /// Scope for ordinary types without a schema namespace.
    pub type_scope: String,
    /// Scope for attribute types without a schema namespace.
    pub attribute_scope: String,
    /// File extension used in import directives.
    pub header_extension: String,
    /// Spaces per indentation level.
    pub indent: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root_scope: "st".to_string(),
            type_scope: "st".to_string(),
            attribute_scope: "st_attr".to_string(),
            header_extension: "h".to_string(),
            indent: 2,
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root scope for schema namespace paths.
    #[must_use]
    pub fn root_scope(mut self, scope: impl Into<String>) -> Self {
        self.root_scope = scope.into();
        self
    }

    /// Sets the default type scope.
    #[must_use]
    pub fn type_scope(mut self, scope: impl Into<String>) -> Self {
        self.type_scope = scope.into();
        self
    }

    /// Sets the attribute type scope.
    #[must_use]
    pub fn attribute_scope(mut self, scope: impl Into<String>) -> Self {
        self.attribute_scope = scope.into();
        self
    }

    /// Sets the extension used by import directives.
    #[must_use]
    pub fn header_extension(mut self, extension: impl Into<String>) -> Self {
        self.header_extension = extension.into();
        self
    }

    /// Sets the indentation width.
    #[must_use]
    pub fn indent(mut self, width: usize) -> Self {
        self.indent = width;
        self
    }
}
