//! Render error types

use thiserror::Error;

/// Failure raised by a component function while expanding its description.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ComponentError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl ComponentError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error, keeping it reachable through `source()`.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for ComponentError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source("invalid component data", err)
    }
}

/// Errors that abort a render pass.
///
/// All of these are raised during normalization, before the live tree is touched,
/// so a failed pass leaves the live tree exactly as the previous pass left it.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The description cannot be turned into a live node
    #[error("Malformed node: {reason}")]
    Malformed { reason: String },

    /// A component function returned an error
    #[error("Component `{name}` failed: {source}")]
    Component {
        name: String,
        #[source]
        source: ComponentError,
    },

    /// Component composition did not bottom out
    #[error("Component `{name}` exceeded the composition depth limit of {limit}")]
    DepthExceeded { name: String, limit: usize },

    /// The host refused a live tree operation
    #[error("Host error: {0}")]
    Host(String),
}

/// Specialized Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;

impl RenderError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    pub fn component(name: impl Into<String>, source: ComponentError) -> Self {
        Self::Component {
            name: name.into(),
            source,
        }
    }

    /// Host errors may clear up on a later pass; description errors will not.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Host(_))
    }

    /// Short label for log fields
    pub fn category(&self) -> &'static str {
        match self {
            Self::Malformed { .. } => "malformed",
            Self::Component { .. } => "component",
            Self::DepthExceeded { .. } => "depth_exceeded",
            Self::Host(_) => "host",
        }
    }
}
