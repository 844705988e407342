use std::path::PathBuf;

/// Errors raised by the element during any lifecycle step.
///
/// Every variant is fatal for the element's build; the host decides what
/// happens to the rest of the graph.
#[derive(Debug, thiserror::Error)]
pub enum ElementError {
    #[error("unexpected configuration keys: {}\nAllowed keys: {}", .keys.join(", "), .allowed.join(", "))]
    UnknownKeys {
        keys: Vec<String>,
        allowed: Vec<String>,
    },

    #[error("missing required configuration member '{0}'")]
    MissingMember(String),

    #[error("configuration member '{key}' {reason}")]
    InvalidMember { key: String, reason: String },

    #[error("Incorrect value supplied for dependency_scope: {value}\nAcceptable values: run, build, all, none")]
    InvalidScope { value: String },

    #[error("dependency '{dependency}' has no usable license data: {reason}")]
    MissingLicenseData { dependency: String, reason: String },

    #[error("{count} blacklisted license(s) found in dependencies")]
    Blacklisted { count: usize },

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize license report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("project graph error: {0}")]
    Graph(String),

    #[error("element used before it was configured")]
    NotConfigured,

    #[error("unknown element kind '{0}'")]
    UnknownKind(String),
}

pub type Result<T> = std::result::Result<T, ElementError>;
