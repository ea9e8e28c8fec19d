//! Error types.

/// Error enumerates the possible ngxcert error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a [`Node`][crate::node::Node] is constructed without a name while not being
    /// the root, or when a root node is given a name.
    #[error("invalid node: {0}")]
    InvalidNode(&'static str),

    /// Returned by [`Node::query_first`][crate::node::Node::query_first] when no immediate child
    /// matches the requested directive.
    #[error("no \"{name}\" directive found")]
    NotFound { name: String },

    /// Returned when the configuration text has unbalanced braces.
    ///
    /// [`loads`][crate::parser::loads] only reports a `}` without an open block.
    /// [`loads_strict`][crate::parser::loads_strict] additionally reports blocks that are
    /// still open at end of input.
    #[error("malformed config: {reason}")]
    MalformedConfig { reason: String },

    /// Returned when the config contains no top-level `server` section.
    #[error("no server sections found in config")]
    NoServers,

    /// Returned when the selected `server` section has no `listen` directive carrying a port.
    #[error("no listen ports found in server section")]
    NoListenPorts,

    /// Returned when no candidate `server` section listens on port 443.
    #[error("no server section listens on port 443")]
    MissingHttpsPort,

    /// Returned when the HTTPS and plain `server` sections carry different `server_name` lists
    /// and mismatches were not explicitly allowed.
    #[error("server_name lists differ between sections: \"{secure}\" vs \"{other}\"")]
    ServerNameMismatch { secure: String, other: String },

    /// Returned when the config has more top-level `server` sections than can be paired up.
    #[error("found {0} server sections, at most 2 are supported")]
    TooManyServers(usize),

    /// Returned when `certbot` exits unsuccessfully. Carries the exit code when one exists.
    #[error("certbot failed with exit code {0:?}")]
    CertbotFailed(Option<i32>),

    /// Returned when a `certbot` run is interrupted by a signal before completing.
    #[error("interrupted")]
    Interrupted,

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when a parsed tree can't be serialized to JSON.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_directive() {
        let err = Error::NotFound {
            name: "server_name".to_string(),
        };
        assert_eq!(err.to_string(), "no \"server_name\" directive found");
    }

    #[test]
    fn io_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::IO(_)));
    }
}
