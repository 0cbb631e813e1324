//! Error taxonomy for pseudo-file parsing and kernel accessors.
//!
//! Every failure is reported synchronously to the caller. A parser either
//! returns a complete record or one of these errors, never both.

/// Errors returned by the readers and parsers in this crate.
#[derive(Debug, thiserror::Error)]
pub enum SysinfoError {
    /// The content of a pseudo-file did not match its expected grammar.
    ///
    /// `file` is the logical name of the source (`"meminfo"`, `"stat"`, ...).
    #[error("Malformed {file} content: {reason}")]
    MalformedInput { file: &'static str, reason: String },

    /// Reading a pseudo-file or calling a kernel accessor failed.
    #[error("Source unavailable: {resource}")]
    SourceUnavailable {
        resource: String,
        #[source]
        source: std::io::Error,
    },
}

impl SysinfoError {
    pub fn malformed(file: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            file,
            reason: reason.into(),
        }
    }

    pub fn unavailable(resource: impl Into<String>, source: std::io::Error) -> Self {
        Self::SourceUnavailable {
            resource: resource.into(),
            source,
        }
    }

    /// Returns true for grammar violations, false for OS-level failures.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SysinfoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display_names_file() {
        let err = SysinfoError::malformed("meminfo", "expected 2 fields, got 3");
        assert_eq!(
            err.to_string(),
            "Malformed meminfo content: expected 2 fields, got 3"
        );
        assert!(err.is_malformed());
    }

    #[test]
    fn test_unavailable_keeps_source() {
        use std::error::Error;

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = SysinfoError::unavailable("/proc/meminfo", io);
        assert!(!err.is_malformed());
        assert_eq!(err.to_string(), "Source unavailable: /proc/meminfo");
        assert_eq!(err.source().map(|s| s.to_string()), Some("gone".into()));
    }
}
