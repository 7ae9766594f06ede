//! What went wrong, independent of where.

use strum_macros::{Display, IntoStaticStr};

/// Callers match on the kind to tell request-fatal failures (parse, IO on the
/// input) from per-renderer failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // Input format errors
    // =========================================================================
    /// A data line could not be parsed (field count, numeric value)
    ParseFailed,

    /// A required `#` header line is absent
    MissingHeader,

    /// Structurally invalid file (e.g. truncated positional header)
    InvalidFormat,

    /// File extension is not one of `.net`, `.ecom`, `.vcom`
    UnsupportedExtension,

    // =========================================================================
    // Rendering errors
    // =========================================================================
    /// Unknown renderer name
    UnsupportedRenderer,

    /// Renderer cannot draw this kind of dataset
    UnsupportedInput,

    /// Renderer failed while building or writing its artifact
    RenderFailed,

    /// Figure data could not be serialized
    SerializationFailed,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    FileNotFound,
    PermissionDenied,
    /// Any other `std::io` failure
    IoFailed,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Whether this kind aborts a whole request rather than a single renderer.
    pub fn is_request_fatal(&self) -> bool {
        matches!(
            self,
            ErrorKind::ParseFailed
                | ErrorKind::MissingHeader
                | ErrorKind::InvalidFormat
                | ErrorKind::UnsupportedExtension
                | ErrorKind::FileNotFound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_match_variants() {
        assert_eq!(ErrorKind::ParseFailed.to_string(), "ParseFailed");
        assert_eq!(ErrorKind::RenderFailed.as_str(), "RenderFailed");
    }

    #[test]
    fn request_fatal_kinds() {
        assert!(ErrorKind::ParseFailed.is_request_fatal());
        assert!(ErrorKind::MissingHeader.is_request_fatal());
        assert!(!ErrorKind::RenderFailed.is_request_fatal());
        assert!(!ErrorKind::UnsupportedInput.is_request_fatal());
    }
}
