//! `Error`: a kind, a message, the operation that failed and its context.

use crate::ErrorKind;
use std::fmt;

/// Error returned by every fallible mlnviz call.
pub struct Error {
    kind: ErrorKind,
    message: String,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            operation: "",
            context: Vec::new(),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Innermost-last operation name, e.g. `format::parse_net`.
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// First context value stored under `key`.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn source_ref(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.source.as_ref().map(|e| e.as_ref())
    }

    /// Record where the error surfaced. An earlier operation is kept in the
    /// context under `called`.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            self.context.push(("called", self.operation.to_string()));
        }
        self.operation = operation;
        self
    }

    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Attach the lower-level error. Debug builds assert it is set only once.
    pub fn set_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(Box::new(source));
        self
    }

    /// Change the kind; the old kind is kept in the context under `cause`.
    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        if self.kind != kind {
            self.context.push(("cause", self.kind.to_string()));
            self.kind = kind;
        }
        self
    }
}

/// `Kind at operation: message (key=value, ...)` on a single line.
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.as_str())?;
        if !self.operation.is_empty() {
            write!(f, " at {}", self.operation)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        let mut sep = " (";
        for (key, value) in &self.context {
            write!(f, "{sep}{key}={value}")?;
            sep = ", ";
        }
        if !self.context.is_empty() {
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Error");
        out.field("kind", &self.kind)
            .field("operation", &self.operation)
            .field("message", &self.message);
        for (key, value) in &self.context {
            out.field(key, value);
        }
        if let Some(source) = &self.source {
            out.field("source", source);
        }
        out.finish()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IoFailed,
        };
        Error::new(kind, err.to_string())
            .with_operation("io")
            .set_source(err)
    }
}

// Shorthands for the kinds raised by the format, render and cli crates.
impl Error {
    /// `ParseFailed` at a 1-based line number.
    pub fn parse_failed(line: usize, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseFailed, message).with_context("line", line.to_string())
    }

    pub fn missing_header(header: impl Into<String>) -> Self {
        let header = header.into();
        Self::new(
            ErrorKind::MissingHeader,
            format!("required header '{}' not found", header),
        )
        .with_context("header", header)
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFormat, message)
    }

    pub fn unsupported_extension(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorKind::UnsupportedExtension,
            format!("'{}' is not a .net, .ecom or .vcom file", path),
        )
        .with_context("path", path)
    }

    pub fn unsupported_renderer(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(
            ErrorKind::UnsupportedRenderer,
            format!("renderer '{}' is not supported", name),
        )
        .with_context("renderer", name)
    }

    pub fn unsupported_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedInput, message)
    }

    pub fn serialization_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SerializationFailed, message)
    }
}
