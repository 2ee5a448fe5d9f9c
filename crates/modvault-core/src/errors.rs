/// Result type alias using Error
pub type Result<T> = std::result::Result<T, Error>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// A stable, structured classification of every error the engine can
/// surface. Each kind maps to a stable error code usable for programmatic
/// handling and for test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The submitted module failed validation; storage was never touched and
    /// retrying without fixing the input will fail again
    InvalidArgument,
    /// JSON encoding or decoding failed
    Serialization,
    /// Database connection, statement, or constraint failure
    Storage,
    /// An engine invariant was breached
    Internal,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "ERR_INVALID_ARGUMENT",
            ErrorKind::Serialization => "ERR_SERIALIZATION",
            ErrorKind::Storage => "ERR_STORAGE",
            ErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the kind plus enough context (operation name, module path and
/// version) to reconstruct the failing step without a stack trace.
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    op: Option<String>,
    module_path: Option<String>,
    version: Option<String>,
    message: String,
    source: Option<Box<Error>>,
}

impl Error {
    /// Create a new error with the specified kind
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            op: None,
            module_path: None,
            version: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the identity of the module being persisted
    pub fn with_module(
        mut self,
        module_path: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        self.module_path = Some(module_path.into());
        self.version = Some(version.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: Error) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the module path context, if any
    pub fn module_path(&self) -> Option<&str> {
        self.module_path.as_deref()
    }

    /// Get the version context, if any
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&Error> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let (Some(module_path), Some(version)) = (&self.module_path, &self.version) {
            write!(f, " (module: {}@{})", module_path, version)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorKind::Serialization).with_message(err.to_string())
    }
}

// ========== End Error Facility ==========
