// Error kinds, native error-code translation, and context-carrying errors.
use std::error::Error as StdError;
use std::fmt;

use crate::core::native::sys;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Operation on a session that was already closed.
    Closed,
    /// Argument rejected locally, before any native call.
    Usage,
    /// The native library reported a failure status.
    Native,
}

/// Translated `aug_errcode_t` values from the optional error-detail query.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NativeCode {
    NoMem,
    Internal,
    PathExpr,
    NoMatch,
    TooManyMatches,
    Syntax,
    NoLens,
    MultipleTransforms,
    NoSpan,
    MoveDescendant,
    CmdRun,
    BadArg,
    Label,
    CopyDescendant,
    FileAccess,
    Unknown(i32),
}

impl NativeCode {
    /// Maps a raw code to its variant; `AUG_NOERROR` means no pending error.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            sys::AUG_NOERROR => None,
            sys::AUG_ENOMEM => Some(NativeCode::NoMem),
            sys::AUG_EINTERNAL => Some(NativeCode::Internal),
            sys::AUG_EPATHX => Some(NativeCode::PathExpr),
            sys::AUG_ENOMATCH => Some(NativeCode::NoMatch),
            sys::AUG_EMMATCH => Some(NativeCode::TooManyMatches),
            sys::AUG_ESYNTAX => Some(NativeCode::Syntax),
            sys::AUG_ENOLENS => Some(NativeCode::NoLens),
            sys::AUG_EMXFM => Some(NativeCode::MultipleTransforms),
            sys::AUG_ENOSPAN => Some(NativeCode::NoSpan),
            sys::AUG_EMVDESC => Some(NativeCode::MoveDescendant),
            sys::AUG_ECMDRUN => Some(NativeCode::CmdRun),
            sys::AUG_EBADARG => Some(NativeCode::BadArg),
            sys::AUG_ELABEL => Some(NativeCode::Label),
            sys::AUG_ECPDESC => Some(NativeCode::CopyDescendant),
            sys::AUG_EFILEACCESS => Some(NativeCode::FileAccess),
            other => Some(NativeCode::Unknown(other)),
        }
    }
}

impl fmt::Display for NativeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeCode::NoMem => write!(f, "out of memory"),
            NativeCode::Internal => write!(f, "internal error"),
            NativeCode::PathExpr => write!(f, "invalid path expression"),
            NativeCode::NoMatch => write!(f, "no matching node"),
            NativeCode::TooManyMatches => write!(f, "more than one matching node"),
            NativeCode::Syntax => write!(f, "syntax error in lens file"),
            NativeCode::NoLens => write!(f, "lens not found"),
            NativeCode::MultipleTransforms => write!(f, "multiple transforms for file"),
            NativeCode::NoSpan => write!(f, "no span information for node"),
            NativeCode::MoveDescendant => write!(f, "cannot move node into its descendant"),
            NativeCode::CmdRun => write!(f, "command execution failed"),
            NativeCode::BadArg => write!(f, "invalid argument"),
            NativeCode::Label => write!(f, "invalid label"),
            NativeCode::CopyDescendant => write!(f, "cannot copy node into its descendant"),
            NativeCode::FileAccess => write!(f, "cannot access file"),
            NativeCode::Unknown(raw) => write!(f, "unknown error code {raw}"),
        }
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    path: Option<String>,
    code: Option<NativeCode>,
    details: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            path: None,
            code: None,
            details: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn code(&self) -> Option<NativeCode> {
        self.code
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_code(mut self, code: NativeCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(code) = self.code {
            write!(f, " ({code})")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {path})")?;
        }
        if let Some(details) = &self.details {
            write!(f, " [{details}]")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}
