//! Error types used across atomic-rename.
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Classification of a failed rename.
///
/// `AccessDenied` and `SharingViolation` are the contention kinds: the platform refused
/// the rename because the target was held open or another replace of it was in flight.
/// They are absorbed by the retrying strategy and only surface once its budget is spent.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("source not found")]
    NotFound,
    #[error("access denied")]
    AccessDenied,
    #[error("sharing violation")]
    SharingViolation,
    #[error("source and target are on different devices")]
    CrossDomain,
    #[error("io error")]
    Unknown,
}

impl ErrorKind {
    /// Whether this kind is transient contention worth retrying.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::AccessDenied | Self::SharingViolation)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::AccessDenied => "access_denied",
            Self::SharingViolation => "sharing_violation",
            Self::CrossDomain => "cross_domain",
            Self::Unknown => "unknown",
        }
    }
}

/// A failed rename, carrying both paths and the platform error it was classified from.
#[derive(Debug, Error)]
#[error("{kind}: rename {} -> {} failed after {attempts} attempt(s): {io}", .from.display(), .to.display())]
pub struct Error {
    pub kind: ErrorKind,
    pub from: PathBuf,
    pub to: PathBuf,
    pub attempts: u32,
    #[source]
    pub io: io::Error,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, from: &Path, to: &Path, attempts: u32, io: io::Error) -> Self {
        Self {
            kind,
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            attempts,
            io,
        }
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// Stable identifier for facts and host-side routing.
    #[must_use]
    pub const fn id(&self) -> ErrorId {
        match self.kind {
            ErrorKind::NotFound => ErrorId::E_NOT_FOUND,
            ErrorKind::AccessDenied | ErrorKind::SharingViolation => ErrorId::E_CONTENTION,
            ErrorKind::CrossDomain => ErrorId::E_EXDEV,
            ErrorKind::Unknown => ErrorId::E_GENERIC,
        }
    }
}

/// Convenient alias for results returning an atomic-rename `Error`.
pub type Result<T> = std::result::Result<T, Error>;

// We intentionally keep SCREAMING_SNAKE_CASE to match emitted IDs.
#[allow(non_camel_case_types, reason = "error IDs are emitted verbatim in facts")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorId {
    E_NOT_FOUND,
    E_CONTENTION,
    E_EXDEV,
    E_GENERIC,
}

#[must_use]
pub const fn id_str(id: ErrorId) -> &'static str {
    match id {
        ErrorId::E_NOT_FOUND => "E_NOT_FOUND",
        ErrorId::E_CONTENTION => "E_CONTENTION",
        ErrorId::E_EXDEV => "E_EXDEV",
        ErrorId::E_GENERIC => "E_GENERIC",
    }
}
