//! Map platform rename errors onto the crate's error taxonomy.
use std::io;

use crate::types::errors::ErrorKind;

#[cfg(windows)]
mod win {
    pub const ERROR_ACCESS_DENIED: i32 = 5;
    pub const ERROR_NOT_SAME_DEVICE: i32 = 17;
    pub const ERROR_SHARING_VIOLATION: i32 = 32;
    pub const ERROR_LOCK_VIOLATION: i32 = 33;
}

/// Classify a rename error.
///
/// Raw OS codes are consulted first so that contention is told apart from plain
/// permission problems where the platform distinguishes them; the portable
/// `io::ErrorKind` is the fallback.
#[must_use]
pub fn classify(e: &io::Error) -> ErrorKind {
    if let Some(kind) = classify_os(e) {
        return kind;
    }
    match e.kind() {
        io::ErrorKind::NotFound => ErrorKind::NotFound,
        io::ErrorKind::PermissionDenied => ErrorKind::AccessDenied,
        _ => ErrorKind::Unknown,
    }
}

#[cfg(unix)]
fn classify_os(e: &io::Error) -> Option<ErrorKind> {
    use rustix::io::Errno;
    let errno = Errno::from_io_error(e)?;
    match errno {
        Errno::NOENT => Some(ErrorKind::NotFound),
        Errno::XDEV => Some(ErrorKind::CrossDomain),
        Errno::BUSY | Errno::TXTBSY => Some(ErrorKind::SharingViolation),
        Errno::ACCESS | Errno::PERM => Some(ErrorKind::AccessDenied),
        _ => None,
    }
}

#[cfg(windows)]
fn classify_os(e: &io::Error) -> Option<ErrorKind> {
    match e.raw_os_error()? {
        win::ERROR_SHARING_VIOLATION | win::ERROR_LOCK_VIOLATION => {
            Some(ErrorKind::SharingViolation)
        }
        win::ERROR_ACCESS_DENIED => Some(ErrorKind::AccessDenied),
        win::ERROR_NOT_SAME_DEVICE => Some(ErrorKind::CrossDomain),
        _ => None,
    }
}

#[cfg(not(any(unix, windows)))]
fn classify_os(_e: &io::Error) -> Option<ErrorKind> {
    None
}
