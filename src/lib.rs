#![forbid(unsafe_code)]
//! atomic-rename: replace a file with another as one indivisible step.
//!
//! Safety model highlights:
//! - A replace is a single `rename` of `source` onto `target`; observers see the old target
//!   or the new content, never a truncated file, and no temporary files are created.
//! - Where the platform rename can fail spuriously while another replace of the same target
//!   is in flight, a bounded retry loop absorbs the contention (see [`fs::RetryingReplace`]).
//! - No in-process locks are held; concurrent callers are ordered by the filesystem alone.
//! - This crate forbids `unsafe` and uses `rustix` for syscalls on Unix.
//!
//! Both paths must live on the same filesystem; crossing devices fails with
//! [`ErrorKind::CrossDomain`] and is not retried.

pub mod constants;
pub mod fs;
pub mod logging;
pub mod policy;
pub mod types;

mod api;

use std::path::Path;

pub use api::AtomicRename;
pub use types::{Error, ErrorKind, Result};

/// Move `source` onto `target`, replacing any existing file at `target`.
///
/// Uses the platform strategy and default retry bounds and emits no facts; build an
/// [`AtomicRename`] for configuration or observability.
///
/// # Errors
///
/// - [`ErrorKind::NotFound`] when `source` does not exist (or `target`'s directory doesn't).
/// - [`ErrorKind::AccessDenied`] / [`ErrorKind::SharingViolation`] when the platform kept
///   refusing the rename after the retry budget was spent.
/// - [`ErrorKind::CrossDomain`] when the paths are on different devices.
/// - [`ErrorKind::Unknown`] for anything else; the platform error is kept as the source.
///
/// A failed call leaves both paths as they were.
///
/// # Example
/// ```rust
/// let dir = tempfile::tempdir()?;
/// let staged = dir.path().join("config.json.new");
/// let live = dir.path().join("config.json");
/// std::fs::write(&staged, b"{}")?;
/// atomic_rename::rename(&staged, &live)?;
/// assert!(!staged.exists());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn rename(source: impl AsRef<Path>, target: impl AsRef<Path>) -> Result<()> {
    let policy = policy::Policy::default();
    let prim = fs::OsRename::new(policy.durability, policy.force_exdev);
    fs::platform_strategy(&policy)
        .replace(&prim, source.as_ref(), target.as_ref())
        .map(|_| ())
}
