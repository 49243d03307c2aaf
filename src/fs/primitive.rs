//! The single rename call underneath every replace strategy.
//!
//! On Unix the call is issued relative to directory handles:
//! `open_dir(parent) -> renameat(src_dir, name, dst_dir, name) -> fsync(dst_dir)`.
//!
//! Test override knobs:
//! - `ATOMIC_RENAME_FORCE_EXDEV=1` simulates a cross-device rename error (EXDEV) before the
//!   filesystem is touched. Honoured only with `ATOMIC_RENAME_TEST_ALLOW_ENV_OVERRIDES=1`.
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::Path;

use crate::constants::{ENV_ALLOW_OVERRIDES, ENV_FORCE_EXDEV};

/// One attempt at moving `from` onto `to`, replacing whatever `to` names.
///
/// Implementations must leave both paths untouched when they return an error.
pub trait RenamePrimitive: Send + Sync {
    /// # Errors
    ///
    /// Returns the raw platform error of the rename call.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// The platform rename call.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRename {
    durability: bool,
    force_exdev: Option<bool>,
}

impl OsRename {
    #[must_use]
    pub const fn new(durability: bool, force_exdev: Option<bool>) -> Self {
        Self {
            durability,
            force_exdev,
        }
    }

    fn inject_exdev(&self) -> bool {
        // Per-instance override wins; env only for legacy tests that opt in.
        match self.force_exdev {
            Some(v) => v,
            None => {
                std::env::var_os(ENV_ALLOW_OVERRIDES) == Some(OsString::from("1"))
                    && std::env::var_os(ENV_FORCE_EXDEV) == Some(OsString::from("1"))
            }
        }
    }
}

fn exdev_error() -> io::Error {
    #[cfg(unix)]
    {
        io::Error::from_raw_os_error(rustix::io::Errno::XDEV.raw_os_error())
    }
    #[cfg(windows)]
    {
        // ERROR_NOT_SAME_DEVICE
        io::Error::from_raw_os_error(17)
    }
    #[cfg(not(any(unix, windows)))]
    {
        io::Error::new(io::ErrorKind::Other, "cross-device rename")
    }
}

/// Split a path into its parent directory and final component.
fn split(path: &Path) -> io::Result<(&Path, &OsStr)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok((parent, name))
}

#[cfg(unix)]
mod unix {
    use std::io;
    use std::path::Path;

    use rustix::fd::OwnedFd;
    use rustix::fs::{fstat, openat, renameat, statat, unlinkat, AtFlags, Mode, OFlags, Stat, CWD};
    use rustix::io::Errno;

    fn errno_to_io(e: Errno) -> io::Error {
        io::Error::from_raw_os_error(e.raw_os_error())
    }

    /// Open a directory with `O_DIRECTORY` so the rename is pinned to it.
    /// Symlinks in the path, including the last component, are followed.
    pub(super) fn open_dir(dir: &Path) -> io::Result<OwnedFd> {
        openat(
            CWD,
            dir,
            OFlags::RDONLY | OFlags::DIRECTORY | OFlags::CLOEXEC,
            Mode::empty(),
        )
        .map_err(errno_to_io)
    }

    fn same_inode(a: &Stat, b: &Stat) -> bool {
        a.st_dev == b.st_dev && a.st_ino == b.st_ino
    }

    fn sync_dirs(dst_dir: &OwnedFd, src_dir: Option<&OwnedFd>) {
        let _ = rustix::fs::fsync(dst_dir);
        if let Some(dir) = src_dir {
            let _ = rustix::fs::fsync(dir);
        }
    }

    pub(super) fn rename_at(from: &Path, to: &Path, durability: bool) -> io::Result<()> {
        let (src_parent, src_name) = super::split(from)?;
        let (dst_parent, dst_name) = super::split(to)?;

        let dst_dir = open_dir(dst_parent)?;
        let src_dir = if src_parent == dst_parent {
            None
        } else {
            Some(open_dir(src_parent)?)
        };
        let src_at = src_dir.as_ref().unwrap_or(&dst_dir);

        // renameat between two links to one inode succeeds without removing the source.
        let src_stat = statat(src_at, src_name, AtFlags::SYMLINK_NOFOLLOW);
        let dst_stat = statat(&dst_dir, dst_name, AtFlags::SYMLINK_NOFOLLOW);
        if let (Ok(s), Ok(d)) = (src_stat, dst_stat) {
            if same_inode(&s, &d) {
                let same_dir = match src_dir.as_ref() {
                    None => true,
                    Some(sd) => {
                        let a = fstat(sd).map_err(errno_to_io)?;
                        let b = fstat(&dst_dir).map_err(errno_to_io)?;
                        same_inode(&a, &b)
                    }
                };
                if same_dir && src_name == dst_name {
                    // Two spellings of one directory entry.
                    return Ok(());
                }
                unlinkat(src_at, src_name, AtFlags::empty()).map_err(errno_to_io)?;
                if durability {
                    sync_dirs(&dst_dir, src_dir.as_ref());
                }
                return Ok(());
            }
        }

        renameat(src_at, src_name, &dst_dir, dst_name).map_err(errno_to_io)?;

        // The rename has happened; a failed fsync must not report it as undone.
        if durability {
            sync_dirs(&dst_dir, src_dir.as_ref());
        }
        Ok(())
    }
}

impl RenamePrimitive for OsRename {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if self.inject_exdev() {
            return Err(exdev_error());
        }
        #[cfg(unix)]
        {
            unix::rename_at(from, to, self.durability)
        }
        #[cfg(not(unix))]
        {
            // MoveFileExW(MOVEFILE_REPLACE_EXISTING) on Windows.
            split(from)?;
            split(to)?;
            std::fs::rename(from, to)
        }
    }
}
