//! Filesystem mechanism: the rename call, error classification, and replace strategies.
//! Emits no logs; pure mechanism.
pub mod atomic;
pub mod classify;
pub mod primitive;

pub use atomic::{platform_strategy, DirectReplace, ReplaceOutcome, ReplaceStrategy, RetryingReplace};
pub use classify::classify;
pub use primitive::{OsRename, RenamePrimitive};
