//! Shared crate-wide constants for atomic-rename.
//!
//! Centralizes the retry defaults and labels used across modules.
//! Adjusting these here will propagate through the crate.

/// Upper bound on rename attempts made by the retrying strategy for one call.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 50;

/// Wall-clock budget in milliseconds for absorbing transient contention on one call.
/// The retrying strategy never starts a backoff sleep that would end past this budget.
pub const DEFAULT_RETRY_BUDGET_MS: u64 = 2_000;

/// First backoff sleep after a contention error; doubled after each retry.
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 1;

/// Cap for the exponential backoff sleep.
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 64;

/// Gate for test-only environment overrides. Nothing below is honoured unless this is `1`.
pub const ENV_ALLOW_OVERRIDES: &str = "ATOMIC_RENAME_TEST_ALLOW_ENV_OVERRIDES";

/// Simulate a cross-device rename error (EXDEV) without touching the filesystem.
pub const ENV_FORCE_EXDEV: &str = "ATOMIC_RENAME_FORCE_EXDEV";

/// Subsystem label on every emitted fact.
pub const FACTS_SUBSYSTEM: &str = "atomic_rename";

/// Schema version stamped into every fact envelope.
pub const SCHEMA_VERSION: i64 = 1;
