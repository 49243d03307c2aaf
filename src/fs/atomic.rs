//! Replace strategies layered over a [`RenamePrimitive`].
//!
//! - [`DirectReplace`]: one rename call. Right for platforms whose rename replaces an
//!   existing destination in a single filesystem transaction without spurious errors.
//! - [`RetryingReplace`]: the same call in a bounded loop that absorbs
//!   `AccessDenied`/`SharingViolation` while another replace of the target is in flight.
//!
//! [`platform_strategy`] picks one per build target so call sites never branch on platform.
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use super::classify::classify;
use super::primitive::RenamePrimitive;
use crate::policy::{Policy, RetryPolicy, StrategyChoice};
use crate::types::errors::{Error, ErrorKind, Result};

/// What a successful replace cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// Rename calls issued; zero when `source` and `target` name the same entry.
    pub attempts: u32,
    pub elapsed_ms: u64,
}

/// Move `source` onto `target`, replacing any existing file there.
pub trait ReplaceStrategy: Send + Sync {
    /// Stable label for facts.
    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns the classified error of the last rename attempt.
    fn replace(
        &self,
        prim: &dyn RenamePrimitive,
        source: &Path,
        target: &Path,
    ) -> Result<ReplaceOutcome>;
}

fn elapsed_ms(t0: Instant) -> u64 {
    u64::try_from(t0.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Renaming an entry onto itself does nothing as long as it exists.
fn same_entry(source: &Path, target: &Path, t0: Instant) -> Option<Result<ReplaceOutcome>> {
    if source != target {
        return None;
    }
    Some(match std::fs::symlink_metadata(source) {
        Ok(_) => Ok(ReplaceOutcome {
            attempts: 0,
            elapsed_ms: elapsed_ms(t0),
        }),
        Err(e) => Err(Error::new(classify(&e), source, target, 0, e)),
    })
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DirectReplace;

impl ReplaceStrategy for DirectReplace {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn replace(
        &self,
        prim: &dyn RenamePrimitive,
        source: &Path,
        target: &Path,
    ) -> Result<ReplaceOutcome> {
        let t0 = Instant::now();
        if let Some(res) = same_entry(source, target, t0) {
            return res;
        }
        match prim.rename(source, target) {
            Ok(()) => Ok(ReplaceOutcome {
                attempts: 1,
                elapsed_ms: elapsed_ms(t0),
            }),
            Err(e) => Err(Error::new(classify(&e), source, target, 1, e)),
        }
    }
}

/// Bounded retry over contention errors with capped exponential backoff.
#[derive(Clone, Copy, Debug)]
pub struct RetryingReplace {
    max_attempts: u32,
    budget: Duration,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl Default for RetryingReplace {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

impl RetryingReplace {
    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        let p = policy.normalized();
        Self {
            max_attempts: p.max_attempts,
            budget: Duration::from_millis(p.budget_ms),
            initial_backoff: Duration::from_millis(p.initial_backoff_ms),
            max_backoff: Duration::from_millis(p.max_backoff_ms),
        }
    }
}

impl ReplaceStrategy for RetryingReplace {
    fn name(&self) -> &'static str {
        "retrying"
    }

    fn replace(
        &self,
        prim: &dyn RenamePrimitive,
        source: &Path,
        target: &Path,
    ) -> Result<ReplaceOutcome> {
        let t0 = Instant::now();
        if let Some(res) = same_entry(source, target, t0) {
            return res;
        }
        let mut attempts: u32 = 0;
        let mut backoff = self.initial_backoff;
        loop {
            attempts += 1;
            let e = match prim.rename(source, target) {
                Ok(()) => {
                    return Ok(ReplaceOutcome {
                        attempts,
                        elapsed_ms: elapsed_ms(t0),
                    })
                }
                Err(e) => e,
            };
            let kind: ErrorKind = classify(&e);
            let out_of_budget = t0.elapsed() + backoff > self.budget;
            if !kind.is_retryable() || attempts >= self.max_attempts || out_of_budget {
                return Err(Error::new(kind, source, target, attempts, e));
            }
            thread::sleep(backoff);
            backoff = (backoff * 2).min(self.max_backoff);
        }
    }
}

/// Strategy for this build target, unless the policy forces one.
#[must_use]
pub fn platform_strategy(policy: &Policy) -> Box<dyn ReplaceStrategy> {
    match policy.strategy {
        StrategyChoice::Direct => Box::new(DirectReplace),
        StrategyChoice::Retrying => Box::new(RetryingReplace::new(policy.retry)),
        StrategyChoice::Platform => {
            if cfg!(windows) {
                Box::new(RetryingReplace::new(policy.retry))
            } else {
                Box::new(DirectReplace)
            }
        }
    }
}
