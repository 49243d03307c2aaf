use serde::{Deserialize, Serialize};

use super::types::{RetryPolicy, StrategyChoice};

/// Policy governs how an `AtomicRename` issues and retries its rename.
///
/// The defaults are what the free `rename` function uses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    pub strategy: StrategyChoice,
    pub retry: RetryPolicy,
    /// Fsync the parent directories after a successful rename (Unix only).
    pub durability: bool,
    /// Per-instance cross-device simulation; `None` defers to the gated env knob.
    #[serde(skip)]
    pub force_exdev: Option<bool>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            strategy: StrategyChoice::Platform,
            retry: RetryPolicy::default(),
            durability: true,
            force_exdev: None,
        }
    }
}

impl Policy {
    /// A policy that always retries contention, regardless of platform.
    ///
    /// # Example
    /// ```rust
    /// use atomic_rename::policy::Policy;
    /// use atomic_rename::{AtomicRename, logging::JsonlSink};
    ///
    /// let api = AtomicRename::new(JsonlSink, JsonlSink, Policy::retrying());
    /// # let _ = api;
    /// ```
    #[must_use]
    pub fn retrying() -> Self {
        Self {
            strategy: StrategyChoice::Retrying,
            ..Self::default()
        }
    }
}
