//! Policy configuration for atomic-rename.
//!
//! Consumers construct a [`Policy`](crate::policy::Policy) via `Default` or
//! `Policy::retrying()`, customize fields, and hand it to
//! [`AtomicRename::new`](crate::AtomicRename::new). `Policy` is serde-friendly so
//! hosts can embed it in their own configuration files.
//!
//! Submodules:
//! - `config`: policy struct and presets
//! - `types`: strategy selection and retry bounds

pub mod config;
pub mod types;

pub use config::Policy;
pub use types::{RetryPolicy, StrategyChoice};
