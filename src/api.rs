// Facade that wires policy, strategy and primitive together and emits facts.

use std::path::Path;

use log::Level;
use serde_json::json;
use uuid::Uuid;

use crate::fs::{platform_strategy, OsRename, RenamePrimitive, ReplaceOutcome, ReplaceStrategy};
use crate::logging::audit::{AuditCtx, Decision, EventBuilder, Stage};
use crate::logging::{now_iso, AuditSink, FactsEmitter};
use crate::policy::Policy;
use crate::types::errors::{id_str, Result};

/// Atomic replace with a chosen policy and observability sinks.
///
/// Safe to share across threads (given `Sync` sinks); no in-process locks are taken, so
/// concurrent calls against the same target are ordered only by the filesystem.
pub struct AtomicRename<E: FactsEmitter, A: AuditSink> {
    facts: E,
    audit: A,
    policy: Policy,
    strategy: Box<dyn ReplaceStrategy>,
    primitive: Box<dyn RenamePrimitive>,
}

impl<E: FactsEmitter, A: AuditSink> AtomicRename<E, A> {
    pub fn new(facts: E, audit: A, policy: Policy) -> Self {
        let strategy = platform_strategy(&policy);
        let primitive = Box::new(OsRename::new(policy.durability, policy.force_exdev));
        Self {
            facts,
            audit,
            policy,
            strategy,
            primitive,
        }
    }

    /// Replace the underlying rename call, e.g. with a fault-injecting one in tests.
    #[must_use]
    pub fn with_primitive(mut self, primitive: Box<dyn RenamePrimitive>) -> Self {
        self.primitive = primitive;
        self
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Name of the strategy the policy resolved to (`direct` or `retrying`).
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Move `source` onto `target`, replacing any existing file there.
    ///
    /// # Errors
    ///
    /// See [`crate::rename`].
    pub fn rename(&self, source: impl AsRef<Path>, target: impl AsRef<Path>) -> Result<()> {
        self.replace(source.as_ref(), target.as_ref()).map(|_| ())
    }

    /// Like [`rename`](Self::rename), also reporting how many attempts it took.
    ///
    /// # Errors
    ///
    /// See [`crate::rename`].
    pub fn replace(&self, source: &Path, target: &Path) -> Result<ReplaceOutcome> {
        let ctx = AuditCtx {
            facts: &self.facts,
            op_id: Uuid::new_v4().to_string(),
            ts: now_iso(),
            source: source.display().to_string(),
            target: target.display().to_string(),
            strategy: self.strategy.name(),
        };
        EventBuilder::new(&ctx, Stage::RenameAttempt).emit(Decision::Success);

        let res = self.strategy.replace(self.primitive.as_ref(), source, target);
        match &res {
            Ok(out) => {
                let decision = if out.attempts > 1 {
                    self.audit.log(
                        Level::Warn,
                        &format!(
                            "rename {} -> {} absorbed contention after {} attempts",
                            ctx.source, ctx.target, out.attempts
                        ),
                    );
                    Decision::Warn
                } else {
                    Decision::Success
                };
                EventBuilder::new(&ctx, Stage::RenameResult)
                    .merge(json!({
                        "attempts": out.attempts,
                        "duration_ms": out.elapsed_ms,
                    }))
                    .emit(decision);
            }
            Err(e) => {
                self.audit.log(Level::Error, &e.to_string());
                EventBuilder::new(&ctx, Stage::RenameResult)
                    .merge(json!({
                        "attempts": e.attempts,
                        "error_kind": e.kind.as_str(),
                        "error_id": id_str(e.id()),
                        "retryable": e.is_retryable(),
                        "error": e.io.to_string(),
                    }))
                    .emit(Decision::Failure);
            }
        }
        res
    }
}
