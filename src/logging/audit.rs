// Audit helpers that emit facts for each rename.
//
// Side-effects:
// - Emits JSON facts via `FactsEmitter` for the `rename.attempt` and `rename.result` stages.
// - Ensures a minimal envelope is present on every fact: `schema_version`, `ts`, `op_id`,
//   `source`, `target`, `strategy`.
use serde_json::{json, Value};

use crate::constants::{FACTS_SUBSYSTEM, SCHEMA_VERSION};
use crate::logging::FactsEmitter;

pub(crate) struct AuditCtx<'a> {
    pub facts: &'a dyn FactsEmitter,
    pub op_id: String,
    pub ts: String,
    pub source: String,
    pub target: String,
    pub strategy: &'static str,
}

/// Stage for typed audit emission.
#[derive(Clone, Copy, Debug)]
pub enum Stage {
    RenameAttempt,
    RenameResult,
}

impl Stage {
    const fn as_event(self) -> &'static str {
        match self {
            Stage::RenameAttempt => "rename.attempt",
            Stage::RenameResult => "rename.result",
        }
    }
}

/// Decision severity for audit events.
#[derive(Clone, Copy, Debug)]
pub enum Decision {
    Success,
    Failure,
    Warn,
}

impl Decision {
    const fn as_str(self) -> &'static str {
        match self {
            Decision::Success => "success",
            Decision::Failure => "failure",
            Decision::Warn => "warn",
        }
    }
}

pub struct EventBuilder<'a> {
    ctx: &'a AuditCtx<'a>,
    stage: Stage,
    fields: serde_json::Map<String, Value>,
}

impl<'a> EventBuilder<'a> {
    pub(crate) fn new(ctx: &'a AuditCtx<'a>, stage: Stage) -> Self {
        let mut fields = serde_json::Map::new();
        fields.insert("stage".to_string(), json!(stage.as_event()));
        Self { ctx, stage, fields }
    }

    #[must_use]
    pub fn merge(mut self, extra: Value) -> Self {
        if let Some(obj) = extra.as_object() {
            for (k, v) in obj {
                self.fields.insert(k.clone(), v.clone());
            }
        }
        self
    }

    pub fn emit(self, decision: Decision) {
        let mut fields = Value::Object(self.fields);
        if let Some(obj) = fields.as_object_mut() {
            obj.insert("decision".into(), json!(decision.as_str()));
            obj.entry("schema_version").or_insert(json!(SCHEMA_VERSION));
            obj.entry("ts").or_insert(json!(self.ctx.ts));
            obj.entry("op_id").or_insert(json!(self.ctx.op_id));
            obj.entry("source").or_insert(json!(self.ctx.source));
            obj.entry("target").or_insert(json!(self.ctx.target));
            obj.entry("strategy").or_insert(json!(self.ctx.strategy));
        }
        self.ctx
            .facts
            .emit(FACTS_SUBSYSTEM, self.stage.as_event(), decision.as_str(), fields);
    }
}
