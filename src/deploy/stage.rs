// ABOUTME: Named stages of an orchestration run.
// ABOUTME: Used as the stage field on tracing events and to tag failures.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    PreHooks,
    ReplaceDecision,
    Removal,
    Deploy,
    Verify,
    Rollback,
    PostHooks,
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::PreHooks => "pre-hooks",
            Stage::ReplaceDecision => "replace-decision",
            Stage::Removal => "removal",
            Stage::Deploy => "deploy",
            Stage::Verify => "verify",
            Stage::Rollback => "rollback",
            Stage::PostHooks => "post-hooks",
            Stage::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
