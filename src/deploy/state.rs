// ABOUTME: Pipeline state marker types for the type state pattern.
// ABOUTME: Each state carries what earlier stages decided and limits the next transition.

/// Initial state: nothing has been invoked yet.
/// Available actions: `run_pre_hooks()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Pending;

/// Pre-hooks succeeded.
/// Available actions: `decide_replace()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Prepared;

/// Replace decision made.
/// Available actions: `remove_if_replacing()`
#[derive(Debug, Clone, Copy)]
pub struct Decided {
    pub(crate) replace: bool,
}

/// Existing release removed if the decision required it.
/// Available actions: `deploy()`
#[derive(Debug, Clone, Copy)]
pub struct Cleared {
    pub(crate) replaced: bool,
}

/// Deploy command succeeded.
/// Available actions: `verify()`, `rollback()`, `fail_verification()`
#[derive(Debug, Clone, Copy)]
pub struct Deployed {
    pub(crate) replaced: bool,
}

/// Release tests passed, or were not requested.
/// Available actions: `run_post_hooks()`
#[derive(Debug, Clone, Copy)]
pub struct Verified {
    pub(crate) replaced: bool,
    pub(crate) verified: bool,
}

/// All stages succeeded.
/// Available actions: `finish()`
#[derive(Debug, Clone, Copy)]
pub struct Completed {
    pub(crate) replaced: bool,
    pub(crate) verified: bool,
}
