// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use serde::Serialize;
use std::time::Instant;

use crate::deploy::RunSummary;
use crate::error::Error;
use crate::release::PlanStep;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn duration(&self) -> Option<f64> {
        self.start_time.map(|_| self.elapsed_secs())
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => {
                println!("{message}");
            }
            OutputMode::Json => emit(&JsonEvent {
                event: "success",
                message,
                kind: None,
                duration_secs: self.duration(),
                summary: None,
            }),
        }
    }

    /// Report a completed run.
    pub fn summary(&self, summary: &RunSummary) {
        let message = format!(
            "Released {}{}{}",
            summary.release,
            if summary.replaced { " (replaced)" } else { "" },
            if summary.verified { ", tests passed" } else { "" },
        );
        match self.mode {
            OutputMode::Json => emit(&JsonEvent {
                event: "success",
                message: &message,
                kind: None,
                duration_secs: self.duration(),
                summary: Some(summary),
            }),
            _ => self.success(&message),
        }
    }

    /// Print the commands a run would issue.
    pub fn plan(&self, steps: &[PlanStep]) {
        match self.mode {
            OutputMode::Json => {
                for step in steps {
                    if let Ok(json) = serde_json::to_string(step) {
                        println!("{json}");
                    }
                }
            }
            _ => {
                for step in steps {
                    match step.condition {
                        Some(condition) => {
                            println!("[{}] {}  (if {condition})", step.stage, step.command)
                        }
                        None => println!("[{}] {}", step.stage, step.command),
                    }
                }
            }
        }
    }

    /// Print an error message.
    pub fn error(&self, error: &Error) {
        let message = error.to_string();
        let kind = match error {
            Error::Release(e) => Some(e.kind().as_str()),
            _ => None,
        };
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
                if let Error::Release(e) = error
                    && e.kind().requires_intervention()
                {
                    eprintln!("The release is in an unknown state; inspect it with `helm history`.");
                }
            }
            OutputMode::Json => emit_err(&JsonEvent {
                event: "error",
                message: &message,
                kind,
                duration_secs: self.duration(),
                summary: None,
            }),
        }
    }
}

fn emit(event: &JsonEvent<'_>) {
    if let Ok(json) = serde_json::to_string(event) {
        println!("{json}");
    }
}

fn emit_err(event: &JsonEvent<'_>) {
    if let Ok(json) = serde_json::to_string(event) {
        eprintln!("{json}");
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a RunSummary>,
}
