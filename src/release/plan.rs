// ABOUTME: Dry listing of the commands a run may issue, in pipeline order.
// ABOUTME: Backs the `plan` subcommand; nothing here executes anything.

use serde::Serialize;

use crate::deploy::Stage;
use crate::exec::format_command;

use super::ReleaseDescriptor;

/// One command a run may issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanStep {
    pub stage: &'static str,
    pub command: String,
    /// Set when the step only runs under some condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<&'static str>,
}

impl PlanStep {
    fn new(stage: Stage, command: String, condition: Option<&'static str>) -> Self {
        Self {
            stage: stage.as_str(),
            command,
            condition,
        }
    }
}

impl ReleaseDescriptor {
    /// Every command the pipeline could issue for this release, in order.
    pub fn plan(&self) -> Vec<PlanStep> {
        let mut steps: Vec<PlanStep> = self
            .pre_ops
            .iter()
            .map(|op| PlanStep::new(Stage::PreHooks, op.to_string(), None))
            .collect();

        if !self.artifact.is_empty() {
            steps.push(PlanStep::new(
                Stage::ReplaceDecision,
                format_command(&self.tool, &self.manifest_args()),
                None,
            ));
            steps.push(PlanStep::new(
                Stage::Removal,
                format_command(&self.tool, &self.removal_command_args()),
                Some("deployed image equals the desired image"),
            ));
        }

        steps.push(PlanStep::new(
            Stage::Deploy,
            format_command(&self.tool, &self.deploy_args),
            None,
        ));

        if self.verify {
            steps.push(PlanStep::new(
                Stage::Verify,
                format_command(&self.tool, &self.verify_args()),
                None,
            ));
            if self.rollback_on_failure {
                steps.push(PlanStep::new(
                    Stage::Rollback,
                    format_command(&self.tool, &self.rollback_args()),
                    Some("release tests fail"),
                ));
            }
        }

        steps.extend(
            self.post_ops
                .iter()
                .map(|op| PlanStep::new(Stage::PostHooks, op.to_string(), None)),
        );
        steps
    }
}
