// ABOUTME: Tests for the manifest scanner and the replace decision.
// ABOUTME: Property tests cover first-match and quoting rules; async tests cover lookup failures.

mod support;

use helmflow::deploy::{ArtifactResolver, IMAGE_MARKER, ResolveError, scan_manifest};
use helmflow::exec::CancelToken;
use helmflow::release::{DeployMode, ReleaseBuilder};
use helmflow::types::Artifact;
use proptest::prelude::*;
use support::{RecordingExecutor, capture_logs, manifest_with_image};

fn manifest_args() -> Vec<String> {
    ["get", "manifest", "myapp"].iter().map(|s| s.to_string()).collect()
}

prop_compose! {
    fn image_ref()(name in "[a-z][a-z0-9/.-]{0,20}", tag in "[a-z0-9][a-z0-9._-]{0,10}") -> String {
        format!("{name}:{tag}")
    }
}

proptest! {
    #[test]
    fn first_declaration_wins(first in image_ref(), second in image_ref(), indent in 0usize..12) {
        let manifest = format!(
            "kind: Pod\n{pad}image: \"{first}\"\n{pad}image: \"{second}\"\n",
            pad = " ".repeat(indent + 1),
        );
        prop_assert_eq!(scan_manifest(&manifest), Some(first.as_str()));
    }

    #[test]
    fn lines_without_marker_never_match(lines in prop::collection::vec("[a-zA-Z0-9:_ -]{0,30}", 0..20)) {
        let manifest = lines
            .iter()
            .filter(|l| !l.contains(IMAGE_MARKER))
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");
        prop_assert_eq!(scan_manifest(&manifest), None);
    }

    #[test]
    fn quoted_value_is_taken_verbatim(value in "[^\"\n\r]{0,40}") {
        let manifest = format!("  image: \"{value}\"\n");
        prop_assert_eq!(scan_manifest(&manifest), Some(value.as_str()));
    }
}

#[tokio::test]
async fn equal_image_requests_replace() {
    let executor = RecordingExecutor::new().manifest(&manifest_with_image("myimg:v1"));
    let cancel = CancelToken::new();
    let resolver = ArtifactResolver::new(&executor, &cancel, "helm");

    assert!(
        resolver
            .should_replace(&manifest_args(), &Artifact::new("myimg", "v1"))
            .await
    );
}

#[tokio::test]
async fn different_image_does_not_replace() {
    let executor = RecordingExecutor::new().manifest(&manifest_with_image("myimg:v1"));
    let cancel = CancelToken::new();
    let resolver = ArtifactResolver::new(&executor, &cancel, "helm");

    assert!(
        !resolver
            .should_replace(&manifest_args(), &Artifact::new("myimg", "v2"))
            .await
    );
}

#[tokio::test]
async fn query_failure_does_not_replace() {
    let executor = RecordingExecutor::new();
    let cancel = CancelToken::new();
    let resolver = ArtifactResolver::new(&executor, &cancel, "helm");

    let err = resolver
        .resolve_current_artifact(&manifest_args())
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::Query(_)));
    assert!(
        !resolver
            .should_replace(&manifest_args(), &Artifact::new("myimg", "v1"))
            .await
    );
}

#[tokio::test]
async fn query_failure_logs_tool_stderr() {
    let (_guard, logs) = capture_logs();
    let executor = RecordingExecutor::new();
    let cancel = CancelToken::new();
    let resolver = ArtifactResolver::new(&executor, &cancel, "helm");

    assert!(
        !resolver
            .should_replace(&manifest_args(), &Artifact::new("myimg", "v1"))
            .await
    );
    let logs = logs.contents();
    assert!(logs.contains("could not read deployed manifest"));
    assert!(logs.contains("Error: release: not found"));
}

#[tokio::test]
async fn manifest_without_image_is_not_found() {
    let executor = RecordingExecutor::new().manifest("kind: Service\n");
    let cancel = CancelToken::new();
    let resolver = ArtifactResolver::new(&executor, &cancel, "helm");

    let err = resolver
        .resolve_current_artifact(&manifest_args())
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::NotFound));
}

#[tokio::test]
async fn query_matches_the_planned_command() {
    let descriptor = ReleaseBuilder::new(DeployMode::UpgradeInstall)
        .release("myapp")
        .chart("./chart")
        .namespace("prod")
        .build_descriptor()
        .unwrap();
    let executor = RecordingExecutor::new().manifest(&manifest_with_image("myimg:v1"));
    let cancel = CancelToken::new();
    let resolver = ArtifactResolver::new(&executor, &cancel, descriptor.tool());

    let current = resolver
        .resolve_current_artifact(&descriptor.manifest_args())
        .await
        .unwrap();
    assert_eq!(current, "myimg:v1");
    assert_eq!(executor.captures(), ["helm get manifest myapp -n prod"]);

    let planned: Vec<String> = descriptor.plan().into_iter().map(|s| s.command).collect();
    assert!(planned.contains(&executor.captures()[0]));
}
