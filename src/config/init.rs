// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates helmflow.yml template files.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::ReleaseName;

use super::CONFIG_FILENAME;

const DEFAULT_RELEASE: &str = "my-app";
const DEFAULT_CHART: &str = "./chart";

pub fn init_config(
    dir: &Path,
    release: Option<&str>,
    chart: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let release = ReleaseName::new(release.unwrap_or(DEFAULT_RELEASE))
        .map_err(|e| Error::InvalidConfig(e.to_string()))?;
    let chart = chart.unwrap_or(DEFAULT_CHART);
    if chart.is_empty() {
        return Err(Error::InvalidConfig("chart cannot be empty".to_string()));
    }

    std::fs::write(&config_path, template_yaml(&release, chart))?;
    tracing::info!(path = %config_path.display(), "wrote config template");

    Ok(())
}

fn template_yaml(release: &ReleaseName, chart: &str) -> String {
    format!(
        r#"release: {release}
chart: {chart}
# mode: upgrade-install   # or: upgrade, install
# namespace: default
values:
  - image.repository=my-registry/my-app
  - image.tag=latest
atomic: true
wait: true
timeout: 5m
# repos:
#   - name: bitnami
#     url: https://charts.bitnami.com/bitnami
#     password:
#       env: HELM_REPO_PASSWORD
test:
  enabled: false
  rollback_on_failure: true
# pre_commands:
#   - [kubectl, apply, -f, crds/]
# post_commands:
#   - [kubectl, rollout, status, deployment/my-app]
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn template_parses_back() {
        let release = ReleaseName::new("web").unwrap();
        let config = Config::from_yaml(&template_yaml(&release, "./charts/web")).unwrap();
        assert_eq!(config.release, Some(release));
        assert_eq!(config.chart.as_deref(), Some("./charts/web"));
        assert!(config.test.rollback_on_failure);
    }
}
