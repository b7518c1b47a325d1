// ABOUTME: Helm subcommand used for the main deploy invocation.
// ABOUTME: Selects the argument prefix placed ahead of all deploy flags.

use serde::Deserialize;

/// How the release is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeployMode {
    /// `helm upgrade --install`: install if missing, upgrade otherwise.
    #[default]
    UpgradeInstall,
    /// `helm upgrade`: the release must already exist.
    Upgrade,
    /// `helm install`: the release must not exist yet.
    Install,
}

impl DeployMode {
    pub fn prefix(&self) -> &'static [&'static str] {
        match self {
            DeployMode::UpgradeInstall => &["upgrade", "--install"],
            DeployMode::Upgrade => &["upgrade"],
            DeployMode::Install => &["install"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_upgrade_install() {
        assert_eq!(DeployMode::default().prefix(), ["upgrade", "--install"]);
    }

    #[test]
    fn parses_kebab_case() {
        let mode: DeployMode = serde_yaml::from_str("upgrade-install").unwrap();
        assert_eq!(mode, DeployMode::UpgradeInstall);
        let mode: DeployMode = serde_yaml::from_str("install").unwrap();
        assert_eq!(mode.prefix(), ["install"]);
    }
}
