// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Validates release names and key=value lists while the file is parsed.

use serde::Deserialize;

use crate::types::{ReleaseName, ValueAssignment};

pub fn deserialize_release_name<'de, D>(deserializer: D) -> Result<Option<ReleaseName>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    opt.map(|s| ReleaseName::new(&s).map_err(serde::de::Error::custom))
        .transpose()
}

pub fn deserialize_assignments<'de, D>(deserializer: D) -> Result<Vec<ValueAssignment>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values: Vec<String> = Vec::deserialize(deserializer)?;
    values
        .iter()
        .map(|s| ValueAssignment::parse(s))
        .collect::<Result<Vec<_>, _>>()
        .map_err(serde::de::Error::custom)
}
