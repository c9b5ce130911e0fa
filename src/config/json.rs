//! Load configuration from JSON files.

use std::path::Path;

use super::PartialConfig;

/// Load configuration from a JSON file.
pub(crate) fn load_config<P>(path: P) -> anyhow::Result<PartialConfig>
where
    P: AsRef<Path>,
{
    let content = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&content)?)
}
