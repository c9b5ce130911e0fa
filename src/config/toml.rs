//! Load configuration from TOML files.

use std::path::Path;

use super::PartialConfig;

/// Load configuration from a TOML file.
pub(crate) fn load_config<P>(path: P) -> anyhow::Result<PartialConfig>
where
    P: AsRef<Path>,
{
    let content = std::fs::read_to_string(path.as_ref())?;
    load_config_str(content)
}

/// Load configuration from a TOML string.
fn load_config_str<S>(content: S) -> anyhow::Result<PartialConfig>
where
    S: AsRef<str>,
{
    Ok(toml::from_str(content.as_ref())?)
}
