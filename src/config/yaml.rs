//! Load configuration from YAML files.

use std::path::Path;

use super::PartialConfig;

/// Load configuration from a YAML file.
pub(crate) fn load_config<P>(path: P) -> anyhow::Result<PartialConfig>
where
    P: AsRef<Path>,
{
    let content = std::fs::read_to_string(path.as_ref())?;
    load_config_str(content)
}

/// Load configuration from a YAML string.
fn load_config_str<S>(content: S) -> anyhow::Result<PartialConfig>
where
    S: AsRef<str>,
{
    Ok(serde_yaml::from_str(content.as_ref())?)
}

#[cfg(test)]
mod tests {
    use crate::config::{Extensions, Settings};

    #[test]
    fn load_config_str() {
        const CONTENT: &str = r##"
            static_root: public
            bulma:
              extensions: all
              variables:
                primary: "#000000"
                size-1: 6rem
              dark_variables:
                primary: "#333"
        "##;

        let config = super::load_config_str(CONTENT).unwrap();

        assert_eq!(config.static_root.unwrap().to_str().unwrap(), "public");

        let settings = Settings::try_from(config.bulma.unwrap()).unwrap();

        assert_eq!(settings.extensions, Extensions::All);
        assert_eq!(settings.themes[""]["size-1"], "6rem");
        assert_eq!(settings.themes["dark"]["primary"], "#333");
    }
}
