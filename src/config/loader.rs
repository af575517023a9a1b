//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::CmsConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<CmsConfig, ConfigError> {
    let config: CmsConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<CmsConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
        [listener]
        bind_address = "127.0.0.1:9000"

        [cms]
        editor_token = "secret"

        [seo]
        title = "Example"

        [seo.metas.name]
        robots = "index, follow"

        [[sites]]
        id = 1
        name = "french"
        host = "example.fr"
        locale = "fr"
        is_default = true

        [[routes]]
        name = "contact"
        path = "/{_locale}/contact"

        [[routes]]
        name = "page_slug"
        path = "/{*path}"
        priority = -10

        [[pages]]
        id = 1
        site_id = 1
        route_name = "contact"
        name = "Contact"
        meta_description = "Write to us"
    "#;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.cms.editor_token.as_deref(), Some("secret"));
        assert!(config.cms.serve_snapshots);
        assert_eq!(config.sites[0].locale.as_deref(), Some("fr"));
        assert_eq!(config.routes[1].priority, -10);
        assert!(config.pages[0].enabled);
        assert_eq!(config.seo.metas["name"]["robots"], "index, follow");
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/page-server.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[listener\nbind_address = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_lists_all() {
        let err = parse_config(
            r#"
            [[pages]]
            id = 1
            site_id = 9
            route_name = "home"
            name = "Home"

            [[routes]]
            name = "home"
            path = "no-slash"
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_sample_config_is_valid() {
        let config = parse_config(include_str!("../../page-server.toml")).unwrap();
        assert_eq!(config.sites.len(), 2);
        assert_eq!(config.pages.len(), 4);
        assert!(config.admin.enabled);
    }
}
