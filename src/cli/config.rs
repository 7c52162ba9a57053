use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::args::{OutputArgs, OutputFormat, ServeArgs, DEFAULT_ADDR};

/// Top-level representation of `.alemassas/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub store: Option<StoreSection>,

    #[serde(default)]
    pub serve: Option<ServeSection>,

    #[serde(default)]
    pub http: Option<HttpSection>,

    #[serde(default)]
    pub output: Option<OutputSection>,

    /// Directory containing `.alemassas/`; relative paths in the
    /// config resolve against it.
    #[serde(skip)]
    pub project_root: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
pub struct StoreSection {
    #[serde(default)]
    pub data: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServeSection {
    #[serde(default)]
    pub addr: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HttpSection {
    #[serde(default)]
    pub server_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

impl CliConfig {
    /// Configured data file, resolved against the project root.
    pub fn data_path(&self) -> Option<PathBuf> {
        let data = self.store.as_ref()?.data.as_ref()?;
        if data.is_absolute() {
            Some(data.clone())
        } else {
            Some(self.project_root.join(data))
        }
    }
}

/// Discover and load a project-local `.alemassas/config.toml` starting
/// from the current working directory and walking up parent
/// directories.
pub fn load_cli_config() -> Result<Option<CliConfig>> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let Some(path) = find_project_config(&cwd) else {
        return Ok(None);
    };

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let mut config: CliConfig = toml::from_str(&contents)
        .with_context(|| format!("failed to parse TOML config at {}", path.display()))?;

    config.project_root = path
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_default();

    tracing::debug!("loaded config from {}", path.display());
    Ok(Some(config))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(".alemassas").join("config.toml"))
        .find(|candidate| candidate.is_file())
}

/// Data file to load: the `--data` flag wins over `[store] data`.
pub fn effective_data_path(flag: Option<PathBuf>, config: Option<&CliConfig>) -> Option<PathBuf> {
    flag.or_else(|| config.and_then(CliConfig::data_path))
}

pub fn apply_output_config_defaults(config: &CliConfig, args: &mut OutputArgs) {
    if matches!(args.format, OutputFormat::Text) {
        if let Some(format) = config.output.as_ref().and_then(|o| o.format) {
            args.format = format;
        }
    }

    if args.server.is_none() {
        if let Some(url) = config.http.as_ref().and_then(|h| h.server_url.as_ref()) {
            args.server = Some(url.clone());
        }
    }
}

pub fn apply_serve_config_defaults(config: &CliConfig, args: &mut ServeArgs) {
    if args.addr == DEFAULT_ADDR {
        if let Some(addr) = config.serve.as_ref().and_then(|s| s.addr.as_ref()) {
            args.addr = addr.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parse(toml_text: &str) -> CliConfig {
        toml::from_str(toml_text).expect("valid config")
    }

    #[test]
    fn output_defaults_fill_unset_flags_only() {
        let config = parse(
            r#"
[output]
format = "json"

[http]
server_url = "http://127.0.0.1:9000"
"#,
        );

        let mut args = OutputArgs {
            format: OutputFormat::Text,
            server: None,
            no_server: false,
        };
        apply_output_config_defaults(&config, &mut args);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.server.as_deref(), Some("http://127.0.0.1:9000"));

        let mut explicit = OutputArgs {
            format: OutputFormat::Json,
            server: Some("http://other:1".to_string()),
            no_server: false,
        };
        apply_output_config_defaults(&config, &mut explicit);
        assert_eq!(explicit.server.as_deref(), Some("http://other:1"));
    }

    #[test]
    fn serve_addr_comes_from_config_when_flag_is_default() {
        let config = parse("[serve]\naddr = \"0.0.0.0:8080\"\n");

        let mut args = ServeArgs {
            addr: DEFAULT_ADDR.to_string(),
        };
        apply_serve_config_defaults(&config, &mut args);
        assert_eq!(args.addr, "0.0.0.0:8080");

        let mut explicit = ServeArgs {
            addr: "127.0.0.1:4000".to_string(),
        };
        apply_serve_config_defaults(&config, &mut explicit);
        assert_eq!(explicit.addr, "127.0.0.1:4000");
    }

    #[test]
    fn data_path_resolves_against_project_root() {
        let mut config = parse("[store]\ndata = \"data/site.json\"\n");
        config.project_root = PathBuf::from("/srv/site");

        assert_eq!(
            config.data_path(),
            Some(PathBuf::from("/srv/site/data/site.json"))
        );
        assert_eq!(
            effective_data_path(Some(PathBuf::from("other.json")), Some(&config)),
            Some(PathBuf::from("other.json"))
        );
        assert_eq!(
            effective_data_path(None, Some(&config)),
            Some(PathBuf::from("/srv/site/data/site.json"))
        );
        assert_eq!(effective_data_path(None, None), None);
    }

    #[test]
    fn finds_config_in_parent_directories() {
        let tmp = tempdir().expect("tempdir");
        let config_dir = tmp.path().join(".alemassas");
        fs::create_dir_all(&config_dir).expect("config dir");
        fs::write(config_dir.join("config.toml"), "").expect("config file");

        let nested = tmp.path().join("a").join("b");
        fs::create_dir_all(&nested).expect("nested dir");

        let found = find_project_config(&nested).expect("config found");
        assert_eq!(found, config_dir.join("config.toml"));
    }
}
