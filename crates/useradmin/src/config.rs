use crate::cli::Backend;
use anyhow::{anyhow, Result};
use directories::{BaseDirs, ProjectDirs};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use useradmin_core::Translations;

const CONFIG_FILE: &str = "config.toml";
const LOCAL_CONFIG_FILE: &str = "useradmin.toml";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Server URL
    pub url: Option<String>,
    /// API token
    pub token: Option<String>,
    /// Store backend (defaults to traccar)
    pub backend: Option<Backend>,
    /// Fixture directory for the mock backend
    pub mock_dir: Option<PathBuf>,
    /// Overrides for displayed strings, keyed like the web client's translations
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl Config {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(anyhow!("Config file not found: {}", path.display()));
            }
        }

        for path in config_paths(config_path) {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed("USERADMIN_"));

        figment
            .extract()
            .map_err(|e| anyhow!("Failed to load config: {}", e))
    }

    pub fn merge_with_cli(
        &mut self,
        cli_url: Option<String>,
        cli_token: Option<String>,
        cli_backend: Option<Backend>,
    ) {
        if let Some(url) = cli_url {
            self.url = Some(url);
        }
        if let Some(token) = cli_token {
            self.token = Some(token);
        }
        if let Some(backend) = cli_backend {
            self.backend = Some(backend);
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend.unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        match self.backend() {
            Backend::Traccar => {
                if self.url.is_none() {
                    return Err(anyhow!(
                        "Server URL not configured. Set via --url, USERADMIN_URL env var, or config file"
                    ));
                }
                if self.token.is_none() {
                    return Err(anyhow!(
                        "API token not configured. Set via --token, USERADMIN_TOKEN env var, or config file"
                    ));
                }
            }
            Backend::Mock => {
                if self.mock_dir.is_none() {
                    return Err(anyhow!(
                        "Mock directory not configured. Set via USERADMIN_MOCK_DIR env var or `mock_dir` in config file"
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn translations(&self) -> Translations {
        Translations::with_overrides(self.labels.clone())
    }

    /// Copy safe to print: the token keeps only its last four characters
    pub fn masked(&self) -> Self {
        let mut shown = self.clone();
        shown.token = self.token.as_deref().map(mask_token);
        shown
    }
}

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

/// Files merged in order; later ones win
pub fn config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
        return paths;
    }

    if let Some(path) = get_project_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_xdg_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_local_config_path() {
        push_unique(&mut paths, path);
    }

    paths
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

fn get_project_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "useradmin").map(|d| d.config_dir().join(CONFIG_FILE))
}

fn get_xdg_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join("useradmin").join(CONFIG_FILE));
    }

    BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".config")
            .join("useradmin")
            .join(CONFIG_FILE)
    })
}

fn get_local_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|dir| dir.join(LOCAL_CONFIG_FILE))
}
