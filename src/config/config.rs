use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const BLASTN_ENV_VAR: &str = "GENOME_REORDER_BLASTN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_blastn_path")]
    pub blastn_path: String,
    #[serde(default = "default_single_hit")]
    pub max_target_seqs: u32,
    #[serde(default = "default_single_hit")]
    pub max_hsps: u32,
    /// Appended verbatim after the standard blastn arguments.
    #[serde(default)]
    pub extra_blastn_args: Vec<String>,
}

fn default_blastn_path() -> String {
    "blastn".to_string()
}

fn default_single_hit() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blastn_path: default_blastn_path(),
            max_target_seqs: default_single_hit(),
            max_hsps: default_single_hit(),
            extra_blastn_args: Vec::new(),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "genome-reorder", "genome-reorder")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

impl Config {
    /// Loads the user config, falling back to defaults when it is missing or
    /// unreadable, then applies the `GENOME_REORDER_BLASTN` override.
    pub fn load() -> Self {
        let mut config = config_path()
            .filter(|path| path.exists())
            .and_then(|path| Self::load_from(&path).ok())
            .unwrap_or_default();

        if let Ok(program) = std::env::var(BLASTN_ENV_VAR) {
            if !program.is_empty() {
                config.blastn_path = program;
            }
        }
        config
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }
}
