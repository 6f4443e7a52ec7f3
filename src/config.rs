/// External configuration loader.
///
/// Reads `server.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.
/// The two positional CLI arguments (map path, seed) are not part of this
/// struct — they are parsed separately in `main` and fail the process
/// immediately on error with the documented process exit code.

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub gold_total: i32,
    pub gold_min_piles: i32,
    pub gold_max_piles: i32,
    pub visibility_radius: i32,
    pub max_players: usize,
    pub max_name_length: usize,
}

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    gold: TomlGold,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlGold {
    #[serde(default = "default_gold_total")]
    total: i32,
    #[serde(default = "default_min_piles")]
    min_piles: i32,
    #[serde(default = "default_max_piles")]
    max_piles: i32,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_radius")]
    visibility_radius: i32,
    #[serde(default = "default_max_players")]
    max_players: usize,
    #[serde(default = "default_max_name_length")]
    max_name_length: usize,
}

fn default_gold_total() -> i32 { 250 }
fn default_min_piles() -> i32 { 10 }
fn default_max_piles() -> i32 { 30 }
fn default_radius() -> i32 { 5 }
fn default_max_players() -> usize { 26 }
fn default_max_name_length() -> usize { 50 }

impl Default for TomlGold {
    fn default() -> Self {
        TomlGold {
            total: default_gold_total(),
            min_piles: default_min_piles(),
            max_piles: default_max_piles(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            visibility_radius: default_radius(),
            max_players: default_max_players(),
            max_name_length: default_max_name_length(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            gold_total: default_gold_total(),
            gold_min_piles: default_min_piles(),
            gold_max_piles: default_max_piles(),
            visibility_radius: default_radius(),
            max_players: default_max_players(),
            max_name_length: default_max_name_length(),
        }
    }
}

impl ServerConfig {
    /// Load config from `server.toml`, searching the executable's directory
    /// then the current working directory. Missing file or missing keys fall
    /// back to defaults; a present-but-unparseable file logs a warning and
    /// falls back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);

        ServerConfig {
            gold_total: toml_cfg.gold.total,
            gold_min_piles: toml_cfg.gold.min_piles,
            gold_max_piles: toml_cfg.gold.max_piles,
            visibility_radius: toml_cfg.general.visibility_radius,
            max_players: toml_cfg.general.max_players,
            max_name_length: toml_cfg.general.max_name_length,
        }
    }
}

fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("server.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        log::warn!("server.toml parse error: {e}, using default settings");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    log::warn!("could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}
