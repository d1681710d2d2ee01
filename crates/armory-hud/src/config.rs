use armory::{Loadout, SelectorPolicy, WeaponName, WeaponSpec};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

/// Weapon category, one per selector slot in host order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[strum(serialize = "Melee", serialize = "m", serialize = "0")]
    Melee,
    #[strum(serialize = "Sidearm", serialize = "pistol", serialize = "1")]
    Sidearm,
    #[strum(serialize = "Shotgun", serialize = "sg", serialize = "2")]
    Shotgun,
    #[strum(serialize = "Rifle", serialize = "r", serialize = "3")]
    Rifle,
    #[strum(serialize = "Explosive", serialize = "x", serialize = "4")]
    Explosive,
    #[strum(serialize = "Special", serialize = "sp", serialize = "5")]
    Special,
}

impl Category {
    /// Zero-based slot the host reports for weapons of this category.
    pub fn host_slot(&self) -> i32 {
        *self as i32
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeaponConfig {
    pub name: WeaponName,
    pub category: Category,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub ammo: Option<u32>,
}

impl WeaponConfig {
    pub fn to_spec(&self) -> WeaponSpec {
        WeaponSpec {
            name: self.name.clone(),
            host_slot: self.category.host_slot(),
            slot_position: self.position,
            ammo: self.ammo,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub selector: SelectorPolicy,
    #[serde(default)]
    pub weapons: Vec<WeaponConfig>,
}

impl Config {
    pub fn loadout(&self) -> Loadout {
        Loadout::from_specs(self.weapons.iter().map(WeaponConfig::to_spec))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "armory", "armory-hud").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("ARMORY")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(environment())
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn default_config() -> Config {
    parse_config(DEFAULT_CONFIG).unwrap_or_else(|e| {
        log::error!("Built-in config is invalid: {}", e);
        Config::default()
    })
}

/// Reads the user's config file, or the built-in loadout when there is
/// none or it fails to load.
pub fn load_or_default() -> Config {
    match get_config_path() {
        Ok(path) if path.exists() => match load_config() {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to load {}: {}", path.display(), e);
                default_config()
            }
        },
        _ => {
            log::info!("No config file, using built-in loadout");
            default_config()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::HudEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<HudEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let touches_config = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| p == &config_path);

                if touches_config && tx.send(HudEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
