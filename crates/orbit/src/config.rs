use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use spindle::{Easing, MenuConfig, PanelConfig, SLOT_COUNT, SetupError, SlotSpec, Vec2};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuSection {
    pub duration: f64,
    pub easing: Easing,
    pub closed_radius: f64,
    pub open_radius: f64,
    pub selected_scale: f64,
    pub normal_scale: f64,
}

impl Default for MenuSection {
    fn default() -> Self {
        Self {
            duration: 0.5,
            easing: Easing::default(),
            closed_radius: 100.0,
            open_radius: 200.0,
            selected_scale: 1.2,
            normal_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PanelSection {
    pub duration: f64,
    pub open_position: [f64; 2],
    pub open_size: [f64; 2],
    pub closed_position: [f64; 2],
    pub closed_size: [f64; 2],
}

impl Default for PanelSection {
    fn default() -> Self {
        Self {
            duration: 0.5,
            open_position: [100.0, 100.0],
            open_size: [200.0, 200.0],
            closed_position: [0.0, 0.0],
            closed_size: [100.0, 100.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SlotConfig {
    pub index: Option<usize>,
    pub label: String,
    pub scale: Option<f64>,
    pub normal_icon: Option<PathBuf>,
    pub selected_icon: Option<PathBuf>,
}

impl SlotConfig {
    fn named(label: &str) -> Self {
        Self {
            index: None,
            label: label.to_string(),
            scale: None,
            normal_icon: None,
            selected_icon: None,
        }
    }

    pub fn spec(&self) -> SlotSpec {
        SlotSpec::new(self.label.clone()).with_base_scale(Vec2::splat(self.scale.unwrap_or(1.0)))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub menu: MenuSection,
    #[serde(default)]
    pub panel: PanelSection,
    #[serde(default = "default_slots")]
    pub slots: Vec<SlotConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            menu: MenuSection::default(),
            panel: PanelSection::default(),
            slots: default_slots(),
        }
    }
}

fn default_slots() -> Vec<SlotConfig> {
    ["Play", "Shop", "Home", "Friends", "Settings"]
        .into_iter()
        .map(SlotConfig::named)
        .collect()
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Invalid {name} duration: {value}")]
    InvalidDuration { name: &'static str, value: f64 },
    #[error(transparent)]
    Setup(#[from] SetupError),
}

fn seconds(name: &'static str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value)
        .ok()
        .filter(|d| !d.is_zero())
        .ok_or(ConfigError::InvalidDuration { name, value })
}

fn vec2([x, y]: [f64; 2]) -> Vec2 {
    Vec2::new(x, y)
}

impl Config {
    pub fn menu_config(&self) -> Result<MenuConfig, ConfigError> {
        let menu = &self.menu;
        let config = MenuConfig {
            duration: seconds("menu", menu.duration)?,
            easing: menu.easing,
            closed_radius: menu.closed_radius,
            open_radius: menu.open_radius,
            selected_scale: menu.selected_scale,
            normal_scale: menu.normal_scale,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn panel_config(&self) -> Result<PanelConfig, ConfigError> {
        let panel = &self.panel;
        Ok(PanelConfig {
            duration: seconds("panel", panel.duration)?,
            open_position: vec2(panel.open_position),
            open_size: vec2(panel.open_size),
            closed_position: vec2(panel.closed_position),
            closed_size: vec2(panel.closed_size),
        })
    }

    /// Places slots by explicit `index`, then fills the remaining positions in file order.
    pub fn placed_slots(&self) -> [Option<&SlotConfig>; SLOT_COUNT] {
        let mut placed: [Option<&SlotConfig>; SLOT_COUNT] = [None; SLOT_COUNT];

        for cfg in self.slots.iter().filter(|c| c.index.is_some()) {
            match cfg.index {
                Some(i) if i < SLOT_COUNT => {
                    if placed[i].replace(cfg).is_some() {
                        log::warn!("Slot {} configured twice, keeping '{}'", i, cfg.label);
                    }
                }
                Some(i) => log::warn!("Ignoring slot '{}': index {} out of range", cfg.label, i),
                None => {}
            }
        }

        for cfg in self.slots.iter().filter(|c| c.index.is_none()) {
            match placed.iter_mut().find(|p| p.is_none()) {
                Some(free) => *free = Some(cfg),
                None => log::warn!("Ignoring slot '{}': menu is full", cfg.label),
            }
        }

        placed
    }
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "orbit", "orbit").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&get_config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("ORBIT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
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

fn touches(event: &Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    if let Err(e) = watch(tx).await {
        log::error!("Config watcher stopped: {}", e);
    }
}

async fn watch(tx: Sender<AppEvent>) -> Result<(), ConfigError> {
    let config_path = get_config_path()?;
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
        return Ok(());
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return Ok(());
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(&config_dir, RecursiveMode::NonRecursive)?;

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                if touches(&event, &config_path) && tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_bundled_default_matches_builtin() {
        assert_eq!(parse(DEFAULT_CONFIG), Config::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse(
            r#"
            [menu]
            easing = "Linear"
            open_radius = 240.0
            "#,
        );

        assert_eq!(config.menu.easing, Easing::Linear);
        assert_eq!(config.menu.open_radius, 240.0);
        assert_eq!(config.menu.closed_radius, 100.0);
        assert_eq!(config.panel, PanelSection::default());
        assert_eq!(config.slots.len(), SLOT_COUNT);

        let menu = config.menu_config().unwrap();
        assert_eq!(menu.duration, Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = parse("[menu]\nduration = -1.0\n");
        assert!(matches!(
            config.menu_config(),
            Err(ConfigError::InvalidDuration { name: "menu", .. })
        ));

        let config = parse("[menu]\nclosed_radius = 0.0\n");
        assert!(matches!(config.menu_config(), Err(ConfigError::Setup(_))));

        let config = parse("[panel]\nduration = -0.5\n");
        assert!(config.panel_config().is_err());

        let config = parse("[menu]\nduration = 0.0\n[panel]\nduration = 0.0\n");
        assert!(matches!(
            config.menu_config(),
            Err(ConfigError::InvalidDuration { name: "menu", .. })
        ));
        assert!(matches!(
            config.panel_config(),
            Err(ConfigError::InvalidDuration { name: "panel", .. })
        ));
    }

    #[test]
    fn test_slot_placement() {
        let config = parse(
            r#"
            [[slots]]
            label = "a"

            [[slots]]
            label = "b"
            index = 0

            [[slots]]
            label = "c"
            index = 9

            [[slots]]
            label = "d"
            scale = 1.5
            "#,
        );

        let placed = config.placed_slots();
        let labels: Vec<Option<&str>> = placed
            .iter()
            .map(|p| p.map(|c| c.label.as_str()))
            .collect();
        assert_eq!(labels, vec![Some("b"), Some("a"), Some("d"), None, None]);
        assert_eq!(placed[2].unwrap().spec().base_scale, Vec2::splat(1.5));
    }
}
