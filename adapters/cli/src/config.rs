use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use gremlins_core::{CampaignSettings, LevelSettings};
use serde::Deserialize;

/// Campaign settings and seed read from a configuration file.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Config {
    /// Lives and levels of the campaign.
    pub(crate) settings: CampaignSettings,
    /// Seed requested by the file, if any.
    pub(crate) seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    lives: u32,
    #[serde(default)]
    seed: Option<u64>,
    levels: Vec<LevelEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LevelEntry {
    layout: PathBuf,
    wizard_cooldown: f64,
    enemy_cooldown: f64,
}

/// Loads the configuration at `path`, reading layouts relative to it.
pub(crate) fn load(path: &Path) -> Result<Config> {
    load_with_reader(path, |layout| {
        fs::read_to_string(layout)
            .with_context(|| format!("failed to read level layout at {}", layout.display()))
    })
}

fn load_with_reader(
    path: &Path,
    mut reader: impl FnMut(&Path) -> Result<String>,
) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration at {}", path.display()))?;
    let base = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    parse_config(&contents, &base, &mut reader)
}

fn parse_config(
    contents: &str,
    base_path: &Path,
    reader: &mut impl FnMut(&Path) -> Result<String>,
) -> Result<Config> {
    let file: ConfigFile =
        toml::from_str(contents).context("failed to parse configuration toml contents")?;
    if file.levels.is_empty() {
        bail!("configuration lists no levels");
    }

    let mut levels = Vec::with_capacity(file.levels.len());
    for entry in file.levels {
        if !entry.wizard_cooldown.is_finite() || entry.wizard_cooldown < 0.0 {
            bail!(
                "invalid wizard cooldown {} for {}",
                entry.wizard_cooldown,
                entry.layout.display()
            );
        }
        if !entry.enemy_cooldown.is_finite() || entry.enemy_cooldown < 0.0 {
            bail!(
                "invalid enemy cooldown {} for {}",
                entry.enemy_cooldown,
                entry.layout.display()
            );
        }
        let layout = reader(&base_path.join(&entry.layout))?;
        levels.push(LevelSettings {
            layout,
            wizard_cooldown: entry.wizard_cooldown,
            enemy_cooldown: entry.enemy_cooldown,
        });
    }

    Ok(Config {
        settings: CampaignSettings {
            lives: file.lives,
            levels,
        },
        seed: file.seed,
    })
}
