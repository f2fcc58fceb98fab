// Kit configuration: starting tempo, tempo range, and per-channel sounds.
// Read once at startup from <kit_dir>/drumkit.json; missing file = defaults.
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::shared::{ChannelId, DEFAULT_BPM, MAX_BPM, MIN_BPM, NUM_CHANNELS};

pub const CONFIG_FILE: &str = "drumkit.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub default: String,      // source selected at startup
    pub choices: Vec<String>, // what the sound selector cycles through
}

impl ChannelConfig {
    fn new(default: &str, others: &[&str]) -> Self {
        let mut choices = vec![default.to_string()];
        choices.extend(others.iter().map(|s| s.to_string()));
        Self {
            default: default.to_string(),
            choices,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitConfig {
    pub bpm: f32,
    pub min_bpm: f32,
    pub max_bpm: f32,
    pub kick: ChannelConfig,
    pub snare: ChannelConfig,
    pub hihat: ChannelConfig,
}

impl Default for KitConfig {
    fn default() -> Self {
        Self {
            bpm: DEFAULT_BPM,
            min_bpm: MIN_BPM,
            max_bpm: MAX_BPM,
            kick: ChannelConfig::new(
                "sounds/kick-classic.wav",
                &["sounds/kick-808.wav", "sounds/kick-heavy.wav"],
            ),
            snare: ChannelConfig::new(
                "sounds/snare-acoustic01.wav",
                &["sounds/snare-acoustic02.wav", "sounds/snare-808.wav"],
            ),
            hihat: ChannelConfig::new(
                "sounds/hihat-acoustic01.wav",
                &["sounds/hihat-acoustic02.wav", "sounds/hihat-808.wav"],
            ),
        }
    }
}

impl KitConfig {
    pub fn channel(&self, channel: ChannelId) -> &ChannelConfig {
        match channel {
            ChannelId::Kick => &self.kick,
            ChannelId::Snare => &self.snare,
            ChannelId::Hihat => &self.hihat,
        }
    }

    fn channel_mut(&mut self, channel: ChannelId) -> &mut ChannelConfig {
        match channel {
            ChannelId::Kick => &mut self.kick,
            ChannelId::Snare => &mut self.snare,
            ChannelId::Hihat => &mut self.hihat,
        }
    }

    pub fn default_sources(&self) -> [String; NUM_CHANNELS] {
        ChannelId::ALL.map(|id| self.channel(id).default.clone())
    }

    // Make a hand-edited file usable: sane tempo range, bpm inside it,
    // and every default present in its own choice list.
    pub fn normalize(mut self) -> Self {
        let fallback = KitConfig::default();
        if !(self.min_bpm.is_finite() && self.min_bpm > 0.0) {
            self.min_bpm = fallback.min_bpm;
        }
        if !(self.max_bpm.is_finite() && self.max_bpm >= self.min_bpm) {
            self.max_bpm = self.min_bpm.max(fallback.max_bpm);
        }
        if !self.bpm.is_finite() {
            self.bpm = fallback.bpm;
        }
        self.bpm = self.bpm.clamp(self.min_bpm, self.max_bpm);

        for id in ChannelId::ALL {
            let ch = self.channel_mut(id);
            if !ch.choices.contains(&ch.default) {
                ch.choices.insert(0, ch.default.clone());
            }
        }
        self
    }
}

pub fn config_file_path(kit_dir: &Path) -> PathBuf {
    kit_dir.join(CONFIG_FILE)
}

pub fn load_config(kit_dir: &Path) -> anyhow::Result<KitConfig> {
    let path = config_file_path(kit_dir);
    if !path.exists() {
        tracing::info!(path = %path.display(), "no kit config, using defaults");
        return Ok(KitConfig::default());
    }
    let data = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: KitConfig = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded kit config");
    Ok(config.normalize())
}

// Write the current config out so it can be edited by hand
pub fn save_config(kit_dir: &Path, config: &KitConfig) -> anyhow::Result<()> {
    let path = config_file_path(kit_dir);
    std::fs::create_dir_all(kit_dir)?;
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

// First run in a kit dir: leave the effective config behind as a template.
// Returns whether a file was written.
pub fn write_template_if_missing(kit_dir: &Path, config: &KitConfig) -> anyhow::Result<bool> {
    let path = config_file_path(kit_dir);
    if path.exists() {
        return Ok(false);
    }
    save_config(kit_dir, config)?;
    tracing::info!(path = %path.display(), "wrote kit config template");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_classic_kit() {
        let config = KitConfig::default();
        assert_eq!(config.bpm, 150.0);
        assert_eq!(
            config.default_sources(),
            [
                "sounds/kick-classic.wav".to_string(),
                "sounds/snare-acoustic01.wav".to_string(),
                "sounds/hihat-acoustic01.wav".to_string(),
            ]
        );
        for id in ChannelId::ALL {
            assert_eq!(config.channel(id).choices[0], config.channel(id).default);
        }
    }

    #[test]
    fn test_normalize_clamps_bpm_and_adds_default_choice() {
        let mut config = KitConfig::default();
        config.bpm = 999.0;
        config.snare = ChannelConfig {
            default: "snare.wav".into(),
            choices: vec!["other.wav".into()],
        };
        let config = config.normalize();
        assert_eq!(config.bpm, MAX_BPM);
        assert_eq!(config.snare.choices, vec!["snare.wav".to_string(), "other.wav".to_string()]);
    }

    #[test]
    fn test_normalize_repairs_inverted_range() {
        let mut config = KitConfig::default();
        config.min_bpm = 100.0;
        config.max_bpm = 50.0;
        config.bpm = 80.0;
        let config = config.normalize();
        assert_eq!(config.min_bpm, 100.0);
        assert_eq!(config.max_bpm, MAX_BPM);
        assert_eq!(config.bpm, 100.0);
    }
}
