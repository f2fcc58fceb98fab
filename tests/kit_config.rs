use drumkit::config::{self, ChannelConfig, KitConfig};
use drumkit::{ChannelId, load_config};
use tempfile::tempdir;

#[test]
fn test_missing_config_gives_defaults() {
    let dir = tempdir().unwrap();
    let config = load_config(dir.path()).unwrap();
    assert_eq!(config, KitConfig::default());
}

#[test]
fn test_partial_config_fills_in_defaults() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join(config::CONFIG_FILE),
        r#"{ "bpm": 96, "kick": { "default": "my/kick.wav", "choices": [] } }"#,
    )
    .unwrap();

    let config = load_config(dir.path()).unwrap();
    assert_eq!(config.bpm, 96.0);
    assert_eq!(config.kick.choices, vec!["my/kick.wav".to_string()]);
    assert_eq!(config.snare, KitConfig::default().snare);
}

#[test]
fn test_malformed_config_is_an_error() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join(config::CONFIG_FILE), "{ not json").unwrap();
    let err = load_config(dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains("failed to parse"));
}

#[test]
fn test_save_then_load() {
    let dir = tempdir().unwrap();
    let mut config = KitConfig::default();
    config.bpm = 132.0;
    config.hihat = ChannelConfig {
        default: "hats/closed.wav".into(),
        choices: vec!["hats/closed.wav".into(), "hats/open.wav".into()],
    };
    config::save_config(dir.path(), &config).unwrap();

    let loaded = load_config(dir.path()).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.channel(ChannelId::Hihat).choices.len(), 2);
}

#[test]
fn test_template_written_once() {
    let dir = tempdir().unwrap();
    let config = load_config(dir.path()).unwrap();
    assert!(config::write_template_if_missing(dir.path(), &config).unwrap());
    assert!(dir.path().join(config::CONFIG_FILE).exists());
    assert_eq!(load_config(dir.path()).unwrap(), KitConfig::default());

    // a hand-edited file is never overwritten
    let mut edited = KitConfig::default();
    edited.bpm = 90.0;
    config::save_config(dir.path(), &edited).unwrap();
    assert!(!config::write_template_if_missing(dir.path(), &KitConfig::default()).unwrap());
    assert_eq!(load_config(dir.path()).unwrap().bpm, 90.0);
}
