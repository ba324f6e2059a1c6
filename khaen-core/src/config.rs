use std::path::{Path, PathBuf};

use serde::Deserialize;

use khaen_types::{Extent, Key, Mode, PitchClass};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: DefaultsConfig,
    #[serde(default)]
    midi: MidiConfig,
}

#[derive(Deserialize, Default)]
struct DefaultsConfig {
    key: Option<String>,
    mode: Option<String>,
    extent: Option<String>,
}

#[derive(Deserialize, Default)]
struct MidiConfig {
    client_name: Option<String>,
    auto_connect: Option<bool>,
    port: Option<String>,
}

pub struct Config {
    defaults: DefaultsConfig,
    midi: MidiConfig,
}

impl Config {
    /// Embedded defaults merged with the user's config file, if any.
    pub fn load() -> Self {
        Self::load_with_override(user_config_path().as_deref())
    }

    pub fn load_with_override(path: Option<&Path>) -> Self {
        let mut base: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");

        if let Some(path) = path {
            if path.exists() {
                match std::fs::read_to_string(path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => {
                            merge_defaults(&mut base.defaults, user.defaults);
                            merge_midi(&mut base.midi, user.midi);
                        }
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Config {
            defaults: base.defaults,
            midi: base.midi,
        }
    }

    /// Starting key; unparseable values fall back to C major.
    pub fn key(&self) -> Key {
        let fallback = Key::default();
        Key::new(
            self.defaults
                .key
                .as_deref()
                .and_then(PitchClass::parse)
                .unwrap_or(fallback.root),
            self.defaults
                .mode
                .as_deref()
                .and_then(parse_mode)
                .unwrap_or(fallback.mode),
        )
    }

    pub fn extent(&self) -> Extent {
        self.defaults
            .extent
            .as_deref()
            .and_then(parse_extent)
            .unwrap_or_default()
    }

    pub fn midi_client_name(&self) -> &str {
        self.midi.client_name.as_deref().unwrap_or("khaen")
    }

    pub fn midi_auto_connect(&self) -> bool {
        self.midi.auto_connect.unwrap_or(true)
    }

    /// Preferred input port name fragment
    pub fn midi_port(&self) -> Option<&str> {
        self.midi.port.as_deref()
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("khaen").join("config.toml"))
}

fn merge_defaults(base: &mut DefaultsConfig, user: DefaultsConfig) {
    if user.key.is_some() {
        base.key = user.key;
    }
    if user.mode.is_some() {
        base.mode = user.mode;
    }
    if user.extent.is_some() {
        base.extent = user.extent;
    }
}

fn merge_midi(base: &mut MidiConfig, user: MidiConfig) {
    if user.client_name.is_some() {
        base.client_name = user.client_name;
    }
    if user.auto_connect.is_some() {
        base.auto_connect = user.auto_connect;
    }
    if user.port.is_some() {
        base.port = user.port;
    }
}

fn parse_mode(s: &str) -> Option<Mode> {
    match s.to_lowercase().as_str() {
        "major" | "maj" => Some(Mode::Major),
        "minor" | "min" | "aeolian" => Some(Mode::Minor),
        _ => None,
    }
}

fn parse_extent(s: &str) -> Option<Extent> {
    match s.to_lowercase().as_str() {
        "triad" => Some(Extent::Triad),
        "seventh" | "7th" | "7" => Some(Extent::Seventh),
        _ => None,
    }
}
