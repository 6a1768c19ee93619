//! Configuration for the two sides of the pipeline.
//!
//! Resolution order: environment variable → config file → built-in
//! defaults. None of this touches the safety-critical control loop itself
//! — it only decides where keys and policy images live on disk and how
//! fast the loop runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Firmware-side configuration.
///
/// Config file location:
///   1. `$BOREAL_BRAINSTEM_CONFIG` (explicit override)
///   2. `$XDG_CONFIG_HOME/boreal/brainstem.toml`
///   3. `~/.config/boreal/brainstem.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrainstemConfig {
    pub keys: KeyConfig,
    pub policy: PolicyConfig,
    pub link: LinkConfig,
    pub control: ControlConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Path to the 48-byte provisioned key blob (§Key material).
    pub key_material_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Path to the compiled bytecode image.
    pub bytecode_path: PathBuf,
    /// Path to the companion manifest recording the bytecode's SHA-256.
    pub manifest_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Device path for the serial/SPI transport. Empty = collaborator
    /// decides (e.g. an in-process channel in tests and demos).
    pub device: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Control tick rate in Hz (§4.7).
    pub control_hz: u32,
    /// Watchdog cycle bound before forcing safe state (§4.8).
    pub max_cycles: u32,
    /// PID gains (§4.7).
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
    /// Integral clamp magnitude (§4.7).
    pub max_integral: f32,
    /// PWM output clamp magnitude (§4.7).
    pub max_pwm: f32,
    /// VM anti-runaway step cap (§4.5).
    pub vm_step_limit: u32,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            key_material_path: PathBuf::from("/etc/boreal/keys.bin"),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            bytecode_path: PathBuf::from("/etc/boreal/policy.bc"),
            manifest_path: PathBuf::from("/etc/boreal/policy.manifest.toml"),
        }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            device: String::new(),
        }
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            control_hz: 50,
            max_cycles: 20_000,
            kp: 1.0,
            ki: 0.1,
            kd: 0.05,
            max_integral: 100.0,
            max_pwm: 1000.0,
            vm_step_limit: 32,
        }
    }
}

impl Default for BrainstemConfig {
    fn default() -> Self {
        Self {
            keys: KeyConfig::default(),
            policy: PolicyConfig::default(),
            link: LinkConfig::default(),
            control: ControlConfig::default(),
        }
    }
}

impl BrainstemConfig {
    /// Load following the documented resolution order, falling back to
    /// defaults if no file is found anywhere.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os("BOREAL_BRAINSTEM_CONFIG") {
            return Self::from_file(&PathBuf::from(path));
        }
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            let candidate = PathBuf::from(xdg).join("boreal/brainstem.toml");
            if candidate.exists() {
                return Self::from_file(&candidate);
            }
        }
        if let Some(home) = dirs_home() {
            let candidate = home.join(".config/boreal/brainstem.toml");
            if candidate.exists() {
                return Self::from_file(&candidate);
            }
        }
        Ok(Self::default())
    }

    fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Host-side configuration: what to send with, and how fast.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub keys: KeyConfig,
    pub link: LinkConfig,
    /// Sender identifier placed in every frame header.
    pub model_id: u16,
    /// Send rate in Hz. 50 Hz matches the reference AI-agent loop.
    pub send_hz: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            keys: KeyConfig::default(),
            link: LinkConfig::default(),
            model_id: 1,
            send_hz: 50,
        }
    }
}

impl HostConfig {
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os("BOREAL_HOST_CONFIG") {
            return Self::from_file(&PathBuf::from(path));
        }
        Ok(Self::default())
    }

    fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}
