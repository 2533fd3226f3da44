use std::{fs::File, io::BufReader, path::Path};

use image::Rgb;
use log::{debug, warn, LevelFilter};

use crate::{color, error::Result};

/// How a light's brightness falls off with distance.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Falloff {
    /// `n·l / d * d`: the distance cancels out and lights never dim.
    Literal,
    /// `n·l / d²`.
    InverseSquare,
}

impl Default for Falloff {
    fn default() -> Self {
        Falloff::Literal
    }
}

#[derive(Copy, Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShadingOptions {
    /// When off, hits report their material's base colour.
    pub enabled: bool,
    pub falloff: Falloff,
    /// Distance the shadow ray origin is pushed towards the light.
    pub shadow_bias: f64,
}

impl Default for ShadingOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            falloff: Falloff::default(),
            shadow_bias: 1e-4,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    #[serde(deserialize_with = "color::deserialize_rgb")]
    pub background: Rgb<u8>,
    /// Worker threads for [`crate::Tracer::render`]; rayon's global pool
    /// when unset.
    pub threads: Option<usize>,
    pub log_level: String,
    pub shading: ShadingOptions,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Rgb([30, 30, 30]),
            threads: None,
            log_level: "info".to_string(),
            shading: ShadingOptions::default(),
        }
    }
}

impl RenderConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let config: RenderConfig = serde_json::from_reader(BufReader::new(file))?;
        debug!("loaded config from {}: {:?}", path.as_ref().display(), config);

        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn level_filter(&self) -> LevelFilter {
        match self.log_level.parse() {
            Ok(level) => level,
            Err(..) => {
                warn!("unknown log level '{}', using info", self.log_level);
                LevelFilter::Info
            }
        }
    }
}

#[test]
fn empty_config_uses_defaults() {
    let config = RenderConfig::from_json("{}").unwrap();
    assert_eq!(Rgb([30, 30, 30]), config.background);
    assert_eq!(None, config.threads);
    assert_eq!(ShadingOptions::default(), config.shading);
    assert_eq!(LevelFilter::Info, config.level_filter());
}

#[test]
fn config_overrides_fields() {
    let config = RenderConfig::from_json(
        r#"{
            "background": [0, 0, 64],
            "threads": 2,
            "log_level": "debug",
            "shading": {"falloff": "inverse_square", "shadow_bias": 0.01}
        }"#,
    )
    .unwrap();

    assert_eq!(Rgb([0, 0, 64]), config.background);
    assert_eq!(Some(2), config.threads);
    assert_eq!(LevelFilter::Debug, config.level_filter());
    assert_eq!(Falloff::InverseSquare, config.shading.falloff);
    assert_eq!(0.01, config.shading.shadow_bias);
    assert!(config.shading.enabled);
}

#[test]
fn unknown_level_falls_back_to_info() {
    let config = RenderConfig::from_json(r#"{"log_level": "loud"}"#).unwrap();
    assert_eq!(LevelFilter::Info, config.level_filter());
}

#[test]
fn malformed_config_is_an_error() {
    assert!(RenderConfig::from_json(r#"{"background": [1, 2]}"#).is_err());
    assert!(RenderConfig::load("/nonexistent/lumen.json").is_err());
}

#[test]
fn config_loads_from_file() {
    let path = std::env::temp_dir().join(format!("lumen-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"threads": 3}"#).unwrap();

    let config = RenderConfig::load(&path).unwrap();
    assert_eq!(Some(3), config.threads);

    std::fs::remove_file(&path).unwrap();
}
