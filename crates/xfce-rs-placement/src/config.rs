use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::Modifiers;

/// Error types for configuration loading
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration format: {reason}")]
    InvalidFormat { reason: String },

    #[error("Invalid region '{name}': {reason}")]
    InvalidRegion { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Edge snapping thresholds, in pixels from the usable-area edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Range for edges shared with another output.
    pub range_inner: i32,
    /// Range for edges at the outside of the layout.
    pub range_outer: i32,
    /// Range along the perpendicular edge that turns a half into a quarter.
    pub corner_range: i32,
    /// Dropping on the top edge maximizes instead of tiling the top half.
    pub top_maximize: bool,
    /// Distance the cursor must travel before a snapped view comes loose. 0 = immediately.
    pub unsnap_threshold: i32,
    /// Overshoot needed to push a floating view past the usable area. 0 = no resistance.
    pub edge_resistance: i32,
    pub overlay: OverlayConfig,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            range_inner: 10,
            range_outer: 20,
            corner_range: 50,
            top_maximize: true,
            unsnap_threshold: 20,
            edge_resistance: 0,
            overlay: OverlayConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub enabled: bool,
    /// Delay before previewing a snap on an edge shared with another output.
    pub delay_inner_ms: u64,
    /// Delay before previewing a snap on an outer edge.
    pub delay_outer_ms: u64,
}

impl OverlayConfig {
    pub fn delay(&self, inner: bool) -> Duration {
        Duration::from_millis(if inner { self.delay_inner_ms } else { self.delay_outer_ms })
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { enabled: true, delay_inner_ms: 250, delay_outer_ms: 500 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    pub min_width: i32,
    pub min_height: i32,
    pub show_indicator: bool,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self { min_width: 100, min_height: 50, show_indicator: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    pub show_osd: bool,
    pub osd_width: i32,
    pub osd_item_height: i32,
    pub osd_padding: i32,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self { show_osd: true, osd_width: 600, osd_item_height: 40, osd_padding: 10 }
    }
}

/// A named region in whole percent of an output's usable area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub name: String,
    /// Restrict the region to one output by name; all outputs when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RegionConfig {
    pub fn new(name: impl Into<String>, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { name: name.into(), output: None, x, y, width, height }
    }

    pub fn applies_to(&self, output_name: &str) -> bool {
        self.output.as_deref().map_or(true, |name| name == output_name)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidRegion { name: self.name.clone(), reason: reason.to_string() };
        if self.name.is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(invalid("width and height must be positive"));
        }
        if self.x.saturating_add(self.width) > 100 || self.y.saturating_add(self.height) > 100 {
            return Err(invalid("region extends past 100%"));
        }
        Ok(())
    }
}

/// Placement settings. Read at session start and on explicit reload only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Modifiers that enable region snapping while moving. Empty means any modifier.
    pub region_modifiers: Modifiers,
    pub snapping: SnapConfig,
    pub resize: ResizeConfig,
    pub cycle: CycleConfig,
    pub regions: Vec<RegionConfig>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            region_modifiers: Modifiers::empty(),
            snapping: SnapConfig::default(),
            resize: ResizeConfig::default(),
            cycle: CycleConfig::default(),
            regions: Vec::new(),
        }
    }
}

impl PlacementConfig {
    /// `$XDG_CONFIG_HOME/xfce-rs/placement.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("xfce-rs")
            .join("placement.toml")
    }

    /// Load configuration from file; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No placement config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        info!("Loaded placement config from {} ({} regions)", path.display(), config.regions.len());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: PlacementConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidFormat { reason: e.to_string() })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.snapping;
        for (name, value) in [
            ("range_inner", s.range_inner),
            ("range_outer", s.range_outer),
            ("corner_range", s.corner_range),
            ("unsnap_threshold", s.unsnap_threshold),
            ("edge_resistance", s.edge_resistance),
        ] {
            if value < 0 {
                return Err(ConfigError::InvalidFormat { reason: format!("snapping.{} must not be negative", name) });
            }
        }
        if self.resize.min_width <= 0 || self.resize.min_height <= 0 {
            return Err(ConfigError::InvalidFormat { reason: "resize minimum size must be positive".to_string() });
        }
        if self.cycle.osd_width <= 0 || self.cycle.osd_item_height <= 0 || self.cycle.osd_padding < 0 {
            return Err(ConfigError::InvalidFormat { reason: "cycle OSD dimensions must be positive".to_string() });
        }
        for (i, region) in self.regions.iter().enumerate() {
            region.validate()?;
            let duplicate = self.regions[..i]
                .iter()
                .any(|other| other.name == region.name && other.output == region.output);
            if duplicate {
                return Err(ConfigError::InvalidRegion {
                    name: region.name.clone(),
                    reason: "declared twice for the same output".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = tempdir().unwrap();
        let config = PlacementConfig::load(temp_dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, PlacementConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("placement.toml");
        std::fs::write(
            &path,
            r#"
region_modifiers = "SUPER"

[snapping]
range_outer = 30
top_maximize = false

[snapping.overlay]
delay_outer_ms = 0

[[regions]]
name = "left"
x = 0
y = 0
width = 50
height = 100

[[regions]]
name = "right"
output = "HDMI-1"
x = 50
y = 0
width = 50
height = 100
"#,
        )
        .unwrap();

        let config = PlacementConfig::load(&path).unwrap();
        assert_eq!(config.snapping.range_outer, 30);
        assert_eq!(config.snapping.range_inner, 10);
        assert!(!config.snapping.top_maximize);
        assert_eq!(config.snapping.overlay.delay(false), Duration::ZERO);
        assert_eq!(config.region_modifiers, Modifiers::SUPER);
        assert_eq!(config.regions.len(), 2);
        assert!(config.regions[0].applies_to("DP-1"));
        assert!(!config.regions[1].applies_to("DP-1"));
    }

    #[test]
    fn test_region_past_edge_rejected() {
        let err = PlacementConfig::from_toml(
            r#"
[[regions]]
name = "wide"
x = 60
y = 0
width = 50
height = 100
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRegion { ref name, .. } if name == "wide"));
    }

    #[test]
    fn test_negative_range_rejected() {
        let err = PlacementConfig::from_toml("[snapping]\ncorner_range = -1\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat { .. }));
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let mut config = PlacementConfig::default();
        config.regions.push(RegionConfig::new("top", 0, 0, 100, 50));
        let text = config.to_toml().unwrap();
        assert_eq!(PlacementConfig::from_toml(&text).unwrap(), config);
    }
}
