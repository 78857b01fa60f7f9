//! Etching configuration
//!
//! Every pass over a drawing takes its settings from an [`EtchConfiguration`]
//! value. Nothing here is global, so documents processed side by side never
//! see each other's layers or tolerances.

use crate::error::{EtchError, Result};
use crate::types::Color;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Name and color of a layer the etcher moves entities onto
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerStyle {
    pub name: String,
    pub color: Color,
}

impl LayerStyle {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        LayerStyle {
            name: name.into(),
            color,
        }
    }

    /// Case-insensitive name comparison, as DXF table lookups are
    pub fn matches(&self, layer: &str) -> bool {
        self.name.eq_ignore_ascii_case(layer)
    }
}

/// Settings for bend extraction and etch generation
#[derive(Debug, Clone, PartialEq)]
pub struct EtchConfiguration {
    /// Length of each etch mark on a vertical bend line; bend lines shorter
    /// than three times this are etched over their full length
    pub etch_length: f64,
    /// Largest radius still treated as a bend; bigger radii are rolling
    /// centerlines
    pub max_bend_radius: f64,
    /// Radius substituted for the SHARP keyword in bend notes
    pub sharp_bend_radius: f64,
    /// Notes further from a line than this many text heights are ignored
    pub annotation_match_factor: f64,
    /// Line type marking bend lines
    pub center_line_type: String,
    /// Layer bend lines and their notes are moved to
    pub bend_layer: LayerStyle,
    /// Layer etch lines are created on
    pub etch_layer: LayerStyle,
    /// Layers holding etch geometry from earlier runs
    pub etch_like_layers: Vec<String>,
}

impl Default for EtchConfiguration {
    fn default() -> Self {
        Self {
            etch_length: 1.0,
            max_bend_radius: 4.0,
            sharp_bend_radius: 0.001,
            annotation_match_factor: 2.0,
            center_line_type: "CENTERX2".to_string(),
            bend_layer: LayerStyle::new("BEND", Color::YELLOW),
            etch_layer: LayerStyle::new("ETCH", Color::GREEN),
            etch_like_layers: vec![
                "ETCH".to_string(),
                "SCRIBE".to_string(),
                "SCRIBE-TEXT".to_string(),
            ],
        }
    }
}

/// On-disk settings; numeric values may be JSON numbers or numeric strings
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SettingsFile {
    etch_length: Option<Value>,
    max_bend_radius: Option<Value>,
    sharp_bend_radius: Option<Value>,
    annotation_match_factor: Option<Value>,
    center_line_type: Option<String>,
    bend_layer: Option<String>,
    etch_layer: Option<String>,
    #[serde(flatten)]
    unknown: serde_json::Map<String, Value>,
}

fn setting_number(name: &str, value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| EtchError::invalid_setting(name, value))
}

impl EtchConfiguration {
    /// Set the etch mark length
    pub fn with_etch_length(mut self, etch_length: f64) -> Self {
        self.etch_length = etch_length;
        self
    }

    /// Set the maximum bend radius
    pub fn with_max_bend_radius(mut self, max_bend_radius: f64) -> Self {
        self.max_bend_radius = max_bend_radius;
        self
    }

    /// Set the radius used for SHARP bends
    pub fn with_sharp_bend_radius(mut self, sharp_bend_radius: f64) -> Self {
        self.sharp_bend_radius = sharp_bend_radius;
        self
    }

    /// Load settings from a JSON file on top of the defaults
    pub fn from_settings_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_settings_str(&text)
    }

    /// Load settings from JSON text on top of the defaults
    pub fn from_settings_str(text: &str) -> Result<Self> {
        let settings: SettingsFile = serde_json::from_str(text)?;
        let mut config = Self::default();
        config.apply(settings)?;
        config.validate()?;
        Ok(config)
    }

    fn apply(&mut self, settings: SettingsFile) -> Result<()> {
        if let Some(v) = &settings.etch_length {
            self.etch_length = setting_number("EtchLength", v)?;
        }
        if let Some(v) = &settings.max_bend_radius {
            self.max_bend_radius = setting_number("MaxBendRadius", v)?;
        }
        if let Some(v) = &settings.sharp_bend_radius {
            self.sharp_bend_radius = setting_number("SharpBendRadius", v)?;
        }
        if let Some(v) = &settings.annotation_match_factor {
            self.annotation_match_factor = setting_number("AnnotationMatchFactor", v)?;
        }
        if let Some(name) = settings.center_line_type {
            self.center_line_type = name;
        }
        if let Some(name) = settings.bend_layer {
            self.bend_layer.name = name;
        }
        if let Some(name) = settings.etch_layer {
            self.etch_layer.name = name;
        }
        for key in settings.unknown.keys() {
            log::warn!("ignoring unknown setting '{}'", key);
        }
        Ok(())
    }

    /// Reject values the extractor and generator cannot work with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("EtchLength", self.etch_length),
            ("AnnotationMatchFactor", self.annotation_match_factor),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(EtchError::invalid_setting(name, value));
            }
        }

        let non_negative = [
            ("MaxBendRadius", self.max_bend_radius),
            ("SharpBendRadius", self.sharp_bend_radius),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(EtchError::invalid_setting(name, value));
            }
        }

        if self.bend_layer.name.trim().is_empty() {
            return Err(EtchError::invalid_setting("BendLayer", "empty layer name"));
        }
        if self.etch_layer.name.trim().is_empty() {
            return Err(EtchError::invalid_setting("EtchLayer", "empty layer name"));
        }
        Ok(())
    }

    /// Whether `layer` holds etch geometry (the etch layer or one of the
    /// legacy scribe layers)
    pub fn is_etch_like_layer(&self, layer: &str) -> bool {
        self.etch_layer.matches(layer)
            || self
                .etch_like_layers
                .iter()
                .any(|name| name.eq_ignore_ascii_case(layer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EtchConfiguration::default();
        assert_eq!(config.etch_length, 1.0);
        assert_eq!(config.max_bend_radius, 4.0);
        assert_eq!(config.annotation_match_factor, 2.0);
        assert_eq!(config.bend_layer, LayerStyle::new("BEND", Color::YELLOW));
        assert_eq!(config.etch_layer, LayerStyle::new("ETCH", Color::GREEN));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_settings_numbers_and_strings() {
        let config = EtchConfiguration::from_settings_str(
            r#"{ "EtchLength": "0.5", "MaxBendRadius": 2, "EtchLayer": "SCRIBE" }"#,
        )
        .unwrap();
        assert_eq!(config.etch_length, 0.5);
        assert_eq!(config.max_bend_radius, 2.0);
        assert_eq!(config.etch_layer.name, "SCRIBE");
        assert_eq!(config.sharp_bend_radius, 0.001);
    }

    #[test]
    fn test_unparseable_setting_is_named() {
        let err = EtchConfiguration::from_settings_str(r#"{ "MaxBendRadius": "four" }"#)
            .unwrap_err();
        match err {
            EtchError::InvalidSetting { name, .. } => assert_eq!(name, "MaxBendRadius"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_setting_is_named() {
        let err = EtchConfiguration::from_settings_str(r#"{ "EtchLength": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("EtchLength"));

        let err = EtchConfiguration::default()
            .with_sharp_bend_radius(-0.1)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("SharpBendRadius"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = EtchConfiguration::from_settings_str(r#"{ "Colour": "green" }"#).unwrap();
        assert_eq!(config, EtchConfiguration::default());
    }

    #[test]
    fn test_malformed_json() {
        let err = EtchConfiguration::from_settings_str("{ EtchLength").unwrap_err();
        assert!(matches!(err, EtchError::Json(_)));
    }

    #[test]
    fn test_etch_like_layers() {
        let config = EtchConfiguration::default();
        assert!(config.is_etch_like_layer("etch"));
        assert!(config.is_etch_like_layer("SCRIBE-TEXT"));
        assert!(!config.is_etch_like_layer("BEND"));
    }
}
