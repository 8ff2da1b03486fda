//!
//! Settings for persistence, export and the on-screen view
//!

///
/// Settings used when exporting the paths to an image
///
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Width and height of the exported image in pixels
    pub image_size: u32,

    /// How many authoring units span the width of the exported image (the origin is at the centre)
    pub units_across: f32,

    /// Name given to the exported file
    pub file_name: String
}

///
/// Settings that describe how the paths are fitted into the editor's view
///
/// Paths are drawn into a square frame of `frame_size` internal units, which is itself fitted into a
/// window with the proportions of the reference size. Authoring coordinates are multiplied by
/// `authoring_scale` to get frame units.
///
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub reference_width:    f32,
    pub reference_height:   f32,
    pub frame_size:         f32,
    pub frame_margin:       f32,
    pub authoring_scale:    f32
}

///
/// Configuration for the path editor
///
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Key the paths are stored under in the key-value store
    pub storage_key: String,

    pub export: ExportSettings,
    pub viewport: ViewportSettings
}

impl Default for ExportSettings {
    fn default() -> ExportSettings {
        ExportSettings {
            image_size:     2048,
            units_across:   100.0,
            file_name:      "flot.png".to_string()
        }
    }
}

impl Default for ViewportSettings {
    fn default() -> ViewportSettings {
        ViewportSettings {
            reference_width:    1920.0,
            reference_height:   1080.0,
            frame_size:         2048.0,
            frame_margin:       10.0,
            authoring_scale:    10.24
        }
    }
}

impl Default for EditorConfig {
    fn default() -> EditorConfig {
        EditorConfig {
            storage_key:    "flotPathData".to_string(),
            export:         ExportSettings::default(),
            viewport:       ViewportSettings::default()
        }
    }
}

impl EditorConfig {
    ///
    /// Reads a configuration from JSON: any setting that's left out keeps its default value
    ///
    pub fn from_json(json: &str) -> Result<EditorConfig, serde_json::Error> {
        serde_json::from_str(json)
    }

    ///
    /// Writes this configuration as JSON
    ///
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = EditorConfig::default();

        assert!(config.storage_key == "flotPathData");
        assert!(config.export.image_size == 2048);
        assert!(config.export.units_across == 100.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EditorConfig::from_json("{ \"storage_key\": \"test\", \"export\": { \"image_size\": 512 } }").unwrap();

        assert!(config.storage_key == "test");
        assert!(config.export.image_size == 512);
        assert!(config.export.file_name == "flot.png");
        assert!(config.viewport == ViewportSettings::default());
    }

    #[test]
    fn json_round_trip() {
        let mut config = EditorConfig::default();
        config.export.units_across = 200.0;

        let json = config.to_json().unwrap();
        assert!(EditorConfig::from_json(&json).unwrap() == config);
    }
}
