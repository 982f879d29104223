//! Display preferences persisted under the `hotelAppSettings` key

use serde::{Deserialize, Serialize};

/// Display settings. Keys are camelCase to stay compatible with existing
/// stored values; keys this version does not know are preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplaySettings {
    pub dark_mode: bool,
    /// Accent colour, CSS hex notation
    pub primary_color: String,
    /// Font-size multiplier, 1 is the default size. Kept as the stored JSON
    /// number so `1` is not rewritten as `1.0`.
    pub font_size: serde_json::Number,
    pub compact_mode: bool,
    /// Language code ("vi", "en")
    pub language: String,
    pub notifications: bool,
    pub animations: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

pub const MIN_FONT_SIZE: f64 = 0.75;
pub const MAX_FONT_SIZE: f64 = 1.5;

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            primary_color: "#1976d2".to_string(),
            font_size: serde_json::Number::from(1),
            compact_mode: false,
            language: "vi".to_string(),
            notifications: true,
            animations: true,
            extra: serde_json::Map::new(),
        }
    }
}

impl DisplaySettings {
    /// Set one field from its stored key and a textual value
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<(), String> {
        fn parse_bool(value: &str) -> Result<bool, String> {
            match value.trim().to_lowercase().as_str() {
                "true" | "on" | "1" | "yes" => Ok(true),
                "false" | "off" | "0" | "no" => Ok(false),
                other => Err(format!("Expected a boolean, got '{}'", other)),
            }
        }

        match key {
            "darkMode" => self.dark_mode = parse_bool(value)?,
            "primaryColor" => {
                let color = value.trim();
                let is_hex = color.len() == 7
                    && color.starts_with('#')
                    && color[1..].chars().all(|c| c.is_ascii_hexdigit());
                if !is_hex {
                    return Err(format!("Invalid colour '{}', expected #rrggbb", color));
                }
                self.primary_color = color.to_string();
            }
            "fontSize" => {
                let number: serde_json::Number = value
                    .trim()
                    .parse()
                    .map_err(|_| format!("Invalid font size '{}'", value))?;
                let in_range = number
                    .as_f64()
                    .is_some_and(|size| (MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size));
                if !in_range {
                    return Err(format!(
                        "Font size must be between {} and {}",
                        MIN_FONT_SIZE, MAX_FONT_SIZE
                    ));
                }
                self.font_size = number;
            }
            "compactMode" => self.compact_mode = parse_bool(value)?,
            "language" => {
                let lang = value.trim().to_lowercase();
                if !matches!(lang.as_str(), "vi" | "en") {
                    return Err(format!("Unsupported language '{}'", value));
                }
                self.language = lang;
            }
            "notifications" => self.notifications = parse_bool(value)?,
            "animations" => self.animations = parse_bool(value)?,
            other => return Err(format!("Unknown setting '{}'", other)),
        }
        Ok(())
    }
}
