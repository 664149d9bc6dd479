//! Configuration for sessions and windows
//!
//! Window hints and creation parameters can be loaded from TOML or RON files
//! so that applications do not hard-code them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File formats understood by [`Config`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl ConfigFormat {
    /// Format implied by the file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Settings that can be stored in TOML or RON files
pub trait Config: Serialize + DeserializeOwned + Default {
    /// Parse settings in the given format; missing fields take their defaults
    fn parse(format: ConfigFormat, contents: &str) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Render settings in the given format
    fn render(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string())),
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }

    /// Load settings, picking the format from the extension
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        log::debug!("Loading {:?} settings from {}", format, path.display());
        Self::parse(format, &contents)
    }

    /// Save settings, picking the format from the extension
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = self.render(ConfigFormat::from_path(path)?)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Client API the window's context is created for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientApi {
    /// Desktop OpenGL
    #[default]
    OpenGl,
    /// OpenGL ES
    OpenGlEs,
    /// No context (Vulkan or software rendering)
    NoApi,
}

/// OpenGL profile request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenGlProfile {
    /// Let the driver decide
    #[default]
    Any,
    /// Core profile
    Core,
    /// Compatibility profile
    Compat,
}

/// Hints applied before each window creation
///
/// Mirrors the creation hints of the native library. Defaults match the
/// library's own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowHints {
    /// Window is shown on creation
    pub visible: bool,
    /// Window can be resized by the user
    pub resizable: bool,
    /// Window has a title bar and border
    pub decorated: bool,
    /// Window receives input focus on creation
    pub focused: bool,
    /// Window stays above other windows
    pub floating: bool,
    /// Window is maximized on creation
    pub maximized: bool,
    /// Framebuffer is transparent
    pub transparent_framebuffer: bool,
    /// Content area is resized by the monitor content scale
    pub scale_to_monitor: bool,
    /// MSAA sample count, `None` for don't care
    pub samples: Option<u32>,
    /// Refresh rate for full screen windows, `None` for highest available
    pub refresh_rate: Option<u32>,
    /// Context client API
    pub client_api: ClientApi,
    /// Requested context version (major, minor)
    pub context_version: Option<(u32, u32)>,
    /// Requested OpenGL profile
    pub opengl_profile: OpenGlProfile,
    /// Forward-compatible OpenGL context
    pub opengl_forward_compat: bool,
    /// sRGB-capable framebuffer
    pub srgb_capable: bool,
    /// Double-buffered framebuffer
    pub double_buffer: bool,
}

impl Default for WindowHints {
    fn default() -> Self {
        Self {
            visible: true,
            resizable: true,
            decorated: true,
            focused: true,
            floating: false,
            maximized: false,
            transparent_framebuffer: false,
            scale_to_monitor: false,
            samples: None,
            refresh_rate: None,
            client_api: ClientApi::OpenGl,
            context_version: None,
            opengl_profile: OpenGlProfile::Any,
            opengl_forward_compat: false,
            srgb_capable: false,
            double_buffer: true,
        }
    }
}

/// Session-wide settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FacadeConfig {
    /// Hints applied right after initialisation
    pub hints: WindowHints,
    /// Swap interval applied when the first context is made current
    pub swap_interval: Option<u32>,
}

impl Config for FacadeConfig {}

/// Parameters for a single window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Content area width in screen coordinates
    pub width: i32,
    /// Content area height in screen coordinates
    pub height: i32,
    /// Initial title
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: "GLFW Window".to_string(),
        }
    }
}

impl Config for WindowConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_default_to_library_defaults() {
        let hints = WindowHints::default();
        assert!(hints.visible && hints.resizable && hints.decorated && hints.double_buffer);
        assert!(!hints.floating && !hints.maximized);
        assert_eq!(hints.client_api, ClientApi::OpenGl);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = FacadeConfig::parse(
            ConfigFormat::Toml,
            r#"
            swap_interval = 1

            [hints]
            visible = false
            client_api = "no_api"
            context_version = [3, 3]
            "#,
        )
        .unwrap();

        assert_eq!(config.swap_interval, Some(1));
        assert!(!config.hints.visible);
        assert!(config.hints.resizable);
        assert_eq!(config.hints.client_api, ClientApi::NoApi);
        assert_eq!(config.hints.context_version, Some((3, 3)));
    }

    #[test]
    fn test_window_config_from_ron() {
        let config = WindowConfig::parse(ConfigFormat::Ron, r#"(width: 300, title: "Hello")"#).unwrap();
        assert_eq!(config.width, 300);
        assert_eq!(config.height, 480);
        assert_eq!(config.title, "Hello");
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = WindowConfig::parse(ConfigFormat::Toml, "width = \"wide\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/b.toml")).unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("session.ron")).unwrap(), ConfigFormat::Ron);
        assert!(ConfigFormat::from_path(Path::new("toml")).is_err());
    }

    #[test]
    fn test_save_and_load_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("glfw_facade_config_{}.toml", std::process::id()));

        let mut config = FacadeConfig::default();
        config.hints.floating = true;
        config.swap_interval = Some(0);
        config.save_to_file(&path).unwrap();

        let loaded = FacadeConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let result = WindowConfig::default().save_to_file("window.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
        let result = WindowConfig::load_from_file("window");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
