use harris_core::{default_threads, HarrisConfig};
use crate::builder::DetectorBuilder;
use crate::detector::HarrisDetector;
use crate::error::{HarrisError, HarrisResult};
use crate::kernel::gaussian_kernel;

#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};

/// Checks every pipeline parameter without touching an image.
pub fn validate_harris_config(cfg: &HarrisConfig) -> HarrisResult<()> {
    gaussian_kernel(cfg.gaussian_kernel_size, cfg.gaussian_sigma)?;
    if !cfg.harris_constant.is_finite() {
        return Err(HarrisError::InvalidHarrisConstant(cfg.harris_constant));
    }
    if cfg.cornerness_threshold.is_nan() {
        return Err(HarrisError::InvalidThreshold(cfg.cornerness_threshold));
    }
    Ok(())
}

/// Complete detector configuration with all settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectorConfig {
    /// Pipeline parameters
    #[cfg_attr(feature = "serde", serde(default))]
    pub core: HarrisConfig,
    /// Image dimensions
    pub width: usize,
    pub height: usize,
    /// Worker threads for the global pool
    #[cfg_attr(feature = "serde", serde(default = "default_threads"))]
    pub n_threads: usize,
    /// Metadata
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
}

impl DetectorConfig {
    /// Create new configuration with default settings
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            core: HarrisConfig::default(),
            width,
            height,
            n_threads: default_threads(),
            name: None,
            description: None,
        }
    }

    /// Add metadata to configuration
    pub fn with_metadata(mut self, name: &str, description: &str) -> Self {
        self.name = Some(name.to_string());
        self.description = Some(description.to_string());
        self
    }

    /// Convert to DetectorBuilder for further customization
    pub fn to_builder(self) -> DetectorBuilder {
        DetectorBuilder::from_config(self)
    }

    /// Build a detector from this configuration
    pub fn build(&self) -> HarrisResult<HarrisDetector> {
        HarrisDetector::new(self.core.clone(), self.width, self.height)
    }

    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "DetectorConfig: {}x{}, window={}x{} sigma={}, a={}, threshold={}, top_k={}, threads={}",
            self.width, self.height,
            self.core.gaussian_kernel_size, self.core.gaussian_kernel_size, self.core.gaussian_sigma,
            self.core.harris_constant, self.core.cornerness_threshold, self.core.top_k,
            self.n_threads
        )
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> HarrisResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HarrisError::InvalidImageSize { width: self.width, height: self.height });
        }
        validate_harris_config(&self.core)
    }

    /// Save configuration to JSON file
    #[cfg(feature = "serde")]
    pub fn save_json<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load configuration from JSON file
    #[cfg(feature = "serde")]
    pub fn load_json<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save configuration to TOML file
    #[cfg(feature = "serde")]
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Load configuration from TOML file
    #[cfg(feature = "serde")]
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Serialize to JSON string
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    #[cfg(feature = "serde")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserialize from TOML string
    #[cfg(feature = "serde")]
    pub fn from_toml(toml_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }
}
