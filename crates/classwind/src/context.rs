//! Matching policy and the per-run matching context.

use serde::{Deserialize, Serialize};

use crate::logging::targets;
use crate::tokens::{TokenLayer, TokenSource};
use crate::{Error, Result};

/// Framework version the output targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkVersion {
    /// Theme-configuration era (v3). Only the legacy layer is consulted.
    #[serde(alias = "v3")]
    Legacy,
    /// Design-token era (v4). The current layer wins, the legacy layer is a fallback.
    #[default]
    #[serde(alias = "v4")]
    Current,
}

/// Maximum distance an approximate match may deviate, per category.
///
/// A threshold of zero disables approximate matching for that category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Spacing distance in pixels.
    pub spacing: f64,
    /// Font-size distance in pixels.
    pub font: f64,
    /// Border-radius distance in pixels.
    pub radius: f64,
    /// Unitless line-height distance.
    pub line_height: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            spacing: 2.0,
            font: 1.0,
            radius: 2.0,
            line_height: 0.1,
        }
    }
}

impl Thresholds {
    fn validate(&self) -> Result<()> {
        for (category, value) in [
            ("spacing", self.spacing),
            ("font", self.font),
            ("radius", self.radius),
            ("line-height", self.line_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid_threshold(category, value));
            }
        }
        Ok(())
    }
}

/// User-facing conversion settings.
///
/// # Example
///
/// ```
/// use classwind::context::{ConversionConfig, FrameworkVersion};
///
/// let config = ConversionConfig::from_toml_str(r#"
///     version = "legacy"
///     approximate = true
///
///     [thresholds]
///     spacing = 4.0
/// "#)?;
///
/// assert_eq!(config.version, Some(FrameworkVersion::Legacy));
/// assert_eq!(config.thresholds.spacing, 4.0);
/// assert_eq!(config.thresholds.font, 1.0);
/// # Ok::<(), classwind::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Overrides the version declared by the token source.
    pub version: Option<FrameworkVersion>,
    /// Reject anything that is not an exact token match.
    pub strict: bool,
    /// Allow nearest-token matching within the thresholds.
    pub approximate: bool,
    /// Memoize resolver results for the run.
    pub cache: bool,
    /// Approximate matching thresholds.
    pub thresholds: Thresholds,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            version: None,
            strict: false,
            approximate: false,
            cache: true,
            thresholds: Thresholds::default(),
        }
    }
}

impl ConversionConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Enable approximate matching.
    pub fn approximate(mut self, enabled: bool) -> Self {
        self.approximate = enabled;
        self
    }

    /// Enable strict matching.
    pub fn strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    /// Override the framework version.
    pub fn version(mut self, version: FrameworkVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Replace the thresholds.
    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Enable or disable the resolver cache.
    pub fn cache(mut self, enabled: bool) -> Self {
        self.cache = enabled;
        self
    }
}

/// Immutable input to every resolution in a run.
#[derive(Debug, Clone)]
pub struct MatchingContext {
    source: TokenSource,
    version: FrameworkVersion,
    config: ConversionConfig,
}

impl MatchingContext {
    /// Build a context, validating the thresholds.
    pub fn new(source: TokenSource, config: ConversionConfig) -> Result<Self> {
        config.thresholds.validate()?;
        if config.strict && config.approximate {
            tracing::warn!(target: targets::RESOLVE, "strict mode disables approximate matching");
        }
        let version = config.version.unwrap_or(source.version);
        tracing::debug!(target: targets::RESOLVE, ?version, strict = config.strict, "matching context created");
        Ok(Self {
            source,
            version,
            config,
        })
    }

    /// The effective framework version.
    pub fn version(&self) -> FrameworkVersion {
        self.version
    }

    /// The current token layer.
    pub fn current(&self) -> &TokenLayer {
        &self.source.current
    }

    /// The legacy token layer.
    pub fn legacy(&self) -> &TokenLayer {
        &self.source.legacy
    }

    /// Whether strict matching is on.
    pub fn is_strict(&self) -> bool {
        self.config.strict
    }

    /// Whether approximate matching may run (enabled and not strict).
    pub fn allows_approximate(&self) -> bool {
        self.config.approximate && !self.config.strict
    }

    /// Whether the approximate flag is set, regardless of strictness.
    pub fn approximate_flag(&self) -> bool {
        self.config.approximate
    }

    /// Approximate matching thresholds.
    pub fn thresholds(&self) -> &Thresholds {
        &self.config.thresholds
    }

    /// The settings the context was built from.
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }
}
