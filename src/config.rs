//! Configuration for [`VnAddress`](crate::VnAddress).

use crate::data;
use crate::error::Result;
use crate::ranker::RankerConfig;
use crate::rules::RuleBook;

/// Configuration for normalization and ranking behavior.
///
/// With the `serde` feature the configuration can be loaded from TOML:
///
/// ```toml
/// target_country = "VN"
/// infer_from_formatted = true
///
/// [ranker]
/// max_candidates = 20
/// radius_meters = 25000.0
/// top_n = 3
///
/// [[rules.district]]
/// matcher = { exact = "Thủ Đức" }
/// rewrite = { replace = "Thành Phố Thủ Đức" }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VnAddressConfig {
    /// Country code the canonicalization rules are gated on
    pub target_country: String,

    /// Whether to recover missing fields from the formatted address
    pub infer_from_formatted: bool,

    /// Nearby-address ranking policy
    pub ranker: RankerConfig,

    /// Extra rules, applied before the built-in ones
    pub rules: RuleBook,
}

impl Default for VnAddressConfig {
    fn default() -> Self {
        Self {
            target_country: data::VIETNAM_COUNTRY_CODE.to_string(),
            infer_from_formatted: true,
            ranker: RankerConfig::default(),
            rules: RuleBook::default(),
        }
    }
}

impl VnAddressConfig {
    /// Create a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vn_address_rs::VnAddressConfig;
    ///
    /// let config = VnAddressConfig::builder()
    ///     .infer_from_formatted(false)
    ///     .top_n(5)
    ///     .build();
    /// assert_eq!(config.ranker.top_n, 5);
    /// ```
    pub fn builder() -> VnAddressConfigBuilder {
        VnAddressConfigBuilder::new()
    }

    /// Check the configuration values.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an empty target country or an
    /// invalid ranking policy.
    pub fn validate(&self) -> Result<()> {
        if self.target_country.trim().is_empty() {
            return Err(crate::Error::config_error("target_country must not be empty"));
        }
        self.ranker.validate()
    }

    /// Parse a configuration from TOML text.
    ///
    /// Missing keys take their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this structure
    /// or fails validation.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[cfg(feature = "serde")]
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading configuration from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

/// Builder for VnAddressConfig.
#[derive(Debug, Clone)]
pub struct VnAddressConfigBuilder {
    config: VnAddressConfig,
}

impl VnAddressConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: VnAddressConfig::default(),
        }
    }

    /// Set the country code the rules are gated on.
    pub fn target_country(mut self, country_code: impl Into<String>) -> Self {
        self.config.target_country = country_code.into();
        self
    }

    /// Set whether to recover missing fields from the formatted address.
    pub fn infer_from_formatted(mut self, enabled: bool) -> Self {
        self.config.infer_from_formatted = enabled;
        self
    }

    /// Set the ranking policy.
    pub fn ranker(mut self, ranker: RankerConfig) -> Self {
        self.config.ranker = ranker;
        self
    }

    /// Set how many candidates are sent to the distance service.
    pub fn max_candidates(mut self, max_candidates: usize) -> Self {
        self.config.ranker.max_candidates = max_candidates;
        self
    }

    /// Set the ranking radius in meters.
    pub fn radius_meters(mut self, radius_meters: f64) -> Self {
        self.config.ranker.radius_meters = radius_meters;
        self
    }

    /// Set how many ranked addresses are returned.
    pub fn top_n(mut self, top_n: usize) -> Self {
        self.config.ranker.top_n = top_n;
        self
    }

    /// Set extra rules applied before the built-in ones.
    pub fn rules(mut self, rules: RuleBook) -> Self {
        self.config.rules = rules;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> VnAddressConfig {
        self.config
    }
}

impl Default for VnAddressConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
