//! # vn-address-rs
//!
//! Geocoder address normalization for the Vietnamese postal hierarchy.
//!
//! This library turns the structured address components returned by a
//! geocoding service into a canonical address record (street, ward,
//! district, city, country) using the display-name conventions of
//! Vietnamese administrative divisions, and ranks saved addresses by
//! distance around a target.
//!
//! ## Features
//!
//! - **Address Normalization**: Tag lookup over geocoder components with empty-string degradation
//! - **Formatted-Address Fallback**: Lower-confidence recovery of street and ward
//! - **Data-Driven Rules**: Per-level `(matcher, rewrite)` tables, extensible from config
//! - **Nearby Ranking**: Candidate filtering and ordering around a pluggable distance service
//! - **No I/O**: Network calls stay with the caller
//!
//! ## Quick Start
//!
//! ```rust
//! use vn_address_rs::{AddressComponent, VnAddress};
//!
//! let vn = VnAddress::new();
//!
//! let components = vec![
//!     AddressComponent::new("Quận 12", &["administrative_area_level_2"]),
//!     AddressComponent::new("Hồ Chí Minh", &["administrative_area_level_1"]),
//!     AddressComponent::new("Việt Nam", &["country"]).with_short_name("VN"),
//! ];
//! let address = vn.normalize(&components, "12 Main St, Phường 5, Quận 12, Hồ Chí Minh, Việt Nam");
//!
//! assert_eq!(address.street, "12 Main St");
//! assert_eq!(address.ward, "Phường 5");
//! assert_eq!(address.district, "Quận Mười Hai");
//! assert_eq!(address.city, "Thành Phố Hồ Chí Minh");
//! ```

#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod components;
pub mod config;
pub mod data;
pub mod error;
pub mod normalizer;
pub mod parser;
pub mod ranker;
pub mod rules;
pub mod types;

// Re-export main API
pub use config::{VnAddressConfig, VnAddressConfigBuilder};
pub use error::{Error, Result};
pub use normalizer::{AddressNormalizer, FieldSources, NormalizedAddress};
pub use parser::{FormattedAddressParser, InferredAddress};
pub use ranker::{Candidate, DistanceSource, ProximityRanker, RankedAddress, RankerConfig};
pub use rules::{Matcher, NormalizationRule, Rewrite, RuleBook, RuleSet};
pub use types::*;

/// Main entry point for normalization and ranking.
///
/// Holds a validated configuration together with the normalizer and ranker
/// built from it. Both are immutable, so a single instance can be shared
/// across threads.
///
/// # Examples
///
/// ```rust
/// use vn_address_rs::{VnAddress, VnAddressConfig};
///
/// let config = VnAddressConfig::builder().top_n(5).build();
/// let vn = VnAddress::with_config(config)?;
/// assert_eq!(vn.ranker().config().top_n, 5);
/// # Ok::<(), vn_address_rs::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct VnAddress {
    config: VnAddressConfig,
    normalizer: AddressNormalizer,
    ranker: ProximityRanker,
}

impl VnAddress {
    /// Create an instance with the default configuration.
    pub fn new() -> Self {
        let config = VnAddressConfig::default();
        Self {
            normalizer: AddressNormalizer::new(),
            ranker: ProximityRanker::new(),
            config,
        }
    }

    /// Create an instance with a custom configuration.
    ///
    /// Extra rules in the configuration run before the built-in Vietnamese
    /// rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_config(config: VnAddressConfig) -> Result<Self> {
        config.validate()?;

        let mut rules = RuleBook::vietnam();
        rules.prepend(config.rules.clone());

        let normalizer = AddressNormalizer::new()
            .with_rules(rules)
            .with_target_country(config.target_country.clone())
            .with_inference(config.infer_from_formatted);
        let ranker = ProximityRanker::with_config(config.ranker.clone())?;

        Ok(Self {
            config,
            normalizer,
            ranker,
        })
    }

    /// Load the configuration from a TOML file and create an instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or is invalid.
    #[cfg(feature = "serde")]
    pub fn from_config_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        Self::with_config(VnAddressConfig::from_file(path)?)
    }

    /// The address normalizer.
    pub fn normalizer(&self) -> &AddressNormalizer {
        &self.normalizer
    }

    /// The nearby-address ranker.
    pub fn ranker(&self) -> &ProximityRanker {
        &self.ranker
    }

    /// Normalize geocoder components into a canonical address.
    ///
    /// This is a convenience method that drops the field provenance; use
    /// [`AddressNormalizer::normalize`] to keep it.
    pub fn normalize(&self, components: &[AddressComponent], formatted: &str) -> Address {
        self.normalizer.normalize(components, formatted).into_address()
    }

    /// Decode a geocoding response and normalize its best match.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a valid geocoding response.
    #[cfg(feature = "serde")]
    pub fn normalize_json(&self, json: &str) -> Result<Option<Address>> {
        Ok(self
            .normalizer
            .normalize_json(json)?
            .map(NormalizedAddress::into_address))
    }

    /// Rank saved addresses closest to `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the target has no coordinates or the distance
    /// service fails.
    pub fn nearby<D>(
        &self,
        target: &Address,
        addresses: &[Address],
        source: &D,
    ) -> Result<Vec<RankedAddress>>
    where
        D: DistanceSource + ?Sized,
    {
        self.ranker.rank_addresses(target, addresses, source)
    }

    /// Get the configuration used by this instance.
    pub fn config(&self) -> &VnAddressConfig {
        &self.config
    }
}

impl Default for VnAddress {
    fn default() -> Self {
        Self::new()
    }
}
