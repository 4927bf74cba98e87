//! Nearby-address ranking.
//!
//! Road distances come from an external routing service behind
//! [`DistanceSource`]. The ranker owns only the candidate pre-filtering,
//! ordering and truncation policy.

use crate::error::{Error, Result};
use crate::types::{Address, LatLng};

/// Default cap on how many candidates are sent to the distance service.
pub const DEFAULT_MAX_CANDIDATES: usize = 20;
/// Default radius beyond which candidates are dropped, in meters.
pub const DEFAULT_RADIUS_METERS: f64 = 25_000.0;
/// Default number of results returned.
pub const DEFAULT_TOP_N: usize = 3;

/// Supplies travel distances from one origin to many destinations.
///
/// Implementations return one entry per destination, in order. `None`
/// marks a destination the service could not route to.
pub trait DistanceSource {
    /// Distances in meters from `origin` to each of `destinations`.
    fn distances(&self, origin: LatLng, destinations: &[LatLng]) -> Result<Vec<Option<f64>>>;
}

impl<F> DistanceSource for F
where
    F: Fn(LatLng, &[LatLng]) -> Result<Vec<Option<f64>>>,
{
    fn distances(&self, origin: LatLng, destinations: &[LatLng]) -> Result<Vec<Option<f64>>> {
        self(origin, destinations)
    }
}

/// Ranking policy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RankerConfig {
    /// Candidates sent to the distance service
    pub max_candidates: usize,
    /// Maximum accepted distance in meters
    pub radius_meters: f64,
    /// Results returned
    pub top_n: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_CANDIDATES,
            radius_meters: DEFAULT_RADIUS_METERS,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl RankerConfig {
    /// Check the policy values.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for zero counts or a radius that is
    /// negative or not a number.
    pub fn validate(&self) -> Result<()> {
        if self.max_candidates == 0 {
            return Err(Error::config_error("max_candidates must be positive"));
        }
        if self.top_n == 0 {
            return Err(Error::config_error("top_n must be positive"));
        }
        if self.radius_meters.is_nan() || self.radius_meters < 0.0 {
            return Err(Error::config_error(format!(
                "radius_meters must be a non-negative number, got {}",
                self.radius_meters
            )));
        }
        Ok(())
    }
}

/// A saved address considered for ranking.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Record id
    pub id: String,
    /// Coordinate
    pub location: LatLng,
    /// Single-line address shown to the user
    pub display_address: String,
}

impl Candidate {
    /// Create a new candidate.
    pub fn new(
        id: impl Into<String>,
        location: LatLng,
        display_address: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            location,
            display_address: display_address.into(),
        }
    }

    /// Build a candidate from a saved address.
    ///
    /// Returns `None` for unsaved records and records without coordinates.
    pub fn from_address(address: &Address) -> Option<Self> {
        Some(Self {
            id: address.id.clone()?,
            location: address.location()?,
            display_address: address.formatted(),
        })
    }
}

/// A candidate with its measured distance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedAddress {
    /// Record id
    pub id: String,
    /// Single-line address shown to the user
    pub display_address: String,
    /// Travel distance from the target in meters
    pub distance_meters: f64,
}

/// Picks the closest saved addresses around a target.
#[derive(Debug, Clone, Default)]
pub struct ProximityRanker {
    config: RankerConfig,
}

impl ProximityRanker {
    /// Create a ranker with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ranker with a custom policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy is invalid.
    pub fn with_config(config: RankerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active policy.
    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Rank candidates by travel distance from `target`.
    ///
    /// Candidates sharing `target_id` are excluded, the rest are capped at
    /// `max_candidates` in input order, and the measured ones within the
    /// radius are returned closest first, at most `top_n`. Equal distances
    /// keep input order.
    ///
    /// # Errors
    ///
    /// Returns an error if the distance service fails or returns the wrong
    /// number of entries.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vn_address_rs::{Candidate, LatLng, ProximityRanker, Result};
    ///
    /// let candidates = vec![
    ///     Candidate::new("a", LatLng::new(10.0, 106.0), "A"),
    ///     Candidate::new("b", LatLng::new(10.1, 106.0), "B"),
    /// ];
    /// let by_latitude = |origin: LatLng, destinations: &[LatLng]| -> Result<Vec<Option<f64>>> {
    ///     Ok(destinations
    ///         .iter()
    ///         .map(|d| Some((d.lat - origin.lat).abs() * 111_000.0))
    ///         .collect())
    /// };
    ///
    /// let ranked = ProximityRanker::new().rank(
    ///     None,
    ///     LatLng::new(10.09, 106.0),
    ///     &candidates,
    ///     &by_latitude,
    /// )?;
    /// assert_eq!(ranked[0].id, "b");
    /// # Ok::<(), vn_address_rs::Error>(())
    /// ```
    pub fn rank<D>(
        &self,
        target_id: Option<&str>,
        target: LatLng,
        candidates: &[Candidate],
        source: &D,
    ) -> Result<Vec<RankedAddress>>
    where
        D: DistanceSource + ?Sized,
    {
        let shortlist: Vec<&Candidate> = candidates
            .iter()
            .filter(|c| target_id != Some(c.id.as_str()))
            .take(self.config.max_candidates)
            .collect();

        if shortlist.is_empty() {
            return Ok(Vec::new());
        }

        let destinations: Vec<LatLng> = shortlist.iter().map(|c| c.location).collect();
        let distances = source.distances(target, &destinations)?;
        if distances.len() != destinations.len() {
            log::warn!(
                "distance service returned {} entries for {} destinations",
                distances.len(),
                destinations.len()
            );
            return Err(Error::distance_error(format!(
                "expected {} distances, got {}",
                destinations.len(),
                distances.len()
            )));
        }

        let mut ranked: Vec<RankedAddress> = shortlist
            .into_iter()
            .zip(distances)
            .filter_map(|(candidate, distance)| {
                let distance = distance?;
                (distance <= self.config.radius_meters).then(|| RankedAddress {
                    id: candidate.id.clone(),
                    display_address: candidate.display_address.clone(),
                    distance_meters: distance,
                })
            })
            .collect();

        ranked.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
        ranked.truncate(self.config.top_n);

        log::debug!("ranked {} nearby addresses", ranked.len());
        Ok(ranked)
    }

    /// Rank saved addresses around `target`.
    ///
    /// Addresses without an id or coordinates are skipped. The target's own
    /// record is excluded and its coordinates are the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the target has no coordinates or the distance
    /// service fails.
    pub fn rank_addresses<D>(
        &self,
        target: &Address,
        addresses: &[Address],
        source: &D,
    ) -> Result<Vec<RankedAddress>>
    where
        D: DistanceSource + ?Sized,
    {
        let origin = target
            .location()
            .ok_or_else(|| Error::validation_error("target address has no coordinates"))?;
        let candidates: Vec<Candidate> =
            addresses.iter().filter_map(Candidate::from_address).collect();
        self.rank(target.id.as_deref(), origin, &candidates, source)
    }
}
