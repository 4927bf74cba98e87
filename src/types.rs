//! Common types for vn-address-rs.

use std::fmt;

use crate::error::{Error, Result};

/// One labeled fragment of a structured geocoder address.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddressComponent {
    /// Full display name (e.g. "Quận 1")
    pub long_name: String,
    /// Abbreviated name (e.g. "VN" for a country)
    pub short_name: String,
    /// Semantic type tags (e.g. "route", "administrative_area_level_2")
    #[cfg_attr(feature = "serde", serde(default))]
    pub types: Vec<String>,
}

impl AddressComponent {
    /// Create a component whose long and short names are the same.
    pub fn new(name: impl Into<String>, types: &[&str]) -> Self {
        let name = name.into();
        Self {
            short_name: name.clone(),
            long_name: name,
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Set a distinct short name.
    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = short_name.into();
        self
    }

    /// Check whether this component carries the given tag.
    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }
}

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLng {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

impl LatLng {
    /// Create a new coordinate.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A rung of the Vietnamese postal hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AdminLevel {
    /// Ward or commune
    Ward,
    /// Urban or rural district
    District,
    /// Centrally governed city or province
    City,
    /// Country
    Country,
}

impl fmt::Display for AdminLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AdminLevel::Ward => "ward",
            AdminLevel::District => "district",
            AdminLevel::City => "city",
            AdminLevel::Country => "country",
        };
        f.write_str(name)
    }
}

/// Where a normalized field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldSource {
    /// Read from a structured geocoder component
    Structured,
    /// Recovered from the formatted address; lower confidence
    Inferred,
    /// Not resolved; the field is empty
    #[default]
    Missing,
}

/// An address book record.
///
/// Name fields are never absent: unresolved values are empty strings.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Address {
    /// Record id, `None` for a record that has not been saved
    pub id: Option<String>,
    /// House number and street name
    pub street: String,
    /// Ward (e.g. "Phường 5")
    pub ward: String,
    /// District (e.g. "Quận Một")
    pub district: String,
    /// City or province (e.g. "Thành Phố Hồ Chí Minh")
    pub city: String,
    /// Country display name
    pub country: String,
    /// ISO 3166-1 alpha-2 country code
    pub country_code: String,
    /// Latitude
    pub lat: Option<f64>,
    /// Longitude
    pub lng: Option<f64>,
    /// Display label
    pub label: Option<u32>,
    /// Places-hierarchy id of the country
    pub country_id: Option<String>,
    /// Places-hierarchy id of the city
    pub city_id: Option<String>,
    /// Places-hierarchy id of the district
    pub district_id: Option<String>,
    /// Places-hierarchy id of the ward
    pub ward_id: Option<String>,
}

impl Address {
    /// Create an empty, unsaved address.
    pub fn new() -> Self {
        Self::default()
    }

    /// Coordinates, when both are known.
    pub fn location(&self) -> Option<LatLng> {
        Some(LatLng::new(self.lat?, self.lng?))
    }

    /// Set both coordinates.
    pub fn set_location(&mut self, location: LatLng) {
        self.lat = Some(location.lat);
        self.lng = Some(location.lng);
    }

    /// Check whether this record has never been saved.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Human-readable single-line form.
    ///
    /// Non-empty street, ward, district, city and country joined with
    /// `", "`. This is also the query sent to forward geocoding when a
    /// record is edited.
    pub fn formatted(&self) -> String {
        [
            &self.street,
            &self.ward,
            &self.district,
            &self.city,
            &self.country,
        ]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Export the record as geocoder components.
    ///
    /// Feeding the result back through the normalizer together with
    /// [`Address::formatted`] reproduces the same names.
    pub fn to_components(&self) -> Vec<AddressComponent> {
        let mut components = Vec::new();

        if !self.street.is_empty() {
            components.push(AddressComponent::new(&self.street, &["route"]));
        }
        if !self.ward.is_empty() {
            components.push(AddressComponent::new(
                &self.ward,
                &["administrative_area_level_3", "political"],
            ));
        }
        if !self.district.is_empty() {
            components.push(AddressComponent::new(
                &self.district,
                &["administrative_area_level_2", "political"],
            ));
        }
        if !self.city.is_empty() {
            components.push(AddressComponent::new(
                &self.city,
                &["administrative_area_level_1", "political"],
            ));
        }
        if !self.country.is_empty() || !self.country_code.is_empty() {
            components.push(
                AddressComponent::new(&self.country, &["country", "political"])
                    .with_short_name(&self.country_code),
            );
        }

        components
    }

    /// Check the record against the save rules.
    ///
    /// A street is required, and either a city or both a ward and a
    /// district.
    pub fn validate(&self) -> Result<()> {
        if self.street.trim().is_empty() {
            return Err(Error::validation_error("street is required"));
        }

        let has_city = !self.city.trim().is_empty();
        let has_ward_and_district =
            !self.ward.trim().is_empty() && !self.district.trim().is_empty();
        if !has_city && !has_ward_and_district {
            return Err(Error::validation_error(
                "either a city or both a ward and a district are required",
            ));
        }

        Ok(())
    }

    /// Overlay a freshly normalized address onto this record.
    ///
    /// Name fields are replaced. Identity, coordinates and linkage ids are
    /// only replaced when the update carries them.
    pub fn merge(&mut self, update: Address) {
        self.street = update.street;
        self.ward = update.ward;
        self.district = update.district;
        self.city = update.city;
        self.country = update.country;
        self.country_code = update.country_code;

        self.id = update.id.or(self.id.take());
        self.lat = update.lat.or(self.lat);
        self.lng = update.lng.or(self.lng);
        self.label = update.label.or(self.label);
        self.country_id = update.country_id.or(self.country_id.take());
        self.city_id = update.city_id.or(self.city_id.take());
        self.district_id = update.district_id.or(self.district_id.take());
        self.ward_id = update.ward_id.or(self.ward_id.take());
    }

    /// Pick a new value at one hierarchy level.
    ///
    /// Choosing a country invalidates the district and ward below it;
    /// choosing a city invalidates the ward.
    pub fn set_level(&mut self, level: AdminLevel, name: impl Into<String>, id: Option<String>) {
        let name = name.into();
        match level {
            AdminLevel::Country => {
                self.country = name;
                self.country_id = id;
                self.district.clear();
                self.district_id = None;
                self.ward.clear();
                self.ward_id = None;
            }
            AdminLevel::City => {
                self.city = name;
                self.city_id = id;
                self.ward.clear();
                self.ward_id = None;
            }
            AdminLevel::District => {
                self.district = name;
                self.district_id = id;
            }
            AdminLevel::Ward => {
                self.ward = name;
                self.ward_id = id;
            }
        }
    }
}

/// Geometry block of a geocoder result.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    /// Resolved coordinate
    pub location: LatLng,
}

/// One geocoder result: components, formatted string and location.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeocoderResult {
    /// Structured breakdown
    #[cfg_attr(feature = "serde", serde(default))]
    pub address_components: Vec<AddressComponent>,
    /// Single-line form
    #[cfg_attr(feature = "serde", serde(default))]
    pub formatted_address: String,
    /// Resolved geometry, when present
    #[cfg_attr(feature = "serde", serde(default))]
    pub geometry: Option<Geometry>,
}

/// A full geocoding response.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeocodingResponse {
    /// Service status (e.g. "OK", "ZERO_RESULTS")
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: String,
    /// Results, best match first
    #[cfg_attr(feature = "serde", serde(default))]
    pub results: Vec<GeocoderResult>,
}

impl GeocodingResponse {
    /// The best match, if any.
    pub fn first(&self) -> Option<&GeocoderResult> {
        self.results.first()
    }
}
