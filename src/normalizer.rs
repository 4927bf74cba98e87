//! Address normalization functionality.

use crate::components::{long_name, short_name};
use crate::data::{self, tags};
use crate::parser::FormattedAddressParser;
use crate::rules::RuleBook;
use crate::types::{Address, AddressComponent, AdminLevel, FieldSource, GeocoderResult};

#[cfg(feature = "serde")]
use crate::error::Result;
#[cfg(feature = "serde")]
use crate::types::GeocodingResponse;

/// Converts geocoder component lists into canonical Vietnamese addresses.
///
/// Normalization never fails. Every field the geocoder did not resolve is
/// an empty string in the output.
#[derive(Debug, Clone)]
pub struct AddressNormalizer {
    rules: RuleBook,
    parser: FormattedAddressParser,
    target_country: String,
    infer_from_formatted: bool,
}

impl AddressNormalizer {
    /// Create a new normalizer with the Vietnamese rules.
    pub fn new() -> Self {
        Self {
            rules: RuleBook::vietnam(),
            parser: FormattedAddressParser::new(),
            target_country: data::VIETNAM_COUNTRY_CODE.to_string(),
            infer_from_formatted: true,
        }
    }

    /// Replace the rule book.
    pub fn with_rules(mut self, rules: RuleBook) -> Self {
        self.rules = rules;
        self
    }

    /// Set the country code the rules are gated on.
    pub fn with_target_country(mut self, country_code: impl Into<String>) -> Self {
        self.target_country = country_code.into();
        self
    }

    /// Enable/disable recovering fields from the formatted address.
    pub fn with_inference(mut self, enabled: bool) -> Self {
        self.infer_from_formatted = enabled;
        self
    }

    /// The active rule book.
    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    /// Check whether the canonicalization rules apply to a country code.
    pub fn applies_to(&self, country_code: &str) -> bool {
        !country_code.is_empty() && country_code.eq_ignore_ascii_case(&self.target_country)
    }

    /// Normalize a component list and its formatted address.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vn_address_rs::{AddressComponent, AddressNormalizer};
    ///
    /// let components = vec![
    ///     AddressComponent::new("12", &["street_number"]),
    ///     AddressComponent::new("Lê Lợi", &["route"]),
    ///     AddressComponent::new("Quận 1", &["administrative_area_level_2"]),
    ///     AddressComponent::new("Hồ Chí Minh", &["administrative_area_level_1"]),
    ///     AddressComponent::new("Việt Nam", &["country"]).with_short_name("VN"),
    /// ];
    ///
    /// let normalized = AddressNormalizer::new().normalize(&components, "");
    /// assert_eq!(normalized.address.street, "12 Lê Lợi");
    /// assert_eq!(normalized.address.district, "Quận Một");
    /// assert_eq!(normalized.address.city, "Thành Phố Hồ Chí Minh");
    /// ```
    pub fn normalize(&self, components: &[AddressComponent], formatted: &str) -> NormalizedAddress {
        let country = long_name(components, tags::COUNTRY);
        let country_code = short_name(components, tags::COUNTRY);
        let localized = self.applies_to(&country_code);

        let (street, street_source) = self.street(components, formatted);
        let (ward, ward_source) = self.ward(components, formatted, localized);
        let (district, district_source) =
            self.structured(components, tags::DISTRICT, AdminLevel::District, localized);
        let (city, city_source) =
            self.structured(components, tags::CITY, AdminLevel::City, localized);

        let country_source = source_of(&country);
        let address = Address {
            street,
            ward,
            district,
            city,
            country,
            country_code,
            ..Address::default()
        };

        NormalizedAddress {
            address,
            sources: FieldSources {
                street: street_source,
                ward: ward_source,
                district: district_source,
                city: city_source,
                country: country_source,
            },
        }
    }

    /// Normalize one geocoder result, copying its coordinates.
    pub fn normalize_result(&self, result: &GeocoderResult) -> NormalizedAddress {
        let mut normalized = self.normalize(&result.address_components, &result.formatted_address);
        if let Some(geometry) = &result.geometry {
            normalized.address.set_location(geometry.location);
        }
        normalized
    }

    /// Normalize multiple geocoder results in batch.
    pub fn normalize_batch(&self, results: &[GeocoderResult]) -> Vec<NormalizedAddress> {
        results.iter().map(|r| self.normalize_result(r)).collect()
    }

    /// Normalize multiple geocoder results in parallel using multiple threads.
    ///
    /// Output order matches input order.
    #[cfg(feature = "parallel")]
    pub fn normalize_batch_parallel(&self, results: &[GeocoderResult]) -> Vec<NormalizedAddress> {
        use rayon::prelude::*;

        results.par_iter().map(|r| self.normalize_result(r)).collect()
    }

    /// Decode a geocoding response and normalize its best match.
    ///
    /// Returns `Ok(None)` when the response has no results.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a valid geocoding response.
    #[cfg(feature = "serde")]
    pub fn normalize_json(&self, json: &str) -> Result<Option<NormalizedAddress>> {
        let response: GeocodingResponse = serde_json::from_str(json)?;
        if response.results.is_empty() {
            log::debug!("geocoding response had no results (status {:?})", response.status);
        }
        Ok(response.first().map(|result| self.normalize_result(result)))
    }

    fn street(&self, components: &[AddressComponent], formatted: &str) -> (String, FieldSource) {
        let number = long_name(components, tags::STREET_NUMBER);
        let route = long_name(components, tags::ROUTE);

        if !route.is_empty() {
            let street = format!("{number} {route}").trim().to_string();
            return (street, FieldSource::Structured);
        }

        if self.infer_from_formatted
            && let Some(fragment) = self.parser.street(formatted)
        {
            log::debug!("street inferred from formatted address: {fragment:?}");
            return (join_number(&number, &fragment), FieldSource::Inferred);
        }

        let source = source_of(&number);
        (number, source)
    }

    fn ward(
        &self,
        components: &[AddressComponent],
        formatted: &str,
        localized: bool,
    ) -> (String, FieldSource) {
        let raw = long_name(components, tags::WARD);
        if !localized {
            let source = source_of(&raw);
            return (raw, source);
        }

        if !raw.is_empty() {
            return (self.rules.apply(AdminLevel::Ward, &raw), FieldSource::Structured);
        }

        if self.infer_from_formatted
            && let Some(inferred) = self.parser.ward(formatted)
        {
            log::debug!("ward inferred from formatted address: {inferred:?}");
            return (
                self.rules.apply(AdminLevel::Ward, &inferred),
                FieldSource::Inferred,
            );
        }

        (String::new(), FieldSource::Missing)
    }

    fn structured(
        &self,
        components: &[AddressComponent],
        tags: &[&str],
        level: AdminLevel,
        localized: bool,
    ) -> (String, FieldSource) {
        let raw = long_name(components, tags);
        let source = source_of(&raw);
        if localized && !raw.is_empty() {
            (self.rules.apply(level, &raw), source)
        } else {
            (raw, source)
        }
    }
}

impl Default for AddressNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Join a house number to a street fragment recovered from the formatted
/// address, skipping the number when the fragment already leads with it.
fn join_number(number: &str, fragment: &str) -> String {
    let repeated = fragment
        .strip_prefix(number)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace));
    if number.is_empty() || repeated {
        fragment.to_string()
    } else {
        format!("{number} {fragment}").trim().to_string()
    }
}

fn source_of(value: &str) -> FieldSource {
    if value.is_empty() {
        FieldSource::Missing
    } else {
        FieldSource::Structured
    }
}

/// Provenance of each normalized name field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldSources {
    /// Street provenance
    pub street: FieldSource,
    /// Ward provenance
    pub ward: FieldSource,
    /// District provenance
    pub district: FieldSource,
    /// City provenance
    pub city: FieldSource,
    /// Country provenance
    pub country: FieldSource,
}

/// Result of address normalization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizedAddress {
    /// The canonical record
    pub address: Address,
    /// Where each field came from
    pub sources: FieldSources,
}

impl NormalizedAddress {
    /// Check if any field was recovered from the formatted address.
    pub fn has_inferred_fields(&self) -> bool {
        [
            self.sources.street,
            self.sources.ward,
            self.sources.district,
            self.sources.city,
            self.sources.country,
        ]
        .contains(&FieldSource::Inferred)
    }

    /// Take the canonical record.
    pub fn into_address(self) -> Address {
        self.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Geometry, LatLng};

    fn vn_country() -> AddressComponent {
        AddressComponent::new("Việt Nam", &["country", "political"]).with_short_name("VN")
    }

    fn saigon_components() -> Vec<AddressComponent> {
        vec![
            AddressComponent::new("12", &["street_number"]),
            AddressComponent::new("Lê Lợi", &["route"]),
            AddressComponent::new("Bến Nghé", &["administrative_area_level_3", "political"]),
            AddressComponent::new("Quận 1", &["administrative_area_level_2", "political"]),
            AddressComponent::new("Hồ Chí Minh", &["administrative_area_level_1", "political"]),
            vn_country(),
        ]
    }

    const SAIGON_FORMATTED: &str =
        "12 Lê Lợi, Phường Bến Nghé, Quận 1, Hồ Chí Minh, Việt Nam";

    #[test]
    fn test_normalize_full_components() {
        let normalized = AddressNormalizer::new().normalize(&saigon_components(), SAIGON_FORMATTED);
        let address = &normalized.address;

        assert_eq!(address.street, "12 Lê Lợi");
        assert_eq!(address.ward, "Phường Bến Nghé");
        assert_eq!(address.district, "Quận Một");
        assert_eq!(address.city, "Thành Phố Hồ Chí Minh");
        assert_eq!(address.country, "Việt Nam");
        assert_eq!(address.country_code, "VN");
        assert!(!normalized.has_inferred_fields());
        assert_eq!(normalized.sources.street, FieldSource::Structured);
    }

    #[test]
    fn test_missing_components_are_empty() {
        let normalized = AddressNormalizer::new().normalize(&[], "");
        let address = normalized.address;

        assert_eq!(address.street, "");
        assert_eq!(address.ward, "");
        assert_eq!(address.district, "");
        assert_eq!(address.city, "");
        assert_eq!(address.country, "");
        assert_eq!(address.country_code, "");
        assert_eq!(normalized.sources, FieldSources::default());
    }

    #[test]
    fn test_missing_ward_in_vietnam_is_empty_without_fallback() {
        let components = vec![
            AddressComponent::new("Quận 3", &["administrative_area_level_2"]),
            vn_country(),
        ];
        let normalized = AddressNormalizer::new().normalize(&components, "Quận 3, Việt Nam");
        assert_eq!(normalized.address.ward, "");
        assert_eq!(normalized.sources.ward, FieldSource::Missing);
    }

    #[test]
    fn test_street_falls_back_to_formatted_address() {
        let components = vec![
            AddressComponent::new("Phường 5", &["administrative_area_level_3"]),
            AddressComponent::new("Quận 1", &["administrative_area_level_2"]),
            AddressComponent::new("Hồ Chí Minh", &["administrative_area_level_1"]),
            vn_country(),
        ];
        let normalized = AddressNormalizer::new().normalize(
            &components,
            "12 Main St, Phường 5, Quận 1, Hồ Chí Minh, Việt Nam",
        );

        assert_eq!(normalized.address.street, "12 Main St");
        assert_eq!(normalized.sources.street, FieldSource::Inferred);
        assert!(normalized.has_inferred_fields());
    }

    #[test]
    fn test_street_fallback_does_not_repeat_house_number() {
        let components = vec![AddressComponent::new("12", &["street_number"]), vn_country()];
        let normalized = AddressNormalizer::new()
            .normalize(&components, "12 Main St, Phường 5, Quận 1, Hồ Chí Minh, Việt Nam");
        assert_eq!(normalized.address.street, "12 Main St");
    }

    #[test]
    fn test_street_fallback_keeps_structured_house_number() {
        let components = vec![AddressComponent::new("34", &["street_number"]), vn_country()];
        let normalized = AddressNormalizer::new()
            .normalize(&components, "Hẻm 5, Phường 5, Quận 12, Hồ Chí Minh, Việt Nam");
        assert_eq!(normalized.address.street, "34 Hẻm 5");
        assert_eq!(normalized.sources.street, FieldSource::Inferred);
    }

    #[test]
    fn test_street_fallback_number_prefix_must_be_whole_token() {
        let components = vec![AddressComponent::new("1", &["street_number"]), vn_country()];
        let normalized = AddressNormalizer::new()
            .normalize(&components, "12 Main St, Phường 5, Quận 1, Hồ Chí Minh, Việt Nam");
        assert_eq!(normalized.address.street, "1 12 Main St");
    }

    #[test]
    fn test_earlier_component_wins_district() {
        let components = vec![
            AddressComponent::new("Thủ Đức", &["locality", "political"]),
            AddressComponent::new("Quận 1", &["administrative_area_level_2", "political"]),
            vn_country(),
        ];
        let normalized = AddressNormalizer::new().normalize(&components, "");
        assert_eq!(normalized.address.district, "Quận Thủ Đức");
    }

    #[test]
    fn test_street_number_only_when_no_marker() {
        let components = vec![AddressComponent::new("12", &["street_number"]), vn_country()];
        let normalized = AddressNormalizer::new().normalize(&components, "12, Hồ Chí Minh");
        assert_eq!(normalized.address.street, "12");
        assert_eq!(normalized.sources.street, FieldSource::Structured);
    }

    #[test]
    fn test_premise_and_fine_sublocality_build_street() {
        let components = vec![
            AddressComponent::new("Bitexco", &["premise"]),
            AddressComponent::new("Hẻm 5", &["sublocality_level_4", "sublocality"]),
        ];
        let normalized = AddressNormalizer::new().normalize(&components, "");
        assert_eq!(normalized.address.street, "Bitexco Hẻm 5");
    }

    #[test]
    fn test_ward_inferred_and_canonicalized() {
        let components = vec![
            AddressComponent::new("Lý Thường Kiệt", &["route"]),
            AddressComponent::new("Hoàn Kiếm", &["administrative_area_level_2"]),
            AddressComponent::new("Hà Nội", &["administrative_area_level_1"]),
            vn_country(),
        ];
        let normalized = AddressNormalizer::new().normalize(
            &components,
            "12 Lý Thường Kiệt, Hàng Bài, Hoàn Kiếm, Hà Nội, Việt Nam",
        );

        assert_eq!(normalized.address.ward, "Phường Hàng Bài");
        assert_eq!(normalized.sources.ward, FieldSource::Inferred);
        assert_eq!(normalized.address.district, "Quận Hoàn Kiếm");
        assert_eq!(normalized.address.city, "Thành Phố Hà Nội");
    }

    #[test]
    fn test_ward_abbreviation_expanded() {
        let components = vec![
            AddressComponent::new("P. 7", &["sublocality_level_1"]),
            vn_country(),
        ];
        let normalized = AddressNormalizer::new().normalize(&components, "");
        assert_eq!(normalized.address.ward, "Phường 7");
    }

    #[test]
    fn test_inference_disabled() {
        let normalizer = AddressNormalizer::new().with_inference(false);
        let normalized = normalizer.normalize(
            &[vn_country()],
            "12 Main St, Phường 5, Quận 1, Hồ Chí Minh, Việt Nam",
        );
        assert_eq!(normalized.address.street, "");
        assert_eq!(normalized.address.ward, "");
    }

    #[test]
    fn test_district_numeral() {
        let components = vec![
            AddressComponent::new("Quận 12", &["administrative_area_level_2"]),
            vn_country(),
        ];
        let normalized = AddressNormalizer::new().normalize(&components, "");
        assert_eq!(normalized.address.district, "Quận Mười Hai");

        let components = vec![
            AddressComponent::new("Quận 13", &["administrative_area_level_2"]),
            vn_country(),
        ];
        let normalized = AddressNormalizer::new().normalize(&components, "");
        assert_eq!(normalized.address.district, "Quận 13");
    }

    #[test]
    fn test_district_falls_back_to_locality() {
        let components = vec![
            AddressComponent::new("Thủ Dầu Một", &["locality", "political"]),
            AddressComponent::new("Bình Dương", &["administrative_area_level_1"]),
            vn_country(),
        ];
        let normalized = AddressNormalizer::new().normalize(&components, "");
        assert_eq!(normalized.address.district, "Quận Thủ Dầu Một");
        assert_eq!(normalized.address.city, "Tỉnh Bình Dương");
    }

    #[test]
    fn test_non_vietnam_passes_through() {
        let components = vec![
            AddressComponent::new("1600", &["street_number"]),
            AddressComponent::new("Amphitheatre Parkway", &["route"]),
            AddressComponent::new("Mountain View", &["locality", "political"]),
            AddressComponent::new("Santa Clara County", &["administrative_area_level_2"]),
            AddressComponent::new("California", &["administrative_area_level_1"])
                .with_short_name("CA"),
            AddressComponent::new("United States", &["country"]).with_short_name("US"),
        ];
        let normalized = AddressNormalizer::new().normalize(
            &components,
            "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA",
        );
        let address = normalized.address;

        assert_eq!(address.street, "1600 Amphitheatre Parkway");
        assert_eq!(address.ward, "");
        assert_eq!(address.district, "Mountain View");
        assert_eq!(address.city, "California");
        assert_eq!(address.country_code, "US");
    }

    #[test]
    fn test_non_vietnam_numeral_district_untouched() {
        let components = vec![
            AddressComponent::new("District 12", &["administrative_area_level_2"]),
            AddressComponent::new("Hồ Chí Minh", &["administrative_area_level_1"]),
            AddressComponent::new("Somewhere", &["administrative_area_level_3"]),
            AddressComponent::new("Elsewhere", &["country"]).with_short_name("XX"),
        ];
        let address = AddressNormalizer::new().normalize(&components, "").address;
        assert_eq!(address.district, "District 12");
        assert_eq!(address.city, "Hồ Chí Minh");
        assert_eq!(address.ward, "Somewhere");
    }

    #[test]
    fn test_country_code_gate_is_case_insensitive() {
        let components = vec![
            AddressComponent::new("Gò Vấp", &["administrative_area_level_2"]),
            AddressComponent::new("Việt Nam", &["country"]).with_short_name("vn"),
        ];
        let address = AddressNormalizer::new().normalize(&components, "").address;
        assert_eq!(address.district, "Quận Gò Vấp");
    }

    #[test]
    fn test_renormalizing_is_a_fixed_point() {
        let normalizer = AddressNormalizer::new();
        let inputs = vec![
            (saigon_components(), SAIGON_FORMATTED.to_string()),
            (
                vec![
                    AddressComponent::new("P. 5", &["sublocality_level_1"]),
                    AddressComponent::new("12", &["administrative_area_level_2"]),
                    AddressComponent::new("Phú Nhuân", &["locality"]),
                    AddressComponent::new("Bà Rịa–Vũng Tàu", &["administrative_area_level_1"]),
                    vn_country(),
                ],
                "34 Hẻm 5, P. 5, Quận 12, Bà Rịa–Vũng Tàu, Việt Nam".to_string(),
            ),
        ];

        for (components, formatted) in inputs {
            let first = normalizer.normalize(&components, &formatted).address;
            let second = normalizer
                .normalize(&first.to_components(), &first.formatted())
                .address;

            assert_eq!(first.street, second.street);
            assert_eq!(first.ward, second.ward);
            assert_eq!(first.district, second.district);
            assert_eq!(first.city, second.city);
            assert_eq!(first.country_code, second.country_code);
            for field in [&second.ward, &second.district, &second.city] {
                assert!(!field.contains("Quận Quận"), "{field}");
                assert!(!field.contains("Phường Phường"), "{field}");
                assert!(!field.contains("Tỉnh Tỉnh"), "{field}");
            }
        }
    }

    #[test]
    fn test_normalize_result_copies_location() {
        let result = GeocoderResult {
            address_components: saigon_components(),
            formatted_address: SAIGON_FORMATTED.to_string(),
            geometry: Some(Geometry {
                location: LatLng::new(10.7735, 106.7018),
            }),
        };
        let normalizer = AddressNormalizer::new();
        let address = normalizer.normalize_result(&result).into_address();
        assert_eq!(address.location(), Some(LatLng::new(10.7735, 106.7018)));

        let batch = normalizer.normalize_batch(&[result.clone(), GeocoderResult::default()]);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1].address, Address::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_normalize_json() {
        let json = r#"{
            "status": "OK",
            "results": [{
                "address_components": [
                    {"long_name": "Nguyễn Huệ", "short_name": "Nguyễn Huệ", "types": ["route"]},
                    {"long_name": "Quận 1", "short_name": "Quận 1", "types": ["administrative_area_level_2", "political"]},
                    {"long_name": "Hồ Chí Minh", "short_name": "Hồ Chí Minh", "types": ["administrative_area_level_1", "political"]},
                    {"long_name": "Việt Nam", "short_name": "VN", "types": ["country", "political"]}
                ],
                "formatted_address": "Nguyễn Huệ, Bến Nghé, Quận 1, Hồ Chí Minh, Việt Nam",
                "geometry": {"location": {"lat": 10.7743, "lng": 106.7038}}
            }]
        }"#;

        let normalized = AddressNormalizer::new().normalize_json(json).unwrap().unwrap();
        assert_eq!(normalized.address.street, "Nguyễn Huệ");
        assert_eq!(normalized.address.ward, "Phường Bến Nghé");
        assert_eq!(normalized.sources.ward, FieldSource::Inferred);
        assert_eq!(normalized.address.lat, Some(10.7743));

        let empty = AddressNormalizer::new()
            .normalize_json(r#"{"status": "ZERO_RESULTS", "results": []}"#)
            .unwrap();
        assert!(empty.is_none());

        assert!(AddressNormalizer::new().normalize_json("not json").is_err());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_normalize_batch_parallel_preserves_order() {
        let results: Vec<GeocoderResult> = (1..=12)
            .map(|n| GeocoderResult {
                address_components: vec![
                    AddressComponent::new(n.to_string(), &["administrative_area_level_2"]),
                    vn_country(),
                ],
                ..GeocoderResult::default()
            })
            .collect();

        let normalizer = AddressNormalizer::new();
        let parallel = normalizer.normalize_batch_parallel(&results);
        assert_eq!(parallel, normalizer.normalize_batch(&results));
        assert_eq!(parallel[11].address.district, "Quận Mười Hai");
    }
}
