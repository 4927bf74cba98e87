//! Best-effort parsing of a formatted address string.
//!
//! Used only when the structured components leave a field empty. Results are
//! lower confidence than component lookups and are reported as
//! [`FieldSource::Inferred`](crate::types::FieldSource::Inferred) by the
//! normalizer.

use crate::data;

/// Number of trailing segments assumed to follow the ward: district, city,
/// country.
const SEGMENTS_AFTER_WARD: usize = 3;

/// Secondary parser over comma-delimited formatted addresses.
#[derive(Debug, Clone)]
pub struct FormattedAddressParser {
    street_boundary_markers: Vec<String>,
    ward_marker: String,
}

impl FormattedAddressParser {
    /// Create a parser with the Vietnamese markers.
    pub fn new() -> Self {
        Self {
            street_boundary_markers: data::STREET_BOUNDARY_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            ward_marker: data::WARD_MARKER.to_string(),
        }
    }

    /// Add a marker that starts the administrative suffix.
    pub fn with_street_boundary_marker(mut self, marker: impl Into<String>) -> Self {
        self.street_boundary_markers.push(marker.into());
        self
    }

    /// Parse a formatted address into its recoverable parts.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vn_address_rs::FormattedAddressParser;
    ///
    /// let parser = FormattedAddressParser::new();
    /// let parsed = parser.parse("12 Lê Lợi, Phường Bến Nghé, Quận 1, Hồ Chí Minh, Việt Nam");
    /// assert_eq!(parsed.street.as_deref(), Some("12 Lê Lợi"));
    /// assert_eq!(parsed.ward.as_deref(), Some("Phường Bến Nghé"));
    /// ```
    pub fn parse(&self, formatted: &str) -> InferredAddress {
        let segments = segments(formatted);
        InferredAddress {
            street: self.street_from_segments(&segments),
            ward: self.ward_from_segments(&segments),
        }
    }

    /// Recover the street: the segments before the first one carrying an
    /// administrative marker.
    ///
    /// Returns `None` when no marker segment exists or nothing precedes it.
    pub fn street(&self, formatted: &str) -> Option<String> {
        self.street_from_segments(&segments(formatted))
    }

    /// Recover the ward: the first segment carrying the ward marker, or the
    /// segment three places before the last one.
    ///
    /// Returns `None` when the address is too short for the positional
    /// guess.
    pub fn ward(&self, formatted: &str) -> Option<String> {
        self.ward_from_segments(&segments(formatted))
    }

    fn street_from_segments(&self, segments: &[&str]) -> Option<String> {
        let boundary = segments.iter().position(|segment| {
            self.street_boundary_markers
                .iter()
                .any(|marker| segment.contains(marker.as_str()))
        })?;

        let street = segments[..boundary]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ");

        (!street.is_empty()).then_some(street)
    }

    fn ward_from_segments(&self, segments: &[&str]) -> Option<String> {
        if let Some(marked) = segments
            .iter()
            .find(|segment| segment.contains(self.ward_marker.as_str()))
        {
            return Some(marked.to_string());
        }

        let index = segments.len().checked_sub(1 + SEGMENTS_AFTER_WARD)?;
        let ward = segments.get(index)?;
        (!ward.is_empty()).then(|| ward.to_string())
    }
}

impl Default for FormattedAddressParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parts recovered from a formatted address.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InferredAddress {
    /// Street fragment preceding the administrative suffix
    pub street: Option<String>,
    /// Ward segment
    pub ward: Option<String>,
}

impl InferredAddress {
    /// Check if nothing could be recovered.
    pub fn is_empty(&self) -> bool {
        self.street.is_none() && self.ward.is_none()
    }
}

/// Split on commas and trim each segment. Empty segments are kept so that
/// positional lookups stay aligned.
pub fn segments(formatted: &str) -> Vec<&str> {
    formatted.split(',').map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAIGON: &str = "12 Main St, Phường 5, Quận 1, Hồ Chí Minh, Việt Nam";

    #[test]
    fn test_street_before_ward_marker() {
        let parser = FormattedAddressParser::new();
        assert_eq!(parser.street(SAIGON).as_deref(), Some("12 Main St"));
    }

    #[test]
    fn test_street_spans_several_segments() {
        let parser = FormattedAddressParser::new();
        assert_eq!(
            parser
                .street("Tòa nhà A, , 12 Main St, P. 5, Quận 3, Hồ Chí Minh")
                .as_deref(),
            Some("Tòa nhà A, 12 Main St")
        );
    }

    #[test]
    fn test_street_stops_at_district_marker() {
        let parser = FormattedAddressParser::new();
        assert_eq!(
            parser.street("99 Hai Bà Trưng, Quận 1, Hồ Chí Minh").as_deref(),
            Some("99 Hai Bà Trưng")
        );
    }

    #[test]
    fn test_street_without_marker() {
        let parser = FormattedAddressParser::new();
        assert_eq!(parser.street("1600 Amphitheatre Pkwy, Mountain View, CA"), None);
        assert_eq!(parser.street("Phường 5, Quận 1"), None);
    }

    #[test]
    fn test_custom_boundary_marker() {
        let parser = FormattedAddressParser::new().with_street_boundary_marker("Xã");
        assert_eq!(
            parser.street("Thôn 3, Xã Tân Phú, Huyện Đồng Phú").as_deref(),
            Some("Thôn 3")
        );
    }

    #[test]
    fn test_ward_prefers_marker() {
        let parser = FormattedAddressParser::new();
        assert_eq!(parser.ward(SAIGON).as_deref(), Some("Phường 5"));
    }

    #[test]
    fn test_ward_positional_guess() {
        let parser = FormattedAddressParser::new();
        assert_eq!(
            parser
                .ward("12 Lý Thường Kiệt, Hàng Bài, Hoàn Kiếm, Hà Nội, Việt Nam")
                .as_deref(),
            Some("Hàng Bài")
        );
        assert_eq!(
            parser.ward("Bến Thành, Quận 1, Hồ Chí Minh, Việt Nam").as_deref(),
            Some("Bến Thành")
        );
    }

    #[test]
    fn test_ward_short_address_is_none() {
        let parser = FormattedAddressParser::new();
        assert_eq!(parser.ward("Quận 1, Hồ Chí Minh, Việt Nam"), None);
        assert_eq!(parser.ward("Việt Nam"), None);
        assert_eq!(parser.ward(""), None);
    }

    #[test]
    fn test_parse() {
        let parsed = FormattedAddressParser::new().parse(SAIGON);
        assert_eq!(parsed.street.as_deref(), Some("12 Main St"));
        assert_eq!(parsed.ward.as_deref(), Some("Phường 5"));
        assert!(!parsed.is_empty());
        assert!(FormattedAddressParser::new().parse("").is_empty());
    }
}
