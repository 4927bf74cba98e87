//! Static reference data for Vietnamese address canonicalization.
//!
//! Everything here is configuration data rather than logic: marker
//! substrings, the district ordinal-name table, city overrides and the
//! geocoder tag lists consulted for each field.

/// Ward marker ("ward").
pub const WARD_MARKER: &str = "Phường";
/// Commune marker, the rural counterpart of a ward.
pub const COMMUNE_MARKER: &str = "Xã";
/// Abbreviated ward marker as it appears in formatted addresses.
pub const WARD_ABBREVIATION: &str = "P. ";
/// Urban district marker.
pub const DISTRICT_MARKER: &str = "Quận";
/// Rural district marker.
pub const RURAL_DISTRICT_MARKER: &str = "Huyện";
/// District-level town marker.
pub const TOWN_MARKER: &str = "Thị Xã";
/// City marker, used for both centrally governed and provincial cities.
pub const CITY_MARKER: &str = "Thành Phố";
/// Province marker.
pub const PROVINCE_MARKER: &str = "Tỉnh";
/// Lower-case spelling of [`CITY_MARKER`] used by Google.
pub const CITY_MARKER_LOWER: &str = "Thành phố";
/// Lower-case spelling of [`TOWN_MARKER`] used by Google.
pub const TOWN_MARKER_LOWER: &str = "Thị xã";

/// Segments of a formatted address carrying any of these are treated as the
/// start of the administrative suffix when recovering a street.
pub const STREET_BOUNDARY_MARKERS: &[&str] = &[WARD_MARKER, DISTRICT_MARKER, WARD_ABBREVIATION];

/// Markers that mean a district name is already qualified.
pub const DISTRICT_MARKERS: &[&str] = &[
    CITY_MARKER,
    DISTRICT_MARKER,
    RURAL_DISTRICT_MARKER,
    TOWN_MARKER,
    CITY_MARKER_LOWER,
    TOWN_MARKER_LOWER,
];

/// Markers that mean a ward name is already qualified.
pub const WARD_MARKERS: &[&str] = &[WARD_MARKER, COMMUNE_MARKER];

/// Markers that mean a city name is already qualified.
pub const CITY_MARKERS: &[&str] = &[PROVINCE_MARKER, CITY_MARKER, CITY_MARKER_LOWER];

/// Vietnamese cardinal word forms for district numbers, index 0 is district 1.
pub const ORDINAL_NAMES: &[&str] = &[
    "Một",
    "Hai",
    "Ba",
    "Bốn",
    "Năm",
    "Sáu",
    "Bảy",
    "Tám",
    "Chín",
    "Mười",
    "Mười Một",
    "Mười Hai",
];

/// Look up the word form of a district number.
///
/// Returns `None` outside the table range, including zero.
pub fn ordinal_name(number: u32) -> Option<&'static str> {
    let index = usize::try_from(number).ok()?.checked_sub(1)?;
    ORDINAL_NAMES.get(index).copied()
}

/// A known misspelling of Phú Nhuận returned by geocoders.
pub const PHU_NHUAN_MISSPELLING: &str = "Phú Nhuân";
/// Canonical name for the Phú Nhuận district.
pub const PHU_NHUAN_CANONICAL: &str = "Quận Phú Nhuận";

/// Exact-match city overrides as `(raw, canonical)`.
///
/// The five centrally governed cities take the city marker instead of the
/// default province marker.
pub const CITY_OVERRIDES: &[(&str, &str)] = &[
    ("Hồ Chí Minh", "Thành Phố Hồ Chí Minh"),
    ("Thành phố Hồ Chí Minh", "Thành Phố Hồ Chí Minh"),
    ("Hà Nội", "Thành Phố Hà Nội"),
    ("Thành phố Hà Nội", "Thành Phố Hà Nội"),
    ("Hải Phòng", "Thành Phố Hải Phòng"),
    ("Thành phố Hải Phòng", "Thành Phố Hải Phòng"),
    ("Đà Nẵng", "Thành Phố Đà Nẵng"),
    ("Thành phố Đà Nẵng", "Thành Phố Đà Nẵng"),
    ("Cần Thơ", "Thành Phố Cần Thơ"),
    ("Thành phố Cần Thơ", "Thành Phố Cần Thơ"),
    ("Bà Rịa–Vũng Tàu", "Tỉnh Bà Rịa - Vũng Tàu"),
];

/// Country code the canonicalization rules apply to.
pub const VIETNAM_COUNTRY_CODE: &str = "VN";

/// Geocoder tags accepted for each field.
pub mod tags {
    /// House number or named building.
    pub const STREET_NUMBER: &[&str] = &["street_number", "premise"];
    /// Street name or the finest sublocality.
    pub const ROUTE: &[&str] = &["route", "sublocality_level_4"];
    /// Ward.
    pub const WARD: &[&str] = &[
        "administrative_area_level_3",
        "sublocality_level_1",
        "sublocality_level_2",
        "sublocality_level_3",
    ];
    /// District.
    pub const DISTRICT: &[&str] = &["administrative_area_level_2", "locality"];
    /// City or province.
    pub const CITY: &[&str] = &["administrative_area_level_1"];
    /// Country.
    pub const COUNTRY: &[&str] = &["country"];
}
