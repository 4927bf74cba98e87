//! Basic usage example for vn-address-rs.
//!
//! This example demonstrates the core functionality of the library:
//! - Normalizing geocoder components into a canonical address
//! - Recovering missing fields from the formatted address
//! - Decoding a geocoding response
//! - Ranking nearby saved addresses
//!
//! Run with: cargo run --example basic_usage

use vn_address_rs::{
    Address, AddressComponent, AddressNormalizer, Error, FieldSource, LatLng, Result, VnAddress,
};

fn print_address(address: &Address) {
    println!("  Street:   {}", address.street);
    println!("  Ward:     {}", address.ward);
    println!("  District: {}", address.district);
    println!("  City:     {}", address.city);
    println!("  Country:  {} ({})", address.country, address.country_code);
}

fn main() -> std::result::Result<(), Error> {
    println!("vn-address-rs Basic Usage Example");
    println!("=================================\n");

    let vn = VnAddress::new();

    // Example 1: Structured components
    println!("1. Structured Components");
    println!("------------------------");

    let components = vec![
        AddressComponent::new("12", &["street_number"]),
        AddressComponent::new("Lê Lợi", &["route"]),
        AddressComponent::new("Bến Nghé", &["administrative_area_level_3", "political"]),
        AddressComponent::new("Quận 1", &["administrative_area_level_2", "political"]),
        AddressComponent::new("Hồ Chí Minh", &["administrative_area_level_1", "political"]),
        AddressComponent::new("Việt Nam", &["country", "political"]).with_short_name("VN"),
    ];
    let address = vn.normalize(&components, "");
    print_address(&address);
    println!();

    // Example 2: Fallback to the formatted address
    println!("2. Formatted-Address Fallback");
    println!("-----------------------------");

    let formatted = "Tòa nhà A, 34 Hẻm 5, P. 5, Quận 12, Hồ Chí Minh, Việt Nam";
    println!("Input: {formatted}");
    let sparse = vec![
        AddressComponent::new("Quận 12", &["administrative_area_level_2"]),
        AddressComponent::new("Việt Nam", &["country"]).with_short_name("VN"),
    ];
    let normalized = AddressNormalizer::new().normalize(&sparse, formatted);
    print_address(&normalized.address);
    if normalized.sources.street == FieldSource::Inferred {
        println!("  (street recovered from the formatted address)");
    }
    println!();

    // Example 3: Geocoding response
    println!("3. Geocoding Response");
    println!("---------------------");

    let json = r#"{
        "status": "OK",
        "results": [{
            "address_components": [
                {"long_name": "Hoàn Kiếm", "short_name": "Hoàn Kiếm", "types": ["administrative_area_level_2"]},
                {"long_name": "Hà Nội", "short_name": "Hà Nội", "types": ["administrative_area_level_1"]},
                {"long_name": "Việt Nam", "short_name": "VN", "types": ["country"]}
            ],
            "formatted_address": "12 Lý Thường Kiệt, Hàng Bài, Hoàn Kiếm, Hà Nội, Việt Nam",
            "geometry": {"location": {"lat": 21.0245, "lng": 105.8532}}
        }]
    }"#;
    if let Some(address) = vn.normalize_json(json)? {
        print_address(&address);
        if let Some(location) = address.location() {
            println!("  Location: {}, {}", location.lat, location.lng);
        }
    }
    println!();

    // Example 4: Nearby addresses
    println!("4. Nearby Addresses");
    println!("-------------------");

    let saved = |id: &str, street: &str, lat: f64, lng: f64| Address {
        id: Some(id.to_string()),
        street: street.to_string(),
        lat: Some(lat),
        lng: Some(lng),
        ..Address::default()
    };
    let home = saved("home", "12 Lê Lợi", 10.7735, 106.7018);
    let others = vec![
        home.clone(),
        saved("office", "1 Nguyễn Huệ", 10.7743, 106.7038),
        saved("market", "Chợ Bến Thành", 10.7725, 106.6980),
        saved("airport", "Tân Sơn Nhất", 10.8185, 106.6588),
    ];

    // Stand-in for a routing service: a crude planar estimate.
    let estimate = |origin: LatLng, destinations: &[LatLng]| -> Result<Vec<Option<f64>>> {
        Ok(destinations
            .iter()
            .map(|d| {
                let dy = (d.lat - origin.lat) * 111_000.0;
                let dx = (d.lng - origin.lng) * 109_000.0;
                Some((dx * dx + dy * dy).sqrt())
            })
            .collect())
    };

    for ranked in vn.nearby(&home, &others, &estimate)? {
        println!(
            "  {:<8} {:>8.0} m  {}",
            ranked.id, ranked.distance_meters, ranked.display_address
        );
    }

    Ok(())
}
