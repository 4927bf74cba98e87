//! Tag lookup over a geocoder component sequence.

use crate::types::AddressComponent;

/// Which name of a matched component to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameForm {
    /// `long_name`, used for display fields
    Long,
    /// `short_name`, used for the country code
    Short,
}

/// Find the first component carrying any of the requested tags.
///
/// Components are scanned in sequence order, so an earlier component wins
/// over a later one even when the later one carries a tag listed first.
pub fn find<'a>(
    components: &'a [AddressComponent],
    tags: &[&str],
) -> Option<&'a AddressComponent> {
    components
        .iter()
        .find(|component| tags.iter().any(|tag| component.has_type(tag)))
}

/// Look up a name, yielding an empty string when no component matches.
///
/// Absence is normal: geocoders vary which tags they populate per country.
pub fn lookup(components: &[AddressComponent], tags: &[&str], form: NameForm) -> String {
    let found = find(components, tags).map(|component| match form {
        NameForm::Long => component.long_name.trim().to_string(),
        NameForm::Short => component.short_name.trim().to_string(),
    });
    log::trace!("lookup {tags:?} -> {found:?}");
    found.unwrap_or_default()
}

/// Long-name lookup.
pub fn long_name(components: &[AddressComponent], tags: &[&str]) -> String {
    lookup(components, tags, NameForm::Long)
}

/// Short-name lookup.
pub fn short_name(components: &[AddressComponent], tags: &[&str]) -> String {
    lookup(components, tags, NameForm::Short)
}
