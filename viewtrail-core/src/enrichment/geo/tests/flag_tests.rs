use crate::enrichment::geo::flag_emoji;
use pretty_assertions::assert_eq;

#[test]
fn known_codes_map_to_regional_indicators() {
    assert_eq!(flag_emoji("US").as_deref(), Some("🇺🇸"));
    assert_eq!(flag_emoji("de").as_deref(), Some("🇩🇪"));
    assert_eq!(flag_emoji("XK").as_deref(), Some("🇽🇰"));
}

#[test]
fn unknown_codes_have_no_flag() {
    assert_eq!(flag_emoji("ZZ"), None);
    assert_eq!(flag_emoji(""), None);
    assert_eq!(flag_emoji("USA"), None);
    assert_eq!(flag_emoji("1A"), None);
}
