//! Old Firefox spelled corner radii `-moz-border-radius-topleft`

const MOZ_CORNERS: [(&str, &str); 4] = [
    ("border-top-left-radius", "border-radius-topleft"),
    ("border-top-right-radius", "border-radius-topright"),
    ("border-bottom-right-radius", "border-radius-bottomright"),
    ("border-bottom-left-radius", "border-radius-bottomleft"),
];

pub const MOZ_PREFIX: &str = "-moz-";

/// Property name `prefix` uses for the standard `property`
pub fn prefixed_name(prefix: &str, property: &str) -> String {
    if prefix == MOZ_PREFIX {
        if let Some((_, old)) = MOZ_CORNERS.iter().find(|(standard, _)| *standard == property) {
            return format!("{}{}", prefix, old);
        }
    }
    format!("{}{}", prefix, property)
}

/// Standard name for an unprefixed old Firefox corner name
pub fn standard_name(old: &str) -> Option<&'static str> {
    MOZ_CORNERS
        .iter()
        .find(|(_, moz)| *moz == old)
        .map(|(standard, _)| *standard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moz_corner_names() {
        assert_eq!(
            prefixed_name("-moz-", "border-top-left-radius"),
            "-moz-border-radius-topleft"
        );
        assert_eq!(
            prefixed_name("-webkit-", "border-top-left-radius"),
            "-webkit-border-top-left-radius"
        );
        assert_eq!(prefixed_name("-moz-", "border-radius"), "-moz-border-radius");
    }

    #[test]
    fn test_standard_name_round_trip() {
        for (standard, _) in MOZ_CORNERS {
            let prefixed = prefixed_name(MOZ_PREFIX, standard);
            let old = prefixed.trim_start_matches(MOZ_PREFIX);
            assert_eq!(standard_name(old), Some(standard));
        }
        assert_eq!(standard_name("border-radius"), None);
    }
}
