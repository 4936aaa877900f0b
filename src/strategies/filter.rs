//! `filter` values written in Internet Explorer's legacy syntax

pub const MS_PREFIX: &str = "-ms-";
pub const MS_FILTER: &str = "-ms-filter";

/// `progid:DXImageTransform...` and `alpha(opacity=...)` values
pub fn is_legacy(value: &str) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    lower.starts_with("progid:")
        || lower.starts_with("alpha(")
        || lower.contains("dximagetransform.microsoft")
}

/// Legacy values only exist as `-ms-filter` with a quoted value, and
/// standard filter functions never take the `-ms-` prefix.
pub fn prefix_declaration(prefix: &str, value: &str) -> Vec<(String, String)> {
    match (is_legacy(value), prefix == MS_PREFIX) {
        (true, true) => vec![(MS_FILTER.to_string(), quote(value.trim()))],
        (false, false) => vec![(format!("{}filter", prefix), value.to_string())],
        _ => Vec::new(),
    }
}

fn quote(value: &str) -> String {
    if value.starts_with('"') || value.starts_with('\'') {
        value.to_string()
    } else {
        format!("\"{}\"", value.replace('"', "'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_value_forces_ms_filter() {
        let value = "progid:DXImageTransform.Microsoft.Alpha(Opacity=50)";
        assert_eq!(
            prefix_declaration("-ms-", value),
            vec![(
                "-ms-filter".to_string(),
                "\"progid:DXImageTransform.Microsoft.Alpha(Opacity=50)\"".to_string()
            )]
        );
        assert!(prefix_declaration("-webkit-", value).is_empty());
    }

    #[test]
    fn test_standard_value() {
        assert_eq!(
            prefix_declaration("-webkit-", "blur(2px)"),
            vec![("-webkit-filter".to_string(), "blur(2px)".to_string())]
        );
        assert!(prefix_declaration("-ms-", "blur(2px)").is_empty());
    }

    #[test]
    fn test_alpha_is_legacy() {
        assert!(is_legacy("alpha(opacity=50)"));
        assert!(!is_legacy("grayscale(100%)"));
    }
}
