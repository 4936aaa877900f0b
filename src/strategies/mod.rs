//! Per-feature rewrite strategies
//!
//! Most features only need the vendor prefix glued to the property name
//! (or to the matched name inside a value). The few whose vendor history
//! spans incompatible syntaxes get their own variant.

pub mod border_radius;
pub mod filter;
pub mod flexbox;
pub mod gradient;

use crate::value_matcher::ValueMatcher;
use flexbox::FlexProperty;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Default,
    Flex(FlexProperty),
    DisplayFlex,
    BorderRadius,
    Filter,
    Gradient,
}

impl Strategy {
    /// Strategy registered for a feature name
    pub fn for_feature(name: &str) -> Self {
        match name {
            "display-flex" => Self::DisplayFlex,
            "border-radius"
            | "border-top-left-radius"
            | "border-top-right-radius"
            | "border-bottom-right-radius"
            | "border-bottom-left-radius" => Self::BorderRadius,
            "filter" => Self::Filter,
            "linear-gradient"
            | "repeating-linear-gradient"
            | "radial-gradient"
            | "repeating-radial-gradient" => Self::Gradient,
            other => FlexProperty::from_name(other)
                .map(Self::Flex)
                .unwrap_or(Self::Default),
        }
    }

    /// Declarations to insert before `property: value` for one prefix
    pub fn apply_prefix(self, prefix: &str, property: &str, value: &str) -> Vec<(String, String)> {
        match self {
            Self::Flex(flex) => flexbox::prefix_property(flex, prefix, value),
            Self::BorderRadius => vec![(
                border_radius::prefixed_name(prefix, property),
                value.to_string(),
            )],
            Self::Filter => filter::prefix_declaration(prefix, value),
            Self::DisplayFlex | Self::Gradient => Vec::new(),
            Self::Default => vec![(format!("{}{}", prefix, property), value.to_string())],
        }
    }

    /// Property names `prefix` produces for the feature `name`
    pub fn prefixed_names(self, prefix: &str, name: &str) -> Vec<String> {
        match self {
            Self::Flex(flex) => flexbox::prefixed_names(flex, prefix),
            Self::BorderRadius => vec![border_radius::prefixed_name(prefix, name)],
            Self::Filter if prefix == filter::MS_PREFIX => vec![filter::MS_FILTER.to_string()],
            Self::DisplayFlex | Self::Gradient => Vec::new(),
            Self::Filter | Self::Default => vec![format!("{}{}", prefix, name)],
        }
    }

    /// Candidate values for one prefix. Several candidates mean several
    /// sibling declarations, in output order.
    pub fn apply_value_prefix(self, matcher: &ValueMatcher, prefix: &str, value: &str) -> Vec<String> {
        match self {
            Self::DisplayFlex => flexbox::prefix_display(matcher, prefix, value),
            Self::Gradient => vec![gradient::prefix_gradients(matcher, prefix, value)],
            Self::BorderRadius => vec![matcher.replace_with(value, |name| {
                border_radius::prefixed_name(prefix, name)
            })],
            // -ms-filter never appears inside a transition list
            Self::Filter if prefix == filter::MS_PREFIX => vec![value.to_string()],
            Self::Filter | Self::Flex(_) | Self::Default => vec![matcher.replace_prefixed(value, prefix)],
        }
    }

    /// Value names `prefix` produces for the given bare names
    pub fn prefixed_value_names(self, prefix: &str, names: &[String]) -> Vec<String> {
        match self {
            Self::DisplayFlex => flexbox::display_names(prefix),
            Self::BorderRadius => names
                .iter()
                .map(|name| border_radius::prefixed_name(prefix, name))
                .collect(),
            _ => names.iter().map(|name| format!("{}{}", prefix, name)).collect(),
        }
    }
}

/// Standard property for a legacy name whose vendor prefix was already stripped
pub fn standard_property(stripped: &str) -> Option<&'static str> {
    border_radius::standard_name(stripped).or_else(|| flexbox::standard_name(stripped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry() {
        assert_eq!(Strategy::for_feature("transition"), Strategy::Default);
        assert_eq!(Strategy::for_feature("order"), Strategy::Flex(FlexProperty::Order));
        assert_eq!(Strategy::for_feature("display-flex"), Strategy::DisplayFlex);
        assert_eq!(Strategy::for_feature("border-top-left-radius"), Strategy::BorderRadius);
        assert_eq!(Strategy::for_feature("radial-gradient"), Strategy::Gradient);
        assert_eq!(Strategy::for_feature("filter"), Strategy::Filter);
    }

    #[test]
    fn test_default_prefix() {
        assert_eq!(
            Strategy::Default.apply_prefix("-moz-", "box-sizing", "border-box"),
            vec![("-moz-box-sizing".to_string(), "border-box".to_string())]
        );
        assert_eq!(
            Strategy::Default.prefixed_names("-o-", "transition"),
            vec!["-o-transition".to_string()]
        );
    }

    #[test]
    fn test_transition_values() {
        let matcher = ValueMatcher::single("border-top-left-radius");
        assert_eq!(
            Strategy::BorderRadius.apply_value_prefix(&matcher, "-moz-", "border-top-left-radius 1s"),
            vec!["-moz-border-radius-topleft 1s".to_string()]
        );

        let matcher = ValueMatcher::single("filter");
        assert_eq!(
            Strategy::Filter.apply_value_prefix(&matcher, "-ms-", "filter 1s"),
            vec!["filter 1s".to_string()]
        );
    }

    #[test]
    fn test_display_value_names() {
        let names = vec!["flex".to_string(), "inline-flex".to_string()];
        assert_eq!(
            Strategy::DisplayFlex.prefixed_value_names("-ms-", &names),
            vec!["-ms-flexbox".to_string(), "-ms-inline-flexbox".to_string()]
        );
    }

    #[test]
    fn test_standard_property() {
        assert_eq!(standard_property("border-radius-bottomleft"), Some("border-bottom-left-radius"));
        assert_eq!(standard_property("box-pack"), Some("justify-content"));
        assert_eq!(standard_property("transition"), None);
    }
}
