//! Which browser versions need a vendor prefix for which CSS feature

use crate::browsers::Version;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Property,
    Value,
    AtRule,
}

/// Inclusive range of versions of one browser that need the prefix.
/// `last: None` means every later version, including unreleased ones.
#[derive(Debug, Clone, Copy)]
pub struct Need {
    pub browser: &'static str,
    pub first: Version,
    pub last: Option<Version>,
}

#[derive(Debug)]
pub struct FeatureData {
    pub name: &'static str,
    pub kind: FeatureKind,
    pub support: &'static [Need],
    /// Properties a value feature may appear in; `"*"` matches any property
    pub props: &'static [&'static str],
    /// Value names matched inside declaration values; empty means the feature name
    pub values: &'static [&'static str],
    /// Also prefixed inside `transition` and `transition-property` values
    pub transition: bool,
}

const fn v(major: u16, minor: u16) -> Version {
    Version::new(major, minor)
}

const fn range(browser: &'static str, first: Version, last: Version) -> Need {
    Need {
        browser,
        first,
        last: Some(last),
    }
}

const fn since(browser: &'static str, first: Version) -> Need {
    Need {
        browser,
        first,
        last: None,
    }
}

const fn property(name: &'static str, support: &'static [Need], transition: bool) -> FeatureData {
    FeatureData {
        name,
        kind: FeatureKind::Property,
        support,
        props: &[],
        values: &[],
        transition,
    }
}

const fn value(
    name: &'static str,
    support: &'static [Need],
    props: &'static [&'static str],
    values: &'static [&'static str],
) -> FeatureData {
    FeatureData {
        name,
        kind: FeatureKind::Value,
        support,
        props,
        values,
        transition: false,
    }
}

const TRANSITIONS: &[Need] = &[
    range("chrome", v(4, 0), v(25, 0)),
    range("safari", v(3, 1), v(6, 0)),
    range("ios", v(3, 2), v(6, 0)),
    range("android", v(2, 1), v(4, 3)),
    range("bb", v(7, 0), v(7, 0)),
    range("ff", v(4, 0), v(15, 0)),
    range("opera", v(10, 5), v(12, 0)),
];

const TRANSFORMS_2D: &[Need] = &[
    since("chrome", v(4, 0)),
    since("safari", v(3, 1)),
    since("ios", v(3, 2)),
    since("android", v(2, 1)),
    since("bb", v(7, 0)),
    since("opera", v(15, 0)),
    range("ff", v(3, 5), v(15, 0)),
    range("ie", v(9, 0), v(9, 0)),
    range("opera", v(10, 5), v(12, 0)),
];

const TRANSFORMS_3D: &[Need] = &[
    since("chrome", v(12, 0)),
    since("safari", v(4, 0)),
    since("ios", v(3, 2)),
    since("android", v(3, 0)),
    since("bb", v(7, 0)),
    since("opera", v(15, 0)),
    range("ff", v(10, 0), v(15, 0)),
];

const ANIMATIONS: &[Need] = &[
    since("chrome", v(4, 0)),
    since("safari", v(4, 0)),
    since("ios", v(3, 2)),
    since("android", v(2, 1)),
    since("bb", v(7, 0)),
    since("opera", v(15, 0)),
    range("ff", v(5, 0), v(15, 0)),
    range("opera", v(12, 0), v(12, 0)),
];

const BORDER_RADIUS: &[Need] = &[
    range("chrome", v(4, 0), v(4, 0)),
    range("safari", v(3, 1), v(4, 0)),
    range("ios", v(3, 2), v(3, 2)),
    range("android", v(2, 1), v(2, 1)),
    range("ff", v(2, 0), v(3, 6)),
];

const BOX_SHADOW: &[Need] = &[
    range("chrome", v(4, 0), v(9, 0)),
    range("safari", v(3, 1), v(5, 0)),
    range("ios", v(3, 2), v(4, 2)),
    range("android", v(2, 1), v(3, 0)),
    range("bb", v(7, 0), v(7, 0)),
    range("ff", v(3, 5), v(3, 6)),
];

const BOX_SIZING: &[Need] = &[
    range("chrome", v(4, 0), v(9, 0)),
    range("safari", v(3, 1), v(5, 0)),
    range("ios", v(3, 2), v(4, 2)),
    range("android", v(2, 1), v(3, 0)),
    range("bb", v(7, 0), v(7, 0)),
    since("ff", v(2, 0)),
];

const GRADIENTS: &[Need] = &[
    range("chrome", v(10, 0), v(25, 0)),
    range("safari", v(5, 1), v(6, 0)),
    range("ios", v(5, 0), v(6, 0)),
    range("android", v(4, 0), v(4, 3)),
    range("bb", v(10, 0), v(10, 0)),
    range("ff", v(3, 6), v(15, 0)),
    range("opera", v(11, 1), v(12, 0)),
];

const GRADIENT_PROPS: &[&str] = &[
    "background",
    "background-image",
    "border-image",
    "list-style",
    "list-style-image",
    "content",
    "mask-image",
];

const FLEXBOX: &[Need] = &[
    range("chrome", v(4, 0), v(28, 0)),
    since("safari", v(3, 1)),
    since("ios", v(3, 2)),
    since("android", v(2, 1)),
    range("bb", v(7, 0), v(10, 0)),
    range("opera", v(15, 0), v(16, 0)),
    range("ff", v(2, 0), v(21, 0)),
    range("ie", v(10, 0), v(10, 0)),
];

const FILTERS: &[Need] = &[
    since("chrome", v(18, 0)),
    since("safari", v(6, 0)),
    since("ios", v(6, 0)),
    since("android", v(4, 4)),
    range("bb", v(10, 0), v(10, 0)),
    since("opera", v(15, 0)),
    range("ie", v(8, 0), v(9, 0)),
];

const CALC: &[Need] = &[
    range("chrome", v(19, 0), v(25, 0)),
    range("safari", v(6, 0), v(6, 0)),
    range("ios", v(6, 0), v(6, 0)),
    range("ff", v(4, 0), v(15, 0)),
];

const USER_SELECT: &[Need] = &[
    since("chrome", v(6, 0)),
    since("safari", v(3, 1)),
    since("ios", v(3, 2)),
    since("android", v(2, 1)),
    since("bb", v(7, 0)),
    since("opera", v(15, 0)),
    since("ff", v(2, 0)),
    since("ie", v(10, 0)),
];

const HYPHENS: &[Need] = &[
    since("safari", v(5, 1)),
    since("ios", v(4, 2)),
    since("ff", v(6, 0)),
    since("ie", v(10, 0)),
];

const MULTICOLUMN: &[Need] = &[
    since("chrome", v(4, 0)),
    since("safari", v(3, 1)),
    since("ios", v(3, 2)),
    since("android", v(2, 1)),
    since("bb", v(7, 0)),
    since("opera", v(15, 0)),
    since("ff", v(2, 0)),
];

const APPEARANCE: &[Need] = &[
    since("chrome", v(4, 0)),
    since("safari", v(3, 1)),
    since("ios", v(3, 2)),
    since("android", v(2, 1)),
    since("bb", v(7, 0)),
    since("opera", v(15, 0)),
    since("ff", v(2, 0)),
];

const BORDER_IMAGE: &[Need] = &[
    range("chrome", v(4, 0), v(15, 0)),
    range("safari", v(3, 1), v(5, 1)),
    range("ios", v(3, 2), v(5, 0)),
    range("android", v(2, 1), v(4, 3)),
    range("ff", v(3, 5), v(14, 0)),
    range("opera", v(11, 0), v(12, 1)),
];

const BACKGROUND_SIZE: &[Need] = &[
    range("chrome", v(4, 0), v(4, 0)),
    range("safari", v(3, 1), v(4, 0)),
    range("ios", v(3, 2), v(4, 0)),
    range("android", v(2, 1), v(2, 3)),
    range("ff", v(3, 6), v(3, 6)),
    range("opera", v(10, 0), v(10, 5)),
];

const TAB_SIZE: &[Need] = &[since("ff", v(4, 0)), range("opera", v(10, 6), v(12, 1))];

const FONT_FEATURES: &[Need] = &[
    since("chrome", v(16, 0)),
    since("android", v(4, 4)),
    since("opera", v(15, 0)),
    since("ff", v(4, 0)),
];

const TEXT_DECORATION: &[Need] = &[since("ff", v(6, 0))];

const TEXT_SIZE_ADJUST: &[Need] = &[since("ios", v(5, 0))];

const ZOOM_CURSORS: &[Need] = &[
    since("chrome", v(4, 0)),
    since("safari", v(3, 1)),
    range("ff", v(2, 0), v(23, 0)),
];

pub static FEATURES: &[FeatureData] = &[
    // Transitions
    property("transition", TRANSITIONS, false),
    property("transition-property", TRANSITIONS, false),
    property("transition-duration", TRANSITIONS, false),
    property("transition-delay", TRANSITIONS, false),
    property("transition-timing-function", TRANSITIONS, false),
    // Transforms
    property("transform", TRANSFORMS_2D, true),
    property("transform-origin", TRANSFORMS_2D, true),
    property("perspective", TRANSFORMS_3D, true),
    property("perspective-origin", TRANSFORMS_3D, true),
    property("transform-style", TRANSFORMS_3D, false),
    property("backface-visibility", TRANSFORMS_3D, false),
    // Animations
    property("animation", ANIMATIONS, false),
    property("animation-name", ANIMATIONS, false),
    property("animation-duration", ANIMATIONS, false),
    property("animation-delay", ANIMATIONS, false),
    property("animation-direction", ANIMATIONS, false),
    property("animation-fill-mode", ANIMATIONS, false),
    property("animation-iteration-count", ANIMATIONS, false),
    property("animation-play-state", ANIMATIONS, false),
    property("animation-timing-function", ANIMATIONS, false),
    FeatureData {
        name: "@keyframes",
        kind: FeatureKind::AtRule,
        support: ANIMATIONS,
        props: &[],
        values: &[],
        transition: false,
    },
    // Borders and boxes
    property("border-radius", BORDER_RADIUS, true),
    property("border-top-left-radius", BORDER_RADIUS, true),
    property("border-top-right-radius", BORDER_RADIUS, true),
    property("border-bottom-right-radius", BORDER_RADIUS, true),
    property("border-bottom-left-radius", BORDER_RADIUS, true),
    property("box-shadow", BOX_SHADOW, true),
    property("box-sizing", BOX_SIZING, false),
    property("border-image", BORDER_IMAGE, false),
    property("background-size", BACKGROUND_SIZE, false),
    property("background-clip", BACKGROUND_SIZE, false),
    property("background-origin", BACKGROUND_SIZE, false),
    // Gradients
    value("linear-gradient", GRADIENTS, GRADIENT_PROPS, &[]),
    value("repeating-linear-gradient", GRADIENTS, GRADIENT_PROPS, &[]),
    value("radial-gradient", GRADIENTS, GRADIENT_PROPS, &[]),
    value("repeating-radial-gradient", GRADIENTS, GRADIENT_PROPS, &[]),
    // Flexible box layout
    value("display-flex", FLEXBOX, &["display"], &["flex", "inline-flex"]),
    property("flex", FLEXBOX, false),
    property("flex-direction", FLEXBOX, false),
    property("flex-wrap", FLEXBOX, false),
    property("flex-flow", FLEXBOX, false),
    property("flex-grow", FLEXBOX, false),
    property("flex-shrink", FLEXBOX, false),
    property("flex-basis", FLEXBOX, false),
    property("order", FLEXBOX, false),
    property("align-items", FLEXBOX, false),
    property("align-self", FLEXBOX, false),
    property("align-content", FLEXBOX, false),
    property("justify-content", FLEXBOX, false),
    // Filters
    property("filter", FILTERS, true),
    // Values
    value("calc", CALC, &["*"], &[]),
    value("zoom-in", ZOOM_CURSORS, &["cursor"], &[]),
    value("zoom-out", ZOOM_CURSORS, &["cursor"], &[]),
    // Interaction and text
    property("user-select", USER_SELECT, false),
    property("appearance", APPEARANCE, false),
    property("hyphens", HYPHENS, false),
    property("tab-size", TAB_SIZE, false),
    property("font-feature-settings", FONT_FEATURES, false),
    property("font-variant-ligatures", FONT_FEATURES, false),
    property("text-decoration-line", TEXT_DECORATION, false),
    property("text-decoration-style", TEXT_DECORATION, false),
    property("text-decoration-color", TEXT_DECORATION, true),
    property("text-size-adjust", TEXT_SIZE_ADJUST, false),
    // Multi-column layout
    property("columns", MULTICOLUMN, true),
    property("column-width", MULTICOLUMN, true),
    property("column-gap", MULTICOLUMN, true),
    property("column-rule", MULTICOLUMN, true),
    property("column-rule-color", MULTICOLUMN, true),
    property("column-rule-width", MULTICOLUMN, true),
    property("column-rule-style", MULTICOLUMN, false),
    property("column-count", MULTICOLUMN, true),
    property("column-span", MULTICOLUMN, false),
    property("column-fill", MULTICOLUMN, false),
];
