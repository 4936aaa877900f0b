//! Flexible box layout across its three vendor syntaxes
//!
//! * 2009: `display: box` with `box-orient`, `box-flex`, `box-pack`, ...
//!   (`-webkit-` and `-moz-`)
//! * 2012: `display: flexbox` with `flex-pack`, `flex-align`, ... (`-ms-`)
//! * final: the standard names (`-webkit-` and unprefixed)

use crate::value_matcher::ValueMatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexEra {
    Box2009,
    Flexbox2012,
    Final,
}

/// Syntaxes a vendor prefix has to be written in, in output order
pub fn eras(prefix: &str) -> &'static [FlexEra] {
    match prefix {
        "-webkit-" => &[FlexEra::Box2009, FlexEra::Final],
        "-moz-" => &[FlexEra::Box2009],
        "-ms-" => &[FlexEra::Flexbox2012],
        _ => &[],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexProperty {
    Flex,
    Direction,
    Wrap,
    Flow,
    Grow,
    Shrink,
    Basis,
    Order,
    AlignItems,
    AlignSelf,
    AlignContent,
    JustifyContent,
}

impl FlexProperty {
    pub const ALL: [FlexProperty; 12] = [
        Self::Flex,
        Self::Direction,
        Self::Wrap,
        Self::Flow,
        Self::Grow,
        Self::Shrink,
        Self::Basis,
        Self::Order,
        Self::AlignItems,
        Self::AlignSelf,
        Self::AlignContent,
        Self::JustifyContent,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "flex" => Some(Self::Flex),
            "flex-direction" => Some(Self::Direction),
            "flex-wrap" => Some(Self::Wrap),
            "flex-flow" => Some(Self::Flow),
            "flex-grow" => Some(Self::Grow),
            "flex-shrink" => Some(Self::Shrink),
            "flex-basis" => Some(Self::Basis),
            "order" => Some(Self::Order),
            "align-items" => Some(Self::AlignItems),
            "align-self" => Some(Self::AlignSelf),
            "align-content" => Some(Self::AlignContent),
            "justify-content" => Some(Self::JustifyContent),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Flex => "flex",
            Self::Direction => "flex-direction",
            Self::Wrap => "flex-wrap",
            Self::Flow => "flex-flow",
            Self::Grow => "flex-grow",
            Self::Shrink => "flex-shrink",
            Self::Basis => "flex-basis",
            Self::Order => "order",
            Self::AlignItems => "align-items",
            Self::AlignSelf => "align-self",
            Self::AlignContent => "align-content",
            Self::JustifyContent => "justify-content",
        }
    }

    fn box_2009_names(self) -> &'static [&'static str] {
        match self {
            Self::Direction | Self::Flow => &["box-orient", "box-direction"],
            Self::Flex | Self::Grow => &["box-flex"],
            Self::Order => &["box-ordinal-group"],
            Self::AlignItems => &["box-align"],
            Self::JustifyContent => &["box-pack"],
            Self::Wrap | Self::Shrink | Self::Basis | Self::AlignSelf | Self::AlignContent => &[],
        }
    }

    fn flexbox_2012_name(self) -> &'static str {
        match self {
            Self::Flex => "flex",
            Self::Direction => "flex-direction",
            Self::Wrap => "flex-wrap",
            Self::Flow => "flex-flow",
            Self::Grow => "flex-positive",
            Self::Shrink => "flex-negative",
            Self::Basis => "flex-preferred-size",
            Self::Order => "flex-order",
            Self::AlignItems => "flex-align",
            Self::AlignSelf => "flex-item-align",
            Self::AlignContent => "flex-line-pack",
            Self::JustifyContent => "flex-pack",
        }
    }
}

/// Declarations replacing `property: value` for one vendor prefix
pub fn prefix_property(property: FlexProperty, prefix: &str, value: &str) -> Vec<(String, String)> {
    let (value, important) = split_important(value);
    let mut declarations = Vec::new();

    for era in eras(prefix) {
        match era {
            FlexEra::Box2009 => {
                for (name, converted) in box_2009(property, value) {
                    declarations.push((format!("{}{}", prefix, name), format!("{}{}", converted, important)));
                }
            }
            FlexEra::Flexbox2012 => {
                let converted = match property {
                    FlexProperty::AlignItems | FlexProperty::AlignSelf => align_2012(value),
                    FlexProperty::AlignContent | FlexProperty::JustifyContent => pack_2012(value),
                    _ => value.to_string(),
                };
                declarations.push((
                    format!("{}{}", prefix, property.flexbox_2012_name()),
                    format!("{}{}", converted, important),
                ));
            }
            FlexEra::Final => {
                declarations.push((format!("{}{}", prefix, property.name()), format!("{}{}", value, important)));
            }
        }
    }

    declarations
}

/// Every property name `prefix` can produce for `property`
pub fn prefixed_names(property: FlexProperty, prefix: &str) -> Vec<String> {
    let mut names = Vec::new();
    for era in eras(prefix) {
        match era {
            FlexEra::Box2009 => names.extend(
                property
                    .box_2009_names()
                    .iter()
                    .map(|name| format!("{}{}", prefix, name)),
            ),
            FlexEra::Flexbox2012 => names.push(format!("{}{}", prefix, property.flexbox_2012_name())),
            FlexEra::Final => names.push(format!("{}{}", prefix, property.name())),
        }
    }
    names
}

/// Standard property for a 2009 or 2012 name with its prefix stripped
pub fn standard_name(old: &str) -> Option<&'static str> {
    FlexProperty::ALL
        .iter()
        .find(|property| {
            property.box_2009_names().iter().any(|name| *name == old)
                || property.flexbox_2012_name() == old
        })
        .map(|property| property.name())
}

fn box_2009(property: FlexProperty, value: &str) -> Vec<(&'static str, String)> {
    match property {
        FlexProperty::Direction => direction_2009(value.trim()),
        FlexProperty::Flow => value
            .split_whitespace()
            .find(|token| direction_2009(token).len() == 2)
            .map(direction_2009)
            .unwrap_or_default(),
        FlexProperty::Grow => vec![("box-flex", value.to_string())],
        FlexProperty::Flex => {
            let grow = match value.split_whitespace().next() {
                Some("none") | Some("initial") => Some("0".to_string()),
                Some("auto") => Some("1".to_string()),
                Some(token) if token.parse::<f64>().is_ok() => Some(token.to_string()),
                _ => None,
            };
            grow.map(|grow| vec![("box-flex", grow)]).unwrap_or_default()
        }
        // The 2009 ordinal group counts from one, `order` counts from zero
        FlexProperty::Order => value
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|order| order.checked_add(1))
            .map(|group| vec![("box-ordinal-group", group.to_string())])
            .unwrap_or_default(),
        FlexProperty::AlignItems => vec![("box-align", align_2012(value))],
        FlexProperty::JustifyContent => match value.trim() {
            "space-around" => Vec::new(),
            other => vec![("box-pack", pack_2012(other))],
        },
        FlexProperty::Wrap
        | FlexProperty::Shrink
        | FlexProperty::Basis
        | FlexProperty::AlignSelf
        | FlexProperty::AlignContent => Vec::new(),
    }
}

fn direction_2009(direction: &str) -> Vec<(&'static str, String)> {
    let (orient, reverse) = match direction {
        "row" => ("horizontal", "normal"),
        "row-reverse" => ("horizontal", "reverse"),
        "column" => ("vertical", "normal"),
        "column-reverse" => ("vertical", "reverse"),
        _ => return Vec::new(),
    };
    vec![
        ("box-orient", orient.to_string()),
        ("box-direction", reverse.to_string()),
    ]
}

fn align_2012(value: &str) -> String {
    match value.trim() {
        "flex-start" => "start".to_string(),
        "flex-end" => "end".to_string(),
        other => other.to_string(),
    }
}

fn pack_2012(value: &str) -> String {
    match value.trim() {
        "flex-start" => "start".to_string(),
        "flex-end" => "end".to_string(),
        "space-between" => "justify".to_string(),
        "space-around" => "distribute".to_string(),
        other => other.to_string(),
    }
}

/// Rewrite `display: flex` / `display: inline-flex` for one vendor prefix
pub fn prefix_display(matcher: &ValueMatcher, prefix: &str, value: &str) -> Vec<String> {
    eras(prefix)
        .iter()
        .map(|era| matcher.replace_with(value, |name| display_value(*era, prefix, name)))
        .collect()
}

/// Every display keyword `prefix` can produce
pub fn display_names(prefix: &str) -> Vec<String> {
    eras(prefix)
        .iter()
        .flat_map(|era| {
            ["flex", "inline-flex"]
                .into_iter()
                .map(move |name| display_value(*era, prefix, name))
        })
        .collect()
}

fn display_value(era: FlexEra, prefix: &str, name: &str) -> String {
    let inline = name.starts_with("inline-");
    match (era, inline) {
        (FlexEra::Box2009, false) => format!("{}box", prefix),
        (FlexEra::Box2009, true) => format!("{}inline-box", prefix),
        (FlexEra::Flexbox2012, false) => format!("{}flexbox", prefix),
        (FlexEra::Flexbox2012, true) => format!("{}inline-flexbox", prefix),
        (FlexEra::Final, _) => format!("{}{}", prefix, name),
    }
}

fn split_important(value: &str) -> (&str, &str) {
    match value.find("!important") {
        Some(index) => (value[..index].trim_end(), " !important"),
        None => (value, ""),
    }
}
