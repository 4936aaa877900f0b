//! Prefixed gradients use the legacy direction syntax: the first argument
//! names the side the gradient starts from instead of the one it goes to,
//! and old WebKit measures angles counter-clockwise from the east.

use crate::value_matcher::{split_arguments, ValueMatcher};

pub const WEBKIT_PREFIX: &str = "-webkit-";

pub fn prefix_gradients(matcher: &ValueMatcher, prefix: &str, value: &str) -> String {
    let calls = matcher.calls(value);
    if calls.is_empty() {
        return matcher.replace_prefixed(value, prefix);
    }

    let mut output = String::with_capacity(value.len() + 16);
    let mut last = 0;
    for call in calls {
        output.push_str(&value[last..call.range.start]);
        output.push_str(prefix);
        output.push_str(call.name);
        output.push('(');
        output.push_str(&legacy_arguments(call.name, prefix, &value[call.args.clone()]));
        output.push(')');
        last = call.range.end;
    }
    output.push_str(&value[last..]);
    output
}

fn legacy_arguments(name: &str, prefix: &str, args: &str) -> String {
    let first = split_arguments(args)[0];
    let rest = &args[first.len()..];
    let trimmed = first.trim();

    let converted = from_side(trimmed).or_else(|| {
        if name.ends_with("linear-gradient") && prefix == WEBKIT_PREFIX {
            legacy_angle(trimmed)
        } else {
            None
        }
    });

    match converted {
        Some(direction) => format!("{}{}", direction, rest),
        None => args.to_string(),
    }
}

/// `to bottom right` becomes `top left`
fn from_side(direction: &str) -> Option<String> {
    let mut words = direction.split_whitespace();
    if words.next() != Some("to") {
        return None;
    }

    let sides = words
        .map(|word| match word {
            "top" => Some("bottom"),
            "bottom" => Some("top"),
            "left" => Some("right"),
            "right" => Some("left"),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;

    if sides.is_empty() {
        return None;
    }
    Some(sides.join(" "))
}

/// Past this magnitude `f64` can no longer tell whole degrees apart
const MAX_EXACT_DEGREES: f64 = 1e15;

fn legacy_angle(direction: &str) -> Option<String> {
    let degrees: f64 = direction.strip_suffix("deg")?.parse().ok()?;
    if !degrees.is_finite() || degrees.abs() > MAX_EXACT_DEGREES {
        return None;
    }
    let legacy = (90.0 - degrees).rem_euclid(360.0);
    if legacy.fract() == 0.0 {
        Some(format!("{}deg", legacy as i64))
    } else {
        Some(format!("{}deg", legacy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear() -> ValueMatcher {
        ValueMatcher::single("linear-gradient")
    }

    #[test]
    fn test_to_side_becomes_from_side() {
        assert_eq!(
            prefix_gradients(&linear(), "-webkit-", "linear-gradient(to bottom, red, blue)"),
            "-webkit-linear-gradient(top, red, blue)"
        );
        assert_eq!(
            prefix_gradients(&linear(), "-moz-", "linear-gradient(to top left, red, blue)"),
            "-moz-linear-gradient(bottom right, red, blue)"
        );
    }

    #[test]
    fn test_webkit_angle_is_rotated() {
        assert_eq!(
            prefix_gradients(&linear(), "-webkit-", "linear-gradient(45deg, red, blue)"),
            "-webkit-linear-gradient(45deg, red, blue)"
        );
        assert_eq!(
            prefix_gradients(&linear(), "-webkit-", "linear-gradient(180deg, red, blue)"),
            "-webkit-linear-gradient(270deg, red, blue)"
        );
        assert_eq!(
            prefix_gradients(&linear(), "-webkit-", "linear-gradient(0deg, red, blue)"),
            "-webkit-linear-gradient(90deg, red, blue)"
        );
    }

    #[test]
    fn test_huge_angles_are_left_alone() {
        assert_eq!(
            prefix_gradients(&linear(), "-webkit-", "linear-gradient(1e20deg, red, blue)"),
            "-webkit-linear-gradient(1e20deg, red, blue)"
        );
        assert_eq!(
            prefix_gradients(&linear(), "-webkit-", "linear-gradient(-450deg, red, blue)"),
            "-webkit-linear-gradient(180deg, red, blue)"
        );
    }

    #[test]
    fn test_other_prefixes_keep_angles() {
        assert_eq!(
            prefix_gradients(&linear(), "-moz-", "linear-gradient(180deg, red, blue)"),
            "-moz-linear-gradient(180deg, red, blue)"
        );
    }

    #[test]
    fn test_colors_only_and_surrounding_text() {
        assert_eq!(
            prefix_gradients(&linear(), "-o-", "url(a.png), linear-gradient(red, blue) no-repeat"),
            "url(a.png), -o-linear-gradient(red, blue) no-repeat"
        );
    }

    #[test]
    fn test_radial_gradient_side() {
        let radial = ValueMatcher::single("radial-gradient");
        assert_eq!(
            prefix_gradients(&radial, "-webkit-", "radial-gradient(circle, red, blue)"),
            "-webkit-radial-gradient(circle, red, blue)"
        );
    }
}
