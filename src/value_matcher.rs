//! Whole-word matching of feature names inside raw declaration values

use regex::Regex;
use std::ops::Range;

/// One whole-word occurrence of a matched name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence<'a> {
    pub name: &'a str,
    pub range: Range<usize>,
}

/// A function-call occurrence, `name(args)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call<'a> {
    pub name: &'a str,
    /// From the start of the name to just past the closing parenthesis
    pub range: Range<usize>,
    /// The text between the parentheses
    pub args: Range<usize>,
}

/// Finds names in value text when they stand alone: not preceded or
/// followed by an identifier character or `-`. This keeps `flex` from
/// matching inside `flex-start`, `inline-flex` or `-webkit-flex`.
#[derive(Debug, Clone)]
pub struct ValueMatcher {
    names: Vec<String>,
    regex: Regex,
}

impl ValueMatcher {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        let mut names: Vec<String> = names.iter().map(|name| name.as_ref().to_string()).collect();
        // Longest first so alternation prefers `inline-flex` over `flex`
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        names.dedup();

        let alternation = names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&format!(r"(?:^|[^-\w])({})", alternation)).unwrap();

        Self { names, regex }
    }

    pub fn single(name: &str) -> Self {
        Self::new(&[name])
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn occurrences<'v>(&self, value: &'v str) -> Vec<Occurrence<'v>> {
        self.regex
            .captures_iter(value)
            .filter_map(|caps| caps.get(1))
            .filter(|m| ends_word(value, m.end()))
            .map(|m| Occurrence {
                name: m.as_str(),
                range: m.range(),
            })
            .collect()
    }

    pub fn matches(&self, value: &str) -> bool {
        self.names.iter().any(|name| value.contains(name.as_str()))
            && !self.occurrences(value).is_empty()
    }

    /// Replace every whole-word occurrence with the text `replace` returns for it
    pub fn replace_with<F>(&self, value: &str, mut replace: F) -> String
    where
        F: FnMut(&str) -> String,
    {
        let mut output = String::with_capacity(value.len() + 16);
        let mut last = 0;
        for occurrence in self.occurrences(value) {
            output.push_str(&value[last..occurrence.range.start]);
            output.push_str(&replace(occurrence.name));
            last = occurrence.range.end;
        }
        output.push_str(&value[last..]);
        output
    }

    /// Prepend `prefix` to every whole-word occurrence
    pub fn replace_prefixed(&self, value: &str, prefix: &str) -> String {
        self.replace_with(value, |name| format!("{}{}", prefix, name))
    }

    /// Occurrences directly followed by a balanced argument list
    pub fn calls<'v>(&self, value: &'v str) -> Vec<Call<'v>> {
        self.occurrences(value)
            .into_iter()
            .filter_map(|occurrence| {
                let open = occurrence.range.end;
                if !value[open..].starts_with('(') {
                    return None;
                }
                let close = matching_paren(value, open)?;
                Some(Call {
                    name: occurrence.name,
                    range: occurrence.range.start..close + 1,
                    args: open + 1..close,
                })
            })
            .collect()
    }
}

fn ends_word(value: &str, end: usize) -> bool {
    match value[end..].chars().next() {
        Some(c) => !(c.is_alphanumeric() || c == '_' || c == '-'),
        None => true,
    }
}

/// Index of the `)` closing the `(` at `open`, skipping quoted text
fn matching_paren(value: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (offset, c) in value[open..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }

    None
}

/// Split function arguments on top-level commas, keeping each piece untrimmed
pub fn split_arguments(args: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (index, c) in args.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                pieces.push(&args[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    pieces.push(&args[start..]);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_word_matching() {
        let matcher = ValueMatcher::single("transform");
        assert!(matcher.matches("transform 1s"));
        assert!(matcher.matches("opacity 1s, transform 2s"));
        assert!(!matcher.matches("-webkit-transform 1s"));
        assert!(!matcher.matches("transform-origin 1s"));
        assert!(!matcher.matches("opacity 1s"));
    }

    #[test]
    fn test_prefers_longest_name() {
        let matcher = ValueMatcher::new(&["flex", "inline-flex"]);
        let found: Vec<_> = matcher
            .occurrences("inline-flex")
            .into_iter()
            .map(|o| o.name)
            .collect();
        assert_eq!(found, vec!["inline-flex"]);
        assert!(!matcher.matches("flex-start"));
        assert!(!matcher.matches("-webkit-flex"));
    }

    #[test]
    fn test_replace_prefixed() {
        let matcher = ValueMatcher::single("transform");
        assert_eq!(
            matcher.replace_prefixed("transform 1s, transform 2s", "-moz-"),
            "-moz-transform 1s, -moz-transform 2s"
        );
    }

    #[test]
    fn test_adjacent_occurrences() {
        let matcher = ValueMatcher::single("calc");
        assert_eq!(
            matcher.replace_prefixed("calc(1px) calc(2px)", "-webkit-"),
            "-webkit-calc(1px) -webkit-calc(2px)"
        );
    }

    #[test]
    fn test_calls_with_nested_parentheses() {
        let value = "url(a.png), linear-gradient(rgba(0, 0, 0, 0.5), red)";
        let matcher = ValueMatcher::single("linear-gradient");
        let calls = matcher.calls(value);
        assert_eq!(calls.len(), 1);
        assert_eq!(&value[calls[0].args.clone()], "rgba(0, 0, 0, 0.5), red");
        assert_eq!(calls[0].range.end, value.len());
    }

    #[test]
    fn test_split_arguments() {
        let pieces = split_arguments("to bottom, rgba(0, 0, 0, 1) 10%, 'a,b'");
        assert_eq!(pieces, vec!["to bottom", " rgba(0, 0, 0, 1) 10%", " 'a,b'"]);
    }
}
