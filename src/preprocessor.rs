//! Comment pre-pass run before parsing
//!
//! Comments touching a property name before its `:` or sitting next to a
//! `{` confuse declaration boundary detection. Comments inside a name are
//! cut out so the name joins up again; the rest are blanked with spaces so
//! line and column numbers stay put.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disruption {
    Keep,
    Remove,
    Blank,
}

pub fn strip_disruptive_comments(css: &str) -> String {
    let bytes = css.as_bytes();
    let mut output = String::with_capacity(css.len());
    let mut last = 0;
    let mut index = 0;
    let mut quote: Option<u8> = None;

    while index < bytes.len() {
        let byte = bytes[index];

        if let Some(q) = quote {
            if byte == b'\\' {
                index += 2;
                continue;
            }
            if byte == q {
                quote = None;
            }
            index += 1;
            continue;
        }

        match byte {
            b'"' | b'\'' => {
                quote = Some(byte);
                index += 1;
            }
            b'/' if bytes.get(index + 1) == Some(&b'*') => {
                // Unterminated comments are left for the parser to report
                let end = match css[index + 2..].find("*/") {
                    Some(offset) => index + 2 + offset + 2,
                    None => break,
                };

                match classify(css, index, end) {
                    Disruption::Keep => {}
                    Disruption::Remove => {
                        output.push_str(&css[last..index]);
                        last = end;
                    }
                    Disruption::Blank => {
                        output.push_str(&css[last..index]);
                        output.extend(css[index..end].chars().map(|c| if c == '\n' { '\n' } else { ' ' }));
                        last = end;
                    }
                }
                index = end;
            }
            _ => index += 1,
        }
    }

    output.push_str(&css[last..]);
    output
}

fn classify(css: &str, start: usize, end: usize) -> Disruption {
    let before = &css[..start];
    let after = &css[end..];

    let touches_name = before.ends_with(is_name_char) || after.starts_with(is_name_char);
    let opens_declaration = {
        let rest = before.trim_end_matches(is_name_char).trim_end();
        rest.ends_with(';') || rest.ends_with('{')
    };
    let reaches_colon = after.trim_start_matches(is_name_char).trim_start().starts_with(':');

    if touches_name && opens_declaration && reaches_colon {
        if before.ends_with(is_name_char) && after.starts_with(is_name_char) {
            return Disruption::Remove;
        }
        return Disruption::Blank;
    }

    if before.trim_end().ends_with('{') || after.trim_start().starts_with('{') {
        return Disruption::Blank;
    }

    Disruption::Keep
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
