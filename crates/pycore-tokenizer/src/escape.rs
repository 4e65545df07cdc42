use std::iter::Peekable;
use std::str::Chars;

/// Decodes backslash escapes in the body of a non-raw string literal.
///
/// Unknown escapes are kept verbatim. Byte strings do not interpret `\u` and
/// `\U`.
pub(crate) fn unescape(body: &str, bytes: bool) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(escaped) = chars.next() else {
            out.push('\\');
            break;
        };

        match escaped {
            '\n' => {}
            '\r' => {
                chars.next_if_eq(&'\n');
            }
            '\\' | '\'' | '"' => out.push(escaped),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'v' => out.push('\x0b'),
            '0'..='7' => {
                let mut value = escaped.to_digit(8).unwrap_or_default();
                for _ in 0..2 {
                    match chars.next_if(|c| c.is_digit(8)) {
                        Some(digit) => value = value * 8 + digit.to_digit(8).unwrap_or_default(),
                        None => break,
                    }
                }
                out.extend(char::from_u32(value));
            }
            'x' => hex_escape(&mut chars, 'x', 2, &mut out),
            'u' if !bytes => hex_escape(&mut chars, 'u', 4, &mut out),
            'U' if !bytes => hex_escape(&mut chars, 'U', 8, &mut out),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    out
}

fn hex_escape(chars: &mut Peekable<Chars<'_>>, marker: char, width: usize, out: &mut String) {
    let mut digits = String::with_capacity(width);
    while digits.len() < width {
        match chars.next_if(char::is_ascii_hexdigit) {
            Some(digit) => digits.push(digit),
            None => break,
        }
    }

    let decoded = (digits.len() == width)
        .then(|| u32::from_str_radix(&digits, 16).ok())
        .flatten()
        .and_then(char::from_u32);

    match decoded {
        Some(c) => out.push(c),
        None => {
            out.push('\\');
            out.push(marker);
            out.push_str(&digits);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::unescape;

    #[test]
    fn simple_escapes() {
        assert_eq!(unescape(r"a\nb\tc", false), "a\nb\tc");
        assert_eq!(unescape(r#"\'\"\\"#, false), "'\"\\");
        assert_eq!(unescape("line\\\ncontinued", false), "linecontinued");
    }

    #[test]
    fn numeric_escapes() {
        assert_eq!(unescape(r"\x41\101\0", false), "AA\0");
        assert_eq!(unescape(r"é\U0001F600", false), "é😀");
        assert_eq!(unescape(r"é", true), r"é");
    }

    #[test]
    fn malformed_escapes_are_kept() {
        assert_eq!(unescape(r"\q", false), r"\q");
        assert_eq!(unescape(r"\x4", false), r"\x4");
        assert_eq!(unescape("\\", false), "\\");
    }
}
