#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UnquoteError {
    #[error("invalid syntax")]
    InvalidSyntax,
    #[error("invalid escape \\{0}")]
    InvalidEscape(char),
    #[error("invalid UTF-8")]
    InvalidUtf8,
}

/// Strip the quotes from a string or raw-string literal and resolve its escapes.
///
/// `"..."` and `'...'` accept the usual backslash escapes (`\n`, `\t`, `\\`, `\"`,
/// `\xHH`, `\ooo`, `\uHHHH`, `\UHHHHHHHH`, ...). `` `...` `` is taken verbatim,
/// with carriage returns dropped.
pub fn unquote(s: &str) -> Result<String, UnquoteError> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 {
        return Err(UnquoteError::InvalidSyntax);
    }
    let quote = bytes[0];
    if bytes[bytes.len() - 1] != quote {
        return Err(UnquoteError::InvalidSyntax);
    }
    let inner = &s[1..s.len() - 1];
    match quote {
        b'`' => {
            if inner.contains('`') {
                return Err(UnquoteError::InvalidSyntax);
            }
            Ok(inner.chars().filter(|&c| c != '\r').collect())
        }
        b'"' | b'\'' => unescape(inner, quote as char),
        _ => Err(UnquoteError::InvalidSyntax),
    }
}

fn unescape(s: &str, quote: char) -> Result<String, UnquoteError> {
    let mut res: Vec<u8> = Vec::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    let mut utf8 = [0u8; 4];
    while let Some(c) = chars.next() {
        if c == quote || c == '\n' {
            return Err(UnquoteError::InvalidSyntax);
        }
        if c != '\\' {
            res.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
            continue;
        }
        let Some(esc) = chars.next() else {
            return Err(UnquoteError::InvalidSyntax);
        };
        match esc {
            'a' => res.push(0x07),
            'b' => res.push(0x08),
            'f' => res.push(0x0c),
            'n' => res.push(b'\n'),
            'r' => res.push(b'\r'),
            't' => res.push(b'\t'),
            'v' => res.push(0x0b),
            '\\' => res.push(b'\\'),
            // Only the enclosing quote may be escaped.
            c if c == quote => res.push(c as u8),
            'x' => res.push(take_radix(&mut chars, 2, 16, esc)? as u8),
            '0'..='7' => {
                let rest = take_radix(&mut chars, 2, 8, esc)?;
                let v = (esc as u32 - '0' as u32) * 64 + rest;
                if v > 0xff {
                    return Err(UnquoteError::InvalidEscape(esc));
                }
                res.push(v as u8);
            }
            'u' | 'U' => {
                let n = if esc == 'u' { 4 } else { 8 };
                let v = take_radix(&mut chars, n, 16, esc)?;
                let ch = char::from_u32(v).ok_or(UnquoteError::InvalidEscape(esc))?;
                res.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
            }
            other => return Err(UnquoteError::InvalidEscape(other)),
        }
    }
    String::from_utf8(res).map_err(|_| UnquoteError::InvalidUtf8)
}

fn take_radix(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    n: usize,
    radix: u32,
    esc: char,
) -> Result<u32, UnquoteError> {
    let mut v = 0u32;
    for _ in 0..n {
        let d = chars
            .next()
            .and_then(|c| c.to_digit(radix))
            .ok_or(UnquoteError::InvalidEscape(esc))?;
        v = v * radix + d;
    }
    Ok(v)
}

/// Double-quote `s`, escaping it so that [`unquote`] gives it back.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\u{0b}' => out.push_str("\\v"),
            c if (c as u32) < 0x80 && c.is_control() => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c if c.is_control() => {
                if (c as u32) <= 0xffff {
                    out.push_str(&format!("\\u{:04x}", c as u32));
                } else {
                    out.push_str(&format!("\\U{:08x}", c as u32));
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
