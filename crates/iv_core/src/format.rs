//! printf-style number formats for `)format`.
//!
//! One verb per format string, with optional literal text around it:
//! `%d %x %o %b` for integers, `%f %e %g` with optional `.N` precision for floats,
//! `%v` for the natural rendering. An integer printed with a float verb is
//! converted; a float printed with an integer verb falls back to natural form.

use crate::value::natural_float;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberFormat {
    prefix: String,
    verb: char,
    precision: Option<usize>,
    suffix: String,
}

impl NumberFormat {
    /// Parse `fmt`. Returns `None` when it is empty or has no usable verb, in which
    /// case values render naturally.
    pub fn parse(fmt: &str) -> Option<Self> {
        let pct = fmt.find('%')?;
        let rest = &fmt[pct + 1..];
        let mut chars = rest.char_indices().peekable();
        let mut precision = None;
        if let Some((_, '.')) = chars.peek() {
            chars.next();
            let mut digits = String::new();
            while let Some((_, c)) = chars.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                digits.push(*c);
                chars.next();
            }
            precision = Some(digits.parse().unwrap_or(0));
        }
        let (idx, verb) = chars.next()?;
        if !matches!(verb, 'v' | 'd' | 'x' | 'o' | 'b' | 'f' | 'e' | 'g') {
            return None;
        }
        if verb == 'v' && precision.is_none() && pct == 0 && rest.len() == 1 {
            return None;
        }
        Some(Self {
            prefix: fmt[..pct].to_string(),
            verb,
            precision,
            suffix: rest[idx + verb.len_utf8()..].to_string(),
        })
    }

    pub fn int(&self, i: i64) -> String {
        let body = match self.verb {
            'd' | 'v' => itoa::Buffer::new().format(i).to_string(),
            'x' => signed_radix(i, |u| format!("{u:x}")),
            'o' => signed_radix(i, |u| format!("{u:o}")),
            'b' => signed_radix(i, |u| format!("{u:b}")),
            _ => return self.float(i as f64),
        };
        self.wrap(&body)
    }

    pub fn float(&self, f: f64) -> String {
        let body = match self.verb {
            'f' => format!("{:.*}", self.precision.unwrap_or(6), f),
            'e' => exp_form(f, self.precision.unwrap_or(6)),
            'g' | 'v' => match self.precision {
                Some(p) => format!("{:.*}", p, f),
                None => natural_float(f),
            },
            _ => natural_float(f),
        };
        self.wrap(&body)
    }

    fn wrap(&self, body: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + body.len() + self.suffix.len());
        out.push_str(&self.prefix);
        out.push_str(body);
        out.push_str(&self.suffix);
        out
    }
}

fn signed_radix(i: i64, f: impl Fn(u64) -> String) -> String {
    if i < 0 {
        format!("-{}", f(i.unsigned_abs()))
    } else {
        f(i as u64)
    }
}

/// `1.500000e+03` rather than Rust's `1.5e3`.
fn exp_form(f: f64, precision: usize) -> String {
    let s = format!("{:.*e}", precision, f);
    let Some((mantissa, exp)) = s.split_once('e') else {
        return s;
    };
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(d) => ('-', d),
        None => ('+', exp),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}
