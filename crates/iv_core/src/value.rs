//! Value representation.
//!
//! Just enough of a value model to carry literals, directive arguments and the
//! results of the line evaluator: machine integers, floats, strings and flat vectors.

use std::fmt;

use crate::format::NumberFormat;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ValueError {
    #[error("bad number syntax: {0}")]
    BadSyntax(String),
    #[error("number out of range: {0}")]
    OutOfRange(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Vector(Vec<Value>),
}

impl Value {
    /// Parse the text of a number token.
    ///
    /// Plain digits and `0x` hex give an `Int`; a fraction or exponent gives a
    /// `Float`. Anything else is a syntax error.
    pub fn parse_number(text: &str) -> Result<Value, ValueError> {
        if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ValueError::BadSyntax(text.to_string()));
            }
            return i64::from_str_radix(hex, 16)
                .map(Value::Int)
                .map_err(|_| ValueError::OutOfRange(text.to_string()));
        }
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            return text
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| ValueError::OutOfRange(text.to_string()));
        }
        let looks_float = text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
        if looks_float && text.bytes().any(|b| b.is_ascii_digit()) {
            if let Ok(f) = text.parse::<f64>() {
                if f.is_finite() {
                    return Ok(Value::Float(f));
                }
                return Err(ValueError::OutOfRange(text.to_string()));
            }
        }
        Err(ValueError::BadSyntax(text.to_string()))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Truth of an integer is "non-zero"; other values are never true.
    pub fn to_bool(&self) -> bool {
        matches!(self, Value::Int(i) if *i != 0)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Vector(_) => "vector",
        }
    }

    /// Render the value using a printf-style format (see [`NumberFormat`]).
    /// An empty format or `%v` gives the natural rendering.
    pub fn format(&self, format: &str) -> String {
        let nf = NumberFormat::parse(format);
        let mut out = String::new();
        self.write_with(&nf, &mut out);
        out
    }

    fn write_with(&self, nf: &Option<NumberFormat>, out: &mut String) {
        match self {
            Value::Int(i) => match nf {
                Some(nf) => out.push_str(&nf.int(*i)),
                None => out.push_str(itoa::Buffer::new().format(*i)),
            },
            Value::Float(f) => match nf {
                Some(nf) => out.push_str(&nf.float(*f)),
                None => out.push_str(&natural_float(*f)),
            },
            Value::Str(s) => out.push_str(s),
            Value::Vector(items) => {
                for (idx, v) in items.iter().enumerate() {
                    if idx > 0 {
                        out.push(' ');
                    }
                    v.write_with(nf, out);
                }
            }
        }
    }
}

pub(crate) fn natural_float(f: f64) -> String {
    let mut buf = ryu::Buffer::new();
    let s = buf.format(f);
    s.strip_suffix(".0").unwrap_or(s).to_string()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(""))
    }
}
