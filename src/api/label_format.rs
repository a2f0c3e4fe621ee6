use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// printf-style value format with exactly one numeric conversion,
/// e.g. `"%0.2f"`, `"%+.1e eV"` or `"%d"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LabelFormat {
    source: String,
    prefix: String,
    suffix: String,
    spec: ConversionSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ConversionSpec {
    left_justify: bool,
    force_sign: bool,
    space_sign: bool,
    zero_pad: bool,
    alternate: bool,
    width: usize,
    precision: Option<usize>,
    conversion: Conversion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Conversion {
    #[default]
    Fixed,
    Exponent { upper: bool },
    General { upper: bool },
    Integer,
}

impl LabelFormat {
    pub fn parse(format: &str) -> ChartResult<Self> {
        let invalid = |reason: &str| ChartError::InvalidLabelFormat {
            format: format.to_owned(),
            reason: reason.to_owned(),
        };

        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut spec: Option<ConversionSpec> = None;
        let mut chars = format.chars().peekable();

        while let Some(ch) = chars.next() {
            let literal = if spec.is_some() { &mut suffix } else { &mut prefix };
            if ch != '%' {
                literal.push(ch);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                literal.push('%');
                continue;
            }
            if spec.is_some() {
                return Err(invalid("more than one conversion"));
            }

            let mut parsed = ConversionSpec::default();
            while let Some(&flag) = chars.peek() {
                match flag {
                    '-' => parsed.left_justify = true,
                    '+' => parsed.force_sign = true,
                    ' ' => parsed.space_sign = true,
                    '0' => parsed.zero_pad = true,
                    '#' => parsed.alternate = true,
                    _ => break,
                }
                chars.next();
            }
            parsed.width = take_number(&mut chars).map_err(invalid)?;
            if chars.peek() == Some(&'.') {
                chars.next();
                parsed.precision =
                    Some(take_number(&mut chars).map_err(invalid)?);
            }
            parsed.conversion = match chars.next() {
                Some('f' | 'F') => Conversion::Fixed,
                Some('e') => Conversion::Exponent { upper: false },
                Some('E') => Conversion::Exponent { upper: true },
                Some('g') => Conversion::General { upper: false },
                Some('G') => Conversion::General { upper: true },
                Some('d' | 'i') => Conversion::Integer,
                Some(_) => return Err(invalid("unsupported conversion")),
                None => return Err(invalid("incomplete conversion")),
            };
            spec = Some(parsed);
        }

        let spec = spec.ok_or_else(|| invalid("missing numeric conversion"))?;
        Ok(Self {
            source: format.to_owned(),
            prefix,
            suffix,
            spec,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        format!("{}{}{}", self.prefix, self.spec.render(value), self.suffix)
    }
}

impl Default for LabelFormat {
    fn default() -> Self {
        Self {
            source: "%0.2f".to_owned(),
            prefix: String::new(),
            suffix: String::new(),
            spec: ConversionSpec {
                zero_pad: true,
                precision: Some(2),
                ..ConversionSpec::default()
            },
        }
    }
}

impl FromStr for LabelFormat {
    type Err = ChartError;

    fn from_str(format: &str) -> ChartResult<Self> {
        Self::parse(format)
    }
}

impl TryFrom<String> for LabelFormat {
    type Error = ChartError;

    fn try_from(format: String) -> ChartResult<Self> {
        Self::parse(&format)
    }
}

impl From<LabelFormat> for String {
    fn from(format: LabelFormat) -> Self {
        format.source
    }
}

impl fmt::Display for LabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// One-shot convenience over [`LabelFormat::parse`] + [`LabelFormat::format`].
pub fn format_value(format: &str, value: f64) -> ChartResult<String> {
    Ok(LabelFormat::parse(format)?.format(value))
}

impl ConversionSpec {
    fn render(self, value: f64) -> String {
        if !value.is_finite() {
            let body = if value.is_nan() { "nan" } else { "inf" };
            return self.pad(value.is_sign_negative() && !value.is_nan(), body.to_owned(), false);
        }

        let negative = value.is_sign_negative();
        let magnitude = value.abs();
        let body = match self.conversion {
            Conversion::Fixed => {
                let body = format!("{:.*}", self.precision.unwrap_or(6), magnitude);
                if self.alternate && self.precision == Some(0) {
                    format!("{body}.")
                } else {
                    body
                }
            }
            Conversion::Exponent { upper } => {
                exponent_body(magnitude, self.precision.unwrap_or(6), upper)
            }
            Conversion::General { upper } => self.general_body(magnitude, upper),
            Conversion::Integer => format!("{}", magnitude.trunc()),
        };
        // printf drops the sign of values that truncate to integer zero.
        let negative = match self.conversion {
            Conversion::Integer => negative && magnitude.trunc() > 0.0,
            _ => negative,
        };
        self.pad(negative, body, true)
    }

    fn general_body(self, magnitude: f64, upper: bool) -> String {
        let precision = match self.precision {
            Some(0) => 1,
            Some(precision) => precision,
            None => 6,
        };
        let exponent = if magnitude == 0.0 {
            0
        } else {
            decimal_exponent(magnitude, precision - 1)
        };

        let body = if exponent < -4 || exponent >= precision as i32 {
            exponent_body(magnitude, precision - 1, upper)
        } else {
            let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
            format!("{magnitude:.decimals$}")
        };
        if self.alternate {
            body
        } else {
            strip_trailing_zeros(&body)
        }
    }

    fn pad(self, negative: bool, body: String, numeric: bool) -> String {
        let sign = if negative {
            "-"
        } else if self.force_sign {
            "+"
        } else if self.space_sign {
            " "
        } else {
            ""
        };
        let used = sign.len() + body.len();
        let fill = self.width.saturating_sub(used);
        if fill == 0 {
            format!("{sign}{body}")
        } else if self.left_justify {
            format!("{sign}{body}{}", " ".repeat(fill))
        } else if self.zero_pad && numeric {
            format!("{sign}{}{body}", "0".repeat(fill))
        } else {
            format!("{}{sign}{body}", " ".repeat(fill))
        }
    }
}

/// Largest accepted width or precision in a conversion.
pub const MAX_FORMAT_FIELD: usize = 64;

/// Reads a width or precision field; an absent field reads as 0.
fn take_number(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<usize, &'static str> {
    let mut value: usize = 0;
    while let Some(&digit) = chars.peek() {
        let Some(digit) = digit.to_digit(10) else {
            break;
        };
        chars.next();
        value = value
            .checked_mul(10)
            .and_then(|value| value.checked_add(digit as usize))
            .unwrap_or(usize::MAX);
    }
    if value > MAX_FORMAT_FIELD {
        return Err("width or precision out of range");
    }
    Ok(value)
}

/// Exponent of `magnitude` after rounding to `decimals` mantissa digits.
fn decimal_exponent(magnitude: f64, decimals: usize) -> i32 {
    let rendered = format!("{magnitude:.decimals$e}");
    rendered
        .split_once('e')
        .and_then(|(_, exponent)| exponent.parse().ok())
        .unwrap_or(0)
}

fn exponent_body(magnitude: f64, decimals: usize, upper: bool) -> String {
    let rendered = format!("{magnitude:.decimals$e}");
    let (mantissa, exponent) = rendered.split_once('e').unwrap_or((rendered.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let marker = if upper { 'E' } else { 'e' };
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}{marker}{sign}{:02}", exponent.abs())
}

fn strip_trailing_zeros(body: &str) -> String {
    match body.split_once(['e', 'E']) {
        Some((mantissa, _)) => {
            let exponent = &body[mantissa.len()..];
            format!("{}{exponent}", trim_fraction(mantissa))
        }
        None => trim_fraction(body).to_owned(),
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format_matches_two_decimal_printf() {
        let format = LabelFormat::default();
        assert_eq!(format, LabelFormat::parse("%0.2f").expect("parse"));
        assert_eq!(format.format(-0.5), "-0.50");
        assert_eq!(format.format(5.7 - 5.5), "0.20");
    }

    #[test]
    fn general_conversion_switches_to_exponent() {
        assert_eq!(format_value("%g", 0.0001).expect("fmt"), "0.0001");
        assert_eq!(format_value("%g", 0.00001).expect("fmt"), "1e-05");
        assert_eq!(format_value("%.3g", 1234.5).expect("fmt"), "1.23e+03");
        assert_eq!(format_value("%g", 2.5).expect("fmt"), "2.5");
    }
}
