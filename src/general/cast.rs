use std::fmt;
use std::time::SystemTime;

use rosc::{OscTime, OscType};

use crate::error::ConversionError;

// 2^32, the scale of the fractional half of an NTP timestamp
const NTP_FRACTION_SCALE: f64 = 4_294_967_296.0;

/// Explicit OSC type tags understood on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeTag {
    Int,
    Float,
    Str,
    True,
    False,
    Nil,
    Impulse,
    Time,
    Unspecified,
}

impl TypeTag {
    /// Tags that put no bytes on the wire and never look at their token.
    pub fn carries_payload(self) -> bool {
        !matches!(self, TypeTag::True | TypeTag::False | TypeTag::Nil | TypeTag::Impulse)
    }
}

impl TryFrom<char> for TypeTag {
    type Error = ConversionError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'i' => Ok(TypeTag::Int),
            'f' => Ok(TypeTag::Float),
            's' => Ok(TypeTag::Str),
            'T' => Ok(TypeTag::True),
            'F' => Ok(TypeTag::False),
            'N' => Ok(TypeTag::Nil),
            'I' => Ok(TypeTag::Impulse),
            't' => Ok(TypeTag::Time),
            other => Err(ConversionError::UnsupportedTag(other)),
        }
    }
}

/// One typed OSC argument, ready to hand to the encoder.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedArgument {
    Int(i32),
    Float(f32),
    Str(String),
    Bool(bool),
    Nil,
    Impulse,
    Time(OscTime),
}

impl TypedArgument {
    /// The wire type tag for this argument.
    pub fn tag(&self) -> char {
        match self {
            TypedArgument::Int(_) => 'i',
            TypedArgument::Float(_) => 'f',
            TypedArgument::Str(_) => 's',
            TypedArgument::Bool(true) => 'T',
            TypedArgument::Bool(false) => 'F',
            TypedArgument::Nil => 'N',
            TypedArgument::Impulse => 'I',
            TypedArgument::Time(_) => 't',
        }
    }
}

impl fmt::Display for TypedArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedArgument::Int(v) => write!(f, "{}", v),
            TypedArgument::Float(v) => write!(f, "{}", v),
            TypedArgument::Str(s) => write!(f, "{}", s),
            TypedArgument::Bool(b) => write!(f, "{}", b),
            TypedArgument::Nil => write!(f, "nil"),
            TypedArgument::Impulse => write!(f, "impulse"),
            TypedArgument::Time(t) => write!(f, "{}.{:08x}", t.seconds, t.fractional),
        }
    }
}

impl From<TypedArgument> for OscType {
    fn from(arg: TypedArgument) -> Self {
        match arg {
            TypedArgument::Int(v) => OscType::Int(v),
            TypedArgument::Float(v) => OscType::Float(v),
            TypedArgument::Str(s) => OscType::String(s),
            TypedArgument::Bool(b) => OscType::Bool(b),
            TypedArgument::Nil => OscType::Nil,
            TypedArgument::Impulse => OscType::Inf,
            TypedArgument::Time(t) => OscType::Time(t),
        }
    }
}

/// Cast a raw token to the argument demanded by an explicit tag.
pub fn cast(token: &str, tag: TypeTag) -> Result<TypedArgument, ConversionError> {
    match tag {
        TypeTag::Int => token
            .parse::<i32>()
            .map(TypedArgument::Int)
            .map_err(|e| cast_error(token, 'i', e)),
        TypeTag::Float => parse_float(token).map(TypedArgument::Float),
        TypeTag::Str | TypeTag::Unspecified => Ok(TypedArgument::Str(token.to_string())),
        TypeTag::True => Ok(TypedArgument::Bool(true)),
        TypeTag::False => Ok(TypedArgument::Bool(false)),
        TypeTag::Nil => Ok(TypedArgument::Nil),
        TypeTag::Impulse => Ok(TypedArgument::Impulse),
        TypeTag::Time => parse_time(token).map(TypedArgument::Time),
    }
}

/// Parse a float32, refusing finite literals that overflow to infinity.
pub(crate) fn parse_float(token: &str) -> Result<f32, ConversionError> {
    let v = token.parse::<f32>().map_err(|e| cast_error(token, 'f', e))?;
    if !v.is_finite() && !spells_non_finite(token) {
        return Err(cast_error(token, 'f', "out of range for float32"));
    }
    Ok(v)
}

fn spells_non_finite(token: &str) -> bool {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    ["inf", "infinity", "nan"]
        .iter()
        .any(|word| unsigned.eq_ignore_ascii_case(word))
}

/// Empty or `now` means the current time, anything else is NTP seconds since 1900.
fn parse_time(token: &str) -> Result<OscTime, ConversionError> {
    if token.is_empty() || token.eq_ignore_ascii_case("now") {
        return OscTime::try_from(SystemTime::now()).map_err(|e| cast_error(token, 't', e));
    }
    let secs = token.parse::<f64>().map_err(|e| cast_error(token, 't', e))?;
    if !secs.is_finite() || secs < 0.0 || secs >= NTP_FRACTION_SCALE {
        return Err(cast_error(token, 't', "timestamp out of range"));
    }
    let whole = secs.trunc();
    let fractional = ((secs - whole) * NTP_FRACTION_SCALE) as u32;
    Ok(OscTime {
        seconds: whole as u32,
        fractional,
    })
}

fn cast_error(token: &str, tag: char, reason: impl fmt::Display) -> ConversionError {
    ConversionError::Cast {
        token: token.to_string(),
        tag,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_tag_parses_decimal() {
        assert_eq!(cast("7", TypeTag::Int), Ok(TypedArgument::Int(7)));
        assert_eq!(cast("-12", TypeTag::Int), Ok(TypedArgument::Int(-12)));
    }

    #[test]
    fn int_tag_rejects_garbage() {
        let err = cast("abc", TypeTag::Int).unwrap_err();
        assert!(matches!(err, ConversionError::Cast { tag: 'i', .. }));
        assert!(cast("2.5", TypeTag::Int).is_err());
    }

    #[test]
    fn float_tag() {
        assert_eq!(cast("2.5", TypeTag::Float), Ok(TypedArgument::Float(2.5)));
        assert_eq!(cast("3", TypeTag::Float), Ok(TypedArgument::Float(3.0)));
        assert!(matches!(
            cast("two", TypeTag::Float),
            Err(ConversionError::Cast { tag: 'f', .. })
        ));
    }

    #[test]
    fn float_tag_rejects_overflow() {
        assert!(matches!(
            cast("1e39", TypeTag::Float),
            Err(ConversionError::Cast { tag: 'f', .. })
        ));
        assert!(cast("-1e39", TypeTag::Float).is_err());
        assert_eq!(cast("inf", TypeTag::Float), Ok(TypedArgument::Float(f32::INFINITY)));
        assert_eq!(cast("-Infinity", TypeTag::Float), Ok(TypedArgument::Float(f32::NEG_INFINITY)));
        assert!(matches!(cast("NaN", TypeTag::Float), Ok(TypedArgument::Float(v)) if v.is_nan()));
    }

    #[test]
    fn string_tags_pass_token_through() {
        assert_eq!(cast("42", TypeTag::Str), Ok(TypedArgument::Str("42".into())));
        assert_eq!(
            cast("hello", TypeTag::Unspecified),
            Ok(TypedArgument::Str("hello".into()))
        );
    }

    #[test]
    fn no_payload_tags_ignore_token() {
        for token in ["", "garbage", "12", "-x-"] {
            assert_eq!(cast(token, TypeTag::True), Ok(TypedArgument::Bool(true)));
            assert_eq!(cast(token, TypeTag::False), Ok(TypedArgument::Bool(false)));
            assert_eq!(cast(token, TypeTag::Nil), Ok(TypedArgument::Nil));
            assert_eq!(cast(token, TypeTag::Impulse), Ok(TypedArgument::Impulse));
        }
    }

    #[test]
    fn time_tag_reads_ntp_seconds() {
        let arg = cast("3900000000.5", TypeTag::Time).unwrap();
        assert_eq!(
            arg,
            TypedArgument::Time(OscTime {
                seconds: 3_900_000_000,
                fractional: 1 << 31,
            })
        );
        assert!(matches!(cast("now", TypeTag::Time), Ok(TypedArgument::Time(_))));
        assert!(cast("-1", TypeTag::Time).is_err());
        assert!(cast("4294967296", TypeTag::Time).is_err());
        assert!(cast("4294967295.5", TypeTag::Time).is_ok());
        assert!(cast("yesterday", TypeTag::Time).is_err());
    }

    #[test]
    fn unknown_tag_chars_are_rejected() {
        assert_eq!(TypeTag::try_from('b'), Err(ConversionError::UnsupportedTag('b')));
        assert_eq!(TypeTag::try_from('x'), Err(ConversionError::UnsupportedTag('x')));
        assert!("ifsTFNIt".chars().all(|c| TypeTag::try_from(c).is_ok()));
    }

    #[test]
    fn argument_tags_match_wire_tags() {
        let tags: String = [
            TypedArgument::Int(1),
            TypedArgument::Float(1.0),
            TypedArgument::Str("a".into()),
            TypedArgument::Bool(true),
            TypedArgument::Bool(false),
            TypedArgument::Nil,
            TypedArgument::Impulse,
        ]
        .iter()
        .map(TypedArgument::tag)
        .collect();
        assert_eq!(tags, "ifsTFNI");
        assert_eq!(OscType::from(TypedArgument::Impulse), OscType::Inf);
    }
}
