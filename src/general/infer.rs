use crate::general::cast::{parse_float, TypedArgument};

/// Guess the type of an untagged token: int, then float, then string.
///
/// Integer literals too wide for int32 and finite literals that overflow
/// float32 stay strings so the value is never altered on the wire.
pub fn infer(token: &str) -> TypedArgument {
    if let Ok(v) = token.parse::<i32>() {
        return TypedArgument::Int(v);
    }
    if !is_integer_literal(token) {
        if let Ok(v) = parse_float(token) {
            return TypedArgument::Float(v);
        }
    }
    TypedArgument::Str(token.to_string())
}

fn is_integer_literal(token: &str) -> bool {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
