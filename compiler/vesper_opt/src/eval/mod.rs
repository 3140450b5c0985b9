//! Compile-time evaluation of builtin type constructors.
//!
//! Each `eval_*` function takes the present operands (constants, in slot
//! order) and either produces the constructed value, reports the fault the
//! runtime would raise, or declines with `Unsupported` when the result is
//! not computable at compile time. Fault kinds and messages mirror the
//! target runtime exactly; a folded error must read the same as a runtime
//! one.

use vesper_ir::{ConstValue, FaultKind, FoldError, FoldFault, FoldResult};

fn type_fault(message: impl Into<String>) -> FoldError {
    FoldFault::type_fault(message).into()
}

fn value_fault(message: impl Into<String>) -> FoldError {
    FoldFault::value_fault(message).into()
}

/// Numeric widening to `f64`. Bools widen, complex does not.
#[allow(clippy::cast_precision_loss)]
fn numeric_as_f64(value: &ConstValue) -> Option<f64> {
    match value {
        ConstValue::True => Some(1.0),
        ConstValue::False => Some(0.0),
        ConstValue::Int(n) => Some(*n as f64),
        ConstValue::BigInt(n) => Some(*n as f64),
        ConstValue::Float(f) => Some(*f),
        _ => None,
    }
}

fn iterated_elements(value: &ConstValue) -> Result<Vec<ConstValue>, FoldError> {
    match value.iteration_elements() {
        Some(elements) => Ok(elements),
        None => Err(FoldFault::not_iterable(value).into()),
    }
}

// Container constructors

pub fn eval_tuple(args: &[ConstValue]) -> FoldResult {
    match args {
        [] => Ok(ConstValue::tuple(Vec::new())),
        [value] => Ok(ConstValue::tuple(iterated_elements(value)?)),
        _ => Err(FoldError::Unsupported),
    }
}

pub fn eval_list(args: &[ConstValue]) -> FoldResult {
    match args {
        [] => Ok(ConstValue::list(Vec::new())),
        [value] => Ok(ConstValue::list(iterated_elements(value)?)),
        _ => Err(FoldError::Unsupported),
    }
}

pub fn eval_set(args: &[ConstValue]) -> FoldResult {
    match args {
        [] => Ok(ConstValue::set(Vec::new())),
        [value] => {
            let elements = iterated_elements(value)?;
            if let Some(unhashable) = elements.iter().find(|e| !e.is_hashable()) {
                return Err(type_fault(format!(
                    "unhashable type: '{}'",
                    unhashable.type_name()
                )));
            }
            Ok(ConstValue::set(elements))
        }
        _ => Err(FoldError::Unsupported),
    }
}

// Scalar constructors

pub fn eval_bool(args: &[ConstValue]) -> FoldResult {
    match args {
        [] => Ok(ConstValue::False),
        [value] => Ok(ConstValue::from_bool(value.truth_value())),
        _ => Err(FoldError::Unsupported),
    }
}

pub fn eval_float(args: &[ConstValue]) -> FoldResult {
    match args {
        [] => Ok(ConstValue::float(0.0)),
        [ConstValue::Str(text)] => {
            let trimmed = text.trim();
            // Underscore grouping follows the integer literal grammar.
            let parsed = if trimmed.contains('_') {
                strip_numeric_underscores(trimmed).and_then(|clean| clean.parse::<f64>().ok())
            } else {
                trimmed.parse::<f64>().ok()
            };
            match parsed {
                Some(f) => Ok(ConstValue::float(f)),
                None => Err(value_fault(format!(
                    "could not convert string to float: '{}'",
                    text.as_str()
                ))),
            }
        }
        [value] => match numeric_as_f64(value) {
            Some(f) => Ok(ConstValue::float(f)),
            None => Err(type_fault(format!(
                "float() argument must be a number or a text string, not '{}'",
                value.type_name()
            ))),
        },
        _ => Err(FoldError::Unsupported),
    }
}

#[derive(Copy, Clone)]
enum IntWidth {
    Machine,
    Big,
}

fn finish_int(n: i128, width: IntWidth) -> ConstValue {
    match width {
        IntWidth::Machine => match i64::try_from(n) {
            Ok(narrow) => ConstValue::int(narrow),
            Err(_) => ConstValue::big_int(n),
        },
        IntWidth::Big => ConstValue::big_int(n),
    }
}

pub fn eval_int(args: &[ConstValue]) -> FoldResult {
    eval_int_like(args, IntWidth::Machine)
}

pub fn eval_big_int(args: &[ConstValue]) -> FoldResult {
    eval_int_like(args, IntWidth::Big)
}

fn eval_int_like(args: &[ConstValue], width: IntWidth) -> FoldResult {
    let (value, base) = match args {
        [] => return Ok(finish_int(0, width)),
        [value] => (value, None),
        [value, base] => (value, Some(base)),
        _ => return Err(FoldError::Unsupported),
    };

    if let Some(base) = base {
        let radix = match base {
            ConstValue::True | ConstValue::False | ConstValue::Int(_) | ConstValue::BigInt(_) => {
                match base.integer_value() {
                    Some(b) => b,
                    None => return Err(FoldError::Unsupported),
                }
            }
            other => {
                return Err(type_fault(format!(
                    "'{}' object cannot be interpreted as an integer",
                    other.type_name()
                )))
            }
        };
        if radix != 0 && !(2..=36).contains(&radix) {
            return Err(value_fault("int() base must be >= 2 and <= 36, or 0"));
        }
        let text = match int_source_text(value) {
            Some(text) => text,
            None => return Err(type_fault("int() can't convert non-string with explicit base")),
        };
        return Ok(finish_int(parse_int_text(text, radix)?, width));
    }

    match value {
        ConstValue::Str(_) | ConstValue::ByteStr(_) | ConstValue::Bytes(_) => {
            match int_source_text(value) {
                Some(text) => Ok(finish_int(parse_int_text(text, 10)?, width)),
                // Non-ascii bytes cannot spell an integer literal.
                None => Err(value_fault(format!(
                    "invalid literal for int() with base 10: {}",
                    value.repr()
                ))),
            }
        }
        ConstValue::True | ConstValue::False | ConstValue::Int(_) | ConstValue::BigInt(_) => {
            match value.integer_value() {
                Some(n) => Ok(finish_int(n, width)),
                None => Err(FoldError::Unsupported),
            }
        }
        ConstValue::Float(f) => {
            if f.is_infinite() {
                return Err(FoldFault::new(
                    FaultKind::Overflow,
                    "cannot convert float infinity to integer",
                )
                .into());
            }
            if f.is_nan() {
                return Err(value_fault("cannot convert float NaN to integer"));
            }
            match value.integer_value() {
                Some(n) => Ok(finish_int(n, width)),
                // Magnitude exceeds the widest supported integer.
                None => Err(FoldError::Unsupported),
            }
        }
        ConstValue::Complex { .. } => Err(type_fault("can't convert complex to int")),
        other => Err(type_fault(format!(
            "int() argument must be a text string, a bytes-like object or a number, not '{}'",
            other.type_name()
        ))),
    }
}

/// Remove digit-group underscores from a numeric literal. Every numeric
/// constructor accepts the same grouping: each underscore must sit
/// directly between two digits, anything else rejects the text.
fn strip_numeric_underscores(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut prev_digit = false;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '_' {
            if !prev_digit || !chars.peek().is_some_and(char::is_ascii_digit) {
                return None;
            }
            prev_digit = false;
            continue;
        }
        prev_digit = c.is_ascii_digit();
        out.push(c);
    }
    Some(out)
}

/// The text behind a string-ish integer operand, if it has one.
fn int_source_text(value: &ConstValue) -> Option<&str> {
    match value {
        ConstValue::Str(text) => Some(text.as_str()),
        ConstValue::ByteStr(bytes) | ConstValue::Bytes(bytes) => std::str::from_utf8(bytes).ok(),
        _ => None,
    }
}

/// Parse an integer literal the way the target runtime does: optional
/// surrounding whitespace, optional sign, radix prefixes for bases 2, 8
/// and 16 (and base 0 inference), underscores between digits. Values
/// beyond 128-bit range decline the fold instead of faulting, since the
/// runtime itself would accept them.
fn parse_int_text(original: &str, base: i128) -> Result<i128, FoldError> {
    let invalid = || {
        FoldError::from(FoldFault::value_fault(format!(
            "invalid literal for int() with base {base}: '{original}'"
        )))
    };

    let trimmed = original.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let prefix_radix = match unsigned.as_bytes() {
        [b'0', b'x' | b'X', ..] => Some(16),
        [b'0', b'o' | b'O', ..] => Some(8),
        [b'0', b'b' | b'B', ..] => Some(2),
        _ => None,
    };

    let mut radix = base;
    let mut digits = unsigned;
    let mut stripped_prefix = false;
    match (base, prefix_radix) {
        (0, Some(r)) => {
            radix = r;
            digits = &unsigned[2..];
            stripped_prefix = true;
        }
        (0, None) => {
            radix = 10;
            // A plain leading zero only spells zero itself.
            if unsigned.starts_with('0') && unsigned.chars().any(|c| c != '0' && c != '_') {
                return Err(invalid());
            }
        }
        (b, Some(r)) if b == r => {
            digits = &unsigned[2..];
            stripped_prefix = true;
        }
        _ => {}
    }

    let mut value: i128 = 0;
    let mut any_digit = false;
    let mut prev_underscore = false;
    for c in digits.chars() {
        if c == '_' {
            if prev_underscore || (!any_digit && !stripped_prefix) {
                return Err(invalid());
            }
            prev_underscore = true;
            continue;
        }
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let Some(digit) = c.to_digit(radix as u32) else {
            return Err(invalid());
        };
        value = value
            .checked_mul(radix)
            .and_then(|v| v.checked_add(i128::from(digit)))
            .ok_or(FoldError::Unsupported)?;
        any_digit = true;
        prev_underscore = false;
    }
    if !any_digit || prev_underscore {
        return Err(invalid());
    }
    Ok(if negative { -value } else { value })
}

// Text constructors

pub fn eval_text(args: &[ConstValue]) -> FoldResult {
    match args {
        [] => Ok(ConstValue::str("")),
        [value] => match value.text_repr() {
            Some(text) => Ok(ConstValue::str(text)),
            // No text form under the narrow codec; the runtime decides.
            None => Err(FoldError::Unsupported),
        },
        _ => Err(FoldError::Unsupported),
    }
}

#[derive(Copy, Clone)]
enum ErrorHandler {
    Strict,
    Ignore,
    Replace,
}

pub fn eval_decode(args: &[ConstValue]) -> FoldResult {
    let (value, encoding, errors) = match args {
        [value] => (value, None, None),
        [value, encoding] => (value, Some(encoding), None),
        [value, encoding, errors] => (value, Some(encoding), Some(errors)),
        _ => return Err(FoldError::Unsupported),
    };

    let payload: &[u8] = match value {
        ConstValue::ByteStr(bytes) | ConstValue::Bytes(bytes) => bytes,
        other => {
            return Err(type_fault(format!(
                "decode() argument must be a byte string, not '{}'",
                other.type_name()
            )))
        }
    };
    let encoding_name = match encoding {
        None => "utf-8",
        Some(ConstValue::Str(name)) => name.as_str(),
        Some(other) => {
            return Err(type_fault(format!(
                "decode() argument 'encoding' must be text, not '{}'",
                other.type_name()
            )))
        }
    };
    let handler = match errors {
        None => ErrorHandler::Strict,
        Some(ConstValue::Str(name)) => match name.as_str() {
            "strict" => ErrorHandler::Strict,
            "ignore" => ErrorHandler::Ignore,
            "replace" => ErrorHandler::Replace,
            // The handler registry is open; unknown names stay runtime.
            _ => return Err(FoldError::Unsupported),
        },
        Some(other) => {
            return Err(type_fault(format!(
                "decode() argument 'errors' must be text, not '{}'",
                other.type_name()
            )))
        }
    };

    let normalized = encoding_name.to_ascii_lowercase().replace('_', "-");
    let decoded = match normalized.as_str() {
        "ascii" | "us-ascii" => decode_ascii(payload, handler),
        "utf-8" | "utf8" => decode_utf8(payload, handler),
        "latin-1" | "latin1" | "iso-8859-1" => Ok(payload.iter().map(|&b| char::from(b)).collect()),
        // The codec registry is open too, but an unknown name is still an
        // error the runtime will raise.
        _ => return Err(value_fault(format!("unknown encoding: {encoding_name}"))),
    };
    Ok(ConstValue::str(decoded?))
}

fn decode_ascii(payload: &[u8], handler: ErrorHandler) -> Result<String, FoldError> {
    let mut out = String::with_capacity(payload.len());
    for (position, &byte) in payload.iter().enumerate() {
        if byte.is_ascii() {
            out.push(char::from(byte));
            continue;
        }
        match handler {
            ErrorHandler::Strict => {
                return Err(FoldFault::new(
                    FaultKind::Decode,
                    format!(
                        "'ascii' codec can't decode byte 0x{byte:02x} in position {position}: \
                         ordinal not in range(128)"
                    ),
                )
                .into())
            }
            ErrorHandler::Ignore => {}
            ErrorHandler::Replace => out.push('\u{fffd}'),
        }
    }
    Ok(out)
}

fn decode_utf8(payload: &[u8], handler: ErrorHandler) -> Result<String, FoldError> {
    let mut out = String::with_capacity(payload.len());
    let mut rest = payload;
    let mut consumed = 0;
    loop {
        match std::str::from_utf8(rest) {
            Ok(tail) => {
                out.push_str(tail);
                return Ok(out);
            }
            Err(err) => {
                let valid = err.valid_up_to();
                let (head, bad) = rest.split_at(valid);
                if let Ok(text) = std::str::from_utf8(head) {
                    out.push_str(text);
                }
                match handler {
                    ErrorHandler::Strict => {
                        return Err(FoldFault::new(
                            FaultKind::Decode,
                            format!(
                                "'utf-8' codec can't decode byte 0x{:02x} in position {}: \
                                 invalid start byte",
                                bad[0],
                                consumed + valid
                            ),
                        )
                        .into())
                    }
                    ErrorHandler::Ignore => {}
                    ErrorHandler::Replace => out.push('\u{fffd}'),
                }
                let skip = err.error_len().unwrap_or(bad.len());
                consumed += valid + skip;
                rest = &bad[skip..];
                if rest.is_empty() {
                    return Ok(out);
                }
            }
        }
    }
}

// Complex constructor

pub fn eval_complex(args: &[ConstValue]) -> FoldResult {
    match args {
        [] => Ok(ConstValue::complex(0.0, 0.0)),
        [ConstValue::Str(text)] => parse_complex_text(text),
        [value] => {
            let (real, imag) = complex_parts(value)?;
            Ok(ConstValue::complex(real, imag))
        }
        [first, second] => {
            if matches!(first, ConstValue::Str(_)) {
                return Err(type_fault("complex() can't take second arg if first is a string"));
            }
            if matches!(second, ConstValue::Str(_)) {
                return Err(type_fault("complex() second arg can't be a string"));
            }
            let (ar, ai) = complex_parts(first)?;
            let (br, bi) = complex_parts(second)?;
            // real + imag * 1j over complex operands
            Ok(ConstValue::complex(ar - bi, ai + br))
        }
        _ => Err(FoldError::Unsupported),
    }
}

fn complex_parts(value: &ConstValue) -> Result<(f64, f64), FoldError> {
    if let ConstValue::Complex { real, imag } = value {
        return Ok((*real, *imag));
    }
    match numeric_as_f64(value) {
        Some(f) => Ok((f, 0.0)),
        None => Err(type_fault(format!(
            "complex() argument must be a string or a number, not '{}'",
            value.type_name()
        ))),
    }
}

/// Parse the `"a+bj"` grammar, with optional surrounding parentheses.
fn parse_complex_text(original: &str) -> FoldResult {
    let malformed = || FoldError::from(FoldFault::value_fault("complex() arg is a malformed string"));

    let mut s = original.trim();
    if let Some(inner) = s.strip_prefix('(') {
        s = inner.strip_suffix(')').ok_or_else(malformed)?;
    }
    let stripped;
    if s.contains('_') {
        stripped = strip_numeric_underscores(s).ok_or_else(malformed)?;
        s = &stripped;
    }
    if s.is_empty() {
        return Err(malformed());
    }

    // Split before the final term: a sign not at the start and not part
    // of an exponent.
    let bytes = s.as_bytes();
    let mut split = None;
    for i in 1..bytes.len() {
        if matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E') {
            split = Some(i);
        }
    }

    let component = |text: &str| -> Result<f64, FoldError> {
        match text {
            "" | "+" => Ok(1.0),
            "-" => Ok(-1.0),
            _ => text.parse::<f64>().map_err(|_| malformed()),
        }
    };

    match split {
        Some(i) => {
            let imag_term = s[i..].strip_suffix(['j', 'J']).ok_or_else(malformed)?;
            let real = s[..i].parse::<f64>().map_err(|_| malformed())?;
            Ok(ConstValue::complex(real, component(imag_term)?))
        }
        None => match s.strip_suffix(['j', 'J']) {
            Some(imag_term) => Ok(ConstValue::complex(0.0, component(imag_term)?)),
            None => Ok(ConstValue::complex(s.parse::<f64>().map_err(|_| malformed())?, 0.0)),
        },
    }
}

/// Byte buffers are mutable; their constructor never folds.
pub fn eval_byte_buffer(_args: &[ConstValue]) -> FoldResult {
    Err(FoldError::Unsupported)
}

#[cfg(test)]
mod tests;
