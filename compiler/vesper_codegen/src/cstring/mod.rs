//! C literal and identifier encoding.
//!
//! The backend emits constant payloads as C string literals and derives C
//! identifiers from source-level names. Literal encoding is byte-exact:
//! whatever bytes go in must come back out of the C compiler's literal
//! parser. Identifier encoding is reversible so that emitted names can be
//! demangled in diagnostics.

use vesper_ir::ConstValue;

/// Some C parsers reject very long string tokens; long payloads are split
/// into adjacent literals, which concatenate without changing meaning.
const LITERAL_CHUNK: usize = 16_000;

/// Encode bytes as one or more adjacent C string literals.
pub fn encode_literal(payload: &[u8]) -> String {
    if payload.is_empty() {
        return String::from("\"\"");
    }
    payload
        .chunks(LITERAL_CHUNK)
        .map(encode_chunk)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The literal payload of a string-like constant, if it has one.
pub fn encode_literal_value(value: &ConstValue) -> Option<String> {
    match value {
        ConstValue::Str(text) => Some(encode_literal(text.as_bytes())),
        ConstValue::ByteStr(bytes) | ConstValue::Bytes(bytes) => Some(encode_literal(bytes)),
        _ => None,
    }
}

fn encode_chunk(chunk: &[u8]) -> String {
    let mut out = String::with_capacity(chunk.len() + 2);
    out.push('"');
    // An octal escape is variable-length, so a literal digit right after
    // one would be swallowed into the escape. A `" "` break keeps the two
    // apart; adjacent literals concatenate back to the same bytes.
    let mut octal = false;
    for &byte in chunk {
        // `?` is escaped to keep trigraph-sensitive preprocessors away.
        if matches!(byte, b'\\' | b'\t' | b'\r' | b'\n' | b'"' | b'?') || !(32..=127).contains(&byte)
        {
            out.push_str(&format!("\\{byte:o}"));
            octal = true;
        } else {
            if octal && byte.is_ascii_digit() {
                out.push_str("\" \"");
            }
            out.push(char::from(byte));
            octal = false;
        }
    }
    out.push('"');
    out
}

/// Encode a source-level name as a C identifier. Alphanumerics and
/// underscores pass through, `.` becomes `$`, anything else becomes
/// `$$<decimal>$`.
pub fn encode_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else if c == '.' {
            out.push('$');
        } else {
            out.push_str(&format!("$${}$", u32::from(c)));
        }
    }
    out
}

/// Reverse `encode_identifier`. Returns `None` for text that no encoded
/// identifier produces.
pub fn decode_identifier(encoded: &str) -> Option<String> {
    let mut out = String::with_capacity(encoded.len());
    let mut chars = encoded.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        if chars.peek() != Some(&'$') {
            out.push('.');
            continue;
        }
        chars.next();
        let mut code: u32 = 0;
        let mut any = false;
        loop {
            match chars.next()? {
                '$' => break,
                d => {
                    let digit = d.to_digit(10)?;
                    code = code.checked_mul(10)?.checked_add(digit)?;
                    any = true;
                }
            }
        }
        if !any {
            return None;
        }
        out.push(char::from_u32(code)?);
    }
    Some(out)
}

#[cfg(test)]
mod tests;
