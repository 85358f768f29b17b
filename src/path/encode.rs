const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Percent-encodes every byte outside the URI component unreserved set
/// (`A-Z a-z 0-9 - _ . ! ~ * ' ( )`).
pub fn encode_component(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for &byte in input.as_bytes() {
        if is_unreserved(byte) {
            output.push(byte as char);
        } else {
            push_escaped(&mut output, byte);
        }
    }
    output
}

/// Percent-encodes the bytes a URL path segment cannot carry verbatim:
/// controls, space, `/`, `"`, `#`, `<`, `>`, `?`, `{`, `}`, the backtick and
/// everything outside ASCII. Existing `%` escapes are kept as they are.
pub fn encode_path_segment(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for &byte in input.as_bytes() {
        if is_path_segment_safe(byte) {
            output.push(byte as char);
        } else {
            push_escaped(&mut output, byte);
        }
    }
    output
}

#[inline]
fn push_escaped(output: &mut String, byte: u8) {
    output.push('%');
    output.push(HEX[(byte >> 4) as usize] as char);
    output.push(HEX[(byte & 0x0f) as usize] as char);
}

#[inline]
fn is_path_segment_safe(byte: u8) -> bool {
    (0x21..0x7f).contains(&byte)
        && !matches!(byte, b'"' | b'#' | b'<' | b'>' | b'?' | b'`' | b'{' | b'}' | b'/')
}

#[inline]
fn is_unreserved(byte: u8) -> bool {
    matches!(
        byte,
        b'a'..=b'z'
            | b'A'..=b'Z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')'
    )
}
