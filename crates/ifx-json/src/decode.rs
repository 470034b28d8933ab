//! Response decoding.
//!
//! The remote query service percent-encodes string fields in its JSON
//! payloads. The whole parsed document is walked and any string
//! containing a `%` is URL-decoded in place; everything else passes
//! through untouched.

use serde_json::Value;

/// Recursively percent-decodes string fields of a JSON document.
#[must_use]
pub fn decode_value(value: Value) -> Value {
    match value {
        Value::String(s) if s.contains('%') => Value::String(percent_decode(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(decode_value).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, decode_value(value)))
                .collect(),
        ),
        other => other,
    }
}

/// URL-decodes a string: `%XX` pairs become bytes, `+` becomes a space,
/// malformed escapes are kept verbatim.
fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        if byte == b'%' && i + 2 < bytes.len() {
            if let (Some(high), Some(low)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                decoded.push(high * 16 + low);
                i += 3;
                continue;
            }
        }
        if byte == b'+' {
            decoded.push(b' ');
        } else {
            decoded.push(byte);
        }
        i += 1;
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_percent_escape_decodes() {
        let decoded = decode_value(json!("100%25"));
        assert_eq!(decoded, json!("100%"));
    }

    #[test]
    fn test_multibyte_sequences_decode() {
        let decoded = decode_value(json!("%E4%B8%AD%E6%96%87"));
        assert_eq!(decoded, json!("中文"));
    }

    #[test]
    fn test_strings_without_percent_are_untouched() {
        // a plus only turns into a space when the percent gate opens
        let decoded = decode_value(json!("a+b"));
        assert_eq!(decoded, json!("a+b"));
    }

    #[test]
    fn test_plus_decodes_inside_gated_strings() {
        let decoded = decode_value(json!("a+b%20c"));
        assert_eq!(decoded, json!("a b c"));
    }

    #[test]
    fn test_malformed_escapes_are_kept() {
        assert_eq!(decode_value(json!("50%zz")), json!("50%zz"));
        assert_eq!(decode_value(json!("trailing%2")), json!("trailing%2"));
        assert_eq!(decode_value(json!("lone%")), json!("lone%"));
    }

    #[test]
    fn test_non_strings_are_untouched() {
        assert_eq!(decode_value(json!(25)), json!(25));
        assert_eq!(decode_value(json!(true)), json!(true));
        assert_eq!(decode_value(json!(null)), json!(null));
    }

    #[test]
    fn test_nested_structures_decode_at_every_level() {
        let document = json!({
            "rows": [
                {"name": "caf%C3%A9", "share": "42%25", "id": 7},
                {"nested": {"deep": ["%2Fusr%2Flocal", "plain"]}}
            ]
        });
        let decoded = decode_value(document);
        assert_eq!(
            decoded,
            json!({
                "rows": [
                    {"name": "café", "share": "42%", "id": 7},
                    {"nested": {"deep": ["/usr/local", "plain"]}}
                ]
            })
        );
    }
}
