//! Semantic JSON comparison.

use serde_json::Value;

/// Order-independent structural equality between two JSON payloads.
///
/// Object keys may appear in any order; array element order is
/// significant. Payloads that fail to parse compare unequal.
pub fn json_equal(a: &[u8], b: &[u8]) -> bool {
    let (Ok(a), Ok(b)) = (
        serde_json::from_slice::<Value>(a),
        serde_json::from_slice::<Value>(b),
    ) else {
        return false;
    };
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_ignores_key_order() {
        assert!(json_equal(
            br#"{"a": 1, "b": {"x": true, "y": null}}"#,
            br#"{"b": {"y": null, "x": true}, "a": 1}"#,
        ));
    }

    #[test]
    fn test_array_order_is_significant() {
        assert!(!json_equal(b"[1, 2]", b"[2, 1]"));
    }

    #[test]
    fn test_whitespace_is_irrelevant() {
        assert!(json_equal(b"{ \"a\" : 1 }", b"{\"a\":1}"));
    }

    #[test]
    fn test_unparseable_input_is_unequal() {
        assert!(!json_equal(b"not json", b"not json"));
        assert!(!json_equal(b"{}", b"not json"));
    }

    #[test]
    fn test_number_representation() {
        assert!(json_equal(b"1", b"1"));
        assert!(!json_equal(b"1", b"2"));
    }
}
