//! Pretty-printing of bridge JSON without a round trip through `Value`.
//!
//! Number literals are copied from the source text, so integers wider than
//! 64 bits and decimals like `1.10` come out exactly as the bridge sent them.
//! Strings are re-encoded with serde_json's escaping. Layout matches
//! `serde_json::to_string_pretty` (two-space indent, `{}`/`[]` when empty).

use serde::de::IgnoredAny;

const INDENT: &str = "  ";

/// Validate `raw` as a single JSON document and re-indent it.
pub fn to_pretty_verbatim(raw: &str) -> serde_json::Result<String> {
    serde_json::from_str::<IgnoredAny>(raw)?;

    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len() + raw.len() / 2);
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                let end = string_end(bytes, i);
                let decoded: String = serde_json::from_str(&raw[i..end])?;
                out.push_str(&serde_json::to_string(&decoded)?);
                i = end;
                continue;
            }
            open @ (b'{' | b'[') => {
                let close = if open == b'{' { b'}' } else { b']' };
                let next = skip_whitespace(bytes, i + 1);
                if bytes.get(next) == Some(&close) {
                    out.push(open as char);
                    out.push(close as char);
                    i = next + 1;
                    continue;
                }
                depth += 1;
                out.push(open as char);
                newline(&mut out, depth);
            }
            close @ (b'}' | b']') => {
                depth = depth.saturating_sub(1);
                newline(&mut out, depth);
                out.push(close as char);
            }
            b',' => {
                out.push(',');
                newline(&mut out, depth);
            }
            b':' => out.push_str(": "),
            b' ' | b'\t' | b'\n' | b'\r' => {}
            // Outside strings a validated document is ASCII: numbers and literals.
            other => out.push(other as char),
        }
        i += 1;
    }
    Ok(out)
}

/// Index one past the closing quote of the string starting at `start`.
fn string_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while matches!(bytes.get(i), Some(b' ' | b'\t' | b'\n' | b'\r')) {
        i += 1;
    }
    i
}

fn newline(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn layout_matches_serde_pretty_printer() {
        let value = json!({
            "title": "Café \"quoted\"\n",
            "tabs": [1, 2, {"id": null, "active": true}],
            "empty_obj": {},
            "empty_arr": [],
            "nested": {"deep": [[], [false]]}
        });
        let compact = serde_json::to_string(&value).unwrap();

        assert_eq!(
            to_pretty_verbatim(&compact).unwrap(),
            serde_json::to_string_pretty(&value).unwrap()
        );
    }

    #[test]
    fn wide_integers_and_decimals_are_kept_exactly() {
        let text = to_pretty_verbatim(r#"{"id":123456789012345678901234567890,"x":1.10,"e":-2E+3}"#)
            .unwrap();
        assert_eq!(
            text,
            "{\n  \"id\": 123456789012345678901234567890,\n  \"x\": 1.10,\n  \"e\": -2E+3\n}"
        );
    }

    #[test]
    fn source_whitespace_is_normalized() {
        let text = to_pretty_verbatim("  [ 1 ,\n\t{ \"a\" : [ ] } ]  ").unwrap();
        assert_eq!(text, "[\n  1,\n  {\n    \"a\": []\n  }\n]");
    }

    #[test]
    fn escapes_are_reencoded() {
        let text = to_pretty_verbatim(r#"{"s":"café \/ \"x\""}"#).unwrap();
        assert_eq!(text, "{\n  \"s\": \"café / \\\"x\\\"\"\n}");
    }

    #[test]
    fn scalar_documents_pass_through() {
        assert_eq!(to_pretty_verbatim("42").unwrap(), "42");
        assert_eq!(to_pretty_verbatim(" \"ok\" ").unwrap(), "\"ok\"");
        assert_eq!(to_pretty_verbatim("null").unwrap(), "null");
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(to_pretty_verbatim("done").is_err());
        assert!(to_pretty_verbatim("{\"a\":1} trailing").is_err());
        assert!(to_pretty_verbatim("").is_err());
    }
}
