//! # Response Formatter
//!
//! Turns completion text into display text: JSON bodies are re-indented with
//! two spaces and highlighted token by token. Anything that is not JSON, or
//! fails to parse, is returned untouched.
//!
//! Highlighting works on lines and substrings, not on the JSON structure, so
//! a string value that happens to contain ` true` or ` 42` gets those words
//! painted too. Only the display is affected; the stored response is not.

use crate::tui::views::ansi_escape_codes::{
    Style, BOOL_STYLE, KEY_STYLE, NULL_STYLE, NUMBER_STYLE, STRING_STYLE,
};
use regex::Regex;
use std::sync::OnceLock;

const BODY_MARKER: &str = "Body: ";
const KEY_MARKER: &str = "\":";
const STRING_MARKER: &str = ": \"";
const INDENT: &str = "  ";

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(-?[0-9]+(?:\.[0-9]+)?)(,?)$").expect("number pattern is valid")
    })
}

/// Full JSON number grammar, used to validate scalars while re-indenting
fn json_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?$")
            .expect("json number pattern is valid")
    })
}

/// Formats and highlights response text
#[derive(Debug, Clone)]
pub struct ResponseFormatter {
    key_style: Style,
    string_style: Style,
    number_style: Style,
    bool_style: Style,
    null_style: Style,
}

impl ResponseFormatter {
    pub fn new() -> Self {
        Self {
            key_style: KEY_STYLE,
            string_style: STRING_STYLE,
            number_style: NUMBER_STYLE,
            bool_style: BOOL_STYLE,
            null_style: NULL_STYLE,
        }
    }

    /// Format `"Status: <code>\nBody: <payload>"` text for display
    pub fn format_response(&self, response: &str) -> String {
        let has_json_body = ["{", "["]
            .iter()
            .any(|open| response.contains(&format!("{BODY_MARKER}{open}")));
        if !has_json_body {
            return response.to_string();
        }

        let Some((prefix, body)) = response.split_once(BODY_MARKER) else {
            return response.to_string();
        };

        match pretty_print(body) {
            Some(pretty) => format!("{prefix}{BODY_MARKER}{}", self.highlight(&pretty)),
            None => {
                tracing::debug!("Response body is not valid JSON, showing it as-is");
                response.to_string()
            }
        }
    }

    fn highlight(&self, json: &str) -> String {
        json.lines()
            .map(|line| self.highlight_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn highlight_line(&self, line: &str) -> String {
        let line = self.paint_key_and_string(line);
        let line = self.paint_literals(&line);
        self.paint_numbers(&line)
    }

    /// Key: everything up to and including the first `":`. String value: from
    /// the quote after `: "` up to the next quote.
    fn paint_key_and_string(&self, line: &str) -> String {
        let (key, rest) = match line.find(KEY_MARKER) {
            Some(idx) => line.split_at(idx + KEY_MARKER.len()),
            None => ("", line),
        };

        let mut out = if key.is_empty() {
            String::new()
        } else {
            self.key_style.paint(key)
        };

        // `rest` keeps the space after the key's colon, so look the marker up
        // on the original line
        let marker = match line.find(STRING_MARKER) {
            Some(idx) if idx + 1 >= key.len() => Some(idx + 2 - key.len()),
            _ => None,
        };

        match marker.and_then(|open| string_token(rest, open)) {
            Some((before, token, after)) => {
                out.push_str(before);
                out.push_str(&self.string_style.paint(token));
                out.push_str(after);
            }
            None => out.push_str(rest),
        }
        out
    }

    fn paint_literals(&self, line: &str) -> String {
        line.replace(" true", &format!(" {}", self.bool_style.paint("true")))
            .replace(" false", &format!(" {}", self.bool_style.paint("false")))
            .replace(" null", &format!(" {}", self.null_style.paint("null")))
    }

    /// Space-delimited numbers; a trailing comma stays unpainted
    fn paint_numbers(&self, line: &str) -> String {
        line.split(' ')
            .enumerate()
            .map(|(idx, word)| match number_pattern().captures(word) {
                Some(caps) if idx > 0 => {
                    format!("{}{}", self.number_style.paint(&caps[1]), &caps[2])
                }
                _ => word.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for ResponseFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `rest` around the quoted token opening at byte `open`
fn string_token(rest: &str, open: usize) -> Option<(&str, &str, &str)> {
    let after_open = rest.get(open + 1..)?;
    let close = after_open.find('"')?;
    let end = open + 1 + close + 1;
    Some((&rest[..open], &rest[open..end], &rest[end..]))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

/// What the re-indenter accepts next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Value,
    /// Right after `[`: a value or `]`
    FirstValue,
    /// Right after `{`: a key or `}`
    FirstKey,
    Key,
    Colon,
    CommaOrClose,
    End,
}

fn after_value(stack: &[Container]) -> Expect {
    if stack.is_empty() {
        Expect::End
    } else {
        Expect::CommaOrClose
    }
}

fn newline(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Byte offset just past the string token opening at `start`
fn string_end(src: &str, start: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'"' => {
                let end = pos + 1;
                // escapes and raw control characters are checked by serde_json
                serde_json::from_str::<String>(&src[start..end]).ok()?;
                return Some(end);
            }
            _ => pos += 1,
        }
    }
    None
}

fn scalar_end(bytes: &[u8], start: usize) -> usize {
    let mut pos = start;
    while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || b"+-.".contains(&bytes[pos])) {
        pos += 1;
    }
    pos
}

fn is_scalar(token: &str) -> bool {
    matches!(token, "true" | "false" | "null") || json_number_pattern().is_match(token)
}

/// Re-indent a JSON document with two spaces.
///
/// Works on tokens, not on a parsed value: token text is copied verbatim, so
/// key order, duplicate keys, escapes and number spelling are what the server
/// sent. Nesting depth is unbounded. Returns `None` unless `body` is exactly
/// one valid JSON value, surrounded by optional whitespace.
fn pretty_print(body: &str) -> Option<String> {
    let bytes = body.as_bytes();
    let mut out = String::with_capacity(body.len() * 2);
    let mut stack = Vec::new();
    let mut expect = Expect::Value;
    let mut pos = 0;

    while pos < bytes.len() {
        let byte = bytes[pos];
        if matches!(byte, b' ' | b'\t' | b'\n' | b'\r') {
            pos += 1;
            continue;
        }

        match (expect, byte) {
            (Expect::FirstValue, b']') | (Expect::FirstKey, b'}') => {
                out.push(byte as char);
                stack.pop();
                expect = after_value(&stack);
                pos += 1;
            }
            (Expect::CommaOrClose, b']' | b'}') => {
                let open = stack.pop()?;
                if (open == Container::Array) != (byte == b']') {
                    return None;
                }
                newline(&mut out, stack.len());
                out.push(byte as char);
                expect = after_value(&stack);
                pos += 1;
            }
            (Expect::CommaOrClose, b',') => {
                out.push(',');
                newline(&mut out, stack.len());
                expect = match stack.last()? {
                    Container::Object => Expect::Key,
                    Container::Array => Expect::Value,
                };
                pos += 1;
            }
            (Expect::Colon, b':') => {
                out.push_str(": ");
                expect = Expect::Value;
                pos += 1;
            }
            (Expect::FirstKey | Expect::Key, b'"') => {
                if expect == Expect::FirstKey {
                    newline(&mut out, stack.len());
                }
                let end = string_end(body, pos)?;
                out.push_str(&body[pos..end]);
                expect = Expect::Colon;
                pos = end;
            }
            (Expect::Value | Expect::FirstValue, _) => {
                if expect == Expect::FirstValue {
                    newline(&mut out, stack.len());
                }
                match byte {
                    b'{' => {
                        stack.push(Container::Object);
                        expect = Expect::FirstKey;
                        out.push('{');
                        pos += 1;
                    }
                    b'[' => {
                        stack.push(Container::Array);
                        expect = Expect::FirstValue;
                        out.push('[');
                        pos += 1;
                    }
                    b'"' => {
                        let end = string_end(body, pos)?;
                        out.push_str(&body[pos..end]);
                        expect = after_value(&stack);
                        pos = end;
                    }
                    _ => {
                        let end = scalar_end(bytes, pos);
                        let token = &body[pos..end];
                        if !is_scalar(token) {
                            return None;
                        }
                        out.push_str(token);
                        expect = after_value(&stack);
                        pos = end;
                    }
                }
            }
            _ => return None,
        }
    }

    (expect == Expect::End).then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::views::ansi_escape_codes::strip_styles;

    fn format(text: &str) -> String {
        ResponseFormatter::new().format_response(text)
    }

    fn stripped_body(formatted: &str) -> String {
        let plain = strip_styles(formatted);
        plain
            .split_once(BODY_MARKER)
            .map(|(_, body)| body.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn json_body_should_be_indented_and_round_trip() {
        let formatted = format("Status: 200\nBody: {\"a\":1,\"b\":\"x\"}");

        assert!(formatted.starts_with("Status: 200\nBody: "));
        let body = stripped_body(&formatted);
        assert_eq!(body, "{\n  \"a\": 1,\n  \"b\": \"x\"\n}");

        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, serde_json::json!({"a": 1, "b": "x"}));
    }

    #[test]
    fn non_json_body_should_be_unchanged() {
        let text = "Status: 200\nBody: not-json";
        assert_eq!(format(text), text);
    }

    #[test]
    fn invalid_json_should_be_unchanged() {
        let text = "Status: 500\nBody: {broken";
        assert_eq!(format(text), text);
    }

    #[test]
    fn error_text_should_be_unchanged() {
        let text = "Error: URL is required";
        assert_eq!(format(text), text);
    }

    #[test]
    fn formatting_twice_should_strip_to_the_same_text() {
        let once = format("Status: 200\nBody: [{\"ok\":true,\"n\":null,\"v\":-1.5}]");
        let twice = format(&once);
        assert_eq!(strip_styles(&twice), strip_styles(&once));
    }

    #[test]
    fn key_and_string_value_should_be_painted() {
        let formatted = format("Status: 200\nBody: {\"name\":\"apiterm\"}");
        assert!(formatted.contains(&KEY_STYLE.paint("  \"name\":")));
        assert!(formatted.contains(&STRING_STYLE.paint("\"apiterm\"")));
    }

    #[test]
    fn literals_and_numbers_should_be_painted() {
        let formatted = format("Status: 200\nBody: {\"a\":true,\"b\":null,\"c\":42,\"d\":false}");
        assert!(formatted.contains(&BOOL_STYLE.paint("true")));
        assert!(formatted.contains(&BOOL_STYLE.paint("false")));
        assert!(formatted.contains(&NULL_STYLE.paint("null")));
        // trailing comma is left outside the number token
        assert!(formatted.contains(&format!("{},", NUMBER_STYLE.paint("42"))));
    }

    #[test]
    fn array_numbers_should_be_painted() {
        let formatted = format("Status: 200\nBody: [1,2.5]");
        assert!(formatted.contains(&format!("  {},", NUMBER_STYLE.paint("1"))));
        assert!(formatted.contains(&format!("  {}", NUMBER_STYLE.paint("2.5"))));
    }

    #[test]
    fn key_order_and_number_text_should_be_preserved() {
        let formatted = format("Status: 200\nBody: {\"z\":1.0,\"a\":10000000000000000000001}");
        let body = stripped_body(&formatted);
        assert_eq!(
            body,
            "{\n  \"z\": 1.0,\n  \"a\": 10000000000000000000001\n}"
        );
    }

    #[test]
    fn literal_inside_string_should_be_painted_too() {
        let formatted = format("Status: 200\nBody: {\"s\":\"is true\"}");
        assert!(formatted.contains(&BOOL_STYLE.paint("true")));
        assert_eq!(stripped_body(&formatted), "{\n  \"s\": \"is true\"\n}");
    }

    #[test]
    fn duplicate_keys_should_all_be_kept() {
        let formatted = format("Status: 200\nBody: {\"a\":1,\"a\":2}");
        assert_eq!(stripped_body(&formatted), "{\n  \"a\": 1,\n  \"a\": 2\n}");
    }

    #[test]
    fn escapes_should_be_shown_as_sent() {
        let formatted = format("Status: 200\nBody: {\"p\":\"a\\/b\\u00e9\"}");
        assert_eq!(stripped_body(&formatted), "{\n  \"p\": \"a\\/b\\u00e9\"\n}");
    }

    #[test]
    fn empty_containers_should_stay_on_one_line() {
        let formatted = format("Status: 200\nBody: {\"a\":[],\"b\":{ }}");
        assert_eq!(
            stripped_body(&formatted),
            "{\n  \"a\": [],\n  \"b\": {}\n}"
        );
    }

    #[test]
    fn deeply_nested_body_should_still_be_indented() {
        let depth = 300;
        let body = format!("{}1{}", "[".repeat(depth), "]".repeat(depth));
        let formatted = format(&format!("Status: 200\nBody: {body}"));

        let plain = stripped_body(&formatted);
        assert_eq!(plain.lines().count(), 2 * depth + 1);
        assert!(plain.contains(&format!("{}1", "  ".repeat(depth))));
    }

    #[test]
    fn malformed_json_should_be_unchanged() {
        for body in ["[1,]", "{\"a\":1,}", "{\"a\" 1}", "[1 2]", "[01]", "{\"a\":1}}", "[\"\\q\"]"] {
            let text = format!("Status: 200\nBody: {body}");
            assert_eq!(format(&text), text, "{body}");
        }
    }

    #[test]
    fn trailing_whitespace_after_body_should_be_accepted() {
        let formatted = format("Status: 200\nBody: [true]\r\n");
        assert_eq!(stripped_body(&formatted), "[\n  true\n]");
    }

    #[test]
    fn negative_and_decimal_numbers_should_be_painted_whole() {
        let formatted = format("Status: 200\nBody: [-1.5,-7,0.25]");
        assert!(formatted.contains(&format!("  {},", NUMBER_STYLE.paint("-1.5"))));
        assert!(formatted.contains(&format!("  {},", NUMBER_STYLE.paint("-7"))));
        assert!(formatted.contains(&format!("  {}", NUMBER_STYLE.paint("0.25"))));
    }

    #[test]
    fn numbers_outside_the_grammar_should_not_be_painted() {
        let formatter = ResponseFormatter::new();
        for line in ["  1e5,", "  1.", "  .5", "  -", "  1.5.2", "  --1", "  +3"] {
            assert_eq!(formatter.paint_numbers(line), line, "{line}");
        }

        // valid JSON exponents are indented but left unpainted
        let formatted = format("Status: 200\nBody: [1e5,2E-3]");
        assert_eq!(formatted, "Status: 200\nBody: [\n  1e5,\n  2E-3\n]");
    }
}
