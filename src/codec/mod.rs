//! Delimited string codec for trait type and state strings
//!
//! Every trait serializes its configuration and runtime state as a sequence
//! of fields joined by a single delimiter character (traits use `';'`).
//! Literal delimiters and backslashes inside text fields are backslash
//! escaped. Decoding is defensive: missing trailing fields and unparseable
//! tokens fall back to caller-supplied defaults, so any input string, however
//! truncated or malformed, decodes to a usable value.

use crate::render::colors::Color;

const ESCAPE: char = '\\';

/// Builder joining typed fields into one delimited string
pub struct SequenceEncoder {
    delimiter: char,
    value: String,
    has_fields: bool,
}

impl SequenceEncoder {
    pub fn new(delimiter: char) -> Self {
        Self {
            delimiter,
            value: String::new(),
            has_fields: false,
        }
    }

    /// Append a text field, escaping delimiter and escape characters
    pub fn append(mut self, field: &str) -> Self {
        if self.has_fields {
            self.value.push(self.delimiter);
        }
        self.has_fields = true;
        for c in field.chars() {
            if c == self.delimiter || c == ESCAPE {
                self.value.push(ESCAPE);
            }
            self.value.push(c);
        }
        self
    }

    pub fn append_int(self, v: i64) -> Self {
        self.append(&v.to_string())
    }

    pub fn append_bool(self, v: bool) -> Self {
        self.append(if v { "true" } else { "false" })
    }

    pub fn append_color(self, c: Color) -> Self {
        self.append(&c.encode())
    }

    /// The joined string; empty when no fields were appended
    pub fn value(self) -> String {
        self.value
    }
}

/// Cursor reading typed fields back out of a delimited string
pub struct SequenceDecoder<'a> {
    delimiter: char,
    // None once the final token has been consumed
    rest: Option<&'a str>,
}

impl<'a> SequenceDecoder<'a> {
    pub fn new(input: &'a str, delimiter: char) -> Self {
        Self {
            delimiter,
            rest: Some(input),
        }
    }

    /// Whether another token (possibly empty) remains
    pub fn has_more(&self) -> bool {
        self.rest.is_some()
    }

    /// Next raw token with escapes resolved, or `None` past the end.
    ///
    /// A trailing delimiter yields one final empty token. A dangling escape
    /// character is kept as a literal backslash rather than rejected.
    pub fn next_token(&mut self) -> Option<String> {
        let rest = self.rest?;
        let mut token = String::new();
        let mut chars = rest.char_indices();
        while let Some((i, c)) = chars.next() {
            if c == ESCAPE {
                match chars.next() {
                    Some((_, escaped)) => token.push(escaped),
                    None => token.push(ESCAPE),
                }
            } else if c == self.delimiter {
                self.rest = Some(&rest[i + c.len_utf8()..]);
                return Some(token);
            } else {
                token.push(c);
            }
        }
        self.rest = None;
        Some(token)
    }

    /// Next token as text, or `default` when absent
    pub fn next_str(&mut self, default: &str) -> String {
        self.next_token().unwrap_or_else(|| default.to_string())
    }

    /// Next token parsed as an integer; `default` when absent or unparseable
    pub fn next_int(&mut self, default: i64) -> i64 {
        match self.next_token() {
            Some(token) => token.trim().parse().unwrap_or(default),
            None => default,
        }
    }

    /// Next token parsed as a boolean (`true`/`false`, case-insensitive);
    /// `default` when absent or unparseable
    pub fn next_bool(&mut self, default: bool) -> bool {
        match self.next_token() {
            Some(token) => {
                if token.eq_ignore_ascii_case("true") {
                    true
                } else if token.eq_ignore_ascii_case("false") {
                    false
                } else {
                    default
                }
            }
            None => default,
        }
    }

    /// Next token parsed as an `r,g,b[,a]` color; `default` when absent or
    /// unparseable
    pub fn next_color(&mut self, default: Color) -> Color {
        match self.next_token() {
            Some(token) => Color::parse(&token).unwrap_or(default),
            None => default,
        }
    }
}

/// The kind tag of a type string: everything before the first unescaped
/// delimiter. Empty input yields an empty tag.
pub fn kind_tag(type_str: &str, delimiter: char) -> String {
    SequenceDecoder::new(type_str, delimiter)
        .next_token()
        .unwrap_or_default()
}
