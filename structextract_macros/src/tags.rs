//! Parser for the Go-style struct-tag grammar used in
//! `#[extract(tags = "...")]`.
//!
//! A tag string is a sequence of `key:"value"` pairs separated by
//! whitespace. The quoted value may contain `\"` and `\\` escapes and is
//! split on commas: the first segment is the tag value, the remaining
//! segments are modifiers (`omitempty` being the only one with runtime
//! semantics).

use syn::LitStr;

/// One parsed `key:"value,mod,..."` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedTag {
    pub key: String,
    pub value: String,
    pub modifiers: Vec<String>,
}

/// Parses a tag string literal, spanning errors on the literal itself.
pub(crate) fn parse_tag_string(lit: &LitStr) -> syn::Result<Vec<ParsedTag>> {
    parse_tags(&lit.value()).map_err(|message| syn::Error::new(lit.span(), message))
}

fn parse_tags(raw: &str) -> Result<Vec<ParsedTag>, String> {
    let mut out = Vec::new();
    let mut rest = raw.trim_start();
    while !rest.is_empty() {
        let colon = rest
            .find(':')
            .ok_or_else(|| format!("missing `:` after tag key in `{rest}`"))?;
        let key = &rest[..colon];
        if key.is_empty() || key.contains(|c: char| c.is_whitespace() || c == '"') {
            return Err(format!("invalid tag key `{key}`"));
        }
        rest = &rest[colon + 1..];
        let Some(quoted) = rest.strip_prefix('"') else {
            return Err(format!("tag value for `{key}` must be double-quoted"));
        };
        let (value, remainder) =
            take_quoted(quoted).ok_or_else(|| format!("unterminated tag value for `{key}`"))?;
        let mut segments = value.split(',');
        let value = segments.next().unwrap_or_default().to_owned();
        let modifiers = segments.map(str::to_owned).collect();
        out.push(ParsedTag {
            key: key.to_owned(),
            value,
            modifiers,
        });
        rest = remainder.trim_start();
    }
    Ok(out)
}

/// Consumes characters up to the closing quote, resolving escapes. Returns
/// the unquoted value and the remainder after the closing quote.
fn take_quoted(input: &str) -> Option<(String, &str)> {
    let mut value = String::new();
    let mut chars = input.char_indices();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '"' => return Some((value, &input[idx + 1..])),
            '\\' => {
                let (_, escaped) = chars.next()?;
                value.push(escaped);
            }
            _ => value.push(ch),
        }
    }
    None
}
