use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use smol_str::SmolStr;

lazy_static! {
    /// `name="quoted value"`, at the start or after whitespace
    static ref ATTRIBUTE_REGEX: Regex =
        Regex::new(r#"(?:^|\s)([A-Za-z0-9_-]+)="([^"]*)""#).expect("Regular expression error");

    /// `name="quoted value"` or `name=bare-token`, at the start or after whitespace or a comma
    static ref ATTRIBUTE_LIST_REGEX: Regex =
        Regex::new(r#"(?:^|[\s,])([A-Za-z0-9_-]+)=(?:"([^"]*)"|([^",\s]+))"#)
            .expect("Regular expression error");
}

fn collect_attributes<'a>(
    captures: impl Iterator<Item = Captures<'a>>,
) -> HashMap<SmolStr, SmolStr> {
    let mut result = HashMap::new();
    for captures in captures {
        let key = &captures[1];
        let value = captures
            .get(2)
            .or_else(|| captures.get(3))
            .map(|x| x.as_str())
            .unwrap_or_default();

        result.insert(key.into(), value.into());
    }

    result
}

/// Parses space separated `name="value"` pairs, as found after `#EXTM3U` and
/// in `#EXTINF`. Fragments that are not a quoted pair are skipped.
pub fn parse_attributes(input: impl AsRef<str>) -> HashMap<SmolStr, SmolStr> {
    collect_attributes(ATTRIBUTE_REGEX.captures_iter(input.as_ref()))
}

/// Parses an HLS attribute list such as `METHOD=AES-128,URI="..."`, where
/// values may be quoted strings or bare tokens.
pub fn parse_attribute_list(input: impl AsRef<str>) -> HashMap<SmolStr, SmolStr> {
    collect_attributes(ATTRIBUTE_LIST_REGEX.captures_iter(input.as_ref()))
}
