//! Container header tokens
//!
//! Headers are given on the command line as `Name:Value` tokens or as one of
//! the shorthand flags in [`SHORT_HEADERS`].

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Container headers keyed by header name
pub type Headers = BTreeMap<String, String>;

/// Shorthand flags and the header tokens they stand for
pub const SHORT_HEADERS: &[(&str, &str)] = &[
    ("-gr", "X-Container-Read:.r:*"),
    ("-rm-gr", "X-Remove-Container-Read:1"),
];

/// Expand a shorthand flag, or return the token unchanged
pub fn expand_shorthand(token: &str) -> &str {
    SHORT_HEADERS
        .iter()
        .find(|(short, _)| *short == token)
        .map(|(_, full)| *full)
        .unwrap_or(token)
}

/// Split a header token on its first colon into `(name, value)`
pub fn parse_header(token: &str) -> Result<(String, String)> {
    let token = expand_shorthand(token);
    token
        .split_once(':')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| Error::HeaderParse {
            header: token.to_string(),
        })
}

/// Parse all header tokens; a later duplicate name replaces an earlier one
pub fn parse_headers<S: AsRef<str>>(tokens: &[S]) -> Result<Headers> {
    let mut headers = Headers::new();
    for token in tokens {
        let (name, value) = parse_header(token.as_ref())?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Serialize headers back into `Name:Value` tokens
pub fn to_tokens(headers: &Headers) -> Vec<String> {
    headers
        .iter()
        .map(|(name, value)| format!("{name}:{value}"))
        .collect()
}
