use regex::Regex;
use std::sync::LazyLock;

use crate::{descriptor::TokenMap, error::MissingToken};

/// Key of the implicit token holding the current environment name.
pub const ENV_TOKEN: &str = "env";

// Non-greedy so `[a][b]` is two tokens.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.+?)\]").expect("token pattern is valid"));

/// Replace every `[token]` in `line` with its value from `map`.
///
/// Values are inserted as-is and never rescanned. The first unmapped token fails the
/// whole line.
pub fn substitute_line(line: &str, map: &TokenMap) -> Result<String, MissingToken> {
    // Fast path
    if !line.contains('[') {
        return Ok(line.to_string());
    }

    let mut out = String::with_capacity(line.len());
    let mut idx = 0;

    for caps in TOKEN_RE.captures_iter(line) {
        let whole = caps.get(0).expect("group 0 always present");
        let token = &caps[1];

        let value = map
            .get(token)
            .ok_or_else(|| MissingToken(token.to_string()))?;

        out.push_str(&line[idx..whole.start()]);
        out.push_str(value);
        idx = whole.end();
    }

    out.push_str(&line[idx..]);
    Ok(out)
}

/// Token names appearing in `line`, left to right, duplicates kept.
pub fn tokens_in_line(line: &str) -> Vec<&str> {
    TOKEN_RE
        .captures_iter(line)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// Working map for one environment: `base` plus `env = environment`.
pub fn derive_map(base: &TokenMap, environment: &str) -> TokenMap {
    let mut map = base.clone();
    map.insert(ENV_TOKEN.to_string(), environment.to_string());
    map
}
