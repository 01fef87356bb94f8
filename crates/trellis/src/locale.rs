//! Locale preferences.
//!
//! Apps render text per the user's locale list. The `TRELLIS_LOCALES`
//! environment variable (comma-separated BCP 47 tags) prepends to the
//! system list, so it raises preferences without hiding the fallbacks.

use std::env;

/// Environment variable prepended to the system locale list.
const ENV_LOCALES: &str = "TRELLIS_LOCALES";

/// The user's locale preferences, most preferred first: environment tags in
/// order, then the system list.
pub(crate) fn system_locales() -> Vec<String> {
    let mut list = match env::var(ENV_LOCALES) {
        Ok(raw) => parse_locales(&raw),
        Err(_) => Vec::new(),
    };
    list.extend(sys_locale::get_locales());
    list
}

/// Split a comma-separated tag list, dropping empty entries.
fn parse_locales(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_tags() {
        assert_eq!(parse_locales("en-US,ja-JP"), vec!["en-US", "ja-JP"]);
        assert_eq!(parse_locales(" en , , fr "), vec!["en", "fr"]);
        assert!(parse_locales("").is_empty());
        assert!(parse_locales(" , ,").is_empty());
    }
}
