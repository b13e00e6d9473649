//! Utility functions for fwstamp

use crate::defaults::{ENV_ENV_NAME, ENV_PIOENV, UNKNOWN_ENV_NAME};
use std::env;

/// Return the first of `keys` whose value is set and non-empty
pub fn first_env_value<F>(keys: &[&str], lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .filter_map(|key| lookup(*key))
        .find(|value| !value.trim().is_empty())
}

/// Resolve the build environment name
///
/// Order: explicit value, `PIOENV` (exported by PlatformIO), `FWSTAMP_ENV_NAME`,
/// then `"unknown"`.
pub fn resolve_env_name(explicit: Option<String>) -> String {
    resolve_env_name_with(explicit, |key| env::var(key).ok())
}

/// [`resolve_env_name`] with an injectable environment lookup
pub fn resolve_env_name_with<F>(explicit: Option<String>, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    explicit
        .filter(|name| !name.trim().is_empty())
        .or_else(|| first_env_value(&[ENV_PIOENV, ENV_ENV_NAME], lookup))
        .unwrap_or_else(|| UNKNOWN_ENV_NAME.to_string())
}

/// Split `key=value`, trimming both halves; `None` if either side is empty
pub fn split_key_value(spec: &str) -> Option<(&str, &str)> {
    let (key, value) = spec.split_once('=')?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        None
    } else {
        Some((key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_explicit_env_name_wins() {
        let lookup = lookup_from(&[("PIOENV", "esp32")]);
        assert_eq!(
            resolve_env_name_with(Some("opendtufusion".to_string()), lookup),
            "opendtufusion"
        );
    }

    #[test]
    fn test_pioenv_before_fwstamp_env_name() {
        let lookup = lookup_from(&[("PIOENV", "esp32"), ("FWSTAMP_ENV_NAME", "other")]);
        assert_eq!(resolve_env_name_with(None, lookup), "esp32");
    }

    #[test]
    fn test_blank_values_are_skipped() {
        let lookup = lookup_from(&[("PIOENV", "  "), ("FWSTAMP_ENV_NAME", "generic")]);
        assert_eq!(resolve_env_name_with(Some(String::new()), lookup), "generic");
    }

    #[test]
    fn test_unknown_env_name() {
        assert_eq!(resolve_env_name_with(None, lookup_from(&[])), "unknown");
    }

    #[test]
    fn test_split_key_value() {
        assert_eq!(
            split_key_value("esp8266_debug=.pio/build/esp8266-debug/firmware.bin"),
            Some(("esp8266_debug", ".pio/build/esp8266-debug/firmware.bin"))
        );
        assert_eq!(split_key_value("no_separator"), None);
        assert_eq!(split_key_value("=path"), None);
    }
}
