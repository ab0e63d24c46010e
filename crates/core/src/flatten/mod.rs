//! The `key=value;key=value` text format exchanged with the driver layer.
//!
//! There is no escaping. Keys and values must not contain `=` or `;`, which
//! [`ParameterMap::set`] enforces on the way in.

use tracing::{trace, warn};

use crate::ParameterMap;

pub const KEY_VALUE_SEPARATOR: char = '=';
pub const ENTRY_SEPARATOR: char = ';';

/// Joins every entry as `key=value` with `;`, in key order and without a
/// trailing separator. An empty map flattens to `""`.
pub fn flatten(params: &ParameterMap) -> String {
    let mut out = String::new();
    for (index, (key, value)) in params.iter().enumerate() {
        if index > 0 {
            out.push(ENTRY_SEPARATOR);
        }
        out.push_str(key);
        out.push(KEY_VALUE_SEPARATOR);
        out.push_str(value);
    }
    out
}

/// Rebuilds a map from its flattened form.
///
/// Each segment is split on its first `=`. Segments without one, or with an
/// empty key, are logged and skipped so the remaining entries still load.
/// When a key repeats, the last occurrence wins.
pub fn unflatten(text: &str) -> ParameterMap {
    let mut params = ParameterMap::new();
    if text.is_empty() {
        return params;
    }

    for segment in text.split(ENTRY_SEPARATOR) {
        if segment.is_empty() {
            trace!("skipping empty parameter segment");
            continue;
        }

        match segment.split_once(KEY_VALUE_SEPARATOR) {
            Some((key, value)) if !key.is_empty() => params.insert_raw(key, value),
            _ => warn!(segment, "skipping malformed parameter segment"),
        }
    }

    params
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use tracing_test::traced_test;

    use super::*;

    fn map(entries: &[(&str, &str)]) -> ParameterMap {
        let mut params = ParameterMap::new();
        for (key, value) in entries {
            params.set(key, value).unwrap();
        }
        params
    }

    #[test]
    fn unflattens_preview_settings() {
        let params = unflatten("preview-size=640x480;preview-format=yuv420sp");

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("preview-size"), Some("640x480"));
        assert_eq!(params.get("preview-format"), Some("yuv420sp"));
    }

    #[test]
    fn flattens_in_key_order_without_trailing_separator() {
        let params = map(&[("zoom-supported", "true"), ("zoom", "3")]);
        let text = flatten(&params);

        assert_eq!(text, "zoom=3;zoom-supported=true");
        assert_eq!(unflatten(&text), params);
    }

    #[test]
    fn empty_round_trips() {
        assert_eq!(flatten(&ParameterMap::new()), "");
        assert!(unflatten("").is_empty());
    }

    #[test]
    fn round_trips_structured_and_empty_values() {
        let params = map(&[
            ("focus-areas", "(-10,-10,0,0,300),(0,0,10,10,700)"),
            ("preview-fps-range-values", "(15000,30000),(30000,30000)"),
            ("preview-size-values", "800x600,480x320"),
            ("gps-processing-method", ""),
            ("scene mode", "night portrait"),
        ]);

        assert_eq!(unflatten(&flatten(&params)), params);
    }

    #[test]
    #[traced_test]
    fn skips_segments_without_separator() {
        let params = unflatten("badentrywithoutequals;zoom=3");

        assert_eq!(params, map(&[("zoom", "3")]));
        assert!(logs_contain("skipping malformed parameter segment"));
    }

    #[test]
    fn skips_empty_keys_and_empty_segments() {
        let params = unflatten("=orphan;;zoom=3;");
        assert_eq!(params, map(&[("zoom", "3")]));
    }

    #[test]
    fn splits_on_first_separator_only() {
        let params = unflatten("note=a=b");
        assert_eq!(params.get("note"), Some("a=b"));
    }

    #[test]
    fn last_repeated_key_wins() {
        let params = unflatten("zoom=1;zoom=2;zoom=3");
        assert_eq!(params.get("zoom"), Some("3"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn whitespace_is_preserved() {
        let params = unflatten(" zoom = 3 ");
        assert_eq!(params.get(" zoom "), Some(" 3 "));
        assert_eq!(params.get("zoom"), None);
    }

    #[test]
    fn map_level_unflatten_replaces_contents() {
        let mut params = map(&[("effect", "mono")]);
        params.unflatten("zoom=3");

        assert_eq!(params.get("effect"), None);
        assert_eq!(params.flatten(), "zoom=3");
        assert_eq!(params.to_string(), "zoom=3");
        assert_eq!("zoom=3".parse::<ParameterMap>().unwrap(), params);
    }

    proptest! {
        /// Any map whose keys and values avoid the delimiters survives the wire.
        #[test]
        fn prop_flatten_round_trips(
            entries in prop::collection::btree_map("[^=;]{1,16}", "[^=;]{0,24}", 0..12),
        ) {
            let mut params = ParameterMap::new();
            for (key, value) in &entries {
                params.set(key, value).unwrap();
            }

            let restored = unflatten(&flatten(&params));
            prop_assert_eq!(restored.len(), entries.len());
            prop_assert_eq!(restored, params);
        }
    }
}
