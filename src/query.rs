//! Key filtering by glob patterns
//!
//! Used by the CLI to narrow both option settings and legacy preference
//! listings (e.g. `"icEnable*"` or `"*extendButton*"`). Patterns combine
//! with OR logic: a key is kept when any pattern matches it.

use crate::error::{Error, Result};
use glob::Pattern;
use std::collections::HashMap;

/// Filter a string-keyed map down to the keys matching any pattern
pub fn query_keys<V: Clone>(
    map: &HashMap<String, V>,
    patterns: &[&str],
) -> Result<HashMap<String, V>> {
    // Compile all patterns first to fail fast on an invalid one
    let compiled: Vec<Pattern> = patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| Error::InvalidGlobPattern(format!("'{}': {}", p, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(map
        .iter()
        .filter(|(key, _)| compiled.iter().any(|pattern| pattern.matches(key)))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HashMap<String, bool> {
        HashMap::from([
            ("icEnableComposeMessage".to_string(), true),
            ("icEnableReplyMessage".to_string(), false),
            ("icEnableForwardMessage".to_string(), true),
        ])
    }

    #[test]
    fn test_single_pattern() {
        let result = query_keys(&sample(), &["*Reply*"]).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result.contains_key("icEnableReplyMessage"));
    }

    #[test]
    fn test_multiple_patterns_or_logic() {
        let result = query_keys(&sample(), &["*Reply*", "*Forward*"]).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_exact_match() {
        let result = query_keys(&sample(), &["icEnableComposeMessage"]).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_no_matches() {
        let result = query_keys(&sample(), &["nothing.*"]).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(query_keys(&sample(), &["[invalid"]).is_err());
    }
}
