//! Keyword substitution applied to every piece of card text before it is stored.
//!
//! The vendor text uses its own formatting tags, typographic punctuation and
//! squashed names (`FrontArc`). [`TextNormalizer`] is the seam the converter uses to
//! rewrite those; [`KeywordTable`] is the regex-driven implementation.

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::error::IResult;

pub trait TextNormalizer {
    /// Rewrites free text (names, abilities, captions).
    fn replace(&self, text: &str) -> String;
    /// Corrects short tokens such as stat and action names. Unknown tokens pass through.
    fn fix_exact_match(&self, token: &str) -> String;
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordRule {
    pub pattern: String,
    /// Replacement text; `$1`-style group references are expanded.
    pub replacement: String,
}

/// On-disk shape of a keyword table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeywordTableConfig {
    #[serde(default)]
    pub replace: Vec<KeywordRule>,
    #[serde(default)]
    pub exact: HashMap<String, String>,
}

const BUILTIN_RULES: &[(&str, &str)] = &[
    (r"<br\s*/?>", "\n"),
    (r"</?\s*(?:b|i|strong|em)\s*>", ""),
    ("[\u{2018}\u{2019}]", "'"),
    ("[\u{201C}\u{201D}]", "\""),
    ("\u{00A0}", " "),
];

const BUILTIN_EXACT: &[(&str, &str)] = &[
    ("FrontArc", "Front Arc"),
    ("RearArc", "Rear Arc"),
    ("FullFrontArc", "Full Front Arc"),
    ("FullRearArc", "Full Rear Arc"),
    ("BullseyeArc", "Bullseye Arc"),
    ("SingleTurretArc", "Single Turret Arc"),
    ("DoubleTurretArc", "Double Turret Arc"),
    ("Target Lock", "Lock"),
];

/// Ordered regex substitutions plus an exact-match token map.
///
/// The default table is empty and leaves all text untouched.
#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    rules: Vec<(Regex, String)>,
    exact: HashMap<String, String>,
}

impl KeywordTable {
    pub fn from_config(config: KeywordTableConfig) -> IResult<KeywordTable> {
        let rules = config
            .replace
            .into_iter()
            .map(|rule| Ok((Regex::new(&rule.pattern)?, rule.replacement)))
            .collect::<IResult<Vec<_>>>()?;

        Ok(KeywordTable {
            rules,
            exact: config.exact,
        })
    }

    pub fn from_json_file(path: &Path) -> IResult<KeywordTable> {
        let data = std::fs::read_to_string(path)?;
        Self::from_config(serde_json::from_str(&data)?)
    }

    /// The table the converter uses when none is configured.
    pub fn builtin() -> IResult<KeywordTable> {
        let config = KeywordTableConfig {
            replace: BUILTIN_RULES
                .iter()
                .map(|(pattern, replacement)| KeywordRule {
                    pattern: pattern.to_string(),
                    replacement: replacement.to_string(),
                })
                .collect(),
            exact: BUILTIN_EXACT
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        };

        Self::from_config(config)
    }
}

impl TextNormalizer for KeywordTable {
    fn replace(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |text, (pattern, replacement)| {
                pattern.replace_all(&text, replacement.as_str()).into_owned()
            })
    }

    fn fix_exact_match(&self, token: &str) -> String {
        self.exact
            .get(token)
            .cloned()
            .unwrap_or_else(|| token.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builtin_cleans_vendor_markup() {
        let table = KeywordTable::builtin().unwrap();
        assert_eq!(
            table.replace("<b>Action:</b> Gain 1 \u{2018}focus\u{2019} token.<br>Then roll."),
            "Action: Gain 1 'focus' token.\nThen roll."
        );
        assert_eq!(table.replace("Fly casual"), "Fly casual");
    }

    #[test]
    fn exact_matches_only_rewrite_whole_tokens() {
        let table = KeywordTable::builtin().unwrap();
        assert_eq!(table.fix_exact_match("FrontArc"), "Front Arc");
        assert_eq!(table.fix_exact_match("Target Lock"), "Lock");
        assert_eq!(table.fix_exact_match("Focus"), "Focus");
        assert_eq!(table.fix_exact_match("FrontArcs"), "FrontArcs");
    }

    #[test]
    fn loads_rules_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.json");
        std::fs::write(
            &path,
            r#"{"replace": [{"pattern": "\\[(\\w+)\\]", "replacement": "$1"}], "exact": {"Barrel": "Barrel Roll"}}"#,
        )
        .unwrap();

        let table = KeywordTable::from_json_file(&path).unwrap();
        assert_eq!(table.replace("Perform a [Boost] action."), "Perform a Boost action.");
        assert_eq!(table.fix_exact_match("Barrel"), "Barrel Roll");
    }

    #[test]
    fn invalid_patterns_are_rejected() {
        let config = KeywordTableConfig {
            replace: vec![KeywordRule {
                pattern: "(".to_string(),
                replacement: String::new(),
            }],
            exact: HashMap::new(),
        };
        assert!(matches!(
            KeywordTable::from_config(config),
            Err(crate::error::ErrorKind::InvalidKeywordPattern { .. })
        ));
    }
}
