use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Version of the tag grammar the model is asked to produce.
///
/// The two versions disagree on how the overall metric is expressed and on
/// which per-place tags exist, so each response is parsed against exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammarVersion {
    /// `[DIFFICULTY]` lazy score, `[PHOTO]` per place
    Lazy,
    /// `[STARS]`, `[STEPS]`, `[MOVEMENTS]`, `[INDOOR]`, `[LATLNG]` per place
    #[default]
    Extended,
}

const SHARED_TAGS: &[&str] = &["TITLE", "COMMENT", "DAY", "PLACE", "DESC", "TIP"];
const LAZY_TAGS: &[&str] = &["DIFFICULTY", "PHOTO"];
const EXTENDED_TAGS: &[&str] = &["STARS", "STEPS", "MOVEMENTS", "INDOOR", "LATLNG"];

impl GrammarVersion {
    pub const ALL: [GrammarVersion; 2] = [GrammarVersion::Lazy, GrammarVersion::Extended];

    pub fn as_str(&self) -> &'static str {
        match self {
            GrammarVersion::Lazy => "lazy",
            GrammarVersion::Extended => "extended",
        }
    }

    fn own_tags(&self) -> &'static [&'static str] {
        match self {
            GrammarVersion::Lazy => LAZY_TAGS,
            GrammarVersion::Extended => EXTENDED_TAGS,
        }
    }

    fn other(&self) -> GrammarVersion {
        match self {
            GrammarVersion::Lazy => GrammarVersion::Extended,
            GrammarVersion::Extended => GrammarVersion::Lazy,
        }
    }

    /// Every tag this grammar understands.
    pub fn tags(&self) -> Vec<&'static str> {
        SHARED_TAGS
            .iter()
            .chain(self.own_tags())
            .copied()
            .collect()
    }

    /// Tags belonging only to the other grammar that appear in `text`.
    ///
    /// A non-empty result means the model answered in the wrong shape; those
    /// tags are ignored by the parser and their values fall back to defaults.
    pub fn foreign_tags(&self, text: &str) -> Vec<&'static str> {
        self.other()
            .own_tags()
            .iter()
            .copied()
            .filter(|tag| text.contains(&format!("[{}]", tag)))
            .collect()
    }
}

impl fmt::Display for GrammarVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrammarVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GrammarVersion::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown grammar version: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_per_version() {
        let lazy = GrammarVersion::Lazy.tags();
        assert!(lazy.contains(&"DIFFICULTY"));
        assert!(lazy.contains(&"PHOTO"));
        assert!(!lazy.contains(&"STARS"));

        let extended = GrammarVersion::Extended.tags();
        assert!(extended.contains(&"LATLNG"));
        assert!(extended.contains(&"TITLE"));
        assert!(!extended.contains(&"DIFFICULTY"));
    }

    #[test]
    fn test_foreign_tags() {
        let text = "[TITLE] Trip\n[DIFFICULTY] 80\n[DAY 1]\n[PLACE] Cafe\n[PHOTO] 4";
        assert_eq!(
            GrammarVersion::Extended.foreign_tags(text),
            vec!["DIFFICULTY", "PHOTO"]
        );
        assert!(GrammarVersion::Lazy.foreign_tags(text).is_empty());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Lazy".parse::<GrammarVersion>(), Ok(GrammarVersion::Lazy));
        assert_eq!(
            " extended ".parse::<GrammarVersion>(),
            Ok(GrammarVersion::Extended)
        );
        assert!("v3".parse::<GrammarVersion>().is_err());
    }
}
