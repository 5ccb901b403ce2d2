//! Compiles a keyword set into a single case-insensitive matcher
//!
//! Keywords are matched literally: every regex metacharacter is escaped
//! before the alternation is built, so `c++` finds the substring `c++` and
//! not "c, one or more times".

use crate::error::ScanError;
use crate::scan_events::Match;
use regex::RegexBuilder;

/// A compiled disjunction of literal keywords.
///
/// An empty keyword set compiles to a matcher that matches nothing; the
/// zero-alternative alternation never reaches the regex engine.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Option<regex::Regex>,
}

impl CompiledPattern {
    /// Find every keyword occurrence in `chunk`, leftmost-first and
    /// non-overlapping, with offsets shifted by `base` so they are absolute
    /// positions in the full input.
    pub fn find_in(&self, chunk: &str, base: usize) -> Vec<Match> {
        let Some(re) = &self.regex else {
            return Vec::new();
        };
        re.find_iter(chunk)
            .map(|m| Match {
                index: base + m.start(),
                text: m.as_str().to_string(),
                length: m.len(),
            })
            .collect()
    }
}

/// Build a single case-insensitive pattern matching any of `keywords`
/// literally.
pub fn compile(keywords: &[String]) -> Result<CompiledPattern, ScanError> {
    if keywords.is_empty() {
        return Ok(CompiledPattern { regex: None });
    }

    let alternation = keywords
        .iter()
        .map(|keyword| regex::escape(keyword))
        .collect::<Vec<_>>()
        .join("|");

    let regex = RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()?;

    Ok(CompiledPattern { regex: Some(regex) })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_literal_match() {
        let pattern = compile(&keywords(&["cat"])).unwrap();
        let found = pattern.find_in("the cat sat", 0);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].index, 4);
        assert_eq!(found[0].text, "cat");
        assert_eq!(found[0].length, 3);
    }

    #[test]
    fn test_special_characters_escaped() {
        let pattern = compile(&keywords(&["c++"])).unwrap();
        let found = pattern.find_in("c++ is fast", 0);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].index, 0);
        assert_eq!(found[0].text, "c++");
        assert_eq!(found[0].length, 3);
    }

    #[test]
    fn test_case_insensitive() {
        let pattern = compile(&keywords(&["Cat"])).unwrap();
        let found = pattern.find_in("cat CAT CaT", 0);

        assert_eq!(found.len(), 3);
        assert_eq!(found[0].text, "cat");
        assert_eq!(found[1].text, "CAT");
        assert_eq!(found[2].text, "CaT");
    }

    #[test]
    fn test_empty_keyword_list_matches_nothing() {
        let pattern = compile(&[]).unwrap();
        let found = pattern.find_in("anything at all", 0);

        assert!(found.is_empty());
    }

    #[test]
    fn test_matches_are_in_ascending_order() {
        let pattern = compile(&keywords(&["mat", "cat"])).unwrap();
        let found = pattern.find_in("the cat sat on the mat", 0);

        let indices: Vec<usize> = found.iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![4, 19]);
    }

    #[test]
    fn test_base_offset_is_applied() {
        let pattern = compile(&keywords(&["cat"])).unwrap();
        let found = pattern.find_in("cat", 100);

        assert_eq!(found[0].index, 100);
    }

    #[test]
    fn test_non_overlapping_matches_resume_after_each() {
        let pattern = compile(&keywords(&["aa"])).unwrap();
        let found = pattern.find_in("aaaa", 0);

        let indices: Vec<usize> = found.iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }
}
