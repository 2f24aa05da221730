//! Ranking and filtering of enumerated constructions.
//!
//! Each target scores `w_f * (zipf / 8) + w_l * (len / max_len)`, both
//! factors normalized; targets under the Zipf floor are dropped and the
//! rest ordered by descending score with a lexicographic tie-break so
//! identical snapshots always rank identically. Without a frequency
//! table the whole stage degrades to a pass-through.

use serde::Deserialize;
use tilelab_lexicon::Dictionary;

use crate::search::Recommendation;

/// Top of the Zipf scale; the frequency normalization divisor.
const ZIPF_SCALE: f32 = 8.0;

/// Scoring weights and the recommendation frequency floor.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScoreConfig {
    /// Targets with Zipf below this are dropped.
    #[serde(default = "default_frequency_floor")]
    pub frequency_floor: f32,

    /// Weight of the normalized Zipf factor.
    #[serde(default = "default_frequency_weight")]
    pub frequency_weight: f32,

    /// Weight of the normalized length factor.
    #[serde(default = "default_length_weight")]
    pub length_weight: f32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            frequency_floor: default_frequency_floor(),
            frequency_weight: default_frequency_weight(),
            length_weight: default_length_weight(),
        }
    }
}

const fn default_frequency_floor() -> f32 {
    1.0
}

const fn default_frequency_weight() -> f32 {
    1.5
}

const fn default_length_weight() -> f32 {
    1.0
}

/// Score one target word.
fn score(word: &str, dict: &Dictionary, config: &ScoreConfig) -> f32 {
    let frequency = dict.zipf(word) / ZIPF_SCALE;
    let length = word.len() as f32 / dict.max_len().max(1) as f32;
    config.frequency_weight * frequency + config.length_weight * length
}

/// Order recommendations by descending score, dropping targets under
/// the frequency floor. A missing frequency table leaves the input
/// untouched: no sort, no filter.
pub fn rank(
    recommendations: Vec<Recommendation>,
    dict: &Dictionary,
    config: &ScoreConfig,
) -> Vec<Recommendation> {
    if !dict.has_frequencies() {
        return recommendations;
    }

    let mut scored: Vec<(f32, Recommendation)> = recommendations
        .into_iter()
        .filter(|r| dict.zipf(&r.word) >= config.frequency_floor)
        .map(|r| (score(&r.word, dict, config), r))
        .collect();

    scored.sort_by(|(sa, ra), (sb, rb)| {
        sb.partial_cmp(sa)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| ra.word.cmp(&rb.word))
    });

    scored.into_iter().map(|(_, r)| r).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Block;

    fn rec(word: &str) -> Recommendation {
        Recommendation {
            word: word.to_owned(),
            blocks: vec![
                Block::Letter(word.chars().next().unwrap()),
                Block::Letter(word.chars().nth(1).unwrap()),
            ],
        }
    }

    fn dict() -> Dictionary {
        Dictionary::from_words(["hello", "hex", "zyzzyva"]).with_frequencies([
            (String::from("hello"), 6.0),
            (String::from("hex"), 3.0),
            (String::from("zyzzyva"), 0.5),
        ])
    }

    #[test]
    fn common_long_word_ranks_first() {
        let ranked = rank(vec![rec("hex"), rec("hello")], &dict(), &ScoreConfig::default());
        let words: Vec<&str> = ranked.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["hello", "hex"]);
    }

    #[test]
    fn floor_drops_rare_words() {
        let ranked = rank(
            vec![rec("hello"), rec("zyzzyva")],
            &dict(),
            &ScoreConfig::default(),
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].word, "hello");
    }

    #[test]
    fn missing_frequency_table_is_a_pass_through() {
        let dict = Dictionary::from_words(["hello", "hex"]);
        let input = vec![rec("hex"), rec("hello")];
        let ranked = rank(input.clone(), &dict, &ScoreConfig::default());
        assert_eq!(ranked, input, "no sort, no filter");
    }

    #[test]
    fn tie_break_is_lexicographic() {
        let dict = Dictionary::from_words(["tab", "bat"]).with_frequencies([
            (String::from("tab"), 4.0),
            (String::from("bat"), 4.0),
        ]);
        let ranked = rank(vec![rec("tab"), rec("bat")], &dict, &ScoreConfig::default());
        let words: Vec<&str> = ranked.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["bat", "tab"]);
    }

    #[test]
    fn default_config_matches_documented_values() {
        let config = ScoreConfig::default();
        assert!((config.frequency_floor - 1.0).abs() < f32::EPSILON);
        assert!((config.frequency_weight - 1.5).abs() < f32::EPSILON);
        assert!((config.length_weight - 1.0).abs() < f32::EPSILON);
    }
}
