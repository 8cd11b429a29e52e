//! Lesson storage: the word pairs loaded for the active course chapter.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::rng;

/// How many pairs a single matching round draws from the lesson.
pub const ROUND_PAIR_CAP: usize = 10;

const AUDIO_SUFFIX: &str = ".mp3";

/// One Korean/English vocabulary pair with its pronunciation clip.
/// Immutable once loaded; a new lesson replaces the whole set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    pub korean: String,
    pub english: String,
    /// Clip filename, always normalized to end in `.mp3`.
    pub audio_ref: String,
}

/// The full pair set for the active lesson, shuffled once at load so that
/// `first_n` is a uniform sample without replacement.
#[derive(Debug, Clone, Default)]
pub struct WordPairStore {
    pairs: Vec<WordPair>,
}

impl WordPairStore {
    /// Build a store from raw spreadsheet rows.
    ///
    /// The first row is the header and is discarded. Each data row needs at
    /// least three fields (korean, english, audio ref); shorter rows are
    /// logged and dropped without failing the load. A load that produces no
    /// usable pairs at all is an error, so a previously loaded lesson is
    /// never replaced by an empty one.
    pub fn load(rows: &[Vec<String>]) -> Result<Self> {
        let mut pairs = Vec::new();
        for (row_idx, row) in rows.iter().enumerate().skip(1) {
            if row.len() < 3 {
                let err = GameError::MalformedRow {
                    row: row_idx,
                    found: row.len(),
                };
                log::warn!("dropping lesson row: {err}");
                continue;
            }
            pairs.push(WordPair {
                korean: row[0].trim().to_string(),
                english: row[1].trim().to_string(),
                audio_ref: normalize_audio_ref(row[2].trim()),
            });
        }
        if pairs.is_empty() {
            return Err(GameError::LoadFailed(
                "no usable word pair rows in lesson data".into(),
            ));
        }
        rng::shuffle(&mut pairs);
        log::info!("lesson loaded with {} word pairs", pairs.len());
        Ok(Self { pairs })
    }

    pub fn pairs(&self) -> &[WordPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Prefix of the shuffled pair set, used to cap round size.
    pub fn first_n(&self, n: usize) -> &[WordPair] {
        &self.pairs[..n.min(self.pairs.len())]
    }

    /// Re-shuffle the pair order in place. Called between rounds so a restart
    /// of the same lesson deals a fresh hand.
    pub fn reshuffle(&mut self) {
        rng::shuffle(&mut self.pairs);
    }

    pub fn find_by_korean(&self, word: &str) -> Result<&WordPair> {
        self.pairs
            .iter()
            .find(|p| p.korean == word)
            .ok_or_else(|| GameError::WordNotFound(word.to_string()))
    }

    pub fn find_by_english(&self, word: &str) -> Result<&WordPair> {
        self.pairs
            .iter()
            .find(|p| p.english == word)
            .ok_or_else(|| GameError::WordNotFound(word.to_string()))
    }

    /// Whether the two words form a known pair, in either order.
    pub fn is_pair(&self, a: &str, b: &str) -> bool {
        self.pairs
            .iter()
            .any(|p| (p.korean == a && p.english == b) || (p.korean == b && p.english == a))
    }
}

/// Guarantee the sound-file suffix the audio player expects.
fn normalize_audio_ref(raw: &str) -> String {
    if raw.ends_with(AUDIO_SUFFIX) {
        raw.to_string()
    } else {
        format!("{raw}{AUDIO_SUFFIX}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn lesson_rows() -> Vec<Vec<String>> {
        rows(&[
            &["Korean", "English", "Sound"],
            &["사과", "apple", "apple_kr"],
            &["학교", "school", "school_kr.mp3"],
            &["물", "water", "water_kr"],
        ])
    }

    #[test]
    fn load_skips_header_and_normalizes_audio() {
        let store = WordPairStore::load(&lesson_rows()).unwrap();
        assert_eq!(store.len(), 3);
        assert!(store.pairs().iter().all(|p| p.audio_ref.ends_with(".mp3")));
        assert!(store.pairs().iter().all(|p| p.korean != "Korean"));
        let school = store.find_by_english("school").unwrap();
        assert_eq!(school.audio_ref, "school_kr.mp3");
    }

    #[test]
    fn load_drops_short_rows_without_failing() {
        let mut data = lesson_rows();
        data.insert(2, vec!["외톨이".to_string()]);
        let store = WordPairStore::load(&data).unwrap();
        assert_eq!(store.len(), 3);
        assert!(store.find_by_korean("외톨이").is_err());
    }

    #[test]
    fn load_with_no_usable_rows_is_an_error() {
        let data = rows(&[&["Korean", "English", "Sound"], &["혼자"]]);
        assert!(matches!(
            WordPairStore::load(&data),
            Err(GameError::LoadFailed(_))
        ));
        assert!(matches!(
            WordPairStore::load(&[]),
            Err(GameError::LoadFailed(_))
        ));
    }

    #[test]
    fn first_n_caps_at_available_pairs() {
        let store = WordPairStore::load(&lesson_rows()).unwrap();
        assert_eq!(store.first_n(2).len(), 2);
        assert_eq!(store.first_n(ROUND_PAIR_CAP).len(), 3);
    }

    #[test]
    fn lookups_are_exact_and_explicit_on_miss() {
        let store = WordPairStore::load(&lesson_rows()).unwrap();
        assert_eq!(store.find_by_korean("사과").unwrap().english, "apple");
        assert!(matches!(
            store.find_by_korean("사"),
            Err(GameError::WordNotFound(_))
        ));
    }

    #[test]
    fn is_pair_is_symmetric() {
        let store = WordPairStore::load(&lesson_rows()).unwrap();
        assert!(store.is_pair("사과", "apple"));
        assert!(store.is_pair("apple", "사과"));
        assert!(!store.is_pair("사과", "school"));
    }
}
