//! Round decks: the two shuffled card columns a matching round is played on.

use serde::{Deserialize, Serialize};

use crate::rng;
use crate::store::WordPair;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardLanguage {
    Korean,
    English,
}

/// One clickable card face. Cards are owned by the current round and rebuilt
/// wholesale when a round starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundCard {
    pub word: String,
    pub language: CardLanguage,
    /// Pronunciation clip, present only on Korean cards.
    pub audio_ref: Option<String>,
    /// Face currently showing its word as part of a pending selection.
    pub revealed: bool,
    pub matched: bool,
}

impl RoundCard {
    fn new(word: String, language: CardLanguage, audio_ref: Option<String>) -> Self {
        Self {
            word,
            language,
            audio_ref,
            revealed: false,
            matched: false,
        }
    }

    /// A card out of play or mid-selection cannot be picked again.
    pub fn selectable(&self) -> bool {
        !self.revealed && !self.matched
    }
}

/// The cards for one round: the English column followed by the Korean
/// column, each shuffled independently so the two columns carry no
/// positional correlation — finding a pair has to go through the words.
#[derive(Debug, Clone, Default)]
pub struct RoundDeck {
    cards: Vec<RoundCard>,
    english_count: usize,
}

impl RoundDeck {
    /// Deal a round from (up to 10) lesson pairs. Each column is a separate
    /// Fisher–Yates shuffle of the same pair set; audio refs ride along on
    /// the Korean cards only.
    pub fn build_round(pairs: &[WordPair]) -> Self {
        let mut english: Vec<&WordPair> = pairs.iter().collect();
        let mut korean: Vec<&WordPair> = pairs.iter().collect();
        rng::shuffle(&mut english);
        rng::shuffle(&mut korean);

        let mut cards = Vec::with_capacity(english.len() + korean.len());
        for pair in &english {
            cards.push(RoundCard::new(
                pair.english.clone(),
                CardLanguage::English,
                None,
            ));
        }
        for pair in &korean {
            cards.push(RoundCard::new(
                pair.korean.clone(),
                CardLanguage::Korean,
                Some(pair.audio_ref.clone()),
            ));
        }
        Self {
            cards,
            english_count: english.len(),
        }
    }

    pub fn cards(&self) -> &[RoundCard] {
        &self.cards
    }

    pub fn card(&self, id: usize) -> Option<&RoundCard> {
        self.cards.get(id)
    }

    pub fn card_mut(&mut self, id: usize) -> Option<&mut RoundCard> {
        self.cards.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card ids of the English column (always `0..english_count`).
    pub fn english_ids(&self) -> std::ops::Range<usize> {
        0..self.english_count
    }

    /// Card ids of the Korean column.
    pub fn korean_ids(&self) -> std::ops::Range<usize> {
        self.english_count..self.cards.len()
    }

    pub fn all_matched(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|c| c.matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(n: usize) -> Vec<WordPair> {
        (0..n)
            .map(|i| WordPair {
                korean: format!("한국어{i}"),
                english: format!("english{i}"),
                audio_ref: format!("clip{i}.mp3"),
            })
            .collect()
    }

    #[test]
    fn build_round_deals_one_card_per_word_per_column() {
        let input = pairs(10);
        let deck = RoundDeck::build_round(&input);
        assert_eq!(deck.len(), 20);
        assert_eq!(deck.english_ids().len(), 10);
        assert_eq!(deck.korean_ids().len(), 10);

        let mut english: Vec<&str> = deck.english_ids().map(|i| deck.cards()[i].word.as_str()).collect();
        let mut korean: Vec<&str> = deck.korean_ids().map(|i| deck.cards()[i].word.as_str()).collect();
        english.sort_unstable();
        korean.sort_unstable();
        let mut expected_english: Vec<&str> = input.iter().map(|p| p.english.as_str()).collect();
        let mut expected_korean: Vec<&str> = input.iter().map(|p| p.korean.as_str()).collect();
        expected_english.sort_unstable();
        expected_korean.sort_unstable();
        assert_eq!(english, expected_english);
        assert_eq!(korean, expected_korean);
    }

    #[test]
    fn audio_rides_on_korean_cards_only() {
        let deck = RoundDeck::build_round(&pairs(4));
        for id in deck.english_ids() {
            let card = &deck.cards()[id];
            assert_eq!(card.language, CardLanguage::English);
            assert!(card.audio_ref.is_none());
        }
        for id in deck.korean_ids() {
            let card = &deck.cards()[id];
            assert_eq!(card.language, CardLanguage::Korean);
            assert!(card.audio_ref.as_deref().is_some_and(|r| r.ends_with(".mp3")));
        }
    }

    #[test]
    fn cards_start_face_down_and_selectable() {
        let deck = RoundDeck::build_round(&pairs(3));
        assert!(deck.cards().iter().all(|c| c.selectable()));
        assert!(!deck.all_matched());
    }

    #[test]
    fn empty_input_builds_an_empty_deck() {
        let deck = RoundDeck::build_round(&[]);
        assert!(deck.is_empty());
        assert!(!deck.all_matched());
    }
}
