// Dataset and lesson-data invariants for the `hangul-match` crate.
// Native-friendly tests; no wasm/browser APIs.

use std::collections::HashSet;

use hangul_match::{ROUND_PAIR_CAP, RoundDeck, WordPair, WordPairStore};

fn demo_rows() -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Korean".to_string(),
        "English".to_string(),
        "Sound".to_string(),
    ]];
    rows.extend(
        hangul_match::DEMO_LESSON
            .iter()
            .map(|(k, e, a)| vec![k.to_string(), e.to_string(), a.to_string()]),
    );
    rows
}

#[test]
fn demo_lesson_covers_a_full_round() {
    assert!(hangul_match::DEMO_LESSON.len() >= ROUND_PAIR_CAP);
}

#[test]
fn demo_lesson_entries_are_unique_and_valid() {
    let mut seen_korean = HashSet::new();
    let mut seen_english = HashSet::new();
    for (korean, english, clip) in hangul_match::DEMO_LESSON {
        assert!(
            seen_korean.insert(*korean),
            "duplicate korean word '{korean}' in DEMO_LESSON"
        );
        assert!(
            seen_english.insert(*english),
            "duplicate english word '{english}' in DEMO_LESSON"
        );
        assert!(!clip.is_empty(), "empty audio clip for '{korean}'");
        assert!(
            english.chars().all(|c| c.is_ascii_lowercase() || c == ' '),
            "english entry '{english}' should be plain lowercase words"
        );
    }
}

#[test]
fn store_load_preserves_the_pair_multiset() {
    let store = WordPairStore::load(&demo_rows()).unwrap();
    assert_eq!(store.len(), hangul_match::DEMO_LESSON.len());
    let loaded: HashSet<(String, String)> = store
        .pairs()
        .iter()
        .map(|p| (p.korean.clone(), p.english.clone()))
        .collect();
    for (korean, english, _) in hangul_match::DEMO_LESSON {
        assert!(loaded.contains(&(korean.to_string(), english.to_string())));
    }
}

#[test]
fn store_normalizes_every_audio_ref() {
    let store = WordPairStore::load(&demo_rows()).unwrap();
    for pair in store.pairs() {
        assert!(
            pair.audio_ref.ends_with(".mp3"),
            "audio ref '{}' not normalized",
            pair.audio_ref
        );
        assert!(!pair.audio_ref.ends_with(".mp3.mp3"));
    }
}

#[test]
fn reshuffle_changes_order_not_content() {
    let mut store = WordPairStore::load(&demo_rows()).unwrap();
    let before: HashSet<String> = store.pairs().iter().map(|p| p.korean.clone()).collect();
    store.reshuffle();
    let after: HashSet<String> = store.pairs().iter().map(|p| p.korean.clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn round_is_capped_at_ten_pairs() {
    let store = WordPairStore::load(&demo_rows()).unwrap();
    assert_eq!(store.first_n(ROUND_PAIR_CAP).len(), ROUND_PAIR_CAP);
}

#[test]
fn full_round_deck_has_ten_cards_per_column_each_word_once() {
    let store = WordPairStore::load(&demo_rows()).unwrap();
    let round = store.first_n(ROUND_PAIR_CAP);
    let deck = RoundDeck::build_round(round);
    assert_eq!(deck.english_ids().len(), ROUND_PAIR_CAP);
    assert_eq!(deck.korean_ids().len(), ROUND_PAIR_CAP);

    let english: HashSet<&str> = deck
        .english_ids()
        .map(|i| deck.cards()[i].word.as_str())
        .collect();
    let korean: HashSet<&str> = deck
        .korean_ids()
        .map(|i| deck.cards()[i].word.as_str())
        .collect();
    // HashSet equality with count equality means each word appears exactly once.
    assert_eq!(english.len(), ROUND_PAIR_CAP);
    assert_eq!(korean.len(), ROUND_PAIR_CAP);
    for pair in round {
        assert!(english.contains(pair.english.as_str()));
        assert!(korean.contains(pair.korean.as_str()));
    }
}

#[test]
fn deck_columns_are_permutations_for_all_sizes() {
    for n in [1usize, 2, 5, 10] {
        let pairs: Vec<WordPair> = (0..n)
            .map(|i| WordPair {
                korean: format!("한국어{i}"),
                english: format!("english{i}"),
                audio_ref: format!("clip{i}.mp3"),
            })
            .collect();
        let deck = RoundDeck::build_round(&pairs);
        let mut english: Vec<&str> = deck
            .english_ids()
            .map(|i| deck.cards()[i].word.as_str())
            .collect();
        let mut korean: Vec<&str> = deck
            .korean_ids()
            .map(|i| deck.cards()[i].word.as_str())
            .collect();
        english.sort_unstable();
        korean.sort_unstable();
        let mut expected_english: Vec<String> = (0..n).map(|i| format!("english{i}")).collect();
        let mut expected_korean: Vec<String> = (0..n).map(|i| format!("한국어{i}")).collect();
        expected_english.sort_unstable();
        expected_korean.sort_unstable();
        assert_eq!(english, expected_english);
        assert_eq!(korean, expected_korean);
    }
}
