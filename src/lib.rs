//! Hangul Match core crate.
//!
//! A browser (WASM) matching game for learning Korean vocabulary: pick a
//! Korean card and an English card, hear the pronunciation, and clear the
//! board before the attempts run out. Easy mode plays with open faces; hard
//! mode hides the cards after a timed study period. Practice, picture, and
//! speaking modes reuse the same lesson data and scoring.
//!
//! Game logic is pure Rust (natively testable); everything that touches the
//! page lives in [`web`].

use wasm_bindgen::prelude::*;

pub mod answer;
pub mod config;
pub mod deck;
pub mod engine;
pub mod error;
pub mod rng;
pub mod store;
pub mod timer;
pub mod web;

pub use config::{GameMode, ModeConfig, PACING_DELAY_MS};
pub use deck::{CardLanguage, RoundCard, RoundDeck};
pub use engine::{MatchEngine, Phase, RoundVerdict, SelectOutcome};
pub use error::{GameError, Result};
pub use store::{ROUND_PAIR_CAP, WordPair, WordPairStore};
pub use timer::{StudyTimer, TimerEvent};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("hangul-match initialized");
}

// -----------------------------------------------------------------------------
// Built-in demo lesson (korean, english, audio clip)
// Clip names are normalized to `.mp3` by the store on load.
// -----------------------------------------------------------------------------

pub const DEMO_LESSON: &[(&str, &str, &str)] = &[
    ("사과", "apple", "sagwa"),
    ("학교", "school", "hakgyo"),
    ("물", "water", "mul"),
    ("책", "book", "chaek"),
    ("친구", "friend", "chingu"),
    ("사랑", "love", "sarang"),
    ("시간", "time", "sigan"),
    ("음식", "food", "eumsik"),
    ("가족", "family", "gajok"),
    ("선생님", "teacher", "seonsaengnim"),
    ("의자", "chair", "uija"),
    ("창문", "window", "changmun"),
];
