//! Game mode selection and the behavioral parameters each mode implies.
//!
//! All mode-dependent behavior is resolved here once at game start; the rest
//! of the engine consumes the typed `ModeConfig` and never compares mode
//! strings itself.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::timer::MAX_STUDY_SECS;

/// Pacing delay between the second card selection and the match verdict, so
/// the learner sees both faces before feedback appears.
pub const PACING_DELAY_MS: i32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Matching with faces always visible.
    Easy,
    /// Matching behind placeholders after a timed study period.
    Hard,
    /// Free browsing list with audio, no scoring.
    Practice,
    /// Picture prompt answered by typing the English word.
    Picture,
    /// Pronunciation prompt graded by an external checker.
    Speaking,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Hard => "hard",
            Self::Practice => "practice",
            Self::Picture => "picture",
            Self::Speaking => "speaking",
        }
    }
}

/// Typed per-mode parameters, resolved from the mode name once at game start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeConfig {
    pub mode: GameMode,
    /// Two-card evaluations allowed before the round is lost. `None` means
    /// the mode has no attempt accounting (practice browsing).
    pub max_attempts: Option<u32>,
    /// On a mismatch, keep showing the card words (easy) instead of
    /// reverting them to the placeholder (hard).
    pub reveal_after_mismatch: bool,
    /// Cards start behind the placeholder once play begins.
    pub starts_hidden: bool,
    /// The round opens with a locked, counted-down study period.
    pub timed_study: bool,
    /// Study seconds used when the raw input is missing or below 1.
    pub default_study_secs: u32,
    /// Points awarded per true match.
    pub match_score: u32,
    /// Score at which the round is won.
    pub win_score: u32,
}

impl ModeConfig {
    /// Resolve a mode name into its parameters. Unknown names are rejected
    /// before any game state is touched.
    pub fn resolve(name: &str) -> Result<Self> {
        let base = Self {
            mode: GameMode::Easy,
            max_attempts: Some(15),
            reveal_after_mismatch: true,
            starts_hidden: false,
            timed_study: false,
            default_study_secs: 1,
            match_score: 10,
            win_score: 100,
        };
        match name {
            "easy" => Ok(base),
            "hard" => Ok(Self {
                mode: GameMode::Hard,
                max_attempts: Some(12),
                reveal_after_mismatch: false,
                starts_hidden: true,
                timed_study: true,
                default_study_secs: 10,
                ..base
            }),
            "practice" => Ok(Self {
                mode: GameMode::Practice,
                max_attempts: None,
                ..base
            }),
            "picture" => Ok(Self {
                mode: GameMode::Picture,
                ..base
            }),
            "speaking" => Ok(Self {
                mode: GameMode::Speaking,
                ..base
            }),
            other => Err(GameError::UnknownMode(other.to_string())),
        }
    }

    /// Clamp the raw study-duration input from the page into usable seconds:
    /// unparsable or sub-1 values floor to the mode default, anything above
    /// 60 ceilings to 60.
    pub fn study_duration(&self, raw: &str) -> u32 {
        match raw.trim().parse::<i64>() {
            Ok(secs) if secs >= 1 => (secs as u64).min(MAX_STUDY_SECS as u64) as u32,
            _ => self.default_study_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_knows_every_mode() {
        for name in ["easy", "hard", "practice", "picture", "speaking"] {
            let cfg = ModeConfig::resolve(name).unwrap();
            assert_eq!(cfg.mode.as_str(), name);
        }
    }

    #[test]
    fn resolve_rejects_unknown_modes() {
        assert!(matches!(
            ModeConfig::resolve("nightmare"),
            Err(GameError::UnknownMode(_))
        ));
        assert!(ModeConfig::resolve("").is_err());
        assert!(ModeConfig::resolve("EASY").is_err());
    }

    #[test]
    fn hard_mode_hides_cards_and_limits_attempts() {
        let hard = ModeConfig::resolve("hard").unwrap();
        assert_eq!(hard.max_attempts, Some(12));
        assert!(hard.starts_hidden);
        assert!(hard.timed_study);
        assert!(!hard.reveal_after_mismatch);

        let easy = ModeConfig::resolve("easy").unwrap();
        assert_eq!(easy.max_attempts, Some(15));
        assert!(easy.reveal_after_mismatch);
        assert!(!easy.timed_study);
    }

    #[test]
    fn practice_has_no_attempt_accounting() {
        assert_eq!(ModeConfig::resolve("practice").unwrap().max_attempts, None);
    }

    #[test]
    fn study_duration_clamps_both_ends() {
        let hard = ModeConfig::resolve("hard").unwrap();
        assert_eq!(hard.study_duration("0"), 10);
        assert_eq!(hard.study_duration("-3"), 10);
        assert_eq!(hard.study_duration("banana"), 10);
        assert_eq!(hard.study_duration(""), 10);
        assert_eq!(hard.study_duration("120"), 60);
        assert_eq!(hard.study_duration("60"), 60);
        assert_eq!(hard.study_duration("1"), 1);
        assert_eq!(hard.study_duration(" 25 "), 25);

        let easy = ModeConfig::resolve("easy").unwrap();
        assert_eq!(easy.study_duration("0"), 1);
    }
}
