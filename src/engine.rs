//! The matching-round state machine: selection, evaluation, scoring,
//! attempt limiting, and terminal transitions.
//!
//! The engine owns all round state and mutates it only through the methods
//! here. It never touches the page; callers get outcome values describing
//! what to show, and schedule the pacing delay themselves (see
//! [`crate::config::PACING_DELAY_MS`]).

use serde::Serialize;

use crate::config::ModeConfig;
use crate::deck::{RoundCard, RoundDeck};
use crate::store::WordPair;

pub type CardId = usize;

/// Where the round currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed but not started, or abandoned.
    Idle,
    /// Hard-mode study period; all selection is blocked.
    StudyLocked,
    AwaitingFirst,
    AwaitingSecond,
    /// Two cards picked, verdict deferred by the pacing delay.
    Evaluating,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Round is idle or already over.
    RoundNotActive,
    /// The study period is still counting down.
    StudyLocked,
    /// A two-card evaluation is pending; no third pick can queue.
    EvaluationPending,
    /// Card is already revealed or matched.
    CardUnavailable,
}

/// What a selection did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    Ignored(IgnoreReason),
    Revealed {
        card: CardId,
        /// Clip to play, present when a Korean card was picked.
        audio_ref: Option<String>,
        /// Two cards are now selected; the caller must schedule
        /// `resolve_pair` after the pacing delay.
        pair_ready: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundVerdict {
    Continue,
    Won,
    Lost,
}

/// Result of one completed two-card evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairEvaluation {
    pub first: CardId,
    pub second: CardId,
    pub first_word: String,
    pub second_word: String,
    pub matched: bool,
    /// On a mismatch, whether the cards go back behind the placeholder
    /// (hard) instead of keeping their word visible (easy).
    pub hide_cards: bool,
    pub score: u32,
    pub attempts: u32,
    pub verdict: RoundVerdict,
}

/// Result of a picture/speaking answer routed through the same accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub score: u32,
    pub attempts: u32,
    pub verdict: RoundVerdict,
}

pub struct MatchEngine {
    pairs: Vec<WordPair>,
    deck: RoundDeck,
    config: ModeConfig,
    phase: Phase,
    selected: Vec<CardId>,
    score: u32,
    attempts: u32,
}

impl MatchEngine {
    /// Build a round over the given pairs. The engine starts idle; `begin`
    /// enters play.
    pub fn new(pairs: Vec<WordPair>, config: ModeConfig) -> Self {
        let deck = RoundDeck::build_round(&pairs);
        Self {
            pairs,
            deck,
            config,
            phase: Phase::Idle,
            selected: Vec::with_capacity(2),
            score: 0,
            attempts: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn config(&self) -> &ModeConfig {
        &self.config
    }

    pub fn deck(&self) -> &RoundDeck {
        &self.deck
    }

    pub fn card(&self, id: CardId) -> Option<&RoundCard> {
        self.deck.card(id)
    }

    pub fn is_locked(&self) -> bool {
        self.phase == Phase::StudyLocked
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Won | Phase::Lost)
    }

    /// Enter play from idle: locked study in timed modes, straight to the
    /// first pick otherwise.
    pub fn begin(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = if self.config.timed_study {
            Phase::StudyLocked
        } else {
            Phase::AwaitingFirst
        };
    }

    /// Release the study lock. Idempotent: only the first call after
    /// `StudyLocked` transitions, so a stale timer callback (or an abandon
    /// followed by expiry) can never unlock twice or unlock a later round.
    pub fn end_study(&mut self) -> bool {
        if self.phase == Phase::StudyLocked {
            self.phase = Phase::AwaitingFirst;
            true
        } else {
            false
        }
    }

    /// Drop back to idle, clearing any selection and the study lock. Used
    /// when the round is abandoned (mode switch, restart).
    pub fn abandon(&mut self) {
        self.phase = Phase::Idle;
        self.selected.clear();
    }

    /// Process a card click.
    pub fn select_card(&mut self, id: CardId) -> SelectOutcome {
        match self.phase {
            Phase::StudyLocked => return SelectOutcome::Ignored(IgnoreReason::StudyLocked),
            Phase::Evaluating => return SelectOutcome::Ignored(IgnoreReason::EvaluationPending),
            Phase::Idle | Phase::Won | Phase::Lost => {
                return SelectOutcome::Ignored(IgnoreReason::RoundNotActive);
            }
            Phase::AwaitingFirst | Phase::AwaitingSecond => {}
        }
        let Some(card) = self.deck.card_mut(id) else {
            return SelectOutcome::Ignored(IgnoreReason::CardUnavailable);
        };
        if !card.selectable() {
            return SelectOutcome::Ignored(IgnoreReason::CardUnavailable);
        }

        card.revealed = true;
        let audio_ref = card.audio_ref.clone();
        self.selected.push(id);
        debug_assert!(self.selected.len() <= 2);

        let pair_ready = self.selected.len() == 2;
        self.phase = if pair_ready {
            Phase::Evaluating
        } else {
            Phase::AwaitingSecond
        };
        log::debug!("card {id} revealed, selection at {}", self.selected.len());
        SelectOutcome::Revealed {
            card: id,
            audio_ref,
            pair_ready,
        }
    }

    /// Resolve the pending two-card evaluation. Returns `None` unless an
    /// evaluation is actually pending, so a stale pacing callback fired
    /// against a superseded round is a no-op.
    pub fn resolve_pair(&mut self) -> Option<PairEvaluation> {
        if self.phase != Phase::Evaluating || self.selected.len() != 2 {
            return None;
        }
        let (first, second) = (self.selected[0], self.selected[1]);
        let first_word = self.deck.card(first)?.word.clone();
        let second_word = self.deck.card(second)?.word.clone();
        let matched = self.pair_exists(&first_word, &second_word);

        let mut hide_cards = false;
        if matched {
            self.score += self.config.match_score;
            for id in [first, second] {
                if let Some(card) = self.deck.card_mut(id) {
                    card.matched = true;
                }
            }
        } else {
            hide_cards = !self.config.reveal_after_mismatch;
        }
        // Either way the pair leaves the selection and both cards become
        // pickable again (matched cards stay out via their own flag).
        for id in [first, second] {
            if let Some(card) = self.deck.card_mut(id) {
                card.revealed = false;
            }
        }
        self.selected.clear();
        self.attempts += 1;

        let verdict = self.check_terminal();
        Some(PairEvaluation {
            first,
            second,
            first_word,
            second_word,
            matched,
            hide_cards,
            score: self.score,
            attempts: self.attempts,
            verdict,
        })
    }

    /// Route a picture/speaking correctness boolean into the same score and
    /// attempt accounting. `None` when no round is active.
    pub fn score_answer(&mut self, correct: bool) -> Option<AnswerOutcome> {
        if !matches!(self.phase, Phase::AwaitingFirst | Phase::AwaitingSecond) {
            return None;
        }
        if correct {
            self.score += self.config.match_score;
        }
        self.attempts += 1;
        let verdict = self.check_terminal();
        Some(AnswerOutcome {
            correct,
            score: self.score,
            attempts: self.attempts,
            verdict,
        })
    }

    /// Symmetric membership check against the round's canonical pair set.
    fn pair_exists(&self, a: &str, b: &str) -> bool {
        self.pairs
            .iter()
            .any(|p| (p.korean == a && p.english == b) || (p.korean == b && p.english == a))
    }

    /// Terminal check run after every evaluation; also sets the next phase.
    fn check_terminal(&mut self) -> RoundVerdict {
        let won = self.score >= self.config.win_score || self.deck.all_matched();
        let lost = !won
            && self
                .config
                .max_attempts
                .is_some_and(|max| self.attempts >= max);
        if won {
            self.phase = Phase::Won;
            log::info!(
                "round won: score {} after {} attempts",
                self.score,
                self.attempts
            );
            RoundVerdict::Won
        } else if lost {
            self.phase = Phase::Lost;
            log::info!(
                "round lost: score {} after {} attempts",
                self.score,
                self.attempts
            );
            RoundVerdict::Lost
        } else {
            self.phase = Phase::AwaitingFirst;
            RoundVerdict::Continue
        }
    }
}
