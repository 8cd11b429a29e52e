//! Browser adapter: renders the round into the page, wires click and timer
//! callbacks, plays audio, and exposes the wasm-bindgen surface.
//!
//! All round state lives in one thread-local session owned by this module.
//! Every scheduled callback is held in a cancellable handle, and round start
//! always cancels before starting, so at most one study interval and one
//! pending evaluation exist at any time.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlAudioElement, MouseEvent, window};

use crate::answer;
use crate::config::{GameMode, ModeConfig, PACING_DELAY_MS};
use crate::deck::RoundCard;
use crate::engine::{MatchEngine, RoundVerdict, SelectOutcome};
use crate::error::GameError;
use crate::store::{ROUND_PAIR_CAP, WordPair, WordPairStore};
use crate::timer::{StudyTimer, TimerEvent};

// Element ids the host page provides.
const ENGLISH_CONTAINER_ID: &str = "english-cards";
const KOREAN_CONTAINER_ID: &str = "korean-cards";
const SCORE_ID: &str = "score";
const MESSAGE_ID: &str = "message";
const COUNTDOWN_ID: &str = "countdown";
const PRACTICE_LIST_ID: &str = "practice-list";
const RESET_BUTTON_ID: &str = "reset-button";

/// Label shown on a hidden card face.
const CARD_PLACEHOLDER: &str = "[CARD]";

const AUDIO_BASE_URL: &str = "audiofiles/";
const WIN_TONE: &str = "fanfare.mp3";
const LOSS_TONE: &str = "gameover.mp3";

// --- Scheduled callback handles ----------------------------------------------

/// One-shot `setTimeout` wrapper. Dropping the handle clears the timeout, so
/// replacing a pending evaluation cancels the superseded one.
struct TimeoutHandle {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl TimeoutHandle {
    fn schedule(delay_ms: i32, callback: impl FnMut() + 'static) -> Option<Self> {
        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        let id = window()?
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms,
            )
            .ok()?;
        Some(Self {
            id,
            _closure: closure,
        })
    }
}

impl Drop for TimeoutHandle {
    fn drop(&mut self) {
        if let Some(win) = window() {
            win.clear_timeout_with_handle(self.id);
        }
    }
}

/// Repeating `setInterval` wrapper. `cancel` only clears the browser
/// callback; it is safe to call from inside the callback itself (the closure
/// is not dropped until the handle is).
struct IntervalHandle {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl IntervalHandle {
    fn every(period_ms: i32, callback: impl FnMut() + 'static) -> Option<Self> {
        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        let id = window()?
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms,
            )
            .ok()?;
        Some(Self {
            id,
            _closure: closure,
        })
    }

    fn cancel(&self) {
        if let Some(win) = window() {
            win.clear_interval_with_handle(self.id);
        }
    }
}

impl Drop for IntervalHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

// --- Session state ------------------------------------------------------------

struct GameSession {
    engine: MatchEngine,
    /// Hard-mode study countdown and the interval driving it.
    study: Option<(StudyTimer, IntervalHandle)>,
    /// The deferred pair evaluation, if one is pending.
    pending_eval: Option<TimeoutHandle>,
}

thread_local! {
    static LESSON: RefCell<Option<WordPairStore>> = const { RefCell::new(None) };
    static SESSION: RefCell<Option<GameSession>> = const { RefCell::new(None) };
}

// --- Wasm exports -------------------------------------------------------------

/// Replace the active lesson with freshly fetched spreadsheet rows (array of
/// arrays of strings, header row included). On any failure the previously
/// loaded lesson stays in place. Returns the number of usable pairs.
#[wasm_bindgen]
pub fn load_lesson(rows: JsValue) -> Result<u32, JsValue> {
    let rows: Vec<Vec<String>> = serde_wasm_bindgen::from_value(rows)
        .map_err(|e| js_err(&GameError::LoadFailed(e.to_string())))?;
    let store = WordPairStore::load(&rows).map_err(|e| js_err(&e))?;
    let count = store.len() as u32;
    LESSON.with(|cell| cell.replace(Some(store)));
    Ok(count)
}

/// Load the built-in demo lesson so the page is playable without fetching a
/// course file.
#[wasm_bindgen]
pub fn load_demo_lesson() -> Result<u32, JsValue> {
    let mut rows: Vec<Vec<String>> = vec![vec![
        "Korean".to_string(),
        "English".to_string(),
        "Sound".to_string(),
    ]];
    rows.extend(crate::DEMO_LESSON.iter().map(|(korean, english, clip)| {
        vec![korean.to_string(), english.to_string(), clip.to_string()]
    }));
    let store = WordPairStore::load(&rows).map_err(|e| js_err(&e))?;
    let count = store.len() as u32;
    LESSON.with(|cell| cell.replace(Some(store)));
    Ok(count)
}

/// Start (or restart) a game in the named mode. Rejects unknown mode names
/// before touching any state. Always tears down the previous round first,
/// cancelling its study interval and any pending evaluation.
#[wasm_bindgen]
pub fn start_game(mode: &str, study_duration: &str) -> Result<(), JsValue> {
    let config = ModeConfig::resolve(mode).map_err(|e| js_err(&e))?;

    // Cancel-before-start: dropping the old session clears its study interval
    // and any pending evaluation, whatever mode comes next.
    SESSION.with(|cell| {
        if let Some(mut old) = cell.borrow_mut().take() {
            old.engine.abandon();
        }
    });
    set_text(COUNTDOWN_ID, "");

    if config.mode == GameMode::Practice {
        return show_practice_list();
    }

    let pairs = round_pairs(&config)?;
    let mut engine = MatchEngine::new(pairs, config);
    engine.begin();

    set_text(SCORE_ID, "Score: 0");
    set_text(MESSAGE_ID, "");
    set_display(RESET_BUTTON_ID, "none");

    let uses_deck = matches!(config.mode, GameMode::Easy | GameMode::Hard);
    if uses_deck {
        let doc = document()?;
        render_round(&doc, &engine)?;
    }

    let mut session = GameSession {
        engine,
        study: None,
        pending_eval: None,
    };
    if config.timed_study {
        let secs = config.study_duration(study_duration);
        start_study_period(&mut session, secs);
    }
    SESSION.with(|cell| cell.replace(Some(session)));
    log::info!("game started in {mode} mode");
    Ok(())
}

/// Abandon the current round, cancelling its timers. Used on mode switch.
#[wasm_bindgen]
pub fn stop_game() {
    SESSION.with(|cell| {
        if let Some(mut session) = cell.borrow_mut().take() {
            session.engine.abandon();
            log::info!("round abandoned");
        }
    });
    set_text(COUNTDOWN_ID, "");
    set_text(MESSAGE_ID, "");
}

/// Render the free-browsing practice list: every pair of the lesson, click
/// to hear the pronunciation.
#[wasm_bindgen]
pub fn show_practice_list() -> Result<(), JsValue> {
    let doc = document()?;
    let list = doc
        .get_element_by_id(PRACTICE_LIST_ID)
        .ok_or_else(|| JsValue::from_str("practice list container not found"))?;
    list.set_inner_html("");
    LESSON.with(|cell| -> Result<(), JsValue> {
        let borrow = cell.borrow();
        let store = borrow
            .as_ref()
            .ok_or_else(|| JsValue::from_str("no lesson loaded"))?;
        for pair in store.pairs() {
            let item = doc.create_element("div")?;
            item.set_class_name("practice-item");
            item.set_text_content(Some(&format!("{} - {}", pair.english, pair.korean)));
            let clip = pair.audio_ref.clone();
            let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
                play_audio(&clip);
            }) as Box<dyn FnMut(_)>);
            item.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
            list.append_child(&item)?;
        }
        Ok(())
    })
}

/// Picture mode: grade a typed English answer for the prompted word and
/// route it through the round's score/attempt accounting.
#[wasm_bindgen]
pub fn submit_typed_answer(english_word: &str, typed: &str) -> Result<JsValue, JsValue> {
    record_answer(answer::check_typed_answer(english_word, typed))
}

/// Speaking mode: the external pronunciation checker reports a correctness
/// boolean; accounting is identical to the other scored modes.
#[wasm_bindgen]
pub fn submit_spoken_result(correct: bool) -> Result<JsValue, JsValue> {
    record_answer(correct)
}

// --- Round driving ------------------------------------------------------------

fn round_pairs(config: &ModeConfig) -> Result<Vec<WordPair>, JsValue> {
    LESSON.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let store = borrow
            .as_mut()
            .ok_or_else(|| JsValue::from_str("no lesson loaded"))?;
        match config.mode {
            GameMode::Easy | GameMode::Hard => {
                // Fresh shuffle per round, so a restart deals a new hand.
                store.reshuffle();
                Ok(store.first_n(ROUND_PAIR_CAP).to_vec())
            }
            // Prompt-driven modes keep score without a card deck.
            _ => Ok(Vec::new()),
        }
    })
}

fn on_card_click(id: usize) {
    SESSION.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let Some(session) = borrow.as_mut() else {
            return;
        };
        match session.engine.select_card(id) {
            SelectOutcome::Ignored(reason) => {
                log::debug!("selection of card {id} ignored: {reason:?}");
            }
            SelectOutcome::Revealed {
                card,
                audio_ref,
                pair_ready,
            } => {
                refresh_card(&session.engine, card);
                if let Some(clip) = audio_ref {
                    play_audio(&clip);
                }
                if pair_ready {
                    // The verdict is deferred so the learner sees both faces
                    // before feedback. Replacing the handle cancels any
                    // leftover timeout from a superseded round.
                    session.pending_eval =
                        TimeoutHandle::schedule(PACING_DELAY_MS, resolve_pending_pair);
                }
            }
        }
    });
}

fn resolve_pending_pair() {
    SESSION.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let Some(session) = borrow.as_mut() else {
            return;
        };
        let Some(eval) = session.engine.resolve_pair() else {
            return;
        };
        refresh_card(&session.engine, eval.first);
        refresh_card(&session.engine, eval.second);
        set_text(SCORE_ID, &format!("Score: {}", eval.score));
        if eval.matched {
            set_text(
                MESSAGE_ID,
                &format!(
                    "Correct! '{}' and '{}' are a pair.",
                    eval.first_word, eval.second_word
                ),
            );
        } else {
            set_text(MESSAGE_ID, "Try again!");
        }
        match eval.verdict {
            RoundVerdict::Continue => {}
            RoundVerdict::Won => finish_round(true, eval.score, eval.attempts),
            RoundVerdict::Lost => finish_round(false, eval.score, eval.attempts),
        }
    });
}

fn record_answer(correct: bool) -> Result<JsValue, JsValue> {
    SESSION.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let session = borrow
            .as_mut()
            .ok_or_else(|| JsValue::from_str("no active game"))?;
        let outcome = session
            .engine
            .score_answer(correct)
            .ok_or_else(|| JsValue::from_str("round is not accepting answers"))?;
        set_text(SCORE_ID, &format!("Score: {}", outcome.score));
        set_text(
            MESSAGE_ID,
            if outcome.correct { "Correct!" } else { "Try again!" },
        );
        match outcome.verdict {
            RoundVerdict::Continue => {}
            RoundVerdict::Won => finish_round(true, outcome.score, outcome.attempts),
            RoundVerdict::Lost => finish_round(false, outcome.score, outcome.attempts),
        }
        serde_wasm_bindgen::to_value(&outcome).map_err(|e| JsValue::from_str(&e.to_string()))
    })
}

fn finish_round(won: bool, score: u32, attempts: u32) {
    let summary = if won {
        format!("You won! Final score {score} after {attempts} attempts.")
    } else {
        format!("Game over! Score {score} after {attempts} attempts.")
    };
    set_text(MESSAGE_ID, &summary);
    set_display(RESET_BUTTON_ID, "block");
    play_audio(if won { WIN_TONE } else { LOSS_TONE });
}

// --- Study period -------------------------------------------------------------

fn start_study_period(session: &mut GameSession, secs: u32) {
    // Replacing the option drops (and thereby cancels) any running interval.
    session.study = None;
    set_text(COUNTDOWN_ID, &format!("Study time: {secs}s"));
    set_text(MESSAGE_ID, "Memorize the pairs!");
    let timer = StudyTimer::new(secs);
    session.study = IntervalHandle::every(1000, study_tick).map(|handle| (timer, handle));
}

fn study_tick() {
    SESSION.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let Some(session) = borrow.as_mut() else {
            return;
        };
        let Some((timer, handle)) = session.study.as_mut() else {
            return;
        };
        match timer.tick() {
            Some(TimerEvent::Tick { remaining }) => {
                set_text(COUNTDOWN_ID, &format!("Study time: {remaining}s"));
            }
            Some(TimerEvent::Expired) => {
                handle.cancel();
                set_text(COUNTDOWN_ID, "");
                if session.engine.end_study() {
                    refresh_all_cards(&session.engine);
                    set_text(MESSAGE_ID, "Study period over. Find the pairs!");
                }
            }
            None => {}
        }
    });
}

// --- DOM rendering ------------------------------------------------------------

fn render_round(doc: &Document, engine: &MatchEngine) -> Result<(), JsValue> {
    let english = doc
        .get_element_by_id(ENGLISH_CONTAINER_ID)
        .ok_or_else(|| JsValue::from_str("english card container not found"))?;
    let korean = doc
        .get_element_by_id(KOREAN_CONTAINER_ID)
        .ok_or_else(|| JsValue::from_str("korean card container not found"))?;
    english.set_inner_html("");
    korean.set_inner_html("");
    for id in engine.deck().english_ids() {
        append_card(doc, &english, engine, id)?;
    }
    for id in engine.deck().korean_ids() {
        append_card(doc, &korean, engine, id)?;
    }
    Ok(())
}

fn append_card(
    doc: &Document,
    container: &Element,
    engine: &MatchEngine,
    id: usize,
) -> Result<(), JsValue> {
    let card = engine
        .card(id)
        .ok_or_else(|| JsValue::from_str("card id out of range"))?;
    let el = doc.create_element("div")?;
    el.set_id(&card_dom_id(id));
    el.set_class_name(&card_class(card));
    el.set_text_content(Some(card_face(card, engine)));
    let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
        on_card_click(id);
    }) as Box<dyn FnMut(_)>);
    el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    // Card elements are replaced wholesale each round; the listener lives as
    // long as the element does.
    closure.forget();
    container.append_child(&el)?;
    Ok(())
}

/// The word is visible outside hidden modes, during the study reveal, and on
/// any revealed or matched card; otherwise the placeholder shows.
fn card_face<'a>(card: &'a RoundCard, engine: &MatchEngine) -> &'a str {
    let visible = !engine.config().starts_hidden
        || engine.is_locked()
        || card.revealed
        || card.matched;
    if visible { &card.word } else { CARD_PLACEHOLDER }
}

fn card_class(card: &RoundCard) -> String {
    let mut class = String::from("card");
    if card.revealed {
        class.push_str(" revealed");
    }
    if card.matched {
        class.push_str(" matched");
    }
    class
}

fn refresh_card(engine: &MatchEngine, id: usize) {
    let Some(card) = engine.card(id) else {
        return;
    };
    if let Some(el) = document().ok().and_then(|d| d.get_element_by_id(&card_dom_id(id))) {
        el.set_class_name(&card_class(card));
        el.set_text_content(Some(card_face(card, engine)));
    }
}

fn refresh_all_cards(engine: &MatchEngine) {
    for id in 0..engine.deck().len() {
        refresh_card(engine, id);
    }
}

fn card_dom_id(id: usize) -> String {
    format!("hm-card-{id}")
}

// --- Audio --------------------------------------------------------------------

/// Fire-and-forget playback. Failures are never fatal: log, nudge the
/// message line, and keep the game (and any running countdown) going.
fn play_audio(clip: &str) {
    let url = format!("{AUDIO_BASE_URL}{clip}");
    let audio = match HtmlAudioElement::new_with_src(&url) {
        Ok(audio) => audio,
        Err(err) => {
            warn_playback(clip, &err);
            return;
        }
    };
    match audio.play() {
        Ok(promise) => {
            let clip = clip.to_string();
            let on_err = Closure::wrap(Box::new(move |err: JsValue| {
                warn_playback(&clip, &err);
            }) as Box<dyn FnMut(JsValue)>);
            let _ = promise.catch(&on_err);
            on_err.forget();
        }
        Err(err) => warn_playback(clip, &err),
    }
}

fn warn_playback(clip: &str, detail: &JsValue) {
    let err = GameError::Playback(clip.to_string());
    log::warn!("{err}: {detail:?}");
    set_text(MESSAGE_ID, "Audio unavailable for this word.");
}

// --- Small DOM helpers --------------------------------------------------------

fn document() -> Result<Document, JsValue> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn set_text(id: &str, text: &str) {
    if let Ok(doc) = document() {
        if let Some(el) = doc.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }
}

fn set_display(id: &str, display: &str) {
    if let Ok(doc) = document() {
        if let Some(el) = doc.get_element_by_id(id) {
            el.set_attribute("style", &format!("display:{display};")).ok();
        }
    }
}

fn js_err(err: &GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
