//! Game phases and the simulation owner
//!
//! `GameContext` holds exactly one live [`Phase`]. Transitions move the old
//! phase out, call its exit hook, log the change and enter the new one. A
//! paused level is the same boxed level moved into `Paused`, so resuming
//! continues the exact frame it stopped on.

use std::mem;

use super::playing::{Outcome, Playing};
use crate::clamp_frame_dt;
use crate::highscores::HighScores;
use crate::journal::Journal;
use crate::renderer::shapes::{self, colors};
use crate::renderer::Surface;
use crate::settings::Settings;

/// Keys the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Space,
    Enter,
    Escape,
    P,
    Digit1,
    Digit2,
    Digit3,
}

/// The live top-level state
#[derive(Debug)]
pub enum Phase {
    Menu,
    Playing(Box<Playing>),
    Paused(Box<Playing>),
    GameOver { score: u64 },
    Victory { score: u64 },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Menu => "MENU",
            Phase::Playing(_) => "PLAYING",
            Phase::Paused(_) => "PAUSED",
            Phase::GameOver { .. } => "GAME_OVER",
            Phase::Victory { .. } => "VICTORY",
        }
    }

    /// The level this phase is showing, if any
    pub fn level(&self) -> Option<&Playing> {
        match self {
            Phase::Playing(level) | Phase::Paused(level) => Some(&**level),
            _ => None,
        }
    }

    fn enter(&self, journal: &Journal) {
        match self {
            Phase::Menu => journal.info("Entered Menu State"),
            Phase::Playing(_) => journal.info("Game started - Entered Playing State"),
            Phase::Paused(_) => journal.info("Game paused"),
            Phase::GameOver { score } => journal.info(&format!("Game Over - Final Score: {}", score)),
            Phase::Victory { score } => journal.info(&format!("Victory! Final Score: {}", score)),
        }
    }

    fn exit(&self, journal: &Journal) {
        match self {
            Phase::Menu => journal.info("Exited Menu State"),
            Phase::Playing(_) => journal.info("Exited Playing State"),
            Phase::Paused(_) => journal.info("Game resumed"),
            Phase::GameOver { .. } => journal.info("Exited Game Over State"),
            Phase::Victory { .. } => journal.info("Exited Victory State"),
        }
    }

    fn render(&self, surface: &mut dyn Surface, high_score: u64) {
        match self {
            Phase::Menu => render_menu(surface, high_score),
            Phase::Playing(level) => level.render(surface),
            Phase::Paused(level) => {
                level.render(surface);
                shapes::fill_screen(surface, colors::PAUSE_DIM);
                shapes::centered_text(surface, 250.0, "PAUSED", 48.0, colors::HUD_TEXT);
                shapes::centered_text(surface, 320.0, "Press P or ENTER to Resume", 20.0, colors::HUD_TEXT);
                shapes::centered_text(surface, 350.0, "Press ESC to Return to Menu", 20.0, colors::HUD_TEXT);
            }
            Phase::GameOver { score } => {
                shapes::fill_screen(surface, colors::GAME_OVER_TINT);
                shapes::centered_text(surface, 200.0, "GAME OVER", 64.0, colors::GAME_OVER_TEXT);
                shapes::centered_text(surface, 280.0, format!("Final Score: {}", score), 32.0, colors::HUD_TEXT);
                shapes::centered_text(surface, 330.0, format!("High Score: {}", high_score), 20.0, colors::HINT_TEXT);
                shapes::centered_text(surface, 380.0, "Press ENTER to Try Again", 20.0, colors::HUD_TEXT);
                shapes::centered_text(surface, 410.0, "Press ESC to Return to Menu", 20.0, colors::HUD_TEXT);
            }
            Phase::Victory { score } => {
                shapes::fill_screen(surface, colors::VICTORY_TINT);
                shapes::centered_text(surface, 200.0, "VICTORY!", 64.0, colors::VICTORY_TEXT);
                shapes::centered_text(surface, 250.0, "All enemies defeated!", 24.0, colors::HUD_TEXT);
                shapes::centered_text(surface, 320.0, format!("Final Score: {}", score), 32.0, colors::HUD_TEXT);
                shapes::centered_text(surface, 360.0, format!("High Score: {}", high_score), 20.0, colors::HINT_TEXT);
                shapes::centered_text(surface, 400.0, "Press ENTER to Play Again", 20.0, colors::HUD_TEXT);
                shapes::centered_text(surface, 430.0, "Press ESC to Return to Menu", 20.0, colors::HUD_TEXT);
            }
        }
    }
}

impl From<Outcome> for Phase {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::GameOver { score } => Phase::GameOver { score },
            Outcome::Victory { score } => Phase::Victory { score },
        }
    }
}

fn render_menu(surface: &mut dyn Surface, high_score: u64) {
    shapes::fill_screen(surface, colors::BACKGROUND);
    shapes::centered_text(surface, 150.0, "SPACE INVADERS", 48.0, colors::TITLE);
    if high_score > 0 {
        shapes::centered_text(surface, 260.0, format!("High Score: {}", high_score), 20.0, colors::HINT_TEXT);
    }
    shapes::centered_text(surface, 350.0, "Press ENTER to Start", 20.0, colors::HUD_TEXT);
    shapes::centered_text(surface, 390.0, "Press ESC to Quit", 20.0, colors::HUD_TEXT);

    let controls = ["Controls:", "Arrow Keys - Move", "SPACE - Shoot", "P - Pause"];
    for (i, line) in controls.into_iter().enumerate() {
        shapes::centered_text(surface, 450.0 + i as f32 * 25.0, line, 16.0, colors::HUD_TEXT);
    }
    shapes::centered_text(surface, 560.0, "Power-ups (Test/Demo):", 14.0, colors::SPEED_BOOST);
    shapes::centered_text(
        surface,
        580.0,
        "1 - Speed Boost  |  2 - Shield  |  3 - Fire Power",
        14.0,
        colors::HUD_TEXT,
    );
}

/// Phase changes a key can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    NewGame,
    Quit,
    Pause,
    Resume,
    Menu,
}

/// Owner of the live phase and everything that outlives a level
#[derive(Debug)]
pub struct GameContext {
    phase: Phase,
    settings: Settings,
    journal: Journal,
    high_scores: HighScores,
    quit_requested: bool,
}

impl GameContext {
    pub fn new(settings: Settings, journal: Journal) -> Self {
        journal.info("Game context initialized");
        let phase = Phase::Menu;
        phase.enter(&journal);
        Self {
            phase,
            settings,
            journal,
            high_scores: HighScores::new(),
            quit_requested: false,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn phase_name(&self) -> &'static str {
        self.phase.name()
    }

    /// The running level (not while paused)
    pub fn playing(&self) -> Option<&Playing> {
        match &self.phase {
            Phase::Playing(level) => Some(&**level),
            _ => None,
        }
    }

    pub fn playing_mut(&mut self) -> Option<&mut Playing> {
        match &mut self.phase {
            Phase::Playing(level) => Some(&mut **level),
            _ => None,
        }
    }

    pub fn high_score(&self) -> u64 {
        self.high_scores.top_score()
    }

    /// Escape was pressed on the menu
    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    pub fn handle_key_down(&mut self, key: Key) {
        let action = match (&self.phase, key) {
            (Phase::Menu, Key::Enter | Key::Space) => Some(Action::NewGame),
            (Phase::Menu, Key::Escape) => Some(Action::Quit),
            (Phase::Playing(_), Key::P) => Some(Action::Pause),
            (Phase::Paused(_), Key::P | Key::Enter) => Some(Action::Resume),
            (Phase::GameOver { .. } | Phase::Victory { .. }, Key::Enter) => Some(Action::NewGame),
            (Phase::Playing(_) | Phase::Paused(_) | Phase::GameOver { .. } | Phase::Victory { .. }, Key::Escape) => {
                Some(Action::Menu)
            }
            _ => None,
        };

        match action {
            Some(Action::NewGame) => {
                let level = Playing::new(&self.settings, self.journal.clone());
                self.transition(move |_| Phase::Playing(Box::new(level)));
            }
            Some(Action::Quit) => {
                self.journal.info("User requested to quit from menu");
                self.quit_requested = true;
            }
            Some(Action::Pause) => self.transition(|phase| match phase {
                Phase::Playing(level) => Phase::Paused(level),
                other => other,
            }),
            Some(Action::Resume) => self.transition(|phase| match phase {
                Phase::Paused(level) => Phase::Playing(level),
                other => other,
            }),
            Some(Action::Menu) => self.transition(|_| Phase::Menu),
            None => {
                if let Phase::Playing(level) = &mut self.phase {
                    level.handle_key_down(key);
                }
            }
        }
    }

    /// Advance the live phase by one frame
    pub fn update(&mut self, dt: f32) {
        let dt = clamp_frame_dt(dt);
        let outcome = match &mut self.phase {
            Phase::Playing(level) => level.update(dt),
            _ => None,
        };
        if let Some(outcome) = outcome {
            self.transition(move |_| outcome.into());
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        self.phase.render(surface, self.high_score());
    }

    fn transition(&mut self, next: impl FnOnce(Phase) -> Phase) {
        let old = mem::replace(&mut self.phase, Phase::Menu);
        let from = old.name();
        old.exit(&self.journal);

        let new = next(old);
        self.journal.state_change("Game", from, new.name());
        new.enter(&self.journal);

        if let Phase::GameOver { score } | Phase::Victory { score } = &new {
            self.record_score(*score);
        }
        self.phase = new;
    }

    fn record_score(&mut self, score: u64) {
        let previous = self.high_scores.top_score();
        let Some(rank) = self.high_scores.add_score(score) else {
            return;
        };
        if score > previous {
            self.journal.info(&format!("New High Score: {}", score));
        } else {
            self.journal.info(&format!("Score {} ranked #{}", score, rank));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::LogLevel;
    use crate::renderer::DrawList;

    fn context() -> GameContext {
        GameContext::new(Settings::headless(), Journal::disabled())
    }

    #[test]
    fn test_menu_to_playing() {
        let (journal, sink) = Journal::memory();
        let mut ctx = GameContext::new(Settings::headless(), journal);
        assert_eq!(ctx.phase_name(), "MENU");

        ctx.handle_key_down(Key::Enter);
        assert_eq!(ctx.phase_name(), "PLAYING");
        assert!(sink.contains(LogLevel::Info, "Exited Menu State"));
        assert!(sink.contains(LogLevel::State, "Game: MENU -> PLAYING"));
        assert!(sink.contains(LogLevel::Info, "Game started - Entered Playing State"));
    }

    #[test]
    fn test_space_also_starts() {
        let mut ctx = context();
        ctx.handle_key_down(Key::Space);
        assert!(ctx.playing().is_some());
    }

    #[test]
    fn test_escape_on_menu_requests_quit() {
        let mut ctx = context();
        ctx.handle_key_down(Key::Escape);
        assert!(ctx.should_quit());
        assert_eq!(ctx.phase_name(), "MENU");
    }

    #[test]
    fn test_pause_and_resume_keep_the_level() {
        let (journal, sink) = Journal::memory();
        let mut ctx = GameContext::new(Settings::headless(), journal);
        ctx.handle_key_down(Key::Enter);
        ctx.handle_key_down(Key::Right);
        ctx.update(0.1);
        let x = ctx.playing().map(|l| l.player().pos().x);

        ctx.handle_key_down(Key::P);
        assert_eq!(ctx.phase_name(), "PAUSED");
        assert!(ctx.playing().is_none());
        ctx.update(0.1);
        ctx.update(0.1);

        ctx.handle_key_down(Key::Enter);
        assert_eq!(ctx.phase_name(), "PLAYING");
        assert_eq!(ctx.playing().map(|l| l.player().pos().x), x);
        assert!(sink.contains(LogLevel::Info, "Game paused"));
        assert!(sink.contains(LogLevel::Info, "Game resumed"));
        assert!(sink.contains(LogLevel::State, "Game: PAUSED -> PLAYING"));
    }

    #[test]
    fn test_keys_do_not_reach_paused_level() {
        let mut ctx = context();
        ctx.handle_key_down(Key::Enter);
        ctx.handle_key_down(Key::P);
        ctx.handle_key_down(Key::Space);
        ctx.handle_key_down(Key::P);
        assert_eq!(ctx.playing().map(|l| l.player().bullets().len()), Some(0));
    }

    #[test]
    fn test_escape_returns_to_menu() {
        let mut ctx = context();
        ctx.handle_key_down(Key::Enter);
        ctx.handle_key_down(Key::Escape);
        assert_eq!(ctx.phase_name(), "MENU");

        ctx.handle_key_down(Key::Enter);
        ctx.handle_key_down(Key::P);
        ctx.handle_key_down(Key::Escape);
        assert_eq!(ctx.phase_name(), "MENU");
        assert!(!ctx.should_quit());
    }

    #[test]
    fn test_game_over_records_score() {
        let (journal, sink) = Journal::memory();
        let mut ctx = GameContext::new(Settings::headless(), journal);
        ctx.handle_key_down(Key::Enter);
        if let Some(level) = ctx.playing_mut() {
            level.add_score(700);
            for _ in 0..3 {
                level.lose_life();
            }
        }
        ctx.update(0.016);

        assert!(matches!(ctx.phase(), Phase::GameOver { score: 700 }));
        assert_eq!(ctx.high_score(), 700);
        assert!(sink.contains(LogLevel::State, "Game: PLAYING -> GAME_OVER"));
        assert!(sink.contains(LogLevel::Info, "Game Over - Final Score: 700"));
        assert!(sink.contains(LogLevel::Info, "New High Score: 700"));

        ctx.handle_key_down(Key::Enter);
        assert_eq!(ctx.playing().map(|l| (l.score(), l.lives())), Some((0, 3)));
    }

    #[test]
    fn test_lower_score_is_ranked() {
        let (journal, sink) = Journal::memory();
        let mut ctx = GameContext::new(Settings::headless(), journal);
        for score in [700, 300] {
            ctx.handle_key_down(Key::Enter);
            if let Some(level) = ctx.playing_mut() {
                level.add_score(score);
                for _ in 0..3 {
                    level.lose_life();
                }
            }
            ctx.update(0.016);
        }
        assert_eq!(ctx.high_score(), 700);
        assert!(sink.contains(LogLevel::Info, "Score 300 ranked #2"));
    }

    #[test]
    fn test_frame_dt_is_clamped() {
        let mut ctx = context();
        ctx.handle_key_down(Key::Enter);
        ctx.handle_key_down(Key::Right);
        ctx.update(5.0);
        let x = ctx.playing().map(|l| l.player().pos().x).unwrap_or_default();
        assert!((x - 420.0).abs() < 0.001);
    }

    #[test]
    fn test_paused_render_overlays_level() {
        let mut ctx = context();
        ctx.handle_key_down(Key::Enter);
        ctx.handle_key_down(Key::P);
        let mut list = DrawList::new();
        ctx.render(&mut list);
        assert!(list.has_text("Score: 0"));
        assert!(list.has_text("PAUSED"));
        assert!(list.has_text("Press P or ENTER to Resume"));
    }

    #[test]
    fn test_menu_shows_high_score_once_set() {
        let mut ctx = context();
        let mut list = DrawList::new();
        ctx.render(&mut list);
        assert!(list.has_text("SPACE INVADERS"));
        assert!(!list.has_text("High Score"));

        ctx.handle_key_down(Key::Enter);
        if let Some(level) = ctx.playing_mut() {
            level.add_score(100);
            for _ in 0..3 {
                level.lose_life();
            }
        }
        ctx.update(0.016);
        ctx.handle_key_down(Key::Escape);

        list.clear();
        ctx.render(&mut list);
        assert!(list.has_text("High Score: 100"));
    }
}
