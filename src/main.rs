//! Space Siege entry point
//!
//! Headless driver: plays a scripted session at 60 Hz through the same
//! key-down / update / render contract a windowed front end uses, then logs a
//! summary. Pass a settings JSON path as the first argument.

use std::collections::HashSet;
use std::env;

use space_siege::renderer::DrawList;
use space_siege::{GameContext, Journal, Key, Phase, Settings};

const FRAME_DT: f32 = 1.0 / 60.0;
/// Two minutes of simulated play
const MAX_FRAMES: u32 = 60 * 120;
const FIRE_EVERY: u32 = 18;
const SWEEP_FRAMES: u32 = 120;

/// Keys currently held. Only the press edge reaches the game; a release just
/// clears the key so it can be pressed again.
#[derive(Debug, Default)]
struct Keyboard {
    held: HashSet<Key>,
}

impl Keyboard {
    fn press(&mut self, ctx: &mut GameContext, key: Key) {
        if self.held.insert(key) {
            ctx.handle_key_down(key);
        }
    }

    fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    fn tap(&mut self, ctx: &mut GameContext, key: Key) {
        self.press(ctx, key);
        self.release(key);
    }

    fn release_all(&mut self) {
        self.held.clear();
    }
}

/// Scripted pilot: power up, sweep side to side and fire steadily
fn drive(frame: u32, keyboard: &mut Keyboard, ctx: &mut GameContext) {
    match frame {
        10 => keyboard.tap(ctx, Key::Enter),
        20 => keyboard.tap(ctx, Key::Digit3),
        f if f >= 30 => {
            let t = f - 30;
            if t % FIRE_EVERY == 0 {
                keyboard.tap(ctx, Key::Space);
            }
            if t % SWEEP_FRAMES == 0 {
                let (from, to) = if (t / SWEEP_FRAMES) % 2 == 0 {
                    (Key::Right, Key::Left)
                } else {
                    (Key::Left, Key::Right)
                };
                keyboard.release(from);
                keyboard.press(ctx, to);
            }
        }
        _ => {}
    }
}

fn main() {
    env_logger::init();
    log::info!("Space Siege (headless) starting...");

    let settings = env::args().nth(1).map(Settings::load).unwrap_or_default();
    log::debug!("Settings: {}", settings.to_json());
    let journal = settings
        .log_file
        .as_ref()
        .map(Journal::open)
        .unwrap_or_else(Journal::console);

    let mut ctx = GameContext::new(settings, journal);
    let mut keyboard = Keyboard::default();
    let mut surface = DrawList::new();
    let mut frames = 0;

    for frame in 0..MAX_FRAMES {
        frames = frame + 1;
        drive(frame, &mut keyboard, &mut ctx);

        ctx.update(FRAME_DT);
        surface.clear();
        ctx.render(&mut surface);

        if matches!(ctx.phase(), Phase::GameOver { .. } | Phase::Victory { .. }) {
            log::info!("Session ended in {} after {} frames", ctx.phase_name(), frames);
            keyboard.release_all();
            // Back to the menu, then quit from it
            keyboard.tap(&mut ctx, Key::Escape);
            keyboard.tap(&mut ctx, Key::Escape);
        }
        if ctx.should_quit() {
            break;
        }
    }

    let score = ctx.playing().map(|level| level.score());
    log::info!(
        "Stopped after {} frames in {} (level score: {:?}, high score: {}, last frame: {} draw commands)",
        frames,
        ctx.phase_name(),
        score,
        ctx.high_score(),
        surface.len()
    );
}
