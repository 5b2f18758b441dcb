//! Space Siege - a fixed-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, power-up stack, scene, player, collisions, phases)
//! - `renderer`: Drawable descriptions issued to an abstract surface
//! - `journal`: Leveled, append-only game log
//! - `settings`: Data-driven configuration
//! - `highscores`: In-memory leaderboard

pub mod highscores;
pub mod journal;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use journal::{Journal, LogLevel, LogSink};
pub use settings::Settings;
pub use sim::{GameContext, Key, Phase};

/// Game configuration constants
pub mod consts {
    /// Logical surface dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Largest frame step accepted from the driver (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Scene entities advance by one ~60 Hz frame per update
    pub const ENTITY_STEP: f32 = 0.016;

    /// Player ship
    pub const PLAYER_START_X: f32 = 400.0;
    pub const PLAYER_START_Y: f32 = 550.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    /// Ship center is kept this far from the side edges
    pub const PLAYER_EDGE_MARGIN: f32 = 30.0;
    /// Seconds between shots
    pub const SHOOT_COOLDOWN: f32 = 0.3;
    /// Bullets spawn this far above the ship center
    pub const MUZZLE_OFFSET: f32 = 15.0;

    /// Bullets
    pub const BULLET_SPEED: f32 = 400.0;
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 12.0;
    pub const BULLET_MIN_Y: f32 = -20.0;
    pub const BULLET_MAX_Y: f32 = 620.0;

    /// Enemies
    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 30.0;
    pub const ENEMY_SPEED: f32 = 50.0;
    pub const ENEMY_MIN_X: f32 = 50.0;
    pub const ENEMY_MAX_X: f32 = 750.0;
    /// Vertical step taken on every edge bounce
    pub const ENEMY_DROP: f32 = 10.0;
    pub const ENEMY_HEALTH: i32 = 1;

    /// Enemy formation layout
    pub const FORMATION_ORIGIN_X: f32 = 100.0;
    pub const FORMATION_ORIGIN_Y: f32 = 100.0;
    pub const FORMATION_SPACING_X: f32 = 80.0;
    pub const FORMATION_SPACING_Y: f32 = 60.0;

    /// Pickups
    pub const PICKUP_SIZE: f32 = 30.0;
    pub const PICKUP_FALL_SPEED: f32 = 30.0;

    /// Points per bullet hit
    pub const HIT_SCORE: u64 = 100;
}

/// Clamp a wall-clock frame delta into a safe simulation step
#[inline]
pub fn clamp_frame_dt(dt: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, consts::MAX_FRAME_DT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_frame_dt() {
        assert_eq!(clamp_frame_dt(0.016), 0.016);
        assert_eq!(clamp_frame_dt(0.5), consts::MAX_FRAME_DT);
        assert_eq!(clamp_frame_dt(-1.0), 0.0);
        assert_eq!(clamp_frame_dt(f32::NAN), 0.0);
    }
}
