//! The player's ship
//!
//! Owns its position, the power-up stack, the shot cooldown and its own
//! bullets. The Idle/Moving/Shooting sub-state is bookkeeping for logs and
//! animation: it never decides whether an input is honored.

use glam::Vec2;

use super::collision::Aabb;
use super::entity::Bullet;
use super::modifier::{ModifierKind, ModifierStack, StatBlock};
use crate::consts::*;
use crate::journal::Journal;
use crate::renderer::shapes::{self, colors};
use crate::renderer::Surface;

/// Horizontal offsets of each bullet in a volley, by firepower
const SINGLE_SHOT: &[f32] = &[0.0];
const DOUBLE_SHOT: &[f32] = &[-10.0, 10.0];
const TRIPLE_SHOT: &[f32] = &[-15.0, 0.0, 15.0];

/// Player activity label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSubState {
    Idle,
    Moving,
    Shooting,
}

impl PlayerSubState {
    pub fn name(&self) -> &'static str {
        match self {
            PlayerSubState::Idle => "IDLE",
            PlayerSubState::Moving => "MOVING",
            PlayerSubState::Shooting => "SHOOTING",
        }
    }
}

/// Inputs seen by the sub-state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    MoveLeft,
    MoveRight,
    Stop,
    Shoot,
}

#[derive(Debug)]
pub struct PlayerController {
    pos: Vec2,
    vel_x: f32,
    /// Seconds until the next shot is allowed
    cooldown: f32,
    stats: ModifierStack,
    bullets: Vec<Bullet>,
    sub_state: PlayerSubState,
    /// Time spent in the current sub-state
    state_time: f32,
    journal: Journal,
}

impl PlayerController {
    pub fn new(pos: Vec2, journal: Journal) -> Self {
        journal.info(&format!("Player created at position ({}, {})", pos.x, pos.y));
        Self {
            pos,
            vel_x: 0.0,
            cooldown: 0.0,
            stats: ModifierStack::new(StatBlock::BASE),
            bullets: Vec::new(),
            sub_state: PlayerSubState::Idle,
            state_time: 0.0,
            journal,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn vel_x(&self) -> f32 {
        self.vel_x
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn sub_state(&self) -> PlayerSubState {
        self.sub_state
    }

    /// Effective stats (base plus active power-ups)
    pub fn stats(&self) -> StatBlock {
        self.stats.effective()
    }

    pub fn modifiers(&self) -> &ModifierStack {
        &self.stats
    }

    /// Shield up: effective defense above the base value
    pub fn is_shielded(&self) -> bool {
        self.stats().defense > self.stats.base().defense
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn bullets_mut(&mut self) -> &mut Vec<Bullet> {
        &mut self.bullets
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    /// HUD listing of active power-ups
    pub fn active_power_ups(&self) -> String {
        self.stats.describe()
    }

    pub fn move_left(&mut self) {
        self.vel_x = -self.stats().speed;
        self.handle_input(PlayerInput::MoveLeft);
    }

    pub fn move_right(&mut self) {
        self.vel_x = self.stats().speed;
        self.handle_input(PlayerInput::MoveRight);
    }

    pub fn stop_moving(&mut self) {
        self.vel_x = 0.0;
        self.handle_input(PlayerInput::Stop);
    }

    /// Fire a volley if the cooldown allows. Returns the number of bullets spawned.
    pub fn shoot(&mut self) -> usize {
        if self.cooldown > 0.0 {
            return 0;
        }
        self.handle_input(PlayerInput::Shoot);

        let firepower = self.stats().firepower;
        let pattern = match firepower {
            0 | 1 => SINGLE_SHOT,
            2 => DOUBLE_SHOT,
            _ => TRIPLE_SHOT,
        };
        // Split shots always deal 1 damage each, however high firepower climbs
        let damage = if pattern.len() == 1 { firepower.max(1) as i32 } else { 1 };
        for dx in pattern {
            let origin = Vec2::new(self.pos.x + dx, self.pos.y - MUZZLE_OFFSET);
            self.bullets.push(Bullet::player(origin, damage));
        }

        self.cooldown = SHOOT_COOLDOWN;
        self.journal.info(&format!(
            "Player fired weapon (Fire Power: {}, Bullets: {})",
            firepower,
            self.bullets.len()
        ));
        pattern.len()
    }

    /// Layer a power-up over the current stats
    pub fn apply_power_up(&mut self, kind: ModifierKind, duration: f32) {
        self.stats.apply(kind, duration);
        self.journal.modifier_applied(kind.as_str(), "Player");
    }

    pub fn update(&mut self, dt: f32) {
        self.update_sub_state(dt);

        if self.cooldown > 0.0 {
            self.cooldown = (self.cooldown - dt).max(0.0);
        }

        self.pos.x += self.vel_x * dt;
        self.pos.x = self
            .pos
            .x
            .clamp(PLAYER_EDGE_MARGIN, SCREEN_WIDTH - PLAYER_EDGE_MARGIN);

        for bullet in &mut self.bullets {
            bullet.update();
        }
        self.bullets.retain(|b| b.active);

        for expired in self.stats.tick(dt) {
            self.journal.modifier_removed(expired.kind.as_str(), "Player");
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        for layer in self.stats.layers() {
            match layer.kind {
                ModifierKind::SpeedBoost => {
                    // Trail behind the ship
                    let trail = self.pos + Vec2::new(0.0, PLAYER_HEIGHT);
                    shapes::fill_oval_centered(surface, trail, Vec2::new(20.0, 12.0), colors::SPEED_BOOST);
                }
                ModifierKind::FirePower => {
                    let glow = Vec2::new(PLAYER_WIDTH + 10.0, PLAYER_HEIGHT + 10.0);
                    let mut color = colors::FIRE_POWER;
                    color[3] = 0.4;
                    shapes::fill_oval_centered(surface, self.pos, glow, color);
                }
                ModifierKind::Shield => {}
            }
        }

        shapes::fill_rect_centered(
            surface,
            self.pos,
            Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            colors::PLAYER,
        );

        if self.is_shielded() {
            let bubble = Vec2::splat(PLAYER_WIDTH + 20.0);
            shapes::stroke_oval_centered(surface, self.pos, bubble, colors::SHIELD, 3.0);
        }

        for bullet in &self.bullets {
            bullet.render(surface);
        }
    }

    fn set_sub_state(&mut self, next: PlayerSubState) {
        self.journal
            .state_change("Player", self.sub_state.name(), next.name());
        self.sub_state = next;
        self.state_time = 0.0;
    }

    fn handle_input(&mut self, input: PlayerInput) {
        use PlayerInput::*;
        use PlayerSubState::*;

        let next = match (self.sub_state, input) {
            (Idle, MoveLeft | MoveRight) => Some(Moving),
            (Idle | Moving, Shoot) => Some(Shooting),
            (Moving, Stop) => Some(Idle),
            _ => None,
        };
        if let Some(next) = next {
            self.set_sub_state(next);
        }
    }

    fn update_sub_state(&mut self, dt: f32) {
        self.state_time += dt;
        if self.sub_state == PlayerSubState::Shooting && self.state_time >= SHOOT_COOLDOWN {
            self.set_sub_state(PlayerSubState::Idle);
        }
    }
}
