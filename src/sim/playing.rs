//! A live level
//!
//! Owns the player, the scene with the enemy formation, score and lives. One
//! `update` runs the player, the scene, enemy fire and collision resolution in
//! that order, then reports whether the level is over.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{self, CollisionReport};
use super::entity::{Bullet, Entity};
use super::factory::{EnemyFactory, PickupFactory};
use super::modifier::ModifierKind;
use super::phase::Key;
use super::player::PlayerController;
use super::scene::{NodeId, SceneGraph};
use crate::consts::*;
use crate::journal::Journal;
use crate::renderer::shapes::{self, colors};
use crate::renderer::Surface;
use crate::settings::Settings;

const HUD_X: f32 = 600.0;
const HUD_FONT_SIZE: f32 = 18.0;

/// How a level ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    GameOver { score: u64 },
    Victory { score: u64 },
}

#[derive(Debug)]
pub struct Playing {
    player: PlayerController,
    scene: SceneGraph,
    score: u64,
    lives: u8,
    /// Picks the shooting enemy
    rng: Pcg32,
    enemy_fire_interval: Option<f32>,
    fire_timer: f32,
    pickups: PickupFactory,
    test_triggers: bool,
    journal: Journal,
}

impl Playing {
    /// Fresh level with the full enemy formation
    pub fn new(settings: &Settings, journal: Journal) -> Self {
        let mut scene = SceneGraph::new("Level 1");
        let mut enemies = EnemyFactory::new(journal.clone());
        for enemy in enemies.formation(settings.enemy_rows, settings.enemy_cols) {
            scene.add(enemy);
        }
        journal.info(&format!("{} initialized with {} enemies", scene.name(), enemies.created()));
        Self::with_scene(settings, scene, journal)
    }

    /// Level over a prepared scene
    pub fn with_scene(settings: &Settings, scene: SceneGraph, journal: Journal) -> Self {
        let player = PlayerController::new(Vec2::new(PLAYER_START_X, PLAYER_START_Y), journal.clone());
        Self {
            player,
            scene,
            score: 0,
            lives: settings.starting_lives,
            rng: Pcg32::seed_from_u64(settings.seed),
            enemy_fire_interval: settings.enemy_fire_interval.filter(|i| *i > 0.0),
            fire_timer: 0.0,
            pickups: PickupFactory::new(settings.seed.wrapping_add(1), journal.clone()),
            test_triggers: settings.test_triggers,
            journal,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerController {
        &mut self.player
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    pub fn handle_key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.player.move_left(),
            Key::Right => self.player.move_right(),
            Key::Space => {
                self.player.shoot();
            }
            Key::Digit1 => self.trigger(ModifierKind::SpeedBoost),
            Key::Digit2 => self.trigger(ModifierKind::Shield),
            Key::Digit3 => self.trigger(ModifierKind::FirePower),
            Key::Enter | Key::Escape | Key::P => {}
        }
    }

    /// Advance one frame. `dt` must already be clamped.
    pub fn update(&mut self, dt: f32) -> Option<Outcome> {
        self.player.update(dt);
        self.scene.update();
        self.update_enemy_fire(dt);
        self.resolve_collisions();
        self.outcome()
    }

    /// Lives are checked before the formation
    pub fn outcome(&self) -> Option<Outcome> {
        if self.lives == 0 {
            Some(Outcome::GameOver { score: self.score })
        } else if self.scene.active_enemies().is_empty() {
            Some(Outcome::Victory { score: self.score })
        } else {
            None
        }
    }

    /// Resolve this frame's contacts and apply them to score and lives
    pub fn resolve_collisions(&mut self) -> CollisionReport {
        let report = collision::resolve(&mut self.player, &mut self.scene);

        if report.enemy_hits > 0 {
            self.add_score(report.score_gained);
            self.journal.info(&format!(
                "Enemy hit x{} ({} destroyed). Score: {}",
                report.enemy_hits, report.enemies_destroyed, self.score
            ));
        }
        if report.shield_blocks > 0 {
            self.journal
                .info(&format!("Shield absorbed {} enemy shot(s)", report.shield_blocks));
        }
        for _ in 0..report.lives_lost {
            self.lose_life();
        }
        for kind in &report.pickups {
            self.journal.info(&format!("Picked up {}", kind));
        }

        report
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.journal
            .info(&format!("Life lost. Remaining lives: {}", self.lives));
    }

    /// Drop a random pickup into the scene
    pub fn spawn_pickup(&mut self, pos: Vec2) -> NodeId {
        let pickup = self.pickups.create(pos);
        self.spawn(pickup)
    }

    /// Add an entity to the level's scene
    pub fn spawn(&mut self, entity: impl Into<Entity>) -> NodeId {
        let entity = entity.into();
        let pos = entity.pos();
        self.journal
            .info(&format!("Spawned {} at ({}, {})", entity.name(), pos.x, pos.y));
        self.scene.add(entity)
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        shapes::fill_screen(surface, colors::BACKGROUND);
        self.scene.render(surface);
        self.player.render(surface);
        self.render_hud(surface);
    }

    fn render_hud(&self, surface: &mut dyn Surface) {
        let lines = [
            format!("Score: {}", self.score),
            format!("Lives: {}", self.lives),
            format!("Active Power-ups: {}", self.player.active_power_ups()),
        ];
        for (i, line) in lines.into_iter().enumerate() {
            let pos = Vec2::new(HUD_X, 25.0 + i as f32 * 25.0);
            shapes::text(surface, pos, line, HUD_FONT_SIZE, colors::HUD_TEXT);
        }
    }

    fn trigger(&mut self, kind: ModifierKind) {
        if !self.test_triggers {
            return;
        }
        let duration = kind.default_duration();
        self.player.apply_power_up(kind, duration);
        self.journal
            .info(&format!("TEST: {} applied for {}s", kind, duration));
    }

    fn update_enemy_fire(&mut self, dt: f32) {
        let Some(interval) = self.enemy_fire_interval else {
            return;
        };
        self.fire_timer += dt;
        if self.fire_timer < interval {
            return;
        }
        self.fire_timer -= interval;

        let shooters: Vec<Vec2> = self.scene.active_enemies().iter().map(|e| e.pos).collect();
        if shooters.is_empty() {
            return;
        }
        let muzzle = shooters[self.rng.random_range(0..shooters.len())] + Vec2::new(0.0, ENEMY_HEIGHT * 0.5);
        self.spawn(Bullet::enemy(muzzle));
    }
}
