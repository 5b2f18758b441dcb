//! Collision detection and response
//!
//! All shapes are axis-aligned boxes centered on the entity position. Touching
//! edges do not count as contact; any positive overlap does.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Bullet, Enemy, Entity, Owner};
use super::modifier::ModifierKind;
use super::player::PlayerController;
use super::scene::SceneGraph;
use crate::consts::HIT_SCORE;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half_extents: size * 0.5,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Strict overlap test (shared edges are not an overlap)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}

/// What one resolution pass did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Player bullets that struck an enemy
    pub enemy_hits: u32,
    /// Enemies whose health reached zero this pass
    pub enemies_destroyed: u32,
    pub score_gained: u64,
    /// Enemy bullets that reached the player unshielded
    pub lives_lost: u32,
    /// Enemy bullets absorbed by an active shield
    pub shield_blocks: u32,
    /// Modifiers granted by collected pickups, in scene order
    pub pickups: Vec<ModifierKind>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        *self == CollisionReport::default()
    }
}

/// Resolve every collision for one frame.
///
/// Player fire is settled before enemy fire so the score of the frame is
/// already counted when the last life is lost.
pub fn resolve(player: &mut PlayerController, scene: &mut SceneGraph) -> CollisionReport {
    let mut report = CollisionReport::default();

    let (hits, destroyed) = resolve_player_fire(player.bullets_mut(), scene);
    report.enemy_hits = hits;
    report.enemies_destroyed = destroyed;
    report.score_gained = hits as u64 * HIT_SCORE;

    let player_box = player.bounds();
    let (lives_lost, blocked) = resolve_enemy_fire(scene, &player_box, player.is_shielded());
    report.lives_lost = lives_lost;
    report.shield_blocks = blocked;

    report.pickups = collect_pickups(scene, &player_box);
    for kind in &report.pickups {
        player.apply_power_up(*kind, kind.default_duration());
    }

    report
}

/// Player bullets against enemies, in scene order.
///
/// The ship's own bullets go first, then player-owned bullets living in the
/// scene. Each bullet damages at most the first enemy it overlaps. Returns
/// `(hits, enemies_destroyed)`.
pub fn resolve_player_fire(bullets: &mut [Bullet], scene: &mut SceneGraph) -> (u32, u32) {
    let mut enemies: Vec<&mut Enemy> = Vec::new();
    let mut scene_bullets: Vec<&mut Bullet> = Vec::new();
    for entity in scene.entities_mut() {
        match entity {
            Entity::Enemy(enemy) => enemies.push(enemy),
            Entity::Bullet(bullet) if bullet.owner == Owner::Player => scene_bullets.push(bullet),
            _ => {}
        }
    }

    let mut hits = 0;
    let mut destroyed = 0;
    let owned = bullets
        .iter_mut()
        .filter(|b| b.active && b.owner == Owner::Player);
    for bullet in owned.chain(scene_bullets) {
        if let Some(killed) = strike(bullet, &mut enemies) {
            hits += 1;
            if killed {
                destroyed += 1;
            }
        }
    }

    (hits, destroyed)
}

/// Damage the first live enemy under `bullet`. Returns whether it died.
fn strike(bullet: &mut Bullet, enemies: &mut [&mut Enemy]) -> Option<bool> {
    let bullet_box = bullet.bounds();
    let enemy = enemies
        .iter_mut()
        .find(|e| e.is_alive() && bullet_box.overlaps(&e.bounds()))?;
    enemy.take_damage(bullet.damage);
    bullet.active = false;
    Some(!enemy.is_alive())
}

/// Enemy bullets against the player box. Returns `(lives_lost, shield_blocks)`.
pub fn resolve_enemy_fire(scene: &mut SceneGraph, player_box: &Aabb, shielded: bool) -> (u32, u32) {
    let mut lives_lost = 0;
    let mut blocked = 0;

    for entity in scene.entities_mut() {
        let Entity::Bullet(bullet) = entity else {
            continue;
        };
        if bullet.owner != Owner::Enemy || !bullet.bounds().overlaps(player_box) {
            continue;
        }
        bullet.active = false;
        if shielded {
            blocked += 1;
        } else {
            lives_lost += 1;
        }
    }

    (lives_lost, blocked)
}

/// Consume pickups touching the player box, returning their kinds
pub fn collect_pickups(scene: &mut SceneGraph, player_box: &Aabb) -> Vec<ModifierKind> {
    let mut collected = Vec::new();
    for entity in scene.entities_mut() {
        if let Entity::Pickup(pickup) = entity {
            if pickup.bounds().overlaps(player_box) {
                pickup.active = false;
                collected.push(pickup.kind);
            }
        }
    }
    collected
}
