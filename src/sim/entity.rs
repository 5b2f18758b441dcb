//! Scene entities: bullets, enemies and pickups
//!
//! Every entity is a leaf. Grouping lives in the scene graph, so no entity
//! type carries an add/remove capability.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::modifier::ModifierKind;
use crate::consts::*;
use crate::renderer::shapes::{self, colors};
use crate::renderer::Surface;

/// Which side fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

impl Owner {
    /// Vertical travel direction (screen y grows downward)
    pub fn direction(&self) -> f32 {
        match self {
            Owner::Player => -1.0,
            Owner::Enemy => 1.0,
        }
    }
}

/// A projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub owner: Owner,
    pub damage: i32,
    pub active: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, owner: Owner, damage: i32) -> Self {
        Self {
            pos,
            owner,
            damage,
            active: true,
        }
    }

    pub fn player(pos: Vec2, damage: i32) -> Self {
        Self::new(pos, Owner::Player, damage)
    }

    pub fn enemy(pos: Vec2) -> Self {
        Self::new(pos, Owner::Enemy, 1)
    }

    pub fn update(&mut self) {
        self.pos.y += BULLET_SPEED * ENTITY_STEP * self.owner.direction();
        if self.pos.y < BULLET_MIN_Y || self.pos.y > BULLET_MAX_Y {
            self.active = false;
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT))
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let size = Vec2::new(BULLET_WIDTH, BULLET_HEIGHT);
        match self.owner {
            Owner::Player => {
                shapes::fill_rect_centered(surface, self.pos, size, colors::PLAYER_BULLET);
                // Bright core on the leading half
                let core = Vec2::new(BULLET_WIDTH - 2.0, BULLET_HEIGHT / 2.0);
                let core_center = self.pos - Vec2::new(0.0, BULLET_HEIGHT / 4.0);
                shapes::fill_rect_centered(surface, core_center, core, colors::PLAYER_BULLET_CORE);
            }
            Owner::Enemy => {
                shapes::fill_oval_centered(surface, self.pos, size, colors::ENEMY_BULLET);
            }
        }
    }
}

/// A formation invader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    /// Horizontal velocity (pixels/sec, sign is direction)
    pub vel_x: f32,
    pub health: i32,
    pub active: bool,
}

impl Enemy {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel_x: ENEMY_SPEED,
            health: ENEMY_HEALTH,
            active: true,
        }
    }

    /// Side-to-side march, stepping down on every bounce
    pub fn update(&mut self) {
        self.pos.x += self.vel_x * ENTITY_STEP;
        if self.pos.x > ENEMY_MAX_X || self.pos.x < ENEMY_MIN_X {
            self.vel_x = -self.vel_x;
            self.pos.y += ENEMY_DROP;
        }
    }

    pub fn take_damage(&mut self, damage: i32) {
        self.health -= damage;
        if self.health <= 0 {
            self.active = false;
        }
    }

    pub fn is_alive(&self) -> bool {
        self.active && self.health > 0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT))
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        shapes::fill_rect_centered(
            surface,
            self.pos,
            Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            colors::ENEMY,
        );
        let eye = Vec2::new(6.0, 6.0);
        for dx in [-8.0, 8.0] {
            shapes::fill_oval_centered(surface, self.pos + Vec2::new(dx, -4.0), eye, colors::ENEMY_EYE);
        }
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub pos: Vec2,
    pub kind: ModifierKind,
    /// Descent speed (pixels/sec)
    pub fall_speed: f32,
    /// Drives the pulse animation
    pub anim_time: f32,
    pub active: bool,
}

impl Pickup {
    pub fn new(pos: Vec2, kind: ModifierKind) -> Self {
        Self {
            pos,
            kind,
            fall_speed: PICKUP_FALL_SPEED,
            anim_time: 0.0,
            active: true,
        }
    }

    pub fn update(&mut self) {
        self.anim_time += ENTITY_STEP;
        self.pos.y += self.fall_speed * ENTITY_STEP;
        if self.pos.y > SCREEN_HEIGHT {
            self.active = false;
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(PICKUP_SIZE))
    }

    pub fn color(&self) -> crate::renderer::Color {
        match self.kind {
            ModifierKind::SpeedBoost => colors::SPEED_BOOST,
            ModifierKind::Shield => colors::SHIELD,
            ModifierKind::FirePower => colors::FIRE_POWER,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self.kind {
            ModifierKind::SpeedBoost => "S",
            ModifierKind::Shield => "D",
            ModifierKind::FirePower => "F",
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let scale = 1.0 + 0.1 * (self.anim_time * 5.0).sin();
        let size = Vec2::splat(PICKUP_SIZE * scale);
        let color = self.color();
        shapes::fill_oval_centered(surface, self.pos, size, [color[0], color[1], color[2], 0.3]);
        shapes::stroke_oval_centered(surface, self.pos, size, color, 2.0);
        shapes::text(surface, self.pos + Vec2::new(-5.0, 5.0), self.symbol(), 16.0, color);
    }
}

/// Closed set of scene entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Entity {
    Bullet(Bullet),
    Enemy(Enemy),
    Pickup(Pickup),
}

impl Entity {
    pub fn update(&mut self) {
        match self {
            Entity::Bullet(b) => b.update(),
            Entity::Enemy(e) => e.update(),
            Entity::Pickup(p) => p.update(),
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        match self {
            Entity::Bullet(b) => b.render(surface),
            Entity::Enemy(e) => e.render(surface),
            Entity::Pickup(p) => p.render(surface),
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Entity::Bullet(b) => b.active,
            Entity::Enemy(e) => e.is_alive(),
            Entity::Pickup(p) => p.active,
        }
    }

    pub fn set_active(&mut self, active: bool) {
        match self {
            Entity::Bullet(b) => b.active = active,
            Entity::Enemy(e) => e.active = active,
            Entity::Pickup(p) => p.active = active,
        }
    }

    pub fn bounds(&self) -> Aabb {
        match self {
            Entity::Bullet(b) => b.bounds(),
            Entity::Enemy(e) => e.bounds(),
            Entity::Pickup(p) => p.bounds(),
        }
    }

    pub fn pos(&self) -> Vec2 {
        match self {
            Entity::Bullet(b) => b.pos,
            Entity::Enemy(e) => e.pos,
            Entity::Pickup(p) => p.pos,
        }
    }

    /// Short label used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            Entity::Bullet(b) => match b.owner {
                Owner::Player => "PlayerBullet",
                Owner::Enemy => "EnemyBullet",
            },
            Entity::Enemy(_) => "Enemy",
            Entity::Pickup(_) => "Pickup",
        }
    }

    pub fn as_enemy(&self) -> Option<&Enemy> {
        match self {
            Entity::Enemy(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Bullet> for Entity {
    fn from(bullet: Bullet) -> Self {
        Entity::Bullet(bullet)
    }
}

impl From<Enemy> for Entity {
    fn from(enemy: Enemy) -> Self {
        Entity::Enemy(enemy)
    }
}

impl From<Pickup> for Entity {
    fn from(pickup: Pickup) -> Self {
        Entity::Pickup(pickup)
    }
}
