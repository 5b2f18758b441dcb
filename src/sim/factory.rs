//! Entity factories
//!
//! Factories count what they build and log every creation.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Enemy, Pickup};
use super::modifier::ModifierKind;
use crate::consts::*;
use crate::journal::Journal;

#[derive(Debug)]
pub struct EnemyFactory {
    created: u32,
    journal: Journal,
}

impl EnemyFactory {
    pub fn new(journal: Journal) -> Self {
        Self { created: 0, journal }
    }

    pub fn create(&mut self, pos: Vec2) -> Enemy {
        self.created += 1;
        self.journal.info(&format!(
            "EnemyFactory created enemy #{} at position ({}, {})",
            self.created, pos.x, pos.y
        ));
        Enemy::new(pos)
    }

    /// Grid of `rows × cols` enemies, row-major
    pub fn formation(&mut self, rows: u32, cols: u32) -> Vec<Enemy> {
        let mut enemies = Vec::with_capacity((rows * cols) as usize);
        for row in 0..rows {
            for col in 0..cols {
                let pos = Vec2::new(
                    FORMATION_ORIGIN_X + col as f32 * FORMATION_SPACING_X,
                    FORMATION_ORIGIN_Y + row as f32 * FORMATION_SPACING_Y,
                );
                enemies.push(self.create(pos));
            }
        }
        enemies
    }

    pub fn created(&self) -> u32 {
        self.created
    }
}

#[derive(Debug)]
pub struct PickupFactory {
    rng: Pcg32,
    created: u32,
    journal: Journal,
}

impl PickupFactory {
    pub fn new(seed: u64, journal: Journal) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            created: 0,
            journal,
        }
    }

    /// A pickup of random kind
    pub fn create(&mut self, pos: Vec2) -> Pickup {
        let kind = ModifierKind::ALL[self.rng.random_range(0..ModifierKind::ALL.len())];
        self.create_kind(pos, kind)
    }

    pub fn create_kind(&mut self, pos: Vec2, kind: ModifierKind) -> Pickup {
        self.created += 1;
        self.journal.info(&format!(
            "PickupFactory created {} #{} at position ({}, {})",
            kind, self.created, pos.x, pos.y
        ));
        Pickup::new(pos, kind)
    }

    pub fn created(&self) -> u32 {
        self.created
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formation_layout() {
        let mut factory = EnemyFactory::new(Journal::disabled());
        let enemies = factory.formation(3, 8);
        assert_eq!(enemies.len(), 24);
        assert_eq!(factory.created(), 24);
        assert_eq!(enemies[0].pos, Vec2::new(100.0, 100.0));
        assert_eq!(enemies[7].pos, Vec2::new(660.0, 100.0));
        assert_eq!(enemies[23].pos, Vec2::new(660.0, 220.0));
    }

    #[test]
    fn test_pickups_are_deterministic_per_seed() {
        let mut a = PickupFactory::new(7, Journal::disabled());
        let mut b = PickupFactory::new(7, Journal::disabled());
        let kinds_a: Vec<_> = (0..16).map(|_| a.create(Vec2::ZERO).kind).collect();
        let kinds_b: Vec<_> = (0..16).map(|_| b.create(Vec2::ZERO).kind).collect();
        assert_eq!(kinds_a, kinds_b);
        assert_eq!(a.created(), 16);
    }

    #[test]
    fn test_specific_pickup_kind() {
        let mut factory = PickupFactory::new(1, Journal::disabled());
        let pickup = factory.create_kind(Vec2::new(10.0, 20.0), ModifierKind::Shield);
        assert_eq!(pickup.kind, ModifierKind::Shield);
        assert!(pickup.active);
    }
}
