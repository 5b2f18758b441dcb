//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches a window or
//! the clock:
//! - Entities advance by a fixed step per update
//! - Seeded RNG only
//! - Stable iteration order (scene insertion order)
//! - Drawing goes through the `Surface` trait only

pub mod collision;
pub mod entity;
pub mod factory;
pub mod modifier;
pub mod phase;
pub mod player;
pub mod playing;
pub mod scene;

pub use collision::{Aabb, CollisionReport};
pub use entity::{Bullet, Enemy, Entity, Owner, Pickup};
pub use factory::{EnemyFactory, PickupFactory};
pub use modifier::{Modifier, ModifierKind, ModifierStack, StatBlock};
pub use phase::{GameContext, Key, Phase};
pub use player::{PlayerController, PlayerInput, PlayerSubState};
pub use playing::{Outcome, Playing};
pub use scene::{NodeId, SceneGraph, SceneNode};
