//! Layered stat modifiers (power-ups)
//!
//! A player's effective stats are the base [`StatBlock`] with every active
//! [`Modifier`] layered on top in application order. Layers are stored as a
//! plain list and folded on read, so a modifier anywhere in the stack can
//! expire without disturbing the ones above or below it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Speed multiplier contributed by each SpeedBoost layer
pub const SPEED_BOOST_MULTIPLIER: f32 = 2.0;
/// Defense added by each Shield layer
pub const SHIELD_BONUS: u32 = 3;
/// Firepower added by each FirePower layer
pub const FIRE_POWER_BONUS: u32 = 2;

/// Character stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    /// Horizontal movement speed (pixels/sec)
    pub speed: f32,
    /// Firepower level (selects the shot pattern)
    pub firepower: u32,
    /// Defense level
    pub defense: u32,
}

impl StatBlock {
    /// An unmodified ship
    pub const BASE: StatBlock = StatBlock {
        speed: 200.0,
        firepower: 1,
        defense: 1,
    };
}

impl Default for StatBlock {
    fn default() -> Self {
        Self::BASE
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKind {
    SpeedBoost,
    Shield,
    FirePower,
}

impl ModifierKind {
    pub const ALL: [ModifierKind; 3] = [
        ModifierKind::SpeedBoost,
        ModifierKind::Shield,
        ModifierKind::FirePower,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModifierKind::SpeedBoost => "SpeedBoost",
            ModifierKind::Shield => "Shield",
            ModifierKind::FirePower => "FirePower",
        }
    }

    /// Duration granted by a pickup or test trigger (seconds)
    pub fn default_duration(&self) -> f32 {
        match self {
            ModifierKind::SpeedBoost => 5.0,
            ModifierKind::Shield => 10.0,
            ModifierKind::FirePower => 8.0,
        }
    }

    /// Layer this kind over `stats`
    pub fn apply_to(&self, stats: StatBlock) -> StatBlock {
        match self {
            ModifierKind::SpeedBoost => StatBlock {
                speed: stats.speed * SPEED_BOOST_MULTIPLIER,
                ..stats
            },
            ModifierKind::Shield => StatBlock {
                defense: stats.defense + SHIELD_BONUS,
                ..stats
            },
            ModifierKind::FirePower => StatBlock {
                firepower: stats.firepower + FIRE_POWER_BONUS,
                ..stats
            },
        }
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single time-limited layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub kind: ModifierKind,
    /// Total lifetime (seconds)
    pub duration: f32,
    /// Time active so far (seconds)
    pub elapsed: f32,
}

impl Modifier {
    pub fn new(kind: ModifierKind, duration: f32) -> Self {
        Self {
            kind,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Base stats plus the ordered list of active modifiers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifierStack {
    base: StatBlock,
    /// Oldest first
    layers: Vec<Modifier>,
}

impl ModifierStack {
    pub fn new(base: StatBlock) -> Self {
        Self {
            base,
            layers: Vec::new(),
        }
    }

    pub fn base(&self) -> StatBlock {
        self.base
    }

    /// Push a new outermost layer
    pub fn apply(&mut self, kind: ModifierKind, duration: f32) {
        self.layers.push(Modifier::new(kind, duration));
    }

    /// Advance every layer and drop the expired ones, wherever they sit.
    ///
    /// Returns the removed layers in stack order.
    pub fn tick(&mut self, dt: f32) -> Vec<Modifier> {
        for layer in &mut self.layers {
            layer.elapsed += dt;
        }
        let (expired, active): (Vec<_>, Vec<_>) = std::mem::take(&mut self.layers)
            .into_iter()
            .partition(Modifier::is_expired);
        self.layers = active;
        expired
    }

    /// Base stats with every active layer folded on
    pub fn effective(&self) -> StatBlock {
        self.layers
            .iter()
            .fold(self.base, |stats, layer| layer.kind.apply_to(stats))
    }

    pub fn layers(&self) -> &[Modifier] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// HUD listing, e.g. `"SpeedBoost (4.5s), Shield (9.5s)"`, or `"None"`
    pub fn describe(&self) -> String {
        if self.layers.is_empty() {
            return "None".to_string();
        }
        self.layers
            .iter()
            .map(|l| format!("{} ({:.1}s)", l.kind, l.remaining()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_stack_is_base() {
        let stack = ModifierStack::new(StatBlock::BASE);
        assert_eq!(stack.effective(), StatBlock::BASE);
        assert_eq!(stack.describe(), "None");
    }

    #[test]
    fn test_combination_rules() {
        let mut stack = ModifierStack::new(StatBlock::BASE);
        stack.apply(ModifierKind::SpeedBoost, 5.0);
        stack.apply(ModifierKind::Shield, 10.0);
        stack.apply(ModifierKind::FirePower, 8.0);

        let stats = stack.effective();
        assert_eq!(stats.speed, 400.0);
        assert_eq!(stats.defense, 4);
        assert_eq!(stats.firepower, 3);
    }

    #[test]
    fn test_double_speed_boost_compounds_and_expires_together() {
        let mut stack = ModifierStack::new(StatBlock::BASE);
        stack.apply(ModifierKind::SpeedBoost, 5.0);
        stack.apply(ModifierKind::SpeedBoost, 5.0);
        assert_eq!(stack.effective().speed, 800.0);

        let removed = stack.tick(4.0);
        assert!(removed.is_empty());
        assert_eq!(stack.effective().speed, 800.0);

        let removed = stack.tick(1.0);
        assert_eq!(removed.len(), 2);
        assert_eq!(stack.effective().speed, 200.0);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_inner_layer_expiring_first_keeps_outer() {
        let mut stack = ModifierStack::new(StatBlock::BASE);
        stack.apply(ModifierKind::FirePower, 2.0);
        stack.apply(ModifierKind::Shield, 10.0);

        let removed = stack.tick(2.0);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].kind, ModifierKind::FirePower);
        assert_eq!(stack.effective().firepower, 1);
        assert_eq!(stack.effective().defense, 4);
    }

    #[test]
    fn test_describe_lists_in_stack_order() {
        let mut stack = ModifierStack::new(StatBlock::BASE);
        stack.apply(ModifierKind::SpeedBoost, 5.0);
        stack.apply(ModifierKind::Shield, 10.0);
        stack.tick(0.5);
        assert_eq!(stack.describe(), "SpeedBoost (4.5s), Shield (9.5s)");
    }

    fn kind_strategy() -> impl Strategy<Value = ModifierKind> {
        prop_oneof![
            Just(ModifierKind::SpeedBoost),
            Just(ModifierKind::Shield),
            Just(ModifierKind::FirePower),
        ]
    }

    proptest! {
        #[test]
        fn prop_active_before_duration_pruned_after(
            kind in kind_strategy(),
            duration in 0.05f32..30.0,
            frac in 0.0f32..0.99,
        ) {
            let mut stack = ModifierStack::new(StatBlock::BASE);
            stack.apply(kind, duration);

            let removed = stack.tick(duration * frac);
            prop_assert!(removed.is_empty());
            prop_assert_eq!(stack.len(), 1);

            let removed = stack.tick(duration);
            prop_assert_eq!(removed.len(), 1);
            prop_assert!(stack.is_empty());
            prop_assert_eq!(stack.effective(), StatBlock::BASE);
        }

        #[test]
        fn prop_removing_middle_layer_removes_only_its_contribution(
            outer in kind_strategy(),
            middle in kind_strategy(),
            inner in kind_strategy(),
        ) {
            let mut stack = ModifierStack::new(StatBlock::BASE);
            stack.apply(inner, 20.0);
            stack.apply(middle, 1.0);
            stack.apply(outer, 20.0);
            let before = stack.effective();

            let removed = stack.tick(1.0);
            prop_assert_eq!(removed.len(), 1);
            prop_assert_eq!(removed[0].kind, middle);
            let after = stack.effective();

            match middle {
                ModifierKind::SpeedBoost => {
                    prop_assert_eq!(before.speed / SPEED_BOOST_MULTIPLIER, after.speed);
                    prop_assert_eq!(before.firepower, after.firepower);
                    prop_assert_eq!(before.defense, after.defense);
                }
                ModifierKind::Shield => {
                    prop_assert_eq!(before.defense - SHIELD_BONUS, after.defense);
                    prop_assert_eq!(before.speed, after.speed);
                    prop_assert_eq!(before.firepower, after.firepower);
                }
                ModifierKind::FirePower => {
                    prop_assert_eq!(before.firepower - FIRE_POWER_BONUS, after.firepower);
                    prop_assert_eq!(before.speed, after.speed);
                    prop_assert_eq!(before.defense, after.defense);
                }
            }

            // The surviving layers are exactly the outer and inner ones
            let kinds: Vec<_> = stack.layers().iter().map(|l| l.kind).collect();
            prop_assert_eq!(kinds, vec![inner, outer]);
        }
    }
}
