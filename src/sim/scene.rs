//! Scene graph
//!
//! An ordered composite of entities and nested groups. Insertion order is
//! draw order. The graph is the only owner of its members and the only place
//! that prunes them.

use serde::{Deserialize, Serialize};

use super::entity::{Bullet, Enemy, Entity, Pickup};
use crate::renderer::Surface;

/// Member handle, unique within one graph
pub type NodeId = u32;

/// A scene member: a leaf entity or a nested group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SceneNode {
    Entity(Entity),
    Group(SceneGraph),
}

impl SceneNode {
    pub fn is_active(&self) -> bool {
        match self {
            SceneNode::Entity(entity) => entity.is_active(),
            SceneNode::Group(group) => group.is_active(),
        }
    }

    pub fn update(&mut self) {
        match self {
            SceneNode::Entity(entity) => entity.update(),
            SceneNode::Group(group) => group.update(),
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        match self {
            SceneNode::Entity(entity) => entity.render(surface),
            SceneNode::Group(group) => group.render(surface),
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut SceneGraph> {
        match self {
            SceneNode::Group(group) => Some(group),
            SceneNode::Entity(_) => None,
        }
    }
}

impl From<Entity> for SceneNode {
    fn from(entity: Entity) -> Self {
        SceneNode::Entity(entity)
    }
}

impl From<Bullet> for SceneNode {
    fn from(bullet: Bullet) -> Self {
        SceneNode::Entity(bullet.into())
    }
}

impl From<Enemy> for SceneNode {
    fn from(enemy: Enemy) -> Self {
        SceneNode::Entity(enemy.into())
    }
}

impl From<Pickup> for SceneNode {
    fn from(pickup: Pickup) -> Self {
        SceneNode::Entity(pickup.into())
    }
}

impl From<SceneGraph> for SceneNode {
    fn from(group: SceneGraph) -> Self {
        SceneNode::Group(group)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Member {
    id: NodeId,
    node: SceneNode,
}

/// Ordered collection of scene members
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneGraph {
    name: String,
    active: bool,
    members: Vec<Member>,
    next_id: NodeId,
}

impl SceneGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            members: Vec::new(),
            next_id: 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Append a member at the top of the draw order
    pub fn add(&mut self, node: impl Into<SceneNode>) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.members.push(Member {
            id,
            node: node.into(),
        });
        id
    }

    /// Detach a direct member
    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        let index = self.members.iter().position(|m| m.id == id)?;
        Some(self.members.remove(index).node)
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.members.iter().find(|m| m.id == id).map(|m| &m.node)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.members
            .iter_mut()
            .find(|m| m.id == id)
            .map(|m| &mut m.node)
    }

    /// Update every active member, then prune whatever is inactive.
    ///
    /// A member deactivated during this pass was still updated once.
    pub fn update(&mut self) {
        for member in &mut self.members {
            if member.node.is_active() {
                member.node.update();
            }
        }
        self.members.retain(|m| m.node.is_active());
    }

    /// Draw active members in insertion order
    pub fn render(&self, surface: &mut dyn Surface) {
        for member in &self.members {
            if member.node.is_active() {
                member.node.render(surface);
            }
        }
    }

    /// Active entities, depth-first in draw order
    pub fn entities(&self) -> Vec<&Entity> {
        let mut out = Vec::new();
        self.collect_entities(&mut out);
        out
    }

    fn collect_entities<'a>(&'a self, out: &mut Vec<&'a Entity>) {
        for member in &self.members {
            if !member.node.is_active() {
                continue;
            }
            match &member.node {
                SceneNode::Entity(entity) => out.push(entity),
                SceneNode::Group(group) => group.collect_entities(out),
            }
        }
    }

    /// Mutable active entities, depth-first in draw order
    pub fn entities_mut(&mut self) -> Vec<&mut Entity> {
        let mut out = Vec::new();
        self.collect_entities_mut(&mut out);
        out
    }

    fn collect_entities_mut<'a>(&'a mut self, out: &mut Vec<&'a mut Entity>) {
        for member in &mut self.members {
            if !member.node.is_active() {
                continue;
            }
            match &mut member.node {
                SceneNode::Entity(entity) => out.push(entity),
                SceneNode::Group(group) => group.collect_entities_mut(out),
            }
        }
    }

    pub fn active_enemies(&self) -> Vec<&Enemy> {
        self.entities()
            .into_iter()
            .filter_map(Entity::as_enemy)
            .collect()
    }

    pub fn active_enemies_mut(&mut self) -> Vec<&mut Enemy> {
        self.entities_mut()
            .into_iter()
            .filter_map(|entity| match entity {
                Entity::Enemy(enemy) => Some(enemy),
                _ => None,
            })
            .collect()
    }

    /// Number of direct members (active or not)
    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
