//! Storage for every body on the stage and the collidable subset.
//!
//! Bodies live in insertion order and are addressed by [`BodyId`]. A moving
//! body is checked against the *current* positions of the other collidable
//! bodies, so within one tick a later mover sees the committed positions of
//! earlier movers. Collision resolution is therefore order dependent; this
//! is only sound because ticks run strictly one body at a time.

use glam::Vec3;
use hashbrown::HashSet;

use crate::body::{Body, MoveOutcome};
use crate::bounds::MovementBounds;

/// Handle to a body stored in a [`CollidableRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(usize);

impl BodyId {
    /// Position of the body in insertion order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// All bodies plus the set taking part in collision rejection.
#[derive(Debug, Default, Clone)]
pub struct CollidableRegistry {
    bodies: Vec<Body>,
    collidable: HashSet<BodyId>,
}

impl CollidableRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `body`, optionally as a collidable member.
    pub fn insert(&mut self, body: Body, collidable: bool) -> BodyId {
        let id = BodyId(self.bodies.len());
        self.bodies.push(body);
        if collidable {
            self.collidable.insert(id);
        }
        id
    }

    /// Number of stored bodies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Returns `true` when no bodies are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Body behind `id`.
    #[must_use]
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    /// Mutable body behind `id`.
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0)
    }

    /// Whether `id` takes part in collision rejection.
    #[must_use]
    pub fn is_collidable(&self, id: BodyId) -> bool {
        self.collidable.contains(&id)
    }

    /// Adds `id` to or removes it from the collidable set.
    pub fn set_collidable(&mut self, id: BodyId, collidable: bool) {
        if collidable {
            self.collidable.insert(id);
        } else {
            self.collidable.remove(&id);
        }
    }

    /// Iterates every body with its id.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(index, body)| (BodyId(index), body))
    }

    /// Collidable bodies other than `exclude`.
    pub fn collidables_except(&self, exclude: BodyId) -> impl Iterator<Item = &Body> {
        self.iter()
            .filter(move |(id, _)| *id != exclude && self.collidable.contains(id))
            .map(|(_, body)| body)
    }

    /// Would body `id` placed at `position` collide with a collidable body?
    ///
    /// Unknown ids never collide.
    #[must_use]
    pub fn would_collide(&self, id: BodyId, position: Vec3) -> bool {
        self.get(id)
            .is_some_and(|body| body.collides_at(position, self.collidables_except(id)))
    }

    /// Runs [`Body::update_movable_object`] for `id` against the other
    /// collidable bodies.
    ///
    /// Returns `None` for an unknown id.
    pub fn update_body<B>(&mut self, id: BodyId, bounds: &B) -> Option<MoveOutcome>
    where
        B: MovementBounds + ?Sized,
    {
        let len = self.bodies.len();
        let (before, rest) = self.bodies.split_at_mut(id.0.min(len));
        let (body, after) = rest.split_first_mut()?;
        let collidable = &self.collidable;
        let is_member = |index: usize| collidable.contains(&BodyId(index));
        let earlier = before
            .iter()
            .enumerate()
            .filter(|(index, _)| is_member(*index))
            .map(|(_, other)| other);
        let later = after
            .iter()
            .enumerate()
            .filter(|(offset, _)| is_member(id.0 + 1 + offset))
            .map(|(_, other)| other);
        Some(body.update_movable_object(earlier.chain(later), bounds))
    }
}
