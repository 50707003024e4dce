//=========================================================================
// Object Core
//=========================================================================
//
// Identity and placement data every game object carries.
//
// Ids are drawn from a process-wide counter, so two objects constructed
// through `ObjectCore::new()` can never collide, inside one game or
// across games.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

//=== Internal Dependencies ===============================================

use crate::core::math::Transform;

//=== GameObjectId ========================================================

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identity of a game object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameObjectId(u64);

impl GameObjectId {
    /// Allocates a fresh id.
    pub fn generate() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Wraps a raw value (replays, fixtures). Uniqueness is the caller's concern.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GameObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

//=== ObjectCore ==========================================================

/// Data shared by all game objects regardless of their capabilities.
///
/// `enabled = false` keeps the object in the game but skips it during
/// update, fixed update, draw and hit testing.
#[derive(Debug, Clone)]
pub struct ObjectCore {
    id: GameObjectId,

    /// Participation gate for every per-frame pass.
    pub enabled: bool,

    /// Display name. Defaults to the concrete type name when added to a game.
    pub name: Option<String>,

    /// Free classification label (not unique).
    pub tag: Option<String>,

    /// Draw and update priority. Ties keep insertion order.
    pub sorting_order: i32,

    /// Position, scale and rotation in grid space.
    pub transform: Transform,
}

impl ObjectCore {
    /// Creates a core with a freshly generated id and one-cell transform.
    pub fn new() -> Self {
        Self::with_id(GameObjectId::generate())
    }

    /// Creates a core with an explicit id.
    pub fn with_id(id: GameObjectId) -> Self {
        Self {
            id,
            enabled: true,
            name: None,
            tag: None,
            sorting_order: 0,
            transform: Transform::default(),
        }
    }

    pub fn id(&self) -> GameObjectId {
        self.id
    }

    //--- Builder Helpers --------------------------------------------------

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_sorting_order(mut self, order: i32) -> Self {
        self.sorting_order = order;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

impl Default for ObjectCore {
    fn default() -> Self {
        Self::new()
    }
}

//=== Handle ==============================================================

/// Typed reference to a live game object, returned by `Game::add_game_object`.
///
/// A handle only stores the id; resolving it checks the concrete type.
pub struct Handle<T> {
    id: GameObjectId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub(crate) fn new(id: GameObjectId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> GameObjectId {
        self.id
    }
}

//--- Trait Implementations -----------------------------------------------

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Handle<T> {}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.id).finish()
    }
}

impl<T> From<Handle<T>> for GameObjectId {
    fn from(handle: Handle<T>) -> Self {
        handle.id
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let ids: Vec<_> = (0..100).map(|_| ObjectCore::new().id()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len());
    }

    #[test]
    fn new_core_defaults() {
        let core = ObjectCore::new();
        assert!(core.enabled);
        assert!(core.name.is_none());
        assert!(core.tag.is_none());
        assert_eq!(core.sorting_order, 0);
        assert_eq!(core.transform, Transform::default());
    }

    #[test]
    fn handle_converts_to_id() {
        let id = GameObjectId::from_raw(7);
        let handle: Handle<String> = Handle::new(id);
        let copy = handle;
        assert_eq!(GameObjectId::from(copy), id);
        assert_eq!(format!("{}", id), "#00000007");
    }
}
