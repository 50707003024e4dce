//=========================================================================
// Game Object Registry
//=========================================================================
//
// Ordered storage for live game objects.
//
// Invariants:
// - ids are unique across the collection
// - order is `sorting_order` ascending; ties keep insertion order
//
// The registry only stores and orders objects. Lifecycle hooks are driven
// by `Game`, which owns the registry next to the shared context.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::{GameObject, GameObjectId};
use crate::core::error::GameError;

//=== GameObjectRegistry ==================================================

/// Live game objects in draw/update order.
#[derive(Default)]
pub struct GameObjectRegistry {
    objects: Vec<Box<dyn GameObject>>,
}

impl GameObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, id: GameObjectId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: GameObjectId) -> Option<usize> {
        self.objects.iter().position(|object| object.core().id() == id)
    }

    //--- Mutation ---------------------------------------------------------

    /// Inserts an object and restores sort order.
    ///
    /// Objects without a name receive their concrete type name. A duplicate
    /// id is rejected before anything changes.
    pub(crate) fn insert(&mut self, mut object: Box<dyn GameObject>) -> Result<(), GameError> {
        let id = object.core().id();
        if self.contains(id) {
            return Err(GameError::DuplicateId(id));
        }

        if object.core().name.is_none() {
            let type_name = (*object).type_name();
            object.core_mut().name = Some(type_name.to_string());
        }

        self.objects.push(object);
        self.sort();
        Ok(())
    }

    /// Removes the object with `id`, keeping the remaining order.
    pub(crate) fn remove(&mut self, id: GameObjectId) -> Option<Box<dyn GameObject>> {
        let index = self.index_of(id)?;
        Some(self.objects.remove(index))
    }

    /// Stable sort by `sorting_order`.
    ///
    /// Called after every insertion and at the start of each tick, since
    /// hooks may change an object's order at any time.
    pub(crate) fn sort(&mut self) {
        self.objects.sort_by_key(|object| object.core().sorting_order);
        trace!(target: "game::registry", "sorted {} objects", self.objects.len());
    }

    //--- Lookup -----------------------------------------------------------

    pub fn get(&self, id: GameObjectId) -> Option<&dyn GameObject> {
        self.objects
            .iter()
            .find(|object| object.core().id() == id)
            .map(|object| object.as_ref())
    }

    pub fn get_mut(&mut self, id: GameObjectId) -> Option<&mut dyn GameObject> {
        let object: &mut dyn GameObject = self
            .objects
            .iter_mut()
            .find(|object| object.core().id() == id)?
            .as_mut();
        Some(object)
    }

    /// Positional lookup in sort order.
    pub fn get_at(&self, index: usize) -> Result<&dyn GameObject, GameError> {
        let len = self.objects.len();
        self.objects
            .get(index)
            .map(|object| object.as_ref())
            .ok_or(GameError::IndexOutOfRange { index, len })
    }

    /// Iterates in sort order (use `.rev()` for topmost first).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &dyn GameObject> + '_ {
        self.objects.iter().map(|object| object.as_ref())
    }

    /// Snapshot of ids in sort order.
    ///
    /// Passes walk this snapshot so objects queued for spawn or destroy
    /// during the pass do not disturb the iteration.
    pub fn ids(&self) -> Vec<GameObjectId> {
        self.objects.iter().map(|object| object.core().id()).collect()
    }

    //--- Queries ----------------------------------------------------------

    /// All objects of concrete type `T`, in sort order.
    pub fn by_type<T: GameObject>(&self) -> Vec<&T> {
        self.iter()
            .filter_map(|object| object.downcast_ref::<T>())
            .collect()
    }

    /// All objects whose name equals `name` exactly.
    pub fn by_name(&self, name: &str) -> Vec<&dyn GameObject> {
        self.iter()
            .filter(|object| object.core().name.as_deref() == Some(name))
            .collect()
    }

    /// All objects whose tag equals `tag` exactly.
    pub fn by_tag(&self, tag: &str) -> Vec<&dyn GameObject> {
        self.iter()
            .filter(|object| object.core().tag.as_deref() == Some(tag))
            .collect()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
