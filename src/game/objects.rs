//=========================================================================
// Game Object Operations
//=========================================================================
//
// Add, destroy and query operations of the live collection.
//
// Not-found policy:
// - identity lookups (id, handle) report `false` when nothing matches
// - positional lookups fail with `GameError::IndexOutOfRange`
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::hooks::guarded;
use super::Game;
use crate::core::error::GameError;
use crate::core::object::{
    short_type_name, DestroyEvent, GameObject, GameObjectId, GameObjectRegistry, Handle, SpawnEvent,
};
use crate::core::signals::Signal;

impl Game {
    //=== Add =============================================================

    /// Adds `object`, runs its `start` hook and broadcasts
    /// `SpawnedGameObject`.
    pub fn add_game_object<T: GameObject>(&mut self, object: T) -> Result<Handle<T>, GameError> {
        let id = self.add_boxed(Box::new(object))?;
        Ok(Handle::new(id))
    }

    /// Object-safe variant of [`Game::add_game_object`].
    pub fn add_boxed(&mut self, object: Box<dyn GameObject>) -> Result<GameObjectId, GameError> {
        let id = self.insert_object(object)?;
        self.apply_commands();
        Ok(id)
    }

    pub(super) fn insert_object(&mut self, object: Box<dyn GameObject>) -> Result<GameObjectId, GameError> {
        let id = object.core().id();
        self.objects.insert(object)?;
        debug!(target: "game::registry", "Added game object {} ({} live)", id, self.objects.len());

        if let Some(object) = self.objects.get_mut(id) {
            let context = &mut self.context;
            guarded("start", object, |object| {
                object.start(&mut SpawnEvent {
                    game: context,
                    game_object_id: id,
                })
            });
        }

        self.context.emit(Signal::SpawnedGameObject(id));
        Ok(id)
    }

    //=== Destroy =========================================================

    /// Destroys the object with `id`.
    ///
    /// Returns `false` if no live object has that id.
    pub fn destroy_game_object_by_id(&mut self, id: GameObjectId) -> bool {
        let removed = self.remove_object(id);
        self.apply_commands();
        removed
    }

    /// Destroys the object `handle` refers to.
    ///
    /// Fails with `TypeMismatch` if the id now belongs to an object of
    /// another type; returns `Ok(false)` if it is no longer live.
    pub fn destroy_game_object_by_ref<T: GameObject>(&mut self, handle: Handle<T>) -> Result<bool, GameError> {
        let id = handle.id();
        let Some(object) = self.objects.get(id) else {
            debug!(target: "game::registry", "Destroy skipped: {} is not live", id);
            return Ok(false);
        };
        if object.downcast_ref::<T>().is_none() {
            return Err(GameError::TypeMismatch {
                id,
                expected: short_type_name(std::any::type_name::<T>()),
            });
        }
        Ok(self.destroy_game_object_by_id(id))
    }

    /// Destroys the object at `index` in sort order.
    pub fn destroy_game_object_by_index(&mut self, index: usize) -> Result<(), GameError> {
        let id = self.objects.get_at(index)?.id();
        self.destroy_game_object_by_id(id);
        Ok(())
    }

    /// Runs the destroy hook and removes the object, without applying the
    /// commands the hook queued.
    pub(super) fn remove_object(&mut self, id: GameObjectId) -> bool {
        let Some(object) = self.objects.get_mut(id) else {
            debug!(target: "game::registry", "Destroy skipped: {} is not live", id);
            return false;
        };

        let context = &mut self.context;
        guarded("destroy", object, |object| {
            object.destroy(&mut DestroyEvent {
                game: context,
                game_object_id: id,
            })
        });

        self.objects.remove(id);
        self.objects.sort();
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        debug!(target: "game::registry", "Destroyed game object {} ({} live)", id, self.objects.len());
        true
    }

    //=== Queries =========================================================

    /// The live collection in sort order.
    pub fn game_objects(&self) -> &GameObjectRegistry {
        &self.objects
    }

    pub fn get_game_object_by_id(&self, id: GameObjectId) -> Option<&dyn GameObject> {
        self.objects.get(id)
    }

    pub fn get_game_object_by_id_mut(&mut self, id: GameObjectId) -> Option<&mut dyn GameObject> {
        self.objects.get_mut(id)
    }

    /// Resolves a typed handle.
    pub fn get<T: GameObject>(&self, handle: Handle<T>) -> Option<&T> {
        self.objects.get(handle.id())?.downcast_ref::<T>()
    }

    pub fn get_mut<T: GameObject>(&mut self, handle: Handle<T>) -> Option<&mut T> {
        self.objects.get_mut(handle.id())?.downcast_mut::<T>()
    }

    pub fn get_game_objects_by_type<T: GameObject>(&self) -> Vec<&T> {
        self.objects.by_type::<T>()
    }

    pub fn get_game_objects_by_name(&self, name: &str) -> Vec<&dyn GameObject> {
        self.objects.by_name(name)
    }

    pub fn get_game_objects_by_tag(&self, tag: &str) -> Vec<&dyn GameObject> {
        self.objects.by_tag(tag)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
