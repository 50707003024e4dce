//=========================================================================
// Resources
//=========================================================================
//
// Declared assets and the gate that holds startup until they settle.
//
// Architecture:
//   declare() → ResourceManager (Pending) → scan() → ResourceLoader::load
//                                                         ↓ (background)
//   drain() ← Receiver<ResourceOutcome> ←──────────── Sender
//      ↓
//   Loaded / Failed, outstanding count → settlement latch
//
// Loads run off the game thread; their results are only applied when the
// game drains the completion channel, so all resource state is mutated on
// the game thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::RgbaImage;

//=== Internal Dependencies ===============================================

use crate::core::error::{GameError, ResourceError};

//=== Module Declarations =================================================

mod loader;
mod resource_manager;

//=== Public API ==========================================================

pub use loader::{ImageLoader, ManualLoader, ResourceLoader};
pub use resource_manager::ResourceManager;

//=== ResourceKind ========================================================

/// Kinds of resources the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Image,
}

impl FromStr for ResourceKind {
    type Err = GameError;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind {
            "image" => Ok(ResourceKind::Image),
            other => Err(GameError::UnknownResourceKind(other.to_string())),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Image => f.write_str("image"),
        }
    }
}

//=== ResourceData ========================================================

/// Decoded payload of a loaded resource.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceData {
    Image(RgbaImage),
}

//=== ResourceStatus ======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceStatus {
    /// Declared, not yet handed to the loader.
    Pending,
    /// Load in flight.
    Loading,
    Loaded,
    /// Load finished with an error. Failed entries are not retried.
    Failed,
}

impl ResourceStatus {
    /// Loaded or failed.
    pub fn is_settled(self) -> bool {
        matches!(self, ResourceStatus::Loaded | ResourceStatus::Failed)
    }
}

//=== Resource ============================================================

/// A declared resource and its load state.
#[derive(Debug)]
pub struct Resource {
    key: String,
    kind: ResourceKind,
    path: PathBuf,
    status: ResourceStatus,
    data: Option<ResourceData>,
    error: Option<ResourceError>,
    /// Generation of the load currently in flight for this entry.
    pub(crate) generation: u64,
}

impl Resource {
    pub(crate) fn new(kind: ResourceKind, key: String, path: PathBuf) -> Self {
        Self {
            key,
            kind,
            path,
            status: ResourceStatus::Pending,
            data: None,
            error: None,
            generation: 0,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn status(&self) -> ResourceStatus {
        self.status
    }

    pub fn is_loaded(&self) -> bool {
        self.status == ResourceStatus::Loaded
    }

    pub fn data(&self) -> Option<&ResourceData> {
        self.data.as_ref()
    }

    /// The failure reason of a `Failed` resource.
    pub fn error(&self) -> Option<&ResourceError> {
        self.error.as_ref()
    }

    /// The decoded image, if this is a loaded image resource.
    pub fn image(&self) -> Option<&RgbaImage> {
        match (self.kind, &self.data) {
            (ResourceKind::Image, Some(ResourceData::Image(image))) => Some(image),
            _ => None,
        }
    }
}

//=== Loader Messages =====================================================

/// What a loader is asked to fetch.
///
/// `generation` identifies this particular load; a key redeclared while
/// loading gets a new generation and the older outcome is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    pub key: String,
    pub kind: ResourceKind,
    pub path: PathBuf,
    pub generation: u64,
}

impl ResourceRequest {
    /// Builds the outcome answering this request.
    pub fn outcome(&self, result: Result<ResourceData, ResourceError>) -> ResourceOutcome {
        ResourceOutcome {
            key: self.key.clone(),
            generation: self.generation,
            result,
        }
    }
}

/// What a loader reports back, exactly once per request.
#[derive(Debug)]
pub struct ResourceOutcome {
    pub key: String,
    pub generation: u64,
    pub result: Result<ResourceData, ResourceError>,
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_known_names_only() {
        assert_eq!("image".parse::<ResourceKind>(), Ok(ResourceKind::Image));
        assert_eq!(
            "sound".parse::<ResourceKind>(),
            Err(GameError::UnknownResourceKind("sound".to_string()))
        );
        assert_eq!(ResourceKind::Image.to_string(), "image");
    }

    #[test]
    fn image_accessor_requires_loaded_data() {
        let mut resource = Resource::new(ResourceKind::Image, "hero".into(), "hero.png".into());
        assert!(resource.image().is_none());

        resource.data = Some(ResourceData::Image(RgbaImage::new(2, 2)));
        resource.status = ResourceStatus::Loaded;
        assert_eq!(resource.image().map(|image| image.width()), Some(2));
    }
}
