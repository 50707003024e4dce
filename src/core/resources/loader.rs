//=========================================================================
// Resource Loaders
//=========================================================================
//
// The seam between the resource manager and whatever actually fetches
// bytes. A loader receives a request plus a completion sender and must
// send exactly one `ResourceOutcome` for it, from any thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::thread;

use crossbeam_channel::Sender;
use image::ImageError;
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{ResourceData, ResourceKind, ResourceOutcome, ResourceRequest};
use crate::core::error::ResourceError;

//=== ResourceLoader ======================================================

pub trait ResourceLoader {
    fn load(&self, request: ResourceRequest, completions: Sender<ResourceOutcome>);
}

//=== ImageLoader =========================================================

/// Decodes image files on short-lived background threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageLoader;

impl ImageLoader {
    pub fn new() -> Self {
        Self
    }

    fn decode(request: &ResourceRequest) -> Result<ResourceData, ResourceError> {
        match request.kind {
            ResourceKind::Image => image::open(&request.path)
                .map(|image| ResourceData::Image(image.to_rgba8()))
                .map_err(|err| match err {
                    ImageError::IoError(source) => ResourceError::Io {
                        path: request.path.clone(),
                        source,
                    },
                    source => ResourceError::Decode {
                        path: request.path.clone(),
                        source,
                    },
                }),
        }
    }
}

impl ResourceLoader for ImageLoader {
    fn load(&self, request: ResourceRequest, completions: Sender<ResourceOutcome>) {
        let unstarted = request.clone();
        let fallback = completions.clone();

        let spawned = thread::Builder::new()
            .name(format!("resource-{}", request.key))
            .spawn(move || {
                debug!(target: "resources", "decoding {} from {}", request.key, request.path.display());
                let result = Self::decode(&request);
                // The manager may be gone already; nothing to report to then.
                let _ = completions.send(request.outcome(result));
            });

        if let Err(source) = spawned {
            warn!(target: "resources", "cannot spawn loader thread for {}: {}", unstarted.key, source);
            let key = unstarted.key.clone();
            let _ = fallback.send(unstarted.outcome(Err(ResourceError::Spawn { key, source })));
        }
    }
}

//=== ManualLoader ========================================================

type PendingLoad = (ResourceRequest, Sender<ResourceOutcome>);

/// Loader that parks every request until the caller completes it.
///
/// Clones share the parked requests, so a headless host or a test keeps
/// one clone to settle loads whenever it wants.
#[derive(Clone, Default)]
pub struct ManualLoader {
    pending: Rc<RefCell<Vec<PendingLoad>>>,
}

impl ManualLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys of the requests not yet completed, in request order.
    pub fn pending_keys(&self) -> Vec<String> {
        self.pending
            .borrow()
            .iter()
            .map(|(request, _)| request.key.clone())
            .collect()
    }

    /// Completes the oldest parked request for `key`. Returns `false` if no
    /// such request is parked.
    pub fn complete(&self, key: &str, result: Result<ResourceData, ResourceError>) -> bool {
        self.complete_first(|request| request.key == key, result)
    }

    /// Completes the parked request for `path`, regardless of the order the
    /// requests were made in.
    pub fn complete_path(&self, path: impl AsRef<Path>, result: Result<ResourceData, ResourceError>) -> bool {
        let path = path.as_ref();
        self.complete_first(|request| request.path == path, result)
    }

    fn complete_first<P>(&self, matches: P, result: Result<ResourceData, ResourceError>) -> bool
    where
        P: Fn(&ResourceRequest) -> bool,
    {
        let parked = {
            let mut pending = self.pending.borrow_mut();
            pending
                .iter()
                .position(|(request, _)| matches(request))
                .map(|index| pending.remove(index))
        };

        match parked {
            Some((request, completions)) => {
                let _ = completions.send(request.outcome(result));
                true
            }
            None => false,
        }
    }
}

impl ResourceLoader for ManualLoader {
    fn load(&self, request: ResourceRequest, completions: Sender<ResourceOutcome>) {
        self.pending.borrow_mut().push((request, completions));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
