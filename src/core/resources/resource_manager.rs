//=========================================================================
// Resource Manager
//=========================================================================
//
// Declared resources, in-flight load bookkeeping and the settlement latch.
//
// Latch rules:
// - fires once when the outstanding count returns to zero
// - fires at scan time when nothing is outstanding (including the case of
//   zero declared resources)
// - declaring a resource after the latch fired re-arms it for the next
//   batch
//
// Every launched load carries a fresh generation. Redeclaring a key while
// it loads starts a new generation, and only the outcome matching the
// entry's current generation is applied, whatever order loads finish in.
//
// The manager only reports that the latch fired; emitting the
// `LoadAllResources` signal is the caller's job.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::{
    Resource, ResourceKind, ResourceLoader, ResourceOutcome, ResourceRequest, ResourceStatus,
};

//=== ResourceManager =====================================================

pub struct ResourceManager {
    resources: Vec<Resource>,
    loader: Box<dyn ResourceLoader>,
    completion_tx: Sender<ResourceOutcome>,
    completion_rx: Receiver<ResourceOutcome>,
    outstanding: usize,
    latch_fired: bool,
    next_generation: u64,
}

impl ResourceManager {
    pub fn new(loader: Box<dyn ResourceLoader>) -> Self {
        let (completion_tx, completion_rx) = unbounded();
        Self {
            resources: Vec::new(),
            loader,
            completion_tx,
            completion_rx,
            outstanding: 0,
            latch_fired: false,
            next_generation: 1,
        }
    }

    //--- Declaration ------------------------------------------------------

    /// Registers (or replaces) a resource as pending and scans.
    ///
    /// Returns `true` if the latch fired as a result of the scan.
    pub fn declare(&mut self, kind: ResourceKind, key: impl Into<String>, path: impl Into<PathBuf>) -> bool {
        let key = key.into();
        let resource = Resource::new(kind, key.clone(), path.into());

        match self.resources.iter_mut().find(|existing| existing.key == key) {
            Some(existing) => {
                if existing.status == ResourceStatus::Loading {
                    warn!(target: "resources", "redeclared {} while it is still loading", key);
                    self.outstanding = self.outstanding.saturating_sub(1);
                }
                *existing = resource;
            }
            None => self.resources.push(resource),
        }

        if self.latch_fired {
            debug!(target: "resources", "re-arming load latch for {}", key);
            self.latch_fired = false;
        }

        self.scan()
    }

    //--- Loading ----------------------------------------------------------

    /// Hands every pending resource to the loader.
    ///
    /// Returns `true` if the latch fired, which happens here only when
    /// nothing is outstanding after the scan.
    pub fn scan(&mut self) -> bool {
        let mut launched = 0;
        for resource in self.resources.iter_mut() {
            if resource.status != ResourceStatus::Pending {
                continue;
            }
            resource.status = ResourceStatus::Loading;
            resource.generation = self.next_generation;
            self.next_generation += 1;
            self.outstanding += 1;
            launched += 1;
            self.loader.load(
                ResourceRequest {
                    key: resource.key.clone(),
                    kind: resource.kind,
                    path: resource.path.clone(),
                    generation: resource.generation,
                },
                self.completion_tx.clone(),
            );
        }

        if launched > 0 {
            debug!(target: "resources", "launched {} loads ({} outstanding)", launched, self.outstanding);
        }

        self.try_fire_latch()
    }

    /// Applies every completion that has arrived so far.
    ///
    /// Returns `true` if the latch fired.
    pub fn drain(&mut self) -> bool {
        let mut settled_any = false;
        loop {
            match self.completion_rx.try_recv() {
                Ok(outcome) => settled_any |= self.apply(outcome),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        settled_any && self.try_fire_latch()
    }

    fn apply(&mut self, outcome: ResourceOutcome) -> bool {
        let Some(resource) = self.resources.iter_mut().find(|resource| {
            resource.key == outcome.key
                && resource.status == ResourceStatus::Loading
                && resource.generation == outcome.generation
        }) else {
            debug!(
                target: "resources",
                "dropping stale completion for {} (generation {})",
                outcome.key,
                outcome.generation
            );
            return false;
        };

        match outcome.result {
            Ok(data) => {
                info!(target: "resources", "loaded {} resource {}", resource.kind, resource.key);
                resource.data = Some(data);
                resource.status = ResourceStatus::Loaded;
            }
            Err(err) => {
                error!(target: "resources", "cannot load {} resource: {}", resource.key, err);
                resource.error = Some(err);
                resource.status = ResourceStatus::Failed;
            }
        }

        self.outstanding = self.outstanding.saturating_sub(1);
        true
    }

    fn try_fire_latch(&mut self) -> bool {
        if self.outstanding == 0 && !self.latch_fired {
            self.latch_fired = true;
            debug!(target: "resources", "all {} resources settled", self.resources.len());
            return true;
        }
        false
    }

    //--- Queries ----------------------------------------------------------

    /// `true` when no declared resource is pending or loading.
    pub fn is_settled(&self) -> bool {
        self.outstanding == 0
            && self
                .resources
                .iter()
                .all(|resource| resource.status.is_settled())
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    pub fn get(&self, key: &str) -> Option<&Resource> {
        self.resources.iter().find(|resource| resource.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ResourceError;
    use crate::core::resources::{ManualLoader, ResourceData};
    use image::RgbaImage;

    fn manager() -> (ResourceManager, ManualLoader) {
        let loader = ManualLoader::new();
        (ResourceManager::new(Box::new(loader.clone())), loader)
    }

    fn image() -> ResourceData {
        ResourceData::Image(RgbaImage::new(1, 1))
    }

    fn failure(key: &str) -> ResourceError {
        ResourceError::Io {
            path: PathBuf::from(key),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        }
    }

    #[test]
    fn zero_resources_fire_immediately_once() {
        let (mut manager, _) = manager();
        assert!(manager.scan());
        assert!(!manager.scan());
        assert!(manager.is_settled());
    }

    #[test]
    fn mixed_outcomes_fire_exactly_once() {
        let (mut manager, loader) = manager();
        assert!(!manager.declare(ResourceKind::Image, "a", "a.png"));
        assert!(!manager.declare(ResourceKind::Image, "b", "b.png"));
        assert_eq!(manager.outstanding(), 2);

        loader.complete("a", Err(failure("a")));
        assert!(!manager.drain());
        loader.complete("b", Ok(image()));
        assert!(manager.drain());
        assert!(!manager.drain());
        assert!(!manager.scan());

        assert_eq!(manager.get("a").map(Resource::status), Some(ResourceStatus::Failed));
        assert!(manager.get("a").and_then(Resource::error).is_some());
        assert!(manager.get("b").is_some_and(Resource::is_loaded));
    }

    #[test]
    fn failed_resources_are_not_retried() {
        let (mut manager, loader) = manager();
        manager.declare(ResourceKind::Image, "a", "a.png");
        loader.complete("a", Err(failure("a")));
        manager.drain();

        manager.scan();
        assert!(loader.pending_keys().is_empty());
        assert_eq!(manager.outstanding(), 0);
    }

    #[test]
    fn declaring_after_settlement_rearms_the_latch() {
        let (mut manager, loader) = manager();
        manager.declare(ResourceKind::Image, "a", "a.png");
        loader.complete("a", Ok(image()));
        assert!(manager.drain());

        manager.declare(ResourceKind::Image, "b", "b.png");
        assert_eq!(loader.pending_keys(), vec!["b"]);
        assert!(!manager.is_settled());
        loader.complete("b", Ok(image()));
        assert!(manager.drain());
    }

    #[test]
    fn redeclaring_replaces_the_entry() {
        let (mut manager, loader) = manager();
        manager.declare(ResourceKind::Image, "a", "old.png");
        loader.complete("a", Ok(image()));
        manager.drain();

        manager.declare(ResourceKind::Image, "a", "new.png");
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.get("a").map(|r| r.path().to_path_buf()), Some(PathBuf::from("new.png")));
        assert_eq!(manager.get("a").map(Resource::status), Some(ResourceStatus::Loading));
    }

    #[test]
    fn redeclaring_in_flight_drops_the_old_completion() {
        let (mut manager, loader) = manager();
        manager.declare(ResourceKind::Image, "a", "old.png");
        manager.declare(ResourceKind::Image, "a", "new.png");
        assert_eq!(manager.outstanding(), 1);

        loader.complete_path("old.png", Err(failure("old")));
        assert!(!manager.drain());
        assert_eq!(manager.get("a").map(Resource::status), Some(ResourceStatus::Loading));

        loader.complete_path("new.png", Ok(image()));
        assert!(manager.drain());
        assert!(manager.get("a").is_some_and(Resource::is_loaded));
    }

    #[test]
    fn redeclared_load_finishing_first_wins() {
        let (mut manager, loader) = manager();
        manager.declare(ResourceKind::Image, "a", "old.png");
        manager.declare(ResourceKind::Image, "a", "new.png");

        loader.complete_path("new.png", Ok(ResourceData::Image(RgbaImage::new(2, 2))));
        assert!(manager.drain(), "latch fires as soon as the current load settles");

        loader.complete_path("old.png", Ok(ResourceData::Image(RgbaImage::new(1, 1))));
        assert!(!manager.drain());

        let resource = manager.get("a").unwrap();
        assert_eq!(resource.path(), std::path::Path::new("new.png"));
        assert_eq!(resource.image().map(RgbaImage::dimensions), Some((2, 2)));
        assert_eq!(manager.outstanding(), 0);
    }
}
