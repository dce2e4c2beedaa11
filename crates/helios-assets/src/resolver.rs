//! The asset resolver: a loader thread pool plus a per-handle state machine
//! advanced on the main thread.
//!
//! Workers only fetch and decode. Every state change, placeholder synthesis,
//! and consumer notification happens inside [`AssetResolver::poll`], which the
//! host calls between ticks, so completions never interleave with a frame
//! update.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, info, trace, warn};

use crate::error::LoadError;
use crate::font::FontFace;
use crate::handle::{AssetKind, AssetState, HandleId, Resource, ResourceOrigin};
use crate::placeholder::Fallback;
use crate::source::AssetSource;
use crate::texture::Texture;

/// Loader threads to use when none is configured: half the cores, at least
/// one, at most four. Loads are I/O-bound and few.
pub fn default_worker_count() -> usize {
    (num_cpus::get() / 2).clamp(1, 4)
}

// ---------------------------------------------------------------------------
// Requests and results
// ---------------------------------------------------------------------------

/// What to load and what to substitute if loading fails.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetRequest {
    /// Deduplication key. One handle exists per key per generation.
    pub key: String,
    pub kind: AssetKind,
    pub primary: String,
    pub secondary: Option<String>,
    pub fallback: Fallback,
}

impl AssetRequest {
    /// Texture chain `/name.jpg` → `name.jpg` → `fallback`.
    pub fn texture(name: &str, fallback: Fallback) -> Self {
        Self {
            key: name.to_string(),
            kind: AssetKind::Texture,
            primary: format!("/{name}.jpg"),
            secondary: Some(format!("{name}.jpg")),
            fallback,
        }
    }

    /// Font chain: the configured path, then the same path without its
    /// leading slash, then the built-in face.
    pub fn font(path: &str) -> Self {
        let bare = path.trim_start_matches('/');
        Self {
            key: path.to_string(),
            kind: AssetKind::Font,
            primary: path.to_string(),
            secondary: (bare != path).then(|| bare.to_string()),
            fallback: Fallback::BuiltinFont,
        }
    }

    fn paths(&self) -> Vec<String> {
        let mut paths = vec![self.primary.clone()];
        paths.extend(self.secondary.clone());
        paths
    }
}

/// A handle that became Loaded during a [`poll`](AssetResolver::poll),
/// together with every consumer that subscribed while it was pending.
#[derive(Debug)]
pub struct Resolved<C> {
    pub handle: HandleId,
    pub key: String,
    pub resource: Resource,
    pub origin: ResourceOrigin,
    pub consumers: Vec<C>,
}

// ---------------------------------------------------------------------------
// Worker side
// ---------------------------------------------------------------------------

struct LoadTask {
    handle: HandleId,
    generation: u64,
    kind: AssetKind,
    paths: Vec<String>,
}

enum LoadEvent {
    Progress {
        handle: HandleId,
        generation: u64,
        attempt: u8,
        bytes: usize,
    },
    AttemptFailed {
        handle: HandleId,
        generation: u64,
        attempt: u8,
        path: String,
        error: String,
    },
    Loaded {
        handle: HandleId,
        generation: u64,
        resource: Resource,
        origin: ResourceOrigin,
    },
    Exhausted {
        handle: HandleId,
        generation: u64,
    },
}

impl LoadEvent {
    fn target(&self) -> (HandleId, u64) {
        match *self {
            LoadEvent::Progress {
                handle, generation, ..
            }
            | LoadEvent::AttemptFailed {
                handle, generation, ..
            }
            | LoadEvent::Loaded {
                handle, generation, ..
            }
            | LoadEvent::Exhausted { handle, generation } => (handle, generation),
        }
    }
}

fn decode(kind: AssetKind, path: &str, bytes: &[u8]) -> Result<Resource, LoadError> {
    match kind {
        AssetKind::Texture => Ok(Resource::Texture(Arc::new(Texture::decode(path, bytes)?))),
        AssetKind::Font => Ok(Resource::Font(Arc::new(FontFace::from_json(bytes)?))),
    }
}

/// Walk the path chain for one task, reporting each step.
fn run_task(task: &LoadTask, source: &dyn AssetSource, events: &Sender<LoadEvent>) {
    let (handle, generation) = (task.handle, task.generation);
    for (index, path) in task.paths.iter().enumerate() {
        let attempt = index as u8 + 1;
        let outcome = source.fetch(path).and_then(|bytes| {
            let _ = events.send(LoadEvent::Progress {
                handle,
                generation,
                attempt,
                bytes: bytes.len(),
            });
            decode(task.kind, path, &bytes)
        });
        match outcome {
            Ok(resource) => {
                let origin = if index == 0 {
                    ResourceOrigin::Primary
                } else {
                    ResourceOrigin::Secondary
                };
                let _ = events.send(LoadEvent::Loaded {
                    handle,
                    generation,
                    resource,
                    origin,
                });
                return;
            }
            Err(err) => {
                let _ = events.send(LoadEvent::AttemptFailed {
                    handle,
                    generation,
                    attempt,
                    path: path.clone(),
                    error: err.to_string(),
                });
            }
        }
    }
    let _ = events.send(LoadEvent::Exhausted { handle, generation });
}

// ---------------------------------------------------------------------------
// AssetResolver
// ---------------------------------------------------------------------------

struct Slot<C> {
    key: String,
    fallback: Fallback,
    path_count: u8,
    state: AssetState,
    resource: Option<Resource>,
    consumers: Vec<C>,
}

/// Resolves textures and fonts through primary/secondary/placeholder chains.
///
/// `C` is the consumer token callers attach to a handle (for example "the
/// material of body 3"). Tokens come back exactly once, in the [`Resolved`]
/// entry for their handle.
pub struct AssetResolver<C> {
    source: Arc<dyn AssetSource>,
    task_sender: Option<Sender<LoadTask>>,
    event_sender: Sender<LoadEvent>,
    event_receiver: Receiver<LoadEvent>,
    worker_handles: Vec<JoinHandle<()>>,
    slots: Vec<Slot<C>>,
    by_key: HashMap<String, HandleId>,
    generation: u64,
}

impl<C> AssetResolver<C> {
    /// Create a resolver with `worker_count` loader threads. With zero
    /// workers, loads run on the calling thread inside
    /// [`request`](Self::request); their results still wait for the next
    /// [`poll`](Self::poll).
    pub fn new(source: Arc<dyn AssetSource>, worker_count: usize) -> Self {
        let (event_tx, event_rx) = crossbeam_channel::unbounded();

        let (task_sender, worker_handles) = if worker_count == 0 {
            (None, Vec::new())
        } else {
            let (task_tx, task_rx) = crossbeam_channel::unbounded::<LoadTask>();
            let mut handles = Vec::with_capacity(worker_count);
            for i in 0..worker_count {
                let rx = task_rx.clone();
                let tx = event_tx.clone();
                let source = Arc::clone(&source);
                handles.push(
                    std::thread::Builder::new()
                        .name(format!("asset-loader-{i}"))
                        .spawn(move || {
                            while let Ok(task) = rx.recv() {
                                run_task(&task, source.as_ref(), &tx);
                            }
                        })
                        .expect("Failed to spawn asset loader thread"),
                );
            }
            (Some(task_tx), handles)
        };

        debug!(workers = worker_count, "asset resolver started");
        Self {
            source,
            task_sender,
            event_sender: event_tx,
            event_receiver: event_rx,
            worker_handles,
            slots: Vec::new(),
            by_key: HashMap::new(),
            generation: 0,
        }
    }

    /// Start resolving `request`, or return the existing handle for its key.
    pub fn request(&mut self, request: AssetRequest) -> HandleId {
        if let Some(&handle) = self.by_key.get(&request.key) {
            trace!(key = %request.key, %handle, "asset request deduplicated");
            return handle;
        }

        let handle = HandleId(self.slots.len() as u32);
        let paths = request.paths();
        self.slots.push(Slot {
            key: request.key.clone(),
            fallback: request.fallback,
            path_count: paths.len() as u8,
            state: AssetState::Pending { attempt: 1 },
            resource: None,
            consumers: Vec::new(),
        });
        self.by_key.insert(request.key.clone(), handle);
        debug!(key = %request.key, %handle, generation = self.generation, "asset requested");

        self.dispatch(LoadTask {
            handle,
            generation: self.generation,
            kind: request.kind,
            paths,
        });
        handle
    }

    fn dispatch(&self, task: LoadTask) {
        let task = match &self.task_sender {
            Some(sender) => match sender.send(task) {
                Ok(()) => return,
                Err(err) => err.into_inner(),
            },
            None => task,
        };
        run_task(&task, self.source.as_ref(), &self.event_sender);
    }

    /// Attach a consumer to `handle`. When the handle is already Loaded the
    /// resource is returned for immediate use and the consumer is not stored.
    pub fn subscribe(&mut self, handle: HandleId, consumer: C) -> Option<Resource> {
        let slot = self.slots.get_mut(handle.0 as usize)?;
        if slot.state.is_loaded() {
            return slot.resource.clone();
        }
        slot.consumers.push(consumer);
        None
    }

    /// Drain loader events and advance handle states. Returns every handle
    /// that reached Loaded during this call.
    pub fn poll(&mut self) -> Vec<Resolved<C>> {
        let mut resolved = Vec::new();
        while let Ok(event) = self.event_receiver.try_recv() {
            let (handle, generation) = event.target();
            if generation != self.generation {
                debug!(%handle, generation, current = self.generation, "discarding stale asset event");
                continue;
            }
            let Some(slot) = self.slots.get_mut(handle.0 as usize) else {
                continue;
            };
            if slot.state.is_loaded() {
                continue;
            }

            match event {
                LoadEvent::Progress { attempt, bytes, .. } => {
                    trace!(key = %slot.key, attempt, bytes, "asset bytes received");
                }
                LoadEvent::AttemptFailed {
                    attempt,
                    path,
                    error,
                    ..
                } => {
                    warn!(key = %slot.key, %path, attempt, %error, "asset load attempt failed");
                    if attempt < slot.path_count {
                        slot.state = AssetState::Pending {
                            attempt: attempt + 1,
                        };
                    }
                }
                LoadEvent::Loaded {
                    resource, origin, ..
                } => {
                    debug!(key = %slot.key, ?origin, "asset loaded");
                    resolved.push(finish(handle, slot, resource, origin));
                }
                LoadEvent::Exhausted { .. } => {
                    slot.state = AssetState::Failed;
                    info!(key = %slot.key, fallback = slot.fallback.name(), "substituting placeholder");
                    let resource = slot.fallback.generate();
                    resolved.push(finish(handle, slot, resource, ResourceOrigin::Placeholder));
                }
            }
        }
        resolved
    }

    /// Forget every handle and start a new generation. Loads still in flight
    /// from the old generation are discarded when they complete.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.slots.clear();
        self.by_key.clear();
        debug!(generation = self.generation, "asset resolver reset");
    }

    pub fn state(&self, handle: HandleId) -> Option<AssetState> {
        self.slots.get(handle.0 as usize).map(|s| s.state)
    }

    pub fn resource(&self, handle: HandleId) -> Option<&Resource> {
        self.slots
            .get(handle.0 as usize)
            .and_then(|s| s.resource.as_ref())
    }

    pub fn key(&self, handle: HandleId) -> Option<&str> {
        self.slots.get(handle.0 as usize).map(|s| s.key.as_str())
    }

    /// Handles in the current generation.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Handles not yet Loaded.
    pub fn pending_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.state.is_loaded()).count()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn worker_count(&self) -> usize {
        self.worker_handles.len()
    }

    /// Stop the loader threads. Later requests run inline.
    pub fn shutdown(&mut self) {
        self.task_sender.take();
        for handle in self.worker_handles.drain(..) {
            let _ = handle.join();
        }
    }
}

fn finish<C>(
    handle: HandleId,
    slot: &mut Slot<C>,
    resource: Resource,
    origin: ResourceOrigin,
) -> Resolved<C> {
    slot.state = AssetState::Loaded(origin);
    slot.resource = Some(resource.clone());
    Resolved {
        handle,
        key: slot.key.clone(),
        resource,
        origin,
        consumers: std::mem::take(&mut slot.consumers),
    }
}

impl<C> Drop for AssetResolver<C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryAssetSource;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::time::{Duration, Instant};

    const GREY: [u8; 3] = [128, 128, 128];

    fn png_bytes(color: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(2, 2, Rgba(color));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn inline(source: MemoryAssetSource) -> AssetResolver<&'static str> {
        AssetResolver::new(Arc::new(source), 0)
    }

    fn poll_until_loaded<C>(resolver: &mut AssetResolver<C>, expected: usize) -> Vec<Resolved<C>> {
        let mut out = Vec::new();
        let start = Instant::now();
        while out.len() < expected {
            out.extend(resolver.poll());
            assert!(start.elapsed().as_secs() < 5, "Timed out waiting for assets");
            std::thread::sleep(Duration::from_millis(1));
        }
        out
    }

    #[test]
    fn test_primary_success() {
        let source = MemoryAssetSource::new().with_file("/earth.jpg", png_bytes([1, 2, 3, 255]));
        let mut resolver = inline(source);
        let handle = resolver.request(AssetRequest::texture("earth", Fallback::EarthLike));

        // Nothing is applied before the poll.
        assert_eq!(resolver.state(handle), Some(AssetState::Pending { attempt: 1 }));
        assert!(resolver.subscribe(handle, "earth-material").is_none());

        let resolved = resolver.poll();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].origin, ResourceOrigin::Primary);
        assert_eq!(resolved[0].consumers, vec!["earth-material"]);
        assert_eq!(resolver.state(handle), Some(AssetState::Loaded(ResourceOrigin::Primary)));
    }

    #[test]
    fn test_secondary_used_after_primary_fails() {
        let source = MemoryAssetSource::new().with_file("saturn.jpg", png_bytes([9, 9, 9, 255]));
        let mut resolver = inline(source);
        let handle = resolver.request(AssetRequest::texture("saturn", Fallback::Banded(GREY)));
        resolver.subscribe(handle, "rings");

        let resolved = resolver.poll();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].origin, ResourceOrigin::Secondary);
        let tex = resolved[0].resource.as_texture().unwrap();
        assert_eq!(tex.label, "saturn.jpg");
    }

    #[test]
    fn test_both_paths_fail_yields_placeholder_in_one_poll() {
        let mut resolver = inline(MemoryAssetSource::new());
        let handle = resolver.request(AssetRequest::texture("earth", Fallback::EarthLike));
        resolver.subscribe(handle, "earth-material");
        resolver.subscribe(handle, "earth-mesh");

        let resolved = resolver.poll();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].origin, ResourceOrigin::Placeholder);
        assert_eq!(resolved[0].consumers, vec!["earth-material", "earth-mesh"]);
        assert_eq!(
            resolver.state(handle),
            Some(AssetState::Loaded(ResourceOrigin::Placeholder))
        );
        let tex = resolver.resource(handle).and_then(|r| r.as_texture()).unwrap();
        assert_eq!(tex.width(), 512);
    }

    #[test]
    fn test_undecodable_primary_falls_through() {
        let source = MemoryAssetSource::new()
            .with_file("/venus.jpg", b"not a jpeg".to_vec())
            .with_file("venus.jpg", png_bytes([255, 198, 73, 255]));
        let mut resolver = inline(source);
        resolver.request(AssetRequest::texture("venus", Fallback::Banded(GREY)));
        let resolved = resolver.poll();
        assert_eq!(resolved[0].origin, ResourceOrigin::Secondary);
    }

    #[test]
    fn test_duplicate_key_shares_handle_and_loads_once() {
        let source = Arc::new(MemoryAssetSource::new().with_file("/jupiter.jpg", png_bytes([0; 4])));
        let mut resolver: AssetResolver<u32> = AssetResolver::new(source.clone(), 0);
        let a = resolver.request(AssetRequest::texture("jupiter", Fallback::Banded(GREY)));
        let b = resolver.request(AssetRequest::texture("jupiter", Fallback::Banded(GREY)));
        assert_eq!(a, b);
        assert_eq!(resolver.len(), 1);
        assert_eq!(source.fetched(), vec!["/jupiter.jpg"]);

        resolver.subscribe(a, 1);
        resolver.subscribe(b, 2);
        let resolved = resolver.poll();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].consumers, vec![1, 2]);
    }

    #[test]
    fn test_consumers_notified_exactly_once() {
        let mut resolver = inline(MemoryAssetSource::new());
        let handle = resolver.request(AssetRequest::texture("mercury", Fallback::Banded(GREY)));
        resolver.subscribe(handle, "mesh");
        assert_eq!(resolver.poll().len(), 1);
        assert!(resolver.poll().is_empty());

        // Late subscribers get the resource directly.
        assert!(resolver.subscribe(handle, "late").is_some());
        assert!(resolver.poll().is_empty());
    }

    #[test]
    fn test_reset_discards_stale_results() {
        let mut resolver = inline(MemoryAssetSource::new());
        resolver.request(AssetRequest::texture("neptune", Fallback::Banded(GREY)));
        resolver.reset();
        assert!(resolver.is_empty());
        assert!(resolver.poll().is_empty());
        assert_eq!(resolver.generation(), 1);

        // The same key can be requested again in the new generation.
        let handle = resolver.request(AssetRequest::texture("neptune", Fallback::Banded(GREY)));
        assert_eq!(handle, HandleId(0));
        assert_eq!(resolver.poll().len(), 1);
    }

    #[test]
    fn test_font_request_chain() {
        let request = AssetRequest::font("/fonts/helvetiker_regular.typeface.json");
        assert_eq!(request.secondary.as_deref(), Some("fonts/helvetiker_regular.typeface.json"));

        let mut resolver = inline(MemoryAssetSource::new());
        let handle = resolver.request(request);
        let resolved = resolver.poll();
        assert_eq!(resolved[0].origin, ResourceOrigin::Placeholder);
        assert!(resolver.resource(handle).and_then(|r| r.as_font()).is_some());
    }

    #[test]
    fn test_threaded_resolution() {
        let source = MemoryAssetSource::new()
            .with_file("/earth.jpg", png_bytes([10, 20, 30, 255]))
            .with_file("uranus.jpg", png_bytes([79, 208, 231, 255]));
        let mut resolver: AssetResolver<usize> = AssetResolver::new(Arc::new(source), 2);
        assert_eq!(resolver.worker_count(), 2);

        let names = ["earth", "uranus", "neptune"];
        for (i, name) in names.iter().enumerate() {
            let handle = resolver.request(AssetRequest::texture(name, Fallback::Banded(GREY)));
            resolver.subscribe(handle, i);
        }

        let mut resolved = poll_until_loaded(&mut resolver, 3);
        resolved.sort_by_key(|r| r.handle);
        let origins: Vec<_> = resolved.iter().map(|r| r.origin).collect();
        assert_eq!(
            origins,
            vec![
                ResourceOrigin::Primary,
                ResourceOrigin::Secondary,
                ResourceOrigin::Placeholder
            ]
        );
        assert_eq!(resolver.pending_count(), 0);
    }

    #[test]
    fn test_requests_after_shutdown_run_inline() {
        let mut resolver: AssetResolver<()> = AssetResolver::new(Arc::new(MemoryAssetSource::new()), 1);
        resolver.shutdown();
        resolver.request(AssetRequest::texture("mars", Fallback::Banded([193, 68, 14])));
        assert_eq!(resolver.poll().len(), 1);
    }
}
