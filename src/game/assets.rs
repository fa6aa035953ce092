//! Model Assets
//!
//! Asynchronous model loading. A [`ModelLoader`] hands out boxed futures; the
//! [`AssetQueue`] polls them once per tick with a no-op waker and moves
//! completed loads into a ready queue that the simulation drains at the start
//! of the next tick. Failed loads are logged and dropped.
//!
//! Two loaders ship with the crate:
//!
//! - [`ScriptedLoader`] - resolves immediately from registered templates (headless runs)
//! - [`ManualLoader`] - leaves every load pending until the host resolves it (browser)
//!
//! # Example
//!
//! ```rust,ignore
//! let mut loader = ScriptedLoader::new();
//! loader.register(ModelHandle::new("/static/models/tree.glb", Aabb::new(Vec3::ZERO, Vec3::ONE)));
//!
//! let mut queue = AssetQueue::new();
//! queue.submit(&mut loader, "/static/models/tree.glb", "oak-0");
//! queue.poll();
//! for event in queue.drain_ready() {
//!     // spawn event.request with event.model
//! }
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use glam::{Quat, Vec3};
use thiserror::Error;

use crate::error::SimError;
use crate::physics::Aabb;

/// Why a model failed to load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("model not found")]
    NotFound,
    #[error("decode failed: {0}")]
    Decode(String),
    /// The resolving side was dropped before producing a result.
    #[error("load cancelled")]
    Cancelled,
}

/// A loaded model: transform, animation clip names and local-space bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelHandle {
    pub path: String,
    pub position: Vec3,
    /// Rotation about +Y in radians
    pub yaw: f32,
    pub scale: Vec3,
    pub clips: Vec<String>,
    /// Bounds in model space, before scale/rotation/translation
    pub local_bounds: Aabb,
}

impl ModelHandle {
    /// Create a handle at the origin with unit scale and no clips.
    pub fn new(path: impl Into<String>, local_bounds: Aabb) -> Self {
        Self {
            path: path.into(),
            position: Vec3::ZERO,
            yaw: 0.0,
            scale: Vec3::ONE,
            clips: Vec::new(),
            local_bounds,
        }
    }

    /// Builder: attach animation clip names.
    pub fn with_clips<I, S>(mut self, clips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clips = clips.into_iter().map(Into::into).collect();
        self
    }

    /// Set the world transform.
    pub fn place(&mut self, position: Vec3, yaw: f32, scale: Vec3) {
        self.position = position;
        self.yaw = yaw;
        self.scale = scale;
    }

    /// World-space bounds under the current transform.
    pub fn world_bounds(&self) -> Aabb {
        self.local_bounds.transformed(self.position, self.yaw, self.scale)
    }

    /// Unrotated size with scale applied.
    pub fn scaled_size(&self) -> Vec3 {
        self.local_bounds.size() * self.scale
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    pub fn has_clip(&self, name: &str) -> bool {
        self.clips.iter().any(|clip| clip == name)
    }
}

/// Output of a model load.
pub type LoadResult = std::result::Result<ModelHandle, LoadError>;

/// Future returned by [`ModelLoader::load_model`].
pub type ModelFuture = Pin<Box<dyn Future<Output = LoadResult>>>;

/// Source of model loads.
pub trait ModelLoader {
    fn load_model(&mut self, path: &str) -> ModelFuture;
}

#[derive(Debug, Default)]
struct SlotState {
    result: Option<LoadResult>,
    waker: Option<Waker>,
}

/// Resolving half of a model slot.
#[derive(Debug)]
pub struct ModelResolver {
    state: Rc<RefCell<SlotState>>,
}

impl ModelResolver {
    /// Complete the load. Consumes the resolver.
    pub fn resolve(self, result: LoadResult) {
        let waker = {
            let mut state = self.state.borrow_mut();
            state.result = Some(result);
            state.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

/// Awaiting half of a model slot.
#[derive(Debug)]
pub struct PendingModel {
    state: Rc<RefCell<SlotState>>,
}

impl Future for PendingModel {
    type Output = LoadResult;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.state.borrow_mut();
        if let Some(result) = state.result.take() {
            return Poll::Ready(result);
        }
        // Resolver dropped without a result
        if Rc::strong_count(&self.state) == 1 {
            return Poll::Ready(Err(LoadError::Cancelled));
        }
        state.waker = Some(cx.waker().clone());
        Poll::Pending
    }
}

/// Create a single-threaded one-shot slot for a model load.
pub fn model_slot() -> (ModelResolver, PendingModel) {
    let state = Rc::new(RefCell::new(SlotState::default()));
    (
        ModelResolver {
            state: Rc::clone(&state),
        },
        PendingModel { state },
    )
}

/// A completed load waiting to be spawned.
#[derive(Debug)]
pub struct ReadyEvent<T> {
    pub path: String,
    pub request: T,
    pub model: ModelHandle,
}

struct InFlight<T> {
    path: String,
    request: T,
    future: ModelFuture,
}

/// Polls in-flight model loads and buffers completions.
pub struct AssetQueue<T> {
    in_flight: Vec<InFlight<T>>,
    ready: VecDeque<ReadyEvent<T>>,
}

impl<T> Default for AssetQueue<T> {
    fn default() -> Self {
        Self {
            in_flight: Vec::new(),
            ready: VecDeque::new(),
        }
    }
}

impl<T> AssetQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load. `request` travels with it to the ready event.
    pub fn submit(&mut self, loader: &mut dyn ModelLoader, path: &str, request: T) {
        log::debug!("loading model {path}");
        self.in_flight.push(InFlight {
            path: path.to_string(),
            request,
            future: loader.load_model(path),
        });
    }

    /// Poll every in-flight load once. Completions move to the ready queue in
    /// submission order; failures are logged, dropped and returned.
    pub fn poll(&mut self) -> Vec<SimError> {
        let mut cx = Context::from_waker(Waker::noop());
        let mut failures = Vec::new();

        for mut load in std::mem::take(&mut self.in_flight) {
            let polled = load.future.as_mut().poll(&mut cx);
            match polled {
                Poll::Ready(Ok(model)) => self.ready.push_back(ReadyEvent {
                    path: load.path,
                    request: load.request,
                    model,
                }),
                Poll::Ready(Err(source)) => {
                    log::warn!("model {} failed to load: {source}", load.path);
                    failures.push(SimError::AssetLoadFailure {
                        path: load.path,
                        source,
                    });
                }
                Poll::Pending => self.in_flight.push(load),
            }
        }

        failures
    }

    /// Take every buffered completion.
    pub fn drain_ready(&mut self) -> Vec<ReadyEvent<T>> {
        self.ready.drain(..).collect()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn ready_len(&self) -> usize {
        self.ready.len()
    }

    /// Nothing in flight and nothing waiting to be drained.
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty() && self.ready.is_empty()
    }
}

/// Loader that resolves immediately from registered templates.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLoader {
    templates: HashMap<String, ModelHandle>,
    requested: Vec<String>,
}

impl ScriptedLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template under its path.
    pub fn register(&mut self, model: ModelHandle) {
        self.templates.insert(model.path.clone(), model);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_model(mut self, model: ModelHandle) -> Self {
        self.register(model);
        self
    }

    /// Paths requested so far, in order.
    pub fn requested(&self) -> &[String] {
        &self.requested
    }
}

impl ModelLoader for ScriptedLoader {
    fn load_model(&mut self, path: &str) -> ModelFuture {
        self.requested.push(path.to_string());
        let result = self.templates.get(path).cloned().ok_or(LoadError::NotFound);
        Box::pin(std::future::ready(result))
    }
}

/// Loader whose loads stay pending until resolved by the host.
#[derive(Debug, Default)]
pub struct ManualLoader {
    next_id: u32,
    pending: Vec<(u32, String, ModelResolver)>,
}

impl ManualLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(request id, path)` of every unresolved load.
    pub fn pending(&self) -> Vec<(u32, String)> {
        self.pending
            .iter()
            .map(|(id, path, _)| (*id, path.clone()))
            .collect()
    }

    /// Complete a load. Returns false for an unknown or already resolved id.
    pub fn resolve(&mut self, id: u32, result: LoadResult) -> bool {
        let Some(pos) = self.pending.iter().position(|(pending, _, _)| *pending == id) else {
            return false;
        };
        let (_, _, resolver) = self.pending.remove(pos);
        resolver.resolve(result);
        true
    }

    /// Complete every pending load of `path` with copies of `model`.
    pub fn resolve_path(&mut self, path: &str, model: &ModelHandle) -> usize {
        let (matching, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|(_, pending, _)| pending == path);
        self.pending = rest;
        let count = matching.len();
        for (_, _, resolver) in matching {
            resolver.resolve(Ok(model.clone()));
        }
        count
    }
}

impl ModelLoader for ManualLoader {
    fn load_model(&mut self, path: &str) -> ModelFuture {
        let (resolver, future) = model_slot();
        self.pending.push((self.next_id, path.to_string(), resolver));
        self.next_id += 1;
        Box::pin(future)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(path: &str) -> ModelHandle {
        ModelHandle::new(path, Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0)))
    }

    #[test]
    fn test_world_bounds_follow_transform() {
        let mut model = cube("box.glb");
        model.place(Vec3::new(10.0, 0.0, 0.0), 0.0, Vec3::splat(2.0));
        let bounds = model.world_bounds();
        assert_eq!(bounds.min, Vec3::new(8.0, -2.0, -2.0));
        assert_eq!(bounds.max, Vec3::new(12.0, 2.0, 2.0));
        assert_eq!(model.scaled_size(), Vec3::splat(4.0));
    }

    #[test]
    fn test_ready_after_poll_only() {
        let mut loader = ScriptedLoader::new().with_model(cube("a.glb"));
        let mut queue = AssetQueue::new();
        queue.submit(&mut loader, "a.glb", 7u32);
        assert_eq!(queue.ready_len(), 0);

        let failures = queue.poll();
        assert!(failures.is_empty());
        let ready = queue.drain_ready();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].request, 7);
        assert!(queue.is_idle());
    }

    #[test]
    fn test_failed_load_is_dropped() {
        let mut loader = ScriptedLoader::new();
        let mut queue = AssetQueue::new();
        queue.submit(&mut loader, "missing.glb", ());

        let failures = queue.poll();
        assert_eq!(failures.len(), 1);
        assert!(matches!(
            &failures[0],
            SimError::AssetLoadFailure { path, source: LoadError::NotFound } if path == "missing.glb"
        ));
        assert!(queue.is_idle());
    }

    #[test]
    fn test_manual_loader_stays_pending() {
        let mut loader = ManualLoader::new();
        let mut queue = AssetQueue::new();
        queue.submit(&mut loader, "a.glb", "first");
        queue.submit(&mut loader, "b.glb", "second");

        queue.poll();
        assert_eq!(queue.in_flight(), 2);

        let pending = loader.pending();
        assert!(loader.resolve(pending[1].0, Ok(cube("b.glb"))));
        queue.poll();
        let ready = queue.drain_ready();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].request, "second");
        assert_eq!(queue.in_flight(), 1);
    }

    #[test]
    fn test_dropped_resolver_cancels() {
        let (resolver, future) = model_slot();
        drop(resolver);
        let mut future = Box::pin(future);
        let mut cx = Context::from_waker(Waker::noop());
        assert_eq!(future.as_mut().poll(&mut cx), Poll::Ready(Err(LoadError::Cancelled)));
    }

    #[test]
    fn test_resolve_path_completes_all_copies() {
        let mut loader = ManualLoader::new();
        let mut queue = AssetQueue::new();
        for i in 0..3 {
            queue.submit(&mut loader, "rail.glb", i);
        }
        assert_eq!(loader.resolve_path("rail.glb", &cube("rail.glb")), 3);
        queue.poll();
        let order: Vec<_> = queue.drain_ready().into_iter().map(|e| e.request).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }
}
