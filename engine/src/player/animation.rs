//! Player Animation State
//!
//! Four-state animation machine for the first-person arms model with linear
//! crossfades between clips.
//!
//! # States
//!
//! - Idle: `axe_IDLE`
//! - Walk: `axe_WALK`
//! - Run: `axe_RUN`
//! - Hit: `axe_ATK1+ATK2(hit)`
//!
//! # Crossfade
//!
//! On a transition the outgoing clip fades from its current weight to 0 while
//! the incoming clip is rewound and fades from 0 to 1, both over
//! [`FADE_DURATION`]. The current state switches immediately.
//!
//! # Usage
//!
//! ```rust,ignore
//! use riverside_engine::player::{AnimationMixer, AnimationState};
//!
//! let mut mixer = AnimationMixer::new();
//! mixer.transition(AnimationState::Walk);
//!
//! // Each frame:
//! mixer.update(delta_time);
//! let walk_weight = mixer.weight(AnimationState::Walk);
//! ```

use serde::{Deserialize, Serialize};

/// Crossfade duration in seconds
pub const FADE_DURATION: f32 = 0.2;

/// Animation states of the player model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnimationState {
    #[default]
    Idle,
    Walk,
    Run,
    Hit,
}

impl AnimationState {
    pub const ALL: [AnimationState; 4] = [
        AnimationState::Idle,
        AnimationState::Walk,
        AnimationState::Run,
        AnimationState::Hit,
    ];

    /// Clip name inside the player model.
    pub fn clip_name(&self) -> &'static str {
        match self {
            AnimationState::Idle => "axe_IDLE",
            AnimationState::Walk => "axe_WALK",
            AnimationState::Run => "axe_RUN",
            AnimationState::Hit => "axe_ATK1+ATK2(hit)",
        }
    }

    /// Look up a state by its clip name.
    pub fn from_clip_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.clip_name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// A weight interpolation in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Fade {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

impl Fade {
    fn weight(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * t
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Playback of one clip.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClipPlayback {
    /// Playback time in seconds
    pub time: f32,
    weight: f32,
    fade: Option<Fade>,
}

impl ClipPlayback {
    /// Effective blend weight in [0, 1].
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Whether the clip contributes to the pose.
    pub fn is_active(&self) -> bool {
        self.weight > 0.0 || self.fade.is_some_and(|fade| fade.to > 0.0)
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    fn reset(&mut self) {
        self.time = 0.0;
        self.weight = 0.0;
        self.fade = None;
    }

    fn fade_to(&mut self, target: f32, duration: f32) {
        self.fade = Some(Fade {
            from: self.weight,
            to: target,
            elapsed: 0.0,
            duration,
        });
        if duration <= 0.0 {
            self.weight = target;
            self.fade = None;
        }
    }

    fn advance(&mut self, dt: f32) {
        if self.is_active() {
            self.time += dt;
        }
        if let Some(fade) = self.fade.as_mut() {
            fade.elapsed += dt;
            self.weight = fade.weight();
            if fade.is_done() {
                self.fade = None;
            }
        }
    }
}

/// Crossfading animation mixer for [`AnimationState`] clips.
#[derive(Debug, Clone)]
pub struct AnimationMixer {
    current: AnimationState,
    clips: [ClipPlayback; 4],
    fade_duration: f32,
}

impl Default for AnimationMixer {
    fn default() -> Self {
        Self::with_fade_duration(FADE_DURATION)
    }
}

impl AnimationMixer {
    /// Create a mixer playing Idle at full weight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mixer with a custom crossfade duration.
    pub fn with_fade_duration(fade_duration: f32) -> Self {
        let mut clips = [ClipPlayback::default(); 4];
        clips[AnimationState::Idle.index()].weight = 1.0;
        Self {
            current: AnimationState::Idle,
            clips,
            fade_duration: fade_duration.max(0.0),
        }
    }

    /// State whose clip is fading in or fully playing.
    pub fn current(&self) -> AnimationState {
        self.current
    }

    pub fn fade_duration(&self) -> f32 {
        self.fade_duration
    }

    /// Switch to `next`. Returns `false` when already in that state.
    pub fn transition(&mut self, next: AnimationState) -> bool {
        if next == self.current {
            return false;
        }

        let duration = self.fade_duration;
        self.clips[self.current.index()].fade_to(0.0, duration);
        let incoming = &mut self.clips[next.index()];
        incoming.reset();
        incoming.fade_to(1.0, duration);

        log::trace!("animation {:?} -> {:?}", self.current, next);
        self.current = next;
        true
    }

    /// Advance playback time and fades.
    pub fn update(&mut self, dt: f32) {
        for clip in &mut self.clips {
            clip.advance(dt);
        }
    }

    /// Blend weight of a state's clip.
    pub fn weight(&self, state: AnimationState) -> f32 {
        self.clips[state.index()].weight()
    }

    /// Playback state of a state's clip.
    pub fn clip(&self, state: AnimationState) -> &ClipPlayback {
        &self.clips[state.index()]
    }

    /// True while any crossfade is still running.
    pub fn is_crossfading(&self) -> bool {
        self.clips.iter().any(ClipPlayback::is_fading)
    }
}
