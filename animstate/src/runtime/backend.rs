//! Boundary to the native playback graph that evaluates clips.
//!
//! The controller only creates, connects, writes to and releases playables. Evaluating them
//! is the backend's job.

use crate::ClipData;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayableHandle(pub u32);

pub trait PlayableBackend {
    fn create_clip(&mut self, clip: &ClipData) -> PlayableHandle;

    fn create_mixer(&mut self, input_count: usize) -> PlayableHandle;

    /// Plugs `child` into input `port` of `parent`.
    fn connect(&mut self, parent: PlayableHandle, port: usize, child: PlayableHandle);

    fn set_input_weight(&mut self, mixer: PlayableHandle, port: usize, weight: f32);

    /// Sets clip playback position in seconds.
    fn set_time(&mut self, clip: PlayableHandle, seconds: f32);

    fn is_valid(&self, handle: PlayableHandle) -> bool;

    fn destroy(&mut self, handle: PlayableHandle);
}

#[derive(Clone, Debug, PartialEq)]
pub enum HeadlessPlayable {
    Clip {
        name: String,
        time: f32,
    },
    Mixer {
        inputs: Vec<Option<PlayableHandle>>,
        weights: Vec<f32>,
    },
}

/// In-memory backend that only records what was written.
///
/// Useful for simulation without a renderer and for inspecting the values a controller
/// pushes downstream.
#[derive(Clone, Debug, Default)]
pub struct HeadlessBackend {
    playables: Vec<Option<HeadlessPlayable>>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: PlayableHandle) -> Option<&HeadlessPlayable> {
        self.playables.get(handle.0 as usize)?.as_ref()
    }

    /// Number of playables that have not been destroyed.
    pub fn live_count(&self) -> usize {
        self.playables.iter().filter(|p| p.is_some()).count()
    }

    pub fn clip_time(&self, handle: PlayableHandle) -> Option<f32> {
        match self.get(handle)? {
            HeadlessPlayable::Clip { time, .. } => Some(*time),
            HeadlessPlayable::Mixer { .. } => None,
        }
    }

    pub fn input_weight(&self, mixer: PlayableHandle, port: usize) -> Option<f32> {
        match self.get(mixer)? {
            HeadlessPlayable::Mixer { weights, .. } => weights.get(port).copied(),
            HeadlessPlayable::Clip { .. } => None,
        }
    }

    fn push(&mut self, playable: HeadlessPlayable) -> PlayableHandle {
        let handle = PlayableHandle(self.playables.len() as u32);
        self.playables.push(Some(playable));
        handle
    }

    fn get_mut(&mut self, handle: PlayableHandle) -> Option<&mut HeadlessPlayable> {
        self.playables.get_mut(handle.0 as usize)?.as_mut()
    }
}

impl PlayableBackend for HeadlessBackend {
    fn create_clip(&mut self, clip: &ClipData) -> PlayableHandle {
        self.push(HeadlessPlayable::Clip {
            name: clip.name.clone(),
            time: 0.0,
        })
    }

    fn create_mixer(&mut self, input_count: usize) -> PlayableHandle {
        self.push(HeadlessPlayable::Mixer {
            inputs: vec![None; input_count],
            weights: vec![0.0; input_count],
        })
    }

    fn connect(&mut self, parent: PlayableHandle, port: usize, child: PlayableHandle) {
        if let Some(HeadlessPlayable::Mixer { inputs, .. }) = self.get_mut(parent) {
            if let Some(slot) = inputs.get_mut(port) {
                *slot = Some(child);
            }
        }
    }

    fn set_input_weight(&mut self, mixer: PlayableHandle, port: usize, weight: f32) {
        if let Some(HeadlessPlayable::Mixer { weights, .. }) = self.get_mut(mixer) {
            if let Some(slot) = weights.get_mut(port) {
                *slot = weight;
            }
        }
    }

    fn set_time(&mut self, clip: PlayableHandle, seconds: f32) {
        if let Some(HeadlessPlayable::Clip { time, .. }) = self.get_mut(clip) {
            *time = seconds;
        }
    }

    fn is_valid(&self, handle: PlayableHandle) -> bool {
        self.get(handle).is_some()
    }

    fn destroy(&mut self, handle: PlayableHandle) {
        if let Some(slot) = self.playables.get_mut(handle.0 as usize) {
            *slot = None;
        }
    }
}
