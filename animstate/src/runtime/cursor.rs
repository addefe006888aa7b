use super::backend::PlayableHandle;
use super::interpolate::interpolate_time;
use crate::ClipData;

/// Edge reported by a single cursor advance. Restart and finish are mutually exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorEdge {
    None,
    /// A looping clip wrapped past its end.
    Restarted,
    /// A non-looping clip reached its end on this advance.
    Finished,
}

/// Playback of one clip: speed/loop settings plus the normalized cursor.
#[derive(Clone, Debug)]
pub struct ClipNode {
    clip_index: usize,
    length: f32,
    speed: f32,
    looping: bool,

    pub(crate) time: f32,
    pub(crate) previous_time: f32,
    pub(crate) interpolated_time: f32,
    pub(crate) weight: f32,
    pub(crate) playable: Option<PlayableHandle>,
}

impl ClipNode {
    pub fn new(clip_index: usize, clip: &ClipData) -> Self {
        Self {
            clip_index,
            length: clip.length,
            speed: clip.speed,
            looping: clip.looping,
            time: 0.0,
            previous_time: 0.0,
            interpolated_time: 0.0,
            weight: 0.0,
            playable: None,
        }
    }

    pub fn clip_index(&self) -> usize {
        self.clip_index
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Normalized playback position in `[0, 1]`.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn interpolated_time(&self) -> f32 {
        self.interpolated_time
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn playable(&self) -> Option<PlayableHandle> {
        self.playable
    }

    pub fn time_seconds(&self) -> f32 {
        self.time * self.length
    }

    /// Converts a time in seconds to normalized form. Negative values count back from the end.
    pub fn normalize(&self, seconds: f32) -> f32 {
        let seconds = if seconds < 0.0 {
            seconds + self.length
        } else {
            seconds
        };
        seconds / self.length
    }

    pub fn set_time(&mut self, normalized: f32) {
        self.time = normalized.clamp(0.0, 1.0);
        self.previous_time = self.time;
        self.interpolated_time = self.time;
    }

    pub fn advance(&mut self, delta: f32) -> CursorEdge {
        let old = self.time;
        let new = old + delta * self.speed / self.length;

        if new >= 1.0 {
            if self.looping {
                self.time = new % 1.0;
                return CursorEdge::Restarted;
            }
            self.time = 1.0;
            return if old < 1.0 {
                CursorEdge::Finished
            } else {
                CursorEdge::None
            };
        }

        self.time = if new >= 0.0 {
            new
        } else if self.looping {
            new.rem_euclid(1.0)
        } else {
            0.0
        };
        CursorEdge::None
    }

    pub(crate) fn store_previous(&mut self) {
        self.previous_time = self.time;
    }

    pub(crate) fn interpolate(&mut self, alpha: f32) -> f32 {
        self.interpolated_time = if self.looping {
            interpolate_time(self.previous_time, self.time, 1.0, alpha)
        } else {
            self.previous_time + (self.time - self.previous_time) * alpha
        };
        self.interpolated_time
    }
}
