use super::interpolate::interpolate_weight;

/// Activation phase derived from a [`Fade`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadePhase {
    Inactive,
    FadingIn,
    Active,
    FadingOut,
}

/// Blend weight with a signed fading speed (weight per second).
///
/// `weight` only lands exactly on 0 or 1 while `fading_speed == 0`; while fading it moves
/// monotonically towards the target bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade {
    pub(crate) weight: f32,
    pub(crate) fading_speed: f32,
    pub(crate) previous_weight: f32,
    pub(crate) interpolated_weight: f32,
}

impl Default for Fade {
    fn default() -> Self {
        Self::with_weight(0.0)
    }
}

impl Fade {
    pub fn with_weight(weight: f32) -> Self {
        let weight = weight.clamp(0.0, 1.0);
        Self {
            weight,
            fading_speed: 0.0,
            previous_weight: weight,
            interpolated_weight: weight,
        }
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn fading_speed(&self) -> f32 {
        self.fading_speed
    }

    pub fn interpolated_weight(&self) -> f32 {
        self.interpolated_weight
    }

    pub fn phase(&self) -> FadePhase {
        if self.fading_speed > 0.0 {
            FadePhase::FadingIn
        } else if self.fading_speed < 0.0 {
            FadePhase::FadingOut
        } else if self.weight > 0.0 {
            // A partial weight without a fade only comes from restored snapshots.
            FadePhase::Active
        } else {
            FadePhase::Inactive
        }
    }

    /// Active or fading in: the state is the target of an activation.
    pub fn is_active(&self) -> bool {
        matches!(self.phase(), FadePhase::Active | FadePhase::FadingIn)
    }

    pub fn is_fully_active(&self) -> bool {
        self.fading_speed == 0.0 && self.weight >= 1.0
    }

    pub fn is_fading_in(&self) -> bool {
        self.fading_speed > 0.0
    }

    pub fn is_fading_out(&self) -> bool {
        self.fading_speed < 0.0
    }

    /// Whether the state contributes to the output this tick.
    pub fn is_contributing(&self) -> bool {
        self.weight > 0.0 || self.fading_speed > 0.0
    }

    /// Starts fading towards weight 1. Returns `false` when already active or fading in.
    ///
    /// A duration that is not a positive finite number snaps the weight.
    pub(crate) fn fade_in(&mut self, duration: f32) -> bool {
        if self.is_fully_active() || self.is_fading_in() {
            return false;
        }
        if is_fade_duration(duration) {
            self.fading_speed = 1.0 / duration;
        } else {
            self.weight = 1.0;
            self.fading_speed = 0.0;
        }
        true
    }

    /// Starts fading towards weight 0. Returns `false` when already inactive or fading out.
    pub(crate) fn fade_out(&mut self, duration: f32) -> bool {
        if matches!(self.phase(), FadePhase::Inactive | FadePhase::FadingOut) {
            return false;
        }
        if is_fade_duration(duration) {
            self.fading_speed = 1.0 / -duration;
        } else {
            self.weight = 0.0;
            self.fading_speed = 0.0;
        }
        true
    }

    pub(crate) fn integrate(&mut self, delta: f32) {
        if self.fading_speed == 0.0 {
            return;
        }
        self.weight += self.fading_speed * delta;
        if self.weight >= 1.0 {
            self.weight = 1.0;
            self.fading_speed = 0.0;
        } else if self.weight <= 0.0 {
            self.weight = 0.0;
            self.fading_speed = 0.0;
        }
    }

    pub(crate) fn store_previous(&mut self) {
        self.previous_weight = self.weight;
    }

    pub(crate) fn interpolate(&mut self, alpha: f32) -> f32 {
        self.interpolated_weight = interpolate_weight(self.previous_weight, self.weight, alpha);
        self.interpolated_weight
    }

    pub(crate) fn reset_interpolation(&mut self) {
        self.previous_weight = self.weight;
        self.interpolated_weight = self.weight;
    }
}

fn is_fade_duration(duration: f32) -> bool {
    duration.is_finite() && duration > 0.0
}
