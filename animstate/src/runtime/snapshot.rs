use super::backend::PlayableBackend;
use super::controller::{AnimationController, StateNodeKind};
use super::interpolate::{interpolate_time, interpolate_weight, presentation_alpha};
use crate::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FadeSnapshot {
    pub weight: f32,
    pub fading_speed: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateSnapshot {
    pub fade: FadeSnapshot,
    /// Selected clip of a multi-clip state, 0 otherwise.
    pub selected: u16,
    /// Normalized clip times: one for a clip state, one per clip for a multi-clip state,
    /// none for a mixer.
    pub times: Vec<f32>,
}

/// Simulation state of a controller at one tick, as replicated or saved for rollback.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControllerSnapshot {
    pub ticks: u64,
    pub time: f32,
    pub layers: Vec<FadeSnapshot>,
    pub states: Vec<StateSnapshot>,
}

impl AnimationController {
    pub fn capture_snapshot(&self) -> ControllerSnapshot {
        let layers = self
            .layers()
            .iter()
            .map(|layer| FadeSnapshot {
                weight: layer.fade.weight,
                fading_speed: layer.fade.fading_speed,
            })
            .collect();

        let states = self
            .states()
            .iter()
            .map(|state| {
                let (selected, times) = match &state.kind {
                    StateNodeKind::Clip(clip) => (0, vec![clip.time]),
                    StateNodeKind::MultiClip(multi) => (
                        // clip counts are capped at u16::MAX by validation
                        u16::try_from(multi.selected()).unwrap_or(u16::MAX),
                        multi.clips().iter().map(|c| c.time).collect(),
                    ),
                    StateNodeKind::Mixer(_) => (0, Vec::new()),
                };
                StateSnapshot {
                    fade: FadeSnapshot {
                        weight: state.fade.weight,
                        fading_speed: state.fade.fading_speed,
                    },
                    selected,
                    times,
                }
            })
            .collect();

        ControllerSnapshot {
            ticks: self.ticks(),
            time: self.time(),
            layers,
            states,
        }
    }

    /// Overwrites the simulation state, e.g. before resimulating after a rollback.
    ///
    /// Interpolation history is reset so the next render pass starts from the restored values.
    pub fn restore_snapshot(&mut self, snapshot: &ControllerSnapshot) -> Result<(), Error> {
        self.check_shape(snapshot)?;
        check_values(snapshot)?;

        for (layer, saved) in self.layers_mut().iter_mut().zip(&snapshot.layers) {
            layer.fade.weight = saved.weight.clamp(0.0, 1.0);
            layer.fade.fading_speed = saved.fading_speed;
            layer.fade.reset_interpolation();
        }

        for (state, saved) in self.states_mut().iter_mut().zip(&snapshot.states) {
            state.fade.weight = saved.fade.weight.clamp(0.0, 1.0);
            state.fade.fading_speed = saved.fade.fading_speed;
            state.fade.reset_interpolation();
            match &mut state.kind {
                StateNodeKind::Clip(clip) => clip.set_time(saved.times[0]),
                StateNodeKind::MultiClip(multi) => multi.restore(saved.selected, &saved.times),
                StateNodeKind::Mixer(_) => {}
            }
        }

        self.restore_clock(snapshot.ticks, snapshot.time);
        log::trace!("restored snapshot of tick {}", snapshot.ticks);
        Ok(())
    }

    /// Writes presentation values between two received snapshots without touching the
    /// simulation state.
    pub fn interpolate_snapshots(
        &mut self,
        from: &ControllerSnapshot,
        to: &ControllerSnapshot,
        alpha: f32,
        backend: &mut dyn PlayableBackend,
    ) -> Result<(), Error> {
        self.check_shape(from)?;
        self.check_shape(to)?;
        check_values(from)?;
        check_values(to)?;
        let alpha = presentation_alpha(alpha);

        for (layer, (a, b)) in self
            .layers_mut()
            .iter_mut()
            .zip(from.layers.iter().zip(&to.layers))
        {
            layer.fade.interpolated_weight = interpolate_weight(a.weight, b.weight, alpha);
        }

        for (state, (a, b)) in self
            .states_mut()
            .iter_mut()
            .zip(from.states.iter().zip(&to.states))
        {
            state.fade.interpolated_weight =
                interpolate_weight(a.fade.weight, b.fade.weight, alpha);
            let clips = match &mut state.kind {
                StateNodeKind::Clip(clip) => std::slice::from_mut(clip),
                StateNodeKind::MultiClip(multi) => multi.clips_mut(),
                StateNodeKind::Mixer(_) => continue,
            };
            for (clip, (&ta, &tb)) in clips.iter_mut().zip(a.times.iter().zip(&b.times)) {
                clip.interpolated_time = if clip.is_looping() {
                    interpolate_time(ta, tb, 1.0, alpha)
                } else {
                    ta + (tb - ta) * alpha
                };
            }
        }

        self.write_presentation(backend);
        Ok(())
    }

    fn check_shape(&self, snapshot: &ControllerSnapshot) -> Result<(), Error> {
        if snapshot.layers.len() != self.layers().len() {
            return Err(Error::SnapshotMismatch {
                expected: format!("{} layers", self.layers().len()),
                actual: format!("{} layers", snapshot.layers.len()),
            });
        }
        if snapshot.states.len() != self.states().len() {
            return Err(Error::SnapshotMismatch {
                expected: format!("{} states", self.states().len()),
                actual: format!("{} states", snapshot.states.len()),
            });
        }
        for (state, saved) in self.states().iter().zip(&snapshot.states) {
            let expected = match state.kind() {
                StateNodeKind::Clip(_) => 1,
                StateNodeKind::MultiClip(multi) => multi.clips().len(),
                StateNodeKind::Mixer(_) => 0,
            };
            if saved.times.len() != expected {
                return Err(Error::SnapshotMismatch {
                    expected: format!("{expected} clip times for state '{}'", state.name()),
                    actual: format!("{}", saved.times.len()),
                });
            }
        }
        Ok(())
    }
}

fn check_values(snapshot: &ControllerSnapshot) -> Result<(), Error> {
    let mut fades = snapshot
        .layers
        .iter()
        .chain(snapshot.states.iter().map(|s| &s.fade));
    let finite = snapshot.time.is_finite()
        && fades.all(|f| f.weight.is_finite() && f.fading_speed.is_finite())
        && snapshot
            .states
            .iter()
            .flat_map(|s| &s.times)
            .all(|t| t.is_finite());
    if !finite {
        return Err(Error::InvalidValue {
            message: format!("snapshot of tick {} holds non-finite values", snapshot.ticks),
        });
    }
    Ok(())
}
