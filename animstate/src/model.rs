use crate::Error;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub struct ClipData {
    pub name: String,
    /// Clip length in seconds. Must be finite and greater than zero.
    pub length: f32,
    pub speed: f32,
    pub looping: bool,
}

impl ClipData {
    pub fn new(name: impl Into<String>, length: f32) -> Self {
        Self {
            name: name.into(),
            length,
            speed: 1.0,
            looping: false,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Seconds of simulation needed to play the clip once.
    pub fn duration(&self) -> f32 {
        self.length / self.speed.abs()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StateKind {
    Clip { clip: usize },
    MultiClip { clips: Vec<usize> },
    Mixer { states: Vec<StateData> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct StateData {
    pub name: String,
    pub kind: StateKind,
}

impl StateData {
    /// Number of states in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        match &self.kind {
            StateKind::Mixer { states } => 1 + states.iter().map(Self::subtree_len).sum::<usize>(),
            _ => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayerData {
    pub name: String,
    /// Weight the layer starts with when the controller is created.
    pub weight: f32,
    pub states: Vec<StateData>,
}

/// Validated controller description. Only [`ControllerBuilder::build`] (and the JSON loader
/// on top of it) produces non-empty data.
#[derive(Clone, Debug, Default)]
pub struct ControllerData {
    pub(crate) clips: Vec<ClipData>,
    pub(crate) layers: Vec<LayerData>,
    clip_index: HashMap<String, usize>,
}

impl ControllerData {
    pub fn builder() -> ControllerBuilder {
        ControllerBuilder::default()
    }

    pub fn clips(&self) -> &[ClipData] {
        &self.clips
    }

    pub fn layers(&self) -> &[LayerData] {
        &self.layers
    }

    pub fn clip(&self, name: &str) -> Option<(usize, &ClipData)> {
        let index = *self.clip_index.get(name)?;
        self.clips.get(index).map(|c| (index, c))
    }

    /// Total number of states across all layers.
    pub fn state_count(&self) -> usize {
        self.layers
            .iter()
            .flat_map(|l| l.states.iter())
            .map(StateData::subtree_len)
            .sum()
    }

    pub fn validate(&self) -> Result<(), Error> {
        for clip in &self.clips {
            if !clip.length.is_finite() || clip.length <= 0.0 {
                return Err(Error::InvalidValue {
                    message: format!(
                        "clip '{}' length must be finite and > 0, got {}",
                        clip.name, clip.length
                    ),
                });
            }
            if !clip.speed.is_finite() {
                return Err(Error::InvalidValue {
                    message: format!("clip '{}' speed must be finite", clip.name),
                });
            }
        }

        let mut names = HashSet::new();
        for layer in &self.layers {
            if !(0.0..=1.0).contains(&layer.weight) {
                return Err(Error::InvalidValue {
                    message: format!(
                        "layer '{}' weight must be within [0, 1], got {}",
                        layer.name, layer.weight
                    ),
                });
            }
            for state in &layer.states {
                self.validate_state(state, &mut names)?;
            }
        }
        Ok(())
    }

    fn validate_state<'a>(
        &self,
        state: &'a StateData,
        names: &mut HashSet<&'a str>,
    ) -> Result<(), Error> {
        if !names.insert(state.name.as_str()) {
            return Err(Error::DuplicateState {
                name: state.name.clone(),
            });
        }
        match &state.kind {
            StateKind::Clip { clip } => self.check_clip_index(&state.name, *clip),
            StateKind::MultiClip { clips } => {
                if clips.is_empty() {
                    return Err(Error::EmptyMultiClip {
                        state: state.name.clone(),
                    });
                }
                if clips.len() > usize::from(u16::MAX) {
                    return Err(Error::InvalidValue {
                        message: format!(
                            "multi-clip state '{}' has {} clips, at most {} are supported",
                            state.name,
                            clips.len(),
                            u16::MAX
                        ),
                    });
                }
                clips
                    .iter()
                    .try_for_each(|clip| self.check_clip_index(&state.name, *clip))
            }
            StateKind::Mixer { states } => states
                .iter()
                .try_for_each(|child| self.validate_state(child, names)),
        }
    }

    fn check_clip_index(&self, state: &str, index: usize) -> Result<(), Error> {
        if index >= self.clips.len() {
            return Err(Error::InvalidClipIndex {
                state: state.to_string(),
                index,
            });
        }
        Ok(())
    }
}

/// Name-based description of a state, resolved against the clip table by
/// [`ControllerBuilder::build`].
#[derive(Clone, Debug)]
pub enum StateBlueprint {
    Clip {
        name: String,
        clip: String,
    },
    MultiClip {
        name: String,
        clips: Vec<String>,
    },
    Mixer {
        name: String,
        states: Vec<StateBlueprint>,
    },
}

impl StateBlueprint {
    pub fn clip(name: impl Into<String>, clip: impl Into<String>) -> Self {
        Self::Clip {
            name: name.into(),
            clip: clip.into(),
        }
    }

    pub fn multi_clip<I, S>(name: impl Into<String>, clips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MultiClip {
            name: name.into(),
            clips: clips.into_iter().map(Into::into).collect(),
        }
    }

    pub fn mixer(name: impl Into<String>, states: Vec<StateBlueprint>) -> Self {
        Self::Mixer {
            name: name.into(),
            states,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LayerBlueprint {
    pub name: String,
    pub weight: f32,
    pub states: Vec<StateBlueprint>,
}

impl LayerBlueprint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight: 1.0,
            states: Vec::new(),
        }
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_state(mut self, state: StateBlueprint) -> Self {
        self.states.push(state);
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct ControllerBuilder {
    clips: Vec<ClipData>,
    layers: Vec<LayerBlueprint>,
}

impl ControllerBuilder {
    pub fn clip(mut self, clip: ClipData) -> Self {
        self.clips.push(clip);
        self
    }

    pub fn layer(mut self, layer: LayerBlueprint) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn build(self) -> Result<Arc<ControllerData>, Error> {
        let mut clip_index = HashMap::with_capacity(self.clips.len());
        for (i, clip) in self.clips.iter().enumerate() {
            if clip_index.insert(clip.name.clone(), i).is_some() {
                return Err(Error::InvalidValue {
                    message: format!("duplicate clip name '{}'", clip.name),
                });
            }
        }

        let resolve = |name: &str| {
            clip_index
                .get(name)
                .copied()
                .ok_or_else(|| Error::UnknownClip {
                    name: name.to_string(),
                })
        };

        let mut layers = Vec::with_capacity(self.layers.len());
        for layer in self.layers {
            let states = layer
                .states
                .iter()
                .map(|s| resolve_state(s, &resolve))
                .collect::<Result<Vec<_>, _>>()?;
            layers.push(LayerData {
                name: layer.name,
                weight: layer.weight,
                states,
            });
        }

        let data = ControllerData {
            clips: self.clips,
            layers,
            clip_index,
        };
        data.validate()?;
        Ok(Arc::new(data))
    }
}

fn resolve_state(
    blueprint: &StateBlueprint,
    resolve: &impl Fn(&str) -> Result<usize, Error>,
) -> Result<StateData, Error> {
    Ok(match blueprint {
        StateBlueprint::Clip { name, clip } => StateData {
            name: name.clone(),
            kind: StateKind::Clip {
                clip: resolve(clip)?,
            },
        },
        StateBlueprint::MultiClip { name, clips } => StateData {
            name: name.clone(),
            kind: StateKind::MultiClip {
                clips: clips
                    .iter()
                    .map(|c| resolve(c))
                    .collect::<Result<Vec<_>, _>>()?,
            },
        },
        StateBlueprint::Mixer { name, states } => StateData {
            name: name.clone(),
            kind: StateKind::Mixer {
                states: states
                    .iter()
                    .map(|s| resolve_state(s, resolve))
                    .collect::<Result<Vec<_>, _>>()?,
            },
        },
    })
}
