use super::backend::{PlayableBackend, PlayableHandle};
use super::cursor::{ClipNode, CursorEdge};
use super::fade::{Fade, FadePhase};
use super::interpolate::presentation_alpha;
use crate::{ControllerData, Error, StateData, StateKind};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Index of a state inside its controller. States are stored in pre-order, so an owner
/// always has a lower id than the states it owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Where activation and deactivation requests of a state are forwarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
    Layer(usize),
    Mixer(StateId),
}

/// Picks the clip a multi-clip state plays on the current tick.
pub trait ClipSelector {
    fn clip_id(&mut self) -> usize;
}

impl<F: FnMut() -> usize> ClipSelector for F {
    fn clip_id(&mut self) -> usize {
        self()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StateEvent {
    Activated { fade: f32 },
    Deactivated { fade: f32 },
    Restarted,
    Finished,
}

#[derive(Clone, Debug)]
pub struct StateInfo {
    pub id: StateId,
    pub name: String,
    pub layer: usize,
    pub weight: f32,
    /// Normalized time of the playing clip, 0 for mixers.
    pub time: f32,
}

pub trait AnimationListener {
    fn on_event(
        &mut self,
        controller: &mut AnimationController,
        state: &StateInfo,
        event: &StateEvent,
    );
}

pub struct MultiClipNode {
    clips: Vec<ClipNode>,
    selected: usize,
    selector: Option<Box<dyn ClipSelector>>,
}

impl MultiClipNode {
    pub fn clips(&self) -> &[ClipNode] {
        &self.clips
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_clip(&self) -> &ClipNode {
        &self.clips[self.selected]
    }

    pub(crate) fn clips_mut(&mut self) -> &mut [ClipNode] {
        &mut self.clips
    }

    pub(crate) fn restore(&mut self, selected: u16, times: &[f32]) {
        self.selected = usize::from(selected).min(self.clips.len() - 1);
        for (i, (clip, &time)) in self.clips.iter_mut().zip(times).enumerate() {
            clip.set_time(time);
            clip.weight = if i == self.selected { 1.0 } else { 0.0 };
        }
    }

    fn select(&mut self, state: &str) {
        let requested = self.selector.as_mut().map_or(0, |s| s.clip_id());
        let last = self.clips.len() - 1;
        if requested > last {
            log::warn!(
                "multi-clip state '{state}' selected clip {requested}, only {} available",
                self.clips.len()
            );
        }
        self.selected = requested.min(last);
        for (i, clip) in self.clips.iter_mut().enumerate() {
            clip.weight = if i == self.selected { 1.0 } else { 0.0 };
        }
    }
}

pub enum StateNodeKind {
    Clip(ClipNode),
    MultiClip(MultiClipNode),
    Mixer(Vec<StateId>),
}

pub struct AnimationState {
    name: String,
    layer: usize,
    owner: Owner,
    port: usize,
    pub(crate) fade: Fade,
    pub(crate) kind: StateNodeKind,
    playable: Option<PlayableHandle>,
    listener: Option<Box<dyn AnimationListener>>,
}

impl std::fmt::Debug for AnimationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.kind {
            StateNodeKind::Clip(_) => "clip",
            StateNodeKind::MultiClip(_) => "multi_clip",
            StateNodeKind::Mixer(_) => "mixer",
        };
        f.debug_struct("AnimationState")
            .field("name", &self.name)
            .field("kind", &kind)
            .field("layer", &self.layer)
            .field("owner", &self.owner)
            .field("port", &self.port)
            .field("fade", &self.fade)
            .field("time", &self.time())
            .finish()
    }
}

impl AnimationState {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    /// Position among the owner's states.
    pub fn port(&self) -> usize {
        self.port
    }

    pub fn kind(&self) -> &StateNodeKind {
        &self.kind
    }

    pub fn fade(&self) -> &Fade {
        &self.fade
    }

    pub fn weight(&self) -> f32 {
        self.fade.weight()
    }

    pub fn fading_speed(&self) -> f32 {
        self.fade.fading_speed()
    }

    pub fn phase(&self) -> FadePhase {
        self.fade.phase()
    }

    pub fn is_active(&self) -> bool {
        self.fade.is_active()
    }

    /// The clip currently driven by this state, if it is a leaf.
    pub fn clip(&self) -> Option<&ClipNode> {
        match &self.kind {
            StateNodeKind::Clip(clip) => Some(clip),
            StateNodeKind::MultiClip(multi) => Some(multi.selected_clip()),
            StateNodeKind::Mixer(_) => None,
        }
    }

    pub fn children(&self) -> &[StateId] {
        match &self.kind {
            StateNodeKind::Mixer(children) => children,
            _ => &[],
        }
    }

    pub fn time(&self) -> f32 {
        self.clip().map_or(0.0, ClipNode::time)
    }

    /// Playable this state feeds into its owner's mixer.
    pub fn playable(&self) -> Option<PlayableHandle> {
        self.output_playable()
    }

    /// Whether a non-looping clip has played up to `time`.
    ///
    /// `time` is normalized when `normalized` is set, otherwise seconds, where negative
    /// values count back from the end of the clip.
    pub fn is_finished(&self, time: f32, normalized: bool) -> bool {
        let Some(clip) = self.clip() else {
            return false;
        };
        let target = if normalized {
            time
        } else {
            clip.normalize(time)
        };
        clip.time() >= target && !clip.is_looping() && self.is_active()
    }

    fn output_playable(&self) -> Option<PlayableHandle> {
        match &self.kind {
            StateNodeKind::Clip(clip) => clip.playable,
            _ => self.playable,
        }
    }

    fn restart(&mut self) {
        match &mut self.kind {
            StateNodeKind::Clip(clip) => clip.set_time(0.0),
            StateNodeKind::MultiClip(multi) => {
                for clip in &mut multi.clips {
                    clip.set_time(0.0);
                }
            }
            StateNodeKind::Mixer(_) => {}
        }
    }
}

#[derive(Debug)]
pub struct LayerState {
    name: String,
    pub(crate) fade: Fade,
    states: Vec<StateId>,
    playable: Option<PlayableHandle>,
}

impl LayerState {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fade(&self) -> &Fade {
        &self.fade
    }

    pub fn weight(&self) -> f32 {
        self.fade.weight()
    }

    pub fn states(&self) -> &[StateId] {
        &self.states
    }

    pub fn playable(&self) -> Option<PlayableHandle> {
        self.playable
    }
}

#[derive(Clone, Debug)]
struct QueuedEvent {
    state: StateId,
    event: StateEvent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WriteMode {
    Simulation,
    Interpolated,
}

pub struct AnimationController {
    data: Arc<ControllerData>,
    layers: Vec<LayerState>,
    states: Vec<AnimationState>,
    state_index: HashMap<String, StateId>,
    root_playable: Option<PlayableHandle>,
    spawned: bool,
    time: f32,
    ticks: u64,
    event_queue: VecDeque<QueuedEvent>,
    listener: Option<Box<dyn AnimationListener>>,
    draining_events: bool,
}

impl AnimationController {
    pub fn new(data: Arc<ControllerData>) -> Self {
        let mut controller = Self {
            data: data.clone(),
            layers: Vec::with_capacity(data.layers.len()),
            states: Vec::with_capacity(data.state_count()),
            state_index: HashMap::new(),
            root_playable: None,
            spawned: false,
            time: 0.0,
            ticks: 0,
            event_queue: VecDeque::new(),
            listener: None,
            draining_events: false,
        };

        for (layer_index, layer) in data.layers.iter().enumerate() {
            let states = layer
                .states
                .iter()
                .enumerate()
                .map(|(port, state)| {
                    controller.build_state(layer_index, Owner::Layer(layer_index), port, state)
                })
                .collect();
            controller.layers.push(LayerState {
                name: layer.name.clone(),
                fade: Fade::with_weight(layer.weight),
                states,
                playable: None,
            });
        }
        controller
    }

    fn build_state(&mut self, layer: usize, owner: Owner, port: usize, data: &StateData) -> StateId {
        let id = StateId(self.states.len());
        let kind = match &data.kind {
            StateKind::Clip { clip } => {
                StateNodeKind::Clip(ClipNode::new(*clip, &self.data.clips[*clip]))
            }
            StateKind::MultiClip { clips } => StateNodeKind::MultiClip(MultiClipNode {
                clips: clips
                    .iter()
                    .map(|&c| ClipNode::new(c, &self.data.clips[c]))
                    .collect(),
                selected: 0,
                selector: None,
            }),
            StateKind::Mixer { .. } => StateNodeKind::Mixer(Vec::new()),
        };
        self.states.push(AnimationState {
            name: data.name.clone(),
            layer,
            owner,
            port,
            fade: Fade::default(),
            kind,
            playable: None,
            listener: None,
        });
        self.state_index.insert(data.name.clone(), id);

        if let StateKind::Mixer { states } = &data.kind {
            let children = states
                .iter()
                .enumerate()
                .map(|(child_port, child)| {
                    self.build_state(layer, Owner::Mixer(id), child_port, child)
                })
                .collect();
            self.states[id.0].kind = StateNodeKind::Mixer(children);
        }
        id
    }

    pub fn data(&self) -> &Arc<ControllerData> {
        &self.data
    }

    pub fn set_listener<L: AnimationListener + 'static>(&mut self, listener: L) {
        self.listener = Some(Box::new(listener));
    }

    /// Installs a listener that only receives events of `id`.
    pub fn set_state_listener<L: AnimationListener + 'static>(&mut self, id: StateId, listener: L) {
        if let Some(state) = self.states.get_mut(id.0) {
            state.listener = Some(Box::new(listener));
        }
    }

    pub fn set_clip_selector<S: ClipSelector + 'static>(
        &mut self,
        id: StateId,
        selector: S,
    ) -> Result<(), Error> {
        let state = self.states.get_mut(id.0).ok_or_else(|| Error::InvalidValue {
            message: format!("invalid state id {}", id.0),
        })?;
        match &mut state.kind {
            StateNodeKind::MultiClip(multi) => {
                multi.selector = Some(Box::new(selector));
                Ok(())
            }
            _ => Err(Error::InvalidValue {
                message: format!("state '{}' is not a multi-clip state", state.name),
            }),
        }
    }

    /// Accumulated simulation time in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_spawned(&self) -> bool {
        self.spawned
    }

    /// Output mixer of the controller; the host connects it to its graph output.
    pub fn root_playable(&self) -> Option<PlayableHandle> {
        self.root_playable
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.state_index.get(name).copied()
    }

    pub fn state(&self, id: StateId) -> Option<&AnimationState> {
        self.states.get(id.0)
    }

    pub fn state_by_name(&self, name: &str) -> Result<&AnimationState, Error> {
        self.state_id(name)
            .and_then(|id| self.state(id))
            .ok_or_else(|| Error::UnknownState {
                name: name.to_string(),
            })
    }

    pub fn states(&self) -> &[AnimationState] {
        &self.states
    }

    pub fn layer(&self, index: usize) -> Option<&LayerState> {
        self.layers.get(index)
    }

    pub fn layers(&self) -> &[LayerState] {
        &self.layers
    }

    /// Weight of a state after multiplying every owner up to and including its layer.
    pub fn effective_weight(&self, id: StateId) -> f32 {
        let Some(mut state) = self.state(id) else {
            return 0.0;
        };
        let mut weight = state.weight();
        loop {
            match state.owner {
                Owner::Mixer(owner) => {
                    state = &self.states[owner.0];
                    weight *= state.weight();
                }
                Owner::Layer(layer) => return weight * self.layers[layer].weight(),
            }
        }
    }

    pub fn is_finished(&self, id: StateId, time: f32, normalized: bool) -> bool {
        self.state(id)
            .is_some_and(|state| state.is_finished(time, normalized))
    }

    pub fn activate(&mut self, id: StateId, fade: f32) {
        self.activate_internal(id, fade);
        self.drain_event_queue();
    }

    pub fn deactivate(&mut self, id: StateId, fade: f32) {
        self.deactivate_internal(id, fade, true);
        self.drain_event_queue();
    }

    pub fn activate_state(&mut self, name: &str, fade: f32) -> Result<(), Error> {
        let id = self.state_id(name).ok_or_else(|| Error::UnknownState {
            name: name.to_string(),
        })?;
        self.activate(id, fade);
        Ok(())
    }

    pub fn deactivate_state(&mut self, name: &str, fade: f32) -> Result<(), Error> {
        let id = self.state_id(name).ok_or_else(|| Error::UnknownState {
            name: name.to_string(),
        })?;
        self.deactivate(id, fade);
        Ok(())
    }

    pub fn activate_layer(&mut self, index: usize, fade: f32) -> Result<(), Error> {
        let layer = self
            .layers
            .get_mut(index)
            .ok_or(Error::InvalidLayerIndex { index })?;
        if layer.fade.fade_in(fade) {
            log::trace!("layer '{}' fading in over {fade}s", layer.name);
        }
        Ok(())
    }

    pub fn deactivate_layer(&mut self, index: usize, fade: f32) -> Result<(), Error> {
        let layer = self
            .layers
            .get_mut(index)
            .ok_or(Error::InvalidLayerIndex { index })?;
        if layer.fade.fade_out(fade) {
            log::trace!("layer '{}' fading out over {fade}s", layer.name);
        }
        Ok(())
    }

    fn activate_internal(&mut self, id: StateId, fade: f32) {
        let Some(state) = self.states.get_mut(id.0) else {
            return;
        };
        let from_inactive = state.fade.phase() == FadePhase::Inactive;
        if !state.fade.fade_in(fade) {
            return;
        }
        if from_inactive {
            state.restart();
        }
        log::trace!("state '{}' activating over {fade}s", state.name);
        let (owner, port) = (state.owner, state.port);
        push_event(&mut self.event_queue, id, StateEvent::Activated { fade });

        let siblings = match owner {
            Owner::Layer(layer) => self.layers[layer].states.clone(),
            Owner::Mixer(mixer) => self.states[mixer.0].children().to_vec(),
        };
        for sibling in siblings {
            if self.states[sibling.0].port != port {
                self.deactivate_internal(sibling, fade, false);
            }
        }

        if let Owner::Mixer(mixer) = owner {
            self.activate_internal(mixer, fade);
        }
    }

    fn deactivate_internal(&mut self, id: StateId, fade: f32, propagate: bool) {
        let Some(state) = self.states.get_mut(id.0) else {
            return;
        };
        if !state.fade.fade_out(fade) {
            return;
        }
        log::trace!("state '{}' deactivating over {fade}s", state.name);
        let owner = state.owner;
        push_event(&mut self.event_queue, id, StateEvent::Deactivated { fade });

        if propagate {
            if let Owner::Mixer(mixer) = owner {
                self.deactivate_internal(mixer, fade, true);
            }
        }
    }

    /// Creates and connects the native playables of every layer and state.
    pub fn spawn(&mut self, backend: &mut dyn PlayableBackend) {
        if self.spawned {
            log::warn!("animation controller spawned twice; ignoring");
            return;
        }
        let data = self.data.clone();

        let root = backend.create_mixer(self.layers.len());
        for (index, layer) in self.layers.iter_mut().enumerate() {
            let playable = backend.create_mixer(layer.states.len());
            backend.connect(root, index, playable);
            layer.playable = Some(playable);
        }
        self.root_playable = Some(root);

        for i in 0..self.states.len() {
            let state = &mut self.states[i];
            match &mut state.kind {
                StateNodeKind::Clip(clip) => {
                    clip.playable = Some(backend.create_clip(&data.clips[clip.clip_index()]));
                }
                StateNodeKind::MultiClip(multi) => {
                    let mixer = backend.create_mixer(multi.clips.len());
                    for (port, clip) in multi.clips.iter_mut().enumerate() {
                        let playable = backend.create_clip(&data.clips[clip.clip_index()]);
                        backend.connect(mixer, port, playable);
                        clip.playable = Some(playable);
                    }
                    state.playable = Some(mixer);
                }
                StateNodeKind::Mixer(children) => {
                    state.playable = Some(backend.create_mixer(children.len()));
                }
            }

            let state = &self.states[i];
            let parent = match state.owner {
                Owner::Layer(layer) => self.layers[layer].playable,
                Owner::Mixer(mixer) => self.states[mixer.0].playable,
            };
            if let (Some(parent), Some(output)) = (parent, state.output_playable()) {
                backend.connect(parent, state.port, output);
            }
        }

        self.spawned = true;
        log::debug!(
            "spawned animation controller: {} layers, {} states",
            self.layers.len(),
            self.states.len()
        );
        self.write_playback(backend, WriteMode::Simulation);
    }

    /// Releases every playable created by [`Self::spawn`].
    pub fn despawn(&mut self, backend: &mut dyn PlayableBackend) {
        if !self.spawned {
            return;
        }
        for state in self.states.iter_mut().rev() {
            match &mut state.kind {
                StateNodeKind::Clip(clip) => release(backend, clip.playable.take()),
                StateNodeKind::MultiClip(multi) => {
                    for clip in &mut multi.clips {
                        release(backend, clip.playable.take());
                    }
                }
                StateNodeKind::Mixer(_) => {}
            }
            release(backend, state.playable.take());
        }
        for layer in &mut self.layers {
            release(backend, layer.playable.take());
        }
        release(backend, self.root_playable.take());
        self.spawned = false;
        log::debug!("despawned animation controller");
    }

    /// Advances the simulation by one fixed tick.
    pub fn tick(&mut self, delta: f32, backend: &mut dyn PlayableBackend) {
        if !delta.is_finite() || delta < 0.0 {
            return;
        }
        self.time += delta;
        self.ticks += 1;

        for layer in &mut self.layers {
            layer.fade.store_previous();
            layer.fade.integrate(delta);
        }

        for i in 0..self.states.len() {
            let state = &mut self.states[i];
            let contributing = state.fade.is_contributing();
            state.fade.store_previous();
            state.fade.integrate(delta);

            let edge = match &mut state.kind {
                StateNodeKind::Clip(clip) => {
                    clip.store_previous();
                    if contributing {
                        clip.advance(delta)
                    } else {
                        CursorEdge::None
                    }
                }
                StateNodeKind::MultiClip(multi) => {
                    for clip in &mut multi.clips {
                        clip.store_previous();
                    }
                    multi.select(&state.name);
                    if contributing {
                        multi.clips[multi.selected].advance(delta)
                    } else {
                        CursorEdge::None
                    }
                }
                StateNodeKind::Mixer(_) => CursorEdge::None,
            };

            match edge {
                CursorEdge::Restarted => {
                    log::trace!("state '{}' restarted", state.name);
                    push_event(&mut self.event_queue, StateId(i), StateEvent::Restarted);
                }
                CursorEdge::Finished => {
                    log::trace!("state '{}' finished", state.name);
                    push_event(&mut self.event_queue, StateId(i), StateEvent::Finished);
                }
                CursorEdge::None => {}
            }
        }

        self.write_playback(backend, WriteMode::Simulation);
        self.drain_event_queue();
    }

    /// Render-rate pass between the previous and the current tick. Only presentation
    /// values change; simulation state is left untouched.
    pub fn interpolate(&mut self, alpha: f32, backend: &mut dyn PlayableBackend) {
        let alpha = presentation_alpha(alpha);
        for layer in &mut self.layers {
            layer.fade.interpolate(alpha);
        }
        for state in &mut self.states {
            state.fade.interpolate(alpha);
            match &mut state.kind {
                StateNodeKind::Clip(clip) => {
                    clip.interpolate(alpha);
                }
                StateNodeKind::MultiClip(multi) => {
                    for clip in &mut multi.clips {
                        clip.interpolate(alpha);
                    }
                }
                StateNodeKind::Mixer(_) => {}
            }
        }
        self.write_playback(backend, WriteMode::Interpolated);
    }

    pub(crate) fn restore_clock(&mut self, ticks: u64, time: f32) {
        self.ticks = ticks;
        self.time = time;
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [LayerState] {
        &mut self.layers
    }

    pub(crate) fn states_mut(&mut self) -> &mut [AnimationState] {
        &mut self.states
    }

    /// Writes the presentation values already stored in the nodes.
    pub(crate) fn write_presentation(&self, backend: &mut dyn PlayableBackend) {
        self.write_playback(backend, WriteMode::Interpolated);
    }

    fn write_playback(&self, backend: &mut dyn PlayableBackend, mode: WriteMode) {
        if !self.spawned {
            return;
        }
        let weight = |fade: &Fade| match mode {
            WriteMode::Simulation => fade.weight(),
            WriteMode::Interpolated => fade.interpolated_weight(),
        };
        let seconds = |clip: &ClipNode| match mode {
            WriteMode::Simulation => clip.time() * clip.length(),
            WriteMode::Interpolated => clip.interpolated_time() * clip.length(),
        };

        if let Some(root) = self.root_playable {
            for (index, layer) in self.layers.iter().enumerate() {
                backend.set_input_weight(root, index, weight(&layer.fade));
            }
        }
        for layer in &self.layers {
            let Some(playable) = layer.playable else {
                continue;
            };
            for (port, id) in layer.states.iter().enumerate() {
                backend.set_input_weight(playable, port, weight(&self.states[id.0].fade));
            }
        }
        for state in &self.states {
            match &state.kind {
                StateNodeKind::Clip(clip) => {
                    if let Some(playable) = clip.playable {
                        backend.set_time(playable, seconds(clip));
                    }
                }
                StateNodeKind::MultiClip(multi) => {
                    for (port, clip) in multi.clips.iter().enumerate() {
                        if let Some(mixer) = state.playable {
                            backend.set_input_weight(mixer, port, clip.weight);
                        }
                        if let Some(playable) = clip.playable {
                            backend.set_time(playable, seconds(clip));
                        }
                    }
                }
                StateNodeKind::Mixer(children) => {
                    let Some(mixer) = state.playable else {
                        continue;
                    };
                    for (port, child) in children.iter().enumerate() {
                        backend.set_input_weight(mixer, port, weight(&self.states[child.0].fade));
                    }
                }
            }
        }
    }

    fn info(&self, id: StateId) -> StateInfo {
        match self.state(id) {
            Some(state) => StateInfo {
                id,
                name: state.name.clone(),
                layer: state.layer,
                weight: state.weight(),
                time: state.time(),
            },
            None => StateInfo {
                id,
                name: "<invalid>".to_string(),
                layer: 0,
                weight: 0.0,
                time: 0.0,
            },
        }
    }

    fn drain_event_queue(&mut self) {
        if self.draining_events {
            return;
        }
        self.draining_events = true;

        while let Some(queued) = self.event_queue.pop_front() {
            let info = self.info(queued.state);

            let mut state_listener = self
                .states
                .get_mut(queued.state.0)
                .and_then(|s| s.listener.take());
            if let Some(listener) = state_listener.as_mut() {
                listener.on_event(self, &info, &queued.event);
            }
            if let Some(listener) = state_listener {
                if let Some(state) = self.states.get_mut(queued.state.0) {
                    if state.listener.is_none() {
                        state.listener = Some(listener);
                    }
                }
            }

            let mut listener = self.listener.take();
            if let Some(listener) = listener.as_mut() {
                listener.on_event(self, &info, &queued.event);
            }
            if self.listener.is_none() {
                self.listener = listener;
            }
        }

        self.draining_events = false;
    }
}

fn push_event(out: &mut VecDeque<QueuedEvent>, state: StateId, event: StateEvent) {
    out.push_back(QueuedEvent { state, event });
}

fn release(backend: &mut dyn PlayableBackend, handle: Option<PlayableHandle>) {
    let Some(handle) = handle else {
        return;
    };
    if backend.is_valid(handle) {
        backend.destroy(handle);
    } else {
        log::warn!("playable {handle:?} already released; skipping");
    }
}
