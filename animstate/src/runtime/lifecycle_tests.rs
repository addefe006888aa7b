use crate::{
    AnimationController, ClipData, ControllerData, HeadlessBackend, HeadlessPlayable,
    LayerBlueprint, PlayableBackend, PlayableHandle, StateBlueprint,
};
use std::sync::Arc;

fn assert_approx(actual: f32, expected: f32) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= 1.0e-5,
        "expected {expected}, got {actual} (diff {diff})"
    );
}

fn locomotion_data() -> Arc<ControllerData> {
    ControllerData::builder()
        .clip(ClipData::new("idle", 1.0).with_looping(true))
        .clip(ClipData::new("walk", 0.5).with_looping(true))
        .clip(ClipData::new("run", 0.5).with_looping(true))
        .clip(ClipData::new("jump", 2.0))
        .layer(
            LayerBlueprint::new("base")
                .with_state(StateBlueprint::clip("idle", "idle"))
                .with_state(StateBlueprint::mixer(
                    "move",
                    vec![
                        StateBlueprint::clip("walk", "walk"),
                        StateBlueprint::clip("run", "run"),
                    ],
                ))
                .with_state(StateBlueprint::clip("jump", "jump")),
        )
        .build()
        .unwrap()
}

fn spawned() -> (AnimationController, HeadlessBackend) {
    let mut controller = AnimationController::new(locomotion_data());
    let mut backend = HeadlessBackend::new();
    controller.spawn(&mut backend);
    (controller, backend)
}

fn mixer_inputs(backend: &HeadlessBackend, handle: PlayableHandle) -> Vec<Option<PlayableHandle>> {
    match backend.get(handle) {
        Some(HeadlessPlayable::Mixer { inputs, .. }) => inputs.clone(),
        other => panic!("expected mixer at {handle:?}, got {other:?}"),
    }
}

fn playable(controller: &AnimationController, name: &str) -> PlayableHandle {
    controller.state_by_name(name).unwrap().playable().unwrap()
}

#[test]
fn spawn_builds_the_playable_graph() {
    let (controller, backend) = spawned();
    assert!(controller.is_spawned());
    assert_eq!(backend.live_count(), 7);

    let root = controller.root_playable().unwrap();
    let layer = controller.layer(0).unwrap().playable().unwrap();
    assert_eq!(mixer_inputs(&backend, root), [Some(layer)]);
    assert_eq!(backend.input_weight(root, 0), Some(1.0));

    assert_eq!(
        mixer_inputs(&backend, layer),
        [
            Some(playable(&controller, "idle")),
            Some(playable(&controller, "move")),
            Some(playable(&controller, "jump")),
        ]
    );
    assert_eq!(
        mixer_inputs(&backend, playable(&controller, "move")),
        [
            Some(playable(&controller, "walk")),
            Some(playable(&controller, "run")),
        ]
    );
    assert!(matches!(
        backend.get(playable(&controller, "jump")),
        Some(HeadlessPlayable::Clip { name, .. }) if name == "jump"
    ));
}

#[test]
fn tick_writes_weights_and_clip_times() {
    let (mut controller, mut backend) = spawned();
    controller.activate_state("walk", 0.0).unwrap();
    controller.tick(0.25, &mut backend);

    let layer = controller.layer(0).unwrap().playable().unwrap();
    let movement = playable(&controller, "move");
    assert_eq!(backend.input_weight(layer, 0), Some(0.0));
    assert_eq!(backend.input_weight(layer, 1), Some(1.0));
    assert_eq!(backend.input_weight(movement, 0), Some(1.0));
    assert_eq!(backend.input_weight(movement, 1), Some(0.0));
    assert_approx(
        backend.clip_time(playable(&controller, "walk")).unwrap(),
        0.25,
    );
}

#[test]
fn interpolate_writes_presentation_only() {
    let (mut controller, mut backend) = spawned();
    controller.activate_state("idle", 0.0).unwrap();
    controller.tick(0.5, &mut backend);

    controller.interpolate(0.5, &mut backend);
    let idle = playable(&controller, "idle");
    assert_approx(backend.clip_time(idle).unwrap(), 0.25);
    assert_approx(controller.state_by_name("idle").unwrap().time(), 0.5);

    controller.interpolate(1.0, &mut backend);
    assert_approx(backend.clip_time(idle).unwrap(), 0.5);
}

#[test]
fn interpolate_blends_partial_fades() {
    let (mut controller, mut backend) = spawned();
    controller.activate_state("idle", 1.0).unwrap();
    controller.tick(0.5, &mut backend);
    controller.interpolate(0.5, &mut backend);

    let layer = controller.layer(0).unwrap().playable().unwrap();
    assert_approx(backend.input_weight(layer, 0).unwrap(), 0.25);
    assert_eq!(controller.state_by_name("idle").unwrap().weight(), 0.5);
}

#[test]
fn interpolate_snaps_full_weight_flips() {
    let (mut controller, mut backend) = spawned();
    controller.activate_state("idle", 0.0).unwrap();
    controller.tick(0.1, &mut backend);
    controller.activate_state("jump", 0.0).unwrap();

    let layer = controller.layer(0).unwrap().playable().unwrap();
    controller.interpolate(0.4, &mut backend);
    assert_eq!(backend.input_weight(layer, 0), Some(1.0));
    assert_eq!(backend.input_weight(layer, 2), Some(0.0));

    controller.interpolate(0.6, &mut backend);
    assert_eq!(backend.input_weight(layer, 0), Some(0.0));
    assert_eq!(backend.input_weight(layer, 2), Some(1.0));
}

#[test]
fn despawn_releases_everything_once() {
    let (mut controller, mut backend) = spawned();
    controller.despawn(&mut backend);
    assert_eq!(backend.live_count(), 0);
    assert!(!controller.is_spawned());
    assert_eq!(controller.root_playable(), None);
    assert_eq!(controller.state_by_name("walk").unwrap().playable(), None);

    controller.despawn(&mut backend);
    assert_eq!(backend.live_count(), 0);
}

#[test]
fn despawn_skips_handles_released_elsewhere() {
    let (mut controller, mut backend) = spawned();
    let walk = playable(&controller, "walk");
    backend.destroy(walk);
    assert!(!backend.is_valid(walk));

    controller.despawn(&mut backend);
    assert_eq!(backend.live_count(), 0);
}

#[test]
fn second_spawn_is_ignored() {
    let (mut controller, mut backend) = spawned();
    let root = controller.root_playable();
    controller.spawn(&mut backend);
    assert_eq!(backend.live_count(), 7);
    assert_eq!(controller.root_playable(), root);
}

#[test]
fn simulation_runs_before_spawn_and_is_written_on_spawn() {
    let mut controller = AnimationController::new(locomotion_data());
    let mut backend = HeadlessBackend::new();
    controller.activate_state("idle", 0.0).unwrap();
    controller.tick(0.5, &mut backend);
    assert_eq!(backend.live_count(), 0);

    controller.spawn(&mut backend);
    let layer = controller.layer(0).unwrap().playable().unwrap();
    assert_eq!(backend.input_weight(layer, 0), Some(1.0));
    assert_approx(
        backend.clip_time(playable(&controller, "idle")).unwrap(),
        0.5,
    );
}
