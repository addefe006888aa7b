use crate::{
    AnimationController, ClipData, ControllerData, ControllerSnapshot, Error, HeadlessBackend,
    LayerBlueprint, StateBlueprint,
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
        .layer(
            LayerBlueprint::new("upper")
                .with_weight(0.5)
                .with_state(StateBlueprint::multi_clip("aim", ["idle", "jump"])),
        )
        .build()
        .unwrap()
}

fn run_ticks(controller: &mut AnimationController, backend: &mut HeadlessBackend, count: usize) {
    for _ in 0..count {
        controller.tick(0.1, backend);
    }
}

#[test]
fn capture_records_every_layer_and_state() {
    let mut controller = AnimationController::new(locomotion_data());
    let mut backend = HeadlessBackend::new();
    controller.activate_state("idle", 0.0).unwrap();
    run_ticks(&mut controller, &mut backend, 3);

    let snapshot = controller.capture_snapshot();
    assert_eq!(snapshot.ticks, 3);
    assert_approx(snapshot.time, 0.3);
    assert_eq!(snapshot.layers.len(), 2);
    assert_eq!(snapshot.layers[1].weight, 0.5);
    assert_eq!(snapshot.states.len(), 6);

    let idle = &snapshot.states[0];
    assert_eq!(idle.fade.weight, 1.0);
    assert_eq!(idle.times.len(), 1);
    assert_approx(idle.times[0], 0.3);
    assert!(snapshot.states[1].times.is_empty());
    assert_eq!(snapshot.states[5].times.len(), 2);
}

#[test]
fn restore_then_resimulate_is_deterministic() {
    let mut controller = AnimationController::new(locomotion_data());
    let mut backend = HeadlessBackend::new();
    controller.spawn(&mut backend);
    controller.activate_state("idle", 0.0).unwrap();
    run_ticks(&mut controller, &mut backend, 2);
    controller.activate_state("walk", 0.5).unwrap();
    controller.activate_state("aim", 0.2).unwrap();
    run_ticks(&mut controller, &mut backend, 2);

    let saved = controller.capture_snapshot();
    run_ticks(&mut controller, &mut backend, 6);
    let expected = controller.capture_snapshot();

    controller.restore_snapshot(&saved).unwrap();
    assert_eq!(controller.capture_snapshot(), saved);
    run_ticks(&mut controller, &mut backend, 6);
    assert_eq!(controller.capture_snapshot(), expected);
}

#[test]
fn restore_resets_interpolation_history() {
    let mut controller = AnimationController::new(locomotion_data());
    let mut backend = HeadlessBackend::new();
    controller.spawn(&mut backend);
    controller.activate_state("idle", 0.0).unwrap();
    run_ticks(&mut controller, &mut backend, 4);
    let saved = controller.capture_snapshot();
    run_ticks(&mut controller, &mut backend, 2);

    controller.restore_snapshot(&saved).unwrap();
    controller.interpolate(0.5, &mut backend);

    let idle = controller.state_by_name("idle").unwrap();
    assert_approx(idle.clip().unwrap().interpolated_time(), 0.4);
    assert_eq!(idle.fade().interpolated_weight(), 1.0);
}

#[test]
fn mismatched_snapshot_is_rejected() {
    let mut controller = AnimationController::new(locomotion_data());
    let other = ControllerData::builder()
        .clip(ClipData::new("idle", 1.0))
        .layer(LayerBlueprint::new("base").with_state(StateBlueprint::clip("idle", "idle")))
        .build()
        .unwrap();
    let foreign = AnimationController::new(other).capture_snapshot();
    assert!(matches!(
        controller.restore_snapshot(&foreign),
        Err(Error::SnapshotMismatch { .. })
    ));

    let mut truncated = controller.capture_snapshot();
    truncated.states[5].times.pop();
    assert!(matches!(
        controller.restore_snapshot(&truncated),
        Err(Error::SnapshotMismatch { .. })
    ));

    let mut backend = HeadlessBackend::new();
    let good = controller.capture_snapshot();
    assert!(
        controller
            .interpolate_snapshots(&good, &ControllerSnapshot::default(), 0.5, &mut backend)
            .is_err()
    );
}

#[test]
fn snapshot_interpolation_wraps_loops_and_leaves_simulation_alone() {
    let mut controller = AnimationController::new(locomotion_data());
    let mut backend = HeadlessBackend::new();
    controller.spawn(&mut backend);
    controller.activate_state("idle", 0.0).unwrap();
    controller.tick(0.9, &mut backend);
    let from = controller.capture_snapshot();
    controller.tick(0.2, &mut backend);
    let to = controller.capture_snapshot();
    let simulated = controller.state_by_name("idle").unwrap().time();
    assert_approx(simulated, 0.1);

    let idle = controller.state_by_name("idle").unwrap().playable().unwrap();
    controller
        .interpolate_snapshots(&from, &to, 0.25, &mut backend)
        .unwrap();
    assert_approx(backend.clip_time(idle).unwrap(), 0.95);

    controller
        .interpolate_snapshots(&from, &to, 0.75, &mut backend)
        .unwrap();
    assert_approx(backend.clip_time(idle).unwrap(), 0.05);
    assert_eq!(controller.state_by_name("idle").unwrap().time(), simulated);
    assert_eq!(controller.capture_snapshot(), to);
}

#[test]
fn snapshot_interpolation_snaps_weight_flips() {
    let mut controller = AnimationController::new(locomotion_data());
    let mut backend = HeadlessBackend::new();
    controller.spawn(&mut backend);
    controller.activate_state("idle", 0.0).unwrap();
    let from = controller.capture_snapshot();
    controller.activate_state("jump", 0.0).unwrap();
    let to = controller.capture_snapshot();

    let layer = controller.layer(0).unwrap().playable().unwrap();
    controller
        .interpolate_snapshots(&from, &to, 0.4, &mut backend)
        .unwrap();
    assert_eq!(backend.input_weight(layer, 0), Some(1.0));
    assert_eq!(backend.input_weight(layer, 2), Some(0.0));

    controller
        .interpolate_snapshots(&from, &to, 0.6, &mut backend)
        .unwrap();
    assert_eq!(backend.input_weight(layer, 0), Some(0.0));
    assert_eq!(backend.input_weight(layer, 2), Some(1.0));
}

#[test]
fn non_finite_snapshot_values_are_rejected() {
    let mut controller = AnimationController::new(locomotion_data());
    let mut backend = HeadlessBackend::new();
    controller.activate_state("idle", 0.0).unwrap();
    run_ticks(&mut controller, &mut backend, 2);
    let good = controller.capture_snapshot();

    let mut broken = good.clone();
    broken.states[0].fade.weight = f32::NAN;
    broken.states[0].fade.fading_speed = f32::NAN;
    assert!(matches!(
        controller.restore_snapshot(&broken),
        Err(Error::InvalidValue { .. })
    ));

    let mut broken = good.clone();
    broken.states[5].times[1] = f32::INFINITY;
    assert!(controller.restore_snapshot(&broken).is_err());
    assert!(
        controller
            .interpolate_snapshots(&good, &broken, 0.5, &mut backend)
            .is_err()
    );

    run_ticks(&mut controller, &mut backend, 10);
    let idle = controller.state_by_name("idle").unwrap();
    assert_eq!(idle.weight(), 1.0);
    assert_eq!(idle.phase(), crate::FadePhase::Active);
}

#[test]
fn non_finite_snapshot_alpha_presents_the_target() {
    let mut controller = AnimationController::new(locomotion_data());
    let mut backend = HeadlessBackend::new();
    controller.spawn(&mut backend);
    controller.activate_state("idle", 0.0).unwrap();
    let from = controller.capture_snapshot();
    controller.activate_state("jump", 0.0).unwrap();
    let to = controller.capture_snapshot();

    let layer = controller.layer(0).unwrap().playable().unwrap();
    controller
        .interpolate_snapshots(&from, &to, f32::NAN, &mut backend)
        .unwrap();
    assert_eq!(backend.input_weight(layer, 0), Some(0.0));
    assert_eq!(backend.input_weight(layer, 2), Some(1.0));
}
