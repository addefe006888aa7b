use animstate::{AnimationController, ControllerData, HeadlessBackend, StateNodeKind};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_CONTROLLER: &str = r#"{
  "format": "1.0",
  "clips": [
    { "name": "idle", "length": 1.2, "loop": true },
    { "name": "walk", "length": 0.8, "loop": true },
    { "name": "run", "length": 0.6, "loop": true }
  ],
  "layers": [{
    "name": "base",
    "states": [
      { "name": "idle", "type": "clip", "clip": "idle" },
      { "name": "move", "type": "mixer", "states": [
        { "name": "walk", "type": "clip", "clip": "walk" },
        { "name": "run", "type": "clip", "clip": "run" }
      ] }
    ]
  }]
}"#;

fn load_controller_data(path: Option<&PathBuf>) -> Arc<ControllerData> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path).expect("read json"),
        None => DEFAULT_CONTROLLER.to_string(),
    };
    ControllerData::from_json_str(&json).expect("parse json")
}

fn main() {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut positional = Vec::<String>::new();
    let mut tick_rate = 30.0f32;
    let mut fade = 0.25f32;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--rate" => {
                tick_rate = args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(30.0);
                i += 2;
            }
            "--fade" => {
                fade = args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(0.25);
                i += 2;
            }
            other => {
                positional.push(other.to_string());
                i += 1;
            }
        }
    }

    // positional: [controller.json] [first state] [second state] [ticks]
    let json_path = positional.first().filter(|p| p.ends_with(".json")).map(PathBuf::from);
    let rest = &positional[usize::from(json_path.is_some())..];
    let first = rest.first().cloned().unwrap_or_else(|| "idle".to_string());
    let second = rest.get(1).cloned().unwrap_or_else(|| "walk".to_string());
    let ticks: usize = rest.get(2).and_then(|s| s.parse().ok()).unwrap_or(20);

    let data = load_controller_data(json_path.as_ref());
    let mut controller = AnimationController::new(data);
    let mut backend = HeadlessBackend::new();
    controller.spawn(&mut backend);

    controller.activate_state(&first, 0.0).expect("activate first state");
    let delta = 1.0 / tick_rate.max(1.0);

    let mut rows = Vec::with_capacity(ticks);
    for tick in 0..ticks {
        if tick == ticks / 4 {
            controller
                .activate_state(&second, fade)
                .expect("activate second state");
        }
        controller.tick(delta, &mut backend);

        let states: Vec<_> = controller
            .states()
            .iter()
            .filter(|s| s.weight() > 0.0)
            .map(|s| {
                let kind = match s.kind() {
                    StateNodeKind::Clip(_) => "clip",
                    StateNodeKind::MultiClip(_) => "multiClip",
                    StateNodeKind::Mixer(_) => "mixer",
                };
                json!({
                    "name": s.name(),
                    "type": kind,
                    "weight": s.weight(),
                    "fadingSpeed": s.fading_speed(),
                    "time": s.time(),
                })
            })
            .collect();

        rows.push(json!({
            "tick": controller.ticks(),
            "time": controller.time(),
            "states": states,
        }));
    }

    controller.despawn(&mut backend);

    let out = json!({
        "tickRate": tick_rate,
        "ticks": rows,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&out).expect("serialize output")
    );
}
