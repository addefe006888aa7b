//! JSON authoring format for controller data.
//!
//! ```json
//! {
//!   "format": "1.0",
//!   "clips": [{ "name": "idle", "length": 1.2, "loop": true }],
//!   "layers": [{
//!     "name": "base",
//!     "states": [
//!       { "name": "idle", "type": "clip", "clip": "idle" },
//!       { "name": "move", "type": "mixer", "states": [] }
//!     ]
//!   }]
//! }
//! ```

use crate::{
    AUTHORING_FORMAT_MAJOR, ClipData, ControllerData, Error, LayerBlueprint, StateBlueprint,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct Root {
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    clips: Vec<ClipDef>,
    #[serde(default)]
    layers: Vec<LayerDef>,
}

#[derive(Debug, Deserialize)]
struct ClipDef {
    name: String,
    length: f32,
    #[serde(default = "default_one")]
    speed: f32,
    #[serde(default, rename = "loop")]
    looping: bool,
}

#[derive(Debug, Deserialize)]
struct LayerDef {
    name: String,
    #[serde(default = "default_one")]
    weight: f32,
    #[serde(default)]
    states: Vec<StateDef>,
}

#[derive(Debug, Deserialize)]
struct StateDef {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    clip: Option<String>,
    #[serde(default)]
    clips: Vec<String>,
    #[serde(default)]
    states: Vec<StateDef>,
}

fn default_one() -> f32 {
    1.0
}

impl ControllerData {
    pub fn from_json_str(input: &str) -> Result<Arc<Self>, Error> {
        let root: Root = serde_json::from_str(input).map_err(|e| Error::JsonParse {
            message: e.to_string(),
        })?;
        if let Some(v) = root.format.as_deref() {
            validate_format_version(v)?;
        }

        let mut builder = ControllerData::builder();
        for clip in root.clips {
            builder = builder.clip(
                ClipData::new(clip.name, clip.length)
                    .with_speed(clip.speed)
                    .with_looping(clip.looping),
            );
        }
        for layer in root.layers {
            let mut blueprint = LayerBlueprint::new(layer.name).with_weight(layer.weight);
            for state in &layer.states {
                blueprint = blueprint.with_state(state_blueprint(state)?);
            }
            builder = builder.layer(blueprint);
        }
        builder.build()
    }
}

fn state_blueprint(def: &StateDef) -> Result<StateBlueprint, Error> {
    match def.kind.as_str() {
        "clip" => {
            let clip = def.clip.as_deref().ok_or_else(|| Error::JsonParse {
                message: format!("clip state '{}' is missing its 'clip'", def.name),
            })?;
            Ok(StateBlueprint::clip(def.name.as_str(), clip))
        }
        "multiClip" => Ok(StateBlueprint::multi_clip(
            def.name.as_str(),
            def.clips.iter().map(String::as_str),
        )),
        "mixer" => Ok(StateBlueprint::mixer(
            def.name.as_str(),
            def.states
                .iter()
                .map(state_blueprint)
                .collect::<Result<Vec<_>, _>>()?,
        )),
        other => Err(Error::JsonUnknownStateKind {
            state: def.name.clone(),
            kind: other.to_string(),
        }),
    }
}

fn validate_format_version(value: &str) -> Result<(), Error> {
    let major = value
        .split('.')
        .next()
        .and_then(|m| m.parse::<u32>().ok())
        .ok_or_else(|| Error::JsonFormatVersion {
            value: value.to_string(),
        })?;
    if major != AUTHORING_FORMAT_MAJOR {
        return Err(Error::JsonFormatVersion {
            value: value.to_string(),
        });
    }
    Ok(())
}
