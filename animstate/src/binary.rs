//! Compact wire form of [`ControllerSnapshot`] for replication.
//!
//! Layout (little endian): magic `ASNP`, `u16` format version, `u64` ticks, `f32` time,
//! `u32` layer count followed by `(weight, fading_speed)` pairs, `u32` state count followed
//! by `(weight, fading_speed, u16 selected, u16 time count, f32 times...)` per state.

use crate::{ControllerSnapshot, Error, FadeSnapshot, SNAPSHOT_FORMAT_VERSION, StateSnapshot};
use byteorder::{ByteOrder, LittleEndian};

const MAGIC: &[u8; 4] = b"ASNP";

impl ControllerSnapshot {
    /// Encodes the snapshot. Fails when a count does not fit its wire field.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let times: usize = self.states.iter().map(|s| s.times.len()).sum();
        let mut out = Vec::with_capacity(
            26 + self.layers.len() * 8 + self.states.len() * 12 + times * 4,
        );

        out.extend_from_slice(MAGIC);
        write_u16(&mut out, SNAPSHOT_FORMAT_VERSION);
        write_u64(&mut out, self.ticks);
        write_f32(&mut out, self.time);

        write_u32(&mut out, encode_count(self.layers.len(), "layer count")?);
        for layer in &self.layers {
            write_fade(&mut out, layer);
        }

        write_u32(&mut out, encode_count(self.states.len(), "state count")?);
        for state in &self.states {
            write_fade(&mut out, &state.fade);
            write_u16(&mut out, state.selected);
            write_u16(&mut out, encode_count(state.times.len(), "clip time count")?);
            for &time in &state.times {
                write_f32(&mut out, time);
            }
        }
        Ok(out)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let mut input = BinaryInput::new(bytes);

        if input.read_bytes(4)? != MAGIC {
            return Err(Error::SnapshotDecode {
                message: "bad magic".to_string(),
            });
        }
        let version = input.read_u16()?;
        if version != SNAPSHOT_FORMAT_VERSION {
            return Err(Error::SnapshotDecode {
                message: format!("unsupported format version {version}"),
            });
        }
        let ticks = input.read_u64()?;
        let time = input.read_finite_f32()?;

        let layer_count = input.read_count(8)?;
        let mut layers = Vec::with_capacity(layer_count);
        for _ in 0..layer_count {
            layers.push(input.read_fade()?);
        }

        let state_count = input.read_count(12)?;
        let mut states = Vec::with_capacity(state_count);
        for _ in 0..state_count {
            let fade = input.read_fade()?;
            let selected = input.read_u16()?;
            let time_count = usize::from(input.read_u16()?);
            let mut times = Vec::with_capacity(time_count.min(input.remaining() / 4));
            for _ in 0..time_count {
                times.push(input.read_finite_f32()?);
            }
            states.push(StateSnapshot {
                fade,
                selected,
                times,
            });
        }

        if input.remaining() != 0 {
            return Err(Error::SnapshotDecode {
                message: format!("{} trailing bytes", input.remaining()),
            });
        }

        Ok(Self {
            ticks,
            time,
            layers,
            states,
        })
    }
}

fn encode_count<T: TryFrom<usize>>(count: usize, what: &str) -> Result<T, Error> {
    T::try_from(count).map_err(|_| Error::SnapshotEncode {
        message: format!("{what} {count} does not fit the wire format"),
    })
}

fn write_u16(out: &mut Vec<u8>, value: u16) {
    let mut buf = [0u8; 2];
    LittleEndian::write_u16(&mut buf, value);
    out.extend_from_slice(&buf);
}

fn write_u32(out: &mut Vec<u8>, value: u32) {
    let mut buf = [0u8; 4];
    LittleEndian::write_u32(&mut buf, value);
    out.extend_from_slice(&buf);
}

fn write_u64(out: &mut Vec<u8>, value: u64) {
    let mut buf = [0u8; 8];
    LittleEndian::write_u64(&mut buf, value);
    out.extend_from_slice(&buf);
}

fn write_f32(out: &mut Vec<u8>, value: f32) {
    let mut buf = [0u8; 4];
    LittleEndian::write_f32(&mut buf, value);
    out.extend_from_slice(&buf);
}

fn write_fade(out: &mut Vec<u8>, fade: &FadeSnapshot) {
    write_f32(out, fade.weight);
    write_f32(out, fade.fading_speed);
}

#[derive(Clone, Debug)]
struct BinaryInput<'a> {
    bytes: &'a [u8],
    cursor: usize,
}

impl<'a> BinaryInput<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, cursor: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.cursor)
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Error> {
        if self.remaining() < len {
            return Err(Error::SnapshotDecode {
                message: "unexpected EOF".to_string(),
            });
        }
        let bytes = &self.bytes[self.cursor..self.cursor + len];
        self.cursor += len;
        Ok(bytes)
    }

    fn read_u16(&mut self) -> Result<u16, Error> {
        Ok(LittleEndian::read_u16(self.read_bytes(2)?))
    }

    fn read_u32(&mut self) -> Result<u32, Error> {
        Ok(LittleEndian::read_u32(self.read_bytes(4)?))
    }

    fn read_u64(&mut self) -> Result<u64, Error> {
        Ok(LittleEndian::read_u64(self.read_bytes(8)?))
    }

    fn read_f32(&mut self) -> Result<f32, Error> {
        Ok(LittleEndian::read_f32(self.read_bytes(4)?))
    }

    fn read_finite_f32(&mut self) -> Result<f32, Error> {
        let value = self.read_f32()?;
        if !value.is_finite() {
            return Err(Error::SnapshotDecode {
                message: format!("non-finite value {value} at byte {}", self.cursor - 4),
            });
        }
        Ok(value)
    }

    fn read_fade(&mut self) -> Result<FadeSnapshot, Error> {
        Ok(FadeSnapshot {
            weight: self.read_finite_f32()?,
            fading_speed: self.read_finite_f32()?,
        })
    }

    /// Reads an element count and rejects counts the remaining input cannot hold.
    fn read_count(&mut self, min_element_size: usize) -> Result<usize, Error> {
        let count = self.read_u32()? as usize;
        if count.saturating_mul(min_element_size) > self.remaining() {
            return Err(Error::SnapshotDecode {
                message: format!("count {count} exceeds remaining input"),
            });
        }
        Ok(count)
    }
}
