//! Authoring and wire format versions.

/// Major version of the authoring (JSON) format. Any minor version of it is accepted.
pub const AUTHORING_FORMAT_MAJOR: u32 = 1;

/// Version written into encoded snapshots.
pub const SNAPSHOT_FORMAT_VERSION: u16 = 1;
