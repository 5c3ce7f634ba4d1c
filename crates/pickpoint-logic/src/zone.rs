//! Exploration support: capability check and the work-start marker.
//!
//! The 3D scene itself lives outside this crate. All the rules care about is
//! whether exploration is possible at all and whether the player avatar is
//! standing on the marker that starts a shift. Distances are planar (x, z);
//! height is ignored.

use serde::{Deserialize, Serialize};

use crate::constants::zone;

/// What the client reported about its rendering environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneSupport {
    pub webgl: bool,
    pub mobile: bool,
}

impl SceneSupport {
    /// A desktop client with WebGL.
    pub const FULL: SceneSupport = SceneSupport {
        webgl: true,
        mobile: false,
    };

    /// Exploration needs WebGL and is disabled on mobile devices.
    pub fn supports_exploration(self) -> bool {
        self.webgl && !self.mobile
    }
}

impl Default for SceneSupport {
    fn default() -> Self {
        Self::FULL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Where the avatar appears after character selection.
    pub fn spawn() -> Self {
        let (x, y, z) = zone::SPAWN;
        Self { x, y, z }
    }
}

/// Keep a position on the walkable grounds.
pub fn clamp_to_grounds(pos: Position) -> Position {
    let e = zone::GROUNDS_HALF_EXTENT;
    Position {
        x: pos.x.clamp(-e, e),
        y: pos.y,
        z: pos.z.clamp(-e, e),
    }
}

pub fn distance_to_work_zone(pos: Position) -> f32 {
    let dx = pos.x - zone::WORK_ZONE_X;
    let dz = pos.z - zone::WORK_ZONE_Z;
    (dx * dx + dz * dz).sqrt()
}

/// True when the avatar may trigger the start of a shift.
pub fn in_work_zone(pos: Position) -> bool {
    distance_to_work_zone(pos) < zone::WORK_ZONE_RADIUS
}
