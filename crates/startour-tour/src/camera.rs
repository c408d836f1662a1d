//! Camera pose math (f64, forward = -Z, up = +Y)

use glam::{DMat3, DQuat, DVec3};

/// Camera position and orientation in render space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: DVec3,
    pub orientation: DQuat,
}

impl CameraPose {
    pub fn new(position: DVec3, orientation: DQuat) -> Self {
        Self { position, orientation }
    }

    /// At `position`, looking down -Z
    pub fn at(position: DVec3) -> Self {
        Self::new(position, DQuat::IDENTITY)
    }

    /// Forward direction
    pub fn forward(&self) -> DVec3 {
        self.orientation * DVec3::NEG_Z
    }

    /// Up direction
    pub fn up(&self) -> DVec3 {
        self.orientation * DVec3::Y
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::at(DVec3::ZERO)
    }
}

/// Rotation that points the camera's forward axis along `direction`.
///
/// Keeps +Y as up where possible; looking straight up or down uses +Z as the
/// reference instead. Returns `None` for a zero-length direction.
pub fn look_rotation(direction: DVec3) -> Option<DQuat> {
    let forward = direction.try_normalize()?;

    let mut right = forward.cross(DVec3::Y);
    if right.length_squared() < 1e-12 {
        right = forward.cross(DVec3::Z);
    }
    let right = right.normalize();
    let up = right.cross(forward);

    Some(DQuat::from_mat3(&DMat3::from_cols(right, up, -forward)).normalize())
}
