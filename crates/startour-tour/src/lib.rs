//! Camera tour over the visible star set
//!
//! A host renderer owns the real camera; this crate only computes where it
//! should be. Drive [`CameraTour::tick`] from whatever clock the host has and
//! copy [`CameraTour::pose`] onto the camera.

pub mod camera;
pub mod tour;

pub use camera::{look_rotation, CameraPose};
pub use tour::{CameraTour, TourError, TourEvent, TourState, TourTiming, MAX_TOUR_TICKS};
