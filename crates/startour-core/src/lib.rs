//! Shared geometry, constants and color bands for the star tour

pub mod color;
pub mod constants;
pub mod coordinates;


pub use color::StarColor;
pub use coordinates::CatalogPosition;
