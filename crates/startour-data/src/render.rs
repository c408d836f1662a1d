//! Hand-off to an external renderer

use crate::stars::StarRecord;

/// Per-star instance data for a GPU instance buffer
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderStar {
    /// Render-space position
    pub position: [f32; 3],
    pub _pad0: f32,
    /// Linear RGBA of the star's color band
    pub color: [f32; 4],
}

impl RenderStar {
    pub fn from_record(star: &StarRecord) -> Self {
        Self {
            position: star.position.to_vec3().to_array(),
            _pad0: 0.0,
            color: star.color.rgba(),
        }
    }
}

/// Instances for the visible set, closest first
pub fn render_instances(visible: &[StarRecord]) -> Vec<RenderStar> {
    visible.iter().map(RenderStar::from_record).collect()
}

/// Raw bytes of an instance slice, ready for upload
pub fn instance_bytes(instances: &[RenderStar]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
