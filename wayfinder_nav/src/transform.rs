// Floor-plan pixel to world-space transform.
//
// The graph is authored on a floor-plan image, so node positions are pixel
// coordinates. The AR host works in meters on a ground plane whose origin is
// the image center. The transform is a pure scale-and-shift; it never runs at
// load time; the graph keeps raw pixels, and waypoint positions are mapped on
// demand by the navigator.
//
// NaN/Inf inputs propagate unchanged; sanitizing them is the caller's job.

use crate::types::{PixelCoord, WorldPos};
use serde::{Deserialize, Serialize};

/// Map a floor-plan pixel to a ground-plane world position (y = 0).
///
/// `world.x = (pixel.x - width/2) * scale`, `world.z = (pixel.y - height/2) * scale`.
/// Any vertical offset (e.g. marker height) is added by the caller.
pub fn pixel_to_world(pixel: PixelCoord, image_size: (f64, f64), scale_m_per_pixel: f64) -> WorldPos {
    let (width, height) = image_size;
    WorldPos {
        x: (pixel.x - width / 2.0) * scale_m_per_pixel,
        y: 0.0,
        z: (pixel.y - height / 2.0) * scale_m_per_pixel,
    }
}

/// The parameters of one floor's pixel-to-world transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    /// Floor-plan image size in pixels (width, height).
    pub image_size: (f64, f64),
    /// Meters per pixel.
    pub scale_m_per_pixel: f64,
}

impl FloorPlan {
    pub fn new(image_size: (f64, f64), scale_m_per_pixel: f64) -> Self {
        Self {
            image_size,
            scale_m_per_pixel,
        }
    }

    pub fn to_world(&self, pixel: PixelCoord) -> WorldPos {
        pixel_to_world(pixel, self.image_size, self.scale_m_per_pixel)
    }
}
