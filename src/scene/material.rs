use super::catalog::GrapeType;
use super::constants::*;
use glam::Vec3;

/// Unpack a `0xRRGGBB` colour into sRGB components in \[0, 1\].
#[inline]
pub fn rgb_from_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// Convert an sRGB colour to linear space for shading.
#[inline]
pub fn srgb_to_linear(c: Vec3) -> Vec3 {
    let f = |v: f32| {
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    };
    Vec3::new(f(c.x), f(c.y), f(c.z))
}

/// Physically-flavoured surface description of a ball.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
    /// Preview texture to modulate `color` with, if any.
    pub map: Option<GrapeType>,
}

impl Material {
    /// Textured base material for a ball of the given type.
    pub fn base(kind: GrapeType) -> Self {
        Self {
            color: Vec3::ONE,
            emissive: rgb_from_hex(kind.emissive_hex()),
            emissive_intensity: BASE_EMISSIVE_INTENSITY,
            roughness: 0.0,
            metalness: 0.0,
            opacity: 1.0,
            map: Some(kind),
        }
    }

    /// Untextured glowing material used while a ball is selected.
    pub fn highlight(color: Vec3) -> Self {
        Self {
            color,
            emissive: color,
            emissive_intensity: HIGHLIGHT_EMISSIVE_INTENSITY,
            roughness: HIGHLIGHT_ROUGHNESS,
            metalness: HIGHLIGHT_METALNESS,
            opacity: 1.0,
            map: None,
        }
    }
}
