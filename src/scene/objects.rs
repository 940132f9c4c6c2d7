use super::catalog::CatalogItem;
use super::constants::*;
use super::material::{rgb_from_hex, Material};
use glam::{Mat3, Mat4, Quat, Vec3};
use rand::Rng;

/// Identifies a ball within the catalog load that created it.
///
/// Ids from a replaced batch never resolve again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId {
    pub batch: u32,
    pub index: u32,
}

/// Breathing animation applied to the selected ball.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
    pub speed: f32,
    pub intensity: f32,
    pub time: f32,
}

impl Pulse {
    pub fn start() -> Self {
        Self {
            speed: PULSE_SPEED,
            intensity: PULSE_INTENSITY,
            time: 0.0,
        }
    }

    /// Step one frame and return the emissive intensity to apply.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.time += self.speed;
        self.time.sin() * self.intensity + PULSE_BASELINE
    }
}

/// Uniform scale that accompanies a pulse intensity.
#[inline]
pub fn pulse_scale(intensity: f32) -> f32 {
    1.0 + (intensity - PULSE_BASELINE) * PULSE_SCALE_GAIN
}

#[derive(Clone, Debug, PartialEq)]
pub enum ObjectVisualState {
    Base,
    Highlighted { material: Material, pulse: Pulse },
}

/// A camera-facing disc bound to one catalog item.
#[derive(Clone, Debug)]
pub struct VisualObject {
    pub id: ObjectId,
    pub item: CatalogItem,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
    pub base_material: Material,
    pub original_emissive_intensity: f32,
    pub highlight_color: Vec3,
    pub state: ObjectVisualState,
    pub render_order: i32,
}

impl VisualObject {
    pub fn new(id: ObjectId, item: CatalogItem, position: Vec3) -> Self {
        let base_material = Material::base(item.kind);
        let original_emissive_intensity = base_material.emissive_intensity;
        let highlight_color = rgb_from_hex(item.kind.highlight_hex());
        Self {
            id,
            item,
            position,
            rotation: Quat::IDENTITY,
            scale: 1.0,
            base_material,
            original_emissive_intensity,
            highlight_color,
            state: ObjectVisualState::Base,
            render_order: BALL_RENDER_ORDER,
        }
    }

    /// The material currently drawn.
    pub fn material(&self) -> &Material {
        match &self.state {
            ObjectVisualState::Base => &self.base_material,
            ObjectVisualState::Highlighted { material, .. } => material,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        matches!(self.state, ObjectVisualState::Highlighted { .. })
    }

    /// Replace the drawn material with a fresh highlight and restart the pulse.
    pub fn highlight(&mut self) {
        self.state = ObjectVisualState::Highlighted {
            material: Material::highlight(self.highlight_color),
            pulse: Pulse::start(),
        };
    }

    /// Drop any highlight and put the base material and size back as they were loaded.
    pub fn restore(&mut self) {
        self.state = ObjectVisualState::Base;
        self.base_material.emissive_intensity = self.original_emissive_intensity;
        self.scale = 1.0;
    }

    /// Advance the pulse of a highlighted ball; returns the applied intensity.
    pub fn advance_pulse(&mut self) -> Option<f32> {
        match &mut self.state {
            ObjectVisualState::Highlighted { material, pulse } => {
                let intensity = pulse.advance();
                material.emissive_intensity = intensity;
                self.scale = pulse_scale(intensity);
                Some(intensity)
            }
            ObjectVisualState::Base => None,
        }
    }

    /// Turn the disc so its +Z normal points at `eye`.
    pub fn face(&mut self, eye: Vec3) {
        self.rotation = look_at_rotation(self.position, eye);
    }

    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale * BALL_RADIUS),
            self.rotation,
            self.position,
        )
    }
}

/// Rotation taking local +Z towards `target`, keeping +Y as close to world up as possible.
pub fn look_at_rotation(from: Vec3, target: Vec3) -> Quat {
    let z = target - from;
    if z.length_squared() < 1e-12 {
        return Quat::IDENTITY;
    }
    let z = z.normalize();
    let mut x = Vec3::Y.cross(z);
    if x.length_squared() < 1e-12 {
        // looking straight up or down
        x = Vec3::Z.cross(z);
        if x.length_squared() < 1e-12 {
            x = Vec3::X;
        }
    }
    let x = x.normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

/// Random spawn point inside the ball volume.
pub fn random_ball_position<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * BALL_SPREAD_X,
        rng.gen::<f32>() * BALL_Y_SPAN + BALL_Y_MIN,
        (rng.gen::<f32>() - 0.5) * BALL_SPREAD_Z,
    )
}

/// The live set of balls. Replaced wholesale on every catalog load.
#[derive(Default)]
pub struct ObjectSet {
    batch: u32,
    objects: Vec<VisualObject>,
}

impl ObjectSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tear down the current balls and build one per item.
    pub fn replace<'a, R, I>(&mut self, items: I, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a CatalogItem>,
    {
        self.clear();
        self.batch = self.batch.wrapping_add(1);
        let batch = self.batch;
        self.objects = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let id = ObjectId {
                    batch,
                    index: i as u32,
                };
                VisualObject::new(id, item.clone(), random_ball_position(rng))
            })
            .collect();
        self.objects.len()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    #[inline]
    pub fn batch(&self) -> u32 {
        self.batch
    }

    pub fn get(&self, id: ObjectId) -> Option<&VisualObject> {
        if id.batch != self.batch {
            return None;
        }
        self.objects.get(id.index as usize)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut VisualObject> {
        if id.batch != self.batch {
            return None;
        }
        self.objects.get_mut(id.index as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VisualObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut VisualObject> {
        self.objects.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
