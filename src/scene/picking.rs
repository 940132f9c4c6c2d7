use super::camera::PerspectiveCamera;
use super::constants::BALL_RADIUS;
use super::objects::{ObjectId, VisualObject};
use glam::{Vec2, Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

/// Map a pointer position in CSS pixels to normalized device coordinates.
#[inline]
pub fn screen_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(x / width * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}

/// World-space ray from the camera eye through an NDC point.
pub fn ray_from_ndc(camera: &PerspectiveCamera, ndc: Vec2) -> Ray {
    let inv = camera.view_projection().inverse();
    let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
    let far: Vec3 = far.truncate() / far.w;
    Ray {
        origin: camera.eye,
        dir: (far - camera.eye).normalize_or_zero(),
    }
}

/// Distance along `ray` to a flat disc, if it is hit from either side.
#[inline]
pub fn ray_disc(ray: &Ray, center: Vec3, normal: Vec3, radius: f32) -> Option<f32> {
    let denom = normal.dot(ray.dir);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = (center - ray.origin).dot(normal) / denom;
    if t < 0.0 {
        return None;
    }
    let hit = ray.origin + ray.dir * t;
    ((hit - center).length_squared() <= radius * radius).then_some(t)
}

/// Nearest ball hit by `ray`, ties resolved to the first one found.
pub fn pick_nearest<'a, I>(ray: &Ray, objects: I) -> Option<ObjectId>
where
    I: IntoIterator<Item = &'a VisualObject>,
{
    let mut best = None::<(ObjectId, f32)>;
    for obj in objects {
        if let Some(t) = ray_disc(ray, obj.position, obj.normal(), BALL_RADIUS * obj.scale) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((obj.id, t)),
            }
        }
    }
    best.map(|(id, _)| id)
}
