use crate::math::Vec3;
use crate::scene::config::ShapeConfig;
use crate::scene::MorphState;

const EPSILON: f32 = 1e-6;

/// A ray in scene space
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction.scale(t)
    }
}

/// Invisible shape that catches pointer events for the foliage
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    /// Centered at the origin
    Sphere { radius: f32 },
    /// Upright, base at `-height / 2`, apex at `+height / 2`
    Cone { radius: f32, height: f32 },
}

impl Collider {
    /// Collider for the arrangement the scene is heading to
    pub fn for_state(state: MorphState, shape: &ShapeConfig, scale: f32) -> Self {
        match state {
            MorphState::TreeShape => Collider::Cone {
                radius: shape.tree_radius * scale,
                height: shape.tree_height * scale,
            },
            MorphState::Scattered => Collider::Sphere {
                radius: shape.scatter_radius * scale,
            },
        }
    }

    /// Nearest hit distance in front of the ray origin
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match *self {
            Collider::Sphere { radius } => ray_sphere_intersect(ray, Vec3::ZERO, radius),
            Collider::Cone { radius, height } => ray_cone_intersect(ray, radius, height),
        }
    }

    /// Nearest hit point in front of the ray origin
    pub fn hit_point(&self, ray: &Ray) -> Option<Vec3> {
        self.intersect(ray).map(|t| ray.at(t))
    }
}

/// Ray-sphere intersection test
fn ray_sphere_intersect(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;

    let a = ray.direction.dot(&ray.direction);
    let b = 2.0 * oc.dot(&ray.direction);
    let c = oc.dot(&oc) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;

    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);

    if t > 0.0 {
        Some(t)
    } else {
        let t2 = (-b + discriminant.sqrt()) / (2.0 * a);
        if t2 > 0.0 {
            Some(t2)
        } else {
            None
        }
    }
}

/// Ray against a solid upright cone: lateral surface plus base cap
fn ray_cone_intersect(ray: &Ray, radius: f32, height: f32) -> Option<f32> {
    let o = ray.origin;
    let d = ray.direction;
    let half = height / 2.0;
    let k = radius / height;
    let k2 = k * k;

    // Lateral surface: x^2 + z^2 = (k * (half - y))^2
    let q0 = half - o.y;
    let a = d.x * d.x + d.z * d.z - k2 * d.y * d.y;
    let b = 2.0 * (o.x * d.x + o.z * d.z + k2 * q0 * d.y);
    let c = o.x * o.x + o.z * o.z - k2 * q0 * q0;

    let mut roots = [f32::NAN; 2];
    if a.abs() < EPSILON {
        if b.abs() > EPSILON {
            roots[0] = -c / b;
        }
    } else {
        let discriminant = b * b - 4.0 * a * c;
        if discriminant >= 0.0 {
            let sq = discriminant.sqrt();
            roots[0] = (-b - sq) / (2.0 * a);
            roots[1] = (-b + sq) / (2.0 * a);
        }
    }

    let mut best: Option<f32> = None;
    let mut consider = |t: f32| {
        if t > EPSILON && best.map_or(true, |current| t < current) {
            best = Some(t);
        }
    };

    for t in roots {
        if t.is_nan() {
            continue;
        }
        let y = o.y + d.y * t;
        // Rejects the mirrored upper nappe
        if y >= -half && y <= half {
            consider(t);
        }
    }

    if d.y.abs() > EPSILON {
        let t = (-half - o.y) / d.y;
        let p = ray.at(t);
        if p.horizontal_length() <= radius {
            consider(t);
        }
    }

    best
}
