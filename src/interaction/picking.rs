use crate::math::{Vec3, Mat4};
use super::collider::Ray;

/// Build a world-space ray through a screen pixel
pub fn screen_ray(
    screen_x: f32,
    screen_y: f32,
    screen_width: f32,
    screen_height: f32,
    view: &Mat4,
    projection: &Mat4,
    camera_pos: Vec3,
) -> Ray {
    // Convert screen to normalized device coordinates
    let ndc_x = (2.0 * screen_x / screen_width) - 1.0;
    let ndc_y = 1.0 - (2.0 * screen_y / screen_height);

    let inv_proj = invert_perspective(projection);
    let inv_view = invert_view(view);

    // To view space, looking down -Z
    let ray_view = inv_proj.transform_point(Vec3::new(ndc_x, ndc_y, -1.0));
    let ray_view = Vec3::new(ray_view.x, ray_view.y, -1.0);

    Ray {
        origin: camera_pos,
        direction: inv_view.transform_direction(ray_view).normalize(),
    }
}

/// Inverse of a perspective matrix built by `Mat4::perspective`
fn invert_perspective(m: &Mat4) -> Mat4 {
    let a = m.data[0];
    let b = m.data[5];
    let c = m.data[10];
    let d = m.data[14];
    let e = m.data[11];

    let mut inv = Mat4::identity();
    inv.data[0] = 1.0 / a;
    inv.data[5] = 1.0 / b;
    inv.data[10] = 0.0;
    inv.data[11] = 1.0 / d;
    inv.data[14] = 1.0 / e;
    inv.data[15] = -c / (d * e);

    inv
}

/// Inverse of an orthonormal view matrix (rotation + translation)
fn invert_view(m: &Mat4) -> Mat4 {
    let mut inv = Mat4::identity();

    // Transpose rotation part
    inv.data[0] = m.data[0];
    inv.data[1] = m.data[4];
    inv.data[2] = m.data[8];

    inv.data[4] = m.data[1];
    inv.data[5] = m.data[5];
    inv.data[6] = m.data[9];

    inv.data[8] = m.data[2];
    inv.data[9] = m.data[6];
    inv.data[10] = m.data[10];

    let tx = m.data[12];
    let ty = m.data[13];
    let tz = m.data[14];

    inv.data[12] = -(inv.data[0] * tx + inv.data[4] * ty + inv.data[8] * tz);
    inv.data[13] = -(inv.data[1] * tx + inv.data[5] * ty + inv.data[9] * tz);
    inv.data[14] = -(inv.data[2] * tx + inv.data[6] * ty + inv.data[10] * tz);

    inv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_pixel_looks_at_target() {
        let eye = Vec3::new(0.0, 2.0, 22.0);
        let target = Vec3::ZERO;
        let view = Mat4::look_at(eye, target, Vec3::UP);
        let projection = Mat4::perspective(45f32.to_radians(), 1.5, 0.1, 100.0);

        let ray = screen_ray(300.0, 200.0, 600.0, 400.0, &view, &projection, eye);
        let expected = (target - eye).normalize();
        assert!(ray.direction.distance(&expected) < 1e-4);
        assert_eq!(ray.origin, eye);
    }

    #[test]
    fn test_left_pixel_points_left() {
        let eye = Vec3::new(0.0, 0.0, 10.0);
        let view = Mat4::look_at(eye, Vec3::ZERO, Vec3::UP);
        let projection = Mat4::perspective(45f32.to_radians(), 1.0, 0.1, 100.0);

        let ray = screen_ray(0.0, 50.0, 100.0, 100.0, &view, &projection, eye);
        assert!(ray.direction.x < 0.0);
        assert!((ray.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_invert_view_round_trip() {
        let view = Mat4::look_at(Vec3::new(3.0, 4.0, 5.0), Vec3::ZERO, Vec3::UP);
        let p = Vec3::new(1.0, -2.0, 0.5);
        let back = invert_view(&view).transform_point(view.transform_point(p));
        assert!(back.distance(&p) < 1e-4);
    }
}
