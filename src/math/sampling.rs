//! Random point samplers used to seed scatter and tree positions
//!
//! Both samplers are uniform by volume: the cone uses a square-root radial
//! transform over each disk cross-section and the sphere a cube-root radial
//! transform with an area-uniform direction.

use std::f32::consts::TAU;

use rand::Rng;

use super::Vec3;

/// Sample a point inside an upright cone with its base at `-height / 2`
/// and its apex at `+height / 2`.
pub fn sample_cone<R: Rng + ?Sized>(rng: &mut R, radius: f32, height: f32) -> Vec3 {
    // Height measured from the base
    let y = rng.gen::<f32>() * height;
    let radius_at_height = radius * (1.0 - y / height);

    let theta = rng.gen::<f32>() * TAU;
    let r = rng.gen::<f32>().sqrt() * radius_at_height;

    Vec3::new(r * theta.cos(), y - height / 2.0, r * theta.sin())
}

/// Sample a point inside a sphere of the given radius centered at the origin
pub fn sample_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = TAU * rng.gen::<f32>();
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
    let r = rng.gen::<f32>().cbrt() * radius;

    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Cone radius at a centered height `y`, before any radial adjustment
pub fn cone_radius_at(radius: f32, height: f32, y: f32) -> f32 {
    radius * (1.0 - (y + height / 2.0) / height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SAMPLES: usize = 20_000;

    #[test]
    fn test_sphere_points_inside_radius() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..SAMPLES {
            let p = sample_sphere(&mut rng, 25.0);
            assert!(p.length() <= 25.0 + 1e-3, "point {:?} outside sphere", p);
        }
    }

    #[test]
    fn test_sphere_is_volume_uniform() {
        let mut rng = StdRng::seed_from_u64(11);
        let radius = 10.0;
        let mut inner = 0usize;
        let mut total_r = 0.0f64;

        for _ in 0..SAMPLES {
            let r = sample_sphere(&mut rng, radius).length();
            if r < radius / 2.0 {
                inner += 1;
            }
            total_r += r as f64;
        }

        // Inner half-radius ball holds 1/8 of the volume
        let inner_fraction = inner as f32 / SAMPLES as f32;
        assert!((inner_fraction - 0.125).abs() < 0.02, "inner fraction {}", inner_fraction);

        // Mean radius under r^2 density is 3R/4
        let mean_r = (total_r / SAMPLES as f64) as f32;
        assert!((mean_r - 7.5).abs() < 0.15, "mean radius {}", mean_r);
    }

    #[test]
    fn test_sphere_directions_not_pole_clustered() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut near_poles = 0usize;

        for _ in 0..SAMPLES {
            let p = sample_sphere(&mut rng, 1.0).normalize();
            if p.z.abs() > 0.9 {
                near_poles += 1;
            }
        }

        // |cos(phi)| > 0.9 covers 10% of the sphere surface
        let fraction = near_poles as f32 / SAMPLES as f32;
        assert!((fraction - 0.1).abs() < 0.02, "pole fraction {}", fraction);
    }

    #[test]
    fn test_cone_points_within_tapered_radius() {
        let mut rng = StdRng::seed_from_u64(5);
        let (radius, height) = (5.0, 12.0);

        for _ in 0..SAMPLES {
            let p = sample_cone(&mut rng, radius, height);
            assert!(p.y >= -height / 2.0 && p.y <= height / 2.0, "y out of range: {}", p.y);
            let limit = cone_radius_at(radius, height, p.y);
            assert!(p.horizontal_length() <= limit + 1e-3, "point {:?} outside cone", p);
        }
    }

    #[test]
    fn test_cone_cross_section_uniform() {
        let mut rng = StdRng::seed_from_u64(13);
        let (radius, height) = (5.0, 12.0);
        let mut inner = 0usize;

        for _ in 0..SAMPLES {
            let p = sample_cone(&mut rng, radius, height);
            let limit = cone_radius_at(radius, height, p.y);
            if p.horizontal_length() < limit / std::f32::consts::SQRT_2 {
                inner += 1;
            }
        }

        // The inner disk of radius r/sqrt(2) covers half the cross-section area
        let fraction = inner as f32 / SAMPLES as f32;
        assert!((fraction - 0.5).abs() < 0.02, "inner fraction {}", fraction);
    }

    #[test]
    fn test_cone_heights_uniform() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut below_center = 0usize;
        for _ in 0..SAMPLES {
            if sample_cone(&mut rng, 5.0, 12.0).y < 0.0 {
                below_center += 1;
            }
        }
        let fraction = below_center as f32 / SAMPLES as f32;
        assert!((fraction - 0.5).abs() < 0.02);
    }
}
