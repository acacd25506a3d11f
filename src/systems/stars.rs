use std::f32::consts::TAU;

use bevy_ecs::prelude::*;
use rand::Rng;

use crate::config::StarFieldConfig;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Star {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub size: f32,
}

#[derive(Resource, Debug, Default)]
pub struct StarField {
    pub stars: Vec<Star>,
}

impl StarField {
    /// Scatters stars through a shell of `depth` just inside
    /// `radius + depth`, drifting inward as the index grows so the hue
    /// ramp wraps around the sky.
    pub fn generate<R: Rng + ?Sized>(config: &StarFieldConfig, rng: &mut R) -> Self {
        let mut stars = Vec::with_capacity(config.count);
        let mut r = config.radius + config.depth;
        let increment = if config.count == 0 {
            0.0
        } else {
            config.depth / config.count as f32
        };

        for i in 0..config.count {
            r -= increment * rng.gen::<f32>();
            let polar = (1.0 - rng.gen::<f32>() * 2.0).acos();
            let azimuth = rng.gen::<f32>() * TAU;
            // three.js Spherical: polar from +Y, azimuth from +Z toward +X
            let position = [
                r * polar.sin() * azimuth.sin(),
                r * polar.cos(),
                r * polar.sin() * azimuth.cos(),
            ];
            let color = hsl_to_rgb(i as f32 / config.count as f32, config.saturation, 0.9);
            let size = (0.5 + 0.5 * rng.gen::<f32>()) * config.factor;
            stars.push(Star {
                position,
                color,
                size,
            });
        }

        tracing::debug!(count = stars.len(), "generated star field");
        Self { stars }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.stars)
    }
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s <= 0.0 {
        return [l, l, l];
    }
    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn small_field(seed: u64) -> StarField {
        let config = StarFieldConfig {
            count: 400,
            ..StarFieldConfig::default()
        };
        StarField::generate(&config, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn stars_stay_inside_the_shell() {
        let field = small_field(1);
        assert_eq!(field.stars.len(), 400);
        for star in &field.stars {
            let [x, y, z] = star.position;
            let r = (x * x + y * y + z * z).sqrt();
            assert!((100.0 - 1e-3..=150.0 + 1e-3).contains(&r), "radius {r}");
            assert!((2.0..=4.0).contains(&star.size), "size {}", star.size);
        }
    }

    #[test]
    fn radius_never_grows_with_index() {
        let field = small_field(2);
        let radii: Vec<f32> = field
            .stars
            .iter()
            .map(|s| {
                let [x, y, z] = s.position;
                (x * x + y * y + z * z).sqrt()
            })
            .collect();
        for pair in radii.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-3);
        }
    }

    #[test]
    fn same_seed_same_sky() {
        assert_eq!(small_field(42).stars, small_field(42).stars);
        assert_ne!(small_field(42).stars, small_field(43).stars);
    }

    #[test]
    fn empty_field_is_fine() {
        let config = StarFieldConfig {
            count: 0,
            ..StarFieldConfig::default()
        };
        let field = StarField::generate(&config, &mut StdRng::seed_from_u64(0));
        assert!(field.stars.is_empty());
        assert!(field.as_bytes().is_empty());
    }

    #[test]
    fn vertex_layout_is_packed() {
        assert_eq!(std::mem::size_of::<Star>(), 7 * 4);
        assert_eq!(small_field(3).as_bytes().len(), 400 * 28);
    }

    #[test]
    fn hsl_matches_known_colors() {
        let red = hsl_to_rgb(0.0, 1.0, 0.5);
        assert_abs_diff_eq!(red[0], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(red[1], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(red[2], 0.0, epsilon = 1e-6);
        assert_eq!(hsl_to_rgb(0.3, 0.0, 0.9), [0.9, 0.9, 0.9]);
    }
}
