use serde::Deserialize;

use crate::error::{SceneError, SceneResult};
use crate::math::Vec3;
use crate::ornaments::Category;

/// Dimensions of the two target shapes
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    pub tree_height: f32,
    pub tree_radius: f32,
    pub scatter_radius: f32,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            tree_height: 12.0,
            tree_radius: 5.0,
            scatter_radius: 25.0,
        }
    }
}

/// Per-category ornament population
#[derive(Debug, Clone, Copy)]
pub struct CategoryConfig {
    pub count: usize,
    /// Higher = lighter, floatier, lags more during the morph
    pub weight: f32,
    pub base_scale: f32,
}

/// YAML form of a category; each omitted field keeps that category's default
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CategoryOverride {
    count: Option<usize>,
    weight: Option<f32>,
    base_scale: Option<f32>,
}

impl CategoryOverride {
    fn apply(self, base: CategoryConfig) -> CategoryConfig {
        CategoryConfig {
            count: self.count.unwrap_or(base.count),
            weight: self.weight.unwrap_or(base.weight),
            base_scale: self.base_scale.unwrap_or(base.base_scale),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OrnamentsOverride {
    gifts: CategoryOverride,
    baubles: CategoryOverride,
    lights: CategoryOverride,
    smoothing_rate: Option<f32>,
}

impl From<OrnamentsOverride> for OrnamentsConfig {
    fn from(o: OrnamentsOverride) -> Self {
        let base = OrnamentsConfig::default();
        Self {
            gifts: o.gifts.apply(base.gifts),
            baubles: o.baubles.apply(base.baubles),
            lights: o.lights.apply(base.lights),
            smoothing_rate: o.smoothing_rate.unwrap_or(base.smoothing_rate),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(from = "OrnamentsOverride")]
pub struct OrnamentsConfig {
    pub gifts: CategoryConfig,
    pub baubles: CategoryConfig,
    pub lights: CategoryConfig,
    /// Progress smoothing rate in 1/s
    pub smoothing_rate: f32,
}

impl Default for OrnamentsConfig {
    fn default() -> Self {
        Self {
            gifts: CategoryConfig { count: 40, weight: 0.3, base_scale: 0.5 },
            baubles: CategoryConfig { count: 250, weight: 1.0, base_scale: 0.25 },
            lights: CategoryConfig { count: 150, weight: 2.5, base_scale: 0.12 },
            smoothing_rate: 2.0,
        }
    }
}

impl OrnamentsConfig {
    pub fn category(&self, category: Category) -> &CategoryConfig {
        match category {
            Category::Gifts => &self.gifts,
            Category::Baubles => &self.baubles,
            Category::Lights => &self.lights,
        }
    }
}

/// Dense point-cloud foliage and its pointer interaction
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct FoliageConfig {
    pub count: usize,
    pub smoothing_rate: f32,
    /// Progress snaps to its target inside this gap
    pub snap_epsilon: f32,
    /// How fast the shader's pointer follows the recorded pointer, in 1/s
    pub pointer_follow_rate: f32,
    pub interaction_radius: f32,
    pub push_distance: f32,
    /// Scale of the invisible pointer collider relative to the shape
    pub collider_scale: f32,
    /// Pointer position used when no pointer is over the scene
    pub pointer_sentinel: Vec3,
}

impl Default for FoliageConfig {
    fn default() -> Self {
        Self {
            count: 15_000,
            smoothing_rate: 2.0,
            snap_epsilon: 0.001,
            pointer_follow_rate: 10.0,
            interaction_radius: 4.0,
            push_distance: 1.5,
            collider_scale: 1.2,
            pointer_sentinel: Vec3::splat(9999.0),
        }
    }
}

/// Complete build-time configuration of the scene
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub shape: ShapeConfig,
    pub ornaments: OrnamentsConfig,
    pub foliage: FoliageConfig,
}

impl SceneConfig {
    /// Parse overrides from YAML; omitted fields, including single fields
    /// of a category, keep their defaults
    pub fn from_yaml(yaml: &str) -> SceneResult<Self> {
        let config: SceneConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SceneResult<()> {
        let shape = &self.shape;
        for (name, value) in [
            ("tree_height", shape.tree_height),
            ("tree_radius", shape.tree_radius),
            ("scatter_radius", shape.scatter_radius),
        ] {
            require(name, value, |v| v > 0.0, "must be positive")?;
        }

        for category in Category::ALL {
            let c = self.ornaments.category(category);
            require(category.name(), c.weight, |v| v >= 0.0, "weight must be non-negative")?;
            require(category.name(), c.base_scale, |v| v > 0.0, "base scale must be positive")?;
        }

        let foliage = &self.foliage;
        for (name, value) in [
            ("ornaments.smoothing_rate", self.ornaments.smoothing_rate),
            ("foliage.smoothing_rate", foliage.smoothing_rate),
            ("pointer_follow_rate", foliage.pointer_follow_rate),
            ("interaction_radius", foliage.interaction_radius),
            ("collider_scale", foliage.collider_scale),
        ] {
            require(name, value, |v| v > 0.0, "must be positive")?;
        }
        require("push_distance", foliage.push_distance, |v| v >= 0.0, "must be non-negative")?;
        // A gap of 1 or more would snap the whole transition in one frame
        require("snap_epsilon", foliage.snap_epsilon, |v| (0.0..1.0).contains(&v), "must be in [0, 1)")?;

        let sentinel = foliage.pointer_sentinel;
        if !(sentinel.x.is_finite() && sentinel.y.is_finite() && sentinel.z.is_finite()) {
            return Err(SceneError::InvalidConfig(
                "pointer_sentinel must be finite".to_string(),
            ));
        }

        Ok(())
    }
}

/// Reject non-finite values and values failing `check`
fn require(name: &str, value: f32, check: impl Fn(f32) -> bool, rule: &str) -> SceneResult<()> {
    if value.is_finite() && check(value) {
        Ok(())
    } else {
        Err(SceneError::InvalidConfig(format!("{}: {} ({})", name, rule, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SceneConfig::default();
        assert_eq!(config.shape.tree_height, 12.0);
        assert_eq!(config.ornaments.baubles.count, 250);
        assert_eq!(config.ornaments.lights.weight, 2.5);
        assert_eq!(config.foliage.count, 15_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
shape:
  tree_height: 10.0
foliage:
  count: 500
"#;
        let config = SceneConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.shape.tree_height, 10.0);
        assert_eq!(config.shape.tree_radius, 5.0);
        assert_eq!(config.foliage.count, 500);
        assert_eq!(config.foliage.interaction_radius, 4.0);
        assert_eq!(config.ornaments.gifts.count, 40);
    }

    #[test]
    fn test_category_override() {
        let yaml = r#"
ornaments:
  gifts: { count: 4, weight: 0.5, base_scale: 1.0 }
"#;
        let config = SceneConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.ornaments.category(Category::Gifts).count, 4);
        assert_eq!(config.ornaments.category(Category::Lights).count, 150);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            SceneConfig::from_yaml("shape: [1, 2"),
            Err(SceneError::Yaml(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let result = SceneConfig::from_yaml("shape:\n  tree_radius: 0.0\n");
        assert!(matches!(result, Err(SceneError::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_category_keeps_its_defaults() {
        let config = SceneConfig::from_yaml("ornaments:\n  gifts: { count: 4 }\n").unwrap();
        let gifts = config.ornaments.category(Category::Gifts);
        assert_eq!(gifts.count, 4);
        assert_eq!(gifts.weight, 0.3);
        assert_eq!(gifts.base_scale, 0.5);
        assert_eq!(config.ornaments.smoothing_rate, 2.0);
    }

    fn rejected(yaml: &str) -> bool {
        matches!(SceneConfig::from_yaml(yaml), Err(SceneError::InvalidConfig(_)))
    }

    #[test]
    fn test_rejects_negative_pointer_follow_rate() {
        assert!(rejected("foliage: { pointer_follow_rate: -5.0 }"));
        assert!(rejected("foliage: { pointer_follow_rate: 0.0 }"));
    }

    #[test]
    fn test_rejects_non_positive_collider_scale() {
        assert!(rejected("foliage: { collider_scale: -1.0 }"));
    }

    #[test]
    fn test_rejects_negative_push_distance() {
        assert!(rejected("foliage: { push_distance: -3.0 }"));
        assert!(SceneConfig::from_yaml("foliage: { push_distance: 0.0 }").is_ok());
    }

    #[test]
    fn test_rejects_snap_epsilon_out_of_range() {
        assert!(rejected("foliage: { snap_epsilon: 2.0 }"));
        assert!(rejected("foliage: { snap_epsilon: 1.0 }"));
        assert!(rejected("foliage: { snap_epsilon: -0.1 }"));
        assert!(SceneConfig::from_yaml("foliage: { snap_epsilon: 0.0 }").is_ok());
    }

    #[test]
    fn test_rejects_nan_and_infinite_values() {
        assert!(rejected("ornaments:\n  baubles: { weight: .nan }\n"));
        assert!(rejected("ornaments:\n  lights: { base_scale: .nan }\n"));
        assert!(rejected("shape: { tree_height: .inf }"));
        assert!(rejected("foliage: { smoothing_rate: .nan }"));

        let mut config = SceneConfig::default();
        config.foliage.pointer_sentinel = Vec3::new(f32::NAN, 0.0, 0.0);
        assert!(config.validate().is_err());
    }
}
