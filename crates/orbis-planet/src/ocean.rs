//! Ocean sphere sizing.

/// Diameter of the ocean sphere at the default sea level.
pub const OCEAN_BASE_SCALE: f64 = 2.035;

/// Sea-level sensitivity of the ocean scale.
const SEA_LEVEL_FACTOR: f64 = 1e-7;

/// Uniform scale of the unit-diameter ocean sphere: `2.035 + 1e-7 * (sea_level - 1)`.
///
/// The scale does not follow the planet radius.
pub fn ocean_scale(sea_level: f32) -> f64 {
    OCEAN_BASE_SCALE + SEA_LEVEL_FACTOR * (f64::from(sea_level) - 1.0)
}

/// Radius of the ocean surface for a given scale.
pub fn ocean_radius(scale: f64) -> f64 {
    scale * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sea_level_gives_base_scale() {
        assert_eq!(ocean_scale(1.0), OCEAN_BASE_SCALE);
        assert!((ocean_radius(ocean_scale(1.0)) - 1.0175).abs() < 1e-12);
    }

    #[test]
    fn test_sea_level_nudges_scale() {
        let low = ocean_scale(0.0);
        let high = ocean_scale(2.0);
        assert!((OCEAN_BASE_SCALE - low - 1e-7).abs() < 1e-15);
        assert!((high - OCEAN_BASE_SCALE - 1e-7).abs() < 1e-15);
    }
}
