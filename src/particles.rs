//! Decorative background particles.

use crate::config::ParticleConfig;

/// Inline style values for one particle.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleSpec {
    pub left_vw: f64,
    pub duration_s: f64,
    pub opacity: f64,
}

impl ParticleSpec {
    /// Draw a particle using `rand`, which must yield values in [0, 1).
    pub fn sample(cfg: &ParticleConfig, mut rand: impl FnMut() -> f64) -> Self {
        Self {
            left_vw: rand() * 100.0,
            duration_s: rand() * cfg.duration_spread_s + cfg.min_duration_s,
            opacity: rand() * cfg.opacity_spread + cfg.min_opacity,
        }
    }

    /// `(property, value)` pairs for the particle's inline style.
    pub fn style_properties(&self) -> [(&'static str, String); 3] {
        [
            ("left", format!("{}vw", self.left_vw)),
            ("animation-duration", format!("{}s", self.duration_s)),
            ("opacity", self.opacity.to_string()),
        ]
    }
}

/// Uniform value in [0, 1) from the browser crypto source.
#[cfg(feature = "rng")]
pub fn random_unit() -> f64 {
    let mut buf = [0u8; 8];
    if getrandom::getrandom(&mut buf).is_err() {
        return js_sys::Math::random();
    }
    // 53 high bits -> exact f64 mantissa
    (u64::from_le_bytes(buf) >> 11) as f64 / (1u64 << 53) as f64
}

#[cfg(not(feature = "rng"))]
pub fn random_unit() -> f64 {
    js_sys::Math::random()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_follow_config() {
        let cfg = ParticleConfig::default();
        let low = ParticleSpec::sample(&cfg, || 0.0);
        let expected = ParticleSpec {
            left_vw: 0.0,
            duration_s: 5.0,
            opacity: 0.3,
        };
        assert_eq!(low, expected);
        let high = ParticleSpec::sample(&cfg, || 0.999);
        assert!(high.left_vw < 100.0);
        assert!(high.duration_s < 8.0);
        assert!(high.opacity < 0.8);
        assert!(f64::from(cfg.lifetime_ms) / 1000.0 >= high.duration_s);
    }

    #[test]
    fn style_values_carry_units() {
        let spec = ParticleSpec {
            left_vw: 12.5,
            duration_s: 6.0,
            opacity: 0.5,
        };
        let props = spec.style_properties();
        assert_eq!(props[0], ("left", "12.5vw".to_string()));
        assert_eq!(props[1], ("animation-duration", "6s".to_string()));
        assert_eq!(props[2], ("opacity", "0.5".to_string()));
    }

    #[cfg(feature = "rng")]
    #[test]
    fn crypto_random_is_unit_interval() {
        for _ in 0..64 {
            let r = random_unit();
            assert!((0.0..1.0).contains(&r));
        }
    }
}
