//! Configuration for interpolation.

use serde::{Deserialize, Serialize};

use crate::error::{InterpolationError, Result};
use crate::interpolators::{
    AverageInterpolator, BilinearInterpolator, IdwInterpolator, InterpolationMethod, Interpolator,
    KrigingInterpolator, NearestInterpolator,
};

/// Interpolation method and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpolationConfig {
    /// Strategy used to combine corner values.
    pub method: InterpolationMethod,

    /// IDW distance exponent.
    pub idw_power: f64,

    /// Kriging sill.
    pub kriging_sill: f64,

    /// Kriging range in cell units.
    pub kriging_range: f64,

    /// Kriging nugget.
    pub kriging_nugget: f64,
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        let kriging = KrigingInterpolator::default();
        Self {
            method: InterpolationMethod::Bilinear,
            idw_power: IdwInterpolator::default().power,
            kriging_sill: kriging.sill,
            kriging_range: kriging.range,
            kriging_nugget: kriging.nugget,
        }
    }
}

fn env_f64(name: &str, target: &mut f64) {
    if let Ok(val) = std::env::var(name) {
        match val.parse() {
            Ok(parsed) => *target = parsed,
            Err(_) => tracing::warn!(variable = name, value = %val, "ignoring unparsable value"),
        }
    }
}

impl InterpolationConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("GRID_INTERPOLATION") {
            match val.parse() {
                Ok(method) => config.method = method,
                Err(e) => tracing::warn!(value = %val, error = %e, "ignoring GRID_INTERPOLATION"),
            }
        }

        env_f64("IDW_POWER", &mut config.idw_power);
        env_f64("KRIGING_SILL", &mut config.kriging_sill);
        env_f64("KRIGING_RANGE", &mut config.kriging_range);
        env_f64("KRIGING_NUGGET", &mut config.kriging_nugget);

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.idw_power.is_finite() && self.idw_power > 0.0) {
            return Err(InterpolationError::config("idw_power must be > 0"));
        }
        if !(self.kriging_range.is_finite() && self.kriging_range > 0.0) {
            return Err(InterpolationError::config("kriging_range must be > 0"));
        }
        if !(self.kriging_sill.is_finite() && self.kriging_sill >= 0.0) {
            return Err(InterpolationError::config("kriging_sill must be >= 0"));
        }
        if !(self.kriging_nugget.is_finite() && self.kriging_nugget >= 0.0) {
            return Err(InterpolationError::config("kriging_nugget must be >= 0"));
        }
        Ok(())
    }

    /// Interpolator for the configured method.
    pub fn build(&self) -> Box<dyn Interpolator> {
        match self.method {
            InterpolationMethod::Bilinear => Box::new(BilinearInterpolator),
            InterpolationMethod::Nearest => Box::new(NearestInterpolator),
            InterpolationMethod::Average => Box::new(AverageInterpolator),
            InterpolationMethod::Idw => Box::new(IdwInterpolator::new(self.idw_power)),
            InterpolationMethod::Kriging => Box::new(KrigingInterpolator::new(
                self.kriging_sill,
                self.kriging_range,
                self.kriging_nugget,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InterpolationConfig::default();
        assert_eq!(config.method, InterpolationMethod::Bilinear);
        assert_eq!(config.idw_power, 2.0);
        assert_eq!(
            (config.kriging_sill, config.kriging_range, config.kriging_nugget),
            (1.0, 1.0, 0.1)
        );
        assert!(config.validate().is_ok());
        assert_eq!(config.build().name(), "bilinear");
    }

    #[test]
    fn test_validate() {
        let bad = [
            InterpolationConfig {
                idw_power: 0.0,
                ..Default::default()
            },
            InterpolationConfig {
                kriging_range: 0.0,
                ..Default::default()
            },
            InterpolationConfig {
                kriging_sill: -1.0,
                ..Default::default()
            },
            InterpolationConfig {
                kriging_nugget: f64::NAN,
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(InterpolationError::Config(_))));
        }
    }

    #[test]
    fn test_build_each_method() {
        for (method, name) in [
            (InterpolationMethod::Nearest, "nearest"),
            (InterpolationMethod::Average, "average"),
            (InterpolationMethod::Idw, "idw"),
            (InterpolationMethod::Kriging, "kriging"),
        ] {
            let config = InterpolationConfig {
                method,
                ..Default::default()
            };
            assert_eq!(config.build().name(), name);
        }
    }

    #[test]
    fn test_build_passes_parameters() {
        let config = InterpolationConfig {
            method: InterpolationMethod::Idw,
            idw_power: 50.0,
            ..Default::default()
        };
        let v = config.build().interpolate(&[10.0, 20.0, 30.0, 40.0], [0.2, 0.2]);
        assert!((v - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: InterpolationConfig =
            serde_json::from_str(r#"{"method":"kriging","kriging_range":0.5}"#).unwrap();
        assert_eq!(config.method, InterpolationMethod::Kriging);
        assert_eq!(config.kriging_range, 0.5);
        assert_eq!(config.kriging_sill, 1.0);
    }
}
