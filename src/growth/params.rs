use serde::{Deserialize, Serialize};

/// Upper bound on `max_generations`; each generation multiplies the branch
/// count by up to four.
pub const GENERATION_LIMIT: usize = 10;

/// Parameters controlling tree shape and growth timing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthParams {
    /// Seconds from seed to fully grown tree; all growth timing derives from this
    pub total_growth_time: f32,
    /// Deepest branch generation (trunk is generation 0)
    pub max_generations: usize,
    /// Random azimuth perturbation for child branches (degrees)
    pub branch_angle_variance: f32,
    /// Child length as a fraction of its parent's
    pub length_reduction: f32,
    /// Child radius as a fraction of its parent's
    pub radius_reduction: f32,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            total_growth_time: 10.0,
            max_generations: 6,
            branch_angle_variance: 45.0,
            length_reduction: 0.7,
            radius_reduction: 0.7,
        }
    }
}

impl GrowthParams {
    /// Parse from a YAML document. Missing fields take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let params: GrowthParams = serde_yaml::from_str(yaml)
            .map_err(|e| format!("YAML parse error: {}", e))?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.total_growth_time.is_finite() || self.total_growth_time <= 0.0 {
            return Err(format!(
                "total_growth_time must be positive, got {}",
                self.total_growth_time
            ));
        }

        if self.max_generations > GENERATION_LIMIT {
            return Err(format!(
                "max_generations must be at most {}, got {}",
                GENERATION_LIMIT, self.max_generations
            ));
        }

        if !self.branch_angle_variance.is_finite() || self.branch_angle_variance < 0.0 {
            return Err(format!(
                "branch_angle_variance must be a non-negative number of degrees, got {}",
                self.branch_angle_variance
            ));
        }

        for (name, value) in [
            ("length_reduction", self.length_reduction),
            ("radius_reduction", self.radius_reduction),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(format!("{} must be in (0, 1], got {}", name, value));
            }
        }

        Ok(())
    }
}
