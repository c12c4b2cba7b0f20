use serde::{Deserialize, Serialize};

/// Scalar material parameters shared by all elements of one instance.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Young's modulus. Measured in Pa = N/m² = kg/(ms²).
    pub young: f64,
    /// Poisson's ratio. Dimensionless.
    pub poisson: f64,
    /// Rayleigh damping coefficient. Scaled by the reciprocal timestep at
    /// evaluation time.
    pub damping: f64,
}

impl Material {
    pub fn from_young_poisson(young: f64, poisson: f64) -> Material {
        Material {
            young,
            poisson,
            damping: 0.0,
        }
    }

    pub fn with_damping(mut self, damping: f64) -> Material {
        self.damping = damping;
        self
    }

    /// First and second Lamé parameters `(lambda, mu)` per unit volume; the
    /// metric assembler scales both by the element volume.
    ///
    /// Values are not validated: a Poisson ratio of 0.5, or a negative
    /// modulus, propagates into the metric unchecked.
    pub fn lame_parameters(&self) -> (f64, f64) {
        let lambda =
            self.young * self.poisson / ((1.0 + self.poisson) * (1.0 - 2.0 * self.poisson));
        let mu = self.young / (2.0 * (1.0 + self.poisson));
        (lambda, mu)
    }
}
