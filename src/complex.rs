use num_traits::Float;

#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

impl<T: Float> Complex<T> {
    /// Build from a linear magnitude and a phase in degrees
    pub fn from_polar_deg(mag: T, phase_deg: T) -> Self {
        let (sin, cos) = phase_deg.to_radians().sin_cos();
        Self::new(mag * cos, mag * sin)
    }

    pub fn norm(&self) -> T {
        self.re.hypot(self.im)
    }

    pub fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

/// The type of a single reflection coefficient sample
pub type Gamma = Complex<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm() {
        let g = Gamma::new(3.0, 4.0);
        assert_eq!(g.norm(), 5.0);
    }

    #[test]
    fn test_polar() {
        let g = Gamma::from_polar_deg(0.5, 90.0);
        assert!(g.re.abs() < 1e-12);
        assert!((g.im - 0.5).abs() < 1e-12);
        assert!((Gamma::from_polar_deg(0.25, -135.0).norm() - 0.25).abs() < 1e-12);
    }
}
