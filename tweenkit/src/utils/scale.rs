/// Trait for mapping a value from one scale to another.
pub trait Scalable {
    /// Map a value from one scale to another.
    ///
    /// # Parameters
    /// * `self`:  the value to map
    /// * `from_low`:  the low end of the originating range
    /// * `from_high`:  the high end of the originating range
    /// * `to_low`:  the low end of the target range
    /// * `to_high`:  the high end of the target range
    ///
    /// # Returns
    /// The mapped value.
    fn scale(self, from_low: Self, from_high: Self, to_low: Self, to_high: Self) -> Self;
}

macro_rules! impl_from_scalable {
    ($($variant:ty),*) => {
        $(
            impl Scalable for $variant {
                fn scale(self, from_low: Self, from_high: Self, to_low: Self, to_high: Self) -> Self {
                    (self - from_low) * (to_high - to_low) / (from_high - from_low) + to_low
                }
            }
        )*
    };
}

// Tween math is float-only.
impl_from_scalable!(f32, f64);

#[cfg(test)]
mod tests {
    use super::Scalable;

    #[test]
    fn test_scale_f32() {
        assert!((0.5f32.scale(0.0, 1.0, 0.0, 100.0) - 50.0).abs() < f32::EPSILON);
        assert!((0.0f32.scale(0.0, 1.0, 0.0, 100.0) - 0.0).abs() < f32::EPSILON);
        assert!((1.0f32.scale(0.0, 1.0, 0.0, 100.0) - 100.0).abs() < f32::EPSILON);
        // Ranges may be inverted.
        assert!((0.25f32.scale(0.0, 1.0, 10.0, 0.0) - 7.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_scale_f64() {
        assert!((0.5f64.scale(0.0, 1.0, -1.0, 1.0) - 0.0).abs() < f64::EPSILON);
        assert!((0.0f64.scale(0.0, 2.0, 0.0, 100.0) - 0.0).abs() < f64::EPSILON);
        assert!((2.0f64.scale(0.0, 2.0, 0.0, 100.0) - 100.0).abs() < f64::EPSILON);
    }
}
