use num::{Float, NumCast, Zero};
use rand::distributions::uniform::SampleUniform;
use std::{
    fmt::{Debug, Display, LowerExp},
    iter::Sum,
    ops::{Add, AddAssign, Div, DivAssign, Mul, Sub, SubAssign},
};

/// Floating point primitive, all calculations of this crate can be done with.
///
/// ## Implemented for
/// - [`f32`]
/// - [`f64`]
pub trait Primitive: Add<Output = Self> + AddAssign + Sum + Sub<Output = Self> + SubAssign
                + Mul<Output = Self> + Div<Output = Self> + DivAssign + Zero + Float + NumCast + SampleUniform
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static
                + for<'a> AddAssign<&'a Self> + for<'a> Sub<&'a Self> {
    /// Lossy conversion from [`f64`] (plain `as` cast).
    fn from_f64(v: f64) -> Self;
    /// Lossy conversion from [`usize`] (plain `as` cast).
    fn from_usize(v: usize) -> Self;

    /// Guard added to every responsibility denominator, so clusters without any
    /// responsibility still produce finite means. (10 * machine epsilon)
    fn responsibility_epsilon() -> Self {
        Self::epsilon() * Self::from_f64(10.0)
    }
}
impl Primitive for f32 {
    fn from_f64(v: f64) -> Self { v as f32 }
    fn from_usize(v: usize) -> Self { v as f32 }
}
impl Primitive for f64 {
    fn from_f64(v: f64) -> Self { v }
    fn from_usize(v: usize) -> Self { v as f64 }
}
