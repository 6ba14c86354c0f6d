use num::{Float, NumCast, Zero};
use rand::distributions::uniform::SampleUniform;
use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Floating-point primitive the engine can calculate with.
///
/// The trait collects everything the engine needs from its scalar type:
/// float arithmetic, casting from integer counts, uniform sampling for
/// centroid seeding, and the marker bounds required to move rows across
/// rayon worker threads.
pub trait Primitive:
    Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast + SampleUniform
    + PartialOrd + Copy + Default + Display + Debug + Sync + Send + 'static
{
}
impl Primitive for f32 {}
impl Primitive for f64 {}
