use core::fmt::{Debug, Display};
use core::iter::Sum;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use num_traits::{CheckedAdd, Zero};

/// A trait representing an edge capacity (and flow) type which is typically an integer.
///
/// Unsigned types are fine: residual bookkeeping never subtracts more than is available.
pub trait Capacity:
    Copy
    + Sum<Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Ord
    + AddAssign
    + SubAssign
    + Zero
    + CheckedAdd
    + Debug
    + Display
    + Default
{
}

impl Capacity for i32 {}

impl Capacity for i64 {}

impl Capacity for u32 {}

impl Capacity for u64 {}

impl Capacity for usize {}
