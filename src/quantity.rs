pub mod energy;
pub mod power;

use serde::Deserialize;

/// Physical quantity tagged with the dimensions of power and time.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    PartialEq,
    PartialOrd,
    derive_more::Add,
    derive_more::From,
    derive_more::Sum,
)]
#[serde(transparent)]
pub struct Quantity<T, const POWER: isize, const TIME: isize>(pub T);

impl<const POWER: isize, const TIME: isize> Quantity<f64, POWER, TIME> {
    pub const ZERO: Self = Self(0.0);
}

impl<const POWER: isize, const TIME: isize> Default for Quantity<f64, POWER, TIME> {
    fn default() -> Self {
        Self::ZERO
    }
}
