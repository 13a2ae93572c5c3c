use std::fmt::{Display, Formatter};

use crate::quantity::Quantity;

pub type Watts = Quantity<f64, 1, 0>;

impl Display for Watts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0.abs() >= 1000.0 {
            write!(f, "{:.2} kW", self.0 / 1000.0)
        } else {
            write!(f, "{:.0} W", self.0)
        }
    }
}
