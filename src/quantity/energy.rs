use std::fmt::{Display, Formatter};

use crate::quantity::Quantity;

pub type WattHours = Quantity<f64, 1, 1>;

impl WattHours {
    #[must_use]
    pub fn to_kilowatt_hours(self) -> f64 {
        self.0 * 0.001
    }
}

impl Display for WattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3} kWh", self.to_kilowatt_hours())
    }
}
