mod inventory;
mod production;

pub use self::{
    inventory::{Device, Inventory, PartKind},
    production::{Measurement, MeasurementType, MeterKind, Production},
};
