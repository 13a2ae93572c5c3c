use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{TimestampSeconds, formats::Flexible, serde_as};

use crate::quantity::{energy::WattHours, power::Watts};

/// Current production, consumption, and storage readings.
///
/// API: `GET /production.json?details=1`.
#[must_use]
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Production {
    /// Top-level current power, reported by some firmware next to the detailed sections.
    #[serde(rename = "wNow")]
    pub w_now: Option<Watts>,

    /// Top-level lifetime energy, reported by some firmware next to the detailed sections.
    #[serde(rename = "whLifetime")]
    pub wh_lifetime: Option<WattHours>,

    #[serde(default)]
    pub production: Vec<Measurement>,

    #[serde(default)]
    pub consumption: Vec<Measurement>,

    #[serde(default)]
    pub storage: Vec<Measurement>,
}

impl Production {
    /// Metered production if the unit has a production CT, otherwise the inverters' estimate.
    #[must_use]
    pub fn produced(&self) -> Option<&Measurement> {
        self.production
            .iter()
            .find(|measurement| {
                measurement.kind == MeterKind::Eim
                    && measurement.measurement_type == Some(MeasurementType::Production)
            })
            .or_else(|| {
                self.production.iter().find(|measurement| measurement.kind == MeterKind::Inverters)
            })
    }

    #[must_use]
    pub fn total_consumption(&self) -> Option<&Measurement> {
        self.find_consumption(MeasurementType::TotalConsumption)
    }

    /// Grid import (positive) or export (negative).
    #[must_use]
    pub fn net_consumption(&self) -> Option<&Measurement> {
        self.find_consumption(MeasurementType::NetConsumption)
    }

    fn find_consumption(&self, measurement_type: MeasurementType) -> Option<&Measurement> {
        self.consumption
            .iter()
            .find(|measurement| measurement.measurement_type == Some(measurement_type))
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum MeterKind {
    #[display("inverters")]
    Inverters,

    /// Integrated energy meter (current transformers).
    #[display("eim")]
    Eim,

    #[display("acb")]
    Acb,

    #[default]
    #[serde(other)]
    #[display("unknown")]
    Unknown,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, derive_more::Display)]
#[serde(rename_all = "kebab-case")]
pub enum MeasurementType {
    #[display("production")]
    Production,

    #[display("total-consumption")]
    TotalConsumption,

    #[display("net-consumption")]
    NetConsumption,

    #[serde(other)]
    #[display("other")]
    Other,
}

#[must_use]
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    #[serde(rename = "type", default)]
    pub kind: MeterKind,

    pub measurement_type: Option<MeasurementType>,

    #[serde(default)]
    pub active_count: u32,

    #[serde_as(as = "Option<TimestampSeconds<i64, Flexible>>")]
    pub reading_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub w_now: Watts,

    #[serde(default)]
    pub wh_lifetime: WattHours,

    pub wh_today: Option<WattHours>,

    pub wh_last_seven_days: Option<WattHours>,

    /// Stored energy, reported by batteries only.
    pub wh_now: Option<WattHours>,

    pub rms_current: Option<f64>,

    pub rms_voltage: Option<f64>,

    #[serde(rename = "reactPwr")]
    pub reactive_power: Option<f64>,

    #[serde(rename = "apprntPwr")]
    pub apparent_power: Option<f64>,

    #[serde(rename = "pwrFactor")]
    pub power_factor: Option<f64>,

    /// Battery state, such as `idle`, `charging`, or `discharging`.
    pub state: Option<String>,

    /// Per-phase breakdown.
    #[serde(default)]
    pub lines: Vec<Self>,
}

impl Measurement {
    /// Sum of the per-phase power, if the breakdown is present.
    #[must_use]
    pub fn lines_power(&self) -> Option<Watts> {
        if self.lines.is_empty() {
            None
        } else {
            Some(self.lines.iter().map(|line| line.w_now).sum())
        }
    }
}
