use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{TimestampSeconds, serde_as};

/// Group of parts of a single type registered with the unit.
///
/// API: `GET /inventory.json?deleted=1`, which returns a JSON array of these.
#[must_use]
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Inventory {
    #[serde(rename = "type", default)]
    pub kind: PartKind,

    #[serde(default)]
    pub devices: Vec<Device>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, derive_more::Display)]
pub enum PartKind {
    #[serde(rename = "PCU")]
    #[display("microinverter")]
    Microinverter,

    #[serde(rename = "ACB")]
    #[display("AC battery")]
    AcBattery,

    #[serde(rename = "NSRB")]
    #[display("network relay")]
    NetworkRelay,

    #[serde(rename = "ESUB")]
    #[display("Ensemble")]
    Ensemble,

    #[default]
    #[serde(other)]
    #[display("unknown")]
    Unknown,
}

#[must_use]
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Device {
    #[serde(rename = "part_num", alias = "partNumber")]
    pub part_number: Option<String>,

    #[serde(rename = "serial_num", alias = "serialNumber")]
    pub serial_number: Option<String>,

    #[serde_as(as = "Option<TimestampSeconds<String>>")]
    #[serde(rename = "installed")]
    pub installed_at: Option<DateTime<Utc>>,

    #[serde_as(as = "Option<TimestampSeconds<String>>")]
    #[serde(rename = "last_rpt_date")]
    pub last_reported_at: Option<DateTime<Utc>>,

    #[serde_as(as = "Option<TimestampSeconds<String>>")]
    #[serde(rename = "created_date")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(rename = "device_status", default)]
    pub statuses: Vec<String>,

    pub admin_state: Option<i64>,

    #[serde(rename = "dev_type")]
    pub device_type: Option<i64>,

    /// Firmware image part number currently running.
    #[serde(rename = "img_pnum_running")]
    pub firmware: Option<String>,

    #[serde(rename = "chaneid")]
    pub channel_id: Option<u64>,

    #[serde(rename = "producing", default)]
    pub is_producing: bool,

    #[serde(rename = "communicating", default)]
    pub is_communicating: bool,

    #[serde(rename = "provisioned", default)]
    pub is_provisioned: bool,

    #[serde(rename = "operating", default)]
    pub is_operating: bool,
}

impl Device {
    const STATUS_OK: &'static str = "envoy.global.ok";

    /// No status other than the global «OK» is reported.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.statuses.iter().all(|status| status == Self::STATUS_OK)
    }
}
