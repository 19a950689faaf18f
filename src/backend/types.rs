use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::health::{HealthStatus, parse_hex_color, status_hex};

/// Machine families the service knows how to score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineType {
    Motor,
    Blade,
}

impl MachineType {
    pub const ALL: [MachineType; 2] = [MachineType::Motor, MachineType::Blade];

    /// Wire name, also used as the asset file stem.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Motor => "motor",
            Self::Blade => "blade",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Motor => "Motor",
            Self::Blade => "Blade",
        }
    }

    /// Interpret a stored type label. Anything that is not a motor is
    /// handled with the blade sensor set.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("motor") {
            Self::Motor
        } else {
            Self::Blade
        }
    }
}

/// One row of `GET /machines/`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MachineSummary {
    pub machine_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub machine_type: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub current_status: Option<HealthStatus>,
    #[serde(default)]
    pub current_rul: Option<f64>,
}

impl MachineSummary {
    pub fn kind(&self) -> MachineType {
        MachineType::from_label(&self.machine_type)
    }
}

/// Response of `GET /machines/{id}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MachineDetail {
    pub machine_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub machine_type: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub installation_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Type-specific limits row, shown read-only.
    #[serde(default)]
    pub details: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub latest_prediction: Option<PredictionHistoryEntry>,
}

impl MachineDetail {
    pub fn kind(&self) -> MachineType {
        MachineType::from_label(&self.machine_type)
    }
}

/// Response of `GET /machines/{id}/type`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MachineTypeInfo {
    #[serde(default)]
    pub machine_id: Option<String>,
    #[serde(rename = "type")]
    pub machine_type: String,
}

/// A stored prediction, as returned by the history and detail endpoints.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PredictionHistoryEntry {
    pub timestamp: String,
    pub health_status: HealthStatus,
    pub rul_hours: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "flag")]
    pub maintenance_required: bool,
}

/// Response of `POST /predict/`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PredictionResult {
    pub health_status: HealthStatus,
    pub rul_hours: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub confidence_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub color_code: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub maintenance_required: bool,
}

impl PredictionResult {
    /// Reported confidence, else the strongest class score, clamped to [0, 1].
    pub fn confidence(&self) -> f64 {
        let value = self.confidence.unwrap_or_else(|| {
            self.confidence_scores
                .values()
                .copied()
                .filter(|score| score.is_finite())
                .fold(0.0, f64::max)
        });
        if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Server color when it parses, else the status color.
    pub fn display_hex(&self) -> String {
        match self.color_code.as_deref() {
            Some(code) if parse_hex_color(code).is_some() => code.trim().to_string(),
            _ => status_hex(Some(&self.health_status)).to_string(),
        }
    }
}

/// Sensor values posted to `/predict/`, shaped by machine type.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SensorReading {
    Motor(MotorReading),
    Blade(BladeReading),
}

impl SensorReading {
    pub fn machine_id(&self) -> &str {
        match self {
            Self::Motor(reading) => &reading.machine_id,
            Self::Blade(reading) => &reading.machine_id,
        }
    }

    pub fn machine_type(&self) -> MachineType {
        match self {
            Self::Motor(_) => MachineType::Motor,
            Self::Blade(_) => MachineType::Blade,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MotorReading {
    pub machine_id: String,
    pub current_phase_a: f64,
    pub current_phase_b: f64,
    pub current_phase_c: f64,
    pub power_consumption: f64,
    pub power_factor: f64,
    pub vibration: f64,
    pub temperature: f64,
    pub speed: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BladeReading {
    pub machine_id: String,
    pub vibration: f64,
    pub torque: f64,
    pub speed: f64,
    pub noise: f64,
    pub temperature: f64,
}

/// Body of `POST /machines/`.
///
/// Limits are optional so an unparsable field reaches the service as `null`
/// and is rejected there with a field-level detail.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewMachine {
    pub machine_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub machine_type: MachineType,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motor_details: Option<MotorLimits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blade_details: Option<BladeLimits>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MotorLimits {
    pub max_current_phase_a: Option<f64>,
    pub max_current_phase_b: Option<f64>,
    pub max_current_phase_c: Option<f64>,
    pub max_power_consumption: Option<f64>,
    pub max_temperature: Option<f64>,
    pub max_vibration: Option<f64>,
    pub nominal_speed: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BladeLimits {
    pub max_vibration: Option<f64>,
    pub max_torque: Option<f64>,
    pub max_speed: Option<f64>,
    pub max_noise: Option<f64>,
    pub max_temperature: Option<f64>,
    pub material: String,
    pub length: Option<f64>,
    pub width: Option<f64>,
}

/// Accept JSON booleans as well as SQLite-style 0/1 numbers.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(value)) => value,
        Some(Flag::Int(value)) => value != 0,
        Some(Flag::Float(value)) => value != 0.0,
        None => false,
    })
}
