use super::numeric::sensor_value;
use crate::backend::{BladeReading, MachineType, MotorReading, SensorReading};

/// Sensor channels, keyed by their wire name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorKey {
    CurrentPhaseA,
    CurrentPhaseB,
    CurrentPhaseC,
    PowerConsumption,
    PowerFactor,
    Vibration,
    Temperature,
    Speed,
    Torque,
    Noise,
}

impl SensorKey {
    pub fn label(self) -> &'static str {
        match self {
            Self::CurrentPhaseA => "Current Phase A (A)",
            Self::CurrentPhaseB => "Current Phase B (A)",
            Self::CurrentPhaseC => "Current Phase C (A)",
            Self::PowerConsumption => "Power Consumption (W)",
            Self::PowerFactor => "Power Factor",
            Self::Vibration => "Vibration (mm/s)",
            Self::Temperature => "Temperature (°C)",
            Self::Speed => "Speed (RPM)",
            Self::Torque => "Torque (Nm)",
            Self::Noise => "Noise (dB)",
        }
    }

    fn for_type(machine_type: MachineType) -> &'static [SensorKey] {
        match machine_type {
            MachineType::Motor => &[
                Self::CurrentPhaseA,
                Self::CurrentPhaseB,
                Self::CurrentPhaseC,
                Self::PowerConsumption,
                Self::PowerFactor,
                Self::Vibration,
                Self::Temperature,
                Self::Speed,
            ],
            MachineType::Blade => &[
                Self::Vibration,
                Self::Torque,
                Self::Speed,
                Self::Noise,
                Self::Temperature,
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SensorField {
    pub key: SensorKey,
    pub text: String,
}

/// Sensor inputs for the open machine's type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SensorFormState {
    pub machine_type: Option<MachineType>,
    pub fields: Vec<SensorField>,
}

impl SensorFormState {
    /// Empty inputs for every sensor of `machine_type`.
    pub fn for_type(machine_type: MachineType) -> Self {
        Self {
            machine_type: Some(machine_type),
            fields: SensorKey::for_type(machine_type)
                .iter()
                .map(|key| SensorField {
                    key: *key,
                    text: String::new(),
                })
                .collect(),
        }
    }

    pub fn set(&mut self, key: SensorKey, text: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|field| field.key == key) {
            field.text = text.into();
        }
    }

    fn value(&self, key: SensorKey) -> f64 {
        self.fields
            .iter()
            .find(|field| field.key == key)
            .map_or(0.0, |field| sensor_value(&field.text))
    }

    /// Build the request body; `None` before a machine type is known.
    pub fn reading(&self, machine_id: &str) -> Option<SensorReading> {
        let machine_id = machine_id.to_string();
        Some(match self.machine_type? {
            MachineType::Motor => SensorReading::Motor(MotorReading {
                machine_id,
                current_phase_a: self.value(SensorKey::CurrentPhaseA),
                current_phase_b: self.value(SensorKey::CurrentPhaseB),
                current_phase_c: self.value(SensorKey::CurrentPhaseC),
                power_consumption: self.value(SensorKey::PowerConsumption),
                power_factor: self.value(SensorKey::PowerFactor),
                vibration: self.value(SensorKey::Vibration),
                temperature: self.value(SensorKey::Temperature),
                speed: self.value(SensorKey::Speed),
            }),
            MachineType::Blade => SensorReading::Blade(BladeReading {
                machine_id,
                vibration: self.value(SensorKey::Vibration),
                torque: self.value(SensorKey::Torque),
                speed: self.value(SensorKey::Speed),
                noise: self.value(SensorKey::Noise),
                temperature: self.value(SensorKey::Temperature),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motor_form_has_eight_inputs() {
        let form = SensorFormState::for_type(MachineType::Motor);
        assert_eq!(form.fields.len(), 8);
        assert_eq!(SensorFormState::for_type(MachineType::Blade).fields.len(), 5);
    }

    #[test]
    fn unparsable_inputs_read_as_zero() {
        let mut form = SensorFormState::for_type(MachineType::Blade);
        form.set(SensorKey::Vibration, "3.2");
        form.set(SensorKey::Torque, "lots");
        form.set(SensorKey::Speed, "1500rpm");
        let Some(SensorReading::Blade(reading)) = form.reading("B-1") else {
            panic!("expected blade reading");
        };
        assert_eq!(reading.vibration, 3.2);
        assert_eq!(reading.torque, 0.0);
        assert_eq!(reading.speed, 1500.0);
        assert_eq!(reading.noise, 0.0);
        assert_eq!(reading.machine_id, "B-1");
    }

    #[test]
    fn keys_outside_the_type_are_ignored() {
        let mut form = SensorFormState::for_type(MachineType::Blade);
        form.set(SensorKey::PowerFactor, "0.9");
        assert!(form.fields.iter().all(|field| field.key != SensorKey::PowerFactor));
        assert!(SensorFormState::default().reading("x").is_none());
    }
}
