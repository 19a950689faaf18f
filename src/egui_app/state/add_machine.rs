use super::numeric::{limit_value, optional_text};
use crate::backend::{BladeLimits, MachineType, MotorLimits, NewMachine};

/// Motor limit inputs, kept as typed text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MotorLimitInputs {
    pub max_current_phase_a: String,
    pub max_current_phase_b: String,
    pub max_current_phase_c: String,
    pub max_power_consumption: String,
    pub max_temperature: String,
    pub max_vibration: String,
    pub nominal_speed: String,
}

/// Blade limit inputs, kept as typed text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BladeLimitInputs {
    pub max_vibration: String,
    pub max_torque: String,
    pub max_speed: String,
    pub max_noise: String,
    pub max_temperature: String,
    pub material: String,
    pub length: String,
    pub width: String,
}

/// Add-machine dialog state.
#[derive(Clone, Debug, PartialEq)]
pub struct AddMachineState {
    pub open: bool,
    pub submitting: bool,
    pub machine_id: String,
    pub name: String,
    pub machine_type: MachineType,
    pub manufacturer: String,
    pub model: String,
    pub location: String,
    pub motor: MotorLimitInputs,
    pub blade: BladeLimitInputs,
}

impl Default for AddMachineState {
    fn default() -> Self {
        Self {
            open: false,
            submitting: false,
            machine_id: String::new(),
            name: String::new(),
            machine_type: MachineType::Motor,
            manufacturer: String::new(),
            model: String::new(),
            location: String::new(),
            motor: MotorLimitInputs::default(),
            blade: BladeLimitInputs::default(),
        }
    }
}

impl AddMachineState {
    /// Clear every input and close the dialog.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Request body carrying only the detail block of the selected type.
    pub fn to_request(&self) -> NewMachine {
        let (motor_details, blade_details) = match self.machine_type {
            MachineType::Motor => (Some(self.motor_limits()), None),
            MachineType::Blade => (None, Some(self.blade_limits())),
        };
        NewMachine {
            machine_id: self.machine_id.trim().to_string(),
            name: self.name.trim().to_string(),
            machine_type: self.machine_type,
            manufacturer: optional_text(&self.manufacturer),
            model: optional_text(&self.model),
            location: optional_text(&self.location),
            motor_details,
            blade_details,
        }
    }

    fn motor_limits(&self) -> MotorLimits {
        let inputs = &self.motor;
        MotorLimits {
            max_current_phase_a: limit_value(&inputs.max_current_phase_a),
            max_current_phase_b: limit_value(&inputs.max_current_phase_b),
            max_current_phase_c: limit_value(&inputs.max_current_phase_c),
            max_power_consumption: limit_value(&inputs.max_power_consumption),
            max_temperature: limit_value(&inputs.max_temperature),
            max_vibration: limit_value(&inputs.max_vibration),
            nominal_speed: limit_value(&inputs.nominal_speed),
        }
    }

    fn blade_limits(&self) -> BladeLimits {
        let inputs = &self.blade;
        BladeLimits {
            max_vibration: limit_value(&inputs.max_vibration),
            max_torque: limit_value(&inputs.max_torque),
            max_speed: limit_value(&inputs.max_speed),
            max_noise: limit_value(&inputs.max_noise),
            max_temperature: limit_value(&inputs.max_temperature),
            material: inputs.material.trim().to_string(),
            length: limit_value(&inputs.length),
            width: limit_value(&inputs.width),
        }
    }
}
