use super::EguiApp;
use super::overlay_layers::{self, OverlayLayer};
use super::style;
use crate::backend::MachineType;
use crate::egui_app::state::{AddMachineState, BladeLimitInputs, MotorLimitInputs};
use eframe::egui::{self, Align2, RichText};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DialogAction {
    None,
    Submit,
    Cancel,
}

impl EguiApp {
    /// Modal form registering a new machine.
    pub(super) fn render_add_machine_dialog(&mut self, ctx: &egui::Context) {
        if !self.controller.ui.add_machine.open {
            return;
        }
        overlay_layers::modal_backdrop(
            ctx,
            egui::Id::new("add_machine_backdrop"),
            style::modal_backdrop_color(),
        );
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.cancel_add_machine();
            return;
        }
        let mut open = true;
        let mut action = DialogAction::None;
        let form = &mut self.controller.ui.add_machine;
        egui::Window::new("Add machine")
            .id(egui::Id::new("add_machine_dialog"))
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .order(OverlayLayer::Modal.order())
            .collapsible(false)
            .resizable(false)
            .default_width(440.0)
            .open(&mut open)
            .show(ctx, |ui| {
                action = render_form(ui, form);
            });
        if !open || action == DialogAction::Cancel {
            self.controller.cancel_add_machine();
        } else if action == DialogAction::Submit {
            self.controller.create_machine();
        }
    }
}

fn render_form(ui: &mut egui::Ui, form: &mut AddMachineState) -> DialogAction {
    let mut action = DialogAction::None;
    egui::Grid::new("add_machine_base")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            text_row(ui, "Machine ID", &mut form.machine_id);
            text_row(ui, "Name", &mut form.name);
            ui.label("Type");
            egui::ComboBox::from_id_salt("add_machine_type")
                .selected_text(form.machine_type.label())
                .show_ui(ui, |ui| {
                    for machine_type in MachineType::ALL {
                        ui.selectable_value(
                            &mut form.machine_type,
                            machine_type,
                            machine_type.label(),
                        );
                    }
                });
            ui.end_row();
            text_row(ui, "Manufacturer", &mut form.manufacturer);
            text_row(ui, "Model", &mut form.model);
            text_row(ui, "Location", &mut form.location);
        });
    ui.add_space(8.0);
    ui.label(RichText::new("Limits").strong());
    match form.machine_type {
        MachineType::Motor => motor_limits(ui, &mut form.motor),
        MachineType::Blade => blade_limits(ui, &mut form.blade),
    }
    ui.add_space(10.0);
    ui.horizontal(|ui| {
        if ui.button("Cancel").clicked() {
            action = DialogAction::Cancel;
        }
        let add = egui::Button::new(RichText::new("Add machine").strong());
        if ui.add_enabled(!form.submitting, add).clicked() {
            action = DialogAction::Submit;
        }
        if form.submitting {
            ui.spinner();
        }
    });
    action
}

fn motor_limits(ui: &mut egui::Ui, limits: &mut MotorLimitInputs) {
    egui::Grid::new("add_machine_motor_limits")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            text_row(ui, "Max current phase A (A)", &mut limits.max_current_phase_a);
            text_row(ui, "Max current phase B (A)", &mut limits.max_current_phase_b);
            text_row(ui, "Max current phase C (A)", &mut limits.max_current_phase_c);
            text_row(ui, "Max power consumption (W)", &mut limits.max_power_consumption);
            text_row(ui, "Max temperature (°C)", &mut limits.max_temperature);
            text_row(ui, "Max vibration (mm/s)", &mut limits.max_vibration);
            text_row(ui, "Nominal speed (RPM)", &mut limits.nominal_speed);
        });
}

fn blade_limits(ui: &mut egui::Ui, limits: &mut BladeLimitInputs) {
    egui::Grid::new("add_machine_blade_limits")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            text_row(ui, "Max vibration (mm/s)", &mut limits.max_vibration);
            text_row(ui, "Max torque (Nm)", &mut limits.max_torque);
            text_row(ui, "Max speed (RPM)", &mut limits.max_speed);
            text_row(ui, "Max noise (dB)", &mut limits.max_noise);
            text_row(ui, "Max temperature (°C)", &mut limits.max_temperature);
            text_row(ui, "Material", &mut limits.material);
            text_row(ui, "Length (m)", &mut limits.length);
            text_row(ui, "Width (m)", &mut limits.width);
        });
}

fn text_row(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).desired_width(200.0));
    ui.end_row();
}
