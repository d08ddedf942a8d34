//! Default UI panels
//!
//! Pre-built panels for the playground: the scene options overlay that
//! mirrors every field of [`SceneOptions`].

use crate::options::SceneOptions;

/// Scene options panel
///
/// Exposes the sphere appearance and spot light parameters for live
/// editing. Changes are picked up by the update callback on the next frame.
///
/// # Arguments
/// * `ui` - ImGui UI context
/// * `options` - Mutable options to edit
pub fn scene_options_panel(ui: &imgui::Ui, options: &mut SceneOptions) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window("Scene Options")
        .size([320.0, 240.0], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .resizable(true)
        .collapsible(true)
        .build(|| {
            ui.text("Sphere");
            ui.separator();
            ui.color_edit3("Color", &mut options.sphere_color);
            ui.checkbox("Wireframe", &mut options.sphere_wireframe);
            ui.slider("Speed", 0.0, 4.0, &mut options.sphere_speed);

            ui.spacing();
            ui.text("Spot Light");
            ui.separator();
            ui.slider("Angle", 0.0, 1.0, &mut options.spot_angle);
            ui.slider("Penumbra", 0.0, 1.0, &mut options.spot_penumbra);
            ui.slider("Intensity", 0.0, 2.0, &mut options.spot_intensity);
        });
}
