// src/ui/panel.rs
//! Deformer editing panels
//!
//! Widgets are generated from the properties a deformer exports, so new
//! deformers show up in the editor without any UI code of their own.

use crate::deform::{Deformer, DeformerStack, Property, PropertyValue};

/// Renders one widget per exported property of `deformer`
///
/// Properties are grouped under their category. Ranged numeric properties get
/// sliders, others get input fields. Returns `true` when any value changed.
pub fn render_deformer_properties(ui: &imgui::Ui, deformer: &mut dyn Deformer) -> bool {
    let mut changed = false;
    let mut category = "";

    for (index, property) in deformer.properties().into_iter().enumerate() {
        if property.category != category {
            category = property.category;
            ui.spacing();
            ui.text_disabled(category);
        }

        let _id = ui.push_id_usize(index);
        if let Some(value) = property_widget(ui, &property) {
            match deformer.set_property(property.name, value) {
                Ok(()) => changed = true,
                Err(err) => log::warn!("inspector could not write property: {err}"),
            }
        }
    }

    changed
}

/// Draws the widget for `property`, returning the new value when edited
fn property_widget(ui: &imgui::Ui, property: &Property) -> Option<PropertyValue> {
    match property.value {
        PropertyValue::Bool(mut value) => ui.checkbox(property.name, &mut value).then_some(PropertyValue::Bool(value)),
        PropertyValue::Int(mut value) => {
            let edited = match property.range {
                Some((min, max)) => ui.slider(property.name, min as i32, max as i32, &mut value),
                None => ui.input_int(property.name, &mut value).build(),
            };
            edited.then_some(PropertyValue::Int(value))
        }
        PropertyValue::Float(mut value) => {
            let edited = match property.range {
                Some((min, max)) => ui.slider(property.name, min as f32, max as f32, &mut value),
                None => ui.input_float(property.name, &mut value).build(),
            };
            edited.then_some(PropertyValue::Float(value))
        }
        PropertyValue::Vec3(value) => {
            let mut components = [value.x, value.y, value.z];
            ui.input_float3(property.name, &mut components)
                .build()
                .then(|| PropertyValue::Vec3(components.into()))
        }
    }
}

/// Editor window listing every deformer in `stack`
///
/// Each deformer gets a collapsible section with its properties and a remove
/// button. Returns `true` when the stack or any deformer changed, so the
/// caller knows to re-apply it.
pub fn deformer_stack_panel(ui: &imgui::Ui, title: &str, stack: &mut DeformerStack) -> bool {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return false;
    }

    let mut changed = false;
    let mut remove = None;

    ui.window(title)
        .size([360.0, display_size[1] * 0.6], imgui::Condition::FirstUseEver)
        .position([display_size[0] - 380.0, 20.0], imgui::Condition::FirstUseEver)
        .resizable(true)
        .collapsible(true)
        .build(|| {
            if stack.is_empty() {
                ui.text_disabled("No deformers");
                return;
            }

            for (index, entry) in stack.deformers().iter().enumerate() {
                let _id = ui.push_id_usize(index);
                let Ok(mut deformer) = entry.try_borrow_mut() else {
                    ui.text_disabled("(in use)");
                    continue;
                };

                let header = format!("{}: {}", index, deformer.name());
                if ui.collapsing_header(&header, imgui::TreeNodeFlags::DEFAULT_OPEN) {
                    changed |= render_deformer_properties(ui, &mut *deformer);
                    if ui.button("Remove") {
                        remove = Some(index);
                    }
                }
                ui.separator();
            }
        });

    if let Some(index) = remove {
        if stack.remove_at(index).is_ok() {
            changed = true;
        }
    }

    changed
}
