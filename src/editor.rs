//! Settings editor card, one per slide.

use crate::preview::{ASPECT, cover_uv};
use crate::settings::{
    DISPLAY_DURATION, DISPLAY_DURATION_STEP, Direction, SettingChange, SlideSettings,
    TRANSITION_DURATION, TRANSITION_DURATION_STEP,
};
use crate::slideshow::{Slide, SlideId};

/// Full updated record for the slide at `index`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingsUpdate {
    pub index: usize,
    pub settings: SlideSettings,
}

impl SettingsUpdate {
    /// Merges `change` into `settings`; `None` when no control changed.
    pub fn from_change(
        index: usize,
        settings: &SlideSettings,
        change: Option<SettingChange>,
    ) -> Option<Self> {
        change.map(|change| Self {
            index,
            settings: settings.with_change(change),
        })
    }
}

/// Draws the card for `slide`, shown at position `index`, and reports an update
/// when a control changed. Widget ids follow the slide, not its position.
pub fn settings_card(
    ui: &mut egui::Ui,
    index: usize,
    slide: &Slide,
    thumbnail: Option<&egui::TextureHandle>,
) -> Option<SettingsUpdate> {
    let settings = &slide.settings;
    let mut change = None;

    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            thumbnail_ui(ui, index, thumbnail);
            ui.add_space(8.0);

            if let Some(dir) = direction_combo(ui, slide.id, "Entry Direction", settings.entry_direction) {
                change = Some(SettingChange::EntryDirection(dir));
            }
            if let Some(dir) = direction_combo(ui, slide.id, "Exit Direction", settings.exit_direction) {
                change = Some(SettingChange::ExitDirection(dir));
            }

            let transition = (&TRANSITION_DURATION, TRANSITION_DURATION_STEP);
            let display = (&DISPLAY_DURATION, DISPLAY_DURATION_STEP);
            if let Some(secs) =
                duration_slider(ui, "Entry Duration (seconds)", settings.entry_duration, transition)
            {
                change = Some(SettingChange::EntryDuration(secs));
            }
            if let Some(secs) =
                duration_slider(ui, "Display Duration (seconds)", settings.display_duration, display)
            {
                change = Some(SettingChange::DisplayDuration(secs));
            }
            if let Some(secs) =
                duration_slider(ui, "Exit Duration (seconds)", settings.exit_duration, transition)
            {
                change = Some(SettingChange::ExitDuration(secs));
            }
        });

    SettingsUpdate::from_change(index, settings, change)
}

fn thumbnail_ui(ui: &mut egui::Ui, index: usize, thumbnail: Option<&egui::TextureHandle>) {
    let width = ui.available_width();
    let size = egui::vec2(width, width / ASPECT);
    match thumbnail {
        Some(tex) => {
            ui.add(
                egui::Image::new((tex.id(), size))
                    .uv(cover_uv(tex.size_vec2(), size))
                    .corner_radius(6),
            )
            .on_hover_text(format!("Preview {}", index + 1));
        }
        None => {
            let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
            ui.painter()
                .rect_filled(rect, egui::CornerRadius::same(6), ui.visuals().extreme_bg_color);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                format!("Preview {}", index + 1),
                egui::FontId::proportional(14.0),
                ui.visuals().weak_text_color(),
            );
        }
    }
}

fn direction_combo(
    ui: &mut egui::Ui,
    id: SlideId,
    label: &str,
    current: Direction,
) -> Option<Direction> {
    let mut selected = current;
    ui.label(label);
    egui::ComboBox::from_id_salt((label, id))
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for dir in Direction::ALL {
                ui.selectable_value(&mut selected, dir, dir.to_string());
            }
        });
    (selected != current).then_some(selected)
}

fn duration_slider(
    ui: &mut egui::Ui,
    label: &str,
    current: f32,
    (range, step): (&std::ops::RangeInclusive<f32>, f32),
) -> Option<f32> {
    let mut value = current;
    ui.label(label);
    let response = ui.horizontal(|ui| {
        let response = ui.add(
            egui::Slider::new(&mut value, range.clone())
                .step_by(f64::from(step))
                .show_value(false),
        );
        ui.weak(format!("{value:.1}s"));
        response
    });
    response.inner.changed().then_some(value)
}
