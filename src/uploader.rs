//! Drop zone accepting images by drag-and-drop or click-to-browse.

use crate::file_picker;
use crate::notifications::{Notification, Toasts};
use crate::upload::{UploadedFile, filter_images};

/// Filters a batch to its images. A non-empty result is announced with a toast.
pub fn accept_batch(batch: Vec<UploadedFile>, toasts: &mut Toasts) -> Option<Vec<UploadedFile>> {
    let images = filter_images(batch);
    if images.is_empty() {
        return None;
    }
    toasts.push(Notification::success(format!("Added {} images", images.len())));
    Some(images)
}

/// Draws the drop zone and returns the images accepted this frame, if any.
pub fn uploader_ui(ui: &mut egui::Ui, toasts: &mut Toasts) -> Option<Vec<UploadedFile>> {
    let ctx = ui.ctx().clone();
    let drag_active = ctx.input(|i| !i.raw.hovered_files.is_empty());

    let stroke_color = if drag_active {
        ui.visuals().selection.stroke.color
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke.color
    };
    let fill = if drag_active {
        ui.visuals().selection.bg_fill.gamma_multiply(0.15)
    } else {
        egui::Color32::TRANSPARENT
    };

    let response = egui::Frame::new()
        .stroke(egui::Stroke::new(2.0, stroke_color))
        .fill(fill)
        .corner_radius(8)
        .inner_margin(egui::Margin::same(24))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("⬆").size(36.0).weak());
                ui.label(if drag_active {
                    "Drop the images here..."
                } else {
                    "Drag & drop images here, or click to select"
                });
                ui.small("Supports PNG, JPG, JPEG, GIF");
            });
        })
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand);

    // Each picker selection and each frame's drop stays one batch, so every
    // batch gets exactly one notice.
    let mut batches = file_picker::take_picked_files();
    if response.clicked() {
        batches.push(file_picker::pick_images(&ctx));
    }

    let dropped = ctx.input_mut(|i| std::mem::take(&mut i.raw.dropped_files));
    batches.push(
        dropped
            .iter()
            .filter_map(|file| match UploadedFile::from_dropped(file) {
                Ok(uploaded) => Some(uploaded),
                Err(err) => {
                    log::warn!("{err}");
                    None
                }
            })
            .collect(),
    );

    accept_batches(batches, toasts)
}

/// Runs [`accept_batch`] on every batch and joins the accepted images.
pub fn accept_batches(
    batches: Vec<Vec<UploadedFile>>,
    toasts: &mut Toasts,
) -> Option<Vec<UploadedFile>> {
    let accepted: Vec<_> = batches
        .into_iter()
        .filter_map(|batch| accept_batch(batch, toasts))
        .flatten()
        .collect();
    (!accepted.is_empty()).then_some(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, mime: &str) -> UploadedFile {
        UploadedFile::new(name, mime, vec![0u8; 2])
    }

    #[test]
    fn mixed_batch_forwards_images_and_reports_count() {
        let mut toasts = Toasts::new();
        let batch = vec![
            file("a.png", ""),
            file("b.txt", ""),
            file("c.jpg", ""),
            file("d", "application/octet-stream"),
        ];

        let accepted = accept_batch(batch, &mut toasts).unwrap();
        assert_eq!(accepted.len(), 2);

        let messages: Vec<_> = toasts.visible().map(Notification::message).collect();
        assert_eq!(messages, ["Added 2 images"]);
    }

    #[test]
    fn non_image_batch_forwards_nothing_and_stays_quiet() {
        let mut toasts = Toasts::new();
        let batch = vec![file("a.txt", ""), file("b.mp4", "video/mp4")];

        assert!(accept_batch(batch, &mut toasts).is_none());
        assert!(!toasts.has_notifications());
    }

    #[test]
    fn empty_batch_is_ignored() {
        let mut toasts = Toasts::new();
        assert!(accept_batch(Vec::new(), &mut toasts).is_none());
        assert!(!toasts.has_notifications());
    }

    #[test]
    fn whole_selection_gets_one_notice() {
        let mut toasts = Toasts::new();
        let selection = vec![file("a.png", ""), file("b.png", ""), file("c.png", "")];

        let accepted = accept_batches(vec![selection], &mut toasts).unwrap();
        assert_eq!(accepted.len(), 3);

        let messages: Vec<_> = toasts.visible().map(Notification::message).collect();
        assert_eq!(messages, ["Added 3 images"]);
    }

    #[test]
    fn separate_batches_are_announced_separately() {
        let mut toasts = Toasts::new();
        let picked = vec![file("a.png", ""), file("notes.txt", "")];
        let dropped = vec![file("b.gif", ""), file("c.jpg", "")];
        let empty_drop = Vec::new();

        let accepted = accept_batches(vec![picked, dropped, empty_drop], &mut toasts).unwrap();
        let names: Vec<_> = accepted.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a.png", "b.gif", "c.jpg"]);

        // Newest first.
        let messages: Vec<_> = toasts.visible().map(Notification::message).collect();
        assert_eq!(messages, ["Added 2 images", "Added 1 images"]);
    }

    #[test]
    fn batches_without_images_yield_nothing() {
        let mut toasts = Toasts::new();
        assert!(accept_batches(vec![Vec::new(), vec![file("a.txt", "")]], &mut toasts).is_none());
        assert!(!toasts.has_notifications());
    }
}
