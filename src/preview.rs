//! Preview pane: shows the current slide, or the current pair.

use crate::settings::DisplayMode;
use crate::slideshow::Slide;
use crate::textures::{PreviewTextures, TextureLoader};
use egui::{Rect, Vec2, pos2, vec2};

/// Width over height of the preview surface and the editor thumbnails.
pub const ASPECT: f32 = 16.0 / 9.0;

/// Slide indices to draw for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewFrame {
    pub primary: usize,
    pub secondary: Option<usize>,
}

impl PreviewFrame {
    pub fn indices(self) -> impl Iterator<Item = usize> {
        std::iter::once(self.primary).chain(self.secondary)
    }
}

#[derive(Debug, Default)]
pub struct PreviewPane {
    current_index: usize,
}

impl PreviewPane {
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Which slides to show for a list of `len` slides.
    pub fn frame(&self, len: usize, mode: DisplayMode) -> Option<PreviewFrame> {
        if len == 0 {
            return None;
        }
        let primary = self.current_index.min(len - 1);
        let secondary = (mode.span() > 1)
            .then_some(primary + 1)
            .filter(|&next| next < len);
        Some(PreviewFrame { primary, secondary })
    }

    /// Keeps the current position valid after the list shrinks, using the same
    /// rule as [`Self::frame`]: the last slide, or 0 when there is none.
    pub fn clamp_to(&mut self, len: usize) {
        self.current_index = self.current_index.min(len.saturating_sub(1));
    }

    /// Draws the preview surface. `slides` carry their settings along; only
    /// the images are drawn.
    pub fn ui<L>(
        &mut self,
        ui: &mut egui::Ui,
        slides: &[Slide],
        textures: &PreviewTextures<L>,
        mode: DisplayMode,
    ) where
        L: TextureLoader<Handle = egui::TextureHandle>,
    {
        self.clamp_to(slides.len());

        let width = ui.available_width();
        let (rect, _) = ui.allocate_exact_size(vec2(width, width / ASPECT), egui::Sense::hover());
        ui.painter()
            .rect_filled(rect, egui::CornerRadius::same(8), egui::Color32::BLACK);

        let Some(frame) = self.frame(slides.len(), mode) else {
            return;
        };

        let shown: Vec<_> = frame.indices().collect();
        let cell_width = rect.width() / shown.len() as f32;
        for (cell, &index) in shown.iter().enumerate() {
            let cell_rect = Rect::from_min_size(
                pos2(rect.left() + cell as f32 * cell_width, rect.top()),
                vec2(cell_width, rect.height()),
            );
            match slides.get(index).and_then(|slide| textures.get(slide.id)) {
                Some(tex) => {
                    let size = fit_within(tex.size_vec2(), cell_rect.size());
                    let image_rect = Rect::from_center_size(cell_rect.center(), size);
                    egui::Image::new((tex.id(), size)).paint_at(ui, image_rect);
                }
                None => {
                    ui.painter().text(
                        cell_rect.center(),
                        egui::Align2::CENTER_CENTER,
                        format!("Preview {} unavailable", index + 1),
                        egui::FontId::proportional(14.0),
                        egui::Color32::GRAY,
                    );
                }
            }
        }
    }
}

/// Largest size with the aspect ratio of `image` that fits inside `bounds`.
pub fn fit_within(image: Vec2, bounds: Vec2) -> Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = (bounds.x / image.x).min(bounds.y / image.y).max(0.0);
    image * scale
}

/// UV rectangle that crops `image` to the aspect ratio of `bounds`, centered.
pub fn cover_uv(image: Vec2, bounds: Vec2) -> Rect {
    let full = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
    if image.x <= 0.0 || image.y <= 0.0 || bounds.x <= 0.0 || bounds.y <= 0.0 {
        return full;
    }
    let image_aspect = image.x / image.y;
    let bounds_aspect = bounds.x / bounds.y;
    if image_aspect > bounds_aspect {
        let visible = bounds_aspect / image_aspect;
        let margin = (1.0 - visible) / 2.0;
        Rect::from_min_max(pos2(margin, 0.0), pos2(1.0 - margin, 1.0))
    } else {
        let visible = image_aspect / bounds_aspect;
        let margin = (1.0 - visible) / 2.0;
        Rect::from_min_max(pos2(0.0, margin), pos2(1.0, 1.0 - margin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_no_frame() {
        let pane = PreviewPane::default();
        assert_eq!(pane.frame(0, DisplayMode::Single), None);
        assert_eq!(pane.frame(0, DisplayMode::Pair), None);
    }

    #[test]
    fn single_mode_shows_current_only() {
        let pane = PreviewPane::default();
        let frame = pane.frame(3, DisplayMode::Single).unwrap();
        assert_eq!(frame, PreviewFrame { primary: 0, secondary: None });
    }

    #[test]
    fn pair_mode_shows_next_when_present() {
        let pane = PreviewPane::default();
        let frame = pane.frame(2, DisplayMode::Pair).unwrap();
        assert_eq!(frame.indices().collect::<Vec<_>>(), [0, 1]);

        let frame = pane.frame(1, DisplayMode::Pair).unwrap();
        assert_eq!(frame, PreviewFrame { primary: 0, secondary: None });
    }

    #[test]
    fn current_index_is_clamped_when_list_shrinks() {
        let mut pane = PreviewPane { current_index: 4 };
        let shown = pane.frame(2, DisplayMode::Single).unwrap().primary;
        assert_eq!(shown, 1);

        pane.clamp_to(2);
        assert_eq!(pane.current_index(), shown);

        pane.clamp_to(5);
        assert_eq!(pane.current_index(), 1);

        pane.clamp_to(0);
        assert_eq!(pane.current_index(), 0);
        assert_eq!(pane.frame(0, DisplayMode::Pair), None);
    }

    #[test]
    fn fit_within_preserves_aspect() {
        let size = fit_within(vec2(400.0, 200.0), vec2(100.0, 100.0));
        assert_eq!(size, vec2(100.0, 50.0));

        let size = fit_within(vec2(100.0, 300.0), vec2(160.0, 90.0));
        assert!((size.x - 30.0).abs() < 1e-3, "width {}", size.x);
        assert!((size.y - 90.0).abs() < 1e-3, "height {}", size.y);

        assert_eq!(fit_within(Vec2::ZERO, vec2(10.0, 10.0)), Vec2::ZERO);
    }

    #[test]
    fn cover_uv_crops_the_long_side() {
        let uv = cover_uv(vec2(200.0, 100.0), vec2(100.0, 100.0));
        assert!((uv.min.x - 0.25).abs() < 1e-6);
        assert!((uv.max.x - 0.75).abs() < 1e-6);
        assert_eq!((uv.min.y, uv.max.y), (0.0, 1.0));

        let uv = cover_uv(vec2(100.0, 400.0), vec2(100.0, 100.0));
        assert_eq!((uv.min.x, uv.max.x), (0.0, 1.0));
        assert!((uv.min.y - 0.375).abs() < 1e-6);
    }
}
