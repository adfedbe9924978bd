//! The authoritative slideshow state: ordered slides, each pairing an
//! uploaded image with its transition settings.

use crate::notifications::Notification;
use crate::settings::SlideSettings;
use crate::upload::UploadedFile;

pub const EXPORT_NOTICE: &str = "Export started! This feature is coming soon.";

/// Stable identity of a slide, independent of its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlideId(u64);

impl SlideId {
    fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for SlideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slide_{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Slide {
    pub id: SlideId,
    pub image: UploadedFile,
    pub settings: SlideSettings,
}

#[derive(Debug, Default)]
pub struct Slideshow {
    slides: Vec<Slide>,
    /// Bumped whenever the image list changes; resources derived from the
    /// images are rebuilt when this moves.
    generation: u64,
}

impl Slideshow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn images(&self) -> impl ExactSizeIterator<Item = &UploadedFile> {
        self.slides.iter().map(|s| &s.image)
    }

    pub fn settings(&self) -> impl ExactSizeIterator<Item = &SlideSettings> {
        self.slides.iter().map(|s| &s.settings)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Appends one slide per file, each with default settings.
    pub fn add_images(&mut self, files: impl IntoIterator<Item = UploadedFile>) {
        let before = self.slides.len();
        self.slides.extend(files.into_iter().map(|image| Slide {
            id: SlideId::next(),
            image,
            settings: SlideSettings::default(),
        }));
        if self.slides.len() != before {
            self.generation += 1;
            log::debug!(
                "Added {} slide(s), {} total",
                self.slides.len() - before,
                self.slides.len()
            );
        }
    }

    /// Replaces the settings of the slide at `index`. Returns `false` if there is none.
    pub fn update_settings(&mut self, index: usize, settings: SlideSettings) -> bool {
        match self.slides.get_mut(index) {
            Some(slide) => {
                slide.settings = settings;
                log::debug!("Slide {index} settings: {settings:?}");
                true
            }
            None => {
                log::warn!("Ignoring settings update for missing slide {index}");
                false
            }
        }
    }

    /// Removes every slide.
    pub fn clear(&mut self) {
        if self.slides.is_empty() {
            return;
        }
        self.slides.clear();
        self.generation += 1;
        log::debug!("Cleared all slides");
    }

    pub fn can_export(&self) -> bool {
        !self.is_empty()
    }

    /// Video export is not available yet; only reports that.
    pub fn export(&self) -> Option<Notification> {
        self.can_export()
            .then(|| Notification::success(EXPORT_NOTICE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Direction, SettingChange};

    fn image(name: &str) -> UploadedFile {
        UploadedFile::new(name, "", vec![0u8; 8])
    }

    #[test]
    fn adding_images_appends_default_settings() {
        let mut show = Slideshow::new();
        show.add_images([image("a.png"), image("b.png")]);

        assert_eq!(show.images().len(), 2);
        assert_eq!(show.settings().len(), 2);
        assert!(show.settings().all(|s| *s == SlideSettings::default()));
    }

    #[test]
    fn lengths_stay_aligned_across_appends() {
        let mut show = Slideshow::new();
        for batch in [1usize, 0, 3, 2] {
            show.add_images((0..batch).map(|i| image(&format!("{i}.jpg"))));
            assert_eq!(show.images().len(), show.settings().len());
        }
        assert_eq!(show.len(), 6);
    }

    #[test]
    fn update_replaces_only_the_target_slot() {
        let mut show = Slideshow::new();
        show.add_images([image("a.png"), image("b.png"), image("c.png")]);
        let before = show.slides().to_vec();

        let updated = SlideSettings::default()
            .with_change(SettingChange::EntryDirection(Direction::Top));
        assert!(show.update_settings(0, updated));

        let after = show.slides();
        assert_eq!(after[0].settings.entry_direction, Direction::Top);
        assert_eq!(after[0].id, before[0].id);
        for (old, new) in before.iter().zip(after).skip(1) {
            assert_eq!(old.id, new.id);
            assert_eq!(old.settings, new.settings);
        }
    }

    #[test]
    fn update_out_of_range_is_ignored() {
        let mut show = Slideshow::new();
        show.add_images([image("a.png")]);
        assert!(!show.update_settings(5, SlideSettings::default()));
        assert_eq!(show.len(), 1);
    }

    #[test]
    fn generation_moves_only_when_image_list_changes() {
        let mut show = Slideshow::new();
        let g0 = show.generation();

        show.add_images(Vec::new());
        assert_eq!(show.generation(), g0);

        show.add_images([image("a.png")]);
        let g1 = show.generation();
        assert_ne!(g1, g0);

        show.update_settings(0, SlideSettings::default());
        assert_eq!(show.generation(), g1);

        show.clear();
        assert_ne!(show.generation(), g1);
        assert!(show.is_empty());
    }

    #[test]
    fn export_requires_images_and_changes_nothing() {
        let mut show = Slideshow::new();
        assert!(!show.can_export());
        assert!(show.export().is_none());

        show.add_images([image("a.png")]);
        let generation = show.generation();
        let notice = show.export().unwrap();
        assert_eq!(notice.message(), EXPORT_NOTICE);
        assert_eq!(show.len(), 1);
        assert_eq!(show.generation(), generation);
    }

    #[test]
    fn slide_ids_are_unique() {
        let mut show = Slideshow::new();
        show.add_images([image("a.png"), image("a.png")]);
        assert_ne!(show.slides()[0].id, show.slides()[1].id);
    }

    #[test]
    fn slide_id_names_are_distinct() {
        let mut show = Slideshow::new();
        show.add_images([image("a.png"), image("b.png")]);
        let names: Vec<_> = show.slides().iter().map(|s| s.id.to_string()).collect();
        assert!(names.iter().all(|name| name.starts_with("slide_")));
        assert_ne!(names[0], names[1]);
    }
}
