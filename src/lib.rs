//! Slideshow creator: upload images, give each one entry/exit transitions and
//! timings, and preview them one at a time or in pairs.
//!
//! Runs natively through `eframe` and in the browser as wasm.
#![warn(clippy::all, rust_2018_idioms)]

mod app;
pub mod editor;
pub mod file_picker;
pub mod notifications;
pub mod preview;
pub mod settings;
pub mod slideshow;
pub mod textures;
pub mod upload;
pub mod uploader;

pub use app::{Preferences, SlideshowApp};

/// Window and storage title.
pub const APP_NAME: &str = "Slideshow Creator";

impl SlideshowApp {
    /// Run the app natively with the provided `NativeOptions`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run(options: eframe::NativeOptions) -> Result<(), eframe::Error> {
        eframe::run_native(
            APP_NAME,
            options,
            Box::new(|cc| Ok(Box::new(Self::new(cc)))),
        )
    }
}
