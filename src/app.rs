use crate::editor::{SettingsUpdate, settings_card};
use crate::notifications::{Notification, Toasts};
use crate::preview::PreviewPane;
use crate::settings::DisplayMode;
use crate::slideshow::Slideshow;
use crate::textures::{EguiTextureLoader, PreviewTextures};
use crate::uploader::uploader_ui;

/// Preferences persisted between sessions. Slides are never persisted.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct Preferences {
    pub display_mode: DisplayMode,
}

pub struct SlideshowApp {
    prefs: Preferences,
    slideshow: Slideshow,
    textures: PreviewTextures<EguiTextureLoader>,
    preview: PreviewPane,
    toasts: Toasts,
}

impl SlideshowApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Load previous preferences (if any).
        // Note that you must enable the `persistence` feature for this to work.
        let prefs: Preferences = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        log::info!("Starting with display mode {:?}", prefs.display_mode);

        Self {
            prefs,
            slideshow: Slideshow::new(),
            textures: PreviewTextures::new(EguiTextureLoader::new(cc.egui_ctx.clone())),
            preview: PreviewPane::default(),
            toasts: Toasts::new(),
        }
    }

    fn display_mode_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Display Mode");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let before = self.prefs.display_mode;
                egui::ComboBox::from_id_salt("display_mode")
                    .selected_text(self.prefs.display_mode.to_string())
                    .width(160.0)
                    .show_ui(ui, |ui| {
                        for mode in DisplayMode::ALL {
                            ui.selectable_value(&mut self.prefs.display_mode, mode, mode.to_string());
                        }
                    });
                if self.prefs.display_mode != before {
                    log::debug!("Display mode: {:?}", self.prefs.display_mode);
                }
            });
        });
    }

    fn controls_column(&mut self, ui: &mut egui::Ui) {
        self.display_mode_ui(ui);
        ui.add_space(8.0);

        if let Some(images) = uploader_ui(ui, &mut self.toasts) {
            self.slideshow.add_images(images);
        }
        // Textures follow the image list before anything draws them.
        self.textures
            .sync(self.slideshow.generation(), self.slideshow.slides());

        ui.add_space(16.0);
        ui.heading("Preview");
        ui.add_space(8.0);
        self.preview.ui(
            ui,
            self.slideshow.slides(),
            &self.textures,
            self.prefs.display_mode,
        );
        ui.add_space(8.0);

        let export = egui::Button::new("Export Video")
            .min_size(egui::vec2(ui.available_width(), 32.0));
        if ui.add_enabled(self.slideshow.can_export(), export).clicked()
            && let Some(notice) = self.slideshow.export()
        {
            self.toasts.push(notice);
        }

        let clear = egui::Button::new("Clear all").min_size(egui::vec2(ui.available_width(), 24.0));
        if ui.add_enabled(!self.slideshow.is_empty(), clear).clicked() {
            let removed = self.slideshow.len();
            self.slideshow.clear();
            self.textures
                .sync(self.slideshow.generation(), self.slideshow.slides());
            self.toasts
                .push(Notification::info(format!("Removed {removed} images")));
        }
    }

    fn settings_column(&mut self, ui: &mut egui::Ui) {
        ui.heading("Image Settings");
        ui.add_space(8.0);

        if self.slideshow.is_empty() {
            ui.weak("Add images to configure their transitions.");
            return;
        }

        let mut updates: Vec<SettingsUpdate> = Vec::new();
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let slides = self.slideshow.slides();
                for (row, pair) in slides.chunks(2).enumerate() {
                    ui.columns(2, |columns| {
                        for (col, (ui, slide)) in columns.iter_mut().zip(pair).enumerate() {
                            let index = row * 2 + col;
                            let thumbnail = self.textures.get(slide.id);
                            updates.extend(settings_card(ui, index, slide, thumbnail));
                        }
                    });
                    ui.add_space(12.0);
                }
            });

        for update in updates {
            self.slideshow.update_settings(update.index, update.settings);
        }
    }
}

impl eframe::App for SlideshowApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.prefs);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.toasts.tick(ctx.input(|i| i.time));

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                // NOTE: no File->Quit on web pages!
                let is_web = cfg!(target_arch = "wasm32");
                if !is_web {
                    ui.menu_button("File", |ui| {
                        if ui.button("Quit").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                    ui.add_space(16.0);
                }

                egui::widgets::global_theme_preference_buttons(ui);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(egui::RichText::new("Slideshow Creator").size(30.0).strong());
            ui.weak("Create beautiful slideshows with custom transitions");
            ui.separator();

            ui.columns(2, |columns| {
                if let [left, right] = columns {
                    self.controls_column(left);
                    self.settings_column(right);
                }
            });

            ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                egui::warn_if_debug_build(ui);
            });
        });

        self.toasts.show(ctx);
    }
}
