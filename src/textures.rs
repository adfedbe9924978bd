//! GPU textures derived from the uploaded images.
//!
//! Each image gets one texture while it is part of the slideshow. When the
//! image list changes every previously acquired texture is released before new
//! ones are created, and whatever is still held is released on drop.

use crate::slideshow::{Slide, SlideId};
use crate::upload::UploadedFile;

/// Longest side of an uploaded texture; larger images are downscaled.
pub const MAX_TEXTURE_SIDE: u32 = 2048;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("could not decode '{name}': {source}")]
    Image {
        name: String,
        #[source]
        source: image::ImageError,
    },
}

/// Creates and frees the per-image preview resource.
pub trait TextureLoader {
    type Handle;

    fn load(&mut self, name: &str, file: &UploadedFile) -> Result<Self::Handle, DecodeError>;

    fn release(&mut self, handle: Self::Handle);
}

/// One texture slot per slide, keyed by slide id and rebuilt whenever the
/// image list generation changes.
pub struct PreviewTextures<L: TextureLoader> {
    loader: L,
    handles: Vec<(SlideId, Option<L::Handle>)>,
    synced: Option<u64>,
}

impl<L: TextureLoader> PreviewTextures<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            handles: Vec::new(),
            synced: None,
        }
    }

    /// Rebuilds the textures if `generation` differs from the last sync.
    pub fn sync(&mut self, generation: u64, slides: &[Slide]) {
        if self.synced == Some(generation) {
            return;
        }
        self.release_all();

        self.handles = slides
            .iter()
            .map(|slide| {
                let handle = match self.loader.load(&slide.id.to_string(), &slide.image) {
                    Ok(handle) => Some(handle),
                    Err(err) => {
                        log::warn!("{err}");
                        None
                    }
                };
                (slide.id, handle)
            })
            .collect();
        self.synced = Some(generation);
        log::debug!("Preview textures synced for generation {generation}");
    }

    pub fn get(&self, id: SlideId) -> Option<&L::Handle> {
        self.handles
            .iter()
            .find(|(slot, _)| *slot == id)
            .and_then(|(_, handle)| handle.as_ref())
    }

    fn release_all(&mut self) {
        for handle in self.handles.drain(..).filter_map(|(_, handle)| handle) {
            self.loader.release(handle);
        }
    }
}

impl<L: TextureLoader> Drop for PreviewTextures<L> {
    fn drop(&mut self) {
        self.release_all();
    }
}

/// Decodes images with the `image` crate and uploads them through egui.
pub struct EguiTextureLoader {
    ctx: egui::Context,
}

impl EguiTextureLoader {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl TextureLoader for EguiTextureLoader {
    type Handle = egui::TextureHandle;

    fn load(&mut self, name: &str, file: &UploadedFile) -> Result<Self::Handle, DecodeError> {
        let image = decode(file)?;
        Ok(self.ctx.load_texture(name, image, egui::TextureOptions::LINEAR))
    }

    fn release(&mut self, handle: Self::Handle) {
        // egui frees the texture when the last handle goes away.
        drop(handle);
    }
}

/// Decodes an uploaded file into an egui image, downscaling oversized ones.
pub fn decode(file: &UploadedFile) -> Result<egui::ColorImage, DecodeError> {
    let mut img = image::load_from_memory(&file.bytes).map_err(|source| DecodeError::Image {
        name: file.name.clone(),
        source,
    })?;
    if img.width() > MAX_TEXTURE_SIDE || img.height() > MAX_TEXTURE_SIDE {
        img = img.thumbnail(MAX_TEXTURE_SIDE, MAX_TEXTURE_SIDE);
    }
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
