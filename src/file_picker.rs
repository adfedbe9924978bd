// Cross-platform image picker. On wasm we create a hidden <input type=file multiple> and read
// every selected file with a FileReader; the whole selection arrives as one batch on a later
// frame through `take_picked_files`. On native the rfd dialog blocks and returns the files
// directly.

use crate::upload::UploadedFile;

/// Collects the files of one selection whose reads finish in any order.
///
/// The batch is handed out once every slot has completed, in selection order.
/// Failed reads complete their slot with `None` and are left out.
#[cfg(any(target_arch = "wasm32", test))]
#[derive(Debug)]
pub(crate) struct PendingBatch {
    slots: Vec<Option<UploadedFile>>,
    remaining: usize,
}

#[cfg(any(target_arch = "wasm32", test))]
impl PendingBatch {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
            remaining: len,
        }
    }

    /// Records the outcome for `index`. Returns the finished batch when this was the last read.
    pub(crate) fn complete(
        &mut self,
        index: usize,
        file: Option<UploadedFile>,
    ) -> Option<Vec<UploadedFile>> {
        if self.remaining == 0 {
            return None;
        }
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = file;
        }
        self.remaining -= 1;
        (self.remaining == 0).then(|| self.slots.drain(..).flatten().collect())
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::PendingBatch;
    use crate::upload::{SUPPORTED_EXTENSIONS, UploadedFile};
    use js_sys::Uint8Array;
    use once_cell::sync::Lazy;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Mutex;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::JsValue;
    use wasm_bindgen::closure::Closure;
    use web_sys::{FileReader, HtmlInputElement};

    /// Completed selections, one entry per batch.
    static PICKED: Lazy<Mutex<Vec<Vec<UploadedFile>>>> = Lazy::new(|| Mutex::new(Vec::new()));

    type SharedBatch = Rc<RefCell<PendingBatch>>;

    fn accept_attribute() -> String {
        let mut accept = String::from("image/*");
        for ext in SUPPORTED_EXTENSIONS {
            accept.push_str(",.");
            accept.push_str(ext);
        }
        accept
    }

    pub fn open_image_picker(ctx: &egui::Context) {
        log::debug!("file_picker: opening browser picker");
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(input) = document
            .create_element("input")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };

        input.set_type("file");
        input.set_multiple(true);
        input.set_accept(&accept_attribute());
        // Off-screen rather than display:none; some browsers block clicks on hidden inputs.
        let _ = input.set_attribute(
            "style",
            "position: fixed; left: -9999px; width: 1px; height: 1px; opacity: 0;",
        );
        if let Some(body) = document.body() {
            let _ = body.append_child(&input);
        }

        let ctx = ctx.clone();
        let onchange = Closure::once(Box::new(move |ev: web_sys::Event| {
            let Some(input) = ev.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            input.remove();
            let Some(files) = input.files() else {
                return;
            };
            let count = files.length() as usize;
            if count == 0 {
                return;
            }
            let batch: SharedBatch = Rc::new(RefCell::new(PendingBatch::new(count)));
            for index in 0..count {
                match files.get(index as u32) {
                    Some(file) => read_file(file, index, Rc::clone(&batch), ctx.clone()),
                    None => finish(&batch, index, None, &ctx),
                }
            }
        }) as Box<dyn FnOnce(_)>);

        // A dismissed dialog fires `cancel` instead of `change`; drop the element either way.
        let oncancel = Closure::once(Box::new(move |ev: web_sys::Event| {
            if let Some(input) = ev.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
                input.remove();
            }
        }) as Box<dyn FnOnce(_)>);

        input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
        input.set_oncancel(Some(oncancel.as_ref().unchecked_ref()));
        onchange.forget(); // keep alive
        oncancel.forget();

        input.click();
    }

    fn finish(batch: &SharedBatch, index: usize, file: Option<UploadedFile>, ctx: &egui::Context) {
        let Some(done) = batch.borrow_mut().complete(index, file) else {
            return;
        };
        log::debug!("file_picker: selection of {} file(s) ready", done.len());
        if let Ok(mut picked) = PICKED.lock() {
            picked.push(done);
        }
        ctx.request_repaint();
    }

    fn read_file(file: web_sys::File, index: usize, batch: SharedBatch, ctx: egui::Context) {
        let Ok(reader) = FileReader::new() else {
            log::warn!("file_picker: FileReader unavailable");
            finish(&batch, index, None, &ctx);
            return;
        };
        let name = file.name();
        let mime = file.type_();

        let reader_in_cb = reader.clone();
        let load_batch = Rc::clone(&batch);
        let load_ctx = ctx.clone();
        let onload = Closure::once(Box::new(move |_e: JsValue| {
            let uploaded = match reader_in_cb.result() {
                Ok(result) => Some(UploadedFile::new(name, mime, Uint8Array::new(&result).to_vec())),
                Err(_) => {
                    log::warn!("file_picker: no result for '{name}'");
                    None
                }
            };
            finish(&load_batch, index, uploaded, &load_ctx);
        }) as Box<dyn FnOnce(_)>);

        let error_batch = Rc::clone(&batch);
        let error_ctx = ctx.clone();
        let error_name = file.name();
        let onerror = Closure::once(Box::new(move |_e: JsValue| {
            log::warn!("file_picker: failed to read '{error_name}'");
            finish(&error_batch, index, None, &error_ctx);
        }) as Box<dyn FnOnce(_)>);

        reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onload.forget();
        onerror.forget();

        if reader.read_as_array_buffer(&file).is_err() {
            log::warn!("file_picker: could not start reading '{}'", file.name());
            finish(&batch, index, None, &ctx);
        }
    }

    pub fn take_picked_files() -> Vec<Vec<UploadedFile>> {
        PICKED
            .lock()
            .map(|mut picked| std::mem::take(&mut *picked))
            .unwrap_or_default()
    }
}

/// Opens the browser picker; the selection arrives later through [`take_picked_files`].
#[cfg(target_arch = "wasm32")]
pub fn pick_images(ctx: &egui::Context) -> Vec<UploadedFile> {
    web::open_image_picker(ctx);
    Vec::new()
}

/// Selections completed since the last call, one `Vec` per selection.
#[cfg(target_arch = "wasm32")]
pub use web::take_picked_files;

/// Shows the native dialog and reads the chosen files. Unreadable files are skipped.
#[cfg(not(target_arch = "wasm32"))]
pub fn pick_images(_ctx: &egui::Context) -> Vec<UploadedFile> {
    let Some(paths) = rfd::FileDialog::new()
        .add_filter("Image", crate::upload::SUPPORTED_EXTENSIONS)
        .pick_files()
    else {
        return Vec::new();
    };
    paths
        .iter()
        .filter_map(|path| match UploadedFile::from_path(path) {
            Ok(file) => Some(file),
            Err(err) => {
                log::warn!("{err}");
                None
            }
        })
        .collect()
}

// Native picks are returned synchronously by `pick_images`.
#[cfg(not(target_arch = "wasm32"))]
pub fn take_picked_files() -> Vec<Vec<UploadedFile>> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> UploadedFile {
        UploadedFile::new(name, "", vec![0u8; 3])
    }

    fn names(batch: &[UploadedFile]) -> Vec<&str> {
        batch.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn batch_is_released_only_after_the_last_read() {
        let mut batch = PendingBatch::new(3);

        assert!(batch.complete(0, Some(file("a.png"))).is_none());
        assert!(batch.complete(2, Some(file("c.png"))).is_none());

        let done = batch.complete(1, Some(file("b.png"))).unwrap();
        assert_eq!(names(&done), ["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn out_of_order_completion_keeps_selection_order() {
        let mut batch = PendingBatch::new(3);

        assert!(batch.complete(2, Some(file("c.png"))).is_none());
        assert!(batch.complete(1, Some(file("b.png"))).is_none());

        let done = batch.complete(0, Some(file("a.png"))).unwrap();
        assert_eq!(names(&done), ["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn failed_reads_count_toward_completion() {
        let mut batch = PendingBatch::new(2);

        assert!(batch.complete(1, None).is_none());
        let done = batch.complete(0, Some(file("a.png"))).unwrap();
        assert_eq!(names(&done), ["a.png"]);
    }

    #[test]
    fn completed_batch_is_handed_out_once() {
        let mut batch = PendingBatch::new(1);
        assert!(batch.complete(0, Some(file("a.png"))).is_some());
        assert!(batch.complete(0, Some(file("again.png"))).is_none());
    }
}
