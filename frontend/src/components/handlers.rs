use super::super::{ImageData, Model, Msg};
use super::utils::first_image_file;
use crate::api::{HttpAdvisor, HttpClassifier};
use crate::storage::LocalStorageHistory;
use gloo_file::futures::read_as_data_url;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{CropType, DetectError, DetectionRecord, HistoryStore, ImageDataUri, run_detection};
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList};
use yew::prelude::*;

pub fn handle_crop_selected(model: &mut Model, crop: Option<CropType>) -> bool {
    model.selected_crop = crop;
    model.result = None;
    model.error = None;
    true
}

pub fn handle_image_selected(model: &mut Model, ctx: &Context<Model>, file: GlooFile) -> bool {
    model.image_seq += 1;
    let seq = model.image_seq;

    let preview_url = ObjectUrl::from(file.clone());
    model.image = Some(ImageData {
        file: file.clone(),
        preview_url,
        data_uri: None,
    });
    model.result = None;
    model.error = None;

    // Encoding runs in the background; the seq ties the result to this image.
    let link = ctx.link().clone();
    spawn_local(async move {
        let encoded = read_as_data_url(&file)
            .await
            .map(ImageDataUri::new)
            .map_err(|e| format!("Could not read the image file: {}", e));
        link.send_message(Msg::ImageEncoded(seq, encoded));
    });

    true
}

pub fn handle_image_encoded(
    model: &mut Model,
    seq: u64,
    result: Result<ImageDataUri, String>,
) -> bool {
    // Stale read: the image was replaced or cleared while encoding.
    if seq != model.image_seq {
        return false;
    }

    match result {
        Ok(data_uri) => {
            if let Some(image) = model.image.as_mut() {
                image.data_uri = Some(data_uri);
                true
            } else {
                false
            }
        }
        Err(message) => {
            log::error!("Image encoding failed: {}", message);
            model.image = None;
            model.error = Some(message);
            true
        }
    }
}

pub fn handle_clear_image(model: &mut Model) -> bool {
    model.image_seq += 1;
    model.image = None;
    model.result = None;
    model.error = None;
    true
}

pub fn handle_detect(model: &mut Model, ctx: &Context<Model>) -> bool {
    let crop = model.selected_crop;
    let data_uri = model.image.as_ref().and_then(|image| image.data_uri.clone());

    if crop.is_none() || model.image.is_none() {
        model.error = Some("Please select a crop and upload an image.".into());
        return true;
    }
    if data_uri.is_none() {
        model.error = Some("The image is still being prepared. Try again in a moment.".into());
        return true;
    }

    model.loading = true;
    model.error = None;
    model.result = None;

    let classifier = HttpClassifier::new(model.config.predict_endpoint.clone());
    let advisor = HttpAdvisor::new(model.config.advisory.clone());
    let link = ctx.link().clone();

    spawn_local(async move {
        let outcome = run_detection(
            &classifier,
            &advisor,
            &LocalStorageHistory,
            crop,
            data_uri.as_ref(),
        )
        .await;
        link.send_message(Msg::DetectionFinished(outcome));
    });

    true
}

pub fn handle_detection_finished(
    model: &mut Model,
    result: Result<DetectionRecord, DetectError>,
) -> bool {
    model.loading = false;

    match result {
        Ok(record) => {
            log::info!(
                "Detection complete: {} ({:.0}%)",
                record.disease_label,
                record.confidence * 100.0
            );
            model.result = Some(record);
            model.history = LocalStorageHistory.all();
            model.error = None;
        }
        Err(e) => {
            log::error!("Detection failed: {}", e);
            model.error = Some(format!("Failed to detect disease: {}", e));
        }
    }

    true
}

pub fn handle_toggle_history(model: &mut Model) -> bool {
    model.show_history = !model.show_history;
    if model.show_history {
        model.history = LocalStorageHistory.all();
    }
    true
}

pub fn handle_clear_history(model: &mut Model) -> bool {
    LocalStorageHistory.clear();
    model.history.clear();
    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            process_file_list(ctx, file_list);
        }
    }

    true
}

pub fn handle_paste(_model: &mut Model, ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if let Some(data_transfer) = event.clipboard_data() {
        if let Some(file_list) = data_transfer.files() {
            event.prevent_default();
            process_file_list(ctx, file_list);
            return true;
        }
    }
    false
}

pub fn process_file_list(ctx: &Context<Model>, file_list: FileList) {
    match first_image_file(&file_list) {
        Some(file) => ctx.link().send_message(Msg::ImageSelected(file)),
        None => {
            log::warn!("Dropped or pasted content contained no image file");
            ctx.link().send_message(Msg::SetError(Some(
                "No image found in the dropped or pasted content.".into(),
            )));
        }
    }
}
