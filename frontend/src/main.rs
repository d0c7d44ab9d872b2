use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{CropType, DetectError, DetectionRecord, DetectorConfig, HistoryStore, ImageDataUri};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

mod api;
mod components;
mod storage;

use components::{crop_selector, handlers, header, history_view, results, upload_section, utils};
use storage::LocalStorageHistory;

// Models
#[derive(Clone)]
struct ImageData {
    file: GlooFile,
    preview_url: ObjectUrl,
    data_uri: Option<ImageDataUri>,
}

// Yew msg components
enum Msg {
    // Input selection
    CropSelected(Option<CropType>),
    ImageSelected(GlooFile),
    ImageEncoded(u64, Result<ImageDataUri, String>),
    ClearImage,

    // Detection flow
    Detect,
    DetectionFinished(Result<DetectionRecord, DetectError>),

    // UI states
    SetError(Option<String>),
    SetDragging(bool),
    ToggleHistory,
    ClearHistory,

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

// Main component
struct Model {
    selected_crop: Option<CropType>,
    image: Option<ImageData>,
    image_seq: u64,
    loading: bool,
    error: Option<String>,
    result: Option<DetectionRecord>,
    history: Vec<DetectionRecord>,
    show_history: bool,
    is_dragging: bool,
    paste_listener: Option<EventListener>,
    config: DetectorConfig,
}

// Yew component implementation
impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut model = Self {
            selected_crop: None,
            image: None,
            image_seq: 0,
            loading: false,
            error: None,
            result: None,
            history: LocalStorageHistory.all(),
            show_history: false,
            is_dragging: false,
            paste_listener: None,
            config: DetectorConfig::default(),
        };

        let link = ctx.link().clone();
        let window = web_sys::window().expect("no global `window` exists");
        let listener = EventListener::new(&window, "paste", move |event| {
            if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                link.send_message(Msg::HandlePaste(clipboard_event.clone()));
            }
        });
        model.paste_listener = Some(listener);

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // Input selection
            Msg::CropSelected(crop) => handlers::handle_crop_selected(self, crop),
            Msg::ImageSelected(file) => handlers::handle_image_selected(self, ctx, file),
            Msg::ImageEncoded(seq, result) => handlers::handle_image_encoded(self, seq, result),
            Msg::ClearImage => handlers::handle_clear_image(self),

            // Detection flow
            Msg::Detect => handlers::handle_detect(self, ctx),
            Msg::DetectionFinished(result) => handlers::handle_detection_finished(self, result),

            // UI states
            Msg::SetError(error) => {
                self.error = error;
                self.loading = false;
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::ToggleHistory => handlers::handle_toggle_history(self),
            Msg::ClearHistory => handlers::handle_clear_history(self),

            // Input events
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { header::render_header() }

                <main class="main-content">
                    { crop_selector::render_crop_selector(self, ctx) }
                    { upload_section::render_upload_section(self, ctx) }
                    { utils::render_error_message(self) }
                    { results::render_results(self) }
                    { history_view::render_history(self, ctx) }
                </main>

                <footer class="app-footer">
                    <p>{"LeafScan | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("LeafScan starting...");
    yew::Renderer::<Model>::new().render();
}
