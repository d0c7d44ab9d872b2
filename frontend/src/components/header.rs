use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-seedling"></i> {" LeafScan | Crop Disease Detection"}</h1>
            <p class="subtitle">{"Upload a photo of an affected plant leaf to get an AI-powered analysis"}</p>
        </header>
    }
}
