use super::super::{Model, Msg};
use shared::CropType;
use std::str::FromStr;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

/// Renders the crop dropdown. Values are the catalog's wire spellings while
/// the visible text uses plain-English labels.
pub fn render_crop_selector(model: &Model, ctx: &Context<Model>) -> Html {
    let onchange = ctx.link().callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::CropSelected(CropType::from_str(&select.value()).ok())
    });

    html! {
        <div class="crop-selector">
            <label for="crop-select">{"1. Select your crop"}</label>
            <select id="crop-select" onchange={onchange} disabled={model.loading}>
                <option value="" selected={model.selected_crop.is_none()}>
                    {"-- Choose a crop --"}
                </option>
                {
                    for CropType::all().map(|crop| {
                        html! {
                            <option
                                value={crop.to_string()}
                                selected={model.selected_crop == Some(crop)}
                            >
                                { crop.label() }
                            </option>
                        }
                    })
                }
            </select>
        </div>
    }
}
