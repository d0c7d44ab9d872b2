use super::super::{Model, Msg};
use super::utils::debounce;
use chrono::Local;
use shared::DetectionRecord;
use yew::prelude::*;

pub fn render_history(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <div class="history-section">
            <button
                id="history-toggle"
                class="analyze-btn"
                onclick={ctx.link().callback(|_| Msg::ToggleHistory)}
            >
                <i class="fa-solid fa-clock-rotate-left"></i>
                { if model.show_history { " Hide Scan History" } else { " View Scan History" } }
            </button>
            { if model.show_history { render_history_panel(model, ctx) } else { html! {} } }
        </div>
    }
}

fn render_history_panel(model: &Model, ctx: &Context<Model>) -> Html {
    if model.history.is_empty() {
        return html! {
            <div class="history-empty">
                <h3><i class="fa-solid fa-triangle-exclamation"></i>{" No Scan History Found"}</h3>
                <p>
                    {"You haven't performed any crop disease detections yet. \
                      Upload a leaf photo above to start analyzing your crops."}
                </p>
            </div>
        };
    }

    let link = ctx.link().clone();

    html! {
        <div class="history-panel">
            <div class="history-header">
                <h2>{"Scan History"}</h2>
                <button
                    id="clear-history-btn"
                    class="analyze-btn"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::ClearHistory)
                    })}
                >
                    <i class="fa-solid fa-trash"></i>{" Clear History"}
                </button>
            </div>
            <ul class="history-list">
                { for model.history.iter().map(render_history_item) }
            </ul>
        </div>
    }
}

fn render_history_item(record: &DetectionRecord) -> Html {
    let when = record
        .created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string();

    html! {
        <li class="history-item" key={record.id.to_string()}>
            <div class="history-item-header">
                <span class="history-title">{ format!("{} Scan", record.crop_type.label()) }</span>
                <span class="history-date">
                    <i class="fa-regular fa-calendar-days"></i>{ format!(" {}", when) }
                </span>
            </div>
            <p>
                <strong>{"Initial Detection: "}</strong>
                { format!("{} ({:.0}% confidence)", record.disease_label, record.confidence * 100.0) }
            </p>
            <p class="history-suggestion">
                <strong>{"AI Suggestion: "}</strong>{ record.suggestion_text.clone() }
            </p>
        </li>
    }
}
