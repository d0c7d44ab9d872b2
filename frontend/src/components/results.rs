use super::super::Model;
use shared::{DISEASE_DISCLAIMER, treatment_advice};
use yew::prelude::*;

pub fn render_results(model: &Model) -> Html {
    if let Some(record) = &model.result {
        let confidence = record.confidence * 100.0;

        html! {
            <div class="results-container">
                <div class="result-header">
                    <h2><i class="fa-solid fa-wand-magic-sparkles"></i>{" AI Analysis Complete"}</h2>
                    <p class="detection-summary">
                        {"Initial detection: "}
                        <span class="disease-badge">
                            { format!("{} ({:.0}% confidence)", record.disease_label, confidence) }
                        </span>
                    </p>
                    <div class="confidence-meter">
                        <div class="meter-label">{"Confidence:"}</div>
                        <div class="meter">
                            <div class="meter-fill" style={format!("width: {}%", confidence)}></div>
                        </div>
                        <div class="meter-value">{format!("{:.1}%", confidence)}</div>
                    </div>
                </div>
                <div class="suggestion-panel">
                    <h3><i class="fa-solid fa-circle-info"></i>{" AI Suggestion & Guidance"}</h3>
                    <p>{ record.suggestion_text.clone() }</p>
                </div>
                <div class="treatment-panel">
                    <h3>{"Basic Treatment Advice"}</h3>
                    <p>{ treatment_advice(record.crop_type) }</p>
                </div>
                <div class="disclaimer">
                    <i class="fa-solid fa-circle-exclamation"></i>
                    <p>{ DISEASE_DISCLAIMER }</p>
                </div>
            </div>
        }
    } else {
        html! {}
    }
}
