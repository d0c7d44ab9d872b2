use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Crops covered by the detection model. Serialized values are the exact
/// strings the prediction service expects, which is why a few variants carry
/// the dataset's unusual spellings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum CropType {
    Apple,
    Blueberry,
    #[serde(rename = "Cherry_(including_sour)")]
    #[strum(serialize = "Cherry_(including_sour)")]
    Cherry,
    #[serde(rename = "Corn_(maize)")]
    #[strum(serialize = "Corn_(maize)")]
    Corn,
    Grape,
    Orange,
    Peach,
    #[serde(rename = "Pepper,_bell")]
    #[strum(serialize = "Pepper,_bell")]
    BellPepper,
    Potato,
    Raspberry,
    Soybean,
    Squash,
    Strawberry,
    Tomato,
}

impl CropType {
    /// All crops, in catalog order.
    pub fn all() -> impl Iterator<Item = CropType> {
        <CropType as strum::IntoEnumIterator>::iter()
    }

    /// Human-readable name for the UI. The `Display` impl keeps the wire
    /// spelling, so it stays out of user-facing text.
    pub fn label(&self) -> &'static str {
        match self {
            CropType::Apple => "Apple",
            CropType::Blueberry => "Blueberry",
            CropType::Cherry => "Cherry (including sour)",
            CropType::Corn => "Corn (maize)",
            CropType::Grape => "Grape",
            CropType::Orange => "Orange",
            CropType::Peach => "Peach",
            CropType::BellPepper => "Pepper, bell",
            CropType::Potato => "Potato",
            CropType::Raspberry => "Raspberry",
            CropType::Soybean => "Soybean",
            CropType::Squash => "Squash",
            CropType::Strawberry => "Strawberry",
            CropType::Tomato => "Tomato",
        }
    }
}

/// Disease classes in model output order. The order must match the model's
/// prediction vector exactly; `select_prediction` rejects any length drift.
pub const DISEASE_LABELS: [&str; 38] = [
    "Apple___Apple_scab",
    "Apple___Black_rot",
    "Apple___Cedar_apple_rust",
    "Apple___healthy",
    "Blueberry___healthy",
    "Cherry_(including_sour)___Powdery_mildew",
    "Cherry_(including_sour)___healthy",
    "Corn_(maize)___Cercospora_leaf_spot Gray_leaf_spot",
    "Corn_(maize)___Common_rust_",
    "Corn_(maize)___Northern_Leaf_Blight",
    "Corn_(maize)___healthy",
    "Grape___Black_rot",
    "Grape___Esca_(Black_Measles)",
    "Grape___Leaf_blight_(Isariopsis_Leaf_Spot)",
    "Grape___healthy",
    "Orange___Haunglongbing_(Citrus_greening)",
    "Peach___Bacterial_spot",
    "Peach___healthy",
    "Pepper,_bell___Bacterial_spot",
    "Pepper,_bell___healthy",
    "Potato___Early_blight",
    "Potato___Late_blight",
    "Potato___healthy",
    "Raspberry___healthy",
    "Soybean___healthy",
    "Squash___Powdery_mildew",
    "Strawberry___Leaf_scorch",
    "Strawberry___healthy",
    "Tomato___Bacterial_spot",
    "Tomato___Early_blight",
    "Tomato___Late_blight",
    "Tomato___Leaf_Mold",
    "Tomato___Septoria_leaf_spot",
    "Tomato___Spider_mites Two-spotted_spider_mite",
    "Tomato___Target_Spot",
    "Tomato___Tomato_Yellow_Leaf_Curl_Virus",
    "Tomato___Tomato_mosaic_virus",
    "Tomato___healthy",
];

/// Basic treatment notes shown under the result, keyed by crop with a
/// general fallback.
pub fn treatment_advice(crop: CropType) -> &'static str {
    match crop {
        CropType::Corn => {
            "For Maize Common Rust: While often not requiring chemical control in commercial \
             maize, severe infections can be managed with fungicides like Propiconazole or \
             Mancozeb. Plant resistant hybrids where possible."
        }
        CropType::Apple => {
            "For Apple diseases like Scab or Rust: Pruning, proper sanitation, and timely \
             fungicide applications (e.g., myclobutanil, captan) are key. Consult local guidance \
             for specific recommendations."
        }
        CropType::Tomato => {
            "For Tomato diseases like Blight or Spot: Ensure good air circulation, avoid \
             overhead watering, rotate crops, and use appropriate fungicides (e.g., copper-based, \
             chlorothalonil) if needed, following expert advice."
        }
        _ => {
            "General advice: Ensure proper field sanitation, use disease-resistant varieties if \
             available, and ensure balanced fertilization. For specific chemical treatments, \
             consult a local agricultural extension office."
        }
    }
}

pub const DISEASE_DISCLAIMER: &str =
    "Disclaimer: This tool provides preliminary suggestions and is not a substitute for \
     professional agricultural advice. Disease patterns can vary by location and conditions. \
     Always consult with a local agricultural expert or extension office for an accurate \
     diagnosis and treatment plan.";

/// Fixed description of the uploaded photo, forwarded to the advisory model.
pub const LEAF_IMAGE_DESCRIPTION: &str =
    "A close-up image of a plant leaf, potentially showing signs of disease like discoloration \
     or spots.";
