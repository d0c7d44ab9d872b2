pub mod crop_selector;
pub mod handlers;
pub mod header;
pub mod history_view;
pub mod results;
pub mod upload_section;
pub mod utils;
