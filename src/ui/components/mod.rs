mod empty_message;
mod error_box;
mod help;
mod status;

/// Small reusable paragraphs shared by the screens.
pub struct UiComponent;
