pub mod forms;
pub mod models;
pub mod preview;
pub mod validation;
pub mod voices;
