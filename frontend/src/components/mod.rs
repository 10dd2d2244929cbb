pub mod agent_modal;
pub mod create_character;
pub mod form_field;
pub mod home;
pub mod nav;
pub mod toaster;
