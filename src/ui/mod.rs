pub mod composer;
pub mod header;
pub mod settings_modal;
pub mod toast;
