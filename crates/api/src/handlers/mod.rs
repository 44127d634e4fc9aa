pub mod hooks;
pub mod settings;
