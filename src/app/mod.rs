pub mod document;
pub mod error;
pub mod input;
pub mod messages;
pub mod settings;
pub mod state;
pub mod tab_registry;
pub mod text_ops;
pub mod theme_store;
