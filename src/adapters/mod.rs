pub mod form_store;
pub mod text_renderer;
