mod render;
mod state;

pub use render::render_page;
pub use state::{ViewError, ViewState};
