pub mod context;
pub mod routes;
pub mod state;
pub mod views;
pub mod vm;

pub use context::{AppContext, UiApp, build_app_context};
pub use routes::{Route, RouteError};
pub use state::UiSession;
pub use vm::{Page, Presenter};
