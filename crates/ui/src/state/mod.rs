//! Session state machines.
//!
//! Each machine has a defined initial state and a single `apply` transition
//! function. Intents that are not valid in the current state are answered
//! with `Transition::Ignored` and leave the state untouched.

mod layout;
mod login;
mod playback;
mod session;
mod theme;

pub use layout::{LayoutIntent, LayoutState};
pub use login::{LoginState, LoginStatus};
pub use playback::{PlaybackIntent, PlaybackState, PlaybackStatus};
pub use session::UiSession;
pub use theme::{ThemeIntent, ThemeState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored,
}

impl Transition {
    #[must_use]
    pub fn is_applied(self) -> bool {
        self == Transition::Applied
    }
}
