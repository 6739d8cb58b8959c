use course_core::model::ThemeMode;

use super::Transition;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeIntent {
    Toggle,
    Set(ThemeMode),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThemeState {
    mode: ThemeMode,
}

impl ThemeState {
    #[must_use]
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn apply(&mut self, intent: ThemeIntent) -> Transition {
        let next = match intent {
            ThemeIntent::Toggle => self.mode.toggled(),
            ThemeIntent::Set(mode) => mode,
        };
        if next == self.mode {
            return Transition::Ignored;
        }
        self.mode = next;
        Transition::Applied
    }
}
