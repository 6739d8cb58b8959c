use course_core::model::LayoutMode;

use super::Transition;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutIntent {
    ToggleMode,
    SetMode(LayoutMode),
    ToggleSidebar,
    CloseSidebar,
}

/// Listing layout and the navigation sidebar. The sidebar starts closed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutState {
    mode: LayoutMode,
    sidebar_open: bool,
}

impl LayoutState {
    #[must_use]
    pub fn new(mode: LayoutMode) -> Self {
        Self {
            mode,
            sidebar_open: false,
        }
    }

    #[must_use]
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    #[must_use]
    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn apply(&mut self, intent: LayoutIntent) -> Transition {
        match intent {
            LayoutIntent::ToggleMode => self.mode = self.mode.toggled(),
            LayoutIntent::SetMode(mode) if mode == self.mode => return Transition::Ignored,
            LayoutIntent::SetMode(mode) => self.mode = mode,
            LayoutIntent::ToggleSidebar => self.sidebar_open = !self.sidebar_open,
            LayoutIntent::CloseSidebar if !self.sidebar_open => return Transition::Ignored,
            LayoutIntent::CloseSidebar => self.sidebar_open = false,
        }
        Transition::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_and_sidebar_are_independent() {
        let mut layout = LayoutState::new(LayoutMode::Grid);
        assert!(!layout.sidebar_open());

        assert!(layout.apply(LayoutIntent::ToggleSidebar).is_applied());
        assert!(layout.apply(LayoutIntent::ToggleMode).is_applied());
        assert_eq!(layout.mode(), LayoutMode::List);
        assert!(layout.sidebar_open());

        assert!(layout.apply(LayoutIntent::CloseSidebar).is_applied());
        assert_eq!(layout.apply(LayoutIntent::CloseSidebar), Transition::Ignored);
        assert_eq!(
            layout.apply(LayoutIntent::SetMode(LayoutMode::List)),
            Transition::Ignored
        );
        assert_eq!(layout.mode(), LayoutMode::List);
    }
}
