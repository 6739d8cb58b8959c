use course_core::model::PlaybackMode;

use super::Transition;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackIntent {
    /// A lesson was opened; playback resets.
    Load { has_video: bool },
    SetMode(PlaybackMode),
    Play,
    Pause,
    Resume,
    Stop,
}

/// Lesson presentation mode and video status.
///
/// `Play` is accepted only in video mode on a lesson that has a video.
/// Switching mode always stops playback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackState {
    mode: PlaybackMode,
    status: PlaybackStatus,
    video_available: bool,
}

impl PlaybackState {
    #[must_use]
    pub fn new(mode: PlaybackMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    #[must_use]
    pub fn video_available(&self) -> bool {
        self.video_available
    }

    pub fn apply(&mut self, intent: PlaybackIntent) -> Transition {
        use PlaybackStatus::{Paused, Playing, Stopped};

        let next_status = match (intent, self.status) {
            (PlaybackIntent::Load { has_video }, _) => {
                self.video_available = has_video;
                self.status = Stopped;
                return Transition::Applied;
            }
            (PlaybackIntent::SetMode(mode), _) => {
                if mode == self.mode {
                    return Transition::Ignored;
                }
                self.mode = mode;
                self.status = Stopped;
                return Transition::Applied;
            }
            (PlaybackIntent::Play, Stopped)
                if self.mode == PlaybackMode::Video && self.video_available =>
            {
                Playing
            }
            (PlaybackIntent::Pause, Playing) => Paused,
            (PlaybackIntent::Resume, Paused) => Playing,
            (PlaybackIntent::Stop, Playing | Paused) => Stopped,
            _ => return Transition::Ignored,
        };
        self.status = next_status;
        Transition::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video_lesson() -> PlaybackState {
        let mut state = PlaybackState::new(PlaybackMode::Video);
        state.apply(PlaybackIntent::Load { has_video: true });
        state
    }

    #[test]
    fn play_pause_resume_stop() {
        let mut state = video_lesson();
        assert!(state.apply(PlaybackIntent::Play).is_applied());
        assert_eq!(state.status(), PlaybackStatus::Playing);
        assert!(state.apply(PlaybackIntent::Pause).is_applied());
        assert_eq!(state.apply(PlaybackIntent::Pause), Transition::Ignored);
        assert!(state.apply(PlaybackIntent::Resume).is_applied());
        assert!(state.apply(PlaybackIntent::Stop).is_applied());
        assert_eq!(state.status(), PlaybackStatus::Stopped);
        assert_eq!(state.apply(PlaybackIntent::Stop), Transition::Ignored);
    }

    #[test]
    fn play_requires_video_mode_and_video() {
        let mut article = PlaybackState::new(PlaybackMode::Article);
        article.apply(PlaybackIntent::Load { has_video: true });
        assert_eq!(article.apply(PlaybackIntent::Play), Transition::Ignored);

        let mut no_video = PlaybackState::new(PlaybackMode::Video);
        no_video.apply(PlaybackIntent::Load { has_video: false });
        assert_eq!(no_video.apply(PlaybackIntent::Play), Transition::Ignored);
        assert_eq!(no_video.status(), PlaybackStatus::Stopped);
    }

    #[test]
    fn switching_mode_stops_playback() {
        let mut state = video_lesson();
        state.apply(PlaybackIntent::Play);
        assert!(state.apply(PlaybackIntent::SetMode(PlaybackMode::Article)).is_applied());
        assert_eq!(state.status(), PlaybackStatus::Stopped);
        assert_eq!(
            state.apply(PlaybackIntent::SetMode(PlaybackMode::Article)),
            Transition::Ignored
        );
    }

    #[test]
    fn loading_a_lesson_resets_status() {
        let mut state = video_lesson();
        state.apply(PlaybackIntent::Play);
        state.apply(PlaybackIntent::Load { has_video: false });
        assert_eq!(state.status(), PlaybackStatus::Stopped);
        assert!(!state.video_available());
    }
}
