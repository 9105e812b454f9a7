use crate::events::ControlEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interruption {
    Pause,
    Ignore,
}

/// Decides whether a control event must interrupt background music.
///
/// Transient sound effects and navigation changes pause playback so the
/// music never overlaps a competing sound. The coordinator's own play/pause
/// events are ignored here to avoid self-triggering.
pub fn classify(event: &ControlEvent) -> Interruption {
    match event {
        ControlEvent::SoundFx(_) => Interruption::Pause,
        ControlEvent::SetSection(_) => Interruption::Pause,
        ControlEvent::SetNavigationId(_) => Interruption::Pause,
        ControlEvent::PlayMusic { .. } | ControlEvent::PauseMusic => Interruption::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::SoundFxKind;

    #[test]
    fn sound_effects_pause() {
        let fx = [
            SoundFxKind::Beep { pitch: 48 },
            SoundFxKind::Tone { frequency: 440.0 },
            SoundFxKind::Crash,
        ];
        for kind in fx {
            assert_eq!(
                classify(&ControlEvent::SoundFx(kind)),
                Interruption::Pause
            );
        }
    }

    #[test]
    fn navigation_changes_pause() {
        assert_eq!(
            classify(&ControlEvent::SetSection("world".into())),
            Interruption::Pause
        );
        assert_eq!(
            classify(&ControlEvent::SetNavigationId("scene_7".into())),
            Interruption::Pause
        );
    }

    #[test]
    fn own_playback_events_are_ignored() {
        assert_eq!(
            classify(&ControlEvent::PlayMusic {
                track_id: "t1".into()
            }),
            Interruption::Ignore
        );
        assert_eq!(classify(&ControlEvent::PauseMusic), Interruption::Ignore);
    }
}
