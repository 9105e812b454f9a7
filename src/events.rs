#[derive(Debug, Clone, PartialEq)]
pub enum SoundFxKind {
    Beep { pitch: u8 },
    Tone { frequency: f32 },
    Crash,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    PlayMusic { track_id: String },
    PauseMusic,
    SoundFx(SoundFxKind),
    SetSection(String),
    SetNavigationId(String),
}
