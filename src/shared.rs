// Types shared between the tui, the middle layer and the sequencer.
//
// Key map (resolved in tui/input.rs):
//   Space           //  PlayPress
//   1 2 3 4 5 6 7 8 //  ToggleStep(Kick, 0..7)
//   q w e r t y u i //  ToggleStep(Snare, 0..7)
//   a s d f g h j k //  ToggleStep(Hihat, 0..7)
//   z x c           //  ToggleMute(Kick / Snare / Hihat)
//   Z X C           //  NextSound(Kick / Snare / Hihat)
//   - / =           //  AdjustTempo(-1 / +1)
//   _ / +           //  AdjustTempo(-10 / +10)
//   Enter           //  CommitTempo (also sent after the tempo keys go quiet)
//   Esc             //  Quit

pub const NUMBER_OF_PADS: usize = 8;
pub const NUM_CHANNELS: usize = 3;
pub const DEFAULT_BPM: f32 = 150.0;
pub const MIN_BPM: f32 = 20.0;
pub const MAX_BPM: f32 = 300.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelId {
    Kick,
    Snare,
    Hihat,
}

impl ChannelId {
    pub const ALL: [ChannelId; NUM_CHANNELS] = [ChannelId::Kick, ChannelId::Snare, ChannelId::Hihat];

    pub fn index(self) -> usize {
        match self {
            ChannelId::Kick => 0,
            ChannelId::Snare => 1,
            ChannelId::Hihat => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChannelId::Kick => "KICK",
            ChannelId::Snare => "SNARE",
            ChannelId::Hihat => "HIHAT",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    // play/stop button (space)
    PlayPress,

    // tempo slider: every intermediate value, then the end of the gesture
    AdjustTempo(f32),
    CommitTempo,

    // per-track controls
    ToggleMute(ChannelId),
    NextSound(ChannelId),

    // the pad grid
    ToggleStep(ChannelId, u8),

    // quit button (esc)
    Quit,
}

#[derive(Clone, Debug)]
pub struct ChannelDisplay {
    pub label: &'static str,
    pub sound: String, // file name only, the full path doesn't fit
    pub muted: bool,
    pub pads: [bool; NUMBER_OF_PADS],
}

#[derive(Clone, Debug)]
pub struct DisplayState {
    pub channels: [ChannelDisplay; NUM_CHANNELS],
    pub pulsing: [bool; NUMBER_OF_PADS], // steps still inside their highlight window
    pub playing: bool,
    pub bpm: f32,
    pub min_bpm: f32,
    pub max_bpm: f32,
}
