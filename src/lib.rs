//! drumkit: an eight-step, three-track drum machine for the terminal.
//!
//! - `sequencer`: the pad grid and the tick-driven playback loop
//! - `audio`: cpal output with one sample voice per track
//! - `middle`: maps transport events onto sequencer operations
//! - `tui`: keyboard input and rendering

pub mod audio;
pub mod audio_api;
pub mod config;
pub mod logging;
pub mod middle;
pub mod sequencer;
pub mod shared;
pub mod tui;

pub use audio::{AudioHandle, ChannelOutput, start_audio};
pub use config::{KitConfig, load_config};
pub use middle::Middle;
pub use sequencer::{ChannelSink, Grid, PlayIntent, StepRenderer, StepSequencer};
pub use shared::{ChannelId, InputEvent, NUMBER_OF_PADS};
