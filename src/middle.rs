// The middle layer owns the sequencer. The tui hands it semantic input
// events, each of which maps to exactly one sequencer operation, and reads a
// DisplayState back every frame. Nothing here knows about keys or widgets.
use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::KitConfig;
use crate::sequencer::{ChannelSink, StepSequencer};
use crate::shared::{ChannelDisplay, ChannelId, DisplayState, InputEvent, NUM_CHANNELS};
use crate::tui::pulse::PulseTracker;

pub struct Middle<S: ChannelSink> {
    pub sequencer: StepSequencer<S, PulseTracker>,
    config: KitConfig,
    selected: [usize; NUM_CHANNELS], // index into each channel's choices
    tempo_edited: bool,              // bpm moved since the last commit
}

impl<S: ChannelSink> Middle<S> {
    pub fn new(config: KitConfig, sinks: [S; NUM_CHANNELS]) -> Self {
        let config = config.normalize();
        let mut sequencer = StepSequencer::new(config.default_sources(), sinks, PulseTracker::new())
            .with_bpm_range(config.min_bpm, config.max_bpm);
        sequencer.set_tempo(config.bpm);

        let selected = ChannelId::ALL.map(|id| {
            let ch = config.channel(id);
            ch.choices.iter().position(|c| *c == ch.default).unwrap_or(0)
        });

        Self {
            sequencer,
            config,
            selected,
            tempo_edited: false,
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PlayPress => self.sequencer.start(),
            InputEvent::AdjustTempo(delta) => {
                let before = self.sequencer.bpm();
                self.sequencer.set_tempo(before + delta);
                if self.sequencer.bpm() != before {
                    self.tempo_edited = true;
                }
            }
            // a gesture that never moved the tempo (pinned at a limit) leaves
            // the running timer alone
            InputEvent::CommitTempo => {
                if self.tempo_edited {
                    self.tempo_edited = false;
                    self.sequencer.commit_tempo();
                }
            }
            InputEvent::ToggleMute(channel) => self.sequencer.toggle_mute(channel),
            InputEvent::NextSound(channel) => self.next_sound(channel),
            InputEvent::ToggleStep(channel, step) => {
                self.sequencer.toggle_pad_active(channel, step as usize)
            }
            InputEvent::Quit => {} // main loop's business
        }
    }

    // called once per frame with the wall-clock time since the last call
    pub fn tick(&mut self, elapsed: Duration) {
        self.sequencer.tick(elapsed);
    }

    fn next_sound(&mut self, channel: ChannelId) {
        let choices = &self.config.channel(channel).choices;
        if choices.is_empty() {
            return;
        }
        let idx = channel.index();
        self.selected[idx] = (self.selected[idx] + 1) % choices.len();
        let source = choices[self.selected[idx]].clone();
        self.sequencer.set_channel_sound(channel, &source);
    }

    pub fn display_state(&self, now: Instant) -> DisplayState {
        let seq = &self.sequencer;
        let (min_bpm, max_bpm) = seq.bpm_range();
        DisplayState {
            channels: ChannelId::ALL.map(|id| {
                let ch = seq.channel(id);
                ChannelDisplay {
                    label: id.label(),
                    sound: sound_name(&ch.sound_source),
                    muted: ch.muted,
                    pads: *seq.grid().row(id),
                }
            }),
            pulsing: seq.renderer().lit(now),
            playing: seq.is_running(),
            bpm: seq.bpm(),
            min_bpm,
            max_bpm,
        }
    }
}

// "sounds/kick-classic.wav" -> "kick-classic"
fn sound_name(source: &str) -> String {
    Path::new(source)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string())
}
