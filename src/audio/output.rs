use std::path::{Path, PathBuf};

use crossbeam_channel::Sender;

use crate::audio_api::AudioCommand;
use crate::sequencer::ChannelSink;
use crate::shared::ChannelId;

use super::sample_buffer::SampleBuffer;

// The sequencer's handle on one engine voice. Sources are resolved against
// the kit directory and decoded here, before anything reaches the
// audio thread.
pub struct ChannelOutput {
    channel: ChannelId,
    tx: Sender<AudioCommand>,
    kit_dir: PathBuf,
    sample_rate: u32,
    dropping: bool, // inside a run of dropped commands, already warned
}

impl ChannelOutput {
    pub fn new(channel: ChannelId, tx: Sender<AudioCommand>, kit_dir: &Path, sample_rate: u32) -> Self {
        Self {
            channel,
            tx,
            kit_dir: kit_dir.to_path_buf(),
            sample_rate,
            dropping: false,
        }
    }

    // a full queue means the callback is stalled; drop rather than block the ui,
    // and warn once per run of drops
    fn send(&mut self, cmd: AudioCommand) {
        match self.tx.try_send(cmd) {
            Ok(()) => {
                if self.dropping {
                    tracing::info!(channel = self.channel.label(), "audio queue drained");
                }
                self.dropping = false;
            }
            Err(_) => {
                if !self.dropping {
                    tracing::warn!(channel = self.channel.label(), "audio queue full, dropping commands");
                }
                self.dropping = true;
            }
        }
    }

    fn resolve(&self, source: &str) -> PathBuf {
        let path = Path::new(source);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.kit_dir.join(path)
        }
    }
}

impl ChannelSink for ChannelOutput {
    fn reset(&mut self) {
        self.send(AudioCommand::Reset(self.channel));
    }

    fn play(&mut self) {
        self.send(AudioCommand::Play(self.channel));
    }

    fn trigger(&mut self) {
        self.send(AudioCommand::Trigger(self.channel));
    }

    fn set_volume(&mut self, volume: f32) {
        let channel = self.channel;
        self.send(AudioCommand::SetVolume { channel, volume });
    }

    fn set_source(&mut self, source: &str) {
        let path = self.resolve(source);
        let buffer = match SampleBuffer::load_wav(&path, self.sample_rate) {
            Ok(buffer) => Some(buffer),
            Err(e) => {
                // same as an <audio> element with a bad src: it just won't make a sound
                tracing::warn!(channel = self.channel.label(), "could not load sample: {e:#}");
                None
            }
        };
        let channel = self.channel;
        self.send(AudioCommand::SetBuffer { channel, buffer });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_click(path: &Path) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for s in [0i16, 12000, -12000, 0] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_sink_calls_become_commands() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let dir = tempfile::tempdir().unwrap();
        let mut out = ChannelOutput::new(ChannelId::Snare, tx, dir.path(), 44100);

        out.reset();
        out.play();
        out.set_volume(0.0);

        assert!(matches!(rx.try_recv(), Ok(AudioCommand::Reset(ChannelId::Snare))));
        assert!(matches!(rx.try_recv(), Ok(AudioCommand::Play(ChannelId::Snare))));
        assert!(matches!(
            rx.try_recv(),
            Ok(AudioCommand::SetVolume { channel: ChannelId::Snare, volume }) if volume == 0.0
        ));
    }

    #[test]
    fn test_set_source_loads_relative_to_kit_dir() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sounds")).unwrap();
        write_click(&dir.path().join("sounds/click.wav"));

        let mut out = ChannelOutput::new(ChannelId::Kick, tx, dir.path(), 44100);
        out.set_source("sounds/click.wav");

        match rx.try_recv() {
            Ok(AudioCommand::SetBuffer { channel, buffer: Some(buffer) }) => {
                assert_eq!(channel, ChannelId::Kick);
                assert_eq!(buffer.len(), 4);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_bad_source_silences_channel() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let dir = tempfile::tempdir().unwrap();
        let mut out = ChannelOutput::new(ChannelId::Hihat, tx, dir.path(), 44100);
        out.set_source("sounds/missing.wav");

        assert!(matches!(
            rx.try_recv(),
            Ok(AudioCommand::SetBuffer { channel: ChannelId::Hihat, buffer: None })
        ));
    }

    #[test]
    fn test_full_queue_drops_instead_of_blocking() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let dir = tempfile::tempdir().unwrap();
        let mut out = ChannelOutput::new(ChannelId::Kick, tx, dir.path(), 44100);
        out.reset();
        out.play();
        assert_eq!(rx.len(), 1);
        assert!(out.dropping);

        rx.try_recv().unwrap();
        out.play();
        assert!(!out.dropping);
    }

    #[test]
    fn test_trigger_is_one_command() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let dir = tempfile::tempdir().unwrap();
        let mut out = ChannelOutput::new(ChannelId::Snare, tx, dir.path(), 44100);
        out.trigger();
        out.trigger(); // queue full, the second hit goes whole
        assert!(matches!(rx.try_recv(), Ok(AudioCommand::Trigger(ChannelId::Snare))));
        assert!(rx.try_recv().is_err());
    }
}
