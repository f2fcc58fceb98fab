use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use super::mode::TuiState;
use crate::shared::{ChannelId, InputEvent};

const KICK_KEYS: [char; 8] = ['1', '2', '3', '4', '5', '6', '7', '8'];
const SNARE_KEYS: [char; 8] = ['q', 'w', 'e', 'r', 't', 'y', 'u', 'i'];
const HIHAT_KEYS: [char; 8] = ['a', 's', 'd', 'f', 'g', 'h', 'j', 'k'];

// poll for terminal input and resolve it into semantic input events.
// Also emits the CommitTempo that ends a tempo gesture once it goes quiet.
pub fn poll_input(timeout: Duration, ts: &mut TuiState) -> anyhow::Result<Vec<InputEvent>> {
    let mut events = Vec::new();
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            let repeat = key.kind == KeyEventKind::Repeat;
            if key.kind == KeyEventKind::Press || repeat {
                events = handle_key(key.code, repeat, ts, Instant::now());
            }
        }
    }
    if ts.take_tempo_commit(Instant::now()) {
        events.push(InputEvent::CommitTempo);
    }
    Ok(events)
}

// held keys only auto-repeat for tempo; a held pad key shouldn't flicker the pad
pub fn handle_key(code: KeyCode, repeat: bool, ts: &mut TuiState, now: Instant) -> Vec<InputEvent> {
    if let Some(delta) = tempo_delta(code) {
        ts.touch_tempo(now);
        return vec![InputEvent::AdjustTempo(delta)];
    }
    if repeat {
        return vec![];
    }
    match code {
        KeyCode::Esc => vec![InputEvent::Quit],
        KeyCode::Char(' ') => vec![InputEvent::PlayPress],
        KeyCode::Enter => {
            ts.tempo_touched = None; // committed by hand, nothing left to debounce
            vec![InputEvent::CommitTempo]
        }

        KeyCode::Char('z') => vec![InputEvent::ToggleMute(ChannelId::Kick)],
        KeyCode::Char('x') => vec![InputEvent::ToggleMute(ChannelId::Snare)],
        KeyCode::Char('c') => vec![InputEvent::ToggleMute(ChannelId::Hihat)],
        KeyCode::Char('Z') => vec![InputEvent::NextSound(ChannelId::Kick)],
        KeyCode::Char('X') => vec![InputEvent::NextSound(ChannelId::Snare)],
        KeyCode::Char('C') => vec![InputEvent::NextSound(ChannelId::Hihat)],

        KeyCode::Char(c) => match char_to_pad(c) {
            Some((channel, step)) => vec![InputEvent::ToggleStep(channel, step)],
            None => vec![],
        },
        _ => vec![],
    }
}

fn tempo_delta(code: KeyCode) -> Option<f32> {
    match code {
        KeyCode::Char('-') => Some(-1.0),
        KeyCode::Char('=') => Some(1.0),
        KeyCode::Char('_') => Some(-10.0),
        KeyCode::Char('+') => Some(10.0),
        _ => None,
    }
}

// convert char to (track, step)
fn char_to_pad(c: char) -> Option<(ChannelId, u8)> {
    let rows = [
        (ChannelId::Kick, &KICK_KEYS),
        (ChannelId::Snare, &SNARE_KEYS),
        (ChannelId::Hihat, &HIHAT_KEYS),
    ];
    rows.iter().find_map(|(channel, keys)| {
        keys.iter()
            .position(|k| *k == c)
            .map(|step| (*channel, step as u8))
    })
}

pub fn pad_key(channel: ChannelId, step: usize) -> char {
    let keys = match channel {
        ChannelId::Kick => &KICK_KEYS,
        ChannelId::Snare => &SNARE_KEYS,
        ChannelId::Hihat => &HIHAT_KEYS,
    };
    keys.get(step).copied().unwrap_or(' ')
}
