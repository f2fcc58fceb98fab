use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use super::grid::draw_track;
use crate::shared::{ChannelId, DisplayState};

const HELP: &str = "space play/stop · pads 1-8 / q-i / a-k · mute z x c · sound Z X C · tempo - = _ + (enter commits) · esc quit";

pub fn render(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // transport
            Constraint::Length(3), // tempo slider
            Constraint::Length(4), // kick
            Constraint::Length(4), // snare
            Constraint::Length(4), // hihat
            Constraint::Min(1),    // help
        ])
        .split(area);

    draw_transport(frame, sections[0], state);
    draw_tempo(frame, sections[1], state);
    for (i, channel) in ChannelId::ALL.into_iter().enumerate() {
        draw_track(frame, sections[2 + i], channel, &state.channels[i], &state.pulsing);
    }
    frame.render_widget(
        Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)),
        sections[5],
    );
}

fn draw_transport(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let (icon, style) = if state.playing {
        ("▶ PLAYING", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        ("■ STOPPED", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    };
    let line = Line::from(vec![
        Span::styled(icon, style),
        Span::raw("   "),
        Span::styled(format!("{:.0} BPM", state.bpm), Style::default().add_modifier(Modifier::BOLD)),
    ]);
    let block = Block::default().borders(Borders::ALL).title(" drumkit ");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_tempo(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let span = (state.max_bpm - state.min_bpm).max(f32::EPSILON);
    let ratio = ((state.bpm - state.min_bpm) / span).clamp(0.0, 1.0) as f64;
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(format!(
            " tempo {:.0}-{:.0} ",
            state.min_bpm, state.max_bpm
        )))
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(ratio)
        .label(format!("{:.0}", state.bpm));
    frame.render_widget(gauge, area);
}
