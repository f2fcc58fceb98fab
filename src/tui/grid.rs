use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::input::pad_key;
use crate::shared::{ChannelDisplay, ChannelId, NUMBER_OF_PADS};

const LABEL_WIDTH: u16 = 24;

// One track: label/sound/mute on the left, then the 8 pads.
pub fn draw_track(
    frame: &mut Frame,
    area: Rect,
    channel: ChannelId,
    track: &ChannelDisplay,
    pulsing: &[bool; NUMBER_OF_PADS],
) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LABEL_WIDTH), Constraint::Min(NUMBER_OF_PADS as u16 * 4)])
        .split(area);

    draw_label(frame, halves[0], track);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, NUMBER_OF_PADS as u32); NUMBER_OF_PADS])
        .split(halves[1]);

    for (step, cell_area) in cols.iter().enumerate() {
        let style = pad_style(track.pads[step], pulsing[step], track.muted);
        let key = pad_key(channel, step).to_ascii_uppercase();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if pulsing[step] {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                style
            })
            .style(style);
        let pad = Paragraph::new(key.to_string())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(pad, *cell_area);
    }
}

fn draw_label(frame: &mut Frame, area: Rect, track: &ChannelDisplay) {
    let mute = if track.muted { "[MUTED]" } else { "" };
    let text = format!("{:<6}{}\n{}", track.label, mute, track.sound);
    let style = if track.muted {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let label = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(label, area);
}

fn pad_style(active: bool, pulsing: bool, muted: bool) -> Style {
    match (active, pulsing) {
        (true, _) if muted => Style::default().fg(Color::Gray).bg(Color::DarkGray),
        (true, true) => Style::default().fg(Color::White).bg(Color::LightMagenta),
        (true, false) => Style::default().fg(Color::LightMagenta).bg(Color::Magenta),
        (false, true) => Style::default().fg(Color::Yellow),
        (false, false) => Style::default().fg(Color::DarkGray),
    }
}
