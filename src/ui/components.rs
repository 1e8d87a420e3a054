//! Reusable UI pieces shared by the pages and form popups.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};

use super::{accent, bg_selected, danger, header, inactive, info, success, text, text_dim, warning};
use crate::table::{Column, Tone};

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Plain => text(),
        Tone::Good => success(),
        Tone::Bad => danger(),
        Tone::Warn => warning(),
        Tone::Info => info(),
        Tone::Dim => text_dim(),
    }
}

pub fn boxed(title: &str, focused: bool) -> Block<'static> {
    let (border, title_style) = if focused {
        (accent(), Style::default().fg(accent()).add_modifier(Modifier::BOLD))
    } else {
        (inactive(), Style::default().fg(header()))
    };
    Block::default()
        .title(Span::styled(format!(" {} ", title), title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

/// Table of `rows` rendered through `columns`, with the cursor row highlighted
pub fn data_table<T>(
    f: &mut Frame,
    area: Rect,
    block: Block,
    columns: &[Column<'_, T>],
    rows: &[&T],
    selected: Option<usize>,
    widths: &[Constraint],
) {
    let header_row = Row::new(
        columns
            .iter()
            .map(|c| Span::styled(c.label, Style::default().fg(header()).add_modifier(Modifier::BOLD))),
    );

    if rows.is_empty() {
        let empty = Paragraph::new(Span::styled("No records found", Style::default().fg(text_dim())))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let body: Vec<Row> = rows
        .iter()
        .map(|row| {
            Row::new(columns.iter().map(|c| {
                Span::styled(c.render(row), Style::default().fg(tone_color(c.tone_of(row))))
            }))
        })
        .collect();

    let table = Table::new(body, widths.to_vec())
        .header(header_row)
        .block(block)
        .column_spacing(2)
        .row_highlight_style(Style::default().bg(bg_selected()).fg(text()));

    // Stateful render keeps the cursor row scrolled into view
    let mut state = TableState::default().with_selected(selected);
    f.render_stateful_widget(table, area, &mut state);
}

/// Small bordered card with a big number
pub fn stats_card(f: &mut Frame, area: Rect, title: &str, value: usize, trend: Option<i32>) {
    let mut lines = vec![
        Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(text()).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(trend) = trend {
        let color = if trend >= 0 { success() } else { danger() };
        lines.push(Line::from(vec![
            Span::styled(format!("{:+}%", trend), Style::default().fg(color)),
            Span::styled(" from last month", Style::default().fg(text_dim())),
        ]));
    }

    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(boxed(title, false));
    f.render_widget(card, area);
}

/// One-line filter bar: `Label: value` per control, the focused one highlighted
pub fn filter_bar(f: &mut Frame, area: Rect, controls: &[(&str, String)], focus: usize, dirty: bool) {
    let mut spans = vec![Span::raw(" ")];
    for (i, (label, value)) in controls.iter().enumerate() {
        let value_style = if i == focus {
            Style::default().fg(accent()).bg(bg_selected()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(text())
        };
        spans.push(Span::styled(format!("{}: ", label), Style::default().fg(text_dim())));
        spans.push(Span::styled(format!("‹ {} ›", value), value_style));
        spans.push(Span::styled("   ", Style::default()));
    }
    if dirty {
        spans.push(Span::styled("(a to apply)", Style::default().fg(warning())));
    }

    let bar = Paragraph::new(Line::from(spans)).block(boxed("Filters", false));
    f.render_widget(bar, area);
}

/// Labelled form input; renders the error under the value when present
pub fn form_field(label: &str, value: &str, focused: bool, error: Option<&str>) -> Vec<Line<'static>> {
    let label_style = if focused {
        Style::default().fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(header())
    };
    let cursor = if focused { "_" } else { "" };
    let value_style = if focused {
        Style::default().fg(text()).bg(bg_selected())
    } else {
        Style::default().fg(text())
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{:<32}", label), label_style),
        Span::styled(format!("{}{}", value, cursor), value_style),
    ])];
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            format!("{:<32}{}", "", error),
            Style::default().fg(danger()),
        )));
    }
    lines
}

/// `[ F2 = Save ]  [ Esc = Cancel ]` style action row
pub fn button_row(buttons: &[(&str, Color)]) -> Paragraph<'static> {
    let mut spans = vec![Span::styled("  [ ", Style::default().fg(text_dim()))];
    for (i, (label, color)) in buttons.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ]  [ ", Style::default().fg(text_dim())));
        }
        spans.push(Span::styled(label.to_string(), Style::default().fg(*color).add_modifier(Modifier::BOLD)));
    }
    spans.push(Span::styled(" ]  ", Style::default().fg(text_dim())));

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(inactive())))
}
