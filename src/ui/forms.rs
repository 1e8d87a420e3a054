use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use super::components::{boxed, button_row, form_field};
use super::{accent, centered_rect, danger, inactive, success, text_dim};
use crate::app::App;
use crate::forms::delivery::DeliveryField;
use crate::forms::food_item::FoodField;
use crate::forms::vendor::VendorTab;

/// Popup frame shared by the three forms: body area and button area
fn form_frame(f: &mut Frame, title: &str) -> (Rect, Rect) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 100 { 95 } else { 75 },
        if area.height < 35 { 95 } else { 85 },
        area,
    );
    f.render_widget(Clear, popup_area);
    f.render_widget(boxed(title, true), popup_area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(popup_area);
    (inner[0], inner[1])
}

pub fn draw_vendor_form(f: &mut Frame, app: &App) {
    let Some(form) = app.vendor_form.as_ref() else { return };
    let (body, buttons) = form_frame(f, "Add New Vendor");

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3)])
        .split(body);

    // Step indicator
    let mut steps = Vec::new();
    for (i, tab) in VendorTab::ALL.iter().enumerate() {
        let style = if *tab == form.tab {
            Style::default().fg(accent()).add_modifier(Modifier::BOLD)
        } else if *tab < form.tab {
            Style::default().fg(success())
        } else {
            Style::default().fg(inactive())
        };
        if i > 0 {
            steps.push(Span::styled("  ──  ", Style::default().fg(inactive())));
        }
        steps.push(Span::styled(format!("{} {}", i + 1, tab.label()), style));
    }
    f.render_widget(Paragraph::new(Line::from(steps)), chunks[0]);

    let focused = form.focused();
    let lines: Vec<Line> = form
        .tab
        .fields()
        .iter()
        .flat_map(|field| {
            form_field(
                field.label(),
                &form.value(*field),
                *field == focused,
                form.errors.get(field).map(String::as_str),
            )
        })
        .collect();
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[1]);

    let row = if form.is_last_tab() {
        button_row(&[("Enter = Add Vendor", success()), ("PgUp = Previous", accent()), ("Esc = Cancel", danger())])
    } else {
        button_row(&[("Enter = Next", accent()), ("PgUp = Previous", accent()), ("Esc = Cancel", danger())])
    };
    f.render_widget(row, buttons);
}

pub fn draw_food_form(f: &mut Frame, app: &App) {
    let Some(form) = app.food_form.as_ref() else { return };
    let (body, buttons) = form_frame(f, "Add New Food Item");

    let focused = form.focused();
    let mut lines: Vec<Line> = Vec::new();
    let mut focus_line = 0;
    for field in form.fields() {
        if let FoodField::GroupName(g) = field {
            lines.push(Line::from(""));
            if g == 0 {
                lines.push(Line::from(Span::styled(
                    "Add-ons & Options",
                    Style::default().fg(accent()).add_modifier(Modifier::BOLD),
                )));
            }
        }
        let label = match field {
            FoodField::Price => format!("Price ({}) *", app.config.currency),
            _ => field.label(),
        };
        if field == focused {
            focus_line = lines.len();
        }
        lines.extend(form_field(
            &label,
            &form.value(field),
            field == focused,
            form.errors.get(&field).map(String::as_str),
        ));
    }
    if form.add_ons.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "No add-ons yet (F3 adds a group)",
            Style::default().fg(text_dim()),
        )));
    }

    // Keep the focused field on screen
    let height = body.height as usize;
    let scroll = focus_line.saturating_sub(height.saturating_sub(3)) as u16;

    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), body);

    let row = button_row(&[
        ("F2 = Save", success()),
        ("F3 = Group", accent()),
        ("F4 = Option", accent()),
        ("F5 = Remove", danger()),
        ("Esc = Cancel", danger()),
    ]);
    f.render_widget(row, buttons);
}

pub fn draw_delivery_form(f: &mut Frame, app: &App) {
    let Some(form) = app.delivery_form.as_ref() else { return };
    let (body, buttons) = form_frame(f, "Add Delivery Person");

    let focused = form.focused();
    let lines: Vec<Line> = DeliveryField::ALL
        .iter()
        .flat_map(|field| {
            form_field(
                field.label(),
                &form.value(*field),
                *field == focused,
                form.errors.get(field).map(String::as_str),
            )
        })
        .collect();
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body);

    let row = button_row(&[("F2 = Add Delivery Person", success()), ("Esc = Cancel", danger())]);
    f.render_widget(row, buttons);
}
