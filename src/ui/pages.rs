use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use super::components::{boxed, data_table, filter_bar, stats_card, tone_color};
use super::{accent, centered_rect, header, inactive, success, text, text_dim};
use crate::app::{App, Page};
use crate::format;
use crate::table::columns;

/// Decorative month-over-month trends shown on the dashboard cards
const CARD_TRENDS: [i32; 4] = [12, 8, -5, 15];

fn table_title(app: &App, name: &str, shown: usize, total: usize) -> String {
    if shown == total && app.table().query.is_empty() {
        format!("{} ({})", name, total)
    } else {
        format!("{} ({} of {})", name, shown, total)
    }
}

pub fn draw_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Stats cards
            Constraint::Length(3), // Quick actions
            Constraint::Min(5),    // Recent orders
        ])
        .split(area);

    let stats = app.data.stats(app.today);
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(chunks[0]);

    let values = [
        ("Total Vendors", stats.total_vendors),
        ("Food Items", stats.total_food_items),
        ("Active Deliveries", stats.active_deliveries),
        ("Orders Today", stats.orders_today),
    ];
    for (i, (title, value)) in values.iter().enumerate() {
        stats_card(f, cards[i], title, *value, Some(CARD_TRENDS[i]));
    }

    let quick = Paragraph::new(Line::from(vec![
        Span::styled(" V", Style::default().fg(accent()).add_modifier(Modifier::BOLD)),
        Span::styled(" Add Vendor   ", Style::default().fg(text())),
        Span::styled("F", Style::default().fg(accent()).add_modifier(Modifier::BOLD)),
        Span::styled(" Add Food Item   ", Style::default().fg(text())),
        Span::styled("D", Style::default().fg(accent()).add_modifier(Modifier::BOLD)),
        Span::styled(" Add Delivery Person", Style::default().fg(text())),
    ]))
    .block(boxed("Quick Actions", false));
    f.render_widget(quick, chunks[1]);

    let orders: Vec<_> = app.recent_orders().iter().collect();
    let cols = columns::recent_orders(&app.config.currency);
    let widths = [
        Constraint::Length(9),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(20),
    ];
    data_table(
        f,
        chunks[2],
        boxed("Recent Orders", true),
        &cols,
        &orders,
        Some(app.table().selected),
        &widths,
    );
}

pub fn draw_vendors(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    filter_bar(f, chunks[0], &app.filter_controls(), app.filter_focus, app.filters_dirty());

    let rows = app.visible_vendors();
    let cols = columns::vendors();
    let widths = [
        Constraint::Length(4),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Length(10),
        Constraint::Length(18),
        Constraint::Fill(3),
        Constraint::Length(8),
    ];
    let title = table_title(app, Page::Vendors.label(), rows.len(), app.data.vendors.len());
    data_table(f, chunks[1], boxed(&title, true), &cols, &rows, Some(app.table().selected), &widths);
}

pub fn draw_food_items(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    filter_bar(f, chunks[0], &app.filter_controls(), app.filter_focus, app.filters_dirty());

    let rows = app.visible_food_items();
    let cols = columns::food_items(&app.config.currency);
    let widths = [
        Constraint::Length(4),
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(11),
    ];
    let title = table_title(app, Page::FoodItems.label(), rows.len(), app.data.food_items.len());
    data_table(f, chunks[1], boxed(&title, true), &cols, &rows, Some(app.table().selected), &widths);
}

pub fn draw_deliveries(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let counts = app.data.staff_counts();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(chunks[0]);
    stats_card(f, cards[0], "Total Staff", counts.total, None);
    stats_card(f, cards[1], "Active", counts.active, None);
    stats_card(f, cards[2], "Inactive", counts.inactive, None);

    filter_bar(f, chunks[1], &app.filter_controls(), app.filter_focus, app.filters_dirty());

    let rows = app.visible_delivery_persons();
    let cols = columns::delivery_persons();
    let widths = [
        Constraint::Length(4),
        Constraint::Fill(2),
        Constraint::Length(10),
        Constraint::Length(20),
        Constraint::Length(8),
        Constraint::Length(14),
    ];
    let title = table_title(app, "Delivery Staff", rows.len(), app.data.delivery_persons.len());
    data_table(f, chunks[2], boxed(&title, true), &cols, &rows, Some(app.table().selected), &widths);
}

pub fn draw_orders(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    // Per-status counts
    let mut spans = vec![Span::raw(" ")];
    for share in app.data.order_status_breakdown() {
        let color = tone_color(columns::order_status_tone(share.status));
        spans.push(Span::styled(share.status.label(), Style::default().fg(color)));
        spans.push(Span::styled(
            format!(" {} ({:.1}%)", share.count, share.percentage),
            Style::default().fg(text()),
        ));
        spans.push(Span::styled("  │  ", Style::default().fg(inactive())));
    }
    spans.pop();
    let breakdown = Paragraph::new(Line::from(spans)).block(boxed("Orders by Status", false));
    f.render_widget(breakdown, chunks[0]);

    filter_bar(f, chunks[1], &app.filter_controls(), app.filter_focus, app.filters_dirty());

    let rows = app.visible_orders();
    let cols = columns::orders(&app.config.currency);
    let widths = [
        Constraint::Length(8),
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Fill(3),
        Constraint::Length(11),
        Constraint::Length(11),
        Constraint::Length(20),
    ];
    let title = table_title(app, Page::Orders.label(), rows.len(), app.data.orders.len());
    data_table(f, chunks[2], boxed(&title, true), &cols, &rows, Some(app.table().selected), &widths);
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(title.to_string(), Style::default().fg(header()).add_modifier(Modifier::BOLD)))
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", label), Style::default().fg(text_dim())),
        Span::styled(value, Style::default().fg(text())),
    ])
}

pub fn draw_order_details(f: &mut Frame, app: &App) {
    let Some(order) = app.detail_order() else { return };
    let currency = &app.config.currency;

    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 100 { 95 } else { 70 },
        if area.height < 35 { 95 } else { 80 },
        area,
    );
    f.render_widget(Clear, popup_area);

    let status_color = tone_color(columns::order_status_tone(order.status));
    let mut lines = vec![
        section("Order Information"),
        field("Order ID", order.id.clone()),
        field("Date", format::date_time(order.created_at)),
        Line::from(vec![
            Span::styled(format!("  {:<10}", "Status"), Style::default().fg(text_dim())),
            Span::styled(order.status.label(), Style::default().fg(status_color)),
        ]),
        Line::from(vec![
            Span::styled(format!("  {:<10}", "Total"), Style::default().fg(text_dim())),
            Span::styled(
                format::price(order.total_price, currency),
                Style::default().fg(success()).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        section("Customer"),
        field("Name", order.customer_name.clone()),
        field("Phone", order.customer_phone.clone()),
        Line::from(""),
        section("Vendor"),
        field("Name", order.vendor_name.clone()),
        Line::from(""),
        section("Delivery Person"),
    ];

    match &order.delivery_person_name {
        Some(name) => lines.push(field("Name", name.clone())),
        None => lines.push(Line::from(Span::styled("  Not assigned yet", Style::default().fg(text_dim())))),
    }

    lines.push(Line::from(""));
    lines.push(section("Ordered Items"));
    for item in &order.items {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}x ", item.quantity), Style::default().fg(accent())),
            Span::styled(item.name.clone(), Style::default().fg(text())),
            Span::styled(
                format!("  {}", format::price(item.line_total(), currency)),
                Style::default().fg(text()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({} each)", format::price(item.price, currency)),
                Style::default().fg(text_dim()),
            ),
        ]));
        if !item.add_ons.is_empty() {
            lines.push(Line::from(Span::styled("     Add-ons:", Style::default().fg(text_dim()))));
            for add_on in &item.add_ons {
                lines.push(Line::from(Span::styled(
                    format!(
                        "       • {}: {} (+{})",
                        add_on.group_name,
                        add_on.option,
                        format::price(add_on.price, currency)
                    ),
                    Style::default().fg(text_dim()),
                )));
            }
        }
    }

    let details = Paragraph::new(lines)
        .block(boxed(&format!("Order Details: {}", order.id), true))
        .wrap(Wrap { trim: false });
    f.render_widget(details, popup_area);
}
