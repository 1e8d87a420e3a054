mod components;
mod forms;
mod pages;

use std::sync::OnceLock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Page, Popup};
use crate::theme::Theme;

// Theme is resolved once from the config at startup
static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme built from the config's `[theme]` table
pub fn init_theme(theme: Theme) {
    if THEME.set(theme).is_err() {
        tracing::debug!("Theme already initialized");
    }
}

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

// Helper functions to get theme colors
fn accent() -> Color { theme().accent }
fn inactive() -> Color { theme().inactive }
fn success() -> Color { theme().success }
fn warning() -> Color { theme().warning }
fn danger() -> Color { theme().danger }
fn info() -> Color { theme().info }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn bg_selected() -> Color { theme().bg_selected }
fn header() -> Color { theme().header }

const SIDEBAR_WIDTH: u16 = 24;

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    // Collapse the sidebar on narrow terminals
    let sidebar_width = if area.width < 80 { 0 } else { SIDEBAR_WIDTH };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(20)])
        .split(area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(1), // Info line
            Constraint::Min(6),    // Page content
            Constraint::Length(1), // Footer
        ])
        .split(columns[1]);

    if sidebar_width > 0 {
        draw_sidebar(f, app, columns[0]);
    }
    draw_header(f, app, chunks[0]);
    draw_info_line(f, app, chunks[1]);

    match app.page {
        Page::Dashboard => pages::draw_dashboard(f, app, chunks[2]),
        Page::Vendors => pages::draw_vendors(f, app, chunks[2]),
        Page::FoodItems => pages::draw_food_items(f, app, chunks[2]),
        Page::Deliveries => pages::draw_deliveries(f, app, chunks[2]),
        Page::Orders => pages::draw_orders(f, app, chunks[2]),
    }

    draw_footer(f, app, chunks[3]);

    // Draw popups on top
    match app.popup {
        Popup::None => {}
        Popup::Help => draw_help_popup(f),
        Popup::Confirm => draw_confirm_popup(f, app),
        Popup::Alert => draw_alert_popup(f, app),
        Popup::AddVendor => forms::draw_vendor_form(f, app),
        Popup::AddFoodItem => forms::draw_food_form(f, app),
        Popup::AddDeliveryPerson => forms::draw_delivery_form(f, app),
        Popup::OrderDetails => pages::draw_order_details(f, app),
        Popup::QuickAction(page) => draw_quick_action_popup(f, page),
    }
}

fn draw_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(inactive()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let brand = Paragraph::new(vec![
        Line::from(Span::styled("Omeal", Style::default().fg(accent()).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled("Admin Panel", Style::default().fg(text_dim()))),
    ])
    .alignment(Alignment::Center);
    f.render_widget(brand, chunks[0]);

    let nav: Vec<Line> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, page)| {
            let is_active = *page == app.page;
            let style = if is_active {
                Style::default().fg(accent()).bg(bg_selected()).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(text())
            };
            Line::from(vec![
                Span::styled(format!(" {} ", i + 1), Style::default().fg(text_dim())),
                Span::styled(format!("{:<width$}", page.label(), width = 18), style),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(nav), chunks[1]);

    let footer = Paragraph::new(Span::styled("© 2024 Omeal Platform", Style::default().fg(text_dim())))
        .alignment(Alignment::Center);
    f.render_widget(footer, chunks[2]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(inactive()));

    let date = app.today.format("%A, %B %-d, %Y").to_string();
    let title = Line::from(vec![
        Span::styled(format!(" {}", app.page.title()), Style::default().fg(text()).add_modifier(Modifier::BOLD)),
        Span::styled("  │  ", Style::default().fg(inactive())),
        Span::styled(date, Style::default().fg(text_dim())),
    ]);

    f.render_widget(Paragraph::new(title).block(block), area);
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    // Priority: search input > status message > ready
    let table = app.table();
    let line = if table.searching {
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(accent())),
            Span::styled(format!("{}_", table.query), Style::default().fg(text())),
            Span::styled("  (Enter keeps, Esc clears)", Style::default().fg(text_dim())),
        ])
    } else if let Some(ref status) = app.status_message {
        Line::from(vec![Span::styled(status, Style::default().fg(warning()))])
    } else if !table.query.is_empty() {
        Line::from(vec![
            Span::styled("Filtered by search: ", Style::default().fg(text_dim())),
            Span::styled(&table.query, Style::default().fg(accent())),
        ])
    } else {
        Line::from(vec![Span::styled("Ready", Style::default().fg(text_dim()))])
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: Vec<(&str, &str)> = match app.page {
        Page::Dashboard => vec![
            ("↑↓", "Nav"),
            ("Enter", "Details"),
            ("V/F/D", "Quick add"),
            ("Tab", "Page"),
            ("h", "Help"),
            ("q", "Quit"),
        ],
        Page::Vendors => vec![
            ("↑↓", "Nav"),
            ("/", "Search"),
            ("f ←→ a c", "Filter"),
            ("n", "New"),
            ("e", "Edit"),
            ("v", "Menu"),
            ("d", "Del"),
            ("x", "Export"),
            ("h", "Help"),
        ],
        Page::FoodItems => vec![
            ("↑↓", "Nav"),
            ("/", "Search"),
            ("f ←→ a c", "Filter"),
            ("n", "New"),
            ("e", "Edit"),
            ("v", "View"),
            ("d", "Del"),
            ("x", "Export"),
            ("h", "Help"),
        ],
        Page::Deliveries => vec![
            ("↑↓", "Nav"),
            ("/", "Search"),
            ("f ←→ a c", "Filter"),
            ("n", "New"),
            ("e", "Edit"),
            ("p", "Call"),
            ("w", "WhatsApp"),
            ("d", "Del"),
            ("x", "Export"),
        ],
        Page::Orders => vec![
            ("↑↓", "Nav"),
            ("/", "Search"),
            ("f ←→ a c", "Filter"),
            ("Enter", "Details"),
            ("s", "Status"),
            ("x", "Export"),
            ("h", "Help"),
        ],
    };

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 4 } else if area.width < 90 { 6 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(accent())),
                Span::styled(format!(" {} │ ", action), Style::default().fg(text_dim())),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn help_section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("═══ {} ═══", title),
        Style::default().fg(header()).add_modifier(Modifier::BOLD),
    ))
}

fn help_entry(keys: &'static str, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", keys), Style::default().fg(accent())),
        Span::raw(what),
    ])
}

fn draw_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 70 },
        if area.height < 40 { 95 } else { 85 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let help_text = vec![
        help_section("Navigation"),
        help_entry("Tab/S-Tab", "Next / previous screen"),
        help_entry("1-5", "Dashboard, Vendors, Food Items, Deliveries, Orders"),
        help_entry("↑/↓ j/k", "Move up/down in tables"),
        help_entry("q / Ctrl-C", "Quit"),
        Line::from(""),
        help_section("Tables"),
        help_entry("/", "Search all columns (Enter keeps, Esc clears)"),
        help_entry("f", "Focus next filter control"),
        help_entry("←/→", "Change the focused filter"),
        help_entry("a", "Apply filters"),
        help_entry("c", "Clear filters"),
        help_entry("x", "Export visible rows to CSV"),
        Line::from(""),
        help_section("Records"),
        help_entry("n", "Add vendor / food item / delivery person"),
        help_entry("e", "Edit selected record"),
        help_entry("Enter/v", "Vendor menu, item details, order details"),
        help_entry("d/Del", "Delete selected record"),
        help_entry("p / w", "Call / WhatsApp delivery person"),
        help_entry("s", "Advance order status"),
        help_entry("V/F/D", "Dashboard quick actions"),
        Line::from(""),
        help_section("Forms"),
        help_entry("Tab/↑↓", "Move between fields"),
        help_entry("←/→ Space", "Change a choice or checkbox"),
        help_entry("Enter", "Next field (vendor wizard: next step / submit)"),
        help_entry("PgUp/PgDn", "Vendor wizard: previous / next step"),
        help_entry("F1-F3", "Vendor wizard: jump back to a step"),
        help_entry("F2", "Save food item / delivery person"),
        help_entry("F3 F4 F5", "Add group, add option, remove add-on row"),
        help_entry("Esc", "Cancel"),
        Line::from(""),
        help_section("Command line"),
        help_entry("--page", "Start on a given screen"),
        help_entry("--data", "Load a JSON dataset"),
        help_entry("--stats", "Print dashboard stats as JSON"),
        help_entry("--export", "Write a table as CSV to stdout"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("h", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("?", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" Omeal Admin Help ", Style::default().fg(accent())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn draw_confirm_popup(f: &mut Frame, app: &App) {
    let popup_area = centered_rect(50, 20, f.area());

    f.render_widget(Clear, popup_area);

    let message = app.confirm.as_ref().map(|c| c.prompt()).unwrap_or_else(|| "Confirm?".to_string());

    let confirm = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(warning()))),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y", Style::default().fg(success()).add_modifier(Modifier::BOLD)),
            Span::raw(" Yes   "),
            Span::styled("n", Style::default().fg(danger()).add_modifier(Modifier::BOLD)),
            Span::raw(" No"),
        ]),
    ])
    .block(
        Block::default()
            .title(Span::styled(" Confirm ", Style::default().fg(warning())))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(warning())),
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    f.render_widget(confirm, popup_area);
}

fn draw_alert_popup(f: &mut Frame, app: &App) {
    let popup_area = centered_rect(60, 25, f.area());

    f.render_widget(Clear, popup_area);

    let message = app.alert.as_deref().unwrap_or_default();

    let alert = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(text()))),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(accent()).add_modifier(Modifier::BOLD)),
            Span::styled(" OK", Style::default().fg(text_dim())),
        ]),
    ])
    .block(
        Block::default()
            .title(Span::styled(" Omeal ", Style::default().fg(accent())))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent())),
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    f.render_widget(alert, popup_area);
}

fn draw_quick_action_popup(f: &mut Frame, page: Page) {
    let popup_area = centered_rect(50, 25, f.area());

    f.render_widget(Clear, popup_area);

    let (title, body) = match page {
        Page::Vendors => (" Add New Vendor ", "Add vendors from the Vendors screen."),
        Page::FoodItems => (" Add New Food Item ", "Add food items from the Food Items screen."),
        _ => (" Add Delivery Person ", "Add delivery staff from the Deliveries screen."),
    };

    let popup = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(body, Style::default().fg(text()))),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [ ", Style::default().fg(text_dim())),
            Span::styled(format!("Enter = Go to {}", page.label()), Style::default().fg(success()).add_modifier(Modifier::BOLD)),
            Span::styled(" ]  [ ", Style::default().fg(text_dim())),
            Span::styled("Esc = Cancel", Style::default().fg(danger())),
            Span::styled(" ]", Style::default().fg(text_dim())),
        ]),
    ])
    .block(
        Block::default()
            .title(Span::styled(title, Style::default().fg(accent())))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent())),
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    f.render_widget(popup, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::data::Dataset;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    fn app() -> App {
        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        App::new(AppConfig::default(), Dataset::mock(), today)
    }

    #[test]
    fn test_dashboard_renders_brand_and_stats() {
        let screen = render(&app());
        assert!(screen.contains("Omeal"));
        assert!(screen.contains("Total Vendors"));
        assert!(!screen.contains("Total Food Items"));
        assert!(screen.contains("Recent Orders"));
        assert!(screen.contains("Sara Benali"));
    }

    #[test]
    fn test_every_page_and_popup_renders() {
        let mut app = app();
        for page in Page::ALL {
            app.page = page;
            let screen = render(&app);
            assert!(screen.contains(page.label()));
        }

        app.page = Page::Orders;
        app.detail_order = Some("o1".into());
        app.popup = Popup::OrderDetails;
        let screen = render(&app);
        assert!(screen.contains("Ordered Items"));

        app.popup = Popup::Help;
        assert!(render(&app).contains("Omeal Admin Help"));
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(50, 50, area);
        assert!(popup.x >= 25 && popup.right() <= 75);
        assert!(popup.y >= 12 && popup.bottom() <= 38);
    }
}
