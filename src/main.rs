mod app;
mod config;
mod data;
mod filter;
mod format;
mod forms;
mod table;
mod theme;
mod ui;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::{App, Page, Popup};
use config::AppConfig;
use data::Dataset;
use table::columns;
use theme::Theme;

#[derive(Parser, Debug)]
#[command(name = "omeal-admin")]
#[command(version)]
#[command(about = "A terminal admin dashboard for the Omeal food-delivery platform")]
struct Args {
    /// Screen to open on launch
    #[arg(short, long, value_enum)]
    page: Option<Page>,

    /// Load the dataset from a JSON file instead of the sample data
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Print dashboard stats as JSON and exit
    #[arg(short, long)]
    stats: bool,

    /// Write a table as CSV to stdout and exit
    #[arg(short, long, value_enum)]
    export: Option<ExportTarget>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportTarget {
    Vendors,
    FoodItems,
    Deliveries,
    Orders,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // The TUI owns the terminal, so it logs to a file instead
    let one_shot = args.stats || args.export.is_some();
    init_logging(one_shot);

    let mut config = AppConfig::load()?;
    if let Some(page) = args.page {
        config.start_page = page;
    }
    if let Some(path) = args.data {
        config.data_file = Some(path);
    }

    // Handle CLI-only commands
    if args.stats {
        return print_stats(config).await;
    }

    if let Some(target) = args.export {
        return print_export(config, target).await;
    }

    // Run TUI
    ui::init_theme(Theme::load(&config.theme));
    run_tui(config).await
}

fn init_logging(to_stderr: bool) {
    let default_level = if to_stderr { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    if to_stderr {
        registry.with(tracing_subscriber::fmt::layer().with_writer(io::stderr)).init();
        return;
    }

    match open_log_file() {
        Some(file) => registry
            .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .init(),
        None => registry.init(),
    }
}

fn open_log_file() -> Option<File> {
    let dir = AppConfig::data_dir()?;
    std::fs::create_dir_all(&dir).ok()?;
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("omeal-admin.log"))
        .ok()
}

async fn print_stats(config: AppConfig) -> Result<()> {
    let app = App::load(config).await?;
    let stats = app.data.stats(app.today);
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

async fn print_export(config: AppConfig, target: ExportTarget) -> Result<()> {
    let app = App::load(config).await?;
    print!("{}", export_csv(&app.data, &app.config.currency, target));
    Ok(())
}

/// Unfiltered CSV of one table
fn export_csv(data: &Dataset, currency: &str, target: ExportTarget) -> String {
    match target {
        ExportTarget::Vendors => {
            let rows: Vec<_> = data.vendors.iter().collect();
            table::to_csv(&columns::vendors(), &rows)
        }
        ExportTarget::FoodItems => {
            let rows: Vec<_> = data.food_items.iter().collect();
            table::to_csv(&columns::food_items(currency), &rows)
        }
        ExportTarget::Deliveries => {
            let rows: Vec<_> = data.delivery_persons.iter().collect();
            table::to_csv(&columns::delivery_persons(), &rows)
        }
        ExportTarget::Orders => {
            let rows: Vec<_> = data.orders.iter().collect();
            table::to_csv(&columns::orders(currency), &rows)
        }
    }
}

async fn run_tui(config: AppConfig) -> Result<()> {
    // Load data before touching the terminal so errors print normally
    let mut app = App::load(config).await?;
    tracing::info!("Starting omeal-admin on {:?}", app.page);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.popup == Popup::None && !app.table().searching => {
                            return Ok(())
                        }
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {
                            // Handle key and catch any errors to prevent crashes
                            if let Err(e) = app.handle_key(key).await {
                                tracing::warn!("Key handling failed: {:#}", e);
                                app.status_message = Some(format!("Error: {}", e));
                                app.status_message_time = Some(std::time::Instant::now());
                            }
                        }
                    }
                }
            }
        }

        // Periodic refresh
        app.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["omeal-admin", "--page", "food-items", "--data", "shop.json"]).unwrap();
        assert_eq!(args.page, Some(Page::FoodItems));
        assert_eq!(args.data, Some(PathBuf::from("shop.json")));
        assert!(!args.stats);

        let args = Args::try_parse_from(["omeal-admin", "--export", "deliveries"]).unwrap();
        assert_eq!(args.export, Some(ExportTarget::Deliveries));

        assert!(Args::try_parse_from(["omeal-admin", "--export", "dashboard"]).is_err());
    }

    #[test]
    fn test_export_csv_is_unfiltered() {
        let data = Dataset::mock();
        let csv = export_csv(&data, "MAD", ExportTarget::Vendors);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("ID,Vendor Name,Owner,Category,Phone,Address,Status"));
        assert_eq!(lines.count(), 3);

        let csv = export_csv(&data, "MAD", ExportTarget::Orders);
        assert!(csv.contains("Hassan Amrani"));
    }
}
