use anyhow::Result;
use chrono::NaiveDate;
use clap::ValueEnum;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::AppConfig;
use crate::data::model::{DeliveryPerson, FoodItem, Order, OrderStatus, Status, Vendor, VendorCategory};
use crate::data::Dataset;
use crate::filter::{
    cycle_option, Availability, DeliveryFilter, FilterState, FoodItemFilter, OrderFilter, RowFilter,
    VendorFilter,
};
use crate::format;
use crate::forms::vendor::VendorTab;
use crate::forms::{DeliveryPersonForm, FoodItemForm, FormInput, VendorForm};
use crate::table::{self, columns, TableState};

/// Seconds a status line message stays visible
const STATUS_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    #[default]
    Dashboard,
    Vendors,
    FoodItems,
    Deliveries,
    Orders,
}

impl Page {
    pub const ALL: [Page; 5] = [Page::Dashboard, Page::Vendors, Page::FoodItems, Page::Deliveries, Page::Orders];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Sidebar entry
    pub fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Vendors => "Vendors",
            Page::FoodItems => "Food Items",
            Page::Deliveries => "Deliveries",
            Page::Orders => "Orders",
        }
    }

    /// Header title
    pub fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Vendors => "Vendors Management",
            Page::FoodItems => "Food Items Management",
            Page::Deliveries => "Delivery Staff Management",
            Page::Orders => "Orders Management",
        }
    }

    /// Base name of CSV exports; the dashboard table is not exportable
    pub fn export_name(self) -> Option<&'static str> {
        match self {
            Page::Dashboard => None,
            Page::Vendors => Some("vendors"),
            Page::FoodItems => Some("food-items"),
            Page::Deliveries => Some("delivery-staff"),
            Page::Orders => Some("orders"),
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
    Confirm,
    Alert,
    AddVendor,
    AddFoodItem,
    AddDeliveryPerson,
    OrderDetails,
    /// Dashboard shortcut offering to open another screen
    QuickAction(Page),
}

/// Destructive action waiting on a y/n answer
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    DeleteVendor(String),
    DeleteFoodItem(String),
    DeleteDeliveryPerson(String),
}

impl ConfirmAction {
    pub fn prompt(&self) -> String {
        let name = match self {
            ConfirmAction::DeleteVendor(n)
            | ConfirmAction::DeleteFoodItem(n)
            | ConfirmAction::DeleteDeliveryPerson(n) => n,
        };
        format!("Are you sure you want to delete {}?", name)
    }
}

pub struct App {
    pub page: Page,
    pub popup: Popup,

    pub data: Dataset,
    pub config: AppConfig,
    pub today: NaiveDate,

    // Filter bars (draft + applied) and the focused control
    pub vendor_filter: FilterState<VendorFilter>,
    pub food_filter: FilterState<FoodItemFilter>,
    pub delivery_filter: FilterState<DeliveryFilter>,
    pub order_filter: FilterState<OrderFilter>,
    pub filter_focus: usize,

    // One table state per page
    pub tables: [TableState; 5],

    // Open forms
    pub vendor_form: Option<VendorForm>,
    pub food_form: Option<FoodItemForm>,
    pub delivery_form: Option<DeliveryPersonForm>,

    // Popup payloads
    pub confirm: Option<ConfirmAction>,
    pub alert: Option<String>,
    pub detail_order: Option<String>,

    // Order id and the status last picked for it with `s`
    pub picked_status: Option<(String, OrderStatus)>,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    /// Build the app from config, loading the configured dataset if any
    pub async fn load(config: AppConfig) -> Result<Self> {
        let data = match &config.data_file {
            Some(path) => Dataset::load(path).await?,
            None => Dataset::mock(),
        };
        let today = chrono::Local::now().date_naive();
        Ok(Self::new(config, data, today))
    }

    pub fn new(config: AppConfig, data: Dataset, today: NaiveDate) -> Self {
        Self {
            page: config.start_page,
            popup: Popup::None,
            data,
            config,
            today,
            vendor_filter: FilterState::default(),
            food_filter: FilterState::default(),
            delivery_filter: FilterState::default(),
            order_filter: FilterState::default(),
            filter_focus: 0,
            tables: Default::default(),
            vendor_form: None,
            food_form: None,
            delivery_form: None,
            confirm: None,
            alert: None,
            detail_order: None,
            picked_status: None,
            status_message: None,
            status_message_time: None,
        }
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Blocking feedback dialog, mirrored to a desktop notification if enabled
    fn show_alert(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        tracing::info!("{}", msg);
        if self.config.notifications {
            notify("Omeal Admin", &msg);
        }
        self.alert = Some(msg);
        self.popup = Popup::Alert;
    }

    pub fn table(&self) -> &TableState {
        &self.tables[self.page.index()]
    }

    fn table_mut(&mut self) -> &mut TableState {
        &mut self.tables[self.page.index()]
    }

    // Visible rows: applied filter first, then the search query

    pub fn visible_vendors(&self) -> Vec<&Vendor> {
        let rows = self.vendor_filter.applied.apply(&self.data.vendors);
        table::search(rows, &columns::vendors(), &self.tables[Page::Vendors.index()].query)
    }

    pub fn visible_food_items(&self) -> Vec<&FoodItem> {
        let rows = self.food_filter.applied.apply(&self.data.food_items);
        let cols = columns::food_items(&self.config.currency);
        table::search(rows, &cols, &self.tables[Page::FoodItems.index()].query)
    }

    pub fn visible_delivery_persons(&self) -> Vec<&DeliveryPerson> {
        let rows = self.delivery_filter.applied.apply(&self.data.delivery_persons);
        table::search(rows, &columns::delivery_persons(), &self.tables[Page::Deliveries.index()].query)
    }

    pub fn visible_orders(&self) -> Vec<&Order> {
        let rows = self.order_filter.applied.apply(&self.data.orders);
        let cols = columns::orders(&self.config.currency);
        table::search(rows, &cols, &self.tables[Page::Orders.index()].query)
    }

    pub fn recent_orders(&self) -> &[Order] {
        self.data.recent_orders(self.config.recent_orders_limit)
    }

    fn row_count(&self) -> usize {
        match self.page {
            Page::Dashboard => self.recent_orders().len(),
            Page::Vendors => self.visible_vendors().len(),
            Page::FoodItems => self.visible_food_items().len(),
            Page::Deliveries => self.visible_delivery_persons().len(),
            Page::Orders => self.visible_orders().len(),
        }
    }

    fn selected_vendor(&self) -> Option<Vendor> {
        self.visible_vendors().get(self.table().selected).map(|v| (*v).clone())
    }

    fn selected_food_item(&self) -> Option<FoodItem> {
        self.visible_food_items().get(self.table().selected).map(|f| (*f).clone())
    }

    fn selected_delivery_person(&self) -> Option<DeliveryPerson> {
        self.visible_delivery_persons().get(self.table().selected).map(|p| (*p).clone())
    }

    fn selected_order(&self) -> Option<Order> {
        let selected = self.table().selected;
        match self.page {
            Page::Dashboard => self.recent_orders().get(selected).cloned(),
            Page::Orders => self.visible_orders().get(selected).map(|o| (*o).clone()),
            _ => None,
        }
    }

    /// Order shown in the details popup
    pub fn detail_order(&self) -> Option<&Order> {
        let id = self.detail_order.as_deref()?;
        self.data.orders.iter().find(|o| o.id == id)
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle popups first
        if self.popup != Popup::None {
            return self.handle_popup_key(key).await;
        }

        if self.table().searching {
            self.handle_search_key(key);
            return Ok(());
        }

        self.handle_normal_key(key).await
    }

    async fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            // Page navigation
            KeyCode::Tab => self.go_to(self.page.next()),
            KeyCode::BackTab => self.go_to(self.page.prev()),
            KeyCode::Char(c @ '1'..='5') => {
                let idx = c as usize - '1' as usize;
                self.go_to(Page::ALL[idx]);
            }

            // Row navigation
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.row_count();
                self.table_mut().select_next(len);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let len = self.row_count();
                self.table_mut().select_prev(len);
            }

            // Search and export (list pages only)
            KeyCode::Char('/') if self.page != Page::Dashboard => {
                self.table_mut().searching = true;
            }
            KeyCode::Char('x') => self.export_current().await?,

            // Filter bar
            KeyCode::Char('f') => self.focus_next_filter(),
            KeyCode::Right => self.cycle_filter(true),
            KeyCode::Left => self.cycle_filter(false),
            KeyCode::Char('a') => self.apply_filters(),
            KeyCode::Char('c') => self.clear_filters(),

            // Record actions
            KeyCode::Char('n') => self.open_add_form(),
            KeyCode::Char('e') => self.edit_selection(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selection(),
            KeyCode::Enter | KeyCode::Char('v') => self.view_selection(),
            KeyCode::Char('s') => self.change_order_status(),
            KeyCode::Char('p') if self.page == Page::Deliveries => self.call_selection(),
            KeyCode::Char('w') => self.whatsapp_selection(),

            // Dashboard quick actions
            KeyCode::Char('V') => self.quick_action(Page::Vendors),
            KeyCode::Char('F') => self.quick_action(Page::FoodItems),
            KeyCode::Char('D') => self.quick_action(Page::Deliveries),

            // Help (? or h)
            KeyCode::Char('?') | KeyCode::Char('h') => self.popup = Popup::Help,

            _ => {}
        }
        Ok(())
    }

    async fn handle_popup_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.popup {
            Popup::AddVendor => self.handle_vendor_form_key(key),
            Popup::AddFoodItem => self.handle_food_form_key(key),
            Popup::AddDeliveryPerson => self.handle_delivery_form_key(key),
            Popup::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Enter | KeyCode::Char('q')) {
                    self.popup = Popup::None;
                }
            }
            Popup::Alert | Popup::OrderDetails => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('q')) {
                    self.popup = Popup::None;
                    self.alert = None;
                    self.detail_order = None;
                }
            }
            Popup::Confirm => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.popup = Popup::None;
                    self.confirm_action();
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.popup = Popup::None;
                    self.confirm = None;
                }
                _ => {}
            },
            Popup::QuickAction(page) => match key.code {
                KeyCode::Enter | KeyCode::Char('y') => {
                    self.popup = Popup::None;
                    self.go_to(page);
                }
                KeyCode::Esc | KeyCode::Char('n') => self.popup = Popup::None,
                _ => {}
            },
            Popup::None => {}
        }
        Ok(())
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                let table = self.table_mut();
                table.searching = false;
                table.query.clear();
            }
            KeyCode::Enter => self.table_mut().searching = false,
            KeyCode::Backspace => {
                self.table_mut().query.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.table_mut().query.push(c);
            }
            _ => {}
        }
        let len = self.row_count();
        self.table_mut().clamp(len);
    }

    fn go_to(&mut self, page: Page) {
        if self.page != page {
            tracing::debug!("Switching to {:?}", page);
        }
        self.page = page;
        self.filter_focus = 0;
        let len = self.row_count();
        self.table_mut().clamp(len);
    }

    // Filter bar

    /// Labels and current draft values of this page's filter controls
    pub fn filter_controls(&self) -> Vec<(&'static str, String)> {
        let all = |v: Option<String>, all_label: &str| v.unwrap_or_else(|| all_label.to_string());
        match self.page {
            Page::Dashboard => Vec::new(),
            Page::Vendors => {
                let f = &self.vendor_filter.draft;
                vec![
                    ("Category", all(f.category.map(|c| c.to_string()), "All Categories")),
                    ("Status", all(f.status.map(|s| s.to_string()), "All Status")),
                ]
            }
            Page::FoodItems => {
                let f = &self.food_filter.draft;
                let vendor = f
                    .vendor_id
                    .as_deref()
                    .map(|id| self.data.vendor(id).map_or(id.to_string(), |v| v.name.clone()));
                vec![
                    ("Vendor", all(vendor, "All Vendors")),
                    ("Category", all(f.category.clone(), "All Categories")),
                    ("Availability", all(f.availability.map(|a| a.label().to_string()), "All Items")),
                ]
            }
            Page::Deliveries => {
                let f = &self.delivery_filter.draft;
                vec![("Status", all(f.status.map(|s| s.to_string()), "All Status"))]
            }
            Page::Orders => {
                let f = &self.order_filter.draft;
                vec![("Status", all(f.status.map(|s| s.to_string()), "All Status"))]
            }
        }
    }

    pub fn filters_dirty(&self) -> bool {
        match self.page {
            Page::Dashboard => false,
            Page::Vendors => self.vendor_filter.is_dirty(),
            Page::FoodItems => self.food_filter.is_dirty(),
            Page::Deliveries => self.delivery_filter.is_dirty(),
            Page::Orders => self.order_filter.is_dirty(),
        }
    }

    fn focus_next_filter(&mut self) {
        let n = self.filter_controls().len();
        if n > 0 {
            self.filter_focus = (self.filter_focus + 1) % n;
        }
    }

    fn cycle_filter(&mut self, forward: bool) {
        // Stepping backwards is stepping forwards through the reversed list
        fn step<T: Clone + PartialEq>(current: &Option<T>, mut options: Vec<T>, forward: bool) -> Option<T> {
            if !forward {
                options.reverse();
            }
            cycle_option(current, &options)
        }

        match (self.page, self.filter_focus) {
            (Page::Vendors, 0) => {
                let f = &mut self.vendor_filter.draft;
                f.category = step(&f.category, VendorCategory::ALL.to_vec(), forward);
            }
            (Page::Vendors, _) => {
                let f = &mut self.vendor_filter.draft;
                f.status = step(&f.status, Status::ALL.to_vec(), forward);
            }
            (Page::FoodItems, 0) => {
                let ids: Vec<String> = self.data.vendors.iter().map(|v| v.id.clone()).collect();
                let f = &mut self.food_filter.draft;
                f.vendor_id = step(&f.vendor_id, ids, forward);
            }
            (Page::FoodItems, 1) => {
                let categories = self.data.food_categories();
                let f = &mut self.food_filter.draft;
                f.category = step(&f.category, categories, forward);
            }
            (Page::FoodItems, _) => {
                let f = &mut self.food_filter.draft;
                f.availability = step(&f.availability, Availability::ALL.to_vec(), forward);
            }
            (Page::Deliveries, _) => {
                let f = &mut self.delivery_filter.draft;
                f.status = step(&f.status, Status::ALL.to_vec(), forward);
            }
            (Page::Orders, _) => {
                let f = &mut self.order_filter.draft;
                f.status = step(&f.status, OrderStatus::ALL.to_vec(), forward);
            }
            (Page::Dashboard, _) => {}
        }
    }

    fn apply_filters(&mut self) {
        match self.page {
            Page::Dashboard => return,
            Page::Vendors => self.vendor_filter.apply(),
            Page::FoodItems => self.food_filter.apply(),
            Page::Deliveries => self.delivery_filter.apply(),
            Page::Orders => self.order_filter.apply(),
        }
        let len = self.row_count();
        self.table_mut().clamp(len);
        self.set_status(format!("Filters applied: {} result(s)", len));
    }

    fn clear_filters(&mut self) {
        match self.page {
            Page::Dashboard => return,
            Page::Vendors => self.vendor_filter.clear(),
            Page::FoodItems => self.food_filter.clear(),
            Page::Deliveries => self.delivery_filter.clear(),
            Page::Orders => self.order_filter.clear(),
        }
        self.filter_focus = 0;
        self.set_status("Filters cleared");
    }

    // Record actions

    fn open_add_form(&mut self) {
        match self.page {
            Page::Vendors => {
                self.vendor_form = Some(VendorForm::default());
                self.popup = Popup::AddVendor;
            }
            Page::FoodItems => {
                self.food_form = Some(FoodItemForm::new(&self.data.vendors));
                self.popup = Popup::AddFoodItem;
            }
            Page::Deliveries => {
                self.delivery_form = Some(DeliveryPersonForm::default());
                self.popup = Popup::AddDeliveryPerson;
            }
            Page::Dashboard | Page::Orders => {}
        }
    }

    fn quick_action(&mut self, page: Page) {
        if self.page == Page::Dashboard {
            self.popup = Popup::QuickAction(page);
        }
    }

    fn edit_selection(&mut self) {
        let msg = match self.page {
            Page::Vendors => self.selected_vendor().map(|v| format!("Edit vendor: {}", v.name)),
            Page::FoodItems => self.selected_food_item().map(|f| format!("Edit food item: {}", f.name)),
            Page::Deliveries => self.selected_delivery_person().map(|p| format!("Edit delivery person: {}", p.name)),
            Page::Dashboard | Page::Orders => None,
        };
        if let Some(msg) = msg {
            self.show_alert(msg);
        }
    }

    fn view_selection(&mut self) {
        match self.page {
            Page::Vendors => {
                if let Some(v) = self.selected_vendor() {
                    self.show_alert(format!("View menu for: {}", v.name));
                }
            }
            Page::FoodItems => {
                if let Some(f) = self.selected_food_item() {
                    self.show_alert(format!("View details for: {}", f.name));
                }
            }
            Page::Dashboard | Page::Orders => {
                if let Some(order) = self.selected_order() {
                    self.detail_order = Some(order.id);
                    self.popup = Popup::OrderDetails;
                }
            }
            Page::Deliveries => {}
        }
    }

    fn delete_selection(&mut self) {
        let action = match self.page {
            Page::Vendors => self.selected_vendor().map(|v| ConfirmAction::DeleteVendor(v.name)),
            Page::FoodItems => self.selected_food_item().map(|f| ConfirmAction::DeleteFoodItem(f.name)),
            Page::Deliveries => self
                .selected_delivery_person()
                .map(|p| ConfirmAction::DeleteDeliveryPerson(p.name)),
            Page::Dashboard | Page::Orders => None,
        };
        if let Some(action) = action {
            self.confirm = Some(action);
            self.popup = Popup::Confirm;
        }
    }

    /// Placeholder delete: acknowledges without touching the dataset
    fn confirm_action(&mut self) {
        let Some(action) = self.confirm.take() else { return };
        let msg = match action {
            ConfirmAction::DeleteVendor(name) => format!("Deleted vendor: {}", name),
            ConfirmAction::DeleteFoodItem(name) => format!("Deleted food item: {}", name),
            ConfirmAction::DeleteDeliveryPerson(name) => format!("Deleted delivery person: {}", name),
        };
        self.show_alert(msg);
    }

    /// Placeholder status change: cycles through the other statuses, order is unchanged
    fn change_order_status(&mut self) {
        if self.page != Page::Orders {
            return;
        }
        let Some(order) = self.selected_order() else { return };

        // Step from the last pick for this order, skipping its stored status
        let from = match &self.picked_status {
            Some((id, picked)) if *id == order.id => *picked,
            _ => order.status,
        };
        let mut next = from.next();
        if next == order.status {
            next = next.next();
        }

        self.picked_status = Some((order.id.clone(), next));
        self.show_alert(format!("Order {} status changed to: {}", order.id, next));
    }

    fn call_selection(&mut self) {
        if let Some(p) = self.selected_delivery_person() {
            self.show_alert(format!("Call {}: {}", p.name, call_link(&p)));
        }
    }

    fn whatsapp_selection(&mut self) {
        if self.page != Page::Deliveries {
            return;
        }
        if let Some(p) = self.selected_delivery_person() {
            self.show_alert(format!("WhatsApp {}: {}", p.name, whatsapp_link(&p)));
        }
    }

    async fn export_current(&mut self) -> Result<()> {
        let Some(name) = self.page.export_name() else {
            return Ok(());
        };
        let dir = self.config.export_dir();
        let currency = self.config.currency.clone();

        let result = match self.page {
            Page::Vendors => table::export(&dir, name, self.today, &columns::vendors(), &self.visible_vendors()).await,
            Page::FoodItems => {
                table::export(&dir, name, self.today, &columns::food_items(&currency), &self.visible_food_items()).await
            }
            Page::Deliveries => {
                table::export(&dir, name, self.today, &columns::delivery_persons(), &self.visible_delivery_persons())
                    .await
            }
            Page::Orders => {
                table::export(&dir, name, self.today, &columns::orders(&currency), &self.visible_orders()).await
            }
            Page::Dashboard => return Ok(()),
        };

        match result {
            Ok(path) => self.set_status(format!("Exported to {}", path.display())),
            Err(e) => {
                tracing::warn!("Export failed: {}", e);
                self.set_status(format!("Export failed: {}", e));
            }
        }
        Ok(())
    }

    // Forms

    fn handle_vendor_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.vendor_form.as_mut() else {
            self.popup = Popup::None;
            return;
        };

        match key.code {
            KeyCode::Esc => {
                self.vendor_form = None;
                self.popup = Popup::None;
                return;
            }
            KeyCode::PageUp => form.prev_tab(),
            KeyCode::PageDown => form.next_tab(),
            KeyCode::F(n @ 1..=3) => {
                let tab = VendorTab::ALL[usize::from(n) - 1];
                if !form.jump_to_tab(tab) {
                    self.set_status("Finish the current step first");
                }
                return;
            }
            KeyCode::Enter | KeyCode::F(4) if !form.is_last_tab() => form.next_tab(),
            KeyCode::Enter | KeyCode::F(4) => {
                if let Some(sub) = form.submit() {
                    log_submission("Vendor", &sub);
                    self.vendor_form = None;
                    self.popup = Popup::None;
                    self.show_alert("Vendor added successfully!");
                } else {
                    self.set_status("Please fix the highlighted fields");
                }
            }
            _ => handle_form_input(form, key),
        }
    }

    fn handle_food_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.food_form.as_mut() else {
            self.popup = Popup::None;
            return;
        };

        match key.code {
            KeyCode::Esc => {
                self.food_form = None;
                self.popup = Popup::None;
            }
            KeyCode::F(2) => {
                if let Some(sub) = form.submit() {
                    log_submission("Food item", &sub);
                    self.food_form = None;
                    self.popup = Popup::None;
                    self.show_alert("Food item added successfully!");
                } else {
                    self.set_status("Please fix the highlighted fields");
                }
            }
            KeyCode::F(3) => form.add_group(),
            KeyCode::F(4) => match form.current_group() {
                Some(g) => form.add_option(g),
                None => self.set_status("Move to an add-on group first"),
            },
            KeyCode::F(5) => form.remove_focused(),
            KeyCode::Enter => form.next_field(),
            _ => handle_form_input(form, key),
        }
    }

    fn handle_delivery_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.delivery_form.as_mut() else {
            self.popup = Popup::None;
            return;
        };

        match key.code {
            KeyCode::Esc => {
                self.delivery_form = None;
                self.popup = Popup::None;
            }
            KeyCode::F(2) => {
                if let Some(sub) = form.submit() {
                    log_submission("Delivery person", &sub);
                    self.delivery_form = None;
                    self.popup = Popup::None;
                    self.show_alert("Delivery person added successfully!");
                } else {
                    self.set_status("Please fix the highlighted fields");
                }
            }
            KeyCode::Enter => form.next_field(),
            _ => handle_form_input(form, key),
        }
    }

    pub fn tick(&mut self) {
        // Clear status message after timeout
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= STATUS_TIMEOUT_SECS {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}

/// Keys every form handles the same way
fn handle_form_input(form: &mut dyn FormInput, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Right => form.cycle(true),
        KeyCode::Left => form.cycle(false),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => form.insert_char(c),
        _ => {}
    }
}

fn log_submission<T: Serialize>(what: &str, submission: &T) {
    match serde_json::to_string(submission) {
        Ok(json) => tracing::info!(submission = %json, "{} submitted", what),
        Err(e) => tracing::warn!("Could not serialize {} submission: {}", what, e),
    }
}

pub fn call_link(person: &DeliveryPerson) -> String {
    format!("tel:{}", person.phone)
}

pub fn whatsapp_link(person: &DeliveryPerson) -> String {
    let digits: String = person.phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let message = format!("Hello {}, this is from Omeal admin panel.", person.name);
    format!("https://wa.me/{}?text={}", digits, format::url_encode(&message))
}

fn notify(summary: &str, body: &str) {
    let result = notify_rust::Notification::new()
        .summary(summary)
        .body(body)
        .icon("dialog-information")
        .show();
    if let Err(e) = result {
        tracing::warn!("Desktop notification failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        App::new(AppConfig::default(), Dataset::mock(), today)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn press(app: &mut App, code: KeyCode) {
        app.handle_key(key(code)).await.unwrap();
    }

    async fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c)).await;
        }
    }

    #[tokio::test]
    async fn test_page_navigation() {
        let mut app = app();
        assert_eq!(app.page, Page::Dashboard);
        press(&mut app, KeyCode::Tab).await;
        assert_eq!(app.page, Page::Vendors);
        press(&mut app, KeyCode::BackTab).await;
        press(&mut app, KeyCode::BackTab).await;
        assert_eq!(app.page, Page::Orders);
        press(&mut app, KeyCode::Char('3')).await;
        assert_eq!(app.page, Page::FoodItems);
    }

    #[tokio::test]
    async fn test_filter_is_draft_until_applied() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2')).await;

        // focus status control, pick "Inactive" by stepping backwards
        press(&mut app, KeyCode::Char('f')).await;
        press(&mut app, KeyCode::Left).await;
        assert_eq!(app.vendor_filter.draft.status, Some(Status::Inactive));
        assert!(app.filters_dirty());
        assert_eq!(app.visible_vendors().len(), 3);

        press(&mut app, KeyCode::Char('a')).await;
        let names: Vec<_> = app.visible_vendors().iter().map(|v| v.name.clone()).collect();
        assert_eq!(names, vec!["Sweet Treats Bakery"]);

        press(&mut app, KeyCode::Char('c')).await;
        assert_eq!(app.visible_vendors().len(), 3);
        assert_eq!(app.filter_controls()[1].1, "All Status");
    }

    #[tokio::test]
    async fn test_food_item_filters_use_dataset_options() {
        let mut app = app();
        app.go_to(Page::FoodItems);

        press(&mut app, KeyCode::Right).await; // vendor -> Pizza Corner
        assert_eq!(app.filter_controls()[0].1, "Pizza Corner");
        press(&mut app, KeyCode::Char('f')).await;
        press(&mut app, KeyCode::Right).await; // category -> Pizza
        press(&mut app, KeyCode::Char('a')).await;

        let items = app.visible_food_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "f1");
    }

    #[tokio::test]
    async fn test_search_narrows_and_clamps_selection() {
        let mut app = app();
        app.go_to(Page::Orders);
        press(&mut app, KeyCode::Down).await;
        press(&mut app, KeyCode::Down).await;
        assert_eq!(app.table().selected, 2);

        press(&mut app, KeyCode::Char('/')).await;
        type_str(&mut app, "hassan").await;
        assert_eq!(app.visible_orders().len(), 1);
        assert_eq!(app.table().selected, 0);

        press(&mut app, KeyCode::Enter).await;
        assert!(!app.table().searching);
        assert_eq!(app.table().query, "hassan");

        // '/' then Esc drops the query
        press(&mut app, KeyCode::Char('/')).await;
        press(&mut app, KeyCode::Esc).await;
        assert_eq!(app.visible_orders().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_confirms_without_removing() {
        let mut app = app();
        app.go_to(Page::Deliveries);
        press(&mut app, KeyCode::Char('d')).await;
        assert_eq!(app.popup, Popup::Confirm);
        assert_eq!(
            app.confirm.as_ref().map(|c| c.prompt()),
            Some("Are you sure you want to delete Mohammed Alami?".to_string())
        );

        press(&mut app, KeyCode::Char('y')).await;
        assert_eq!(app.popup, Popup::Alert);
        assert_eq!(app.alert.as_deref(), Some("Deleted delivery person: Mohammed Alami"));
        assert_eq!(app.data.delivery_persons.len(), 3);

        press(&mut app, KeyCode::Esc).await;
        assert_eq!(app.popup, Popup::None);

        // declining leaves no alert behind
        press(&mut app, KeyCode::Char('d')).await;
        press(&mut app, KeyCode::Char('n')).await;
        assert_eq!(app.popup, Popup::None);
        assert!(app.confirm.is_none());
    }

    #[tokio::test]
    async fn test_order_status_change_is_placeholder() {
        let mut app = app();
        app.go_to(Page::Orders);
        press(&mut app, KeyCode::Char('s')).await;
        assert_eq!(app.alert.as_deref(), Some("Order o1 status changed to: Delivered"));
        assert_eq!(app.data.orders[0].status, OrderStatus::InProgress);
    }

    #[tokio::test]
    async fn test_order_status_cycles_through_other_statuses() {
        let mut app = app();
        app.go_to(Page::Orders);

        let mut seen = Vec::new();
        for _ in 0..4 {
            press(&mut app, KeyCode::Char('s')).await;
            seen.push(app.alert.clone().unwrap_or_default());
            press(&mut app, KeyCode::Esc).await;
        }
        assert_eq!(
            seen,
            vec![
                "Order o1 status changed to: Delivered",
                "Order o1 status changed to: Cancelled",
                "Order o1 status changed to: Pending",
                "Order o1 status changed to: Delivered",
            ]
        );
        assert_eq!(app.data.orders[0].status, OrderStatus::InProgress);

        // a different order starts from its own stored status
        press(&mut app, KeyCode::Down).await;
        press(&mut app, KeyCode::Char('s')).await;
        assert_eq!(app.alert.as_deref(), Some("Order o2 status changed to: Cancelled"));
    }

    #[test]
    fn test_tick_clears_stale_status_only() {
        let mut app = app();
        app.set_status("Exported");
        app.tick();
        assert_eq!(app.status_message.as_deref(), Some("Exported"));

        app.status_message_time = Some(Instant::now() - std::time::Duration::from_secs(4));
        app.tick();
        assert!(app.status_message.is_none());
        assert!(app.status_message_time.is_none());
    }

    #[tokio::test]
    async fn test_order_details_from_dashboard() {
        let mut app = app();
        press(&mut app, KeyCode::Down).await;
        press(&mut app, KeyCode::Enter).await;
        assert_eq!(app.popup, Popup::OrderDetails);
        assert_eq!(app.detail_order().map(|o| o.id.as_str()), Some("o2"));

        press(&mut app, KeyCode::Esc).await;
        assert!(app.detail_order().is_none());
    }

    #[tokio::test]
    async fn test_vendor_wizard_invalid_email_returns_to_owner_tab() {
        let mut app = app();
        app.go_to(Page::Vendors);
        press(&mut app, KeyCode::Char('n')).await;
        assert_eq!(app.popup, Popup::AddVendor);

        // Vendor Info tab
        type_str(&mut app, "Tajine House").await;
        press(&mut app, KeyCode::Tab).await;
        press(&mut app, KeyCode::Tab).await;
        type_str(&mut app, "+212 6 10 20 30 40").await;
        press(&mut app, KeyCode::Tab).await;
        type_str(&mut app, "Marrakech").await;
        press(&mut app, KeyCode::Enter).await;

        // Owner Details tab
        type_str(&mut app, "Salma").await;
        press(&mut app, KeyCode::Tab).await;
        type_str(&mut app, "salma@tajine").await;
        press(&mut app, KeyCode::Tab).await;
        type_str(&mut app, "+212 6 10 20 30 41").await;
        press(&mut app, KeyCode::Enter).await;

        let form = app.vendor_form.as_ref().unwrap();
        assert!(form.is_last_tab());

        press(&mut app, KeyCode::Enter).await;
        let form = app.vendor_form.as_ref().unwrap();
        assert_eq!(app.popup, Popup::AddVendor);
        assert_eq!(form.tab, VendorTab::Owner);
        assert!(form.errors.contains_key(&crate::forms::vendor::VendorField::OwnerEmail));

        // fix the email and submit from the last tab
        press(&mut app, KeyCode::Tab).await;
        type_str(&mut app, ".ma").await;
        press(&mut app, KeyCode::Enter).await;
        press(&mut app, KeyCode::Enter).await;
        assert_eq!(app.popup, Popup::Alert);
        assert_eq!(app.alert.as_deref(), Some("Vendor added successfully!"));
        assert!(app.vendor_form.is_none());
        assert_eq!(app.data.vendors.len(), 3);
    }

    #[tokio::test]
    async fn test_delivery_form_rejects_bad_phone() {
        let mut app = app();
        app.go_to(Page::Deliveries);
        press(&mut app, KeyCode::Char('n')).await;
        type_str(&mut app, "Omar").await;
        press(&mut app, KeyCode::Enter).await;
        type_str(&mut app, "0612").await;
        press(&mut app, KeyCode::Enter).await;
        type_str(&mut app, "GH901234").await;
        press(&mut app, KeyCode::F(2)).await;

        assert_eq!(app.popup, Popup::AddDeliveryPerson);
        let form = app.delivery_form.as_ref().unwrap();
        assert_eq!(form.errors.len(), 1);

        press(&mut app, KeyCode::Esc).await;
        assert_eq!(app.popup, Popup::None);
        assert!(app.delivery_form.is_none());
    }

    #[tokio::test]
    async fn test_quick_action_navigates() {
        let mut app = app();
        press(&mut app, KeyCode::Char('F')).await;
        assert_eq!(app.popup, Popup::QuickAction(Page::FoodItems));
        press(&mut app, KeyCode::Enter).await;
        assert_eq!(app.page, Page::FoodItems);
        assert_eq!(app.popup, Popup::None);
    }

    #[tokio::test]
    async fn test_export_writes_visible_rows() {
        let dir = std::env::temp_dir().join(format!("omeal-app-export-{}", std::process::id()));
        let mut app = app();
        app.config.export_dir = Some(dir.clone());
        app.go_to(Page::Vendors);
        app.vendor_filter.draft.status = Some(Status::Active);
        app.vendor_filter.apply();

        press(&mut app, KeyCode::Char('x')).await;
        let csv = tokio::fs::read_to_string(dir.join("vendors-2024-01-20.csv")).await.unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(app.status_message.as_deref().unwrap_or("").starts_with("Exported to"));

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[test]
    fn test_contact_links() {
        let person = Dataset::mock().delivery_persons.remove(1);
        assert_eq!(call_link(&person), "tel:+212 6 77 88 99 00");
        assert_eq!(
            whatsapp_link(&person),
            "https://wa.me/212677889900?text=Hello%20Karim%20Benjelloun%2C%20this%20is%20from%20Omeal%20admin%20panel."
        );
    }
}
