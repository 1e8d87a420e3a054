use serde::Serialize;

use super::{is_amount_char, parse_amount, require, FieldErrors, FormInput};
use crate::data::model::{AddOnGroup, AddOnOption, Vendor};

pub const FOOD_CATEGORIES: [&str; 11] = [
    "Pizza", "Burger", "Sandwich", "Salad", "Pasta", "Juice", "Coffee", "Grocery Item", "Pastry",
    "Dessert", "Other",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FoodField {
    Name,
    Vendor,
    Category,
    Price,
    Description,
    Photo,
    Available,
    GroupName(usize),
    OptionName(usize, usize),
    OptionPrice(usize, usize),
}

impl FoodField {
    pub fn label(self) -> String {
        match self {
            FoodField::Name => "Item Name *".into(),
            FoodField::Vendor => "Vendor *".into(),
            FoodField::Category => "Category *".into(),
            FoodField::Price => "Price (MAD) *".into(),
            FoodField::Description => "Description *".into(),
            FoodField::Photo => "Food Photo (path or URL)".into(),
            FoodField::Available => "Item is available for ordering".into(),
            FoodField::GroupName(g) => format!("Group {} name", g + 1),
            FoodField::OptionName(_, o) => format!("  Option {} name", o + 1),
            FoodField::OptionPrice(_, o) => format!("  Option {} price", o + 1),
        }
    }
}

/// Add-on option being edited; the price stays text until submit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionInput {
    pub id: String,
    pub name: String,
    pub price: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupInput {
    pub id: String,
    pub name: String,
    pub options: Vec<OptionInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemSubmission {
    pub name: String,
    pub vendor_id: String,
    pub vendor_name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub availability: bool,
    pub add_ons: Vec<AddOnGroup>,
}

#[derive(Debug, Clone)]
pub struct FoodItemForm {
    pub focus: usize,
    /// (id, name) of every vendor the item can be attached to
    pub vendors: Vec<(String, String)>,

    pub name: String,
    pub vendor: Option<usize>,
    pub category: Option<usize>,
    pub price: String,
    pub description: String,
    pub photo: String,
    pub available: bool,
    pub add_ons: Vec<GroupInput>,

    pub errors: FieldErrors<FoodField>,
    next_id: u32,
}

impl FoodItemForm {
    pub fn new(vendors: &[Vendor]) -> Self {
        Self {
            focus: 0,
            vendors: vendors.iter().map(|v| (v.id.clone(), v.name.clone())).collect(),
            name: String::new(),
            vendor: None,
            category: None,
            price: String::new(),
            description: String::new(),
            photo: String::new(),
            available: true,
            add_ons: Vec::new(),
            errors: FieldErrors::new(),
            next_id: 0,
        }
    }

    /// Every focusable field, add-on rows included, in display order
    pub fn fields(&self) -> Vec<FoodField> {
        let mut fields = vec![
            FoodField::Name,
            FoodField::Vendor,
            FoodField::Category,
            FoodField::Price,
            FoodField::Description,
            FoodField::Photo,
            FoodField::Available,
        ];
        for (g, group) in self.add_ons.iter().enumerate() {
            fields.push(FoodField::GroupName(g));
            for o in 0..group.options.len() {
                fields.push(FoodField::OptionName(g, o));
                fields.push(FoodField::OptionPrice(g, o));
            }
        }
        fields
    }

    pub fn focused(&self) -> FoodField {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    fn focus_on(&mut self, field: FoodField) {
        if let Some(idx) = self.fields().iter().position(|f| *f == field) {
            self.focus = idx;
        }
    }

    fn new_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-new-{}", prefix, self.next_id)
    }

    pub fn value(&self, field: FoodField) -> String {
        match field {
            FoodField::Name => self.name.clone(),
            FoodField::Vendor => self
                .vendor
                .and_then(|i| self.vendors.get(i))
                .map(|(_, name)| name.clone())
                .unwrap_or_else(|| "Select vendor".to_string()),
            FoodField::Category => self
                .category
                .map(|i| FOOD_CATEGORIES[i].to_string())
                .unwrap_or_else(|| "Select category".to_string()),
            FoodField::Price => self.price.clone(),
            FoodField::Description => self.description.clone(),
            FoodField::Photo => self.photo.clone(),
            FoodField::Available => if self.available { "[x]" } else { "[ ]" }.to_string(),
            FoodField::GroupName(g) => self.add_ons.get(g).map(|x| x.name.clone()).unwrap_or_default(),
            FoodField::OptionName(g, o) => self.option(g, o).map(|x| x.name.clone()).unwrap_or_default(),
            FoodField::OptionPrice(g, o) => self.option(g, o).map(|x| x.price.clone()).unwrap_or_default(),
        }
    }

    fn option(&self, g: usize, o: usize) -> Option<&OptionInput> {
        self.add_ons.get(g).and_then(|group| group.options.get(o))
    }

    fn text_mut(&mut self, field: FoodField) -> Option<&mut String> {
        match field {
            FoodField::Name => Some(&mut self.name),
            FoodField::Price => Some(&mut self.price),
            FoodField::Description => Some(&mut self.description),
            FoodField::Photo => Some(&mut self.photo),
            FoodField::GroupName(g) => self.add_ons.get_mut(g).map(|x| &mut x.name),
            FoodField::OptionName(g, o) => self
                .add_ons
                .get_mut(g)
                .and_then(|group| group.options.get_mut(o))
                .map(|x| &mut x.name),
            FoodField::OptionPrice(g, o) => self
                .add_ons
                .get_mut(g)
                .and_then(|group| group.options.get_mut(o))
                .map(|x| &mut x.price),
            FoodField::Vendor | FoodField::Category | FoodField::Available => None,
        }
    }

    /// The add-on group the cursor is in, if any
    pub fn current_group(&self) -> Option<usize> {
        match self.focused() {
            FoodField::GroupName(g) | FoodField::OptionName(g, _) | FoodField::OptionPrice(g, _) => Some(g),
            _ => None,
        }
    }

    pub fn add_group(&mut self) {
        let id = self.new_id("ag");
        self.add_ons.push(GroupInput { id, name: String::new(), options: Vec::new() });
        self.focus_on(FoodField::GroupName(self.add_ons.len() - 1));
    }

    pub fn remove_group(&mut self, g: usize) {
        if g < self.add_ons.len() {
            self.add_ons.remove(g);
            self.focus = self.focus.min(self.fields().len() - 1);
        }
    }

    pub fn rename_group(&mut self, g: usize, name: &str) {
        if let Some(group) = self.add_ons.get_mut(g) {
            group.name = name.to_string();
        }
    }

    pub fn add_option(&mut self, g: usize) {
        let id = self.new_id("ao");
        if let Some(group) = self.add_ons.get_mut(g) {
            group.options.push(OptionInput { id, name: String::new(), price: "0".to_string() });
            let o = group.options.len() - 1;
            self.focus_on(FoodField::OptionName(g, o));
        }
    }

    pub fn remove_option(&mut self, g: usize, o: usize) {
        if let Some(group) = self.add_ons.get_mut(g) {
            if o < group.options.len() {
                group.options.remove(o);
                self.focus = self.focus.min(self.fields().len() - 1);
            }
        }
    }

    pub fn set_option_name(&mut self, g: usize, o: usize, name: &str) {
        if let Some(opt) = self.add_ons.get_mut(g).and_then(|x| x.options.get_mut(o)) {
            opt.name = name.to_string();
        }
    }

    pub fn set_option_price(&mut self, g: usize, o: usize, price: f64) {
        if let Some(opt) = self.add_ons.get_mut(g).and_then(|x| x.options.get_mut(o)) {
            opt.price = price.to_string();
        }
    }

    /// Remove the add-on option or group under the cursor
    pub fn remove_focused(&mut self) {
        match self.focused() {
            FoodField::OptionName(g, o) | FoodField::OptionPrice(g, o) => self.remove_option(g, o),
            FoodField::GroupName(g) => self.remove_group(g),
            _ => {}
        }
    }

    pub fn add_on_groups(&self) -> Vec<AddOnGroup> {
        self.add_ons
            .iter()
            .map(|g| AddOnGroup {
                id: g.id.clone(),
                name: g.name.trim().to_string(),
                options: g
                    .options
                    .iter()
                    .map(|o| AddOnOption {
                        id: o.id.clone(),
                        name: o.name.trim().to_string(),
                        price: parse_amount(&o.price),
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn validate(&self) -> FieldErrors<FoodField> {
        let mut errors = FieldErrors::new();
        require(&mut errors, FoodField::Name, &self.name, "Item name is required");
        if self.vendor.is_none() {
            errors.insert(FoodField::Vendor, "Vendor selection is required".to_string());
        }
        if self.category.is_none() {
            errors.insert(FoodField::Category, "Category is required".to_string());
        }
        require(&mut errors, FoodField::Description, &self.description, "Description is required");
        if parse_amount(&self.price) <= 0.0 {
            errors.insert(FoodField::Price, "Price must be greater than 0".to_string());
        }
        errors
    }

    pub fn submit(&mut self) -> Option<FoodItemSubmission> {
        self.errors = self.validate();
        if !self.errors.is_empty() {
            return None;
        }

        let (vendor_id, vendor_name) = self.vendor.and_then(|i| self.vendors.get(i)).cloned()?;
        let category = FOOD_CATEGORIES[self.category?].to_string();

        Some(FoodItemSubmission {
            name: self.name.trim().to_string(),
            vendor_id,
            vendor_name,
            category,
            description: self.description.trim().to_string(),
            price: parse_amount(&self.price),
            photo: Some(self.photo.trim().to_string()).filter(|s| !s.is_empty()),
            availability: self.available,
            add_ons: self.add_on_groups(),
        })
    }
}

fn step(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (current, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    })
}

impl FormInput for FoodItemForm {
    fn insert_char(&mut self, c: char) {
        let field = self.focused();
        let numeric = matches!(field, FoodField::Price | FoodField::OptionPrice(..));
        if numeric && !is_amount_char(c) {
            return;
        }
        if let Some(text) = self.text_mut(field) {
            text.push(c);
            self.errors.remove(&field);
        } else if c == ' ' {
            self.cycle(true);
        }
    }

    fn backspace(&mut self) {
        let field = self.focused();
        if let Some(text) = self.text_mut(field) {
            text.pop();
            self.errors.remove(&field);
        }
    }

    fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields().len();
    }

    fn prev_field(&mut self) {
        let len = self.fields().len();
        self.focus = self.focus.checked_sub(1).unwrap_or(len - 1);
    }

    fn cycle(&mut self, forward: bool) {
        match self.focused() {
            FoodField::Vendor => {
                self.vendor = step(self.vendor, self.vendors.len(), forward);
                self.errors.remove(&FoodField::Vendor);
            }
            FoodField::Category => {
                self.category = step(self.category, FOOD_CATEGORIES.len(), forward);
                self.errors.remove(&FoodField::Category);
            }
            FoodField::Available => self.available = !self.available,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;

    fn valid_form() -> FoodItemForm {
        let mut f = FoodItemForm::new(&Dataset::mock().vendors);
        f.name = "Msemen".into();
        f.vendor = Some(2);
        f.category = Some(8);
        f.price = "12.5".into();
        f.description = "Square flatbread with honey".into();
        f
    }

    #[test]
    fn test_required_fields_and_price() {
        let mut f = FoodItemForm::new(&Dataset::mock().vendors);
        f.price = "abc".into(); // non-numeric parses to zero
        assert!(f.submit().is_none());
        assert_eq!(f.errors.len(), 5);
        assert_eq!(f.errors[&FoodField::Price], "Price must be greater than 0");
        assert_eq!(f.errors[&FoodField::Vendor], "Vendor selection is required");
    }

    #[test]
    fn test_submission_resolves_vendor_and_category() {
        let mut f = valid_form();
        let sub = f.submit().expect("valid form");
        assert_eq!(sub.vendor_id, "v3");
        assert_eq!(sub.vendor_name, "Sweet Treats Bakery");
        assert_eq!(sub.category, "Pastry");
        assert_eq!(sub.price, 12.5);
        assert!(sub.add_ons.is_empty());
    }

    #[test]
    fn test_add_on_editing() {
        let mut f = valid_form();
        f.add_group();
        assert_eq!(f.focused(), FoodField::GroupName(0));
        for c in "Sauces".chars() {
            f.insert_char(c);
        }

        f.add_option(0);
        assert_eq!(f.focused(), FoodField::OptionName(0, 0));
        f.set_option_name(0, 0, "Amlou");
        f.set_option_price(0, 0, 6.0);
        f.add_option(0);
        f.set_option_name(0, 1, "Honey");
        f.add_group();
        f.rename_group(1, "Drinks");

        let groups = f.add_on_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Sauces");
        assert_eq!(groups[0].options[0].price, 6.0);
        assert_eq!(groups[0].options[1].price, 0.0);
        assert_ne!(groups[0].id, groups[1].id);

        f.remove_option(0, 0);
        assert_eq!(f.add_on_groups()[0].options[0].name, "Honey");
        f.remove_group(0);
        assert_eq!(f.add_on_groups()[0].name, "Drinks");
        assert!(f.focus < f.fields().len());
    }

    #[test]
    fn test_remove_focused_option() {
        let mut f = valid_form();
        f.add_group();
        f.add_option(0);
        f.next_field();
        assert_eq!(f.focused(), FoodField::OptionPrice(0, 0));
        assert_eq!(f.current_group(), Some(0));

        f.remove_focused();
        assert!(f.add_ons[0].options.is_empty());
        f.remove_focused();
        assert!(f.add_ons.is_empty());
        assert_eq!(f.current_group(), None);
    }

    #[test]
    fn test_price_input_rejects_letters() {
        let mut f = FoodItemForm::new(&[]);
        f.focus = 3;
        assert_eq!(f.focused(), FoodField::Price);
        for c in "1a2.5".chars() {
            f.insert_char(c);
        }
        assert_eq!(f.price, "12.5");
    }

    #[test]
    fn test_vendor_choice_cycles() {
        let mut f = FoodItemForm::new(&Dataset::mock().vendors);
        f.focus = 1;
        f.cycle(true);
        assert_eq!(f.value(FoodField::Vendor), "Pizza Corner");
        f.cycle(false);
        f.cycle(false);
        assert_eq!(f.value(FoodField::Vendor), "Fresh Market");

        let mut empty = FoodItemForm::new(&[]);
        empty.focus = 1;
        empty.cycle(true);
        assert_eq!(empty.vendor, None);
    }
}
