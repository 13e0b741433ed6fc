//! Represents a product in the catalog.
//!
//! # Record Store
//! This struct implements the [`Record`](record_store::Record) trait (see
//! [`product_store::entity`](crate::product_store::entity)), so a
//! [`StoreActor`](record_store::StoreActor) can hold it.
//!
//! - Creation parameters ([`ProductFormData`])
//! - Update parameters ([`ProductUpdate`])

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Longest accepted product name, in characters.
pub const MAX_NAME_LEN: usize = 100;
/// Longest accepted unit label, in characters.
pub const MAX_UNIT_LEN: usize = 50;
/// Quantities at or below this (and above zero) count as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub wholesale_price: f64,
    pub retail_price: f64,
    pub quantity: u32,
    pub category: String,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wholesale_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retail_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(rename = "lastUpdated", alias = "last_updated")]
    pub last_updated: DateTime<Utc>,
}

/// Stock band shown on the detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    Low,
    InStock,
}

impl Product {
    /// Builds a stored product from validated form data.
    pub fn from_form(id: ProductId, form: ProductFormData, now: DateTime<Utc>) -> Self {
        let form = form.normalized();
        Self {
            id,
            name: form.name,
            wholesale_price: form.wholesale_price,
            retail_price: form.retail_price,
            quantity: form.quantity,
            category: form.category,
            unit: form.unit,
            wholesale_unit: form.wholesale_unit,
            retail_unit: form.retail_unit,
            image_url: form.image_url,
            icon: form.icon,
            expiry_date: form.expiry_date,
            last_updated: now,
        }
    }

    pub fn stock_status(&self) -> StockStatus {
        match self.quantity {
            0 => StockStatus::OutOfStock,
            q if q <= LOW_STOCK_THRESHOLD => StockStatus::Low,
            _ => StockStatus::InStock,
        }
    }

    /// e.g. `₦1,200 / carton`
    pub fn wholesale_label(&self) -> String {
        price_label(
            self.wholesale_price,
            self.wholesale_unit.as_deref().unwrap_or(&self.unit),
        )
    }

    pub fn retail_label(&self) -> String {
        price_label(
            self.retail_price,
            self.retail_unit.as_deref().unwrap_or(&self.unit),
        )
    }

    /// Validates `update` in full, then applies every present field.
    ///
    /// Nothing is written when any field is invalid.
    pub fn apply(&mut self, update: ProductUpdate, now: DateTime<Utc>) -> Result<(), FieldError> {
        update.validate()?;

        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.wholesale_price {
            self.wholesale_price = price;
        }
        if let Some(price) = update.retail_price {
            self.retail_price = price;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(unit) = update.unit {
            self.unit = unit;
        }
        if let Some(unit) = update.wholesale_unit {
            self.wholesale_unit = non_blank(unit);
        }
        if let Some(unit) = update.retail_unit {
            self.retail_unit = non_blank(unit);
        }
        if let Some(url) = update.image_url {
            self.image_url = non_blank(url);
        }
        if let Some(icon) = update.icon {
            self.icon = non_blank(icon);
        }
        if let Some(expiry) = update.expiry_date {
            self.expiry_date = expiry;
        }
        self.last_updated = now;
        Ok(())
    }
}

/// Everything the product form submits: a [`Product`] minus id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFormData {
    pub name: String,
    pub wholesale_price: f64,
    pub retail_price: f64,
    pub quantity: u32,
    pub category: String,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub wholesale_unit: Option<String>,
    #[serde(default)]
    pub retail_unit: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

fn default_unit() -> String {
    "unit".to_string()
}

impl ProductFormData {
    /// A blank form with the defaults the "Add Product" dialog opens with.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wholesale_price: 0.0,
            retail_price: 0.0,
            quantity: 0,
            category: category.into(),
            unit: default_unit(),
            wholesale_unit: None,
            retail_unit: None,
            image_url: None,
            icon: None,
            expiry_date: None,
        }
    }

    pub fn with_prices(mut self, wholesale: f64, retail: f64) -> Self {
        self.wholesale_price = wholesale;
        self.retail_price = retail;
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Prefills the edit dialog from an existing product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            wholesale_price: product.wholesale_price,
            retail_price: product.retail_price,
            quantity: product.quantity,
            category: product.category.clone(),
            unit: product.unit.clone(),
            wholesale_unit: product.wholesale_unit.clone(),
            retail_unit: product.retail_unit.clone(),
            image_url: product.image_url.clone(),
            icon: product.icon.clone(),
            expiry_date: product.expiry_date,
        }
    }

    /// Checks every field; reports the first violation.
    pub fn validate(&self) -> Result<(), FieldError> {
        validate_name(&self.name)?;
        validate_price("wholesale_price", self.wholesale_price)?;
        validate_price("retail_price", self.retail_price)?;
        validate_category(&self.category)?;
        validate_unit(&self.unit)
    }

    /// Blank optional inputs become absent.
    pub fn normalized(mut self) -> Self {
        self.wholesale_unit = self.wholesale_unit.and_then(non_blank);
        self.retail_unit = self.retail_unit.and_then(non_blank);
        self.image_url = self.image_url.and_then(non_blank);
        self.icon = self.icon.and_then(non_blank);
        self
    }
}

/// Partial update. A blank optional text field clears it; `Some(None)` clears the expiry date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub wholesale_price: Option<f64>,
    pub retail_price: Option<f64>,
    pub quantity: Option<u32>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub wholesale_unit: Option<String>,
    pub retail_unit: Option<String>,
    pub image_url: Option<String>,
    pub icon: Option<String>,
    pub expiry_date: Option<Option<NaiveDate>>,
}

impl ProductUpdate {
    pub fn validate(&self) -> Result<(), FieldError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(price) = self.wholesale_price {
            validate_price("wholesale_price", price)?;
        }
        if let Some(price) = self.retail_price {
            validate_price("retail_price", price)?;
        }
        if let Some(category) = &self.category {
            validate_category(category)?;
        }
        if let Some(unit) = &self.unit {
            validate_unit(unit)?;
        }
        Ok(())
    }
}

/// The edit dialog submits the whole form; blank optional inputs clear the stored value.
impl From<ProductFormData> for ProductUpdate {
    fn from(form: ProductFormData) -> Self {
        Self {
            name: Some(form.name),
            wholesale_price: Some(form.wholesale_price),
            retail_price: Some(form.retail_price),
            quantity: Some(form.quantity),
            category: Some(form.category),
            unit: Some(form.unit),
            wholesale_unit: Some(form.wholesale_unit.unwrap_or_default()),
            retail_unit: Some(form.retail_unit.unwrap_or_default()),
            image_url: Some(form.image_url.unwrap_or_default()),
            icon: Some(form.icon.unwrap_or_default()),
            expiry_date: Some(form.expiry_date),
        }
    }
}

/// A form field that failed validation.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{field}: {reason}")]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

fn validate_name(name: &str) -> Result<(), FieldError> {
    if name.is_empty() {
        return Err(FieldError::new("name", "Product name is required"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(FieldError::new(
            "name",
            format!("must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(())
}

fn validate_price(field: &'static str, value: f64) -> Result<(), FieldError> {
    if !value.is_finite() || value < 0.0 {
        return Err(FieldError::new(field, "must be 0 or positive"));
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<(), FieldError> {
    if category.is_empty() {
        return Err(FieldError::new("category", "Category is required"));
    }
    Ok(())
}

fn validate_unit(unit: &str) -> Result<(), FieldError> {
    if unit.is_empty() {
        return Err(FieldError::new("unit", "Unit is required"));
    }
    if unit.chars().count() > MAX_UNIT_LEN {
        return Err(FieldError::new(
            "unit",
            format!("must be at most {MAX_UNIT_LEN} characters"),
        ));
    }
    Ok(())
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Formats a naira amount with thousands separators and at most three decimals.
pub fn format_amount(amount: f64) -> String {
    let millis = (amount.abs() * 1000.0).round() as u64;
    let digits = (millis / 1000).to_string();
    let fraction = millis % 1000;

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 5);
    if amount < 0.0 && millis != 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if fraction != 0 {
        out.push('.');
        out.push_str(format!("{fraction:03}").trim_end_matches('0'));
    }
    out
}

pub fn price_label(amount: f64, unit: &str) -> String {
    format!("₦{} / {}", format_amount(amount), unit)
}
