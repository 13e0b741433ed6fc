//! Column sorting with the click-to-toggle policy of the table headers.

use crate::model::Product;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Category,
    WholesalePrice,
    RetailPrice,
    Quantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown sort field: {0}")]
pub struct UnknownSortField(pub String);

impl FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "category" => Ok(SortField::Category),
            "wholesale_price" => Ok(SortField::WholesalePrice),
            "retail_price" => Ok(SortField::RetailPrice),
            "quantity" => Ok(SortField::Quantity),
            other => Err(UnknownSortField(other.to_string())),
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SortField::Name => "name",
            SortField::Category => "category",
            SortField::WholesalePrice => "wholesale_price",
            SortField::RetailPrice => "retail_price",
            SortField::Quantity => "quantity",
        })
    }
}

/// Active sort column and direction. Starts on name, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::Name,
            direction: SortDirection::Asc,
        }
    }
}

impl SortState {
    /// Same field flips the direction; a new field starts ascending.
    pub fn set_sort(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.toggled();
        } else {
            self.field = field;
            self.direction = SortDirection::Asc;
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Ascending comparison of two products on `field`.
pub fn compare_by(field: SortField, a: &Product, b: &Product) -> Ordering {
    match field {
        SortField::Name => compare_text(&a.name, &b.name),
        SortField::Category => compare_text(&a.category, &b.category),
        SortField::WholesalePrice => a.wholesale_price.total_cmp(&b.wholesale_price),
        SortField::RetailPrice => a.retail_price.total_cmp(&b.retail_price),
        SortField::Quantity => a.quantity.cmp(&b.quantity),
    }
}

/// A new ordering of `products`; the input is left as it was. Ties keep input order.
pub fn sorted_view<'a, I>(
    products: I,
    field: SortField,
    direction: SortDirection,
) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut sorted: Vec<&Product> = products.into_iter().collect();
    sorted.sort_by(|a, b| {
        let order = compare_by(field, a, b);
        match direction {
            SortDirection::Asc => order,
            SortDirection::Desc => order.reverse(),
        }
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProductFormData, ProductId};
    use chrono::{TimeZone, Utc};

    fn product(id: u32, name: &str, category: &str, retail: f64, quantity: u32) -> Product {
        let now = Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap();
        Product::from_form(
            ProductId(id),
            ProductFormData::new(name, category)
                .with_prices(retail / 2.0, retail)
                .with_quantity(quantity),
            now,
        )
    }

    fn names(view: &[&Product]) -> Vec<String> {
        view.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_same_field_toggles_with_period_two() {
        let mut sort = SortState::default();
        sort.set_sort(SortField::Quantity);
        assert_eq!(sort.direction, SortDirection::Asc);
        sort.set_sort(SortField::Quantity);
        assert_eq!(sort.direction, SortDirection::Desc);
        sort.set_sort(SortField::Quantity);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_new_field_resets_to_ascending() {
        let mut sort = SortState::default();
        sort.set_sort(SortField::Name);
        assert_eq!(sort.direction, SortDirection::Desc);

        sort.set_sort(SortField::RetailPrice);
        assert_eq!(
            sort,
            SortState {
                field: SortField::RetailPrice,
                direction: SortDirection::Asc
            }
        );
    }

    #[test]
    fn test_strings_ignore_case() {
        let products = vec![
            product(1, "zinc", "Minerals", 100.0, 1),
            product(2, "Amoxil", "antibiotics", 1200.0, 2),
            product(3, "bisacodyl", "Laxatives", 300.0, 3),
        ];
        let view = sorted_view(&products, SortField::Name, SortDirection::Asc);
        assert_eq!(names(&view), vec!["Amoxil", "bisacodyl", "zinc"]);

        let view = sorted_view(&products, SortField::Category, SortDirection::Desc);
        assert_eq!(names(&view), vec!["zinc", "bisacodyl", "Amoxil"]);
    }

    #[test]
    fn test_numbers_compare_by_value() {
        let products = vec![
            product(1, "Panadol", "Analgesics", 500.0, 40),
            product(2, "Amoxil", "Antibiotics", 1200.0, 9),
            product(3, "Zinc", "Minerals", 80.0, 100),
        ];
        let view = sorted_view(&products, SortField::RetailPrice, SortDirection::Desc);
        assert_eq!(names(&view), vec!["Amoxil", "Panadol", "Zinc"]);

        let view = sorted_view(&products, SortField::Quantity, SortDirection::Asc);
        assert_eq!(names(&view), vec!["Amoxil", "Panadol", "Zinc"]);

        let view = sorted_view(&products, SortField::WholesalePrice, SortDirection::Asc);
        assert_eq!(names(&view), vec!["Zinc", "Panadol", "Amoxil"]);
    }

    #[test]
    fn test_input_is_not_reordered() {
        let products = vec![
            product(1, "Panadol", "Analgesics", 500.0, 1),
            product(2, "Amoxil", "Antibiotics", 1200.0, 1),
        ];
        let before = products.clone();
        let _ = sorted_view(&products, SortField::Name, SortDirection::Asc);
        assert_eq!(products, before);
    }

    #[test]
    fn test_field_names_parse() {
        assert_eq!("retail_price".parse::<SortField>().unwrap(), SortField::RetailPrice);
        assert_eq!(SortField::WholesalePrice.to_string(), "wholesale_price");
        assert!("price".parse::<SortField>().is_err());
    }
}
