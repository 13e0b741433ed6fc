//! [`Record`] implementation for the Category type.
//!
//! Categories are never edited in place, so the update payload is uninhabited.
//! `List` returns them by name.

use super::CategoryError;
use crate::model::{Category, CategoryCreate, CategoryId};
use chrono::{DateTime, Utc};
use record_store::Record;
use std::cmp::Ordering;
use std::convert::Infallible;

impl Record for Category {
    type Id = CategoryId;
    type Create = CategoryCreate;
    type Update = Infallible;
    type Error = CategoryError;

    fn id(&self) -> &CategoryId {
        &self.id
    }

    fn from_create(
        id: CategoryId,
        params: CategoryCreate,
        now: DateTime<Utc>,
    ) -> Result<Self, CategoryError> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        Ok(Self {
            id,
            name: name.to_string(),
            created_at: now,
        })
    }

    fn on_update(&mut self, update: Infallible, _now: DateTime<Utc>) -> Result<(), CategoryError> {
        match update {}
    }

    fn listing_order(a: &Self, b: &Self) -> Ordering {
        a.name.cmp(&b.name).then(a.id.cmp(&b.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use record_store::{FixedClock, StoreActor, StoreError};

    #[tokio::test]
    async fn test_categories_list_by_name() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
        let (actor, client) = StoreActor::<Category>::new(8);
        tokio::spawn(actor.run(FixedClock(now)));

        for name in ["Vitamins", "Analgesics", "Antibiotics"] {
            client
                .create(CategoryCreate::new(name).unwrap())
                .await
                .unwrap();
        }

        let listed = client.list().await.unwrap();
        let names: Vec<&str> = listed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Analgesics", "Antibiotics", "Vitamins"]);
        assert!(listed.iter().all(|c| c.created_at == now));
    }

    #[tokio::test]
    async fn test_blank_payload_is_rejected() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
        let (actor, client) = StoreActor::<Category>::new(8);
        tokio::spawn(actor.run(FixedClock(now)));

        let result = client
            .create(CategoryCreate {
                name: "  ".into(),
            })
            .await;
        let Err(StoreError::Rejected(inner)) = result else {
            panic!("expected a rejection");
        };
        assert_eq!(
            CategoryError::from_store(StoreError::Rejected(inner), None),
            CategoryError::EmptyName
        );
    }
}
