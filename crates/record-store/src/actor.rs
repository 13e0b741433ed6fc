//! # Store Actor
//!
//! The server half of a record store. A `StoreActor` owns the in-memory table for one record
//! type and processes [`StoreRequest`]s one at a time, so the table needs no lock.

use crate::client::StoreClient;
use crate::clock::Clock;
use crate::entity::Record;
use crate::error::StoreError;
use crate::message::StoreRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that holds one table of records.
///
/// # Usage Pattern
///
/// 1. **Create**: `StoreActor::new()` returns the actor and a cloneable client.
/// 2. **Wire**: pass the clock into `actor.run(clock)`.
/// 3. **Run**: spawn the run loop on a Tokio task.
///
/// ```rust
/// use chrono::{DateTime, Utc};
/// use record_store::{Record, StoreActor, SystemClock};
/// use std::cmp::Ordering;
///
/// #[derive(Clone, Debug)]
/// struct Note { id: u32, text: String }
/// #[derive(Debug, thiserror::Error)] #[error("empty note")] struct NoteError;
///
/// impl Record for Note {
///     type Id = u32;
///     type Create = String;
///     type Update = String;
///     type Error = NoteError;
///
///     fn id(&self) -> &u32 { &self.id }
///     fn from_create(id: u32, text: String, _: DateTime<Utc>) -> Result<Self, NoteError> {
///         if text.is_empty() { return Err(NoteError); }
///         Ok(Self { id, text })
///     }
///     fn on_update(&mut self, text: String, _: DateTime<Utc>) -> Result<(), NoteError> {
///         self.text = text;
///         Ok(())
///     }
///     fn listing_order(a: &Self, b: &Self) -> Ordering { a.id.cmp(&b.id) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StoreActor::<Note>::new(10);
///     tokio::spawn(actor.run(SystemClock));
///
///     let note = client.create("milk".to_string()).await.unwrap();
///     assert_eq!(client.list().await.unwrap().len(), 1);
///     client.delete(note.id).await.unwrap();
/// }
/// ```
///
/// # Operations
///
/// * **Create**: takes the next counter value as id, samples the clock, calls
///   [`Record::from_create`], inserts and replies with a copy of the record.
/// * **Get**: clone of the record or `None`.
/// * **List**: clones of every record sorted with [`Record::listing_order`].
/// * **Update**: samples the clock and calls [`Record::on_update`] on the stored record.
/// * **Delete**: calls [`Record::on_delete`] and removes the record.
pub struct StoreActor<T: Record> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    table: HashMap<T::Id, T>,
    next_id: u32,
}

impl<T: Record> StoreActor<T> {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            table: HashMap::new(),
            next_id: 1,
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs the request loop until every client has been dropped.
    pub async fn run(mut self, clock: impl Clock) {
        // "Product" instead of "price_lookup::model::product::Product"
        let record_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(record_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Create { params, respond_to } => {
                    debug!(record_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    match T::from_create(id.clone(), params, clock.now()) {
                        Ok(record) => {
                            self.next_id += 1;
                            self.table.insert(id.clone(), record.clone());
                            info!(record_type, %id, size = self.table.len(), "Created");
                            let _ = respond_to.send(Ok(record));
                        }
                        Err(e) => {
                            warn!(record_type, error = %e, "Create rejected");
                            let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                        }
                    }
                }
                StoreRequest::Get { id, respond_to } => {
                    let record = self.table.get(&id).cloned();
                    debug!(record_type, %id, found = record.is_some(), "Get");
                    let _ = respond_to.send(Ok(record));
                }
                StoreRequest::List { respond_to } => {
                    let mut records: Vec<T> = self.table.values().cloned().collect();
                    records.sort_by(T::listing_order);
                    debug!(record_type, count = records.len(), "List");
                    let _ = respond_to.send(Ok(records));
                }
                StoreRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(record_type, %id, ?update, "Update");
                    let Some(record) = self.table.get_mut(&id) else {
                        warn!(record_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    match record.on_update(update, clock.now()) {
                        Ok(()) => {
                            info!(record_type, %id, "Updated");
                            let _ = respond_to.send(Ok(record.clone()));
                        }
                        Err(e) => {
                            warn!(record_type, %id, error = %e, "Update rejected");
                            let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                        }
                    }
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(record_type, %id, "Delete");
                    let Some(record) = self.table.get(&id) else {
                        warn!(record_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = record.on_delete() {
                        warn!(record_type, %id, error = %e, "Delete rejected");
                        let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                        continue;
                    }
                    self.table.remove(&id);
                    info!(record_type, %id, size = self.table.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        info!(record_type, size = self.table.len(), "Shutdown");
    }
}
