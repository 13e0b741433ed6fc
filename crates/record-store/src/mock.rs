//! # Mock Store & Testing Guide
//!
//! `MockStore<T>` hands out a real [`StoreClient<T>`] whose requests are answered from a queue of
//! expectations instead of a table. Use it to test code that sits *around* a store (typed
//! clients, the catalog controller) without spawning a [`StoreActor`](crate::StoreActor).
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockStore | Real Actor |
//! |---------|-----------|------------|
//! | **State** | None, canned replies | Real table |
//! | **Error Injection** | Easy (`return_err`) | Only validation errors |
//! | **Use Case** | Client and controller logic | The record impls, full system |
//!
//! ## Fluent expectations
//!
//! ```rust
//! use chrono::{DateTime, Utc};
//! use record_store::mock::MockStore;
//! use record_store::{Record, StoreError};
//! use std::cmp::Ordering;
//!
//! #[derive(Clone, Debug)] struct Tag { id: u32 }
//! #[derive(Debug, thiserror::Error)] #[error("tag")] struct TagError;
//! impl Record for Tag {
//!     type Id = u32; type Create = (); type Update = (); type Error = TagError;
//!     fn id(&self) -> &u32 { &self.id }
//!     fn from_create(id: u32, _: (), _: DateTime<Utc>) -> Result<Self, TagError> { Ok(Self { id }) }
//!     fn on_update(&mut self, _: (), _: DateTime<Utc>) -> Result<(), TagError> { Ok(()) }
//!     fn listing_order(a: &Self, b: &Self) -> Ordering { a.id.cmp(&b.id) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::<Tag>::new();
//!     mock.expect_list().return_ok(vec![Tag { id: 1 }]);
//!     mock.expect_delete(1).return_err(StoreError::Backend("offline".into()));
//!
//!     let client = mock.client();
//!     assert_eq!(client.list().await.unwrap().len(), 1);
//!     assert!(client.delete(1).await.is_err());
//!     mock.verify();
//! }
//! ```
//!
//! ## Raw channel helpers
//!
//! [`create_mock_store`] returns a client plus the receiving end of its channel. The
//! `expect_*` helpers pop the next request and give the test the reply sender, which lets a
//! test hold a request open (e.g. to observe an in-flight guard) before answering it.

use crate::client::StoreClient;
use crate::entity::Record;
use crate::error::StoreError;
use crate::message::{Response, StoreRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: Record> {
    Create(Result<T, StoreError>),
    Get(T::Id, Result<Option<T>, StoreError>),
    List(Result<Vec<T>, StoreError>),
    Update(T::Id, Result<T, StoreError>),
    Delete(T::Id, Result<(), StoreError>),
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock store answering requests in the order its expectations were queued.
///
/// A request that does not match the next expectation (wrong kind or wrong id) panics the
/// background task, which the caller observes as [`StoreError::Dropped`].
pub struct MockStore<T: Record> {
    client: StoreClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Record> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MockStore<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (StoreRequest::Create { respond_to, .. }, Some(Expectation::Create(reply))) => {
                        let _ = respond_to.send(reply);
                    }
                    (StoreRequest::Get { id, respond_to }, Some(Expectation::Get(want, reply)))
                        if id == want =>
                    {
                        let _ = respond_to.send(reply);
                    }
                    (StoreRequest::List { respond_to }, Some(Expectation::List(reply))) => {
                        let _ = respond_to.send(reply);
                    }
                    (
                        StoreRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update(want, reply)),
                    ) if id == want => {
                        let _ = respond_to.send(reply);
                    }
                    (
                        StoreRequest::Delete { id, respond_to },
                        Some(Expectation::Delete(want, reply)),
                    ) if id == want => {
                        let _ = respond_to.send(reply);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Create)
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |reply| Expectation::Get(id, reply))
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::List)
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |reply| Expectation::Update(id, reply))
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |reply| Expectation::Delete(id, reply))
    }

    /// Panics if any queued expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn builder<R>(
        &mut self,
        make: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }
}

/// Completes an expectation with its canned reply.
pub struct ExpectationBuilder<T: Record, R> {
    make: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: Record, R> ExpectationBuilder<T, R> {
    /// Reply with a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Reply with an error.
    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, reply: Result<R, StoreError>) {
        let expectation = (self.make)(reply);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
pub fn create_mock_store<T: Record>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Next message, if it is a Create request.
pub async fn expect_create<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Create, Response<T>)> {
    match receiver.recv().await {
        Some(StoreRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a List request.
pub async fn expect_list<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(StoreRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Next message, if it is an Update request.
pub async fn expect_update<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, T::Update, Response<T>)> {
    match receiver.recv().await {
        Some(StoreRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Delete request.
pub async fn expect_delete<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, Response<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}
