//! # Store Messages
//!
//! Request types carried from a [`StoreClient`](crate::StoreClient) to its
//! [`StoreActor`](crate::StoreActor).

use crate::entity::Record;
use crate::error::StoreError;
use tokio::sync::oneshot;

/// One-shot reply channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Message sent to a store actor.
///
/// The variants are the CRUD set of a hosted table plus `List`, which is how
/// the catalog pages read whole collections:
///
/// - **Create**: builds a record from [`Record::Create`] and replies with the stored record.
/// - **Get**: looks one record up by id.
/// - **List**: replies with every record, ordered by [`Record::listing_order`].
/// - **Update**: applies [`Record::Update`] and replies with the new state.
/// - **Delete**: removes a record.
#[derive(Debug)]
pub enum StoreRequest<T: Record> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}
