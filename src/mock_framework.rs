//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_find_one`] or [`expect_update_by_id`] to play the store.

use tokio::sync::mpsc;

use crate::actor_framework::{CollectionClient, Document, Response, StoreRequest};
use crate::filter::{Filter, FindOptions};

/// Creates a mock client and a receiver for asserting requests.
///
/// The test owns the receiving end, so it decides what the "store" answers and
/// can check with `try_recv` that a request never arrived.
pub fn create_mock_client<T: Document>(
    buffer_size: usize,
) -> (CollectionClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new(sender), receiver)
}

/// Helper to verify that the next message is an Insert request
pub async fn expect_insert<T: Document>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::CreatePayload, Response<T>)> {
    match receiver.recv().await {
        Some(StoreRequest::Insert { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a FindOne request
pub async fn expect_find_one<T: Document>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(Filter<T::Field>, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::FindOne { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Find request
pub async fn expect_find<T: Document>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(Filter<T::Field>, FindOptions, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Find { filter, options, respond_to }) => {
            Some((filter, options, respond_to))
        }
        _ => None,
    }
}

/// Helper to verify that the next message is a FindById request
pub async fn expect_find_by_id<T: Document>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::FindById { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an UpdateById request
pub async fn expect_update_by_id<T: Document>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, T::Patch, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::UpdateById { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::UserClient;
    use crate::domain::{User, UserField};

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);

        let search = tokio::spawn(async move { client.find_users_by_name("ali").await });

        let (filter, options, responder) =
            expect_find(&mut receiver).await.expect("Expected Find request");
        assert!(matches!(filter, Filter::Matches(UserField::Name, ref p) if p.as_str() == "ali"));
        assert_eq!(options, FindOptions::default());
        responder.send(Ok(Vec::new())).unwrap();

        assert_eq!(search.await.unwrap(), Ok(Vec::new()));
    }
}
