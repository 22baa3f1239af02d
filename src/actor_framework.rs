use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::error::FrameworkError;
use crate::filter::{Filter, FindOptions};

// =============================================================================
// 1. THE ABSTRACTION (Documents with Hooks, Fields, and a Unique Index)
// =============================================================================

/// Trait that any document must implement to be stored by [`CollectionActor`]
pub trait Document: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    /// Closed set of queryable fields.
    type Field: Copy + Eq + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    /// Get the ID of the document
    fn id(&self) -> &Self::Id;

    /// Construct the full document from the store-assigned ID and the payload
    fn from_create(
        id: Self::Id,
        payload: Self::CreatePayload,
        now: DateTime<Utc>,
    ) -> Result<Self, String>;

    /// Merge a partial update into the document. Unset patch fields are left alone.
    fn on_update(&mut self, patch: Self::Patch, now: DateTime<Utc>) -> Result<(), String>;

    /// Project a field as text for predicate evaluation.
    fn field(&self, field: Self::Field) -> Option<&str>;

    /// Fields whose values must be distinct across the collection.
    fn unique_fields() -> &'static [Self::Field] {
        &[]
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum StoreRequest<T: Document> {
    Insert {
        payload: T::CreatePayload,
        respond_to: Response<T>,
    },
    FindOne {
        filter: Filter<T::Field>,
        respond_to: Response<Option<T>>,
    },
    Find {
        filter: Filter<T::Field>,
        options: FindOptions,
        respond_to: Response<Vec<T>>,
    },
    FindById {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    UpdateById {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<Option<T>>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct CollectionActor<T: Document> {
    name: &'static str,
    receiver: mpsc::Receiver<StoreRequest<T>>,
    documents: HashMap<T::Id, T>,
    /// Insertion order, which is the natural order of every query.
    order: Vec<T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Document> CollectionActor<T> {
    pub fn new(
        name: &'static str,
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            name,
            receiver,
            documents: HashMap::new(),
            order: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = CollectionClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "collection", fields(collection = self.name), skip(self))]
    pub async fn run(mut self) {
        info!("Collection actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Insert { payload, respond_to } => {
                    let _ = respond_to.send(self.handle_insert(payload));
                }
                StoreRequest::FindOne { filter, respond_to } => {
                    debug!(?filter, "find_one");
                    let found = self.iter().find(|doc| filter.matches(*doc)).cloned();
                    let _ = respond_to.send(Ok(found));
                }
                StoreRequest::Find { filter, options, respond_to } => {
                    debug!(?filter, ?options, "find");
                    let found =
                        options.apply(self.iter().filter(|doc| filter.matches(*doc)).cloned());
                    let _ = respond_to.send(Ok(found));
                }
                StoreRequest::FindById { id, respond_to } => {
                    debug!(%id, "find_by_id");
                    let _ = respond_to.send(Ok(self.documents.get(&id).cloned()));
                }
                StoreRequest::UpdateById { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
            }
        }
        info!("Collection actor stopped");
    }

    fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|id| self.documents.get(id))
    }

    fn handle_insert(&mut self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        let id = (self.next_id_fn)();
        let doc =
            T::from_create(id.clone(), payload, Utc::now()).map_err(FrameworkError::Rejected)?;
        self.check_unique(&doc)?;
        self.documents.insert(id.clone(), doc.clone());
        self.order.push(id.clone());
        debug!(%id, "Document inserted");
        Ok(doc)
    }

    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<Option<T>, FrameworkError> {
        let Some(current) = self.documents.get(&id) else {
            debug!(%id, "No document to update");
            return Ok(None);
        };
        // Apply to a copy so a rejected patch leaves the stored document untouched.
        let mut updated = current.clone();
        updated.on_update(patch, Utc::now()).map_err(FrameworkError::Rejected)?;
        self.check_unique(&updated)?;
        self.documents.insert(id.clone(), updated.clone());
        debug!(%id, "Document updated");
        Ok(Some(updated))
    }

    fn check_unique(&self, candidate: &T) -> Result<(), FrameworkError> {
        for &field in T::unique_fields() {
            let Some(value) = candidate.field(field) else { continue };
            let taken = self
                .iter()
                .any(|doc| doc.id() != candidate.id() && doc.field(field) == Some(value));
            if taken {
                warn!(%field, "Unique index violation");
                return Err(FrameworkError::DuplicateKey { field: field.to_string() });
            }
        }
        Ok(())
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct CollectionClient<T: Document> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: Document> CollectionClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    async fn call<R>(
        &self,
        request: impl FnOnce(Response<R>) -> StoreRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(request(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn insert(&self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        self.call(|respond_to| StoreRequest::Insert { payload, respond_to }).await
    }

    pub async fn find_one(&self, filter: Filter<T::Field>) -> Result<Option<T>, FrameworkError> {
        self.call(|respond_to| StoreRequest::FindOne { filter, respond_to }).await
    }

    pub async fn find(
        &self,
        filter: Filter<T::Field>,
        options: FindOptions,
    ) -> Result<Vec<T>, FrameworkError> {
        self.call(|respond_to| StoreRequest::Find { filter, options, respond_to }).await
    }

    pub async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.call(|respond_to| StoreRequest::FindById { id, respond_to }).await
    }

    pub async fn update_by_id(
        &self,
        id: T::Id,
        patch: T::Patch,
    ) -> Result<Option<T>, FrameworkError> {
        self.call(|respond_to| StoreRequest::UpdateById { id, patch, respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // --- Document Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: String,
        title: String,
        slug: String,
        edited_at: DateTime<Utc>,
    }

    #[derive(Debug)]
    struct NoteCreate {
        title: String,
        slug: String,
    }

    #[derive(Debug)]
    struct NotePatch {
        title: Option<String>,
        slug: Option<String>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum NoteField {
        Title,
        Slug,
    }

    impl fmt::Display for NoteField {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                NoteField::Title => f.write_str("title"),
                NoteField::Slug => f.write_str("slug"),
            }
        }
    }

    impl Document for Note {
        type Id = String;
        type Field = NoteField;
        type CreatePayload = NoteCreate;
        type Patch = NotePatch;

        fn id(&self) -> &String {
            &self.id
        }

        fn from_create(
            id: String,
            payload: NoteCreate,
            now: DateTime<Utc>,
        ) -> Result<Self, String> {
            if payload.slug.is_empty() {
                return Err("slug required".to_string());
            }
            Ok(Self { id, title: payload.title, slug: payload.slug, edited_at: now })
        }

        fn on_update(&mut self, patch: NotePatch, now: DateTime<Utc>) -> Result<(), String> {
            if let Some(title) = patch.title {
                self.title = title;
            }
            if let Some(slug) = patch.slug {
                self.slug = slug;
            }
            self.edited_at = now;
            Ok(())
        }

        fn field(&self, field: NoteField) -> Option<&str> {
            match field {
                NoteField::Title => Some(self.title.as_str()),
                NoteField::Slug => Some(self.slug.as_str()),
            }
        }

        fn unique_fields() -> &'static [NoteField] {
            &[NoteField::Slug]
        }
    }

    fn spawn_notes() -> CollectionClient<Note> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("note_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = CollectionActor::new("notes", 10, next_id);
        tokio::spawn(actor.run());
        client
    }

    fn note(title: &str, slug: &str) -> NoteCreate {
        NoteCreate { title: title.into(), slug: slug.into() }
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_insert_assigns_id_and_find_keeps_insertion_order() {
        let client = spawn_notes();
        let first = client.insert(note("Rust", "rust")).await.unwrap();
        client.insert(note("Go", "go")).await.unwrap();
        client.insert(note("Rusty", "rusty")).await.unwrap();
        assert_eq!(first.id, "note_1");

        let all = client.find(Filter::All, FindOptions::default()).await.unwrap();
        let slugs: Vec<_> = all.iter().map(|n| n.slug.as_str()).collect();
        assert_eq!(slugs, ["rust", "go", "rusty"]);

        let found = client
            .find_one(Filter::Eq(NoteField::Title, "Go".into()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.slug, "go");
    }

    #[tokio::test]
    async fn test_unique_index_rejects_duplicates_on_insert_and_update() {
        let client = spawn_notes();
        client.insert(note("One", "one")).await.unwrap();
        let two = client.insert(note("Two", "two")).await.unwrap();

        let err = client.insert(note("Again", "one")).await.unwrap_err();
        assert_eq!(err, FrameworkError::DuplicateKey { field: "slug".into() });

        let patch = NotePatch { title: None, slug: Some("one".into()) };
        let err = client.update_by_id(two.id.clone(), patch).await.unwrap_err();
        assert_eq!(err, FrameworkError::DuplicateKey { field: "slug".into() });

        // Rewriting a document's own value is not a conflict.
        let patch = NotePatch { title: Some("Deux".into()), slug: Some("two".into()) };
        let updated = client.update_by_id(two.id.clone(), patch).await.unwrap().unwrap();
        assert_eq!(updated.title, "Deux");
    }

    #[tokio::test]
    async fn test_update_missing_document_is_absent() {
        let client = spawn_notes();
        let patch = NotePatch { title: Some("x".into()), slug: None };
        assert_eq!(client.update_by_id("note_99".into(), patch).await, Ok(None));
    }

    #[tokio::test]
    async fn test_rejected_payload_surfaces_hook_error() {
        let client = spawn_notes();
        let err = client.insert(note("No slug", "")).await.unwrap_err();
        assert_eq!(err, FrameworkError::Rejected("slug required".into()));
    }

    #[tokio::test]
    async fn test_closed_actor_reports_channel_failure() {
        let (actor, client) = CollectionActor::<Note>::new("notes", 1, || "n".to_string());
        drop(actor);
        let err = client.find_by_id("n".into()).await.unwrap_err();
        assert_eq!(err, FrameworkError::ActorClosed);
    }
}
