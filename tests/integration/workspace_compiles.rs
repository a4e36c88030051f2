//! Smoke test that the three layers link together through their public roots.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use arbor_application::{CollectionStore, TreeRepository};
use arbor_domain::{HttpMethod, Request};
use arbor_infrastructure::{InMemoryCollectionStore, import_from_curl};

#[test]
fn domain_crate_links() {
    let request = Request::new("Ping");
    assert_eq!(request.method, HttpMethod::Get);
}

#[test]
fn application_crate_links() {
    let mut repository = TreeRepository::new();
    let id = repository.create_collection();
    assert_eq!(repository.collections()[0].id, id);
}

#[tokio::test]
async fn infrastructure_crate_links() {
    let store = Arc::new(InMemoryCollectionStore::new());
    let mut repository = TreeRepository::new();
    let writer = repository.writer(Arc::clone(&store)).spawn();

    let collection_id = repository.create_collection();
    let request = import_from_curl("curl https://a.test/ping").unwrap();
    repository.attach_request(request, &[collection_id]).unwrap();
    drop(repository);

    writer.await.unwrap();
    assert_eq!(store.load().await.unwrap()[0].request_count(), 1);
}
