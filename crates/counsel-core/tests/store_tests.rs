//! Behavior of the file-backed document store: ordering, merge precedence,
//! deletion protection, and the optimistic revision check.

use std::sync::Arc;

use chrono::Utc;
use counsel_core::builtin;
use counsel_core::error::Error;
use counsel_core::store::{DocumentStore, FileStore, Revision, Store};
use counsel_core::types::{
    generate_document_id, Document, DocumentSummary, NegotiationPoints, RiskLevel, RiskReport,
};

fn doc(id: &str, title: &str) -> Document {
    Document {
        id: id.to_string(),
        title: title.to_string(),
        created_at: Utc::now(),
        risk_level: RiskLevel::Low,
        summary: DocumentSummary {
            facts: "facts".into(),
            obligations: "obligations".into(),
            rights: "rights".into(),
            deadlines: "deadlines".into(),
        },
        risks: RiskReport {
            what_if_scenarios: vec!["What if?".into()],
        },
        related_laws: vec!["Some Act".into()],
        negotiation_points: NegotiationPoints {
            points: vec!["a point".into()],
            improvements: vec!["an improvement".into()],
        },
        full_text: "full text".into(),
    }
}

fn store_in(dir: &tempfile::TempDir) -> Store {
    Store::new(Arc::new(FileStore::new(dir.path())))
}

#[tokio::test]
async fn missing_file_reads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    assert!(store.read().await.unwrap().is_empty());
}

#[tokio::test]
async fn append_then_read_yields_new_document_first() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.append(doc("a", "First")).await.unwrap();
    store.append(doc("b", "Second")).await.unwrap();

    let docs = store.read().await.unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].id, "b");
    assert_eq!(docs[1].id, "a");
}

#[tokio::test]
async fn append_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    store_in(&dir).append(doc("a", "Persisted")).await.unwrap();

    // A fresh store over the same directory sees the same collection.
    let docs = store_in(&dir).read().await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].title, "Persisted");
}

#[tokio::test]
async fn delete_removes_only_the_matching_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.append(doc("a", "Keep")).await.unwrap();
    store.append(doc("b", "Drop")).await.unwrap();

    store.delete("b").await.unwrap();

    let docs = store.read().await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, "a");
}

#[tokio::test]
async fn delete_unknown_id_is_not_found_and_leaves_store_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.append(doc("a", "Only")).await.unwrap();

    let err = store.delete("missing").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(store.read().await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_builtin_id_is_protected_and_leaves_store_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.append(doc("a", "Only")).await.unwrap();

    for id in builtin::BUILTIN_IDS {
        let err = store.delete(id).await.unwrap_err();
        assert!(matches!(err, Error::ProtectedRecord(_)));
    }
    assert_eq!(store.read().await.unwrap().len(), 1);
}

#[tokio::test]
async fn list_all_appends_builtins_after_stored() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.append(doc("a", "Mine")).await.unwrap();

    let all = store.list_all().await.unwrap();
    assert_eq!(all.len(), 1 + builtin::BUILTIN_IDS.len());
    assert_eq!(all[0].id, "a");
    assert_eq!(all[1].id, "1");
    assert_eq!(all[2].id, "2");
    assert_eq!(all[3].id, "3");
}

#[tokio::test]
async fn stored_document_shadows_builtin_with_same_id() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.append(doc("1", "My Own Lease")).await.unwrap();

    let all = store.list_all().await.unwrap();
    let with_id: Vec<_> = all.iter().filter(|d| d.id == "1").collect();
    assert_eq!(with_id.len(), 1, "id must appear exactly once");
    assert_eq!(with_id[0].title, "My Own Lease");
}

#[tokio::test]
async fn get_finds_builtin_documents() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let found = store.get("3").await.unwrap();
    assert_eq!(found.title, "Non-Disclosure Agreement (NDA)");

    let err = store.get("nope").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn stale_revision_write_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file_store = FileStore::new(dir.path());

    let snapshot = file_store.read().await.unwrap();
    file_store
        .write(vec![doc("a", "First writer")], snapshot.revision)
        .await
        .unwrap();

    // Second writer still holds the old revision.
    let err = file_store
        .write(vec![doc("b", "Second writer")], snapshot.revision)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict));

    let docs = file_store.read().await.unwrap().documents;
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, "a");
}

#[tokio::test]
async fn revision_advances_on_every_write() {
    let dir = tempfile::tempdir().unwrap();
    let file_store = FileStore::new(dir.path());

    let r1 = file_store.write(vec![], Revision(0)).await.unwrap();
    let r2 = file_store.write(vec![doc("a", "A")], r1).await.unwrap();
    assert_eq!(r1, Revision(1));
    assert_eq!(r2, Revision(2));
}

#[tokio::test]
async fn corrupt_store_file_is_a_store_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("documents.json"), b"not json").unwrap();

    let err = store_in(&dir).read().await.unwrap_err();
    assert!(matches!(err, Error::Store(_)));
}

#[tokio::test]
async fn generated_ids_never_collide_with_builtins() {
    assert!(!builtin::is_builtin(&generate_document_id()));
}
