//! Integration tests for `SqliteStore` against an in-memory database.

use canvass_core::{
  item::{Item, ItemUpdate, Label, Status},
  store::{ItemStore, ParticipantRegistry},
};
use tokio::task::JoinSet;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn classification(label: Label, language: &str, by: &str) -> ItemUpdate {
  ItemUpdate {
    label,
    status: Status::PendingReview,
    language: language.to_owned(),
    classified_by: Some(by.to_owned()),
  }
}

// ─── Items ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_item() {
  let s = store().await;

  let item = s.create(43, "I love this product").await.unwrap();
  assert_eq!(item.id, 43);
  assert_eq!(item.text, "I love this product");

  let fetched = s.get(43).await.unwrap().unwrap();
  assert_eq!(fetched.id, 43);
  assert_eq!(fetched.text, "I love this product");
}

#[tokio::test]
async fn fresh_item_is_unclassified_with_unknown_label() {
  let s = store().await;
  let item = s.create(1, "some text").await.unwrap();

  assert_eq!(item.label, Label::Unknown);
  assert_eq!(item.status, Status::Unclassified);
  assert_eq!(item.language, "unknown");
  assert!(item.classified_by.is_none());

  // The stored row matches the returned value.
  let fetched = s.get(1).await.unwrap().unwrap();
  assert_eq!(fetched.label, Label::Unknown);
  assert_eq!(fetched.status, Status::Unclassified);
}

#[tokio::test]
async fn create_duplicate_id_errors() {
  let s = store().await;
  s.create(7, "first").await.unwrap();

  let err = s.create(7, "second").await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(canvass_core::Error::DuplicateItem(7))
  ));

  // The original row is untouched.
  let item = s.get(7).await.unwrap().unwrap();
  assert_eq!(item.text, "first");
}

#[tokio::test]
async fn create_empty_text_errors() {
  let s = store().await;
  let err = s.create(1, "").await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(canvass_core::Error::EmptyText)
  ));
  assert!(s.get(1).await.unwrap().is_none());
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(99).await.unwrap().is_none());
}

#[tokio::test]
async fn find_unclassified_picks_lowest_id() {
  let s = store().await;
  s.create(20, "later").await.unwrap();
  s.create(3, "sooner").await.unwrap();
  s.create(11, "middle").await.unwrap();

  let item = s.find_unclassified().await.unwrap().unwrap();
  assert_eq!(item.id, 3);
}

#[tokio::test]
async fn find_unclassified_empty_store_returns_none() {
  let s = store().await;
  assert!(s.find_unclassified().await.unwrap().is_none());
}

#[tokio::test]
async fn find_pending_review_sees_only_transitioned_items() {
  let s = store().await;
  s.create(1, "a").await.unwrap();
  s.create(2, "b").await.unwrap();

  assert!(s.find_pending_review().await.unwrap().is_none());

  let applied = s
    .transition_if_status(
      2,
      Status::Unclassified,
      classification(Label::Negative, "english", "+15550001111"),
    )
    .await
    .unwrap();
  assert!(applied);

  let pending = s.find_pending_review().await.unwrap().unwrap();
  assert_eq!(pending.id, 2);

  // Item 1 is still the next assignment candidate.
  let unclassified = s.find_unclassified().await.unwrap().unwrap();
  assert_eq!(unclassified.id, 1);
}

#[tokio::test]
async fn list_all_is_ordered_by_id() {
  let s = store().await;
  s.create(5, "e").await.unwrap();
  s.create(1, "a").await.unwrap();
  s.create(3, "c").await.unwrap();

  let all = s.list_all().await.unwrap();
  let ids: Vec<i64> = all.iter().map(|item| item.id).collect();
  assert_eq!(ids, vec![1, 3, 5]);
}

// ─── Conditional transitions ─────────────────────────────────────────────────

#[tokio::test]
async fn transition_applies_when_status_matches() {
  let s = store().await;
  s.create(43, "I love this product").await.unwrap();

  let applied = s
    .transition_if_status(
      43,
      Status::Unclassified,
      classification(Label::Positive, "english", "+15551234567"),
    )
    .await
    .unwrap();
  assert!(applied);

  let item = s.get(43).await.unwrap().unwrap();
  assert_eq!(item.label, Label::Positive);
  assert_eq!(item.status, Status::PendingReview);
  assert_eq!(item.language, "english");
  assert_eq!(item.classified_by.as_deref(), Some("+15551234567"));
}

#[tokio::test]
async fn transition_refuses_when_status_differs() {
  let s = store().await;
  s.create(1, "text").await.unwrap();

  let first = s
    .transition_if_status(
      1,
      Status::Unclassified,
      classification(Label::Positive, "english", "+15550000001"),
    )
    .await
    .unwrap();
  assert!(first);

  // A second classification attempt must leave the item untouched.
  let second = s
    .transition_if_status(
      1,
      Status::Unclassified,
      classification(Label::Negative, "french", "+15550000002"),
    )
    .await
    .unwrap();
  assert!(!second);

  let item = s.get(1).await.unwrap().unwrap();
  assert_eq!(item.label, Label::Positive);
  assert_eq!(item.language, "english");
  assert_eq!(item.classified_by.as_deref(), Some("+15550000001"));
}

#[tokio::test]
async fn transition_on_missing_item_reports_false() {
  let s = store().await;
  let applied = s
    .transition_if_status(
      404,
      Status::Unclassified,
      classification(Label::Neutral, "english", "+15550001111"),
    )
    .await
    .unwrap();
  assert!(!applied);
}

#[tokio::test]
async fn review_transition_preserves_classified_by() {
  let s = store().await;
  s.create(1, "text").await.unwrap();
  s.transition_if_status(
    1,
    Status::Unclassified,
    classification(Label::Positive, "english", "+15550001111"),
  )
  .await
  .unwrap();

  // Finalization passes classified_by: None to keep the audit trail.
  let applied = s
    .transition_if_status(
      1,
      Status::PendingReview,
      ItemUpdate {
        label:         Label::Negative,
        status:        Status::Classified,
        language:      "english".to_owned(),
        classified_by: None,
      },
    )
    .await
    .unwrap();
  assert!(applied);

  let item = s.get(1).await.unwrap().unwrap();
  assert_eq!(item.label, Label::Negative);
  assert_eq!(item.status, Status::Classified);
  assert_eq!(item.classified_by.as_deref(), Some("+15550001111"));
}

#[tokio::test]
async fn status_never_moves_backward() {
  let s = store().await;
  s.create(1, "text").await.unwrap();
  s.transition_if_status(
    1,
    Status::Unclassified,
    classification(Label::Positive, "english", "+15550001111"),
  )
  .await
  .unwrap();
  s.transition_if_status(
    1,
    Status::PendingReview,
    ItemUpdate {
      label:         Label::Positive,
      status:        Status::Classified,
      language:      "english".to_owned(),
      classified_by: None,
    },
  )
  .await
  .unwrap();

  // Neither earlier expected-status gate matches a finalized item.
  for expected in [Status::Unclassified, Status::PendingReview] {
    let applied = s
      .transition_if_status(
        1,
        expected,
        classification(Label::Neutral, "french", "+15559999999"),
      )
      .await
      .unwrap();
    assert!(!applied);
  }

  let item = s.get(1).await.unwrap().unwrap();
  assert_eq!(item.status, Status::Classified);
  assert_eq!(item.label, Label::Positive);
}

#[tokio::test]
async fn concurrent_transitions_apply_exactly_once() {
  let s = store().await;
  s.create(1, "contended item").await.unwrap();

  let mut tasks = JoinSet::new();
  for i in 0..8 {
    let s = s.clone();
    tasks.spawn(async move {
      let update = classification(Label::Positive, "english", &format!("+1555000{i:04}"));
      (i, s.transition_if_status(1, Status::Unclassified, update).await.unwrap())
    });
  }

  let mut winners = Vec::new();
  while let Some(result) = tasks.join_next().await {
    let (i, applied) = result.unwrap();
    if applied {
      winners.push(i);
    }
  }
  assert_eq!(winners.len(), 1, "exactly one transition must win");

  let item: Item = s.get(1).await.unwrap().unwrap();
  assert_eq!(item.status, Status::PendingReview);
  assert_eq!(
    item.classified_by.as_deref(),
    Some(format!("+1555000{:04}", winners[0]).as_str())
  );
}

// ─── Participants ────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_or_create_starts_active() {
  let s = store().await;
  let p = s.get_or_create("+15551234567").await.unwrap();
  assert_eq!(p.identity, "+15551234567");
  assert!(p.is_active);
}

#[tokio::test]
async fn get_or_create_is_idempotent() {
  let s = store().await;
  let first = s.get_or_create("+15551234567").await.unwrap();
  s.set_active("+15551234567", false).await.unwrap();

  // A repeat contact neither duplicates the record nor resurrects the flag.
  let second = s.get_or_create("+15551234567").await.unwrap();
  assert_eq!(second.created_at, first.created_at);
  assert!(!second.is_active);
}

#[tokio::test]
async fn set_active_creates_missing_record() {
  let s = store().await;
  assert!(!s.is_active("+15550009999").await.unwrap());

  s.set_active("+15550009999", false).await.unwrap();
  let p = s.get_or_create("+15550009999").await.unwrap();
  assert!(!p.is_active);
}

#[tokio::test]
async fn set_active_toggles_and_is_idempotent() {
  let s = store().await;
  s.get_or_create("+15551234567").await.unwrap();

  s.set_active("+15551234567", false).await.unwrap();
  assert!(!s.is_active("+15551234567").await.unwrap());

  s.set_active("+15551234567", true).await.unwrap();
  s.set_active("+15551234567", true).await.unwrap();
  assert!(s.is_active("+15551234567").await.unwrap());
}

#[tokio::test]
async fn is_active_unknown_participant_is_false() {
  let s = store().await;
  assert!(!s.is_active("+10000000000").await.unwrap());
}
