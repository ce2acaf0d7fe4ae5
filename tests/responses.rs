use intake::core::error::IntakeError;
use intake::core::store::Store;
use intake::plugins::responses::{self, ResponseDraft};
use tempfile::tempdir;

fn draft_with(name: Option<&str>, email: Option<&str>) -> ResponseDraft {
    ResponseDraft {
        name: name.map(|s| s.to_string()),
        email: email.map(|s| s.to_string()),
        ..Default::default()
    }
}

fn full_draft() -> ResponseDraft {
    let mut draft = draft_with(Some("Alice"), Some("alice@example.com"));
    for (i, slot) in draft.answers.iter_mut().enumerate() {
        *slot = Some(format!("answer {}", i + 1));
    }
    draft
}

#[test]
fn test_insert_returns_strictly_increasing_ids() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path()).unwrap();

    let first = responses::insert(&store, &draft_with(Some("a"), None)).unwrap();
    let second = responses::insert(&store, &draft_with(Some("b"), None)).unwrap();
    let third = responses::insert(&store, &draft_with(Some("c"), None)).unwrap();

    assert!(first < second);
    assert!(second < third);
}

#[test]
fn test_insert_get_roundtrip() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path()).unwrap();

    let draft = full_draft();
    let id = responses::insert(&store, &draft).unwrap();
    let row = responses::get_by_id(&store, id).unwrap();

    assert_eq!(row.id, id);
    assert!(!row.created_at.is_empty());
    assert_eq!(row.name, draft.name);
    assert_eq!(row.email, draft.email);
    assert_eq!(row.answers, draft.answers);
}

#[test]
fn test_sparse_answers_keep_their_slots() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path()).unwrap();

    let mut draft = draft_with(None, None);
    draft.answers[6] = Some("seven".to_string());
    draft.answers[15] = Some("sixteen".to_string());

    let id = responses::insert(&store, &draft).unwrap();
    let row = responses::get_by_id(&store, id).unwrap();

    for (i, answer) in row.answers.iter().enumerate() {
        match i {
            6 => assert_eq!(answer.as_deref(), Some("seven")),
            15 => assert_eq!(answer.as_deref(), Some("sixteen")),
            _ => assert_eq!(*answer, None),
        }
    }
}

#[test]
fn test_null_name_and_email_stay_null() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path()).unwrap();

    let id = responses::insert(&store, &draft_with(None, None)).unwrap();
    let row = responses::get_by_id(&store, id).unwrap();

    assert_eq!(row.name, None);
    assert_eq!(row.email, None);
}

#[test]
fn test_list_all_empty_store_is_empty() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path()).unwrap();

    let rows = responses::list_all(&store).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_list_all_newest_first() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path()).unwrap();

    let a = responses::insert(&store, &draft_with(Some("a"), None)).unwrap();
    let b = responses::insert(&store, &draft_with(Some("b"), None)).unwrap();
    let c = responses::insert(&store, &draft_with(Some("c"), None)).unwrap();

    let rows = responses::list_all(&store).unwrap();
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![c, b, a]);
}

#[test]
fn test_get_by_id_missing_is_not_found() {
    let tmp = tempdir().unwrap();
    let store = Store::open(tmp.path()).unwrap();

    let err = responses::get_by_id(&store, 9999).unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, IntakeError::NotFound(_)));
}

#[test]
fn test_store_open_is_idempotent() {
    let tmp = tempdir().unwrap();

    let store = Store::open(tmp.path()).unwrap();
    let id = responses::insert(&store, &draft_with(Some("kept"), None)).unwrap();
    drop(store);

    let reopened = Store::open(tmp.path()).unwrap();
    let rows = responses::list_all(&reopened).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, id);
    assert_eq!(rows[0].name.as_deref(), Some("kept"));
}
