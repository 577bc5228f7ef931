use shared::domain::{Recommendation, RESULTS_STORAGE_KEY};
use storage::{load_result, KeyValueStore, Storage};

#[tokio::test]
async fn browser_written_payload_survives_reopen() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("assessment.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let payload = serde_json::json!({
        "answers": {
            "interest_1": 4,
            "motivation_1": "Intellectual challenge and problem-solving"
        },
        "scores": { "psychometric": 95, "technical": 62, "wiscar": 81, "overall": 79 },
        "recommendation": "Recommended",
        "completedAt": "2026-10-15T08:00:00.000Z"
    })
    .to_string();

    let writer = Storage::new(&database_url).await.expect("db");
    writer
        .set(RESULTS_STORAGE_KEY, &payload)
        .await
        .expect("write payload");
    drop(writer);

    let reader = Storage::new(&database_url).await.expect("reopen");
    let record = load_result(&reader)
        .await
        .expect("load")
        .expect("record present");
    assert_eq!(record.scores.overall, 79);
    assert_eq!(record.scores.psychometric, 95);
    assert_eq!(record.recommendation, Recommendation::Recommended);
    assert_eq!(record.answers.len(), 2);
}

#[tokio::test]
async fn clones_share_the_same_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let clone = storage.clone();
    storage.set("shared", "yes").await.expect("set");
    assert_eq!(clone.get("shared").await.expect("get"), Some("yes".to_string()));
}
