use super::*;
use clap::CommandFactory;
use shared::domain::Recommendation;
use storage::MemoryStore;

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn log_filter_defaults_to_info() {
    if std::env::var_os("RUST_LOG").is_none() {
        assert_eq!(log_filter().to_string(), "info");
    }
}

#[test]
fn seed_scores_are_bounded() {
    let err = Cli::try_parse_from([
        "tools",
        "seed",
        "--psychometric",
        "101",
        "--technical",
        "70",
        "--wiscar",
        "70",
    ])
    .expect_err("out of range");
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
}

#[tokio::test]
async fn seeded_record_is_reported() {
    let store = MemoryStore::new();
    assert!(report(&store).await.expect("report").is_none());

    let record = seed(&store, &FixedScoring::new(90, 62, 80)).await.expect("seed");
    assert_eq!(record.scores.overall, 77);
    assert_eq!(record.recommendation, Recommendation::Recommended);

    let text = report(&store).await.expect("report").expect("stored");
    assert!(text.contains("Recommendation: Recommended"));
    assert!(text.contains("Digital Forensics Investigator (Developing Fit)"));

    assert!(clear_result(&store).await.expect("clear"));
    assert!(report(&store).await.expect("report").is_none());
}
