use super::*;
use chrono::TimeZone;

#[test]
fn builtin_catalog_passes_validation() {
    let builtin = QuestionCatalog::builtin();
    let questions: Vec<Question> = builtin.iter().cloned().collect();
    let validated = QuestionCatalog::new(questions).expect("builtin catalog is valid");
    assert_eq!(validated, builtin);
    assert_eq!(builtin.len(), 9);

    for category in Category::ALL {
        let count = builtin.iter().filter(|q| q.category == category).count();
        assert_eq!(count, 3, "three questions per category");
    }
}

#[test]
fn catalog_rejects_duplicates_and_bad_scales() {
    let duplicate = QuestionCatalog::new(vec![
        Question::choice("a", Category::Technical, "?", &["x"]),
        Question::choice("a", Category::Technical, "?", &["y"]),
    ]);
    assert_eq!(
        duplicate.expect_err("duplicate"),
        CatalogError::DuplicateId(QuestionId::from("a"))
    );

    let bad_scale = QuestionCatalog::new(vec![Question::scale(
        "s",
        Category::Wiscar,
        "?",
        5,
        1,
        1,
    )]);
    assert!(matches!(bad_scale, Err(CatalogError::InvalidScale { .. })));

    assert_eq!(QuestionCatalog::new(Vec::new()), Err(CatalogError::Empty));
    assert_eq!(
        QuestionCatalog::new(vec![Question::choice("c", Category::Technical, "?", &[])]),
        Err(CatalogError::NoOptions(QuestionId::from("c")))
    );
}

#[test]
fn answers_must_match_question_kind() {
    let scale = Question::scale("s", Category::Wiscar, "?", 1, 5, 2);
    assert!(scale.check_answer(&AnswerValue::Scale(3)).is_ok());
    assert!(matches!(
        scale.check_answer(&AnswerValue::Scale(6)),
        Err(AnswerError::OutOfRange { .. })
    ));
    assert!(matches!(
        scale.check_answer(&AnswerValue::Scale(2)),
        Err(AnswerError::OffStep { .. })
    ));
    assert!(matches!(
        scale.check_answer(&AnswerValue::Choice("3".into())),
        Err(AnswerError::KindMismatch { .. })
    ));

    let scenario = Question::scenario("c", Category::Technical, "?", &["left", "right"]);
    assert!(scenario.check_answer(&AnswerValue::Choice("left".into())).is_ok());
    assert!(matches!(
        scenario.check_answer(&AnswerValue::Choice("up".into())),
        Err(AnswerError::UnknownOption { .. })
    ));
    assert!(matches!(
        scenario.check_answer(&AnswerValue::Scale(1)),
        Err(AnswerError::KindMismatch { .. })
    ));
}

#[test]
fn unvalidated_scales_reject_without_overflow() {
    let zero_step = Question::scale("z", Category::Wiscar, "?", 1, 5, 0);
    assert!(matches!(
        zero_step.check_answer(&AnswerValue::Scale(3)),
        Err(AnswerError::OffStep { step: 0, .. })
    ));

    let full_range = Question::scale("f", Category::Wiscar, "?", i64::MIN, i64::MAX, 1);
    assert!(full_range.check_answer(&AnswerValue::Scale(i64::MAX)).is_ok());
    assert!(full_range.check_answer(&AnswerValue::Scale(i64::MIN)).is_ok());

    let wide_step = Question::scale("w", Category::Wiscar, "?", i64::MIN, i64::MAX, i64::MAX);
    assert!(wide_step.check_answer(&AnswerValue::Scale(-1)).is_ok());
    assert!(matches!(
        wide_step.check_answer(&AnswerValue::Scale(0)),
        Err(AnswerError::OffStep { .. })
    ));
}

#[test]
fn scale_display_default_is_not_an_answer() {
    let scale = Question::scale("s", Category::Wiscar, "?", 1, 5, 1);
    assert_eq!(scale.display_default(), Some(AnswerValue::Scale(3)));

    let narrow = Question::scale("n", Category::Wiscar, "?", 4, 8, 1);
    assert_eq!(narrow.display_default(), Some(AnswerValue::Scale(4)));

    let choice = Question::choice("c", Category::Technical, "?", &["x"]);
    assert_eq!(choice.display_default(), None);
    assert_eq!(choice.guidance(), None);
}

#[test]
fn overall_is_floor_of_category_mean() {
    let scores = Scores::from_categories(CategoryScores {
        psychometric: 70,
        technical: 60,
        wiscar: 75,
    });
    assert_eq!(scores.overall, 68);

    let scores = Scores::from_categories(CategoryScores {
        psychometric: 99,
        technical: 99,
        wiscar: 100,
    });
    assert_eq!(scores.overall, 99);

    let clamped = Scores::from_categories(CategoryScores {
        psychometric: 250,
        technical: 100,
        wiscar: 100,
    });
    assert_eq!(clamped.psychometric, 100);
    assert_eq!(clamped.overall, 100);
}

#[test]
fn recommendation_thresholds_are_inclusive() {
    assert_eq!(Recommendation::from_overall(80), Recommendation::HighlyRecommended);
    assert_eq!(Recommendation::from_overall(79), Recommendation::Recommended);
    assert_eq!(Recommendation::from_overall(65), Recommendation::Recommended);
    assert_eq!(
        Recommendation::from_overall(64),
        Recommendation::FurtherDevelopmentNeeded
    );
}

#[test]
fn result_record_uses_stored_field_names() {
    let mut answers = AnswerSet::new();
    answers.insert(QuestionId::from("interest_1"), AnswerValue::Scale(4));
    answers.insert(
        QuestionId::from("tech_2"),
        AnswerValue::Choice("To ensure data integrity and authenticity".into()),
    );
    let completed_at = Utc.with_ymd_and_hms(2026, 10, 15, 9, 30, 0).unwrap();
    let record = ResultRecord::new(
        answers,
        Scores::from_categories(CategoryScores {
            psychometric: 88,
            technical: 71,
            wiscar: 90,
        }),
        completed_at,
    );

    let raw = record.encode().expect("encode");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(json["answers"]["interest_1"], 4);
    assert_eq!(
        json["answers"]["tech_2"],
        "To ensure data integrity and authenticity"
    );
    assert_eq!(json["scores"]["overall"], 83);
    assert_eq!(json["recommendation"], "Highly Recommended");
    assert_eq!(json["completedAt"], "2026-10-15T09:30:00Z");

    assert_eq!(ResultRecord::decode(&raw).expect("decode"), record);
}

#[test]
fn decodes_record_written_by_browser_storage() {
    let raw = r#"{
        "answers": {"will_1": 5, "cognitive_1": "Research extensively before taking action"},
        "scores": {"psychometric": 72, "technical": 61, "wiscar": 77, "overall": 70},
        "recommendation": "Recommended",
        "completedAt": "2025-03-01T12:00:00.000Z"
    }"#;
    let record = ResultRecord::decode(raw).expect("decode");
    assert_eq!(record.scores.overall, 70);
    assert_eq!(record.recommendation, Recommendation::Recommended);
    assert_eq!(
        record.answers.get(&QuestionId::from("will_1")),
        Some(&AnswerValue::Scale(5))
    );
}
