use assessment_core::{validate_for_save, Error, Test, TestStatus};
use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

fn test_from(value: serde_json::Value) -> Test {
    serde_json::from_value(value).expect("fixture should deserialize")
}

#[test]
fn teacher_authored_test_passes_and_gets_timestamps() {
    let mut test = test_from(json!({
        "title": "Fractions end-of-unit test",
        "status": "scheduled",
        "classroom": Uuid::new_v4(),
        "teacher": Uuid::new_v4(),
        "scheduledDate": Utc::now() + Duration::days(3),
        "deadline": Utc::now() + Duration::days(10),
        "passingScore": 8.0,
        "questions": [
            {
                "questionText": "Which fraction is largest?",
                "questionType": "multipleChoice",
                "options": [
                    { "text": "1/2" },
                    { "text": "3/4", "isCorrect": true },
                    { "text": "2/3" }
                ],
                "points": 5.0
            },
            {
                "questionText": "Write 0.75 as a fraction",
                "questionType": "shortAnswer",
                "correctAnswer": "3/4",
                "points": 5.0
            }
        ]
    }));

    validate_for_save(&mut test).expect("valid test should pass");
    assert!(test.created_at.is_some());
    assert!(test.updated_at.is_some());
    assert_eq!(test.passing_score, Some(8.0));
}

#[test]
fn every_violation_is_listed_in_one_rejection() {
    let mut test = test_from(json!({
        "title": "abc",
        "status": "scheduled",
        "duration": 900,
        "scheduledDate": Utc::now() - Duration::days(1),
        "maxAttempts": 0,
        "questions": []
    }));

    let failure = match validate_for_save(&mut test) {
        Err(Error::Validation(failure)) => failure,
        other => panic!("expected validation failure, got {:?}", other),
    };

    for field in ["title", "duration", "maxAttempts", "scheduledDate", "questions"] {
        assert!(failure.has_field(field), "missing {}: {:?}", field, failure);
    }
    // The document is untouched on rejection.
    assert!(test.updated_at.is_none());
}

#[test]
fn passing_score_clamp_uses_recomputed_total() {
    let mut test = test_from(json!({
        "title": "Quick vocabulary check",
        "status": "draft",
        "passingScore": 50.0,
        "questions": [
            {
                "questionText": "Define the word 'ubiquitous'",
                "questionType": "essay",
                "points": 12.0
            }
        ]
    }));

    validate_for_save(&mut test).unwrap();
    assert_eq!(test.passing_score, Some(12.0));
    assert_eq!(test.total_points(), 12.0);
}

#[test]
fn draft_relaxations_do_not_leak_into_scheduled_status() {
    let past = Utc::now() - Duration::days(2);

    let mut draft = test_from(json!({
        "title": "Unscheduled draft of the midterm",
        "status": "draft",
        "scheduledDate": past,
        "questions": []
    }));
    validate_for_save(&mut draft).expect("draft may be empty and in the past");
    assert_eq!(draft.status, TestStatus::Draft);

    let mut scheduled = test_from(json!({
        "title": "Unscheduled draft of the midterm",
        "status": "scheduled",
        "scheduledDate": past,
        "questions": []
    }));
    let failure = match validate_for_save(&mut scheduled) {
        Err(Error::Validation(failure)) => failure,
        other => panic!("expected validation failure, got {:?}", other),
    };
    assert!(failure.has_field("scheduledDate"));
    assert!(failure.has_field("questions"));
}
