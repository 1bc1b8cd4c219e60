use analyzer_engine::{interpret_payload, interpret_result, MalformedResponse, NO_SUMMARY};
use pretty_assertions::assert_eq;

const CANONICAL: &str = "blah blah ```json\n{\"match_score\":72,\"missing_keywords\":[\"Docker\"],\"summary\":\"Add Docker.\"}\n``` trailing";

#[test]
fn fenced_payload_with_surrounding_prose_is_extracted() {
    let report = interpret_result(CANONICAL).expect("report");
    assert_eq!(report.match_percentage, 72.0);
    assert_eq!(report.missing_keywords, vec!["Docker".to_string()]);
    assert_eq!(report.improvement_summary, "Add Docker.");
}

#[test]
fn envelope_is_unwrapped_before_extraction() {
    let body = serde_json::json!({ "result": CANONICAL }).to_string();
    let report = interpret_payload(&body).expect("report");
    assert_eq!(report.match_percentage, 72.0);
}

#[test]
fn text_without_object_is_malformed() {
    let err = interpret_result("not json at all").unwrap_err();
    assert_eq!(err, MalformedResponse::NoJsonObject);
    assert_eq!(err.to_string(), "no JSON object found");
}

#[test]
fn unparseable_span_keeps_raw_text() {
    let err = interpret_result("here: {match_score: 72,} done").unwrap_err();
    match &err {
        MalformedResponse::InvalidJson { raw, .. } => {
            assert_eq!(raw, "{match_score: 72,}");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(err.raw(), Some("{match_score: 72,}"));
    assert!(err.to_string().starts_with("invalid JSON"));
}

#[test]
fn missing_keywords_default_to_empty() {
    let report = interpret_result("{\"match_score\": 55, \"summary\": \"ok\"}").unwrap();
    assert!(report.missing_keywords.is_empty());

    let report =
        interpret_result("{\"match_score\": 55, \"missing_keywords\": \"Docker\"}").unwrap();
    assert!(report.missing_keywords.is_empty());
}

#[test]
fn non_string_keywords_are_skipped() {
    let report =
        interpret_result("{\"match_score\": 55, \"missing_keywords\": [\"Go\", 3, null, \"K8s\"]}")
            .unwrap();
    assert_eq!(report.missing_keywords, vec!["Go".to_string(), "K8s".to_string()]);
}

#[test]
fn missing_summary_uses_default_text() {
    let report = interpret_result("{\"match_score\": 90, \"missing_keywords\": []}").unwrap();
    assert_eq!(report.improvement_summary, NO_SUMMARY);
    assert_eq!(report.improvement_summary, "No summary provided");
}

#[test]
fn match_score_is_required_and_numeric() {
    assert_eq!(
        interpret_result("{\"summary\": \"x\"}").unwrap_err(),
        MalformedResponse::MissingMatchScore
    );
    assert_eq!(
        interpret_result("{\"match_score\": null}").unwrap_err(),
        MalformedResponse::MissingMatchScore
    );
    assert_eq!(
        interpret_result("{\"match_score\": \"72\"}").unwrap_err(),
        MalformedResponse::InvalidMatchScore
    );
}

#[test]
fn out_of_range_score_passes_through() {
    let report = interpret_result("{\"match_score\": 130.5}").unwrap();
    assert_eq!(report.match_percentage, 130.5);
    let report = interpret_result("{\"match_score\": -4}").unwrap();
    assert_eq!(report.match_percentage, -4.0);
}

#[test]
fn nested_objects_are_kept_in_the_span() {
    let text = "```json\n{\"match_score\": 61, \"details\": {\"skills\": {\"rust\": true}}, \"summary\": \"s\"}\n```";
    let report = interpret_result(text).unwrap();
    assert_eq!(report.match_percentage, 61.0);
    assert_eq!(report.improvement_summary, "s");
}

#[test]
fn envelope_without_result_string_is_malformed() {
    for body in ["plain text", "{\"result\": 5}", "{\"other\": \"x\"}", "[]"] {
        match interpret_payload(body).unwrap_err() {
            MalformedResponse::InvalidEnvelope { .. } => {}
            other => panic!("unexpected error {other:?} for {body}"),
        }
    }
}
