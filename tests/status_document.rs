//! End-to-end behavior of the condition helpers through the public API.

use chrono::{Duration, TimeZone, Utc};
use conditions::{
    get, is_true, mark_false, mark_true, mark_unknown, sync_ready, Condition, ConditionStatus,
    ConditionedStatus, ConditionsAccessor, ManualClock, Marker, StatusDocument, TransitionPolicy,
    READY,
};
use serde::{Deserialize, Serialize};

/// A custom resource status embedding the condition set next to other fields.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatabaseStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    observed_generation: Option<i64>,
    #[serde(flatten)]
    conditions: ConditionedStatus,
}

impl ConditionsAccessor for DatabaseStatus {
    fn conditions(&self) -> &[Condition] {
        self.conditions.conditions()
    }

    fn set_conditions(&mut self, conditions: Vec<Condition>) {
        self.conditions.set_conditions(conditions);
    }
}

fn types<A: ConditionsAccessor>(obj: &A) -> Vec<String> {
    obj.conditions()
        .iter()
        .map(|c| c.type_.to_string())
        .collect()
}

#[test]
fn example_end_to_end_order() {
    let mut obj = DatabaseStatus::default();
    mark_true(&mut obj, "B");
    mark_true(&mut obj, "A");
    mark_unknown(&mut obj, "C", "", "");

    assert_eq!(types(&obj), vec!["A", "B", "C"]);
}

#[test]
fn aggregation_inherits_first_failure() {
    let mut obj = DatabaseStatus::default();
    mark_true(&mut obj, "API");
    mark_false(&mut obj, "Database", "DBDown", "database unreachable");

    sync_ready(&mut obj);

    let ready = get(&obj, READY).unwrap();
    assert_eq!(ready.status, ConditionStatus::False);
    assert_eq!(ready.reason, "DBDown");
    assert_eq!(ready.message, "database unreachable");
    assert_eq!(types(&obj), vec!["Ready", "API", "Database"]);
}

#[test]
fn all_true_aggregation_puts_ready_first() {
    let mut obj = DatabaseStatus::default();
    mark_true(&mut obj, "Database");
    mark_true(&mut obj, "API");

    sync_ready(&mut obj);

    assert!(is_true(&obj, READY));
    let first = &obj.conditions()[0];
    assert_eq!(first.type_, READY);
    assert!(first.reason.is_empty());
    assert!(first.message.is_empty());
}

#[test]
fn unknown_is_neutral() {
    let mut obj = DatabaseStatus::default();
    mark_unknown(&mut obj, "X", "", "");

    sync_ready(&mut obj);

    assert!(is_true(&obj, READY));
}

#[test]
fn transition_time_moves_only_with_reason() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());
    let marker = Marker::with_clock(TransitionPolicy::Reason, &clock);
    let mut obj = DatabaseStatus::default();

    marker.mark_true(&mut obj, "Cache");
    let t1 = get(&obj, "Cache").unwrap().last_transition_time.unwrap();

    clock.advance(Duration::seconds(1));
    marker.mark_false(&mut obj, "Cache", "CacheDown", "cache offline");
    let t2 = get(&obj, "Cache").unwrap().last_transition_time.unwrap();
    assert!(t2 > t1);

    clock.advance(Duration::seconds(1));
    marker.mark_unknown(&mut obj, "Cache", "CacheDown", "probing");
    let t3 = get(&obj, "Cache").unwrap().last_transition_time.unwrap();
    assert_eq!(t3, t2);
}

#[test]
fn embedded_status_serializes_kubernetes_shape() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());
    let marker = Marker::with_clock(TransitionPolicy::Reason, &clock);
    let mut obj = DatabaseStatus {
        observed_generation: Some(7),
        ..Default::default()
    };

    marker.mark_false(&mut obj, "Database", "DBDown", "");
    marker.sync_ready(&mut obj);

    let json = serde_json::to_value(&obj).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "observedGeneration": 7,
            "conditions": [
                {
                    "type": "Ready",
                    "status": "False",
                    "reason": "DBDown",
                    "lastTransitionTime": "2024-05-01T08:00:00Z"
                },
                {
                    "type": "Database",
                    "status": "False",
                    "reason": "DBDown",
                    "lastTransitionTime": "2024-05-01T08:00:00Z"
                }
            ]
        })
    );

    let back: DatabaseStatus = serde_json::from_value(json).unwrap();
    assert_eq!(back.observed_generation, Some(7));
    assert_eq!(back.conditions(), obj.conditions());
}

#[test]
fn status_document_round_trip_keeps_unrelated_fields() {
    let mut doc = StatusDocument::parse(
        r#"{
            "phase": "Running",
            "replicas": 3,
            "conditions": [
                {"type": "Storage", "status": "True", "lastTransitionTime": "2024-01-01T00:00:00Z"}
            ]
        }"#,
    )
    .unwrap();

    mark_false(&mut doc, "Network", "Partitioned", "split brain");
    sync_ready(&mut doc);

    let value: serde_json::Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();
    assert_eq!(value["phase"], "Running");
    assert_eq!(value["replicas"], 3);
    let conds = value["conditions"].as_array().unwrap();
    let order: Vec<&str> = conds.iter().map(|c| c["type"].as_str().unwrap()).collect();
    assert_eq!(order, vec!["Ready", "Network", "Storage"]);
    assert_eq!(conds[0]["reason"], "Partitioned");
    assert_eq!(conds[2]["lastTransitionTime"], "2024-01-01T00:00:00Z");
}
