//! Serde surface tests for the request/result payload contract.

use pleito_core::types::{
    AdjustmentSpec, EntityId, ExternalFactor, HistoricalResult, ImpactDuration, Office,
    Polarity, PollSample, ProjectionRequest, Scope, SimulationKind, WeightConfig,
};

fn sample_request() -> ProjectionRequest {
    ProjectionRequest {
        scope: Scope {
            office: Office::FederalDeputy,
            state: Some("SP".into()),
            target_year: 2026,
            base_year: Some(2022),
        },
        kind: SimulationKind::Prediction,
        weights: WeightConfig {
            poll: 0.3,
            history: 0.5,
            adjustment: 0.2,
        },
        iterations: 10_000,
        confidence_level: 0.95,
        total_seats: 70,
        entities: vec![EntityId::from("PT"), EntityId::from("PL")],
        polls: vec![PollSample {
            entity: EntityId::from("PT"),
            share: 0.32,
            source: "Datafolha".into(),
        }],
        baseline: vec![HistoricalResult {
            entity: EntityId::from("PT"),
            share: 0.29,
            year: 2022,
        }],
        adjustments: vec![AdjustmentSpec {
            entity: EntityId::from("PL"),
            delta: -0.02,
            rationale: "candidate withdrew".into(),
        }],
        factors: vec![ExternalFactor {
            description: "fuel price spike".into(),
            polarity: Polarity::Negative,
            magnitude: 0.05,
            duration: ImpactDuration::MediumTerm,
            affected: vec![EntityId::from("PT")],
        }],
        seed: 42,
    }
}

#[test]
fn test_request_round_trips_through_json() {
    let request = sample_request();
    let json = serde_json::to_string(&request).unwrap();
    let back: ProjectionRequest = serde_json::from_str(&json).unwrap();

    assert_eq!(back.entities, request.entities);
    assert_eq!(back.kind, SimulationKind::Prediction);
    assert_eq!(back.iterations, 10_000);
    assert_eq!(back.seed, 42);
}

#[test]
fn test_wire_names_are_snake_case() {
    let request = sample_request();
    let json = serde_json::to_string(&request).unwrap();

    assert!(json.contains("\"office\":\"federal_deputy\""));
    assert!(json.contains("\"kind\":\"prediction\""));
    assert!(json.contains("\"duration\":\"medium_term\""));
    assert!(json.contains("\"polarity\":\"negative\""));
}

#[test]
fn test_request_parses_from_caller_json() {
    let json = r#"{
        "scope": {"office": "state_deputy", "state": "BA", "target_year": 2026, "base_year": null},
        "kind": "event_impact",
        "weights": {"poll": 0.4, "history": 0.4, "adjustment": 0.2},
        "iterations": 5000,
        "confidence_level": 0.9,
        "total_seats": 63,
        "entities": ["MDB", "PT"],
        "polls": [],
        "baseline": [],
        "adjustments": [],
        "factors": [],
        "seed": 7
    }"#;

    let request: ProjectionRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.kind, SimulationKind::EventImpact);
    assert_eq!(request.scope.office, Office::StateDeputy);
    assert!(request.scope.base_year.is_none());
}
