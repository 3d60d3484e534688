//! JSON shapes shared by the CLI and the HTTP server.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::solver::{Outcome, SearchConfig, Solver};
use crate::types::{Crate, LoadingInstruction, LoadingPlan, Truck};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlanRequest {
    pub truck: Truck,
    pub crates: Vec<Crate>,
    #[serde(default)]
    pub max_attempts: Option<u32>,
    #[serde(default)]
    pub distinct_orientations: bool,
}

impl PlanRequest {
    pub fn search_config(&self) -> SearchConfig {
        let defaults = SearchConfig::default();
        SearchConfig {
            max_attempts: self.max_attempts.unwrap_or(defaults.max_attempts),
            distinct_orientations: self.distinct_orientations,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub success: bool,
    pub outcome: Outcome,
    pub attempts: u32,
    pub truck: Truck,
    /// In loading order. Empty unless every crate was placed.
    pub instructions: Vec<LoadingInstruction>,
    pub utilization_percent: f64,
}

impl PlanResponse {
    pub fn plan(&self) -> LoadingPlan {
        LoadingPlan {
            instructions: self.instructions.iter().map(|i| (i.crate_id, *i)).collect(),
        }
    }
}

/// Validates the request and runs the search.
pub fn plan(req: &PlanRequest) -> Result<PlanResponse> {
    let solver = Solver::new(req.truck, req.crates.clone())?.with_config(req.search_config());
    let report = solver.solve();

    let truck_volume = req.truck.volume();
    let utilization_percent = if truck_volume == 0 {
        0.0
    } else {
        report.plan.loaded_volume() as f64 / truck_volume as f64 * 100.0
    };

    Ok(PlanResponse {
        success: report.is_success(),
        outcome: report.outcome,
        attempts: report.attempts,
        truck: req.truck,
        instructions: report.plan.in_step_order(),
        utilization_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn parse(json: &str) -> PlanRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_defaults() {
        let req = parse(
            r#"{"truck": {"width": 10, "height": 10, "length": 10},
                "crates": [{"id": 1, "width": 5, "height": 5, "length": 5}]}"#,
        );
        assert_eq!(req.search_config(), SearchConfig::default());

        let resp = plan(&req).unwrap();
        assert!(resp.success);
        assert_eq!(resp.outcome, Outcome::Placed);
        assert_eq!(resp.instructions.len(), 1);
        assert!((resp.utilization_percent - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_failure_is_not_an_error() {
        let req = parse(
            r#"{"truck": {"width": 4, "height": 4, "length": 4},
                "crates": [{"id": 1, "width": 4, "height": 4, "length": 5}],
                "max_attempts": 5, "distinct_orientations": true}"#,
        );
        assert_eq!(req.search_config().max_attempts, 5);

        let resp = plan(&req).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.outcome, Outcome::Exhausted);
        assert!(resp.instructions.is_empty());
        assert_eq!(resp.utilization_percent, 0.0);
    }

    #[test]
    fn test_invalid_input_is_an_error() {
        let req = parse(
            r#"{"truck": {"width": 0, "height": 4, "length": 4}, "crates": []}"#,
        );
        assert!(matches!(plan(&req), Err(Error::InvalidTruck(_))));
    }

    #[test]
    fn test_response_json_shape() {
        let req = parse(
            r#"{"truck": {"width": 2, "height": 1, "length": 1},
                "crates": [{"id": 3, "width": 1, "height": 1, "length": 1},
                           {"id": 8, "width": 1, "height": 1, "length": 1}]}"#,
        );
        let json = serde_json::to_value(plan(&req).unwrap()).unwrap();
        assert_eq!(json["outcome"], "placed");
        assert_eq!(json["instructions"][0]["crate_id"], 3);
        assert_eq!(json["instructions"][1]["step"], 2);
        assert_eq!(json["instructions"][1]["x"], 1);
        assert_eq!(json["instructions"][1]["placed"]["width"], 1);
    }

    #[test]
    fn test_plan_round_trips_from_response() {
        let req = parse(
            r#"{"truck": {"width": 1, "height": 1, "length": 3},
                "crates": [{"id": 5, "width": 1, "height": 1, "length": 2},
                           {"id": 6, "width": 1, "height": 1, "length": 1}]}"#,
        );
        let resp = plan(&req).unwrap();
        let rebuilt = resp.plan();
        assert_eq!(rebuilt.len(), 2);
        assert_eq!(rebuilt.get(6).unwrap().z, 2);
        assert_eq!(rebuilt.in_step_order(), resp.instructions);
    }
}
