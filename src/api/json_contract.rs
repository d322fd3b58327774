use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::ChartPoints;

pub const CHART_POINTS_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPointsJsonContractV1 {
    pub schema_version: u32,
    pub points: ChartPoints,
}

impl ChartPoints {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartPointsJsonContractV1 {
            schema_version: CHART_POINTS_JSON_SCHEMA_V1,
            points: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart points contract v1: {e}"))
        })
    }

    /// Accepts either a bare `ChartPoints` document or a versioned contract.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(points) = serde_json::from_str::<ChartPoints>(input) {
            return Ok(points);
        }
        let payload: ChartPointsJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart points json payload: {e}"))
        })?;
        if payload.schema_version != CHART_POINTS_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported chart points schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.points)
    }
}
