use serde::{Deserialize, Serialize};

/// Wire representation of a workload description file.
///
/// Flow parameters are optional; omitted values fall back to the flow
/// defaults (priority = description order, period = deadline = 100,
/// phase = 0).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkloadDto {
    pub name: String,
    pub flows: Vec<FlowDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FlowDto {
    pub name: String,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub period: Option<i64>,
    #[serde(default)]
    pub deadline: Option<i64>,
    #[serde(default)]
    pub phase: Option<i64>,
    /// Chain of node names, source first and sink last.
    pub nodes: Vec<String>,
}
