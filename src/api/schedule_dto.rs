use serde::{Deserialize, Serialize};

/// Wire representation of a synthesized schedule: a rectangular table of
/// instruction strings, one row per time slot, one column per physical node.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleDto {
    pub rows: Vec<Vec<String>>,
}
