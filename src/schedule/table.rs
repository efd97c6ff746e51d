use crate::api::schedule_dto::ScheduleDto;
use crate::error::{Error, Result};

/// A synthesized time-slotted instruction table.
///
/// Rows are time slots; columns are the physical nodes that carry
/// instructions in each slot (not the reliability table's flow-node
/// columns). Cells are opaque instruction strings owned by the external
/// schedule synthesizer; this crate only decodes them at the
/// `InstructionDecoder` boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleTable {
    rows: Vec<Vec<String>>,
}

impl ScheduleTable {
    /// Builds a schedule from raw rows, which must be rectangular.
    pub fn new(rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some(first) = rows.first() {
            let width = first.len();
            if let Some(position) = rows.iter().position(|row| row.len() != width) {
                return Err(Error::ModelConstructionError(format!(
                    "schedule is not rectangular: row {} has {} columns, expected {}",
                    position,
                    rows[position].len(),
                    width
                )));
            }
        }
        Ok(ScheduleTable { rows })
    }

    pub fn from_dto(dto: ScheduleDto) -> Result<Self> {
        Self::new(dto.rows)
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row).and_then(|cells| cells.get(column)).map(String::as_str)
    }

    pub fn row(&self, row: usize) -> &[String] {
        &self.rows[row]
    }
}
