use crate::config::RunConfig;
use crate::domain::workload::WorkloadModel;
use crate::error::Result;
use crate::loader::parser::{load_schedule, load_workload};
use crate::reliability::budget::TransmissionBudgetCalculator;
use crate::reliability::engine::ReliabilityPropagationEngine;
use crate::reliability::table::{HeaderIndex, HeaderRow, ReliabilityTable};
use crate::reliability::verifier::ReliabilityVerifier;
use crate::schedule::dsl::WarpDsl;
use crate::schedule::table::ScheduleTable;

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;
pub mod reliability;
pub mod schedule;

/// Everything one analysis run produces for its reporting collaborators.
pub struct AnalysisOutcome {
    pub header_row: HeaderRow,
    pub table: ReliabilityTable,
    pub all_flows_met: bool,
    /// `(column label, terminal value)` for every column below target.
    pub failing_columns: Vec<(String, f64)>,
}

/// Runs the full reliability analysis for a workload/schedule file pair:
/// build the workload, finalize its transmission budgets, replay the
/// schedule into a reliability table, and verify every flow's target.
pub fn run_reliability_analysis(workload_path: &str, schedule_path: &str, config: &RunConfig) -> Result<AnalysisOutcome> {
    config.validate()?;

    let workload_dto = load_workload(workload_path)?;
    log::info!("Workload description parsed successfully.");

    let mut workload = WorkloadModel::from_dto(workload_dto);
    let calculator = TransmissionBudgetCalculator::from_config(config);
    workload.finalize_flows(&calculator);
    log::info!("Workload {} finalized with {} flows.", workload.name, workload.flows().len());

    let schedule = ScheduleTable::from_dto(load_schedule(schedule_path)?)?;
    log::info!("Schedule parsed: {} slots x {} nodes.", schedule.num_rows(), schedule.num_columns());

    let engine = ReliabilityPropagationEngine::new(&workload, &schedule, WarpDsl::new(), config.min_packet_reception_rate);
    let header_row = engine.create_header_row();
    let header_index = HeaderIndex::from_header_row(&header_row);
    let table = engine.build_reliability_table();

    let verifier = ReliabilityVerifier::new(config.e2e);
    let all_flows_met = verifier.verify(&table, &workload, &header_index);
    let failing_columns = verifier.failing_columns(&table, &header_index);

    Ok(AnalysisOutcome { header_row, table, all_flows_met, failing_columns })
}
