mod api;
mod config;
mod domain;
mod error;
mod loader;
mod logger;
mod reliability;
mod schedule;

use clap::Parser;
use colored::Colorize;

use crate::config::{RunConfig, DEFAULT_E2E, DEFAULT_MIN_PACKET_RECEPTION_RATE, DEFAULT_NUM_CHANNELS, DEFAULT_NUM_FAULTS};
use crate::domain::workload::WorkloadModel;
use crate::error::Result;
use crate::loader::parser::{load_schedule, load_workload};
use crate::reliability::budget::TransmissionBudgetCalculator;
use crate::reliability::engine::ReliabilityPropagationEngine;
use crate::reliability::table::HeaderIndex;
use crate::reliability::verifier::ReliabilityVerifier;
use crate::schedule::dsl::WarpDsl;
use crate::schedule::table::ScheduleTable;

/// Reliability analysis for synthesized real-time wireless schedules.
#[derive(Debug, Parser)]
#[command(name = "warp_reliability", version)]
struct Args {
    /// Workload description file (JSON)
    workload: String,

    /// Synthesized schedule file (JSON)
    schedule: String,

    /// Minimum packet reception rate per link
    #[arg(short, long, default_value_t = DEFAULT_MIN_PACKET_RECEPTION_RATE)]
    m: f64,

    /// End-to-end reliability target per flow
    #[arg(short, long, default_value_t = DEFAULT_E2E)]
    e2e: f64,

    /// Faults tolerated per edge per period; > 0 selects the fixed-fault policy
    #[arg(short = 'f', long, default_value_t = DEFAULT_NUM_FAULTS)]
    num_faults: i64,

    /// Wireless channels available for scheduling
    #[arg(short = 'c', long, default_value_t = DEFAULT_NUM_CHANNELS)]
    num_channels: u16,
}

fn main() {
    logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(all_flows_met) => {
            if all_flows_met {
                println!("{}", "All flows meet their end-to-end reliability target.".green());
            } else {
                println!("{}", "Schedule infeasible: at least one flow misses its reliability target.".red());
                std::process::exit(1);
            }
        }
        Err(error) => {
            log::error!("Reliability analysis failed: {}", error);
            std::process::exit(2);
        }
    }
}

fn run(args: &Args) -> Result<bool> {
    let mut config = RunConfig::new(args.m, args.e2e, args.num_faults)?;
    config.num_channels = args.num_channels;

    let mut workload = WorkloadModel::from_dto(load_workload(&args.workload)?);
    let calculator = TransmissionBudgetCalculator::from_config(&config);
    workload.finalize_flows(&calculator);

    for flow_name in workload.flow_names_in_priority_order() {
        log::info!(
            "Flow {}: period {}, budget {:?}",
            flow_name,
            workload.get_flow_period(flow_name.as_str()),
            workload.get_num_tx_attempts_per_link(flow_name.as_str()),
        );
    }

    let schedule = ScheduleTable::from_dto(load_schedule(&args.schedule)?)?;
    log::info!("Replaying schedule: {} slots x {} nodes.", schedule.num_rows(), schedule.num_columns());

    let engine = ReliabilityPropagationEngine::new(&workload, &schedule, WarpDsl::new(), config.min_packet_reception_rate);
    let header_row = engine.create_header_row();
    let header_index = HeaderIndex::from_header_row(&header_row);
    let table = engine.build_reliability_table();

    let verifier = ReliabilityVerifier::new(config.e2e);
    let all_flows_met = verifier.verify(&table, &workload, &header_index);
    for (label, value) in verifier.failing_columns(&table, &header_index) {
        log::warn!("{} ends at {} (target {})", label, value, config.e2e);
    }

    Ok(all_flows_met)
}
