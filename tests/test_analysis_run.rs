mod common;

use std::fs;
use std::path::PathBuf;

use warp_reliability::api::schedule_dto::ScheduleDto;
use warp_reliability::api::workload_dto::WorkloadDto;
use warp_reliability::config::RunConfig;
use warp_reliability::error::Error;
use warp_reliability::run_reliability_analysis;

use common::flow_dto;

fn write_json(file_name: &str, contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("warp_reliability_{}_{}", std::process::id(), file_name));
    fs::write(&path, contents).expect("temp file is writable");
    path
}

fn example4_input_files(test_name: &str) -> (PathBuf, PathBuf) {
    let workload_dto = WorkloadDto {
        name: "Example4".to_string(),
        flows: vec![
            flow_dto("F0", 0, 10, 10, &["A", "B", "C", "D"]),
            flow_dto("F1", 1, 20, 20, &["C", "B", "A"]),
        ],
    };
    let schedule = common::example4_e2e_schedule();
    let schedule_dto = ScheduleDto {
        rows: (0..schedule.num_rows())
            .map(|row| schedule.row(row).to_vec())
            .collect(),
    };

    let workload_path = write_json(
        &format!("{}_workload.json", test_name),
        &serde_json::to_string(&workload_dto).expect("workload DTO serializes"),
    );
    let schedule_path = write_json(
        &format!("{}_schedule.json", test_name),
        &serde_json::to_string(&schedule_dto).expect("schedule DTO serializes"),
    );
    (workload_path, schedule_path)
}

#[test]
fn analysis_run_from_files_meets_targets() {
    let (workload_path, schedule_path) = example4_input_files("meets_targets");
    let config = RunConfig::default();

    let outcome = run_reliability_analysis(
        workload_path.to_str().unwrap(),
        schedule_path.to_str().unwrap(),
        &config,
    )
    .expect("analysis runs cleanly");

    assert!(outcome.all_flows_met);
    assert!(outcome.failing_columns.is_empty());
    assert_eq!(outcome.header_row, vec!["F0:A", "F0:B", "F0:C", "F0:D", "F1:C", "F1:B", "F1:A"]);
    assert_eq!(outcome.table.num_rows(), 20);
    assert_eq!(outcome.table.last().unwrap(), &vec![1.0, 0.999, 0.99873, 0.993627, 1.0, 0.999, 0.9963]);

    fs::remove_file(workload_path).ok();
    fs::remove_file(schedule_path).ok();
}

#[test]
fn invalid_parameters_are_rejected_before_loading() {
    let config = RunConfig { min_packet_reception_rate: 0.0, ..RunConfig::default() };
    let result = run_reliability_analysis("does_not_matter.json", "does_not_matter.json", &config);
    assert!(matches!(result, Err(Error::InvalidParameters(_))));
}

#[test]
fn missing_input_file_surfaces_an_io_error() {
    let config = RunConfig::default();
    let result = run_reliability_analysis("definitely_missing_workload.json", "also_missing.json", &config);
    assert!(matches!(result, Err(Error::IoError(_))));
}

#[test]
fn malformed_workload_json_surfaces_a_deserialization_error() {
    let workload_path = write_json("malformed_workload.json", "{ not json");
    let config = RunConfig::default();

    let result = run_reliability_analysis(workload_path.to_str().unwrap(), "unreached.json", &config);
    assert!(matches!(result, Err(Error::DeserializationError(_))));

    fs::remove_file(workload_path).ok();
}
