pub mod schedule_dto;
pub mod workload_dto;
