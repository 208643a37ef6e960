pub mod digest_service;
pub mod export_service;
pub mod productivity_score_service;
pub mod settings_service;
pub mod snapshot_service;
pub mod team_overview_service;
pub mod workload_service;
