pub mod csv_to_json;
pub mod json_stats;
