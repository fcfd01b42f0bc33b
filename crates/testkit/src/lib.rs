mod recording_adapter;
mod yaml_runner;

pub use recording_adapter::{COMMIT_SQL, RecordingAdapter, integer_row, null_row, text_row};
pub use yaml_runner::{
    Cell, GeometryColumn, Operation, TestCase, TestResult, feature_type_for,
    load_test_cases_from_str, run_offline_test,
};
