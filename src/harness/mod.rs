pub mod check;
pub mod discovery;
pub mod flutter;
pub mod trigger;
pub mod types;

pub use check::{run_check, run_check_with, static_spec};
pub use discovery::{FsSourceLocator, SourceLocator, source_file_name, to_snake};
pub use flutter::{FlutterTestOptions, run_flutter_test_and_read_spec, spec_output_path};
pub use trigger::{SpecTrigger, normalize_node_id, parse_trigger, read_event_comment};
pub use types::{ActualSource, CheckConfig, HarnessError, HarnessResult};
