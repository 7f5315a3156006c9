#![allow(unused_imports)]

pub use sfnview_test_utils::builders;
pub use sfnview_test_utils::recording_sink::RecordingSink;
pub use sfnview_test_utils::{init_tracing, output_lines};
