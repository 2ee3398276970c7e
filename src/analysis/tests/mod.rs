mod pipeline_tests;
mod signal_tests;
