use simplelog::{Config, LevelFilter, TestLogger};

use viewbind::validation::ValidationBackend;

/// Route crate logs to the test harness. Safe to call from every test.
pub fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

/// Built-in engines; behaviour shared between them is tested against both.
#[allow(dead_code)]
pub fn backends() -> Vec<ValidationBackend> {
    vec![ValidationBackend::Schema, ValidationBackend::Fluent]
}
