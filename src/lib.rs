//! testrig - annotation-driven test runner
//!
//! Describe a test unit with [`Method`] descriptors, back it with closures in a
//! [`RegisteredUnit`] (or your own [`TestUnit`] implementation) and hand it to
//! [`run_tests`] or a configured [`Runner`].

pub use testrig_csv::split_fields;
pub use testrig_model::{
    Annotation, ConfigError, DEFAULT_PRIORITY, HarnessError, Invoker, MAX_PRIORITY, MIN_PRIORITY,
    MetadataSource, Method, ParamType, Role, TestUnit, Value, Visibility,
};
pub use testrig_runner::{
    ExecutionPlan, MissingArguments, PlannedTest, RegisteredUnit, Runner, RunnerOptions, UnitError, run_tests,
};
