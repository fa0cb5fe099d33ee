//! testrig runner
//!
//! Runs one test unit: discover annotated methods, validate them, order the
//! tests by priority and execute everything with its lifecycle hooks.
//!
//! A run stops at the first failure. Configuration problems are reported before
//! the unit is even instantiated, so an invalid unit never executes anything.

pub mod binding;
pub mod discovery;
pub mod plan;
pub mod unit;
pub mod validation;

use testrig_model::{ConfigError, HarnessError, Method, MetadataSource, Role, TestUnit, Value};
use tracing::{debug, info, warn};

pub use binding::MissingArguments;
pub use plan::{ExecutionPlan, PlannedTest};
pub use unit::{RegisteredUnit, UnitError};

/// Runner configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunnerOptions {
    /// Trim surrounding whitespace from every `@CsvSource` field
    pub trim_csv_fields: bool,
    /// Still invoke `@AfterSuite` when the run fails after instantiation
    pub teardown_on_failure: bool,
}

#[derive(Debug, Default)]
pub struct Runner {
    options: RunnerOptions,
}

impl Runner {
    #[must_use]
    pub const fn new(options: RunnerOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &RunnerOptions {
        &self.options
    }

    /// Validated execution plan for `unit`, without running anything
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found in the unit's metadata
    pub fn plan<'unit, U>(&self, unit: &'unit U) -> Result<ExecutionPlan<'unit>, ConfigError>
    where
        U: MetadataSource + ?Sized,
    {
        ExecutionPlan::build(unit.declared_methods(), &self.options)
    }

    /// Run every test of `unit`
    ///
    /// Order: instantiate, `@BeforeSuite`, then per test all `@BeforeTest`
    /// hooks, the test and all `@AfterTest` hooks, and finally `@AfterSuite`.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError` for invalid metadata, a failing constructor or the
    /// first failing invocation
    pub fn run<U>(&self, unit: &U) -> Result<(), HarnessError>
    where
        U: TestUnit + ?Sized,
    {
        let plan = self.plan(unit)?;
        info!(
            unit = unit.unit_name(),
            tests = plan.tests().len(),
            "running test unit"
        );

        let mut instance = unit
            .instantiate()
            .map_err(|cause| HarnessError::Instantiation {
                unit: unit.unit_name().to_string(),
                cause,
            })?;

        if let Err(err) = self.execute(unit, &plan, &mut instance) {
            if self.options.teardown_on_failure {
                self.teardown_after_failure(unit, &plan, &err);
            }
            return Err(err);
        }

        info!(unit = unit.unit_name(), "test unit finished");
        Ok(())
    }

    fn execute<U>(
        &self,
        unit: &U,
        plan: &ExecutionPlan<'_>,
        instance: &mut U::Instance,
    ) -> Result<(), HarnessError>
    where
        U: TestUnit + ?Sized,
    {
        if let Some(hook) = plan.before_suite {
            invoke(unit, Role::BeforeSuite, hook, None, &[])?;
        }

        for test in plan.tests() {
            for hook in &plan.before_test {
                invoke(unit, Role::BeforeTest, hook, Some(&mut *instance), &[])?;
            }

            if let Some(missing) = &test.unbound {
                return Err(HarnessError::Invocation {
                    role: Role::Test,
                    method: test.method.name().to_string(),
                    cause: missing.clone().into(),
                });
            }
            invoke(unit, Role::Test, test.method, Some(&mut *instance), &test.args)?;

            for hook in &plan.after_test {
                invoke(unit, Role::AfterTest, hook, Some(&mut *instance), &[])?;
            }
        }

        if let Some(hook) = plan.after_suite {
            invoke(unit, Role::AfterSuite, hook, None, &[])?;
        }

        Ok(())
    }

    fn teardown_after_failure<U>(&self, unit: &U, plan: &ExecutionPlan<'_>, err: &HarnessError)
    where
        U: TestUnit + ?Sized,
    {
        if matches!(err, HarnessError::Invocation { role: Role::AfterSuite, .. }) {
            return;
        }
        let Some(hook) = plan.after_suite else {
            return;
        };

        debug!(method = hook.name(), "running @AfterSuite after failure");
        if let Err(teardown) = invoke(unit, Role::AfterSuite, hook, None, &[]) {
            warn!(error = %teardown, "@AfterSuite failed during teardown");
        }
    }
}

fn invoke<U>(
    unit: &U,
    role: Role,
    method: &Method,
    receiver: Option<&mut U::Instance>,
    args: &[Value],
) -> Result<(), HarnessError>
where
    U: TestUnit + ?Sized,
{
    debug!(role = %role, method = method.name(), args = args.len(), "invoking");
    unit.invoke(method, receiver, args)
        .map_err(|cause| HarnessError::Invocation {
            role,
            method: method.name().to_string(),
            cause,
        })
}

/// Run `unit` with default options
///
/// # Errors
///
/// See [`Runner::run`]
pub fn run_tests<U>(unit: &U) -> Result<(), HarnessError>
where
    U: TestUnit + ?Sized,
{
    Runner::default().run(unit)
}
