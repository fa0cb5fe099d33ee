//! Validated, priority-ordered execution plan

use std::cmp::Reverse;
use std::fmt;

use testrig_model::{ConfigError, Method, Role, Value};

use crate::RunnerOptions;
use crate::binding::{MissingArguments, bind_arguments, missing_arguments};
use crate::discovery::discover;
use crate::validation::{resolve_priority, validate_suite_hooks};

/// A test method with its resolved priority and bound arguments
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedTest<'unit> {
    pub method: &'unit Method,
    pub priority: i32,
    pub args: Vec<Value>,
    /// Set when the method declares parameters but has no `@CsvSource`; the
    /// test then fails at its turn instead of being called
    pub unbound: Option<MissingArguments>,
}

impl fmt::Display for PlannedTest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>2} {}(", self.priority, self.method.name())?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

/// Everything a run needs, borrowed from the unit's declared methods
#[derive(Debug, Clone)]
pub struct ExecutionPlan<'unit> {
    pub before_suite: Option<&'unit Method>,
    pub after_suite: Option<&'unit Method>,
    pub before_test: Vec<&'unit Method>,
    pub after_test: Vec<&'unit Method>,
    tests: Vec<PlannedTest<'unit>>,
}

impl<'unit> ExecutionPlan<'unit> {
    /// Discover, validate and order `methods`
    ///
    /// Checks run in a fixed order: `@BeforeSuite`, `@AfterSuite`, test
    /// priorities, then `@CsvSource` arguments. The first failure wins.
    ///
    /// # Errors
    ///
    /// The first `ConfigError` found
    pub fn build(methods: &'unit [Method], options: &RunnerOptions) -> Result<Self, ConfigError> {
        let groups = discover(methods);

        validate_suite_hooks(Role::BeforeSuite, &groups.before_suite)?;
        validate_suite_hooks(Role::AfterSuite, &groups.after_suite)?;

        let priorities = groups
            .tests
            .iter()
            .map(|method| resolve_priority(method))
            .collect::<Result<Vec<_>, _>>()?;

        let mut tests = groups
            .tests
            .iter()
            .copied()
            .zip(priorities)
            .map(|(method, priority)| {
                Ok(PlannedTest {
                    method,
                    priority,
                    args: bind_arguments(method, options.trim_csv_fields)?,
                    unbound: missing_arguments(method),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        // Stable: equal priorities keep discovery order
        tests.sort_by_key(|test| Reverse(test.priority));

        Ok(Self {
            before_suite: groups.before_suite.first().copied(),
            after_suite: groups.after_suite.first().copied(),
            before_test: groups.before_test,
            after_test: groups.after_test,
            tests,
        })
    }

    /// Tests in execution order
    #[must_use]
    pub fn tests(&self) -> &[PlannedTest<'unit>] {
        &self.tests
    }

    #[must_use]
    pub fn test_names(&self) -> Vec<&'unit str> {
        self.tests.iter().map(|test| test.method.name()).collect()
    }
}
