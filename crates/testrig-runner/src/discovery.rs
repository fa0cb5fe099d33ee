//! Role grouping of declared methods
//!
//! Each group is computed independently, so a method carrying several roles
//! lands in every matching group. Rejection is left to validation.

use testrig_model::{Method, Role};

/// Declared methods partitioned by role, each group in discovery order
#[derive(Debug, Default)]
pub struct RoleGroups<'unit> {
    pub before_suite: Vec<&'unit Method>,
    pub after_suite: Vec<&'unit Method>,
    pub before_test: Vec<&'unit Method>,
    pub after_test: Vec<&'unit Method>,
    pub tests: Vec<&'unit Method>,
}

impl<'unit> RoleGroups<'unit> {
    #[must_use]
    pub fn group(&self, role: Role) -> &[&'unit Method] {
        match role {
            Role::BeforeSuite => &self.before_suite,
            Role::AfterSuite => &self.after_suite,
            Role::BeforeTest => &self.before_test,
            Role::AfterTest => &self.after_test,
            Role::Test => &self.tests,
        }
    }
}

/// Partition `methods` into role groups
#[must_use]
pub fn discover(methods: &[Method]) -> RoleGroups<'_> {
    let with_role = |role: Role| methods.iter().filter(|m| m.has_role(role)).collect::<Vec<_>>();

    RoleGroups {
        before_suite: with_role(Role::BeforeSuite),
        after_suite: with_role(Role::AfterSuite),
        before_test: with_role(Role::BeforeTest),
        after_test: with_role(Role::AfterTest),
        tests: with_role(Role::Test),
    }
}
