//! Structural checks applied before anything runs

use testrig_model::{ConfigError, DEFAULT_PRIORITY, MAX_PRIORITY, MIN_PRIORITY, Method, Role};

/// Check a `@BeforeSuite` or `@AfterSuite` group
///
/// Every carrier must be static; the first one that is not fails the check.
/// Only then is the group size checked.
///
/// # Errors
///
/// `NonStaticSuiteHook`, or the duplicate error of `role` when more than one
/// method carries it
pub fn validate_suite_hooks(role: Role, group: &[&Method]) -> Result<(), ConfigError> {
    if let Some(method) = group.iter().find(|m| !m.is_static()) {
        return Err(ConfigError::NonStaticSuiteHook {
            role,
            method: method.name().to_string(),
        });
    }

    if group.len() > 1 {
        let methods = group.iter().map(|m| m.name().to_string()).collect();
        return Err(match role {
            Role::AfterSuite => ConfigError::DuplicateAfterSuite { methods },
            _ => ConfigError::DuplicateBeforeSuite { methods },
        });
    }

    Ok(())
}

/// Effective priority of a `@Test` method
///
/// # Errors
///
/// `PriorityOutOfRange` if the declared priority is outside 1..=10
pub fn resolve_priority(method: &Method) -> Result<i32, ConfigError> {
    let priority = method.declared_priority().unwrap_or(DEFAULT_PRIORITY);
    if (MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
        Ok(priority)
    } else {
        Err(ConfigError::PriorityOutOfRange {
            method: method.name().to_string(),
            priority,
        })
    }
}
