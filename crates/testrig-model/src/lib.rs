//! Test unit descriptors for testrig
//!
//! Every method the runner sees is described by a [`Method`]: its name, whether it
//! is callable on the type itself, its declared parameter types and the role
//! annotations attached to it. The runner never looks behind these descriptors;
//! construction and invocation go through the [`Invoker`] collaborator.

use std::fmt;

/// Lowest accepted `@Test` priority
pub const MIN_PRIORITY: i32 = 1;

/// Highest accepted `@Test` priority
pub const MAX_PRIORITY: i32 = 10;

/// Priority used when `@Test` carries no explicit value
pub const DEFAULT_PRIORITY: i32 = 5;

/// Role a method plays in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Test,
    BeforeTest,
    AfterTest,
    BeforeSuite,
    AfterSuite,
}

impl Role {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Test => "Test",
            Self::BeforeTest => "BeforeTest",
            Self::AfterTest => "AfterTest",
            Self::BeforeSuite => "BeforeSuite",
            Self::AfterSuite => "AfterSuite",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metadata attached to a method
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// @Test, optionally with an explicit priority
    Test { priority: Option<i32> },
    /// @BeforeTest
    BeforeTest,
    /// @AfterTest
    AfterTest,
    /// @BeforeSuite
    BeforeSuite,
    /// @AfterSuite
    AfterSuite,
    /// @CsvSource("...") - inline literal arguments for a test
    CsvSource(String),
}

impl Annotation {
    /// `@Test` with the default priority
    #[must_use]
    pub const fn test() -> Self {
        Self::Test { priority: None }
    }

    /// `@Test(priority = n)`
    #[must_use]
    pub const fn test_priority(priority: i32) -> Self {
        Self::Test {
            priority: Some(priority),
        }
    }

    /// `@CsvSource(value)`
    #[must_use]
    pub fn csv(value: impl Into<String>) -> Self {
        Self::CsvSource(value.into())
    }

    /// Role marker carried by this annotation; `CsvSource` carries none
    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        match self {
            Self::Test { .. } => Some(Role::Test),
            Self::BeforeTest => Some(Role::BeforeTest),
            Self::AfterTest => Some(Role::AfterTest),
            Self::BeforeSuite => Some(Role::BeforeSuite),
            Self::AfterSuite => Some(Role::AfterSuite),
            Self::CsvSource(_) => None,
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Test { priority: Some(p) } => write!(f, "@Test(priority = {p})"),
            Self::CsvSource(value) => write!(f, "@CsvSource({value:?})"),
            other => match other.role() {
                Some(role) => write!(f, "@{role}"),
                None => Ok(()),
            },
        }
    }
}

/// Declared type of a method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// 32-bit signed integer
    Int,
    Boolean,
    /// 64-bit IEEE float
    Double,
    /// 64-bit signed integer
    Long,
    Text,
    /// Any type CSV literals cannot be converted to
    Other(String),
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => f.write_str("int"),
            Self::Boolean => f.write_str("boolean"),
            Self::Double => f.write_str("double"),
            Self::Long => f.write_str("long"),
            Self::Text => f.write_str("String"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Argument value handed to a method invocation
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Bool(bool),
    Double(f64),
    Long(i64),
    Text(String),
}

impl Value {
    #[must_use]
    pub const fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// Method visibility. Informational only: private methods are invoked as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// Descriptor of a declared method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    name: String,
    is_static: bool,
    visibility: Visibility,
    params: Vec<ParamType>,
    annotations: Vec<Annotation>,
}

impl Method {
    /// Method invoked on the unit instance
    #[must_use]
    pub fn instance(name: impl Into<String>) -> Self {
        Self::with_dispatch(name.into(), false)
    }

    /// Method invoked on the type itself, without an instance
    #[must_use]
    pub fn static_method(name: impl Into<String>) -> Self {
        Self::with_dispatch(name.into(), true)
    }

    fn with_dispatch(name: String, is_static: bool) -> Self {
        Self {
            name,
            is_static,
            visibility: Visibility::Public,
            params: Vec::new(),
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    #[must_use]
    pub fn param(mut self, ty: ParamType) -> Self {
        self.params.push(ty);
        self
    }

    #[must_use]
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn is_static(&self) -> bool {
        self.is_static
    }

    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[must_use]
    pub fn params(&self) -> &[ParamType] {
        &self.params
    }

    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.annotations.iter().any(|a| a.role() == Some(role))
    }

    /// Explicit priority of the first `@Test` annotation, if one was declared
    #[must_use]
    pub fn declared_priority(&self) -> Option<i32> {
        self.annotations.iter().find_map(|a| match a {
            Annotation::Test { priority } => *priority,
            _ => None,
        })
    }

    /// Literal of the first `@CsvSource` annotation
    #[must_use]
    pub fn csv_source(&self) -> Option<&str> {
        self.annotations.iter().find_map(|a| match a {
            Annotation::CsvSource(value) => Some(value.as_str()),
            _ => None,
        })
    }
}

/// Read-only view over the methods a test unit declares
pub trait MetadataSource {
    fn unit_name(&self) -> &str;

    /// Declared methods in discovery order
    fn declared_methods(&self) -> &[Method];
}

/// Constructs unit instances and performs method calls on behalf of the runner
pub trait Invoker {
    type Instance;

    /// Zero-argument construction of the unit
    ///
    /// # Errors
    ///
    /// Returns the constructor's failure
    fn instantiate(&self) -> anyhow::Result<Self::Instance>;

    /// Call `method` with `args`. `receiver` is `None` for calls on the type itself.
    ///
    /// # Errors
    ///
    /// Returns whatever the invoked method fails with
    fn invoke(
        &self,
        method: &Method,
        receiver: Option<&mut Self::Instance>,
        args: &[Value],
    ) -> anyhow::Result<()>;
}

/// Anything the runner can run
pub trait TestUnit: MetadataSource + Invoker {}

impl<U: MetadataSource + Invoker + ?Sized> TestUnit for U {}

/// Structural problems found before any method runs
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("@{role} should only be used on static methods. Incorrect usage in the method {method}")]
    NonStaticSuiteHook { role: Role, method: String },

    #[error("@BeforeSuite annotation can only be used once")]
    DuplicateBeforeSuite { methods: Vec<String> },

    #[error("@AfterSuite annotation can only be used once")]
    DuplicateAfterSuite { methods: Vec<String> },

    #[error(
        "Priority in method {method} must be between {min} and {max}: {priority}",
        min = MIN_PRIORITY,
        max = MAX_PRIORITY
    )]
    PriorityOutOfRange { method: String, priority: i32 },

    #[error(
        "Mismatch between CSV values and method parameters for: {method} (expected {expected}, got {actual})"
    )]
    ArgumentCountMismatch {
        method: String,
        expected: usize,
        actual: usize,
    },

    #[error("Unsupported parameter type: {ty} in method {method}")]
    UnsupportedParameterType { method: String, ty: String },

    #[error("Cannot convert CSV value {literal:?} at position {index} to {ty} in method {method}")]
    InvalidLiteral {
        method: String,
        index: usize,
        literal: String,
        ty: String,
    },
}

impl ConfigError {
    /// Method the error points at, if it concerns a single method
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        match self {
            Self::NonStaticSuiteHook { method, .. }
            | Self::PriorityOutOfRange { method, .. }
            | Self::ArgumentCountMismatch { method, .. }
            | Self::UnsupportedParameterType { method, .. }
            | Self::InvalidLiteral { method, .. } => Some(method),
            Self::DuplicateBeforeSuite { .. } | Self::DuplicateAfterSuite { .. } => None,
        }
    }
}

/// Outcome of a failed run
#[derive(thiserror::Error, Debug)]
pub enum HarnessError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("failed to instantiate test unit {unit}: {cause:#}")]
    Instantiation { unit: String, cause: anyhow::Error },

    #[error("@{role} method {method} failed: {cause:#}")]
    Invocation {
        role: Role,
        method: String,
        cause: anyhow::Error,
    },
}

impl HarnessError {
    #[must_use]
    pub const fn as_config(&self) -> Option<&ConfigError> {
        match self {
            Self::Configuration(err) => Some(err),
            _ => None,
        }
    }
}
