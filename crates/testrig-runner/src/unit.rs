//! Closure-backed test units
//!
//! [`RegisteredUnit`] pairs each method descriptor with a Rust closure, which is
//! how units are declared without runtime reflection.

use testrig_model::{Invoker, Method, MetadataSource, Value};

type Constructor<T> = Box<dyn Fn() -> anyhow::Result<T>>;
type StaticBody = Box<dyn Fn(&[Value]) -> anyhow::Result<()>>;
type InstanceBody<T> = Box<dyn Fn(&mut T, &[Value]) -> anyhow::Result<()>>;

enum Body<T> {
    Static(StaticBody),
    Instance(InstanceBody<T>),
}

/// Failures raised by the unit itself rather than by a method body
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum UnitError {
    #[error("unit {unit} declares no method named {method}")]
    UnknownMethod { unit: String, method: String },

    #[error("method {method} needs an instance but was called on the type")]
    MissingReceiver { method: String },

    #[error("unit {unit} declares {count} methods named {method} and none matches the called descriptor")]
    AmbiguousMethod {
        unit: String,
        method: String,
        count: usize,
    },
}

/// Test unit assembled from method descriptors and closures
pub struct RegisteredUnit<T> {
    name: String,
    constructor: Constructor<T>,
    methods: Vec<Method>,
    bodies: Vec<Body<T>>,
}

impl<T> RegisteredUnit<T> {
    #[must_use]
    pub fn new<F>(name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn() -> anyhow::Result<T> + 'static,
    {
        Self {
            name: name.into(),
            constructor: Box::new(constructor),
            methods: Vec::new(),
            bodies: Vec::new(),
        }
    }

    /// Register a body that runs without an instance
    ///
    /// The descriptor is taken as declared; registering a static body does not
    /// make the descriptor static.
    #[must_use]
    pub fn static_method<F>(mut self, method: Method, body: F) -> Self
    where
        F: Fn(&[Value]) -> anyhow::Result<()> + 'static,
    {
        self.methods.push(method);
        self.bodies.push(Body::Static(Box::new(body)));
        self
    }

    /// Register a body that runs on the unit instance
    #[must_use]
    pub fn instance_method<F>(mut self, method: Method, body: F) -> Self
    where
        F: Fn(&mut T, &[Value]) -> anyhow::Result<()> + 'static,
    {
        self.methods.push(method);
        self.bodies.push(Body::Instance(Box::new(body)));
        self
    }
}

impl<T> RegisteredUnit<T> {
    /// Body registered for `method`
    ///
    /// The descriptor itself is looked up first, then an equal descriptor, so
    /// methods sharing a name keep their own bodies. A bare name is accepted
    /// only when it is unique.
    fn body_index(&self, method: &Method) -> Result<usize, UnitError> {
        if let Some(index) = self
            .methods
            .iter()
            .position(|m| std::ptr::eq(m, method))
            .or_else(|| self.methods.iter().position(|m| m == method))
        {
            return Ok(index);
        }

        let mut named = self
            .methods
            .iter()
            .enumerate()
            .filter(|(_, m)| m.name() == method.name())
            .map(|(index, _)| index);
        match (named.next(), named.count()) {
            (Some(index), 0) => Ok(index),
            (Some(_), others) => Err(UnitError::AmbiguousMethod {
                unit: self.name.clone(),
                method: method.name().to_string(),
                count: others + 1,
            }),
            (None, _) => Err(UnitError::UnknownMethod {
                unit: self.name.clone(),
                method: method.name().to_string(),
            }),
        }
    }
}

impl<T: Default + 'static> RegisteredUnit<T> {
    /// Unit whose instances come from `T::default()`
    #[must_use]
    pub fn with_default(name: impl Into<String>) -> Self {
        Self::new(name, || Ok(T::default()))
    }
}

impl<T> MetadataSource for RegisteredUnit<T> {
    fn unit_name(&self) -> &str {
        &self.name
    }

    fn declared_methods(&self) -> &[Method] {
        &self.methods
    }
}

impl<T> Invoker for RegisteredUnit<T> {
    type Instance = T;

    fn instantiate(&self) -> anyhow::Result<T> {
        (self.constructor)()
    }

    fn invoke(&self, method: &Method, receiver: Option<&mut T>, args: &[Value]) -> anyhow::Result<()> {
        let index = self.body_index(method)?;

        match (&self.bodies[index], receiver) {
            (Body::Static(body), _) => body(args),
            (Body::Instance(body), Some(instance)) => body(instance, args),
            (Body::Instance(_), None) => Err(UnitError::MissingReceiver {
                method: method.name().to_string(),
            }
            .into()),
        }
    }
}
