//! Built-in test units the CLI can run by name

use anyhow::Context;
use testrig_model::{Annotation, Method, ParamType, Value};
use testrig_runner::RegisteredUnit;

pub type SampleUnit = RegisteredUnit<()>;

pub const SAMPLE_NAMES: &[&str] = &["TestClass", "MisconfiguredClass", "FailingClass"];

#[must_use]
pub fn sample(name: &str) -> Option<SampleUnit> {
    match name {
        "TestClass" => Some(test_class()),
        "MisconfiguredClass" => Some(misconfigured_class()),
        "FailingClass" => Some(failing_class()),
        _ => None,
    }
}

fn say(line: &'static str) -> impl Fn(&[Value]) -> anyhow::Result<()> {
    move |_| {
        println!("{line}");
        Ok(())
    }
}

fn say_on_instance(line: &'static str) -> impl Fn(&mut (), &[Value]) -> anyhow::Result<()> {
    move |_, _| {
        println!("{line}");
        Ok(())
    }
}

/// (int, String, int, boolean) parameter list shared by the parameterized samples
fn mixed_params(method: Method) -> Method {
    method
        .param(ParamType::Int)
        .param(ParamType::Text)
        .param(ParamType::Int)
        .param(ParamType::Boolean)
}

fn mixed_args(args: &[Value]) -> anyhow::Result<(i32, &str, i32, bool)> {
    let int_at = |i: usize| {
        args.get(i)
            .and_then(Value::as_int)
            .with_context(|| format!("argument {i} is not an int"))
    };
    let text = args
        .get(1)
        .and_then(Value::as_text)
        .context("argument 1 is not a String")?;
    let flag = args
        .get(3)
        .and_then(Value::as_bool)
        .context("argument 3 is not a boolean")?;
    Ok((int_at(0)?, text, int_at(2)?, flag))
}

fn test_class() -> SampleUnit {
    SampleUnit::with_default("TestClass")
        .static_method(
            Method::static_method("setupSuite").annotate(Annotation::BeforeSuite),
            say("----Setting up test suite static"),
        )
        .static_method(
            Method::static_method("teardownSuite").annotate(Annotation::AfterSuite),
            say("----Tearing down test suite static"),
        )
        .instance_method(
            Method::instance("beforeEachTest").annotate(Annotation::BeforeTest),
            say_on_instance("--Before test"),
        )
        .instance_method(
            Method::instance("afterEachTest").annotate(Annotation::AfterTest),
            say_on_instance("--After test"),
        )
        .instance_method(
            Method::instance("myTestPriority1").annotate(Annotation::test_priority(1)),
            say_on_instance("Running my test priority 1"),
        )
        .instance_method(
            Method::instance("myTestPriority10").annotate(Annotation::test_priority(10)),
            say_on_instance("Running my test priority 10"),
        )
        .instance_method(
            mixed_params(
                Method::instance("parameterizedTestWithPriority")
                    .annotate(Annotation::test_priority(3))
                    .annotate(Annotation::csv("5, Java, 15, false")),
            ),
            |_, args| {
                let (a, b, c, d) = mixed_args(args)?;
                println!("Running param test with priority 3. Parameters: {a} {b} {c} {d}");
                Ok(())
            },
        )
        .instance_method(
            mixed_params(
                Method::instance("parameterizedTestWithoutPriority")
                    .annotate(Annotation::test())
                    .annotate(Annotation::csv("10, Java, 20, true")),
            ),
            |_, args| {
                let (a, b, c, d) = mixed_args(args)?;
                println!("Running param test with default priority 5. Parameters: {a} {b} {c} {d}");
                Ok(())
            },
        )
        .instance_method(
            Method::instance("myTestPriority2")
                .private()
                .annotate(Annotation::test_priority(2)),
            say_on_instance("Running my test priority 2"),
        )
        .instance_method(
            Method::instance("myTestPriority3")
                .private()
                .annotate(Annotation::test_priority(3)),
            say_on_instance("Running my test priority 3"),
        )
        .instance_method(
            Method::instance("myTestPrioritySecond3")
                .private()
                .annotate(Annotation::test_priority(3)),
            say_on_instance("Running my test priority second 3"),
        )
}

fn misconfigured_class() -> SampleUnit {
    SampleUnit::with_default("MisconfiguredClass")
        .instance_method(
            Method::instance("fine").annotate(Annotation::test_priority(4)),
            say_on_instance("Running fine test"),
        )
        .instance_method(
            Method::instance("tooUrgent").annotate(Annotation::test_priority(11)),
            say_on_instance("Running too urgent test"),
        )
}

fn failing_class() -> SampleUnit {
    SampleUnit::with_default("FailingClass")
        .static_method(
            Method::static_method("setupSuite").annotate(Annotation::BeforeSuite),
            say("----Setting up failing suite"),
        )
        .static_method(
            Method::static_method("teardownSuite").annotate(Annotation::AfterSuite),
            say("----Tearing down failing suite"),
        )
        .instance_method(
            Method::instance("passes").annotate(Annotation::test_priority(10)),
            say_on_instance("Running passing test"),
        )
        .instance_method(
            Method::instance("fails").annotate(Annotation::test_priority(5)),
            |_, _| {
                println!("Running failing test");
                anyhow::bail!("expected 4 but was 5")
            },
        )
        .instance_method(
            Method::instance("neverRuns").annotate(Annotation::test_priority(1)),
            say_on_instance("Running skipped test"),
        )
}
