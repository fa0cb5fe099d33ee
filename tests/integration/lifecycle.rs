//! Integration tests for validation and lifecycle ordering
//! Every method of the units below records its invocation in a shared log

use std::cell::RefCell;
use std::rc::Rc;

use testrig::{
    Annotation, ConfigError, HarnessError, Method, ParamType, RegisteredUnit, Role, Runner,
    RunnerOptions, Value, run_tests,
};

type Log = Rc<RefCell<Vec<String>>>;

fn entry(name: &str, args: &[Value]) -> String {
    if args.is_empty() {
        return name.to_string();
    }
    let rendered: Vec<String> = args.iter().map(|a| format!("{a:?}")).collect();
    format!("{name}({})", rendered.join(", "))
}

fn recording_unit(log: &Log, methods: Vec<Method>) -> RegisteredUnit<()> {
    methods
        .into_iter()
        .fold(RegisteredUnit::<()>::with_default("Recorded"), |unit, method| {
            let log = log.clone();
            let name = method.name().to_string();
            if method.is_static() {
                unit.static_method(method, move |args| {
                    log.borrow_mut().push(entry(&name, args));
                    Ok(())
                })
            } else {
                unit.instance_method(method, move |_, args| {
                    log.borrow_mut().push(entry(&name, args));
                    Ok(())
                })
            }
        })
}

fn test(name: &str, priority: i32) -> Method {
    Method::instance(name).annotate(Annotation::test_priority(priority))
}

#[test]
fn test_full_lifecycle_scenario() {
    let log = Log::default();
    let unit = recording_unit(
        &log,
        vec![
            Method::static_method("beforeSuite").annotate(Annotation::BeforeSuite),
            Method::static_method("afterSuite").annotate(Annotation::AfterSuite),
            Method::instance("beforeTest").annotate(Annotation::BeforeTest),
            Method::instance("afterTest").annotate(Annotation::AfterTest),
            test("one", 1),
            test("ten", 10),
        ],
    );

    run_tests(&unit).unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            "beforeSuite",
            "beforeTest",
            "ten",
            "afterTest",
            "beforeTest",
            "one",
            "afterTest",
            "afterSuite",
        ]
    );
}

#[test]
fn test_duplicate_before_suite_invokes_nothing() {
    let log = Log::default();
    let unit = recording_unit(
        &log,
        vec![
            Method::static_method("first").annotate(Annotation::BeforeSuite),
            Method::static_method("second").annotate(Annotation::BeforeSuite),
            test("t", 5),
        ],
    );

    let err = run_tests(&unit).unwrap_err();
    assert_eq!(
        err.as_config(),
        Some(&ConfigError::DuplicateBeforeSuite {
            methods: vec!["first".to_string(), "second".to_string()],
        })
    );
    assert_eq!(err.to_string(), "configuration error: @BeforeSuite annotation can only be used once");
    assert!(log.borrow().is_empty());
}

#[test]
fn test_duplicate_after_suite_has_its_own_message() {
    let log = Log::default();
    let unit = recording_unit(
        &log,
        vec![
            Method::static_method("first").annotate(Annotation::AfterSuite),
            Method::static_method("second").annotate(Annotation::AfterSuite),
        ],
    );

    let err = run_tests(&unit).unwrap_err();
    assert!(err.to_string().contains("@AfterSuite annotation can only be used once"));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_non_static_before_suite_rejected() {
    let log = Log::default();
    let unit = recording_unit(
        &log,
        vec![
            Method::instance("setup").annotate(Annotation::BeforeSuite),
            test("t", 5),
        ],
    );

    let err = run_tests(&unit).unwrap_err();
    assert_eq!(
        err.as_config(),
        Some(&ConfigError::NonStaticSuiteHook {
            role: Role::BeforeSuite,
            method: "setup".to_string(),
        })
    );
    assert!(log.borrow().is_empty());
}

#[test]
fn test_out_of_range_priority_blocks_valid_tests() {
    let log = Log::default();
    let unit = recording_unit(&log, vec![test("valid", 7), test("invalid", 0), test("other", 3)]);

    let err = run_tests(&unit).unwrap_err();
    let config = err.as_config().unwrap();
    assert_eq!(config.method(), Some("invalid"));
    assert!(err.to_string().contains("Priority in method invalid must be between 1 and 10: 0"));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_priority_order_with_ties() {
    let log = Log::default();
    let unit = recording_unit(&log, vec![test("A", 3), test("B", 10), test("C", 1), test("D", 3)]);

    run_tests(&unit).unwrap();
    assert_eq!(*log.borrow(), vec!["B", "A", "D", "C"]);
}

#[test]
fn test_default_priority_runs_between_ten_and_one() {
    let log = Log::default();
    let unit = recording_unit(
        &log,
        vec![
            test("one", 1),
            Method::instance("unprioritized").annotate(Annotation::test()),
            test("ten", 10),
        ],
    );

    run_tests(&unit).unwrap();
    assert_eq!(*log.borrow(), vec!["ten", "unprioritized", "one"]);
}

#[test]
fn test_csv_arguments_bound_in_order() {
    let log = Log::default();
    let unit = recording_unit(
        &log,
        vec![test("param", 3)
            .annotate(Annotation::csv("5, Java, 15, false"))
            .param(ParamType::Int)
            .param(ParamType::Text)
            .param(ParamType::Int)
            .param(ParamType::Boolean)],
    );

    run_tests(&unit).unwrap();
    assert_eq!(
        *log.borrow(),
        vec![r#"param(Int(5), Text("Java"), Int(15), Bool(false))"#]
    );
}

#[test]
fn test_csv_count_mismatch_invokes_nothing() {
    let log = Log::default();
    let unit = recording_unit(
        &log,
        vec![
            Method::static_method("setup").annotate(Annotation::BeforeSuite),
            test("param", 3)
                .annotate(Annotation::csv("5, Java, 15"))
                .param(ParamType::Int)
                .param(ParamType::Text)
                .param(ParamType::Int)
                .param(ParamType::Boolean),
        ],
    );

    let err = run_tests(&unit).unwrap_err();
    assert!(matches!(
        err,
        HarnessError::Configuration(ConfigError::ArgumentCountMismatch {
            expected: 4,
            actual: 3,
            ..
        })
    ));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_trimmed_csv_fields() {
    let log = Log::default();
    let unit = recording_unit(
        &log,
        vec![test("padded", 2)
            .annotate(Annotation::csv(" 7 , x "))
            .param(ParamType::Long)
            .param(ParamType::Text)],
    );

    assert!(run_tests(&unit).is_err());
    assert!(log.borrow().is_empty());

    let runner = Runner::new(RunnerOptions {
        trim_csv_fields: true,
        ..RunnerOptions::default()
    });
    runner.run(&unit).unwrap();
    assert_eq!(*log.borrow(), vec![r#"padded(Long(7), Text("x"))"#]);
}

#[test]
fn test_repeated_runs_are_identical() {
    let log = Log::default();
    let unit = recording_unit(
        &log,
        vec![
            Method::instance("before").annotate(Annotation::BeforeTest),
            test("x", 4),
            test("y", 9),
            test("z", 4),
        ],
    );

    run_tests(&unit).unwrap();
    let first = log.borrow_mut().drain(..).collect::<Vec<_>>();
    run_tests(&unit).unwrap();
    let second = log.borrow().clone();

    assert_eq!(first, second);
    assert_eq!(first, vec!["before", "y", "before", "x", "before", "z"]);
}

#[test]
fn test_hook_failure_aborts_run() {
    let log = Log::default();
    let l = log.clone();
    let unit = recording_unit(
        &log,
        vec![
            Method::static_method("afterSuite").annotate(Annotation::AfterSuite),
            test("first", 9),
            test("second", 1),
        ],
    )
    .instance_method(
        Method::instance("afterTest").annotate(Annotation::AfterTest),
        move |_, _| {
            l.borrow_mut().push("afterTest".to_string());
            anyhow::bail!("cleanup broke")
        },
    );

    let err = run_tests(&unit).unwrap_err();
    assert!(matches!(
        err,
        HarnessError::Invocation { role: Role::AfterTest, ref method, .. } if method == "afterTest"
    ));
    assert_eq!(*log.borrow(), vec!["first", "afterTest"]);
}
