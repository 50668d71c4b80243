use std::{cell::RefCell, io, rc::Rc, str::FromStr};

use bigdecimal::BigDecimal;
use ghost_lang::{
    errors::{GhostError, RuntimeErrorKind},
    objects::{Object, ObjectType},
    Ghost,
};

/// A writer the test keeps a handle to after giving it to the runtime.
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn run(input: &str) -> Result<Object, GhostError> {
    Ghost::with_output(io::sink()).run(input)
}

fn run_ok(input: &str) -> Object {
    run(input).unwrap()
}

fn run_with_output(input: &str) -> (Result<Object, GhostError>, String) {
    let buffer = SharedBuffer::default();
    let mut ghost = Ghost::with_output(buffer.clone());
    let result = ghost.run(input);
    (result, buffer.contents())
}

fn runtime_error(input: &str) -> RuntimeErrorKind {
    match run(input) {
        Err(GhostError::Runtime(e)) => e.kind,
        other => panic!("expected runtime error, got {other:?}"),
    }
}

fn number(s: &str) -> Object {
    Object::Number(BigDecimal::from_str(s).unwrap())
}

#[test]
fn test_decimal_literal_is_exact() {
    assert_eq!(run_ok("0.1"), number("0.1"));
    assert_eq!(run_ok("0.1 + 0.2 == 0.3"), Object::Boolean(true));
    assert_eq!(run_ok("1e-3"), number("0.001"));
    assert_eq!(run_ok("1e20000000").to_string(), "1e+20000000");
}

#[test]
fn test_precedence() {
    assert_eq!(run_ok("1 + 2 * 3"), number("7"));
    assert_eq!(run_ok("(1 + 2) * 3"), number("9"));
    assert_eq!(run_ok("10 - 4 - 3"), number("3"));
    assert_eq!(run_ok("-2 * 3 + 10 % 4"), number("-4"));
    assert_eq!(run_ok("1 < 2 == true"), Object::Boolean(true));
}

#[test]
fn test_left_to_right_evaluation() {
    let (result, output) = run_with_output(
        r#"
        function left() { print("left") return 1 }
        function right() { print("right") return 2 }
        left() + right()
        "#,
    );
    assert_eq!(result.unwrap(), number("3"));
    assert_eq!(output, "left\nright\n");
}

#[test]
fn test_arguments_left_to_right() {
    let (result, output) = run_with_output(
        r#"
        function show(x) { print(x) return x }
        function pair(a, b) { return [a, b] }
        pair(show(1), show(2))
        "#,
    );
    assert_eq!(result.unwrap().to_string(), "[1, 2]");
    assert_eq!(output, "1\n2\n");
}

#[test]
fn test_counter_closure() {
    let value = run_ok(
        r#"
        function counter() {
            count := 0
            return function() {
                count := count + 1
                return count
            }
        }
        next := counter()
        next()
        next()
        "#,
    );
    assert_eq!(value, number("2"));
}

#[test]
fn test_independent_closures() {
    let value = run_ok(
        r#"
        function counter() {
            count := 0
            return function() { count = count + 1 return count }
        }
        a := counter()
        b := counter()
        a() a() b()
        pair := [a(), b()]
        pair
        "#,
    );
    assert_eq!(value.to_string(), "[3, 2]");
}

#[test]
fn test_default_evaluated_at_call_time() {
    let value = run_ok(
        r#"
        base := 1
        function add(a, b = base) { return a + b }
        first := add(10)
        base := 5
        result := [first, add(10), add(10, 0)]
        result
        "#,
    );
    assert_eq!(value.to_string(), "[11, 15, 10]");
}

#[test]
fn test_default_sees_earlier_parameters() {
    assert_eq!(
        run_ok("function f(a, b = a * 2) { return b } f(4)"),
        number("8")
    );
}

#[test]
fn test_missing_and_surplus_arguments() {
    assert_eq!(
        runtime_error("function f(a, b) { return a } f(1)"),
        RuntimeErrorKind::MissingArgument("b".into())
    );
    assert_eq!(
        runtime_error("function f(a) { return a } f(1, 2)"),
        RuntimeErrorKind::TooManyArguments {
            expected: 1,
            given: 2
        }
    );
}

#[test]
fn test_property_access_asymmetry() {
    let error = runtime_error(
        r#"
        class Point {
            function constructor(x) { this.x = x }
        }
        p := Point(1)
        p.z
        "#,
    );
    assert_eq!(error.to_string(), "unknown property: Point.z");

    assert_eq!(run_ok(r#"m := {"a": 1} m.b"#), Object::Null);
    assert_eq!(run_ok(r#"m := {"a": 1} m.a"#), number("1"));
}

#[test]
fn test_type_mismatch_message() {
    let error = run(r#"5 + "a""#).unwrap_err();
    assert_eq!(
        error.to_string(),
        "1:3: runtime error: type mismatch: NUMBER + STRING"
    );

    let mut ghost = Ghost::with_output(io::sink());
    ghost.set_file("main.ghost");
    assert_eq!(
        ghost.run("x := 1\nx + true").unwrap_err().to_string(),
        "2:3:main.ghost: runtime error: type mismatch: NUMBER + BOOLEAN"
    );
    assert_eq!(
        runtime_error("true + false"),
        RuntimeErrorKind::UnknownOperator {
            left: ObjectType::Boolean,
            operator: "+",
            right: ObjectType::Boolean,
        }
    );
    assert_eq!(
        runtime_error("-true"),
        RuntimeErrorKind::PrefixTypeMismatch {
            operator: "-",
            right: ObjectType::Boolean,
        }
    );
}

#[test]
fn test_assignment_mutates_outer_scope() {
    let value = run_ok(
        r#"
        total := 0
        function add(n) { total := total + n }
        add(2)
        add(3)
        total
        "#,
    );
    assert_eq!(value, number("5"));
}

#[test]
fn test_assignment_creates_local() {
    let error = runtime_error(
        r#"
        function f() { local := 1 }
        f()
        local
        "#,
    );
    assert_eq!(error, RuntimeErrorKind::UndefinedVariable("local".into()));
}

#[test]
fn test_function_declaration_and_expression() {
    assert_eq!(run_ok("function f() { return 1 }"), Object::Null);
    assert!(matches!(run_ok("function () { 1 }"), Object::Closure(_)));
    assert_eq!(run_ok("function () { return 4 }()"), number("4"));
    assert_eq!(run_ok("function f() { 1 } f()"), Object::Null);
}

#[test]
fn test_return_stops_body() {
    let (result, output) = run_with_output(
        r#"
        function f(n) {
            while (true) {
                if (n > 3) { return n }
                n := n + 1
            }
            print("unreachable")
        }
        f(0)
        "#,
    );
    assert_eq!(result.unwrap(), number("4"));
    assert_eq!(output, "");
}

#[test]
fn test_control_flow() {
    let value = run_ok(
        r#"
        sum := 0
        i := 1
        while (i <= 10) {
            if (i % 2 == 0) {
                sum := sum + i
            } else if (i == 5) {
                sum := sum + 100
            }
            i := i + 1
        }
        sum
        "#,
    );
    assert_eq!(value, number("130"));
    assert_eq!(run_ok("if (null) { 1 } else { 2 }"), number("2"));
    assert_eq!(run_ok("if (0) { 1 } else { 2 }"), number("1"));
}

#[test]
fn test_classes_and_inheritance() {
    let (result, output) = run_with_output(
        r#"
        class Animal {
            function constructor(name) { this.name = name }
            function speak() { return this.name + " makes a sound" }
            function describe() { return "I am " + this.name }
        }
        class Dog extends Animal {
            function speak() { return this.name + " barks" }
        }
        dog := Dog("Rex")
        print(dog.speak())
        print(dog.describe())
        dog.name = "Max"
        dog.speak()
        "#,
    );
    assert_eq!(result.unwrap(), Object::from("Max barks"));
    assert_eq!(output, "Rex barks\nI am Rex\n");
}

#[test]
fn test_class_without_constructor() {
    assert_eq!(run_ok("class Empty {} type(Empty())"), Object::from("INSTANCE"));
    assert_eq!(
        runtime_error("class Empty {} Empty(1)"),
        RuntimeErrorKind::NoConstructor("Empty".into())
    );
    assert_eq!(
        runtime_error("x := 1 class A extends x {}"),
        RuntimeErrorKind::InvalidSuperclass(ObjectType::Number)
    );
}

#[test]
fn test_property_assign_only_on_instances() {
    assert_eq!(
        runtime_error(r#"m := {} m.a = 1"#),
        RuntimeErrorKind::PropertyAssignNotSupported(ObjectType::Map)
    );
}

#[test]
fn test_lists_maps_and_ranges() {
    assert_eq!(run_ok("[1, 2, 3][1]"), number("2"));
    assert_eq!(run_ok("[1, 2, 3][5]"), Object::Null);
    assert_eq!(run_ok(r#"{"a": 1, 2: "two"}[2]"#), Object::from("two"));
    assert_eq!(run_ok(r#"{"a": 1}["b"]"#), Object::Null);
    assert_eq!(run_ok("len(1 .. 4)"), number("4"));
    assert_eq!(run_ok("(3 .. 1)").to_string(), "[3, 2, 1]");
    assert_eq!(
        runtime_error("{[1]: 2}"),
        RuntimeErrorKind::UnusableMapKey(ObjectType::List)
    );
}

#[test]
fn test_oversized_range_is_an_error() {
    assert_eq!(
        runtime_error("x := 1 .. 1000000000000 len(x)"),
        RuntimeErrorKind::RangeTooLarge(1 << 24)
    );
    let mut ghost = Ghost::with_output(io::sink());
    assert!(ghost.run("x := 1 .. 1000000000000").is_err());
    assert_eq!(ghost.run("len(1 .. 1000)").unwrap(), number("1000"));
}

#[test]
fn test_division_by_zero() {
    assert_eq!(runtime_error("1 / 0"), RuntimeErrorKind::DivisionByZero);
    assert_eq!(runtime_error("1 % 0"), RuntimeErrorKind::ModuloByZero);
}

#[test]
fn test_library_modules() {
    assert_eq!(run_ok("math.abs(-3)"), number("3"));
    assert_eq!(run_ok("math.max(2, 7)"), number("7"));
    assert_eq!(run_ok("math.round(2.6)"), number("3"));
    assert_eq!(run_ok("math.pi > 3.14"), Object::Boolean(true));
    assert_eq!(
        runtime_error("math.nope"),
        RuntimeErrorKind::UnknownProperty {
            receiver: "math".into(),
            property: "nope".into(),
        }
    );
    assert_eq!(
        run_ok("ghost.version"),
        Object::from(env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_directory() {
    let mut ghost = Ghost::with_output(io::sink());
    assert_eq!(ghost.run("ghost.directory").unwrap(), Object::Null);
    ghost.set_directory("/srv/scripts");
    assert_eq!(
        ghost.run("ghost.directory").unwrap(),
        Object::from("/srv/scripts")
    );
}

#[test]
fn test_builtins() {
    let (result, output) = run_with_output(r#"print("a", 1, true, null, [1, "b"])"#);
    assert_eq!(result.unwrap(), Object::Null);
    assert_eq!(output, "a 1 true null [1, b]\n");
    assert_eq!(run_ok(r#"type("x")"#), Object::from("STRING"));
    assert_eq!(run_ok("type(print)"), Object::from("FUNCTION"));
    assert_eq!(run_ok(r#"len("ghost")"#), number("5"));
}

#[test]
fn test_execute_and_eval_line() {
    let mut ghost = Ghost::with_output(io::sink());
    ghost.set_source("x := 2 x * 21");
    assert_eq!(ghost.execute(), Some(number("42")));

    ghost.set_source("x := (1");
    assert_eq!(ghost.execute(), None);

    assert_eq!(ghost.eval_line("y := x + 1"), (Some(Object::Null), true));
    assert_eq!(ghost.eval_line("y"), (Some(number("3")), true));
    assert_eq!(ghost.eval_line("z := 1 undefined z := 2"), (None, false));
    assert_eq!(ghost.eval_line("z"), (Some(number("1")), true));
}

#[test]
fn test_syntax_errors_skip_evaluation() {
    let (result, output) = run_with_output("print(1)\nx := (1");
    assert!(matches!(result, Err(GhostError::Syntax(ref errors)) if errors.len() == 1));
    assert_eq!(output, "");
}
