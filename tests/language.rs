use std::fs;

use moss::{
    Value,
    error::{Error, RuntimeErrorKind},
    get_result,
    interpreter::{evaluator::core::Interpreter, lexer::Token, lexer::tokenize},
    run,
    span::Source,
};
use walkdir::WalkDir;

fn assert_success(src: &str) {
    if let Err(e) = get_result(src, false) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if get_result(src, false).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

fn eval_source(src: &str) -> Result<Option<Value>, Error> {
    let source = Source::new("<test>", src);
    let mut interpreter = Interpreter::new();
    run(&source, &mut interpreter)
}

#[test]
fn demo_scripts_work() {
    let mut count = 0;

    for entry in WalkDir::new("scripts").into_iter()
                                        .filter_map(Result::ok)
                                        .filter(|e| {
                                            e.path().extension().is_some_and(|ext| ext == "moss")
                                        })
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = get_result(&content, false) {
            panic!("Demo script {path:?} failed: {e}");
        }
    }

    assert!(count > 0, "No demo scripts found in scripts/");
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_success("var x = 1 + 2\nassert(x == 3)");
    assert_success("var x = 7 * 9\nassert(x == 63)");
    assert_success("var x = 8 - 5\nassert(x == 3)");
    assert_success("var x = 10 / 2\nassert(x == 5.0)");
    assert_success("var x = 10 // 3\nassert(x == 3)");
    assert_success("var x = 10 % 3\nassert(x == 1)");
}

#[test]
fn precedence_is_respected() {
    assert_success("assert(1 + 2 * 3 == 7)");
    assert_success("assert((1 + 2) * 3 == 9)");
    assert_success("assert(2 ** 3 ** 2 == 512)");
    assert_success("assert(-2 ** 2 == -4)");
    assert_success("assert(2 ** -1 == 0.5)");
    assert_success("assert(!(1 == 2))");
}

#[test]
fn integer_and_float_identity_is_preserved() {
    let source = Source::new("<test>", "3 3.0");
    let tokens = tokenize(&source).unwrap();

    assert_eq!(tokens[0].0, Token::Int(3));
    assert_eq!(tokens[1].0, Token::Float(3.0));

    assert_success("assert(is_int(3))\nassert(is_float(3.0))");
    assert_success("assert(is_float(10 / 2))");
    assert_success("assert(is_int(10 // 2))");
}

#[test]
fn floored_division_and_modulo() {
    assert_success("assert(-7 // 2 == -4)");
    assert_success("assert(7 // -2 == -4)");
    assert_success("assert(-7 % 2 == 1)");
    assert_success("assert(7 % -2 == -1)");
}

#[test]
fn compound_assignments_desugar() {
    assert_success("var x = 2\nvar x += 3\nassert(x == 5)");
    assert_success("var x = 7\nx -= 2\nassert(x == 5)");
    assert_success("var x = 4\nx *= 2\nassert(x == 8)");
    assert_success("var x = 9\nx /= 3\nassert(x == 3.0)");
    assert_success("var x = 1\nx ++\nassert(x == 2)");
    assert_success("var x = 1\nx --\nassert(x == 0)");
}

#[test]
fn while_loop_counts_down() {
    assert_success("var x = 5 while x > 0 { x = x - 1 }\nassert(x == 0)");
}

#[test]
fn loops_accumulate_their_body_values() {
    assert_success("var r = for i = 1 to 4 { i * i }\nassert(len(r) == 3)\nassert(r[2] == 9)");
    assert_success("var r = while false { 1 }\nassert(len(r) == 0)");
    assert_success("var r = for c in 'abc' { c }\nassert(len(r) == 3)\nassert(r[0] == 'a')");
}

#[test]
fn counted_loop_runs_downhill_without_a_step() {
    assert_success("var r = for i = 5 to 1 { i }\nassert(len(r) == 4)\nassert(r[0] == 5)");
    assert_success("var r = for i = 0 to 10 step 3 { i }\nassert(len(r) == 4)\nassert(r[3] == 9)");
}

#[test]
fn break_and_continue() {
    assert_success("var r = for i = 1 to 10 {\n    if i == 3 { break }\n    i\n}\nassert(len(r) == 2)");
    assert_success("var r = for i = 1 to 6 {\n    if i % 2 == 0 { continue }\n    i\n}\nassert(len(r) == 3)\nassert(r[2] == 5)");
    assert_failure("break");
    assert_failure("continue");
    assert_failure("return 1");
}

#[test]
fn division_by_zero_is_a_diagnostic_not_a_crash() {
    assert_failure("5 / 0");
    assert_failure("5 % 0");
    assert_failure("5 // 0");
    assert_failure("5.0 / 0.0");

    let error = eval_source("5 / 0").unwrap_err();
    assert!(matches!(error,
                     Error::Runtime(ref e) if e.kind == RuntimeErrorKind::DivisionByZero));
}

#[test]
fn runaway_loops_hit_the_iteration_cap() {
    let error = eval_source("while true { 1 }").unwrap_err();
    assert!(matches!(error,
                     Error::Runtime(ref e)
                     if matches!(e.kind, RuntimeErrorKind::IterationLimitExceeded { .. })));

    assert_failure("for i = 1 to 5 step 0 { i }");
}

#[test]
fn copy_on_read_isolates_bindings() {
    assert_success("var a = [1]\nvar b = a\nvar b = append(b, 2)\nassert(len(a) == 1)\nassert(len(b) == 2)");
    assert_success("var a = [1, 2]\nvar b = pop(a, 0)\nassert(b == 1)\nassert(len(a) == 2)");
}

#[test]
fn user_defined_functions_and_calls() {
    assert_success("func square(x): x * x\nassert(square(3) == 9)");
    assert_success("func add(a, b): a + b\nassert(add(2, 5) == 7)");
    assert_success("var double = func(x): x * 2\nassert(double(21) == 42)");
}

#[test]
fn block_bodies_return_only_explicitly() {
    assert_success("func noisy(x) { x * 2 }\nassert(noisy(21) == null)");
    assert_success("func loud(x) { return x * 2 }\nassert(loud(21) == 42)");
    assert_success("func nothing() { return }\nassert(nothing() == null)");
}

#[test]
fn closures_capture_the_defining_scope() {
    assert_success("func make_adder(n) {\n    return func(x): x + n\n}\nvar add2 = make_adder(2)\nassert(add2(40) == 42)");
}

#[test]
fn parameter_defaults_fill_the_tail() {
    assert_success("func greet(name, suffix = '!'): name + suffix\nassert(greet('hi') == 'hi!')\nassert(greet('hi', '?') == 'hi?')");
    // Defaults are computed once, at definition time, in the defining
    // scope.
    assert_success("var base = 10\nfunc offset(x, delta = base): x + delta\nvar base = 0\nassert(offset(1) == 11)");
    assert_failure("func bad(a = 1, b): a + b");
}

#[test]
fn argument_count_mismatches_name_the_function() {
    assert_failure("func add(a, b): a + b\nadd(1)");
    assert_failure("func add(a, b): a + b\nadd(1, 2, 3)");

    let error = eval_source("func add(a, b): a + b\nadd(1)").unwrap_err();
    assert!(matches!(error,
                     Error::Runtime(ref e)
                     if matches!(&e.kind,
                                 RuntimeErrorKind::TooFewArguments { name, needed: 2, given: 1 }
                                 if name == "add")));
}

#[test]
fn recursion_works_and_is_bounded() {
    assert_success("func fib(n) {\n    if n < 2 { return n }\n    return fib(n - 1) + fib(n - 2)\n}\nassert(fib(10) == 55)");

    let error = eval_source("func f(n): f(n + 1)\nf(0)").unwrap_err();
    assert!(matches!(error,
                     Error::Runtime(ref e)
                     if matches!(e.kind, RuntimeErrorKind::RecursionLimitExceeded { .. })));
}

#[test]
fn lists_index_and_slice() {
    assert_success("var a = [1, 2, 3]\nassert(a[0] == 1)\nassert(a[-1] == 3)");
    assert_success("var a = [1, 2, 3][1:]\nassert(len(a) == 2)\nassert(a[0] == 2)\nassert(a[1] == 3)");
    assert_success("var a = [1, 2, 3]\nassert(len(a[:2]) == 2)\nassert(len(a[:]) == 3)");
    // Slice bounds clamp; single-element indexing does not.
    assert_success("assert(len([1, 2, 3][1:10]) == 2)");
    assert_failure("[1, 2, 3][5]");
    assert_failure("[1, 2, 3][-4]");
}

#[test]
fn strings_index_slice_and_repeat() {
    assert_success("assert('hello'[1] == 'e')");
    assert_success("assert('hello'[-1] == 'o')");
    assert_success("assert('hello'[1:3] == 'el')");
    assert_success("assert('hello'[:] == 'hello')");
    assert_success("assert('ab' + 'cd' == 'abcd')");
    assert_success("assert('ab' * 3 == 'ababab')");
    assert_failure("'hello'[10]");
}

#[test]
fn string_interpolation_reinvokes_the_pipeline() {
    assert_success("var x = 6\nassert('{x * 7}' == '42')");
    assert_success("var who = 'world'\nassert('hello, {who}!' == 'hello, world!')");
    assert_success("assert(len('{{literal}}') == 9)");
    assert_failure("'{1 +'");
    assert_failure("'{never_closed'");
    assert_failure("'closed never}'");

    let error = eval_source("'{1 +'").unwrap_err();
    assert!(matches!(error,
                     Error::Runtime(ref e)
                     if matches!(e.kind, RuntimeErrorKind::InvalidInterpolation { .. })));
}

#[test]
fn conditionals_are_expressions() {
    assert_success("var x = if 2 < 3 { 7 } else { 11 }\nassert(x == 7)");
    assert_success("var x = if false { 1 } elif true { 2 } else { 3 }\nassert(x == 2)");
    assert_success("var x = if false { 1 }\nassert(x == null)");
}

#[test]
fn logic_and_truthiness() {
    assert_success("assert(true && true)");
    assert_success("assert(!(true && false))");
    assert_success("assert(false || true)");
    assert_success("assert(!false)");
    assert_success("assert(null == null)");
    assert_success("assert(!(null && true))");
    assert_success("assert(1 && 2)");
    assert_success("if '' { assert(false) }");
    assert_success("if [] { assert(false) }");
}

#[test]
fn illegal_operations_are_rejected_predictably() {
    assert_failure("1 + 'a'");
    assert_failure("1 == 'a'");
    assert_failure("'a' && 'b'");
    assert_failure("[1] == [1]");
    assert_failure("-'a'");
    assert_failure("3(1)");
    assert_failure("undefined_variable");
}

#[test]
fn lexical_errors_are_fatal() {
    assert_failure("1 $ 2");
    assert_failure("1 & 2");
    assert_failure("1 | 2");
    assert_failure("'never closed");
    assert_failure("/* never closed");
}

#[test]
fn syntax_errors_are_fatal() {
    assert_failure("var = 1");
    assert_failure("(1 + 2");
    assert_failure("[1, 2");
    assert_failure("if { 1 }");
    assert_failure("func f(a,): a");
    assert_failure("for x { 1 }");
}

#[test]
fn evaluation_is_deterministic() {
    let first = eval_source("1 + 2 * 3").unwrap();
    let second = eval_source("1 + 2 * 3").unwrap();

    assert_eq!(first, second);
    assert_eq!(first, Some(Value::Int(7)));
}

#[test]
fn runtime_errors_carry_a_traceback() {
    let error = eval_source("func f(): 1 / 0\nf()").unwrap_err();
    let Error::Runtime(error) = error else {
        panic!("expected a runtime error");
    };

    assert_eq!(error.trace.len(), 2);
    assert_eq!(error.trace[0].name, "<program>");
    assert_eq!(error.trace[1].name, "f");

    let source = Source::new("<test>", "func f(): 1 / 0\nf()");
    let rendered = error.render(&source);
    assert!(rendered.contains("Traceback (most recent call last):"));
    assert!(rendered.contains("in f"));
    assert!(rendered.contains("Division by zero"));
    assert!(rendered.contains('^'));
}

#[test]
fn builtin_catalog_behaves() {
    assert_success("assert(len('hello') == 5)");
    assert_success("assert(len([1, 2, 3]) == 3)");
    assert_success("assert(sqrt(9) == 3.0)");
    assert_success("assert(sum([1, 2, 3, 4]) == 10)");
    assert_success("assert(string(42) == '42')");
    assert_success("assert(int('42') == 42)");
    assert_success("assert(int(3.9) == 3)");
    assert_success("assert(float(3) == 3.0)");
    assert_success("assert(is_string('a'))");
    assert_success("assert(is_list([]))");
    assert_success("func f(): 1\nassert(is_function(f))");
    assert_success("assert(is_function(print))");
    assert_success("var a = extend([1], [2, 3])\nassert(len(a) == 3)");
    assert_success("var a = [1, 2, 3]\nassert(pop(a) == 3)");
    assert_failure("sqrt(-1)");
    assert_failure("len(1)");
    assert_failure("int('abc')");
    assert_failure("sum([1, 'a'])");
    assert_failure("assert(false)");
}
