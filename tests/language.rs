use rpal::get_result;

fn run(src: &str) -> Result<String, String> {
    let mut out = Vec::new();
    match get_result(src, &mut out) {
        Ok(()) => Ok(String::from_utf8(out).expect("program output is UTF-8")),
        Err(e) => Err(e.to_string()),
    }
}

fn assert_output(src: &str, expected: &str) {
    match run(src) {
        Ok(output) => assert_eq!(output, expected, "program:\n{src}"),
        Err(e) => panic!("Script failed: {e}\nprogram:\n{src}"),
    }
}

fn assert_failure(src: &str) {
    if run(src).is_ok() {
        panic!("Script succeeded but was expected to fail:\n{src}")
    }
}

#[test]
fn let_bindings_and_arithmetic() {
    assert_output("let x = 5 in let y = 10 in Print(x + y)", "15\n");
    assert_output("let x = 2 * 3 + 4 in Print(x)", "10\n");
    assert_output("Print(10 - 2 - 3)", "5\n");
    assert_output("Print(7 / 2)", "3\n");
    assert_output("Print(-5 + 3)", "-2\n");
}

#[test]
fn exponentiation_is_right_associative() {
    assert_output("Print(2 ** 3 ** 2)", "512\n");
    assert_output("Print((2 ** 3) ** 2)", "64\n");
}

#[test]
fn recursion_through_the_fixed_point_rule() {
    assert_output("rec factorial n = n eq 0 -> 1 | n * factorial (n - 1) in \
                   Print(factorial 5)",
                  "120\n");
    assert_output("let rec fib n = n ls 2 -> n | fib (n - 1) + fib (n - 2) in Print(fib 10)",
                  "55\n");
}

#[test]
fn tuples_and_order() {
    assert_output("let tuple = (1, 2, 3) in Print(Order tuple)", "3\n");
    assert_output("Print(Order nil)", "0\n");
    assert_output("Print((1, 'two', true))", "(1, two, true)\n");
    assert_output("Print(((1, 2), 3))", "((1, 2), 3)\n");
}

#[test]
fn tuple_selection_is_one_indexed() {
    assert_output("let t = (1, 2, 3) in Print(t 2)", "2\n");
    assert_output("let t = ('a', 'b') in Print(t 1)", "a\n");
    assert_failure("let t = (1, 2) in Print(t 0)");
    assert_failure("let t = (1, 2) in Print(t 5)");
}

#[test]
fn augmentation_extends_on_the_right() {
    assert_output("Print(nil aug 1 aug 2)", "(1, 2)\n");
    assert_output("let t = (1, 2) in Print(t aug 3)", "(1, 2, 3)\n");
    assert_failure("Print(1 aug 2)");
}

#[test]
fn chained_where_definitions() {
    assert_output("Print(sqr_sum) where sqr_sum = x**2 + y**2 where x = 3 where y = 4",
                  "25\n");
    assert_output("Print(x + y) where x = 1 where y = 2", "3\n");
}

#[test]
fn simultaneous_definitions() {
    assert_output("let x = 1 and y = 2 and z = 3 in Print((x, y, z))", "(1, 2, 3)\n");
    assert_output("let x = 1 and y = 2 in Print(x + y)", "3\n");
}

#[test]
fn function_forms() {
    assert_output("let Inc x = x + 1 in Print(Inc 5)", "6\n");
    assert_output("let add x y = x + y in Print(add 2 40)", "42\n");
}

#[test]
fn tuple_parameters_destructure_on_application() {
    assert_output("let f (x,y) = x + y in Print(f (3,4))", "7\n");
    assert_failure("let f (x,y) = x in Print(f (1,2,3))");
    assert_failure("let f (x,y) = x in Print(f 1)");
}

#[test]
fn lambdas_and_higher_order_functions() {
    assert_output("Print((fn x. x + 1) 5)", "6\n");
    assert_output("Print((fn x y. x * y) 3 4)", "12\n");
    assert_output("let make c = (fn x. x + c) in let add2 = make 2 in Print(add2 40)",
                  "42\n");
}

#[test]
fn within_definitions() {
    assert_output("let x = 3 within y = x * 2 in Print(y)", "6\n");
    assert_output("let incr = (delta = 2 within incr x = x + delta) in Print(incr 40)",
                  "42\n");
}

#[test]
fn infix_application() {
    assert_output("let add x y = x + y in Print(2 @add 3)", "5\n");
    assert_output("let pair x y = (x, y) in Print(1 @pair 2 @pair 3)", "((1, 2), 3)\n");
}

#[test]
fn conditionals_and_boolean_operators() {
    assert_output("Print(true & not false)", "true\n");
    assert_output("Print(1 gr 2 or 2 gr 1)", "true\n");
    assert_output("Print(5 ge 5 -> 'yes' | 'no')", "yes\n");
    assert_output("let abs x = x ls 0 -> -x | x in Print(abs (-7))", "7\n");
    assert_output("Print(1 ls 2 -> 2 ls 3 -> 'both' | 'first' | 'neither')", "both\n");
}

#[test]
fn comparisons_cover_integers_and_strings() {
    assert_output("Print(2 le 2)", "true\n");
    assert_output("Print('abc' ls 'abd')", "true\n");
    assert_output("Print('b' ge 'a')", "true\n");
    assert_failure("Print(1 ls 'a')");
}

#[test]
fn equality_requires_matching_kinds() {
    assert_output("Print(1 ne 2)", "true\n");
    assert_output("Print('a' eq 'a')", "true\n");
    assert_output("Print(nil eq nil)", "true\n");
    assert_failure("Print(1 eq 'a')");
}

#[test]
fn string_builtins() {
    assert_output("Print(Stem 'abc')", "a\n");
    assert_output("Print(Stern 'abc')", "bc\n");
    assert_output("Print(Stem '')", "\n");
    assert_output("Print(Conc 'ab' 'cd')", "abcd\n");
    assert_output("Print(Conc (ItoS 42) '!')", "42!\n");
    assert_failure("Print(Conc 1 'a')");
    assert_failure("Print(ItoS 'a')");
}

#[test]
fn builtins_apply_curried() {
    assert_output("let greet = Conc 'Hello, ' in Print(greet 'world')", "Hello, world\n");
}

#[test]
fn string_escape_sequences() {
    assert_output("Print('a\\nb')", "a\nb\n");
    assert_output("Print('a\\tb')", "a\tb\n");
    assert_output("Print('it\\'s')", "it's\n");
}

#[test]
fn type_predicates() {
    assert_output("Print(Isinteger 5)", "true\n");
    assert_output("Print(Isstring 5)", "false\n");
    assert_output("Print(Istruthvalue false)", "true\n");
    assert_output("Print(Istuple (1, 2))", "true\n");
    assert_output("Print(Istuple nil)", "true\n");
    assert_output("Print(Isdummy dummy)", "true\n");
    assert_output("let f x = x in Print(Isfunction f)", "true\n");
    assert_output("Print(Isfunction Print)", "true\n");
}

#[test]
fn null_detects_the_empty_tuple() {
    assert_output("Print(Null nil)", "true\n");
    assert_output("Print(Null (1, 2))", "false\n");
}

#[test]
fn print_returns_dummy() {
    assert_output("Print(dummy)", "dummy\n");
    assert_output("Print(Print 5)", "5\ndummy\n");
}

#[test]
fn shadowing_resolves_to_the_innermost_binding() {
    assert_output("let x = 1 in let x = 2 in Print(x)", "2\n");
    assert_output("let x = 1 in Print((fn x. x) 9 + x)", "10\n");
}

#[test]
fn programs_without_print_produce_no_output() {
    assert_output("let x = 5 in x", "");
    assert_output("rec f n = n eq 0 -> 0 | f (n - 1) in f 100", "");
}

#[test]
fn output_before_a_failure_is_retained() {
    let mut out = Vec::new();
    assert!(get_result("Print(1) aug Print(2)", &mut out).is_err());
    assert!(!out.is_empty());
}

#[test]
fn division_by_zero_is_an_error() {
    assert_failure("Print(1 / 0)");
}

#[test]
fn unbound_identifiers_are_errors() {
    assert_failure("Print(foo)");
    assert_failure("let x = 1 in Print(y)");
}

#[test]
fn operator_type_mismatches_are_errors() {
    assert_failure("Print(1 + 'a')");
    assert_failure("Print(true + 1)");
    assert_failure("Print(not 1)");
    assert_failure("Print(1 & true)");
    assert_failure("Print(5 3)");
}

#[test]
fn overflow_is_reported_not_wrapped() {
    assert_failure("Print(9223372036854775807 + 1)");
    assert_failure("Print(2 ** 64 ** 2)");
    assert_failure("Print(2 ** (0 - 1))");
}

#[test]
fn malformed_programs_are_parse_errors() {
    assert_failure("let x = in x");
    assert_failure("let x 5 in x");
    assert_failure("Print(1");
    assert_failure("1 + 2 3 )");
    assert_failure("fn . x");
}

#[test]
fn malformed_tokens_are_lex_errors() {
    assert_failure("let x = $ in x");
    assert_failure("Print('abc)");
    assert_failure("Print(99999999999999999999999999)");
}
