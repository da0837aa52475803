#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        arithmetic is OK r#"print 1 + 1;
print 6 * 7;
print 20 / 5;
print 3 - 8;"#,
        "2",
        "42",
        "4",
        "-5",
    }

    tests! {
        string_concat is OK r#"print "foo" + "bar";"#,
        "foobar",
    }

    tests! {
        not_equal is OK r#"print 1 != 2;
print 1 != 1;"#,
        "true",
        "false",
    }

    tests! {
        divide_by_zero is ERR r#"print 1 / 0;"#,
        "Cannot divide by zero.",
        "[on 0:8]"
    }

    tests! {
        type_mismatch_plus is ERR r#"print "a" + 1;"#,
        "Operands must be two numbers or two strings.",
        "[on 0:10]"
    }

    tests! {
        unary_minus_error is ERR r#"print -"a";"#,
        "Operand must be a number.",
        "[on 0:6]"
    }

    tests! {
        comparison_type_error is ERR r#"print "a" > 1;"#,
        "Operands must be numbers.",
        "[on 0:10]"
    }
}
