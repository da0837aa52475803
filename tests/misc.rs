#[macro_use]
mod common;

#[cfg(test)]
mod misc {
    tests! {
        precedence is OK r#"print 1 + 2 * 3 - 2 + 2;
print (1 + 2) * 3;"#,
        "7",
        "9",
    }

    tests! {
        unexpected_character is ERR r#"print 1 @ 2;"#,
        "[line 0:8] Error: Unexpected character '@'."
    }

    tests! {
        builtins is OK r#"print str(12);
print str(true);
print str(nil);"#,
        "12",
        "true",
        "nil",
    }

    tests! {
        clock is OK r#"print clock() > 0;"#,
        "true",
    }
}
