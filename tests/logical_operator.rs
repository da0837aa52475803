#[macro_use]
mod common;

#[cfg(test)]
mod logical_operator {
    tests! {
        short_circuit is OK r#"print nil or "x";
print 1 and 2;"#,
        "x",
        "2",
    }

    tests! {
        and_no_eval is OK r#"fun bomb() { print "boom"; return true; }
print false and bomb();"#,
        "false",
    }
}
