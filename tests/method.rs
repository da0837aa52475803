#[macro_use]
mod common;

#[cfg(test)]
mod method {
    tests! {
        arity is OK r#"class Math {
  add(a, b) { return a + b; }
}
print Math().add(3, 4);"#,
        "7",
    }

    tests! {
        print_bound_method is OK r#"class Foo {
  method() {}
}
print Foo().method;"#,
        "<fn method>",
    }

    tests! {
        call_undefined is ERR r#"class Foo {}
Foo().bar();"#,
        "Undefined property 'bar'.",
        "[on 1:6]"
    }
}
