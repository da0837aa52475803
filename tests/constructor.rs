#[macro_use]
mod common;

#[cfg(test)]
mod constructor {
    tests! {
        init_args is OK r#"class Point {
  init(x, y) {
    this.x = x;
    this.y = y;
  }
}
var p = Point(1, 2);
print p.x;
print p.y;"#,
        "1",
        "2",
    }

    tests! {
        arity_mismatch is ERR r#"class Pnt {
init(x, y) {this.x = x;}
}
Pnt(1);"#,
        "Expected 2 arguments but got 1.",
        "[on 3:5]"
    }

    tests! {
        return_value_in_init is ERR r#"class Foo {
  init() {
    return 1;
  }
}"#,
        "[line 2:4] Error at 'return': Can't return a value from an initializer."
    }
}
