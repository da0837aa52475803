#[macro_use]
mod common;

#[cfg(test)]
mod _super {
    tests! {
        ab is OK r#"class A {
  greet() { return "A"; }
}
class B < A {
  greet() { return super.greet() + "B"; }
}
print B().greet();"#,
        "AB",
    }

    tests! {
        no_superclass is ERR r#"class Foo {
  bar() {
    super.baz();
  }
}"#,
        "[line 2:4] Error at 'super': Can't use 'super' in a class with no superclass."
    }

    tests! {
        super_outside_class is ERR r#"super.foo();"#,
        "[line 0:0] Error at 'super': Can't use 'super' outside of a class."
    }

    // A method body with its own local variable, calling a superclass method through `super`
    // and reading an instance field set by the superclass's initializer. Exercises the
    // resolver/interpreter address agreement for locals and `this`/`super` lookups together,
    // not just `super` alone.
    tests! {
        super_with_locals_and_fields is OK r#"class Greeter {
  init(name) {
    this.name = name;
  }
  greet() {
    var prefix = "Hello";
    return prefix + ", " + this.name;
  }
}
class LoudGreeter < Greeter {
  greet() {
    var message = super.greet();
    return message + "!";
  }
}
print LoudGreeter("World").greet();"#,
        "Hello, World!",
    }
}
