#[macro_use]
mod common;

#[cfg(test)]
mod field {
    tests! {
        get_set is OK r#"class Foo {}
var foo = Foo();
foo.bar = "value";
print foo.bar;"#,
        "value",
    }

    tests! {
        method_binds_this is OK r#"class Foo {
  getName() { return "foo" + this.count; }
}
var foo = Foo();
foo.count = "1";
print foo.getName();"#,
        "foo1",
    }

    tests! {
        undefined_property is ERR r#"class Foo {}
var foo = Foo();
print foo.bar;"#,
        "Undefined property 'bar'.",
        "[on 2:10]"
    }

    tests! {
        only_instances_have_properties is ERR r#"var x = 1;
print x.foo;"#,
        "Only instances have properties.",
        "[on 1:8]"
    }
}
