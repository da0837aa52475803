#[macro_use]
mod common;

#[cfg(test)]
mod assignment {
    tests! {
        global is OK r#"var a = "before";
print a;
a = "after";
print a;"#,
        "before",
        "after",
    }

    tests! {
        local is OK r#"{
  var a = "before";
  print a;
  a = "after";
  print a;
}"#,
        "before",
        "after",
    }

    tests! {
        invalid_target is ERR r#"a + b = c;"#,
        "[line 0:6] Error at '=': Invalid assignment target."
    }

    tests! {
        undefined is ERR r#"unknown;"#,
        "Undefined variable 'unknown'.",
        "[on 0:0]"
    }
}
