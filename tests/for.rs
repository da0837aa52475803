#[macro_use]
mod common;

#[cfg(test)]
mod _for {
    tests! {
        desugar is OK r#"for (var i = 0; i < 3; i = i + 1) print i;"#,
        "0",
        "1",
        "2",
    }

    tests! {
        return_inside is OK r#"fun find() {
  for (var i = 0; i < 10; i = i + 1) {
    if (i == 3) return "stopped";
  }
  return "not stopped";
}
print find();"#,
        "stopped",
    }
}
