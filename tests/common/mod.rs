#[macro_export]
macro_rules! tests {
    ($name:ident is OK $source:expr, $($expected:expr),* $(,)?) => {
        #[test]
        fn $name() {
            use std::io::Write;
            use assert_cmd::Command;
            use tempfile::NamedTempFile;

            let mut expected = vec![$($expected),*];

            // if exists, concat expected lines with new lines
            let expected = match expected.len() {
                0 => "".to_string(),
                _ => {
                    // add empty string to end to add new line to end of output
                    expected.push("");
                    expected.join("\n")
                }
            };

            let mut file = NamedTempFile::new().expect("failed to create temp source file");
            write!(file, "{}", $source).expect("failed to write source to temp file");

            Command::cargo_bin("loxrs").unwrap()
                .arg(file.path())
                .assert()
                .stdout(expected)
                .success();
        }
    };

    ($name:ident is ERR $source:expr, $($expected:expr),+ $(,)?) => {
        #[test]
        fn $name() {
            use std::io::Write;
            use assert_cmd::Command;
            use tempfile::NamedTempFile;

            // output concats expected with new line
            let output = vec![$($expected),+].join("\n");

            let mut file = NamedTempFile::new().expect("failed to create temp source file");
            write!(file, "{}", $source).expect("failed to write source to temp file");

            Command::cargo_bin("loxrs").unwrap()
                .arg(file.path())
                .assert()
                .stderr(format!("{output}\n"))
                .failure();
        }
    };
}
