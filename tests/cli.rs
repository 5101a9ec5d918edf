use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_htmlformat"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute htmlformat");
    // May fail with a broken pipe when htmlformat exits without reading.
    let _ = child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes());
    child.wait_with_output().expect("Failed to wait for htmlformat")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "htmlformat failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).expect("output is not valid UTF-8")
}

#[test]
fn formats_fragment_from_stdin() {
    let output = run(&[], "<ul><li>a</li><li>b</li></ul>");
    assert_eq!(stdout_of(&output), "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>\n");
    assert!(output.stderr.is_empty());
}

#[test]
fn document_flag() {
    let output = run(&["--document"], "<!doctype html><p>x");
    assert_eq!(
        stdout_of(&output),
        "<!doctype html>\n<html>\n  <head>\n  </head>\n  <body>\n    <p>x</p>\n  </body>\n</html>\n"
    );
}

#[test]
fn custom_indent_and_tabs() {
    let output = run(&["--indent", "    "], "<div><p>x</p></div>");
    assert_eq!(stdout_of(&output), "<div>\n    <p>x</p>\n</div>\n");

    let output = run(&["-t"], "<div><p>x</p></div>");
    assert_eq!(stdout_of(&output), "<div>\n\t<p>x</p>\n</div>\n");
}

#[test]
fn indent_and_tabs_conflict() {
    let output = run(&["--tabs", "--indent", " "], "<p>x</p>");
    assert!(!output.status.success());
}

#[test]
fn reads_and_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.html");
    let output = dir.path().join("out.html");
    fs::write(&input, "<p>one <b>two</b></p>").unwrap();

    let result = run(
        &[input.to_str().unwrap(), "-o", output.to_str().unwrap()],
        "",
    );
    assert_eq!(stdout_of(&result), "");
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "<p>\n  one\n  <b>two</b>\n</p>\n"
    );
}

#[test]
fn output_may_overwrite_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.html");
    fs::write(&path, "<ol><li>x</li></ol>").unwrap();

    let path = path.to_str().unwrap();
    stdout_of(&run(&[path, "--output", path], ""));
    assert_eq!(fs::read_to_string(path).unwrap(), "<ol>\n  <li>x</li>\n</ol>\n");
}

#[test]
fn missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.html");
    let output = run(&[missing.to_str().unwrap()], "");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to open"), "{stderr}");
}
