use super::*;
use encl_eval::buffer_handler;
use pretty_assertions::assert_eq;

fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap_or_else(|err| panic!("{err}"));
    path
}

fn quiet() -> SessionConfig {
    SessionConfig::default().print_handler(buffer_handler())
}

#[test]
fn run_resolves_uses_next_to_the_script() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("{err}"));
    write(dir.path(), "shapes.encl", "square = fn(x) { x * x }\n");
    let main = write(
        dir.path(),
        "main.encl",
        "use(\"shapes.encl\", attach = true)\nsquare(7)\n",
    );
    let config = quiet();
    let printer = std::sync::Arc::clone(config.printer());
    assert_eq!(run_file(&main, config).ok(), Some(Value::Int(49)));
    assert_eq!(printer.output(), "");
}

#[test]
fn run_reports_eval_errors() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("{err}"));
    let main = write(dir.path(), "main.encl", "missing + 1\n");
    let Err(CommandError::Eval(err)) = run_file(&main, quiet()) else {
        panic!("expected an evaluation error");
    };
    assert_eq!(
        err,
        EvalError::UnboundName {
            name: "missing".to_string()
        }
    );
}

#[test]
fn exports_follow_the_policy() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("{err}"));
    let lib = write(
        dir.path(),
        "lib.encl",
        "export(\"^pub_\")\npub_a = 1\n.hidden = 2\nother = 3\npub_b = \"two\"\n",
    );
    let module = exports_file(&lib, quiet()).unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(format_exports(&module), "pub_a = 1\npub_b = two\n");
}

#[test]
fn syntax_errors_keep_source() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("{err}"));
    let bad = write(dir.path(), "bad.encl", "x = (1 +\n");
    for result in [
        run_file(&bad, quiet()).map(|_| ()),
        exports_file(&bad, quiet()).map(|_| ()),
        check_file(&bad).map(|_| ()),
    ] {
        let Err(CommandError::Syntax {
            source_text,
            errors,
            ..
        }) = result
        else {
            panic!("expected syntax errors");
        };
        assert_eq!(source_text, "x = (1 +\n");
        assert!(!errors.is_empty());
    }
}

#[test]
fn check_counts_statements() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("{err}"));
    let file = write(dir.path(), "ok.encl", "a = 1\nb = a + 2\n");
    let summary = check_file(&file).unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(summary.statements, 2);
    // a = 1 \n b = a + 2 \n eof
    assert_eq!(summary.tokens, 11);
}

#[test]
fn unreadable_file() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("{err}"));
    let Err(CommandError::Read { path, .. }) = check_file(&dir.path().join("none.encl")) else {
        panic!("expected a read error");
    };
    assert!(path.ends_with("none.encl"));
}
