use std::{error::Error, fs, io::Cursor};

use mec::{id::Named, session::Session};

use super::{Flow, LineError, Shell, ShellError};

#[track_caller]
fn run(shell: &mut Shell, line: &str) -> String {
    let mut out = Vec::new();
    match shell.run_line(line, &mut out) {
        Ok(Flow::Continue) => String::from_utf8(out).unwrap(),
        other => panic!("{line:?} did not run: {other:?}"),
    }
}

#[track_caller]
fn fail(shell: &mut Shell, line: &str) -> ShellError {
    match shell.run_line(line, &mut Vec::new()) {
        Err(LineError::Execute(error)) => error,
        other => panic!("{line:?} was expected to fail, got {other:?}"),
    }
}

fn shell() -> Shell {
    Shell::new(Session::new())
}

#[test]
fn creates_objects() {
    let mut shell = shell();
    assert!(run(&mut shell, "vector up 0,0,1").starts_with("added vector up (obj_"));
    run(&mut shell, "point origin 0,0,0");
    run(&mut shell, "segment edge 0,0,0 1,1,1");
    run(&mut shell, "parallelogram plate 0,1,1 0,0,1 0,1,0");

    let kinds: Vec<_> = shell.session().workspace().iter().map(|o| o.kind()).collect();
    assert_eq!(kinds, ["vector", "point", "segment", "contour"]);
}

#[test]
fn segment_endpoints_must_agree() {
    let mut shell = shell();
    assert!(matches!(
        fail(&mut shell, "segment edge 0,0 1,1,1"),
        ShellError::Geometry(_)
    ));
    assert!(shell.session().workspace().is_empty());
}

#[test]
fn geometry_errors_are_not_repeated_as_their_own_cause() {
    let mut shell = shell();
    let error = match shell.run_line("segment edge 0,0 1,1,1", &mut Vec::new()) {
        Err(error) => error,
        Ok(flow) => panic!("expected an error, got {flow:?}"),
    };
    assert_eq!(
        error.to_string(),
        "vectors are not the same dimension (2 and 3)"
    );
    assert!(error.source().is_none());
}

#[test]
fn overflowing_shapes_cannot_be_saved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overflow.mec");

    let mut shell = shell();
    run(&mut shell, "parallelogram p 1e308,0,0 1e308,0,0 0,1,0");
    let error = fail(&mut shell, &format!("save {}", path.display()));
    assert!(matches!(
        error,
        ShellError::Session(mec::session::SessionError::NonFinite(_))
    ));
    assert!(!path.exists());
}

#[test]
fn list_and_find() {
    let mut shell = shell();
    run(&mut shell, "point this_is_a_schmilblick 0,0");
    run(&mut shell, "point Object_2 0,0");

    let list = run(&mut shell, "list");
    assert_eq!(list.lines().count(), 2);
    assert!(list.contains("Object_2"));

    let found = run(&mut shell, "find tihs_a_si_schmilblick");
    assert_eq!(found.lines().count(), 1);
    assert!(found.contains("this_is_a_schmilblick"));

    assert_eq!(run(&mut shell, "find nothing in common"), "no match\n");
}

#[test]
fn targets_resolve_by_name_or_id() {
    let mut shell = shell();
    run(&mut shell, "vector diagonal 3,4");
    let id = shell.session().workspace()[0].id();

    assert_eq!(run(&mut shell, "norm diagonal"), "5\n");
    assert_eq!(run(&mut shell, &format!("norm {id}")), "5\n");

    run(&mut shell, "rename diagonal hypotenuse");
    assert_eq!(shell.session().workspace()[0].name(), "hypotenuse");

    assert!(matches!(
        fail(&mut shell, "show something_else"),
        ShellError::NoMatch(_)
    ));
}

#[test]
fn ambiguous_names_are_rejected() {
    let mut shell = shell();
    run(&mut shell, "point twin 0,0");
    run(&mut shell, "point twin 1,1");
    assert!(matches!(
        fail(&mut shell, "delete twin"),
        ShellError::Ambiguous { count: 2, .. }
    ));
    assert_eq!(shell.session().workspace().len(), 2);
}

#[test]
fn operations_check_the_object_kind() {
    let mut shell = shell();
    run(&mut shell, "point origin 0,0,0");
    assert!(matches!(
        fail(&mut shell, "norm origin"),
        ShellError::WrongKind {
            expected: "vector",
            found: "point"
        }
    ));
}

#[test]
fn contour_queries() {
    let mut shell = shell();
    run(&mut shell, "parallelogram plate 0,1,1 0,0,1 0,1,0");
    assert_eq!(run(&mut shell, "closed plate"), "true\n");
    assert_eq!(run(&mut shell, "coplanar plate"), "true\n");

    run(&mut shell, "segment edge 0,0,0 2,4,6");
    assert!(run(&mut shell, "midpoint edge").contains("[1.0, 2.0, 3.0]"));
}

#[test]
fn delete_and_wipe() {
    let mut shell = shell();
    run(&mut shell, "point a 0,0");
    run(&mut shell, "point bbbbbb 1,1");
    assert!(run(&mut shell, "delete a").starts_with("deleted point a"));
    assert_eq!(shell.session().workspace().len(), 1);

    run(&mut shell, "wipe");
    assert!(shell.session().workspace().is_empty());
}

#[test]
fn header_properties() {
    let mut shell = shell();
    run(&mut shell, "set author Some One");
    let header = run(&mut shell, "header");
    assert!(header.starts_with("mec_version = "));
    assert!(header.contains("author = Some One"));
}

#[test]
fn save_and_load_through_the_shell() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("part.mec");

    let mut shell = shell();
    run(&mut shell, "point origin 0,0,0");
    assert!(matches!(fail(&mut shell, "save"), ShellError::Session(_)));
    run(&mut shell, &format!("save {}", path.display()));
    assert!(matches!(
        fail(&mut shell, &format!("save {}", path.display())),
        ShellError::Session(_)
    ));
    run(&mut shell, "save --overwrite");

    assert!(matches!(fail(&mut shell, "load"), ShellError::Session(_)));
    assert_eq!(run(&mut shell, "load --overwrite"), "loaded 1 objects\n");

    let mut other = Shell::new(Session::new());
    run(&mut other, &format!("load {}", path.display()));
    assert_eq!(other.session().workspace()[0].name(), "origin");
}

#[test]
fn parse_errors_are_reported_as_such() {
    let mut shell = shell();
    assert!(matches!(
        shell.run_line("frobnicate", &mut Vec::new()),
        Err(LineError::Parse(_))
    ));
    assert_eq!(shell.run_line("quit", &mut Vec::new()).unwrap(), Flow::Quit);
    assert_eq!(run(&mut shell, "-- nothing to do"), "");
}

#[test]
fn scripts_stop_at_the_first_error() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("build.mecs");
    fs::write(
        &script,
        "-- a small part\npoint origin 0,0,0\nnorm origin\npoint never 1,1,1\n",
    )
    .unwrap();

    let mut shell = shell();
    let error = shell.run_script(&script, &mut Vec::new()).unwrap_err();
    assert!(error.to_string().ends_with(":3"));
    assert_eq!(shell.session().workspace().len(), 1);
}

#[test]
fn scripts_stop_at_quit() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("quit.mecs");
    fs::write(&script, "point a 0,0\nquit\npoint b 1,1\n").unwrap();

    let mut shell = shell();
    shell.run_script(&script, &mut Vec::new()).unwrap();
    assert_eq!(shell.session().workspace().len(), 1);
}

#[test]
fn interactive_sessions_skip_failing_lines() {
    let input = Cursor::new("point a 0,0\nnorm a\nbogus\npoint b 1,1\nquit\npoint c 2,2\n");
    let mut out = Vec::new();

    let mut shell = shell();
    shell.run_interactive(input, &mut out, true).unwrap();
    assert_eq!(shell.session().workspace().len(), 2);
    assert!(String::from_utf8(out).unwrap().starts_with("> added point a"));
}
