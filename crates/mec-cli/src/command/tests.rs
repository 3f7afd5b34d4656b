use std::path::PathBuf;

use mec::id::ObjectId;

use super::{parse, parse_coordinates, Command, Span, Target};

#[track_caller]
fn command(line: &str) -> Command {
    match parse(line) {
        Ok(Some(command)) => command,
        other => panic!("expected a command from {line:?}, got {other:?}"),
    }
}

#[track_caller]
fn error(line: &str) -> (Span, String) {
    match parse(line) {
        Err(diagnostic) => (diagnostic.span(), diagnostic.message().into()),
        other => panic!("expected a diagnostic from {line:?}, got {other:?}"),
    }
}

#[test]
fn blank_and_comment_lines() {
    assert_eq!(parse(""), Ok(None));
    assert_eq!(parse("   \t"), Ok(None));
    assert_eq!(parse("-- a comment"), Ok(None));
    assert_eq!(parse("   -- indented comment"), Ok(None));
}

#[test]
fn creation_commands() {
    assert_eq!(
        command("vector up 0,0,1"),
        Command::Vector {
            name: "up".into(),
            coordinates: vec![0.0, 0.0, 1.0],
        }
    );
    assert_eq!(
        command("  point   origin 0,0,0  "),
        Command::Point {
            name: "origin".into(),
            coordinates: vec![0.0, 0.0, 0.0],
        }
    );
    assert_eq!(
        command("segment edge 0,0 1.5,-2"),
        Command::Segment {
            name: "edge".into(),
            start: vec![0.0, 0.0],
            end: vec![1.5, -2.0],
        }
    );
    assert_eq!(
        command("parallelogram plate 0,1,1 0,0,1 0,1,0"),
        Command::Parallelogram {
            name: "plate".into(),
            corner: vec![0.0, 1.0, 1.0],
            side_1: vec![0.0, 0.0, 1.0],
            side_2: vec![0.0, 1.0, 0.0],
        }
    );
}

#[test]
fn targets_are_ids_or_names() {
    let id = ObjectId::generate();
    assert_eq!(
        command(&format!("show {id}")),
        Command::Show {
            target: Target::Id(id)
        }
    );
    assert_eq!(
        command("show plate"),
        Command::Show {
            target: Target::Name("plate".into())
        }
    );
    assert_eq!(
        command("delete obj_notreallyanid"),
        Command::Delete {
            target: Target::Name("obj_notreallyanid".into())
        }
    );
}

#[test]
fn find_and_set_keep_inner_whitespace() {
    assert_eq!(
        command("find this is  a name "),
        Command::Find {
            name: "this is  a name".into()
        }
    );
    assert_eq!(
        command("set author Some One"),
        Command::Set {
            key: "author".into(),
            value: "Some One".into(),
        }
    );
}

#[test]
fn save_and_load_arguments() {
    assert_eq!(
        command("save"),
        Command::Save {
            path: None,
            overwrite: false
        }
    );
    assert_eq!(
        command("save out/part.mec --overwrite"),
        Command::Save {
            path: Some(PathBuf::from("out/part.mec")),
            overwrite: true
        }
    );
    assert_eq!(
        command("load --overwrite part.mec"),
        Command::Load {
            path: Some(PathBuf::from("part.mec")),
            overwrite: true
        }
    );
    assert_eq!(error("save a b").1, "only one path may be given");
    assert_eq!(error("load --force").0, Span::new(5, 12));
}

#[test]
fn argument_less_commands() {
    assert_eq!(command("list"), Command::List);
    assert_eq!(command("wipe"), Command::Wipe);
    assert_eq!(command("header"), Command::Header);
    assert_eq!(command("help"), Command::Help);
    assert_eq!(command("quit"), Command::Quit);
    assert_eq!(command("exit"), Command::Quit);
}

#[test]
fn unknown_command() {
    let (span, message) = error("  extrude plate 10");
    assert_eq!(span, Span::new(2, 9));
    assert!(message.starts_with("unknown command"));
}

#[test]
fn missing_arguments_point_past_the_end() {
    assert_eq!(error("point origin"), (Span::new(12, 12), "missing coordinates".into()));
    assert_eq!(error("point  "), (Span::new(5, 5), "missing name".into()));
}

#[test]
fn extra_arguments() {
    assert_eq!(
        error("list everything"),
        (Span::new(5, 15), "unexpected extra argument".into())
    );
}

#[test]
fn malformed_coordinates() {
    let (span, message) = error("point p 1,two,3");
    assert_eq!(span, Span::new(8, 15));
    assert!(message.starts_with("malformed coordinates"));

    assert_eq!(parse_coordinates("1,,2"), None);
    assert_eq!(parse_coordinates("1,inf"), None);
    assert_eq!(parse_coordinates("NaN"), None);
    assert_eq!(parse_coordinates("1, 2"), Some(vec![1.0, 2.0]));
    assert_eq!(parse_coordinates("-0.5"), Some(vec![-0.5]));
}
