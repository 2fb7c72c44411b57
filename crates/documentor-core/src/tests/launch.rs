use crate::*;
use std::path::Path;

#[test]
fn conditions_recognized_from_command_line() {
    let opts = LaunchOptions::parse(&["-D cond1", "-Dcond2", "-D  cond3"]).unwrap();
    let conds = opts.conditions();
    assert_eq!(conds.len(), 3);
    assert!(conds.all_enabled(["cond1", "cond2", "cond3"]));
}

#[test]
fn separate_condition_argument_is_accepted() {
    let opts = LaunchOptions::parse(&["-D", "beta"]).unwrap();
    assert!(opts.conditions().is_enabled("beta"));
}

#[test]
fn no_conditions_by_default() {
    let opts = LaunchOptions::parse::<&str>(&[]).unwrap();
    assert!(opts.conditions().is_empty());
    assert!(opts.initial_root().is_none());
    assert!(opts.export_request().is_none());
}

#[test]
fn export_requires_root_and_target() {
    let opts = LaunchOptions::parse(&["-html", "-root", "docs"]).unwrap();
    assert!(!opts.export_to_html());
    assert!(opts.export_request().is_none());
    assert_eq!(opts.initial_root(), Some(Path::new("docs")));

    let opts = LaunchOptions::parse(&["-chm", "-root", "docs", "-target", "out"]).unwrap();
    assert_eq!(
        opts.export_request(),
        Some(ExportRequest {
            format: ExportFormat::Chm,
            root: "docs".into(),
            target: "out".into(),
        })
    );
}

#[test]
fn html_wins_when_both_formats_are_requested() {
    let opts =
        LaunchOptions::parse(&["-chm", "-html", "-root", "docs", "-target", "out"]).unwrap();
    let req = opts.export_request().unwrap();
    assert_eq!(req.format, ExportFormat::Html);
    assert_eq!(req.format.target_name(), "HTML");
}

#[test]
fn malformed_arguments_are_usage_errors() {
    for args in [
        vec!["-root"],
        vec!["-D"],
        vec!["-pdf"],
        vec!["stray"],
    ] {
        let err = LaunchOptions::parse(&args).unwrap_err();
        assert!(matches!(err, Error::Usage { .. }), "{args:?}: {err}");
    }
}
