use clap::{CommandFactory, FromArgMatches, Parser};

use super::{Assignment, CliArgs, OutputFormat};

#[test]
fn command_supports_custom_styles() {
    let command = CliArgs::command();
    assert!(command.get_about().is_some());
    command.debug_assert();
}

#[test]
fn parse_cli_accepts_default_arguments() {
    let command = CliArgs::command();
    let mut matches = command.get_matches_from(vec!["facetkit"]);
    let parsed = CliArgs::from_arg_matches_mut(&mut matches).expect("parses");
    assert_eq!(parsed.output, OutputFormat::Plain);
    assert!(parsed.toggle.is_empty());
}

#[test]
fn interactions_are_collected_in_order() {
    let parsed = CliArgs::parse_from([
        "facetkit",
        "--toggle",
        "#brands=Apple",
        "--toggle",
        "#brands=Samsung",
        "--range",
        "#price=10:",
        "-vv",
        "-o",
        "json",
    ]);

    assert_eq!(
        parsed.toggle,
        [
            Assignment {
                container: "#brands".into(),
                value: "Apple".into()
            },
            Assignment {
                container: "#brands".into(),
                value: "Samsung".into()
            },
        ]
    );
    assert_eq!(parsed.range[0].bounds(), Ok((Some(10.0), None)));
    assert_eq!(parsed.verbose, 2);
    assert_eq!(parsed.output, OutputFormat::Json);
}

#[test]
fn malformed_assignments_are_rejected() {
    assert!(CliArgs::try_parse_from(["facetkit", "--toggle", "Apple"]).is_err());
    let assignment: Assignment = "#price=abc:3".parse().expect("assignment");
    assert!(assignment.bounds().is_err());
}
