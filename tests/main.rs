use argot::{
    Collection, CommandLineParser, Entries, Flag, Optional, Pair, Parameter, ParseError, Parsed,
    Scalar,
};
use assert_matches::assert_matches;
use rstest::rstest;
use std::collections::{BTreeMap, HashSet};

#[test]
fn builder_compiles() {
    CommandLineParser::new("program");
}

#[rstest]
#[case(vec!["x", "-a"], "x", vec![])]
#[case(vec!["-a", "x"], "x", vec![])]
#[case(vec!["x", "y", "-a", "z"], "x", vec!["y", "z"])]
#[case(vec!["-a", "--", "-x", "-a"], "-x", vec!["-a"])]
fn required_option_and_arguments(
    #[case] tokens: Vec<&str>,
    #[case] expected_arg1: &str,
    #[case] expected_rest: Vec<&str>,
) {
    // Setup
    let mut a: bool = false;
    let mut arg1 = String::default();
    let mut rest: Vec<String> = Vec::default();
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(Flag::new(&mut a), "-a").required())
        .add(Parameter::argument(Scalar::new(&mut arg1), "arg1").required())
        .add(Parameter::rest(Collection::new(&mut rest), "rest"))
        .build_parser()
        .unwrap();

    // Execute
    let result = parser.try_parse_tokens(tokens.as_slice());

    // Verify
    assert_eq!(result, Ok(Parsed::Complete { command: None }));
    assert!(a);
    assert_eq!(&arg1, expected_arg1);
    assert_eq!(rest, expected_rest);
}

#[rstest]
#[case(vec!["x"], ParseError::MissingOption { option: "-a".to_string() })]
#[case(vec!["-a"], ParseError::MissingArg { arg: "arg1".to_string() })]
#[case(vec![], ParseError::MissingOption { option: "-a".to_string() })]
fn required_missing(#[case] tokens: Vec<&str>, #[case] expected: ParseError) {
    // Setup
    let mut a: bool = false;
    let mut arg1 = String::default();
    let mut rest: Vec<String> = Vec::default();
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(Flag::new(&mut a), "-a").required())
        .add(Parameter::argument(Scalar::new(&mut arg1), "arg1").required())
        .add(Parameter::rest(Collection::new(&mut rest), "rest"))
        .build_parser()
        .unwrap();

    // Execute
    let result = parser.try_parse_tokens(tokens.as_slice());

    // Verify
    assert_eq!(result, Err(expected));
}

#[test]
fn separator() {
    // Setup
    let mut long: u32 = 0;
    let mut arg1 = String::default();
    let mut rest: Vec<String> = Vec::default();
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(Scalar::new(&mut long), "--long"))
        .add(Parameter::argument(Scalar::new(&mut arg1), "arg1"))
        .add(Parameter::rest(Collection::new(&mut rest), "rest"))
        .build_parser()
        .unwrap();

    // Execute
    parser
        .try_parse_tokens(&["arg1", "--", "--long=1", "x", "y"])
        .unwrap();

    // Verify
    assert_eq!(long, 0);
    assert_eq!(&arg1, "arg1");
    assert_eq!(rest, vec!["--long=1", "x", "y"]);
}

#[rstest]
#[case(vec!["-a"], true)]
#[case(vec!["--all"], true)]
#[case(vec!["-a", "0"], false)]
#[case(vec!["-a", "false"], false)]
#[case(vec!["-a", "off"], false)]
#[case(vec!["-a", "no"], false)]
#[case(vec!["--all", "1"], true)]
#[case(vec!["--all", "true"], true)]
#[case(vec!["--all", "on"], true)]
#[case(vec!["--all", "yes"], true)]
#[case(vec!["--all=no"], false)]
#[case(vec!["-a=yes"], true)]
#[case(vec!["-a0"], false)]
#[case(vec!["-aon"], true)]
#[case(vec!["--no-all"], false)]
#[case(vec!["-a", "--no-all"], false)]
#[case(vec!["--no-all", "-a"], true)]
fn flag_vocabulary(#[case] tokens: Vec<&str>, #[case] expected: bool) {
    // Setup
    let mut all: bool = !expected;
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(Flag::new(&mut all), "-a").name("--all"))
        .build_parser()
        .unwrap();

    // Execute
    parser.try_parse_tokens(tokens.as_slice()).unwrap();

    // Verify
    assert_eq!(all, expected);
}

#[test]
fn flag_next_token_not_boolean() {
    // Setup
    let mut all: bool = false;
    let mut items: Vec<String> = Vec::default();
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(Flag::new(&mut all), "-a"))
        .add(Parameter::rest(Collection::new(&mut items), "items"))
        .build_parser()
        .unwrap();

    // Execute
    parser.try_parse_tokens(&["-a", "TRUE", "x"]).unwrap();

    // Verify
    assert!(all);
    assert_eq!(items, vec!["TRUE", "x"]);
}

#[rstest]
#[case(vec!["--all=maybe"], "maybe")]
#[case(vec!["-a=True"], "True")]
fn flag_invalid_value(#[case] tokens: Vec<&str>, #[case] value: &str) {
    // Setup
    let mut all: bool = false;
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(Flag::new(&mut all), "-a").name("--all"))
        .build_parser()
        .unwrap();

    // Execute
    let error = parser.try_parse_tokens(tokens.as_slice()).unwrap_err();

    // Verify
    assert_eq!(
        error.to_string(),
        format!(
            "Invalid value for option \"-a, --all\". Value \"{value}\" is not one of \"1\", \"0\", \"true\", \"false\", \"on\", \"off\", \"yes\", \"no\"."
        )
    );
}

#[rstest]
#[case(vec!["--no-count"])]
#[case(vec!["--no-x"])]
#[case(vec!["-ax"])]
#[case(vec!["-q"])]
#[case(vec!["--verbose"])]
fn invalid_option(#[case] tokens: Vec<&str>) {
    // Setup
    let mut all: bool = false;
    let mut count: u32 = 0;
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(Flag::new(&mut all), "-a"))
        .add(Parameter::option(Scalar::new(&mut count), "-c").name("--count"))
        .build_parser()
        .unwrap();

    // Execute
    let result = parser.try_parse_tokens(tokens.as_slice());

    // Verify
    assert_eq!(
        result,
        Err(ParseError::InvalidOption {
            option: tokens[0].to_string()
        })
    );
}

#[rstest]
#[case(vec!["-abc"], true, true, true, None)]
#[case(vec!["-ba"], true, true, false, None)]
#[case(vec!["-ac", "-n7"], true, false, true, Some(7))]
#[case(vec!["-n", "7"], false, false, false, Some(7))]
#[case(vec!["-n=7"], false, false, false, Some(7))]
#[case(vec!["--number=7"], false, false, false, Some(7))]
#[case(vec!["--number", "7", "-b"], false, true, false, Some(7))]
fn group_and_inline(
    #[case] tokens: Vec<&str>,
    #[case] expected_a: bool,
    #[case] expected_b: bool,
    #[case] expected_c: bool,
    #[case] expected_number: Option<u32>,
) {
    // Setup
    let mut a: bool = false;
    let mut b: bool = false;
    let mut c: bool = false;
    let mut number: Option<u32> = None;
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(Flag::new(&mut a), "-a"))
        .add(Parameter::option(Flag::new(&mut b), "-b"))
        .add(Parameter::option(Flag::new(&mut c), "-c"))
        .add(Parameter::option(Optional::new(&mut number), "-n").name("--number"))
        .build_parser()
        .unwrap();

    // Execute
    parser.try_parse_tokens(tokens.as_slice()).unwrap();

    // Verify
    assert_eq!(a, expected_a);
    assert_eq!(b, expected_b);
    assert_eq!(c, expected_c);
    assert_eq!(number, expected_number);
}

#[rstest]
#[case(vec!["--number"])]
#[case(vec!["--number", "-a"])]
fn option_missing_value(#[case] tokens: Vec<&str>) {
    // Setup
    let mut a: bool = false;
    let mut number: u32 = 0;
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(Flag::new(&mut a), "-a"))
        .add(Parameter::option(Scalar::new(&mut number), "--number"))
        .build_parser()
        .unwrap();

    // Execute
    let result = parser.try_parse_tokens(tokens.as_slice());

    // Verify
    assert_eq!(
        result,
        Err(ParseError::InvalidOptionValue {
            option: "--number".to_string(),
            value: "".to_string(),
            reason: "Value is empty.".to_string(),
        })
    );
}

#[test]
fn non_conventional_options() {
    // Setup
    let mut fb: u32 = 0;
    let mut rtti: bool = false;
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(Scalar::new(&mut fb), "+fb"))
        .add(Parameter::option(Flag::new(&mut rtti), "-frtti"))
        .build_parser()
        .unwrap();

    // Execute
    parser.try_parse_tokens(&["+fb", "3", "-frtti"]).unwrap();

    // Verify
    assert_eq!(fb, 3);
    assert!(rtti);
}

#[test]
fn non_conventional_prefix() {
    // Setup
    let mut fb: u32 = 0;
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(Scalar::new(&mut fb), "+fb"))
        .build_parser()
        .unwrap();

    // Execute
    let result = parser.try_parse_tokens(&["+fbx"]);

    // Verify
    assert_eq!(
        result,
        Err(ParseError::InvalidOption {
            option: "+fbx".to_string()
        })
    );
}

#[test]
fn containers() {
    // Setup
    let mut includes: Vec<String> = vec!["initial".to_string()];
    let mut tags: HashSet<u32> = HashSet::default();
    let mut defines: BTreeMap<String, u32> = BTreeMap::default();
    let mut origin: (i32, i32) = (0, 0);
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(Collection::new(&mut includes), "-I"))
        .add(Parameter::option(Collection::new(&mut tags), "--tag"))
        .add(Parameter::option(Entries::new(&mut defines), "-D"))
        .add(Parameter::option(Pair::new(&mut origin), "--origin"))
        .build_parser()
        .unwrap();

    // Execute
    parser
        .try_parse_tokens(&[
            "-I", "a", "-Ib", "--tag", "1", "--tag=2", "--tag", "1", "-D", "x=1", "-Dy=2",
            "-D", "x=3", "--origin", "-1=4",
        ])
        .unwrap_err();

    // Verify
    assert_eq!(includes, vec!["initial", "a", "b"]);
    assert_eq!(tags, HashSet::from([1, 2]));
    assert_eq!(
        defines,
        BTreeMap::from([("x".to_string(), 3), ("y".to_string(), 2)])
    );
    // The value for --origin starts with '-', so it is not consumed.
    assert_eq!(origin, (0, 0));
}

#[rstest]
#[case(vec!["--origin=-1=4"], Ok((-1, 4)))]
#[case(vec!["--origin", "1=-4"], Ok((1, -4)))]
#[case(vec!["--origin", "1"], Err("Value \"1\" is not key=value pair."))]
#[case(vec!["--origin", "x=1"], Err("Can't convert key in pair \"x=1\" to i32."))]
#[case(vec!["--origin", "1=x"], Err("Can't convert value in pair \"1=x\" to i32."))]
fn pair(#[case] tokens: Vec<&str>, #[case] expected: Result<(i32, i32), &str>) {
    // Setup
    let mut origin: (i32, i32) = (0, 0);
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(Pair::new(&mut origin), "--origin"))
        .build_parser()
        .unwrap();

    // Execute
    let result = parser.try_parse_tokens(tokens.as_slice());

    // Verify
    match expected {
        Ok(expected) => {
            assert_matches!(result, Ok(Parsed::Complete { command: None }));
            assert_eq!(origin, expected);
        }
        Err(reason) => {
            assert_matches!(result, Err(ParseError::InvalidOptionValue { option, reason: r, .. }) => {
                assert_eq!(option, "--origin");
                assert_eq!(r, reason);
            });
        }
    }
}

#[rstest]
#[case(vec!["list"], Some("list"))]
#[case(vec!["l"], Some("list"))]
#[case(vec!["remote", "add"], Some("remote add"))]
#[case(vec!["ra"], Some("remote add"))]
#[case(vec!["remote"], None)]
#[case(vec![], None)]
fn command_names(#[case] tokens: Vec<&str>, #[case] expected: Option<&str>) {
    // Setup
    let mut listed: bool = false;
    let mut extra: Vec<String> = Vec::default();
    let parser = CommandLineParser::new("program")
        .add(Parameter::rest(Collection::new(&mut extra), "extra"))
        .command("list", |command| command.alias("l").destination(&mut listed))
        .command("remote add", |command| command.alias("ra"))
        .build_parser()
        .unwrap();

    // Execute
    let result = parser.try_parse_tokens(tokens.as_slice()).unwrap();

    // Verify
    assert_eq!(result.command(), expected);
    assert_eq!(listed, expected == Some("list"));
    // An unmatched word falls through to the positional arguments.
    assert_eq!(extra.is_empty(), expected.is_some() || tokens.is_empty());
}

#[test]
fn command_selected_once() {
    // Setup
    let mut items: Vec<String> = Vec::default();
    let parser = CommandLineParser::new("program")
        .command("list", |command| {
            command.add(Parameter::rest(Collection::new(&mut items), "items"))
        })
        .build_parser()
        .unwrap();

    // Execute
    parser.try_parse_tokens(&["list", "list", "x"]).unwrap();

    // Verify
    assert_eq!(items, vec!["list", "x"]);
}

#[test]
fn command_options_shadow_global() {
    // Setup
    let mut global: u32 = 0;
    let mut local: u32 = 0;
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(Scalar::new(&mut global), "-n"))
        .command("get", |command| {
            command.add(Parameter::option(Scalar::new(&mut local), "-n"))
        })
        .build_parser()
        .unwrap();

    // Execute
    parser.try_parse_tokens(&["-n", "1", "get", "-n", "2"]).unwrap();

    // Verify
    assert_eq!(global, 1);
    assert_eq!(local, 2);
}

#[rstest]
#[case(vec!["get", "--no-verbose"])]
#[case(vec!["get", "-vn"])]
fn command_options_shadow_global_flags(#[case] tokens: Vec<&str>) {
    // Setup
    let mut verbose: bool = true;
    let mut number: bool = false;
    let mut local_verbose: u32 = 0;
    let mut local_number: u32 = 0;
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(Flag::new(&mut verbose), "--verbose").name("-v"))
        .add(Parameter::option(Flag::new(&mut number), "-n"))
        .command("get", |command| {
            command
                .add(Parameter::option(Scalar::new(&mut local_verbose), "--verbose"))
                .add(Parameter::option(Scalar::new(&mut local_number), "-n"))
        })
        .build_parser()
        .unwrap();

    // Execute
    let result = parser.try_parse_tokens(tokens.as_slice());

    // Verify
    assert_eq!(
        result,
        Err(ParseError::InvalidOption {
            option: tokens[1].to_string()
        })
    );
    assert!(verbose);
    assert!(!number);
    assert_eq!(local_verbose, 0);
    assert_eq!(local_number, 0);
}

#[rstest]
#[case(vec![], ParseError::MissingArg { arg: "items".to_string() })]
#[case(vec!["1", "list"], ParseError::MissingCommandArg { command: "list".to_string(), arg: "paths".to_string() })]
fn required_rest_missing(#[case] tokens: Vec<&str>, #[case] expected: ParseError) {
    // Setup
    let mut items: Vec<u32> = Vec::default();
    let mut paths: Vec<String> = Vec::default();
    let parser = CommandLineParser::new("program")
        .add(Parameter::rest(Collection::new(&mut items), "items").required())
        .command("list", |command| {
            command.add(Parameter::rest(Collection::new(&mut paths), "paths").required())
        })
        .build_parser()
        .unwrap();

    // Execute
    let result = parser.try_parse_tokens(tokens.as_slice());

    // Verify
    assert_eq!(result, Err(expected));
    assert_eq!(items, vec![1u32; tokens.len().min(1)]);
    assert!(paths.is_empty());
}

#[rstest]
#[case(vec![], ParseError::MissingCommand)]
#[case(vec!["g"], ParseError::MissingOption { option: "-a, --all".to_string() })]
#[case(vec!["-a", "g"], ParseError::MissingArg { arg: "first".to_string() })]
#[case(vec!["-a", "x", "g"], ParseError::MissingCommandOption { command: "get, g".to_string(), option: "-f, --force, +f".to_string() })]
#[case(vec!["-a", "x", "get", "-f"], ParseError::MissingCommandArg { command: "get, g".to_string(), arg: "ARG".to_string() })]
#[case(vec!["-a", "x", "get", "-f", "5", "6"], ParseError::UnexpectedArg { value: "6".to_string() })]
#[case(vec!["-a", "x", "get", "-f", "bad"], ParseError::InvalidCommandArgValue { command: "get, g".to_string(), arg: "ARG".to_string(), value: "bad".to_string(), reason: "Can't convert \"bad\" to u32.".to_string() })]
#[case(vec!["-a", "x", "get", "--count", "bad"], ParseError::InvalidCommandOptionValue { command: "get, g".to_string(), option: "--count".to_string(), value: "bad".to_string(), reason: "Can't convert \"bad\" to u32.".to_string() })]
#[case(vec!["-a", "--size=bad"], ParseError::InvalidOptionValue { option: "--size".to_string(), value: "bad".to_string(), reason: "Can't convert \"bad\" to u32.".to_string() })]
fn error_display_names(#[case] tokens: Vec<&str>, #[case] expected: ParseError) {
    // Setup
    let mut all: bool = false;
    let mut size: u32 = 0;
    let mut first = String::default();
    let mut force: bool = false;
    let mut count: u32 = 0;
    let mut value: u32 = 0;
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(Flag::new(&mut all), "--all").name("-a").required())
        .add(Parameter::option(Scalar::new(&mut size), "--size"))
        .add(Parameter::argument(Scalar::new(&mut first), "first").required())
        .command("get", |command| {
            command
                .alias("g")
                .add(
                    Parameter::option(Flag::new(&mut force), "+f")
                        .name("--force")
                        .name("-f")
                        .required(),
                )
                .add(Parameter::option(Scalar::new(&mut count), "--count"))
                .add(Parameter::argument(Scalar::new(&mut value), "").required())
        })
        .command_required()
        .build_parser()
        .unwrap();

    // Execute
    let result = parser.try_parse_tokens(tokens.as_slice());

    // Verify
    assert_eq!(result, Err(expected));
}

#[test]
fn error_messages() {
    assert_eq!(
        ParseError::InvalidOption {
            option: "-x".to_string()
        }
        .to_string(),
        "Invalid option \"-x\"."
    );
    assert_eq!(
        ParseError::MissingOption {
            option: "-a, --all".to_string()
        }
        .to_string(),
        "Option \"-a, --all\" is required."
    );
    assert_eq!(
        ParseError::MissingCommandArg {
            command: "get, g".to_string(),
            arg: "ARG".to_string()
        }
        .to_string(),
        "Command \"get, g\" argument \"ARG\" is required."
    );
    assert_eq!(ParseError::MissingCommand.to_string(), "Command is required.");
}

#[test]
fn values_kept_after_error() {
    // Setup
    let mut first: u32 = 0;
    let mut second: u32 = 0;
    let parser = CommandLineParser::new("program")
        .add(Parameter::argument(Scalar::new(&mut first), "first"))
        .add(Parameter::argument(Scalar::new(&mut second), "second"))
        .build_parser()
        .unwrap();

    // Execute
    let result = parser.try_parse_tokens(&["1", "x"]);

    // Verify
    assert_matches!(result, Err(ParseError::InvalidArgValue { arg, value, .. }) => {
        assert_eq!(arg, "second");
        assert_eq!(value, "x");
    });
    assert_eq!(first, 1);
    assert_eq!(second, 0);
}

#[rstest]
#[case(vec!["--help"], None)]
#[case(vec!["-v", "--help", "--bogus"], None)]
#[case(vec!["g", "--help"], Some("get"))]
#[case(vec!["get", "5", "--help"], Some("get"))]
fn help(#[case] tokens: Vec<&str>, #[case] expected: Option<&str>) {
    // Setup
    let mut verbose: bool = false;
    let mut value: u32 = 0;
    let parser = CommandLineParser::new("program")
        .add(Parameter::option(Flag::new(&mut verbose), "-v"))
        .command("get", |command| {
            command
                .alias("g")
                .add(Parameter::argument(Scalar::new(&mut value), "value").required())
        })
        .build_parser()
        .unwrap();

    // Execute
    let result = parser.try_parse_tokens(tokens.as_slice());

    // Verify
    assert_eq!(
        result,
        Ok(Parsed::Help {
            command: expected.map(|c| c.to_string())
        })
    );
}

#[test]
fn help_after_separator() {
    // Setup
    let mut items: Vec<String> = Vec::default();
    let parser = CommandLineParser::new("program")
        .add(Parameter::rest(Collection::new(&mut items), "items"))
        .build_parser()
        .unwrap();

    // Execute
    let result = parser.try_parse_tokens(&["--", "--help"]);

    // Verify
    assert_eq!(result, Ok(Parsed::Complete { command: None }));
    assert_eq!(items, vec!["--help"]);
}

#[test]
fn format_help() {
    // Setup
    let mut all: bool = false;
    let mut source = String::default();
    let parser = CommandLineParser::new("")
        .about("Copies things.")
        .add(
            Parameter::option(Flag::new(&mut all), "-a")
                .required()
                .help("Copy everything."),
        )
        .add(Parameter::argument(Scalar::new(&mut source), "source").help("Where from."))
        .build_parser()
        .unwrap();

    // Execute
    let usage = parser.format_usage();
    let help = parser.format_help();

    // Verify
    assert_eq!(usage, "      CMD -a=value [<source>]\n");
    assert!(help.starts_with("USAGE\n      CMD -a=value [<source>]\n"));
    assert!(help.contains("Copies things."));
    assert!(help.contains("Required! Copy everything."));
    assert!(help.contains("Where from."));
    assert_eq!(parser.format_command_help("x"), None);
}
