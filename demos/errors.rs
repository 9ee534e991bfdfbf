use argot::{CommandLineParser, Flag, ParseError, Parameter, Scalar};

fn main() {
    let tokens: Vec<String> = std::env::args().skip(1).collect();
    let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();

    let mut all: bool = false;
    let mut port: u16 = 0;
    let mut target = String::default();

    let parser = CommandLineParser::new("errors")
        .add(Parameter::option(Flag::new(&mut all), "-a").name("--all").required())
        .add(Parameter::option(Scalar::new(&mut port), "--port"))
        .add(Parameter::argument(Scalar::new(&mut target), "target").required())
        .build();

    match parser.try_parse_tokens(tokens.as_slice()) {
        Ok(parsed) if parsed.is_help() => println!("help was requested"),
        Ok(_) => println!("all: {all}, port: {port}, target: {target}"),
        Err(ParseError::MissingOption { option }) => {
            eprintln!("you forgot {option}");
            std::process::exit(2);
        }
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}
