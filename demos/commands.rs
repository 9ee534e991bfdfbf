use argot::{Collection, CommandLineParser, Flag, Parameter, Scalar};
use std::cell::Cell;

fn main() {
    let mut dry_run: bool = false;
    let mut listing: bool = false;
    let mut long: bool = false;
    let mut remote_name = String::default();
    let mut remote_url = String::default();
    let mut paths: Vec<String> = Vec::default();
    let added = Cell::new(false);

    let parser = CommandLineParser::new("vcs")
        .about("A make-believe version control tool.")
        .add(
            Parameter::option(Flag::new(&mut dry_run), "-n")
                .name("--dry-run")
                .help("Describe what would happen, without doing it."),
        )
        .command("list", |command| {
            command
                .alias("ls")
                .about("List the tracked paths.")
                .destination(&mut listing)
                .add(Parameter::option(Flag::new(&mut long), "-l").help("Use the long format."))
                .add(Parameter::rest(Collection::new(&mut paths), "paths"))
        })
        .command("remote add", |command| {
            command
                .about("Register a remote.")
                .add(Parameter::argument(Scalar::new(&mut remote_name), "name").required())
                .add(Parameter::argument(Scalar::new(&mut remote_url), "url").required())
                .action(|| added.set(true))
        })
        .command_required()
        .build();

    let command = parser.parse();
    println!("command: {command:?}, dry-run: {dry_run}");

    if listing {
        println!("listing {paths:?} (long: {long})");
    }

    if added.get() {
        println!("added remote {remote_name} at {remote_url}");
    }
}
