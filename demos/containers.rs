use argot::{Collection, CommandLineParser, Entries, Handler, Optional, Pair, Parameter};
use std::collections::{BTreeMap, HashSet};

fn main() {
    let mut includes: Vec<String> = Vec::default();
    let mut tags: HashSet<String> = HashSet::default();
    let mut defines: BTreeMap<String, String> = BTreeMap::default();
    let mut limit: Option<u64> = None;
    let mut origin: (i32, i32) = (0, 0);
    let mut total: u64 = 0;

    let parser = CommandLineParser::new("containers")
        .about("Demonstrates the container destinations.")
        .add(
            Parameter::option(Collection::new(&mut includes), "-I")
                .name("--include")
                .help("An include directory (repeatable)."),
        )
        .add(Parameter::option(Collection::new(&mut tags), "--tag").help("A tag; repeats are collapsed."))
        .add(Parameter::option(Entries::new(&mut defines), "-D").help("A KEY=VALUE definition."))
        .add(Parameter::option(Optional::new(&mut limit), "--limit"))
        .add(Parameter::option(Pair::new(&mut origin), "--origin").help("An X=Y coordinate."))
        .add(
            Parameter::rest(Handler::new(|value: u64| total += value), "values")
                .help("Values to add up."),
        )
        .build();

    parser.parse();

    println!("includes: {includes:?}");
    println!("tags: {tags:?}");
    println!("defines: {defines:?}");
    println!("limit: {limit:?}");
    println!("origin: {origin:?}");
    println!("total: {total}");
}
