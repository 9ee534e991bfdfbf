use argot::{Collection, CommandLineParser, Flag, Parameter, Scalar};

fn main() {
    let mut verbose: bool = false;
    let mut precision: usize = 0;
    let mut items: Vec<f64> = Vec::default();

    let parser = CommandLineParser::new("summer")
        .about("Sum up the items, and print the result.")
        .add(
            Parameter::option(Flag::new(&mut verbose), "-v")
                .name("--verbose")
                .help("Print every item before the sum."),
        )
        .add(
            Parameter::option(Scalar::new(&mut precision), "-p")
                .name("--precision")
                .help("The number of decimal places to print."),
        )
        .add(
            Parameter::rest(Collection::new(&mut items), "items")
                .required()
                .help("The items to sum."),
        )
        .build();

    parser.parse();

    if verbose {
        for item in &items {
            println!("{item:.precision$}");
        }
    }

    let sum: f64 = items.iter().sum();
    println!("Sum: {sum:.precision$}");
}
