//! Translates a valang source file into textual assembly (§4.5).

#[macro_use]
extern crate clap;

use clap::Arg;
use cli::error::Error;
use std::process;

fn run() -> Result<(), Error> {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("SOURCE")
                .help("The .va source file to translate")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("out")
                .short("o")
                .long("out")
                .takes_value(true)
                .value_name("FILE")
                .help("Writes the assembly to FILE instead of stdout"),
        )
        .get_matches();

    let source_path = matches.value_of("SOURCE").unwrap();
    let source = cli::read_to_string(source_path)?;

    let program = parser::parse(source_path, &source)?;
    let assembly = codegen::generate(&program)?;

    match matches.value_of("out") {
        Some(out) => cli::write(out, assembly)?,
        None => print!("{}", assembly),
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
