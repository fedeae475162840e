//! Assembles valang assembly text into a loadable bytecode file (§4.6, §6).

#[macro_use]
extern crate clap;

use clap::Arg;
use cli::error::Error;
use std::process;

fn run() -> Result<(), Error> {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("SOURCE")
                .help("The assembly source file to assemble")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("out")
                .short("o")
                .long("out")
                .takes_value(true)
                .value_name("FILE")
                .required(true)
                .help("Writes the assembled bytecode to FILE"),
        )
        .arg(
            Arg::with_name("map")
                .long("map")
                .help("Prints the source line of every assembled instruction to stderr"),
        )
        .get_matches();

    let source_path = matches.value_of("SOURCE").unwrap();
    let source = cli::read_to_string(source_path)?;

    let assembled = assembler::assemble(source_path, &source)?;
    cli::write(matches.value_of("out").unwrap(), &assembled.bytes)?;

    if matches.is_present("map") {
        for (instr_idx, item) in assembled.source_map.iter().enumerate() {
            eprintln!("{}: line {}", instr_idx, item.line);
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
