//! Loads and runs an assembled bytecode file against the terminal (§4.7).

#[macro_use]
extern crate clap;

use clap::Arg;
use cli::error::Error;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn run() -> Result<(), Error> {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("PROGRAM")
                .help("The assembled bytecode file to run")
                .required(true)
                .index(1),
        )
        .get_matches();

    let path = matches.value_of("PROGRAM").unwrap();
    let mut file = BufReader::new(File::open(path).map_err(|e| Error::io(path, e))?);
    let mut stdin = BufReader::new(io::stdin());
    let mut stdout = io::stdout();

    vm::loader::load(&mut file)
        .map_err(Error::from)
        .and_then(|program| {
            let mut cpu = vm::Cpu::new(program);
            cpu.run(&mut stdin, &mut stdout).map_err(Error::from)
        })
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
