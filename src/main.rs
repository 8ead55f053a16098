#[macro_use]
extern crate clap;
extern crate gffrdf;
#[macro_use]
extern crate log;
extern crate pretty_env_logger;
#[macro_use]
extern crate quick_error;

use std::io::{self, Write};
use std::process;

mod cli;
mod tools;
mod utils;


quick_error! {
    #[derive(Debug)]
    pub enum Error {
        Lib(err: gffrdf::Error) {
            description(err.description())
            display("{}", err)
            from()
            cause(err)
        }
        Io(err: io::Error) {
            description(err.description())
            display("{}", err)
            from()
            cause(err)
        }
        Args(err: clap::Error) {
            description(err.description())
            display("invalid argument: {}", err.message)
            from()
        }
        MissingArg(name: &'static str) {
            description("required argument not present")
            display("argument '{}' is required", name)
        }
        UnsupportedInput(path: String) {
            description("input kind is not supported")
            display("unsupported input kind: {}", path)
        }
        UnknownSubcommand {
            description("unexpected subcommand parsing error")
        }
    }
}

pub type Result<T> = ::std::result::Result<T, Error>;


fn main() {
    pretty_env_logger::init();
    let matches = cli::build_cli().get_matches();
    if let Err(err) = cli::run(&matches) {
        let _ = writeln!(io::stderr(), "error: {}", err);
        process::exit(1);
    }
    process::exit(0);
}
