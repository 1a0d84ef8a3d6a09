use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use lobotomize::{logging, Options};
use lobotomy::{Class, Config, Data};

#[derive(Parser)]
/// Zero the section header fields of an ELF header to make the binary harder to reverse.
struct Args {
    /// ELF file to rewrite
    #[clap(short, long, value_name = "FILE")]
    file: PathBuf,

    /// output path (defaults to the input path with `_fk` appended)
    #[clap(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// set class
    #[clap(short, long, value_name = "32|64", parse(try_from_str = lobotomy::parse_class))]
    class: Option<Class>,

    /// set endianness
    #[clap(short, long, value_name = "little|big", parse(try_from_str = lobotomy::parse_data))]
    endian: Option<Data>,

    /// log more details (repeat for more)
    #[clap(short, long, parse(from_occurrences))]
    verbose: u64,

    /// only log errors
    #[clap(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init(logging::level_from_flags(args.verbose, args.quiet))?;

    lobotomize::run(&Options {
        input: &args.file,
        output: args.output.as_deref(),
        config: Config {
            class: args.class,
            data: args.endian,
        },
    })?;

    println!("done!");
    Ok(())
}
