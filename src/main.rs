use clap::error::ErrorKind;
use clap::Parser;
use env_logger::Env;
use genome_reorder::{cli, commands};

fn main() {
    let args = match cli::Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(1);
            }
        },
    };

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let result = commands::reorder::run(
        args.input_files,
        args.reference,
        args.blast_output,
        args.single_pass,
        args.blastn,
    );

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
