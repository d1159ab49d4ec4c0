use clap::Parser;
use huffman_archiver::cli::{summary_lines, Args};
use huffman_archiver::files::{self, Operation};
use huffman_archiver::ArchiveCodec;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let invocation = match args.resolve() {
        Ok(invocation) => invocation,
        Err(err) => err.exit(),
    };

    let verb = match invocation.operation {
        Operation::Archive => "Archiving",
        Operation::Extract => "Unarchiving",
    };
    println!(
        "{} {} to {}",
        verb,
        invocation.input.display(),
        invocation.output.display()
    );

    let codec = ArchiveCodec::new();
    match files::run(
        invocation.operation,
        &codec,
        &invocation.input,
        &invocation.output,
    ) {
        Ok(stats) => {
            for line in summary_lines(&stats) {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
