use clap::Parser;

fn main() {
    let cli = eventplanctl::Cli::parse();
    eventplanctl::init_tracing(cli.verbose);
    if let Err(err) = eventplanctl::run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
