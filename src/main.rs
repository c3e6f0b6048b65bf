use kiln::cli::{get_log_level_from_verbose, parse_cli, run, Commands};

fn main() {
    let cli = parse_cli();

    let exit_code = match cli.command {
        Commands::Cook(args) => {
            env_logger::Builder::new()
                .filter_level(get_log_level_from_verbose(args.verbose))
                .init();
            run(&args)
        }
    };

    std::process::exit(exit_code);
}
