use crate::cli::CookArgs;
use crate::constants::exit_codes;
use crate::cook::cook;

/// Runs the `cook` subcommand over every given config file.
///
/// One file's failure does not stop the remaining files; the exit code is
/// non-zero if any file failed or was missing.
pub fn run(args: &CookArgs) -> i32 {
    let mut exit_code = exit_codes::SUCCESS;

    for config_path in &args.configs {
        if !config_path.exists() {
            eprintln!("Error: config file not found: {}", config_path.display());
            exit_code = exit_codes::FAILURE;
            continue;
        }

        match cook(config_path) {
            Ok(output_paths) => {
                for output_path in output_paths {
                    println!("Cooked: {}", output_path.display());
                }
            }
            Err(err) => {
                eprintln!("Error processing {}: {err}", config_path.display());
                exit_code = exit_codes::FAILURE;
            }
        }
    }

    exit_code
}
