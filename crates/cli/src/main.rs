use std::process::ExitCode;

fn main() -> ExitCode {
    dealerprice_cli::run()
}
