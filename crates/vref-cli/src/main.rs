use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = vref_cli::build_cli().get_matches();
    vref_cli::init_tracing(matches.get_flag("verbose"));

    let stdout = std::io::stdout();
    match vref_cli::run(&matches, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
