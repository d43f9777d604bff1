use std::process::ExitCode;

fn main() -> ExitCode {
    // `.env` may carry RUST_LOG and column-name defaults, so load it before the
    // logger and the argument parser read the environment.
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    match pwl_curves::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
