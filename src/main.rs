mod app;
mod body;
mod config;
mod renderer;
mod scenario;
mod scheduler;
mod simulation;

fn main() {
    env_logger::init();
    if let Err(err) = app::run() {
        eprintln!("failed to start disc simulation: {err}");
        std::process::exit(1);
    }
}
