mod app;
mod audio;
mod binder;
mod config;
mod library;
mod mpris;
mod runtime;
mod session;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
