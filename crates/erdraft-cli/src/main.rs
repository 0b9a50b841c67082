//! erdraft CLI - Render Mermaid ER diagrams as SVG or terminal previews

mod cli;
mod colorizer;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    let app = cli::ErdraftApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
