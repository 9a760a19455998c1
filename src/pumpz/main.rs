//! `pumpz` binary. All logic lives in the library; see `cli/` for the client.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
