// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stderr: CLI tools are expected to print to stderr for user output.
// - exit: Calling `std::process::exit()` is standard for CLI apps to signal failure to the shell.
#![allow(clippy::print_stderr, clippy::exit)]

fn main() {
    if let Err(e) = fragment_cli::cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
