fn main() {
    if let Err(e) = gbuild_cli::run() {
        eprintln!("gbuild: {}", e);
        std::process::exit(1);
    }
}
