fn main() {
    if let Err(err) = intake::run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
