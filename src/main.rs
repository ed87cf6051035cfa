fn main() {
    if let Err(err) = track_query::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
