fn main() {
    if let Err(err) = point_labeler::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
