fn main() {
    if let Err(err) = canvas_edge_router::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
