fn main() {
    if let Err(err) = floorplan_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
