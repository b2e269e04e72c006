fn main() -> Result<(), eframe::Error> {
    postfeed_frontend::run_frontend()
}
