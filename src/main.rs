fn main() {
    env_logger::init();
    if let Err(err) = wordcloud_rs::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
