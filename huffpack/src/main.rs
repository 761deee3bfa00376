use clap::Parser;
use tracing_subscriber::EnvFilter;

use huffpack::{run, Conf, ConsoleUi, QuietUi, Ui};

fn main() {
    let conf = Conf::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&conf.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let ui: &dyn Ui = if conf.quiet { &QuietUi } else { &ConsoleUi };
    match run(&conf, ui) {
        Ok(stats) => ui.write_message(&format!(
            "{} bytes read, {} bytes written, {} distinct bytes.",
            stats.input_bytes, stats.output_bytes, stats.unique_symbols)),
        Err(e) => ui.app_error(&e.to_string())
    }
}
