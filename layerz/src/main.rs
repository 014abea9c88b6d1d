//! `layerz`: stdin/stdout when invoked with no arguments, or grab-and-mirror
//! an evdev device when given a device path. These are the only two
//! invocations this binary supports.

mod cli;
mod device_provider;
mod error;
mod hooks;
mod layout;
mod stdio_provider;

use layerz_core::Keyboard;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

const BASE_LAYER: u8 = 0;

fn main() {
    let args = cli::parse();

    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)
        .expect("failed to install terminal logger");

    let layout = layout::build();

    match args.device_path {
        None => {
            let provider = stdio_provider::StdioProvider::new();
            let mut keyboard = Keyboard::new(provider, layout, BASE_LAYER);
            keyboard.run();
        }
        Some(device_path) => {
            let provider = match device_provider::DeviceProvider::open(&device_path, "layerz virtual keyboard") {
                Ok(provider) => provider,
                Err(err) => {
                    log::error!("{err}");
                    std::process::exit(1);
                }
            };
            let mut keyboard = Keyboard::new(provider, layout, BASE_LAYER);
            keyboard.run();
        }
    }
}
