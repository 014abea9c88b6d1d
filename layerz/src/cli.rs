//! Command-line parsing, `clap`'s builder API in the same style as the
//! teacher's `vkwrty/src/main.rs`: one optional positional argument plus
//! a verbosity flag that only affects logging.

use clap::{App, Arg};

pub struct Args {
    pub device_path: Option<String>,
    pub verbose: bool,
}

pub fn parse() -> Args {
    let matches = App::new("layerz")
        .about("Layered key-event remapper")
        .arg(
            Arg::with_name("device")
                .value_name("DEVICE")
                .help("evdev device to grab; omit to read/write raw events on stdio")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("enable debug-level logging"),
        )
        .get_matches();

    Args {
        device_path: matches.value_of("device").map(str::to_owned),
        verbose: matches.is_present("verbose"),
    }
}
