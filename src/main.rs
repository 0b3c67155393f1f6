use clap::Parser;
use env_logger::Env;
use std::{io, process::exit};
use vg_lookup::{bus, describe, run, Config};

fn main() {
    let config = Config::parse();

    env_logger::Builder::from_env(Env::new().filter_or("VG_LOOKUP_LOG", config.log_level()))
        .format_timestamp(None)
        .init();

    let stdout = io::stdout();
    let code = match run(bus::connect_system, &config, &mut stdout.lock()) {
        Ok(report) => report.exit_code(config.strict),
        Err(why) => {
            if let Some(name) = why.dbus_name() {
                log::debug!("D-Bus error name: {}", name);
            }

            eprintln!("{}", describe(&why));
            1
        }
    };

    exit(code);
}
