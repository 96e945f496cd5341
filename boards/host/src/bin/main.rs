#[macro_use]
extern crate log;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use env_logger::Env;
use gpsd_client::components::client::GPSDClient;
use gpsd_client::config::Config;
use gpsd_node::bus::JsonLinePublisher;
use gpsd_node::error::Error;
use gpsd_node::rtc::SystemClock;
use gpsd_node::session::{Session, DEFAULT_API_MAJOR_VERSION};

fn load_config<'a>(matches: &'a clap::ArgMatches<'a>) -> Result<Config, Error> {
    let mut config = match matches.value_of("config") {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            serde_json::from_reader(std::io::BufReader::new(file))?
        }
        None => Config::default(),
    };
    if let Some(host) = matches.value_of("host") {
        config.gpsd.host = host.into();
    }
    if let Some(port) = matches.value_of("port") {
        config.gpsd.port = port.parse()?;
    }
    if let Some(frame_id) = matches.value_of("frame-id") {
        config.frame_id = frame_id.into();
    }
    if let Some(value) = matches.value_of("use-gps-time") {
        config.use_gps_time = value.parse()?;
    }
    if let Some(value) = matches.value_of("check-fix-by-variance") {
        config.check_fix_by_variance = value.parse()?;
    }
    Ok(config)
}

fn run<'a>(matches: &'a clap::ArgMatches<'a>) -> Result<(), Error> {
    let config = load_config(matches)?;
    let api_major_version = match matches.value_of("api-version") {
        Some(version) => version.parse()?,
        None => DEFAULT_API_MAJOR_VERSION,
    };

    let (host, port) = (config.gpsd.host.as_str(), config.gpsd.port);
    let session = Session::connect(host, port, api_major_version).map_err(|e| {
        error!("Failed to open GPSd at {}:{}: {}", host, port, e);
        e
    })?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    ctrlc::set_handler(move || shutdown_clone.store(true, Ordering::SeqCst))?;

    let extended_fix = JsonLinePublisher::new("extended_fix", std::io::stdout());
    let fix = JsonLinePublisher::new("fix", std::io::stdout());
    let mut client = GPSDClient::start(session, SystemClock, extended_fix, fix, config)?;
    client.spin(&shutdown);
    client.stop();
    Ok(())
}

fn bool_arg(name: &'static str, help: &'static str) -> clap::Arg<'static, 'static> {
    let values = &["true", "false"];
    clap::Arg::with_name(name).long(name).help(help).takes_value(true).possible_values(values)
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let matches = clap::App::new("gpsd-node")
        .version("0.1")
        .author("qiuchengxuan")
        .about("Publish gpsd fixes as extended and geodetic fix records")
        .arg(clap::Arg::with_name("config").long("config").help("Config file").takes_value(true))
        .arg(clap::Arg::with_name("host").long("host").help("gpsd host").takes_value(true))
        .arg(clap::Arg::with_name("port").long("port").help("gpsd port").takes_value(true))
        .arg(clap::Arg::with_name("frame-id").long("frame-id").help("Frame id").takes_value(true))
        .arg(bool_arg("use-gps-time", "Stamp geodetic fixes with fix time"))
        .arg(bool_arg("check-fix-by-variance", "Treat unknown variance as no fix"))
        .arg(
            clap::Arg::with_name("api-version")
                .long("api-version")
                .help("gpsd API generation to lay snapshots out for")
                .takes_value(true),
        )
        .get_matches();
    if let Err(error) = run(&matches) {
        error!("{}", error);
        std::process::exit(1);
    }
}
