use clap::Arg;
use clap::ArgMatches;
use clap::Command;

pub fn new() -> Command {
    Command::new("sso-service")
        .about("Single sign-on authentication service")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to a config file layered over config/default.toml")
                .env("CONFIG_PATH"),
        )
}

/// Explicit config file; the `--config` flag wins over `CONFIG_PATH`.
pub fn config_path(matches: &ArgMatches) -> Option<&str> {
    matches.get_one::<String>("config").map(String::as_str)
}
