use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

/// Pure clap command definitions with zero business logic
#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("mysql-dsn")
                .env("RECIPEYOULOVE_MYSQL_DSN")
                .help("mysql://<username>:<password>@tcp(<host>:<port>)/<database>")
                .long("mysql-dsn")
                .long_help(
                    "MySQL data source name:\n\
                    mysql://<username>:<password>@tcp(<host>:<port>)/<database>\n\
                    mysql://<username>:<password>@unix(<socket>)/<database>\n\n\
                    TLS is configured with query parameters:\n\
                    - ssl-mode: disable, require, verify-ca, verify-full\n\
                    - ssl-ca: path to the CA certificate\n\
                    - ssl-cert / ssl-key: client certificate and key"
                )
                .short('d')
                .required(true),
        )
        .arg(
            Arg::new("mongodb-uri")
                .env("RECIPEYOULOVE_MONGODB_URI")
                .help("mongodb://<username>:<password>@<host>:<port>/<database>")
                .long("mongodb-uri")
                .short('m')
                .required(true),
        )
        .arg(
            Arg::new("mongodb-database")
                .env("RECIPEYOULOVE_MONGODB_DATABASE")
                .help("MongoDB database to probe (default: database in the URI, else 'test')")
                .long("mongodb-database")
                .value_name("NAME"),
        )
        .arg(
            Arg::new("collection")
                .default_value("test")
                .env("RECIPEYOULOVE_PROBE_COLLECTION")
                .help("MongoDB collection accessed by the connectivity probe")
                .long("collection")
                .short('c')
                .value_name("NAME"),
        )
        .arg(
            Arg::new("listen")
                .env("RECIPEYOULOVE_LISTEN")
                .help("IP address to bind to (default: [::]:port, accepts both IPv6 and IPv4)")
                .long("listen")
                .long_help(
                    "IP address to bind to:\n\
                    Not specified (default) binds to [::]:port which accepts both IPv6 and IPv4 connections.\n\
                    Falls back to 0.0.0.0:port if IPv6 is unavailable.\n\n\
                    Specific IPv4 examples: '0.0.0.0', '127.0.0.1'\n\
                    Specific IPv6: '::', '::1'"
                )
                .short('l')
                .value_name("IP"),
        )
        .arg(
            Arg::new("port")
                .default_value("8080")
                .env("RECIPEYOULOVE_PORT")
                .help("listening port")
                .long("port")
                .short('p')
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("verbose")
                .help("Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count),
        )
}
