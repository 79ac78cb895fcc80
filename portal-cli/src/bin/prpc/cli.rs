use clap::{Arg, ArgAction, Command, value_parser};

pub fn cli() -> Command {
    Command::new("prpc")
        .about("Call exam portal backend operations from the command line")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .default_value("portal.toml")
                .help("Path to the portal config file."),
        )
        .arg(
            Arg::new("endpoint")
                .short('e')
                .long("endpoint")
                .env("PORTAL_RPC_ENDPOINT")
                .help("RPC endpoint. Overrides rpc.endpoint from the config file."),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log outgoing requests."),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("call")
                .about("Call one operation and print the response envelope.")
                .arg(
                    Arg::new("operation")
                        .required(true)
                        .help("The operation name, e.g. exams.list."),
                )
                .arg(
                    Arg::new("token")
                        .short('t')
                        .long("token")
                        .env("PORTAL_RPC_TOKEN")
                        .help("Auth token. Sent as null when omitted."),
                )
                .arg(
                    Arg::new("body")
                        .short('b')
                        .long("body")
                        .help("Request body as JSON. Sent as null when omitted."),
                )
                .arg(
                    Arg::new("retry")
                        .short('r')
                        .long("retry")
                        .value_parser(value_parser!(usize))
                        .default_value("1")
                        .help("Attempts to make while the backend is unreachable."),
                ),
        )
        .subcommand(Command::new("ops").about("List the operations the portal pages use."))
        .subcommand(Command::new("config").about("Print the effective configuration."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_call() {
        let m = cli()
            .try_get_matches_from([
                "prpc", "-e", "http://x/rpc", "call", "courses.get_one", "-t", "abc", "-b",
                r#"{"id":"c-1"}"#, "--retry", "3",
            ])
            .unwrap();
        assert_eq!(m.get_one::<String>("endpoint").unwrap(), "http://x/rpc");
        let (name, sub) = m.subcommand().unwrap();
        assert_eq!(name, "call");
        assert_eq!(sub.get_one::<String>("operation").unwrap(), "courses.get_one");
        assert_eq!(sub.get_one::<String>("token").unwrap(), "abc");
        assert_eq!(sub.get_one::<usize>("retry"), Some(&3));
    }

    #[test]
    fn requires_a_subcommand() {
        assert!(cli().try_get_matches_from(["prpc"]).is_err());
        assert!(cli().try_get_matches_from(["prpc", "call"]).is_err());
    }

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }
}
