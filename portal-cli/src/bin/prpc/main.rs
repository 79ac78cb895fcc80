use clap::ArgMatches;
use portal_rpc::{
    OperationName, RequestEnvelope, ResponseEnvelope, RpcClient, portal,
    retry::{self, Retry},
};
use serde_json::Value;

pub mod cli;
pub mod config;
pub mod logger;

async fn call(cf: &portal_rpc::ClientConfig, m: &ArgMatches) -> i32 {
    let op = match m.get_one::<String>("operation").map(OperationName::new) {
        Some(Ok(op)) => op,
        Some(Err(e)) => fatal!("{}", e),
        None => fatal!("missing operation"),
    };
    let body: Option<Value> = match m.get_one::<String>("body") {
        Some(s) => match serde_json::from_str(s) {
            Ok(v) => Some(v),
            Err(e) => fatal!("--body is not valid JSON: {}", e),
        },
        None => None,
    };
    let token = m.get_one::<String>("token").map(String::as_str);
    let attempts = m.get_one::<usize>("retry").copied().unwrap_or(1).max(1);

    let client = match RpcClient::new(cf) {
        Ok(c) => c,
        Err(e) => fatal!("{}", e),
    };
    let q = RequestEnvelope::new(token, body);
    let strategy = Retry::delay_jitter_millis(200..=400)
        .with_max_attempts(attempts)
        .with_backoff();
    let res: ResponseEnvelope<Value> = retry::attempt(&strategy, || client.call(&op, &q)).await;

    match serde_json::to_string_pretty(&res) {
        Ok(s) => println!("{s}"),
        Err(e) => fatal!("could not print response: {}", e),
    }
    match res {
        ResponseEnvelope::Success(_) => 0,
        ResponseEnvelope::Failure(e) => {
            log::warn!("{}: {}", op, e.message);
            1
        }
    }
}

#[tokio::main]
async fn main() {
    let m = cli::cli().get_matches();
    logger::init(m.get_flag("verbose"));

    let path = m
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("portal.toml");
    let endpoint = m.get_one::<String>("endpoint");

    let code = match m.subcommand() {
        Some(("call", sub)) => call(&config::load(path, endpoint).rpc, sub).await,
        Some(("ops", _)) => {
            for name in portal::NAMES {
                println!("{name}");
            }
            0
        }
        Some(("config", _)) => match config::load(path, endpoint).to_toml() {
            Ok(s) => {
                print!("{s}");
                0
            }
            Err(e) => fatal!("{}", e),
        },
        _ => fatal!("unknown subcommand"),
    };
    std::process::exit(code);
}
