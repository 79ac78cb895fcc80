mod backend;
mod pages;

use portal_rpc::{ClientConfig, RpcClient};
use portal_schemas::Id;

use crate::pages::View;

fn show<T: std::fmt::Debug>(page: &str, view: &View<T>) {
    match view {
        View::Ready(x) => log::info!("{page}: {x:?}"),
        View::Error {
            message,
            retry_label,
        } => log::info!("{page}: error {message:?} [{retry_label}]"),
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let endpoint = match backend::start().await {
        Ok(x) => x,
        Err(e) => {
            log::error!("could not start stub backend: {e}");
            std::process::exit(1);
        }
    };
    let client = match RpcClient::new(&ClientConfig::new(endpoint).with_timeout_ms(2000)) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    let token = Some(backend::TOKEN);

    show("exams", &pages::exams(&client, token).await);
    show("exams (signed out)", &pages::exams(&client, None).await);
    show("course options", &pages::course_options(&client, token).await);
    show("course c-1", &pages::course(&client, token, Id::from("c-1")).await);
    show("course c-9", &pages::course(&client, token, Id::from("c-9")).await);

    let ids = vec![Id::from("c-2"), Id::from("c-9"), Id::from("c-1")];
    let switched = pages::switch_courses(&client, token, ids).await;
    log::info!("{} stale question lists dropped", switched.stale);
    match switched.shown {
        Some((id, view)) => show(&format!("questions after switching to {id}"), &view),
        None => log::info!("every switch was superseded"),
    }

    // nothing listens here, so every attempt fails in transport
    let dead = match RpcClient::new(&ClientConfig::new("http://127.0.0.1:9/api/rpc")) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    show("exams (backend down)", &pages::exams(&dead, token).await);
}
