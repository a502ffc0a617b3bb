use clap::Parser;
use log::{error, info};

use parlor::{app, store::RoomStore};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(short, long, default_value = "0.0.0.0")]
    addr: String,

    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let bind_addr = format!("{}:{}", args.addr, args.port);

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Error binding {}: {}", bind_addr, e);
            return;
        }
    };

    info!("Server running on {}", bind_addr);

    if let Err(e) = axum::serve(listener, app(RoomStore::new())).await {
        error!("{}", e);
    }
}
