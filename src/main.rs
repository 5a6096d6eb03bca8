use actix_web::{App, HttpServer, web};
use actix_cors::Cors;
use log::{info, error, debug};
use dotenv::dotenv;

use launchpad_gateway::config::AppConfig;
use launchpad_gateway::routes;
use launchpad_gateway::services::{LaunchService, PoolService, Session, SwapService, WalletService};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenv().ok();

    let config = AppConfig::load()?;
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.log_level.as_str()));
    debug!("Loaded configuration: {:?}", config);
    info!(
        "AMM endpoint: {}, wallet endpoint: {}, network: {}",
        config.flashnet_api_url, config.wallet_service_url, config.network
    );

    let session = match Session::connect(&config).await {
        Ok(session) => web::Data::new(session),
        Err(e) => {
            error!("Failed to open wallet session: {}", e);
            return Err(e.into());
        }
    };

    let launch_service = web::Data::new(LaunchService::new(session.clone(), &config));
    let pool_service = web::Data::new(PoolService::new(session.clone()));
    let swap_service = web::Data::new(SwapService::new(session.clone(), &config));
    let wallet_service = web::Data::new(WalletService::new(session.clone()));

    let (host, port) = (config.host.clone(), config.port);
    info!("Starting server at http://{}:{}", host, port);

    let server_session = session.clone();
    HttpServer::new(move || {
        // Configure CORS middleware
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .expose_headers(vec!["content-type", "content-length", "accept"])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(server_session.clone())
            .app_data(launch_service.clone())
            .app_data(pool_service.clone())
            .app_data(swap_service.clone())
            .app_data(wallet_service.clone())
            .configure(routes::configure)
    })
    .bind(format!("{host}:{port}"))?
    .run()
    .await?;

    info!("Server shutting down");
    if let Err(e) = session.shutdown().await {
        error!("Failed to close wallet session: {}", e);
    }
    Ok(())
}
