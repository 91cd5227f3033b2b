use asset_payments::infrastructure::config::settings::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
	let config = Config::load().expect("Failed to load configuration");
	asset_payments::run(config).await
}
