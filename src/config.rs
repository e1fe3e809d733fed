use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    /// Base URL of the VendorHub marketplace backend.
    pub market_api_url: String,
    /// Service token presented to the marketplace backend.
    pub market_api_token: String,
    pub dev_mode: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let dev_mode = env::var("VENDORHUB_ENV")
            .map(|v| v == "dev" || v == "development")
            .unwrap_or(false);

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(4000);

        Self {
            host,
            port,
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "vendorhub_intake.db".to_string()),
            market_api_url: env::var("MARKET_API_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string()),
            market_api_token: env::var("MARKET_API_TOKEN").unwrap_or_default(),
            dev_mode,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
