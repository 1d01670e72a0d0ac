use clap::Parser;

#[derive(Parser, Clone)]
pub struct Config {
    #[clap(env, long)]
    pub api_key: String,

    #[clap(env, long, default_value_t = 5000)]
    pub port: u16,

    #[clap(env, long, default_value = "http://localhost:5000")]
    pub origin_urls: String,
}
