use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The configuration file, `BROOK_CONFIG_PATH` or `configs/server.toml` when not set.
    #[arg(short, long)]
    pub config: Option<String>,

    /// Overrides the TCP address from the configuration, e.g. `127.0.0.1:0`.
    #[arg(short, long)]
    pub address: Option<String>,
}
