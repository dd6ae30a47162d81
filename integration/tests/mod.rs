mod clients;
mod config_provider;
mod fixture;
mod pipeline;
