use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TcpConfig {
    pub address: String,
    pub nodelay: bool,
}
