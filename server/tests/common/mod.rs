pub mod scenarios;

use brook::client::Client;
use brook::tcp::client::TcpClient;
use server::configs::server::ServerConfig;
use server::server::BrookServer;
use tempfile::TempDir;

/// A broker bound to a random port, with the data kept in a temporary directory.
pub struct TestServer {
    server: BrookServer,
    address: String,
    _directory: TempDir,
}

impl TestServer {
    pub async fn start() -> TestServer {
        let _ = tracing_subscriber::fmt::try_init();
        let directory = tempfile::tempdir().expect("Failed to create a temporary directory");
        let path = directory.path().display().to_string();
        let mut server = BrookServer::new(ServerConfig::ephemeral("127.0.0.1:0", &path));
        let address = server
            .start()
            .await
            .expect("Failed to start the server")
            .to_string();
        TestServer {
            server,
            address,
            _directory: directory,
        }
    }

    pub async fn client(&self) -> TcpClient {
        let client = TcpClient::new(&self.address).unwrap_or_else(|e| {
            panic!(
                "Failed to create TcpClient, server has address {}, error: {:?}",
                self.address, e
            )
        });
        client.connect().await.unwrap_or_else(|e| {
            panic!(
                "Failed to connect to the server at {}, error: {:?}",
                self.address, e
            )
        });
        client
    }

    pub async fn stop(mut self) {
        self.server.shutdown().await;
    }
}
