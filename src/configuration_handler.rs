use crate::configuration::Configuration;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "trainer_booking", about = "Trainer availability and appointment booking service")]
pub struct ConfigurationHandler {
    /// Port the HTTP server listens on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub(crate) port: u16,

    /// PostgreSQL connection string. Without it records are kept in memory.
    #[arg(long, env = "DATABASE_URL")]
    pub(crate) database_url: Option<String>,

    /// Let any known client book any trainer's slots
    #[arg(long, env = "ALLOW_UNLINKED_CLIENTS")]
    pub(crate) allow_unlinked_clients: bool,

    /// Seed the in-memory store with a trainer, two clients and a workout
    #[arg(long)]
    pub(crate) example_data: bool,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn port(&self) -> u16 {
        self.port
    }

    fn database_url(&self) -> Option<String> {
        self.database_url.clone()
    }

    fn enforce_client_relationship(&self) -> bool {
        !self.allow_unlinked_clients
    }

    fn example_data(&self) -> bool {
        self.example_data
    }
}
