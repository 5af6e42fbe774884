//! Testcontainer configurations for integration tests.

use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::{nats::Nats, postgres::Postgres, redis::Redis};

/// PostgreSQL container for durable-store tests.
pub struct PostgresContainer {
    #[allow(dead_code)] // Kept to maintain container lifetime
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

impl PostgresContainer {
    pub async fn start() -> anyhow::Result<Self> {
        let container = Postgres::default().with_tag("16-alpine").start().await?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(5432).await?;

        let connection_string = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

        Ok(Self {
            container,
            connection_string,
        })
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

/// NATS container for dispatch channel tests.
pub struct NatsContainer {
    #[allow(dead_code)] // Kept to maintain container lifetime
    container: ContainerAsync<Nats>,
    url: String,
}

impl NatsContainer {
    pub async fn start() -> anyhow::Result<Self> {
        let container = Nats::default().with_tag("2.10-alpine").start().await?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(4222).await?;

        let url = format!("nats://{}:{}", host, port);

        Ok(Self { container, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Redis container for cache tests.
pub struct RedisContainer {
    #[allow(dead_code)] // Kept to maintain container lifetime
    container: ContainerAsync<Redis>,
    url: String,
}

impl RedisContainer {
    pub async fn start() -> anyhow::Result<Self> {
        let container = Redis::default().with_tag("7-alpine").start().await?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(6379).await?;

        let url = format!("redis://{}:{}", host, port);

        Ok(Self { container, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
