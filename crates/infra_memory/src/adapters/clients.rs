//! In-memory client store

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use core_kernel::{
    ClientId, DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata, PortError,
};
use domain_catalog::{Client, ClientPatch, ClientPort, NewClient};

use crate::table::Table;

/// `ClientPort` over an in-memory table
#[derive(Debug, Default)]
pub struct InMemoryClientStore {
    clients: Arc<RwLock<Table<ClientId, Client>>>,
}

impl InMemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the store
    pub async fn with_clients(clients: Vec<Client>) -> Self {
        let store = Self::new();
        {
            let mut table = store.clients.write().await;
            for client in clients {
                table.insert(client.id, client);
            }
        }
        store
    }
}

impl DomainPort for InMemoryClientStore {}

#[async_trait]
impl HealthCheckable for InMemoryClientStore {
    async fn health_check(&self) -> HealthCheckResult {
        let count = self.clients.read().await.len();
        HealthCheckResult::healthy("memory-clients", count)
    }
}

#[async_trait]
impl ClientPort for InMemoryClientStore {
    #[instrument(skip(self, _metadata), fields(client_id = %id))]
    async fn get(
        &self,
        id: ClientId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Client, PortError> {
        self.clients
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Client", id))
    }

    #[instrument(skip(self, _metadata))]
    async fn list(&self, _metadata: Option<OperationMetadata>) -> Result<Vec<Client>, PortError> {
        Ok(self.clients.read().await.values().cloned().collect())
    }

    #[instrument(skip(self, data, _metadata))]
    async fn create(
        &self,
        data: NewClient,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Client, PortError> {
        let client = Client::new(data);
        debug!(client_id = %client.id, "Creating client");
        self.clients.write().await.insert(client.id, client.clone());
        Ok(client)
    }

    #[instrument(skip(self, patch, _metadata), fields(client_id = %id))]
    async fn update(
        &self,
        id: ClientId,
        patch: ClientPatch,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Client, PortError> {
        let mut table = self.clients.write().await;
        let client = table
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Client", id))?;
        client.apply(patch);
        Ok(client.clone())
    }

    #[instrument(skip(self, _metadata), fields(client_id = %id))]
    async fn delete(&self, id: ClientId, _metadata: Option<OperationMetadata>) -> Result<(), PortError> {
        self.clients
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PortError::not_found("Client", id))
    }
}
