//! Shared test harness: an in-memory service registry and a recording
//! route consumer.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gateway_core::registry::{ServiceInstance, ServiceRegistry};
use gateway_core::routing::builder::RouteConsumer;
use gateway_core::routing::table::RoutedServiceTable;

/// In-memory registry built up instance by instance, mirroring how services
/// register route metadata in the real one.
#[derive(Default)]
pub struct MockRegistry {
    instances: Mutex<Vec<ServiceInstance>>,
    offline_services: Mutex<Vec<String>>,
}

impl MockRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// List a service id in the registry without any live instance, as
    /// happens transiently while a service restarts.
    #[allow(dead_code)]
    pub fn add_offline_service(&self, service_id: &str) {
        self.offline_services
            .lock()
            .unwrap()
            .push(service_id.to_string());
    }

    /// Register one instance of `service_id`; instance ids are numbered in
    /// registration order.
    pub fn add_instance(&self, service_id: &str) -> String {
        let mut instances = self.instances.lock().unwrap();
        let count = instances
            .iter()
            .filter(|i| i.service_id == service_id)
            .count();
        let mut instance = ServiceInstance::new(service_id, "localhost", 80);
        instance.instance_id = format!("{service_id}{count}:localhost:80");
        let id = instance.instance_id.clone();
        instances.push(instance);
        id
    }

    /// Attach one route metadata block to a registered instance.
    pub fn add_route(&self, instance_id: &str, block: &str, gateway_url: &str, service_url: &str) {
        let mut instances = self.instances.lock().unwrap();
        let instance = instances
            .iter_mut()
            .find(|i| i.instance_id == instance_id)
            .expect("instance id not registered in mock");
        instance
            .metadata
            .insert(format!("routes.{block}.gateway-url"), gateway_url.to_string());
        instance
            .metadata
            .insert(format!("routes.{block}.service-url"), service_url.to_string());
    }
}

#[async_trait]
impl ServiceRegistry for MockRegistry {
    async fn service_ids(&self) -> Vec<String> {
        let instances = self.instances.lock().unwrap();
        let mut ids = Vec::new();
        for instance in instances.iter() {
            if !ids.contains(&instance.service_id) {
                ids.push(instance.service_id.clone());
            }
        }
        for service_id in self.offline_services.lock().unwrap().iter() {
            if !ids.contains(service_id) {
                ids.push(service_id.clone());
            }
        }
        ids
    }

    async fn instances(&self, service_id: &str) -> Vec<ServiceInstance> {
        self.instances
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.service_id == service_id)
            .cloned()
            .collect()
    }
}

/// Consumer that records every propagated table for later assertions.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingConsumer {
    updates: Mutex<Vec<(String, Arc<RoutedServiceTable>)>>,
}

#[allow(dead_code)]
impl RecordingConsumer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn updates(&self) -> Vec<(String, Arc<RoutedServiceTable>)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn tables_for(&self, service_id: &str) -> Vec<Arc<RoutedServiceTable>> {
        self.updates
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == service_id)
            .map(|(_, table)| Arc::clone(table))
            .collect()
    }
}

impl RouteConsumer for RecordingConsumer {
    fn on_routes_updated(&self, service_id: &str, table: Arc<RoutedServiceTable>) {
        self.updates
            .lock()
            .unwrap()
            .push((service_id.to_string(), table));
    }
}
