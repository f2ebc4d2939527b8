//! In-memory appointment registry.
//!
//! The registry owns every appointment record for the lifetime of the process
//! and mints the sequential `APT-NNNN` reference identifiers. Storage sits
//! behind [`AppointmentStore`] so a durable backend can replace
//! [`InMemoryRegistry`] without touching the request handlers.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Local;
use thiserror::Error;

use crate::models::{AppointmentRecord, AppointmentStatus};

/// Country prefix every contact number must carry.
const CONTACT_PREFIX: &str = "+91";

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Invalid phone number format. Must start with +91")]
    InvalidContactNumber,
    #[error("Patient name must not be empty")]
    EmptyPatientName,
    #[error("Appointment not found")]
    NotFound,
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Validates the input, mints the next reference identifier and stores
    /// the record. Returns the fully populated record.
    async fn create(
        &self,
        patient_name: String,
        contact_number: String,
    ) -> Result<AppointmentRecord, RegistryError>;

    /// Looks up a record by its exact, case-sensitive reference identifier.
    async fn get(&self, reference_id: &str) -> Result<AppointmentRecord, RegistryError>;

    /// All records in insertion order.
    async fn list(&self) -> Vec<AppointmentRecord>;
}

/// Process-lifetime store: an append-only `Vec` behind a mutex. The reference
/// identifier is minted under the same guard that appends, so two concurrent
/// creations can never observe the same record count.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    records: Mutex<Vec<AppointmentRecord>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, Vec<AppointmentRecord>> {
        // Nothing panics while the guard is held; a poisoned lock still
        // holds a consistent list.
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AppointmentStore for InMemoryRegistry {
    async fn create(
        &self,
        patient_name: String,
        contact_number: String,
    ) -> Result<AppointmentRecord, RegistryError> {
        validate_contact_number(&contact_number)?;
        validate_patient_name(&patient_name)?;

        let mut records = self.records();
        let reference_id = format!("APT-{:04}", records.len() + 1);
        let record = AppointmentRecord {
            patient_name,
            contact_number,
            appointment_date: Local::now().naive_local(),
            reference_id,
            status: AppointmentStatus::Scheduled,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn get(&self, reference_id: &str) -> Result<AppointmentRecord, RegistryError> {
        self.records()
            .iter()
            .find(|r| r.reference_id == reference_id)
            .cloned()
            .ok_or(RegistryError::NotFound)
    }

    async fn list(&self) -> Vec<AppointmentRecord> {
        self.records().clone()
    }
}

fn validate_patient_name(patient_name: &str) -> Result<(), RegistryError> {
    if patient_name.trim().is_empty() {
        return Err(RegistryError::EmptyPatientName);
    }
    Ok(())
}

fn validate_contact_number(contact_number: &str) -> Result<(), RegistryError> {
    if !contact_number.starts_with(CONTACT_PREFIX) {
        tracing::warn!("rejected contact number without {CONTACT_PREFIX} prefix");
        return Err(RegistryError::InvalidContactNumber);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    async fn create_valid(registry: &InMemoryRegistry, name: &str) -> AppointmentRecord {
        registry
            .create(name.to_string(), "+919876543210".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn mints_sequential_reference_ids() {
        let registry = InMemoryRegistry::new();
        for expected in ["APT-0001", "APT-0002", "APT-0003"] {
            let record = create_valid(&registry, "Asha Rao").await;
            assert_eq!(record.reference_id, expected);
        }
    }

    #[tokio::test]
    async fn identical_input_mints_distinct_reference_ids() {
        let registry = InMemoryRegistry::new();
        let first = create_valid(&registry, "Asha Rao").await;
        let second = create_valid(&registry, "Asha Rao").await;
        assert_ne!(first.reference_id, second.reference_id);
        assert_eq!(first.reference_id, "APT-0001");
        assert_eq!(second.reference_id, "APT-0002");
    }

    #[tokio::test]
    async fn rejects_contact_number_without_prefix() {
        let registry = InMemoryRegistry::new();
        let err = registry
            .create("Asha Rao".into(), "9876543210".into())
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidContactNumber));
        assert!(registry.list().await.is_empty());
    }

    #[tokio::test]
    async fn rejects_blank_patient_name() {
        let registry = InMemoryRegistry::new();
        let err = registry
            .create("   ".into(), "+919876543210".into())
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::EmptyPatientName));
        assert!(registry.list().await.is_empty());
    }

    #[tokio::test]
    async fn stores_records_with_scheduled_status() {
        let registry = InMemoryRegistry::new();
        let record = create_valid(&registry, "Asha Rao").await;
        assert_eq!(record.status, AppointmentStatus::Scheduled);

        let stored = registry.get(&record.reference_id).await.unwrap();
        assert_eq!(stored.status, AppointmentStatus::Scheduled);
        assert_eq!(stored.patient_name, "Asha Rao");
        assert_eq!(stored.contact_number, "+919876543210");
    }

    #[tokio::test]
    async fn get_matches_reference_id_case_sensitively() {
        let registry = InMemoryRegistry::new();
        create_valid(&registry, "Asha Rao").await;

        assert!(registry.get("APT-0001").await.is_ok());
        let err = registry.get("apt-0001").await.unwrap_err();
        assert!(matches!(err, RegistryError::NotFound));
    }

    #[tokio::test]
    async fn get_unknown_reference_id_is_not_found() {
        let registry = InMemoryRegistry::new();
        create_valid(&registry, "Asha Rao").await;

        let err = registry.get("APT-9999").await.unwrap_err();
        assert!(matches!(err, RegistryError::NotFound));
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let registry = InMemoryRegistry::new();
        let names = ["Asha Rao", "Vikram Mehta", "Priya Nair"];
        for name in names {
            create_valid(&registry, name).await;
        }

        let records = registry.list().await;
        assert_eq!(records.len(), names.len());
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.patient_name, names[i]);
            assert_eq!(record.reference_id, format!("APT-{:04}", i + 1));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creations_mint_unique_reference_ids() {
        let registry = Arc::new(InMemoryRegistry::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                registry
                    .create(format!("Patient {i}"), "+919876543210".into())
                    .await
                    .unwrap()
                    .reference_id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }
}
