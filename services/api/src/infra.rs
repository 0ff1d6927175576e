use metrics_exporter_prometheus::PrometheusHandle;
use mortgage_rating::book::{MortgageEntry, MortgageRepository, RepositoryError};
use mortgage_rating::rating::MortgageId;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local stand-in for the mortgage database.
#[derive(Default, Clone)]
pub(crate) struct InMemoryMortgageRepository {
    entries: Arc<Mutex<HashMap<MortgageId, MortgageEntry>>>,
}

impl MortgageRepository for InMemoryMortgageRepository {
    fn insert(&self, entry: MortgageEntry) -> Result<MortgageEntry, RepositoryError> {
        let mut guard = self.entries.lock().expect("repository mutex poisoned");
        if guard.contains_key(&entry.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(entry.id.clone(), entry.clone());
        Ok(entry)
    }

    fn update(&self, entry: MortgageEntry) -> Result<(), RepositoryError> {
        let mut guard = self.entries.lock().expect("repository mutex poisoned");
        if guard.contains_key(&entry.id) {
            guard.insert(entry.id.clone(), entry);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &MortgageId) -> Result<Option<MortgageEntry>, RepositoryError> {
        let guard = self.entries.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<MortgageEntry>, RepositoryError> {
        let guard = self.entries.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn remove(&self, id: &MortgageId) -> Result<(), RepositoryError> {
        let mut guard = self.entries.lock().expect("repository mutex poisoned");
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}
