//! Frozen job schema registry and its atomic publication handle.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::JobSchema;

/// The output of a discovery pass: job-type name -> schema.
///
/// Built once and frozen; there is no way to mutate a registry after
/// construction. Enumeration order is unspecified, consumers sort when they
/// need a stable order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobSchemaRegistry {
    schemas: HashMap<String, JobSchema>,
}

impl JobSchemaRegistry {
    /// New registry over already-assembled schemas
    pub(crate) fn new(schemas: HashMap<String, JobSchema>) -> Self {
        Self { schemas }
    }

    /// Look up one job schema by job-type name
    pub fn get(&self, job_type: &str) -> Option<&JobSchema> {
        self.schemas.get(job_type)
    }

    /// All discovered schemas, in unspecified order
    pub fn all(&self) -> Vec<&JobSchema> {
        self.schemas.values().collect()
    }

    /// All job-type names, in unspecified order
    pub fn job_names(&self) -> Vec<&str> {
        self.schemas.keys().map(|s| s.as_str()).collect()
    }

    /// Number of discovered jobs
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Check if no jobs were discovered
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Atomically swappable handle over the current registry.
///
/// Readers take a cheap `Arc` clone and keep reading a consistent snapshot;
/// a rebuild publishes a fully built replacement in one swap, so nobody ever
/// observes a partially built registry.
#[derive(Debug, Default)]
pub struct SharedRegistry {
    current: RwLock<Arc<JobSchemaRegistry>>,
}

impl SharedRegistry {
    /// Handle initially holding the given registry
    pub fn new(registry: JobSchemaRegistry) -> Self {
        Self {
            current: RwLock::new(Arc::new(registry)),
        }
    }

    /// Snapshot of the currently published registry
    pub fn load(&self) -> Arc<JobSchemaRegistry> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the published registry with a freshly built one
    pub fn publish(&self, registry: JobSchemaRegistry) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(registry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{JobSettings, ParameterDefinition, ParameterKind};

    fn schema(job_type: &str) -> JobSchema {
        JobSchema {
            job_type: job_type.to_string(),
            handler_class: format!("jobs::{job_type}"),
            request_type: format!("jobs::{job_type}Request"),
            parameters: vec![ParameterDefinition::required("title", ParameterKind::String)],
            uses_external_parameters: false,
            external_field_name: None,
            settings: JobSettings::default(),
        }
    }

    fn registry_of(names: &[&str]) -> JobSchemaRegistry {
        let schemas = names
            .iter()
            .map(|n| (n.to_string(), schema(n)))
            .collect();
        JobSchemaRegistry::new(schemas)
    }

    #[test]
    fn test_registry_get() {
        let registry = registry_of(&["ReportJob", "CleanupJob"]);
        assert_eq!(registry.get("ReportJob").unwrap().handler_class, "jobs::ReportJob");
        assert!(registry.get("MissingJob").is_none());
    }

    #[test]
    fn test_registry_all_and_names() {
        let registry = registry_of(&["ReportJob", "CleanupJob"]);
        assert_eq!(registry.all().len(), 2);

        let mut names = registry.job_names();
        names.sort_unstable();
        assert_eq!(names, vec!["CleanupJob", "ReportJob"]);
    }

    #[test]
    fn test_registry_len_and_empty() {
        assert!(JobSchemaRegistry::default().is_empty());
        let registry = registry_of(&["ReportJob"]);
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_registry_equality() {
        assert_eq!(registry_of(&["A", "B"]), registry_of(&["B", "A"]));
        assert_ne!(registry_of(&["A"]), registry_of(&["A", "B"]));
    }

    #[test]
    fn test_shared_registry_load() {
        let shared = SharedRegistry::new(registry_of(&["ReportJob"]));
        let snapshot = shared.load();
        assert!(snapshot.get("ReportJob").is_some());
    }

    #[test]
    fn test_shared_registry_publish_replaces() {
        let shared = SharedRegistry::new(registry_of(&["ReportJob"]));
        let before = shared.load();

        shared.publish(registry_of(&["CleanupJob"]));

        // Old snapshot is untouched, new loads see the replacement
        assert!(before.get("ReportJob").is_some());
        let after = shared.load();
        assert!(after.get("ReportJob").is_none());
        assert!(after.get("CleanupJob").is_some());
    }

    #[test]
    fn test_shared_registry_concurrent_readers() {
        let shared = Arc::new(SharedRegistry::new(registry_of(&["ReportJob"])));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let snapshot = shared.load();
                        // Every snapshot is internally consistent
                        assert_eq!(snapshot.len(), snapshot.job_names().len());
                    }
                })
            })
            .collect();

        for _ in 0..10 {
            shared.publish(registry_of(&["ReportJob", "CleanupJob"]));
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_shared_registry_default_is_empty() {
        let shared = SharedRegistry::default();
        assert!(shared.load().is_empty());
    }
}
