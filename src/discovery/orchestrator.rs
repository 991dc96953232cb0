//! Discovery orchestration: one pass over the catalog, one frozen registry.

use std::collections::HashMap;

use log::{debug, info};

use crate::catalog::{simple_name, ClassCatalog};
use crate::config::DiscoveryConfig;
use crate::discovery::extractor::ParameterSchemaExtractor;
use crate::discovery::resolver::TypeResolver;
use crate::domain::{JobSchema, JobSettings};
use crate::error::{DiscoveryError, Result};
use crate::registry::JobSchemaRegistry;

/// Run a full discovery pass over the catalog.
///
/// Classes that are not handlers are skipped; any schema error in a resolved
/// handler's declaration aborts the pass, so a broken job surfaces at
/// startup rather than later on the control surface.
pub fn discover_all<C: ClassCatalog + ?Sized>(
    catalog: &C,
    config: &DiscoveryConfig,
) -> Result<JobSchemaRegistry> {
    let resolver = TypeResolver::new(catalog);
    let extractor = ParameterSchemaExtractor::new(catalog);
    let mut schemas: HashMap<String, JobSchema> = HashMap::new();

    for class_name in catalog.class_names() {
        let Some(request_ref) = resolver.resolve(class_name, &config.handler_interface) else {
            continue;
        };

        // Validity gate: the binding must be a record-like catalog type that
        // carries the request marker
        let Some(request_meta) = catalog.class(&request_ref.name) else {
            debug!(
                "skipping {}: resolved type {} is not in the catalog",
                class_name, request_ref.name
            );
            continue;
        };
        if !request_meta.is_record_like {
            debug!(
                "skipping {}: resolved type {} is not record-like",
                class_name, request_meta.name
            );
            continue;
        }
        if !resolver.implements(&request_meta.name, &config.request_marker) {
            debug!(
                "skipping {}: resolved type {} does not implement {}",
                class_name, request_meta.name, config.request_marker
            );
            continue;
        }

        let analyzed = extractor.extract(request_meta)?;

        let handler_meta = catalog
            .class(class_name)
            .expect("class name came from the catalog");
        let job_config = handler_meta.job_config();
        let job_type = job_config
            .and_then(|c| c.name.clone())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| simple_name(class_name).to_string());

        if let Some(existing) = schemas.get(&job_type) {
            return Err(DiscoveryError::NamingConflict {
                job_type,
                first_handler: existing.handler_class.clone(),
                second_handler: class_name.to_string(),
            });
        }

        info!(
            "discovered job '{}' (handler {}, external={}) with {} parameters",
            job_type,
            class_name,
            analyzed.uses_external_parameters,
            analyzed.parameters.len()
        );

        let schema = JobSchema {
            job_type: job_type.clone(),
            handler_class: class_name.to_string(),
            request_type: request_meta.name.clone(),
            parameters: analyzed.parameters,
            uses_external_parameters: analyzed.uses_external_parameters,
            external_field_name: analyzed.external_field_name,
            settings: job_config.map(JobSettings::from).unwrap_or_default(),
        };
        schemas.insert(job_type, schema);
    }

    info!("discovery finished: {} jobs", schemas.len());
    Ok(JobSchemaRegistry::new(schemas))
}
