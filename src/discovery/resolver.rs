//! Generic-parameter resolution over the catalog's type hierarchy.
//!
//! Given a handler class and the target generic interface, the resolver walks
//! implemented interfaces and superclasses until it finds the concrete type
//! bound to the interface's type parameter. Interfaces may re-parameterize a
//! generic ancestor with a concrete argument, so a binding can sit anywhere
//! in the hierarchy.

use std::collections::HashSet;

use log::debug;

use crate::catalog::{ClassCatalog, TypeRef};

/// Resolves generic interface bindings against a catalog snapshot.
///
/// Pure function of its catalog input; a resolver can be shared freely
/// within a discovery pass.
pub struct TypeResolver<'a, C: ClassCatalog + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: ClassCatalog + ?Sized> TypeResolver<'a, C> {
    /// New resolver over the given catalog
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Find the concrete type bound to `target_interface`'s type parameter
    /// on `handler_class`, or `None` when the class carries no binding.
    ///
    /// No binding is the normal outcome for most catalog classes.
    pub fn resolve(&self, handler_class: &str, target_interface: &str) -> Option<TypeRef> {
        let mut visited = HashSet::new();
        self.resolve_from(handler_class, target_interface, &mut visited)
    }

    fn resolve_from(
        &self,
        class_name: &str,
        target: &str,
        visited: &mut HashSet<String>,
    ) -> Option<TypeRef> {
        // Diamond hierarchies revisit names; descend into each at most once
        if !visited.insert(class_name.to_string()) {
            return None;
        }

        let metadata = self.catalog.class(class_name)?;

        for interface in &metadata.interfaces {
            if let Some(found) = self.check_interface(interface, target) {
                debug!(
                    "resolved {} binding on {} via {} -> {}",
                    target,
                    class_name,
                    interface.name,
                    found.name
                );
                return Some(found);
            }

            // The binding may sit deeper in the interface's own hierarchy
            if let Some(found) = self.resolve_from(&interface.name, target, visited) {
                return Some(found);
            }
        }

        match &metadata.superclass {
            Some(superclass) => self.resolve_from(&superclass.name, target, visited),
            None => None,
        }
    }

    /// Direct binding check for one implemented-interface reference.
    fn check_interface(&self, interface: &TypeRef, target: &str) -> Option<TypeRef> {
        if interface.args.is_empty() {
            return None;
        }

        if interface.name == target {
            return Some(interface.args[0].clone());
        }

        // A parameterized interface that itself extends the target carries
        // the binding, e.g. ReportHandler<R> declared as JobHandler<R>
        if self.catalog.class(&interface.name).is_some() && self.implements(&interface.name, target) {
            return Some(interface.args[0].clone());
        }

        None
    }

    /// Whether `class_name` implements `target` directly or transitively
    /// through its interface hierarchy or superclasses.
    pub fn implements(&self, class_name: &str, target: &str) -> bool {
        let mut visited = HashSet::new();
        self.implements_from(class_name, target, &mut visited)
    }

    fn implements_from(
        &self,
        class_name: &str,
        target: &str,
        visited: &mut HashSet<String>,
    ) -> bool {
        if !visited.insert(class_name.to_string()) {
            return false;
        }

        let Some(metadata) = self.catalog.class(class_name) else {
            return false;
        };

        for interface in &metadata.interfaces {
            if interface.name == target {
                return true;
            }
            if self.implements_from(&interface.name, target, visited) {
                return true;
            }
        }

        match &metadata.superclass {
            Some(superclass) => self.implements_from(&superclass.name, target, visited),
            None => false,
        }
    }
}
