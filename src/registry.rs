use crate::transforms::{
    EancomTransform, Iso20022Transform, JobsTransform, MccTransform, OnetTransform,
    SourceTransform, SwiftTransform, WebTransform, X12Transform,
};

/// Registry of per-standard transforms in their canonical run order.
/// Order matters: the jobs superset reads the onet transform's output.
pub struct TransformRegistry {
    transforms: Vec<Box<dyn SourceTransform>>,
}

impl TransformRegistry {
    /// Create a registry with all built-in transforms registered.
    pub fn new() -> Self {
        let transforms: Vec<Box<dyn SourceTransform>> = vec![
            Box::new(X12Transform::new()),
            Box::new(EancomTransform::new()),
            Box::new(Iso20022Transform::new()),
            Box::new(MccTransform::new()),
            Box::new(SwiftTransform::new()),
            Box::new(WebTransform::new()),
            Box::new(OnetTransform::new()),
            Box::new(JobsTransform::new()),
        ];
        Self { transforms }
    }

    /// Register an additional transform at the end of the run order.
    pub fn register(&mut self, transform: Box<dyn SourceTransform>) {
        self.transforms.push(transform);
    }

    /// Look up a transform by its source id.
    pub fn get(&self, source_id: &str) -> Option<&dyn SourceTransform> {
        self.transforms
            .iter()
            .find(|t| t.source_id() == source_id)
            .map(|t| t.as_ref())
    }

    /// All registered source ids, in run order.
    pub fn list_sources(&self) -> Vec<&'static str> {
        self.transforms.iter().map(|t| t.source_id()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn SourceTransform> {
        self.transforms.iter().map(|t| t.as_ref())
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants;

    #[test]
    fn test_registry_has_built_in_transforms() {
        let registry = TransformRegistry::new();
        let sources = registry.list_sources();
        for source in constants::get_supported_sources() {
            assert!(sources.contains(&source), "missing {}", source);
        }
    }

    #[test]
    fn test_registry_order_runs_jobs_last() {
        let registry = TransformRegistry::new();
        assert_eq!(registry.list_sources().last(), Some(&constants::JOBS_SOURCE));
    }

    #[test]
    fn test_registry_lookup_unknown_source() {
        let registry = TransformRegistry::new();
        assert!(registry.get("unknown_source").is_none());
    }
}
