use crate::config::ModelStoreConfig;
use crate::error::{AppError, Result};
use crate::ml::classifier::{ImpactClassifier, LogisticClassifierArtifact};
use crate::ml::features::FeatureSchema;
use crate::ml::models::TrainingMetadata;
use crate::ml::regressor::{DelayRegressor, LinearRegressorArtifact};
use tracing::{info, warn};

/// Holds the trained models, the feature schema, and optional training
/// metadata for the lifetime of the process
///
/// The registry is constructed explicitly at startup and shared behind an
/// `Arc`; prediction calls never touch storage. A load failure is fatal for
/// the process rather than something to retry per request.
pub struct ModelRegistry {
    classifier: Box<dyn ImpactClassifier>,
    regressor: Box<dyn DelayRegressor>,
    schema: FeatureSchema,
    metadata: Option<TrainingMetadata>,
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry").finish_non_exhaustive()
    }
}

impl ModelRegistry {
    /// Assemble a registry from already-constructed parts
    ///
    /// Used by tests to inject fake models; production code goes through
    /// [`ModelRegistry::load`].
    pub fn new(
        classifier: Box<dyn ImpactClassifier>,
        regressor: Box<dyn DelayRegressor>,
        schema: FeatureSchema,
        metadata: Option<TrainingMetadata>,
    ) -> Self {
        Self {
            classifier,
            regressor,
            schema,
            metadata,
        }
    }

    /// Load all artifacts from the configured model store
    ///
    /// Coefficient counts are cross-checked against the schema here so a
    /// mis-deployed artifact fails at startup, not on the first request.
    pub fn load(config: &ModelStoreConfig) -> Result<Self> {
        let schema = FeatureSchema::load(&config.feature_list_path())?;
        if schema.is_empty() {
            return Err(AppError::ModelUnavailable(
                "feature schema is empty".to_string(),
            ));
        }

        let classifier = LogisticClassifierArtifact::load(&config.classifier_path())?;
        if classifier.n_features() != schema.len() {
            return Err(AppError::SchemaMismatch {
                expected: schema.len(),
                actual: classifier.n_features(),
            });
        }

        let regressor = LinearRegressorArtifact::load(&config.regressor_path())?;
        if regressor.n_features() != schema.len() {
            return Err(AppError::SchemaMismatch {
                expected: schema.len(),
                actual: regressor.n_features(),
            });
        }

        // Metadata is provenance, not a dependency: absence or rot must not
        // take predictions down.
        let metadata_path = config.metadata_path();
        let metadata = match std::fs::read_to_string(&metadata_path) {
            Ok(text) => match serde_json::from_str::<TrainingMetadata>(&text) {
                Ok(meta) => Some(meta),
                Err(e) => {
                    warn!(
                        path = %metadata_path.display(),
                        error = %e,
                        "Ignoring unparseable training metadata"
                    );
                    None
                }
            },
            Err(_) => None,
        };

        info!(
            classifier = %classifier.name,
            regressor = %regressor.name,
            n_features = schema.len(),
            has_metadata = metadata.is_some(),
            "Model registry loaded"
        );

        Ok(Self {
            classifier: Box::new(classifier),
            regressor: Box::new(regressor),
            schema,
            metadata,
        })
    }

    pub fn classifier(&self) -> &dyn ImpactClassifier {
        self.classifier.as_ref()
    }

    pub fn regressor(&self) -> &dyn DelayRegressor {
        self.regressor.as_ref()
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn metadata(&self) -> Option<&TrainingMetadata> {
        self.metadata.as_ref()
    }
}
