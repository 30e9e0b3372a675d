//! Classifier capability and concrete backends
//!
//! The match engine only needs "give me the probability that this feature
//! vector is a match". Backends are trained elsewhere and loaded as
//! artifacts; nothing here fits or updates a model.

use crate::explain::FeatureImportance;
use namesake_core::{Error, FeatureVector, Result, FEATURE_COUNT};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// A trained probabilistic binary classifier safe for concurrent inference
pub trait Classifier: Send + Sync {
    /// Probability of the positive (match) class
    fn predict_proba(&self, features: &FeatureVector) -> f64;

    /// Per-feature importance aligned to the feature order, if the model
    /// exposes one. Used for reporting only.
    fn feature_importances(&self) -> Option<FeatureImportance> {
        None
    }

    /// Structural check run before the classifier is served
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// A classifier whose inference needs exclusive access (scratch buffers,
/// non-reentrant native handles)
pub trait ClassifierMut: Send {
    fn predict_proba(&mut self, features: &FeatureVector) -> f64;

    fn feature_importances(&self) -> Option<FeatureImportance> {
        None
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Serializes calls into a [`ClassifierMut`] so it can be shared
///
/// The lock covers inference only; feature extraction happens before the
/// classifier is reached and runs unlocked.
pub struct SerializedClassifier<C: ClassifierMut> {
    inner: Mutex<C>,
}

impl<C: ClassifierMut> SerializedClassifier<C> {
    pub fn new(inner: C) -> Self {
        Self { inner: Mutex::new(inner) }
    }

    pub fn into_inner(self) -> C {
        self.inner.into_inner()
    }
}

impl<C: ClassifierMut> Classifier for SerializedClassifier<C> {
    fn predict_proba(&self, features: &FeatureVector) -> f64 {
        self.inner.lock().predict_proba(features)
    }

    fn feature_importances(&self) -> Option<FeatureImportance> {
        self.inner.lock().feature_importances()
    }

    fn validate(&self) -> Result<()> {
        self.inner.lock().validate()
    }
}

/// Clamp a raw model output into [0, 1]; NaN becomes 0
pub fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// A node of a flattened binary decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// `x[feature] <= threshold` goes to `left`, otherwise `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { probability: f64 },
}

/// Binary decision tree stored as a flat node array, root at index 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    /// Leaf probability reached by `x`
    ///
    /// A valid tree reaches a leaf in fewer than `nodes.len()` steps. Walks
    /// that run off the array or revisit a node score 0.
    pub fn predict(&self, x: &[f64]) -> f64 {
        let mut idx = 0;
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { probability }) => return *probability,
                Some(TreeNode::Split { feature, threshold, left, right }) => {
                    let value = x.get(*feature).copied().unwrap_or(0.0);
                    idx = if value <= *threshold { *left } else { *right };
                }
                None => return 0.0,
            }
        }
        0.0
    }

    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(Error::InvalidModel("tree has no nodes".to_string()));
        }
        let n = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split { feature, threshold, left, right } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(Error::InvalidModel(format!(
                            "node {} splits on feature {} (only {} features)",
                            i, feature, FEATURE_COUNT
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(Error::InvalidModel(format!(
                            "node {} has a non-finite threshold",
                            i
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= n {
                            return Err(Error::InvalidModel(format!(
                                "node {} has invalid child index {}",
                                i, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { probability } => {
                    if !(0.0..=1.0).contains(probability) {
                        return Err(Error::InvalidModel(format!(
                            "leaf {} probability {} outside [0, 1]",
                            i, probability
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Soft-voting ensemble of decision trees (random forest inference)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub trees: Vec<DecisionTree>,
    /// Impurity-based importances from training, in feature order
    #[serde(default)]
    pub importances: Option<Vec<f64>>,
}

impl TreeEnsemble {
    pub fn new(trees: Vec<DecisionTree>) -> Self {
        Self { trees, importances: None }
    }

    pub fn with_importances(mut self, importances: Vec<f64>) -> Self {
        self.importances = Some(importances);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(Error::InvalidModel("ensemble has no trees".to_string()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate().map_err(|e| match e {
                Error::InvalidModel(msg) => Error::InvalidModel(format!("tree {}: {}", i, msg)),
                other => other,
            })?;
        }
        if let Some(importances) = &self.importances {
            validate_weights(importances, "importances")?;
        }
        Ok(())
    }
}

impl Classifier for TreeEnsemble {
    fn predict_proba(&self, features: &FeatureVector) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let x = features.as_slice();
        let sum: f64 = self.trees.iter().map(|t| t.predict(x)).sum();
        sum / self.trees.len() as f64
    }

    fn feature_importances(&self) -> Option<FeatureImportance> {
        self.importances
            .as_deref()
            .and_then(FeatureImportance::from_slice)
    }

    fn validate(&self) -> Result<()> {
        TreeEnsemble::validate(self)
    }
}

/// Logistic regression over the raw feature vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl LogisticModel {
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    pub fn validate(&self) -> Result<()> {
        validate_weights(&self.weights, "weights")?;
        if !self.bias.is_finite() {
            return Err(Error::InvalidModel("bias is not finite".to_string()));
        }
        Ok(())
    }
}

impl Classifier for LogisticModel {
    fn predict_proba(&self, features: &FeatureVector) -> f64 {
        let z: f64 = self
            .weights
            .iter()
            .zip(features.as_slice())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias;
        1.0 / (1.0 + (-z).exp())
    }

    /// Absolute weights normalized to sum to 1
    fn feature_importances(&self) -> Option<FeatureImportance> {
        let total: f64 = self.weights.iter().map(|w| w.abs()).sum();
        if total == 0.0 {
            return None;
        }
        let normalized: Vec<f64> = self.weights.iter().map(|w| w.abs() / total).collect();
        FeatureImportance::from_slice(&normalized)
    }

    fn validate(&self) -> Result<()> {
        LogisticModel::validate(self)
    }
}

/// Every persisted classifier kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierBackend {
    TreeEnsemble(TreeEnsemble),
    Logistic(LogisticModel),
}

impl ClassifierBackend {
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifierBackend::TreeEnsemble(_) => "tree_ensemble",
            ClassifierBackend::Logistic(_) => "logistic",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            ClassifierBackend::TreeEnsemble(m) => m.validate(),
            ClassifierBackend::Logistic(m) => m.validate(),
        }
    }
}

impl Classifier for ClassifierBackend {
    fn predict_proba(&self, features: &FeatureVector) -> f64 {
        match self {
            ClassifierBackend::TreeEnsemble(m) => m.predict_proba(features),
            ClassifierBackend::Logistic(m) => m.predict_proba(features),
        }
    }

    fn feature_importances(&self) -> Option<FeatureImportance> {
        match self {
            ClassifierBackend::TreeEnsemble(m) => m.feature_importances(),
            ClassifierBackend::Logistic(m) => m.feature_importances(),
        }
    }

    fn validate(&self) -> Result<()> {
        ClassifierBackend::validate(self)
    }
}

fn validate_weights(values: &[f64], what: &str) -> Result<()> {
    if values.len() != FEATURE_COUNT {
        return Err(Error::InvalidModel(format!(
            "{} has {} entries, expected {}",
            what,
            values.len(),
            FEATURE_COUNT
        )));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(Error::InvalidModel(format!("{} contain non-finite values", what)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use namesake_core::{extract, Feature};

    fn stump(feature: Feature, threshold: f64, low: f64, high: f64) -> DecisionTree {
        DecisionTree::new(vec![
            TreeNode::Split {
                feature: feature.index(),
                threshold,
                left: 1,
                right: 2,
            },
            TreeNode::Leaf { probability: low },
            TreeNode::Leaf { probability: high },
        ])
    }

    #[test]
    fn test_tree_follows_split() {
        let tree = stump(Feature::LevenshteinRatio, 0.8, 0.1, 0.9);
        let close = extract("Suresh Kumar", "Suresh Kumaar");
        let far = extract("Suresh Kumar", "Neha Gupta");
        assert_eq!(tree.predict(close.as_slice()), 0.9);
        assert_eq!(tree.predict(far.as_slice()), 0.1);
    }

    #[test]
    fn test_ensemble_averages_trees() {
        let ensemble = TreeEnsemble::new(vec![
            stump(Feature::LevenshteinRatio, 0.8, 0.0, 1.0),
            stump(Feature::LevenshteinRatio, 2.0, 0.5, 1.0),
        ]);
        let v = extract("Ravi", "Ravi");
        assert_eq!(ensemble.predict_proba(&v), 0.75);
    }

    #[test]
    fn test_tree_validation() {
        assert!(stump(Feature::LenRatio, 0.5, 0.0, 1.0).validate().is_ok());
        assert!(DecisionTree::new(vec![]).validate().is_err());

        let bad_feature = DecisionTree::new(vec![
            TreeNode::Split { feature: FEATURE_COUNT, threshold: 0.0, left: 1, right: 2 },
            TreeNode::Leaf { probability: 0.0 },
            TreeNode::Leaf { probability: 1.0 },
        ]);
        assert!(bad_feature.validate().is_err());

        let cycle = DecisionTree::new(vec![
            TreeNode::Split { feature: 0, threshold: 0.0, left: 0, right: 1 },
            TreeNode::Leaf { probability: 1.0 },
        ]);
        assert!(cycle.validate().is_err());

        let bad_leaf = DecisionTree::new(vec![TreeNode::Leaf { probability: 1.5 }]);
        assert!(bad_leaf.validate().is_err());

        for threshold in [f64::NAN, f64::INFINITY] {
            let bad_threshold = DecisionTree::new(vec![
                TreeNode::Split { feature: 0, threshold, left: 1, right: 2 },
                TreeNode::Leaf { probability: 0.0 },
                TreeNode::Leaf { probability: 1.0 },
            ]);
            assert!(matches!(bad_threshold.validate(), Err(Error::InvalidModel(_))));
        }
    }

    #[test]
    fn test_cyclic_tree_walk_terminates() {
        let self_loop = DecisionTree::new(vec![TreeNode::Split {
            feature: 0,
            threshold: 0.0,
            left: 0,
            right: 0,
        }]);
        let v = extract("Ravi", "Ravi");
        assert_eq!(self_loop.predict(v.as_slice()), 0.0);

        let back_edge = DecisionTree::new(vec![
            TreeNode::Split { feature: 0, threshold: 100.0, left: 1, right: 2 },
            TreeNode::Split { feature: 0, threshold: 100.0, left: 0, right: 2 },
            TreeNode::Leaf { probability: 1.0 },
        ]);
        assert_eq!(back_edge.predict(v.as_slice()), 0.0);
        assert!(TreeEnsemble::new(vec![back_edge]).predict_proba(&v) == 0.0);
    }

    #[test]
    fn test_trait_validate_reaches_backends() {
        let short: &dyn Classifier = &LogisticModel::new(vec![1.0; 3], 0.0);
        assert!(short.validate().is_err());

        let cyclic: &dyn Classifier = &TreeEnsemble::new(vec![DecisionTree::new(vec![
            TreeNode::Split { feature: 0, threshold: 0.0, left: 0, right: 0 },
        ])]);
        assert!(cyclic.validate().is_err());

        let backend: &dyn Classifier =
            &ClassifierBackend::Logistic(LogisticModel::new(vec![0.0; FEATURE_COUNT], 0.0));
        assert!(backend.validate().is_ok());
    }

    #[test]
    fn test_ensemble_validation() {
        assert!(TreeEnsemble::new(vec![]).validate().is_err());
        let with_short_importances =
            TreeEnsemble::new(vec![stump(Feature::LenRatio, 0.5, 0.0, 1.0)])
                .with_importances(vec![1.0]);
        assert!(with_short_importances.validate().is_err());
    }

    #[test]
    fn test_logistic_model() {
        let mut weights = vec![0.0; FEATURE_COUNT];
        weights[Feature::LevenshteinRatio.index()] = 10.0;
        let model = LogisticModel::new(weights, -5.0);
        assert!(model.validate().is_ok());

        let same = extract("Ravi", "Ravi");
        assert!((model.predict_proba(&same) - 1.0 / (1.0 + (-5.0f64).exp())).abs() < 1e-12);

        let importances = model.feature_importances().unwrap();
        assert_eq!(importances.get(Feature::LevenshteinRatio), 1.0);
        assert_eq!(importances.get(Feature::LenDiff), 0.0);
    }

    #[test]
    fn test_logistic_without_weights_has_no_importances() {
        let model = LogisticModel::new(vec![0.0; FEATURE_COUNT], 0.0);
        assert!(model.feature_importances().is_none());
        assert!(LogisticModel::new(vec![0.0; 3], 0.0).validate().is_err());
    }

    #[test]
    fn test_clamp_probability() {
        assert_eq!(clamp_probability(f64::NAN), 0.0);
        assert_eq!(clamp_probability(-0.2), 0.0);
        assert_eq!(clamp_probability(1.2), 1.0);
        assert_eq!(clamp_probability(0.4), 0.4);
    }

    struct CountingClassifier {
        calls: usize,
    }

    impl ClassifierMut for CountingClassifier {
        fn predict_proba(&mut self, _features: &FeatureVector) -> f64 {
            self.calls += 1;
            0.5
        }
    }

    #[test]
    fn test_serialized_classifier() {
        let shared = SerializedClassifier::new(CountingClassifier { calls: 0 });
        let v = extract("Ravi", "Ravi");
        assert_eq!(shared.predict_proba(&v), 0.5);
        assert_eq!(shared.predict_proba(&v), 0.5);
        assert!(shared.feature_importances().is_none());
        assert_eq!(shared.into_inner().calls, 2);
    }

    #[test]
    fn test_backend_json_shape() {
        let backend =
            ClassifierBackend::Logistic(LogisticModel::new(vec![0.0; FEATURE_COUNT], 0.0));
        let json = serde_json::to_value(&backend).unwrap();
        assert!(json.get("logistic").is_some());
        assert_eq!(backend.kind(), "logistic");
    }
}
