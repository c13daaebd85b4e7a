use std::collections::BTreeSet;

/// Agreement between a predicted and a labelled set of node states.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassificationStats {
    /// True positive rate, `tp / (tp + fn)`.
    pub tps: f64,
    /// False negative rate, `fn / (tp + fn)`.
    pub fns: f64,
    /// False positive rate, `fp / (fp + tn)`.
    pub fps: f64,
    /// True negative rate, `tn / (fp + tn)`.
    pub tns: f64,
    /// Jaccard similarity of prediction and label.
    pub avg_sim: f64,
    pub accuracy: f64,
    /// `1 - accuracy`.
    pub errors: f64,
    pub recall: f64,
    pub precision: f64,
}

/// Jaccard index `|a ∩ b| / |a ∪ b|`. Two empty sets are identical (`1.0`).
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 1.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Compare `prediction` against `label`, where both hold node states of a network with
/// `num_nodes` state nodes.
///
/// Empty sets are handled explicitly: two empty sets are a perfect prediction, an empty
/// label makes every predicted element a false positive, and an empty prediction makes every
/// labelled element a false negative. `num_nodes` is raised to `|prediction ∪ label|` if it
/// is smaller.
pub fn classification_stats<T: Ord>(
    prediction: &BTreeSet<T>,
    label: &BTreeSet<T>,
    num_nodes: usize,
) -> ClassificationStats {
    let n = num_nodes.max(prediction.union(label).count()) as f64;

    if label.is_empty() && prediction.is_empty() {
        return ClassificationStats {
            tps: 1.0,
            fns: 0.0,
            fps: 0.0,
            tns: 1.0,
            avg_sim: 1.0,
            accuracy: 1.0,
            errors: 0.0,
            recall: 1.0,
            precision: 1.0,
        };
    }

    if label.is_empty() {
        let fp = prediction.len() as f64;
        let fps = fp / n;
        let accuracy = (n - fp) / n;
        return ClassificationStats {
            tps: 1.0,
            fns: 0.0,
            fps,
            tns: 1.0 - fps,
            avg_sim: 0.0,
            accuracy,
            errors: 1.0 - accuracy,
            recall: 1.0,
            precision: 0.0,
        };
    }

    if prediction.is_empty() {
        let fn_ = label.len() as f64;
        let accuracy = (n - fn_) / n;
        return ClassificationStats {
            tps: 0.0,
            fns: 1.0,
            fps: 0.0,
            tns: 1.0,
            avg_sim: 0.0,
            accuracy,
            errors: 1.0 - accuracy,
            recall: 0.0,
            precision: 1.0,
        };
    }

    let tp = prediction.intersection(label).count() as f64;
    let fp = prediction.difference(label).count() as f64;
    let fn_ = label.difference(prediction).count() as f64;
    let tn = n - tp - fp - fn_;

    // Without negatives, there are no false positives either.
    let (fps, tns) = if fp + tn > 0.0 {
        (fp / (fp + tn), tn / (fp + tn))
    } else {
        (0.0, 1.0)
    };
    let accuracy = (tp + tn) / (tp + tn + fp + fn_);
    ClassificationStats {
        tps: tp / (tp + fn_),
        fns: fn_ / (tp + fn_),
        fps,
        tns,
        avg_sim: jaccard(prediction, label),
        accuracy,
        errors: 1.0 - accuracy,
        recall: tp / label.len() as f64,
        precision: tp / (tp + fp),
    }
}
