//! Batch generator: streams shuffled, fixed-size batches of encoded
//! variant tensors to the training loop.
//!
//! The epoch order is an explicit, caller-owned [`EpochOrder`] rather than
//! hidden mutable state on the generator, so deterministic tests and
//! parallel batch prefetch fall out for free: the generator itself is
//! immutable and per-sample encoding has no side effects, which lets a
//! batch be assembled with rayon workers writing disjoint output slots.

use anyhow::Context;
use ndarray::{Array1, Array3, Array4, Axis};
use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result as EncodeResult;
use crate::interactions::encode_variant;
use crate::structure::StructuralContext;
use crate::wildtype::WildTypeContext;

/// Batching parameters, fixed at generator construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Samples per batch; the last batch of an epoch may be smaller.
    pub batch_size: usize,
    /// Numbering offset of the first residue in the variant strings.
    pub first_ind: i64,
    /// Whether a fresh epoch order is a random permutation or the
    /// original order.
    pub shuffle: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 64,
            first_ind: 1,
            shuffle: true,
        }
    }
}

/// One permutation of the sample indices, valid for a single epoch.
#[derive(Debug, Clone)]
pub struct EpochOrder {
    order: Vec<usize>,
}

impl EpochOrder {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.order
    }
}

/// One batch of encoded tensors, shape `(len, n, n, C)`, with labels in
/// training mode and without them in inference mode.
#[derive(Debug, Clone)]
pub struct Batch {
    pub features: Array4<f32>,
    pub labels: Option<Array1<f32>>,
}

/// Iterates a variant dataset in batches, encoding each sample through the
/// shared read-only wild-type and structural contexts.
pub struct BatchGenerator<'a> {
    variants: Vec<String>,
    labels: Option<Vec<f32>>,
    config: BatchConfig,
    wild_type: &'a WildTypeContext,
    structure: &'a StructuralContext,
}

impl<'a> BatchGenerator<'a> {
    /// Builds a generator, validating the configuration up front: context
    /// shapes must agree and labels, when present, must parallel the
    /// variants. Pass `labels: None` for inference mode.
    pub fn new(
        variants: Vec<String>,
        labels: Option<Vec<f32>>,
        config: BatchConfig,
        wild_type: &'a WildTypeContext,
        structure: &'a StructuralContext,
    ) -> anyhow::Result<Self> {
        structure.check_sequence_len(wild_type.len())?;
        if config.batch_size == 0 {
            anyhow::bail!("batch_size must be non-zero");
        }
        if let Some(labels) = &labels {
            if labels.len() != variants.len() {
                anyhow::bail!(
                    "labels length {} does not match {} variants",
                    labels.len(),
                    variants.len()
                );
            }
        }
        Ok(Self {
            variants,
            labels,
            config,
            wild_type,
            structure,
        })
    }

    /// Number of samples in the dataset.
    pub fn num_samples(&self) -> usize {
        self.variants.len()
    }

    /// Batches per epoch: `ceil(N / batch_size)`.
    pub fn num_batches(&self) -> usize {
        (self.variants.len() + self.config.batch_size - 1) / self.config.batch_size
    }

    /// Tensor channel count for this configuration.
    pub fn channels(&self) -> usize {
        self.wild_type.channels()
    }

    /// Starts a new epoch: a random permutation when shuffling is enabled,
    /// the original order otherwise. Calling this once per completed epoch
    /// is the explicit end-of-epoch reshuffle hook.
    pub fn epoch_order<R: Rng>(&self, rng: &mut R) -> EpochOrder {
        let mut order: Vec<usize> = (0..self.variants.len()).collect();
        if self.config.shuffle {
            order.shuffle(rng);
        }
        EpochOrder { order }
    }

    /// Encodes the `idx`-th batch of the epoch.
    ///
    /// Samples in the batch are encoded in parallel; a single failed
    /// sample aborts the whole batch, since it indicates a data problem
    /// rather than a transient fault.
    pub fn batch(&self, order: &EpochOrder, idx: usize) -> anyhow::Result<Batch> {
        if order.len() != self.variants.len() {
            anyhow::bail!(
                "epoch order covers {} samples but the dataset has {}",
                order.len(),
                self.variants.len()
            );
        }
        if idx >= self.num_batches() {
            anyhow::bail!("batch index {} out of range (0..{})", idx, self.num_batches());
        }

        let start = idx * self.config.batch_size;
        let end = (start + self.config.batch_size).min(self.variants.len());
        let window = &order.indices()[start..end];

        let tensors: EncodeResult<Vec<Array3<f32>>> = window
            .par_iter()
            .map(|&sample| {
                encode_variant(
                    &self.variants[sample],
                    self.wild_type,
                    self.structure,
                    self.config.first_ind,
                )
            })
            .collect();
        let tensors = tensors.with_context(|| format!("encoding batch {}", idx))?;

        let n = self.wild_type.len();
        let channels = self.channels();
        let mut features = Array4::zeros((window.len(), n, n, channels));
        for (slot, tensor) in tensors.iter().enumerate() {
            features.index_axis_mut(Axis(0), slot).assign(tensor);
        }

        let labels = self
            .labels
            .as_ref()
            .map(|labels| window.iter().map(|&sample| labels[sample]).collect());

        log::debug!(
            "encoded batch {}/{} ({} samples)",
            idx + 1,
            self.num_batches(),
            window.len()
        );

        Ok(Batch { features, labels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn contexts(n: usize) -> (WildTypeContext, StructuralContext) {
        let seq: String = std::iter::repeat('A').take(n).collect();
        let wt = WildTypeContext::new(&seq, None).unwrap();
        let structure = StructuralContext::new(
            Array2::from_elem((n, n), 5.0),
            Array2::from_elem((n, n), 0.5),
            Array2::from_shape_fn((n, n), |(i, j)| i != j),
            20.0,
        )
        .unwrap();
        (wt, structure)
    }

    fn wild_type_samples(count: usize) -> (Vec<String>, Vec<f32>) {
        let variants = vec![String::new(); count];
        let labels = (0..count).map(|i| i as f32).collect();
        (variants, labels)
    }

    #[test]
    fn batch_count_is_ceil_of_samples_over_batch_size() {
        let (wt, structure) = contexts(4);
        let (variants, labels) = wild_type_samples(105);
        let config = BatchConfig {
            batch_size: 32,
            shuffle: false,
            ..BatchConfig::default()
        };
        let gen = BatchGenerator::new(variants, Some(labels), config, &wt, &structure).unwrap();
        assert_eq!(gen.num_batches(), 4);

        let mut rng = StdRng::seed_from_u64(0);
        let order = gen.epoch_order(&mut rng);
        let last = gen.batch(&order, 3).unwrap();
        assert_eq!(last.features.dim(), (9, 4, 4, 6));
        assert_eq!(last.labels.as_ref().unwrap().len(), 9);
    }

    #[test]
    fn unshuffled_epoch_keeps_original_order() {
        let (wt, structure) = contexts(4);
        let (variants, labels) = wild_type_samples(10);
        let config = BatchConfig {
            batch_size: 4,
            shuffle: false,
            ..BatchConfig::default()
        };
        let gen = BatchGenerator::new(variants, Some(labels), config, &wt, &structure).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let order = gen.epoch_order(&mut rng);
        assert_eq!(order.indices(), (0..10).collect::<Vec<_>>());

        let batch = gen.batch(&order, 1).unwrap();
        let labels = batch.labels.unwrap();
        assert_eq!(labels, Array1::from_vec(vec![4.0, 5.0, 6.0, 7.0]));
    }

    #[test]
    fn shuffled_epochs_are_deterministic_under_a_seeded_rng() {
        let (wt, structure) = contexts(4);
        let (variants, labels) = wild_type_samples(20);
        let config = BatchConfig {
            batch_size: 8,
            shuffle: true,
            ..BatchConfig::default()
        };
        let gen = BatchGenerator::new(variants, Some(labels), config, &wt, &structure).unwrap();

        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(
            gen.epoch_order(&mut a).indices(),
            gen.epoch_order(&mut b).indices()
        );
    }

    #[test]
    fn inference_mode_returns_no_labels() {
        let (wt, structure) = contexts(4);
        let (variants, _) = wild_type_samples(5);
        let config = BatchConfig {
            batch_size: 2,
            shuffle: false,
            ..BatchConfig::default()
        };
        let gen = BatchGenerator::new(variants, None, config, &wt, &structure).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let order = gen.epoch_order(&mut rng);
        let batch = gen.batch(&order, 0).unwrap();
        assert!(batch.labels.is_none());
        assert_eq!(batch.features.dim(), (2, 4, 4, 6));
    }

    #[test]
    fn construction_validates_configuration() {
        let (wt, structure) = contexts(4);
        let (variants, labels) = wild_type_samples(5);

        let bad = BatchConfig {
            batch_size: 0,
            ..BatchConfig::default()
        };
        assert!(BatchGenerator::new(
            variants.clone(),
            Some(labels.clone()),
            bad,
            &wt,
            &structure
        )
        .is_err());

        assert!(BatchGenerator::new(
            variants,
            Some(vec![1.0; 3]),
            BatchConfig::default(),
            &wt,
            &structure
        )
        .is_err());
    }

    #[test]
    fn a_bad_sample_aborts_its_batch() {
        let (wt, structure) = contexts(4);
        let variants = vec![String::new(), "A9G".to_string()];
        let config = BatchConfig {
            batch_size: 2,
            shuffle: false,
            ..BatchConfig::default()
        };
        let gen = BatchGenerator::new(variants, None, config, &wt, &structure).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let order = gen.epoch_order(&mut rng);
        assert!(gen.batch(&order, 0).is_err());
    }
}
