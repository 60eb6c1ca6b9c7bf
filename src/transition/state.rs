use crate::transition::{Layer, Unmatched, Vector};

use log::{debug, trace};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// A matched sample of the decoded sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Matched<C, T, S> {
    pub sample: S,
    pub candidate: C,

    /// The transition from the previous matched candidate,
    /// absent at the start of the sequence or of a fresh chain.
    pub transition: Option<T>,
}

/// The decoding history of an online filter.
///
/// Stores the decoded layers of every matched sample which has not yet
/// converged. Whenever all surviving chains pass through a single candidate,
/// everything before it is final, and is moved out of the history into the
/// committed sequence. The history is therefore bounded by how long it takes
/// competing hypotheses to converge, not by the length of the trace.
#[derive(Clone, Debug)]
pub struct State<C, T, S> {
    layers: VecDeque<Layer<C, T, S>>,
    committed: Vec<Matched<C, T, S>>,

    last: Option<S>,
    failures: usize,
    accepted: usize,
}

impl<C, T, S> Default for State<C, T, S> {
    fn default() -> Self {
        Self {
            layers: VecDeque::new(),
            committed: Vec::new(),
            last: None,
            failures: 0,
            accepted: 0,
        }
    }
}

impl<C, T, S> State<C, T, S>
where
    C: Clone,
    T: Clone,
    S: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently matched layer.
    pub fn layer(&self) -> Option<&Layer<C, T, S>> {
        self.layers.back()
    }

    /// The decoded vector of the most recently matched sample.
    pub fn vector(&self) -> Option<&Vector<C, T>> {
        self.layer().map(|layer| &layer.vector)
    }

    /// The most recently accepted sample, matched or not.
    pub fn sample(&self) -> Option<&S> {
        self.last.as_ref()
    }

    /// The number of consecutive samples which could not be matched.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// The number of samples accepted into the state, matched or not.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// The number of layers retained in the decoding history.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty() && self.committed.is_empty()
    }

    /// The number of matched samples which have converged.
    pub fn committed(&self) -> usize {
        self.committed.len()
    }

    /// Records the outcome of filtering the `sample`.
    pub fn update(&mut self, result: Result<Vector<C, T>, Unmatched>, sample: S) {
        self.accepted += 1;
        self.last = Some(sample.clone());

        match result {
            Ok(vector) => {
                self.failures = 0;
                self.layers.push_back(Layer { sample, vector });
                self.prune();
            }
            Err(reason) => {
                self.failures += 1;
                debug!(
                    "Sample unmatched ({reason}), {} consecutive failures",
                    self.failures
                );
            }
        }
    }

    /// The current best estimate, the highest scored candidate of the last layer.
    pub fn estimate(&self) -> Option<&C> {
        let vector = self.vector()?;
        vector.best().map(|index| &vector.candidates[index])
    }

    /// The predecessor of the candidate at `index` within layer `layer`.
    ///
    /// A candidate starting a fresh chain continues from the best candidate
    /// of the previous layer, such that the sequence is never interrupted.
    fn predecessor(&self, layer: usize, index: usize) -> Option<usize> {
        let previous = self.layers.get(layer.checked_sub(1)?)?;
        self.layers[layer].vector.links[index]
            .predecessor
            .or_else(|| previous.vector.best())
    }

    /// Walks back from `index` in layer `layer` to the oldest retained layer,
    /// returning the chain in chronological order.
    fn backtrack(&self, layer: usize, index: usize) -> Vec<Matched<C, T, S>> {
        let mut chain = Vec::with_capacity(layer + 1);
        let mut cursor = Some(index);

        for depth in (0..=layer).rev() {
            let Some(index) = cursor else { break };
            let Layer { sample, vector } = &self.layers[depth];

            chain.push(Matched {
                sample: sample.clone(),
                candidate: vector.candidates[index].clone(),
                transition: vector.links[index].transition.clone(),
            });

            cursor = self.predecessor(depth, index);
        }

        chain.reverse();
        chain
    }

    /// The most probable sequence of candidates, in chronological order.
    ///
    /// This is the committed sequence, followed by the backtrace
    /// from the best candidate of the most recent layer.
    pub fn sequence(&self) -> Vec<Matched<C, T, S>> {
        let mut sequence = self.committed.clone();

        if let Some(best) = self.vector().and_then(Vector::best) {
            sequence.extend(self.backtrack(self.layers.len() - 1, best));
        }

        sequence
    }

    fn prune(&mut self) {
        let Some(newest) = self.layers.len().checked_sub(1) else {
            return;
        };

        // Mark every candidate still reachable from the newest layer.
        let mut alive: Vec<FxHashSet<usize>> = vec![FxHashSet::default(); self.layers.len()];
        alive[newest] = (0..self.layers[newest].vector.len()).collect();

        for layer in (1..=newest).rev() {
            let predecessors = alive[layer]
                .iter()
                .filter_map(|&index| self.predecessor(layer, index))
                .collect();
            alive[layer - 1] = predecessors;
        }

        // Remove dead candidates, remapping the links of the following layer.
        let mut remap: Option<Vec<Option<usize>>> = None;
        for (layer, alive) in self.layers.iter_mut().zip(alive) {
            let vector = &mut layer.vector;

            if let Some(remap) = remap.take() {
                for link in &mut vector.links {
                    link.predecessor = link.predecessor.and_then(|index| remap[index]);
                }
            }

            let mut next = vec![None; vector.len()];
            let mut retained = 0;
            for (index, slot) in next.iter_mut().enumerate() {
                if alive.contains(&index) {
                    *slot = Some(retained);
                    retained += 1;
                }
            }

            let mut index = 0;
            vector.candidates.retain(|_| {
                index += 1;
                alive.contains(&(index - 1))
            });

            let mut index = 0;
            vector.links.retain(|_| {
                index += 1;
                alive.contains(&(index - 1))
            });

            remap = Some(next);
        }

        // Commit everything before the newest point of convergence.
        let Some(converged) = (1..=newest)
            .rev()
            .find(|&layer| self.layers[layer].vector.len() == 1)
        else {
            return;
        };

        if let Some(predecessor) = self.predecessor(converged, 0) {
            let chain = self.backtrack(converged - 1, predecessor);
            trace!("Committing {} converged samples", chain.len());
            self.committed.extend(chain);
        }

        self.layers.drain(..converged);
        if let Some(layer) = self.layers.front_mut() {
            layer.vector.links[0].predecessor = None;
        }
    }
}
