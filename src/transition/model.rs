use rayon::iter::{FromParallelIterator, IntoParallelIterator, ParallelIterator};
use rustc_hash::FxHashMap;

/// A sample, alongside the candidates it produced.
#[derive(Debug)]
pub struct Observation<'a, S, C> {
    pub sample: &'a S,
    pub candidates: &'a [C],
}

impl<S, C> Clone for Observation<'_, S, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, C> Copy for Observation<'_, S, C> {}

impl<'a, S, C> Observation<'a, S, C> {
    pub fn new(sample: &'a S, candidates: &'a [C]) -> Self {
        Self { sample, candidates }
    }
}

/// The transitions between two consecutive sets of candidates.
///
/// Holds one partition per predecessor (by index), each mapping the index of a
/// reachable candidate onto its transition and transition probability. Pairs
/// absent from the mapping have a probability of zero.
#[derive(Debug)]
pub struct Transitions<T> {
    partitions: Vec<FxHashMap<usize, (T, f64)>>,
}

impl<T> Default for Transitions<T> {
    fn default() -> Self {
        Self {
            partitions: Vec::new(),
        }
    }
}

impl<T> Transitions<T> {
    pub fn get(&self, predecessor: usize, candidate: usize) -> Option<&(T, f64)> {
        self.partitions.get(predecessor)?.get(&candidate)
    }

    /// The transitions leaving the given predecessor.
    pub fn departing(&self, predecessor: usize) -> Option<&FxHashMap<usize, (T, f64)>> {
        self.partitions.get(predecessor)
    }

    /// Total number of transitions, across all predecessors.
    pub fn len(&self) -> usize {
        self.partitions.iter().map(|partition| partition.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> FromIterator<FxHashMap<usize, (T, f64)>> for Transitions<T> {
    fn from_iter<I: IntoIterator<Item = FxHashMap<usize, (T, f64)>>>(iter: I) -> Self {
        Self {
            partitions: iter.into_iter().collect(),
        }
    }
}

impl<T> FromParallelIterator<FxHashMap<usize, (T, f64)>> for Transitions<T>
where
    T: Send,
{
    fn from_par_iter<I>(partitions: I) -> Self
    where
        I: IntoParallelIterator<Item = FxHashMap<usize, (T, f64)>>,
    {
        Self {
            partitions: partitions.into_par_iter().collect(),
        }
    }
}

/// The matching strategy of a Hidden-Markov-Model filter.
///
/// A model supplies the two problem-specific operations of the filter,
/// generating weighted candidates for a sample, and weighting the
/// transitions between two consecutive sets of candidates. The
/// [`Filter`](crate::transition::Filter) supplies everything else.
pub trait Model {
    type Sample: Clone;
    type Candidate: Clone;
    type Transition: Clone;

    /// Generates the candidates of `sample` and their emission probabilities.
    ///
    /// The `predecessors` are the candidates of the last matched sample,
    /// and are empty at the start of a trace.
    fn candidates(
        &self,
        predecessors: &[Self::Candidate],
        sample: &Self::Sample,
    ) -> Vec<(Self::Candidate, f64)>;

    /// Generates the transitions, and their probabilities, from each of the
    /// `predecessors` candidates onto the `candidates`.
    fn transitions(
        &self,
        predecessors: Observation<'_, Self::Sample, Self::Candidate>,
        candidates: Observation<'_, Self::Sample, Self::Candidate>,
    ) -> Transitions<Self::Transition>;
}
