/// The decoded link of a candidate onto its best predecessor.
#[derive(Clone, Debug, PartialEq)]
pub struct Link<T> {
    /// Cumulative log-likelihood of the best chain ending at the candidate.
    pub score: f64,

    /// Index of the predecessor within the previous layer, or [`None`]
    /// if the candidate starts a fresh chain.
    pub predecessor: Option<usize>,

    /// The transition taken from the predecessor.
    pub transition: Option<T>,
}

impl<T> Link<T> {
    pub fn fresh(score: f64) -> Self {
        Self {
            score,
            predecessor: None,
            transition: None,
        }
    }
}

/// The decoded candidates of a single sample.
///
/// `candidates[i]` is linked through `links[i]`.
#[derive(Clone, Debug)]
pub struct Vector<C, T> {
    pub candidates: Vec<C>,
    pub links: Vec<Link<T>>,
}

impl<C, T> Vector<C, T> {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Index of the highest scored candidate, the first in order should
    /// several share the same score.
    pub fn best(&self) -> Option<usize> {
        self.links
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (index, link)| match best {
                Some((_, score)) if score >= link.score => best,
                _ => Some((index, link.score)),
            })
            .map(|(index, _)| index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&C, &Link<T>)> {
        self.candidates.iter().zip(self.links.iter())
    }
}

/// A [`Vector`] stored within the decoding history, alongside its sample.
#[derive(Clone, Debug)]
pub struct Layer<C, T, S> {
    pub sample: S,
    pub vector: Vector<C, T>,
}
