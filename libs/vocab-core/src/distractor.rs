//! Multiple-choice options for quiz-style review.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::types::{ChoiceOption, Term};

/// Maximum number of wrong answers offered alongside the correct one.
pub const MAX_DISTRACTORS: usize = 3;

/// Build shuffled answer options for `chosen`.
///
/// Distractors are drawn uniformly without replacement from the other
/// terms of the set (matched by ID). Small sets yield fewer options; the
/// list is never padded.
pub fn build_options<R>(chosen: &Term, terms: &[Term], rng: &mut R) -> Vec<ChoiceOption>
where
    R: Rng + ?Sized,
{
    let pool: Vec<&Term> = terms.iter().filter(|t| t.id != chosen.id).collect();
    let count = MAX_DISTRACTORS.min(pool.len());

    let mut options: Vec<ChoiceOption> = std::iter::once(chosen)
        .chain(pool.choose_multiple(rng, count).copied())
        .map(|t| ChoiceOption {
            id: t.id,
            meaning: t.meaning.clone(),
        })
        .collect();
    options.shuffle(rng);
    options
}
