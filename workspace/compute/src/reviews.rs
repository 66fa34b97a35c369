use common::converters::share;
use common::{ReviewBucket, ReviewDistribution};
use model::Dataset;
use tracing::{instrument, warn};

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

/// Counts reviews per score.
///
/// Always returns one bucket per score from 1 to 5, in that order, including
/// empty ones.
#[instrument(skip(dataset), fields(reviews = dataset.reviews.len()))]
pub fn review_distribution(dataset: &Dataset) -> ReviewDistribution {
    let mut counts = [0u64; MAX_SCORE as usize];
    let mut score_sum = 0u64;

    for review in &dataset.reviews {
        if !(MIN_SCORE..=MAX_SCORE).contains(&review.score) {
            warn!(order_id = %review.order_id, score = review.score, "Ignoring out of range review score");
            continue;
        }
        counts[(review.score - MIN_SCORE) as usize] += 1;
        score_sum += review.score as u64;
    }

    let total_reviews: u64 = counts.iter().sum();

    let buckets = (MIN_SCORE..=MAX_SCORE)
        .zip(counts)
        .map(|(score, count)| ReviewBucket {
            score,
            count,
            proportion: share(count, total_reviews),
        })
        .collect();

    ReviewDistribution {
        total_reviews,
        average_score: (total_reviews > 0).then(|| score_sum as f64 / total_reviews as f64),
        buckets,
    }
}
