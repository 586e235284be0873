/// Transform Module
///
/// The filter registry applied between extraction and loading. Each filter is
/// a pure function over the extracted batch; the only side effect is one
/// descriptive log line.
use rand::Rng;

use crate::error::EtlError;
use crate::models::PostRecord;

/// Number of posts the `random` filter keeps.
const RANDOM_SAMPLE_SIZE: usize = 5;

/// Named filters selectable at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transformation {
    /// Pass the batch through unchanged.
    Zero,
    /// Sample five posts uniformly at random, with replacement.
    Random,
    /// Keep posts with at least one comment.
    Discussion,
    /// Keep posts scoring more than two standard deviations above the mean.
    Popular,
}

impl Transformation {
    /// Resolve a filter name. Unknown names fail carrying the offending name.
    pub fn from_name(name: &str) -> Result<Self, EtlError> {
        match name {
            "zero" => Ok(Self::Zero),
            "random" => Ok(Self::Random),
            "discussion" => Ok(Self::Discussion),
            "popular" => Ok(Self::Popular),
            other => Err(EtlError::UnsupportedFilter(other.to_string())),
        }
    }

    /// Apply the filter to an extracted batch.
    pub fn apply(&self, posts: Vec<PostRecord>) -> Result<Vec<PostRecord>, EtlError> {
        match self {
            Self::Zero => zero_transformation(posts),
            Self::Random => random_transformation(posts),
            Self::Discussion => discussion_transformation(posts),
            Self::Popular => popular_transformation(posts),
        }
    }
}

fn zero_transformation(posts: Vec<PostRecord>) -> Result<Vec<PostRecord>, EtlError> {
    tracing::info!("No transformation applied.");
    Ok(posts)
}

/// Keeps exactly [`RANDOM_SAMPLE_SIZE`] posts, sampled with replacement:
/// duplicates are possible and the output size does not depend on the input
/// size. An empty batch has nothing to sample from and is rejected.
fn random_transformation(posts: Vec<PostRecord>) -> Result<Vec<PostRecord>, EtlError> {
    tracing::info!("Randomly selecting five posts.");
    if posts.is_empty() {
        return Err(EtlError::EmptyInput);
    }

    let mut rng = rand::thread_rng();
    let sampled = (0..RANDOM_SAMPLE_SIZE).map(|_| posts[rng.gen_range(0..posts.len())].clone()).collect();

    Ok(sampled)
}

fn discussion_transformation(posts: Vec<PostRecord>) -> Result<Vec<PostRecord>, EtlError> {
    tracing::info!("Keeping posts with one or more comments.");
    Ok(posts.into_iter().filter(|post| post.comments > 0).collect())
}

/// Threshold is the mean plus two population standard deviations (divisor N,
/// not N-1) of the batch's scores.
fn popular_transformation(posts: Vec<PostRecord>) -> Result<Vec<PostRecord>, EtlError> {
    tracing::info!("Finding the most popular posts.");
    if posts.is_empty() {
        return Err(EtlError::EmptyInput);
    }

    let scores: Vec<f64> = posts.iter().map(|post| post.score as f64).collect();
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    let variance = scores.iter().map(|score| (score - mean).powi(2)).sum::<f64>() / scores.len() as f64;
    let threshold = mean + 2.0 * variance.sqrt();

    Ok(posts.into_iter().filter(|post| (post.score as f64) > threshold).collect())
}
