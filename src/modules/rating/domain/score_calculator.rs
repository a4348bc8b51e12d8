use super::entities::{AnimeRating, TopRatedAnime};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Votes needed before an anime's own mean outweighs the global mean
pub const MIN_VOTES: f64 = 10.0;

/// Global mean used when nothing has been rated yet
pub const DEFAULT_GLOBAL_AVERAGE: f64 = 5.0;

/// IMDB-style weighted rating:
/// `weighted = v/(v+m) * R + m/(v+m) * C`
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    min_votes: f64,
    default_global_average: f64,
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self {
            min_votes: MIN_VOTES,
            default_global_average: DEFAULT_GLOBAL_AVERAGE,
        }
    }
}

impl ScoreCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_votes(mut self, min_votes: f64) -> Self {
        self.min_votes = min_votes.max(0.0);
        self
    }

    /// Mean over every rating in the system
    pub fn global_average<I>(&self, scores: I) -> f64
    where
        I: IntoIterator<Item = i16>,
    {
        let (sum, count) = scores
            .into_iter()
            .fold((0i64, 0i64), |(sum, count), s| (sum + s as i64, count + 1));
        if count == 0 {
            self.default_global_average
        } else {
            sum as f64 / count as f64
        }
    }

    pub fn weighted(&self, votes: i64, anime_average: f64, global_average: f64) -> f64 {
        let v = votes.max(0) as f64;
        let m = self.min_votes;
        if v + m == 0.0 {
            return global_average;
        }
        (v / (v + m)) * anime_average + (m / (v + m)) * global_average
    }

    pub fn aggregate<I>(&self, scores: I, global_average: f64) -> AnimeRating
    where
        I: IntoIterator<Item = i16>,
    {
        let (sum, count) = scores
            .into_iter()
            .fold((0i64, 0i64), |(sum, count), s| (sum + s as i64, count + 1));
        let average = if count == 0 {
            0.0
        } else {
            sum as f64 / count as f64
        };

        AnimeRating {
            average,
            weighted: self.weighted(count, average, global_average),
            count,
        }
    }

    /// Ranks every rated anime by weighted score against one shared global
    /// mean. Equal scores fall back to more votes, then lower id.
    pub fn top_rated(&self, scores: &[(i64, i16)], limit: usize) -> Vec<TopRatedAnime> {
        let global_average = self.global_average(scores.iter().map(|(_, s)| *s));

        let mut groups: HashMap<i64, (i64, i64)> = HashMap::new();
        for (anime_id, score) in scores {
            let entry = groups.entry(*anime_id).or_insert((0, 0));
            entry.0 += *score as i64;
            entry.1 += 1;
        }

        let mut ranked: Vec<TopRatedAnime> = groups
            .into_iter()
            .map(|(anime_id, (sum, count))| {
                let average = sum as f64 / count as f64;
                TopRatedAnime {
                    anime_id,
                    average,
                    weighted: self.weighted(count, average, global_average),
                    count,
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.weighted
                .partial_cmp(&a.weighted)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.count.cmp(&a.count))
                .then_with(|| a.anime_id.cmp(&b.anime_id))
        });
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn zero_votes_collapse_to_global_average() {
        let calc = ScoreCalculator::new();
        for global in [1.0, 5.0, 7.25, 10.0] {
            let rating = calc.aggregate(Vec::<i16>::new(), global);
            assert_eq!(rating.count, 0);
            assert_eq!(rating.average, 0.0);
            assert!((rating.weighted - global).abs() < EPS);
        }
    }

    #[test]
    fn worked_example() {
        let calc = ScoreCalculator::new();
        let rating = calc.aggregate(vec![8, 9, 7], 7.5);
        assert!((rating.average - 8.0).abs() < EPS);
        let expected = (3.0 / 13.0) * 8.0 + (10.0 / 13.0) * 7.5;
        assert!((rating.weighted - expected).abs() < EPS);
        assert!((rating.weighted - 7.615).abs() < 1e-3);
    }

    #[test]
    fn weighted_converges_monotonically_to_own_average() {
        let calc = ScoreCalculator::new();
        let (own, global) = (9.0, 6.0);
        let mut previous_gap = f64::MAX;
        for votes in [1, 10, 100, 1_000, 100_000, 10_000_000] {
            let gap = (calc.weighted(votes, own, global) - own).abs();
            assert!(gap < previous_gap);
            previous_gap = gap;
        }
        assert!(previous_gap < 1e-4);
    }

    #[test]
    fn zero_min_votes_uses_own_average() {
        let calc = ScoreCalculator::new().with_min_votes(0.0);
        assert!((calc.weighted(2, 9.0, 5.0) - 9.0).abs() < EPS);
        assert!((calc.weighted(0, 9.0, 5.0) - 5.0).abs() < EPS);
    }

    #[test]
    fn global_average_defaults_when_empty() {
        let calc = ScoreCalculator::new();
        assert_eq!(calc.global_average(Vec::<i16>::new()), DEFAULT_GLOBAL_AVERAGE);
        assert!((calc.global_average(vec![2, 4]) - 3.0).abs() < EPS);
    }

    #[test]
    fn top_rated_prefers_well_supported_scores() {
        let calc = ScoreCalculator::new();
        let mut scores = vec![(1, 10)]; // single perfect vote
        scores.extend(std::iter::repeat((2, 9)).take(40)); // many strong votes
        scores.extend(std::iter::repeat((3, 3)).take(5));

        let top = calc.top_rated(&scores, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].anime_id, 2);
        assert_eq!(top[1].anime_id, 1);
        assert!(top[0].weighted >= top[1].weighted);
    }

    #[test]
    fn top_rated_respects_limit_and_empty_input() {
        let calc = ScoreCalculator::new();
        assert!(calc.top_rated(&[], 5).is_empty());
        let scores = vec![(1, 5), (2, 6), (3, 7)];
        assert_eq!(calc.top_rated(&scores, 0).len(), 0);
        assert_eq!(calc.top_rated(&scores, 10).len(), 3);
    }
}
