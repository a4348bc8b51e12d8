use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceStat {
    pub voice: String,
    pub count: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceStats {
    pub total: i64,
    pub stats: Vec<VoiceStat>,
}

/// Counts labels, most popular first. Equal counts keep the order in which
/// each label first appeared in `voices`.
pub fn tally<I, S>(voices: I) -> VoiceStats
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    // label -> slot in `counts`, which keeps first-seen order
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, i64)> = Vec::new();
    let mut total = 0i64;

    for voice in voices {
        let voice = voice.as_ref();
        total += 1;
        match slots.get(voice) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(voice.to_string(), counts.len());
                counts.push((voice.to_string(), 1));
            }
        }
    }

    // stable sort preserves first-occurrence order among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let stats = counts
        .into_iter()
        .map(|(voice, count)| VoiceStat {
            voice,
            count,
            percentage: count as f64 / total as f64 * 100.0,
        })
        .collect();

    VoiceStats { total, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn empty_input_has_no_stats() {
        let stats = tally(Vec::<String>::new());
        assert_eq!(stats.total, 0);
        assert!(stats.stats.is_empty());
    }

    #[test]
    fn sorted_by_count_with_first_seen_ties() {
        let stats = tally(["AniLibria", "Studio Band", "AniDUB", "Studio Band", "AniDUB", "Kodik"]);

        let labels: Vec<&str> = stats.stats.iter().map(|s| s.voice.as_str()).collect();
        assert_eq!(labels, vec!["Studio Band", "AniDUB", "AniLibria", "Kodik"]);
        assert_eq!(stats.total, 6);
        assert_eq!(stats.stats.iter().map(|s| s.count).sum::<i64>(), stats.total);
        assert!(stats.stats.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn percentages_sum_to_hundred() {
        let stats = tally(["a", "b", "b"]);
        let sum: f64 = stats.stats.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!((stats.stats[0].percentage - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn random_distributions_keep_totals_and_order() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let labels = rng.gen_range(1..12);
            let len = rng.gen_range(0..300);
            let voices: Vec<String> = (0..len)
                .map(|_| format!("voice-{}", rng.gen_range(0..labels)))
                .collect();

            let stats = tally(&voices);
            assert_eq!(stats.total, voices.len() as i64);
            assert_eq!(stats.stats.iter().map(|s| s.count).sum::<i64>(), stats.total);
            assert!(stats.stats.windows(2).all(|w| w[0].count >= w[1].count));

            let first_seen = |label: &str| voices.iter().position(|v| v == label);
            for pair in stats.stats.windows(2) {
                if pair[0].count == pair[1].count {
                    assert!(first_seen(pair[0].voice.as_str()) < first_seen(pair[1].voice.as_str()));
                }
            }
        }
    }
}
