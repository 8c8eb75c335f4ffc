//! Q-score bin position lookup
//!
//! The quality value-write reports the percent of clusters at or above Q20
//! and Q30. Those thresholds have to be translated into histogram bin
//! positions, which depend on whether the run is binned. The translation is
//! resolved once per assembly and reused for every quality record.

use crate::metrics::QualityMetricSet;

/// Highest Q-score an unbinned histogram can represent
pub const MAX_QSCORE: usize = 50;

/// Resolve the histogram bin position for a Q-score threshold.
///
/// Binned runs report the first bin whose representative value reaches the
/// threshold. Unbinned runs lay the histogram out one slot per score, so the
/// position is `qval - 1`. Returns `None` when the stream is empty or no bin
/// reaches the threshold; the quality value-write then skips its derived
/// columns.
#[must_use]
pub fn index_for_q_value(quality: &QualityMetricSet, qval: u8) -> Option<usize> {
    if quality.is_empty() {
        return None;
    }
    if quality.bins.is_empty() {
        let pos = usize::from(qval).checked_sub(1)?;
        if pos >= MAX_QSCORE {
            return None;
        }
        return Some(pos);
    }
    quality.bins.iter().position(|bin| bin.value >= qval)
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::TileCycleId;
    use crate::metrics::{QscoreBin, QualityMetric};

    fn one_record() -> Vec<QualityMetric> {
        vec![QualityMetric::new(
            TileCycleId::new(1, 1101, 1),
            vec![1, 2, 3],
        )]
    }

    #[test]
    fn test_unbinned_is_score_minus_one() {
        let set = QualityMetricSet::unbinned(one_record());
        assert_eq!(index_for_q_value(&set, 20), Some(19));
        assert_eq!(index_for_q_value(&set, 30), Some(29));
    }

    #[test]
    fn test_binned_first_bin_reaching_threshold() {
        let bins = vec![
            QscoreBin::new(2, 9, 6),
            QscoreBin::new(10, 19, 15),
            QscoreBin::new(20, 29, 22),
            QscoreBin::new(30, 41, 33),
        ];
        let set = QualityMetricSet::binned(bins, one_record());
        assert_eq!(index_for_q_value(&set, 20), Some(2));
        assert_eq!(index_for_q_value(&set, 30), Some(3));
    }

    #[test]
    fn test_threshold_above_all_bins() {
        let bins = vec![QscoreBin::new(2, 9, 6), QscoreBin::new(10, 19, 15)];
        let set = QualityMetricSet::binned(bins, one_record());
        assert_eq!(index_for_q_value(&set, 30), None);
    }

    #[test]
    fn test_empty_stream() {
        let set = QualityMetricSet::default();
        assert_eq!(index_for_q_value(&set, 20), None);
    }
}
