use serde::Serialize;

/// Length summary over a set of sequences
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LengthStats {
    pub count: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
}

impl LengthStats {
    /// `None` for an empty input
    pub fn from_lengths<I>(lengths: I) -> Option<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut count = 0usize;
        let mut total = 0usize;
        let mut min = usize::MAX;
        let mut max = 0usize;

        for len in lengths {
            count += 1;
            total += len;
            min = min.min(len);
            max = max.max(len);
        }

        if count == 0 {
            return None;
        }

        Some(Self {
            count,
            min,
            max,
            mean: total as f64 / count as f64,
        })
    }
}
