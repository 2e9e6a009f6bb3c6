use crate::VideoRecord;

/// Number of label classes: `[no smoke, smoke]`.
pub const NUM_CLASSES: usize = 2;

/// Admin label codes that mean the clip contains smoke.
pub const POSITIVE_CODES: [i32; 4] = [47, 23, 19, 15];

/// Admin label codes that mean the clip contains no smoke.
pub const NEGATIVE_CODES: [i32; 4] = [32, 20, 16, 12];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SmokeLabel {
    Negative,
    Positive,
    Unknown,
}

impl SmokeLabel {
    /// Class probabilities `[p(no smoke), p(smoke)]`. Unknown is all zero.
    pub fn probabilities(&self) -> [f32; NUM_CLASSES] {
        match self {
            SmokeLabel::Negative => [1.0, 0.0],
            SmokeLabel::Positive => [0.0, 1.0],
            SmokeLabel::Unknown => [0.0, 0.0],
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SmokeLabel::Unknown)
    }
}

/// Decides the label of a metadata record.
pub trait LabelPolicy: Send + Sync {
    fn classify(&self, record: &VideoRecord) -> SmokeLabel;
}

/// Fixed lookup on `label_state_admin` against [`POSITIVE_CODES`] and
/// [`NEGATIVE_CODES`].
#[derive(Clone, Copy, Debug, Default)]
pub struct AdminLabelPolicy;

impl AdminLabelPolicy {
    pub fn classify_code(code: i32) -> SmokeLabel {
        if POSITIVE_CODES.contains(&code) {
            SmokeLabel::Positive
        } else if NEGATIVE_CODES.contains(&code) {
            SmokeLabel::Negative
        } else {
            SmokeLabel::Unknown
        }
    }
}

impl LabelPolicy for AdminLabelPolicy {
    fn classify(&self, record: &VideoRecord) -> SmokeLabel {
        Self::classify_code(record.label_state_admin)
    }
}
