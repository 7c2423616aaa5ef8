use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, IntoStaticStr};

/// The two parallel views kept for every profile.
///
/// - `Abundance`: a species counts once per occurrence.
/// - `Incidence`: a species counts once per observation it occurs in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SampleView {
    Abundance,
    Incidence,
}

impl SampleView {
    /// Column prefix used in snapshots and exported tables.
    #[inline]
    pub fn prefix(self) -> &'static str {
        self.into()
    }
}
