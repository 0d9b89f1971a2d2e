//! Workout records as delivered by the fitness service
//!
//! The history endpoint returns one [`WorkoutSummary`] per workout and the
//! detail endpoint returns the encoded sample streams in a [`WorkoutDetail`].
//! Numeric summary fields arrive either as JSON strings or numbers, so they are
//! kept as text and parsed on demand.

use crate::error::{Result, TrackError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Summary (history) record of one workout
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorkoutSummary {
    /// Workout identity, also the start time in epoch seconds
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::string"))]
    pub trackid: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "lenient::opt_string")
    )]
    pub end_time: Option<String>,
    /// Total distance as reported by the service
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "lenient::opt_string")
    )]
    pub dis: Option<String>,
    /// Activity classification code
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub workout_type: i64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub source: Option<String>,
    /// Active (moving) time in seconds, when the service reports it
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "lenient::opt_string")
    )]
    pub cost_time: Option<String>,
}

impl WorkoutSummary {
    pub fn new(trackid: impl Into<String>) -> Self {
        Self {
            trackid: trackid.into(),
            ..Self::default()
        }
    }

    /// Workout start in epoch seconds
    pub fn start_time(&self) -> Result<i64> {
        parse_i64("trackid", &self.trackid)
    }

    /// Workout end in epoch seconds; falls back to the start when absent
    pub fn end_time(&self) -> Result<i64> {
        match self.end_time.as_deref() {
            Some(text) if !text.trim().is_empty() => parse_i64("end_time", text),
            _ => self.start_time(),
        }
    }

    pub fn distance(&self) -> Result<f64> {
        match self.dis.as_deref() {
            Some(text) if !text.trim().is_empty() => {
                text.trim()
                    .parse::<f64>()
                    .map_err(|_| TrackError::InvalidNumber {
                        field: "dis",
                        token: text.to_string(),
                    })
            }
            _ => Ok(0.0),
        }
    }

    /// Time budget used by gap compression: the reported cost time, or the
    /// wall-clock span between start and end.
    pub fn cost_time(&self) -> Result<i64> {
        match self.cost_time.as_deref() {
            Some(text) if !text.trim().is_empty() => parse_i64("cost_time", text),
            _ => Ok(self.end_time()?.saturating_sub(self.start_time()?)),
        }
    }
}

/// Detail record holding the encoded sample streams
///
/// Each field is a `;`-separated list of sample groups whose sub-values are
/// `,`-separated. Absent fields mean the sensor recorded nothing.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorkoutDetail {
    pub time: Option<String>,
    pub longitude_latitude: Option<String>,
    pub altitude: Option<String>,
    pub heart_rate: Option<String>,
    pub gait: Option<String>,
}

fn parse_i64(field: &'static str, text: &str) -> Result<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| TrackError::InvalidNumber {
            field,
            token: text.to_string(),
        })
}

#[cfg(feature = "serde")]
mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
    }

    impl Scalar {
        fn into_string(self) -> String {
            match self {
                Scalar::Text(s) => s,
                Scalar::Int(i) => i.to_string(),
                Scalar::Float(f) => f.to_string(),
            }
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Scalar::deserialize(deserializer).map(Scalar::into_string)
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_string))
    }
}
