use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of mood labels attached to songs and recommendations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Sad,
    Energetic,
    Chill,
    /// Fallback for unknown labels and invalid inputs. Never produced by
    /// [`classify_mood`] for finite inputs.
    #[default]
    Neutral,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Energetic,
        Mood::Chill,
        Mood::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Energetic => "Energetic",
            Mood::Chill => "Chill",
            Mood::Neutral => "Neutral",
        }
    }

    /// Maps a free-form label onto the closed set.
    ///
    /// Matching ignores case and surrounding whitespace, so `"happy"` and
    /// `" HAPPY "` both become [`Mood::Happy`]. Anything else is
    /// [`Mood::Neutral`].
    pub fn from_label(label: &str) -> Mood {
        let label = label.trim();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str().eq_ignore_ascii_case(label))
            .unwrap_or(Mood::Neutral)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a track from its valence and energy.
///
/// Rules are evaluated in order and the first match wins:
///
/// 1. `valence > 0.6` and `energy > 0.6` is [`Mood::Happy`]
/// 2. `valence < 0.4` and `energy < 0.4` is [`Mood::Sad`]
/// 3. `energy > 0.7` is [`Mood::Energetic`]
/// 4. anything else is [`Mood::Chill`]
///
/// All comparisons are strict, so boundary values fall through to later
/// rules. A NaN or infinite input yields [`Mood::Neutral`].
pub fn classify_mood(valence: f64, energy: f64) -> Mood {
    if !valence.is_finite() || !energy.is_finite() {
        return Mood::Neutral;
    }

    if valence > 0.6 && energy > 0.6 {
        Mood::Happy
    } else if valence < 0.4 && energy < 0.4 {
        Mood::Sad
    } else if energy > 0.7 {
        Mood::Energetic
    } else {
        Mood::Chill
    }
}
