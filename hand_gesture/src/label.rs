//! The discrete gesture vocabulary.

use std::fmt;
use std::str::FromStr;

/// A per-frame (or committed) gesture.
///
/// `None` means no gesture was recognised; it is never committed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureLabel {
    #[default]
    None,
    ThumbUp,
    ThumbDown,
    Open,
    Fist,
    Peace,
    Pointing,
}

impl GestureLabel {
    pub fn all() -> [GestureLabel; 7] {
        [
            GestureLabel::None,
            GestureLabel::ThumbUp,
            GestureLabel::ThumbDown,
            GestureLabel::Open,
            GestureLabel::Fist,
            GestureLabel::Peace,
            GestureLabel::Pointing,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GestureLabel::None      => "none",
            GestureLabel::ThumbUp   => "thumbUp",
            GestureLabel::ThumbDown => "thumbDown",
            GestureLabel::Open      => "open",
            GestureLabel::Fist      => "fist",
            GestureLabel::Peace     => "peace",
            GestureLabel::Pointing  => "pointing",
        }
    }

    pub fn is_none(&self) -> bool {
        *self == GestureLabel::None
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GestureLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GestureLabel::all()
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| format!("unknown gesture label: {s}"))
    }
}
