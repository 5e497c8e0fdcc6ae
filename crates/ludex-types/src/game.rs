//! The game record and its input shapes.
//!
//! A [`Game`] is the sole entity of the system. [`GameDraft`] carries the
//! fields of a not-yet-created entry (the store assigns the id), and
//! [`GamePatch`] carries a partial update in which every field is optional.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::id::GameId;

/// Completion status of a game on the shelf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Completed,
    InProgress,
    Abandoned,
}

impl GameStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            GameStatus::Completed => "Completed",
            GameStatus::InProgress => "InProgress",
            GameStatus::Abandoned => "Abandoned",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameStatus {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Completed" => Ok(GameStatus::Completed),
            "InProgress" => Ok(GameStatus::InProgress),
            "Abandoned" => Ok(GameStatus::Abandoned),
            other => Err(TypeError::UnknownStatus(other.to_string())),
        }
    }
}

/// One tracked game entry.
///
/// Field order matters: the durable snapshot and the wire format both emit
/// `id, image, title, status, hours, extra`, with `extra` omitted entirely
/// when no notes are set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Store-assigned identifier, unique within one data file.
    pub id: GameId,
    /// Name of the stored image blob (not a path, not a URL).
    pub image: String,
    pub title: String,
    pub status: GameStatus,
    /// Hours played, non-negative.
    pub hours: f64,
    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

/// Fields of a game entry about to be created.
///
/// `image` is `None` when no upload was resolved before the add call; the
/// store rejects such drafts.
#[derive(Clone, Debug, PartialEq)]
pub struct GameDraft {
    pub image: Option<String>,
    pub title: String,
    pub status: GameStatus,
    pub hours: f64,
    pub extra: Option<String>,
}

/// Partial update of a game entry.
///
/// Every field is optional: `None` leaves the stored value untouched. The
/// notes field is doubly optional so that "not supplied" (`None`) and
/// "supplied but empty, i.e. clear the notes" (`Some(None)`) remain
/// distinguishable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GamePatch {
    pub image: Option<String>,
    pub title: Option<String>,
    pub status: Option<GameStatus>,
    pub hours: Option<f64>,
    pub extra: Option<Option<String>>,
}

impl GamePatch {
    /// Returns `true` if the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.image.is_none()
            && self.title.is_none()
            && self.status.is_none()
            && self.hours.is_none()
            && self.extra.is_none()
    }

    /// Overwrite the supplied fields of `game`, leaving the rest alone.
    pub fn apply_to(&self, game: &mut Game) {
        if let Some(image) = &self.image {
            game.image = image.clone();
        }
        if let Some(title) = &self.title {
            game.title = title.clone();
        }
        if let Some(status) = self.status {
            game.status = status;
        }
        if let Some(hours) = self.hours {
            game.hours = hours;
        }
        match &self.extra {
            None => {}
            Some(None) => game.extra = None,
            Some(Some(notes)) => game.extra = Some(notes.clone()),
        }
    }
}
