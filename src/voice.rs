// src/voice.rs

/// The single voice of the unit: which note, if any, is sounding.
///
/// Owned and mutated only by the note controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteState {
    #[default]
    Idle,
    Holding(i32),
}

impl NoteState {
    #[inline]
    pub fn note(&self) -> Option<i32> {
        match *self {
            NoteState::Idle => None,
            NoteState::Holding(note) => Some(note),
        }
    }

    #[inline]
    pub fn is_holding(&self) -> bool {
        matches!(self, NoteState::Holding(_))
    }
}
