// src/note.rs
//
// Note-lifecycle decisions for the monophonic voice.

use crate::edge::Edge;
use crate::event::{NoteAction, PitchEvent};
use crate::voice::NoteState;

/// Everything the note controller observes on one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    pub gate: Edge,

    /// Gate level is above threshold on this tick
    pub gate_high: bool,

    /// Always `Edge::None` for layouts without a trigger lane
    pub trigger: Edge,

    /// Raw note-number lane value
    pub note: f32,

    /// Raw normalized velocity lane value
    pub velocity: f32,
}

/// Facts a rule may look at, derived once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleContext {
    pub gate_rose: bool,
    pub gate_fell: bool,
    pub gate_high: bool,
    pub trigger_rose: bool,
    pub note_changed: bool,
    pub pitch: PitchEvent,
    pub state: NoteState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Trigger,
    Release,
    Slide,
}

/// One entry of the decision table.
///
/// A rule that `matches` ends the search even if its `action` yields
/// nothing (a release with no held note).
#[derive(Clone, Copy)]
pub struct NoteRule {
    pub kind: RuleKind,
    pub matches: fn(&RuleContext) -> bool,
    pub action: fn(&RuleContext) -> Option<NoteAction>,
}

/// Decision table, highest priority first.
pub static NOTE_RULES: [NoteRule; 3] = [
    NoteRule {
        kind: RuleKind::Trigger,
        matches: trigger_matches,
        action: retrigger,
    },
    NoteRule {
        kind: RuleKind::Release,
        matches: release_matches,
        action: release,
    },
    NoteRule {
        kind: RuleKind::Slide,
        matches: slide_matches,
        action: glide,
    },
];

// Trigger fires even while gate is already held.
fn trigger_matches(ctx: &RuleContext) -> bool {
    ctx.gate_rose || ctx.trigger_rose
}

fn retrigger(ctx: &RuleContext) -> Option<NoteAction> {
    Some(NoteAction::Retrigger(ctx.pitch))
}

fn release_matches(ctx: &RuleContext) -> bool {
    ctx.gate_fell
}

fn release(ctx: &RuleContext) -> Option<NoteAction> {
    ctx.state.note().map(|note| NoteAction::Release { note })
}

fn slide_matches(ctx: &RuleContext) -> bool {
    ctx.gate_high && ctx.note_changed
}

fn glide(ctx: &RuleContext) -> Option<NoteAction> {
    Some(NoteAction::Glide(ctx.pitch))
}

/// First rule of the table that matches, if any.
#[inline]
pub fn matching_rule(ctx: &RuleContext) -> Option<&'static NoteRule> {
    NOTE_RULES.iter().find(|rule| (rule.matches)(ctx))
}

/// Tracks the sounding note and turns edges into lifecycle actions.
#[derive(Debug, Clone)]
pub struct NoteController {
    state: NoteState,
    prev_note: f32,
}

impl NoteController {
    /// Seed with the first observed note-number value so the first tick
    /// cannot register a note change.
    pub fn new(initial_note: f32) -> Self {
        Self {
            state: NoteState::Idle,
            prev_note: initial_note,
        }
    }

    /// Decide this tick's action and update the note state.
    ///
    /// The caller dispatches the returned action before pulling audio.
    #[inline]
    pub fn tick(&mut self, input: &TickInput) -> Option<NoteAction> {
        let ctx = RuleContext {
            gate_rose: input.gate.is_rising(),
            gate_fell: input.gate.is_falling(),
            gate_high: input.gate_high,
            trigger_rose: input.trigger.is_rising(),
            note_changed: input.note != self.prev_note,
            pitch: PitchEvent::from_raw(input.note, input.velocity),
            state: self.state,
        };
        self.prev_note = input.note;

        let action = matching_rule(&ctx).and_then(|rule| (rule.action)(&ctx));
        match action {
            Some(NoteAction::Retrigger(pitch)) | Some(NoteAction::Glide(pitch)) => {
                self.state = NoteState::Holding(pitch.note);
            }
            Some(NoteAction::Release { .. }) => self.state = NoteState::Idle,
            None => {}
        }
        action
    }

    #[inline]
    pub fn state(&self) -> NoteState {
        self.state
    }
}
