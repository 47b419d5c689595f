//! Event types and sinks for observing a paint run.
//!
//! [`crate::paint::paint`] reports progress through an [`EventSink`]: the run
//! start, each region once it has been filled and once it has been painted,
//! non-fatal warnings, and the final report.
use crate::fill::ShapeKind;
use crate::paint::PaintReport;

/// Describes events emitted while painting.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum PaintEvent {
    /// Emitted once the random inputs for the run have been chosen.
    RunStarted {
        seed: u64,
        composition: String,
        shape_kind: ShapeKind,
        region_count: usize,
    },

    /// Emitted after the filler produced shapes for a region.
    RegionFilled {
        index: usize,
        name: String,
        color: String,
        shapes: usize,
        rejected: usize,
    },

    /// Emitted after all shapes of a region were drawn.
    RegionPainted { index: usize, name: String },

    /// Non-fatal warning, e.g. a region that produced no shapes.
    Warning { context: String, message: String },

    /// Emitted when the frame is complete.
    RunFinished { report: PaintReport },
}

/// Discriminant of [`PaintEvent`], used to let sinks opt out of event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintEventKind {
    RunStarted,
    RegionFilled,
    RegionPainted,
    Warning,
    RunFinished,
}

impl PaintEvent {
    pub fn kind(&self) -> PaintEventKind {
        match self {
            PaintEvent::RunStarted { .. } => PaintEventKind::RunStarted,
            PaintEvent::RegionFilled { .. } => PaintEventKind::RegionFilled,
            PaintEvent::RegionPainted { .. } => PaintEventKind::RegionPainted,
            PaintEvent::Warning { .. } => PaintEventKind::Warning,
            PaintEvent::RunFinished { .. } => PaintEventKind::RunFinished,
        }
    }
}

/// A generic event sink that accepts [`PaintEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: PaintEvent);

    /// Whether the sink cares about `kind`. Senders skip building unwanted events.
    fn wants(&self, _kind: PaintEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: PaintEvent) {}

    #[inline]
    fn wants(&self, _kind: PaintEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(PaintEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(PaintEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(PaintEvent),
{
    #[inline]
    fn send(&mut self, event: PaintEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<PaintEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<PaintEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[PaintEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: PaintEvent) {
        self.events.push(event);
    }
}
