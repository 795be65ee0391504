use crate::core::planner::Apex;
use crate::core::scenario::ScenarioKind;

/// One-shot apex marker. Armed at launch, revealed on completion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PeakMarker {
    record: Option<Apex>,
    visible: bool,
}

impl PeakMarker {
    pub fn arm(&mut self, apex: Option<Apex>) {
        self.record = apex;
        self.visible = false;
    }

    /// Shows the marker if the scenario has a meaningful apex and one was
    /// recorded. Returns whether it became visible.
    pub fn reveal(&mut self, kind: ScenarioKind) -> bool {
        self.visible = kind.shows_peak() && self.record.is_some();
        self.visible
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn record(&self) -> Option<Apex> {
        self.record
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The apex, only once it may be drawn.
    pub fn visible_record(&self) -> Option<Apex> {
        self.record.filter(|_| self.visible)
    }
}
