/// Weekly availability editor for the Schedule page.
///
/// Each displayed week holds seven `DaySchedule`s built from a fixed template:
/// six one-hour slots, weekends off. Slots are never linked to appointments.
/// Overlapping slots are allowed; `overlapping_slots` only reports them.

use crate::calendar::{self, Direction, WeekStart};
use chrono::{Duration, NaiveDate, NaiveTime};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// What happens to slot edits when the week changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetentionMode {
    /// Rebuild every week from the template, dropping edits.
    #[default]
    Reset,
    /// Remember edited days by date and restore them on revisit.
    Keep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSlot {
    pub id: Uuid,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub available: bool,
}

impl ScheduleSlot {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        ScheduleSlot {
            id: Uuid::new_v4(),
            start,
            end,
            available: true,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn overlaps_with(&self, other: &ScheduleSlot) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// "09:00 - 10:00"
    pub fn label(&self) -> String {
        format!("{} - {}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub is_working: bool,
    pub slots: Vec<ScheduleSlot>,
}

impl DaySchedule {
    pub fn day_name(&self) -> String {
        self.date.format("%A").to_string()
    }

    pub fn available_count(&self) -> usize {
        self.slots.iter().filter(|s| s.available).count()
    }

    fn slot_mut(&mut self, slot_id: Uuid) -> Option<&mut ScheduleSlot> {
        self.slots.iter_mut().find(|s| s.id == slot_id)
    }
}

/// Summary logged by "Save Changes".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSummary {
    pub week_label: String,
    pub working_days: usize,
    pub total_slots: usize,
    pub available_slots: usize,
}

/// Hour ranges of the default day.
const TEMPLATE_HOURS: [(u32, u32); 6] = [(9, 10), (10, 11), (11, 12), (14, 15), (15, 16), (16, 17)];

fn template_slots() -> Vec<ScheduleSlot> {
    TEMPLATE_HOURS
        .iter()
        .filter_map(|&(start, end)| {
            Some(ScheduleSlot::new(
                NaiveTime::from_hms_opt(start, 0, 0)?,
                NaiveTime::from_hms_opt(end, 0, 0)?,
            ))
        })
        .collect()
}

fn template_day(date: NaiveDate) -> DaySchedule {
    DaySchedule {
        date,
        is_working: !calendar::is_weekend(date),
        slots: template_slots(),
    }
}

pub struct ScheduleEditor {
    selected_week: NaiveDate,
    week_start: WeekStart,
    retention: RetentionMode,
    new_slot: (NaiveTime, NaiveTime),
    days: Vec<DaySchedule>,
    saved_days: HashMap<NaiveDate, DaySchedule>,
}

impl ScheduleEditor {
    pub fn new(selected_week: NaiveDate, week_start: WeekStart, retention: RetentionMode) -> Self {
        let new_slot = (
            NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
        );
        let mut editor = ScheduleEditor {
            selected_week,
            week_start,
            retention,
            new_slot,
            days: Vec::new(),
            saved_days: HashMap::new(),
        };
        editor.days = editor.build_week();
        editor
    }

    /// Range given to slots created by `add_slot`.
    pub fn with_new_slot_range(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.new_slot = (start, end);
        self
    }

    fn build_week(&self) -> Vec<DaySchedule> {
        calendar::week_days(self.selected_week, self.week_start)
            .into_iter()
            .map(|date| match self.retention {
                RetentionMode::Keep => self
                    .saved_days
                    .get(&date)
                    .cloned()
                    .unwrap_or_else(|| template_day(date)),
                RetentionMode::Reset => template_day(date),
            })
            .collect()
    }

    pub fn selected_week(&self) -> NaiveDate {
        self.selected_week
    }

    pub fn retention(&self) -> RetentionMode {
        self.retention
    }

    pub fn days(&self) -> &[DaySchedule] {
        &self.days
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.days.iter().map(|d| d.date).collect()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DaySchedule> {
        self.days.iter().find(|d| d.date == date)
    }

    fn day_mut(&mut self, date: NaiveDate) -> Option<&mut DaySchedule> {
        self.days.iter_mut().find(|d| d.date == date)
    }

    pub fn week_label(&self) -> String {
        calendar::week_label(self.selected_week, self.week_start)
    }

    /// Flip the working flag of `date`. Slots are left as they are.
    pub fn toggle_working_day(&mut self, date: NaiveDate) -> bool {
        match self.day_mut(date) {
            Some(day) => {
                day.is_working = !day.is_working;
                debug!("{} working: {}", date, day.is_working);
                true
            }
            None => false,
        }
    }

    /// Append a slot with the default range. No overlap check.
    pub fn add_slot(&mut self, date: NaiveDate) -> Option<Uuid> {
        let (start, end) = self.new_slot;
        let day = self.day_mut(date)?;
        let slot = ScheduleSlot::new(start, end);
        let id = slot.id;
        day.slots.push(slot);
        debug!("Added slot {} on {}", id, date);
        Some(id)
    }

    pub fn remove_slot(&mut self, date: NaiveDate, slot_id: Uuid) -> bool {
        match self.day_mut(date) {
            Some(day) => {
                let before = day.slots.len();
                day.slots.retain(|s| s.id != slot_id);
                day.slots.len() != before
            }
            None => false,
        }
    }

    pub fn toggle_slot_availability(&mut self, date: NaiveDate, slot_id: Uuid) -> bool {
        match self.day_mut(date).and_then(|day| day.slot_mut(slot_id)) {
            Some(slot) => {
                slot.available = !slot.available;
                true
            }
            None => false,
        }
    }

    /// Move to the previous or next week.
    ///
    /// In `Reset` mode the new week comes straight from the template. In
    /// `Keep` mode the current week is stored first and stored days are
    /// restored.
    pub fn navigate_week(&mut self, direction: Direction) {
        if self.retention == RetentionMode::Keep {
            for day in &self.days {
                self.saved_days.insert(day.date, day.clone());
            }
        }
        self.selected_week = calendar::shift(self.selected_week, direction, 7);
        self.days = self.build_week();
        debug!("Schedule week now {}", self.week_label());
    }

    /// Pairs of slot ids on `date` whose ranges overlap.
    pub fn overlapping_slots(&self, date: NaiveDate) -> Vec<(Uuid, Uuid)> {
        let Some(day) = self.day(date) else {
            return Vec::new();
        };
        let mut pairs = Vec::new();
        for (i, first) in day.slots.iter().enumerate() {
            for second in &day.slots[i + 1..] {
                if first.overlaps_with(second) {
                    pairs.push((first.id, second.id));
                }
            }
        }
        pairs
    }

    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary {
            week_label: self.week_label(),
            working_days: self.days.iter().filter(|d| d.is_working).count(),
            total_slots: self.days.iter().map(|d| d.slots.len()).sum(),
            available_slots: self.days.iter().map(|d| d.available_count()).sum(),
        }
    }

    /// "Save Changes". Nothing is persisted.
    pub fn save(&self) -> ScheduleSummary {
        let summary = self.summary();
        info!(
            "Saving schedule for {}: {} working days, {} slots ({} available)",
            summary.week_label, summary.working_days, summary.total_slots, summary.available_slots
        );
        summary
    }
}
