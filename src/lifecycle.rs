/// Appointment status transitions.
///
/// The allowed moves are exactly the buttons the Appointments page offers:
///
/// | from        | to                                |
/// |-------------|-----------------------------------|
/// | scheduled   | in-progress, completed, cancelled |
/// | in-progress | completed                         |
///
/// Completed, cancelled and no-show are terminal. Time of day is never
/// checked: a future appointment may be marked completed.

use crate::error::{DashboardError, Result};
use crate::models::{Appointment, AppointmentStatus};
use log::{info, warn};
use std::collections::HashMap;

impl AppointmentStatus {
    pub fn allowed_transitions(&self) -> &'static [AppointmentStatus] {
        match self {
            AppointmentStatus::Scheduled => &[
                AppointmentStatus::InProgress,
                AppointmentStatus::Completed,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::InProgress => &[AppointmentStatus::Completed],
            AppointmentStatus::Completed
            | AppointmentStatus::Cancelled
            | AppointmentStatus::NoShow => &[],
        }
    }

    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

/// A control shown next to an appointment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    Start,
    Complete,
    Cancel,
}

impl StatusAction {
    pub fn target(&self) -> AppointmentStatus {
        match self {
            StatusAction::Start => AppointmentStatus::InProgress,
            StatusAction::Complete => AppointmentStatus::Completed,
            StatusAction::Cancel => AppointmentStatus::Cancelled,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusAction::Start => "Start Appointment",
            StatusAction::Complete => "Mark Complete",
            StatusAction::Cancel => "Cancel Appointment",
        }
    }

    /// Actions available for an appointment currently in `status`.
    pub fn available_for(status: AppointmentStatus) -> Vec<StatusAction> {
        [StatusAction::Start, StatusAction::Complete, StatusAction::Cancel]
            .into_iter()
            .filter(|action| status.can_transition_to(action.target()))
            .collect()
    }
}

/// Record of an accepted transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub appointment_id: String,
    pub from: AppointmentStatus,
    pub to: AppointmentStatus,
}

/// Page-local status overrides on top of the immutable seed appointments.
#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    overrides: HashMap<String, AppointmentStatus>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective status: the local override if any, else the seed value.
    pub fn status_of(&self, appointment: &Appointment) -> AppointmentStatus {
        self.overrides
            .get(&appointment.id)
            .copied()
            .unwrap_or(appointment.status)
    }

    pub fn transition(
        &mut self,
        appointment: &Appointment,
        to: AppointmentStatus,
    ) -> Result<StatusChange> {
        let from = self.status_of(appointment);
        if !from.can_transition_to(to) {
            warn!(
                "Rejected status change for {}: {} -> {}",
                appointment.id, from, to
            );
            return Err(DashboardError::InvalidTransition { from, to });
        }

        self.overrides.insert(appointment.id.clone(), to);
        info!("Updating appointment {} to status: {}", appointment.id, to);

        Ok(StatusChange {
            appointment_id: appointment.id.clone(),
            from,
            to,
        })
    }

    pub fn apply(&mut self, appointment: &Appointment, action: StatusAction) -> Result<StatusChange> {
        self.transition(appointment, action.target())
    }

    /// Copies of `appointments` with local overrides applied.
    pub fn view(&self, appointments: &[Appointment]) -> Vec<Appointment> {
        appointments
            .iter()
            .map(|a| Appointment {
                status: self.status_of(a),
                ..a.clone()
            })
            .collect()
    }

    pub fn changed_count(&self) -> usize {
        self.overrides.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;

    #[test]
    fn transition_table() {
        use AppointmentStatus::*;
        assert!(Scheduled.can_transition_to(InProgress));
        assert!(Scheduled.can_transition_to(Completed));
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(InProgress.can_transition_to(Completed));
        assert!(!InProgress.can_transition_to(Cancelled));
        assert!(!Scheduled.can_transition_to(NoShow));
        assert!(!Scheduled.can_transition_to(Scheduled));
        for terminal in [Completed, Cancelled, NoShow] {
            assert!(terminal.is_terminal());
            for next in AppointmentStatus::ALL {
                assert!(!terminal.can_transition_to(*next));
            }
        }
    }

    #[test]
    fn actions_follow_the_table() {
        assert_eq!(
            StatusAction::available_for(AppointmentStatus::Scheduled),
            vec![StatusAction::Start, StatusAction::Complete, StatusAction::Cancel]
        );
        assert_eq!(
            StatusAction::available_for(AppointmentStatus::InProgress),
            vec![StatusAction::Complete]
        );
        assert!(StatusAction::available_for(AppointmentStatus::Cancelled).is_empty());
    }

    #[test]
    fn board_walks_scheduled_to_completed() {
        let seed = SeedData::load().unwrap();
        let appointment = seed.appointment("app-001").unwrap();
        let mut board = StatusBoard::new();

        let change = board.apply(appointment, StatusAction::Start).unwrap();
        assert_eq!(change.from, AppointmentStatus::Scheduled);
        assert_eq!(board.status_of(appointment), AppointmentStatus::InProgress);

        board.apply(appointment, StatusAction::Complete).unwrap();
        assert_eq!(board.status_of(appointment), AppointmentStatus::Completed);

        // seed untouched
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn board_rejects_moves_out_of_terminal_state() {
        let seed = SeedData::load().unwrap();
        let done = seed.appointment("app-005").unwrap();
        let mut board = StatusBoard::new();

        let err = board.transition(done, AppointmentStatus::Scheduled).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::InvalidTransition {
                from: AppointmentStatus::Completed,
                to: AppointmentStatus::Scheduled
            }
        ));
        assert_eq!(board.changed_count(), 0);
    }

    #[test]
    fn view_applies_overrides_in_order() {
        let seed = SeedData::load().unwrap();
        let mut board = StatusBoard::new();
        board
            .transition(&seed.appointments[1], AppointmentStatus::Cancelled)
            .unwrap();

        let view = board.view(&seed.appointments);
        assert_eq!(view.len(), seed.appointments.len());
        assert_eq!(view[1].status, AppointmentStatus::Cancelled);
        assert_eq!(view[1].payment_status, seed.appointments[1].payment_status);
        assert_eq!(view[0].status, seed.appointments[0].status);
    }
}
