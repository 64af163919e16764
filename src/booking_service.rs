use crate::backend::CoachingBackend;
use crate::error::CoachingError;
use crate::types::{Appointment, AppointmentStatus, BookingRequest, MAX_NOTES_LENGTH};
use tracing::{info, warn};
use uuid::Uuid;

/// Books slots for clients and moves appointments through their lifecycle.
#[derive(Clone)]
pub struct BookingService<T: CoachingBackend> {
    backend: T,
    enforce_client_relationship: bool,
}

impl<T: CoachingBackend> BookingService<T> {
    pub fn new(backend: T, enforce_client_relationship: bool) -> Self {
        Self {
            backend,
            enforce_client_relationship,
        }
    }

    /// Books `slot_id` for `client_id`.
    ///
    /// The open-slot check and both writes happen inside the backend's unit of
    /// work, so of two racing requests exactly one gets the appointment and the
    /// other gets `Conflict`.
    pub fn book_slot(&self, request: BookingRequest) -> Result<Appointment, CoachingError> {
        let BookingRequest {
            client_id,
            slot_id,
            notes,
        } = request;

        if notes
            .as_ref()
            .is_some_and(|notes| notes.chars().count() > MAX_NOTES_LENGTH)
        {
            return Err(CoachingError::Validation(format!(
                "notes must be at most {MAX_NOTES_LENGTH} characters"
            )));
        }

        let slot = self.backend.slot(slot_id)?;
        if !self.backend.client_exists(client_id)? {
            return Err(CoachingError::NotFound(format!("client {client_id}")));
        }
        if self.enforce_client_relationship
            && !self
                .backend
                .client_belongs_to_trainer(client_id, slot.trainer_id)?
        {
            warn!(%client_id, trainer_id = %slot.trainer_id, "Client is not linked to trainer");
            return Err(CoachingError::Forbidden(format!(
                "client {client_id} is not a client of trainer {}",
                slot.trainer_id
            )));
        }

        match self.backend.book_slot(client_id, slot_id, notes) {
            Ok(appointment) => {
                info!(
                    appointment_id = %appointment.id,
                    %client_id,
                    %slot_id,
                    "Slot booked"
                );
                Ok(appointment)
            }
            Err(err) => {
                warn!(%client_id, %slot_id, %err, "Booking failed");
                Err(err)
            }
        }
    }

    pub fn cancel_appointment(&self, appointment_id: Uuid) -> Result<Appointment, CoachingError> {
        self.transition(appointment_id, AppointmentStatus::Cancelled)
    }

    pub fn complete_appointment(
        &self,
        appointment_id: Uuid,
    ) -> Result<Appointment, CoachingError> {
        self.transition(appointment_id, AppointmentStatus::Completed)
    }

    pub fn appointments(&self, trainer_id: Uuid) -> Result<Vec<Appointment>, CoachingError> {
        self.backend.appointments(trainer_id)
    }

    fn transition(
        &self,
        appointment_id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, CoachingError> {
        let appointment = self
            .backend
            .update_appointment_status(appointment_id, status)?;
        info!(%appointment_id, %status, slot_id = %appointment.slot_id, "Appointment updated");
        Ok(appointment)
    }
}
