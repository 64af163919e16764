use crate::error::CoachingError;
use crate::types::{
    Appointment, AppointmentStatus, AssignedWorkout, AvailabilitySlot, Certification,
    CertificationRequest, SlotRequest, Trainer, UpdateProfileRequest, WorkoutTemplate,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Record store used by the coaching services.
///
/// Every mutating method is a single atomic unit of work: it either applies
/// completely or leaves the store untouched.
pub trait CoachingBackend: Clone + Send + Sync + 'static {
    fn trainer(&self, trainer_id: Uuid) -> Result<Trainer, CoachingError>;
    /// Overwrites only the fields present in `profile`.
    fn update_profile(
        &self,
        trainer_id: Uuid,
        profile: UpdateProfileRequest,
    ) -> Result<Trainer, CoachingError>;
    fn replace_certifications(
        &self,
        trainer_id: Uuid,
        certifications: Vec<CertificationRequest>,
    ) -> Result<Vec<Certification>, CoachingError>;

    fn client_exists(&self, client_id: Uuid) -> Result<bool, CoachingError>;
    fn client_belongs_to_trainer(
        &self,
        client_id: Uuid,
        trainer_id: Uuid,
    ) -> Result<bool, CoachingError>;
    fn clients(&self, trainer_id: Uuid) -> Result<Vec<Uuid>, CoachingError>;
    /// Trainers the client has an active relationship with.
    fn client_trainers(&self, client_id: Uuid) -> Result<Vec<Trainer>, CoachingError>;

    fn slot(&self, slot_id: Uuid) -> Result<AvailabilitySlot, CoachingError>;
    fn availability(&self, trainer_id: Uuid) -> Result<Vec<AvailabilitySlot>, CoachingError>;
    /// Replaces the trainer's whole slot set. Booked slots may only be kept
    /// unchanged; see `availability_manager::plan_replacement`.
    fn replace_availability(
        &self,
        trainer_id: Uuid,
        slots: Vec<SlotRequest>,
    ) -> Result<Vec<AvailabilitySlot>, CoachingError>;

    /// Creates a scheduled appointment and marks the slot booked. Fails with
    /// `Conflict` if the slot is already booked.
    fn book_slot(
        &self,
        client_id: Uuid,
        slot_id: Uuid,
        notes: Option<String>,
    ) -> Result<Appointment, CoachingError>;
    fn appointments(&self, trainer_id: Uuid) -> Result<Vec<Appointment>, CoachingError>;
    /// Moves a scheduled appointment to `Completed` or `Cancelled`.
    /// Cancelling releases the slot.
    fn update_appointment_status(
        &self,
        appointment_id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, CoachingError>;

    fn workout_template(&self, workout_id: Uuid) -> Result<WorkoutTemplate, CoachingError>;
    fn assign_workout(
        &self,
        trainer_id: Uuid,
        client_id: Uuid,
        workout_id: Uuid,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<AssignedWorkout, CoachingError>;
    fn assigned_workouts(&self, client_id: Uuid) -> Result<Vec<AssignedWorkout>, CoachingError>;
}
