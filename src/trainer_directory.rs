use crate::backend::CoachingBackend;
use crate::error::CoachingError;
use crate::types::{
    AssignWorkoutRequest, AssignedWorkout, Certification, ReplaceCertificationsRequest, Trainer,
    UpdateProfileRequest,
};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

/// Trainer profile, client and workout queries around the booking core.
#[derive(Clone)]
pub struct TrainerDirectory<T: CoachingBackend> {
    backend: T,
    enforce_client_relationship: bool,
}

impl<T: CoachingBackend> TrainerDirectory<T> {
    pub fn new(backend: T, enforce_client_relationship: bool) -> Self {
        Self {
            backend,
            enforce_client_relationship,
        }
    }

    pub fn trainer(&self, trainer_id: Uuid) -> Result<Trainer, CoachingError> {
        self.backend.trainer(trainer_id)
    }

    pub fn update_profile(
        &self,
        trainer_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<Trainer, CoachingError> {
        if let Err(errors) = request.validate() {
            warn!(%trainer_id, %errors, "Rejected invalid profile update");
            return Err(errors.into());
        }
        let trainer = self.backend.update_profile(trainer_id, request)?;
        info!(%trainer_id, "Profile updated");
        Ok(trainer)
    }

    pub fn replace_certifications(
        &self,
        trainer_id: Uuid,
        request: ReplaceCertificationsRequest,
    ) -> Result<Vec<Certification>, CoachingError> {
        request.validate()?;
        let certifications = self
            .backend
            .replace_certifications(trainer_id, request.certifications)?;
        info!(%trainer_id, certifications = certifications.len(), "Certifications replaced");
        Ok(certifications)
    }

    pub fn clients(&self, trainer_id: Uuid) -> Result<Vec<Uuid>, CoachingError> {
        self.backend.clients(trainer_id)
    }

    pub fn client_trainers(&self, client_id: Uuid) -> Result<Vec<Trainer>, CoachingError> {
        self.backend.client_trainers(client_id)
    }

    pub fn client_belongs_to_trainer(
        &self,
        client_id: Uuid,
        trainer_id: Uuid,
    ) -> Result<bool, CoachingError> {
        self.backend.client_belongs_to_trainer(client_id, trainer_id)
    }

    pub fn assign_workout(
        &self,
        trainer_id: Uuid,
        request: AssignWorkoutRequest,
    ) -> Result<AssignedWorkout, CoachingError> {
        let workout = self.backend.workout_template(request.workout_id)?;
        if workout.trainer_id != trainer_id {
            warn!(%trainer_id, workout_id = %workout.id, "Workout belongs to another trainer");
            return Err(CoachingError::Forbidden(format!(
                "workout {} does not belong to trainer {trainer_id}",
                workout.id
            )));
        }
        if !self.backend.client_exists(request.client_id)? {
            return Err(CoachingError::NotFound(format!(
                "client {}",
                request.client_id
            )));
        }
        if self.enforce_client_relationship
            && !self.client_belongs_to_trainer(request.client_id, trainer_id)?
        {
            return Err(CoachingError::Forbidden(format!(
                "client {} is not a client of trainer {trainer_id}",
                request.client_id
            )));
        }

        let assigned = self.backend.assign_workout(
            trainer_id,
            request.client_id,
            request.workout_id,
            request.due_date,
        )?;
        info!(
            assigned_workout_id = %assigned.id,
            %trainer_id,
            client_id = %assigned.client_id,
            "Workout assigned"
        );
        Ok(assigned)
    }

    pub fn assigned_workouts(&self, client_id: Uuid) -> Result<Vec<AssignedWorkout>, CoachingError> {
        self.backend.assigned_workouts(client_id)
    }
}
