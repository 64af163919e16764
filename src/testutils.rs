use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};

use chrono::{DateTime, NaiveTime, Utc};
use uuid::Uuid;

use crate::{
    backend::CoachingBackend,
    error::CoachingError,
    types::{
        Appointment, AppointmentStatus, AssignedWorkout, AvailabilitySlot, Certification,
        CertificationRequest, SlotRequest, Trainer, UpdateProfileRequest, WorkoutTemplate,
    },
};

pub fn slot_request(day_of_week: i16, start: &str, end: &str) -> SlotRequest {
    SlotRequest {
        id: None,
        day_of_week,
        start_time: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
        end_time: NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
        is_recurring: true,
    }
}

pub fn example_slot(trainer_id: Uuid) -> AvailabilitySlot {
    AvailabilitySlot {
        id: Uuid::new_v4(),
        trainer_id,
        day_of_week: 1,
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        is_recurring: true,
        is_booked: false,
        created_at: Utc::now(),
    }
}

pub struct MockCoachingBackendInner {
    pub error: Mutex<Option<CoachingError>>,
    pub linked: Mutex<bool>,
    pub workout_owner: Mutex<Uuid>,
    pub calls_to_trainer: AtomicU64,
    pub calls_to_update_profile: AtomicU64,
    pub calls_to_client_trainers: AtomicU64,
    pub calls_to_replace_certifications: AtomicU64,
    pub calls_to_clients: AtomicU64,
    pub calls_to_availability: AtomicU64,
    pub calls_to_replace_availability: AtomicU64,
    pub calls_to_book_slot: AtomicU64,
    pub calls_to_appointments: AtomicU64,
    pub calls_to_update_appointment_status: AtomicU64,
    pub calls_to_assign_workout: AtomicU64,
    pub calls_to_assigned_workouts: AtomicU64,
    pub slots: Mutex<Vec<AvailabilitySlot>>,
}

#[derive(Clone)]
pub struct MockCoachingBackend(pub Arc<MockCoachingBackendInner>);

impl MockCoachingBackendInner {
    fn new() -> Self {
        Self {
            error: Mutex::default(),
            linked: Mutex::new(true),
            workout_owner: Mutex::new(Uuid::nil()),
            calls_to_trainer: AtomicU64::default(),
            calls_to_update_profile: AtomicU64::default(),
            calls_to_client_trainers: AtomicU64::default(),
            calls_to_replace_certifications: AtomicU64::default(),
            calls_to_clients: AtomicU64::default(),
            calls_to_availability: AtomicU64::default(),
            calls_to_replace_availability: AtomicU64::default(),
            calls_to_book_slot: AtomicU64::default(),
            calls_to_appointments: AtomicU64::default(),
            calls_to_update_appointment_status: AtomicU64::default(),
            calls_to_assign_workout: AtomicU64::default(),
            calls_to_assigned_workouts: AtomicU64::default(),
            slots: Mutex::default(),
        }
    }
}

impl MockCoachingBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockCoachingBackendInner::new()))
    }

    /// Every following call fails with `err`.
    pub fn fail_with(&self, err: CoachingError) {
        *self.0.error.lock().unwrap() = Some(err);
    }

    pub fn set_linked(&self, linked: bool) {
        *self.0.linked.lock().unwrap() = linked;
    }

    /// Trainer that owns every workout template the mock hands out.
    pub fn set_workout_owner(&self, trainer_id: Uuid) {
        *self.0.workout_owner.lock().unwrap() = trainer_id;
    }

    fn result(&self) -> Result<(), CoachingError> {
        match self.0.error.lock().unwrap().clone() {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    fn trainer_profile(trainer_id: Uuid) -> Trainer {
        Trainer {
            id: trainer_id,
            name: "Mock Trainer".into(),
            specialization: vec!["strength".into()],
            years_of_experience: 5,
            bio: String::new(),
            hourly_rate: 60.0,
            rating: Some(4.5),
            certifications: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn appointment(slot_id: Uuid, client_id: Uuid, status: AppointmentStatus) -> Appointment {
        let mut slot = example_slot(Uuid::new_v4());
        slot.id = slot_id;
        slot.is_booked = status.is_live();
        Appointment {
            id: Uuid::new_v4(),
            client_id,
            trainer_id: slot.trainer_id,
            slot_id,
            slot,
            status,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

impl CoachingBackend for MockCoachingBackend {
    fn trainer(&self, trainer_id: Uuid) -> Result<Trainer, CoachingError> {
        self.0.calls_to_trainer.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(Self::trainer_profile(trainer_id))
    }

    fn update_profile(
        &self,
        trainer_id: Uuid,
        profile: UpdateProfileRequest,
    ) -> Result<Trainer, CoachingError> {
        self.0.calls_to_update_profile.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        let mut trainer = Self::trainer_profile(trainer_id);
        if let Some(bio) = profile.bio {
            trainer.bio = bio;
        }
        Ok(trainer)
    }

    fn replace_certifications(
        &self,
        trainer_id: Uuid,
        certifications: Vec<CertificationRequest>,
    ) -> Result<Vec<Certification>, CoachingError> {
        self.0
            .calls_to_replace_certifications
            .fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(certifications
            .into_iter()
            .map(|request| Certification {
                id: Uuid::new_v4(),
                trainer_id,
                name: request.name,
                issuing_organization: request.issuing_organization,
                date_issued: request.date_issued,
                credential_id: request.credential_id,
                created_at: Utc::now(),
            })
            .collect())
    }

    fn client_exists(&self, _client_id: Uuid) -> Result<bool, CoachingError> {
        self.result()?;
        Ok(true)
    }

    fn client_belongs_to_trainer(
        &self,
        _client_id: Uuid,
        _trainer_id: Uuid,
    ) -> Result<bool, CoachingError> {
        self.result()?;
        Ok(*self.0.linked.lock().unwrap())
    }

    fn clients(&self, _trainer_id: Uuid) -> Result<Vec<Uuid>, CoachingError> {
        self.0.calls_to_clients.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(vec![Uuid::new_v4()])
    }

    fn client_trainers(&self, _client_id: Uuid) -> Result<Vec<Trainer>, CoachingError> {
        self.0.calls_to_client_trainers.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(vec![Self::trainer_profile(Uuid::new_v4())])
    }

    fn slot(&self, slot_id: Uuid) -> Result<AvailabilitySlot, CoachingError> {
        self.result()?;
        let mut slot = example_slot(Uuid::new_v4());
        slot.id = slot_id;
        Ok(slot)
    }

    fn availability(&self, _trainer_id: Uuid) -> Result<Vec<AvailabilitySlot>, CoachingError> {
        self.0.calls_to_availability.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(self.0.slots.lock().unwrap().clone())
    }

    fn replace_availability(
        &self,
        trainer_id: Uuid,
        slots: Vec<SlotRequest>,
    ) -> Result<Vec<AvailabilitySlot>, CoachingError> {
        self.0
            .calls_to_replace_availability
            .fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(slots
            .into_iter()
            .map(|request| AvailabilitySlot {
                id: request.id.unwrap_or_else(Uuid::new_v4),
                trainer_id,
                day_of_week: request.day_of_week,
                start_time: request.start_time,
                end_time: request.end_time,
                is_recurring: request.is_recurring,
                is_booked: false,
                created_at: Utc::now(),
            })
            .collect())
    }

    fn book_slot(
        &self,
        client_id: Uuid,
        slot_id: Uuid,
        _notes: Option<String>,
    ) -> Result<Appointment, CoachingError> {
        self.0.calls_to_book_slot.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(Self::appointment(
            slot_id,
            client_id,
            AppointmentStatus::Scheduled,
        ))
    }

    fn appointments(&self, _trainer_id: Uuid) -> Result<Vec<Appointment>, CoachingError> {
        self.0.calls_to_appointments.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(vec![])
    }

    fn update_appointment_status(
        &self,
        appointment_id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, CoachingError> {
        self.0
            .calls_to_update_appointment_status
            .fetch_add(1, Ordering::SeqCst);
        self.result()?;
        let mut appointment = Self::appointment(Uuid::new_v4(), Uuid::new_v4(), status);
        appointment.id = appointment_id;
        Ok(appointment)
    }

    fn workout_template(&self, workout_id: Uuid) -> Result<WorkoutTemplate, CoachingError> {
        self.result()?;
        Ok(WorkoutTemplate {
            id: workout_id,
            trainer_id: *self.0.workout_owner.lock().unwrap(),
            name: "Mock Workout".into(),
            description: String::new(),
            duration_minutes: 30,
            difficulty: "beginner".into(),
        })
    }

    fn assign_workout(
        &self,
        trainer_id: Uuid,
        client_id: Uuid,
        workout_id: Uuid,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<AssignedWorkout, CoachingError> {
        self.0.calls_to_assign_workout.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(AssignedWorkout {
            id: Uuid::new_v4(),
            client_id,
            workout_id,
            assigned_by: trainer_id,
            assigned_at: Utc::now(),
            due_date,
            completed: false,
            completed_at: None,
        })
    }

    fn assigned_workouts(&self, _client_id: Uuid) -> Result<Vec<AssignedWorkout>, CoachingError> {
        self.0
            .calls_to_assigned_workouts
            .fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(vec![])
    }
}
