use crate::availability_manager::{plan_replacement, PlannedSlot};
use crate::{
    backend::CoachingBackend,
    error::CoachingError,
    types::{
        Appointment, AppointmentStatus, AssignedWorkout, AvailabilitySlot, Certification,
        CertificationRequest, SlotRequest, Trainer, UpdateProfileRequest, WorkoutTemplate,
    },
};
use chrono::{DateTime, Utc};
use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard},
};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct StoredAppointment {
    id: Uuid,
    client_id: Uuid,
    trainer_id: Uuid,
    slot_id: Uuid,
    status: AppointmentStatus,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Records {
    trainers: HashMap<Uuid, Trainer>,
    clients: HashMap<Uuid, String>,
    /// (trainer, client) pairs with an active relationship.
    relationships: HashSet<(Uuid, Uuid)>,
    slots: HashMap<Uuid, AvailabilitySlot>,
    appointments: HashMap<Uuid, StoredAppointment>,
    workouts: HashMap<Uuid, WorkoutTemplate>,
    assigned_workouts: HashMap<Uuid, AssignedWorkout>,
}

impl Records {
    fn trainer_exists(&self, trainer_id: Uuid) -> Result<(), CoachingError> {
        if !self.trainers.contains_key(&trainer_id) {
            return Err(CoachingError::NotFound(format!("trainer {trainer_id}")));
        }
        Ok(())
    }

    fn sorted_slots(&self, trainer_id: Uuid) -> Vec<AvailabilitySlot> {
        let mut slots: Vec<AvailabilitySlot> = self
            .slots
            .values()
            .filter(|slot| slot.trainer_id == trainer_id)
            .cloned()
            .collect();
        slots.sort_unstable_by_key(|slot| (slot.day_of_week, slot.start_time, slot.id));
        slots
    }

    fn appointment(&self, stored: &StoredAppointment) -> Result<Appointment, CoachingError> {
        let slot = self.slots.get(&stored.slot_id).cloned().ok_or_else(|| {
            CoachingError::Storage(format!(
                "appointment {} references missing slot {}",
                stored.id, stored.slot_id
            ))
        })?;
        Ok(Appointment {
            id: stored.id,
            client_id: stored.client_id,
            trainer_id: stored.trainer_id,
            slot_id: stored.slot_id,
            slot,
            status: stored.status,
            notes: stored.notes.clone(),
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        })
    }
}

/// Identifiers of the records created by [`LocalStore::insert_example_data`].
#[derive(Debug, Clone)]
pub struct ExampleData {
    pub trainer_id: Uuid,
    pub client_ids: Vec<Uuid>,
    pub workout_id: Uuid,
}

/// In-memory record store. Each unit of work runs under a single lock and
/// finishes all checks before its first write.
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    records: Arc<Mutex<Records>>,
}

impl LocalStore {
    fn records(&self) -> Result<MutexGuard<'_, Records>, CoachingError> {
        self.records
            .lock()
            .map_err(|_| CoachingError::Storage("record store lock poisoned".into()))
    }

    pub fn add_trainer(&self, name: &str) -> Result<Uuid, CoachingError> {
        let now = Utc::now();
        let trainer = Trainer {
            id: Uuid::new_v4(),
            name: name.into(),
            specialization: vec![],
            years_of_experience: 0,
            bio: String::new(),
            hourly_rate: 0.0,
            rating: None,
            certifications: vec![],
            created_at: now,
            updated_at: now,
        };
        let id = trainer.id;
        self.records()?.trainers.insert(id, trainer);
        Ok(id)
    }

    pub fn add_client(&self, name: &str) -> Result<Uuid, CoachingError> {
        let id = Uuid::new_v4();
        self.records()?.clients.insert(id, name.into());
        Ok(id)
    }

    pub fn link_client(&self, trainer_id: Uuid, client_id: Uuid) -> Result<(), CoachingError> {
        let mut records = self.records()?;
        records.trainer_exists(trainer_id)?;
        if !records.clients.contains_key(&client_id) {
            return Err(CoachingError::NotFound(format!("client {client_id}")));
        }
        records.relationships.insert((trainer_id, client_id));
        Ok(())
    }

    pub fn add_workout_template(
        &self,
        trainer_id: Uuid,
        name: &str,
        duration_minutes: i32,
    ) -> Result<Uuid, CoachingError> {
        let mut records = self.records()?;
        records.trainer_exists(trainer_id)?;
        let workout = WorkoutTemplate {
            id: Uuid::new_v4(),
            trainer_id,
            name: name.into(),
            description: String::new(),
            duration_minutes,
            difficulty: "intermediate".into(),
        };
        let id = workout.id;
        records.workouts.insert(id, workout);
        Ok(id)
    }

    pub fn insert_example_data(&self) -> Result<ExampleData, CoachingError> {
        let trainer_id = self.add_trainer("Example Trainer")?;
        let mut client_ids = Vec::new();
        for name in ["Example Client 1", "Example Client 2"] {
            let client_id = self.add_client(name)?;
            self.link_client(trainer_id, client_id)?;
            client_ids.push(client_id);
        }
        let workout_id = self.add_workout_template(trainer_id, "Full body basics", 45)?;
        Ok(ExampleData {
            trainer_id,
            client_ids,
            workout_id,
        })
    }
}

impl CoachingBackend for LocalStore {
    fn trainer(&self, trainer_id: Uuid) -> Result<Trainer, CoachingError> {
        self.records()?
            .trainers
            .get(&trainer_id)
            .cloned()
            .ok_or_else(|| CoachingError::NotFound(format!("trainer {trainer_id}")))
    }

    fn update_profile(
        &self,
        trainer_id: Uuid,
        profile: UpdateProfileRequest,
    ) -> Result<Trainer, CoachingError> {
        let mut records = self.records()?;
        let trainer = records
            .trainers
            .get_mut(&trainer_id)
            .ok_or_else(|| CoachingError::NotFound(format!("trainer {trainer_id}")))?;

        if let Some(specialization) = profile.specialization {
            trainer.specialization = specialization;
        }
        if let Some(years_of_experience) = profile.years_of_experience {
            trainer.years_of_experience = years_of_experience;
        }
        if let Some(bio) = profile.bio {
            trainer.bio = bio;
        }
        if let Some(hourly_rate) = profile.hourly_rate {
            trainer.hourly_rate = hourly_rate;
        }
        trainer.updated_at = Utc::now();
        Ok(trainer.clone())
    }

    fn replace_certifications(
        &self,
        trainer_id: Uuid,
        certifications: Vec<CertificationRequest>,
    ) -> Result<Vec<Certification>, CoachingError> {
        let mut records = self.records()?;
        let trainer = records
            .trainers
            .get_mut(&trainer_id)
            .ok_or_else(|| CoachingError::NotFound(format!("trainer {trainer_id}")))?;

        let now = Utc::now();
        trainer.certifications = certifications
            .into_iter()
            .map(|request| Certification {
                id: Uuid::new_v4(),
                trainer_id,
                name: request.name,
                issuing_organization: request.issuing_organization,
                date_issued: request.date_issued,
                credential_id: request.credential_id,
                created_at: now,
            })
            .collect();
        trainer.updated_at = now;
        Ok(trainer.certifications.clone())
    }

    fn client_exists(&self, client_id: Uuid) -> Result<bool, CoachingError> {
        Ok(self.records()?.clients.contains_key(&client_id))
    }

    fn client_belongs_to_trainer(
        &self,
        client_id: Uuid,
        trainer_id: Uuid,
    ) -> Result<bool, CoachingError> {
        Ok(self
            .records()?
            .relationships
            .contains(&(trainer_id, client_id)))
    }

    fn clients(&self, trainer_id: Uuid) -> Result<Vec<Uuid>, CoachingError> {
        let records = self.records()?;
        records.trainer_exists(trainer_id)?;
        let mut clients: Vec<Uuid> = records
            .relationships
            .iter()
            .filter(|(trainer, _)| *trainer == trainer_id)
            .map(|(_, client)| *client)
            .collect();
        clients.sort_unstable();
        Ok(clients)
    }

    fn client_trainers(&self, client_id: Uuid) -> Result<Vec<Trainer>, CoachingError> {
        let records = self.records()?;
        if !records.clients.contains_key(&client_id) {
            return Err(CoachingError::NotFound(format!("client {client_id}")));
        }
        let mut trainers: Vec<Trainer> = records
            .relationships
            .iter()
            .filter(|(_, client)| *client == client_id)
            .filter_map(|(trainer, _)| records.trainers.get(trainer).cloned())
            .collect();
        trainers.sort_unstable_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(trainers)
    }

    fn slot(&self, slot_id: Uuid) -> Result<AvailabilitySlot, CoachingError> {
        self.records()?
            .slots
            .get(&slot_id)
            .cloned()
            .ok_or_else(|| CoachingError::NotFound(format!("slot {slot_id}")))
    }

    fn availability(&self, trainer_id: Uuid) -> Result<Vec<AvailabilitySlot>, CoachingError> {
        let records = self.records()?;
        records.trainer_exists(trainer_id)?;
        Ok(records.sorted_slots(trainer_id))
    }

    fn replace_availability(
        &self,
        trainer_id: Uuid,
        slots: Vec<SlotRequest>,
    ) -> Result<Vec<AvailabilitySlot>, CoachingError> {
        let mut records = self.records()?;
        records.trainer_exists(trainer_id)?;
        let plan = plan_replacement(&records.sorted_slots(trainer_id), &slots)?;

        // Removed slots are never booked, so only cancelled appointments go with them.
        records
            .appointments
            .retain(|_, stored| !plan.removals.contains(&stored.slot_id));
        for id in &plan.removals {
            records.slots.remove(id);
        }

        let now = Utc::now();
        let mut confirmed = Vec::with_capacity(plan.slots.len());
        for planned in plan.slots {
            let slot = match planned {
                PlannedSlot::Keep(id) => records.slots.get(&id).cloned(),
                PlannedSlot::Update(id, request) => {
                    records.slots.get_mut(&id).map(|slot| {
                        slot.day_of_week = request.day_of_week;
                        slot.start_time = request.start_time;
                        slot.end_time = request.end_time;
                        slot.is_recurring = request.is_recurring;
                        slot.clone()
                    })
                }
                PlannedSlot::Insert(request) => {
                    let slot = AvailabilitySlot {
                        id: Uuid::new_v4(),
                        trainer_id,
                        day_of_week: request.day_of_week,
                        start_time: request.start_time,
                        end_time: request.end_time,
                        is_recurring: request.is_recurring,
                        is_booked: false,
                        created_at: now,
                    };
                    records.slots.insert(slot.id, slot.clone());
                    Some(slot)
                }
            };
            // The plan only names slots that were read under this lock.
            if let Some(slot) = slot {
                confirmed.push(slot);
            }
        }

        debug!(%trainer_id, removed = plan.removals.len(), "Replaced local slots");
        Ok(confirmed)
    }

    fn book_slot(
        &self,
        client_id: Uuid,
        slot_id: Uuid,
        notes: Option<String>,
    ) -> Result<Appointment, CoachingError> {
        let mut records = self.records()?;
        if !records.clients.contains_key(&client_id) {
            return Err(CoachingError::NotFound(format!("client {client_id}")));
        }
        let slot = records
            .slots
            .get_mut(&slot_id)
            .ok_or_else(|| CoachingError::NotFound(format!("slot {slot_id}")))?;
        if slot.is_booked {
            return Err(CoachingError::Conflict(format!(
                "slot {slot_id} is already booked"
            )));
        }
        slot.is_booked = true;
        let trainer_id = slot.trainer_id;

        let now = Utc::now();
        let stored = StoredAppointment {
            id: Uuid::new_v4(),
            client_id,
            trainer_id,
            slot_id,
            status: AppointmentStatus::Scheduled,
            notes,
            created_at: now,
            updated_at: now,
        };
        records.appointments.insert(stored.id, stored.clone());
        records.appointment(&stored)
    }

    fn appointments(&self, trainer_id: Uuid) -> Result<Vec<Appointment>, CoachingError> {
        let records = self.records()?;
        records.trainer_exists(trainer_id)?;
        let mut appointments = records
            .appointments
            .values()
            .filter(|stored| stored.trainer_id == trainer_id)
            .map(|stored| records.appointment(stored))
            .collect::<Result<Vec<_>, _>>()?;
        appointments.sort_unstable_by_key(|appointment| {
            (
                appointment.slot.day_of_week,
                appointment.slot.start_time,
                appointment.created_at,
            )
        });
        Ok(appointments)
    }

    fn update_appointment_status(
        &self,
        appointment_id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, CoachingError> {
        if status == AppointmentStatus::Scheduled {
            return Err(CoachingError::Validation(format!(
                "appointment {appointment_id} can only become completed or cancelled"
            )));
        }
        let mut records = self.records()?;
        let stored = records
            .appointments
            .get(&appointment_id)
            .cloned()
            .ok_or_else(|| CoachingError::NotFound(format!("appointment {appointment_id}")))?;
        if stored.status != AppointmentStatus::Scheduled {
            return Err(CoachingError::Conflict(format!(
                "appointment {appointment_id} is already {}",
                stored.status
            )));
        }
        if !records.slots.contains_key(&stored.slot_id) {
            return Err(CoachingError::Storage(format!(
                "appointment {appointment_id} references missing slot {}",
                stored.slot_id
            )));
        }

        if !status.is_live() {
            if let Some(slot) = records.slots.get_mut(&stored.slot_id) {
                slot.is_booked = false;
            }
        }
        let updated = StoredAppointment {
            status,
            updated_at: Utc::now(),
            ..stored
        };
        records.appointments.insert(appointment_id, updated.clone());
        records.appointment(&updated)
    }

    fn workout_template(&self, workout_id: Uuid) -> Result<WorkoutTemplate, CoachingError> {
        self.records()?
            .workouts
            .get(&workout_id)
            .cloned()
            .ok_or_else(|| CoachingError::NotFound(format!("workout {workout_id}")))
    }

    fn assign_workout(
        &self,
        trainer_id: Uuid,
        client_id: Uuid,
        workout_id: Uuid,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<AssignedWorkout, CoachingError> {
        let mut records = self.records()?;
        records.trainer_exists(trainer_id)?;
        if !records.clients.contains_key(&client_id) {
            return Err(CoachingError::NotFound(format!("client {client_id}")));
        }
        if !records.workouts.contains_key(&workout_id) {
            return Err(CoachingError::NotFound(format!("workout {workout_id}")));
        }

        let assigned = AssignedWorkout {
            id: Uuid::new_v4(),
            client_id,
            workout_id,
            assigned_by: trainer_id,
            assigned_at: Utc::now(),
            due_date,
            completed: false,
            completed_at: None,
        };
        records
            .assigned_workouts
            .insert(assigned.id, assigned.clone());
        Ok(assigned)
    }

    fn assigned_workouts(&self, client_id: Uuid) -> Result<Vec<AssignedWorkout>, CoachingError> {
        let records = self.records()?;
        if !records.clients.contains_key(&client_id) {
            return Err(CoachingError::NotFound(format!("client {client_id}")));
        }
        let mut assigned: Vec<AssignedWorkout> = records
            .assigned_workouts
            .values()
            .filter(|assigned| assigned.client_id == client_id)
            .cloned()
            .collect();
        assigned.sort_unstable_by_key(|assigned| (assigned.assigned_at, assigned.id));
        Ok(assigned)
    }
}
