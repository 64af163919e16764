use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, collections::HashSet, fmt};
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const MAX_NOTES_LENGTH: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub day_of_week: i16,
    #[serde(with = "time_of_day")]
    pub start_time: NaiveTime,
    #[serde(with = "time_of_day")]
    pub end_time: NaiveTime,
    pub is_recurring: bool,
    pub is_booked: bool,
    pub created_at: DateTime<Utc>,
}

impl AvailabilitySlot {
    /// True if `request` describes the same weekly window as this slot.
    pub fn same_window(&self, request: &SlotRequest) -> bool {
        self.day_of_week == request.day_of_week
            && self.start_time == request.start_time
            && self.end_time == request.end_time
            && self.is_recurring == request.is_recurring
    }
}

/// A candidate slot sent by a trainer. `id` refers to an existing slot that
/// should be kept; without it a new slot is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_slot_window"))]
pub struct SlotRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[validate(range(min = 0, max = 6, message = "day_of_week must be between 0 and 6"))]
    pub day_of_week: i16,
    #[serde(with = "time_of_day")]
    pub start_time: NaiveTime,
    #[serde(with = "time_of_day")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub is_recurring: bool,
}

fn validate_slot_window(slot: &SlotRequest) -> Result<(), ValidationError> {
    if slot.start_time >= slot.end_time {
        return Err(ValidationError::new("slot_window").with_message(Cow::Owned(format!(
            "start_time {} must be before end_time {}",
            slot.start_time.format("%H:%M"),
            slot.end_time.format("%H:%M")
        ))));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_unique_slot_ids"))]
pub struct ReplaceAvailabilityRequest {
    #[validate(nested)]
    pub slots: Vec<SlotRequest>,
}

fn validate_unique_slot_ids(request: &ReplaceAvailabilityRequest) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for id in request.slots.iter().filter_map(|slot| slot.id) {
        if !seen.insert(id) {
            return Err(ValidationError::new("duplicate_slot_id")
                .with_message(Cow::Owned(format!("slot {id} is listed more than once"))));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Cancelled appointments no longer hold their slot.
    pub fn is_live(&self) -> bool {
        *self != AppointmentStatus::Cancelled
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AppointmentStatus {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(format!("unknown appointment status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub trainer_id: Uuid,
    pub slot_id: Uuid,
    pub slot: AvailabilitySlot,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookingRequest {
    pub client_id: Uuid,
    pub slot_id: Uuid,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub name: String,
    pub issuing_organization: String,
    pub date_issued: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CertificationRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub issuing_organization: String,
    #[validate(length(min = 1, max = 32))]
    pub date_issued: String,
    #[serde(default)]
    pub credential_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ReplaceCertificationsRequest {
    #[validate(nested)]
    pub certifications: Vec<CertificationRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainer {
    pub id: Uuid,
    pub name: String,
    pub specialization: Vec<String>,
    pub years_of_experience: i32,
    pub bio: String,
    pub hourly_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub certifications: Vec<Certification>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub specialization: Option<Vec<String>>,
    #[serde(default)]
    #[validate(range(min = 0, max = 80))]
    pub years_of_experience: Option<i32>,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub hourly_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub name: String,
    pub description: String,
    pub duration_minutes: i32,
    pub difficulty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedWorkout {
    pub id: Uuid,
    pub client_id: Uuid,
    pub workout_id: Uuid,
    pub assigned_by: Uuid,
    pub assigned_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssignWorkoutRequest {
    pub client_id: Uuid,
    pub workout_id: Uuid,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Times of day travel as `"HH:MM"`; seconds are accepted on input.
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&value, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&value, "%H:%M:%S"))
            .map_err(|err| de::Error::custom(format!("invalid time of day '{value}': {err}")))
    }
}
