use crate::backend::CoachingBackend;
use crate::error::CoachingError;
use crate::types::{AvailabilitySlot, ReplaceAvailabilityRequest, SlotRequest};
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

/// What happens to a single requested slot during a replacement.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannedSlot {
    Keep(Uuid),
    Update(Uuid, SlotRequest),
    Insert(SlotRequest),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplacementPlan {
    /// In request order.
    pub slots: Vec<PlannedSlot>,
    pub removals: Vec<Uuid>,
}

/// Partitions a full replacement of `existing` by `requested`.
///
/// A booked slot may neither be removed nor moved to another window; either
/// case rejects the whole replacement with `Conflict`.
pub fn plan_replacement(
    existing: &[AvailabilitySlot],
    requested: &[SlotRequest],
) -> Result<ReplacementPlan, CoachingError> {
    let by_id: HashMap<Uuid, &AvailabilitySlot> =
        existing.iter().map(|slot| (slot.id, slot)).collect();
    let mut kept = HashSet::new();
    let mut plan = ReplacementPlan::default();

    for request in requested {
        let Some(id) = request.id else {
            plan.slots.push(PlannedSlot::Insert(request.clone()));
            continue;
        };
        let current = by_id
            .get(&id)
            .ok_or_else(|| CoachingError::NotFound(format!("slot {id} of this trainer")))?;
        kept.insert(id);

        if current.same_window(request) {
            plan.slots.push(PlannedSlot::Keep(id));
        } else if current.is_booked {
            return Err(CoachingError::Conflict(format!(
                "slot {id} is booked and can't be moved"
            )));
        } else {
            plan.slots.push(PlannedSlot::Update(id, request.clone()));
        }
    }

    for slot in existing.iter().filter(|slot| !kept.contains(&slot.id)) {
        if slot.is_booked {
            return Err(CoachingError::Conflict(format!(
                "slot {} is booked and can't be removed",
                slot.id
            )));
        }
        plan.removals.push(slot.id);
    }

    Ok(plan)
}

#[derive(Clone)]
pub struct AvailabilityManager<T: CoachingBackend> {
    backend: T,
}

impl<T: CoachingBackend> AvailabilityManager<T> {
    pub fn new(backend: T) -> Self {
        Self { backend }
    }

    pub fn availability(&self, trainer_id: Uuid) -> Result<Vec<AvailabilitySlot>, CoachingError> {
        self.backend.availability(trainer_id)
    }

    pub fn replace_availability(
        &self,
        trainer_id: Uuid,
        request: ReplaceAvailabilityRequest,
    ) -> Result<Vec<AvailabilitySlot>, CoachingError> {
        if let Err(errors) = request.validate() {
            warn!(%trainer_id, %errors, "Rejected invalid availability");
            return Err(errors.into());
        }

        match self.backend.replace_availability(trainer_id, request.slots) {
            Ok(slots) => {
                info!(%trainer_id, slots = slots.len(), "Availability replaced");
                Ok(slots)
            }
            Err(err) => {
                warn!(%trainer_id, %err, "Availability replacement failed");
                Err(err)
            }
        }
    }
}
