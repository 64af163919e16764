use crate::availability_manager::AvailabilityManager;
use crate::backend::CoachingBackend;
use crate::booking_service::BookingService;
use crate::configuration::Configuration;
use crate::error::CoachingError;
use crate::trainer_directory::TrainerDirectory;
use crate::types::{
    Appointment, AssignWorkoutRequest, AssignedWorkout, AvailabilitySlot, BookingRequest,
    Certification, ReplaceAvailabilityRequest, ReplaceCertificationsRequest, Trainer,
    UpdateProfileRequest,
};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request, State};
use axum::http::request::Parts;
use axum::{http::StatusCode, Json};
use axum::{
    routing::{get, post, put},
    Router,
};
use axum_valid::{Valid, ValidRejection};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState<T: CoachingBackend> {
    availability: AvailabilityManager<T>,
    booking: BookingService<T>,
    directory: TrainerDirectory<T>,
}

type ApiResult<R> = Result<Json<R>, CoachingError>;

/// JSON body checked by `validator`. Malformed and invalid bodies are both
/// answered as a `CoachingError::Validation`.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    Valid<Json<T>>: FromRequest<S, Rejection = ValidRejection<JsonRejection>>,
{
    type Rejection = CoachingError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Valid(Json(value)) = Valid::<Json<T>>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Path parameters whose parse failures answer as `CoachingError::Validation`.
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
{
    type Rejection = CoachingError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

pub fn create_app<T: CoachingBackend, C: Configuration>(backend: T, configuration: C) -> Router {
    let enforce = configuration.enforce_client_relationship();
    let state = AppState {
        availability: AvailabilityManager::new(backend.clone()),
        booking: BookingService::new(backend.clone(), enforce),
        directory: TrainerDirectory::new(backend, enforce),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trainers = Router::new()
        .route("/trainers/{trainer_id}", get(get_trainer).put(update_profile))
        .route(
            "/trainers/{trainer_id}/certifications",
            put(replace_certifications),
        )
        .route(
            "/trainers/{trainer_id}/availability",
            get(get_availability).put(replace_availability),
        )
        .route("/trainers/{trainer_id}/appointments", get(get_appointments))
        .route("/trainers/{trainer_id}/clients", get(get_clients))
        .route("/trainers/{trainer_id}/workouts", post(assign_workout));

    let clients = Router::new()
        .route("/appointments", post(book_slot))
        .route(
            "/appointments/{appointment_id}/cancel",
            post(cancel_appointment),
        )
        .route(
            "/appointments/{appointment_id}/complete",
            post(complete_appointment),
        )
        .route("/clients/{client_id}/trainers", get(get_client_trainers))
        .route("/clients/{client_id}/workouts", get(get_assigned_workouts));

    Router::new()
        .merge(trainers)
        .merge(clients)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Runs a synchronous backend call off the async workers.
async fn blocking<R, F>(operation: F) -> Result<R, CoachingError>
where
    R: Send + 'static,
    F: FnOnce() -> Result<R, CoachingError> + Send + 'static,
{
    tokio::task::spawn_blocking(operation)
        .await
        .map_err(|err| CoachingError::Storage(format!("backend task failed: {err}")))?
}

async fn get_trainer<T: CoachingBackend>(
    State(state): State<AppState<T>>,
    ApiPath(trainer_id): ApiPath<Uuid>,
) -> ApiResult<Trainer> {
    blocking(move || state.directory.trainer(trainer_id))
        .await
        .map(Json)
}

async fn update_profile<T: CoachingBackend>(
    State(state): State<AppState<T>>,
    ApiPath(trainer_id): ApiPath<Uuid>,
    ValidJson(request): ValidJson<UpdateProfileRequest>,
) -> ApiResult<Trainer> {
    blocking(move || state.directory.update_profile(trainer_id, request))
        .await
        .map(Json)
}

async fn replace_certifications<T: CoachingBackend>(
    State(state): State<AppState<T>>,
    ApiPath(trainer_id): ApiPath<Uuid>,
    ValidJson(request): ValidJson<ReplaceCertificationsRequest>,
) -> ApiResult<Vec<Certification>> {
    blocking(move || state.directory.replace_certifications(trainer_id, request))
        .await
        .map(Json)
}

async fn get_availability<T: CoachingBackend>(
    State(state): State<AppState<T>>,
    ApiPath(trainer_id): ApiPath<Uuid>,
) -> ApiResult<Vec<AvailabilitySlot>> {
    blocking(move || state.availability.availability(trainer_id))
        .await
        .map(Json)
}

async fn replace_availability<T: CoachingBackend>(
    State(state): State<AppState<T>>,
    ApiPath(trainer_id): ApiPath<Uuid>,
    ValidJson(request): ValidJson<ReplaceAvailabilityRequest>,
) -> ApiResult<Vec<AvailabilitySlot>> {
    blocking(move || state.availability.replace_availability(trainer_id, request))
        .await
        .map(Json)
}

async fn get_appointments<T: CoachingBackend>(
    State(state): State<AppState<T>>,
    ApiPath(trainer_id): ApiPath<Uuid>,
) -> ApiResult<Vec<Appointment>> {
    blocking(move || state.booking.appointments(trainer_id))
        .await
        .map(Json)
}

async fn get_clients<T: CoachingBackend>(
    State(state): State<AppState<T>>,
    ApiPath(trainer_id): ApiPath<Uuid>,
) -> ApiResult<Vec<Uuid>> {
    blocking(move || state.directory.clients(trainer_id))
        .await
        .map(Json)
}

async fn assign_workout<T: CoachingBackend>(
    State(state): State<AppState<T>>,
    ApiPath(trainer_id): ApiPath<Uuid>,
    ValidJson(request): ValidJson<AssignWorkoutRequest>,
) -> Result<(StatusCode, Json<AssignedWorkout>), CoachingError> {
    let assigned = blocking(move || state.directory.assign_workout(trainer_id, request)).await?;
    Ok((StatusCode::CREATED, Json(assigned)))
}

async fn book_slot<T: CoachingBackend>(
    State(state): State<AppState<T>>,
    ValidJson(request): ValidJson<BookingRequest>,
) -> Result<(StatusCode, Json<Appointment>), CoachingError> {
    let appointment = blocking(move || state.booking.book_slot(request)).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

async fn cancel_appointment<T: CoachingBackend>(
    State(state): State<AppState<T>>,
    ApiPath(appointment_id): ApiPath<Uuid>,
) -> ApiResult<Appointment> {
    blocking(move || state.booking.cancel_appointment(appointment_id))
        .await
        .map(Json)
}

async fn complete_appointment<T: CoachingBackend>(
    State(state): State<AppState<T>>,
    ApiPath(appointment_id): ApiPath<Uuid>,
) -> ApiResult<Appointment> {
    blocking(move || state.booking.complete_appointment(appointment_id))
        .await
        .map(Json)
}

async fn get_client_trainers<T: CoachingBackend>(
    State(state): State<AppState<T>>,
    ApiPath(client_id): ApiPath<Uuid>,
) -> ApiResult<Vec<Trainer>> {
    blocking(move || state.directory.client_trainers(client_id))
        .await
        .map(Json)
}

async fn get_assigned_workouts<T: CoachingBackend>(
    State(state): State<AppState<T>>,
    ApiPath(client_id): ApiPath<Uuid>,
) -> ApiResult<Vec<AssignedWorkout>> {
    blocking(move || state.directory.assigned_workouts(client_id))
        .await
        .map(Json)
}
