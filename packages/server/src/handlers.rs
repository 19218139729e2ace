//! HTTP handler functions for the air map API.

use actix_web::{HttpRequest, HttpResponse, cookie::Cookie, web};
use air_map_database::reports::{StatusUpdate, insert_report, update_report_status};
use air_map_database_models::NewReport;
use air_map_forecast::{DEFAULT_HORIZON, forecast_chart};
use air_map_map::features::{satellite_collection, traffic_collection};
use air_map_server_models::{
    ApiHealth, ApiStoredReport, ErrorResponse, ForecastQuery, RangeQuery, ReportSubmission,
    SensorsQuery, SessionResponse, SignInRequest, SignUpRequest, StatusUpdateRequest, UserProfile,
};
use air_map_simulation::{
    DEFAULT_SENSOR_COUNT, generate_pollution_sources, generate_sensors, satellite_layers,
    traffic_layers,
};

use crate::AppState;
use crate::auth::{AuthError, SESSION_COOKIE, current_user, session_tokens};
use crate::category::map_category;
use crate::loader::{load_dashboard, load_reports, load_stations};

/// Upper bound on `count` for the sensors endpoint.
pub const MAX_SENSOR_COUNT: usize = 500;

/// Upper bound on `hours` for the forecast endpoint.
pub const MAX_FORECAST_HOURS: usize = 168;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        live_feed: state.feed.is_some(),
    })
}

/// `GET /api/stations`
pub async fn stations(state: web::Data<AppState>, query: web::Query<RangeQuery>) -> HttpResponse {
    let load = load_stations(state.feed.as_deref(), query.range).await;
    HttpResponse::Ok().json(load.stations)
}

/// `GET /api/sensors`
pub async fn sensors(query: web::Query<SensorsQuery>) -> HttpResponse {
    let count = query
        .count
        .unwrap_or(DEFAULT_SENSOR_COUNT)
        .min(MAX_SENSOR_COUNT);
    HttpResponse::Ok().json(generate_sensors(&mut rand::thread_rng(), query.range, count))
}

/// `GET /api/reports`
///
/// Stored reports, newest first, or simulated ones when nothing is stored.
pub async fn reports(state: web::Data<AppState>, query: web::Query<RangeQuery>) -> HttpResponse {
    HttpResponse::Ok().json(load_reports(state.db.as_ref(), query.range).await)
}

/// `POST /api/reports`
///
/// Files a report for the signed-in user. The body is read before the
/// session check so malformed bodies always answer 500.
pub async fn submit_report(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> HttpResponse {
    let submission: ReportSubmission = match serde_json::from_slice(&body) {
        Ok(submission) => submission,
        Err(e) => {
            log::error!("Rejecting malformed report body: {e}");
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Internal Server Error"));
        }
    };

    let Some(user) = current_user(&req, state.sessions.as_ref()) else {
        return unauthorized();
    };

    let report = NewReport {
        report_type: map_category(&submission.category),
        severity: submission.severity,
        description: submission.description,
        location: submission.location,
        user_id: user.id,
    };

    match insert_report(state.db.as_ref(), &report).await {
        Ok(row) => {
            log::info!("Stored report {} ({})", row.id, row.report_type);
            HttpResponse::Ok().json(ApiStoredReport::from(row))
        }
        Err(e) => {
            log::error!("Failed to store report: {e}");
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}

/// `PATCH /api/reports/{id}/status`
pub async fn update_status(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<StatusUpdateRequest>,
) -> HttpResponse {
    let Some(user) = current_user(&req, state.sessions.as_ref()) else {
        return unauthorized();
    };
    if !user.role.can_moderate() {
        return HttpResponse::Forbidden().json(ErrorResponse::new("Forbidden"));
    }

    let id = path.into_inner();
    match update_report_status(state.db.as_ref(), &id, body.status).await {
        Ok(StatusUpdate::Updated(row)) => HttpResponse::Ok().json(ApiStoredReport::from(row)),
        Ok(StatusUpdate::NotFound) => {
            HttpResponse::NotFound().json(ErrorResponse::new(format!("Report {id} not found")))
        }
        Ok(StatusUpdate::Conflict { current }) => HttpResponse::Conflict().json(
            ErrorResponse::new(format!("Report {id} is already {current}")),
        ),
        Err(e) => {
            log::error!("Failed to update report {id}: {e}");
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}

/// `GET /api/dashboard`
///
/// Everything the page shows for one range.
pub async fn dashboard(state: web::Data<AppState>, query: web::Query<RangeQuery>) -> HttpResponse {
    HttpResponse::Ok().json(load_dashboard(&state, query.range).await)
}

/// `GET /api/sources`
pub async fn sources() -> HttpResponse {
    HttpResponse::Ok().json(generate_pollution_sources(&mut rand::thread_rng()))
}

/// `GET /api/layers/satellite`
pub async fn satellite_layer() -> HttpResponse {
    HttpResponse::Ok().json(satellite_collection(&satellite_layers()))
}

/// `GET /api/layers/traffic`
pub async fn traffic_layer() -> HttpResponse {
    HttpResponse::Ok().json(traffic_collection(&traffic_layers(&mut rand::thread_rng())))
}

/// `GET /api/forecast`
///
/// Chart series around `current`: mock history, "Now", then `hours`
/// forecast points.
pub async fn forecast(state: web::Data<AppState>, query: web::Query<ForecastQuery>) -> HttpResponse {
    let hours = query.hours.unwrap_or(DEFAULT_HORIZON).min(MAX_FORECAST_HOURS);
    let chart = forecast_chart(
        &mut rand::thread_rng(),
        state.forecaster.as_ref(),
        query.current,
        hours,
    );
    HttpResponse::Ok().json(chart)
}

/// `POST /api/auth/signup`
pub async fn sign_up(state: web::Data<AppState>, body: web::Json<SignUpRequest>) -> HttpResponse {
    match state.sessions.sign_up(body.into_inner()) {
        Ok(user) => open_session(&state, user),
        Err(e) => auth_failure(&e),
    }
}

/// `POST /api/auth/signin`
pub async fn sign_in(state: web::Data<AppState>, body: web::Json<SignInRequest>) -> HttpResponse {
    match state.sessions.sign_in(&body.phone) {
        Ok(user) => open_session(&state, user),
        Err(e) => auth_failure(&e),
    }
}

/// `POST /api/auth/signout`
pub async fn sign_out(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    for token in session_tokens(&req) {
        state.sessions.end_session(&token);
    }

    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(serde_json::json!({ "success": true }))
}

fn open_session(state: &AppState, user: UserProfile) -> HttpResponse {
    let token = state.sessions.start_session(user.clone());
    let cookie = Cookie::build(SESSION_COOKIE, token.clone())
        .path("/")
        .http_only(true)
        .finish();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(SessionResponse { token, user })
}

fn auth_failure(error: &AuthError) -> HttpResponse {
    let body = ErrorResponse::new(error.to_string());
    match error {
        AuthError::AlreadyExists => HttpResponse::Conflict().json(body),
        AuthError::NotFound => HttpResponse::NotFound().json(body),
    }
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new("Unauthorized"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use air_map_air_models::{ReportStatus, ReportType};
    use air_map_database::{open_db, reports::count_reports};
    use air_map_forecast::FlatForecaster;
    use air_map_server_models::{DashboardResponse, UserRole};
    use switchy_database::Database;

    use super::*;
    use crate::auth::{InMemorySessionStore, SessionStore};
    use crate::configure;

    async fn state() -> web::Data<AppState> {
        let path = std::env::temp_dir().join(format!("air_map_{}.db", uuid::Uuid::new_v4()));
        let db: Arc<dyn Database> = Arc::from(open_db(&path).await.unwrap());
        web::Data::new(AppState {
            db,
            sessions: Arc::new(InMemorySessionStore::new()),
            feed: None,
            forecaster: Arc::new(FlatForecaster),
        })
    }

    fn session_for(state: &AppState, phone: &str, role: UserRole) -> String {
        let user = state
            .sessions
            .sign_up(SignUpRequest {
                phone: phone.to_string(),
                full_name: "Ravi".to_string(),
                role,
                email: None,
            })
            .unwrap();
        state.sessions.start_session(user)
    }

    fn submission() -> serde_json::Value {
        serde_json::json!({
            "category": "Waste & Burning",
            "severity": 4,
            "description": "Burning near the canal",
            "location": { "lat": 28.61, "lng": 77.21 },
        })
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(App::new().app_data($state.clone()).configure(configure)).await
        };
    }

    #[actix_web::test]
    async fn submission_with_session_echoes_stored_report() {
        let state = state().await;
        let token = session_for(&state, "9000000001", UserRole::Volunteer);
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/reports")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(submission())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let stored: ApiStoredReport = test::read_body_json(resp).await;
        assert_eq!(stored.id.len(), 36);
        assert_eq!(stored.report_type, ReportType::GarbageBurning);
        assert_eq!(stored.status, ReportStatus::Pending);
        assert_eq!(stored.location, "POINT(77.21 28.61)");
        assert_eq!(count_reports(state.db.as_ref()).await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn submission_without_session_is_unauthorized() {
        let state = state().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/reports")
            .set_json(submission())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Unauthorized");
        assert_eq!(count_reports(state.db.as_ref()).await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn malformed_body_is_internal_error() {
        let state = state().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/reports")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Internal Server Error");
    }

    #[actix_web::test]
    async fn moderation_checks_role_existence_and_state() {
        let state = state().await;
        let volunteer = session_for(&state, "9000000002", UserRole::Volunteer);
        let official = session_for(&state, "9000000003", UserRole::Official);
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/reports")
            .insert_header(("Authorization", format!("Bearer {volunteer}")))
            .set_json(submission())
            .to_request();
        let stored: ApiStoredReport = test::call_and_read_body_json(&app, req).await;

        let patch = |token: &str, id: &str| {
            test::TestRequest::patch()
                .uri(&format!("/api/reports/{id}/status"))
                .insert_header(("Authorization", format!("Bearer {token}")))
                .set_json(serde_json::json!({ "status": "verified" }))
                .to_request()
        };

        let resp = test::call_service(&app, patch(&volunteer, &stored.id)).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = test::call_service(&app, patch(&official, "missing")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = test::call_service(&app, patch(&official, &stored.id)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated: ApiStoredReport = test::read_body_json(resp).await;
        assert_eq!(updated.status, ReportStatus::Verified);

        let resp = test::call_service(&app, patch(&official, &stored.id)).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn unknown_range_is_bad_request() {
        let state = state().await;
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri("/api/stations?range=1y")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn dashboard_without_feed_is_simulated() {
        let state = state().await;
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri("/api/dashboard?range=24h")
            .to_request();
        let dashboard: DashboardResponse = test::call_and_read_body_json(&app, req).await;
        assert!(!dashboard.is_live);
        assert!(!dashboard.stations.is_empty());
        assert_eq!(dashboard.sensors.len(), DEFAULT_SENSOR_COUNT);
        assert!(!dashboard.reports.is_empty());
        assert!(!dashboard.sources.is_empty());
    }

    #[actix_web::test]
    async fn forecast_has_history_now_and_horizon() {
        let state = state().await;
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri("/api/forecast?current=180&hours=6")
            .to_request();
        let chart: Vec<serde_json::Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(chart.len(), 24 + 1 + 6);
        assert_eq!(chart[24]["time"], "Now");
        assert_eq!(chart[30]["predicted"], 180);
    }

    #[actix_web::test]
    async fn sign_up_then_sign_in_and_out() {
        let state = state().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(serde_json::json!({
                "phone": "9000000004",
                "fullName": "Meera",
                "role": "OFFICIAL",
            }))
            .to_request();
        let session: SessionResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(session.user.role, UserRole::Official);
        assert!(session.user.id.starts_with("user_"));

        let req = test::TestRequest::post()
            .uri("/api/auth/signin")
            .set_json(serde_json::json!({ "phone": "9000000004" }))
            .to_request();
        let again: SessionResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(again.user, session.user);

        let req = test::TestRequest::post()
            .uri("/api/auth/signout")
            .insert_header(("Authorization", format!("Bearer {}", session.token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(state.sessions.session(&session.token).is_none());
    }

    #[actix_web::test]
    async fn reserved_phone_already_exists() {
        let state = state().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(serde_json::json!({
                "phone": "9999999999",
                "fullName": "Taken",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "User already exists with this phone number.");
    }

    #[actix_web::test]
    async fn unknown_phone_cannot_sign_in() {
        let state = state().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/auth/signin")
            .set_json(serde_json::json!({ "phone": "9000000009" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn malformed_json_bodies_answer_json_errors() {
        let state = state().await;
        let official = session_for(&state, "9000000007", UserRole::Official);
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"phone\":")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(!body.error.is_empty());

        let req = test::TestRequest::patch()
            .uri("/api/reports/any/status")
            .insert_header(("Authorization", format!("Bearer {official}")))
            .set_json(serde_json::json!({ "status": "archived" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(!body.error.is_empty());
    }

    #[actix_web::test]
    async fn stale_bearer_with_live_cookie_can_submit() {
        let state = state().await;
        let token = session_for(&state, "9000000008", UserRole::Volunteer);
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/reports")
            .insert_header(("Authorization", "Bearer signed-out-token"))
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .set_json(submission())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
