use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    routing::{get, post},
};
use chrono::{Datelike, NaiveDate, Utc};
use tracing::debug;

use fitquest_core::{
    DayPlanRequest, ExerciseTemplate, PlanRequest, PlannedDay, WeeklyPlan, generate_plan,
    start_of_week,
};

use crate::{AppError, AppResult, AppState};

pub fn api() -> Router<AppState> {
    Router::new()
        // Plans
        .route("/api/plans/weekly", post(weekly_plan))
        .route("/api/plans/today", post(day_plan))
        // Templates
        .route("/api/templates", get(list_templates))
        .route("/api/templates/{name}", get(get_template))
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

// ============================================================================
// Plan handlers
// ============================================================================

async fn weekly_plan(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<PlanRequest>,
) -> AppResult<Json<WeeklyPlan>> {
    let week_start = start_of_week(request.week_start.unwrap_or_else(today));
    let plan = generate_plan(&request.profile, state.catalog.templates(), week_start);
    debug!(
        %week_start,
        regeneration = request.profile.plan_regeneration_count,
        workout_days = plan.workout_day_count,
        "generated weekly plan"
    );
    Ok(Json(plan))
}

async fn day_plan(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<DayPlanRequest>,
) -> AppResult<Json<PlannedDay>> {
    let date = request.date.unwrap_or_else(today);
    let plan = generate_plan(
        &request.profile,
        state.catalog.templates(),
        start_of_week(date),
    );
    plan.day(date.weekday())
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::Internal(format!("plan has no entry for {date}")))
}

// ============================================================================
// Template handlers
// ============================================================================

async fn list_templates(AxumState(state): AxumState<AppState>) -> Json<Vec<ExerciseTemplate>> {
    Json(state.catalog.templates().to_vec())
}

async fn get_template(
    AxumState(state): AxumState<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<ExerciseTemplate>> {
    state
        .catalog
        .find(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("template '{name}'")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use fitquest_core::{Catalog, FitnessLevel, PlayerProfile};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        api().with_state(AppState {
            catalog: Arc::new(Catalog::builtin()),
        })
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn weekly_plan_normalizes_week_start() {
        let profile = PlayerProfile {
            weekly_workout_goal: 4,
            fitness_level: FitnessLevel::Intermediate,
            ..Default::default()
        };
        let (status, body) = send(post_json(
            "/api/plans/weekly",
            json!({ "profile": profile, "week_start": "2024-06-05" }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["week_start"], "2024-06-02");
        assert_eq!(body["workout_day_count"], 4);
        let days = body["days"].as_array().unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(
            days.iter().filter(|d| d["is_rest_day"] == false).count(),
            4
        );
    }

    #[tokio::test]
    async fn weekly_plan_clamps_goal_instead_of_rejecting() {
        let (status, body) = send(post_json(
            "/api/plans/weekly",
            json!({ "profile": { "weekly_workout_goal": 42 }, "week_start": "2024-06-02" }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["workout_day_count"], 7);
    }

    #[tokio::test]
    async fn weekly_plan_is_stable_across_requests() {
        let request = json!({ "profile": { "weekly_workout_goal": 5 }, "week_start": "2024-06-02" });
        let (_, first) = send(post_json("/api/plans/weekly", request.clone())).await;
        let (_, second) = send(post_json("/api/plans/weekly", request)).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn day_plan_returns_requested_weekday() {
        let (status, body) = send(post_json(
            "/api/plans/today",
            json!({ "profile": { "weekly_workout_goal": 3 }, "date": "2024-06-03" }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["label"], "MON");
        assert_eq!(body["day_of_week"], 2);
    }

    #[tokio::test]
    async fn rejects_malformed_profile() {
        let (status, _) = send(post_json(
            "/api/plans/weekly",
            json!({ "profile": { "workout_style": "yoga" } }),
        ))
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn lists_and_finds_templates() {
        let (status, body) = send(
            Request::get("/api/templates")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), Catalog::builtin().len());

        let (status, body) = send(
            Request::get("/api/templates/Stair%20Climber")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["workout_type"], "cardio");
        assert_eq!(body["required_equipment"], json!(["cardio_machines"]));
    }

    #[tokio::test]
    async fn unknown_template_is_not_found() {
        let (status, body) = send(
            Request::get("/api/templates/Unicycle")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not found: template 'Unicycle'");
    }
}
