use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use ovation_core::health::{database_ready, healthz};
use ovation_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    attendees::{check_in_attendee, get_attendee, list_attendees, register_attendee},
    award_events::{
        create_award_event, delete_award_event, get_award_event, list_award_events,
        update_award_event,
    },
    categories::{
        create_award_category, create_event_category, delete_category, list_award_categories,
        list_event_categories, update_category,
    },
    events::{create_event, delete_event, get_event, list_events},
    invites::{issue_invite_code, list_invite_codes},
    leaderboards::{get_award_event_leaderboards, get_event_leaderboards, get_leaderboard},
    nominees::{create_nominee, delete_nominee, list_nominees},
    otp::{request_otp, verify_otp},
    recipients::{import_recipients, list_recipients, redeem_recipient},
    votes::submit_vote,
};
use crate::state::AppState;

async fn readyz(State(state): State<AppState>) -> StatusCode {
    database_ready(&state.db).await
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Events
        .route("/events", post(create_event).get(list_events))
        .route("/events/{event_id}", get(get_event).delete(delete_event))
        .route(
            "/events/{event_id}/attendees",
            post(register_attendee).get(list_attendees),
        )
        .route(
            "/events/{event_id}/invite-codes",
            post(issue_invite_code).get(list_invite_codes),
        )
        .route(
            "/events/{event_id}/categories",
            post(create_event_category).get(list_event_categories),
        )
        .route("/events/{event_id}/leaderboards", get(get_event_leaderboards))
        // Attendees
        .route("/attendees/{attendee_id}", get(get_attendee))
        .route("/attendees/{attendee_id}/check-in", post(check_in_attendee))
        // Award events
        .route(
            "/award-events",
            post(create_award_event).get(list_award_events),
        )
        .route(
            "/award-events/{award_event_id}",
            get(get_award_event)
                .patch(update_award_event)
                .delete(delete_award_event),
        )
        .route(
            "/award-events/{award_event_id}/categories",
            post(create_award_category).get(list_award_categories),
        )
        .route(
            "/award-events/{award_event_id}/nominees",
            post(create_nominee).get(list_nominees),
        )
        .route(
            "/award-events/{award_event_id}/leaderboards",
            get(get_award_event_leaderboards),
        )
        .route(
            "/award-events/{award_event_id}/recipients",
            get(list_recipients),
        )
        .route(
            "/award-events/{award_event_id}/recipients/import",
            post(import_recipients),
        )
        // Categories
        .route(
            "/categories/{category_id}",
            axum::routing::patch(update_category).delete(delete_category),
        )
        .route("/categories/{category_id}/votes", post(submit_vote))
        .route("/categories/{category_id}/leaderboard", get(get_leaderboard))
        // Nominees
        .route("/nominees/{nominee_id}", axum::routing::delete(delete_nominee))
        // Recipients
        .route("/recipients/redeem", post(redeem_recipient))
        // OTP
        .route("/otp/request", post(request_otp))
        .route("/otp/verify", post(verify_otp))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
