use std::convert::Infallible;
use std::sync::Arc;

use hangman_types::{
    ErrorResponse, GuessRequest, HangmanError, LeaderboardQuery, PlayerNameRequest,
    RoundRequest, SessionId, SubmitCustomWordRequest,
};
use warp::Filter;
use warp::http::StatusCode;

use crate::session_manager::SessionManager;

pub mod config;
pub mod countdown;
pub mod events;
pub mod score_sink;
pub mod session_manager;

type JsonReply = warp::reply::WithStatus<warp::reply::Json>;

pub fn create_routes(
    session_manager: Arc<SessionManager>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let manager_filter = warp::any().map({
        let session_manager = session_manager.clone();
        move || session_manager.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let categories = warp::path("categories")
        .and(warp::path::end())
        .and(warp::get())
        .and(manager_filter.clone())
        .map(|manager: Arc<SessionManager>| {
            warp::reply::with_status(warp::reply::json(&manager.categories()), StatusCode::OK)
        });

    let create_session = warp::path("sessions")
        .and(warp::path::end())
        .and(warp::post())
        .and(manager_filter.clone())
        .and_then(handle_create_session);

    let get_session = warp::path!("sessions" / SessionId)
        .and(warp::get())
        .and(manager_filter.clone())
        .and_then(handle_get_session);

    let delete_session = warp::path!("sessions" / SessionId)
        .and(warp::delete())
        .and(manager_filter.clone())
        .and_then(handle_delete_session);

    let set_player = warp::path!("sessions" / SessionId / "player")
        .and(warp::put())
        .and(warp::body::json())
        .and(manager_filter.clone())
        .and_then(handle_set_player);

    let start_round = warp::path!("sessions" / SessionId / "rounds")
        .and(warp::post())
        .and(warp::body::json())
        .and(manager_filter.clone())
        .and_then(handle_start_round);

    let guess = warp::path!("sessions" / SessionId / "guesses")
        .and(warp::post())
        .and(warp::body::json())
        .and(manager_filter.clone())
        .and_then(handle_guess);

    let list_custom_words = warp::path("custom-words")
        .and(warp::path::end())
        .and(warp::get())
        .and(manager_filter.clone())
        .and_then(handle_list_custom_words);

    let submit_custom_word = warp::path("custom-words")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(manager_filter.clone())
        .and_then(handle_submit_custom_word);

    let leaderboard = warp::path("leaderboard")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<LeaderboardQuery>())
        .and(manager_filter.clone())
        .and_then(handle_leaderboard_request);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE"]);

    health
        .or(categories)
        .or(create_session)
        .or(get_session)
        .or(delete_session)
        .or(set_player)
        .or(start_round)
        .or(guess)
        .or(list_custom_words)
        .or(submit_custom_word)
        .or(leaderboard)
        .recover(handle_rejection)
        .with(cors)
        .with(warp::log("hangman"))
}

fn error_reply(err: HangmanError) -> JsonReply {
    let status = match &err {
        HangmanError::Validation { .. } => StatusCode::BAD_REQUEST,
        HangmanError::NotFound { .. } => StatusCode::NOT_FOUND,
        HangmanError::Persistence { .. } => {
            tracing::error!("Request failed: {}", err);
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    warp::reply::with_status(
        warp::reply::json(&ErrorResponse {
            error: err.to_string(),
        }),
        status,
    )
}

/// Turn warp's own rejections into the same JSON error body the handlers use
async fn handle_rejection(err: warp::Rejection) -> Result<JsonReply, Infallible> {
    let (status, message) = if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>()
    {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if let Some(e) = err.find::<warp::reject::UnsupportedMediaType>() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, e.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else {
        tracing::error!("Unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorResponse { error: message }),
        status,
    ))
}

fn respond<T: serde::Serialize>(result: Result<T, HangmanError>, status: StatusCode) -> JsonReply {
    match result {
        Ok(body) => warp::reply::with_status(warp::reply::json(&body), status),
        Err(err) => error_reply(err),
    }
}

async fn handle_create_session(manager: Arc<SessionManager>) -> Result<JsonReply, Infallible> {
    let snapshot = manager.create_session().await;
    Ok(respond(Ok(snapshot), StatusCode::CREATED))
}

async fn handle_get_session(
    session_id: SessionId,
    manager: Arc<SessionManager>,
) -> Result<JsonReply, Infallible> {
    Ok(respond(manager.snapshot(session_id).await, StatusCode::OK))
}

async fn handle_delete_session(
    session_id: SessionId,
    manager: Arc<SessionManager>,
) -> Result<JsonReply, Infallible> {
    let result = manager
        .remove_session(session_id)
        .await
        .map(|()| serde_json::json!({ "removed": session_id }));
    Ok(respond(result, StatusCode::OK))
}

async fn handle_set_player(
    session_id: SessionId,
    request: PlayerNameRequest,
    manager: Arc<SessionManager>,
) -> Result<JsonReply, Infallible> {
    Ok(respond(
        manager.set_player_name(session_id, &request.name).await,
        StatusCode::OK,
    ))
}

async fn handle_start_round(
    session_id: SessionId,
    request: RoundRequest,
    manager: Arc<SessionManager>,
) -> Result<JsonReply, Infallible> {
    Ok(respond(
        manager.start_round(session_id, request).await,
        StatusCode::CREATED,
    ))
}

async fn handle_guess(
    session_id: SessionId,
    request: GuessRequest,
    manager: Arc<SessionManager>,
) -> Result<JsonReply, Infallible> {
    Ok(respond(
        manager.guess(session_id, &request.letter).await,
        StatusCode::OK,
    ))
}

async fn handle_list_custom_words(manager: Arc<SessionManager>) -> Result<JsonReply, Infallible> {
    Ok(respond(manager.list_custom_words().await, StatusCode::OK))
}

async fn handle_submit_custom_word(
    request: SubmitCustomWordRequest,
    manager: Arc<SessionManager>,
) -> Result<JsonReply, Infallible> {
    Ok(respond(
        manager.submit_custom_word(request).await,
        StatusCode::CREATED,
    ))
}

async fn handle_leaderboard_request(
    query: LeaderboardQuery,
    manager: Arc<SessionManager>,
) -> Result<JsonReply, Infallible> {
    let scores = manager.leaderboard(query).await;
    Ok(respond(Ok(scores), StatusCode::OK))
}
