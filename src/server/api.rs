//! JSON API handlers.
//!
//! Thin translations between HTTP and the core modules: every handler
//! authenticates (where gated), checks ownership, calls one or two core
//! functions, and serializes the result. Provider failures bubble up through
//! [`Error`] and render via its `IntoResponse` impl - no retries, no
//! reconciliation.

use crate::{
    core::{
        amount, analysis::SpendingAnalysis, geometry, location, pipeline, scene, upload, user,
    },
    entities::{spending_location, upload as upload_entity, user as user_entity},
    errors::{Error, Result},
    extract::pdf,
    server::{AppState, ErrorBody, session},
    storage::statement_path,
};
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::Utc;
use futures::future::join_all;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::server::session::{CurrentUser, SESSION_COOKIE};

/// A user as exposed over the API - everything but the password.
#[derive(Debug, Serialize)]
pub struct UserBody {
    /// User id
    pub id: String,
    /// Email address
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Bank display name
    pub bank: String,
    /// Self-reported balance
    pub current_balance: f64,
    /// Postal address
    pub address: String,
    /// Account creation time
    pub created_at: chrono::DateTime<Utc>,
}

impl From<user_entity::Model> for UserBody {
    fn from(model: user_entity::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            bank: model.bank,
            current_balance: model.current_balance,
            address: model.address,
            created_at: model.created_at,
        }
    }
}

/// One initial spending location captured on the signup form.
#[derive(Debug, Deserialize)]
pub struct SeedLocation {
    /// Location name (blank entries are skipped)
    pub name: String,
    /// Location category
    #[serde(default)]
    pub category: String,
}

/// Signup form payload.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
    /// Bank display name
    pub bank: String,
    /// Starting balance
    pub current_balance: f64,
    /// Postal address
    pub address: String,
    /// Up to five initial spending locations
    #[serde(default)]
    pub locations: Vec<SeedLocation>,
}

/// Session issued at signup/signin.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    /// The authenticated user
    pub user: UserBody,
    /// How many of the requested initial locations were created
    pub seeded_locations: usize,
}

/// Creates an account, seeds its initial locations, and opens a session.
///
/// Location seeding is deliberately non-atomic: the inserts run
/// independently and a partial failure leaves the user with the subset that
/// succeeded, which is logged and reported through `seeded_locations`.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse> {
    let created = user::create_user(
        &state.db,
        user::NewUser {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            bank: request.bank,
            current_balance: request.current_balance,
            address: request.address,
            password: request.password,
        },
    )
    .await?;

    let seeds: Vec<&SeedLocation> = request
        .locations
        .iter()
        .filter(|l| !l.name.trim().is_empty())
        .collect();
    let results = join_all(seeds.iter().map(|seed| {
        location::create_location(&state.db, &created.id, &seed.name, &seed.category)
    }))
    .await;

    let mut seeded_locations = 0;
    for (seed, result) in seeds.iter().zip(&results) {
        match result {
            Ok(_) => seeded_locations += 1,
            Err(e) => warn!("Could not seed location '{}': {e}", seed.name),
        }
    }
    info!(
        "Signed up user {} with {seeded_locations}/{} initial locations",
        created.id,
        seeds.len()
    );

    let session = session::create_session(&state.db, &created.id).await?;
    let mut cookie = Cookie::new(SESSION_COOKIE, session.token.clone());
    cookie.set_path("/");

    Ok((
        jar.add(cookie),
        Json(SessionResponse {
            token: session.token,
            user: created.into(),
            seeded_locations,
        }),
    ))
}

/// Signin form payload.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}

/// Opens a session for an existing account.
pub async fn signin(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<SigninRequest>,
) -> Result<impl IntoResponse> {
    let found = user::get_user_by_email(&state.db, &request.email).await?;
    let found = found
        .filter(|u| u.password == request.password)
        .ok_or_else(|| Error::validation("Invalid email or password"))?;

    let session = session::create_session(&state.db, &found.id).await?;
    let mut cookie = Cookie::new(SESSION_COOKIE, session.token.clone());
    cookie.set_path("/");

    Ok((
        jar.add(cookie),
        Json(SessionResponse {
            token: session.token,
            user: found.into(),
            seeded_locations: 0,
        }),
    ))
}

/// Closes the current session, if any.
pub async fn signout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    request: axum::http::Request<axum::body::Body>,
) -> Result<impl IntoResponse> {
    let (parts, _) = request.into_parts();
    if let Some(token) = session::token_from_parts(&parts) {
        session::delete_session(&state.db, &token).await?;
    }

    Ok((
        jar.remove(Cookie::from(SESSION_COOKIE)),
        Json(serde_json::json!({ "success": true })),
    ))
}

/// The authenticated user's profile.
pub async fn me(CurrentUser(current): CurrentUser) -> Json<UserBody> {
    Json(current.into())
}

/// A spending location joined with its total, as listed on the dashboard.
#[derive(Debug, Serialize)]
pub struct LocationBody {
    /// Location id
    pub id: String,
    /// Merchant/place name
    pub name: String,
    /// Category
    pub category: String,
    /// Creation time
    pub created_at: chrono::DateTime<Utc>,
    /// Aggregate spend, recomputed on every request
    pub total_spent: f64,
}

/// Lists the user's locations with their totals (one batch query).
pub async fn locations_list(
    State(state): State<Arc<AppState>>,
    CurrentUser(current): CurrentUser,
) -> Result<Json<Vec<LocationBody>>> {
    let locations = location::get_locations_by_user_id(&state.db, &current.id).await?;
    let ids: Vec<String> = locations.iter().map(|l| l.id.clone()).collect();
    let totals = amount::get_all_totals_by_location_ids(&state.db, &ids).await?;

    let bodies = locations
        .into_iter()
        .map(|l| {
            let total_spent = totals.get(&l.id).copied().unwrap_or(0.0);
            LocationBody {
                id: l.id,
                name: l.name,
                category: l.category,
                created_at: l.created_at,
                total_spent,
            }
        })
        .collect();

    Ok(Json(bodies))
}

/// New-location payload.
#[derive(Debug, Deserialize)]
pub struct CreateLocationRequest {
    /// Location name
    pub name: String,
    /// Location category
    #[serde(default)]
    pub category: String,
}

/// Adds a location for the authenticated user.
pub async fn locations_create(
    State(state): State<Arc<AppState>>,
    CurrentUser(current): CurrentUser,
    Json(request): Json<CreateLocationRequest>,
) -> Result<Json<spending_location::Model>> {
    let created =
        location::create_location(&state.db, &current.id, &request.name, &request.category)
            .await?;
    Ok(Json(created))
}

/// Location-update payload.
#[derive(Debug, Deserialize)]
pub struct UpdateLocationRequest {
    /// New name, if changing
    pub name: Option<String>,
    /// New category, if changing
    pub category: Option<String>,
}

/// Edits a location the user owns.
pub async fn locations_update(
    State(state): State<Arc<AppState>>,
    Path(location_id): Path<String>,
    CurrentUser(current): CurrentUser,
    Json(request): Json<UpdateLocationRequest>,
) -> Result<Json<spending_location::Model>> {
    owned_location(&state.db, &current, &location_id).await?;
    let updated = location::update_location(
        &state.db,
        &location_id,
        location::LocationUpdate {
            name: request.name,
            category: request.category,
        },
    )
    .await?;
    Ok(Json(updated))
}

/// Lists the amounts recorded against one of the user's locations.
pub async fn amounts_list(
    State(state): State<Arc<AppState>>,
    Path(location_id): Path<String>,
    CurrentUser(current): CurrentUser,
) -> Result<Json<Vec<crate::entities::spending_amount::Model>>> {
    owned_location(&state.db, &current, &location_id).await?;
    let amounts = amount::get_amounts_by_location_id(&state.db, &location_id).await?;
    Ok(Json(amounts))
}

/// New-amount payload.
#[derive(Debug, Deserialize)]
pub struct CreateAmountRequest {
    /// Amount in dollars
    pub amount: f64,
    /// Transaction date, defaults to today
    pub transaction_date: Option<String>,
    /// Optional description
    pub description: Option<String>,
}

/// Records an amount against one of the user's locations.
pub async fn amounts_create(
    State(state): State<Arc<AppState>>,
    Path(location_id): Path<String>,
    CurrentUser(current): CurrentUser,
    Json(request): Json<CreateAmountRequest>,
) -> Result<Json<crate::entities::spending_amount::Model>> {
    owned_location(&state.db, &current, &location_id).await?;
    let created = amount::create_amount(
        &state.db,
        &location_id,
        request.amount,
        request.transaction_date,
        request.description,
    )
    .await?;
    Ok(Json(created))
}

/// Deletes a single amount the user owns.
pub async fn amounts_delete(
    State(state): State<Arc<AppState>>,
    Path(amount_id): Path<String>,
    CurrentUser(current): CurrentUser,
) -> Result<Json<serde_json::Value>> {
    let Some(row) = amount::get_amount_by_id(&state.db, &amount_id).await? else {
        return Err(Error::NotFound {
            what: "Spending amount".to_string(),
        });
    };
    owned_location(&state.db, &current, &row.spending_location_id).await?;

    amount::delete_amount(&state.db, &amount_id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// Lists the user's uploads, newest first.
pub async fn uploads_list(
    State(state): State<Arc<AppState>>,
    CurrentUser(current): CurrentUser,
) -> Result<Json<Vec<upload_entity::Model>>> {
    let uploads = upload::get_uploads_by_user_id(&state.db, &current.id).await?;
    Ok(Json(uploads))
}

/// Result of one upload attempt, as returned to the client.
#[derive(Debug, Serialize)]
pub struct UploadOutcomeBody {
    /// `"completed"` or `"failed"`
    pub status: &'static str,
    /// The upload row, when one was created
    pub upload: Option<upload_entity::Model>,
    /// Failure message, when the attempt failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Extracted statement text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    /// Parsed analysis, for the AI plan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<SpendingAnalysis>,
}

/// Accepts a statement (multipart field `pdf`, optional `plan` of `text` or
/// `analyze`) and runs the ingestion pipeline to a terminal phase.
pub async fn uploads_create(
    State(state): State<Arc<AppState>>,
    CurrentUser(current): CurrentUser,
    mut multipart: Multipart,
) -> Result<Json<UploadOutcomeBody>> {
    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut plan = pipeline::ExtractionPlan::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::validation(e.to_string()))?
    {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("pdf") => {
                let file_name = field.file_name().unwrap_or("statement.pdf").to_string();
                let content_type = field.content_type().map(ToString::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| Error::validation(e.to_string()))?;
                file = Some((file_name, content_type, bytes.to_vec()));
            }
            Some("plan") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| Error::validation(e.to_string()))?;
                plan = match value.as_str() {
                    "analyze" | "ai" => pipeline::ExtractionPlan::AiAnalysis,
                    _ => pipeline::ExtractionPlan::LocalText,
                };
            }
            _ => {}
        }
    }

    let Some((file_name, content_type, bytes)) = file else {
        return Err(Error::validation("No PDF file uploaded"));
    };

    let outcome = pipeline::run_upload(
        &state.db,
        &state.store,
        state.analyzer.as_ref(),
        &current.id,
        &file_name,
        content_type.as_deref(),
        bytes,
        plan,
    )
    .await?;

    Ok(Json(UploadOutcomeBody {
        status: match outcome.phase {
            pipeline::UploadPhase::Completed => "completed",
            _ => "failed",
        },
        upload: outcome.upload,
        message: outcome.message,
        extracted_text: outcome.extracted_text,
        analysis: outcome.analysis,
    }))
}

/// Signed preview URL for a stored statement.
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    /// Time-limited read URL issued by the storage provider
    pub signed_url: String,
    /// Lifetime the URL was requested with, in seconds
    pub expires_in: u64,
}

/// Issues a time-limited preview URL for one of the user's uploads.
pub async fn upload_preview(
    State(state): State<Arc<AppState>>,
    Path(upload_id): Path<String>,
    CurrentUser(current): CurrentUser,
) -> Result<Json<PreviewResponse>> {
    let row = upload::get_upload_by_id(&state.db, &upload_id)
        .await?
        .filter(|u| u.user_id == current.id)
        .ok_or_else(|| Error::NotFound {
            what: "Upload".to_string(),
        })?;

    let location = statement_path(&current.id, &row.id, &row.file_name);
    let url = state
        .store
        .signed_url(&location, state.signed_url_expiry)
        .await?;

    Ok(Json(PreviewResponse {
        signed_url: url.to_string(),
        expires_in: state.signed_url_expiry.as_secs(),
    }))
}

/// The user's neighborhood scene: locations -> totals -> buildings -> scene.
pub async fn neighborhood(
    State(state): State<Arc<AppState>>,
    CurrentUser(current): CurrentUser,
) -> Result<Json<scene::SceneDescription>> {
    let locations = location::get_locations_by_user_id(&state.db, &current.id).await?;
    let ids: Vec<String> = locations.iter().map(|l| l.id.clone()).collect();
    let totals = amount::get_all_totals_by_location_ids(&state.db, &ids).await?;

    let with_totals: Vec<geometry::LocationWithTotal> = locations
        .into_iter()
        .map(|l| geometry::LocationWithTotal {
            total_spent: totals.get(&l.id).copied().unwrap_or(0.0),
            id: l.id,
            name: l.name,
            category: l.category,
        })
        .collect();

    let buildings = geometry::buildings_from_totals(
        &with_totals,
        geometry::Layout::Row,
        geometry::ColorMode::Category,
        &state.palette,
    );

    Ok(Json(scene::build_scene(buildings)))
}

/// Parse-endpoint success envelope.
#[derive(Debug, Serialize)]
pub struct ParsePdfResponse {
    /// Always true on success
    pub success: bool,
    /// The parsed document
    pub data: ParsePdfData,
}

/// Parsed-document payload mirroring the extraction library's output.
#[derive(Debug, Serialize)]
pub struct ParsePdfData {
    /// Number of pages
    pub numpages: usize,
    /// Number of rendered pages (same as `numpages`)
    pub numrender: usize,
    /// Raw document info
    pub info: pdf::PdfInfo,
    /// Info with display defaults
    pub metadata: pdf::PdfMetadata,
    /// Response format version
    pub version: &'static str,
    /// Extracted text
    pub text: String,
}

/// `POST /api/parse-pdf` - extracts text from a PDF sent as multipart field
/// `pdf`. Not gated; it persists nothing.
pub async fn parse_pdf(mut multipart: Multipart) -> Response {
    let mut bytes: Option<Vec<u8>> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let is_pdf_field = field.name() == Some("pdf");
                if is_pdf_field {
                    match field.bytes().await {
                        Ok(data) => bytes = Some(data.to_vec()),
                        Err(e) => {
                            return (
                                StatusCode::BAD_REQUEST,
                                Json(ErrorBody::new(e.to_string())),
                            )
                                .into_response();
                        }
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                return (StatusCode::BAD_REQUEST, Json(ErrorBody::new(e.to_string())))
                    .into_response();
            }
        }
    }

    let Some(bytes) = bytes else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new("No PDF file uploaded")),
        )
            .into_response();
    };

    match pdf::parse_pdf(&bytes) {
        Ok(parsed) => Json(ParsePdfResponse {
            success: true,
            data: ParsePdfData {
                numpages: parsed.numpages,
                numrender: parsed.numpages,
                info: parsed.info,
                metadata: parsed.metadata,
                version: "1.0",
                text: parsed.text,
            },
        })
        .into_response(),
        Err(e) => {
            warn!("PDF parse failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Failed to parse PDF".to_string(),
                    details: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}

/// Loads a location and checks it belongs to the user.
async fn owned_location(
    db: &DatabaseConnection,
    current: &user_entity::Model,
    location_id: &str,
) -> Result<spending_location::Model> {
    location::get_location_by_id(db, location_id)
        .await?
        .filter(|l| l.user_id == current.id)
        .ok_or_else(|| Error::NotFound {
            what: "Spending location".to_string(),
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use crate::{
        config::categories::CategoryPalette,
        server::{AppState, router},
        storage::StatementStore,
        test_utils::setup_test_db,
    };
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use std::{sync::Arc, time::Duration};
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let db = setup_test_db().await.unwrap();
        let state = Arc::new(AppState {
            db,
            store: StatementStore::memory(),
            analyzer: None,
            palette: CategoryPalette::default(),
            signed_url_expiry: Duration::from_secs(3600),
        });
        router(state)
    }

    async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_home_page_is_public() {
        let app = test_app().await;
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_gated_pages_redirect_anonymous_to_entry() {
        for path in ["/dashboard", "/neighborhood", "/upload"] {
            let app = test_app().await;
            let response = app
                .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "path {path}");
            assert_eq!(response.headers()[header::LOCATION], "/");
        }
    }

    #[tokio::test]
    async fn test_signup_then_me_round_trip() {
        let app = test_app().await;

        let payload = serde_json::json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "password": "secret",
            "bank": "Test Bank",
            "current_balance": 10_000.0,
            "address": "1 Analytical Way",
            "locations": [
                {"name": "Corner Grocery", "category": "Food"},
                {"name": "", "category": ""}
            ]
        });

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/signup")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["user"]["email"], "ada@example.com");
        // Blank seed rows are skipped
        assert_eq!(body["seeded_locations"], 1);
        // The password never leaves the server
        assert!(body["user"].get("password").is_none());
        let token = body["token"].as_str().unwrap().to_string();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/me")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["first_name"], "Ada");
    }

    #[tokio::test]
    async fn test_signin_rejects_wrong_password() {
        let app = test_app().await;

        let signup = serde_json::json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "password": "secret",
            "bank": "Test Bank",
            "current_balance": 0.0,
            "address": "1 Analytical Way"
        });
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/signup")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(signup.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let signin = serde_json::json!({"email": "ada@example.com", "password": "wrong"});
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/signin")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(signin.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_parse_pdf_without_field_is_bad_request() {
        let app = test_app().await;

        let boundary = "X-SPENDSCAPE-BOUNDARY";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nvalue\r\n--{boundary}--\r\n"
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/parse-pdf")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "No PDF file uploaded");
    }

    #[tokio::test]
    async fn test_parse_pdf_with_garbage_is_server_error() {
        let app = test_app().await;

        let boundary = "X-SPENDSCAPE-BOUNDARY";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"pdf\"; filename=\"a.pdf\"\r\nContent-Type: application/pdf\r\n\r\nnot a pdf\r\n--{boundary}--\r\n"
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/parse-pdf")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to parse PDF");
        assert!(body["details"].is_string());
    }

    #[tokio::test]
    async fn test_api_routes_are_gated() {
        for (method, path) in [
            ("GET", "/api/me"),
            ("GET", "/api/locations"),
            ("GET", "/api/uploads"),
            ("GET", "/api/neighborhood"),
        ] {
            let app = test_app().await;
            let response = app
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri(path)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(
                response.status(),
                StatusCode::SEE_OTHER,
                "{method} {path} should redirect anonymous callers"
            );
        }
    }
}
