use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use variant_i18n::{
    Config, Data, I18n, Options, SharedI18n, TranslationEntries, load_languages_from_dir,
};

#[derive(Parser, Debug)]
#[command(name = "variant-i18n-web", version, about = "HTTP translation service")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: String,
    /// Directory with one translation file per language
    #[arg(long, default_value = "translations")]
    translations: PathBuf,
    /// Language used when a language or key is missing
    #[arg(long, default_value = "en")]
    fallback: String,
}

#[derive(Serialize, Deserialize)]
pub struct TranslateRequest {
    pub lang: String,
    pub key: String,
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translation: String,
}

#[derive(Serialize, Deserialize)]
pub struct LanguagesResponse {
    pub languages: Vec<String>,
    pub fallback: String,
}

#[derive(Serialize, Deserialize)]
pub struct LanguageResponse {
    pub language: String,
    pub available: bool,
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Clone)]
pub struct AppState {
    pub i18n: SharedI18n,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut i18n = I18n::with_config(Config::default().with_fallback_language(&args.fallback));
    let mut languages: Vec<_> = load_languages_from_dir(&args.translations)
        .map_err(|e| format!("Failed to load translations: {}", e))?
        .into_iter()
        .collect();
    languages.sort_by(|a, b| a.0.cmp(&b.0));
    for (language, entries) in languages {
        info!(language = %language, entries = entries.len(), "Loaded language");
        i18n.add_language(&language, entries);
    }

    let state = AppState {
        i18n: SharedI18n::new(i18n),
    };

    info!("Starting variant-i18n web server");

    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!("Server running at http://{}", args.bind);

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/translate", get(translate_query).post(translate_json))
        .route("/api/languages", get(list_languages))
        .route(
            "/api/languages/{lang}",
            get(get_language).put(put_language),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `GET /api/translate?lang=es&key=emails&count=3&Name=Ada`
///
/// Query parameters follow the template argument convention: `lang`,
/// `key`, `count` and `gender` are reserved, the rest is data.
async fn translate_query(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<TranslateResponse> {
    Json(TranslateResponse {
        translation: state.i18n.translate_pairs(params),
    })
}

async fn translate_json(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Json<TranslateResponse> {
    let options = Options {
        count: request.count,
        gender: request.gender,
        data: request.data.map(Data::from),
    };
    let translation = state.i18n.translate(&request.lang, &request.key, &options);
    Json(TranslateResponse { translation })
}

async fn list_languages(State(state): State<AppState>) -> Json<LanguagesResponse> {
    let i18n = state.i18n.read();
    Json(LanguagesResponse {
        languages: i18n.languages().into_iter().map(str::to_owned).collect(),
        fallback: i18n.fallback_language().to_owned(),
    })
}

async fn get_language(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> Result<Json<LanguageResponse>, (StatusCode, Json<ErrorResponse>)> {
    if !state.i18n.has_language(&lang) {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Language '{}' is not available", lang),
            }),
        ));
    }
    let (_, warnings) = state.i18n.read().check_language_consistency(&lang);
    Ok(Json(LanguageResponse {
        language: lang,
        available: true,
        warnings,
    }))
}

/// Register (or replace) a language from a JSON list of entries.
async fn put_language(
    State(state): State<AppState>,
    Path(lang): Path<String>,
    Json(entries): Json<TranslationEntries>,
) -> (StatusCode, Json<LanguageResponse>) {
    info!(language = %lang, entries = entries.len(), "Replacing language");
    let warnings = state.i18n.add_language(&lang, entries);
    (
        StatusCode::OK,
        Json(LanguageResponse {
            language: lang,
            available: true,
            warnings,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header};
    use tower::ServiceExt;
    use variant_i18n::{TranslationEntry, Variant, VerbosityLevel};

    fn test_state() -> AppState {
        let mut i18n = I18n::with_config(Config::default().with_verbosity(VerbosityLevel::Silent));
        i18n.add_language(
            "en",
            vec![
                TranslationEntry::new("emails")
                    .with_default("You have emails")
                    .with_variant(Variant::One, "You have one email")
                    .with_variant(Variant::Many, "{{.Name}}, you have {{.Qty}} emails"),
            ],
        );
        AppState {
            i18n: SharedI18n::new(i18n),
        }
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_translate_from_query() {
        let app = build_app(test_state());
        let request = Request::get("/api/translate?lang=fr&key=emails&count=4&Name=Ada&Qty=4")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["translation"], "Ada, you have 4 emails");
    }

    #[tokio::test]
    async fn test_translate_from_json() {
        let app = build_app(test_state());
        let request = Request::post("/api/translate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"lang": "en", "key": "emails", "count": 1}"#))
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["translation"], "You have one email");
    }

    #[tokio::test]
    async fn test_missing_key_is_empty_translation() {
        let app = build_app(test_state());
        let request = Request::get("/api/translate?lang=en&key=nope")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["translation"], "");
    }

    #[tokio::test]
    async fn test_language_lookup() {
        let state = test_state();
        let (status, body) = send(
            build_app(state.clone()),
            Request::get("/api/languages/en").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["available"], true);

        let (status, _) = send(
            build_app(state),
            Request::get("/api/languages/xx").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_put_language_then_translate() {
        let state = test_state();
        let request = Request::put("/api/languages/es")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"[{"Key": "emails", "Many": "Tienes {{.Qty}} correos"}, {"Key": "extra"}]"#,
            ))
            .unwrap();
        let (status, body) = send(build_app(state.clone()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["warnings"].as_array().map(Vec::len), Some(1));

        let (_, body) = send(
            build_app(state.clone()),
            Request::get("/api/translate?lang=es&key=emails&count=2&Qty=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(body["translation"], "Tienes 2 correos");

        let (_, body) = send(
            build_app(state),
            Request::get("/api/languages").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(body["languages"], serde_json::json!(["en", "es"]));
        assert_eq!(body["fallback"], "en");
    }
}
