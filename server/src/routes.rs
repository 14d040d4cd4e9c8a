use std::{io, path::PathBuf};

use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::web;
use log::{debug, warn};
use machine_learning::{INPUT_SIZE, Mlp, Model, ParameterStore};
use ndarray::ArrayView2;

use crate::{
    error::ApiError,
    schema::{BatchRequest, BatchResponse, PredictRequest, PredictResponse},
};

/// The message a `/predict` caller gets back for an image of the wrong size.
pub const WRONG_PIXEL_COUNT: &str = "Input must have 784 pixels!";

/// Largest JSON body accepted, enough for a few hundred images per batch.
const JSON_LIMIT: usize = 4 * 1024 * 1024;

/// Where the landing page and its assets live.
#[derive(Debug, Clone)]
struct StaticDir(PathBuf);

/// Registers every route of the service.
///
/// The `ParameterStore` itself must be registered as `web::Data` by the caller, so it
/// is loaded once and shared by every worker.
///
/// # Arguments
/// * `static_dir` - The directory served under `/static`, holding `index.html`.
pub fn configure(static_dir: PathBuf) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let json = web::JsonConfig::default()
            .limit(JSON_LIMIT)
            .error_handler(|err, _req| {
                warn!("rejected a malformed body: {err}");
                ApiError::BadRequest(err.to_string()).into()
            });

        cfg.app_data(json)
            .app_data(web::Data::new(StaticDir(static_dir.clone())))
            .route("/", web::get().to(index))
            .route("/predict", web::post().to(predict))
            .route("/predict/batch", web::post().to(predict_batch))
            .service(Files::new("/static", static_dir));
    }
}

/// Any origin, method and header, with credentials.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}

async fn index(dir: web::Data<StaticDir>) -> Result<NamedFile, ApiError> {
    let path = dir.0.join("index.html");

    NamedFile::open_async(&path).await.map_err(|e| {
        warn!("can't serve {}: {e}", path.display());
        match e.kind() {
            io::ErrorKind::NotFound => ApiError::NotFound("No landing page to serve!".to_string()),
            _ => ApiError::Internal(e.to_string()),
        }
    })
}

async fn predict(
    params: web::Data<ParameterStore>,
    body: web::Json<PredictRequest>,
) -> Result<web::Json<PredictResponse>, ApiError> {
    let PredictRequest { pixels } = body.into_inner();

    if pixels.len() != INPUT_SIZE {
        warn!("rejected an image with {} pixels", pixels.len());
        return Err(ApiError::BadRequest(WRONG_PIXEL_COUNT.to_string()));
    }

    let prediction = Mlp::new(&params).predict_one(&pixels)?;
    debug!("predicted {prediction}");

    Ok(web::Json(PredictResponse { prediction }))
}

async fn predict_batch(
    params: web::Data<ParameterStore>,
    body: web::Json<BatchRequest>,
) -> Result<web::Json<BatchResponse>, ApiError> {
    let BatchRequest { images } = body.into_inner();

    if images.is_empty() {
        warn!("rejected an empty batch");
        return Err(ApiError::BadRequest(
            "At least one image is required!".to_string(),
        ));
    }

    if let Some((i, image)) = images
        .iter()
        .enumerate()
        .find(|(_, image)| image.len() != INPUT_SIZE)
    {
        warn!("rejected a batch, image {i} has {} pixels", image.len());
        return Err(ApiError::BadRequest(format!(
            "Image {i} has {} pixels, it must have {INPUT_SIZE}!",
            image.len()
        )));
    }

    let rows = images.len();
    let pixels: Vec<f32> = images.into_iter().flatten().collect();
    let x = ArrayView2::from_shape((rows, INPUT_SIZE), &pixels)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let predictions = Mlp::new(&params).predict(x)?;
    debug!("predicted a batch of {rows}: {predictions:?}");

    Ok(web::Json(BatchResponse { predictions }))
}
