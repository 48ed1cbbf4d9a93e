use crate::{
    config::Config,
    error::{ErrorBody, TryOnError},
    models::{TryOnRequest, TryOnResult},
    service::TryOnService,
};
use actix_cors::Cors;
use actix_web::{error, middleware, web, App, HttpResponse, HttpServer, ResponseError};

pub async fn try_on(
    service: web::Data<TryOnService>,
    request: web::Json<TryOnRequest>,
) -> Result<web::Json<TryOnResult>, TryOnError> {
    let result = service.try_on(request.into_inner()).await?;
    Ok(web::Json(result))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    for path in ["/try-on/", "/try-on"] {
        cfg.route(path, web::post().to(try_on));
    }
}

/// Body size limit plus `{"detail": ...}` for requests that are not a valid
/// try-on payload. Oversized bodies get 413, malformed ones 400.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let response = HttpResponse::build(err.status_code()).json(ErrorBody {
                detail: err.to_string(),
            });
            error::InternalError::from_response(err, response).into()
        })
}

/// Any origin may call the service.
pub fn cors() -> Cors {
    Cors::permissive()
}

pub async fn run(config: &Config, service: TryOnService) -> std::io::Result<()> {
    let service = web::Data::new(service);
    let limit = config.max_body_bytes;

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(json_config(limit))
            .wrap(cors())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
