use colored::Colorize;
use env_logger::Builder;
use log::{info, warn, Level, LevelFilter};
use std::io::Write;
use std::future::{ready, Ready};
use std::time::Instant;
use actix_web::{
   dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
   Error,
};
use futures_util::future::LocalBoxFuture;

/// Logs every request with its status and how long it took.
pub struct LoggerMiddleware;

impl<S, B> Transform<S, ServiceRequest> for LoggerMiddleware
where
   S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
   S::Future: 'static,
   B: 'static,
{
   type Response = ServiceResponse<B>;
   type Error = Error;
   type InitError = ();
   type Transform = LoggerMiddlewareService<S>;
   type Future = Ready<Result<Self::Transform, Self::InitError>>;

   fn new_transform(&self, service: S) -> Self::Future {
      ready(Ok(LoggerMiddlewareService { service }))
   }
}

pub struct LoggerMiddlewareService<S> {
   service: S
}

impl<S, B> Service<ServiceRequest> for LoggerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
   type Response = ServiceResponse<B>;
   type Error = Error;
   type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

   forward_ready!(service);

   fn call(&self, req: ServiceRequest) -> Self::Future {
      let method = req.method().clone();
      let path = req.path().to_string();
      let started = Instant::now();
      let fut = self.service.call(req);

      Box::pin(async move {
         let res = fut.await?;
         let elapsed = started.elapsed().as_millis();
         let status = res.status();
         if status.is_server_error() {
            warn!("{} {} -> {} ({} ms)", method, path, status, elapsed);
         } else {
            info!("{} {} -> {} ({} ms)", method, path, status, elapsed);
         }
         Ok(res)
      })
   }
}

/// `info` unless `RUST_LOG` says otherwise.
pub fn init_logger() {
   Builder::new()
   .filter_level(LevelFilter::Info)
   .parse_default_env()
   .format(|buf, record| {
      let level = match record.level() {
         Level::Error => "ERROR".red().bold(),
         Level::Warn => "WARN".yellow().bold(),
         Level::Info => "INFO".green().bold(),
         Level::Debug => "DEBUG".blue().bold(),
         Level::Trace => "TRACE".magenta().bold(),
      };
      writeln!(
         buf,
         "{} {} [{}] {}",
         chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
         level,
         record.target(),
         record.args()
      )
   })
   .init()
}

#[cfg(test)]
mod tests {
   use actix_web::{test, web, App, HttpResponse};

   use super::*;

   #[actix_rt::test]
   async fn middleware_passes_responses_through() {
      let app = test::init_service(
         App::new()
            .wrap(LoggerMiddleware)
            .route("/ping", web::get().to(|| async { HttpResponse::Ok().body("pong") })),
      )
      .await;
      let res = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
      assert!(res.status().is_success());
      assert_eq!(test::read_body(res).await, "pong");
   }
}
