use actix_web::{HttpRequest, HttpResponse, Responder};
use mime_guess::from_path;
use crate::utils::static_files::StaticFiles;

/// Serves embedded pages; `/about` resolves to `about.html`.
pub async fn default_route(req: HttpRequest) -> impl Responder {
    let request_path = req.path().trim_start_matches('/');
    let file_path = match request_path {
        "" => "index.html".to_string(),
        path if !path.contains('.') => format!("{path}.html"),
        path => path.to_string(),
    };
    match StaticFiles::get(&file_path) {
        Some(content) => {
            let mime_type = from_path(&file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime_type.as_ref())
                .body(content.data.into_owned())
        },
        None => HttpResponse::NotFound().body("404 Not Found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};

    #[actix_web::test]
    async fn resolves_pages_and_assets() {
        let app = test::init_service(App::new().default_service(web::to(default_route))).await;
        for (uri, content_type) in [("/", "text/html"), ("/about", "text/html"), ("/contact", "text/html"), ("/javascript/portal.js", "javascript")] {
            let response = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            let header = response.headers().get("content-type").unwrap().to_str().unwrap();
            assert!(header.contains(content_type), "{uri}: {header}");
        }
        let response = test::call_service(&app, test::TestRequest::get().uri("/missing").to_request()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn detection_page_script_reads_configured_defaults() {
        let app = test::init_service(App::new().default_service(web::to(default_route))).await;
        let request = test::TestRequest::get().uri("/javascript/portal.js").to_request();
        let body = test::call_and_read_body(&app, request).await;
        let script = String::from_utf8_lossy(&body);
        assert!(script.contains("fetch(\"/config/get\")"));
        assert!(script.contains("config.default_confidence"));
        assert!(script.contains("config.default_overlap"));
    }
}
