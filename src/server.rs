use std::fs::File;
use std::path::{Component, Path, PathBuf};

use tiny_http::{Header, Method, Request, Response, ResponseBox, Server, StatusCode};

use crate::error::PipelineError;

/// Serve the output directory as read-only static content, until killed.
///
/// One request is handled at a time. The batch has finished writing by the
/// time this starts, so there is no concurrent mutation to guard against.
pub fn serve(root: &Path, addr: &str) -> Result<(), PipelineError> {
    let server = Server::http(addr).map_err(|e| PipelineError::ServerBind {
        addr: addr.to_string(),
        reason: e.to_string(),
    })?;
    tracing::info!("running server at http://{addr}");

    for request in server.incoming_requests() {
        let remote = request
            .remote_addr()
            .map_or_else(|| "-".to_string(), |a| a.to_string());
        tracing::info!("{remote} {} {}", request.method(), request.url());

        let response = build_response(root, &request);
        if let Err(error) = request.respond(response) {
            tracing::debug!("client dropped the connection: {error}");
        }
    }

    Ok(())
}

fn build_response(root: &Path, request: &Request) -> ResponseBox {
    if *request.method() != Method::Get {
        return Response::from_string("method not allowed")
            .with_status_code(StatusCode(405))
            .boxed();
    }

    let Some(path) = resolve_path(root, request.url()) else {
        return not_found();
    };
    if !path.is_file() {
        return not_found();
    }

    match File::open(&path) {
        Ok(file) => {
            let mut response = Response::from_file(file);
            if let Ok(header) =
                Header::from_bytes(&b"Content-Type"[..], content_type(&path).as_bytes())
            {
                response.add_header(header);
            }
            response.boxed()
        }
        Err(_) => not_found(),
    }
}

fn not_found() -> ResponseBox {
    Response::from_string("not found").with_status_code(StatusCode(404)).boxed()
}

/// Map a request URL onto a file inside the served root.
///
/// Only plain path components are accepted; anything that could step outside
/// the root resolves to nothing. The bare root serves the index page.
fn resolve_path(root: &Path, url: &str) -> Option<PathBuf> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let trimmed = path.trim_start_matches('/');
    let target = if trimmed.is_empty() { "index.html" } else { trimmed };

    let relative = Path::new(target);
    if !relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("css") => "text/css",
        _ => "application/octet-stream",
    }
}
