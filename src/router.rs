use crate::errors::{ResultResp, ServerError};
use crate::listings::{PageSource, PropertyFinder};
use crate::responses::json_response;
use astra::Request;
use serde_json::json;

/// Everything the handlers need; shared read-only across worker threads.
pub struct AppState<S> {
    pub finder: PropertyFinder<S>,
}

pub fn handle<S: PageSource>(req: Request, state: &AppState<S>) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("GET", "/property_info") => {
            let record = state.finder.get_record(&mut rand::thread_rng())?;
            json_response(200, &record)
        }
        ("GET", "/health") => json_response(
            200,
            &json!({ "status": "ok", "cities": state.finder.pool().len() }),
        ),
        _ => Err(ServerError::NotFound),
    }
}
