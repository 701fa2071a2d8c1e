use std::collections::BTreeMap;

use actix_web::{get, HttpRequest};

use crate::policy::Resource;
use crate::types::response::{ApiResponse, ApiResult};

/// Lists every collection with its absolute URL.
#[get("/")]
async fn api_root(req: HttpRequest) -> ApiResult<BTreeMap<&'static str, String>> {
    let info = req.connection_info();
    let base = format!("{}://{}", info.scheme(), info.host());

    Ok(ApiResponse::Ok(
        Resource::ALL
            .iter()
            .map(|r| (r.prefix(), format!("{base}/{}/", r.prefix())))
            .collect(),
    ))
}
