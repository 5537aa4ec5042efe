use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use uwdash_core::{BlockKind, RenderedBlock};

use crate::middleware::RequestId;

use super::{map_feed_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct BlockSummary {
    id: String,
    kind: BlockKind,
}

pub(super) async fn list_blocks(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<BlockSummary>>> {
    let data = state
        .blocks
        .blocks
        .iter()
        .map(|b| BlockSummary {
            id: b.id.clone(),
            kind: b.kind(),
        })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn render_block(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RenderedBlock>>, ApiError> {
    let Some(block) = state.blocks.find(&id) else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("no block configured with id '{id}'"),
        ));
    };

    let data = state
        .renderer
        .render(block)
        .await
        .map_err(|e| map_feed_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
