use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, State},
    http::{request::Parts, StatusCode},
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{AppError, CtxError, CtxResult};
use crate::middleware::mw_ctx::CtxState;

/// The signed-in user performing a request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Ctx {
    viewer: Option<Viewer>,
    req_id: Uuid,
}

impl Ctx {
    pub fn new(viewer: Option<Viewer>) -> Self {
        Self {
            viewer,
            req_id: Uuid::new_v4(),
        }
    }

    pub fn anonymous() -> Self {
        Self::new(None)
    }

    pub fn req_id(&self) -> Uuid {
        self.req_id
    }

    pub fn viewer_id(&self) -> Option<&str> {
        self.viewer.as_ref().map(|v| v.id.as_str())
    }

    pub fn user_id(&self) -> CtxResult<String> {
        self.viewer
            .as_ref()
            .map(|v| v.id.clone())
            .ok_or_else(|| self.to_ctx_error(AppError::Unauthenticated))
    }

    pub fn to_ctx_error(&self, error: AppError) -> CtxError {
        CtxError {
            error,
            req_id: self.req_id,
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for Ctx {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state): State<Arc<CtxState>> = State::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        let viewer = match parts.headers.typed_get::<Authorization<Bearer>>() {
            Some(token) => match app_state.jwt.decode(token.token()) {
                Ok(claims) => Some(Viewer {
                    id: claims.sub,
                    email: claims.email,
                }),
                Err(err) => {
                    tracing::debug!("ignoring bearer token: {err}");
                    None
                }
            },
            None => None,
        };

        Ok(Ctx::new(viewer))
    }
}
