//! Existence-check gates run before a handler. Each gate either passes the request on or blocks it with an error response.

use crate::error::AppError;
use crate::extractors::parse_id;
use crate::model::{Entity, DEVELOPERS, PROJECTS};
use crate::service::CrudService;
use crate::sql::Condition;
use crate::state::AppState;
use crate::store::Store;
use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Path, Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    /// Developer named by the `:id` path segment must exist.
    DeveloperExists,
    /// Project named by the `:id` path segment must exist.
    ProjectExists,
    /// Developer named by body `developerId` must exist when the key is given.
    ProjectDeveloperExists,
    /// No other developer may already use body `email`.
    EmailAvailable,
}

/// What a gate may inspect: the raw `:id` segment and the JSON object body.
#[derive(Debug, Default)]
pub struct GateContext {
    pub path_id: Option<String>,
    pub body: Option<Map<String, Value>>,
}

impl GateContext {
    fn required_id(&self) -> Result<i64, AppError> {
        let raw = self
            .path_id
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("missing id".into()))?;
        parse_id(raw)
    }

    fn body_value(&self, key: &str) -> Option<&Value> {
        self.body.as_ref().and_then(|b| b.get(key)).filter(|v| !v.is_null())
    }
}

impl Gate {
    fn needs_body(self) -> bool {
        matches!(self, Gate::ProjectDeveloperExists | Gate::EmailAvailable)
    }

    /// PASS is `Ok(())`; BLOCK is the error to answer with.
    pub async fn check(self, store: &dyn Store, ctx: &GateContext) -> Result<(), AppError> {
        match self {
            Gate::DeveloperExists => require_row(store, &DEVELOPERS, ctx.required_id()?).await,
            Gate::ProjectExists => require_row(store, &PROJECTS, ctx.required_id()?).await,
            Gate::ProjectDeveloperExists => {
                let Some(v) = ctx.body_value("developerId") else {
                    return Ok(());
                };
                let id = v
                    .as_i64()
                    .ok_or_else(|| AppError::Validation("developerId must be an integer".into()))?;
                require_row(store, &DEVELOPERS, id).await
            }
            Gate::EmailAvailable => {
                let Some(email) = ctx.body_value("email") else {
                    return Ok(());
                };
                let mut conditions = vec![Condition::Eq("email", email.clone())];
                if let Some(Ok(own_id)) = ctx.path_id.as_deref().map(parse_id) {
                    conditions.push(Condition::NotEq("id", Value::from(own_id)));
                }
                if CrudService::exists(store, &DEVELOPERS, &conditions).await? {
                    return Err(AppError::Conflict("Email already exists".into()));
                }
                Ok(())
            }
        }
    }
}

async fn require_row(store: &dyn Store, entity: &Entity, id: i64) -> Result<(), AppError> {
    if CrudService::exists(store, entity, &[Condition::Eq(entity.pk, Value::from(id))]).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("{} not found", entity.label)))
    }
}

/// Ordered gates for one route, bound to the store.
#[derive(Clone)]
pub struct GateChain {
    state: AppState,
    gates: &'static [Gate],
}

impl GateChain {
    /// Runs gates in order and stops at the first BLOCK. Returns the request with its body restored.
    async fn run(&self, params: Option<HashMap<String, String>>, request: Request) -> Result<Request, AppError> {
        let mut ctx = GateContext {
            path_id: params.and_then(|mut p| p.remove("id")),
            body: None,
        };
        let request = if self.gates.iter().any(|g| g.needs_body()) {
            let (parts, body) = request.into_parts();
            let mut buffered = Request::new(body);
            *buffered.extensions_mut() = parts.extensions.clone();
            let bytes = Bytes::from_request(buffered, &())
                .await
                .map_err(|rejection| AppError::rejected(rejection.status(), rejection.body_text()))?;
            ctx.body = match serde_json::from_slice::<Value>(&bytes) {
                Ok(Value::Object(map)) => Some(map),
                _ => None,
            };
            Request::from_parts(parts, Body::from(bytes))
        } else {
            request
        };
        for gate in self.gates {
            if let Err(err) = gate.check(self.state.store.as_ref(), &ctx).await {
                tracing::debug!(gate = ?gate, error = %err, "request blocked");
                return Err(err);
            }
        }
        Ok(request)
    }
}

async fn enforce(
    State(chain): State<GateChain>,
    params: Option<Path<HashMap<String, String>>>,
    request: Request,
    next: Next,
) -> Response {
    match chain.run(params.map(|Path(p)| p), request).await {
        Ok(request) => next.run(request).await,
        Err(err) => err.into_response(),
    }
}

/// Put `gates` in front of every handler registered on `route`.
pub fn guard(route: MethodRouter<AppState>, state: &AppState, gates: &'static [Gate]) -> MethodRouter<AppState> {
    let chain = GateChain {
        state: state.clone(),
        gates,
    };
    route.route_layer(middleware::from_fn_with_state(chain, enforce))
}
