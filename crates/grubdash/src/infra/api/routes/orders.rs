use {
    crate::{
        domain::{Id, Order},
        infra::api::{State, dto, error::Rejection},
    },
    axum::{
        Json,
        extract::{self, Path},
        http::StatusCode,
        routing,
    },
};

pub(in crate::infra::api) fn orders(router: axum::Router<State>) -> axum::Router<State> {
    router
        .route(
            "/orders",
            routing::get(list)
                .post(create)
                .fallback(super::method_not_allowed),
        )
        .route(
            "/orders/{order_id}",
            routing::get(read)
                .put(update)
                .delete(destroy)
                .fallback(super::method_not_allowed),
        )
}

async fn list(state: extract::State<State>) -> Result<Json<dto::Data<Vec<Order>>>, Rejection> {
    let orders = state.orders().list().await?;
    Ok(Json(dto::Data::new(orders)))
}

async fn create(
    state: extract::State<State>,
    dto::Body(payload): dto::Body,
) -> Result<(StatusCode, Json<dto::Data<Order>>), Rejection> {
    let order = state.orders().create(&payload).await?;
    Ok((StatusCode::CREATED, Json(dto::Data::new(order))))
}

async fn read(
    state: extract::State<State>,
    Path(order_id): Path<String>,
) -> Result<Json<dto::Data<Order>>, Rejection> {
    let order = state.orders().read(&Id::from(order_id)).await?;
    Ok(Json(dto::Data::new(order)))
}

async fn update(
    state: extract::State<State>,
    Path(order_id): Path<String>,
    dto::Body(payload): dto::Body,
) -> Result<Json<dto::Data<Order>>, Rejection> {
    let order = state
        .orders()
        .update(&Id::from(order_id), &payload)
        .await?;
    Ok(Json(dto::Data::new(order)))
}

async fn destroy(
    state: extract::State<State>,
    Path(order_id): Path<String>,
) -> Result<StatusCode, Rejection> {
    state.orders().delete(&Id::from(order_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
