use {
    crate::{
        domain::{Dish, Id},
        infra::api::{State, dto, error::Rejection},
    },
    axum::{
        Json,
        extract::{self, Path},
        http::StatusCode,
        routing,
    },
};

pub(in crate::infra::api) fn dishes(router: axum::Router<State>) -> axum::Router<State> {
    router
        .route(
            "/dishes",
            routing::get(list)
                .post(create)
                .fallback(super::method_not_allowed),
        )
        .route(
            "/dishes/{dish_id}",
            routing::get(read)
                .put(update)
                .fallback(super::method_not_allowed),
        )
}

async fn list(state: extract::State<State>) -> Result<Json<dto::Data<Vec<Dish>>>, Rejection> {
    let dishes = state.dishes().list().await?;
    Ok(Json(dto::Data::new(dishes)))
}

async fn create(
    state: extract::State<State>,
    dto::Body(payload): dto::Body,
) -> Result<(StatusCode, Json<dto::Data<Dish>>), Rejection> {
    let dish = state.dishes().create(&payload).await?;
    Ok((StatusCode::CREATED, Json(dto::Data::new(dish))))
}

async fn read(
    state: extract::State<State>,
    Path(dish_id): Path<String>,
) -> Result<Json<dto::Data<Dish>>, Rejection> {
    let dish = state.dishes().read(&Id::from(dish_id)).await?;
    Ok(Json(dto::Data::new(dish)))
}

async fn update(
    state: extract::State<State>,
    Path(dish_id): Path<String>,
    dto::Body(payload): dto::Body,
) -> Result<Json<dto::Data<Dish>>, Rejection> {
    let dish = state
        .dishes()
        .update(&Id::from(dish_id), &payload)
        .await?;
    Ok(Json(dto::Data::new(dish)))
}
