use {
    super::{Service, assert_error},
    reqwest::StatusCode,
    serde_json::{Value, json},
};

const STATUS: &str = "Orders must have a status of pending, preparing, out-for-delivery, delivered";

fn order(status: &str) -> Value {
    json!({
        "deliverTo": "308 Negra Arroyo Lane, Albuquerque, NM",
        "mobileNumber": "(505) 143-3369",
        "status": status,
        "dishes": [
            {
                "id": "d351db2b49b69679504652ea1cf38241",
                "name": "Dolcelatte and chickpea spaghetti",
                "description": "Spaghetti topped with a blend of dolcelatte and fresh chickpeas",
                "image_url": "https://images.pexels.com/photos/1279330/pexels-photo-1279330.jpeg",
                "price": 19,
                "quantity": 2,
            },
        ],
    })
}

async fn create(service: &Service, data: Value) -> Value {
    let (status, body) = service.post("/orders", json!({ "data": data })).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"].clone()
}

#[tokio::test]
async fn create_and_read() {
    let service = Service::new().await;

    let created = create(&service, order("pending")).await;
    let id = created["id"].as_str().unwrap().to_owned();
    let mut expected = order("pending");
    expected["id"] = json!(id);
    assert_eq!(created, expected);

    assert_eq!(
        service.get(&format!("/orders/{id}")).await,
        (StatusCode::OK, json!({ "data": expected }))
    );
    assert_eq!(
        service.get("/orders").await,
        (StatusCode::OK, json!({ "data": [expected] }))
    );
}

#[tokio::test]
async fn create_keeps_any_status() {
    let service = Service::new().await;

    let created = create(&service, order("delivered-ish")).await;
    assert_eq!(created["status"], "delivered-ish");

    let mut data = order("pending");
    data.as_object_mut().unwrap().remove("status");
    let created = create(&service, data).await;
    assert!(created.get("status").is_none());

    for status in [json!(7), json!(""), json!(null)] {
        let mut data = order("pending");
        data["status"] = status.clone();
        let created = create(&service, data).await;
        assert_eq!(created["status"], status);
        assert_eq!(
            service
                .get(&format!("/orders/{}", created["id"].as_str().unwrap()))
                .await
                .1["data"]["status"],
            status
        );
    }
}

#[tokio::test]
async fn create_accepts_fractional_quantities() {
    let service = Service::new().await;
    let mut data = order("pending");
    data["dishes"][0]["quantity"] = json!(1.5);
    let created = create(&service, data).await;
    assert_eq!(created["dishes"][0]["quantity"], 1.5);
}

#[tokio::test]
async fn create_rejects_invalid_orders() {
    let service = Service::new().await;
    let with = |field: &str, value: Value| {
        let mut data = order("pending");
        data[field] = value;
        json!({ "data": data })
    };
    let quantity = |index: usize| {
        format!("Dish {index} must have a quantity that is an integer greater than 0")
    };

    let cases = [
        (json!({ "data": {} }), "Order must include a deliverTo".to_owned()),
        (with("deliverTo", json!("")), "Order must include a deliverTo".to_owned()),
        (with("mobileNumber", json!(null)), "Order must include a mobileNumber".to_owned()),
        (with("dishes", json!(null)), "Order must include a dish".to_owned()),
        (with("dishes", json!({})), "Order must include at least one dish".to_owned()),
        (with("dishes", json!([])), "Order must include at least one dish".to_owned()),
        (with("dishes", json!([{ "name": "Falafel" }])), quantity(0)),
        (
            with("dishes", json!([{ "quantity": 1 }, { "quantity": 0 }])),
            quantity(1),
        ),
        (
            with("dishes", json!([{ "quantity": 1 }, { "quantity": -3 }])),
            quantity(1),
        ),
        (
            with("dishes", json!([{ "quantity": "2" }, { "quantity": 1 }])),
            quantity(0),
        ),
    ];
    for (body, message) in cases {
        assert_error(service.post("/orders", body).await, 400, &message);
    }

    assert_eq!(
        service.get("/orders").await,
        (StatusCode::OK, json!({ "data": [] }))
    );
}

#[tokio::test]
async fn missing_order() {
    let service = Service::new().await;
    let message = "Order: nope does not exist";
    assert_error(service.get("/orders/nope").await, 404, message);
    assert_error(
        service.put("/orders/nope", json!({ "data": order("pending") })).await,
        404,
        message,
    );
    assert_error(service.delete("/orders/nope").await, 404, message);
}

#[tokio::test]
async fn update_in_place() {
    let service = Service::new().await;
    let created = create(&service, order("pending")).await;
    let id = created["id"].as_str().unwrap();
    let path = format!("/orders/{id}");

    let mut data = order("preparing");
    data["id"] = json!("somethingelse");
    assert_error(
        service.put(&path, json!({ "data": data })).await,
        400,
        &format!("Order id does not match route id. Order: somethingelse, Route: {id}."),
    );

    let mut data = order("preparing");
    data["id"] = json!(7);
    assert_error(
        service.put(&path, json!({ "data": data })).await,
        400,
        &format!("Order id does not match route id. Order: 7, Route: {id}."),
    );

    let mut data = order("out-for-delivery");
    data["deliverTo"] = json!("Rualdo Tavares, 2410, Parque das Nações, Lisbon");
    data["dishes"][0]["quantity"] = json!(5);
    let (status, body) = service.put(&path, json!({ "data": data })).await;
    assert_eq!(status, StatusCode::OK);
    let mut expected = data.clone();
    expected["id"] = json!(id);
    assert_eq!(body, json!({ "data": expected }));

    assert_eq!(
        service.get(&path).await,
        (StatusCode::OK, json!({ "data": expected }))
    );
}

#[tokio::test]
async fn update_requires_valid_status() {
    let service = Service::new().await;
    let created = create(&service, order("pending")).await;
    let path = format!("/orders/{}", created["id"].as_str().unwrap());

    for status in ["delivered-ish", ""] {
        assert_error(
            service.put(&path, json!({ "data": order(status) })).await,
            400,
            STATUS,
        );
    }
    let mut data = order("pending");
    data.as_object_mut().unwrap().remove("status");
    assert_error(
        service.put(&path, json!({ "data": data })).await,
        400,
        STATUS,
    );

    // Field checks come first.
    let mut data = order("delivered-ish");
    data["mobileNumber"] = json!("");
    assert_error(
        service.put(&path, json!({ "data": data })).await,
        400,
        "Order must include a mobileNumber",
    );

    // Any known status may follow any other.
    for status in ["delivered", "pending", "out-for-delivery", "preparing"] {
        let (code, body) = service.put(&path, json!({ "data": order(status) })).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body["data"]["status"], status);
    }
}

#[tokio::test]
async fn only_pending_orders_are_deleted() {
    let service = Service::new().await;
    let pending = create(&service, order("pending")).await;
    let delivered = create(&service, order("delivered")).await;
    let pending = format!("/orders/{}", pending["id"].as_str().unwrap());
    let delivered = format!("/orders/{}", delivered["id"].as_str().unwrap());

    assert_error(
        service.delete(&delivered).await,
        400,
        "An order cannot be deleted unless it is pending",
    );
    assert_eq!(service.get(&delivered).await.0, StatusCode::OK);

    assert_eq!(
        service.delete(&pending).await,
        (StatusCode::NO_CONTENT, Value::Null)
    );
    assert_eq!(service.get(&pending).await.0, StatusCode::NOT_FOUND);

    let (_, body) = service.get("/orders").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn orders_without_status_cannot_be_deleted() {
    let service = Service::new().await;
    let mut data = order("pending");
    data.as_object_mut().unwrap().remove("status");
    let created = create(&service, data).await;

    assert_error(
        service
            .delete(&format!("/orders/{}", created["id"].as_str().unwrap()))
            .await,
        400,
        "An order cannot be deleted unless it is pending",
    );
}
