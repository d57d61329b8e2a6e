use {
    super::{
        Id,
        validation::{self, Check, Payload, Request, bad_request, not_found},
    },
    crate::infra::{observe, persistence},
    serde::{Deserialize, Serialize},
    serde_json::{Map, Number, Value},
    std::{fmt, sync::Arc},
    tokio::sync::Mutex,
};

pub const RESOURCE: &str = "orders";

const DISHES_MESSAGE: &str = "Order must include at least one dish";
const STATUS_MESSAGE: &str =
    "Orders must have a status of pending, preparing, out-for-delivery, delivered";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Id,
    pub deliver_to: String,
    pub mobile_number: String,
    /// Orders get created with whatever status the client sent, if any. Only
    /// updates insist on one of the known states.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    pub dishes: Vec<LineItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
    /// Any other value, as accepted on creation. Echoed back verbatim.
    #[serde(untagged)]
    Other(Value),
}

impl Status {
    pub fn parse(text: &str) -> Self {
        match text {
            "pending" => Self::Pending,
            "preparing" => Self::Preparing,
            "out-for-delivery" => Self::OutForDelivery,
            "delivered" => Self::Delivered,
            other => Self::Other(Value::String(other.to_owned())),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Preparing => f.write_str("preparing"),
            Self::OutForDelivery => f.write_str("out-for-delivery"),
            Self::Delivered => f.write_str("delivered"),
            Self::Other(Value::String(other)) => f.write_str(other),
            Self::Other(other) => write!(f, "{other}"),
        }
    }
}

/// A dish as part of an order. The dish fields are kept as submitted, they
/// aren't checked against the dishes collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    pub dish: Map<String, Value>,
    /// A number greater than zero, kept in the form it was submitted in.
    pub quantity: Number,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] validation::Error),
    #[error(transparent)]
    Storage(#[from] persistence::Error),
}

#[derive(Clone, Debug, PartialEq)]
struct Draft {
    deliver_to: String,
    mobile_number: String,
    status: Option<Status>,
    dishes: Vec<LineItem>,
}

impl Draft {
    fn from_payload(payload: &Payload) -> Result<Self, validation::Error> {
        Ok(Self {
            deliver_to: deliver_to(payload)?.to_owned(),
            mobile_number: mobile_number(payload)?.to_owned(),
            status: status(payload),
            dishes: line_items(payload)?,
        })
    }

    fn into_order(self, id: Id) -> Order {
        Order {
            id,
            deliver_to: self.deliver_to,
            mobile_number: self.mobile_number,
            status: self.status,
            dishes: self.dishes,
        }
    }
}

const CREATE: &[Check] = &[
    has_deliver_to,
    has_mobile_number,
    has_dishes,
    dishes_is_array,
    dishes_not_empty,
    quantities_present,
    quantities_positive,
    quantities_are_numbers,
];

const UPDATE: &[Check] = &[
    has_deliver_to,
    has_mobile_number,
    has_dishes,
    dishes_is_array,
    dishes_not_empty,
    quantities_present,
    quantities_positive,
    quantities_are_numbers,
    id_matches_route,
    has_status,
    status_is_known,
];

fn deliver_to(payload: &Payload) -> Result<&str, validation::Error> {
    payload.require_text("deliverTo", "Order must include a deliverTo")
}

fn mobile_number(payload: &Payload) -> Result<&str, validation::Error> {
    payload.require_text("mobileNumber", "Order must include a mobileNumber")
}

/// The submitted status, if the field is there at all.
fn status(payload: &Payload) -> Option<Status> {
    payload.get("status").map(|status| match status {
        Value::String(text) => Status::parse(text),
        other => Status::Other(other.clone()),
    })
}

fn dishes(payload: &Payload) -> Result<&[Value], validation::Error> {
    payload
        .require("dishes", "Order must include a dish")?
        .as_array()
        .filter(|dishes| !dishes.is_empty())
        .map(Vec::as_slice)
        .ok_or_else(|| bad_request(DISHES_MESSAGE))
}

fn quantity_error(index: usize) -> validation::Error {
    bad_request(format!(
        "Dish {index} must have a quantity that is an integer greater than 0"
    ))
}

/// Reports the first line item whose quantity doesn't satisfy `valid`.
fn scan_quantities(
    request: &Request<'_>,
    valid: impl Fn(&Value) -> bool,
) -> Result<(), validation::Error> {
    let dishes = dishes(request.payload)?;
    match dishes
        .iter()
        .position(|dish| !dish.get("quantity").is_some_and(&valid))
    {
        Some(index) => Err(quantity_error(index)),
        None => Ok(()),
    }
}

fn line_items(payload: &Payload) -> Result<Vec<LineItem>, validation::Error> {
    dishes(payload)?
        .iter()
        .enumerate()
        .map(|(index, dish)| {
            let mut dish = dish.as_object().cloned().unwrap_or_default();
            let quantity = dish
                .remove("quantity")
                .as_ref()
                .and_then(validation::positive_number)
                .ok_or_else(|| quantity_error(index))?;
            Ok(LineItem { dish, quantity })
        })
        .collect()
}

fn has_deliver_to(request: &Request<'_>) -> Result<(), validation::Error> {
    deliver_to(request.payload).map(drop)
}

fn has_mobile_number(request: &Request<'_>) -> Result<(), validation::Error> {
    mobile_number(request.payload).map(drop)
}

fn has_dishes(request: &Request<'_>) -> Result<(), validation::Error> {
    request
        .payload
        .require("dishes", "Order must include a dish")
        .map(drop)
}

fn dishes_is_array(request: &Request<'_>) -> Result<(), validation::Error> {
    match request.payload.get("dishes") {
        Some(Value::Array(_)) => Ok(()),
        _ => Err(bad_request(DISHES_MESSAGE)),
    }
}

fn dishes_not_empty(request: &Request<'_>) -> Result<(), validation::Error> {
    dishes(request.payload).map(drop)
}

fn quantities_present(request: &Request<'_>) -> Result<(), validation::Error> {
    scan_quantities(request, validation::is_truthy)
}

fn quantities_positive(request: &Request<'_>) -> Result<(), validation::Error> {
    // Only numbers can be out of range here, anything else is caught by the
    // number scan.
    scan_quantities(request, |quantity| {
        !quantity.is_number() || validation::positive_number(quantity).is_some()
    })
}

fn quantities_are_numbers(request: &Request<'_>) -> Result<(), validation::Error> {
    scan_quantities(request, Value::is_number)
}

fn id_matches_route(request: &Request<'_>) -> Result<(), validation::Error> {
    let (Some(route), Some(id)) = (request.route, validation::id_mismatch(request)) else {
        return Ok(());
    };
    Err(bad_request(format!(
        "Order id does not match route id. Order: {id}, Route: {route}."
    )))
}

fn has_status(request: &Request<'_>) -> Result<(), validation::Error> {
    request.payload.require("status", STATUS_MESSAGE).map(drop)
}

fn status_is_known(request: &Request<'_>) -> Result<(), validation::Error> {
    match status(request.payload) {
        Some(status) if status.is_known() => Ok(()),
        _ => Err(bad_request(STATUS_MESSAGE)),
    }
}

/// The orders resource.
pub struct Orders {
    repository: Arc<dyn persistence::Repository<Order>>,
    /// Held while a mutation is validated and applied so that the checks see
    /// the state they are applied to.
    writes: Mutex<()>,
}

impl Orders {
    pub fn new(repository: Arc<dyn persistence::Repository<Order>>) -> Self {
        Self {
            repository,
            writes: Mutex::new(()),
        }
    }

    pub async fn list(&self) -> Result<Vec<Order>, Error> {
        Ok(self.repository.list().await?)
    }

    pub async fn create(&self, payload: &Payload) -> Result<Order, Error> {
        let _guard = self.writes.lock().await;
        let draft = validate(&Request::new(payload), CREATE)?;
        let order = self
            .repository
            .create(draft.into_order(Id::random()))
            .await?;
        observe::order_created(&order);
        Ok(order)
    }

    pub async fn read(&self, id: &Id) -> Result<Order, Error> {
        self.find(id).await
    }

    pub async fn update(&self, id: &Id, payload: &Payload) -> Result<Order, Error> {
        let _guard = self.writes.lock().await;
        let order = self.find(id).await?;
        let draft = validate(&Request::with_route(&order.id, payload), UPDATE)?;
        let order = self
            .repository
            .update(draft.into_order(order.id))
            .await?
            .ok_or_else(|| does_not_exist(id))?;
        observe::order_updated(&order);
        Ok(order)
    }

    /// Removes a pending order. Orders in any other state stay put.
    pub async fn delete(&self, id: &Id) -> Result<(), Error> {
        let _guard = self.writes.lock().await;
        let order = self.find(id).await?;
        if order.status != Some(Status::Pending) {
            let err = bad_request("An order cannot be deleted unless it is pending");
            observe::rejected(RESOURCE, &err);
            return Err(err.into());
        }
        self.repository
            .delete(&order.id)
            .await?
            .ok_or_else(|| does_not_exist(id))?;
        observe::order_deleted(&order);
        Ok(())
    }

    async fn find(&self, id: &Id) -> Result<Order, Error> {
        match self.repository.get(id).await? {
            Some(order) => Ok(order),
            None => Err(does_not_exist(id).into()),
        }
    }
}

fn does_not_exist(id: &Id) -> validation::Error {
    let err = not_found(format!("Order: {id} does not exist"));
    observe::rejected(RESOURCE, &err);
    err
}

fn validate(request: &Request<'_>, checks: &[Check]) -> Result<Draft, validation::Error> {
    validation::run(request, checks)
        .and_then(|()| Draft::from_payload(request.payload))
        .inspect_err(|err| observe::rejected(RESOURCE, err))
}
