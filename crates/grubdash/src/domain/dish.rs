use {
    super::{
        Id,
        validation::{self, Check, Payload, Request, bad_request, not_found},
    },
    crate::infra::{observe, persistence},
    serde::{Deserialize, Serialize},
    serde_json::Number,
    std::sync::Arc,
    tokio::sync::Mutex,
};

pub const RESOURCE: &str = "dishes";

const PRICE_MESSAGE: &str = "Dish must have a price that is an integer greater than 0";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: Id,
    pub name: String,
    pub description: String,
    /// A positive integer, kept in the form it was submitted in.
    pub price: Number,
    pub image_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] validation::Error),
    #[error(transparent)]
    Storage(#[from] persistence::Error),
}

/// The client controlled fields of a dish.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Draft {
    name: String,
    description: String,
    price: Number,
    image_url: String,
}

impl Draft {
    /// Reads the fields out of a payload that passed the validation chain.
    fn from_payload(payload: &Payload) -> Result<Self, validation::Error> {
        Ok(Self {
            name: name(payload)?.to_owned(),
            description: description(payload)?.to_owned(),
            price: price(payload)?,
            image_url: image_url(payload)?.to_owned(),
        })
    }

    fn into_dish(self, id: Id) -> Dish {
        Dish {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
        }
    }
}

/// Checks run before a dish gets created.
const CREATE: &[Check] = &[
    has_name,
    has_description,
    has_price,
    price_is_integer,
    price_is_positive,
    has_image_url,
];

/// Checks run before an existing dish gets overwritten.
const UPDATE: &[Check] = &[
    id_matches_route,
    has_name,
    has_description,
    has_price,
    price_is_integer,
    price_is_positive,
    has_image_url,
];

fn name(payload: &Payload) -> Result<&str, validation::Error> {
    payload.require_text("name", "Dish must include a name")
}

fn description(payload: &Payload) -> Result<&str, validation::Error> {
    payload.require_text("description", "Dish must include a description")
}

fn image_url(payload: &Payload) -> Result<&str, validation::Error> {
    payload.require_text("image_url", "Dish must include an image_url")
}

fn price(payload: &Payload) -> Result<Number, validation::Error> {
    payload
        .get("price")
        .filter(|price| validation::is_integer(price))
        .and_then(validation::positive_number)
        .ok_or_else(|| bad_request(PRICE_MESSAGE))
}

fn has_name(request: &Request<'_>) -> Result<(), validation::Error> {
    name(request.payload).map(drop)
}

fn has_description(request: &Request<'_>) -> Result<(), validation::Error> {
    description(request.payload).map(drop)
}

fn has_image_url(request: &Request<'_>) -> Result<(), validation::Error> {
    image_url(request.payload).map(drop)
}

fn has_price(request: &Request<'_>) -> Result<(), validation::Error> {
    request
        .payload
        .require("price", "Dish must include a price")
        .map(drop)
}

fn price_is_integer(request: &Request<'_>) -> Result<(), validation::Error> {
    request
        .payload
        .get("price")
        .filter(|price| validation::is_integer(price))
        .map(drop)
        .ok_or_else(|| bad_request(PRICE_MESSAGE))
}

fn price_is_positive(request: &Request<'_>) -> Result<(), validation::Error> {
    price(request.payload).map(drop)
}

fn id_matches_route(request: &Request<'_>) -> Result<(), validation::Error> {
    let (Some(route), Some(id)) = (request.route, validation::id_mismatch(request)) else {
        return Ok(());
    };
    Err(bad_request(format!(
        "Dish id does not match route id. Dish: {id}, Route: {route}"
    )))
}

/// The dishes resource: validates requests and applies them to the
/// collection.
pub struct Dishes {
    repository: Arc<dyn persistence::Repository<Dish>>,
    /// Serializes validation and write of mutating requests.
    writes: Mutex<()>,
}

impl Dishes {
    pub fn new(repository: Arc<dyn persistence::Repository<Dish>>) -> Self {
        Self {
            repository,
            writes: Mutex::new(()),
        }
    }

    pub async fn list(&self) -> Result<Vec<Dish>, Error> {
        Ok(self.repository.list().await?)
    }

    pub async fn create(&self, payload: &Payload) -> Result<Dish, Error> {
        let _guard = self.writes.lock().await;
        let draft = validate(&Request::new(payload), CREATE)?;
        let dish = self.repository.create(draft.into_dish(Id::random())).await?;
        observe::dish_created(&dish);
        Ok(dish)
    }

    pub async fn read(&self, id: &Id) -> Result<Dish, Error> {
        self.find(id).await
    }

    pub async fn update(&self, id: &Id, payload: &Payload) -> Result<Dish, Error> {
        let _guard = self.writes.lock().await;
        let dish = self.find(id).await?;
        let draft = validate(&Request::with_route(&dish.id, payload), UPDATE)?;
        let dish = self
            .repository
            .update(draft.into_dish(dish.id))
            .await?
            .ok_or_else(|| does_not_exist(id))?;
        observe::dish_updated(&dish);
        Ok(dish)
    }

    async fn find(&self, id: &Id) -> Result<Dish, Error> {
        match self.repository.get(id).await? {
            Some(dish) => Ok(dish),
            None => Err(does_not_exist(id).into()),
        }
    }
}

fn does_not_exist(id: &Id) -> validation::Error {
    let err = not_found(format!("Dish does not exist: {id}"));
    observe::rejected(RESOURCE, &err);
    err
}

fn validate(request: &Request<'_>, checks: &[Check]) -> Result<Draft, validation::Error> {
    validation::run(request, checks)
        .and_then(|()| Draft::from_payload(request.payload))
        .inspect_err(|err| observe::rejected(RESOURCE, err))
}
