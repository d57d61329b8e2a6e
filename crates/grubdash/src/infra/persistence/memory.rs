use {
    super::{Entity, Error, Repository},
    crate::domain::Id,
    tokio::sync::RwLock,
};

/// A collection held in process memory. Lookups are linear scans which is
/// fine for the handful of entries a kitchen deals with.
#[derive(Debug)]
pub struct Memory<T> {
    items: RwLock<Vec<T>>,
}

impl<T> Default for Memory<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl<T: Entity> Repository<T> for Memory<T> {
    async fn list(&self) -> Result<Vec<T>, Error> {
        Ok(self.items.read().await.clone())
    }

    async fn get(&self, id: &Id) -> Result<Option<T>, Error> {
        Ok(self
            .items
            .read()
            .await
            .iter()
            .find(|item| item.id() == id)
            .cloned())
    }

    async fn create(&self, entity: T) -> Result<T, Error> {
        let mut items = self.items.write().await;
        if items.iter().any(|item| item.id() == entity.id()) {
            return Err(Error::Duplicate(entity.id().clone()));
        }
        items.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<Option<T>, Error> {
        let mut items = self.items.write().await;
        let Some(item) = items.iter_mut().find(|item| item.id() == entity.id()) else {
            return Ok(None);
        };
        *item = entity.clone();
        Ok(Some(entity))
    }

    async fn delete(&self, id: &Id) -> Result<Option<T>, Error> {
        let mut items = self.items.write().await;
        let Some(index) = items.iter().position(|item| item.id() == id) else {
            return Ok(None);
        };
        Ok(Some(items.remove(index)))
    }
}
