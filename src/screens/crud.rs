//! Generic list screen: load, search, and mutate-then-refetch

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    format::matches_search,
    models::Record,
    repository::Resource,
};

use super::Notification;

pub struct CrudScreen<R: Resource> {
    resource: R,
    items: Vec<R::Record>,
    loading: bool,
    search: String,
    notification: Option<Notification>,
}

impl<R> CrudScreen<R>
where
    R: Resource,
    R::Record: Record,
    R::Payload: Validate,
{
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            items: Vec::new(),
            loading: false,
            search: String::new(),
            notification: None,
        }
    }

    /// Seed local state without fetching
    pub fn with_items(mut self, items: Vec<R::Record>) -> Self {
        self.items = items;
        self
    }

    pub fn items(&self) -> &[R::Record] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn find(&self, id: i64) -> Option<&R::Record> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Items matching the search box, accents and case ignored
    pub fn visible(&self) -> Vec<&R::Record> {
        self.items
            .iter()
            .filter(|item| matches_search(&item.search_text(), &self.search))
            .collect()
    }

    fn fail(&mut self, action: &str, err: AppError) -> AppError {
        tracing::error!("{} {} failed: {}", action, self.resource.name(), err);
        self.notification = Some(Notification::from(&err));
        err
    }

    /// Fetch the whole collection, replacing local state
    pub async fn load(&mut self) -> AppResult<()> {
        self.loading = true;
        let result = self.resource.list().await;
        self.loading = false;

        match result {
            Ok(items) => {
                tracing::debug!("Loaded {} {}", items.len(), self.resource.name());
                self.items = items;
                Ok(())
            }
            Err(e) => Err(self.fail("Loading", e)),
        }
    }

    pub async fn create(&mut self, payload: &R::Payload) -> AppResult<R::Record> {
        if let Err(errors) = payload.validate() {
            return Err(self.fail("Creating", AppError::from(errors)));
        }
        let record = match self.resource.create(payload).await {
            Ok(record) => record,
            Err(e) => return Err(self.fail("Creating", e)),
        };
        self.load().await?;
        self.notification = Some(Notification::success("Thêm mới thành công"));
        Ok(record)
    }

    pub async fn update(&mut self, id: i64, payload: &R::Payload) -> AppResult<R::Record> {
        if let Err(errors) = payload.validate() {
            return Err(self.fail("Updating", AppError::from(errors)));
        }
        let record = match self.resource.update(id, payload).await {
            Ok(record) => record,
            Err(e) => return Err(self.fail("Updating", e)),
        };
        self.load().await?;
        self.notification = Some(Notification::success("Cập nhật thành công"));
        Ok(record)
    }

    pub async fn delete(&mut self, id: i64) -> AppResult<()> {
        if let Err(e) = self.resource.delete(id).await {
            return Err(self.fail("Deleting", e));
        }
        self.load().await?;
        self.notification = Some(Notification::success("Xóa thành công"));
        Ok(())
    }
}
