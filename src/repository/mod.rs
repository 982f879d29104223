//! Repository layer over the hotel REST backend

pub mod auth;
pub mod bookings;
pub mod client;
pub mod rooms;
pub mod service_usages;
pub mod stats;

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    error::AppResult,
    models::{
        Booking, BookingPayload, Customer, CustomerPayload, Invoice, InvoicePayload, Room,
        RoomPayload, RoomType, RoomTypePayload, Service, ServicePayload, ServiceUsage,
        ServiceUsagePayload,
    },
};

pub use auth::AuthRepository;
pub use client::ApiClient;
pub use stats::StatsRepository;

pub type RoomsRepository = Collection<Room, RoomPayload>;
pub type RoomTypesRepository = Collection<RoomType, RoomTypePayload>;
pub type CustomersRepository = Collection<Customer, CustomerPayload>;
pub type BookingsRepository = Collection<Booking, BookingPayload>;
pub type ServicesRepository = Collection<Service, ServicePayload>;
pub type ServiceUsagesRepository = Collection<ServiceUsage, ServiceUsagePayload>;
pub type InvoicesRepository = Collection<Invoice, InvoicePayload>;

/// CRUD surface a list screen works against
#[async_trait]
pub trait Resource: Send + Sync {
    type Record: Send + Sync;
    type Payload: Send + Sync;

    /// Resource name for logs and notifications
    fn name(&self) -> &str;

    async fn list(&self) -> AppResult<Vec<Self::Record>>;
    async fn create(&self, payload: &Self::Payload) -> AppResult<Self::Record>;
    async fn update(&self, id: i64, payload: &Self::Payload) -> AppResult<Self::Record>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// REST collection at a fixed path: `GET /path`, `GET /path/{id}`,
/// `POST /path`, `PUT /path/{id}`, `DELETE /path/{id}`
pub struct Collection<T, P> {
    client: ApiClient,
    path: &'static str,
    _marker: PhantomData<fn() -> (T, P)>,
}

impl<T, P> Clone for Collection<T, P> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            path: self.path,
            _marker: PhantomData,
        }
    }
}

impl<T, P> Collection<T, P>
where
    T: DeserializeOwned,
    P: Serialize,
{
    pub fn new(client: ApiClient, path: &'static str) -> Self {
        Self {
            client,
            path,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    fn item_path(&self, id: i64) -> String {
        format!("{}/{}", self.path, id)
    }

    pub async fn list(&self) -> AppResult<Vec<T>> {
        self.client.get(self.path).await
    }

    pub async fn list_where<Q: Serialize + ?Sized>(&self, query: &Q) -> AppResult<Vec<T>> {
        self.client.get_with_query(self.path, query).await
    }

    pub async fn create(&self, payload: &P) -> AppResult<T> {
        self.client.post(self.path, payload).await
    }

    pub async fn update(&self, id: i64, payload: &P) -> AppResult<T> {
        self.client.put(&self.item_path(id), payload).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.client.delete(&self.item_path(id)).await
    }
}

#[async_trait]
impl<T, P> Resource for Collection<T, P>
where
    T: DeserializeOwned + Send + Sync,
    P: Serialize + Send + Sync,
{
    type Record = T;
    type Payload = P;

    fn name(&self) -> &str {
        self.path
    }

    async fn list(&self) -> AppResult<Vec<T>> {
        Collection::list(self).await
    }

    async fn create(&self, payload: &P) -> AppResult<T> {
        Collection::create(self, payload).await
    }

    async fn update(&self, id: i64, payload: &P) -> AppResult<T> {
        Collection::update(self, id, payload).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        Collection::delete(self, id).await
    }
}

/// Every backend resource around one shared client
#[derive(Clone)]
pub struct Repository {
    pub client: ApiClient,
    pub auth: AuthRepository,
    pub rooms: RoomsRepository,
    pub room_types: RoomTypesRepository,
    pub customers: CustomersRepository,
    pub bookings: BookingsRepository,
    pub services: ServicesRepository,
    pub service_usages: ServiceUsagesRepository,
    pub invoices: InvoicesRepository,
    pub stats: StatsRepository,
}

impl Repository {
    pub fn new(client: ApiClient) -> Self {
        Self {
            auth: AuthRepository::new(client.clone()),
            rooms: Collection::new(client.clone(), "rooms"),
            room_types: Collection::new(client.clone(), "room-types"),
            customers: Collection::new(client.clone(), "customers"),
            bookings: Collection::new(client.clone(), "bookings"),
            services: Collection::new(client.clone(), "services"),
            service_usages: Collection::new(client.clone(), "booking-services"),
            invoices: Collection::new(client.clone(), "invoices"),
            stats: StatsRepository::new(client.clone()),
            client,
        }
    }
}
