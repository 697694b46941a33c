use reqwest::Method;

use super::{Client, MaybeEnveloped};
use crate::error::Result;
use crate::types::{
    Ack, AssignOrderPayload, Envelope, Order, UpdateOrderPayload, User, Vehicle, VehiclePayload,
};

// =============================================================================
// Users API
// =============================================================================

/// Users API client.
#[derive(Debug)]
pub struct UsersApi<'a> {
    pub(super) client: &'a Client,
}

impl UsersApi<'_> {
    /// List all users.
    pub async fn list(&self) -> Result<Vec<User>> {
        let request = self.client.request(Method::GET, "/api/users")?;
        let users: MaybeEnveloped<Vec<User>> = Client::send(request).await?;
        Ok(users.into_inner())
    }
}

// =============================================================================
// Vehicles API
// =============================================================================

/// Vehicles API client.
#[derive(Debug)]
pub struct VehiclesApi<'a> {
    pub(super) client: &'a Client,
}

impl VehiclesApi<'_> {
    /// List all vehicles.
    pub async fn list(&self) -> Result<Vec<Vehicle>> {
        let request = self.client.request(Method::GET, "/api/vehicles")?;
        let envelope: Envelope<Vec<Vehicle>> = Client::send(request).await?;
        Ok(envelope.data)
    }

    /// Get a vehicle by ID.
    pub async fn get(&self, id: i64) -> Result<Vehicle> {
        let request = self
            .client
            .request(Method::GET, &format!("/api/vehicles/{id}"))?;
        let envelope: Envelope<Vehicle> = Client::send(request).await?;
        Ok(envelope.data)
    }

    pub async fn create(&self, payload: &VehiclePayload) -> Result<Ack> {
        let request = self.client.request(Method::POST, "/api/vehicles")?.json(payload);
        Client::send(request).await
    }

    pub async fn update(&self, id: i64, payload: &VehiclePayload) -> Result<Ack> {
        let request = self
            .client
            .request(Method::PUT, &format!("/api/vehicles/{id}"))?
            .json(payload);
        Client::send(request).await
    }

    pub async fn delete(&self, id: i64) -> Result<Ack> {
        let request = self
            .client
            .request(Method::DELETE, &format!("/api/vehicles/{id}"))?;
        Client::send(request).await
    }
}

// =============================================================================
// Orders API
// =============================================================================

/// Orders API client.
#[derive(Debug)]
pub struct OrdersApi<'a> {
    pub(super) client: &'a Client,
}

impl OrdersApi<'_> {
    /// List all orders.
    pub async fn list(&self) -> Result<Vec<Order>> {
        let request = self.client.request(Method::GET, "/api/orders")?;
        let orders: MaybeEnveloped<Vec<Order>> = Client::send(request).await?;
        Ok(orders.into_inner())
    }

    /// Get an order by ID.
    pub async fn get(&self, id: i64) -> Result<Order> {
        let request = self.client.request(Method::GET, &format!("/api/orders/{id}"))?;
        let order: MaybeEnveloped<Order> = Client::send(request).await?;
        Ok(order.into_inner())
    }

    pub async fn update(&self, id: i64, payload: &UpdateOrderPayload) -> Result<Ack> {
        let request = self
            .client
            .request(Method::PUT, &format!("/api/orders/{id}"))?
            .json(payload);
        Client::send(request).await
    }

    /// Assign a driver and a vehicle to an order.
    pub async fn assign(&self, id: i64, user_id: i64, vehicle_id: i64) -> Result<Ack> {
        let payload = AssignOrderPayload {
            user_id,
            vehicle_id,
        };
        let request = self
            .client
            .request(Method::PATCH, &format!("/api/orders/{id}"))?
            .json(&payload);
        Client::send(request).await
    }
}
