//! Vehicle listing: the primary tenant-owned resource.
//!
//! Handlers speak [`VehicleRequest`]/[`VehicleResponse`] DTOs; the entity
//! itself never crosses the API boundary. Mapping between the two is
//! explicit and lives here, next to the types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::{DealershipId, VehicleId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleCondition {
    New,
    Used,
    CertifiedPreOwned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Transmission {
    Automatic,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BodyType {
    Sedan,
    Suv,
    Truck,
    Coupe,
    Hatchback,
    Van,
    Convertible,
}

/// Listing lifecycle. New listings always start `Available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    Available,
    Sold,
    Pending,
}

/// Photo attached to a listing, ordered by `display_order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleImage {
    pub image_url: String,
    pub display_order: u32,
    pub primary: bool,
}

/// A vehicle listing owned by one dealership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    /// Owning tenant. Set once at creation from the request context,
    /// never from client input.
    pub dealership_id: DealershipId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: Decimal,
    pub mileage: u32,
    pub vin: Option<String>,
    pub condition: VehicleCondition,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub body_type: BodyType,
    pub exterior_color: String,
    pub interior_color: Option<String>,
    pub description: Option<String>,
    pub featured: bool,
    pub status: VehicleStatus,
    pub images: Vec<VehicleImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inbound listing payload for create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequest {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: Decimal,
    pub mileage: u32,
    pub vin: Option<String>,
    pub condition: VehicleCondition,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub body_type: BodyType,
    pub exterior_color: String,
    pub interior_color: Option<String>,
    pub description: Option<String>,
    pub featured: Option<bool>,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2026;
const MAX_MILEAGE: u32 = 1_000_000;

impl VehicleRequest {
    /// Structural validation of the payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), Error> {
        if self.make.trim().is_empty() {
            return Err(Error::Validation {
                field: "make",
                message: "is required".to_string(),
            });
        }
        if self.model.trim().is_empty() {
            return Err(Error::Validation {
                field: "model",
                message: "is required".to_string(),
            });
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(Error::Validation {
                field: "year",
                message: format!("must be between {MIN_YEAR} and {MAX_YEAR}"),
            });
        }
        if self.price <= Decimal::ZERO {
            return Err(Error::Validation {
                field: "price",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.mileage > MAX_MILEAGE {
            return Err(Error::Validation {
                field: "mileage",
                message: format!("exceeds maximum of {MAX_MILEAGE}"),
            });
        }
        if self.exterior_color.trim().is_empty() {
            return Err(Error::Validation {
                field: "exteriorColor",
                message: "is required".to_string(),
            });
        }
        Ok(())
    }

    /// Builds a new listing for `dealership_id` from this payload.
    ///
    /// Status is forced to `Available` regardless of anything the client
    /// sent; lifecycle transitions go through update endpoints.
    #[must_use]
    pub fn into_vehicle(self, dealership_id: DealershipId, now: DateTime<Utc>) -> Vehicle {
        let images = Self::images_from_urls(&self.image_urls);
        Vehicle {
            id: VehicleId::new(),
            dealership_id,
            make: self.make,
            model: self.model,
            year: self.year,
            price: self.price,
            mileage: self.mileage,
            vin: self.vin,
            condition: self.condition,
            transmission: self.transmission,
            fuel_type: self.fuel_type,
            body_type: self.body_type,
            exterior_color: self.exterior_color,
            interior_color: self.interior_color,
            description: self.description,
            featured: self.featured.unwrap_or(false),
            status: VehicleStatus::Available,
            images,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies this payload to an existing listing in place.
    ///
    /// Ownership, id, status, and creation time are untouched. An absent
    /// `featured` keeps the stored flag.
    pub fn apply_to(self, vehicle: &mut Vehicle, now: DateTime<Utc>) {
        vehicle.make = self.make;
        vehicle.model = self.model;
        vehicle.year = self.year;
        vehicle.price = self.price;
        vehicle.mileage = self.mileage;
        vehicle.vin = self.vin;
        vehicle.condition = self.condition;
        vehicle.transmission = self.transmission;
        vehicle.fuel_type = self.fuel_type;
        vehicle.body_type = self.body_type;
        vehicle.exterior_color = self.exterior_color;
        vehicle.interior_color = self.interior_color;
        vehicle.description = self.description;
        if let Some(featured) = self.featured {
            vehicle.featured = featured;
        }
        if !self.image_urls.is_empty() {
            vehicle.images = Self::images_from_urls(&self.image_urls);
        }
        vehicle.updated_at = now;
    }

    fn images_from_urls(urls: &[String]) -> Vec<VehicleImage> {
        urls.iter()
            .enumerate()
            .map(|(i, url)| VehicleImage {
                image_url: url.clone(),
                display_order: u32::try_from(i).unwrap_or(u32::MAX),
                primary: i == 0,
            })
            .collect()
    }
}

/// Outbound listing representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: VehicleId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: Decimal,
    pub mileage: u32,
    pub vin: Option<String>,
    pub condition: VehicleCondition,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub body_type: BodyType,
    pub exterior_color: String,
    pub interior_color: Option<String>,
    pub description: Option<String>,
    pub featured: bool,
    pub status: VehicleStatus,
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(v: Vehicle) -> Self {
        let image_urls = v.images.iter().map(|i| i.image_url.clone()).collect();
        Self {
            id: v.id,
            make: v.make,
            model: v.model,
            year: v.year,
            price: v.price,
            mileage: v.mileage,
            vin: v.vin,
            condition: v.condition,
            transmission: v.transmission,
            fuel_type: v.fuel_type,
            body_type: v.body_type,
            exterior_color: v.exterior_color,
            interior_color: v.interior_color,
            description: v.description,
            featured: v.featured,
            status: v.status,
            image_urls,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}
