//! Core marketplace types shared by generators and storage.

use serde::{Deserialize, Serialize};

/// Storage-assigned identifier. Sequential, starting at 1 after a reset.
pub type Id = i64;

/// Account status options matching the `users.status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
    Banned,
}

impl UserStatus {
    pub const ALL: [UserStatus; 3] = [UserStatus::Active, UserStatus::Inactive, UserStatus::Banned];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Banned => "banned",
        }
    }
}

/// Item condition options matching the `listings.condition` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCondition {
    New,
    Good,
    Worn,
}

impl ItemCondition {
    pub const ALL: [ItemCondition; 3] = [ItemCondition::New, ItemCondition::Good, ItemCondition::Worn];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCondition::New => "new",
            ItemCondition::Good => "good",
            ItemCondition::Worn => "worn",
        }
    }
}

/// Listing lifecycle options matching the `listings.status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Active,
    Sold,
    Expired,
}

impl ListingStatus {
    pub const ALL: [ListingStatus; 3] = [
        ListingStatus::Active,
        ListingStatus::Sold,
        ListingStatus::Expired,
    ];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::Sold => "sold",
            ListingStatus::Expired => "expired",
        }
    }
}

/// Delivery state options matching the `shipping.status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingStatus {
    Shipped,
    Delivered,
    Failed,
}

impl ShippingStatus {
    pub const ALL: [ShippingStatus; 3] = [
        ShippingStatus::Shipped,
        ShippingStatus::Delivered,
        ShippingStatus::Failed,
    ];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingStatus::Shipped => "shipped",
            ShippingStatus::Delivered => "delivered",
            ShippingStatus::Failed => "failed",
        }
    }
}

/// Reasons a user can give when reporting a listing.
pub const REPORT_REASONS: [&str; 6] = [
    "Scam suspicion",
    "Fake brand",
    "Offensive content",
    "Broken item",
    "Wrong category",
    "Price manipulation",
];

/// Category names seeded by default.
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Shoes",
    "Bags",
    "Dresses",
    "Tops",
    "Pants",
    "Jackets",
    "Accessories",
    "Hats",
    "Jewelry",
    "Activewear",
];

/// A committed transaction as later stages need to see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionRef {
    pub id: Id,
    pub seller_id: Id,
}
