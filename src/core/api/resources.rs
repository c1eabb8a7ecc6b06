//! Resource catalogue: public listing with filters, owner-side management
//!
//! Creation and edition go out as `multipart/form-data` so the main image
//! can travel with the text fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DEFAULT_PAGE_SIZE, Page, validate_pagination};
use crate::core::auth::TokenStorage;
use crate::core::error::SessionError;
use crate::core::http::{ApiRequest, AuthClient, FormPart, HttpTransport};

const MAX_NAME_LENGTH: usize = 100;
const MAX_DESCRIPTION_LENGTH: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceKind {
    Room,
    Equipment,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Room => "ROOM",
            ResourceKind::Equipment => "EQUIPMENT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Room => "Salle",
            ResourceKind::Equipment => "Équipement",
        }
    }
}

/// Billing period of a resource price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceUnit {
    Hour,
    Day,
    Week,
    Month,
}

impl PriceUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceUnit::Hour => "HOUR",
            PriceUnit::Day => "DAY",
            PriceUnit::Week => "WEEK",
            PriceUnit::Month => "MONTH",
        }
    }

    /// Abbreviation shown after a price
    pub fn short_label(&self) -> &'static str {
        match self {
            PriceUnit::Hour => "h",
            PriceUnit::Day => "j",
            PriceUnit::Week => "sem.",
            PriceUnit::Month => "mois",
        }
    }

    /// Length of one billed period in hours (a month counts 30 days)
    pub fn hours(&self) -> f64 {
        match self {
            PriceUnit::Hour => 1.0,
            PriceUnit::Day => 24.0,
            PriceUnit::Week => 24.0 * 7.0,
            PriceUnit::Month => 24.0 * 30.0,
        }
    }

    /// Cost of a booking of `duration_hours`; started periods are billed in full
    /// except for hourly prices
    pub fn cost(&self, price: f64, duration_hours: f64) -> f64 {
        match self {
            PriceUnit::Hour => duration_hours * price,
            unit => (duration_hours / unit.hours()).ceil() * price,
        }
    }
}

/// Contact details of the owner, included on catalogue entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceOwner {
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

/// A bookable room or piece of equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub owner: Option<ResourceOwner>,
    pub price: f64,
    pub price_unit: PriceUnit,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// URL of the uploaded picture
    #[serde(default)]
    pub main_image: Option<String>,
}

impl Resource {
    /// "12.50 € / h"
    pub fn price_label(&self) -> String {
        format!("{:.2} € / {}", self.price, self.price_unit.short_label())
    }

    /// "Lyon, France", skipping missing parts
    pub fn location(&self) -> String {
        [&self.city, &self.country]
            .into_iter()
            .filter_map(|part| part.as_deref().map(str::trim).filter(|p| !p.is_empty()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Catalogue filters; only set fields end up in the query string
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceFilter {
    pub search: Option<String>,
    pub kind: Option<ResourceKind>,
    pub city: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl Default for ResourceFilter {
    fn default() -> Self {
        Self {
            search: None,
            kind: None,
            city: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ResourceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn kind(mut self, kind: ResourceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Reset to the first page, e.g. after a filter change
    pub fn first_page(mut self) -> Self {
        self.page = 1;
        self
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        validate_pagination(self.page, self.limit)
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();

        if let Some(search) = non_blank(&self.search) {
            query.push(("search".to_string(), search.to_string()));
        }
        if let Some(kind) = self.kind {
            query.push(("type".to_string(), kind.as_str().to_string()));
        }
        if let Some(city) = non_blank(&self.city) {
            query.push(("city".to_string(), city.to_string()));
        }
        query.push(("page".to_string(), self.page.to_string()));
        query.push(("limit".to_string(), self.limit.to_string()));

        query
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Picture uploaded with a resource
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceImage {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ResourceImage {
    fn into_part(self) -> FormPart {
        FormPart::File {
            name: "mainImage".to_string(),
            file_name: self.file_name,
            mime: self.mime,
            bytes: self.bytes,
        }
    }
}

/// Owner-side creation payload
#[derive(Debug, Clone, PartialEq)]
pub struct NewResource {
    pub name: String,
    pub kind: ResourceKind,
    pub description: Option<String>,
    pub price: f64,
    pub price_unit: PriceUnit,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub main_image: Option<ResourceImage>,
}

impl NewResource {
    pub fn validate(&self) -> Result<(), SessionError> {
        validate_name(&self.name)?;
        validate_description(self.description.as_deref())?;
        validate_price(self.price)
    }

    pub fn to_form(&self) -> Vec<FormPart> {
        ResourceUpdate {
            name: Some(self.name.clone()),
            kind: Some(self.kind),
            description: self.description.clone(),
            price: Some(self.price),
            price_unit: Some(self.price_unit),
            country: self.country.clone(),
            city: self.city.clone(),
            address: self.address.clone(),
            main_image: self.main_image.clone(),
        }
        .to_form()
    }
}

/// Partial update; unset fields are left untouched by the backend
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceUpdate {
    pub name: Option<String>,
    pub kind: Option<ResourceKind>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub price_unit: Option<PriceUnit>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub main_image: Option<ResourceImage>,
}

impl ResourceUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        if self.is_empty() {
            return Err(SessionError::Validation("Aucune modification.".to_string()));
        }
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        validate_description(self.description.as_deref())?;
        match self.price {
            Some(price) => validate_price(price),
            None => Ok(()),
        }
    }

    /// Form fields in backend order; empty text fields are left out
    pub fn to_form(&self) -> Vec<FormPart> {
        let mut parts = Vec::new();
        let mut text = |name: &str, value: Option<&str>| {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                parts.push(FormPart::text(name, value));
            }
        };

        text("name", self.name.as_deref());
        text("type", self.kind.map(|k| k.as_str()));
        text("description", self.description.as_deref());
        text("price", self.price.map(|p| p.to_string()).as_deref());
        text("priceUnit", self.price_unit.map(|u| u.as_str()));
        text("country", self.country.as_deref());
        text("city", self.city.as_deref());
        text("address", self.address.as_deref());

        if let Some(image) = self.main_image.clone() {
            parts.push(image.into_part());
        }
        parts
    }
}

fn validate_name(name: &str) -> Result<(), SessionError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SessionError::Validation("Le nom est obligatoire.".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(SessionError::Validation(format!(
            "Le nom ne peut pas dépasser {} caractères.",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> Result<(), SessionError> {
    if description.is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LENGTH) {
        return Err(SessionError::Validation(format!(
            "La description ne peut pas dépasser {} caractères.",
            MAX_DESCRIPTION_LENGTH
        )));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), SessionError> {
    if price < 0.0 || !price.is_finite() {
        return Err(SessionError::Validation(
            "Le prix doit être positif.".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn item_path(collection: &str, id: &str) -> Result<String, SessionError> {
    if id.trim().is_empty() || id.contains('/') {
        return Err(SessionError::Validation(format!("Identifiant invalide : {:?}", id)));
    }
    Ok(format!("{}/{}", collection, id))
}

/// Resource endpoints
pub struct ResourcesApi<'a, S, T> {
    client: &'a AuthClient<S, T>,
}

impl<'a, S: TokenStorage, T: HttpTransport> ResourcesApi<'a, S, T> {
    pub fn new(client: &'a AuthClient<S, T>) -> Self {
        Self { client }
    }

    /// Public catalogue
    pub async fn list(&self, filter: &ResourceFilter) -> Result<Page<Resource>, SessionError> {
        filter.validate()?;
        let request = ApiRequest::get("/resources").with_query(filter.to_query());
        self.client.send_json(request).await
    }

    /// Resources owned by the current user
    pub async fn list_mine(&self, filter: &ResourceFilter) -> Result<Page<Resource>, SessionError> {
        filter.validate()?;
        let request = ApiRequest::get("/resources/mine").with_query(filter.to_query());
        self.client.send_json(request).await
    }

    pub async fn get(&self, id: &str) -> Result<Resource, SessionError> {
        let request = ApiRequest::get(item_path("/resources", id)?);
        self.client.send_json(request).await
    }

    pub async fn create(&self, resource: &NewResource) -> Result<Resource, SessionError> {
        resource.validate()?;
        let request = ApiRequest::post("/resources").multipart(resource.to_form());
        let created: Resource = self.client.send_json(request).await?;
        tracing::info!("Resource {} created", created.id);
        Ok(created)
    }

    pub async fn update(&self, id: &str, update: &ResourceUpdate) -> Result<Resource, SessionError> {
        update.validate()?;
        let request = ApiRequest::patch(item_path("/resources", id)?).multipart(update.to_form());
        self.client.send_json(request).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), SessionError> {
        let request = ApiRequest::delete(item_path("/resources", id)?);
        self.client.send_empty(request).await?;
        tracing::info!("Resource {} deleted", id);
        Ok(())
    }
}
