//! Database operations for property listings
//!
//! Images and amenities are stored as JSON arrays in TEXT columns.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::shared::listing::{
    CreatePropertyRequest, Property, PropertyQuery, PropertySort, PropertySummary, PropertyType,
};

pub(crate) const PROPERTY_COLUMNS: &str = "id, landlord_id, title, description, price, address, city, \
     property_type, bedrooms, bathrooms, area_sqm, furnished, available_from, images, amenities, \
     latitude, longitude, created_at, updated_at";

fn decode_json_list(row: &SqliteRow, column: &str) -> Result<Vec<String>, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    serde_json::from_str(&raw).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

fn encode_json_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

/// Map a `properties` row
pub fn property_from_row(row: &SqliteRow) -> Result<Property, sqlx::Error> {
    let property_type: String = row.try_get("property_type")?;

    Ok(Property {
        id: row.try_get("id")?,
        landlord_id: row.try_get("landlord_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        address: row.try_get("address")?,
        city: row.try_get("city")?,
        property_type: PropertyType::from_str(&property_type)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        bedrooms: row.try_get("bedrooms")?,
        bathrooms: row.try_get("bathrooms")?,
        area_sqm: row.try_get("area_sqm")?,
        furnished: row.try_get("furnished")?,
        available_from: row.try_get("available_from")?,
        images: decode_json_list(row, "images")?,
        amenities: decode_json_list(row, "amenities")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Create a listing owned by `landlord_id`
pub async fn insert_property(
    pool: &SqlitePool,
    landlord_id: Uuid,
    request: CreatePropertyRequest,
) -> Result<Property, sqlx::Error> {
    let now = Utc::now();
    let property = Property {
        id: Uuid::new_v4(),
        landlord_id,
        title: request.title.trim().to_string(),
        description: request.description,
        price: request.price,
        address: request.address,
        city: request.city.trim().to_string(),
        property_type: request.property_type,
        bedrooms: request.bedrooms,
        bathrooms: request.bathrooms,
        area_sqm: request.area_sqm,
        furnished: request.furnished,
        available_from: request.available_from,
        images: request.images,
        amenities: request.amenities,
        latitude: request.latitude,
        longitude: request.longitude,
        created_at: now,
        updated_at: now,
    };

    let query = format!(
        "INSERT INTO properties ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        PROPERTY_COLUMNS
    );
    sqlx::query(&query)
        .bind(property.id)
        .bind(property.landlord_id)
        .bind(&property.title)
        .bind(&property.description)
        .bind(property.price)
        .bind(&property.address)
        .bind(&property.city)
        .bind(property.property_type.as_str())
        .bind(property.bedrooms)
        .bind(property.bathrooms)
        .bind(property.area_sqm)
        .bind(property.furnished)
        .bind(property.available_from)
        .bind(encode_json_list(&property.images))
        .bind(encode_json_list(&property.amenities))
        .bind(property.latitude)
        .bind(property.longitude)
        .bind(property.created_at)
        .bind(property.updated_at)
        .execute(pool)
        .await?;

    Ok(property)
}

/// Get a listing by ID
pub async fn get_property<'e, E>(executor: E, id: Uuid) -> Result<Option<Property>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let query = format!("SELECT {} FROM properties WHERE id = ?", PROPERTY_COLUMNS);
    let row = sqlx::query(&query).bind(id).fetch_optional(executor).await?;
    row.as_ref().map(property_from_row).transpose()
}

/// Persist every mutable field of a listing
pub async fn save_property(pool: &SqlitePool, property: &Property) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE properties
        SET title = ?, description = ?, price = ?, address = ?, city = ?, property_type = ?,
            bedrooms = ?, bathrooms = ?, area_sqm = ?, furnished = ?, available_from = ?,
            images = ?, amenities = ?, latitude = ?, longitude = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&property.title)
    .bind(&property.description)
    .bind(property.price)
    .bind(&property.address)
    .bind(&property.city)
    .bind(property.property_type.as_str())
    .bind(property.bedrooms)
    .bind(property.bathrooms)
    .bind(property.area_sqm)
    .bind(property.furnished)
    .bind(property.available_from)
    .bind(encode_json_list(&property.images))
    .bind(encode_json_list(&property.amenities))
    .bind(property.latitude)
    .bind(property.longitude)
    .bind(property.updated_at)
    .bind(property.id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a listing
///
/// Favorites, conversations (and their messages), views and reviews of the
/// listing go with it.
pub async fn delete_property(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM properties WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// All listings owned by a landlord, newest first
pub async fn list_properties_for_landlord(pool: &SqlitePool, landlord_id: Uuid) -> Result<Vec<Property>, sqlx::Error> {
    let query = format!(
        "SELECT {} FROM properties WHERE landlord_id = ? ORDER BY created_at DESC, rowid DESC",
        PROPERTY_COLUMNS
    );
    let rows = sqlx::query(&query).bind(landlord_id).fetch_all(pool).await?;
    rows.iter().map(property_from_row).collect()
}

/// Wrap free text in `%...%`, escaping LIKE wildcards with `\`
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn push_filters<'args>(builder: &mut QueryBuilder<'args, Sqlite>, query: &PropertyQuery) {
    builder.push(" WHERE 1 = 1");

    if let Some(q) = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        let pattern = contains_pattern(q);
        builder
            .push(" AND (title LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR description LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR address LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
    if let Some(city) = query.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        builder.push(" AND city = ").push_bind(city.to_string()).push(" COLLATE NOCASE");
    }
    if let Some(min_price) = query.min_price {
        builder.push(" AND price >= ").push_bind(min_price);
    }
    if let Some(max_price) = query.max_price {
        builder.push(" AND price <= ").push_bind(max_price);
    }
    if let Some(min_bedrooms) = query.min_bedrooms {
        builder.push(" AND bedrooms >= ").push_bind(min_bedrooms);
    }
    if let Some(property_type) = query.property_type {
        builder.push(" AND property_type = ").push_bind(property_type.as_str());
    }
    if let Some(furnished) = query.furnished {
        builder.push(" AND furnished = ").push_bind(furnished);
    }
}

/// Search listings
///
/// # Returns
/// One page of matching listings and the total number of matches
pub async fn search_properties(
    pool: &SqlitePool,
    query: &PropertyQuery,
) -> Result<(Vec<Property>, i64), sqlx::Error> {
    let mut count_builder: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM properties");
    push_filters(&mut count_builder, query);
    let total = count_builder.build_query_scalar::<i64>().fetch_one(pool).await?;

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {} FROM properties", PROPERTY_COLUMNS));
    push_filters(&mut builder, query);
    builder.push(match query.sort {
        PropertySort::Newest => " ORDER BY created_at DESC, rowid DESC",
        PropertySort::PriceAsc => " ORDER BY price ASC, created_at DESC",
        PropertySort::PriceDesc => " ORDER BY price DESC, created_at DESC",
    });
    builder
        .push(" LIMIT ")
        .push_bind(i64::from(query.limit()))
        .push(" OFFSET ")
        .push_bind(query.offset());

    let rows = builder.build().fetch_all(pool).await?;
    let properties = rows.iter().map(property_from_row).collect::<Result<Vec<_>, _>>()?;

    Ok((properties, total))
}

/// Record that a listing was viewed
pub async fn record_view(pool: &SqlitePool, property_id: Uuid, viewer_id: Option<Uuid>) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO property_views (id, property_id, viewer_id, created_at) VALUES (?, ?, ?, ?)")
        .bind(Uuid::new_v4())
        .bind(property_id)
        .bind(viewer_id)
        .bind(Utc::now())
        .execute(pool)
        .await?;
    Ok(())
}

/// Distinct listings a user viewed most recently, newest first
pub async fn recently_viewed(pool: &SqlitePool, viewer_id: Uuid, limit: i64) -> Result<Vec<PropertySummary>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {cols}
        FROM properties p
        INNER JOIN (
            SELECT property_id, MAX(created_at) AS last_viewed
            FROM property_views
            WHERE viewer_id = ?
            GROUP BY property_id
        ) v ON v.property_id = p.id
        ORDER BY v.last_viewed DESC
        LIMIT ?
        "#,
        cols = PROPERTY_COLUMNS
            .split(", ")
            .map(|c| format!("p.{}", c.trim()))
            .collect::<Vec<_>>()
            .join(", ")
    );
    let rows = sqlx::query(&query).bind(viewer_id).bind(limit).fetch_all(pool).await?;
    rows.iter()
        .map(|row| property_from_row(row).map(|p| p.summary()))
        .collect()
}
