// ABOUTME: Firestore REST document store implementation
// ABOUTME: Typed-value codec plus per-document get/patch/delete over reqwest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! Firestore document store
//!
//! Speaks the Firestore REST API directly: one HTTP call per document
//! operation against
//! `{base}/projects/{project}/databases/(default)/documents/{collection}/{doc}`.
//! Firestore encodes field values with type wrappers (`stringValue`,
//! `doubleValue`, `mapValue`, ...); the codec here converts between that wire
//! form and plain `serde_json::Value` so the model types round-trip through
//! ordinary serde.

use crate::config::environment::StoreConfig;
use crate::constants::collections;
use crate::models::{AgeBucket, DailyRecord, GeoLocation, UserProfile};
use crate::recommendations::BucketRanges;
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::debug;

use super::HealthStore;

/// Timeout applied to a single document operation
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Page size when listing a collection (session wipe at startup)
const LIST_PAGE_SIZE: u32 = 300;

/// Firestore-backed document store
#[derive(Clone)]
pub struct FirestoreStore {
    client: Client,
    base_url: String,
    project_id: String,
    api_key: String,
}

impl std::fmt::Debug for FirestoreStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreStore")
            .field("base_url", &self.base_url)
            .field("project_id", &self.project_id)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// One document in a list response
#[derive(Debug, Deserialize)]
struct ListedDocument {
    name: String,
}

/// Collection list response page
#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<ListedDocument>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

impl FirestoreStore {
    /// Create a store from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| anyhow!("failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn documents_root(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            self.base_url, self.project_id
        )
    }

    fn document_url(&self, collection: &str, doc_id: &str) -> String {
        format!(
            "{}/{collection}/{doc_id}?key={}",
            self.documents_root(),
            self.api_key
        )
    }

    /// Fetch one document's fields as plain JSON, `None` on 404
    async fn get_document(&self, collection: &str, doc_id: &str) -> Result<Option<Value>> {
        let url = self.document_url(collection, doc_id);
        let response = self.client.get(&url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let body: Value = response.json().await?;
                let fields = body.get("fields").cloned().unwrap_or(json!({}));
                Ok(Some(decode_fields(&fields)?))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                bail!("firestore get {collection}/{doc_id} failed: {status}: {body}")
            }
        }
    }

    /// Create or replace one document from plain JSON fields
    async fn set_document(&self, collection: &str, doc_id: &str, data: &Value) -> Result<()> {
        let url = self.document_url(collection, doc_id);
        let body = json!({ "fields": encode_fields(data)? });
        let response = self.client.patch(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("firestore set {collection}/{doc_id} failed: {status}: {body}");
        }
        debug!("firestore set {collection}/{doc_id}");
        Ok(())
    }

    /// Delete one document; missing documents are not an error
    async fn delete_document(&self, collection: &str, doc_id: &str) -> Result<()> {
        let url = self.document_url(collection, doc_id);
        let response = self.client.delete(&url).send().await?;

        let status = response.status();
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            bail!("firestore delete {collection}/{doc_id} failed: {status}: {body}");
        }
        Ok(())
    }

    /// List every document id in a collection, following pagination
    async fn list_document_ids(&self, collection: &str) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = format!(
                "{}/{collection}?key={}&pageSize={LIST_PAGE_SIZE}",
                self.documents_root(),
                self.api_key
            );
            if let Some(token) = &page_token {
                url.push_str("&pageToken=");
                url.push_str(token);
            }

            let response = self.client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                bail!("firestore list {collection} failed: {status}: {body}");
            }

            let page: ListResponse = response.json().await?;
            for doc in page.documents {
                // Document names are full resource paths; the id is the last segment
                if let Some(id) = doc.name.rsplit('/').next() {
                    ids.push(id.to_owned());
                }
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(ids)
    }
}

/// Document id for a user's record on a given day
fn record_doc_id(uid: &str, date: NaiveDate) -> String {
    format!("{uid}_{date}")
}

#[async_trait]
impl HealthStore for FirestoreStore {
    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>> {
        let Some(value) = self.get_document(collections::PROFILES, uid).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_value(value)?))
    }

    async fn upsert_profile(&self, uid: &str, profile: &UserProfile) -> Result<()> {
        let value = serde_json::to_value(profile)?;
        self.set_document(collections::PROFILES, uid, &value).await
    }

    async fn get_daily_record(&self, uid: &str, date: NaiveDate) -> Result<Option<DailyRecord>> {
        let doc_id = record_doc_id(uid, date);
        let Some(value) = self.get_document(collections::RECORDS, &doc_id).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_value(value)?))
    }

    async fn upsert_daily_record(&self, uid: &str, record: &DailyRecord) -> Result<()> {
        let doc_id = record_doc_id(uid, record.date);
        let value = serde_json::to_value(record)?;
        self.set_document(collections::RECORDS, &doc_id, &value)
            .await
    }

    async fn get_location(&self, uid: &str) -> Result<Option<GeoLocation>> {
        let Some(value) = self.get_document(collections::LOCATIONS, uid).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_value(value)?))
    }

    async fn set_location(&self, uid: &str, location: &GeoLocation) -> Result<()> {
        let value = serde_json::to_value(location)?;
        self.set_document(collections::LOCATIONS, uid, &value).await
    }

    async fn put_session(&self, token: &str, uid: &str) -> Result<()> {
        let value = json!({ "uid": uid });
        self.set_document(collections::SESSIONS, token, &value)
            .await
    }

    async fn get_session(&self, token: &str) -> Result<Option<String>> {
        let Some(value) = self.get_document(collections::SESSIONS, token).await? else {
            return Ok(None);
        };
        Ok(value
            .get("uid")
            .and_then(Value::as_str)
            .map(std::borrow::ToOwned::to_owned))
    }

    async fn clear_sessions(&self) -> Result<()> {
        let ids = self.list_document_ids(collections::SESSIONS).await?;
        let count = ids.len();
        for id in ids {
            self.delete_document(collections::SESSIONS, &id).await?;
        }
        debug!("cleared {count} session documents");
        Ok(())
    }

    async fn get_bucket_ranges(&self, bucket: AgeBucket) -> Result<Option<BucketRanges>> {
        let Some(value) = self
            .get_document(collections::RECOMMENDED, bucket.as_str())
            .await?
        else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_value(value)?))
    }
}

// ============================================================================
// Value codec
// ============================================================================

/// Encode a plain JSON object into Firestore `fields`
fn encode_fields(data: &Value) -> Result<Value> {
    let Value::Object(map) = data else {
        bail!("document body must be a JSON object");
    };

    let mut fields = Map::new();
    for (key, value) in map {
        fields.insert(key.clone(), encode_value(value));
    }
    Ok(Value::Object(fields))
}

/// Encode one plain JSON value into a typed Firestore value
fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => n.as_i64().map_or_else(
            || json!({ "doubleValue": n.as_f64() }),
            // Firestore carries integers as decimal strings
            |i| json!({ "integerValue": i.to_string() }),
        ),
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => {
            let mut fields = Map::new();
            for (key, inner) in map {
                fields.insert(key.clone(), encode_value(inner));
            }
            json!({ "mapValue": { "fields": fields } })
        }
    }
}

/// Decode Firestore `fields` into a plain JSON object
fn decode_fields(fields: &Value) -> Result<Value> {
    let Value::Object(map) = fields else {
        bail!("firestore fields must be an object");
    };

    let mut out = Map::new();
    for (key, value) in map {
        out.insert(key.clone(), decode_value(value)?);
    }
    Ok(Value::Object(out))
}

/// Decode one typed Firestore value into plain JSON
fn decode_value(value: &Value) -> Result<Value> {
    let Value::Object(map) = value else {
        bail!("firestore value must be an object wrapper");
    };

    let (kind, inner) = map
        .iter()
        .next()
        .ok_or_else(|| anyhow!("empty firestore value wrapper"))?;

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => Ok(inner.clone()),
        "integerValue" => {
            let text = inner
                .as_str()
                .ok_or_else(|| anyhow!("integerValue must be a string"))?;
            let parsed: i64 = text.parse()?;
            Ok(json!(parsed))
        }
        "doubleValue" => Ok(inner.clone()),
        "stringValue" | "timestampValue" | "referenceValue" => Ok(inner.clone()),
        "arrayValue" => {
            let items = inner.get("values").and_then(Value::as_array);
            let mut out = Vec::new();
            if let Some(items) = items {
                for item in items {
                    out.push(decode_value(item)?);
                }
            }
            Ok(Value::Array(out))
        }
        "mapValue" => {
            let fields = inner.get("fields").cloned().unwrap_or(json!({}));
            decode_fields(&fields)
        }
        other => bail!("unsupported firestore value kind: {other}"),
    }
}
