//! `Dragonfly` (Redis-compatible) document store.
//!
//! Documents are stored as JSON strings, one key per document, with a set
//! per collection indexing its keys. Merges and batches run as Lua scripts
//! so each is atomic on the server.
//!
//! # Key Patterns
//!
//! | Pattern | Type | Description |
//! |---------|------|-------------|
//! | `{ns}:{collection}:{id}` | JSON | One document |
//! | `{ns}:{collection}:ids` | Set | Keys of every document in the collection |
//!
//! Every round-trip is bounded by the configured request timeout.

use std::future::Future;
use std::time::Duration;

use fred::interfaces::LuaInterface;
use fred::prelude::*;
use serde_json::json;

use crate::codec::parse_document;
use crate::error::DbError;
use crate::store::{Collection, Document, DocumentStore, Mutation};

/// Merge `ARGV[1]` (a JSON object) into the document at `KEYS[1]`.
///
/// Returns 1 on success, 0 when the document does not exist.
const MERGE_SCRIPT: &str = r"
local raw = redis.call('GET', KEYS[1])
if not raw then
  return 0
end
local doc = cjson.decode(raw)
for field, value in pairs(cjson.decode(ARGV[1])) do
  doc[field] = value
end
redis.call('SET', KEYS[1], cjson.encode(doc))
return 1
";

/// Apply the batch encoded in `ARGV[1]`.
///
/// Operation `i` (1-based) owns `KEYS[2i-1]` (document) and `KEYS[2i]`
/// (collection index). Returns 0 without writing when a removal target is
/// missing, 1 once every operation is applied.
const COMMIT_SCRIPT: &str = r"
local ops = cjson.decode(ARGV[1])
for i, op in ipairs(ops) do
  if op.op == 'remove' and redis.call('EXISTS', KEYS[2 * i - 1]) == 0 then
    return 0
  end
end
for i, op in ipairs(ops) do
  local doc_key = KEYS[2 * i - 1]
  local index_key = KEYS[2 * i]
  if op.op == 'put' then
    redis.call('SET', doc_key, op.doc)
    redis.call('SADD', index_key, op.id)
  elseif op.op == 'remove' then
    redis.call('DEL', doc_key)
    redis.call('SREM', index_key, op.id)
  elseif op.op == 'adjust' then
    local raw = redis.call('GET', doc_key)
    if raw then
      local doc = cjson.decode(raw)
      local next_value = (tonumber(doc[op.field]) or 0) + op.delta
      if next_value < 0 then
        next_value = 0
      end
      doc[op.field] = next_value
      redis.call('SET', doc_key, cjson.encode(doc))
    end
  end
end
return 1
";

/// Connection handle to a `Dragonfly` instance holding feed documents.
///
/// Wraps a [`fred::prelude::Client`]. Cloning shares the connection.
#[derive(Clone)]
pub struct DragonflyStore {
    client: Client,
    namespace: String,
    timeout: Duration,
}

impl DragonflyStore {
    /// Connect to `Dragonfly` at the given URL.
    ///
    /// The URL should follow the Redis URL scheme:
    /// `redis://host:port` or `redis://host:port/db`. All keys are prefixed
    /// with `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the URL cannot be parsed.
    /// Returns [`DbError::Dragonfly`] if the connection fails.
    pub async fn connect(url: &str, namespace: &str, timeout: Duration) -> Result<Self, DbError> {
        let config = Config::from_url(url)
            .map_err(|e| DbError::Config(format!("Invalid Dragonfly URL: {e}")))?;

        let client = Builder::from_config(config).build()?;
        client.init().await?;

        tracing::info!(namespace, ?timeout, "Connected to Dragonfly");
        Ok(Self {
            client,
            namespace: namespace.to_owned(),
            timeout,
        })
    }

    fn document_key(&self, collection: Collection, id: &str) -> String {
        format!("{}:{}:{id}", self.namespace, collection.as_str())
    }

    fn index_key(&self, collection: Collection) -> String {
        format!("{}:{}:ids", self.namespace, collection.as_str())
    }

    /// Await `request`, failing with [`DbError::Timeout`] once the request
    /// timeout elapses.
    async fn bounded<T>(
        &self,
        operation: &str,
        request: impl Future<Output = Result<T, fred::error::Error>>,
    ) -> Result<T, DbError> {
        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => Ok(result?),
            Err(elapsed) => Err(DbError::Timeout(format!("{operation}: {elapsed}"))),
        }
    }

    /// Delete every document under this store's namespace.
    ///
    /// **WARNING:** This deletes all feed data. Only use for testing.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a read or delete fails.
    pub async fn clear(&self) -> Result<(), DbError> {
        for collection in Collection::ALL {
            let index = self.index_key(collection);
            let ids: Vec<String> = self
                .bounded("smembers", self.client.smembers(index.as_str()))
                .await?;
            let mut keys: Vec<String> = ids
                .iter()
                .map(|id| self.document_key(collection, id))
                .collect();
            keys.push(index);
            let _: u64 = self.bounded("del", self.client.del(keys)).await?;
        }
        Ok(())
    }
}

impl DocumentStore for DragonflyStore {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, DbError> {
        let key = self.document_key(collection, id);
        let raw: Option<String> = self.bounded("get", self.client.get(key.as_str())).await?;
        raw.as_deref().map(parse_document).transpose()
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Document>, DbError> {
        let index = self.index_key(collection);
        let mut ids: Vec<String> = self
            .bounded("smembers", self.client.smembers(index.as_str()))
            .await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        ids.sort_unstable();

        let keys: Vec<String> = ids
            .iter()
            .map(|id| self.document_key(collection, id))
            .collect();
        let values: Vec<Option<String>> = self.bounded("mget", self.client.mget(keys)).await?;

        let mut documents = Vec::with_capacity(values.len());
        // A key indexed but already deleted reads back as nil and is skipped.
        for raw in values.iter().flatten() {
            documents.push(parse_document(raw)?);
        }
        Ok(documents)
    }

    async fn merge(
        &self,
        collection: Collection,
        id: &str,
        fields: Document,
    ) -> Result<bool, DbError> {
        let key = self.document_key(collection, id);
        let patch = serde_json::to_string(&fields)?;
        let merged: i64 = self
            .bounded(
                "merge",
                self.client.eval(MERGE_SCRIPT, vec![key], vec![patch]),
            )
            .await?;
        Ok(merged == 1)
    }

    async fn commit(&self, batch: Vec<Mutation>) -> Result<bool, DbError> {
        if batch.is_empty() {
            return Ok(true);
        }

        let mut keys = Vec::with_capacity(batch.len().saturating_mul(2));
        let mut ops = Vec::with_capacity(batch.len());
        for mutation in &batch {
            keys.push(self.document_key(mutation.collection(), mutation.id()));
            keys.push(self.index_key(mutation.collection()));
            let op = match mutation {
                Mutation::Put { id, document, .. } => json!({
                    "op": "put",
                    "id": id,
                    "doc": serde_json::to_string(document)?,
                }),
                Mutation::Remove { id, .. } => json!({ "op": "remove", "id": id }),
                Mutation::Adjust { field, delta, .. } => json!({
                    "op": "adjust",
                    "field": field,
                    "delta": delta,
                }),
            };
            ops.push(op);
        }
        let encoded = serde_json::to_string(&ops)?;

        let applied: i64 = self
            .bounded(
                "commit",
                self.client.eval(COMMIT_SCRIPT, keys, vec![encoded]),
            )
            .await?;
        tracing::debug!(operations = batch.len(), applied = applied == 1, "Batch committed");
        Ok(applied == 1)
    }
}
