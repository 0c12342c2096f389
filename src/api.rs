// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDate;
use reqwest::blocking::Client;
use reqwest::{Method, StatusCode};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::models::{
    Account, BarReport, Budget, Category, EntryKind, Notification, PieReport, Transaction,
    TransactionDraft, User,
};
use crate::utils::http_client;

pub const API_PREFIX: &str = "/v1/api";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("{0}")]
    Server(String),
    #[error("unexpected reply: {0}")]
    Unexpected(String),
}

// The backend answers in four distinct shapes, kept distinct here on purpose:
// a raw payload (lists, profile), a coded `{EC, EM, ...}` object (auth,
// account/category/transaction mutations, reports), a flagged
// `{success, message, ...}` object (budget mutations), and a bare `{message}`
// ack (notification mark-read/delete). Every endpoint method below names the
// decoder it uses.

fn message_of(v: &Value) -> Option<String> {
    v.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Raw-payload convention: the reply *is* the data unless an object with a
/// `message` field came back, which signals a rejected request.
pub fn expect_data<T: DeserializeOwned>(v: Value) -> Result<T, ApiError> {
    if v.is_object() {
        if let Some(msg) = message_of(&v) {
            return Err(ApiError::Auth(msg));
        }
    }
    serde_json::from_value(v).map_err(|e| ApiError::Unexpected(e.to_string()))
}

/// Coded convention: `EC == 0` is success, `EM` carries the human message,
/// `notification` flags a server-side notification side effect.
#[derive(Debug, Clone, Deserialize)]
pub struct Coded {
    #[serde(rename = "EC")]
    pub ec: i64,
    #[serde(rename = "EM", default)]
    pub em: String,
    #[serde(default)]
    pub notification: Option<String>,
}

impl Coded {
    pub fn ok(&self) -> bool {
        self.ec == 0
    }

    /// Server message when present, the caller's generic one otherwise.
    pub fn err_message(&self, fallback: &str) -> String {
        if self.em.trim().is_empty() {
            fallback.to_string()
        } else {
            self.em.clone()
        }
    }
}

pub fn expect_coded(v: Value) -> Result<Coded, ApiError> {
    serde_json::from_value(v).map_err(|e| ApiError::Unexpected(e.to_string()))
}

/// Flagged convention (budgets): `success` boolean plus `message`; failures
/// sometimes carry `EM` instead of `message`.
#[derive(Debug, Clone, Deserialize)]
pub struct Flagged {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "EM", default)]
    pub em: Option<String>,
    #[serde(rename = "notificationMessage", default)]
    pub notification_message: Option<String>,
}

impl Flagged {
    pub fn err_message(&self, fallback: &str) -> String {
        if let Some(em) = self.em.as_deref() {
            if !em.trim().is_empty() {
                return em.to_string();
            }
        }
        if self.message.trim().is_empty() {
            fallback.to_string()
        } else {
            self.message.clone()
        }
    }
}

pub fn expect_flagged(v: Value) -> Result<Flagged, ApiError> {
    serde_json::from_value(v).map_err(|e| ApiError::Unexpected(e.to_string()))
}

/// Ack convention (notifications): a bare `{message}` whichever way the call
/// went; success is keyed on the HTTP status instead of the message text.
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginReply {
    #[serde(rename = "EC")]
    pub ec: i64,
    #[serde(rename = "EM", default)]
    pub em: String,
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Coded reports wrap the payload in `DT`.
pub fn expect_report<T: DeserializeOwned>(v: Value) -> Result<T, ApiError> {
    let ec = v.get("EC").and_then(Value::as_i64).unwrap_or(-1);
    if ec != 0 {
        let em = v
            .get("EM")
            .and_then(Value::as_str)
            .unwrap_or("report request rejected");
        return Err(ApiError::Server(em.to_string()));
    }
    let dt = v.get("DT").cloned().unwrap_or(Value::Null);
    serde_json::from_value(dt).map_err(|e| ApiError::Unexpected(e.to_string()))
}

/// Amounts go over the wire as JSON numbers, matching what the backend
/// stores.
fn wire_amount(d: Decimal) -> Result<f64, ApiError> {
    d.to_f64()
        .ok_or_else(|| ApiError::Unexpected(format!("amount {} not representable", d)))
}

fn range_query(range: Option<(NaiveDate, NaiveDate)>) -> Vec<(&'static str, String)> {
    match range {
        Some((start, end)) => vec![
            ("startDate", start.format("%Y-%m-%d").to_string()),
            ("endDate", end.format("%Y-%m-%d").to_string()),
        ],
        None => Vec::new(),
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<Value>,
    ) -> Result<(StatusCode, Value), ApiError> {
        let mut req = self.http.request(method, self.url(path));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(b) = body {
            req = req.json(&b);
        }
        let resp = req.send()?;
        let status = resp.status();
        let v: Value = match resp.json() {
            Ok(v) => v,
            Err(_) if !status.is_success() => {
                return Err(ApiError::Server(format!("HTTP {}", status)));
            }
            Err(e) => return Err(ApiError::Unexpected(e.to_string())),
        };
        if status == StatusCode::UNAUTHORIZED {
            let msg = message_of(&v).unwrap_or_else(|| "token rejected".to_string());
            return Err(ApiError::Auth(msg));
        }
        Ok((status, v))
    }

    fn get(&self, path: &str, query: &[(&'static str, String)]) -> Result<Value, ApiError> {
        let (_, v) = self.send(Method::GET, path, query, None)?;
        Ok(v)
    }

    fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        let (_, v) = self.send(Method::POST, path, &[], Some(body))?;
        Ok(v)
    }

    fn put(&self, path: &str, body: Option<Value>) -> Result<(StatusCode, Value), ApiError> {
        self.send(Method::PUT, path, &[], body)
    }

    fn delete(&self, path: &str, body: Option<Value>) -> Result<(StatusCode, Value), ApiError> {
        self.send(Method::DELETE, path, &[], body)
    }

    // ---- session ----

    pub fn login(&self, email: &str, password: &str) -> Result<LoginReply, ApiError> {
        let v = self.post("/login", json!({ "email": email, "password": password }))?;
        serde_json::from_value(v).map_err(|e| ApiError::Unexpected(e.to_string()))
    }

    pub fn register(&self, name: &str, email: &str, password: &str) -> Result<Coded, ApiError> {
        let v = self.post(
            "/register",
            json!({ "name": name, "email": email, "password": password }),
        )?;
        expect_coded(v)
    }

    /// Current identity behind the stored token; a `{message}` reply means
    /// the token was not accepted.
    pub fn profile(&self) -> Result<User, ApiError> {
        expect_data(self.get("/account", &[])?)
    }

    // ---- accounts ----

    pub fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
        expect_data(self.get("/accounts", &[])?)
    }

    pub fn create_account(
        &self,
        name: &str,
        balance: Decimal,
        is_cash: bool,
    ) -> Result<Coded, ApiError> {
        let v = self.post(
            "/accounts",
            json!({ "name": name, "balance": wire_amount(balance)?, "isCash": is_cash }),
        )?;
        expect_coded(v)
    }

    pub fn update_account(&self, id: &str, name: &str, is_cash: bool) -> Result<Coded, ApiError> {
        let (_, v) = self.put(
            "/accounts",
            Some(json!({ "accountId": id, "name": name, "isCash": is_cash })),
        )?;
        expect_coded(v)
    }

    pub fn delete_account(&self, id: &str) -> Result<Coded, ApiError> {
        let (_, v) = self.delete("/accounts", Some(json!({ "accountId": id })))?;
        expect_coded(v)
    }

    // ---- categories ----

    pub fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        expect_data(self.get("/categories", &[])?)
    }

    pub fn create_category(&self, name: &str, kind: EntryKind) -> Result<Coded, ApiError> {
        let v = self.post(
            "/categories",
            json!({ "name": name, "type": kind.as_str() }),
        )?;
        expect_coded(v)
    }

    pub fn update_category(
        &self,
        id: &str,
        name: &str,
        kind: EntryKind,
    ) -> Result<Coded, ApiError> {
        let (_, v) = self.put(
            "/categories",
            Some(json!({ "categoryId": id, "name": name, "type": kind.as_str() })),
        )?;
        expect_coded(v)
    }

    pub fn delete_category(&self, id: &str) -> Result<Coded, ApiError> {
        let (_, v) = self.delete("/categories", Some(json!({ "categoryId": id })))?;
        expect_coded(v)
    }

    // ---- transactions ----

    pub fn list_transactions(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<Transaction>, ApiError> {
        expect_data(self.get("/transactions", &range_query(range))?)
    }

    pub fn create_transaction(&self, draft: &TransactionDraft) -> Result<Coded, ApiError> {
        let body =
            serde_json::to_value(draft).map_err(|e| ApiError::Unexpected(e.to_string()))?;
        expect_coded(self.post("/transactions", body)?)
    }

    pub fn update_transaction(
        &self,
        id: &str,
        draft: &TransactionDraft,
    ) -> Result<Coded, ApiError> {
        let mut body =
            serde_json::to_value(draft).map_err(|e| ApiError::Unexpected(e.to_string()))?;
        body["transactionId"] = json!(id);
        let (_, v) = self.put("/transactions", Some(body))?;
        expect_coded(v)
    }

    pub fn delete_transaction(&self, id: &str) -> Result<Coded, ApiError> {
        let (_, v) = self.delete("/transactions", Some(json!({ "transactionId": id })))?;
        expect_coded(v)
    }

    // ---- budgets ----

    pub fn list_budgets(&self) -> Result<Vec<Budget>, ApiError> {
        expect_data(self.get("/budgets", &[])?)
    }

    pub fn create_budget(
        &self,
        category_id: &str,
        amount: Decimal,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Flagged, ApiError> {
        let v = self.post(
            "/budgets",
            json!({
                "categoryId": category_id,
                "amount": wire_amount(amount)?,
                "startDate": start.format("%Y-%m-%d").to_string(),
                "endDate": end.format("%Y-%m-%d").to_string(),
            }),
        )?;
        expect_flagged(v)
    }

    pub fn update_budget(&self, id: &str, amount: Decimal) -> Result<Flagged, ApiError> {
        let (_, v) = self.put(
            "/budgets",
            Some(json!({ "budgetId": id, "amount": wire_amount(amount)? })),
        )?;
        expect_flagged(v)
    }

    pub fn delete_budget(&self, id: &str) -> Result<Flagged, ApiError> {
        let (_, v) = self.delete("/budgets", Some(json!({ "budgetId": id })))?;
        expect_flagged(v)
    }

    // ---- notifications ----

    pub fn list_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        expect_data(self.get("/notifications", &[])?)
    }

    pub fn mark_notification_read(&self, id: &str) -> Result<Ack, ApiError> {
        let (status, v) = self.put(&format!("/notifications/{}/read", id), None)?;
        self.ack(status, v)
    }

    pub fn delete_notification(&self, id: &str) -> Result<Ack, ApiError> {
        let (status, v) = self.delete(&format!("/notifications/{}", id), None)?;
        self.ack(status, v)
    }

    fn ack(&self, status: StatusCode, v: Value) -> Result<Ack, ApiError> {
        let ack: Ack =
            serde_json::from_value(v).map_err(|e| ApiError::Unexpected(e.to_string()))?;
        if !status.is_success() {
            let msg = if ack.message.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                ack.message
            };
            return Err(ApiError::Server(msg));
        }
        Ok(ack)
    }

    // ---- reports ----

    pub fn report_pie(&self, start: NaiveDate, end: NaiveDate) -> Result<PieReport, ApiError> {
        expect_report(self.get("/reports/pie", &range_query(Some((start, end))))?)
    }

    pub fn report_bar(&self, start: NaiveDate, end: NaiveDate) -> Result<BarReport, ApiError> {
        expect_report(self.get("/reports/bar", &range_query(Some((start, end))))?)
    }
}
