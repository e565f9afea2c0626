//! HTTP client for the birthday API gateway.
//!
//! The gateway speaks the snake_case API shape (`birthday_id`, `birth_date`,
//! `birth_month_day`, `group_id`). It exposes list/create for groups only,
//! so group updates and deletions are unsupported here.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::BirthdayStore;
use crate::birthday::Birthday;
use crate::error::{BdayError, BdayResult};
use crate::group::Group;
use crate::snapshot::TestMessage;

/// Stateless client: every call goes to the gateway, nothing is cached.
pub struct RemoteStore {
    http: reqwest::Client,
    base_url: Url,
}

// Wire types matching the gateway API

#[derive(Deserialize)]
struct ApiBirthday {
    #[serde(default)]
    birthday_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default, alias = "birthDate")]
    birth_date: String,
    #[serde(default, alias = "groupId")]
    group_id: String,
    #[serde(default)]
    notes: Option<String>,
}

impl From<ApiBirthday> for Birthday {
    fn from(api: ApiBirthday) -> Self {
        Birthday {
            id: api.birthday_id.or(api.id).unwrap_or_default(),
            name: api.name,
            raw_birth_date: api.birth_date,
            group_id: api.group_id,
            notes: api.notes.filter(|n| !n.is_empty()),
        }
    }
}

#[derive(Serialize)]
struct BirthdayBody<'a> {
    name: &'a str,
    birth_date: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    birth_month_day: Option<String>,
    group_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

impl<'a> From<&'a Birthday> for BirthdayBody<'a> {
    fn from(b: &'a Birthday) -> Self {
        BirthdayBody {
            name: &b.name,
            birth_date: &b.raw_birth_date,
            birth_month_day: b.birth_month_day().map(|md| md.to_string()),
            group_id: &b.group_id,
            notes: b.notes.as_deref(),
        }
    }
}

#[derive(Deserialize)]
struct ApiGroup {
    #[serde(default)]
    group_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "memberCount")]
    member_count: Option<u32>,
}

impl From<ApiGroup> for Group {
    fn from(api: ApiGroup) -> Self {
        Group {
            id: api.group_id.or(api.id).unwrap_or_default(),
            name: api.name,
            description: api.description.filter(|d| !d.is_empty()),
            member_count: api.member_count,
        }
    }
}

#[derive(Serialize)]
struct GroupBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    member_count: Option<u32>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "message")]
    error: String,
}

impl RemoteStore {
    pub fn new(base_url: &str, timeout: Duration) -> BdayResult<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| BdayError::Config(format!("Invalid api_url '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(BdayError::Config(format!("Invalid api_url '{base_url}'")));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(RemoteStore { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL with `segments` appended, each percent-encoded on its own.
    fn endpoint(&self, segments: &[&str]) -> BdayResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BdayError::Config(format!("Invalid api_url '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> BdayResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%method, %url, "api request");
        Ok(self.http.request(method, url))
    }

    /// Send and turn non-2xx responses into `BdayError::Api`.
    async fn send(&self, req: RequestBuilder) -> BdayResult<Response> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.error)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    body
                }
            });
        tracing::warn!(status = status.as_u16(), %message, "api error");
        Err(BdayError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn json<T: DeserializeOwned>(&self, req: RequestBuilder) -> BdayResult<T> {
        Ok(self.send(req).await?.json().await?)
    }

    /// The gateway answers writes with the stored record or an `{id}` stub.
    /// Take whatever id it reports and keep our own fields.
    async fn created_id(
        &self,
        req: RequestBuilder,
        kind: &str,
        keys: [&str; 2],
    ) -> BdayResult<String> {
        let text = self.send(req).await?.text().await?;
        let id = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|value| {
                keys.iter().find_map(|k| match value.get(*k)? {
                    serde_json::Value::String(s) => Some(s.clone()),
                    serde_json::Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
            })
            .filter(|id| !id.is_empty());

        id.ok_or_else(|| {
            tracing::warn!(kind, body = %text, "created record has no id");
            BdayError::Serialization(format!("The API did not return an id for the new {kind}"))
        })
    }
}

impl BirthdayStore for RemoteStore {
    /// GET /birthdays
    async fn list_birthdays(&self) -> BdayResult<Vec<Birthday>> {
        let list: Vec<ApiBirthday> = self.json(self.request(Method::GET, &["birthdays"])?).await?;
        Ok(list.into_iter().map(Birthday::from).collect())
    }

    /// POST /birthdays
    async fn add_birthday(&mut self, mut draft: Birthday) -> BdayResult<Birthday> {
        let req = self
            .request(Method::POST, &["birthdays"])?
            .json(&BirthdayBody::from(&draft));
        draft.id = self.created_id(req, "birthday", ["birthday_id", "id"]).await?;
        Ok(draft)
    }

    /// PUT /birthdays/{id}
    async fn update_birthday(&mut self, birthday: Birthday) -> BdayResult<Birthday> {
        let req = self
            .request(Method::PUT, &["birthdays", birthday.id.as_str()])?
            .json(&BirthdayBody::from(&birthday));
        self.send(req).await?;
        Ok(birthday)
    }

    /// DELETE /birthdays/{id}
    async fn delete_birthday(&mut self, id: &str) -> BdayResult<()> {
        self.send(self.request(Method::DELETE, &["birthdays", id])?).await?;
        Ok(())
    }

    /// GET /groups
    async fn list_groups(&self) -> BdayResult<Vec<Group>> {
        let list: Vec<ApiGroup> = self.json(self.request(Method::GET, &["groups"])?).await?;
        Ok(list.into_iter().map(Group::from).collect())
    }

    /// POST /groups
    async fn add_group(&mut self, mut draft: Group) -> BdayResult<Group> {
        let req = self.request(Method::POST, &["groups"])?.json(&GroupBody {
            name: &draft.name,
            description: draft.description.as_deref(),
            member_count: draft.member_count,
        });
        draft.id = self.created_id(req, "group", ["group_id", "id"]).await?;
        Ok(draft)
    }

    async fn update_group(&mut self, _group: Group) -> BdayResult<Group> {
        Err(BdayError::Unsupported("Updating groups"))
    }

    async fn delete_group(&mut self, _id: &str) -> BdayResult<()> {
        Err(BdayError::Unsupported("Deleting groups"))
    }

    /// POST /test-message
    async fn send_test_message(&self, message: &TestMessage) -> BdayResult<serde_json::Value> {
        let req = self.request(Method::POST, &["test-message"])?.json(message);
        let text = self.send(req).await?.text().await?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}
