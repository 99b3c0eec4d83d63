use async_trait::async_trait;
use gloo::net::http::{Request, Response};
use interview_scheduler_domain::{
    BoardConfig, BoardError, BoardResult, Endpoints, PersonLookup, SchedulerApi,
};
use serde::de::DeserializeOwned;
use shared::{AvailabilityWeek, LoginInfo, Person, PutAvailabilityRequest, WeekQuery};

/// API client for the scheduler backend
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    endpoints: Endpoints,
}

impl ApiClient {
    pub fn from_config(config: &BoardConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            endpoints: config.endpoints.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn send(request: Result<Request, gloo::net::Error>) -> BoardResult<Response> {
    let request = request.map_err(|e| BoardError::Network(format!("Failed to build request: {}", e)))?;
    request
        .send()
        .await
        .map_err(|e| BoardError::Network(e.to_string()))
}

async fn ensure_ok(response: Response) -> BoardResult<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let message = match response.text().await {
        Ok(text) if !text.trim().is_empty() => text,
        _ => response.status_text(),
    };
    Err(BoardError::Http { status, message })
}

async fn decode<T: DeserializeOwned>(response: Response) -> BoardResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| BoardError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl SchedulerApi for ApiClient {
    async fn login_info(&self) -> BoardResult<LoginInfo> {
        let response = send(Request::get(&self.url(&self.endpoints.login)).build()).await?;
        decode(ensure_ok(response).await?).await
    }

    async fn current_person(&self, email: &str) -> BoardResult<PersonLookup> {
        let request = Request::get(&self.url(&self.endpoints.person))
            .query([("email", email)])
            .build();
        let response = send(request).await?;

        // Unregistered users are bounced to the registration page
        if response.redirected() {
            return Ok(PersonLookup::Unregistered { registration_url: response.url() });
        }
        let person: Person = decode(ensure_ok(response).await?).await?;
        Ok(PersonLookup::Registered(person))
    }

    async fn availability_week(&self, query: WeekQuery) -> BoardResult<AvailabilityWeek> {
        let url = format!(
            "{}?{}",
            self.url(&self.endpoints.availability_week),
            query.to_query_string()
        );
        let response = send(Request::get(&url).build()).await?;
        decode(ensure_ok(response).await?).await
    }

    async fn put_availability(&self, request: &PutAvailabilityRequest) -> BoardResult<()> {
        let response = send(Request::put(&self.url(&self.endpoints.availability)).json(request)).await?;
        ensure_ok(response).await?;
        Ok(())
    }

    async fn logout(&self) -> BoardResult<Option<String>> {
        let response = send(Request::get(&self.url(&self.endpoints.logout)).build()).await?;
        let response = ensure_ok(response).await?;
        Ok(response.redirected().then(|| response.url()))
    }
}
