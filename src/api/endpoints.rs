use reqwest::Method;
use serde_json::{json, Value};

use super::{ApiClient, ApiError, BaseUrl, RequestOptions, TimeoutPolicy};
use crate::github::{Repository, WeeklyCommitRecord};

fn with_token(token: Option<&str>) -> RequestOptions {
    RequestOptions::default().query("token", token)
}

fn refresh(token: Option<&str>) -> RequestOptions {
    with_token(token).timeout(TimeoutPolicy::Unbounded)
}

fn scientific() -> RequestOptions {
    RequestOptions::default().base_url(BaseUrl::Scientific)
}

impl ApiClient {
    pub async fn get_zen(&self, token: Option<&str>) -> Result<Value, ApiError> {
        self.request("/zen", with_token(token)).await
    }

    pub async fn get_octocat(&self) -> Result<Value, ApiError> {
        self.request("/octocat", RequestOptions::default()).await
    }

    pub async fn get_verify(&self) -> Result<Value, ApiError> {
        self.request("/verify", RequestOptions::default()).await
    }

    /// Exchange an OAuth `code` for an access token.
    pub async fn get_token(&self, code: &str) -> Result<Value, ApiError> {
        self.request("/token", RequestOptions::default().query("code", Some(code)))
            .await
    }

    pub async fn get_login(&self, token: &str) -> Result<Value, ApiError> {
        self.request("/login", with_token(Some(token))).await
    }

    pub async fn get_user(&self, login: &str, token: Option<&str>) -> Result<Value, ApiError> {
        self.request(&Self::user_path(login, "")?, with_token(token))
            .await
    }

    pub async fn get_user_repositories(
        &self,
        login: &str,
        token: Option<&str>,
    ) -> Result<Vec<Repository>, ApiError> {
        self.request(&Self::user_path(login, "/repositories")?, with_token(token))
            .await
    }

    pub async fn get_user_contributed(
        &self,
        login: &str,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.request(&Self::user_path(login, "/contributed")?, with_token(token))
            .await
    }

    pub async fn get_user_commits(
        &self,
        login: &str,
        token: Option<&str>,
    ) -> Result<Vec<WeeklyCommitRecord>, ApiError> {
        self.request(&Self::user_path(login, "/commits")?, with_token(token))
            .await
    }

    pub async fn get_user_organizations(
        &self,
        login: &str,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.request(&Self::user_path(login, "/organizations")?, with_token(token))
            .await
    }

    pub async fn get_update_time(&self, login: &str) -> Result<Value, ApiError> {
        self.request(&Self::user_path(login, "/updateTime")?, RequestOptions::default())
            .await
    }

    pub async fn refresh_user(&self, login: &str, token: Option<&str>) -> Result<Value, ApiError> {
        self.request(&Self::user_path(login, "/refresh")?, refresh(token))
            .await
    }

    pub async fn refresh_hotmap(
        &self,
        login: &str,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.request(&Self::user_path(login, "/hotmap/refresh")?, refresh(token))
            .await
    }

    pub async fn refresh_repositories(
        &self,
        login: &str,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.request(&Self::user_path(login, "/repositories/refresh")?, refresh(token))
            .await
    }

    pub async fn refresh_contributed(
        &self,
        login: &str,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.request(&Self::user_path(login, "/contributed/refresh")?, refresh(token))
            .await
    }

    pub async fn refresh_commits(
        &self,
        login: &str,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.request(&Self::user_path(login, "/commits/refresh")?, refresh(token))
            .await
    }

    pub async fn refresh_organizations(
        &self,
        login: &str,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.request(&Self::user_path(login, "/organizations/refresh")?, refresh(token))
            .await
    }

    pub async fn get_hotmap(&self, login: &str, locale: Option<&str>) -> Result<Value, ApiError> {
        self.request(
            &Self::user_path(login, "/hotmap")?,
            RequestOptions::default().query("locale", locale),
        )
        .await
    }

    pub async fn get_user_statistic(
        &self,
        login: &str,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.request(
            &Self::user_path(login, "/statistic")?,
            scientific().query("token", token),
        )
        .await
    }

    pub async fn get_user_predictions(
        &self,
        login: &str,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.request(
            &Self::user_path(login, "/predictions")?,
            scientific().query("token", token),
        )
        .await
    }

    pub async fn remove_prediction(&self, login: &str, full_name: &str) -> Result<Value, ApiError> {
        self.request(
            &Self::user_path(login, "/predictions")?,
            scientific()
                .method(Method::DELETE)
                .body(json!({ "fullName": full_name })),
        )
        .await
    }

    pub async fn put_predictions_feedback(
        &self,
        login: &str,
        full_name: &str,
        liked: bool,
    ) -> Result<Value, ApiError> {
        self.request(
            &Self::user_path(login, "/predictions")?,
            scientific()
                .method(Method::PUT)
                .body(json!({ "liked": liked, "fullName": full_name })),
        )
        .await
    }
}
