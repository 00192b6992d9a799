use gitshare::config::{ApiConfig, ShareConfig};
use gitshare::output::{OutputFormat, Reporter};
use gitshare::share::{ShareError, ShareState};
use gitshare::{ApiClient, ShareCard, ShareView};
use mockito::Server;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const REPOSITORIES: &str = r#"[
    {"name":"a","stargazers_count":10,"forks_count":2,"language":"Go","created_at":"2016-03-01T00:00:00Z"},
    {"name":"b","stargazers_count":5,"forks_count":0,"language":"Go","created_at":"2015-03-01T00:00:00Z"},
    {"name":"c","stargazers_count":20,"forks_count":1,"language":null,"created_at":"2016-07-01T00:00:00Z"}
]"#;

// Weeks starting 2016-01-03 and 2016-01-10.
const COMMITS: &str = r#"[
    {"week":1451779200,"total":3,"days":[0,1,0,2,0,0,0]},
    {"week":1452384000,"total":1,"days":[1,0,0,0,0,0,0]}
]"#;

fn settings() -> ShareConfig {
    ShareConfig {
        reference_year: Some(2016),
        ..ShareConfig::default()
    }
}

#[tokio::test]
async fn loads_renders_and_writes_a_card() {
    let mut server = Server::new_async().await;
    let repos = server
        .mock("GET", "/api/github/octocat/repositories")
        .with_status(200)
        .with_body(REPOSITORIES)
        .create_async()
        .await;
    let commits = server
        .mock("GET", "/api/github/octocat/commits")
        .with_status(200)
        .with_body(COMMITS)
        .create_async()
        .await;

    let client = ApiClient::new(ApiConfig::from_api_url(&server.url())).unwrap();
    let mut view = ShareView::new("octocat", settings());
    view.load(&client, Some("token")).await.unwrap();

    repos.assert_async().await;
    commits.assert_async().await;

    let data = view.data().unwrap();
    let names: Vec<_> = data.repositories.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
    assert_eq!(data.language_distribution["Go"], 2);
    assert_eq!(data.language_skill["Go"], 15);
    assert_eq!(data.commits.daily_commits, [1, 1, 0, 2, 0, 0, 0]);
    assert_eq!(data.commits.total, 4);

    let card = view.render().unwrap().clone();
    assert_eq!(card.insights.total_stars, 35);
    assert_eq!(card.insights.total_forks, 3);
    assert_eq!(card.insights.yearly_repository_count, 2);
    assert_eq!(card.insights.top_language_by_stars.as_deref(), Some("Go"));
    assert_eq!(card.insights.busiest_weekday.as_deref(), Some("Wednesday"));
    assert_eq!(
        card.insights.first_commit_date.map(|d| d.to_string()).as_deref(),
        Some("2016-01-04")
    );

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("card");
    let reporter = Reporter::new(OutputFormat::Json, path.to_str().unwrap());
    reporter.write_card(&card).unwrap();

    let written = std::fs::read_to_string(reporter.output_path()).unwrap();
    let parsed: ShareCard = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed.login, "octocat");
    assert_eq!(parsed.insights, card.insights);

    let html = Reporter::new(OutputFormat::Html, "unused").render(&card).unwrap();
    assert!(html.contains(r#"<canvas id="repos_chart">"#));
}

#[tokio::test]
async fn failed_fetch_leaves_view_unloaded() {
    let mut server = Server::new_async().await;
    let _repos = server
        .mock("GET", "/api/github/octocat/repositories")
        .with_status(500)
        .with_body("backend down")
        .create_async()
        .await;
    let _commits = server
        .mock("GET", "/api/github/octocat/commits")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = ApiClient::new(ApiConfig::from_api_url(&server.url())).unwrap();
    let mut view = ShareView::new("octocat", settings());

    let err = view.load(&client, None).await.unwrap_err();
    match err {
        ShareError::Api(api) => assert_eq!(api.status(), Some(500)),
        other => panic!("unexpected error: {other}"),
    }
    assert!(matches!(view.state(), ShareState::Uninitialized));
    assert!(matches!(view.render(), Err(ShareError::NotLoaded(_))));
}
