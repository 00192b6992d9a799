use super::Repository;

const GITHUB_HOST: &str = "https://github.com";

/// Builds github.com links for a user's profile and repositories.
pub struct ProfileLinker<'a> {
    login: &'a str,
}

impl<'a> ProfileLinker<'a> {
    pub fn new(login: &'a str) -> Self {
        Self { login }
    }

    pub fn profile_url(&self) -> String {
        format!("{}/{}", GITHUB_HOST, self.login)
    }

    pub fn repository_url(&self, repo: &Repository) -> String {
        if let Some(url) = repo.html_url.as_deref().filter(|url| !url.is_empty()) {
            return url.trim_end_matches(".git").to_string();
        }

        match repo.full_name.as_deref() {
            Some(full_name) if full_name.contains('/') => format!("{}/{}", GITHUB_HOST, full_name),
            _ => format!("{}/{}/{}", GITHUB_HOST, self.login, repo.name),
        }
    }
}
