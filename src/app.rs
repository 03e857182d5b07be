//! The export run: configuration, client, stream, output.

use std::io::Write;

use tracing::{info, instrument};

use crate::api::JiraClient;
use crate::cli::Cli;
use crate::config::{Config, Settings};
use crate::error::Result;
use crate::output::{self, ExportOutcome, JsonLinesWriter};

/// Resolve the configuration for `cli` and export to `out`.
pub fn run<W: Write>(cli: &Cli, out: W) -> Result<ExportOutcome> {
    let settings = Settings::load_or_default(cli.config.as_deref())?;
    let config = Config::resolve(
        cli.overrides(),
        &settings,
        cli.profile.as_deref(),
        cli.timeout,
    )?;

    export(&config, out)
}

/// Export every issue matching `config` to `out` as JSON lines.
#[instrument(skip_all, fields(server = %config.server))]
pub fn export<W: Write>(config: &Config, out: W) -> Result<ExportOutcome> {
    let client = {
        let password = config.read_password()?;
        JiraClient::with_credentials(
            &config.server,
            &config.username,
            &password,
            config.timeout,
        )?
    };

    let query = client.query(&config.jql, config.fields.clone());
    let mut issues = client.issues(&query)?;

    let mut writer = JsonLinesWriter::new(out);
    let outcome = output::export(&mut issues, &mut writer)?;
    info!(
        ?outcome,
        pages = issues.pages_fetched(),
        base_url = client.base_url(),
        "Finished"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde_json::{json, Value};
    use tempfile::{NamedTempFile, TempDir};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::ApiError;
    use crate::error::AppError;

    fn password_file(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("password");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"secret\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).unwrap();
        }
        path
    }

    fn cli(server: &str, dir: &TempDir) -> Cli {
        // Point at an empty config file so the user's own config is ignored.
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "").unwrap();

        Cli {
            username: Some("bob".to_string()),
            password_file: Some(password_file(dir.path())),
            server: Some(format!("{}/", server)),
            jql: Some("project = PROJ AND status = Open".to_string()),
            fields: Some("summary".to_string()),
            config: Some(config),
            ..Cli::default()
        }
    }

    async fn mount_search(server: &MockServer, total: u32) {
        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .and(query_param("maxResults", "0"))
            .and(header("Authorization", "Basic Ym9iOnNlY3JldA=="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": total})))
            .expect(1)
            .mount(server)
            .await;

        let issues: Vec<Value> = (1..=total)
            .map(|n| {
                json!({
                    "id": n.to_string(),
                    "self": format!("https://jira.example.com/rest/api/2/issue/{}", n),
                    "key": format!("PROJ-{}", n),
                    "fields": {"summary": format!("Issue {}", n)}
                })
            })
            .collect();

        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .and(query_param("jql", "project = PROJ AND status = Open"))
            .and(query_param("fields", "summary"))
            .and(query_param("startAt", "0"))
            .and(query_param("maxResults", "100"))
            .and(header("Authorization", "Basic Ym9iOnNlY3JldA=="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "startAt": 0,
                "maxResults": 100,
                "total": total,
                "issues": issues
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_run_writes_json_lines() {
        let server = MockServer::start().await;
        mount_search(&server, 3).await;

        let dir = tempfile::tempdir().unwrap();
        let cli = cli(&server.uri(), &dir);

        let (outcome, output) = tokio::task::spawn_blocking(move || {
            let mut output = Vec::new();
            let outcome = run(&cli, &mut output);
            (outcome, output)
        })
        .await
        .unwrap();

        assert_eq!(outcome.unwrap(), ExportOutcome::Complete { issues: 3 });

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[0]["key"], "PROJ-1");
        assert_eq!(lines[2]["fields"]["summary"], "Issue 3");

        server.verify().await;
    }

    #[tokio::test]
    async fn test_run_with_profile() {
        let server = MockServer::start().await;
        mount_search(&server, 1).await;

        let dir = tempfile::tempdir().unwrap();
        let password = password_file(dir.path());

        let mut config_file = NamedTempFile::new_in(dir.path()).unwrap();
        write!(
            config_file,
            "default_profile = \"work\"\n\n[profiles.work]\nserver = \"{}\"\nusername = \"bob\"\npassword_file = '{}'\njql = \"project = PROJ AND status = Open\"\nfields = \"summary\"\n",
            server.uri(),
            password.display()
        )
        .unwrap();
        config_file.flush().unwrap();

        let cli = Cli {
            config: Some(config_file.path().to_path_buf()),
            ..Cli::default()
        };

        let outcome = tokio::task::spawn_blocking(move || run(&cli, Vec::new()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(outcome, ExportOutcome::Complete { issues: 1 });
        server.verify().await;
    }

    #[tokio::test]
    async fn test_page_without_issues_fails_the_run() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .and(query_param("maxResults", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 5})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .and(query_param("maxResults", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 5, "startAt": 0})))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let cli = cli(&server.uri(), &dir);

        let (result, output) = tokio::task::spawn_blocking(move || {
            let mut output = Vec::new();
            let result = run(&cli, &mut output);
            (result, output)
        })
        .await
        .unwrap();

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Api(ApiError::Decode { .. })), "{err:?}");
        assert_eq!(err.exit_code(), 1);
        assert!(output.is_empty());
        server.verify().await;
    }

    #[tokio::test]
    async fn test_config_error_makes_no_requests() {
        let server = MockServer::start().await;

        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            fields: Some("badger".to_string()),
            ..cli(&server.uri(), &dir)
        };

        let err = tokio::task::spawn_blocking(move || run(&cli, Vec::new()))
            .await
            .unwrap()
            .unwrap_err();

        assert!(matches!(err, AppError::Config(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
