use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;

use staffdir::api::create_router;
use staffdir::engine::Directory;
use staffdir::models::{Criteria, CriteriaUpdate, Employee, OrgNode, Presence};
use staffdir::sources::{DirectorySource, LoadError, PresenceError, PresenceSource};

fn emp(id: i64, name: &str, title: &str, dept: &str, email: &str, manager: &str) -> Employee {
    Employee {
        id,
        name: name.to_string(),
        job_title: title.to_string(),
        department: dept.to_string(),
        email: email.to_string(),
        photo: String::new(),
        manager_email: manager.to_string(),
        phone: String::new(),
        location: String::new(),
        skills: String::new(),
        about_me: String::new(),
        joining_date: None,
        presence: Presence::Offline,
    }
}

#[derive(Default)]
struct StubDirectory {
    employees: Mutex<Vec<Employee>>,
    fail: AtomicBool,
}

#[async_trait]
impl DirectorySource for StubDirectory {
    async fn fetch(&self) -> Result<Vec<Employee>, LoadError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(LoadError::Status {
                status: 503,
                body: "list unavailable".to_string(),
            });
        }
        Ok(self.employees.lock().expect("lock").clone())
    }
}

#[derive(Default)]
struct StubPresence {
    map: Mutex<HashMap<String, Presence>>,
}

#[async_trait]
impl PresenceSource for StubPresence {
    async fn prepare(&self) -> Result<(), PresenceError> {
        Ok(())
    }

    async fn availability(&self, email: &str) -> Result<Presence, PresenceError> {
        Ok(self
            .map
            .lock()
            .expect("lock")
            .get(email)
            .copied()
            .unwrap_or(Presence::Offline))
    }
}

struct Harness {
    server: TestServer,
    directory: Arc<StubDirectory>,
    presence: Arc<StubPresence>,
}

async fn setup(employees: Vec<Employee>) -> Harness {
    let directory = Arc::new(StubDirectory {
        employees: Mutex::new(employees),
        fail: AtomicBool::new(false),
    });
    let presence = Arc::new(StubPresence::default());

    let engine = Directory::new(directory.clone(), presence.clone());
    engine.load().await.expect("initial load failed");

    let app = create_router(engine);
    let server = TestServer::new(app).expect("Failed to create test server");
    Harness {
        server,
        directory,
        presence,
    }
}

fn sample_roster() -> Vec<Employee> {
    vec![
        emp(1, "Alice", "CEO", "Exec", "alice@x", ""),
        emp(2, "Bob", "Engineer", "Engineering", "bob@x", "alice@x"),
        emp(3, "Beth", "Designer", "Design", "beth@x", "alice@x"),
        emp(4, "Carl", "Engineer", "Engineering", "carl@x", "bob@x"),
    ]
}

mod roster {
    use super::*;

    #[tokio::test]
    async fn health_returns_ok() {
        let h = setup(vec![]).await;
        let response = h.server.get("/api/v1/health").await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn lists_the_full_roster() {
        let h = setup(sample_roster()).await;

        let response = h.server.get("/api/v1/employees").await;
        response.assert_status_ok();
        let roster: Vec<Employee> = response.json();
        assert_eq!(roster.len(), 4);
        assert_eq!(roster[0].name, "Alice");
    }

    #[tokio::test]
    async fn reload_picks_up_new_directory_data() {
        let h = setup(vec![emp(1, "Alice", "", "", "alice@x", "")]).await;

        *h.directory.employees.lock().expect("lock") = sample_roster();
        let response = h.server.post("/api/v1/reload").await;
        response.assert_status_ok();

        let roster: Vec<Employee> = h.server.get("/api/v1/employees").await.json();
        assert_eq!(roster.len(), 4);
    }

    #[tokio::test]
    async fn failed_reload_returns_bad_gateway_and_keeps_roster() {
        let h = setup(sample_roster()).await;

        h.directory.fail.store(true, Ordering::SeqCst);
        let response = h.server.post("/api/v1/reload").await;
        response.assert_status(StatusCode::BAD_GATEWAY);

        let roster: Vec<Employee> = h.server.get("/api/v1/employees").await.json();
        assert_eq!(roster.len(), 4);
    }

    #[tokio::test]
    async fn refresh_applies_current_provider_statuses() {
        let h = setup(vec![
            emp(1, "Alice", "", "", "alice@x", ""),
            emp(2, "Bob", "", "", "bob@x", "alice@x"),
        ])
        .await;

        h.presence
            .map
            .lock()
            .expect("lock")
            .insert("bob@x".to_string(), Presence::Busy);

        let response = h.server.post("/api/v1/refresh").await;
        response.assert_status_ok();
        let roster: Vec<Employee> = response.json();
        assert_eq!(roster[0].presence, Presence::Offline);
        assert_eq!(roster[1].presence, Presence::Busy);
    }
}

mod filtering {
    use super::*;

    #[tokio::test]
    async fn visible_defaults_to_the_full_roster() {
        let h = setup(sample_roster()).await;

        let visible: Vec<Employee> = h.server.get("/api/v1/employees/visible").await.json();
        assert_eq!(visible.len(), 4);
    }

    #[tokio::test]
    async fn letter_criterion_narrows_the_visible_set() {
        let h = setup(sample_roster()).await;

        let response = h
            .server
            .put("/api/v1/criteria")
            .json(&CriteriaUpdate {
                letter: Some("B".to_string()),
                ..Default::default()
            })
            .await;
        response.assert_status_ok();

        let visible: Vec<Employee> = response.json();
        let names: Vec<_> = visible.iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["Bob", "Beth"]);
    }

    #[tokio::test]
    async fn updates_are_partial_and_compose_with_and() {
        let h = setup(sample_roster()).await;

        h.server
            .put("/api/v1/criteria")
            .json(&CriteriaUpdate {
                letter: Some("B".to_string()),
                ..Default::default()
            })
            .await;
        let response = h
            .server
            .put("/api/v1/criteria")
            .json(&CriteriaUpdate {
                department: Some("engineering".to_string()),
                ..Default::default()
            })
            .await;

        let visible: Vec<Employee> = response.json();
        let names: Vec<_> = visible.iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["Bob"]);

        let criteria: Criteria = h.server.get("/api/v1/criteria").await.json();
        assert_eq!(criteria.letter, Some('B'));
        assert_eq!(criteria.department, "engineering");
    }

    #[tokio::test]
    async fn reset_restores_the_full_roster() {
        let h = setup(sample_roster()).await;

        h.server
            .put("/api/v1/criteria")
            .json(&CriteriaUpdate {
                search: Some("nobody".to_string()),
                ..Default::default()
            })
            .await;
        let narrowed: Vec<Employee> = h.server.get("/api/v1/employees/visible").await.json();
        assert!(narrowed.is_empty());

        let response = h.server.delete("/api/v1/criteria").await;
        response.assert_status_ok();
        let visible: Vec<Employee> = response.json();
        assert_eq!(visible.len(), 4);
    }

    #[tokio::test]
    async fn lists_distinct_departments_and_job_titles_in_roster_order() {
        let h = setup(sample_roster()).await;

        let departments: Vec<String> = h.server.get("/api/v1/departments").await.json();
        assert_eq!(departments, vec!["Exec", "Engineering", "Design"]);

        let titles: Vec<String> = h.server.get("/api/v1/job-titles").await.json();
        assert_eq!(titles, vec!["CEO", "Engineer", "Designer"]);
    }
}

mod org_chart {
    use super::*;

    #[tokio::test]
    async fn builds_the_reporting_tree_from_the_roster() {
        let h = setup(sample_roster()).await;

        let response = h.server.get("/api/v1/org-chart").await;
        response.assert_status_ok();
        let chart: Option<OrgNode> = response.json();
        let root = chart.expect("expected a tree");
        assert_eq!(root.name, "Alice");
        let children: Vec<_> = root.children.iter().map(|c| c.name.clone()).collect();
        assert_eq!(children, vec!["Bob", "Beth"]);
        assert_eq!(root.children[0].children[0].name, "Carl");
    }

    #[tokio::test]
    async fn returns_null_when_no_root_exists() {
        let h = setup(vec![emp(1, "Alice", "", "", "a@x", "b@x")]).await;

        let chart: Option<OrgNode> = h.server.get("/api/v1/org-chart").await.json();
        assert!(chart.is_none());
    }
}
