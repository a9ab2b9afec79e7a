//! Use case and HTTP tests for the learning path crate, run against an
//! in-memory store and controllable content sources.

#[cfg(test)]
mod support {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use kernel::id::LearningPathId;

    use crate::domain::entities::{Curriculum, LearningPath};
    use crate::domain::repository::{CurriculumGenerator, LearningPathRepository};
    use crate::domain::value_objects::{Refinement, Topic};
    use crate::error::{GenerationError, LearnPathError, LearnPathResult};
    use crate::infra::mock::MockCurriculumGenerator;

    #[derive(Clone, Default)]
    pub struct InMemoryRepository {
        paths: Arc<Mutex<Vec<LearningPath>>>,
    }

    impl InMemoryRepository {
        pub fn len(&self) -> usize {
            self.paths.lock().unwrap().len()
        }

        pub fn all(&self) -> Vec<LearningPath> {
            self.paths.lock().unwrap().clone()
        }
    }

    impl LearningPathRepository for InMemoryRepository {
        async fn create(&self, path: &LearningPath) -> LearnPathResult<()> {
            self.paths.lock().unwrap().push(path.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: LearningPathId) -> LearnPathResult<Option<LearningPath>> {
            Ok(self
                .paths
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == id)
                .cloned())
        }

        async fn list_newest_first(&self) -> LearnPathResult<Vec<LearningPath>> {
            let mut paths = self.paths.lock().unwrap().clone();
            paths.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
            });
            Ok(paths)
        }

        async fn delete(&self, id: LearningPathId) -> LearnPathResult<bool> {
            let mut paths = self.paths.lock().unwrap();
            let before = paths.len();
            paths.retain(|p| p.id != id);
            Ok(paths.len() != before)
        }
    }

    /// Store whose writes always fail as if the pool were exhausted.
    #[derive(Clone, Default)]
    pub struct UnavailableRepository;

    impl LearningPathRepository for UnavailableRepository {
        async fn create(&self, _path: &LearningPath) -> LearnPathResult<()> {
            Err(LearnPathError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn find_by_id(&self, _id: LearningPathId) -> LearnPathResult<Option<LearningPath>> {
            Err(LearnPathError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn list_newest_first(&self) -> LearnPathResult<Vec<LearningPath>> {
            Err(LearnPathError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn delete(&self, _id: LearningPathId) -> LearnPathResult<bool> {
            Err(LearnPathError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    /// Mock generator that counts how often it is asked for content.
    #[derive(Clone, Default)]
    pub struct CountingGenerator {
        inner: MockCurriculumGenerator,
        pub calls: Arc<AtomicUsize>,
    }

    impl CountingGenerator {
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CurriculumGenerator for CountingGenerator {
        async fn generate(&self, topic: &Topic) -> Result<Curriculum, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.generate(topic).await
        }

        async fn refine(
            &self,
            topic: &Topic,
            previous: &Curriculum,
            feedback: &Refinement,
        ) -> Result<Curriculum, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.refine(topic, previous, feedback).await
        }
    }

    /// Generator with a scripted outcome.
    pub enum ScriptedGenerator {
        Fails,
        Returns(Curriculum),
        Sleeps(Duration),
    }

    impl CurriculumGenerator for ScriptedGenerator {
        async fn generate(&self, _topic: &Topic) -> Result<Curriculum, GenerationError> {
            match self {
                ScriptedGenerator::Fails => Err(GenerationError::Upstream {
                    status: 500,
                    body: "upstream exploded".to_string(),
                }),
                ScriptedGenerator::Returns(curriculum) => Ok(curriculum.clone()),
                ScriptedGenerator::Sleeps(duration) => {
                    tokio::time::sleep(*duration).await;
                    Ok(Curriculum::default())
                }
            }
        }

        async fn refine(
            &self,
            topic: &Topic,
            _previous: &Curriculum,
            _feedback: &Refinement,
        ) -> Result<Curriculum, GenerationError> {
            self.generate(topic).await
        }
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::{TimeDelta, Utc};
    use kernel::id::LearningPathId;

    use super::support::*;
    use crate::application::config::LearnPathConfig;
    use crate::application::generate_path::{GeneratePathInput, GeneratePathUseCase};
    use crate::application::list_history::ListHistoryUseCase;
    use crate::application::path_record::{DeletePathUseCase, GetPathUseCase};
    use crate::application::refine_path::{RefinePathInput, RefinePathUseCase};
    use crate::domain::entities::LearningPath;
    use crate::domain::repository::{CurriculumGenerator, LearningPathRepository};
    use crate::domain::services::{LESSONS_PER_MODULE, MODULES_PER_PATH};
    use crate::domain::value_objects::Topic;
    use crate::error::{GenerationError, LearnPathError};
    use crate::infra::mock::mock_curriculum;

    fn generate_use_case<R, G>(repo: R, generator: G) -> GeneratePathUseCase<R, G>
    where
        R: LearningPathRepository,
        G: CurriculumGenerator,
    {
        GeneratePathUseCase::new(
            Arc::new(repo),
            Arc::new(generator),
            Arc::new(LearnPathConfig::default()),
        )
    }

    fn refine_use_case<R, G>(repo: R, generator: G) -> RefinePathUseCase<R, G>
    where
        R: LearningPathRepository,
        G: CurriculumGenerator,
    {
        RefinePathUseCase::new(
            Arc::new(repo),
            Arc::new(generator),
            Arc::new(LearnPathConfig::default()),
        )
    }

    fn generate_input(topic: &str) -> GeneratePathInput {
        GeneratePathInput {
            topic: topic.to_string(),
        }
    }

    #[tokio::test]
    async fn test_generate_react_hooks_with_mock() {
        let repo = InMemoryRepository::default();
        let use_case = generate_use_case(repo.clone(), CountingGenerator::default());

        let path = use_case.execute(generate_input("React Hooks")).await.unwrap();

        assert_eq!(path.topic.as_str(), "React Hooks");
        assert_eq!(path.modules()[0].title, "Introduction to React Hooks");
        assert!(MODULES_PER_PATH.contains(&path.modules().len()));
        assert!(
            path.modules()
                .iter()
                .all(|m| LESSONS_PER_MODULE.contains(&m.lessons.len()))
        );
        assert_eq!(repo.all(), vec![path]);
    }

    #[tokio::test]
    async fn test_topic_is_trimmed_before_storage() {
        let repo = InMemoryRepository::default();
        let use_case = generate_use_case(repo.clone(), CountingGenerator::default());

        let path = use_case.execute(generate_input("   Rust   ")).await.unwrap();

        assert_eq!(path.topic.as_str(), "Rust");
        assert_eq!(path.modules()[0].title, "Introduction to Rust");
    }

    #[tokio::test]
    async fn test_empty_topic_rejected_before_generator_runs() {
        let repo = InMemoryRepository::default();
        let generator = CountingGenerator::default();
        let use_case = generate_use_case(repo.clone(), generator.clone());

        for topic in ["", "   ", "\n\t"] {
            let err = use_case.execute(generate_input(topic)).await.unwrap_err();
            match err {
                LearnPathError::Validation(issues) => assert_eq!(issues[0].field, "topic"),
                other => panic!("expected validation error, got {other:?}"),
            }
        }

        assert_eq!(generator.calls(), 0);
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_overlong_topic_rejected() {
        let generator = CountingGenerator::default();
        let use_case = generate_use_case(InMemoryRepository::default(), generator.clone());

        let err = use_case
            .execute(generate_input(&"t".repeat(101)))
            .await
            .unwrap_err();

        assert!(matches!(err, LearnPathError::Validation(_)));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_generator_failure_stores_nothing() {
        let repo = InMemoryRepository::default();
        let use_case = generate_use_case(repo.clone(), ScriptedGenerator::Fails);

        let err = use_case.execute(generate_input("Rust")).await.unwrap_err();

        assert!(matches!(
            err,
            LearnPathError::Generation(GenerationError::Upstream { status: 500, .. })
        ));
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_out_of_bounds_curriculum_is_rejected() {
        let topic = Topic::parse("Rust").unwrap();
        let mut too_short = mock_curriculum(&topic);
        too_short.modules.truncate(3);

        let repo = InMemoryRepository::default();
        let use_case = generate_use_case(repo.clone(), ScriptedGenerator::Returns(too_short));

        let err = use_case.execute(generate_input("Rust")).await.unwrap_err();

        assert!(matches!(
            err,
            LearnPathError::Generation(GenerationError::InvalidStructure(_))
        ));
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_slow_generator_times_out() {
        let config = LearnPathConfig {
            generation_timeout: Duration::from_millis(20),
            ..LearnPathConfig::default()
        };
        let use_case = GeneratePathUseCase::new(
            Arc::new(InMemoryRepository::default()),
            Arc::new(ScriptedGenerator::Sleeps(Duration::from_millis(500))),
            Arc::new(config),
        );

        let err = use_case.execute(generate_input("Rust")).await.unwrap_err();

        assert!(matches!(err, LearnPathError::GenerationTimeout(_)));
    }

    #[tokio::test]
    async fn test_store_failure_is_persistence_error() {
        let use_case = generate_use_case(UnavailableRepository, CountingGenerator::default());

        let err = use_case.execute(generate_input("Rust")).await.unwrap_err();

        assert!(matches!(err, LearnPathError::Database(_)));
        assert_eq!(err.code(), "PERSISTENCE_ERROR");
    }

    #[tokio::test]
    async fn test_refinement_over_limit_rejected() {
        let generator = CountingGenerator::default();
        let use_case = refine_use_case(InMemoryRepository::default(), generator.clone());
        let previous = mock_curriculum(&Topic::parse("Rust").unwrap());

        let err = use_case
            .execute(RefinePathInput {
                topic: "Rust".to_string(),
                refinement: "r".repeat(501),
                previous: Some(previous),
            })
            .await
            .unwrap_err();

        match err {
            LearnPathError::Validation(issues) => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].field, "refinement");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_refine_reports_every_invalid_field() {
        let use_case =
            refine_use_case(InMemoryRepository::default(), CountingGenerator::default());

        let err = use_case
            .execute(RefinePathInput {
                topic: " ".to_string(),
                refinement: String::new(),
                previous: None,
            })
            .await
            .unwrap_err();

        let LearnPathError::Validation(issues) = err else {
            panic!("expected validation error");
        };
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["topic", "refinement", "previousPath"]);
    }

    #[tokio::test]
    async fn test_refine_rejects_previous_path_outside_bounds() {
        let generator = CountingGenerator::default();
        let use_case = refine_use_case(InMemoryRepository::default(), generator.clone());
        let mut previous = mock_curriculum(&Topic::parse("Rust").unwrap());
        previous.modules.truncate(2);
        previous.modules[0].lessons.clear();

        let err = use_case
            .execute(RefinePathInput {
                topic: "Rust".to_string(),
                refinement: "Shorter please".to_string(),
                previous: Some(previous),
            })
            .await
            .unwrap_err();

        let LearnPathError::Validation(issues) = err else {
            panic!("expected validation error");
        };
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.field == "previousPath.modules"));
        assert!(issues[0].message.contains("between 4 and 7 modules (got 2)"));
        assert!(issues[1].message.contains("Module 1 must have between 3 and 5 lessons"));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_refine_creates_new_record_under_same_topic() {
        let repo = InMemoryRepository::default();
        let original = generate_use_case(repo.clone(), CountingGenerator::default())
            .execute(generate_input("Rust"))
            .await
            .unwrap();

        let refined = refine_use_case(repo.clone(), CountingGenerator::default())
            .execute(RefinePathInput {
                topic: "Rust".to_string(),
                refinement: "Add more project work".to_string(),
                previous: Some(original.curriculum.clone()),
            })
            .await
            .unwrap();

        assert_ne!(refined.id, original.id);
        assert_eq!(refined.topic, original.topic);
        assert_eq!(refined.modules()[0].title, "Introduction to Rust (Refined)");
        assert_eq!(repo.len(), 2);
        // the original record is untouched
        assert!(repo.all().contains(&original));
    }

    #[tokio::test]
    async fn test_get_and_delete() {
        let repo = InMemoryRepository::default();
        let config = Arc::new(LearnPathConfig::default());
        let path = generate_use_case(repo.clone(), CountingGenerator::default())
            .execute(generate_input("SQL"))
            .await
            .unwrap();

        let get = GetPathUseCase::new(Arc::new(repo.clone()), config.clone());
        let delete = DeletePathUseCase::new(Arc::new(repo.clone()), config);

        assert_eq!(get.execute(path.id).await.unwrap(), path);
        delete.execute(path.id).await.unwrap();
        assert!(matches!(
            get.execute(path.id).await,
            Err(LearnPathError::NotFound)
        ));
        assert!(matches!(
            delete.execute(path.id).await,
            Err(LearnPathError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let delete = DeletePathUseCase::new(
            Arc::new(InMemoryRepository::default()),
            Arc::new(LearnPathConfig::default()),
        );

        let err = delete.execute(LearningPathId::new()).await.unwrap_err();

        assert!(matches!(err, LearnPathError::NotFound));
    }

    #[tokio::test]
    async fn test_history_is_newest_first_and_stable() {
        let repo = InMemoryRepository::default();
        let now = Utc::now();
        let topic = Topic::parse("Rust").unwrap();
        let curriculum = mock_curriculum(&topic);

        let offsets = [30, 10, 10, 20];
        for secs in offsets {
            let path = LearningPath::restore(
                LearningPathId::new(),
                topic.clone(),
                curriculum.clone(),
                now - TimeDelta::seconds(secs),
            );
            repo.create(&path).await.unwrap();
        }

        let history = ListHistoryUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(LearnPathConfig::default()),
        );
        let first = history.execute().await.unwrap();
        let second = history.execute().await.unwrap();

        assert_eq!(first.len(), 4);
        assert!(first.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        let ids = |paths: &[LearningPath]| paths.iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
    }
}

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use platform::rate_limit::{FixedWindowRateLimiter, RateLimitConfig};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::*;
    use crate::application::config::LearnPathConfig;
    use crate::presentation::router::learnpath_router_generic;

    fn app_with(repo: InMemoryRepository, config: LearnPathConfig) -> Router {
        learnpath_router_generic(
            repo,
            CountingGenerator::default(),
            Arc::new(FixedWindowRateLimiter::new()),
            config,
        )
    }

    fn app(repo: InMemoryRepository) -> Router {
        app_with(repo, LearnPathConfig::default())
    }

    fn post_json(uri: &str, client: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-forwarded-for", client)
            .body(body.into())
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn delete(uri: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_generate_returns_created_path() {
        let repo = InMemoryRepository::default();
        let response = app(repo.clone())
            .oneshot(post_json(
                "/learnpath",
                "10.0.0.1",
                json!({"topic": "React Hooks"}).to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()["x-ratelimit-limit"], "10");
        assert_eq!(response.headers()["x-ratelimit-remaining"], "9");

        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["topic"], "React Hooks");
        assert_eq!(
            body["data"]["modules"][0]["title"],
            "Introduction to React Hooks"
        );
        assert!(body["data"]["createdAt"].is_string());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed_request() {
        let response = app(InMemoryRepository::default())
            .oneshot(post_json("/learnpath", "10.0.0.1", "{\"topic\": "))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "MALFORMED_REQUEST");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_malformed_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/learnpath")
            .body(Body::from(json!({"topic": "Rust"}).to_string()))
            .unwrap();

        let response = app(InMemoryRepository::default())
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_topic_is_validation_error() {
        let repo = InMemoryRepository::default();
        let response = app(repo.clone())
            .oneshot(post_json(
                "/learnpath",
                "10.0.0.1",
                json!({"topic": "   "}).to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"][0]["field"], "topic");
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_wrongly_typed_field_is_malformed_request() {
        let response = app(InMemoryRepository::default())
            .oneshot(post_json(
                "/learnpath",
                "10.0.0.1",
                json!({"topic": 42}).to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["code"], "MALFORMED_REQUEST");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_non_object_body_is_malformed_request() {
        for raw in ["\"x\"", "null", "[]", "[\"Rust\"]", "7"] {
            let repo = InMemoryRepository::default();
            let response = app(repo.clone())
                .oneshot(post_json("/learnpath", "10.0.0.1", raw))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{raw}");
            assert_eq!(json_body(response).await["code"], "MALFORMED_REQUEST", "{raw}");
            assert_eq!(repo.len(), 0);
        }
    }

    #[tokio::test]
    async fn test_refine_with_broken_previous_path_is_validation_error() {
        let repo = InMemoryRepository::default();
        let response = app(repo.clone())
            .oneshot(post_json(
                "/learnpath/refine",
                "10.0.0.1",
                json!({
                    "topic": "Rust",
                    "refinement": "More exercises",
                    "previousPath": {"modules": [{"title": "a", "lessons": []}]}
                })
                .to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
        let details = body["details"].as_array().unwrap();
        assert_eq!(details.len(), 2);
        assert!(details.iter().all(|d| d["field"] == "previousPath.modules"));
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_generation_quota_per_client() {
        let config = LearnPathConfig {
            generate_rate_limit: RateLimitConfig::new(2, 60),
            ..LearnPathConfig::default()
        };
        let app = app_with(InMemoryRepository::default(), config);
        let body = || json!({"topic": "Rust"}).to_string();

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(post_json("/learnpath", "10.0.0.1", body()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        // the legacy alias draws from the same bucket
        let response = app
            .clone()
            .oneshot(post_json("/generate-path", "10.0.0.1", body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()["x-ratelimit-remaining"], "0");
        assert!(response.headers().contains_key(header::RETRY_AFTER));
        let payload = json_body(response).await;
        assert_eq!(payload["code"], "RATE_LIMITED");
        assert!(payload["details"]["retryAfter"].as_u64().unwrap() <= 60);

        let other_client = app
            .oneshot(post_json("/learnpath", "10.0.0.2", body()))
            .await
            .unwrap();
        assert_eq!(other_client.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_refinement_has_its_own_quota() {
        let config = LearnPathConfig {
            generate_rate_limit: RateLimitConfig::new(5, 60),
            refine_rate_limit: RateLimitConfig::new(1, 60),
            ..LearnPathConfig::default()
        };
        let app = app_with(InMemoryRepository::default(), config);

        let created = json_body(
            app.clone()
                .oneshot(post_json(
                    "/learnpath",
                    "10.0.0.9",
                    json!({"topic": "Docker"}).to_string(),
                ))
                .await
                .unwrap(),
        )
        .await;
        let refine_body = json!({
            "topic": "Docker",
            "refinement": "More about networking",
            "previousPath": { "modules": created["data"]["modules"] },
        })
        .to_string();

        let first = app
            .clone()
            .oneshot(post_json("/learnpath/refine", "10.0.0.9", refine_body.clone()))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);
        let refined = json_body(first).await;
        assert_eq!(
            refined["data"]["modules"][0]["title"],
            "Introduction to Docker (Refined)"
        );

        let second = app
            .clone()
            .oneshot(post_json("/learnpath/refine", "10.0.0.9", refine_body))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);

        // generation quota is untouched by refinements
        let generate = app
            .oneshot(post_json(
                "/learnpath",
                "10.0.0.9",
                json!({"topic": "Docker"}).to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(generate.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_history_fetch_and_delete_round() {
        let repo = InMemoryRepository::default();
        let app = app(repo.clone());

        let created = json_body(
            app.clone()
                .oneshot(post_json(
                    "/learnpath",
                    "10.0.0.1",
                    json!({"topic": "Go"}).to_string(),
                ))
                .await
                .unwrap(),
        )
        .await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let history = json_body(app.clone().oneshot(get("/learnpath/history")).await.unwrap()).await;
        assert_eq!(history["success"], true);
        assert_eq!(history["count"], 1);
        assert_eq!(history["data"][0]["id"], id.as_str());

        let legacy = json_body(app.clone().oneshot(get("/paths")).await.unwrap()).await;
        assert_eq!(legacy["count"], 1);

        let fetched = app
            .clone()
            .oneshot(get(&format!("/learnpath/{id}")))
            .await
            .unwrap();
        assert_eq!(fetched.status(), StatusCode::OK);

        let deleted = app
            .clone()
            .oneshot(delete(&format!("/paths/{id}")))
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::OK);
        assert_eq!(json_body(deleted).await["success"], true);

        let missing = app
            .clone()
            .oneshot(get(&format!("/learnpath/{id}")))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(missing).await["message"], "Learning path not found");

        let delete_again = app
            .oneshot(delete(&format!("/learnpath/{id}")))
            .await
            .unwrap();
        assert_eq!(delete_again.status(), StatusCode::NOT_FOUND);
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_non_uuid_id_is_malformed() {
        let response = app(InMemoryRepository::default())
            .oneshot(get("/learnpath/not-a-uuid"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["code"], "MALFORMED_REQUEST");
    }

    #[tokio::test]
    async fn test_store_outage_surfaces_as_unavailable() {
        let app = learnpath_router_generic(
            UnavailableRepository,
            CountingGenerator::default(),
            Arc::new(FixedWindowRateLimiter::new()),
            LearnPathConfig::default(),
        );

        let response = app.oneshot(get("/learnpath/history")).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["code"], "PERSISTENCE_ERROR");
    }
}
