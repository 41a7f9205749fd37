//! Tests for the booking crate
//!
//! The routers run against in-memory repositories. Sessions are opened with
//! the auth crate's own entity and token signer so the middleware sees real
//! cookies.

#[cfg(test)]
mod support {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::body::Body;
    use axum::http::{HeaderMap, HeaderValue, Request, Response, header};
    use chrono::NaiveDate;
    use http_body_util::BodyExt;
    use kernel::id::{PropertyId, ReservationId, UserId};
    use uuid::Uuid;

    use auth::application::session_token::sign_session_token;
    use auth::domain::entity::AuthSession;
    use auth::domain::repository::AuthSessionRepository;
    use auth::{AuthConfig, AuthError, AuthMiddlewareState, AuthResult};
    use platform::client::ClientFingerprint;

    use crate::application::config::BookingConfig;
    use crate::domain::entity::property::sample_new_property;
    use crate::domain::entity::{
        GuestReservation, NewProperty, Property, RatedProperty, Reservation,
    };
    use crate::domain::repository::{PropertyRepository, ReservationRepository};
    use crate::domain::search::{PropertySearch, dollars_to_cents};
    use crate::error::{BookingError, BookingResult};
    use crate::presentation::router::booking_router_generic;

    pub const USER_AGENT: &str = "Mozilla/5.0 (LightBnB test)";

    // ------------------------------------------------------------------------
    // Sessions
    // ------------------------------------------------------------------------

    #[derive(Clone, Default)]
    pub struct MemorySessionRepository {
        sessions: Arc<Mutex<HashMap<Uuid, AuthSession>>>,
    }

    impl AuthSessionRepository for MemorySessionRepository {
        async fn create_session(&self, session: &AuthSession) -> AuthResult<()> {
            self.sessions
                .lock()
                .unwrap()
                .insert(session.session_id, session.clone());
            Ok(())
        }

        async fn find_session(
            &self,
            session_id: Uuid,
            fingerprint_hash: &[u8],
        ) -> AuthResult<Option<AuthSession>> {
            match self.sessions.lock().unwrap().get(&session_id) {
                Some(s) if s.client_fingerprint_hash != fingerprint_hash => {
                    Err(AuthError::SessionFingerprintMismatch)
                }
                found => Ok(found.cloned()),
            }
        }

        async fn touch_session(&self, _session: &AuthSession) -> AuthResult<()> {
            Ok(())
        }

        async fn delete_session(&self, session_id: Uuid) -> AuthResult<()> {
            self.sessions.lock().unwrap().remove(&session_id);
            Ok(())
        }

        async fn cleanup_expired(&self) -> AuthResult<u64> {
            Ok(0)
        }
    }

    // ------------------------------------------------------------------------
    // Listings
    // ------------------------------------------------------------------------

    #[derive(Default)]
    struct Tables {
        properties: Vec<Property>,
        ratings: Vec<(PropertyId, i32)>,
        reservations: Vec<Reservation>,
        /// Owners the insert accepts; mirrors the `users` foreign key
        users: Vec<UserId>,
    }

    #[derive(Clone, Default)]
    pub struct MemoryBookingRepository {
        tables: Arc<Mutex<Tables>>,
    }

    impl MemoryBookingRepository {
        pub fn add_user(&self, id: i32) -> UserId {
            let id = UserId::new(id);
            self.tables.lock().unwrap().users.push(id);
            id
        }

        pub fn add_property(&self, owner: UserId, title: &str, city: &str, dollars: i32) -> PropertyId {
            let mut tables = self.tables.lock().unwrap();
            let id = PropertyId::new(tables.properties.len() as i32 + 1);
            let mut draft = sample_new_property(owner);
            draft.title = title.to_string();
            draft.city = city.to_string();
            draft.cost_per_night = dollars_to_cents(dollars);
            tables.properties.push(draft.with_id(id));
            id
        }

        pub fn add_rating(&self, property: PropertyId, rating: i32) {
            self.tables.lock().unwrap().ratings.push((property, rating));
        }

        pub fn add_reservation(&self, property: PropertyId, guest: UserId, start: &str, end: &str) {
            let mut tables = self.tables.lock().unwrap();
            let id = ReservationId::new(tables.reservations.len() as i32 + 1);
            tables.reservations.push(Reservation {
                id,
                property_id: property,
                guest_id: guest,
                start_date: start.parse::<NaiveDate>().unwrap(),
                end_date: end.parse::<NaiveDate>().unwrap(),
            });
        }

        pub fn property_count(&self) -> usize {
            self.tables.lock().unwrap().properties.len()
        }

        fn rated(tables: &Tables, property: &Property) -> RatedProperty {
            let ratings: Vec<i32> = tables
                .ratings
                .iter()
                .filter(|(id, _)| *id == property.id)
                .map(|(_, r)| *r)
                .collect();
            let average_rating = if ratings.is_empty() {
                None
            } else {
                Some(ratings.iter().sum::<i32>() as f64 / ratings.len() as f64)
            };
            RatedProperty {
                property: property.clone(),
                average_rating,
            }
        }
    }

    impl PropertyRepository for MemoryBookingRepository {
        async fn search_properties(
            &self,
            search: &PropertySearch,
        ) -> BookingResult<Vec<RatedProperty>> {
            let tables = self.tables.lock().unwrap();
            let mut found: Vec<RatedProperty> = tables
                .properties
                .iter()
                .filter(|p| search.city_filter().is_none_or(|city| p.city.contains(city)))
                .filter(|p| search.owner_id.is_none_or(|owner| p.owner_id == owner))
                .filter(|p| {
                    search
                        .minimum_price()
                        .is_none_or(|min| p.cost_per_night >= dollars_to_cents(min))
                })
                .filter(|p| {
                    search
                        .maximum_price()
                        .is_none_or(|max| p.cost_per_night <= dollars_to_cents(max))
                })
                .map(|p| Self::rated(&tables, p))
                .filter(|rated| match search.rating_filter() {
                    Some(min) => rated.average_rating.is_some_and(|avg| avg >= min),
                    None => true,
                })
                .collect();

            found.sort_by_key(|rated| rated.property.cost_per_night);
            found.truncate(search.page_size() as usize);
            Ok(found)
        }

        async fn insert_property(&self, property: &NewProperty) -> BookingResult<Property> {
            let mut tables = self.tables.lock().unwrap();
            if !tables.users.contains(&property.owner_id) {
                return Err(BookingError::OwnerNotFound);
            }
            let id = PropertyId::new(tables.properties.len() as i32 + 1);
            let created = property.clone().with_id(id);
            tables.properties.push(created.clone());
            Ok(created)
        }
    }

    impl ReservationRepository for MemoryBookingRepository {
        async fn find_guest_reservations(
            &self,
            guest_id: UserId,
            limit: i64,
        ) -> BookingResult<Vec<GuestReservation>> {
            let tables = self.tables.lock().unwrap();
            let mut found: Vec<GuestReservation> = tables
                .reservations
                .iter()
                .filter(|r| r.guest_id == guest_id)
                .filter_map(|r| {
                    let property = tables.properties.iter().find(|p| p.id == r.property_id)?;
                    Some(GuestReservation {
                        reservation: r.clone(),
                        property: Self::rated(&tables, property),
                    })
                })
                .collect();

            found.sort_by_key(|booked| booked.reservation.start_date);
            found.truncate(limit as usize);
            Ok(found)
        }
    }

    // ------------------------------------------------------------------------
    // App
    // ------------------------------------------------------------------------

    pub struct TestApp {
        pub repo: MemoryBookingRepository,
        sessions: MemorySessionRepository,
        auth_config: AuthConfig,
        config: BookingConfig,
    }

    impl TestApp {
        pub fn new() -> Self {
            Self::with_config(BookingConfig::default())
        }

        pub fn with_config(config: BookingConfig) -> Self {
            Self {
                repo: MemoryBookingRepository::default(),
                sessions: MemorySessionRepository::default(),
                auth_config: AuthConfig::development(),
                config,
            }
        }

        pub fn router(&self) -> Router {
            let auth_state =
                AuthMiddlewareState::new(self.sessions.clone(), self.auth_config.clone());
            Router::new().nest(
                "/api",
                booking_router_generic(self.repo.clone(), self.config.clone(), auth_state),
            )
        }

        /// Open a session for `user_id` and return the `Cookie` header value
        pub async fn login(&self, user_id: UserId) -> String {
            let mut headers = HeaderMap::new();
            headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
            let fingerprint = ClientFingerprint::from_headers(&headers, None);

            let session = AuthSession::new(user_id, &fingerprint, chrono::Duration::hours(1));
            self.sessions.create_session(&session).await.unwrap();

            let token = sign_session_token(&self.auth_config.session_secret, session.session_id);
            format!("{}={}", self.auth_config.session_cookie_name, token)
        }
    }

    pub fn request(
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::USER_AGENT, USER_AGENT);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }
}

#[cfg(test)]
mod property_tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use super::support::*;
    use crate::application::config::BookingConfig;

    fn seeded() -> TestApp {
        let app = TestApp::new();
        let owner = app.repo.add_user(1);
        let other = app.repo.add_user(2);

        let lamp = app.repo.add_property(owner, "Speed lamp", "Sotboske", 930);
        let corner = app.repo.add_property(owner, "Blank corner", "Bohbatev", 85);
        let habit = app.repo.add_property(other, "Habit mix", "Vancouver", 460);
        app.repo.add_property(other, "Headed know", "North Vancouver", 30);

        app.repo.add_rating(lamp, 3);
        app.repo.add_rating(lamp, 4);
        app.repo.add_rating(corner, 5);
        app.repo.add_rating(habit, 2);
        app
    }

    fn titles(json: &serde_json::Value) -> Vec<String> {
        json["properties"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn search_without_filters_orders_by_price() {
        let app = seeded();
        let response = app
            .router()
            .oneshot(request("GET", "/api/properties", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(
            titles(&json),
            vec!["Headed know", "Blank corner", "Habit mix", "Speed lamp"]
        );
        assert_eq!(json["properties"][0]["average_rating"], serde_json::Value::Null);
        assert_eq!(json["properties"][3]["average_rating"], 3.5);
        assert_eq!(json["properties"][3]["cost_per_night"], 93000);
    }

    #[tokio::test]
    async fn search_by_city_matches_substring() {
        let app = seeded();
        let response = app
            .router()
            .oneshot(request("GET", "/api/properties?city=Vancouver", None, None))
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(titles(&json), vec!["Headed know", "Habit mix"]);
    }

    #[tokio::test]
    async fn empty_form_fields_do_not_filter() {
        let app = seeded();
        let uri = "/api/properties?city=&minimum_price_per_night=&maximum_price_per_night=&minimum_rating=";
        let response = app
            .router()
            .oneshot(request("GET", uri, None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(titles(&body_json(response).await).len(), 4);
    }

    #[tokio::test]
    async fn price_filters_are_in_dollars() {
        let app = seeded();
        let response = app
            .router()
            .oneshot(request(
                "GET",
                "/api/properties?minimum_price_per_night=80&maximum_price_per_night=500",
                None,
                None,
            ))
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(titles(&json), vec!["Blank corner", "Habit mix"]);
    }

    #[tokio::test]
    async fn minimum_rating_skips_unrated() {
        let app = seeded();
        let response = app
            .router()
            .oneshot(request("GET", "/api/properties?minimum_rating=3", None, None))
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(titles(&json), vec!["Blank corner", "Speed lamp"]);
    }

    #[tokio::test]
    async fn owner_filter_and_limit() {
        let app = seeded();
        let response = app
            .router()
            .oneshot(request("GET", "/api/properties?owner_id=2&limit=1", None, None))
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(titles(&json), vec!["Headed know"]);
    }

    #[tokio::test]
    async fn zero_limit_falls_back_to_default() {
        let app = TestApp::new();
        let owner = app.repo.add_user(1);
        for i in 0..15 {
            app.repo.add_property(owner, &format!("Listing {i}"), "Calgary", 50 + i);
        }

        let response = app
            .router()
            .oneshot(request("GET", "/api/properties?limit=0", None, None))
            .await
            .unwrap();

        assert_eq!(titles(&body_json(response).await).len(), 10);
    }

    #[tokio::test]
    async fn zero_filters_are_ignored() {
        let app = seeded();
        let response = app
            .router()
            .oneshot(request(
                "GET",
                "/api/properties?minimum_rating=0&maximum_price_per_night=0&minimum_price_per_night=0",
                None,
                None,
            ))
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(titles(&json).len(), 4);
        assert_eq!(titles(&json)[0], "Headed know");
    }

    #[tokio::test]
    async fn configured_max_limit_applies_to_search() {
        let app = TestApp::with_config(BookingConfig {
            default_limit: 10,
            max_limit: 500,
        });
        let owner = app.repo.add_user(1);
        for i in 0..120 {
            app.repo.add_property(owner, &format!("Listing {i}"), "Calgary", 50 + i);
        }

        let response = app
            .router()
            .oneshot(request("GET", "/api/properties?limit=300", None, None))
            .await
            .unwrap();

        assert_eq!(titles(&body_json(response).await).len(), 120);
    }

    #[tokio::test]
    async fn non_numeric_filter_is_bad_request() {
        let response = seeded()
            .router()
            .oneshot(request("GET", "/api/properties?limit=ten", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["kind"], "BAD_REQUEST");
        assert!(json["error"].as_str().unwrap().starts_with("limit must be a number"));
    }

    fn new_listing() -> serde_json::Value {
        json!({
            "owner_id": 2,
            "title": "Cozy apartment in downtown",
            "description": "A lovely one-bedroom apartment in the heart of the city",
            "thumbnail_photo_url": "https://example.com/thumbnail.jpg",
            "cover_photo_url": "https://example.com/cover.jpg",
            "cost_per_night": 10000,
            "street": "123 Main St",
            "city": "Anytown",
            "province": "ON",
            "post_code": "A1B 2C3",
            "country": "Canada",
            "parking_spaces": 1,
            "number_of_bathrooms": 1,
            "number_of_bedrooms": 1
        })
    }

    #[tokio::test]
    async fn create_property_requires_session() {
        let app = seeded();
        let response = app
            .router()
            .oneshot(request("POST", "/api/properties", None, Some(new_listing())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(app.repo.property_count(), 4);
    }

    #[tokio::test]
    async fn create_property_is_owned_by_session_user() {
        let app = seeded();
        let cookie = app.login(kernel::id::UserId::new(1)).await;

        let response = app
            .router()
            .oneshot(request(
                "POST",
                "/api/properties",
                Some(&cookie),
                Some(new_listing()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["id"], 5);
        assert_eq!(json["owner_id"], 1);
        assert_eq!(json["title"], "Cozy apartment in downtown");
        assert_eq!(json["active"], true);
        assert_eq!(app.repo.property_count(), 5);
    }

    #[tokio::test]
    async fn create_property_validates_title() {
        let app = seeded();
        let cookie = app.login(kernel::id::UserId::new(1)).await;
        let mut listing = new_listing();
        listing["title"] = json!("   ");

        let response = app
            .router()
            .oneshot(request("POST", "/api/properties", Some(&cookie), Some(listing)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Title cannot be empty");
    }

    #[tokio::test]
    async fn create_property_with_missing_fields_is_json_error() {
        let app = seeded();
        let cookie = app.login(kernel::id::UserId::new(1)).await;

        let response = app
            .router()
            .oneshot(request(
                "POST",
                "/api/properties",
                Some(&cookie),
                Some(json!({"title": "Half a listing"})),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["kind"], "BAD_REQUEST");
        assert!(json["error"].is_string());
        assert_eq!(app.repo.property_count(), 4);
    }

    #[tokio::test]
    async fn create_property_for_deleted_user_is_not_found() {
        let app = seeded();
        let cookie = app.login(kernel::id::UserId::new(42)).await;

        let response = app
            .router()
            .oneshot(request(
                "POST",
                "/api/properties",
                Some(&cookie),
                Some(new_listing()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "no user with that id");
    }
}

#[cfg(test)]
mod reservation_tests {
    use axum::http::StatusCode;
    use kernel::id::UserId;
    use tower::ServiceExt;

    use super::support::*;

    #[tokio::test]
    async fn reservations_require_session() {
        let response = TestApp::new()
            .router()
            .oneshot(request("GET", "/api/reservations", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["kind"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn forged_cookie_is_anonymous() {
        let cookie = format!("session={}.AAAA", uuid::Uuid::new_v4());
        let response = TestApp::new()
            .router()
            .oneshot(request("GET", "/api/reservations", Some(&cookie), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn guest_sees_own_reservations_by_start_date() {
        let app = TestApp::new();
        let owner = app.repo.add_user(1);
        let guest = app.repo.add_user(2);
        let other = app.repo.add_user(3);

        let lamp = app.repo.add_property(owner, "Speed lamp", "Sotboske", 930);
        let corner = app.repo.add_property(owner, "Blank corner", "Bohbatev", 85);
        app.repo.add_rating(lamp, 4);

        app.repo.add_reservation(lamp, guest, "2019-01-04", "2019-02-01");
        app.repo.add_reservation(corner, guest, "2018-09-11", "2018-09-26");
        app.repo.add_reservation(corner, other, "2017-01-01", "2017-01-05");

        let cookie = app.login(guest).await;
        let response = app
            .router()
            .oneshot(request("GET", "/api/reservations", Some(&cookie), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let reservations = json["reservations"].as_array().unwrap();
        assert_eq!(reservations.len(), 2);

        assert_eq!(reservations[0]["title"], "Blank corner");
        assert_eq!(reservations[0]["reservation_id"], 2);
        assert_eq!(reservations[0]["start_date"], "2018-09-11");
        assert_eq!(reservations[0]["average_rating"], serde_json::Value::Null);

        assert_eq!(reservations[1]["title"], "Speed lamp");
        assert_eq!(reservations[1]["end_date"], "2019-02-01");
        assert_eq!(reservations[1]["average_rating"], 4.0);
    }

    #[tokio::test]
    async fn reservation_limit_is_applied() {
        let app = TestApp::new();
        let owner = app.repo.add_user(1);
        let lamp = app.repo.add_property(owner, "Speed lamp", "Sotboske", 930);
        for day in 1..=5 {
            let start = format!("2020-03-0{day}");
            let end = format!("2020-03-0{}", day + 1);
            app.repo.add_reservation(lamp, owner, &start, &end);
        }

        let cookie = app.login(UserId::new(1)).await;
        let response = app
            .router()
            .oneshot(request("GET", "/api/reservations?limit=2", Some(&cookie), None))
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["reservations"].as_array().unwrap().len(), 2);
        assert_eq!(json["reservations"][0]["start_date"], "2020-03-01");
    }
}
