//! Data access with explicit mock fallback.
//!
//! The service tries its transport first. When the transport fails, or a
//! reply does not decode, the canned development payload for that endpoint
//! is served instead and the response is tagged with its source, so
//! callers can always tell demo data from live data.

use chrono::{DateTime, Utc};
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Errors a transport can produce.
#[derive(Debug)]
pub enum TransportError {
    /// No backend is reachable (the normal development state).
    Offline,
    /// The backend answered with a non-success status.
    Http(u16),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Offline => write!(f, "no backend reachable"),
            TransportError::Http(status) => write!(f, "HTTP error, status: {}", status),
        }
    }
}

impl std::error::Error for TransportError {}

/// Carries one request to a backend and returns the `data` payload.
pub trait Transport {
    fn request(
        &mut self,
        method: &str,
        endpoint: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Value, TransportError>;
}

/// The development default: every request fails, so every response comes
/// from the mock table.
#[derive(Debug, Default)]
pub struct OfflineTransport;

impl Transport for OfflineTransport {
    fn request(
        &mut self,
        _method: &str,
        _endpoint: &str,
        _token: Option<&str>,
        _body: Option<&Value>,
    ) -> Result<Value, TransportError> {
        Err(TransportError::Offline)
    }
}

/// Where a response's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    /// A backend answered.
    Live,
    /// The transport failed and the canned development payload was used.
    MockFallback,
}

impl ResponseSource {
    pub fn is_mock(&self) -> bool {
        matches!(self, ResponseSource::MockFallback)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: String,
    pub source: ResponseSource,
}

// ── Payload types ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodPoint {
    pub date: String,
    pub mood: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub unlocked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub total_sessions: u32,
    pub total_minutes: u32,
    pub streak_days: u32,
    pub weekly_goal: u32,
    pub weekly_progress: u32,
    pub favorite_environments: Vec<String>,
    pub mood_trend: Vec<MoodPoint>,
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    pub date: String,
    pub sessions: u32,
    pub minutes: u32,
    pub mood: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentUsage {
    pub environment_id: String,
    pub name: String,
    pub sessions: u32,
    pub average_rating: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    pub sessions_this_week: u32,
    pub minutes_this_week: u32,
    pub average_mood: f32,
    pub mood_improvement: f32,
    pub streak_record: u32,
    pub daily_activity: Vec<DailyActivity>,
    pub environment_usage: Vec<EnvironmentUsage>,
}

/// Summary biometrics attached to a completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricSummary {
    pub avg_heart_rate: f32,
    pub stress_level: f32,
    pub breathing_rate: f32,
}

/// One completed meditation session, as reported to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub id: String,
    pub user_id: String,
    pub environment_id: String,
    /// Minutes.
    pub duration: u32,
    pub completed_at: DateTime<Utc>,
    pub mood_before: u8,
    pub mood_after: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biometric_data: Option<BiometricSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumStatus {
    pub is_premium: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

// ── Service ──────────────────────────────────────────────────────────────

/// Typed access to every backend endpoint the app uses.
pub struct ApiService<T: Transport> {
    transport: T,
    token: Option<String>,
}

impl ApiService<OfflineTransport> {
    /// Service with no backend; everything is served from the mock table.
    pub fn offline() -> Self {
        Self::new(OfflineTransport)
    }
}

impl<T: Transport> ApiService<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            token: None,
        }
    }

    /// Bearer token attached to every request from now on.
    pub fn set_auth_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    fn request<D>(&mut self, method: &str, endpoint: &str, body: Option<Value>) -> ApiResponse<D>
    where
        D: DeserializeOwned + Default,
    {
        match self
            .transport
            .request(method, endpoint, self.token.as_deref(), body.as_ref())
        {
            Ok(value) => match serde_json::from_value::<D>(value) {
                Ok(data) => {
                    return ApiResponse {
                        data,
                        message: "OK".to_string(),
                        source: ResponseSource::Live,
                    };
                }
                Err(err) => warn!(
                    "{} {} returned an unreadable payload ({}), serving mock data",
                    method, endpoint, err
                ),
            },
            Err(err) => warn!("{} {} failed ({}), serving mock data", method, endpoint, err),
        }
        mock_response(method, endpoint)
    }

    // User management
    pub fn get_user_progress(&mut self) -> ApiResponse<UserProgress> {
        self.request("GET", "/user/progress", None)
    }

    pub fn update_user_profile(&mut self, profile: &Value) -> ApiResponse<Value> {
        self.request("PUT", "/user/profile", Some(profile.clone()))
    }

    // Session management
    pub fn start_session(&mut self, environment_id: &str) -> ApiResponse<Value> {
        self.request(
            "POST",
            "/sessions/start",
            Some(json!({ "environmentId": environment_id })),
        )
    }

    pub fn complete_session(&mut self, session: &UserSession) -> ApiResponse<UserSession> {
        self.request(
            "POST",
            "/sessions/complete",
            serde_json::to_value(session).ok(),
        )
    }

    pub fn get_session_history(&mut self) -> ApiResponse<Vec<UserSession>> {
        self.request("GET", "/sessions/history", None)
    }

    // Analytics
    pub fn get_analytics(&mut self) -> ApiResponse<AnalyticsData> {
        self.request("GET", "/analytics", None)
    }

    pub fn log_mood(&mut self, mood: u8, timestamp: DateTime<Utc>) -> ApiResponse<Value> {
        self.request(
            "POST",
            "/mood/log",
            Some(json!({ "mood": mood, "timestamp": timestamp })),
        )
    }

    // Environments
    pub fn get_environment_stats(&mut self, environment_id: &str) -> ApiResponse<Value> {
        self.request(
            "GET",
            &format!("/environments/{}/stats", environment_id),
            None,
        )
    }

    pub fn rate_environment(&mut self, environment_id: &str, rating: f32) -> ApiResponse<Value> {
        self.request(
            "POST",
            &format!("/environments/{}/rate", environment_id),
            Some(json!({ "rating": rating })),
        )
    }

    // Biometrics
    pub fn submit_biometric_data(&mut self, data: &Value) -> ApiResponse<Value> {
        self.request("POST", "/biometric", Some(data.clone()))
    }

    // Notifications
    pub fn update_notification_settings(&mut self, settings: &Value) -> ApiResponse<Value> {
        self.request("PUT", "/notifications/settings", Some(settings.clone()))
    }

    // Premium
    pub fn check_premium_status(&mut self) -> ApiResponse<PremiumStatus> {
        self.request("GET", "/premium/status", None)
    }

    pub fn upgrade_to_premium(&mut self, plan_id: &str) -> ApiResponse<Value> {
        self.request("POST", "/premium/upgrade", Some(json!({ "planId": plan_id })))
    }
}

// ── Mock table ───────────────────────────────────────────────────────────

/// Canned development payload for an endpoint, keyed `METHOD:endpoint`.
/// Endpoints without an entry get an empty object and a generic message.
fn mock_response<D: DeserializeOwned + Default>(method: &str, endpoint: &str) -> ApiResponse<D> {
    let (value, message) = match format!("{}:{}", method, endpoint).as_str() {
        "GET:/user/progress" => (mock_user_progress(), "Progress retrieved successfully"),
        "GET:/analytics" => (mock_analytics(), "Analytics retrieved successfully"),
        _ => (Value::Object(serde_json::Map::new()), "Mock response"),
    };
    ApiResponse {
        data: serde_json::from_value(value).unwrap_or_default(),
        message: message.to_string(),
        source: ResponseSource::MockFallback,
    }
}

fn mock_user_progress() -> Value {
    json!({
        "totalSessions": 23,
        "totalMinutes": 487,
        "streakDays": 7,
        "weeklyGoal": 5,
        "weeklyProgress": 4,
        "favoriteEnvironments": ["forest-sanctuary", "ocean-depths"],
        "moodTrend": [
            { "date": "2024-01-15", "mood": 6 },
            { "date": "2024-01-16", "mood": 7 },
            { "date": "2024-01-17", "mood": 8 },
            { "date": "2024-01-18", "mood": 7 },
            { "date": "2024-01-19", "mood": 8 },
            { "date": "2024-01-20", "mood": 9 },
            { "date": "2024-01-21", "mood": 8 },
        ],
        "achievements": [
            {
                "id": "first-session",
                "title": "First Steps",
                "description": "Complete your first meditation session",
                "unlockedAt": "2024-01-15T00:00:00Z",
            },
            {
                "id": "7-day-streak",
                "title": "7-Day Streak",
                "description": "Meditate for 7 consecutive days",
                "unlockedAt": "2024-01-21T00:00:00Z",
            },
        ],
    })
}

fn mock_analytics() -> Value {
    json!({
        "sessionsThisWeek": 5,
        "minutesThisWeek": 95,
        "averageMood": 7.5,
        "moodImprovement": 15,
        "streakRecord": 12,
        "dailyActivity": [
            { "date": "2024-01-15", "sessions": 1, "minutes": 15, "mood": 7 },
            { "date": "2024-01-16", "sessions": 1, "minutes": 20, "mood": 8 },
            { "date": "2024-01-17", "sessions": 0, "minutes": 0, "mood": 0 },
            { "date": "2024-01-18", "sessions": 2, "minutes": 30, "mood": 8 },
            { "date": "2024-01-19", "sessions": 1, "minutes": 15, "mood": 7 },
            { "date": "2024-01-20", "sessions": 1, "minutes": 10, "mood": 8 },
            { "date": "2024-01-21", "sessions": 1, "minutes": 25, "mood": 9 },
        ],
        "environmentUsage": [
            {
                "environmentId": "forest-sanctuary",
                "name": "Forest Sanctuary",
                "sessions": 8,
                "averageRating": 4.6,
            },
            {
                "environmentId": "ocean-depths",
                "name": "Ocean Depths",
                "sessions": 6,
                "averageRating": 4.8,
            },
            {
                "environmentId": "zen-garden",
                "name": "Zen Garden",
                "sessions": 4,
                "averageRating": 4.4,
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Seen = Rc<RefCell<Option<(String, String, Option<String>)>>>;

    /// Transport that replies with a fixed payload and records the call.
    struct CannedTransport {
        reply: Value,
        seen: Seen,
    }

    impl Transport for CannedTransport {
        fn request(
            &mut self,
            method: &str,
            endpoint: &str,
            token: Option<&str>,
            _body: Option<&Value>,
        ) -> Result<Value, TransportError> {
            *self.seen.borrow_mut() = Some((
                method.to_string(),
                endpoint.to_string(),
                token.map(str::to_string),
            ));
            Ok(self.reply.clone())
        }
    }

    #[test]
    fn test_offline_progress_serves_tagged_mock_data() {
        let mut api = ApiService::offline();
        let response = api.get_user_progress();

        assert_eq!(response.source, ResponseSource::MockFallback);
        assert!(response.source.is_mock());
        assert_eq!(response.message, "Progress retrieved successfully");
        assert_eq!(response.data.total_sessions, 23);
        assert_eq!(response.data.total_minutes, 487);
        assert_eq!(response.data.weekly_goal, 5);
        assert_eq!(response.data.weekly_progress, 4);
        assert_eq!(response.data.mood_trend.len(), 7);
        assert_eq!(response.data.achievements.len(), 2);
        assert_eq!(response.data.achievements[0].id, "first-session");
    }

    #[test]
    fn test_offline_analytics_mock_payload() {
        let mut api = ApiService::offline();
        let response = api.get_analytics();

        assert_eq!(response.source, ResponseSource::MockFallback);
        assert_eq!(response.message, "Analytics retrieved successfully");
        assert_eq!(response.data.sessions_this_week, 5);
        assert_eq!(response.data.minutes_this_week, 95);
        assert!((response.data.average_mood - 7.5).abs() < f32::EPSILON);
        assert_eq!(response.data.streak_record, 12);
        assert_eq!(response.data.daily_activity.len(), 7);
        assert_eq!(response.data.environment_usage.len(), 3);
        assert_eq!(
            response.data.environment_usage[0].environment_id,
            "forest-sanctuary"
        );
    }

    #[test]
    fn test_unkeyed_endpoint_gets_generic_mock() {
        let mut api = ApiService::offline();

        let started = api.start_session("forest-sanctuary");
        assert_eq!(started.source, ResponseSource::MockFallback);
        assert_eq!(started.message, "Mock response");
        assert_eq!(started.data, json!({}));

        let history = api.get_session_history();
        assert_eq!(history.message, "Mock response");
        assert!(history.data.is_empty());
    }

    #[test]
    fn test_live_reply_is_tagged_live_and_carries_the_token() {
        let seen: Seen = Rc::new(RefCell::new(None));
        let transport = CannedTransport {
            reply: json!({ "isPremium": true, "expiresAt": null }),
            seen: Rc::clone(&seen),
        };
        let mut api = ApiService::new(transport);
        api.set_auth_token("token-123");

        let response = api.check_premium_status();
        assert_eq!(response.source, ResponseSource::Live);
        assert_eq!(response.message, "OK");
        assert!(response.data.is_premium);

        let (method, endpoint, token) = seen.borrow().clone().unwrap();
        assert_eq!(method, "GET");
        assert_eq!(endpoint, "/premium/status");
        assert_eq!(token.as_deref(), Some("token-123"));
    }

    #[test]
    fn test_unreadable_live_reply_falls_back_to_mock() {
        let seen: Seen = Rc::new(RefCell::new(None));
        let transport = CannedTransport {
            reply: json!("not an object"),
            seen,
        };
        let mut api = ApiService::new(transport);

        let response = api.get_user_progress();
        assert_eq!(response.source, ResponseSource::MockFallback);
        assert_eq!(response.data.total_sessions, 23);
    }

    #[test]
    fn test_premium_fallback_defaults_to_not_premium() {
        let mut api = ApiService::offline();
        let response = api.check_premium_status();
        assert_eq!(response.source, ResponseSource::MockFallback);
        assert!(!response.data.is_premium);
        assert!(response.data.expires_at.is_none());
    }

    #[test]
    fn test_complete_session_round_trips_through_a_live_transport() {
        let session = UserSession {
            id: "s-1".to_string(),
            user_id: "1".to_string(),
            environment_id: "forest-sanctuary".to_string(),
            duration: 10,
            completed_at: Default::default(),
            mood_before: 5,
            mood_after: 8,
            biometric_data: Some(BiometricSummary {
                avg_heart_rate: 68.0,
                stress_level: 30.0,
                breathing_rate: 14.0,
            }),
            notes: None,
        };

        let seen: Seen = Rc::new(RefCell::new(None));
        let transport = CannedTransport {
            reply: serde_json::to_value(&session).unwrap(),
            seen,
        };
        let mut api = ApiService::new(transport);

        let response = api.complete_session(&session);
        assert_eq!(response.source, ResponseSource::Live);
        assert_eq!(response.data, session);
    }
}
